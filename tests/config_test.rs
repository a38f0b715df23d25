use clap::{CommandFactory, FromArgMatches, Parser};
use trendforge::config::{
    EngineConfig, EngineParams, GroupMember, LabelMode, ProfileKind, ScoreGroupDefinition,
    ThresholdProfile,
};
use trendforge::error::TrendForgeError;
use trendforge::signals::SortMode;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    params: EngineParams,
}

fn parse(args: &[&str]) -> (TestCli, clap::ArgMatches) {
    let matches = TestCli::command().get_matches_from(args);
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli, matches)
}

#[test]
fn test_defaults() {
    let config = EngineConfig::default();
    assert_eq!(config.params.min_sample_size, 5);
    assert_eq!(config.params.flip_rescue_floor, 45.0);
    assert_eq!(config.params.flip_same_ceiling, 40.0);
    assert_eq!(config.profiles.general, ThresholdProfile::GENERAL);
    assert_eq!(config.profiles.half, ThresholdProfile::HALF);
    assert!(config.validate().is_ok());
}

#[test]
fn test_cli_defaults_match_struct_defaults() {
    let (cli, _) = parse(&["test"]);
    let d = EngineParams::default();
    assert_eq!(cli.params.min_sample_size, d.min_sample_size);
    assert_eq!(cli.params.flip_rescue_floor, d.flip_rescue_floor);
    assert_eq!(cli.params.flip_same_ceiling, d.flip_same_ceiling);
}

#[test]
fn test_merge_only_typed_flags() {
    let (cli, matches) = parse(&["test", "--min-sample-size", "8"]);
    let mut base = EngineParams {
        min_sample_size: 3,
        flip_rescue_floor: 47.0,
        flip_same_ceiling: 39.0,
    };
    base.merge_from_cli(&cli.params, &matches);
    assert_eq!(base.min_sample_size, 8);
    assert_eq!(base.flip_rescue_floor, 47.0);
    assert_eq!(base.flip_same_ceiling, 39.0);
}

#[test]
fn test_member_profile_resolution() {
    let flip = GroupMember {
        split: "x".to_string(),
        mode: LabelMode::Flip,
        profile: None,
        half: String::new(),
    };
    assert_eq!(flip.profile_kind(), ProfileKind::Half);
    let standard = GroupMember {
        mode: LabelMode::Standard,
        ..flip
    };
    assert_eq!(standard.profile_kind(), ProfileKind::General);
}

fn expect_config_error(config: &EngineConfig, needle: &str) {
    match config.validate() {
        Err(TrendForgeError::Config(msg)) => assert!(msg.contains(needle), "{}", msg),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_validate_rejects_bad_profiles() {
    let mut config = EngineConfig::default();
    config.profiles.general.red_ceiling = 60.0;
    expect_config_error(&config, "red ceiling");
}

#[test]
fn test_validate_rejects_bad_groups() {
    let mut dup = EngineConfig::default();
    let copy = dup.groups[0].clone();
    dup.groups.push(copy);
    expect_config_error(&dup, "Duplicate");

    let mut reserved = EngineConfig::default();
    reserved.groups[0].name = "Chronological".to_string();
    expect_config_error(&reserved, "reserved");

    let mut empty = EngineConfig::default();
    empty.groups.push(ScoreGroupDefinition {
        name: "empty".to_string(),
        title: String::new(),
        members: vec![],
    });
    expect_config_error(&empty, "no members");

    let mut flip_general = EngineConfig::default();
    flip_general.groups[2].members[0].profile = Some(ProfileKind::General);
    expect_config_error(&flip_general, "half profile");
}

#[test]
fn test_sort_mode_parsing() {
    let config = EngineConfig::default();
    assert_eq!(config.sort_mode("chronological").unwrap(), SortMode::Chronological);
    assert_eq!(config.sort_mode(" Chronological ").unwrap(), SortMode::Chronological);
    assert_eq!(
        config.sort_mode("FLIP").unwrap(),
        SortMode::Group("flip".to_string())
    );
    match config.sort_mode("fourth-quarter") {
        Err(TrendForgeError::UnknownSortMode { known, .. }) => {
            assert!(known.contains("first-half"));
            assert!(known.starts_with("chronological"));
        }
        other => panic!("expected unknown sort mode, got {:?}", other),
    }
}

#[test]
fn test_profile_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");

    let mut config = EngineConfig::default();
    config.params.min_sample_size = 10;
    config.groups.truncate(1);
    std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

    let loaded = EngineConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded.params.min_sample_size, 10);
    assert_eq!(loaded.groups, config.groups);
    assert_eq!(loaded.totals, config.totals);
}

#[test]
fn test_partial_profile_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");
    std::fs::write(
        &path,
        r#"{ "params": { "min_sample_size": 7 },
             "groups": [ { "name": "flips", "members": [ { "split": "flip_side", "mode": "flip" } ] } ] }"#,
    )
    .unwrap();

    let loaded = EngineConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded.params.min_sample_size, 7);
    assert_eq!(loaded.params.flip_same_ceiling, 40.0);
    assert_eq!(loaded.groups.len(), 1);
    assert_eq!(loaded.groups[0].max_score(), 3);
    assert_eq!(loaded.questions.len(), 2);
}

#[test]
fn test_invalid_profile_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        EngineConfig::load_from_file(&path),
        Err(TrendForgeError::Json(_))
    ));
    assert!(matches!(
        EngineConfig::load_from_file(dir.path().join("nope.json")),
        Err(TrendForgeError::Config(_))
    ));
}
