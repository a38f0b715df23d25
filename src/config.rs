use crate::error::{TfResult, TrendForgeError};
use crate::signals::sort::SortMode;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use strum_macros::Display;
use tracing::info;

/// Everything the engine needs besides the rows themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub params: EngineParams,
    pub profiles: ThresholdProfiles,
    pub groups: Vec<ScoreGroupDefinition>,
    pub questions: Vec<ConsensusQuestion>,
    /// Over/under split keys that get a directional consensus call.
    pub totals: Vec<String>,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineParams {
    /// Metrics backed by fewer games than this are left out of group scores.
    #[arg(long, default_value_t = 5)]
    pub min_sample_size: u32,

    // === FLIP TABLE GATES ===
    // Green/Red flips are rescued to Slight Lean Flip above this value.
    #[arg(long, default_value_t = 45.0)]
    pub flip_rescue_floor: f64,
    // Red/Red flips become Heavy Lean Same at or below this value.
    #[arg(long, default_value_t = 40.0)]
    pub flip_same_ceiling: f64,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            min_sample_size: 5,
            flip_rescue_floor: 45.0,
            flip_same_ceiling: 40.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipCutoffs {
    pub rescue_floor: f64,
    pub same_ceiling: f64,
}

impl Default for FlipCutoffs {
    fn default() -> Self {
        EngineParams::default().flip_cutoffs()
    }
}

impl EngineParams {
    pub fn flip_cutoffs(&self) -> FlipCutoffs {
        FlipCutoffs {
            rescue_floor: self.flip_rescue_floor,
            same_ceiling: self.flip_same_ceiling,
        }
    }

    /// Copies only the values the user actually typed on the command line.
    pub fn merge_from_cli(&mut self, cli_params: &EngineParams, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli_params.$field;
                }
            };
        }

        update_if_present!(min_sample_size, "min_sample_size");
        update_if_present!(flip_rescue_floor, "flip_rescue_floor");
        update_if_present!(flip_same_ceiling, "flip_same_ceiling");
    }
}

/// Tier boundaries on the 0-100 scale.
///
/// A value is Red below `red_ceiling` (or at it, when `red_inclusive`),
/// Green strictly above `green_floor`, Yellow in between.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdProfile {
    pub red_ceiling: f64,
    pub red_inclusive: bool,
    pub green_floor: f64,
}

impl ThresholdProfile {
    /// Classic ATS / O-U cover percentages.
    pub const GENERAL: ThresholdProfile = ThresholdProfile {
        red_ceiling: 45.0,
        red_inclusive: false,
        green_floor: 55.0,
    };

    /// First-half, second-half and flip splits.
    pub const HALF: ThresholdProfile = ThresholdProfile {
        red_ceiling: 53.0,
        red_inclusive: true,
        green_floor: 57.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProfileKind {
    General,
    Half,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdProfiles {
    pub general: ThresholdProfile,
    pub half: ThresholdProfile,
}

impl Default for ThresholdProfiles {
    fn default() -> Self {
        Self {
            general: ThresholdProfile::GENERAL,
            half: ThresholdProfile::HALF,
        }
    }
}

impl ThresholdProfiles {
    pub fn get(&self, kind: ProfileKind) -> &ThresholdProfile {
        match kind {
            ProfileKind::General => &self.general,
            ProfileKind::Half => &self.half,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LabelMode {
    #[default]
    Standard,
    Flip,
}

impl LabelMode {
    pub fn max_strength(self) -> u32 {
        match self {
            LabelMode::Standard => 2,
            LabelMode::Flip => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMember {
    pub split: String,
    #[serde(default)]
    pub mode: LabelMode,
    /// Defaults to `half` for flip members and `general` otherwise.
    #[serde(default)]
    pub profile: Option<ProfileKind>,
    #[serde(default)]
    pub half: String,
}

impl GroupMember {
    pub fn standard(split: &str, profile: ProfileKind, half: &str) -> Self {
        Self {
            split: split.to_string(),
            mode: LabelMode::Standard,
            profile: Some(profile),
            half: half.to_string(),
        }
    }

    pub fn flip(split: &str) -> Self {
        Self {
            split: split.to_string(),
            mode: LabelMode::Flip,
            profile: Some(ProfileKind::Half),
            half: String::new(),
        }
    }

    pub fn profile_kind(&self) -> ProfileKind {
        match (self.mode, self.profile) {
            (_, Some(kind)) => kind,
            (LabelMode::Flip, None) => ProfileKind::Half,
            (LabelMode::Standard, None) => ProfileKind::General,
        }
    }
}

/// A fixed list of splits scored together. Its maximum score is constant,
/// so scores are comparable across games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreGroupDefinition {
    pub name: String,
    #[serde(default)]
    pub title: String,
    pub members: Vec<GroupMember>,
}

impl ScoreGroupDefinition {
    pub fn max_score(&self) -> u32 {
        self.members.iter().map(|m| m.mode.max_strength()).sum()
    }
}

/// Splits that all address one question, e.g. "who covers the first half".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusQuestion {
    pub name: String,
    #[serde(default)]
    pub title: String,
    pub splits: Vec<String>,
    #[serde(default)]
    pub half: String,
}

fn half_group(name: &str, title: &str, prefix: &str, half: &str) -> ScoreGroupDefinition {
    ScoreGroupDefinition {
        name: name.to_string(),
        title: title.to_string(),
        members: ["side", "side_rest", "fav_dog"]
            .iter()
            .map(|s| GroupMember::standard(&format!("{}_{}", prefix, s), ProfileKind::Half, half))
            .collect(),
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        let flip = ScoreGroupDefinition {
            name: "flip".to_string(),
            title: "Halftime Flips".to_string(),
            members: ["flip_side", "flip_side_rest", "flip_fav_dog"]
                .iter()
                .map(|s| GroupMember::flip(s))
                .collect(),
        };
        let situational = ScoreGroupDefinition {
            name: "situational".to_string(),
            title: "Situational ATS".to_string(),
            members: ["ats_side", "ats_last_result", "ats_rest", "ats_fav_dog"]
                .iter()
                .map(|s| GroupMember::standard(s, ProfileKind::General, ""))
                .collect(),
        };

        let question = |name: &str, title: &str, prefix: &str, half: &str| ConsensusQuestion {
            name: name.to_string(),
            title: title.to_string(),
            splits: ["side", "side_rest", "fav_dog"]
                .iter()
                .map(|s| format!("{}_{}", prefix, s))
                .collect(),
            half: half.to_string(),
        };

        Self {
            params: EngineParams::default(),
            profiles: ThresholdProfiles::default(),
            groups: vec![
                half_group("first-half", "1H Signals", "1h", "1H"),
                half_group("second-half", "2H Signals", "2h", "2H"),
                flip,
                situational,
            ],
            questions: vec![
                question("1h-cover", "1H Cover Consensus", "1h", "1H"),
                question("2h-cover", "2H Cover Consensus", "2h", "2H"),
            ],
            totals: vec!["ou_side".to_string(), "ou_last_result".to_string()],
        }
    }
}

impl EngineConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> TfResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            TrendForgeError::Config(format!("Could not read profile {:?}: {}", path, e))
        })?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        info!(
            "Loaded engine profile {:?}: {} groups, {} questions",
            path,
            config.groups.len(),
            config.questions.len()
        );
        Ok(config)
    }

    pub fn validate(&self) -> TfResult<()> {
        for (name, p) in [("general", &self.profiles.general), ("half", &self.profiles.half)] {
            if p.red_ceiling.is_nan() || p.green_floor.is_nan() || p.red_ceiling > p.green_floor {
                return Err(TrendForgeError::Config(format!(
                    "Profile '{}' has red ceiling {} above green floor {}",
                    name, p.red_ceiling, p.green_floor
                )));
            }
        }

        let mut seen = HashSet::new();
        for g in &self.groups {
            if g.name.eq_ignore_ascii_case(SortMode::CHRONOLOGICAL) {
                return Err(TrendForgeError::Config(format!(
                    "Group name '{}' is reserved",
                    g.name
                )));
            }
            if !seen.insert(g.name.as_str()) {
                return Err(TrendForgeError::Config(format!(
                    "Duplicate group '{}'",
                    g.name
                )));
            }
            if g.members.is_empty() {
                return Err(TrendForgeError::Config(format!(
                    "Group '{}' has no members",
                    g.name
                )));
            }
            for m in &g.members {
                if m.mode == LabelMode::Flip && m.profile_kind() != ProfileKind::Half {
                    return Err(TrendForgeError::Config(format!(
                        "Flip split '{}' in group '{}' must use the half profile",
                        m.split, g.name
                    )));
                }
            }
        }

        for q in &self.questions {
            if q.splits.is_empty() {
                return Err(TrendForgeError::Config(format!(
                    "Consensus question '{}' has no splits",
                    q.name
                )));
            }
        }
        Ok(())
    }

    pub fn group(&self, name: &str) -> Option<&ScoreGroupDefinition> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// First group member that scores `split`; decides how the split is labelled.
    pub fn member_for(&self, split: &str) -> Option<&GroupMember> {
        self.groups
            .iter()
            .flat_map(|g| g.members.iter())
            .find(|m| m.split == split)
    }

    pub fn sort_mode(&self, raw: &str) -> TfResult<SortMode> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case(SortMode::CHRONOLOGICAL) {
            return Ok(SortMode::Chronological);
        }
        match self.groups.iter().find(|g| g.name.eq_ignore_ascii_case(trimmed)) {
            Some(g) => Ok(SortMode::Group(g.name.clone())),
            None => {
                let mut known = vec![SortMode::CHRONOLOGICAL.to_string()];
                known.extend(self.groups.iter().map(|g| g.name.clone()));
                Err(TrendForgeError::UnknownSortMode {
                    mode: raw.to_string(),
                    known: known.join(", "),
                })
            }
        }
    }
}
