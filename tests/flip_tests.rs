use rstest::rstest;
use trendforge::config::{FlipCutoffs, ThresholdProfile};
use trendforge::signals::{classify_side, label_flip, FlipLean, LeanTag};

fn flip(away: f64, home: f64, cutoffs: &FlipCutoffs) -> LeanTag {
    let p = ThresholdProfile::HALF;
    label_flip(
        classify_side(Some(away), &p),
        classify_side(Some(home), &p),
        cutoffs,
    )
    .tag
}

// Half profile: Red <= 53, Yellow (53, 57], Green > 57.
#[rstest]
#[case::green_green(60.0, 62.0, FlipLean::HeavyLeanFlip)]
#[case::green_yellow(60.0, 55.0, FlipLean::SlightLeanFlip)]
#[case::yellow_green(55.0, 60.0, FlipLean::SlightLeanFlip)]
#[case::yellow_yellow(55.0, 56.0, FlipLean::SlightLeanFlip)]
#[case::yellow_red(55.0, 50.0, FlipLean::NoPlay)]
#[case::red_yellow(50.0, 55.0, FlipLean::NoPlay)]
#[case::green_red_rescued(60.0, 50.0, FlipLean::SlightLeanFlip)]
#[case::green_red_at_floor(60.0, 45.0, FlipLean::NoPlay)]
#[case::green_red_low(60.0, 30.0, FlipLean::NoPlay)]
#[case::red_green_rescued(46.0, 60.0, FlipLean::SlightLeanFlip)]
#[case::red_green_low(40.0, 60.0, FlipLean::NoPlay)]
#[case::red_red_low(38.0, 40.0, FlipLean::HeavyLeanSame)]
#[case::red_red_at_ceiling(40.0, 40.0, FlipLean::HeavyLeanSame)]
#[case::red_red_one_above(38.0, 41.0, FlipLean::NoPlay)]
#[case::red_red_42(42.0, 30.0, FlipLean::NoPlay)]
#[case::red_red_high(50.0, 52.0, FlipLean::NoPlay)]
fn test_flip_table(#[case] away: f64, #[case] home: f64, #[case] expected: FlipLean) {
    assert_eq!(flip(away, home, &FlipCutoffs::default()), LeanTag::Flip(expected));
}

#[test]
fn test_rescue_gate_only_checks_the_red_side() {
    // Green/Red: the home (red) value decides; Red/Green: the away value.
    let c = FlipCutoffs::default();
    assert_eq!(flip(60.0, 46.0, &c), LeanTag::Flip(FlipLean::SlightLeanFlip));
    assert_eq!(flip(44.0, 60.0, &c), LeanTag::Flip(FlipLean::NoPlay));
}

#[test]
fn test_fractions_feed_the_magnitude_gates() {
    let c = FlipCutoffs::default();
    assert_eq!(flip(0.38, 0.40, &c), LeanTag::Flip(FlipLean::HeavyLeanSame));
    assert_eq!(flip(0.60, 0.50, &c), LeanTag::Flip(FlipLean::SlightLeanFlip));
}

#[test]
fn test_cutoffs_are_configurable() {
    let loose = FlipCutoffs {
        rescue_floor: 45.0,
        same_ceiling: 42.0,
    };
    assert_eq!(flip(38.0, 41.0, &loose), LeanTag::Flip(FlipLean::HeavyLeanSame));

    let strict = FlipCutoffs {
        rescue_floor: 50.0,
        same_ceiling: 40.0,
    };
    assert_eq!(flip(60.0, 48.0, &strict), LeanTag::Flip(FlipLean::NoPlay));
}

#[test]
fn test_flip_results_name_no_team() {
    let p = ThresholdProfile::HALF;
    let res = label_flip(
        classify_side(Some(60.0), &p),
        classify_side(Some(60.0), &p),
        &FlipCutoffs::default(),
    );
    assert!(res.favored.is_none());
    assert_eq!(res.label(), "Heavy Lean Flip");
    assert_eq!(res.strength(), 3);
}

#[test]
fn test_missing_side_is_no_play() {
    let p = ThresholdProfile::HALF;
    let res = label_flip(None, classify_side(Some(30.0), &p), &FlipCutoffs::default());
    assert_eq!(res.tag, LeanTag::Flip(FlipLean::NoPlay));
    assert_eq!(res.label(), "No Play");
    assert_eq!(res.strength(), 0);
}
