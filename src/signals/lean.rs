use super::types::{
    Bucket, Classified, FlipLean, LeanResult, LeanTag, Matchup, Side, StandardLean,
};
use crate::config::{FlipCutoffs, LabelMode};
use std::cmp::Ordering;
use Bucket::{Green, Red, Yellow};

/// Team-vs-team comparison of two tiers.
///
/// One tier apart is a Slight Lean, two tiers apart a Heavy Lean, both
/// favoring the higher tier. Equal or missing tiers are No Play.
pub fn label_standard(
    away: Option<Bucket>,
    home: Option<Bucket>,
    teams: &Matchup,
    half: &str,
) -> LeanResult {
    let (Some(a), Some(h)) = (away, home) else {
        return LeanResult::no_play();
    };

    let (favored, gap) = match a.cmp(&h) {
        Ordering::Equal => return LeanResult::no_play(),
        Ordering::Greater => (Side::Away, a.rank() - h.rank()),
        Ordering::Less => (Side::Home, h.rank() - a.rank()),
    };

    let tag = if gap >= 2 {
        StandardLean::HeavyLean
    } else {
        StandardLean::SlightLean
    };

    LeanResult {
        tag: LeanTag::Standard(tag),
        favored: Some(teams.favor(favored, half)),
    }
}

#[derive(Debug, Clone, Copy)]
enum Gate {
    Always,
    HomeAboveRescue,
    AwayAboveRescue,
    BothAtOrBelowSame,
}

impl Gate {
    fn passes(self, away: f64, home: f64, cutoffs: &FlipCutoffs) -> bool {
        match self {
            Gate::Always => true,
            Gate::HomeAboveRescue => home > cutoffs.rescue_floor,
            Gate::AwayAboveRescue => away > cutoffs.rescue_floor,
            Gate::BothAtOrBelowSame => away <= cutoffs.same_ceiling && home <= cutoffs.same_ceiling,
        }
    }
}

struct FlipRule {
    away: Bucket,
    home: Bucket,
    gate: Gate,
    outcome: FlipLean,
}

const fn rule(away: Bucket, home: Bucket, gate: Gate, outcome: FlipLean) -> FlipRule {
    FlipRule {
        away,
        home,
        gate,
        outcome,
    }
}

// First match wins. Gated rows sit above their ungated fallbacks.
const FLIP_TABLE: [FlipRule; 12] = [
    rule(Green, Green, Gate::Always, FlipLean::HeavyLeanFlip),
    rule(Green, Yellow, Gate::Always, FlipLean::SlightLeanFlip),
    rule(Yellow, Green, Gate::Always, FlipLean::SlightLeanFlip),
    rule(Yellow, Yellow, Gate::Always, FlipLean::SlightLeanFlip),
    rule(Yellow, Red, Gate::Always, FlipLean::NoPlay),
    rule(Red, Yellow, Gate::Always, FlipLean::NoPlay),
    rule(Green, Red, Gate::HomeAboveRescue, FlipLean::SlightLeanFlip),
    rule(Red, Green, Gate::AwayAboveRescue, FlipLean::SlightLeanFlip),
    rule(Green, Red, Gate::Always, FlipLean::NoPlay),
    rule(Red, Green, Gate::Always, FlipLean::NoPlay),
    rule(Red, Red, Gate::BothAtOrBelowSame, FlipLean::HeavyLeanSame),
    rule(Red, Red, Gate::Always, FlipLean::NoPlay),
];

/// Consistency of one signal across halves. Carries no favored team.
pub fn label_flip(
    away: Option<Classified>,
    home: Option<Classified>,
    cutoffs: &FlipCutoffs,
) -> LeanResult {
    let (Some(a), Some(h)) = (away, home) else {
        return LeanResult::flip(FlipLean::NoPlay);
    };

    let outcome = FLIP_TABLE
        .iter()
        .find(|r| r.away == a.bucket && r.home == h.bucket && r.gate.passes(a.pct, h.pct, cutoffs))
        .map(|r| r.outcome)
        .unwrap_or(FlipLean::NoPlay);

    LeanResult::flip(outcome)
}

pub fn label_pair(
    away: Option<Classified>,
    home: Option<Classified>,
    teams: &Matchup,
    half: &str,
    mode: LabelMode,
    cutoffs: &FlipCutoffs,
) -> LeanResult {
    match mode {
        LabelMode::Standard => label_standard(
            away.map(|c| c.bucket),
            home.map(|c| c.bucket),
            teams,
            half,
        ),
        LabelMode::Flip => label_flip(away, home, cutoffs),
    }
}
