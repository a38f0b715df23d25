use super::bucket::classify_side;
use super::types::{Bucket, Classified, Matchup, OuConsensusResult, OuDirection, Side};
use crate::config::ThresholdProfile;
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsSide {
    pub over: Option<f64>,
    pub under: Option<f64>,
    pub sample_size: Option<u32>,
}

/// One over/under split for both teams of a game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsSplit {
    pub away: TotalsSide,
    pub home: TotalsSide,
    pub label: String,
}

impl TotalsSplit {
    pub fn side_mut(&mut self, side: Side) -> &mut TotalsSide {
        match side {
            Side::Away => &mut self.away,
            Side::Home => &mut self.home,
        }
    }
}

struct OuView {
    away_over: Option<Classified>,
    away_under: Option<Classified>,
    home_over: Option<Classified>,
    home_under: Option<Classified>,
}

impl OuView {
    fn get(&self, side: Side, dir: OuDirection) -> Option<Classified> {
        match (side, dir) {
            (Side::Away, OuDirection::Over) => self.away_over,
            (Side::Away, OuDirection::Under) => self.away_under,
            (Side::Home, OuDirection::Over) => self.home_over,
            (Side::Home, OuDirection::Under) => self.home_under,
        }
    }

    fn is(&self, side: Side, dir: OuDirection, bucket: Bucket) -> bool {
        self.get(side, dir).is_some_and(|c| c.bucket == bucket)
    }

    /// Side with the higher value in `dir`; ties go to the home team.
    fn higher(&self, dir: OuDirection) -> Side {
        let away = self.get(Side::Away, dir).map_or(f64::MIN, |c| c.pct);
        let home = self.get(Side::Home, dir).map_or(f64::MIN, |c| c.pct);
        if away > home {
            Side::Away
        } else {
            Side::Home
        }
    }
}

enum Verdict {
    Call(OuDirection, Side),
    NoConsensus,
}

type OuRule = fn(&OuView) -> Option<Verdict>;

fn both_green(view: &OuView, dir: OuDirection) -> Option<Verdict> {
    (view.is(Side::Away, dir, Bucket::Green) && view.is(Side::Home, dir, Bucket::Green))
        .then(|| Verdict::Call(dir, view.higher(dir)))
}

fn both_green_over(view: &OuView) -> Option<Verdict> {
    both_green(view, OuDirection::Over)
}

fn both_green_under(view: &OuView) -> Option<Verdict> {
    both_green(view, OuDirection::Under)
}

fn green_conflict(view: &OuView) -> Option<Verdict> {
    let crossed = |over_side: Side| {
        view.is(over_side, OuDirection::Over, Bucket::Green)
            && view.is(over_side.opposite(), OuDirection::Under, Bucket::Green)
    };
    (crossed(Side::Away) || crossed(Side::Home)).then_some(Verdict::NoConsensus)
}

fn green_with_yellow(view: &OuView) -> Option<Verdict> {
    for dir in [OuDirection::Over, OuDirection::Under] {
        for side in [Side::Away, Side::Home] {
            if view.is(side, dir, Bucket::Green) && view.is(side.opposite(), dir, Bucket::Yellow) {
                return Some(Verdict::Call(dir, side));
            }
        }
    }
    None
}

fn both_yellow(view: &OuView) -> Option<Verdict> {
    [OuDirection::Over, OuDirection::Under]
        .into_iter()
        .any(|dir| view.is(Side::Away, dir, Bucket::Yellow) && view.is(Side::Home, dir, Bucket::Yellow))
        .then_some(Verdict::NoConsensus)
}

fn fallthrough(_: &OuView) -> Option<Verdict> {
    Some(Verdict::NoConsensus)
}

// Evaluated in order. Agreement on Green comes first, the crossed-Green
// conflict must precede the Green/Yellow agreement rows.
const OU_RULES: [(&str, OuRule); 6] = [
    ("both-green-over", both_green_over),
    ("both-green-under", both_green_under),
    ("green-conflict", green_conflict),
    ("green-with-yellow", green_with_yellow),
    ("both-yellow", both_yellow),
    ("fallthrough", fallthrough),
];

/// Directional over/under call for a game, classified with `profile`.
pub fn ou_consensus(
    split: &TotalsSplit,
    teams: &Matchup,
    profile: &ThresholdProfile,
) -> OuConsensusResult {
    let view = OuView {
        away_over: classify_side(split.away.over, profile),
        away_under: classify_side(split.away.under, profile),
        home_over: classify_side(split.home.over, profile),
        home_under: classify_side(split.home.under, profile),
    };

    for (name, rule) in OU_RULES.iter() {
        if let Some(verdict) = rule(&view) {
            trace!(rule = *name, split = %split.label, "totals rule matched");
            return match verdict {
                Verdict::Call(direction, side) => OuConsensusResult::Call {
                    direction,
                    favored: teams.favor(side, ""),
                },
                Verdict::NoConsensus => OuConsensusResult::NoConsensus,
            };
        }
    }
    OuConsensusResult::NoConsensus
}
