use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

/// Reliability tier of one percentage. Ordered `Red < Yellow < Green`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Bucket {
    Red,
    Yellow,
    Green,
}

impl Bucket {
    pub fn rank(self) -> u8 {
        match self {
            Bucket::Red => 0,
            Bucket::Yellow => 1,
            Bucket::Green => 2,
        }
    }
}

/// A classified side: the normalized 0-100 percentage and its tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classified {
    pub pct: f64,
    pub bucket: Bucket,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    Away,
    Home,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Away => Side::Home,
            Side::Home => Side::Away,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideValue {
    /// Either a fraction in [0,1] or a percentage in [0,100].
    pub value: Option<f64>,
    /// Prior games backing `value`. Absent for derived splits.
    pub sample_size: Option<u32>,
}

impl SideValue {
    pub fn new(value: f64, sample_size: u32) -> Self {
        Self {
            value: Some(value),
            sample_size: Some(sample_size),
        }
    }

    pub fn without_sample(value: f64) -> Self {
        Self {
            value: Some(value),
            sample_size: None,
        }
    }

    pub fn is_under_sampled(&self, min_sample_size: u32) -> bool {
        matches!(self.sample_size, Some(n) if n < min_sample_size)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitMetric {
    pub away: SideValue,
    pub home: SideValue,
    pub label: String,
}

impl SplitMetric {
    pub fn new(label: &str, away: SideValue, home: SideValue) -> Self {
        Self {
            away,
            home,
            label: label.to_string(),
        }
    }

    pub fn side(&self, side: Side) -> &SideValue {
        match side {
            Side::Away => &self.away,
            Side::Home => &self.home,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut SideValue {
        match side {
            Side::Away => &mut self.away,
            Side::Home => &mut self.home,
        }
    }
}

/// The two teams of a game, by display abbreviation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchup {
    pub away: String,
    pub home: String,
}

impl Matchup {
    pub fn new(away: &str, home: &str) -> Self {
        Self {
            away: away.to_string(),
            home: home.to_string(),
        }
    }

    pub fn team(&self, side: Side) -> &str {
        match side {
            Side::Away => &self.away,
            Side::Home => &self.home,
        }
    }

    pub fn favor(&self, side: Side, half: &str) -> TeamRef {
        TeamRef {
            side,
            team: self.team(side).to_string(),
            half: half.to_string(),
        }
    }
}

/// Favored-side reference: team plus the half label ("1H", "2H" or empty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRef {
    pub side: Side,
    pub team: String,
    pub half: String,
}

impl fmt::Display for TeamRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.half.is_empty() {
            write!(f, "{}", self.team)
        } else {
            write!(f, "{} {}", self.team, self.half)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "camelCase")]
pub enum StandardLean {
    #[strum(serialize = "No Play")]
    NoPlay,
    #[strum(serialize = "Slight Lean")]
    SlightLean,
    #[strum(serialize = "Heavy Lean")]
    HeavyLean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "camelCase")]
pub enum FlipLean {
    #[strum(serialize = "No Play")]
    NoPlay,
    #[strum(serialize = "Slight Lean Flip")]
    SlightLeanFlip,
    #[strum(serialize = "Heavy Lean Flip")]
    HeavyLeanFlip,
    #[strum(serialize = "Heavy Lean Same")]
    HeavyLeanSame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LeanTag {
    Standard(StandardLean),
    Flip(FlipLean),
}

impl LeanTag {
    /// Points this tag contributes to a score group.
    pub fn strength(self) -> u32 {
        match self {
            LeanTag::Standard(StandardLean::NoPlay) => 0,
            LeanTag::Standard(StandardLean::SlightLean) => 1,
            LeanTag::Standard(StandardLean::HeavyLean) => 2,
            LeanTag::Flip(FlipLean::NoPlay) => 0,
            LeanTag::Flip(FlipLean::HeavyLeanSame) => 1,
            LeanTag::Flip(FlipLean::SlightLeanFlip) => 2,
            LeanTag::Flip(FlipLean::HeavyLeanFlip) => 3,
        }
    }

    pub fn is_no_play(self) -> bool {
        matches!(
            self,
            LeanTag::Standard(StandardLean::NoPlay) | LeanTag::Flip(FlipLean::NoPlay)
        )
    }
}

impl fmt::Display for LeanTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeanTag::Standard(t) => write!(f, "{}", t),
            LeanTag::Flip(t) => write!(f, "{}", t),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeanResult {
    pub tag: LeanTag,
    pub favored: Option<TeamRef>,
}

impl LeanResult {
    pub fn no_play() -> Self {
        Self {
            tag: LeanTag::Standard(StandardLean::NoPlay),
            favored: None,
        }
    }

    pub fn flip(tag: FlipLean) -> Self {
        Self {
            tag: LeanTag::Flip(tag),
            favored: None,
        }
    }

    pub fn strength(&self) -> u32 {
        self.tag.strength()
    }

    /// Display label, e.g. "Heavy Lean KC 1H", "No Play", "Slight Lean Flip".
    pub fn label(&self) -> String {
        match &self.favored {
            Some(team) if !self.tag.is_no_play() => format!("{} {}", self.tag, team),
            _ => self.tag.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Slight,
    Heavy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ConsensusResult {
    NoPlay,
    Play { strength: Strength, favored: TeamRef },
}

impl ConsensusResult {
    pub fn label(&self) -> String {
        match self {
            ConsensusResult::NoPlay => "No Play".to_string(),
            ConsensusResult::Play { strength, favored } => {
                format!("{} Lean {}", strength, favored)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum OuDirection {
    Over,
    Under,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum OuConsensusResult {
    NoConsensus,
    Call {
        direction: OuDirection,
        favored: TeamRef,
    },
}

impl OuConsensusResult {
    pub fn label(&self) -> String {
        match self {
            OuConsensusResult::NoConsensus => "No Consensus".to_string(),
            OuConsensusResult::Call { direction, favored } => {
                format!("{} {}", direction, favored)
            }
        }
    }
}
