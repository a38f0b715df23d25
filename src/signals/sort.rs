use super::ranking::GameRanking;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortMode {
    Chronological,
    /// Rank by the named score group.
    Group(String),
}

impl SortMode {
    pub const CHRONOLOGICAL: &'static str = "chronological";
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::Chronological => write!(f, "{}", Self::CHRONOLOGICAL),
            SortMode::Group(name) => write!(f, "{}", name),
        }
    }
}

/// What the comparator looks at for one game.
#[derive(Debug, Clone, Copy)]
pub struct SortKey<'a> {
    pub id: &'a str,
    pub start_time: Option<i64>,
    /// The ranking for the active group; `None` ranks as zero.
    pub ranking: Option<&'a GameRanking>,
}

/// Earlier first; games without a start time go last.
fn cmp_start(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn compare_chronological(a: &SortKey, b: &SortKey) -> Ordering {
    cmp_start(a.start_time, b.start_time).then_with(|| a.id.cmp(b.id))
}

/// Score desc, edge desc, start asc, then id so distinct games never tie.
pub fn compare_ranked(a: &SortKey, b: &SortKey) -> Ordering {
    let (a_score, a_edge) = a.ranking.map_or((0, 0.0), |r| (r.score, r.edge));
    let (b_score, b_edge) = b.ranking.map_or((0, 0.0), |r| (r.score, r.edge));

    b_score
        .cmp(&a_score)
        .then_with(|| b_edge.total_cmp(&a_edge))
        .then_with(|| cmp_start(a.start_time, b.start_time))
        .then_with(|| a.id.cmp(b.id))
}

pub fn compare(mode: &SortMode, a: &SortKey, b: &SortKey) -> Ordering {
    match mode {
        SortMode::Chronological => compare_chronological(a, b),
        SortMode::Group(_) => compare_ranked(a, b),
    }
}

/// Sorts `items` in place; `key` projects each item to its sort key.
pub fn sort_by_mode<T, F>(items: &mut [T], mode: &SortMode, key: F)
where
    F: for<'a> Fn(&'a T) -> SortKey<'a>,
{
    items.sort_by(|a, b| compare(mode, &key(a), &key(b)));
}
