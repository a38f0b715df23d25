use super::bucket::{classify_side, normalize_pct};
use super::lean::label_pair;
use super::types::{Matchup, SplitMetric};
use crate::config::{EngineConfig, ScoreGroupDefinition};
use serde::Serialize;
use std::collections::BTreeMap;

/// Sort keys for one game under one score group. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRanking {
    pub score: u32,
    pub max_score: u32,
    /// Mean absolute away/home gap in percentage points; tie-break only.
    pub edge: f64,
    pub tiebreak_timestamp: Option<i64>,
}

/// Sums lean strength over `group` and averages the percentage-point edge.
///
/// Missing splits, missing values and under-sampled sides contribute
/// nothing to either number.
pub fn score_group(
    splits: &BTreeMap<String, SplitMetric>,
    teams: &Matchup,
    start_time: Option<i64>,
    group: &ScoreGroupDefinition,
    config: &EngineConfig,
) -> GameRanking {
    let cutoffs = config.params.flip_cutoffs();
    let min_sample = config.params.min_sample_size;

    let mut score = 0;
    let mut edge_sum = 0.0;
    let mut edge_count = 0usize;

    for member in &group.members {
        let Some(metric) = splits.get(&member.split) else {
            continue;
        };
        if metric.away.is_under_sampled(min_sample) || metric.home.is_under_sampled(min_sample) {
            continue;
        }

        let profile = config.profiles.get(member.profile_kind());
        let lean = label_pair(
            classify_side(metric.away.value, profile),
            classify_side(metric.home.value, profile),
            teams,
            &member.half,
            member.mode,
            &cutoffs,
        );
        score += lean.strength();

        let away = metric.away.value.and_then(normalize_pct);
        let home = metric.home.value.and_then(normalize_pct);
        if let (Some(a), Some(h)) = (away, home) {
            edge_sum += (a - h).abs();
            edge_count += 1;
        }
    }

    let edge = if edge_count > 0 {
        edge_sum / edge_count as f64
    } else {
        0.0
    };

    GameRanking {
        score,
        max_score: group.max_score(),
        edge,
        tiebreak_timestamp: start_time,
    }
}
