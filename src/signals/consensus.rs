use super::bucket::{bucket_for, normalize_pct};
use super::lean::label_standard;
use super::types::{ConsensusResult, LeanTag, Matchup, Side, SplitMetric, StandardLean, Strength};
use crate::config::ThresholdProfile;

/// Combines related splits into one call.
///
/// One side must be strictly ahead on every component; any split, any
/// missing value, or an empty input gives No Play. The per-side means are
/// then labelled like a single split.
pub fn multi_metric_consensus(
    metrics: &[&SplitMetric],
    teams: &Matchup,
    half: &str,
    profile: &ThresholdProfile,
) -> ConsensusResult {
    if metrics.is_empty() {
        return ConsensusResult::NoPlay;
    }

    let mut pairs = Vec::with_capacity(metrics.len());
    for m in metrics {
        let away = m.away.value.and_then(normalize_pct);
        let home = m.home.value.and_then(normalize_pct);
        match (away, home) {
            (Some(a), Some(h)) => pairs.push((a, h)),
            _ => return ConsensusResult::NoPlay,
        }
    }

    let winner = if pairs.iter().all(|(a, h)| a > h) {
        Side::Away
    } else if pairs.iter().all(|(a, h)| h > a) {
        Side::Home
    } else {
        return ConsensusResult::NoPlay;
    };

    let n = pairs.len() as f64;
    let away_mean = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let home_mean = pairs.iter().map(|(_, h)| h).sum::<f64>() / n;

    let lean = label_standard(
        Some(bucket_for(away_mean, profile)),
        Some(bucket_for(home_mean, profile)),
        teams,
        half,
    );

    let strength = match lean.tag {
        LeanTag::Standard(StandardLean::SlightLean) => Strength::Slight,
        LeanTag::Standard(StandardLean::HeavyLean) => Strength::Heavy,
        _ => return ConsensusResult::NoPlay,
    };

    ConsensusResult::Play {
        strength,
        favored: teams.favor(winner, half),
    }
}
