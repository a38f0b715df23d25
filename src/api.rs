use crate::board::{Game, GameBoard};
use crate::config::{EngineConfig, LabelMode, ProfileKind};
use crate::error::TfResult;
use crate::loader;
use crate::signals::{
    classify_side, format_pct, label_pair, multi_metric_consensus, ou_consensus, score_group,
    sort_by_mode, Bucket, ConsensusResult, GameRanking, LeanResult, OuConsensusResult, SortKey,
    SortMode, SplitMetric,
};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SideView {
    pub team: String,
    pub pct: String,
    pub bucket: Option<Bucket>,
    pub sample_size: Option<u32>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SplitView {
    pub split: String,
    pub profile: ProfileKind,
    pub mode: LabelMode,
    pub away: SideView,
    pub home: SideView,
    pub lean: LeanResult,
    pub lean_label: String,
    /// Left out of group scores for lack of games.
    pub under_sampled: bool,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ConsensusView {
    pub name: String,
    pub title: String,
    pub result: ConsensusResult,
    pub label: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TotalsView {
    pub split: String,
    pub away_over: String,
    pub away_under: String,
    pub home_over: String,
    pub home_under: String,
    pub result: OuConsensusResult,
    pub label: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GroupScore {
    pub name: String,
    pub title: String,
    pub ranking: GameRanking,
}

/// Everything the rendering layer shows for one game.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GameReport {
    pub id: String,
    pub start_time: Option<i64>,
    pub away: String,
    pub home: String,
    pub splits: Vec<SplitView>,
    pub consensus: Vec<ConsensusView>,
    pub totals: Vec<TotalsView>,
    pub rankings: Vec<GroupScore>,
}

impl GameReport {
    pub fn ranking(&self, group: &str) -> Option<&GameRanking> {
        self.rankings
            .iter()
            .find(|g| g.name == group)
            .map(|g| &g.ranking)
    }

    fn sort_key<'a>(&'a self, mode: &SortMode) -> SortKey<'a> {
        let ranking = match mode {
            SortMode::Chronological => None,
            SortMode::Group(name) => self.ranking(name),
        };
        SortKey {
            id: &self.id,
            start_time: self.start_time,
            ranking,
        }
    }
}

fn split_view(game: &Game, metric: &SplitMetric, config: &EngineConfig) -> SplitView {
    let (mode, kind, half) = match config.member_for(&metric.label) {
        Some(m) => (m.mode, m.profile_kind(), m.half.as_str()),
        None => (LabelMode::Standard, ProfileKind::General, ""),
    };
    let profile = config.profiles.get(kind);
    let away = classify_side(metric.away.value, profile);
    let home = classify_side(metric.home.value, profile);
    let lean = label_pair(
        away,
        home,
        &game.teams,
        half,
        mode,
        &config.params.flip_cutoffs(),
    );
    let min = config.params.min_sample_size;

    SplitView {
        split: metric.label.clone(),
        profile: kind,
        mode,
        away: SideView {
            team: game.teams.away.clone(),
            pct: format_pct(metric.away.value),
            bucket: away.map(|c| c.bucket),
            sample_size: metric.away.sample_size,
        },
        home: SideView {
            team: game.teams.home.clone(),
            pct: format_pct(metric.home.value),
            bucket: home.map(|c| c.bucket),
            sample_size: metric.home.sample_size,
        },
        lean_label: lean.label(),
        lean,
        under_sampled: metric.away.is_under_sampled(min) || metric.home.is_under_sampled(min),
    }
}

/// Classifies, aggregates and scores one game.
pub fn evaluate_game(game: &Game, config: &EngineConfig) -> GameReport {
    let splits = game
        .splits
        .values()
        .map(|m| split_view(game, m, config))
        .collect();

    let consensus = config
        .questions
        .iter()
        .map(|q| {
            let metrics: Vec<&SplitMetric> =
                q.splits.iter().filter_map(|s| game.splits.get(s)).collect();
            // A question with any split absent cannot be unanimous.
            let result = if metrics.len() == q.splits.len() {
                multi_metric_consensus(&metrics, &game.teams, &q.half, &config.profiles.half)
            } else {
                ConsensusResult::NoPlay
            };
            ConsensusView {
                name: q.name.clone(),
                title: q.title.clone(),
                label: result.label(),
                result,
            }
        })
        .collect();

    let totals = config
        .totals
        .iter()
        .filter_map(|key| game.totals.get(key))
        .map(|t| {
            let result = ou_consensus(t, &game.teams, &config.profiles.general);
            TotalsView {
                split: t.label.clone(),
                away_over: format_pct(t.away.over),
                away_under: format_pct(t.away.under),
                home_over: format_pct(t.home.over),
                home_under: format_pct(t.home.under),
                label: result.label(),
                result,
            }
        })
        .collect();

    let rankings = config
        .groups
        .iter()
        .map(|g| GroupScore {
            name: g.name.clone(),
            title: g.title.clone(),
            ranking: score_group(&game.splits, &game.teams, game.start_time, g, config),
        })
        .collect();

    GameReport {
        id: game.id.clone(),
        start_time: game.start_time,
        away: game.teams.away.clone(),
        home: game.teams.home.clone(),
        splits,
        consensus,
        totals,
        rankings,
    }
}

/// Filters, evaluates and orders a whole board. Recomputed from scratch on
/// every call.
pub fn evaluate_board(
    board: &GameBoard,
    config: &EngineConfig,
    mode: &SortMode,
    search: Option<&str>,
) -> Vec<GameReport> {
    let mut reports: Vec<GameReport> = board
        .games
        .iter()
        .filter(|g| search.map_or(true, |s| g.matches_search(s)))
        .map(|g| evaluate_game(g, config))
        .collect();

    sort_by_mode(&mut reports, mode, |r| r.sort_key(mode));
    debug!("Ordered {} games by {}", reports.len(), mode);
    reports
}

/// Service: read a rows file into a board.
pub fn load_board<P: AsRef<Path>>(path: P) -> TfResult<GameBoard> {
    let rows = loader::load_rows_from_file(path)?;
    let board = GameBoard::from_rows(&rows);
    info!("🏀 Board ready: {} games", board.games.len());
    Ok(board)
}
