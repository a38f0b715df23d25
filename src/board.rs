use crate::loader::SplitRow;
use crate::signals::{Matchup, Side, SplitMetric, TotalsSplit};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    /// Epoch seconds.
    pub start_time: Option<i64>,
    pub teams: Matchup,
    pub splits: BTreeMap<String, SplitMetric>,
    pub totals: BTreeMap<String, TotalsSplit>,
}

impl Game {
    pub fn new(id: &str, start_time: Option<i64>, teams: Matchup) -> Self {
        Self {
            id: id.to_string(),
            start_time,
            teams,
            ..Default::default()
        }
    }

    pub fn with_split(mut self, metric: SplitMetric) -> Self {
        self.splits.insert(metric.label.clone(), metric);
        self
    }

    pub fn with_totals(mut self, totals: TotalsSplit) -> Self {
        self.totals.insert(totals.label.clone(), totals);
        self
    }

    /// Case-insensitive substring match on either team.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        needle.is_empty()
            || self.teams.away.to_lowercase().contains(&needle)
            || self.teams.home.to_lowercase().contains(&needle)
    }
}

/// Games in the order they first appear in the rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GameBoard {
    pub games: Vec<Game>,
}

impl GameBoard {
    pub fn from_rows(rows: &[SplitRow]) -> Self {
        let mut games: Vec<Game> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut seen_cover: HashSet<(&str, Side, &str)> = HashSet::new();
        let mut seen_totals: HashSet<(&str, Side, &str)> = HashSet::new();

        for row in rows {
            let slot = *index.entry(row.game_id.as_str()).or_insert_with(|| {
                games.push(Game::new(&row.game_id, row.start_time, Matchup::default()));
                games.len() - 1
            });
            let game = &mut games[slot];

            if game.start_time.is_none() {
                game.start_time = row.start_time;
            }

            let team = match row.side {
                Side::Away => &mut game.teams.away,
                Side::Home => &mut game.teams.home,
            };
            if team.is_empty() {
                *team = row.team.clone();
            } else if *team != row.team {
                warn!(
                    "⚠️  Game {}: {} team '{}' conflicts with '{}', keeping the first.",
                    row.game_id, row.side, row.team, team
                );
            }

            let key = (row.game_id.as_str(), row.side, row.split.as_str());

            if row.has_cover() {
                if seen_cover.insert(key) {
                    let metric = game
                        .splits
                        .entry(row.split.clone())
                        .or_insert_with(|| SplitMetric::new(&row.split, Default::default(), Default::default()));
                    *metric.side_mut(row.side) = row.side_value();
                } else {
                    warn!(
                        "⚠️  Duplicate {} row for {} / {}, keeping the first.",
                        row.side, row.game_id, row.split
                    );
                }
            }

            if row.has_totals() {
                if seen_totals.insert(key) {
                    let totals = game.totals.entry(row.split.clone()).or_insert_with(|| TotalsSplit {
                        label: row.split.clone(),
                        ..Default::default()
                    });
                    *totals.side_mut(row.side) = row.totals_side();
                } else {
                    warn!(
                        "⚠️  Duplicate {} totals row for {} / {}, keeping the first.",
                        row.side, row.game_id, row.split
                    );
                }
            }
        }

        debug!("Assembled {} games from {} rows", games.len(), rows.len());
        GameBoard { games }
    }

    pub fn get(&self, id: &str) -> Option<&Game> {
        self.games.iter().find(|g| g.id == id)
    }
}
