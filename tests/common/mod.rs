#![allow(dead_code)]

use trendforge::board::Game;
use trendforge::signals::{Matchup, SideValue, SplitMetric, TotalsSide, TotalsSplit};

pub const AWAY: &str = "KC";
pub const HOME: &str = "BUF";

pub fn teams() -> Matchup {
    Matchup::new(AWAY, HOME)
}

/// Split with a healthy sample on both sides.
pub fn metric(label: &str, away: f64, home: f64) -> SplitMetric {
    SplitMetric::new(label, SideValue::new(away, 20), SideValue::new(home, 20))
}

pub fn metric_sized(label: &str, away: (f64, u32), home: (f64, u32)) -> SplitMetric {
    SplitMetric::new(
        label,
        SideValue::new(away.0, away.1),
        SideValue::new(home.0, home.1),
    )
}

/// Derived split without game counts (flip percentages).
pub fn flip_metric(label: &str, away: f64, home: f64) -> SplitMetric {
    SplitMetric::new(label, SideValue::without_sample(away), SideValue::without_sample(home))
}

pub fn totals(label: &str, away: (f64, f64), home: (f64, f64)) -> TotalsSplit {
    TotalsSplit {
        away: TotalsSide {
            over: Some(away.0),
            under: Some(away.1),
            sample_size: Some(20),
        },
        home: TotalsSide {
            over: Some(home.0),
            under: Some(home.1),
            sample_size: Some(20),
        },
        label: label.to_string(),
    }
}

/// Builder for a game to keep test bodies short.
pub struct GameBuilder {
    game: Game,
}

impl GameBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            game: Game::new(id, None, teams()),
        }
    }

    pub fn teams(mut self, away: &str, home: &str) -> Self {
        self.game.teams = Matchup::new(away, home);
        self
    }

    pub fn start(mut self, ts: i64) -> Self {
        self.game.start_time = Some(ts);
        self
    }

    pub fn split(mut self, metric: SplitMetric) -> Self {
        self.game = self.game.with_split(metric);
        self
    }

    pub fn totals(mut self, t: TotalsSplit) -> Self {
        self.game = self.game.with_totals(t);
        self
    }

    pub fn build(self) -> Game {
        self.game
    }
}

/// First-half group members with the given (away, home) values.
pub fn first_half_game(id: &str, side: (f64, f64), rest: (f64, f64), fav: (f64, f64)) -> Game {
    GameBuilder::new(id)
        .split(metric("1h_side", side.0, side.1))
        .split(metric("1h_side_rest", rest.0, rest.1))
        .split(metric("1h_fav_dog", fav.0, fav.1))
        .build()
}
