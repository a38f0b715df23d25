pub mod bucket;
pub mod consensus;
pub mod lean;
pub mod ranking;
pub mod sort;
pub mod totals;
pub mod types;

pub use self::bucket::{classify, classify_side, format_pct, normalize_pct};
pub use self::consensus::multi_metric_consensus;
pub use self::lean::{label_flip, label_pair, label_standard};
pub use self::ranking::{score_group, GameRanking};
pub use self::sort::{compare, sort_by_mode, SortKey, SortMode};
pub use self::totals::{ou_consensus, TotalsSide, TotalsSplit};
pub use self::types::*;
