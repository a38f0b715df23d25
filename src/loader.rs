use crate::error::{TfResult, TrendForgeError};
use crate::signals::{Side, SideValue, TotalsSide};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// A win-loss(-push) record such as "15-3-0".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
    pub pushes: u32,
}

impl Record {
    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.pushes
    }

    /// Cover percentage on the 0-100 scale; pushes don't count either way.
    pub fn cover_pct(&self) -> Option<f64> {
        let decided = self.wins + self.losses;
        if decided == 0 {
            return None;
        }
        Some(self.wins as f64 / decided as f64 * 100.0)
    }
}

impl FromStr for Record {
    type Err = TrendForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('-').collect();
        if parts.len() != 2 && parts.len() != 3 {
            return Err(TrendForgeError::Record(s.to_string()));
        }
        let mut nums = [0u32; 3];
        for (i, p) in parts.iter().enumerate() {
            nums[i] = p
                .trim()
                .parse()
                .map_err(|_| TrendForgeError::Record(s.to_string()))?;
        }
        // games() must fit in u32.
        nums[0]
            .checked_add(nums[1])
            .and_then(|n| n.checked_add(nums[2]))
            .ok_or_else(|| TrendForgeError::Record(s.to_string()))?;
        Ok(Record {
            wins: nums[0],
            losses: nums[1],
            pushes: nums[2],
        })
    }
}

/// One CSV line: a team's numbers for one split of one game.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SplitRow {
    pub game_id: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub start_time: Option<i64>,
    pub side: Side,
    pub team: String,
    pub split: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub value: Option<f64>,
    #[serde(default)]
    pub record: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub over_value: Option<f64>,
    #[serde(default)]
    pub over_record: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub under_value: Option<f64>,
    #[serde(default)]
    pub under_record: Option<String>,
}

fn parse_record(raw: &Option<String>, game_id: &str, split: &str) -> Option<Record> {
    let raw = raw.as_deref()?.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<Record>() {
        Ok(r) => Some(r),
        Err(e) => {
            warn!("⚠️  [{} / {}] {}", game_id, split, e);
            None
        }
    }
}

/// Explicit value wins; otherwise the value comes from the record.
fn resolve(value: Option<f64>, record: Option<Record>) -> (Option<f64>, Option<u32>) {
    let sample = record.map(|r| r.games());
    let value = value.or_else(|| record.and_then(|r| r.cover_pct()));
    (value, sample)
}

impl SplitRow {
    pub fn has_cover(&self) -> bool {
        self.value.is_some() || self.record.as_deref().is_some_and(|r| !r.trim().is_empty())
    }

    pub fn has_totals(&self) -> bool {
        let present = |r: &Option<String>| r.as_deref().is_some_and(|s| !s.trim().is_empty());
        self.over_value.is_some()
            || self.under_value.is_some()
            || present(&self.over_record)
            || present(&self.under_record)
    }

    pub fn side_value(&self) -> SideValue {
        let record = parse_record(&self.record, &self.game_id, &self.split);
        let (value, sample_size) = resolve(self.value, record);
        SideValue { value, sample_size }
    }

    pub fn totals_side(&self) -> TotalsSide {
        let over_rec = parse_record(&self.over_record, &self.game_id, &self.split);
        let under_rec = parse_record(&self.under_record, &self.game_id, &self.split);
        let (over, over_n) = resolve(self.over_value, over_rec);
        let (under, under_n) = resolve(self.under_value, under_rec);
        TotalsSide {
            over,
            under,
            sample_size: over_n.or(under_n),
        }
    }
}

/// Reads split rows, skipping (and counting) malformed lines.
pub fn load_rows<R: Read>(reader: R) -> TfResult<Vec<SplitRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    rdr.headers()?;

    let mut rows = Vec::new();
    let mut skipped_count = 0;

    for (idx, result) in rdr.deserialize::<SplitRow>().enumerate() {
        match result {
            Ok(row) => {
                debug!("Row {}: {} {} {}", idx + 1, row.game_id, row.side, row.split);
                rows.push(row);
            }
            Err(e) => {
                skipped_count += 1;
                warn!("⚠️  [Row {}] Skipping split row: {}", idx + 1, e);
            }
        }
    }

    if skipped_count > 0 {
        warn!("⚠️  Skipped {} invalid split rows.", skipped_count);
    }

    Ok(rows)
}

pub fn load_rows_from_file<P: AsRef<Path>>(path: P) -> TfResult<Vec<SplitRow>> {
    let path = path.as_ref();
    info!("📂 Loading split rows from: {:?}", path);
    let file = File::open(path)?;
    let rows = load_rows(file)?;
    info!("   -> Loaded {} rows.", rows.len());
    Ok(rows)
}
