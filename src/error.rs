use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrendForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Engine Profile Error: {0}")]
    Config(String),

    #[error("Malformed record '{0}' (expected W-L or W-L-P)")]
    Record(String),

    #[error("Unknown sort mode '{mode}' (expected one of: {known})")]
    UnknownSortMode { mode: String, known: String },

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

pub type TfResult<T> = Result<T, TrendForgeError>;
