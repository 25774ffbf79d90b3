use thiserror::Error;

#[derive(Error, Debug)]
pub enum MorsimpleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot not found: {0}")]
    MissingSnapshot(String),

    #[error("Validation failed for {0} file(s)")]
    ValidationFailed(usize),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, MorsimpleError>;
