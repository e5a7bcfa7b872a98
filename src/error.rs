// Tue Jan 20 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("Missing total size: {0} end-anchored signature(s) registered")]
    MissingTotalSize(usize),
    #[error("Total size already set to {0}")]
    TotalSizeAlreadySet(u64),
    #[error("Scan session already started")]
    AlreadyStarted,
    #[error("Scan session not started")]
    NotStarted,
    #[error("Scan session closed")]
    SessionClosed,
    #[error("Invalid scan buffer size: {0}")]
    InvalidBufferSize(usize),
    #[error("Scan aborted")]
    Aborted,
    #[error("Signature definitions line {line}: {reason}")]
    Definitions { line: usize, reason: String },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScanError>;
