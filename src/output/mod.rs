// Tue Jan 20 2026 - Alex

pub mod formatter;

pub use formatter::ReportFormatter;

use crate::scan::{ScanResult, ScanSession};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub source: String,
    pub size: Option<u64>,
    pub bytes_scanned: u64,
    pub results: Vec<ScanResult>,
    pub error: Option<String>,
}

impl ScanReport {
    pub fn from_session(source: &Path, session: ScanSession) -> Self {
        Self {
            source: source.display().to_string(),
            size: session.total_size(),
            bytes_scanned: session.cursor(),
            results: session.into_results(),
            error: None,
        }
    }

    pub fn failed(source: &Path, error: &dyn std::error::Error) -> Self {
        Self {
            source: source.display().to_string(),
            size: None,
            bytes_scanned: 0,
            results: Vec::new(),
            error: Some(error.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn has_matches(&self) -> bool {
        !self.results.is_empty()
    }
}
