// Tue Jan 20 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanResult {
    identifier: String,
    offset: u64,
}

impl ScanResult {
    pub fn new(identifier: &str, offset: u64) -> Self {
        Self {
            identifier: identifier.to_string(),
            offset,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Absolute stream offset of the matched pattern.
    pub fn offset(&self) -> u64 {
        self.offset
    }
}

impl fmt::Display for ScanResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at 0x{:08x}", self.identifier, self.offset)
    }
}
