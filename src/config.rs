// Tue Jan 20 2026 - Alex

use crate::error::{Result, ScanError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SCAN_BUFFER_SIZE: usize = 0x10000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    pub signatures_file: PathBuf,
    pub scan_buffer_size: usize,
    pub threads: usize,
    pub json_output: bool,
    pub enable_progress_bars: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            signatures_file: PathBuf::from("sigscan.conf"),
            scan_buffer_size: DEFAULT_SCAN_BUFFER_SIZE,
            threads: num_cpus::get(),
            json_output: false,
            enable_progress_bars: true,
        }
    }
}

impl ScannerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_signatures_file(mut self, path: PathBuf) -> Self {
        self.signatures_file = path;
        self
    }

    pub fn with_scan_buffer_size(mut self, size: usize) -> Self {
        self.scan_buffer_size = size;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_json_output(mut self, json: bool) -> Self {
        self.json_output = json;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.scan_buffer_size == 0 || self.scan_buffer_size > isize::MAX as usize {
            return Err(ScanError::InvalidBufferSize(self.scan_buffer_size));
        }
        if self.threads == 0 {
            return Err(ScanError::InvalidConfig("threads must be greater than 0".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ScannerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scan_buffer_size, 0x10000);
    }

    #[test]
    fn test_validate() {
        let config = ScannerConfig::new().with_scan_buffer_size(0);
        assert!(matches!(config.validate(), Err(ScanError::InvalidBufferSize(0))));

        let config = ScannerConfig::new().with_threads(0);
        assert!(matches!(config.validate(), Err(ScanError::InvalidConfig(_))));
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sigscan_config_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_from_json_file() {
        let path = temp_path("valid.json");
        fs::write(&path, r#"{"signatures_file": "formats.conf", "threads": 2}"#).unwrap();
        let config = ScannerConfig::from_json_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.signatures_file, PathBuf::from("formats.conf"));
        assert_eq!(config.threads, 2);
        assert_eq!(config.scan_buffer_size, DEFAULT_SCAN_BUFFER_SIZE);
    }

    #[test]
    fn test_from_json_file_errors() {
        let path = temp_path("broken.json");
        fs::write(&path, "{ \"threads\": ").unwrap();
        let result = ScannerConfig::from_json_file(&path);
        fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ScanError::Config(_))));

        let path = temp_path("zero_buffer.json");
        fs::write(&path, r#"{"scan_buffer_size": 0}"#).unwrap();
        let result = ScannerConfig::from_json_file(&path);
        fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ScanError::InvalidBufferSize(0))));

        let result = ScannerConfig::from_json_file(temp_path("missing.json"));
        assert!(matches!(result, Err(ScanError::Io(_))));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ScannerConfig = serde_json::from_str(r#"{"scan_buffer_size": 512, "json_output": true}"#).unwrap();
        assert_eq!(config.scan_buffer_size, 512);
        assert!(config.json_output);
        assert_eq!(config.signatures_file, PathBuf::from("sigscan.conf"));
    }
}
