// Tue Jan 20 2026 - Alex

use crate::error::Result;
use crate::output::ScanReport;
use crate::utils::{count_noun, format_bytes};
use colored::*;
use std::fmt::Write;

pub struct ReportFormatter {
    use_color: bool,
    show_size: bool,
}

impl ReportFormatter {
    pub fn new() -> Self {
        Self {
            use_color: true,
            show_size: true,
        }
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn with_size(mut self, show_size: bool) -> Self {
        self.show_size = show_size;
        self
    }

    fn heading(&self, text: &str) -> String {
        if self.use_color {
            text.cyan().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn identifier(&self, text: &str) -> String {
        if self.use_color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn format_report(&self, report: &ScanReport) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "{}", self.heading(&report.source));

        if let Some(ref error) = report.error {
            let label = if self.use_color { "Error".red().bold().to_string() } else { "Error".to_string() };
            let _ = writeln!(out, "\t{}\t\t\t: {}", label, error);
            return out;
        }

        if self.show_size {
            if let Some(size) = report.size {
                let _ = writeln!(out, "\tSize\t\t\t: {}", format_bytes(size));
            }
        }
        let _ = writeln!(out, "\tNumber of scan results\t: {}", report.results.len());

        for (index, result) in report.results.iter().enumerate() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Scan result: {}", index + 1);
            let _ = writeln!(out, "\tIdentifier\t\t: {}", self.identifier(result.identifier()));
            let _ = writeln!(out, "\tOffset\t\t\t: 0x{:08x} ({})", result.offset(), result.offset());
        }

        out
    }

    pub fn format_text(&self, reports: &[ScanReport]) -> String {
        let mut out = String::new();
        for report in reports {
            out.push_str(&self.format_report(report));
            out.push('\n');
        }

        let matched = reports.iter().filter(|r| r.has_matches()).count();
        let failed = reports.iter().filter(|r| !r.is_success()).count();
        let _ = writeln!(
            out,
            "{} scanned, {} with matches, {} failed",
            count_noun(reports.len(), "input"),
            matched,
            failed
        );
        out
    }

    pub fn format_json(&self, reports: &[ScanReport]) -> Result<String> {
        Ok(serde_json::to_string_pretty(reports)?)
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::ScanResult;

    fn report() -> ScanReport {
        ScanReport {
            source: "image.vhd".to_string(),
            size: Some(1024),
            bytes_scanned: 1024,
            results: vec![ScanResult::new("vhdi_footer", 512)],
            error: None,
        }
    }

    #[test]
    fn test_format_report() {
        let text = ReportFormatter::new().with_color(false).format_report(&report());
        assert!(text.starts_with("image.vhd\n"));
        assert!(text.contains("\tNumber of scan results\t: 1\n"));
        assert!(text.contains("\tIdentifier\t\t: vhdi_footer\n"));
        assert!(text.contains("0x00000200 (512)"));
        assert!(text.contains("1.00 KB"));
    }

    #[test]
    fn test_format_report_without_size() {
        let text = ReportFormatter::new().with_color(false).with_size(false).format_report(&report());
        assert!(!text.contains("Size"));
        assert!(text.contains("\tNumber of scan results\t: 1\n"));
    }

    #[test]
    fn test_format_text_summary() {
        let failed = ScanReport::failed(
            std::path::Path::new("missing.bin"),
            &std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        let text = ReportFormatter::new().with_color(false).format_text(&[report(), failed]);
        assert!(text.contains("\tError\t\t\t: not found"));
        assert!(text.ends_with("2 inputs scanned, 1 with matches, 1 failed\n"));
    }

    #[test]
    fn test_format_json() {
        let json = ReportFormatter::new().format_json(&[report()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["results"][0]["identifier"], "vhdi_footer");
        assert_eq!(value[0]["results"][0]["offset"], 512);
    }
}
