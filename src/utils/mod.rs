// Tue Jan 20 2026 - Alex

pub mod logging;

pub use logging::LoggingUtils;

use std::time::Duration;

pub fn format_duration(duration: Duration) -> String {
    match duration.as_millis() {
        0 => format!("{}µs", duration.as_micros()),
        millis @ 1..=999 => format!("{}ms", millis),
        _ if duration.as_secs() < 60 => format!("{:.2}s", duration.as_secs_f64()),
        _ => {
            let secs = duration.as_secs_f64();
            format!("{}m {:.1}s", duration.as_secs() / 60, secs % 60.0)
        }
    }
}

/// Human-readable size using binary units, e.g. `1.50 KB`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{} bytes", bytes);
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}

/// `count` followed by `noun`, with an `s` appended unless the count is one.
pub fn count_noun(count: usize, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{} {}{}", count, noun, suffix)
}
