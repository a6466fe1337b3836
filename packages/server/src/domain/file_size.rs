//! Human-readable file sizes.

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Render a byte count with binary-prefix units and two decimals.
///
/// The largest unit whose scaled value is at least 1 is chosen; sizes beyond
/// the last unit stay in TB.
pub fn readable_file_size(size: u64) -> String {
    if size == 0 {
        return "0 B".to_string();
    }

    let mut scaled = size as f64;
    let mut unit = 0;
    while scaled >= 1024.0 && unit < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    format!("{:.2} {}", scaled, UNITS[unit])
}
