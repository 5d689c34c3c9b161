// Numeric extraction utilities for depth and count heuristics
use regex::Regex;

/// Parse a captured depth in feet. Rejects non-finite and negative values.
pub fn parse_depth(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|depth| depth.is_finite() && *depth >= 0.0)
}

/// Parse a captured narrative count such as "6" in "at 6 locations"
pub fn parse_count(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// `100 * part / whole` rounded to `decimals`, or 0.0 when `whole` is zero
pub fn percent(part: u32, whole: u32, decimals: i32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round_to(100.0 * f64::from(part) / f64::from(whole), decimals)
}

/// First depth captured by `pattern` in `text` that parses cleanly.
/// Candidates that fail to parse are skipped.
pub fn first_depth(pattern: &Regex, text: &str, group: usize) -> Option<f64> {
    pattern
        .captures_iter(text)
        .find_map(|caps| caps.get(group).and_then(|m| parse_depth(m.as_str())))
}

/// Every depth captured by `pattern` in `text`, skipping malformed ones
pub fn all_depths(pattern: &Regex, text: &str, group: usize) -> Vec<f64> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(group).and_then(|m| parse_depth(m.as_str())))
        .collect()
}
