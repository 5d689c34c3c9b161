//! USCS frequency analysis
//!
//! Counts whole-word soil classification symbols in extracted report text.
//! The compound "SC-SM" is tried before its halves so it is seen as one
//! token; whether it is then split depends on `collapse_compounds`.

use crate::extractors::numeric::round_to;
use geotech_types::{FrequencyRow, FrequencyTable, UscsCode};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref USCS_PATTERN: Regex =
        Regex::new(r"(?i)\b(?:SC-SM|GW|GP|GM|GC|SW|SP|SM|SC|ML|CL|MH|CH|OL|OH|PT)\b").unwrap();
}

/// Build the frequency table for one document.
///
/// Rows are sorted by descending count; ties keep first-seen order.
/// Returns an empty table when no codes are present.
pub fn frequency_table(text: &str, collapse_compounds: bool) -> FrequencyTable {
    let mut counts: Vec<(UscsCode, usize)> = Vec::new();

    for token in USCS_PATTERN.find_iter(text) {
        let token = token.as_str().to_ascii_uppercase();
        if token.contains('-') && collapse_compounds {
            token
                .split('-')
                .filter_map(UscsCode::from_symbol)
                .for_each(|code| bump(&mut counts, code));
        } else if let Some(code) = UscsCode::from_symbol(&token) {
            bump(&mut counts, code);
        }
    }

    let total: usize = counts.iter().map(|(_, count)| count).sum();
    if total == 0 {
        return FrequencyTable::default();
    }

    // Stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let rows = counts
        .into_iter()
        .map(|(code, count)| FrequencyRow {
            code,
            name: code.name().to_string(),
            count,
            percent: round_to(100.0 * count as f64 / total as f64, 2),
        })
        .collect();

    FrequencyTable { rows }
}

fn bump(counts: &mut Vec<(UscsCode, usize)>, code: UscsCode) {
    match counts.iter_mut().find(|(seen, _)| *seen == code) {
        Some((_, count)) => *count += 1,
        None => counts.push((code, 1)),
    }
}
