//! Drainage classification
//!
//! Strategies are tried in order and the first one that produces a verdict
//! wins:
//! 1. Frequency mix - bucket percentages from the USCS frequency table
//! 2. Code scan - worst drainage quality among codes found in the raw text
//! 3. Keywords - plain-language soil descriptions
//! 4. Unclear - nothing usable in the text

use crate::patterns::{find_keyword, GOOD_DRAINAGE_KEYWORDS, POOR_DRAINAGE_KEYWORDS};
use geotech_types::{
    DrainageBasis, DrainageBreakdown, DrainageVerdict, FrequencyTable, UscsCode,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

pub const NOT_WELL_DRAINING: &str = "Overall NOT well-draining";
pub const MOSTLY_NOT_WELL_DRAINING: &str = "Mostly not well-draining";
pub const WELL_DRAINING_TENDENCY: &str = "Overall well-draining tendency";
pub const MIXED_DRAINAGE: &str = "Mixed drainage";
pub const KEYWORD_NOT_WELL_DRAINING: &str = "Not well-draining (keyword inference)";
pub const KEYWORD_WELL_DRAINING: &str = "Likely well-draining (keyword inference)";
pub const UNCLEAR: &str = "Unclear – needs review";

lazy_static! {
    static ref CODE_SCAN_PATTERN: Regex =
        Regex::new(r"(?i)\b(?:GW|SW|GP|SP|GM|SM|GC|SC|ML|CL|MH|CH|OL|OH|PT)\b").unwrap();
}

type DrainageStrategy = fn(&FrequencyTable, &str) -> Option<DrainageVerdict>;

const STRATEGIES: &[(&str, DrainageStrategy)] = &[
    ("frequency_mix", from_frequency_mix),
    ("code_scan", from_code_scan),
    ("keywords", from_keywords),
];

/// Classify overall drainage. Never fails; falls through to "unclear".
pub fn classify_drainage(table: &FrequencyTable, text: &str) -> DrainageVerdict {
    for (name, strategy) in STRATEGIES {
        if let Some(verdict) = strategy(table, text) {
            debug!(strategy = name, verdict = %verdict, "drainage classified");
            return verdict;
        }
    }

    debug!("no drainage signal found");
    DrainageVerdict {
        label: UNCLEAR.to_string(),
        basis: DrainageBasis::Unclear,
    }
}

/// Aggregate table percentages per bucket and apply the decision rule
pub fn from_frequency_mix(table: &FrequencyTable, _text: &str) -> Option<DrainageVerdict> {
    if table.is_empty() {
        return None;
    }

    let mut breakdown = DrainageBreakdown::default();
    for row in table.iter() {
        breakdown.add(row.code.quality(), row.percent);
    }

    let bad = breakdown.bad();
    let label = if bad >= 60.0 {
        NOT_WELL_DRAINING
    } else if bad >= 40.0 {
        MOSTLY_NOT_WELL_DRAINING
    } else if breakdown.ok() >= 50.0 && bad < 30.0 {
        WELL_DRAINING_TENDENCY
    } else {
        MIXED_DRAINAGE
    };

    Some(DrainageVerdict {
        label: label.to_string(),
        basis: DrainageBasis::FrequencyMix { breakdown },
    })
}

/// Pessimistic verdict from whichever codes appear anywhere in the text
pub fn from_code_scan(_table: &FrequencyTable, text: &str) -> Option<DrainageVerdict> {
    let mut codes: Vec<UscsCode> = CODE_SCAN_PATTERN
        .find_iter(text)
        .filter_map(|m| UscsCode::from_symbol(m.as_str()))
        .collect();
    codes.sort_by_key(|code| code.symbol());
    codes.dedup();

    let worst = codes.iter().map(|code| code.quality()).min_by_key(|q| q.rank())?;

    Some(DrainageVerdict {
        label: worst.label().to_string(),
        basis: DrainageBasis::CodeScan { codes, worst },
    })
}

pub fn from_keywords(_table: &FrequencyTable, text: &str) -> Option<DrainageVerdict> {
    let text_lower = text.to_lowercase();

    let label = if find_keyword(&text_lower, POOR_DRAINAGE_KEYWORDS).is_some() {
        KEYWORD_NOT_WELL_DRAINING
    } else if find_keyword(&text_lower, GOOD_DRAINAGE_KEYWORDS).is_some() {
        KEYWORD_WELL_DRAINING
    } else {
        return None;
    };

    Some(DrainageVerdict {
        label: label.to_string(),
        basis: DrainageBasis::Keywords,
    })
}
