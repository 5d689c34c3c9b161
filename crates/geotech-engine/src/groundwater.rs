//! Groundwater depth classification
//!
//! Rules are evaluated in order and the first rule that fires decides.
//! Every window between the anchor phrase and its qualifier is bounded and
//! never crosses a period or a line break, so a depth in one sentence is not
//! attributed to groundwater mentioned in another.

use crate::extractors::numeric::parse_depth;
use geotech_types::GroundwaterVerdict;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

/// Groundwater shallower than this many feet answers "Yes"
pub const SHALLOW_GROUNDWATER_FT: f64 = 5.0;

lazy_static! {
    static ref NOT_ENCOUNTERED: Regex =
        Regex::new(r"(?i)groundwater\s+(?:was\s+)?not\s+encountered").unwrap();

    /// "groundwater at approx 5 ft", "water table < 5 ft"
    static ref SHALLOW_QUALIFIER: Regex = Regex::new(
        r"(?i)(?:groundwater|water\s+table)[^.\n]{0,60}?(?:<|less\s+than|~|\bat\b|approx)[^.\n]{0,10}?\b5\s*(?:ft|feet)"
    )
    .unwrap();

    static ref EXPLICIT_DEPTH: Regex = Regex::new(
        r"(?i)(?:groundwater|water\s+table)[^.\n]{0,60}?(\d+(?:\.\d+)?)\s*(?:ft|feet)"
    )
    .unwrap();

    /// Soil-survey phrasing such as "water table exceeds 6.5 ft"
    static ref DEEP_QUALIFIER: Regex = Regex::new(
        r"(?i)(?:water\s+table|groundwater)[^.\n]{0,60}?(?:exceeds|>\s*|greater\s+than)\s*6(?:\.5)?\s*ft"
    )
    .unwrap();
}

type GroundwaterRule = fn(&str) -> Option<GroundwaterVerdict>;

const RULES: &[(&str, GroundwaterRule)] = &[
    ("not_encountered", not_encountered),
    ("shallow_qualifier", shallow_qualifier),
    ("explicit_depth", explicit_depth),
    ("deep_qualifier", deep_qualifier),
];

/// Classify whether groundwater is shallower than 5 ft.
///
/// Defaults to `No` when the text carries no groundwater signal.
pub fn classify_groundwater(text: &str) -> GroundwaterVerdict {
    for (name, rule) in RULES {
        if let Some(verdict) = rule(text) {
            debug!(rule = name, verdict = %verdict, "groundwater classified");
            return verdict;
        }
    }

    debug!("no groundwater signal found, defaulting to No");
    GroundwaterVerdict::No
}

fn not_encountered(text: &str) -> Option<GroundwaterVerdict> {
    NOT_ENCOUNTERED
        .is_match(text)
        .then_some(GroundwaterVerdict::No)
}

fn shallow_qualifier(text: &str) -> Option<GroundwaterVerdict> {
    SHALLOW_QUALIFIER
        .is_match(text)
        .then_some(GroundwaterVerdict::Yes)
}

/// Only the first explicit mention is considered; if its number does not
/// parse, the rule yields nothing and the cascade moves on.
fn explicit_depth(text: &str) -> Option<GroundwaterVerdict> {
    let depth = EXPLICIT_DEPTH
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| parse_depth(m.as_str()))?;

    Some(if depth < SHALLOW_GROUNDWATER_FT {
        GroundwaterVerdict::Yes
    } else {
        GroundwaterVerdict::No
    })
}

fn deep_qualifier(text: &str) -> Option<GroundwaterVerdict> {
    DEEP_QUALIFIER
        .is_match(text)
        .then_some(GroundwaterVerdict::No)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geotech_types::GroundwaterVerdict::{No, Yes};

    #[test]
    fn test_not_encountered_overrides_depth_mentions() {
        let text = "Water table at approx 3 ft per county soil survey.\n\
                    Groundwater was not encountered during drilling.";
        assert_eq!(classify_groundwater(text), No);
        assert_eq!(classify_groundwater("groundwater not encountered"), No);
    }

    #[test]
    fn test_approximate_shallow_depth() {
        assert_eq!(classify_groundwater("water table at approx 4 ft"), Yes);
        assert_eq!(classify_groundwater("Groundwater less than 5 ft below grade"), Yes);
        assert_eq!(classify_groundwater("groundwater ~5ft bgs"), Yes);
    }

    #[test]
    fn test_explicit_depth_compared_with_threshold() {
        assert_eq!(classify_groundwater("groundwater encountered at 7 ft"), No);
        assert_eq!(classify_groundwater("Groundwater was measured at 3.5 ft"), Yes);
        assert_eq!(classify_groundwater("groundwater encountered at 15 ft"), No);
    }

    #[test]
    fn test_window_does_not_cross_sentences() {
        let text = "Groundwater was observed in the borehole. Refusal occurred at 2 ft.";
        assert_eq!(classify_groundwater(text), No);
    }

    #[test]
    fn test_soil_survey_phrasing() {
        assert_eq!(
            classify_groundwater("Depth to water table: greater than 6 ft"),
            No
        );
    }

    #[test]
    fn test_deep_qualifier_decides_beyond_depth_window() {
        let texts = [
            "Depth to the water table listed by the county soil survey for both mapped units exceeds 6.5 ft",
            "Depth to the water table listed by the county soil survey for both mapped units is greater than 6 ft",
        ];
        for text in texts {
            assert_eq!(explicit_depth(text), None, "{text}");
            assert_eq!(deep_qualifier(text), Some(No), "{text}");
            assert_eq!(classify_groundwater(text), No, "{text}");
        }
    }

    #[test]
    fn test_feet_spelled_out() {
        assert_eq!(classify_groundwater("groundwater at 3 feet"), Yes);
        assert_eq!(classify_groundwater("Water table at approx 5 feet"), Yes);
        assert_eq!(classify_groundwater("groundwater was measured at 12 feet"), No);
    }

    #[test]
    fn test_defaults_to_no() {
        assert_eq!(classify_groundwater(""), No);
        assert_eq!(classify_groundwater("Site grades slope gently to the east."), No);
    }
}
