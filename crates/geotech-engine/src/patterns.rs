//! Shared regex fragments and keyword lists

/// Report identifier for boring and CPT logs, e.g. "GEO-033" or "geo-7a".
/// Capture group 1 is the identifier.
pub const SECTION_ID: &str = r"(GEO-\d{1,4}[A-Z]?)\b";

/// Phrases that put a nearby depth in refusal context. Non-capturing.
pub const REFUSAL_CONTEXT: &str =
    r"auger\s*refusal|pile[^.\n]{0,20}?refusal|refusal|\bpwr\b|partially\s*weathered\s*rock";

/// A depth in feet. Capture group 1 is the number.
pub const DEPTH_FEET: &str = r"(\d+(?:\.\d+)?)\s*(?:feet|ft)\b";

/// Keywords suggesting fine-grained, slow-draining soils
pub const POOR_DRAINAGE_KEYWORDS: &[&str] = &[
    "silty clay",
    "mh",
    "ml",
    "high plasticity",
    "low permeability",
];

/// Keywords suggesting coarse, free-draining soils
pub const GOOD_DRAINAGE_KEYWORDS: &[&str] =
    &["sand", "gravel", "well-draining", "high permeability"];

/// Return the first keyword contained in already-lowercased text
pub fn find_keyword<'k>(text_lower: &str, keywords: &[&'k str]) -> Option<&'k str> {
    keywords
        .iter()
        .copied()
        .find(|keyword| text_lower.contains(keyword))
}

/// Normalize an identifier capture to its canonical uppercase form
pub fn normalize_id(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}
