//! Unified Soil Classification System reference data
//!
//! The code set, soil names and drainage qualities are fixed lookup data.
//! Every table here is a `match` on the enum, so there is no mutable
//! global state to initialize.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the 15 two-letter USCS group symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UscsCode {
    GW,
    GP,
    GM,
    GC,
    SW,
    SP,
    SM,
    SC,
    ML,
    CL,
    MH,
    CH,
    OL,
    OH,
    PT,
}

impl UscsCode {
    pub const ALL: [UscsCode; 15] = [
        UscsCode::GW,
        UscsCode::GP,
        UscsCode::GM,
        UscsCode::GC,
        UscsCode::SW,
        UscsCode::SP,
        UscsCode::SM,
        UscsCode::SC,
        UscsCode::ML,
        UscsCode::CL,
        UscsCode::MH,
        UscsCode::CH,
        UscsCode::OL,
        UscsCode::OH,
        UscsCode::PT,
    ];

    /// Parse a group symbol, ignoring ASCII case. Compounds such as
    /// "SC-SM" are not codes themselves and return `None`.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let upper = symbol.trim().to_ascii_uppercase();
        Self::ALL.into_iter().find(|code| code.symbol() == upper)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            UscsCode::GW => "GW",
            UscsCode::GP => "GP",
            UscsCode::GM => "GM",
            UscsCode::GC => "GC",
            UscsCode::SW => "SW",
            UscsCode::SP => "SP",
            UscsCode::SM => "SM",
            UscsCode::SC => "SC",
            UscsCode::ML => "ML",
            UscsCode::CL => "CL",
            UscsCode::MH => "MH",
            UscsCode::CH => "CH",
            UscsCode::OL => "OL",
            UscsCode::OH => "OH",
            UscsCode::PT => "PT",
        }
    }

    /// Human-readable soil name
    pub fn name(self) -> &'static str {
        match self {
            UscsCode::GW => "Well-graded gravel",
            UscsCode::GP => "Poorly graded gravel",
            UscsCode::GM => "Silty gravel",
            UscsCode::GC => "Clayey gravel",
            UscsCode::SW => "Well-graded sand",
            UscsCode::SP => "Poorly graded sand",
            UscsCode::SM => "Silty sand",
            UscsCode::SC => "Clayey sand",
            UscsCode::ML => "Low-plasticity silt",
            UscsCode::CL => "Low-plasticity clay",
            UscsCode::MH => "High-plasticity silt",
            UscsCode::CH => "High-plasticity clay",
            UscsCode::OL => "Organic silt/clay",
            UscsCode::OH => "Organic clay",
            UscsCode::PT => "Peat (organic)",
        }
    }

    pub fn quality(self) -> DrainageQuality {
        match self {
            UscsCode::GW | UscsCode::SW => DrainageQuality::Excellent,
            UscsCode::GP | UscsCode::SP => DrainageQuality::Good,
            UscsCode::GM | UscsCode::SM => DrainageQuality::Moderate,
            UscsCode::GC | UscsCode::SC | UscsCode::ML | UscsCode::CL => DrainageQuality::Poor,
            UscsCode::MH | UscsCode::CH => DrainageQuality::VeryPoor,
            UscsCode::OL | UscsCode::OH | UscsCode::PT => DrainageQuality::Unstable,
        }
    }
}

impl fmt::Display for UscsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Drainage quality of a soil group, from best to worst.
///
/// Serializes as the bucket key (`excellent`, `very_poor`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrainageQuality {
    Excellent,
    Good,
    Moderate,
    Poor,
    VeryPoor,
    Unstable,
}

impl DrainageQuality {
    /// Ordinal rank, Excellent=4 down to Unstable=-1
    pub fn rank(self) -> i8 {
        match self {
            DrainageQuality::Excellent => 4,
            DrainageQuality::Good => 3,
            DrainageQuality::Moderate => 2,
            DrainageQuality::Poor => 1,
            DrainageQuality::VeryPoor => 0,
            DrainageQuality::Unstable => -1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DrainageQuality::Excellent => "Excellent",
            DrainageQuality::Good => "Good",
            DrainageQuality::Moderate => "Moderate",
            DrainageQuality::Poor => "Poor",
            DrainageQuality::VeryPoor => "Very Poor",
            DrainageQuality::Unstable => "Unstable",
        }
    }
}

impl fmt::Display for DrainageQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
