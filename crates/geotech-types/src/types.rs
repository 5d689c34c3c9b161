use crate::soil::{DrainageQuality, UscsCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Advisory attached to every report
pub const ADVISORY: &str = "Answers are inferred from extracted text. For high-stakes decisions, \
                            verify with boring logs/appendices.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyRow {
    pub code: UscsCode,
    pub name: String,
    pub count: usize,
    pub percent: f64, // Rounded to 2 decimals
}

/// USCS code counts for one document, most frequent first.
/// An empty table means no codes were found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    pub rows: Vec<FrequencyRow>,
}

impl FrequencyTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FrequencyRow> {
        self.rows.iter()
    }
}

/// Percentage of matched codes falling in each drainage bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DrainageBreakdown {
    pub excellent: f64,
    pub good: f64,
    pub moderate: f64,
    pub poor: f64,
    pub very_poor: f64,
    pub unstable: f64,
}

impl DrainageBreakdown {
    pub fn add(&mut self, quality: DrainageQuality, percent: f64) {
        let slot = match quality {
            DrainageQuality::Excellent => &mut self.excellent,
            DrainageQuality::Good => &mut self.good,
            DrainageQuality::Moderate => &mut self.moderate,
            DrainageQuality::Poor => &mut self.poor,
            DrainageQuality::VeryPoor => &mut self.very_poor,
            DrainageQuality::Unstable => &mut self.unstable,
        };
        *slot += percent;
    }

    /// poor + very poor + unstable
    pub fn bad(&self) -> f64 {
        self.poor + self.very_poor + self.unstable
    }

    /// excellent + good
    pub fn ok(&self) -> f64 {
        self.excellent + self.good
    }

    pub fn mid(&self) -> f64 {
        self.moderate
    }
}

impl fmt::Display for DrainageBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mix: excellent {:.1}%, good {:.1}%, moderate {:.1}%, poor {:.1}%, very poor {:.1}%, unstable {:.1}%",
            self.excellent,
            self.good,
            self.mid(),
            self.poor,
            self.very_poor,
            self.unstable
        )
    }
}

/// Which tier of the drainage cascade produced a verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrainageBasis {
    FrequencyMix { breakdown: DrainageBreakdown },
    CodeScan { codes: Vec<UscsCode>, worst: DrainageQuality },
    Keywords,
    Unclear,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrainageVerdict {
    pub label: String,
    pub basis: DrainageBasis,
}

impl fmt::Display for DrainageVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.basis {
            DrainageBasis::FrequencyMix { breakdown } => {
                write!(f, "{} — {}", self.label, breakdown)
            }
            DrainageBasis::CodeScan { codes, worst } => {
                let symbols: Vec<&str> = codes.iter().map(|c| c.symbol()).collect();
                write!(f, "Mix ({}) → overall {}", symbols.join(", "), worst)
            }
            DrainageBasis::Keywords | DrainageBasis::Unclear => f.write_str(&self.label),
        }
    }
}

/// Whether groundwater is inferred shallower than the threshold depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroundwaterVerdict {
    Yes,
    No,
}

impl fmt::Display for GroundwaterVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroundwaterVerdict::Yes => f.write_str("Yes"),
            GroundwaterVerdict::No => f.write_str("No"),
        }
    }
}

/// One boring or CPT log located in the document text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section<'a> {
    pub id: String, // Uppercase identifier, e.g. "GEO-033"
    pub body: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefusalStrategy {
    /// Counted per boring/CPT log section
    Sectioned,
    /// No log headers found; narrative totals and document-wide scans
    Narrative,
}

impl fmt::Display for RefusalStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sectioned => f.write_str("sectioned"),
            Self::Narrative => f.write_str("narrative"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefusalSummary {
    pub strategy: RefusalStrategy,
    pub total_sections: u32,
    pub shallow_count: u32,
    pub percent: f64,
    pub depth_map: BTreeMap<String, f64>,
}

impl RefusalSummary {
    pub fn has_data(&self) -> bool {
        self.total_sections > 0 || !self.depth_map.is_empty()
    }
}

/// Document-wide cross-check: refusal depths anywhere in the text against
/// distinct "B-<n>" boring labels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoringLabelEstimate {
    pub label_count: u32,
    pub shallow_count: u32,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub source: String,
    pub drainage: DrainageVerdict,
    pub groundwater: GroundwaterVerdict,
    pub boring_refusals: RefusalSummary,
    pub cpt_refusals: Option<RefusalSummary>,
    pub uscs: FrequencyTable,
    pub boring_label_estimate: BoringLabelEstimate,
    pub advisory: String,
}

impl AnalysisReport {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
