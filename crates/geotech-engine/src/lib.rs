pub mod config;
pub mod drainage;
pub mod extractors;
pub mod groundwater;
pub mod patterns;
pub mod refusal;
pub mod segment;
pub mod uscs;

pub use config::AnalysisConfig;

use geotech_types::{AnalysisReport, ADVISORY};
use tracing::{debug, info};

/// GeotechEngine entry point
pub struct GeotechEngine {
    config: AnalysisConfig,
}

impl GeotechEngine {
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run every analyzer over the extracted text of one report.
    ///
    /// Never fails: empty or garbled text produces "no signal" answers.
    pub fn analyze(&self, source: &str, text: &str) -> AnalysisReport {
        debug!(source, chars = text.len(), "analyzing report text");
        let threshold = self.config.refusal_threshold_ft;

        let uscs = uscs::frequency_table(text, self.config.collapse_compounds);
        let drainage = drainage::classify_drainage(&uscs, text);
        let groundwater = groundwater::classify_groundwater(text);
        let boring_refusals = refusal::count_boring_refusals(text, threshold);
        let cpt_refusals = refusal::count_cpt_refusals(text, threshold);
        let boring_label_estimate = refusal::boring_label_estimate(text, threshold);

        info!(
            source,
            codes = uscs.len(),
            borings = boring_refusals.total_sections,
            shallow_refusals = boring_refusals.shallow_count,
            groundwater = %groundwater,
            "analysis complete"
        );

        AnalysisReport {
            source: source.to_string(),
            drainage,
            groundwater,
            boring_refusals,
            cpt_refusals,
            uscs,
            boring_label_estimate,
            advisory: ADVISORY.to_string(),
        }
    }

    /// Analyze raw text (for testing)
    pub fn analyze_text(&self, text: &str) -> AnalysisReport {
        self.analyze("<text>", text)
    }
}

impl Default for GeotechEngine {
    fn default() -> Self {
        Self::new()
    }
}


// ============================================================================
// PROPERTY TESTS - Fuzz testing for the analyzers
// ============================================================================
