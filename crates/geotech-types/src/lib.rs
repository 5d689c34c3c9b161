pub mod soil;
pub mod types;

pub use soil::{DrainageQuality, UscsCode};
pub use types::{
    AnalysisReport, BoringLabelEstimate, DrainageBasis, DrainageBreakdown, DrainageVerdict,
    FrequencyRow, FrequencyTable, GroundwaterVerdict, RefusalStrategy, RefusalSummary, Section,
    ADVISORY,
};
