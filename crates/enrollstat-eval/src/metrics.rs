use enrollstat_core::Grade;
use serde::{Deserialize, Serialize};

/// Report contract version for JSON output.
pub const REPORT_VERSION: &str = "0.1";

/// Machine-readable statistics for one selected school and the whole table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub report_version: String,
    pub generated_at: String,
    pub shape: [usize; 3],
    pub school: SchoolStatistics,
    pub global: GlobalStatistics,
}

/// Statistics for the selected school. Means and medians are truncated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolStatistics {
    pub code: String,
    pub name: String,
    pub grade_means: Vec<GradeMean>,
    pub max: Option<u32>,
    pub min: Option<u32>,
    pub yearly_totals: Vec<YearTotal>,
    pub ten_year_total: u64,
    pub ten_year_mean: u64,
    pub median_threshold: u32,
    /// `None` when no figure exceeds the threshold.
    pub median_over_threshold: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeMean {
    pub grade: Grade,
    pub mean: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearTotal {
    pub year: u16,
    pub total: u64,
}

/// Cross-school aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalStatistics {
    pub first_year: u16,
    pub first_year_mean: Option<u64>,
    pub last_year: u16,
    pub last_year_mean: Option<u64>,
    /// Grade 12 total in the last year.
    pub graduating_total: u64,
    pub max: Option<u32>,
    pub min: Option<u32>,
}
