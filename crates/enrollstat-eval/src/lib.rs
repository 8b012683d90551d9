//! Descriptive statistics over the enrollment table.

pub mod aggregate;
pub mod engine;
pub mod errors;
pub mod metrics;
pub mod report;

pub use engine::{ReportOptions, StatisticsEngine, DEFAULT_MEDIAN_THRESHOLD};
pub use errors::EvalError;
pub use metrics::{
    GlobalStatistics, GradeMean, REPORT_VERSION, SchoolStatistics, StatisticsReport, YearTotal,
};
pub use report::{render_dataset_header, render_document, render_report};
