//! Core contracts for enrollstat.
//!
//! This crate owns the enrollment table, the school directory, the label
//! index that addresses the table by year, school code and grade, and the
//! loaders that assemble all three from the reference CSV and the per-year
//! enrollment sequences.

pub mod dataset;
pub mod error;
pub mod labels;
pub mod loader;
pub mod school;
pub mod table;

pub use dataset::Dataset;
pub use error::{DataError, Result, SelectionError};
pub use labels::{Grade, LabelIndex, FIRST_YEAR, LAST_YEAR, YEAR_COUNT};
pub use loader::{load_school_directory, load_year_datasets, read_school_directory, YearDataset};
pub use school::{School, SchoolDirectory};
pub use table::{Enrollment, EnrollmentTable, GRADE_COUNT, SCHOOL_COUNT};
