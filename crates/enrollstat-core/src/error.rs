use thiserror::Error;

/// Fatal errors raised while assembling the dataset at startup.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// The school reference file lacks a required header.
    #[error("missing column '{0}' in school reference data")]
    MissingColumn(String),
    /// A reference row carries an empty name or code.
    #[error("empty {field} on line {line} of school reference data")]
    EmptyField { field: &'static str, line: u64 },
    #[error("inconsistent school reference data: {names} unique names but {codes} unique codes")]
    InconsistentDirectory { names: usize, codes: usize },
    #[error("expected {expected} schools, found {found}")]
    SchoolCount { expected: usize, found: usize },
    #[error("year {0} is outside the supported range")]
    InvalidYear(String),
    #[error("year {0} supplied more than once")]
    DuplicateYear(u16),
    #[error("no enrollment data supplied for year {0}")]
    MissingYear(u16),
    #[error("year {year} has {found} enrollment values, expected {expected}")]
    YearLength {
        year: u16,
        expected: usize,
        found: usize,
    },
    #[error("year {year} position {position}: invalid enrollment value {value}")]
    InvalidValue {
        year: u16,
        position: usize,
        value: String,
    },
}

/// Raised when user input names no known school.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("'{0}' is not a known school name or code")]
    UnknownSchool(String),
}

/// Convenience alias for results returned by the core crate.
pub type Result<T> = std::result::Result<T, DataError>;
