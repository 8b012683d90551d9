use std::path::Path;

use crate::error::{DataError, Result};
use crate::labels::LabelIndex;
use crate::loader::{load_school_directory, load_year_datasets, stack_years, YearDataset};
use crate::school::{School, SchoolDirectory};
use crate::table::{EnrollmentTable, SCHOOL_COUNT};

/// Immutable context built once at startup and shared by every report.
#[derive(Debug, Clone)]
pub struct Dataset {
    table: EnrollmentTable,
    directory: SchoolDirectory,
    labels: LabelIndex,
}

impl Dataset {
    pub fn load(schools_path: &Path, enrollments_path: &Path) -> Result<Self> {
        let directory = load_school_directory(schools_path)?;
        let years = load_year_datasets(enrollments_path)?;
        let dataset = Self::from_parts(directory, years)?;

        tracing::info!(
            event = "dataset_loaded",
            schools = dataset.directory.len(),
            schools_path = %schools_path.display(),
            enrollments_path = %enrollments_path.display()
        );

        Ok(dataset)
    }

    pub fn from_parts(directory: SchoolDirectory, years: Vec<YearDataset>) -> Result<Self> {
        if directory.len() != SCHOOL_COUNT {
            return Err(DataError::SchoolCount {
                expected: SCHOOL_COUNT,
                found: directory.len(),
            });
        }

        let table = stack_years(years)?;
        let labels = LabelIndex::new(&directory);

        Ok(Self {
            table,
            directory,
            labels,
        })
    }

    pub fn table(&self) -> &EnrollmentTable {
        &self.table
    }

    pub fn directory(&self) -> &SchoolDirectory {
        &self.directory
    }

    pub fn labels(&self) -> &LabelIndex {
        &self.labels
    }

    /// Table plane for a school taken from this dataset's directory.
    pub fn plane_of(&self, school: &School) -> Option<usize> {
        self.labels.school_plane(&school.code)
    }
}
