use crate::error::{DataError, Result};
use crate::labels::{FIRST_YEAR, YEAR_COUNT};

pub const SCHOOL_COUNT: usize = 20;
pub const GRADE_COUNT: usize = 3;

/// A single enrollment figure; `None` marks a missing value.
pub type Enrollment = Option<u32>;

/// Enrollment figures indexed by (year row, school plane, grade column).
///
/// Stored row-major, so each year occupies one contiguous run of
/// `SCHOOL_COUNT * GRADE_COUNT` cells in school-major, grade-minor order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentTable {
    cells: Vec<Enrollment>,
}

impl EnrollmentTable {
    pub const YEAR_LEN: usize = SCHOOL_COUNT * GRADE_COUNT;

    /// Stack per-year flat sequences along a leading year axis.
    ///
    /// `years` must hold exactly one sequence per row, ordered by row.
    pub fn from_year_rows(years: Vec<Vec<Enrollment>>) -> Result<Self> {
        if years.len() < YEAR_COUNT {
            return Err(DataError::MissingYear(FIRST_YEAR + years.len() as u16));
        }
        if years.len() > YEAR_COUNT {
            return Err(DataError::InvalidYear(
                (FIRST_YEAR + YEAR_COUNT as u16).to_string(),
            ));
        }

        let mut cells = Vec::with_capacity(YEAR_COUNT * Self::YEAR_LEN);
        for (row, values) in years.into_iter().enumerate() {
            if values.len() != Self::YEAR_LEN {
                return Err(DataError::YearLength {
                    year: FIRST_YEAR + row as u16,
                    expected: Self::YEAR_LEN,
                    found: values.len(),
                });
            }
            cells.extend(values);
        }

        Ok(Self { cells })
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        (YEAR_COUNT, SCHOOL_COUNT, GRADE_COUNT)
    }

    pub fn ndim(&self) -> usize {
        3
    }

    pub fn get(&self, row: usize, plane: usize, column: usize) -> Enrollment {
        if row >= YEAR_COUNT || plane >= SCHOOL_COUNT || column >= GRADE_COUNT {
            return None;
        }
        self.cells[offset(row, plane, column)]
    }

    /// Every cell of the table, year-major.
    pub fn values(&self) -> impl Iterator<Item = Enrollment> + '_ {
        self.cells.iter().copied()
    }

    /// All cells of one school, year-major then grade.
    pub fn plane(&self, plane: usize) -> impl Iterator<Item = Enrollment> + '_ {
        (0..YEAR_COUNT).flat_map(move |row| self.plane_row(plane, row))
    }

    /// One school's grades for a single year.
    pub fn plane_row(&self, plane: usize, row: usize) -> impl Iterator<Item = Enrollment> + '_ {
        (0..GRADE_COUNT).map(move |column| self.get(row, plane, column))
    }

    /// One school's figures for a single grade across all years.
    pub fn plane_column(
        &self,
        plane: usize,
        column: usize,
    ) -> impl Iterator<Item = Enrollment> + '_ {
        (0..YEAR_COUNT).map(move |row| self.get(row, plane, column))
    }

    /// Every school and grade for a single year.
    pub fn row(&self, row: usize) -> impl Iterator<Item = Enrollment> + '_ {
        let start = (row.min(YEAR_COUNT)) * Self::YEAR_LEN;
        let end = (start + Self::YEAR_LEN).min(self.cells.len());
        self.cells[start..end].iter().copied()
    }

    /// Every school for a single year and grade.
    pub fn row_column(&self, row: usize, column: usize) -> impl Iterator<Item = Enrollment> + '_ {
        (0..SCHOOL_COUNT).map(move |plane| self.get(row, plane, column))
    }
}

fn offset(row: usize, plane: usize, column: usize) -> usize {
    (row * SCHOOL_COUNT + plane) * GRADE_COUNT + column
}
