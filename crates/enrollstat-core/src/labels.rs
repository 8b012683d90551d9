use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::school::SchoolDirectory;

pub const FIRST_YEAR: u16 = 2013;
pub const LAST_YEAR: u16 = 2022;
pub const YEAR_COUNT: usize = (LAST_YEAR - FIRST_YEAR + 1) as usize;

/// High school grade, in table column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Grade {
    Ten,
    Eleven,
    Twelve,
}

impl Grade {
    pub const ALL: [Grade; 3] = [Grade::Ten, Grade::Eleven, Grade::Twelve];

    pub fn column(self) -> usize {
        match self {
            Grade::Ten => 0,
            Grade::Eleven => 1,
            Grade::Twelve => 2,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Grade::Ten => 10,
            Grade::Eleven => 11,
            Grade::Twelve => 12,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|grade| grade.number() == number)
    }
}

impl From<Grade> for u8 {
    fn from(grade: Grade) -> Self {
        grade.number()
    }
}

impl TryFrom<u8> for Grade {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Grade::from_number(value).ok_or_else(|| format!("unsupported grade: {value}"))
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Maps human-readable labels onto table positions.
///
/// Years map to rows, grades to columns and school codes to planes. The
/// plane order is the directory order, which is also the order the loader
/// stacks each year's matrix in.
#[derive(Debug, Clone)]
pub struct LabelIndex {
    planes: HashMap<String, usize>,
}

impl LabelIndex {
    pub fn new(directory: &SchoolDirectory) -> Self {
        let planes = directory
            .codes()
            .enumerate()
            .map(|(plane, code)| (code.to_string(), plane))
            .collect();
        Self { planes }
    }

    pub fn year_row(&self, year: u16) -> Option<usize> {
        (FIRST_YEAR..=LAST_YEAR)
            .contains(&year)
            .then(|| usize::from(year - FIRST_YEAR))
    }

    pub fn grade_column(&self, grade: Grade) -> usize {
        grade.column()
    }

    pub fn school_plane(&self, code: &str) -> Option<usize> {
        self.planes.get(code).copied()
    }

    pub fn years(&self) -> impl Iterator<Item = u16> {
        FIRST_YEAR..=LAST_YEAR
    }

    pub fn school_count(&self) -> usize {
        self.planes.len()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn years_map_to_consecutive_rows() {
        let directory = SchoolDirectory::from_unique(vec![], vec![]).expect("empty directory");
        let index = LabelIndex::new(&directory);
        assert_eq!(index.year_row(2013), Some(0));
        assert_eq!(index.year_row(2022), Some(9));
        assert_eq!(index.year_row(2012), None);
        assert_eq!(index.year_row(2023), None);
        assert_eq!(index.years().count(), YEAR_COUNT);
    }

    #[test]
    fn grades_map_to_columns_in_order() {
        let columns = Grade::ALL.map(Grade::column);
        assert_eq!(columns, [0, 1, 2]);
        assert_eq!(Grade::from_number(12), Some(Grade::Twelve));
        assert_eq!(Grade::from_number(9), None);
    }

    #[test]
    fn school_planes_follow_directory_order() {
        let codes = (0..20).map(|i| format!("{}", 1000 + i)).collect::<Vec<_>>();
        let names = (0..20).map(|i| format!("School {i}")).collect::<Vec<_>>();
        let directory =
            SchoolDirectory::from_unique(names, codes.clone()).expect("valid directory");
        let index = LabelIndex::new(&directory);
        assert_eq!(index.school_count(), 20);

        let planes = codes
            .iter()
            .map(|code| index.school_plane(code).expect("known code"))
            .collect::<BTreeSet<_>>();
        assert_eq!(planes, (0..20).collect::<BTreeSet<_>>());
        assert_eq!(index.school_plane("1007"), Some(7));
        assert_eq!(index.school_plane("9999"), None);
    }
}
