use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{DataError, Result, SelectionError};

/// A school as listed in the reference data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct School {
    pub code: String,
    pub name: String,
}

/// Ordered code/name directory, in first-seen order of the reference data.
#[derive(Debug, Clone)]
pub struct SchoolDirectory {
    schools: Vec<School>,
    by_code: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl SchoolDirectory {
    /// Zip unique names with unique codes, position by position.
    ///
    /// Both lists must already be de-duplicated and in first-seen order.
    pub fn from_unique(names: Vec<String>, codes: Vec<String>) -> Result<Self> {
        if names.len() != codes.len() {
            return Err(DataError::InconsistentDirectory {
                names: names.len(),
                codes: codes.len(),
            });
        }

        let schools = codes
            .into_iter()
            .zip(names)
            .map(|(code, name)| School { code, name })
            .collect::<Vec<_>>();

        Self::from_schools(schools)
    }

    pub fn from_schools(schools: Vec<School>) -> Result<Self> {
        let mut by_code = HashMap::with_capacity(schools.len());
        let mut by_name = HashMap::with_capacity(schools.len());

        for (position, school) in schools.iter().enumerate() {
            by_code.insert(school.code.clone(), position);
            by_name.insert(school.name.clone(), position);
        }

        if by_code.len() != schools.len() || by_name.len() != schools.len() {
            return Err(DataError::InconsistentDirectory {
                names: by_name.len(),
                codes: by_code.len(),
            });
        }

        Ok(Self {
            schools,
            by_code,
            by_name,
        })
    }

    pub fn len(&self) -> usize {
        self.schools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schools.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &School> {
        self.schools.iter()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.schools.iter().map(|school| school.code.as_str())
    }

    pub fn by_code(&self, code: &str) -> Option<&School> {
        self.by_code.get(code).map(|&position| &self.schools[position])
    }

    pub fn by_name(&self, name: &str) -> Option<&School> {
        self.by_name.get(name).map(|&position| &self.schools[position])
    }

    /// Resolve raw user input to a school.
    ///
    /// Surrounding whitespace is trimmed. Codes are checked before names, so
    /// a string that is both a code and a name resolves as a code. Matching
    /// is exact and case-sensitive.
    pub fn resolve(&self, input: &str) -> std::result::Result<&School, SelectionError> {
        let needle = input.trim();
        self.by_code(needle)
            .or_else(|| self.by_name(needle))
            .ok_or_else(|| SelectionError::UnknownSchool(needle.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> SchoolDirectory {
        SchoolDirectory::from_unique(
            vec![
                "Centennial High School".to_string(),
                "Sir Winston Churchill High School".to_string(),
                "1224".to_string(),
            ],
            vec!["1224".to_string(), "9857".to_string(), "7000".to_string()],
        )
        .expect("valid directory")
    }

    #[test]
    fn resolves_code_and_name_to_same_school() {
        let directory = directory();
        let by_code = directory.resolve("9857").expect("code resolves");
        let by_name = directory
            .resolve("Sir Winston Churchill High School")
            .expect("name resolves");
        assert_eq!(by_code, by_name);
        assert_eq!(by_code.code, "9857");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let directory = directory();
        let school = directory.resolve("  9857 \n").expect("trimmed code resolves");
        assert_eq!(school.name, "Sir Winston Churchill High School");
    }

    #[test]
    fn code_match_takes_priority_over_name() {
        let directory = directory();
        let school = directory.resolve("1224").expect("resolves");
        assert_eq!(school.name, "Centennial High School");
    }

    #[test]
    fn name_matching_is_case_sensitive() {
        let directory = directory();
        let err = directory
            .resolve("centennial high school")
            .expect_err("lowercase name should not match");
        assert_eq!(
            err,
            SelectionError::UnknownSchool("centennial high school".to_string())
        );
    }

    #[test]
    fn rejects_mismatched_name_and_code_counts() {
        let err = SchoolDirectory::from_unique(
            vec!["A".to_string(), "B".to_string()],
            vec!["1".to_string()],
        )
        .expect_err("counts differ");
        assert!(matches!(
            err,
            DataError::InconsistentDirectory { names: 2, codes: 1 }
        ));
    }
}
