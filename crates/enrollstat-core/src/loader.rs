use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value;

use crate::error::{DataError, Result};
use crate::labels::{FIRST_YEAR, LAST_YEAR, YEAR_COUNT};
use crate::school::SchoolDirectory;
use crate::table::{Enrollment, EnrollmentTable};

pub const NAME_COLUMN: &str = "School Name";
pub const CODE_COLUMN: &str = "School Code";

/// One calendar year of flat enrollment figures, school-major, grade-minor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearDataset {
    pub year: u16,
    pub values: Vec<Enrollment>,
}

pub fn load_school_directory(path: &Path) -> Result<SchoolDirectory> {
    let file = File::open(path)?;
    read_school_directory(file)
}

/// Build the directory from CSV reference rows.
///
/// Rows may repeat a school. Unique names and unique codes are collected
/// separately in first-seen order and then zipped together.
pub fn read_school_directory<R: Read>(reader: R) -> Result<SchoolDirectory> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let name_idx = column_position(&headers, NAME_COLUMN)?;
    let code_idx = column_position(&headers, CODE_COLUMN)?;

    let mut names = Vec::new();
    let mut codes = Vec::new();
    let mut seen_names = HashSet::new();
    let mut seen_codes = HashSet::new();

    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        let name = record.get(name_idx).unwrap_or_default();
        let code = record.get(code_idx).unwrap_or_default();

        if name.is_empty() {
            return Err(DataError::EmptyField {
                field: "school name",
                line,
            });
        }
        if code.is_empty() {
            return Err(DataError::EmptyField {
                field: "school code",
                line,
            });
        }

        if seen_names.insert(name.to_string()) {
            names.push(name.to_string());
        }
        if seen_codes.insert(code.to_string()) {
            codes.push(code.to_string());
        }
    }

    tracing::debug!(
        event = "school_reference_read",
        names = names.len(),
        codes = codes.len()
    );

    SchoolDirectory::from_unique(names, codes)
}

fn column_position(headers: &csv::StringRecord, column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header == column)
        .ok_or_else(|| DataError::MissingColumn(column.to_string()))
}

pub fn load_year_datasets(path: &Path) -> Result<Vec<YearDataset>> {
    let content = std::fs::read_to_string(path)?;
    parse_year_datasets(&content)
}

/// Parse a JSON object keyed by year, each holding a flat array of figures.
///
/// `null` marks a missing figure. Year keys may appear in any order; a
/// repeated key is kept so that `stack_years` can reject it.
pub fn parse_year_datasets(content: &str) -> Result<Vec<YearDataset>> {
    let raw: RawYears = serde_json::from_str(content)?;

    raw.0
        .into_iter()
        .map(|(key, values)| -> Result<YearDataset> {
            let year = parse_year(&key)?;
            let values = values
                .iter()
                .enumerate()
                .map(|(position, value)| parse_enrollment(year, position, value))
                .collect::<Result<Vec<_>>>()?;
            Ok(YearDataset { year, values })
        })
        .collect()
}

/// Year entries in document order, duplicates included.
struct RawYears(Vec<(String, Vec<Value>)>);

impl<'de> Deserialize<'de> for RawYears {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RawYearsVisitor;

        impl<'de> Visitor<'de> for RawYearsVisitor {
            type Value = RawYears;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping years to arrays of enrollment figures")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or_default());
                while let Some(entry) = map.next_entry::<String, Vec<Value>>()? {
                    entries.push(entry);
                }
                Ok(RawYears(entries))
            }
        }

        deserializer.deserialize_map(RawYearsVisitor)
    }
}

fn parse_year(key: &str) -> Result<u16> {
    key.trim()
        .parse::<u16>()
        .ok()
        .filter(|year| (FIRST_YEAR..=LAST_YEAR).contains(year))
        .ok_or_else(|| DataError::InvalidYear(key.to_string()))
}

fn parse_enrollment(year: u16, position: usize, value: &Value) -> Result<Enrollment> {
    let invalid = || DataError::InvalidValue {
        year,
        position,
        value: value.to_string(),
    };

    match value {
        Value::Null => Ok(None),
        Value::Number(number) => {
            if let Some(whole) = number.as_u64() {
                return u32::try_from(whole).map(Some).map_err(|_| invalid());
            }
            match number.as_f64() {
                Some(float) if float >= 0.0 && float.fract() == 0.0 && float <= u32::MAX as f64 => {
                    Ok(Some(float as u32))
                }
                _ => Err(invalid()),
            }
        }
        _ => Err(invalid()),
    }
}

/// Order year datasets by row and stack them into the enrollment table.
pub fn stack_years(datasets: Vec<YearDataset>) -> Result<EnrollmentTable> {
    let mut rows: Vec<Option<Vec<Enrollment>>> = vec![None; YEAR_COUNT];

    for dataset in datasets {
        if !(FIRST_YEAR..=LAST_YEAR).contains(&dataset.year) {
            return Err(DataError::InvalidYear(dataset.year.to_string()));
        }
        if dataset.values.len() != EnrollmentTable::YEAR_LEN {
            return Err(DataError::YearLength {
                year: dataset.year,
                expected: EnrollmentTable::YEAR_LEN,
                found: dataset.values.len(),
            });
        }
        let slot = &mut rows[usize::from(dataset.year - FIRST_YEAR)];
        if slot.is_some() {
            return Err(DataError::DuplicateYear(dataset.year));
        }
        *slot = Some(dataset.values);
    }

    let rows = rows
        .into_iter()
        .enumerate()
        .map(|(row, values)| values.ok_or(DataError::MissingYear(FIRST_YEAR + row as u16)))
        .collect::<Result<Vec<_>>>()?;

    EnrollmentTable::from_year_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_unique_schools_in_first_seen_order() {
        let csv = "School Year,School Name,School Code,Grade\n\
                   2013-14,Alpha High,100,10\n\
                   2013-14,Alpha High,100,11\n\
                   2013-14,Beta High,200,10\n\
                   2014-15,Alpha High,100,10\n";
        let directory = read_school_directory(csv.as_bytes()).expect("read directory");
        let codes = directory.codes().collect::<Vec<_>>();
        assert_eq!(codes, vec!["100", "200"]);
        assert_eq!(
            directory.by_code("200").map(|s| s.name.as_str()),
            Some("Beta High")
        );
    }

    #[test]
    fn rejects_missing_code_column() {
        let csv = "School Name,Enrollment\nAlpha High,10\n";
        let err = read_school_directory(csv.as_bytes()).expect_err("missing column");
        assert!(matches!(err, DataError::MissingColumn(column) if column == CODE_COLUMN));
    }

    #[test]
    fn rejects_inconsistent_names_and_codes() {
        let csv = "School Name,School Code\nAlpha High,100\nAlpha Secondary,100\n";
        let err = read_school_directory(csv.as_bytes()).expect_err("two names, one code");
        assert!(matches!(
            err,
            DataError::InconsistentDirectory { names: 2, codes: 1 }
        ));
    }

    #[test]
    fn parses_nulls_as_missing() {
        let datasets = parse_year_datasets(r#"{"2015": [1, null, 3.0]}"#).expect("parse");
        assert_eq!(
            datasets,
            vec![YearDataset {
                year: 2015,
                values: vec![Some(1), None, Some(3)],
            }]
        );
    }

    #[test]
    fn rejects_negative_and_fractional_values() {
        let err = parse_year_datasets(r#"{"2015": [1, -4]}"#).expect_err("negative");
        assert!(matches!(err, DataError::InvalidValue { position: 1, .. }));

        let err = parse_year_datasets(r#"{"2015": [2.5]}"#).expect_err("fractional");
        assert!(matches!(err, DataError::InvalidValue { position: 0, .. }));
    }

    #[test]
    fn rejects_year_outside_range() {
        let err = parse_year_datasets(r#"{"2012": []}"#).expect_err("2012");
        assert!(matches!(err, DataError::InvalidYear(year) if year == "2012"));
    }

    fn full_years() -> Vec<YearDataset> {
        (FIRST_YEAR..=LAST_YEAR)
            .map(|year| YearDataset {
                year,
                values: vec![Some(u32::from(year)); EnrollmentTable::YEAR_LEN],
            })
            .collect()
    }

    #[test]
    fn stacks_years_regardless_of_input_order() {
        let mut years = full_years();
        years.reverse();
        let table = stack_years(years).expect("stack");
        assert_eq!(table.shape(), (10, 20, 3));
        assert_eq!(table.get(0, 0, 0), Some(2013));
        assert_eq!(table.get(9, 19, 2), Some(2022));
    }

    #[test]
    fn rejects_duplicate_and_missing_years() {
        let mut years = full_years();
        years[3].year = 2013;
        let err = stack_years(years).expect_err("duplicate");
        assert!(matches!(err, DataError::DuplicateYear(2013)));

        let mut years = full_years();
        years.remove(5);
        let err = stack_years(years).expect_err("missing");
        assert!(matches!(err, DataError::MissingYear(2018)));
    }

    #[test]
    fn repeated_year_key_is_a_duplicate() {
        let mut content = format!(r#"{{"2013": {}"#, serde_json::json!(vec![1; 60]));
        for year in FIRST_YEAR..=LAST_YEAR {
            content.push_str(&format!(r#", "{year}": {}"#, serde_json::json!(vec![year; 60])));
        }
        content.push('}');

        let datasets = parse_year_datasets(&content).expect("parse");
        assert_eq!(datasets.len(), 11);
        assert_eq!(datasets[0].values[0], Some(1));

        let err = stack_years(datasets).expect_err("2013 appears twice");
        assert!(matches!(err, DataError::DuplicateYear(2013)));
    }

    #[test]
    fn rejects_year_with_wrong_length() {
        let mut years = full_years();
        years[1].values.push(Some(1));
        let err = stack_years(years).expect_err("long year");
        assert!(matches!(
            err,
            DataError::YearLength {
                year: 2014,
                found: 61,
                ..
            }
        ));
    }
}
