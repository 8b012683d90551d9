use chrono::Utc;
use enrollstat_core::{Dataset, Grade, School, FIRST_YEAR, LAST_YEAR, YEAR_COUNT};
use serde::{Deserialize, Serialize};

use crate::aggregate::{self, truncate};
use crate::errors::EvalError;
use crate::metrics::{
    GlobalStatistics, GradeMean, REPORT_VERSION, SchoolStatistics, StatisticsReport, YearTotal,
};

pub const DEFAULT_MEDIAN_THRESHOLD: u32 = 500;

/// Options for statistics computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Only figures strictly above this value feed the median.
    pub median_threshold: u32,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            median_threshold: DEFAULT_MEDIAN_THRESHOLD,
        }
    }
}

/// Computes per-school and global statistics from a loaded dataset.
#[derive(Debug, Clone, Default)]
pub struct StatisticsEngine {
    options: ReportOptions,
}

impl StatisticsEngine {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    pub fn run(&self, dataset: &Dataset, school: &School) -> Result<StatisticsReport, EvalError> {
        let (years, schools, grades) = dataset.table().shape();
        Ok(StatisticsReport {
            report_version: REPORT_VERSION.to_string(),
            generated_at: Utc::now().to_rfc3339(),
            shape: [years, schools, grades],
            school: self.school_statistics(dataset, school)?,
            global: self.global_statistics(dataset),
        })
    }

    pub fn school_statistics(
        &self,
        dataset: &Dataset,
        school: &School,
    ) -> Result<SchoolStatistics, EvalError> {
        let plane = dataset
            .plane_of(school)
            .ok_or_else(|| EvalError::UnknownSchool(school.code.clone()))?;
        let table = dataset.table();
        let labels = dataset.labels();

        let grade_means = Grade::ALL
            .into_iter()
            .map(|grade| GradeMean {
                grade,
                mean: aggregate::mean(table.plane_column(plane, labels.grade_column(grade)))
                    .map(truncate),
            })
            .collect();

        let yearly_totals = labels
            .years()
            .filter_map(|year| {
                let row = labels.year_row(year)?;
                Some(YearTotal {
                    year,
                    total: aggregate::sum(table.plane_row(plane, row)),
                })
            })
            .collect::<Vec<_>>();

        let ten_year_total = aggregate::sum(table.plane(plane));
        let threshold = self.options.median_threshold;
        let median_over_threshold = match aggregate::median_above(table.plane(plane), threshold) {
            Ok(median) => Some(truncate(median)),
            Err(EvalError::EmptyAggregation { .. }) => None,
            Err(err) => return Err(err),
        };

        Ok(SchoolStatistics {
            code: school.code.clone(),
            name: school.name.clone(),
            grade_means,
            max: aggregate::max(table.plane(plane)),
            min: aggregate::min(table.plane(plane)),
            yearly_totals,
            ten_year_total,
            ten_year_mean: ten_year_total / YEAR_COUNT as u64,
            median_threshold: threshold,
            median_over_threshold,
        })
    }

    pub fn global_statistics(&self, dataset: &Dataset) -> GlobalStatistics {
        let table = dataset.table();
        let labels = dataset.labels();

        let year_mean = |year: u16| {
            labels
                .year_row(year)
                .and_then(|row| aggregate::mean(table.row(row)))
                .map(truncate)
        };

        let graduating_total = labels
            .year_row(LAST_YEAR)
            .map(|row| aggregate::sum(table.row_column(row, labels.grade_column(Grade::Twelve))))
            .unwrap_or_default();

        GlobalStatistics {
            first_year: FIRST_YEAR,
            first_year_mean: year_mean(FIRST_YEAR),
            last_year: LAST_YEAR,
            last_year_mean: year_mean(LAST_YEAR),
            graduating_total,
            max: aggregate::max(table.values()),
            min: aggregate::min(table.values()),
        }
    }
}
