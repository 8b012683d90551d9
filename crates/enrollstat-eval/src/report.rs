use enrollstat_core::Dataset;

use crate::metrics::{GlobalStatistics, SchoolStatistics, StatisticsReport};

/// Render the banner, table shape and school listing.
pub fn render_dataset_header(dataset: &Dataset) -> String {
    let mut lines = Vec::new();
    let (years, schools, grades) = dataset.table().shape();

    lines.push("School Enrollment Statistics".to_string());
    lines.push(format!(
        "Shape of full data array: ({years}, {schools}, {grades})"
    ));
    lines.push(format!(
        "Dimensions of full data array: {}",
        dataset.table().ndim()
    ));
    lines.push("Schools:".to_string());

    let width = dataset
        .directory()
        .codes()
        .map(str::len)
        .max()
        .unwrap_or_default();
    for school in dataset.directory().iter() {
        lines.push(format!("  {:<width$}  {}", school.code, school.name));
    }

    lines.join("\n") + "\n"
}

/// Render the dataset header followed by the report, as one document.
pub fn render_document(dataset: &Dataset, report: &StatisticsReport) -> String {
    format!(
        "{}\n{}",
        render_dataset_header(dataset),
        render_report(report)
    )
}

/// Render the per-school and global sections in their fixed order.
pub fn render_report(report: &StatisticsReport) -> String {
    let mut lines = Vec::new();

    lines.push("***Requested School Statistics***".to_string());
    lines.push(String::new());
    push_school_section(&mut lines, &report.school);
    lines.push(String::new());

    lines.push("***General Statistics for All Schools***".to_string());
    lines.push(String::new());
    push_global_section(&mut lines, &report.global);

    lines.join("\n") + "\n"
}

fn push_school_section(lines: &mut Vec<String>, school: &SchoolStatistics) {
    lines.push(format!(
        "School Name: {}, School Code: {}",
        school.name, school.code
    ));

    for entry in &school.grade_means {
        lines.push(format!(
            "Mean enrollment for Grade {}: {}",
            entry.grade,
            display(entry.mean)
        ));
    }

    lines.push(format!(
        "Highest enrollment for a single grade: {}",
        display(school.max)
    ));
    lines.push(format!(
        "Lowest enrollment for a single grade: {}",
        display(school.min)
    ));

    for entry in &school.yearly_totals {
        lines.push(format!("Total enrollment for {}: {}", entry.year, entry.total));
    }

    lines.push(format!("Total ten year enrollment: {}", school.ten_year_total));
    lines.push(format!(
        "Mean total enrollment over 10 years: {}",
        school.ten_year_mean
    ));

    match school.median_over_threshold {
        Some(median) => lines.push(format!(
            "For all enrollments over {}, the median value was: {median}",
            school.median_threshold
        )),
        None => lines.push(format!(
            "No enrollments over {}.",
            school.median_threshold
        )),
    }
}

fn push_global_section(lines: &mut Vec<String>, global: &GlobalStatistics) {
    lines.push(format!(
        "Mean enrollment in {}: {}",
        global.first_year,
        display(global.first_year_mean)
    ));
    lines.push(format!(
        "Mean enrollment in {}: {}",
        global.last_year,
        display(global.last_year_mean)
    ));
    lines.push(format!(
        "Total graduating class of {}: {}",
        global.last_year, global.graduating_total
    ));
    lines.push(format!(
        "Highest enrollment for a single grade: {}",
        display(global.max)
    ));
    lines.push(format!(
        "Lowest enrollment for a single grade: {}",
        display(global.min)
    ));
}

fn display<T: ToString>(value: Option<T>) -> String {
    value
        .map(|value| value.to_string())
        .unwrap_or_else(|| "n/a".to_string())
}
