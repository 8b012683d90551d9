//! Missing-aware reductions.
//!
//! Every function here skips `None` cells. A reduction over a slice with no
//! recorded figure yields `None` rather than zero.

use enrollstat_core::Enrollment;

use crate::errors::EvalError;

pub fn present<I>(values: I) -> impl Iterator<Item = u32>
where
    I: IntoIterator<Item = Enrollment>,
{
    values.into_iter().flatten()
}

pub fn sum<I>(values: I) -> u64
where
    I: IntoIterator<Item = Enrollment>,
{
    present(values).map(u64::from).sum()
}

pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Enrollment>,
{
    let (total, count) = present(values).fold((0u64, 0u64), |(total, count), value| {
        (total + u64::from(value), count + 1)
    });
    (count > 0).then(|| total as f64 / count as f64)
}

pub fn max<I>(values: I) -> Option<u32>
where
    I: IntoIterator<Item = Enrollment>,
{
    present(values).max()
}

pub fn min<I>(values: I) -> Option<u32>
where
    I: IntoIterator<Item = Enrollment>,
{
    present(values).min()
}

/// Median of the recorded figures strictly greater than `threshold`.
pub fn median_above<I>(values: I, threshold: u32) -> Result<f64, EvalError>
where
    I: IntoIterator<Item = Enrollment>,
{
    let mut selected = present(values)
        .filter(|&value| value > threshold)
        .collect::<Vec<_>>();
    if selected.is_empty() {
        return Err(EvalError::EmptyAggregation { threshold });
    }

    selected.sort_unstable();
    let mid = selected.len() / 2;
    let median = if selected.len() % 2 == 0 {
        (f64::from(selected[mid - 1]) + f64::from(selected[mid])) / 2.0
    } else {
        f64::from(selected[mid])
    };
    Ok(median)
}

/// Drop the fractional part of a non-negative statistic.
pub fn truncate(value: f64) -> u64 {
    value.trunc() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reductions_skip_missing_values() {
        let values = [Some(4), None, Some(10), Some(1)];
        assert_eq!(sum(values), 15);
        assert_eq!(mean(values), Some(5.0));
        assert_eq!(max(values), Some(10));
        assert_eq!(min(values), Some(1));
    }

    #[test]
    fn all_missing_yields_nothing() {
        let values = [None, None];
        assert_eq!(sum(values), 0);
        assert_eq!(mean(values), None);
        assert_eq!(max(values), None);
        assert_eq!(min(values), None);
    }

    #[test]
    fn median_above_uses_strict_threshold() {
        let values = [Some(500), Some(501), Some(700), Some(900), None];
        assert_eq!(median_above(values, 500), Ok(700.0));
    }

    #[test]
    fn median_above_averages_even_counts() {
        let values = [Some(600), Some(501), Some(550), Some(800)];
        assert_eq!(median_above(values, 500), Ok(575.0));
    }

    #[test]
    fn median_above_reports_empty_selection() {
        let values = [Some(100), Some(110), None, Some(500)];
        assert_eq!(
            median_above(values, 500),
            Err(EvalError::EmptyAggregation { threshold: 500 })
        );
    }

    #[test]
    fn truncate_discards_fraction() {
        assert_eq!(truncate(575.9), 575);
        assert_eq!(truncate(12.0), 12);
    }
}
