//! Currency Comparison Module
//! Row-by-row comparison of two rate columns.

use crate::charts::{Chart, ChartSeries, SeriesColor};
use crate::data::numeric_values;
use crate::error::Result;
use polars::prelude::DataFrame;

/// Label used when neither column is strictly more expensive.
pub const SAME_LABEL: &str = "they are the same";

/// Label a row from `col1 - col2`.
///
/// The column holding the lower rate is labelled "more expensive". A
/// missing difference satisfies neither comparison and is labelled the same.
pub fn comparison_label(diff: Option<f64>, col1: &str, col2: &str) -> String {
    match diff {
        Some(d) if d < 0.0 => format!("{} is more expensive", col1),
        Some(d) if d > 0.0 => format!("{} is more expensive", col2),
        _ => SAME_LABEL.to_string(),
    }
}

/// Compare `col1` with `col2` row by row.
///
/// Returns one label per row in row order, a line chart overlaying both
/// columns and a bar chart of `col1 - col2`.
pub fn compare_currency(
    df: &DataFrame,
    col1: &str,
    col2: &str,
) -> Result<(Vec<String>, Chart, Chart)> {
    let first = numeric_values(df, col1)?;
    let second = numeric_values(df, col2)?;

    let diff: Vec<Option<f64>> = first
        .iter()
        .zip(&second)
        .map(|(a, b)| Some((*a)? - (*b)?))
        .collect();

    let labels: Vec<String> = diff
        .iter()
        .map(|d| comparison_label(*d, col1, col2))
        .collect();

    let rates = Chart::line(
        format!("Exchange rates for {} and {}", col1, col2),
        "Index",
        "Exchange Rate",
    )
    .with_series(ChartSeries::from_rows(col1, &first, SeriesColor::RED))
    .with_series(ChartSeries::from_rows(col2, &second, SeriesColor::BLUE))
    .with_size(1200, 600);

    let difference = Chart::bar(
        format!("Difference between {} and {} exchange rates", col1, col2),
        "Index",
        "Difference",
    )
    .with_series(ChartSeries::from_rows(
        format!("{} - {}", col1, col2),
        &diff,
        SeriesColor::PURPLE,
    ))
    .with_size(1200, 600);

    log::info!("Compared '{}' with '{}' over {} rows", col1, col2, labels.len());
    Ok((labels, rates, difference))
}

/// How many rows fell under each comparison label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonSummary {
    pub first_more_expensive: usize,
    pub second_more_expensive: usize,
    pub same: usize,
}

impl ComparisonSummary {
    pub fn from_labels(labels: &[String], col1: &str, col2: &str) -> Self {
        let first = comparison_label(Some(-1.0), col1, col2);
        let second = comparison_label(Some(1.0), col1, col2);

        labels.iter().fold(Self::default(), |mut summary, label| {
            if *label == first {
                summary.first_more_expensive += 1;
            } else if *label == second {
                summary.second_more_expensive += 1;
            } else {
                summary.same += 1;
            }
            summary
        })
    }

    pub fn total(&self) -> usize {
        self.first_more_expensive + self.second_more_expensive + self.same
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FxError;
    use polars::prelude::*;

    #[test]
    fn lower_rate_is_labelled_more_expensive() {
        assert_eq!(comparison_label(Some(-0.5), "EUR", "GBP"), "EUR is more expensive");
        assert_eq!(comparison_label(Some(0.5), "EUR", "GBP"), "GBP is more expensive");
        assert_eq!(comparison_label(Some(0.0), "EUR", "GBP"), SAME_LABEL);
    }

    #[test]
    fn missing_rows_compare_as_same_and_drop_out_of_charts() {
        let df = df!(
            "a" => [Some(1.0), None, Some(3.0)],
            "b" => [Some(2.0), Some(2.0), None]
        )
        .unwrap();

        let (labels, rates, difference) = compare_currency(&df, "a", "b").unwrap();
        assert_eq!(labels, vec!["a is more expensive", SAME_LABEL, SAME_LABEL]);
        assert_eq!(rates.series[0].points, vec![(0.0, 1.0), (2.0, 3.0)]);
        assert_eq!(rates.series[1].points, vec![(0.0, 2.0), (1.0, 2.0)]);
        assert_eq!(difference.series[0].points, vec![(0.0, -1.0)]);
    }

    #[test]
    fn text_column_cannot_be_compared() {
        let df = df!("a" => [1.0], "name" => ["x"]).unwrap();
        let err = compare_currency(&df, "a", "name").unwrap_err();
        assert!(matches!(err, FxError::NonNumericColumn { .. }));
    }

    #[test]
    fn summary_counts_each_label() {
        let labels = vec![
            "a is more expensive".to_string(),
            "b is more expensive".to_string(),
            "a is more expensive".to_string(),
            SAME_LABEL.to_string(),
        ];
        let summary = ComparisonSummary::from_labels(&labels, "a", "b");
        assert_eq!(
            summary,
            ComparisonSummary {
                first_more_expensive: 2,
                second_more_expensive: 1,
                same: 1,
            }
        );
        assert_eq!(summary.total(), 4);
    }
}
