//! Yearly Average Module
//! Groups a rate column by calendar year and averages it.

use crate::charts::{Chart, ChartSeries, SeriesColor};
use crate::data::{column_to_f64, get_column};
use crate::error::{FxError, Result};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use polars::prelude::*;

/// Name of the year column in the aggregated table.
pub const YEAR_COL: &str = "year";

const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%Y%m%d",
    "%d %b %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a calendar date from the formats commonly found in rate exports.
///
/// Accepted: `2021-07-30`, `2021/07/30`, `07/30/2021`, `30.07.2021`,
/// `20210730`, `30 Jul 2021`, `Jul 30, 2021`, the month form `2021-07`
/// (first of the month), `YYYY-MM-DD` with a time of day, and RFC 3339.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d").ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
}

/// Year of every row; missing or blank dates map to `None`.
fn parse_years(column: &Column) -> Result<Vec<Option<i32>>> {
    let text = column.cast(&DataType::String)?;
    let years = text
        .str()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| match value {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => parse_date(s)
                .map(|date| Some(date.year()))
                .ok_or_else(|| FxError::DateParse {
                    column: column.name().to_string(),
                    row,
                    value: s.to_string(),
                }),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(years)
}

/// Average `value_col` per calendar year of `date_col`.
///
/// Returns a table with one row per year (ascending) and columns
/// `year` and `value_col`, plus a line chart of the result.
pub fn calculate_yearly_average(
    df: &DataFrame,
    date_col: &str,
    value_col: &str,
) -> Result<(DataFrame, Chart)> {
    if value_col == YEAR_COL {
        return Err(FxError::ReservedColumn(value_col.to_string()));
    }
    let years = parse_years(get_column(df, date_col)?)?;
    let values = column_to_f64(get_column(df, value_col)?)?;

    let yearly = DataFrame::new(vec![
        Column::new(YEAR_COL.into(), years),
        Column::new(value_col.into(), values),
    ])?
    .lazy()
    .filter(col(YEAR_COL).is_not_null())
    .group_by([col(YEAR_COL)])
    .agg([col(value_col).mean()])
    .sort([YEAR_COL], SortMultipleOptions::default())
    .collect()?;

    let years: Vec<Option<i32>> = yearly.column(YEAR_COL)?.i32()?.into_iter().collect();
    let means: Vec<Option<f64>> = yearly.column(value_col)?.f64()?.into_iter().collect();

    let points = years
        .iter()
        .zip(&means)
        .filter_map(|(year, mean)| Some((f64::from((*year)?), (*mean)?)))
        .collect();

    let first = years.iter().flatten().min();
    let last = years.iter().flatten().max();
    let title = match (first, last) {
        (Some(first), Some(last)) => format!(
            "Line chart of {} exchange rate from {} to {}",
            value_col, first, last
        ),
        _ => format!("Line chart of {} exchange rate", value_col),
    };

    let chart = Chart::line(title, "Year", value_col)
        .with_series(ChartSeries::new(value_col, points, SeriesColor::BLUE).with_markers());

    log::info!(
        "Yearly average of '{}' by '{}': {} years",
        value_col,
        date_col,
        yearly.height()
    );
    Ok((yearly, chart))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_date_layouts() {
        let expected = NaiveDate::from_ymd_opt(2021, 7, 30);
        assert_eq!(parse_date("2021-07-30"), expected);
        assert_eq!(parse_date("2021/07/30"), expected);
        assert_eq!(parse_date("07/30/2021"), expected);
        assert_eq!(parse_date("30.07.2021"), expected);
        assert_eq!(parse_date("2021-07-30 13:45:00"), expected);
        assert_eq!(parse_date("2021-07-30T13:45:00.250"), expected);
        assert_eq!(parse_date("2021-07-30T13:45:00+02:00"), expected);
        assert_eq!(parse_date(" 2021-07-30 "), expected);
        assert_eq!(parse_date("20210730"), expected);
        assert_eq!(parse_date("30 Jul 2021"), expected);
        assert_eq!(parse_date("Jul 30, 2021"), expected);
        assert_eq!(parse_date("July 30, 2021"), expected);
        assert_eq!(parse_date("2021-07"), NaiveDate::from_ymd_opt(2021, 7, 1));
    }

    #[test]
    fn rejects_non_dates() {
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2021-13-01"), None);
    }

    #[test]
    fn missing_dates_are_left_out_of_the_groups() {
        let df = df!(
            "date" => [Some("2019-03-01"), None, Some(""), Some("2019-09-01")],
            "rate" => [1.0, 100.0, 100.0, 3.0]
        )
        .unwrap();

        let (yearly, _) = calculate_yearly_average(&df, "date", "rate").unwrap();
        assert_eq!(yearly.height(), 1);
        assert_eq!(yearly.column("rate").unwrap().f64().unwrap().get(0), Some(2.0));
    }

    #[test]
    fn bad_date_reports_row_and_value() {
        let df = df!("date" => ["2020-01-01", "soon"], "rate" => [1.0, 2.0]).unwrap();
        match calculate_yearly_average(&df, "date", "rate") {
            Err(FxError::DateParse { column, row, value }) => {
                assert_eq!(column, "date");
                assert_eq!(row, 1);
                assert_eq!(value, "soon");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn missing_values_do_not_drag_the_mean() {
        let df = df!(
            "date" => ["2020-01-01", "2020-06-01", "2020-12-01"],
            "rate" => [Some(2.0), None, Some(f64::NAN)]
        )
        .unwrap();

        let (yearly, chart) = calculate_yearly_average(&df, "date", "rate").unwrap();
        assert_eq!(yearly.column("rate").unwrap().f64().unwrap().get(0), Some(2.0));
        assert_eq!(chart.series[0].points, vec![(2020.0, 2.0)]);
    }

    #[test]
    fn integer_dates_group_by_year() {
        let df = df!(
            "date" => [20190105i64, 20191231, 20200301],
            "rate" => [1.0, 3.0, 5.0]
        )
        .unwrap();

        let (yearly, _) = calculate_yearly_average(&df, "date", "rate").unwrap();
        let means: Vec<Option<f64>> = yearly
            .column("rate")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(means, vec![Some(2.0), Some(5.0)]);
    }

    #[test]
    fn value_column_named_year_is_rejected() {
        let df = df!("date" => ["2020-01-01"], "year" => [1.0]).unwrap();
        match calculate_yearly_average(&df, "date", "year") {
            Err(FxError::ReservedColumn(name)) => assert_eq!(name, "year"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
