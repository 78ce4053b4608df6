//! Data Processor Module
//! Gap filling and column extraction shared by the analysis functions.

use super::loader::is_numeric_dtype;
use crate::error::{FxError, Result};
use polars::prelude::*;
use rayon::prelude::*;

/// Fill missing numeric cells with the average of their neighbors.
///
/// Each numeric column is scanned top to bottom. A missing cell in the
/// first row takes the second row's value, one in the last row takes the
/// second-to-last row's value, and any other takes the mean of the rows
/// directly above and below. Neighbors are read as they stand at that point
/// of the scan, so a cell filled at row `i` is the predecessor seen by row
/// `i + 1`, and a missing neighbor leaves the cell missing.
///
/// Columns that needed filling come back as `Float64`; text columns are
/// returned unchanged. The input is not modified.
pub fn fill_na(df: &DataFrame) -> Result<DataFrame> {
    let columns = df
        .get_columns()
        .par_iter()
        .map(fill_column)
        .collect::<Result<Vec<Column>>>()?;

    Ok(DataFrame::new(columns)?)
}

fn fill_column(column: &Column) -> Result<Column> {
    if !is_numeric_dtype(column.dtype()) {
        return Ok(column.clone());
    }

    let mut values = column_to_f64(column)?;
    let missing = values.iter().filter(|v| v.is_none()).count();
    if missing == 0 {
        return Ok(column.clone());
    }

    fill_neighbors(&mut values);

    let remaining = values.iter().filter(|v| v.is_none()).count();
    log::debug!(
        "Filled column '{}': {} missing, {} left",
        column.name(),
        missing,
        remaining
    );
    Ok(Column::new(column.name().clone(), values))
}

/// The in-place neighbor scan behind [`fill_na`].
pub fn fill_neighbors(values: &mut [Option<f64>]) {
    let len = values.len();
    for i in 0..len {
        if values[i].is_some() {
            continue;
        }
        values[i] = if i == 0 {
            values.get(1).copied().flatten()
        } else if i == len - 1 {
            values[i - 1]
        } else {
            match (values[i - 1], values[i + 1]) {
                (Some(prev), Some(next)) => Some((prev + next) / 2.0),
                _ => None,
            }
        };
    }
}

/// Cast a numeric column to `f64`, mapping nulls and NaN to `None`.
pub fn column_to_f64(column: &Column) -> Result<Vec<Option<f64>>> {
    if column.null_count() == column.len() {
        return Ok(vec![None; column.len()]);
    }
    if !is_numeric_dtype(column.dtype()) {
        return Err(FxError::NonNumericColumn {
            column: column.name().to_string(),
            dtype: column.dtype().clone(),
        });
    }

    let cast = column.cast(&DataType::Float64)?;
    let values = cast
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();
    Ok(values)
}

/// Look up a column by name, failing with [`FxError::ColumnNotFound`].
pub fn get_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| FxError::ColumnNotFound(name.to_string()))
}

/// Numeric values of the named column.
pub fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    column_to_f64(get_column(df, name)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(values: &[Option<f64>]) -> Vec<Option<f64>> {
        let mut values = values.to_vec();
        fill_neighbors(&mut values);
        values
    }

    #[test]
    fn middle_gap_takes_neighbor_mean() {
        let out = filled(&[Some(1.0), None, Some(3.0), Some(4.0), Some(5.0)]);
        assert_eq!(out, vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0)]);
    }

    #[test]
    fn edge_gaps_copy_their_only_neighbor() {
        let out = filled(&[None, Some(2.0), Some(3.0), None]);
        assert_eq!(out, vec![Some(2.0), Some(2.0), Some(3.0), Some(3.0)]);
    }

    #[test]
    fn single_row_stays_missing() {
        assert_eq!(filled(&[None]), vec![None]);
    }

    #[test]
    fn consecutive_gaps_stay_missing() {
        // Row 0 copies row 1 while it is still missing.
        let out = filled(&[None, None, Some(4.0), Some(6.0)]);
        assert_eq!(out, vec![None, None, Some(4.0), Some(6.0)]);

        let out = filled(&[Some(2.0), Some(4.0), None, None]);
        assert_eq!(out, vec![Some(2.0), Some(4.0), None, None]);

        let out = filled(&[Some(2.0), None, Some(6.0), None]);
        assert_eq!(out, vec![Some(2.0), Some(4.0), Some(6.0), Some(6.0)]);
    }

    #[test]
    fn all_missing_column_stays_missing() {
        assert_eq!(filled(&[None, None, None]), vec![None, None, None]);
    }

    #[test]
    fn nan_counts_as_missing() {
        let column = Column::new("x".into(), vec![Some(1.0), Some(f64::NAN), Some(3.0)]);
        let values = column_to_f64(&column).unwrap();
        assert_eq!(values, vec![Some(1.0), None, Some(3.0)]);
    }

    #[test]
    fn text_column_is_rejected_as_numeric() {
        let column = Column::new("name".into(), vec!["a", "b"]);
        let err = column_to_f64(&column).unwrap_err();
        assert!(matches!(err, FxError::NonNumericColumn { .. }));
    }

    #[test]
    fn complete_integer_column_keeps_dtype() {
        let df = df!("n" => [1i64, 2, 3]).unwrap();
        let out = fill_na(&df).unwrap();
        assert_eq!(out.column("n").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn unknown_column_is_reported_by_name() {
        let df = df!("a" => [1.0]).unwrap();
        match numeric_values(&df, "b") {
            Err(FxError::ColumnNotFound(name)) => assert_eq!(name, "b"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn all_null_text_column_reads_as_missing() {
        let empty = Column::new("x".into(), [None::<&str>, None]);
        assert_eq!(column_to_f64(&empty).unwrap(), vec![None, None]);

        let text = Column::new("y".into(), [Some("a"), None]);
        assert!(matches!(
            column_to_f64(&text),
            Err(FxError::NonNumericColumn { .. })
        ));
    }
}
