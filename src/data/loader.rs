//! CSV Data Loader Module
//! Handles CSV file loading and column discovery using Polars.

use crate::error::{FxError, Result};
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// Rows scanned when inferring the column schema.
const INFER_SCHEMA_ROWS: usize = 10_000;

/// Read a comma-separated file with a header row into a DataFrame.
pub fn read_data(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(FxError::FileNotFound(path.to_path_buf()));
    }

    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_separator(b',')
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .finish()?
        .collect()?;
    let df = cast_empty_columns(df)?;

    log::info!(
        "Loaded {} ({} rows, {} columns)",
        path.display(),
        df.height(),
        df.width()
    );
    Ok(df)
}

/// Columns without a single value are inferred as text; read them as
/// missing rates instead.
fn cast_empty_columns(mut df: DataFrame) -> Result<DataFrame> {
    let height = df.height();
    let empty: Vec<PlSmallStr> = df
        .get_columns()
        .iter()
        .filter(|col| col.null_count() == height && !is_numeric_dtype(col.dtype()))
        .map(|col| col.name().clone())
        .collect();

    for name in empty {
        log::debug!("Column '{}' has no values, reading it as Float64", name);
        let cast = df.column(name.as_str())?.cast(&DataType::Float64)?;
        df.with_column(cast)?;
    }
    Ok(df)
}

/// Whether a dtype holds numbers the gap-filler and comparator can work on.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Keeps the most recently loaded table for the viewer.
pub struct DataLoader {
    df: Option<DataFrame>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            file_path: None,
        }
    }

    /// Load a CSV file, replacing whatever was loaded before.
    pub fn load_csv(&mut self, file_path: impl AsRef<Path>) -> Result<&DataFrame> {
        let file_path = file_path.as_ref();
        let df = read_data(file_path)?;
        self.file_path = Some(file_path.to_path_buf());
        Ok(&*self.df.insert(df))
    }

    /// Get list of column names from loaded DataFrame.
    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get list of numeric column names.
    pub fn get_numeric_columns(&self) -> Vec<String> {
        let Some(df) = &self.df else {
            return Vec::new();
        };

        df.get_columns()
            .iter()
            .filter(|col| is_numeric_dtype(col.dtype()))
            .map(|col| col.name().to_string())
            .collect()
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Get a reference to the loaded DataFrame.
    pub fn get_dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    /// Get file path.
    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    /// Set DataFrame directly (used for background loading)
    pub fn set_dataframe(&mut self, df: DataFrame, file_path: PathBuf) {
        self.df = Some(df);
        self.file_path = Some(file_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loader_tracks_columns_and_numeric_columns() {
        let file = write_csv("Date,USD,Note\n2020-01-01,1.5,a\n2020-01-02,1.6,b\n");
        let mut loader = DataLoader::new();
        loader.load_csv(file.path()).unwrap();

        assert_eq!(loader.get_columns(), vec!["Date", "USD", "Note"]);
        assert_eq!(loader.get_numeric_columns(), vec!["USD"]);
        assert_eq!(loader.get_row_count(), 2);
        assert_eq!(loader.get_file_path().unwrap(), file.path());
    }

    #[test]
    fn column_without_values_loads_as_float() {
        let file = write_csv("Date,EUR,GBP\n2020-01-01,,0.8\n2020-01-02,,0.9\n");
        let mut loader = DataLoader::new();
        let df = loader.load_csv(file.path()).unwrap();

        assert_eq!(df.column("EUR").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("EUR").unwrap().null_count(), 2);
        assert_eq!(df.column("Date").unwrap().dtype(), &DataType::String);
        assert_eq!(loader.get_numeric_columns(), vec!["EUR", "GBP"]);
    }

    #[test]
    fn empty_loader_reports_nothing() {
        let loader = DataLoader::default();
        assert!(loader.get_columns().is_empty());
        assert!(loader.get_numeric_columns().is_empty());
        assert_eq!(loader.get_row_count(), 0);
        assert!(loader.get_dataframe().is_none());
    }

    #[test]
    fn failed_load_keeps_previous_table() {
        let file = write_csv("A\n1\n");
        let mut loader = DataLoader::new();
        loader.load_csv(file.path()).unwrap();

        let err = loader.load_csv("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, FxError::FileNotFound(_)));
        assert_eq!(loader.get_row_count(), 1);
    }
}
