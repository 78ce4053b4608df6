//! Data module - CSV loading and gap filling

mod loader;
mod processor;

pub use loader::{is_numeric_dtype, read_data, DataLoader};
pub use processor::{column_to_f64, fill_na, fill_neighbors, get_column, numeric_values};
