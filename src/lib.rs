//! fx_insight - exchange-rate table utilities
//!
//! Load a CSV of exchange rates, fill gaps by neighbor averaging, compute
//! yearly averages and compare two currencies. Analysis functions return
//! chart descriptions; rendering lives in [`charts`] and the [`gui`] viewer.

pub mod charts;
pub mod config;
pub mod data;
pub mod error;
pub mod gui;
pub mod stats;

pub use charts::{Chart, ChartKind, ChartSeries, SeriesColor};
pub use data::{fill_na, read_data};
pub use error::{FxError, Result};
pub use stats::{calculate_yearly_average, compare_currency};
