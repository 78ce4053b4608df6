//! Stats module - yearly averages and currency comparison

mod compare;
mod yearly;

pub use compare::{comparison_label, compare_currency, ComparisonSummary, SAME_LABEL};
pub use yearly::{calculate_yearly_average, parse_date, YEAR_COL};
