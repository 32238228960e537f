//! Aggregation stage: pure query functions over cleaned orders.
//!
//! Each query takes a slice of orders (usually the output of the filter
//! stage) and returns a freshly computed result table. Grouping is by exact
//! categorical value and results are ordered by grouping key, so repeated
//! calls over the same input are byte-for-byte identical.

pub mod company;
pub mod couriers;
mod geo;
pub mod restaurants;
mod stats;

pub use couriers::SortDirection;
pub use geo::haversine_km;
pub use stats::{median, round2, RunningStats};

use chrono::{Datelike, NaiveDate};

/// Week of the year with Sunday-start, zero-based numbering (00-53).
///
/// Days before the year's first Sunday land in week 0, matching strftime's
/// `%U`: `week = (day_of_year + 7 - weekday_from_sunday) / 7` with a
/// zero-based day of year.
pub fn week_of_year(date: NaiveDate) -> u32 {
    (date.ordinal0() + 7 - date.weekday().num_days_from_sunday()) / 7
}
