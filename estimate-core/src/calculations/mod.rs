//! Estimate pricing calculations.
//!
//! [`row`] prices a single row through the markup pipeline, [`group`]
//! aggregates priced rows under header groups and over the whole estimate,
//! and [`direct_cost`] sums unmarked billed cost.

pub mod common;
pub mod direct_cost;
pub mod group;
pub mod row;

pub use direct_cost::DirectCostSummary;
pub use group::{GroupSummary, calculate_group_totals, calculate_totals, group_totals};
pub use row::{RowCalculator, calculate_row};
