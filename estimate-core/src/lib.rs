pub mod calculations;
pub mod format;
pub mod models;
pub mod store;

pub use calculations::{
    DirectCostSummary, GroupSummary, RowCalculator, calculate_group_totals, calculate_row,
    calculate_totals, group_totals,
};
pub use format::{NumberLocale, format_currency, format_currency_with_symbol};
pub use models::*;
pub use store::{
    CoefficientRepository, InMemoryStore, KeyValueStore, StoreError, load_coefficients,
    reset_coefficients, save_coefficients,
};
