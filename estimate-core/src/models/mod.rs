mod coefficients;
mod estimate_row;
mod row_calculation;
mod row_kind;

pub use coefficients::{CoefficientKey, CoefficientParseError, CoefficientSet};
pub use estimate_row::{EstimateRow, RawEstimateRow};
pub use row_calculation::{EstimateTotals, GroupTotals, RowCalculationResult};
pub use row_kind::{MaterialKind, RowKind};
