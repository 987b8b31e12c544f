//! Direct (unmarked) cost at billed volume.
//!
//! Unlike the markup pipeline, which prices by `work_volume`, this summary
//! prices every row by its billed `volume`.

use std::ops::AddAssign;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{EstimateRow, RowKind};

/// Billed direct cost broken down by row kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DirectCostSummary {
    pub labor: Decimal,
    pub material: Decimal,
    pub subcontract_labor: Decimal,
    pub subcontract_material: Decimal,
}

impl DirectCostSummary {
    /// Summarizes any slice of rows; headers and separators contribute nothing.
    pub fn from_rows(rows: &[EstimateRow]) -> Self {
        let mut summary = Self::default();
        for row in rows {
            summary += row;
        }
        summary
    }

    pub fn own(&self) -> Decimal {
        self.labor.saturating_add(self.material)
    }

    pub fn subcontract(&self) -> Decimal {
        self.subcontract_labor.saturating_add(self.subcontract_material)
    }

    pub fn total(&self) -> Decimal {
        self.own().saturating_add(self.subcontract())
    }
}

impl AddAssign<&EstimateRow> for DirectCostSummary {
    fn add_assign(
        &mut self,
        row: &EstimateRow,
    ) {
        let bucket = match row.row_kind {
            RowKind::Labor => &mut self.labor,
            RowKind::Material => &mut self.material,
            RowKind::SubcontractLabor => &mut self.subcontract_labor,
            RowKind::SubcontractMaterial => &mut self.subcontract_material,
            RowKind::Header | RowKind::Separator => return,
        };
        *bucket = bucket.saturating_add(row.billed_total());
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::MaterialKind;

    #[test]
    fn summary_buckets_by_row_kind() {
        let rows = vec![
            EstimateRow::header("Заказчик"),
            EstimateRow::priced(RowKind::Labor, MaterialKind::Unspecified, dec!(2), dec!(150)),
            EstimateRow::priced(RowKind::Labor, MaterialKind::Unspecified, dec!(1), dec!(50)),
            EstimateRow::priced(RowKind::Material, MaterialKind::Primary, dec!(3), dec!(10)),
            EstimateRow::priced(RowKind::SubcontractLabor, MaterialKind::Unspecified, dec!(1), dec!(700)),
            EstimateRow::priced(RowKind::SubcontractMaterial, MaterialKind::Auxiliary, dec!(4), dec!(25)),
        ];

        let summary = DirectCostSummary::from_rows(&rows);

        assert_eq!(summary.labor, dec!(350));
        assert_eq!(summary.material, dec!(30));
        assert_eq!(summary.subcontract_labor, dec!(700));
        assert_eq!(summary.subcontract_material, dec!(100));
        assert_eq!(summary.own(), dec!(380));
        assert_eq!(summary.subcontract(), dec!(800));
        assert_eq!(summary.total(), dec!(1180));
    }

    #[test]
    fn summary_prices_by_billed_volume() {
        let row = EstimateRow {
            row_kind: RowKind::Material,
            volume: dec!(5),
            work_volume: dec!(50),
            unit_material_price_with_delivery: dec!(10),
            ..Default::default()
        };

        let summary = DirectCostSummary::from_rows(&[row]);

        assert_eq!(summary.material, dec!(50));
    }

    #[test]
    fn summary_saturates_for_huge_volumes() {
        let huge = EstimateRow::priced(RowKind::Labor, MaterialKind::Unspecified, Decimal::MAX, dec!(2));

        let summary = DirectCostSummary::from_rows(&[huge.clone(), huge]);

        assert_eq!(summary.labor, Decimal::MAX);
        assert_eq!(summary.total(), Decimal::MAX);
    }

    #[test]
    fn empty_rows_give_zero_summary() {
        assert_eq!(DirectCostSummary::from_rows(&[]), DirectCostSummary::default());
    }
}
