//! Per-row pricing pipeline.
//!
//! Turns one [`EstimateRow`] into the full breakdown of direct costs,
//! markups and the two commercial-proposal columns.
//!
//! # Pipeline
//!
//! | Step | Figure          | Formula |
//! |------|-----------------|---------|
//! | 1    | `total`         | `work_volume × unit price` for priced rows |
//! | 2    | `work_pz`       | `total` for own labor |
//! | 3    | `work_sm`       | `work_pz × site_overhead` |
//! | 4    | `mat_mbp`       | `work_pz × consumables` |
//! | 5    | `mat_pz`        | `total` for own material |
//! | 6    | `sub_pz`        | `total` for subcontract rows |
//! | 7    | `warranty`      | `work_pz × warranty_reserve` |
//! | 8    | `work16`        | `(work_pz + work_sm) × (1 + labor_uplift)` if `work_pz ≠ 0` |
//! | 9    | `work_growth`   | `(work16 + mat_mbp) × (1 + labor_growth)` if `work16 ≠ 0` |
//! | 10   | `mat_growth`    | `mat_pz × (1 + material_growth)` if `mat_pz ≠ 0` |
//! | 11   | `unforeseen`    | `(work16 + mat_mbp + mat_pz) × (1 + contingency)` if the sum `≠ 0` |
//! | 12   | `sub_ooz`       | `sub_pz × (1 + subcontract_overhead)` if `sub_pz ≠ 0` |
//! | 13   | `work_mat_ooz`  | markups accrued so far `× (1 + combined_overhead)` if non-zero |
//! | 14   | `work_mat_ofz`  | `work_mat_ooz × (1 + combined_business_expense)` if non-zero |
//! | 15   | `work_mat_profit` | `work_mat_ofz × (1 + combined_profit)` if non-zero |
//! | 16   | `sub_profit`    | `sub_ooz × (1 + subcontract_profit)` if non-zero |
//! | 17   | `materials_in_kp` | direct cost of primary material rows |
//! | 18   | `works_in_kp`   | everything else, per row kind |
//!
//! The zero guards make a row that contributes nothing to a cost category
//! produce exactly zero in it. Step 9 guards on `work16` alone even though
//! its base also includes `mat_mbp`.
//!
//! Every step saturates at [`Decimal::MAX`] or [`Decimal::MIN`] instead of
//! overflowing, so any row prices without panicking.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use estimate_core::{CoefficientSet, EstimateRow, MaterialKind, RowKind, RowCalculator};
//!
//! let coefficients = CoefficientSet::default();
//! let row = EstimateRow::priced(RowKind::Labor, MaterialKind::Unspecified, dec!(1), dec!(1000));
//!
//! let result = RowCalculator::new(&coefficients).calculate(&row);
//!
//! assert_eq!(result.work16, dec!(1696));
//! assert_eq!(result.work_growth, dec!(1953.6));
//! assert_eq!(result.warranty, dec!(50));
//! ```

use rust_decimal::Decimal;

use crate::calculations::common::markup_if;
use crate::models::{CoefficientSet, EstimateRow, MaterialKind, RowCalculationResult, RowKind};

/// Prices rows against a fixed coefficient profile.
///
/// Holds only a shared reference, so one calculator can serve any number
/// of rows and threads.
#[derive(Debug, Clone, Copy)]
pub struct RowCalculator<'a> {
    coefficients: &'a CoefficientSet,
}

impl<'a> RowCalculator<'a> {
    pub fn new(coefficients: &'a CoefficientSet) -> Self {
        Self { coefficients }
    }

    /// Runs the whole pipeline for one row.
    ///
    /// Total: header and separator rows yield an all-zero result.
    pub fn calculate(
        &self,
        row: &EstimateRow,
    ) -> RowCalculationResult {
        let c = self.coefficients;
        let kind = row.row_kind;

        // Step 1
        let total = self.base_total(row);

        // Steps 2-7: direct costs and labor-derived uplifts
        let work_pz = if kind == RowKind::Labor { total } else { Decimal::ZERO };
        let work_sm = work_pz.saturating_mul(c.site_overhead);
        let mat_mbp = work_pz.saturating_mul(c.consumables);
        let mat_pz = if kind == RowKind::Material { total } else { Decimal::ZERO };
        let sub_pz = if kind.is_subcontract() { total } else { Decimal::ZERO };
        let warranty = work_pz.saturating_mul(c.warranty_reserve);

        // Steps 8-12: growth indices and reserves
        let work16 = markup_if(work_pz, work_pz.saturating_add(work_sm), c.labor_uplift);
        let work_growth = markup_if(work16, work16.saturating_add(mat_mbp), c.labor_growth);
        let mat_growth = markup_if(mat_pz, mat_pz, c.material_growth);
        let unforeseen_base = work16.saturating_add(mat_mbp).saturating_add(mat_pz);
        let unforeseen = markup_if(unforeseen_base, unforeseen_base, c.contingency);
        let sub_ooz = markup_if(sub_pz, sub_pz, c.subcontract_overhead);

        // Steps 13-16: overhead, business expenses and profit
        let accrued = work_growth
            .saturating_add(mat_growth)
            .saturating_add(unforeseen)
            .saturating_sub(work16)
            .saturating_sub(mat_pz)
            .saturating_sub(mat_mbp);
        let work_mat_ooz = markup_if(accrued, accrued, c.combined_overhead);
        let work_mat_ofz = markup_if(work_mat_ooz, work_mat_ooz, c.combined_business_expense);
        let work_mat_profit = markup_if(work_mat_ofz, work_mat_ofz, c.combined_profit);
        let sub_profit = markup_if(sub_ooz, sub_ooz, c.subcontract_profit);

        // Steps 17-18: split into the commercial-proposal columns
        let materials_in_kp = self.materials_in_kp(row, mat_pz, sub_pz);
        let works_in_kp = self.works_in_kp(
            row,
            materials_in_kp,
            work_mat_profit,
            sub_profit,
            warranty,
        );

        RowCalculationResult {
            total,
            work_pz,
            work_sm,
            mat_mbp,
            mat_pz,
            sub_pz,
            warranty,
            work16,
            work_growth,
            mat_growth,
            unforeseen,
            sub_ooz,
            work_mat_ooz,
            work_mat_ofz,
            work_mat_profit,
            sub_profit,
            materials_in_kp,
            works_in_kp,
        }
    }

    /// Base monetary value of the row, priced at `work_volume`.
    fn base_total(
        &self,
        row: &EstimateRow,
    ) -> Decimal {
        match row.row_kind {
            RowKind::Labor | RowKind::SubcontractLabor => {
                row.work_volume.saturating_mul(row.unit_labor_price)
            }
            RowKind::Material | RowKind::SubcontractMaterial => {
                row.work_volume.saturating_mul(row.unit_material_price_with_delivery)
            }
            RowKind::Header | RowKind::Separator => Decimal::ZERO,
        }
    }

    /// Primary materials are carried into the materials column at cost.
    fn materials_in_kp(
        &self,
        row: &EstimateRow,
        mat_pz: Decimal,
        sub_pz: Decimal,
    ) -> Decimal {
        match (row.row_kind, row.material_kind) {
            (RowKind::Material, MaterialKind::Primary) => mat_pz,
            (RowKind::SubcontractMaterial, MaterialKind::Primary) => sub_pz,
            _ => Decimal::ZERO,
        }
    }

    /// Marked-up price less whatever went into the materials column.
    fn works_in_kp(
        &self,
        row: &EstimateRow,
        materials_in_kp: Decimal,
        work_mat_profit: Decimal,
        sub_profit: Decimal,
        warranty: Decimal,
    ) -> Decimal {
        match (row.row_kind, row.material_kind) {
            (RowKind::SubcontractLabor, _) => sub_profit,
            (RowKind::Labor, _) => work_mat_profit.saturating_add(warranty),
            (RowKind::Material, MaterialKind::Primary) => {
                work_mat_profit.saturating_sub(materials_in_kp)
            }
            (RowKind::Material, MaterialKind::Auxiliary | MaterialKind::Unspecified) => {
                work_mat_profit
            }
            (RowKind::SubcontractMaterial, MaterialKind::Primary) => {
                sub_profit.saturating_sub(materials_in_kp)
            }
            (RowKind::SubcontractMaterial, MaterialKind::Auxiliary | MaterialKind::Unspecified) => {
                sub_profit
            }
            (RowKind::Header | RowKind::Separator, _) => Decimal::ZERO,
        }
    }
}

/// Prices one row. Shorthand for [`RowCalculator::calculate`].
pub fn calculate_row(
    row: &EstimateRow,
    coefficients: &CoefficientSet,
) -> RowCalculationResult {
    RowCalculator::new(coefficients).calculate(row)
}
