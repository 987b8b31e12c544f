use std::iter::Sum;
use std::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Every figure the pricing pipeline derives for one row.
///
/// Fields appear in computation order; each depends only on the row, the
/// coefficients, and fields above it. Figures that do not apply to the row
/// kind are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RowCalculationResult {
    /// Base total: `work_volume` times the unit price of the row kind.
    pub total: Decimal,
    /// Direct labor cost (own labor rows only).
    #[serde(rename = "workPZ")]
    pub work_pz: Decimal,
    /// Site overhead on direct labor.
    #[serde(rename = "workSM")]
    pub work_sm: Decimal,
    /// Consumables on direct labor.
    #[serde(rename = "matMBP")]
    pub mat_mbp: Decimal,
    /// Direct material cost (own material rows only).
    #[serde(rename = "matPZ")]
    pub mat_pz: Decimal,
    /// Direct subcontract cost.
    #[serde(rename = "subPZ")]
    pub sub_pz: Decimal,
    pub warranty: Decimal,
    #[serde(rename = "work16")]
    pub work16: Decimal,
    #[serde(rename = "workGrowth")]
    pub work_growth: Decimal,
    #[serde(rename = "matGrowth")]
    pub mat_growth: Decimal,
    pub unforeseen: Decimal,
    #[serde(rename = "subOOZ")]
    pub sub_ooz: Decimal,
    #[serde(rename = "workMatOOZ")]
    pub work_mat_ooz: Decimal,
    #[serde(rename = "workMatOFZ")]
    pub work_mat_ofz: Decimal,
    #[serde(rename = "workMatProfit")]
    pub work_mat_profit: Decimal,
    #[serde(rename = "subProfit")]
    pub sub_profit: Decimal,
    /// Materials column of the commercial proposal.
    #[serde(rename = "materialsInKP")]
    pub materials_in_kp: Decimal,
    /// Works column of the commercial proposal.
    #[serde(rename = "worksInKP")]
    pub works_in_kp: Decimal,
}

impl RowCalculationResult {
    /// Client-facing price of the row: materials plus works.
    pub fn commercial_total(&self) -> Decimal {
        self.materials_in_kp.saturating_add(self.works_in_kp)
    }
}

/// Commercial-proposal totals of one header group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GroupTotals {
    #[serde(rename = "materialsInKP")]
    pub materials_in_kp: Decimal,
    #[serde(rename = "worksInKP")]
    pub works_in_kp: Decimal,
}

impl GroupTotals {
    pub fn total(&self) -> Decimal {
        self.materials_in_kp.saturating_add(self.works_in_kp)
    }
}

impl Add for GroupTotals {
    type Output = Self;

    fn add(
        self,
        rhs: Self,
    ) -> Self {
        Self {
            materials_in_kp: self.materials_in_kp.saturating_add(rhs.materials_in_kp),
            works_in_kp: self.works_in_kp.saturating_add(rhs.works_in_kp),
        }
    }
}

impl Sum for GroupTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Commercial-proposal totals of a whole estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateTotals {
    pub total_materials: Decimal,
    pub total_works: Decimal,
    pub grand_total: Decimal,
}

impl EstimateTotals {
    pub fn new(
        total_materials: Decimal,
        total_works: Decimal,
    ) -> Self {
        Self {
            total_materials,
            total_works,
            grand_total: total_materials.saturating_add(total_works),
        }
    }
}

impl Add for EstimateTotals {
    type Output = Self;

    fn add(
        self,
        rhs: Self,
    ) -> Self {
        Self::new(
            self.total_materials.saturating_add(rhs.total_materials),
            self.total_works.saturating_add(rhs.total_works),
        )
    }
}

impl Sum for EstimateTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl From<GroupTotals> for EstimateTotals {
    fn from(group: GroupTotals) -> Self {
        Self::new(group.materials_in_kp, group.works_in_kp)
    }
}
