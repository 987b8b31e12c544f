//! Markup coefficients applied by the pricing pipeline.
//!
//! Every coefficient is a dimensionless ratio. Most steps apply a ratio as
//! `base * (1 + ratio)`; the three labor-derived uplifts (site overhead,
//! consumables and warranty reserve) multiply the direct labor cost
//! straight through.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The twelve markup ratios used to turn direct cost into a commercial price.
///
/// Field names follow the accounting terms; the serialized form keeps the
/// short keys used by stored profiles (`sm`, `mbp`, `work16`, ...). A stored
/// record missing some keys deserializes with those keys taken from the
/// default profile.
///
/// Negative ratios are accepted and act as discounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoefficientSet {
    /// Site overhead on direct labor (`sm`).
    #[serde(rename = "sm")]
    pub site_overhead: Decimal,

    /// Consumables and low-value equipment on direct labor (`mbp`).
    #[serde(rename = "mbp")]
    pub consumables: Decimal,

    /// Warranty reserve on direct labor (`warranty`).
    #[serde(rename = "warranty")]
    pub warranty_reserve: Decimal,

    /// First labor uplift (`work16`).
    #[serde(rename = "work16")]
    pub labor_uplift: Decimal,

    /// Labor cost growth index (`workGrowth`).
    #[serde(rename = "workGrowth")]
    pub labor_growth: Decimal,

    /// Material cost growth index (`matGrowth`).
    #[serde(rename = "matGrowth")]
    pub material_growth: Decimal,

    /// Unforeseen-cost reserve (`unforeseen`).
    #[serde(rename = "unforeseen")]
    pub contingency: Decimal,

    /// Overhead on subcontract cost (`subOOZ`).
    #[serde(rename = "subOOZ")]
    pub subcontract_overhead: Decimal,

    /// Overhead on own labor and materials (`workMatOOZ`).
    #[serde(rename = "workMatOOZ")]
    pub combined_overhead: Decimal,

    /// General business expenses on own labor and materials (`workMatOFZ`).
    #[serde(rename = "workMatOFZ")]
    pub combined_business_expense: Decimal,

    /// Profit margin on own labor and materials (`workMatProfit`).
    #[serde(rename = "workMatProfit")]
    pub combined_profit: Decimal,

    /// Profit margin on subcontract cost (`subProfit`).
    #[serde(rename = "subProfit")]
    pub subcontract_profit: Decimal,
}

impl CoefficientSet {
    /// The reference profile: 6%, 8%, 5%, 60%, 10%, 10%, 3%, 10%, 10%, 20%,
    /// 10%, 16%.
    pub const DEFAULT: Self = Self {
        site_overhead: Decimal::from_parts(6, 0, 0, false, 2),
        consumables: Decimal::from_parts(8, 0, 0, false, 2),
        warranty_reserve: Decimal::from_parts(5, 0, 0, false, 2),
        labor_uplift: Decimal::from_parts(6, 0, 0, false, 1),
        labor_growth: Decimal::from_parts(1, 0, 0, false, 1),
        material_growth: Decimal::from_parts(1, 0, 0, false, 1),
        contingency: Decimal::from_parts(3, 0, 0, false, 2),
        subcontract_overhead: Decimal::from_parts(1, 0, 0, false, 1),
        combined_overhead: Decimal::from_parts(1, 0, 0, false, 1),
        combined_business_expense: Decimal::from_parts(2, 0, 0, false, 1),
        combined_profit: Decimal::from_parts(1, 0, 0, false, 1),
        subcontract_profit: Decimal::from_parts(16, 0, 0, false, 2),
    };

    pub fn get(
        &self,
        key: CoefficientKey,
    ) -> Decimal {
        match key {
            CoefficientKey::SiteOverhead => self.site_overhead,
            CoefficientKey::Consumables => self.consumables,
            CoefficientKey::WarrantyReserve => self.warranty_reserve,
            CoefficientKey::LaborUplift => self.labor_uplift,
            CoefficientKey::LaborGrowth => self.labor_growth,
            CoefficientKey::MaterialGrowth => self.material_growth,
            CoefficientKey::Contingency => self.contingency,
            CoefficientKey::SubcontractOverhead => self.subcontract_overhead,
            CoefficientKey::CombinedOverhead => self.combined_overhead,
            CoefficientKey::CombinedBusinessExpense => self.combined_business_expense,
            CoefficientKey::CombinedProfit => self.combined_profit,
            CoefficientKey::SubcontractProfit => self.subcontract_profit,
        }
    }

    /// Returns a copy with one coefficient replaced.
    pub fn with(
        mut self,
        key: CoefficientKey,
        value: Decimal,
    ) -> Self {
        let slot = match key {
            CoefficientKey::SiteOverhead => &mut self.site_overhead,
            CoefficientKey::Consumables => &mut self.consumables,
            CoefficientKey::WarrantyReserve => &mut self.warranty_reserve,
            CoefficientKey::LaborUplift => &mut self.labor_uplift,
            CoefficientKey::LaborGrowth => &mut self.labor_growth,
            CoefficientKey::MaterialGrowth => &mut self.material_growth,
            CoefficientKey::Contingency => &mut self.contingency,
            CoefficientKey::SubcontractOverhead => &mut self.subcontract_overhead,
            CoefficientKey::CombinedOverhead => &mut self.combined_overhead,
            CoefficientKey::CombinedBusinessExpense => &mut self.combined_business_expense,
            CoefficientKey::CombinedProfit => &mut self.combined_profit,
            CoefficientKey::SubcontractProfit => &mut self.subcontract_profit,
        };
        *slot = value;
        self
    }

    /// Iterates `(key, value)` pairs in pipeline order.
    pub fn iter(&self) -> impl Iterator<Item = (CoefficientKey, Decimal)> + '_ {
        CoefficientKey::ALL.iter().map(|&key| (key, self.get(key)))
    }
}

impl Default for CoefficientSet {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Error returned when a coefficient key is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown coefficient '{0}'")]
pub struct CoefficientParseError(pub String);

/// Names one of the twelve coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoefficientKey {
    SiteOverhead,
    Consumables,
    WarrantyReserve,
    LaborUplift,
    LaborGrowth,
    MaterialGrowth,
    Contingency,
    SubcontractOverhead,
    CombinedOverhead,
    CombinedBusinessExpense,
    CombinedProfit,
    SubcontractProfit,
}

impl CoefficientKey {
    pub const ALL: [Self; 12] = [
        Self::SiteOverhead,
        Self::Consumables,
        Self::WarrantyReserve,
        Self::LaborUplift,
        Self::LaborGrowth,
        Self::MaterialGrowth,
        Self::Contingency,
        Self::SubcontractOverhead,
        Self::CombinedOverhead,
        Self::CombinedBusinessExpense,
        Self::CombinedProfit,
        Self::SubcontractProfit,
    ];

    /// Short key used in stored profiles.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SiteOverhead => "sm",
            Self::Consumables => "mbp",
            Self::WarrantyReserve => "warranty",
            Self::LaborUplift => "work16",
            Self::LaborGrowth => "workGrowth",
            Self::MaterialGrowth => "matGrowth",
            Self::Contingency => "unforeseen",
            Self::SubcontractOverhead => "subOOZ",
            Self::CombinedOverhead => "workMatOOZ",
            Self::CombinedBusinessExpense => "workMatOFZ",
            Self::CombinedProfit => "workMatProfit",
            Self::SubcontractProfit => "subProfit",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SiteOverhead => "Site overhead",
            Self::Consumables => "Consumables (MBP)",
            Self::WarrantyReserve => "Warranty reserve",
            Self::LaborUplift => "Labor uplift",
            Self::LaborGrowth => "Labor growth",
            Self::MaterialGrowth => "Material growth",
            Self::Contingency => "Unforeseen costs",
            Self::SubcontractOverhead => "Subcontract overhead",
            Self::CombinedOverhead => "Labor/material overhead",
            Self::CombinedBusinessExpense => "General business expenses",
            Self::CombinedProfit => "Labor/material profit",
            Self::SubcontractProfit => "Subcontract profit",
        }
    }

    /// Accepts either the stored short key (`workMatOFZ`) or the snake-case
    /// field name (`combined_business_expense`), case-insensitively.
    pub fn parse(s: &str) -> Result<Self, CoefficientParseError> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|key| {
                key.as_str().to_ascii_lowercase() == wanted || key.field_name() == wanted
            })
            .ok_or_else(|| CoefficientParseError(s.to_string()))
    }

    fn field_name(&self) -> &'static str {
        match self {
            Self::SiteOverhead => "site_overhead",
            Self::Consumables => "consumables",
            Self::WarrantyReserve => "warranty_reserve",
            Self::LaborUplift => "labor_uplift",
            Self::LaborGrowth => "labor_growth",
            Self::MaterialGrowth => "material_growth",
            Self::Contingency => "contingency",
            Self::SubcontractOverhead => "subcontract_overhead",
            Self::CombinedOverhead => "combined_overhead",
            Self::CombinedBusinessExpense => "combined_business_expense",
            Self::CombinedProfit => "combined_profit",
            Self::SubcontractProfit => "subcontract_profit",
        }
    }
}

impl fmt::Display for CoefficientKey {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
