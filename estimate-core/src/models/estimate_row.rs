use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::parse_amount;
use crate::models::{MaterialKind, RowKind};

/// One line of a tender estimate.
///
/// `volume` is the billed quantity and `work_volume` the quantity that
/// feeds the markup pipeline. The two are independent inputs and are never
/// reconciled against each other.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EstimateRow {
    pub row_kind: RowKind,
    pub material_kind: MaterialKind,
    pub name: String,
    pub unit: String,
    pub volume: Decimal,
    pub work_volume: Decimal,
    pub unit_labor_price: Decimal,
    pub unit_material_price_with_delivery: Decimal,
    /// Tracked for display; not used by any price formula.
    pub material_consumption_factor: Decimal,
}

impl EstimateRow {
    /// A header row opening a billing group.
    pub fn header(name: impl Into<String>) -> Self {
        Self {
            row_kind: RowKind::Header,
            name: name.into(),
            ..Default::default()
        }
    }

    /// A row of the given kind with `volume` and `work_volume` both set to
    /// `volume` and the price relevant to the kind set to `unit_price`.
    pub fn priced(
        row_kind: RowKind,
        material_kind: MaterialKind,
        volume: Decimal,
        unit_price: Decimal,
    ) -> Self {
        let mut row = Self {
            row_kind,
            material_kind,
            volume,
            work_volume: volume,
            ..Default::default()
        };
        if row_kind.is_labor_like() {
            row.unit_labor_price = unit_price;
        } else if row_kind.is_material_like() {
            row.unit_material_price_with_delivery = unit_price;
        }
        row
    }

    /// The unit price that applies to this row's kind, or zero for rows
    /// that are not priced.
    pub fn unit_price(&self) -> Decimal {
        if self.row_kind.is_labor_like() {
            self.unit_labor_price
        } else if self.row_kind.is_material_like() {
            self.unit_material_price_with_delivery
        } else {
            Decimal::ZERO
        }
    }

    /// Direct cost at the billed volume: `volume * unit price`, saturating
    /// at the `Decimal` range.
    pub fn billed_total(&self) -> Decimal {
        self.volume.saturating_mul(self.unit_price())
    }

    /// Builds a typed row from a loosely-typed record.
    ///
    /// Unknown row kinds become [`RowKind::Separator`], unknown material
    /// kinds [`MaterialKind::Unspecified`], and any missing or unparsable
    /// number is zero.
    pub fn from_raw(raw: &RawEstimateRow) -> Self {
        let text = |field: &Option<String>| field.as_deref().unwrap_or_default().to_string();
        let amount = |field: &Option<String>| parse_amount(field.as_deref().unwrap_or_default());

        Self {
            row_kind: raw
                .row_type
                .as_deref()
                .and_then(RowKind::parse)
                .unwrap_or_default(),
            material_kind: MaterialKind::parse(raw.material_type.as_deref().unwrap_or_default()),
            name: text(&raw.name),
            unit: text(&raw.unit),
            volume: amount(&raw.volume),
            work_volume: amount(&raw.work_volume),
            unit_labor_price: amount(&raw.work_price),
            unit_material_price_with_delivery: amount(&raw.mat_price_with_delivery),
            material_consumption_factor: amount(&raw.mat_consumption_ratio),
        }
    }
}

impl From<&RawEstimateRow> for EstimateRow {
    fn from(raw: &RawEstimateRow) -> Self {
        Self::from_raw(raw)
    }
}

/// Row as held by editing surfaces: every field is optional text.
///
/// Field names follow the camelCase names used by stored estimate rows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEstimateRow {
    pub row_type: Option<String>,
    pub material_type: Option<String>,
    pub name: Option<String>,
    pub unit: Option<String>,
    pub volume: Option<String>,
    pub work_volume: Option<String>,
    pub work_price: Option<String>,
    pub mat_price_with_delivery: Option<String>,
    pub mat_consumption_ratio: Option<String>,
}
