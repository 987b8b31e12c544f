//! Command handlers behind the `estimate` binary.
//!
//! Handlers return their output as text so they can be driven from tests
//! without a terminal.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use estimate_core::format::{format_currency_in, format_ratio_percent};
use estimate_core::store::StoreRegistry;
use estimate_core::{
    CoefficientKey, CoefficientRepository, CoefficientSet, EstimateRow, KeyValueStore,
    MaterialKind, NumberLocale, RowCalculationResult, RowKind, calculate_row,
};
use estimate_store_sqlite::SqliteStoreFactory;
use tracing::debug;

use crate::config::AppConfig;
use crate::input::{parse_decimal, parse_ratio};

/// Registry with every backend this binary ships.
pub fn build_registry() -> StoreRegistry {
    let mut registry = StoreRegistry::with_memory();
    registry.register(Box::new(SqliteStoreFactory));
    registry
}

pub async fn open_store(config: &AppConfig) -> Result<Box<dyn KeyValueStore>> {
    let store_config = config.store_config();
    debug!(backend = %store_config.backend, "opening store");
    build_registry()
        .create(&store_config)
        .await
        .with_context(|| format!("Failed to open '{}' store", store_config.backend))
}

// ─── coefficients ────────────────────────────────────────────────────────────

/// Table of every coefficient: short key, label, value as a percentage.
pub fn render_coefficients(set: &CoefficientSet) -> String {
    let mut out = String::new();
    for (key, value) in set.iter() {
        let _ = writeln!(
            out,
            "{:<14} {:<28} {:>8}",
            key.as_str(),
            key.label(),
            format_ratio_percent(value)
        );
    }
    out
}

pub async fn show_coefficients(
    store: &dyn KeyValueStore,
    scope: Option<&str>,
) -> String {
    let set = CoefficientRepository::new(store, scope).load().await;
    render_coefficients(&set)
}

/// Changes one coefficient of the stored profile and returns the result.
pub async fn set_coefficient(
    store: &dyn KeyValueStore,
    scope: Option<&str>,
    key: &str,
    value: &str,
) -> Result<CoefficientSet> {
    let key = CoefficientKey::parse(key)?;
    let value = parse_ratio(value)?;

    let repo = CoefficientRepository::new(store, scope);
    let updated = repo.load().await.with(key, value);
    repo.try_save(&updated)
        .await
        .with_context(|| format!("Failed to save coefficient '{key}'"))?;
    Ok(updated)
}

pub async fn reset_coefficients(
    store: &dyn KeyValueStore,
    scope: Option<&str>,
) -> Result<CoefficientSet> {
    let defaults = CoefficientSet::default();
    CoefficientRepository::new(store, scope)
        .try_save(&defaults)
        .await
        .context("Failed to reset coefficients")?;
    Ok(defaults)
}

// ─── calc ────────────────────────────────────────────────────────────────────

/// One row as typed on the command line.
#[derive(Debug, Clone, Default)]
pub struct RowInput {
    pub kind: String,
    pub material_kind: Option<String>,
    pub work_volume: String,
    /// Billed quantity; defaults to `work_volume`.
    pub volume: Option<String>,
    pub labor_price: Option<String>,
    pub material_price: Option<String>,
}

impl RowInput {
    pub fn to_row(&self) -> Result<EstimateRow> {
        let row_kind = RowKind::parse(&self.kind)
            .with_context(|| format!("unknown row kind '{}'", self.kind))?;
        let work_volume = parse_decimal(&self.work_volume)?;
        let volume = match &self.volume {
            Some(v) => parse_decimal(v)?,
            None => work_volume,
        };

        Ok(EstimateRow {
            row_kind,
            material_kind: self
                .material_kind
                .as_deref()
                .map(MaterialKind::parse)
                .unwrap_or_default(),
            volume,
            work_volume,
            unit_labor_price: parse_optional(self.labor_price.as_deref())?,
            unit_material_price_with_delivery: parse_optional(self.material_price.as_deref())?,
            ..Default::default()
        })
    }
}

fn parse_optional(value: Option<&str>) -> Result<rust_decimal::Decimal> {
    Ok(value.map(parse_decimal).transpose()?.unwrap_or_default())
}

/// Prices one row with the stored profile.
pub async fn calculate(
    store: &dyn KeyValueStore,
    scope: Option<&str>,
    input: &RowInput,
) -> Result<RowCalculationResult> {
    let row = input.to_row()?;
    let coefficients = CoefficientRepository::new(store, scope).load().await;
    Ok(calculate_row(&row, &coefficients))
}

/// Every pipeline figure, one per line, formatted for `locale`.
pub fn render_calculation(
    result: &RowCalculationResult,
    locale: &NumberLocale,
) -> String {
    let lines = [
        ("total", result.total),
        ("work PZ", result.work_pz),
        ("work SM", result.work_sm),
        ("mat MBP", result.mat_mbp),
        ("mat PZ", result.mat_pz),
        ("sub PZ", result.sub_pz),
        ("warranty", result.warranty),
        ("work 1.6", result.work16),
        ("work growth", result.work_growth),
        ("mat growth", result.mat_growth),
        ("unforeseen", result.unforeseen),
        ("sub OOZ", result.sub_ooz),
        ("work/mat OOZ", result.work_mat_ooz),
        ("work/mat OFZ", result.work_mat_ofz),
        ("work/mat profit", result.work_mat_profit),
        ("sub profit", result.sub_profit),
        ("materials in KP", result.materials_in_kp),
        ("works in KP", result.works_in_kp),
    ];

    let mut out = String::new();
    for (label, value) in lines {
        let _ = writeln!(out, "{:<16} {:>16}", label, format_currency_in(value, locale));
    }
    let _ = writeln!(
        out,
        "{:<16} {:>16}",
        "commercial total",
        format_currency_in(result.commercial_total(), locale)
    );
    out
}
