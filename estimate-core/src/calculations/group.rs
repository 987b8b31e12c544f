//! Group and grand totals over an ordered list of estimate rows.
//!
//! A header row opens a group that runs up to, but not including, the next
//! header or the end of the list. Rows before the first header belong to no
//! group; they still count towards the grand totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::row::RowCalculator;
use crate::models::{CoefficientSet, EstimateRow, EstimateTotals, GroupTotals};

/// Totals of one header group, as listed by [`group_totals`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    /// Position of the header row in the row list.
    pub header_index: usize,
    pub name: String,
    /// Number of rows in the group, header excluded.
    pub row_count: usize,
    pub totals: GroupTotals,
}

/// Sums the commercial-proposal columns of the group opened at
/// `header_index`.
///
/// Scanning starts right after `header_index` and stops before the next
/// header. The materials column only takes material rows; the works column
/// takes every row, since each row's works figure already carries all of
/// its markups.
///
/// An index at or past the end of the list, or a header followed directly
/// by another header, yields zero totals.
pub fn calculate_group_totals(
    rows: &[EstimateRow],
    header_index: usize,
    coefficients: &CoefficientSet,
) -> GroupTotals {
    let members = group_members(rows, header_index);
    let totals = sum_group(members, coefficients);

    debug!(
        header_index,
        rows = members.len(),
        materials_in_kp = %totals.materials_in_kp,
        works_in_kp = %totals.works_in_kp,
        "group totals calculated"
    );

    totals
}

/// Sums the commercial-proposal columns over every row, ignoring group
/// boundaries.
pub fn calculate_totals(
    rows: &[EstimateRow],
    coefficients: &CoefficientSet,
) -> EstimateTotals {
    let calculator = RowCalculator::new(coefficients);
    let (materials, works) = rows.iter().map(|row| calculator.calculate(row)).fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(materials, works), result| {
            (
                materials.saturating_add(result.materials_in_kp),
                works.saturating_add(result.works_in_kp),
            )
        },
    );

    EstimateTotals::new(materials, works)
}

/// Lists every header group in order with its totals.
pub fn group_totals(
    rows: &[EstimateRow],
    coefficients: &CoefficientSet,
) -> Vec<GroupSummary> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row.row_kind.is_header())
        .map(|(header_index, header)| {
            let members = group_members(rows, header_index);
            let totals = sum_group(members, coefficients);

            debug!(
                header_index,
                name = %header.name,
                rows = members.len(),
                total = %totals.total(),
                "group boundary"
            );

            GroupSummary {
                header_index,
                name: header.name.clone(),
                row_count: members.len(),
                totals,
            }
        })
        .collect()
}

/// Rows belonging to the group opened at `header_index`.
fn group_members(
    rows: &[EstimateRow],
    header_index: usize,
) -> &[EstimateRow] {
    let start = header_index.saturating_add(1).min(rows.len());
    let tail = &rows[start..];
    let end = tail
        .iter()
        .position(|row| row.row_kind.is_header())
        .unwrap_or(tail.len());
    &tail[..end]
}

fn sum_group(
    members: &[EstimateRow],
    coefficients: &CoefficientSet,
) -> GroupTotals {
    let calculator = RowCalculator::new(coefficients);
    members
        .iter()
        .map(|row| {
            let result = calculator.calculate(row);
            GroupTotals {
                materials_in_kp: if row.row_kind.is_material_like() {
                    result.materials_in_kp
                } else {
                    Decimal::ZERO
                },
                works_in_kp: result.works_in_kp,
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::row::calculate_row;
    use crate::models::{MaterialKind, RowKind};

    fn labor(price: Decimal) -> EstimateRow {
        EstimateRow::priced(RowKind::Labor, MaterialKind::Unspecified, dec!(1), price)
    }

    fn primary_material(price: Decimal) -> EstimateRow {
        EstimateRow::priced(RowKind::Material, MaterialKind::Primary, dec!(10), price)
    }

    fn sub_labor(price: Decimal) -> EstimateRow {
        EstimateRow::priced(RowKind::SubcontractLabor, MaterialKind::Unspecified, dec!(2), price)
    }

    fn sample_estimate() -> Vec<EstimateRow> {
        vec![
            EstimateRow::header("Заказчик: Корпус 1"),
            labor(dec!(1000)),
            primary_material(dec!(100)),
            EstimateRow::default(),
            EstimateRow::header("Заказчик: Корпус 2"),
            sub_labor(dec!(500)),
            EstimateRow::priced(
                RowKind::SubcontractMaterial,
                MaterialKind::Primary,
                dec!(1),
                dec!(1000),
            ),
            EstimateRow::header("Заказчик: пусто"),
        ]
    }

    #[test]
    fn group_totals_sum_rows_until_next_header() {
        let coefficients = CoefficientSet::default();
        let rows = sample_estimate();

        let totals = calculate_group_totals(&rows, 0, &coefficients);

        assert_eq!(totals.materials_in_kp, dec!(1000));
        // labor 2963.98976 + primary material 640.76
        assert_eq!(totals.works_in_kp, dec!(3604.74976));
    }

    #[test]
    fn group_totals_include_subcontract_materials() {
        let coefficients = CoefficientSet::default();
        let rows = sample_estimate();

        let totals = calculate_group_totals(&rows, 4, &coefficients);

        assert_eq!(totals.materials_in_kp, dec!(1000));
        assert_eq!(totals.works_in_kp, dec!(1552));
    }

    #[test]
    fn header_at_end_of_list_yields_zero() {
        let coefficients = CoefficientSet::default();
        let rows = sample_estimate();

        let totals = calculate_group_totals(&rows, 7, &coefficients);

        assert_eq!(totals, GroupTotals::default());
    }

    #[test]
    fn header_followed_by_header_yields_zero() {
        let coefficients = CoefficientSet::default();
        let rows = vec![
            EstimateRow::header("A"),
            EstimateRow::header("B"),
            labor(dec!(1000)),
        ];

        let totals = calculate_group_totals(&rows, 0, &coefficients);

        assert_eq!(totals, GroupTotals::default());
    }

    #[test]
    fn index_past_end_yields_zero() {
        let coefficients = CoefficientSet::default();
        let rows = sample_estimate();

        let totals = calculate_group_totals(&rows, 100, &coefficients);

        assert_eq!(totals, GroupTotals::default());
    }

    #[test]
    fn grand_totals_cover_every_row() {
        let coefficients = CoefficientSet::default();
        let rows = sample_estimate();

        let totals = calculate_totals(&rows, &coefficients);

        assert_eq!(totals.total_materials, dec!(2000));
        assert_eq!(totals.total_works, dec!(5156.74976));
        assert_eq!(totals.grand_total, dec!(7156.74976));
    }

    #[test]
    fn grand_totals_include_rows_before_first_header() {
        let coefficients = CoefficientSet::default();
        let rows = vec![labor(dec!(1000)), EstimateRow::header("A")];

        let totals = calculate_totals(&rows, &coefficients);

        assert_eq!(totals.total_works, dec!(2963.98976));
        assert_eq!(group_totals(&rows, &coefficients)[0].totals, GroupTotals::default());
    }

    #[test]
    fn grand_totals_are_additive_over_concatenation() {
        let coefficients = CoefficientSet::default();
        let rows = sample_estimate();
        let (left, right) = rows.split_at(3);

        let whole = calculate_totals(&rows, &coefficients);
        let parts = calculate_totals(left, &coefficients) + calculate_totals(right, &coefficients);

        assert_eq!(whole, parts);
    }

    #[test]
    fn group_totals_conserve_grand_totals() {
        let coefficients = CoefficientSet::default();
        let rows = sample_estimate();

        let summed: GroupTotals = group_totals(&rows, &coefficients)
            .into_iter()
            .map(|group| group.totals)
            .sum();

        assert_eq!(
            EstimateTotals::from(summed),
            calculate_totals(&rows, &coefficients)
        );
    }

    #[test]
    fn group_totals_list_every_header() {
        let coefficients = CoefficientSet::default();
        let rows = sample_estimate();

        let groups = group_totals(&rows, &coefficients);

        let shape: Vec<_> = groups
            .iter()
            .map(|g| (g.header_index, g.name.as_str(), g.row_count))
            .collect();
        assert_eq!(
            shape,
            vec![
                (0, "Заказчик: Корпус 1", 3),
                (4, "Заказчик: Корпус 2", 2),
                (7, "Заказчик: пусто", 0),
            ]
        );
    }

    #[test]
    fn group_works_match_sum_of_row_works() {
        let coefficients = CoefficientSet::default();
        let rows = sample_estimate();

        let expected: Decimal = rows[1..4]
            .iter()
            .map(|row| calculate_row(row, &coefficients).works_in_kp)
            .sum();

        assert_eq!(
            calculate_group_totals(&rows, 0, &coefficients).works_in_kp,
            expected
        );
    }

    #[test]
    fn totals_saturate_for_near_max_prices() {
        let coefficients = CoefficientSet::default();
        let price: Decimal = "70000000000000000000000000000".parse().unwrap();
        let huge = EstimateRow::priced(RowKind::Material, MaterialKind::Primary, dec!(1), price);
        let rows = vec![EstimateRow::header("Заказчик: Склад"), huge.clone(), huge];

        let totals = calculate_totals(&rows, &coefficients);
        let group = calculate_group_totals(&rows, 0, &coefficients);
        let listed = group_totals(&rows, &coefficients);

        assert_eq!(totals.total_materials, Decimal::MAX);
        // primary material works are the marked-up price less its cost
        assert!(totals.total_works.is_sign_negative());
        assert_eq!(
            totals.grand_total,
            totals.total_materials.saturating_add(totals.total_works)
        );
        assert_eq!(group.materials_in_kp, Decimal::MAX);
        assert_eq!(group.works_in_kp, totals.total_works);
        assert_eq!(listed[0].totals, group);
    }

    #[test]
    fn empty_row_list_has_zero_totals() {
        let coefficients = CoefficientSet::default();

        assert_eq!(calculate_totals(&[], &coefficients), EstimateTotals::default());
        assert!(group_totals(&[], &coefficients).is_empty());
    }
}
