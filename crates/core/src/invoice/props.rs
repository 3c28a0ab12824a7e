//! Property-based tests for invoice arithmetic.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::calculator::{line_total, subtotal, vat_amount};
use super::types::LineItem;

/// Strategy to generate positive quantities (0.01 to 10,000.00).
fn quantity() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|v| Decimal::new(v, 2))
}

/// Strategy to generate non-negative unit prices (0.00 to 100,000.00).
fn unit_price() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|v| Decimal::new(v, 2))
}

/// Strategy to generate VAT rates (0.00 to 0.50).
fn rate() -> impl Strategy<Value = Decimal> {
    (0i64..=50i64).prop_map(|v| Decimal::new(v, 2))
}

/// Strategy to generate 1-20 line items.
fn items() -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec((quantity(), unit_price()), 1..20).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (quantity, unit_price))| LineItem {
                description: format!("item {i}"),
                quantity,
                unit_price,
                total: line_total(quantity, unit_price).expect("in range"),
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Line totals are the product of quantity and unit price, and
    /// recomputing them is idempotent.
    #[test]
    fn prop_line_total_invariant(quantity in quantity(), unit_price in unit_price()) {
        let total = line_total(quantity, unit_price).expect("in range");
        prop_assert_eq!(total, quantity * unit_price);
        prop_assert_eq!(line_total(quantity, unit_price), Some(total));
        prop_assert!(!total.is_sign_negative());
    }

    /// The subtotal equals the sum of line totals regardless of item count.
    #[test]
    fn prop_subtotal_is_sum_of_line_totals(items in items()) {
        let expected: Decimal = items.iter().map(|i| i.total).sum();
        prop_assert_eq!(subtotal(&items), Some(expected));
    }

    /// Grand total = subtotal x (1 + rate), computed without rounding.
    #[test]
    fn prop_grand_total_invariant(items in items(), rate in rate()) {
        let sub = subtotal(&items).expect("in range");
        let vat = vat_amount(sub, rate).expect("in range");
        prop_assert_eq!(vat, sub * rate);
        prop_assert_eq!(sub + vat, sub * (Decimal::ONE + rate));
    }

    /// Appending an item never decreases the subtotal.
    #[test]
    fn prop_subtotal_monotonic(items in items(), quantity in quantity(), unit_price in unit_price()) {
        let before = subtotal(&items).expect("in range");
        let mut extended = items;
        extended.push(LineItem {
            description: "extra".to_string(),
            quantity,
            unit_price,
            total: line_total(quantity, unit_price).expect("in range"),
        });
        prop_assert!(subtotal(&extended) >= Some(before));
    }
}
