//! Property-based tests for the formatting and grouping contracts.

use chrono::NaiveDate;
use posfeed::core::*;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
}

/// Cents that fit the 10 digit positions of an 11-byte signed field.
fn arb_cents() -> impl Strategy<Value = i64> {
    -9_999_999_999i64..=9_999_999_999i64
}

/// A currency amount whose cents fit an 11-byte signed field.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    arb_cents().prop_map(|cents| Decimal::new(cents, 2))
}

fn log(store: u8, id: usize) -> TransactionLog {
    TransactionLog {
        id: id.to_string(),
        site_info: SiteInfo {
            id: format!("{store:04}"),
            ..Default::default()
        },
        ..Default::default()
    }
}

proptest! {
    #[test]
    fn pad_descriptor_is_idempotent_at_18_bytes(s in ".*") {
        let once = pad_descriptor(&s, DESC_BYTES);
        prop_assert_eq!(once.len(), DESC_BYTES);
        prop_assert_eq!(pad_descriptor(&once, DESC_BYTES), once);
    }

    #[test]
    fn signed_amount_is_always_width_bytes(amount in arb_amount()) {
        let field = signed_amount(amount, AMOUNT_BYTES).unwrap();
        prop_assert_eq!(field.len(), AMOUNT_BYTES);
        let expected_sign = if amount < Decimal::ZERO { '-' } else { '+' };
        prop_assert!(field.starts_with(expected_sign));
        prop_assert!(field[1..].bytes().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn signed_cents_round_trips_its_magnitude(cents in arb_cents()) {
        let field = signed_cents(cents, AMOUNT_BYTES).unwrap();
        prop_assert_eq!(field.len(), AMOUNT_BYTES);
        let digits: i64 = field[1..].parse().unwrap();
        prop_assert_eq!(digits, cents.abs());
    }

    #[test]
    fn grouping_partitions_and_preserves_order(
        stores in proptest::collection::vec(0u8..4, 0..40)
    ) {
        let logs: Vec<TransactionLog> = stores
            .iter()
            .enumerate()
            .map(|(i, &s)| log(s, i))
            .collect();
        let grouped = group_by_store(logs.clone());

        // Every record lands in exactly one group.
        let total: usize = grouped.values().map(Vec::len).sum();
        prop_assert_eq!(total, logs.len());

        // Each store's sub-sequence is the input filtered to that store.
        for (store, group) in &grouped {
            let expected: Vec<String> = logs
                .iter()
                .filter(|l| &l.site_info.id == store)
                .map(|l| l.id.clone())
                .collect();
            let got: Vec<String> = group.iter().map(|l| l.id.clone()).collect();
            prop_assert_eq!(got, expected);
        }

        // Key order is first-encounter order.
        let mut seen = Vec::new();
        for l in &logs {
            if !seen.contains(&l.site_info.id) {
                seen.push(l.site_info.id.clone());
            }
        }
        let keys: Vec<String> = grouped.keys().cloned().collect();
        prop_assert_eq!(keys, seen);
    }
}

#[cfg(feature = "stx")]
proptest! {
    #[test]
    fn stx_lines_are_always_128_bytes(
        plan in 1u32..=99,
        name in ".*",
        sum in arb_amount(),
        collected in arb_amount(),
        discounted in arb_amount(),
    ) {
        let mut totals = indexmap::IndexMap::new();
        totals.insert(
            format!("{plan}-A"),
            posfeed::stx::TaxTotals {
                name,
                sum_of_tax: sum,
                tax_collected: collected,
                tax_discounted: discounted,
            },
        );
        let lines = posfeed::stx::render_store("0042", &totals, as_of()).unwrap();
        prop_assert_eq!(lines.len(), 1);
        prop_assert_eq!(lines[0].len(), LINE_BYTES);
    }
}

#[cfg(feature = "ssb")]
proptest! {
    #[test]
    fn ssb_lines_are_always_128_bytes(
        plans in proptest::array::uniform8(arb_cents()),
        wholesale in arb_cents(),
        non_taxable in arb_cents(),
    ) {
        let totals = posfeed::ssb::SsbTotals {
            tax_plans: plans,
            wholesale,
            non_taxable,
        };
        if let Some(line) = posfeed::ssb::render_store("0042", &totals, as_of()).unwrap() {
            let padded = posfeed::ssb::pad_lines(&line).unwrap();
            prop_assert_eq!(padded.len(), LINE_BYTES);
        }
    }
}
