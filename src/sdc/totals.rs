//! Per-store net sales totals for the SDC record.
//!
//! SDC takes the pre-grouped route: production deployments push this
//! group-by into the data store's aggregation stage and receive
//! [`StoreSales`] rows back. The fold here is the contract's reference
//! implementation, used by the in-memory source and the tests.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::core::TransactionLog;

/// Line items in this department are register media, not merchandise, and
/// stay out of the totals.
const EXCLUDED_DEPT: &str = "1123";

/// One store's pre-grouped sales totals, sorted by store id ascending when
/// produced by an aggregation stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSales {
    pub store: String,
    /// Net item count; returns subtract, weighted items count as one.
    pub number_items: Decimal,
    /// Net merchandise sales; returns subtract.
    pub net_sales: Decimal,
    /// Transactions containing at least one non-return item.
    pub cust_count: i64,
}

/// Fold logs into per-store sales rows, store id ascending.
///
/// Reproduces the aggregation stage: only `SALES` sell-type items count,
/// weighted items count as quantity one, returns negate both amount and
/// quantity and never count a customer, and the excluded department is
/// dropped. A transaction with no qualifying items contributes nothing.
pub fn store_sales(logs: &[TransactionLog]) -> Vec<StoreSales> {
    let mut by_store: BTreeMap<String, (Decimal, Decimal, i64)> = BTreeMap::new();

    for log in logs {
        let mut txn_amount = Decimal::ZERO;
        let mut txn_quantity = Decimal::ZERO;
        let mut txn_customer = 0i64;
        let mut qualifying = false;

        for item in &log.tlog.items {
            if item.item_sell_type != "SALES" {
                continue;
            }
            if item.department_code() == Some(EXCLUDED_DEPT) {
                continue;
            }
            qualifying = true;

            let quantity = if item.is_weighted {
                Decimal::ONE
            } else {
                item.quantity.quantity
            };
            let amount = item.actual_amount.amount;
            if item.is_return {
                txn_amount -= amount;
                txn_quantity -= quantity;
            } else {
                txn_amount += amount;
                txn_quantity += quantity;
                txn_customer = 1;
            }
        }

        if !qualifying {
            continue;
        }

        let entry = by_store
            .entry(log.site_info.id.clone())
            .or_insert((Decimal::ZERO, Decimal::ZERO, 0));
        entry.0 += txn_amount;
        entry.1 += txn_quantity;
        entry.2 += txn_customer;
    }

    by_store
        .into_iter()
        .map(|(store, (net_sales, number_items, cust_count))| StoreSales {
            store,
            number_items,
            net_sales,
            cust_count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LineItem, Money, Quantity, SiteInfo, Tlog};
    use rust_decimal_macros::dec;

    fn item(dept: &str, amount: Decimal, quantity: Decimal) -> LineItem {
        LineItem {
            department_id: dept.into(),
            item_sell_type: "SALES".into(),
            actual_amount: Money::new(amount),
            quantity: Quantity { quantity },
            ..Default::default()
        }
    }

    fn log(store: &str, items: Vec<LineItem>) -> TransactionLog {
        TransactionLog {
            site_info: SiteInfo {
                id: store.into(),
                ..Default::default()
            },
            tlog: Tlog {
                items,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn returns_negate_and_do_not_count_customers() {
        let mut returned = item("1-200-4511-0", dec!(5.00), dec!(1));
        returned.is_return = true;
        let rows = store_sales(&[log("0042", vec![returned])]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].net_sales, dec!(-5.00));
        assert_eq!(rows[0].number_items, dec!(-1));
        assert_eq!(rows[0].cust_count, 0);
    }

    #[test]
    fn weighted_items_count_as_one() {
        let mut weighed = item("1-200-4511-0", dec!(12.40), dec!(2.48));
        weighed.is_weighted = true;
        let rows = store_sales(&[log("0042", vec![weighed])]);
        assert_eq!(rows[0].number_items, dec!(1));
    }

    #[test]
    fn excluded_department_and_non_sales_items_are_dropped() {
        let mut fee = item("1-200-4511-0", dec!(1.00), dec!(1));
        fee.item_sell_type = "NON_SALES".into();
        let media = item("1-200-1123-0", dec!(50.00), dec!(1));
        let rows = store_sales(&[log("0042", vec![fee, media])]);
        assert!(rows.is_empty());
    }

    #[test]
    fn customers_count_once_per_transaction() {
        let rows = store_sales(&[
            log(
                "0042",
                vec![
                    item("1-200-4511-0", dec!(2.00), dec!(1)),
                    item("1-200-4512-0", dec!(3.00), dec!(2)),
                ],
            ),
            log("0042", vec![item("1-200-4511-0", dec!(4.00), dec!(1))]),
        ]);
        assert_eq!(rows[0].cust_count, 2);
        assert_eq!(rows[0].number_items, dec!(4));
        assert_eq!(rows[0].net_sales, dec!(9.00));
    }

    #[test]
    fn rows_sort_by_store_ascending() {
        let rows = store_sales(&[
            log("0100", vec![item("1-200-4511-0", dec!(1.00), dec!(1))]),
            log("0042", vec![item("1-200-4511-0", dec!(1.00), dec!(1))]),
        ]);
        let stores: Vec<_> = rows.iter().map(|r| r.store.clone()).collect();
        assert_eq!(stores, ["0042", "0100"]);
    }
}
