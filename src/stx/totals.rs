//! Tax-totals aggregation for the STX record.

use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::core::TransactionLog;

/// Accumulated totals for one tax authority within one store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxTotals {
    /// Display name from the first tax entry encountered for this id.
    pub name: String,
    /// Sum of the tax amount across the store's logs, refunds negated.
    pub sum_of_tax: Decimal,
    /// Sum of matching item-level tax amounts, item refunds negated.
    /// Only accumulated while the transaction-level entry carries no
    /// exemption sub-record.
    pub tax_collected: Decimal,
    /// Sum of exempt amounts where an exemption sub-record is present.
    pub tax_discounted: Decimal,
}

/// Fold one store's logs into per-tax-id totals.
///
/// Keys appear in first-encounter order while scanning the logs in input
/// order; that order is the output line order. Callers must only pass logs
/// that already satisfy the STX inclusion predicate — filtering is the
/// query's job, not this fold's.
pub fn tax_totals(logs: &[TransactionLog]) -> IndexMap<String, TaxTotals> {
    let mut totals: IndexMap<String, TaxTotals> = IndexMap::new();

    for log in logs {
        for tax in &log.tlog.total_taxes {
            let entry = totals.entry(tax.id.clone()).or_insert_with(|| TaxTotals {
                name: tax.name.clone(),
                sum_of_tax: Decimal::ZERO,
                tax_collected: Decimal::ZERO,
                tax_discounted: Decimal::ZERO,
            });

            let amount = tax.amount.amount;
            entry.sum_of_tax += if tax.is_refund { -amount } else { amount };

            match &tax.tax_exempt {
                None => {
                    // No exemption: collect the matching item-level taxes,
                    // each signed by its own refund flag.
                    for item in &log.tlog.items {
                        for item_tax in &item.item_taxes {
                            if item_tax.id != tax.id {
                                continue;
                            }
                            let amount = item_tax.amount.amount;
                            entry.tax_collected +=
                                if item_tax.is_refund { -amount } else { amount };
                        }
                    }
                }
                Some(exempt) => {
                    entry.tax_discounted += exempt.exempt_amount.amount;
                }
            }
        }
    }

    totals
}
