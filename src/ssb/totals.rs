//! Tender and tax-plan aggregation for the SSB record.
//!
//! All sums are kept in integer cents; amounts convert with
//! half-away-from-zero rounding on the way in.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal::prelude::ToPrimitive;
use tracing::warn;

use crate::core::TransactionLog;

/// Number of fixed tax-plan buckets in the layout.
pub const TAX_PLANS: usize = 8;

/// Tender code for foodstamp payments.
const FOODSTAMP_TENDER: u32 = 23;

/// Tender codes for WIC payments.
const WIC_TENDERS: [u32; 2] = [28, 48];

/// One store's SSB totals, in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SsbTotals {
    /// Taxable amounts by tax plan, bucket index = plan number - 1.
    pub tax_plans: [i64; TAX_PLANS],
    /// Taxable amounts of exempt (wholesale) tax entries.
    pub wholesale: i64,
    /// Net merchandise sales minus taxable, foodstamp, WIC and wholesale.
    pub non_taxable: i64,
}

/// Fold one store's logs into SSB totals.
///
/// Voided, suspended and open transactions contribute nothing. Item-tax
/// entries land in the bucket named by the leading segment of their tax id;
/// ids outside plans 1-8 are skipped. Refunds negate. Tender sums only
/// count `PAYMENT` usage.
pub fn tender_and_tax_totals(logs: &[TransactionLog]) -> SsbTotals {
    let mut tax_plans = [0i64; TAX_PLANS];
    let mut wholesale = 0i64;
    let mut net_mdse_sales = 0i64;
    let mut taxable_sales = 0i64;
    let mut foodstamp_sales = 0i64;
    let mut wic_sales = 0i64;

    for log in logs {
        if log.tlog.is_voided || log.tlog.is_suspended || log.tlog.is_open {
            continue;
        }

        for item in &log.tlog.items {
            for tax in &item.item_taxes {
                let Some(bucket) = tax.plan().and_then(plan_bucket) else {
                    warn!(tax = %tax.id, "item tax outside plans 1-8, skipping");
                    continue;
                };
                let cents = to_cents(tax.taxable_amount.amount);
                let signed = if tax.is_refund { -cents } else { cents };
                tax_plans[bucket] += signed;

                // Exempt taxable amounts are wholesale sales.
                if let Some(exempt) = &tax.tax_exempt {
                    if !tax.is_voided && exempt.exempt_amount.amount > Decimal::ZERO {
                        wholesale += signed;
                    }
                }
            }
        }

        net_mdse_sales += to_cents(log.tlog.totals.net_amount.amount);

        for tax in &log.tlog.total_taxes {
            if tax.amount.amount > Decimal::ZERO {
                taxable_sales += to_cents(tax.taxable_amount.amount);
            }
        }

        for tender in &log.tlog.tenders {
            if tender.usage != "PAYMENT" {
                continue;
            }
            match tender.code() {
                Some(FOODSTAMP_TENDER) => {
                    foodstamp_sales += to_cents(tender.tender_amount.amount);
                }
                Some(code) if WIC_TENDERS.contains(&code) => {
                    wic_sales += to_cents(tender.tender_amount.amount);
                }
                _ => {}
            }
        }
    }

    SsbTotals {
        tax_plans,
        wholesale,
        non_taxable: net_mdse_sales - taxable_sales - foodstamp_sales - wic_sales - wholesale,
    }
}

fn plan_bucket(plan: u32) -> Option<usize> {
    match plan {
        1..=8 => Some(plan as usize - 1),
        _ => None,
    }
}

/// Decimal dollars to integer cents, half away from zero. Sums beyond the
/// `i64` range saturate and are rejected later by the field formatter.
fn to_cents(amount: Decimal) -> i64 {
    let cents = (amount * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    cents.to_i64().unwrap_or(if cents.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}
