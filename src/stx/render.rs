//! Fixed-width line rendering for the STX record.

use chrono::NaiveDate;
use indexmap::IndexMap;
use tracing::warn;

use super::totals::TaxTotals;
use crate::core::{AMOUNT_BYTES, DESC_BYTES, ExtractError, filler, pad_descriptor, signed_amount};

use super::RECORD_TYPE;

/// Render one store's tax totals into record lines, one per tax id, in the
/// map's iteration order.
///
/// Layout: 2-digit tax plan, three signed 11-byte amounts (sum, collected,
/// discounted), space filler, 18-byte descriptor, as-of date `YYYYMMDD`,
/// store id, record tag. Every line is exactly 128 bytes.
///
/// Tax ids whose plan segment is not a number renderable in two digits have
/// no place in the layout and are skipped with a warning.
pub fn render_store(
    store_id: &str,
    totals: &IndexMap<String, TaxTotals>,
    as_of: NaiveDate,
) -> Result<Vec<String>, ExtractError> {
    let date = as_of.format("%Y%m%d").to_string();
    let mut lines = Vec::with_capacity(totals.len());

    for (tax_id, tax) in totals {
        let Some(plan) = tax_plan(tax_id) else {
            warn!(store = store_id, tax = %tax_id, "tax id without a 2-digit plan, skipping line");
            continue;
        };

        let left = format!(
            "{:02}{}{}{}",
            plan,
            signed_amount(tax.sum_of_tax, AMOUNT_BYTES)?,
            signed_amount(tax.tax_collected, AMOUNT_BYTES)?,
            signed_amount(tax.tax_discounted, AMOUNT_BYTES)?,
        );
        let right = format!(
            "{}{}{}{}",
            pad_descriptor(&tax.name, DESC_BYTES),
            date,
            store_id,
            RECORD_TYPE
        );
        let fill = filler(&left, &right)?;
        lines.push(format!("{left}{fill}{right}"));
    }

    Ok(lines)
}

/// Tax plan number: leading numeric segment of the tax id, if it fits the
/// 2-digit field.
fn tax_plan(tax_id: &str) -> Option<u32> {
    let plan: u32 = tax_id.split('-').next()?.parse().ok()?;
    (plan <= 99).then_some(plan)
}
