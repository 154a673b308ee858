//! Fixed-width line rendering for the SSB record.
//!
//! Rendering is two-phase, matching the record's production pipeline: the
//! per-store pass emits an unpadded line with a `|` between the halves, and
//! a final padding pass replaces each delimiter with the space filler that
//! brings the line to exactly 128 bytes.

use chrono::NaiveDate;

use super::totals::{SsbTotals, TAX_PLANS};
use crate::core::{AMOUNT_BYTES, ExtractError, filler, signed_cents};

use super::RECORD_TYPE;

/// Render one store's totals as an unpadded `left|right` line.
///
/// The left half is the 8 tax-plan amounts, wholesale, then non-taxable,
/// each a signed 11-byte cents field. The right half is the as-of date,
/// store id and record tag. A store whose left half is entirely zero is
/// exempt and renders to `None`.
pub fn render_store(
    store_id: &str,
    totals: &SsbTotals,
    as_of: NaiveDate,
) -> Result<Option<String>, ExtractError> {
    let mut left = String::with_capacity(AMOUNT_BYTES * (TAX_PLANS + 2));
    for cents in totals.tax_plans {
        left.push_str(&signed_cents(cents, AMOUNT_BYTES)?);
    }
    left.push_str(&signed_cents(totals.wholesale, AMOUNT_BYTES)?);
    left.push_str(&signed_cents(totals.non_taxable, AMOUNT_BYTES)?);

    if left == exempt_line() {
        return Ok(None);
    }

    let right = format!("{}{}{}", as_of.format("%Y%m%d"), store_id, RECORD_TYPE);
    Ok(Some(format!("{left}|{right}")))
}

/// The all-zero left half an exempt store would render: ten positive zero
/// fields, derived from the field widths rather than written out literally.
pub fn exempt_line() -> String {
    let zero_field = format!("+{}", "0".repeat(AMOUNT_BYTES - 1));
    zero_field.repeat(TAX_PLANS + 2)
}

/// Pad every `left|right` line to exactly 128 bytes, dropping the
/// delimiter. Lines are rejoined with `\n` and no trailing newline.
pub fn pad_lines(unpadded: &str) -> Result<String, ExtractError> {
    let mut out = String::new();
    for line in unpadded.lines() {
        if line.is_empty() {
            continue;
        }
        let (left, right) = line.split_once('|').unwrap_or((line, ""));
        let fill = filler(left, right)?;
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(left);
        out.push_str(&fill);
        out.push_str(right);
    }
    Ok(out)
}
