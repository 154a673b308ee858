//! Fixed-width line rendering for the SDC record.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::totals::StoreSales;
use crate::core::{
    AMOUNT_BYTES, DESC_BYTES, ExtractError, filler, pad_descriptor, signed_amount, signed_count,
};

use super::RECORD_TYPE;

/// The legacy layout carries two fixed percentage fields, always 100.0000%.
const NET_PCTG: &str = "+0001000000";

/// SDC lines always describe the store-level net position.
const DESCRIPTOR: &str = "NET TOTALS";

/// Render one store's sales row as a 128-byte line: item count, net sales,
/// percentage, customer count, percentage, filler, descriptor, as-of date,
/// store id, record tag.
pub fn render_store(row: &StoreSales, as_of: NaiveDate) -> Result<String, ExtractError> {
    let left = format!(
        "{}{}{NET_PCTG}{}{NET_PCTG}",
        signed_count(row.number_items, AMOUNT_BYTES)?,
        signed_amount(row.net_sales, AMOUNT_BYTES)?,
        signed_count(Decimal::from(row.cust_count), AMOUNT_BYTES)?,
    );
    let right = format!(
        "{}{}{}{}",
        pad_descriptor(DESCRIPTOR, DESC_BYTES),
        as_of.format("%Y%m%d"),
        row.store,
        RECORD_TYPE
    );
    let fill = filler(&left, &right)?;
    Ok(format!("{left}{fill}{right}"))
}
