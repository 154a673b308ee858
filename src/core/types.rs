use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One point-of-sale transaction as stored in the transaction-log collection.
///
/// This mirrors the canonical document shape, trimmed to the fields the
/// extracts consume. Documents are sparse; every field defaults so that a
/// projection returning a subset still deserializes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionLog {
    pub id: String,
    pub transaction_number: String,
    pub site_info: SiteInfo,
    /// Business-day stamp, midnight UTC (e.g. `2024-03-10T00:00:00Z`).
    pub business_day: Option<TimeStamp>,
    /// Wall-clock open time of the transaction, UTC.
    pub open_date_time_utc: Option<TimeStamp>,
    pub is_training_mode: bool,
    pub transaction_category: String,
    pub tlog: Tlog,
}

/// Store identification. `id` is the grouping key for all aggregation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteInfo {
    pub id: String,
    pub name: String,
}

/// ISO-8601 UTC timestamp wrapper, kept as the raw document string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimeStamp {
    pub date_time: String,
}

/// The transaction body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tlog {
    pub is_voided: bool,
    pub is_suspended: bool,
    pub is_recalled: bool,
    pub is_open: bool,
    /// `SALES`, `RETURN`, ...
    pub transaction_type: String,
    pub totals: Totals,
    pub total_taxes: Vec<TaxEntry>,
    pub items: Vec<LineItem>,
    pub tenders: Vec<Tender>,
}

/// Store-level monetary totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Totals {
    pub net_amount: Money,
    pub tax_exempt_amount: Money,
}

/// A tax-authority entry, either transaction-level (`tlog.totalTaxes`) or
/// item-level (`items[].itemTaxes`); both carry the same shape and are
/// linked by matching `id` (format `"<planDigit>-<suffix>"`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaxEntry {
    pub id: String,
    pub name: String,
    pub amount: Money,
    pub taxable_amount: Money,
    pub is_refund: bool,
    pub is_voided: bool,
    pub tax_exempt: Option<TaxExempt>,
}

impl TaxEntry {
    /// Leading numeric segment of the tax id before the first `-`,
    /// i.e. the tax plan number (1-8 in this layout).
    pub fn plan(&self) -> Option<u32> {
        self.id.split('-').next()?.parse().ok()
    }
}

/// Exemption sub-record on a tax entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaxExempt {
    pub exempt_amount: Money,
    pub exempt_taxable_amount: Money,
}

/// A sold or returned line item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItem {
    /// Dash-delimited; the department code is the third segment.
    pub department_id: String,
    pub item_sell_type: String,
    pub is_return: bool,
    pub is_weighted: bool,
    pub actual_amount: Money,
    pub quantity: Quantity,
    pub item_taxes: Vec<TaxEntry>,
}

impl LineItem {
    /// Department code: third dash-delimited segment of `departmentId`.
    pub fn department_code(&self) -> Option<&str> {
        self.department_id.split('-').nth(2)
    }
}

/// A tender (payment) line. Tender codes are stored as strings in the
/// document but compared numerically (23 = foodstamp, 28/48 = WIC).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tender {
    pub id: String,
    pub usage: String,
    pub tender_amount: Money,
}

impl Tender {
    pub fn code(&self) -> Option<u32> {
        self.id.parse().ok()
    }
}

/// Monetary amount wrapper as nested in the documents.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Money {
    pub amount: Decimal,
}

impl Money {
    pub fn new(amount: Decimal) -> Self {
        Self { amount }
    }
}

/// Quantity wrapper.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Quantity {
    pub quantity: Decimal,
}
