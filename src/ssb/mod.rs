//! SSB — store summary by tax-plan bucket, one line per store.
//!
//! Sums taxable amounts into eight fixed tax-plan buckets plus wholesale
//! and non-taxable fields, all in cents, and renders one 128-byte line per
//! store. Stores with nothing but zeroes are exempt and omitted.

mod render;
mod totals;

pub use render::{exempt_line, pad_lines, render_store};
pub use totals::{SsbTotals, TAX_PLANS, tender_and_tax_totals};

use chrono::{NaiveDate, Utc};
use tracing::{debug, error};

use crate::core::{DailyMode, DateFilter, ExtractError, RunRequest, group_by_store, resolve_period};
use crate::sink::{ExtractSink, file_name};
use crate::source::{CategoryFilter, DateField, TlogQuery, TransactionSource};

/// Record tag stamped at the end of every line and into file names.
pub const RECORD_TYPE: &str = "SSB";

/// SSB filter choices. The defaults are the record type's contract: an
/// exact business-day stamp, `SALES` and `RETURN` transactions, recalled
/// and training-mode excluded.
#[derive(Debug, Clone)]
pub struct SsbConfig {
    pub date_field: DateField,
    pub daily_mode: DailyMode,
}

impl Default for SsbConfig {
    fn default() -> Self {
        Self {
            date_field: DateField::BusinessDay,
            daily_mode: DailyMode::Stamp,
        }
    }
}

/// The SSB runner: fetch, group, aggregate, render, pad, upload.
#[derive(Debug)]
pub struct SsbExtract<S, K> {
    source: S,
    sink: K,
    config: SsbConfig,
}

impl<S: TransactionSource, K: ExtractSink> SsbExtract<S, K> {
    pub fn new(source: S, sink: K) -> Self {
        Self::with_config(source, sink, SsbConfig::default())
    }

    pub fn with_config(source: S, sink: K, config: SsbConfig) -> Self {
        Self {
            source,
            sink,
            config,
        }
    }

    /// Run the extract for `request`, upload it, and return the rendered
    /// body. Upload failure is logged and does not fail the run.
    pub async fn run(&self, request: &RunRequest) -> Result<String, ExtractError> {
        self.run_at(request, Utc::now().date_naive()).await
    }

    /// [`run`](Self::run) with an explicit "today", for reproducible runs.
    pub async fn run_at(
        &self,
        request: &RunRequest,
        today: NaiveDate,
    ) -> Result<String, ExtractError> {
        debug!(run = %request.run, "running SSB extract");
        let period = resolve_period(
            request.run,
            self.config.daily_mode,
            today,
            request.start_date,
            request.end_date,
        )?;

        let logs = self.source.find(&self.query(period.filter)).await?;
        let by_store = group_by_store(logs);

        let mut unpadded = String::new();
        for (store_id, store_logs) in &by_store {
            let totals = tender_and_tax_totals(store_logs);
            if let Some(line) = render_store(store_id, &totals, period.as_of)? {
                if !unpadded.is_empty() {
                    unpadded.push('\n');
                }
                unpadded.push_str(&line);
            } else {
                debug!(store = %store_id, "exempt store, omitted");
            }
        }
        let extract = pad_lines(&unpadded)?;

        let name = file_name(request.run, RECORD_TYPE, period.as_of);
        if let Err(err) = self.sink.upload(&name, &extract).await {
            error!(file = %name, %err, "upload failed, returning extract to caller");
        }
        Ok(extract)
    }

    fn query(&self, filter: DateFilter) -> TlogQuery {
        TlogQuery {
            category: CategoryFilter::TransactionType(vec!["SALES".into(), "RETURN".into()]),
            exclude_recalled: true,
            exclude_training: true,
            date_field: self.config.date_field,
            filter,
        }
    }
}
