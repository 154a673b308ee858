//! STX — tax-summary extract, one line per store per tax plan.
//!
//! Aggregates transaction-level tax entries per tax id (refunds negated),
//! collects matching item-level taxes, and renders 128-byte lines.
//!
//! # Example
//!
//! ```ignore
//! use posfeed::source::MemorySource;
//! use posfeed::sink::MemorySink;
//! use posfeed::stx::StxExtract;
//! use posfeed::core::RunRequest;
//!
//! let extract = StxExtract::new(MemorySource::new(logs), MemorySink::new());
//! let body = extract.run(&RunRequest::daily()).await?;
//! ```

mod render;
mod totals;

pub use render::render_store;
pub use totals::{TaxTotals, tax_totals};

use chrono::{NaiveDate, Utc};
use tracing::{debug, error};

use crate::core::{DailyMode, DateFilter, ExtractError, RunRequest, group_by_store, resolve_period};
use crate::sink::{ExtractSink, file_name};
use crate::source::{CategoryFilter, DateField, TlogQuery, TransactionSource};

/// Record tag stamped at the end of every line and into file names.
pub const RECORD_TYPE: &str = "STX";

/// STX filter choices. The defaults are the record type's contract:
/// a full-day range over the wall-clock open time, `SALES` transactions
/// only, recalled excluded. Training-mode logs are not filtered here.
#[derive(Debug, Clone)]
pub struct StxConfig {
    pub date_field: DateField,
    pub daily_mode: DailyMode,
}

impl Default for StxConfig {
    fn default() -> Self {
        Self {
            date_field: DateField::OpenDateTimeUtc,
            daily_mode: DailyMode::Range,
        }
    }
}

/// The STX runner: fetch, group, aggregate, render, upload.
#[derive(Debug)]
pub struct StxExtract<S, K> {
    source: S,
    sink: K,
    config: StxConfig,
}

impl<S: TransactionSource, K: ExtractSink> StxExtract<S, K> {
    pub fn new(source: S, sink: K) -> Self {
        Self::with_config(source, sink, StxConfig::default())
    }

    pub fn with_config(source: S, sink: K, config: StxConfig) -> Self {
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
        debug!(run = %request.run, "running STX extract");
        let period = resolve_period(
            request.run,
            self.config.daily_mode,
            today,
            request.start_date,
            request.end_date,
        )?;

        let logs = self.source.find(&self.query(period.filter)).await?;
        let by_store = group_by_store(logs);

        let mut lines = Vec::new();
        for (store_id, store_logs) in &by_store {
            let totals = tax_totals(store_logs);
            debug!(store = %store_id, taxes = totals.len(), "aggregated STX store");
            lines.extend(render_store(store_id, &totals, period.as_of)?);
        }
        let extract = lines.join("\n");

        let name = file_name(request.run, RECORD_TYPE, period.as_of);
        if let Err(err) = self.sink.upload(&name, &extract).await {
            error!(file = %name, %err, "upload failed, returning extract to caller");
        }
        Ok(extract)
    }

    fn query(&self, filter: DateFilter) -> TlogQuery {
        TlogQuery {
            category: CategoryFilter::TransactionType(vec!["SALES".into()]),
            exclude_recalled: true,
            exclude_training: false,
            date_field: self.config.date_field,
            filter,
        }
    }
}
