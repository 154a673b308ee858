//! SDC — store net-sales summary, one NET TOTALS line per store.
//!
//! Unlike STX and SSB, SDC consumes pre-grouped totals: the group-by runs
//! inside the data store's aggregation stage and rows come back already
//! summed and sorted by store. [`SalesTotalsSource`] is that seam;
//! [`store_sales`] defines what the stage must compute.

mod render;
mod totals;

pub use render::render_store;
pub use totals::{StoreSales, store_sales};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tracing::{debug, error};

use crate::core::{DailyMode, DateFilter, ExtractError, RunRequest, resolve_period};
use crate::sink::{ExtractSink, file_name};
use crate::source::{CategoryFilter, DateField, TlogQuery};

/// Record tag stamped at the end of every line and into file names.
pub const RECORD_TYPE: &str = "SDC";

/// A source of pre-grouped per-store sales rows — the aggregation-stage
/// route of the totals contract.
#[async_trait]
pub trait SalesTotalsSource: Send + Sync {
    /// Rows for all logs matching `query`, grouped per store and sorted by
    /// store id ascending.
    async fn store_sales(&self, query: &TlogQuery) -> Result<Vec<StoreSales>, ExtractError>;
}

#[async_trait]
impl<'a, T: SalesTotalsSource + ?Sized> SalesTotalsSource for &'a T {
    async fn store_sales(&self, query: &TlogQuery) -> Result<Vec<StoreSales>, ExtractError> {
        (**self).store_sales(query).await
    }
}

#[async_trait]
impl<T: SalesTotalsSource + ?Sized> SalesTotalsSource for std::sync::Arc<T> {
    async fn store_sales(&self, query: &TlogQuery) -> Result<Vec<StoreSales>, ExtractError> {
        (**self).store_sales(query).await
    }
}

/// SDC filter choices. The defaults are the record type's contract: an
/// exact business-day stamp and the `SALE_OR_RETURN` transaction category,
/// training-mode excluded.
#[derive(Debug, Clone)]
pub struct SdcConfig {
    pub date_field: DateField,
    pub daily_mode: DailyMode,
}

impl Default for SdcConfig {
    fn default() -> Self {
        Self {
            date_field: DateField::BusinessDay,
            daily_mode: DailyMode::Stamp,
        }
    }
}

/// The SDC runner: aggregate source-side, render, upload.
#[derive(Debug)]
pub struct SdcExtract<S, K> {
    source: S,
    sink: K,
    config: SdcConfig,
}

impl<S: SalesTotalsSource, K: ExtractSink> SdcExtract<S, K> {
    pub fn new(source: S, sink: K) -> Self {
        Self::with_config(source, sink, SdcConfig::default())
    }

    pub fn with_config(source: S, sink: K, config: SdcConfig) -> Self {
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
        debug!(run = %request.run, "running SDC extract");
        let period = resolve_period(
            request.run,
            self.config.daily_mode,
            today,
            request.start_date,
            request.end_date,
        )?;

        let rows = self.source.store_sales(&self.query(period.filter)).await?;
        debug!(stores = rows.len(), "aggregated SDC rows");

        let mut lines = Vec::with_capacity(rows.len());
        for row in &rows {
            lines.push(render_store(row, period.as_of)?);
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
            category: CategoryFilter::Category("SALE_OR_RETURN".into()),
            exclude_recalled: false,
            exclude_training: true,
            date_field: self.config.date_field,
            filter,
        }
    }
}
