//! The transaction data source seam.
//!
//! The core never talks to a document database directly. Each record type
//! builds a [`TlogQuery`] describing its inclusion predicate and date
//! window, and a [`TransactionSource`] implementation executes it — against
//! a real store in production, or in memory via [`MemorySource`].

mod memory;

pub use memory::MemorySource;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::warn;

use crate::core::{DateFilter, ExtractError, TransactionLog};

/// Which timestamp field a record type filters on. The choice is owned by
/// each record type and deliberately not unified: STX filters on the
/// wall-clock open time, SSB and SDC on the business-day stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    /// `businessDay.dateTime` — midnight-UTC business-day stamp.
    BusinessDay,
    /// `openDateTimeUtc.dateTime` — wall-clock open time.
    OpenDateTimeUtc,
}

/// Which classification field selects transactions for a record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// `tlog.transactionType` must be one of the listed values.
    TransactionType(Vec<String>),
    /// `transactionCategory` must equal the value.
    Category(String),
}

/// A record type's query: inclusion predicate plus resolved date window.
///
/// Voided and suspended transactions are always excluded; the remaining
/// exclusions vary per record type.
#[derive(Debug, Clone)]
pub struct TlogQuery {
    pub category: CategoryFilter,
    pub exclude_recalled: bool,
    pub exclude_training: bool,
    pub date_field: DateField,
    pub filter: DateFilter,
}

impl TlogQuery {
    /// The instant this query compares against for `log`, taken from the
    /// query's [`DateField`]. Absent or unparsable stamps yield `None` and
    /// the log never matches.
    pub fn timestamp(&self, log: &TransactionLog) -> Option<DateTime<Utc>> {
        let stamp = match self.date_field {
            DateField::BusinessDay => log.business_day.as_ref(),
            DateField::OpenDateTimeUtc => log.open_date_time_utc.as_ref(),
        }?;
        match DateTime::parse_from_rfc3339(&stamp.date_time) {
            Ok(instant) => Some(instant.with_timezone(&Utc)),
            Err(_) => {
                warn!(
                    log = %log.id,
                    stamp = %stamp.date_time,
                    "unparsable timestamp, excluding log"
                );
                None
            }
        }
    }

    /// Whether `log` satisfies the full predicate, date window included.
    ///
    /// This is the executable definition of the filter a backing store is
    /// expected to apply; aggregators treat it as a precondition.
    pub fn matches(&self, log: &TransactionLog) -> bool {
        if log.tlog.is_voided || log.tlog.is_suspended {
            return false;
        }
        if self.exclude_recalled && log.tlog.is_recalled {
            return false;
        }
        if self.exclude_training && log.is_training_mode {
            return false;
        }
        let category_ok = match &self.category {
            CategoryFilter::TransactionType(types) => {
                types.iter().any(|t| *t == log.tlog.transaction_type)
            }
            CategoryFilter::Category(category) => *category == log.transaction_category,
        };
        if !category_ok {
            return false;
        }
        match self.timestamp(log) {
            Some(instant) => self.filter.contains(instant),
            None => false,
        }
    }
}

/// An opaque source of transaction logs already matching a query.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Fetch all logs matching `query`, in the store's natural result
    /// order. That order is load-bearing: it determines first-encounter
    /// ordering of stores and classification keys downstream.
    async fn find(&self, query: &TlogQuery) -> Result<Vec<TransactionLog>, ExtractError>;
}

#[async_trait]
impl<'a, T: TransactionSource + ?Sized> TransactionSource for &'a T {
    async fn find(&self, query: &TlogQuery) -> Result<Vec<TransactionLog>, ExtractError> {
        (**self).find(query).await
    }
}

#[async_trait]
impl<T: TransactionSource + ?Sized> TransactionSource for std::sync::Arc<T> {
    async fn find(&self, query: &TlogQuery) -> Result<Vec<TransactionLog>, ExtractError> {
        (**self).find(query).await
    }
}
