use async_trait::async_trait;
use tracing::debug;

use super::{TlogQuery, TransactionSource};
use crate::core::{ExtractError, TransactionLog};

/// A [`TransactionSource`] over an in-memory sequence of logs.
///
/// Applies [`TlogQuery::matches`] record by record, preserving input order.
/// This is the reference implementation of the query contract; it backs the
/// test suites and small single-process deployments where the logs are
/// already loaded.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    logs: Vec<TransactionLog>,
}

impl MemorySource {
    pub fn new(logs: Vec<TransactionLog>) -> Self {
        Self { logs }
    }
}

#[async_trait]
impl TransactionSource for MemorySource {
    async fn find(&self, query: &TlogQuery) -> Result<Vec<TransactionLog>, ExtractError> {
        let matched: Vec<TransactionLog> = self
            .logs
            .iter()
            .filter(|log| query.matches(log))
            .cloned()
            .collect();
        debug!(
            total = self.logs.len(),
            matched = matched.len(),
            "in-memory find"
        );
        Ok(matched)
    }
}

#[cfg(feature = "sdc")]
#[async_trait]
impl crate::sdc::SalesTotalsSource for MemorySource {
    async fn store_sales(
        &self,
        query: &TlogQuery,
    ) -> Result<Vec<crate::sdc::StoreSales>, ExtractError> {
        let matched: Vec<TransactionLog> = self
            .logs
            .iter()
            .filter(|log| query.matches(log))
            .cloned()
            .collect();
        Ok(crate::sdc::store_sales(&matched))
    }
}
