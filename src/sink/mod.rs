//! The extract upload seam.
//!
//! Rendered extracts are handed to an [`ExtractSink`] under a name built by
//! [`file_name`]. Upload failures are non-fatal by contract: runners log
//! them and still return the rendered extract to the caller.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::core::{ExtractError, RunType};

/// An opaque destination for named extract files.
#[async_trait]
pub trait ExtractSink: Send + Sync {
    async fn upload(&self, name: &str, content: &str) -> Result<(), ExtractError>;
}

#[async_trait]
impl<'a, T: ExtractSink + ?Sized> ExtractSink for &'a T {
    async fn upload(&self, name: &str, content: &str) -> Result<(), ExtractError> {
        (**self).upload(name, content).await
    }
}

#[async_trait]
impl<T: ExtractSink + ?Sized> ExtractSink for std::sync::Arc<T> {
    async fn upload(&self, name: &str, content: &str) -> Result<(), ExtractError> {
        (**self).upload(name, content).await
    }
}

/// Build the extract file name: `{dly|wk|adhoc}_{record}_{YYYYMMDD}.dat`,
/// dated with the run's as-of date.
pub fn file_name(run: RunType, record_type: &str, as_of: NaiveDate) -> String {
    format!(
        "{}_{}_{}.dat",
        run.prefix(),
        record_type,
        as_of.format("%Y%m%d")
    )
}

/// An [`ExtractSink`] that keeps uploads in memory, for tests and local runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    uploads: Mutex<Vec<(String, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All uploads so far as `(name, content)` pairs, oldest first.
    pub fn uploads(&self) -> Vec<(String, String)> {
        self.uploads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ExtractSink for MemorySink {
    async fn upload(&self, name: &str, content: &str) -> Result<(), ExtractError> {
        self.uploads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((name.to_string(), content.to_string()));
        Ok(())
    }
}
