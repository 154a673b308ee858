use thiserror::Error;

/// Errors that can occur while resolving, aggregating or rendering an extract.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractError {
    /// Run type outside the accepted set (daily, weekly, adhoc).
    #[error("invalid run type: {0}")]
    InvalidRunType(String),

    /// Ad-hoc start/end date missing, malformed, or end precedes start.
    #[error("invalid date range: {0}")]
    InvalidDateRange(String),

    /// The transaction source failed; propagated unchanged, never retried.
    #[error("data source failure: {0}")]
    DataSource(String),

    /// The extract sink rejected an upload. Non-fatal to the run: the
    /// rendered extract is still returned to the caller.
    #[error("upload failure: {0}")]
    Upload(String),

    /// An amount's digit count exceeds its fixed field width. Oversized
    /// values error out rather than truncate or corrupt adjacent fields.
    #[error("value {value} does not fit a {width}-byte signed field")]
    FieldOverflow { value: String, width: usize },

    /// A composed line is already longer than the target record length.
    #[error("line is {have} bytes, exceeds the {want}-byte record length")]
    LineOverflow { have: usize, want: usize },
}
