use thiserror::Error;

/// Errors raised while appending or querying activity records.
///
/// Append failures are non-fatal by policy: the recorder logs them and the
/// business mutation proceeds. Query failures propagate normally.
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Failed to write activity record: {0}")]
    LogWriteFailed(String),

    #[error("Invalid activity filter: {0}")]
    InvalidFilter(String),
}
