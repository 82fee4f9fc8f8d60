use thiserror::Error;

pub mod audit;
pub mod crypto;
pub mod database;

pub use audit::AuditError;
pub use crypto::CryptoError;
pub use database::DatabaseError;

/// Internal error type for store and service operations
///
/// Hybrid design separates infrastructure errors (shared) from domain errors
/// (store-specific). Not exposed via API - endpoints must convert to ApiError.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Audit(#[from] AuditError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Conditional write lost its optimistic guard too many times
    #[error("Update conflict on {kind} {id}: retries exhausted")]
    Conflict { kind: &'static str, id: String },

    #[error("Duplicate value for {field}: {value}")]
    Duplicate { field: &'static str, value: String },
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }
}
