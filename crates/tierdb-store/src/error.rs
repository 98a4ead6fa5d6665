/// Errors from store lifecycle operations.
///
/// Reads and writes are total: a missing key or an unused value is reported
/// through `None` or a zero count, never through an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// `rollback` was called on a handle with no open transaction.
    #[error("TRANSACTION NOT FOUND")]
    TransactionNotFound,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
