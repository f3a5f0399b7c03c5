//! Error handling utilities for stores

use sqlx::Error as SqlxError;
use typesense_core::DomainError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::StorageError(e.to_string())
}
