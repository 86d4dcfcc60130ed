//! Error types for the KIP Kuliah backend

use thiserror::Error;

pub type Result<T> = std::result::Result<T, KipError>;

#[derive(Error, Debug)]
pub enum KipError {
    /// Missing or blank required input
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Persistent store unreachable at startup
    #[error("Store connection error: {0}")]
    StoreConnection(String),

    /// A single persistent store call failed
    #[error("Store operation error: {0}")]
    StoreOperation(String),
}
