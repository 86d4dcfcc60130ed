//! HTTP handlers

pub mod discussions;
pub mod error;
pub mod health;
pub mod students;

pub use error::ApiError;
pub use health::health;

/// Catch-all for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::not_found("Route not found", None)
}
