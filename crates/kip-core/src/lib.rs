//! KIP Core Library
//!
//! Domain error type, storage ports and seed data for the KIP Kuliah backend.

// Re-export pure types from kip-types
pub use kip_types::*;

pub mod error;
pub mod ports;
pub mod seed;

pub use error::{KipError, Result};
pub use ports::*;
