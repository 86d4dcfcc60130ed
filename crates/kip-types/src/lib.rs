//! KIP Types - Pure type definitions
//!
//! Records, request bodies and response envelopes shared by the store layer
//! and the HTTP surface. No runtime dependencies beyond serde and chrono.

pub mod discussion;
pub mod response;
pub mod student;

pub use discussion::*;
pub use response::*;
pub use student::*;

/// Display name used when a record has no name
pub const UNNAMED: &str = "N/A";

/// Author name used when a question is posted without one
pub const ANONYMOUS: &str = "Anonymous";
