//! Ports - interfaces to the persistent store

pub mod query;
pub mod storage;

pub use query::*;
pub use storage::*;
