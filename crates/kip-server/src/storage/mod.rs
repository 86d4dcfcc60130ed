//! Storage layer
//!
//! Uses SQLite (embedded) as the persistent store and an in-memory store as
//! the fallback whenever SQLite is unavailable or a query against it fails.

pub mod db;
pub mod fallback;
pub mod memory;

pub use db::Database;
pub use fallback::{FallbackResolver, Store};
pub use memory::MemoryStore;
