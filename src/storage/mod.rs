//! Storage layer
//!
//! An in-memory store of named record collections and two singleton
//! documents, filled with seed content at startup and never persisted.

pub mod collection;
pub mod record;
pub mod seed;
pub mod store;

// Re-export main storage types
pub use collection::Collection;
pub use record::Record;
pub use seed::{populate, AdminAccount};
pub use store::Store;
