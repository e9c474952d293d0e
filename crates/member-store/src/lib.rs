//! Member registration storage.
//!
//! Defines the [`MemberStore`] capability used by the signup flow and the
//! backends that implement it: a process-local store and SQLite (in memory
//! or on disk). Every backend enforces unique student IDs and emails.

mod error;
mod memory;
mod sqlite;
mod store;
mod types;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use sqlite::{SqliteStore, MEMORY_PATH};
pub use store::{DynMemberStore, MemberStore};
pub use types::*;
