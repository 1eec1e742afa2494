//! User storage for Staffbook.
//!
//! This crate provides the persistence abstraction for user accounts. It
//! ships two implementations: an in-memory store used by tests and
//! development, and a SQLite store backed by sqlx. Username uniqueness is
//! enforced by the store, atomically with respect to concurrent
//! registrations.

mod error;
mod memory;
mod sqlite;
mod traits;

pub use error::*;
pub use memory::*;
pub use sqlite::*;
pub use traits::*;
