//! Core entity definitions for Staffbook.
//!
//! This crate defines the data types shared across the Staffbook
//! application: the account record itself plus the value types used to
//! create and modify it.

mod user;

pub use user::*;
