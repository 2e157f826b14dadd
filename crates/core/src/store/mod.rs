//! SQLite relational mirror for normalized lookup records.
//!
//! This module persists normalized location and business records into two
//! related tables with idempotent inserts. It supports:
//!
//! - First-write-wins upserts keyed on zipcode / detail link
//! - Per-row batch idempotence (a duplicate never aborts a batch)
//! - Exact-key lookup queries for the presentation layer
//! - Automatic schema migrations

pub mod businesses;
pub mod connection;
pub mod locations;
pub mod migrations;
pub mod records;

pub use crate::Error;

pub use connection::Store;
pub use records::{BusinessRecord, LocationRecord};
