//! Core types and shared functionality for zipscout.
//!
//! This crate provides:
//! - File-backed response cache with get-or-fetch gating
//! - Canonical cache key construction
//! - SQLite relational mirror for normalized records
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod key;
pub mod store;

pub use cache::{FileCache, Lookup};
pub use error::Error;
pub use store::{BusinessRecord, LocationRecord, Store};
