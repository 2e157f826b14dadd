//! Client code for zipscout.
//!
//! This crate provides the two upstream API clients (zipcode lookup and
//! business search) and the normalization of their raw JSON responses into
//! core record types.

pub mod business;
pub mod normalize;
pub mod zip;

pub use business::{BusinessClient, BusinessConfig, BusinessSearch};
pub use zip::{ZipClient, ZipConfig};
