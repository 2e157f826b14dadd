//! Row types for the relational mirror.

use serde::{Deserialize, Serialize};

/// A normalized location, uniquely identified by zipcode.
///
/// Rows are never mutated after creation; re-inserting the same zipcode is a
/// no-op (first write wins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub zipcode: String,
    pub latitude: String,
    pub longitude: String,
    pub city: String,
    pub state: String,
    /// Timezone abbreviation, e.g. "EST".
    pub timezone: String,
}

/// A normalized business, uniquely identified by its detail link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
    pub name: String,
    /// Zipcode of the location the business was searched under.
    pub zipcode: String,
    /// First category title from the upstream entry.
    pub category: String,
    pub phone: String,
    pub address: String,
    pub review_count: i64,
    pub rating: f64,
    pub price: String,
    pub link: String,
}
