//! Normalization of raw upstream JSON into core record types.
//!
//! Both upstream services return partially-populated documents: no field is
//! guaranteed to exist for every record. Every extraction here is therefore
//! guarded independently, and a missing or empty value degrades to a fixed
//! human-readable placeholder instead of failing the record. The functions are
//! pure transforms; they own no state and never error.

use serde_json::Value;
use zipscout_core::{BusinessRecord, LocationRecord};

/// Location fields as (JSON path, placeholder) pairs, applied uniformly.
///
/// Order matches the [`LocationRecord`] field order. The timezone path
/// traverses one extra nesting level into the `timezone` sub-object.
const LOCATION_FIELDS: &[(&[&str], &str)] = &[
    (&["zip_code"], "No Zipcode"),
    (&["lat"], "No Latitude"),
    (&["lng"], "No Longitude"),
    (&["city"], "No City"),
    (&["state"], "No State"),
    (&["timezone", "timezone_abbr"], "No Timezone"),
];

/// Walk `path` into `value` and render the leaf as a non-empty string.
fn extract(value: &Value, path: &[&str]) -> Option<String> {
    let mut current = value;
    for segment in path {
        current = current.get(segment)?;
    }
    match current {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Apply the placeholder policy: missing-or-empty becomes the placeholder.
fn extract_or(value: &Value, path: &[&str], placeholder: &str) -> String {
    extract(value, path).unwrap_or_else(|| placeholder.to_string())
}

/// Normalize a raw location payload into a [`LocationRecord`].
///
/// `None` in (a propagated "no data" outcome from the request gate) yields
/// `None` out. Otherwise every field in [`LOCATION_FIELDS`] is extracted with
/// placeholder substitution, so even an empty document produces a complete
/// record.
pub fn location(raw: Option<&Value>) -> Option<LocationRecord> {
    let raw = raw?;
    let field = |idx: usize| {
        let (path, placeholder) = LOCATION_FIELDS[idx];
        extract_or(raw, path, placeholder)
    };
    Some(LocationRecord {
        zipcode: field(0),
        latitude: field(1),
        longitude: field(2),
        city: field(3),
        state: field(4),
        timezone: field(5),
    })
}

/// Normalize a raw search payload into a batch of [`BusinessRecord`]s.
///
/// The payload is expected to carry its entries under a `businesses` key; if
/// that key is absent the result is an empty batch ("no valid results"), not
/// an error. Every entry yields a complete, insertable record no matter which
/// of its fields are populated.
pub fn businesses(raw: &Value) -> Vec<BusinessRecord> {
    let Some(entries) = raw.get("businesses").and_then(Value::as_array) else {
        tracing::debug!("payload has no businesses key, no valid results");
        return Vec::new();
    };

    entries.iter().map(business_entry).collect()
}

fn business_entry(entry: &Value) -> BusinessRecord {
    // First category's title, guarding against an absent or empty list.
    let category = entry
        .get("categories")
        .and_then(Value::as_array)
        .and_then(|cats| cats.first())
        .and_then(|cat| extract(cat, &["title"]))
        .unwrap_or_else(|| "No Type".to_string());

    // Prefer the display form of the phone number when it is populated.
    let phone = extract(entry, &["display_phone"])
        .unwrap_or_else(|| extract_or(entry, &["phone"], "No Phone"));

    BusinessRecord {
        name: extract_or(entry, &["name"], "No Name"),
        zipcode: extract_or(entry, &["location", "zip_code"], "No Zipcode"),
        category,
        phone,
        address: extract_or(entry, &["location", "address1"], "No Address"),
        review_count: entry.get("review_count").and_then(Value::as_i64).unwrap_or(0),
        rating: entry.get("rating").and_then(Value::as_f64).unwrap_or(0.0),
        price: extract_or(entry, &["price"], "No Price"),
        link: extract_or(entry, &["url"], "No Link"),
    }
}
