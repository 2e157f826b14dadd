//! Canonical cache key construction.
//!
//! A canonical key is a stable string identity for an (endpoint, parameter-set)
//! pair: each parameter is rendered as `key_value`, the fragments are sorted so
//! the key is independent of parameter insertion order, and the endpoint is
//! prefixed with the same `_` separator. The format is part of the cache-file
//! contract, so it is kept as a readable string rather than hashed.
//!
//! Parameter values containing `_` are not escaped; none of the supported
//! upstream parameters produce ambiguous keys in practice.

/// Build an order-independent cache key for an endpoint and its parameters.
pub fn canonical_key<'a>(endpoint: &str, params: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut fragments: Vec<String> = params.into_iter().map(|(k, v)| format!("{k}_{v}")).collect();
    fragments.sort();
    format!("{endpoint}_{}", fragments.join("_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_order_independence() {
        let key1 = canonical_key("search", [("location", "48109"), ("term", "pizza")]);
        let key2 = canonical_key("search", [("term", "pizza"), ("location", "48109")]);
        assert_eq!(key1, key2);
    }

    #[test]
    fn test_key_format() {
        let key = canonical_key("search", [("term", "pizza"), ("location", "48109")]);
        assert_eq!(key, "search_location_48109_term_pizza");
    }

    #[test]
    fn test_key_different_params() {
        let key1 = canonical_key("search", [("location", "48109")]);
        let key2 = canonical_key("search", [("location", "48104")]);
        assert_ne!(key1, key2);
    }

    #[test]
    fn test_key_fragments_sorted_not_keys() {
        // Fragment ordering is over the rendered `key_value` strings.
        let key = canonical_key("e", [("a2", "b"), ("a", "z")]);
        assert_eq!(key, "e_a2_b_a_z");
    }

    #[test]
    fn test_key_no_params() {
        assert_eq!(canonical_key("info", []), "info_");
    }
}
