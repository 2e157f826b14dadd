//! File-backed response cache with get-or-fetch gating.
//!
//! The cache is a single JSON object on disk mapping canonical request keys
//! (see [`crate::key`]) to raw upstream JSON documents. Every access loads the
//! whole file and every write rewrites it; that caps practical size but matches
//! the expected volume of tens to low hundreds of entries. Entries are never
//! evicted, expired, or invalidated.
//!
//! Single-writer, single-process: load/save carry no locking, so concurrent
//! processes can lose writes. Accepted for a single-user local tool.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::Error;

/// Outcome of resolving a key through the request gate.
///
/// `Hit` and `Fetched` carry the same payload shape; the distinction exists so
/// callers and tests can observe whether the network was touched.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// Served from the cache file; no fetch occurred.
    Hit(Value),
    /// Fetched live from upstream and written back to the cache.
    Fetched(Value),
    /// Upstream had no valid data; nothing was cached.
    NoData,
}

impl Lookup {
    /// The payload, if any, regardless of where it came from.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Lookup::Hit(v) | Lookup::Fetched(v) => Some(v),
            Lookup::NoData => None,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, Lookup::Hit(_))
    }
}

/// Handle to the on-disk cache file.
#[derive(Debug, Clone)]
pub struct FileCache {
    path: PathBuf,
}

impl FileCache {
    /// Create a handle for the cache file at `path`. The file is not touched
    /// until the first load or save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full cache mapping from disk.
    ///
    /// Self-healing: a missing or malformed file yields an empty mapping,
    /// never an error.
    pub fn load(&self) -> BTreeMap<String, Value> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(path = %self.path.display(), error = %e, "cache file malformed, starting empty");
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        }
    }

    /// Serialize the full mapping and rewrite the cache file.
    pub fn save(&self, map: &BTreeMap<String, Value>) -> Result<(), Error> {
        let contents = serde_json::to_string(map).map_err(|e| Error::CacheWrite(e.to_string()))?;
        fs::write(&self.path, contents).map_err(|e| Error::CacheWrite(e.to_string()))
    }

    /// Resolve `key` against the cache, calling `fetch` only on a miss.
    ///
    /// On a miss, a `Some` payload from `fetch` is stored under `key` and
    /// persisted before returning, so the second and all subsequent calls for
    /// the same key are served without any network access. A `None` from
    /// `fetch` (transport failure, or an upstream error payload already
    /// collapsed to absence by the client) is returned as [`Lookup::NoData`]
    /// and is never written to the cache.
    pub fn get_or_fetch(&self, key: &str, fetch: impl FnOnce() -> Option<Value>) -> Result<Lookup, Error> {
        let mut map = self.load();

        if let Some(value) = map.get(key) {
            tracing::debug!(key, "fetching cached data");
            return Ok(Lookup::Hit(value.clone()));
        }

        tracing::debug!(key, "making new request");
        match fetch() {
            Some(value) => {
                map.insert(key.to_string(), value.clone());
                self.save(&map)?;
                Ok(Lookup::Fetched(value))
            }
            None => Ok(Lookup::NoData),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;

    fn temp_cache() -> (tempfile::TempDir, FileCache) {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("cache.json"));
        (dir, cache)
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let (_dir, cache) = temp_cache();
        assert!(cache.load().is_empty());
    }

    #[test]
    fn test_load_corrupt_file_is_empty() {
        let (_dir, cache) = temp_cache();
        fs::write(cache.path(), "{not json").unwrap();
        assert!(cache.load().is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (_dir, cache) = temp_cache();
        let mut map = BTreeMap::new();
        map.insert("k".to_string(), json!({"a": 1}));
        cache.save(&map).unwrap();
        assert_eq!(cache.load(), map);
    }

    #[test]
    fn test_gate_fetches_once_then_hits() {
        let (_dir, cache) = temp_cache();
        let calls = Cell::new(0);
        let fetch = || {
            calls.set(calls.get() + 1);
            Some(json!({"city": "Ann Arbor"}))
        };

        let first = cache.get_or_fetch("info/48109", fetch).unwrap();
        assert!(matches!(first, Lookup::Fetched(_)));
        assert_eq!(calls.get(), 1);

        let second = cache
            .get_or_fetch("info/48109", || {
                calls.set(calls.get() + 1);
                Some(json!({"never": "called"}))
            })
            .unwrap();
        assert!(second.is_hit());
        assert_eq!(calls.get(), 1);
        assert_eq!(second.into_value().unwrap(), json!({"city": "Ann Arbor"}));
    }

    #[test]
    fn test_gate_does_not_cache_no_data() {
        let (_dir, cache) = temp_cache();

        let outcome = cache.get_or_fetch("info/00000", || None).unwrap();
        assert_eq!(outcome, Lookup::NoData);
        assert!(cache.load().is_empty());

        // A later successful fetch for the same key still goes out.
        let calls = Cell::new(0);
        let outcome = cache
            .get_or_fetch("info/00000", || {
                calls.set(calls.get() + 1);
                Some(json!({"ok": true}))
            })
            .unwrap();
        assert!(matches!(outcome, Lookup::Fetched(_)));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_gate_persists_across_handles() {
        let (_dir, cache) = temp_cache();
        cache.get_or_fetch("k", || Some(json!(42))).unwrap();

        let reopened = FileCache::new(cache.path());
        let outcome = reopened.get_or_fetch("k", || panic!("must not fetch")).unwrap();
        assert!(outcome.is_hit());
    }
}
