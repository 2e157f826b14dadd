//! Orchestration of the lookup pipeline.
//!
//! The free functions here run one full resolve cycle: canonical key, cache
//! gate, normalization, mirror upsert, then answer from the mirror. The
//! transport is passed in as a closure so the pipeline is testable without a
//! network; [`App`] wires in the real clients.
//!
//! Expected call order for a zipcode is location before businesses, so every
//! business row's zipcode has its location row alongside it; [`App::resolve`]
//! does both in that order.

use serde_json::Value;
use zipscout_client::business::{BusinessClient, BusinessConfig, BusinessSearch};
use zipscout_client::normalize;
use zipscout_client::zip::{self, ZipClient, ZipConfig};
use zipscout_core::config::AppConfig;
use zipscout_core::{BusinessRecord, Error, FileCache, LocationRecord, Store};

/// Resolve the location for a zipcode: cache-gated fetch, normalize, mirror,
/// answer from the mirror.
///
/// Returns `Ok(None)` when upstream had no valid data for the zipcode.
pub fn resolve_location(
    cache: &FileCache, store: &Store, zipcode: &str, fetch: impl FnOnce() -> Option<Value>,
) -> Result<Option<LocationRecord>, Error> {
    zip::validate_zipcode(zipcode)?;

    let key = zip::cache_key(zipcode);
    let lookup = cache.get_or_fetch(&key, fetch)?;

    if let Some(record) = normalize::location(lookup.into_value().as_ref()) {
        store.upsert_location(&record)?;
    }

    store.query_location(zipcode)
}

/// Resolve businesses for a search: cache-gated fetch, normalize, mirror,
/// answer from the mirror by the search's zipcode.
pub fn resolve_businesses(
    cache: &FileCache, store: &Store, req: &BusinessSearch, endpoint: &str, fetch: impl FnOnce() -> Option<Value>,
) -> Result<Vec<BusinessRecord>, Error> {
    req.validate()?;

    let key = req.cache_key(endpoint);
    let lookup = cache.get_or_fetch(&key, fetch)?;

    if let Some(raw) = lookup.into_value() {
        let records = normalize::businesses(&raw);
        store.upsert_businesses(&records)?;
    }

    store.query_businesses(&req.location)
}

/// The assembled application: config, cache, mirror, and real clients.
pub struct App {
    config: AppConfig,
    cache: FileCache,
    store: Store,
}

impl App {
    /// Open the cache file handle and the mirror database from config.
    pub fn new(config: AppConfig) -> Result<Self, Error> {
        let cache = FileCache::new(&config.cache_path);
        let store = Store::open(&config.db_path)?;
        Ok(Self { config, cache, store })
    }

    /// Resolve both the location and the businesses for a zipcode, in that
    /// order, and return whatever rows the mirror holds afterwards.
    pub fn resolve(
        &self, zipcode: &str, term: Option<&str>,
    ) -> Result<(Option<LocationRecord>, Vec<BusinessRecord>), Error> {
        let location = resolve_location(&self.cache, &self.store, zipcode, || match self.zip_client() {
            Ok(client) => client.lookup(zipcode),
            Err(e) => {
                tracing::warn!(error = %e, "zipcode lookup unavailable");
                None
            }
        })?;

        let mut req = BusinessSearch::new(zipcode);
        req.term = term.map(str::to_string);

        let endpoint = format!("{}/businesses/search", self.config.business_base_url);
        let businesses =
            resolve_businesses(&self.cache, &self.store, &req, &endpoint, || match self.business_client() {
                Ok(client) => client.search(&req),
                Err(e) => {
                    tracing::warn!(error = %e, "business search unavailable");
                    None
                }
            })?;

        Ok((location, businesses))
    }

    fn zip_client(&self) -> Result<ZipClient, Error> {
        let api_key = self
            .config
            .require_zip_api_key()
            .map_err(|_| Error::MissingApiKey("ZIPSCOUT_ZIP_API_KEY"))?
            .to_string();
        ZipClient::new(ZipConfig {
            api_key,
            base_url: self.config.zip_base_url.clone(),
            timeout: self.config.timeout(),
            user_agent: self.config.user_agent.clone(),
        })
    }

    fn business_client(&self) -> Result<BusinessClient, Error> {
        let api_key = self
            .config
            .require_business_api_key()
            .map_err(|_| Error::MissingApiKey("ZIPSCOUT_BUSINESS_API_KEY"))?
            .to_string();
        BusinessClient::new(BusinessConfig {
            api_key,
            base_url: self.config.business_base_url.clone(),
            timeout: self.config.timeout(),
            user_agent: self.config.user_agent.clone(),
        })
    }
}
