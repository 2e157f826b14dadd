//! Business search API client.
//!
//! Consumes a query-parameter style service with bearer-token auth
//! (`GET {base}/businesses/search?...` plus an `Authorization: Bearer` header).
//! Cache keys reuse [`zipscout_core::key::canonical_key`] over the request's
//! logical parameters, so identical searches hit the same cache entry no
//! matter how the parameters were assembled.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use zipscout_core::{Error, key::canonical_key};

use crate::zip::validate_zipcode;

/// Default base URL for the business search service.
const DEFAULT_BASE_URL: &str = "https://api.yelp.com/v3";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "zipscout/0.1";

/// Business client configuration.
#[derive(Debug, Clone)]
pub struct BusinessConfig {
    /// Bearer token for the Authorization header.
    pub api_key: String,
    /// Base URL (default: https://api.yelp.com/v3).
    pub base_url: String,
    /// Request timeout (default: 20s).
    pub timeout: Duration,
    /// User-agent string.
    pub user_agent: String,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Search parameters for the business search endpoint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BusinessSearch {
    /// Zipcode to search around (required, 5 ASCII digits).
    pub location: String,
    /// Optional search term, e.g. "pizza".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    /// Result count limit (1-50).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u8>,
}

impl BusinessSearch {
    pub fn new(location: impl Into<String>) -> Self {
        Self { location: location.into(), ..Default::default() }
    }

    /// Validate the search parameters.
    pub fn validate(&self) -> Result<(), Error> {
        validate_zipcode(&self.location)?;

        if let Some(limit) = self.limit
            && !(1..=50).contains(&limit)
        {
            return Err(Error::InvalidRequest("limit must be 1-50".to_string()));
        }

        if let Some(term) = &self.term
            && term.is_empty()
        {
            return Err(Error::InvalidRequest("term must not be empty".to_string()));
        }

        Ok(())
    }

    /// Logical query parameters, as sent upstream and as keyed in the cache.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![("location".to_string(), self.location.clone())];
        if let Some(term) = &self.term {
            params.push(("term".to_string(), term.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }

    /// Canonical cache key for this search against `endpoint`.
    pub fn cache_key(&self, endpoint: &str) -> String {
        let params = self.params();
        canonical_key(endpoint, params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

/// Business search API client.
#[derive(Debug, Clone)]
pub struct BusinessClient {
    http: reqwest::blocking::Client,
    config: BusinessConfig,
}

impl BusinessClient {
    /// Create a new business client with the given configuration.
    pub fn new(config: BusinessConfig) -> Result<Self, Error> {
        if config.api_key.is_empty() {
            return Err(Error::MissingApiKey("business_api_key"));
        }

        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// The search endpoint URL, which doubles as the cache-key prefix.
    pub fn endpoint(&self) -> String {
        format!("{}/businesses/search", self.config.base_url)
    }

    /// Canonical cache key for a search against this client's endpoint.
    pub fn cache_key(&self, req: &BusinessSearch) -> String {
        req.cache_key(&self.endpoint())
    }

    /// Run a business search, collapsing every failure mode to absence.
    ///
    /// Transport errors, non-success statuses, unparseable bodies and payloads
    /// carrying an upstream `error` object are logged and returned as `None`,
    /// so the request gate never caches an error response.
    pub fn search(&self, req: &BusinessSearch) -> Option<Value> {
        match self.request(req) {
            Ok(payload) => {
                if payload.get("error").is_some() {
                    tracing::warn!(location = %req.location, "upstream returned an error payload, treating as no data");
                    return None;
                }
                Some(payload)
            }
            Err(e) => {
                tracing::warn!(location = %req.location, error = %e, "business search failed, treating as no data");
                None
            }
        }
    }

    fn request(&self, req: &BusinessSearch) -> Result<Value, Error> {
        req.validate()?;

        tracing::debug!(location = %req.location, term = ?req.term, "requesting business search");

        let response = self
            .http
            .get(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .header("Accept", "application/json")
            .query(req)
            .send()
            .map_err(|e| {
                if e.is_timeout() { Error::Timeout } else { Error::Network(e.to_string()) }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpError { status: status.as_u16() });
        }

        response.json().map_err(|e| Error::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_order_independent_params() {
        // Same logical search always yields the same key; the canonical key
        // sorts fragments, so parameter assembly order cannot matter.
        let mut req1 = BusinessSearch::new("48109");
        req1.term = Some("pizza".to_string());
        req1.limit = Some(10);

        let req2 = BusinessSearch { limit: Some(10), term: Some("pizza".to_string()), location: "48109".to_string() };

        let endpoint = "https://api.yelp.com/v3/businesses/search";
        assert_eq!(req1.cache_key(endpoint), req2.cache_key(endpoint));
    }

    #[test]
    fn test_cache_key_format() {
        let mut req = BusinessSearch::new("48109");
        req.term = Some("pizza".to_string());
        assert_eq!(req.cache_key("search"), "search_location_48109_term_pizza");
    }

    #[test]
    fn test_cache_key_differs_by_params() {
        let req1 = BusinessSearch::new("48109");
        let req2 = BusinessSearch::new("48104");
        assert_ne!(req1.cache_key("search"), req2.cache_key("search"));
    }

    #[test]
    fn test_validate_bad_zipcode() {
        let req = BusinessSearch::new("not-a-zip");
        assert!(matches!(req.validate(), Err(Error::InvalidZipcode(_))));
    }

    #[test]
    fn test_validate_bad_limit() {
        let req = BusinessSearch { limit: Some(51), ..BusinessSearch::new("48109") };
        assert!(matches!(req.validate(), Err(Error::InvalidRequest(_))));
    }

    #[test]
    fn test_validate_ok() {
        let req = BusinessSearch { term: Some("pizza".to_string()), limit: Some(20), ..BusinessSearch::new("48109") };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_client_new_missing_key() {
        let result = BusinessClient::new(BusinessConfig::default());
        assert!(matches!(result, Err(Error::MissingApiKey(_))));
    }
}
