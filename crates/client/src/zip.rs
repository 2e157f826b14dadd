//! Zipcode lookup API client.
//!
//! Consumes a path-parameter style service: there is no query string, the
//! zipcode and unit mode are baked into the request path
//! (`{base}/{api_key}/info.json/{zipcode}/degrees`). Because of that shape the
//! cache key is built by direct interpolation of the path segments rather
//! than through [`zipscout_core::key::canonical_key`]; the secret API key is
//! left out of the key so it never lands in the cache file.

use std::time::Duration;

use serde_json::Value;
use zipscout_core::Error;

/// Default base URL for the zipcode lookup service.
const DEFAULT_BASE_URL: &str = "https://www.zipcodeapi.com/rest";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "zipscout/0.1";

/// Zipcode client configuration.
#[derive(Debug, Clone)]
pub struct ZipConfig {
    /// API key, interpolated into the request path.
    pub api_key: String,
    /// Base URL (default: https://www.zipcodeapi.com/rest).
    pub base_url: String,
    /// Request timeout (default: 20s).
    pub timeout: Duration,
    /// User-agent string.
    pub user_agent: String,
}

impl Default for ZipConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Validate the shape of a zipcode: exactly 5 ASCII digits.
pub fn validate_zipcode(zipcode: &str) -> Result<(), Error> {
    if zipcode.len() == 5 && zipcode.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(Error::InvalidZipcode(zipcode.to_string()))
    }
}

/// Cache key for a zipcode lookup: interpolated path segments, no secret.
pub fn cache_key(zipcode: &str) -> String {
    format!("zip/{zipcode}/degrees")
}

/// Zipcode lookup API client.
#[derive(Debug, Clone)]
pub struct ZipClient {
    http: reqwest::blocking::Client,
    config: ZipConfig,
}

impl ZipClient {
    /// Create a new zipcode client with the given configuration.
    pub fn new(config: ZipConfig) -> Result<Self, Error> {
        if config.api_key.is_empty() {
            return Err(Error::MissingApiKey("zip_api_key"));
        }

        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Look up a zipcode, collapsing every failure mode to absence.
    ///
    /// Transport errors, non-success statuses, unparseable bodies and payloads
    /// carrying an upstream `error_code` are logged and returned as `None`, so
    /// callers branch on absence instead of handling faults, and the request
    /// gate never caches an error response.
    pub fn lookup(&self, zipcode: &str) -> Option<Value> {
        match self.request(zipcode) {
            Ok(payload) => {
                if payload.get("error_code").is_some() {
                    tracing::warn!(zipcode, "upstream returned an error payload, treating as no data");
                    return None;
                }
                Some(payload)
            }
            Err(e) => {
                tracing::warn!(zipcode, error = %e, "zipcode lookup failed, treating as no data");
                None
            }
        }
    }

    fn request(&self, zipcode: &str) -> Result<Value, Error> {
        validate_zipcode(zipcode)?;

        let url = format!("{}/{}/info.json/{}/degrees", self.config.base_url, self.config.api_key, zipcode);

        tracing::debug!(zipcode, "requesting zipcode info");

        let response = self.http.get(&url).send().map_err(|e| {
            if e.is_timeout() { Error::Timeout } else { Error::Network(e.to_string()) }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpError { status: status.as_u16() });
        }

        response.json().map_err(|e| Error::Parse(e.to_string()))
    }
}
