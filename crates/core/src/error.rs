//! Unified error types for zipscout.

/// Unified error types shared across the zipscout crates.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Zipcode failed shape validation (must be exactly 5 ASCII digits).
    #[error("INVALID_ZIPCODE: {0}")]
    InvalidZipcode(String),

    /// Invalid request parameters for an upstream search.
    #[error("INVALID_REQUEST: {0}")]
    InvalidRequest(String),

    /// Database operation failed.
    #[error("STORE_ERROR: {0}")]
    Database(#[from] rusqlite::Error),

    /// Migration failed to apply.
    #[error("STORE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// Cache file could not be written back.
    #[error("CACHE_WRITE_ERROR: {0}")]
    CacheWrite(String),

    /// Required API key is not configured.
    #[error("MISSING_API_KEY: {0}")]
    MissingApiKey(&'static str),

    /// Upstream returned a non-success HTTP status.
    #[error("HTTP_ERROR: {status}")]
    HttpError { status: u16 },

    /// Request timed out.
    #[error("REQUEST_TIMEOUT")]
    Timeout,

    /// Network-level failure reaching the upstream service.
    #[error("NETWORK_ERROR: {0}")]
    Network(String),

    /// Upstream payload could not be parsed as JSON.
    #[error("PARSE_ERROR: {0}")]
    Parse(String),
}
