//! # Sync Error Types
//!
//! Error types for sync and search operations.
//!
//! ## Error Taxonomy
//! ```text
//! ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐
//! │    Network      │  │     Parse       │  │        Cache            │
//! │                 │  │                 │  │                         │
//! │  fetch failure  │  │  malformed JSON │  │  table/query failure    │
//! │  non-2xx status │  │  bad record     │  │  handle unavailable     │
//! │  timeout        │  │  shape          │  │                         │
//! └─────────────────┘  └─────────────────┘  └─────────────────────────┘
//! ```
//!
//! All three are caught at the tier where they occur and degrade to the
//! next fallback (cache → fetch-and-populate → direct remote → empty list)
//! rather than propagating to the user. Only the explicit resync operation
//! reports its failure reason.

use thiserror::Error;

/// Result type alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Sync error type covering menu feed, cache and configuration failures.
#[derive(Debug, Error)]
pub enum SyncError {
    // =========================================================================
    // Feed Errors
    // =========================================================================
    /// Network request failed (connect, timeout, non-2xx status).
    #[error("Network error: {0}")]
    Network(String),

    /// The response body was not a menu document we understand.
    #[error("Parse error: {0}")]
    Parse(String),

    // =========================================================================
    // Cache Errors
    // =========================================================================
    /// A cache read or write failed.
    #[error("Cache error: {0}")]
    Cache(String),

    /// No cache handle is attached (resync needs one).
    #[error("No local cache is available")]
    CacheUnavailable,

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid endpoint URL.
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SyncError::Parse(err.to_string())
        } else {
            SyncError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Parse(err.to_string())
    }
}

impl From<lemon_db::DbError> for SyncError {
    fn from(err: lemon_db::DbError) -> Self {
        SyncError::Cache(err.to_string())
    }
}

impl From<url::ParseError> for SyncError {
    fn from(err: url::ParseError) -> Self {
        SyncError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for SyncError {
    fn from(err: toml::de::Error) -> Self {
        SyncError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for SyncError {
    fn from(err: toml::ser::Error) -> Self {
        SyncError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl SyncError {
    /// Returns true if this error came from the feed (network or parse),
    /// as opposed to the local cache or configuration.
    pub fn is_feed_error(&self) -> bool {
        matches!(self, SyncError::Network(_) | SyncError::Parse(_))
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SyncError::InvalidConfig(_)
                | SyncError::InvalidUrl(_)
                | SyncError::ConfigLoadFailed(_)
                | SyncError::ConfigSaveFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorization() {
        assert!(SyncError::Network("connection refused".into()).is_feed_error());
        assert!(SyncError::Parse("expected array".into()).is_feed_error());
        assert!(!SyncError::Cache("no such table".into()).is_feed_error());

        assert!(SyncError::InvalidUrl("not a url".into()).is_config_error());
        assert!(!SyncError::Network("timeout".into()).is_config_error());
    }

    #[test]
    fn test_db_error_maps_to_cache() {
        let err: SyncError = lemon_db::DbError::QueryFailed("no such table: menu".into()).into();
        assert!(matches!(err, SyncError::Cache(_)));
    }
}
