//! # Remote Menu Feed
//!
//! HTTP client for the remote menu endpoint.
//!
//! The endpoint is a plain GET returning either `{ "menu": [...] }` or a
//! legacy bare array; tolerance for both shapes lives in
//! [`lemon_core::mapping`]. The [`MenuSource`] trait is the seam between
//! the sync engine and the network, so the engine can be driven by a test
//! double that counts fetches.

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::MenuSettings;
use crate::error::{SyncError, SyncResult};
use lemon_core::{RemoteMenuDocument, RemoteMenuRecord};

// ============================================================================
// Constants
// ============================================================================

/// Default menu endpoint.
pub const DEFAULT_MENU_ENDPOINT: &str =
    "https://raw.githubusercontent.com/Meta-Mobile-Developer-PC/Working-With-Data-API/main/capstone.json";

/// Default HTTP request timeout in seconds.
/// 10s fails fast enough that the fallback tier still feels responsive.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Menu Source
// ============================================================================

/// A source of raw menu records.
///
/// The production implementation is [`HttpMenuSource`]; tests substitute
/// doubles to script failures and assert fetch counts.
#[allow(async_fn_in_trait)]
pub trait MenuSource {
    /// Fetches the full record list from the source.
    async fn fetch_menu(&self) -> SyncResult<Vec<RemoteMenuRecord>>;
}

/// HTTP implementation of [`MenuSource`].
///
/// Clone is cheap - reqwest::Client uses Arc internally for connection
/// pooling.
#[derive(Debug, Clone)]
pub struct HttpMenuSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpMenuSource {
    /// Creates a client for the given endpoint with the given timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> SyncResult<Self> {
        let endpoint = endpoint.into();
        url::Url::parse(&endpoint)?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SyncError::Network(e.to_string()))?;

        Ok(HttpMenuSource { client, endpoint })
    }

    /// Creates a client from feed settings.
    pub fn from_settings(settings: &MenuSettings) -> SyncResult<Self> {
        Self::new(
            settings.endpoint.clone(),
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    /// Creates a client for the default endpoint.
    pub fn with_defaults() -> SyncResult<Self> {
        Self::new(
            DEFAULT_MENU_ENDPOINT,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Returns the configured endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl MenuSource for HttpMenuSource {
    async fn fetch_menu(&self) -> SyncResult<Vec<RemoteMenuRecord>> {
        debug!(endpoint = %self.endpoint, "Fetching remote menu");

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?;

        let document: RemoteMenuDocument = response.json().await?;
        let records = document.into_records();

        if records.is_empty() {
            warn!(endpoint = %self.endpoint, "Remote menu document contained no records");
        } else {
            debug!(count = records.len(), "Fetched remote menu records");
        }

        Ok(records)
    }
}
