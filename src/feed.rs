//! Release feed client
//!
//! Thin HTTP wrapper around the release-metadata service. The catalog and
//! selection logic never perform I/O themselves; this module hands them an
//! already-materialized `Vec<ReleaseRecord>`. Every call fetches fresh —
//! there is deliberately no caching layer, so a new release shows up on the
//! next invocation.

use crate::config::FeedConfig;
use crate::error::FeedError;
use crate::release::ReleaseRecord;
use std::path::Path;
use std::time::Duration;

/// Client for the release-metadata API
#[derive(Debug)]
pub struct FeedClient {
    /// Feed endpoint URL (e.g. "https://releases.dictum.app/api/releases")
    endpoint: String,
    /// Optional API key for authenticated feeds
    api_key: Option<String>,
    /// Request timeout
    timeout: Duration,
}

impl FeedClient {
    /// Create a feed client from config
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        let endpoint = config.endpoint.clone();

        // Validate endpoint URL format
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(FeedError::Endpoint(endpoint));
        }

        // Warn about non-HTTPS for non-localhost endpoints
        if endpoint.starts_with("http://")
            && !endpoint.contains("localhost")
            && !endpoint.contains("127.0.0.1")
        {
            tracing::warn!("Release feed endpoint uses HTTP without TLS");
        }

        // Check for API key in config or environment
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("DICTUMDL_FEED_API_KEY").ok());

        let timeout = Duration::from_secs(config.timeout_secs);

        tracing::debug!(
            "Configured feed client: endpoint={}, timeout={}s",
            endpoint,
            timeout.as_secs()
        );

        Ok(Self {
            endpoint,
            api_key,
            timeout,
        })
    }

    /// Fetch the current release list from the feed
    pub fn fetch(&self) -> Result<Vec<ReleaseRecord>, FeedError> {
        let agent = ureq::AgentBuilder::new().timeout(self.timeout).build();

        let mut request = agent.get(&self.endpoint).set("Accept", "application/json");
        if let Some(ref key) = self.api_key {
            request = request.set("Authorization", &format!("Bearer {}", key));
        }

        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                return Err(FeedError::Status {
                    status,
                    body: response.into_string().unwrap_or_default(),
                });
            }
            Err(e) => return Err(FeedError::Network(e.to_string())),
        };

        let records: Vec<ReleaseRecord> = response
            .into_json()
            .map_err(|e| FeedError::Malformed(e.to_string()))?;

        tracing::info!("Fetched {} release records from feed", records.len());
        Ok(records)
    }
}

/// Read a release feed from a local JSON file.
///
/// Used for offline runs and tests; the file holds the same JSON array the
/// feed endpoint serves.
pub fn read_feed_file(path: &Path) -> Result<Vec<ReleaseRecord>, FeedError> {
    let contents = std::fs::read_to_string(path).map_err(|source| FeedError::File {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|e| FeedError::Malformed(e.to_string()))
}
