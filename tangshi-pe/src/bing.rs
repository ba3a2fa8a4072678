//! Image search HTTP client
//!
//! One GET per author name against an image-search endpoint, with fixed
//! timeouts. This is best-effort, unversioned scraping: the endpoint owes us
//! nothing, so callers treat every failure as skippable.

use reqwest::Client;
use std::time::Duration;

/// Default image search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.bing.com/images/search";

/// The class the search results put on result thumbnails. Markup drift here
/// degrades to "no image found" rather than failing loudly.
pub const MARKER_CLASS: &str = "mimg";

/// Image search client with configured timeouts.
pub struct PortraitSearchClient {
    client: Client,
    endpoint: String,
}

impl PortraitSearchClient {
    /// Create a new client.
    ///
    /// # Panics
    /// Panics if the HTTP client cannot be built (should not happen with
    /// valid config).
    pub fn new(endpoint: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .user_agent(concat!("tangshi-pe/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build HTTP client");

        Self { client, endpoint }
    }

    /// Fetch the search result markup for one author name.
    ///
    /// Transport failures and non-success statuses surface as errors; the
    /// enrichment loop logs and moves on.
    pub async fn fetch(&self, name: &str) -> reqwest::Result<String> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", name)])
            .send()
            .await?
            .error_for_status()?;

        response.text().await
    }
}
