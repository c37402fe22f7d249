//! Code-repository search connector (primary source).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{endpoint, get_json, ConnectorKind, SignalConnector, SignalError, SignalOutcome};

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

#[derive(Debug, Deserialize)]
pub struct RepositorySearchResponse {
    pub total_count: u64,
    #[serde(default)]
    pub items: Vec<RepositoryItem>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryItem {
    #[serde(default)]
    pub stargazers_count: u64,
}

impl RepositorySearchResponse {
    pub fn top_stars(&self) -> u64 {
        self.items.first().map(|i| i.stargazers_count).unwrap_or(0)
    }
}

/// Searches public repositories and scores the total match count (log base 10^6).
pub struct GitHubConnector {
    client: Client,
    base_url: String,
}

impl GitHubConnector {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn search(&self, query: &str) -> Result<Option<RepositorySearchResponse>, SignalError> {
        let mut url = endpoint(&self.base_url, &["search", "repositories"])?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("sort", "stars")
            .append_pair("per_page", "1");
        get_json(&self.client, url).await
    }
}

#[async_trait]
impl SignalConnector for GitHubConnector {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::Repositories
    }

    async fn fetch_signal(&self, identifier: &str) -> SignalOutcome {
        match self.search(identifier).await {
            Ok(Some(body)) => {
                debug!(
                    "GitHub '{identifier}': {} repositories, top repo {} stars",
                    body.total_count,
                    body.top_stars()
                );
                SignalOutcome::from_count(self.kind(), body.total_count)
            }
            Ok(None) => SignalOutcome::NotFound,
            Err(e) => {
                warn!("GitHub search for '{identifier}' failed: {e}");
                SignalOutcome::Unavailable
            }
        }
    }
}
