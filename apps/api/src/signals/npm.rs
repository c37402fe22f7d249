//! Package download connector (last-month downloads, log base 10^9).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{endpoint, get_json, ConnectorKind, SignalConnector, SignalError, SignalOutcome};

pub const DEFAULT_BASE_URL: &str = "https://api.npmjs.org";

#[derive(Debug, Deserialize)]
pub struct DownloadPointResponse {
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub package: String,
}

pub struct NpmConnector {
    client: Client,
    base_url: String,
}

impl NpmConnector {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn last_month(&self, package: &str) -> Result<Option<DownloadPointResponse>, SignalError> {
        let url = endpoint(
            &self.base_url,
            &["downloads", "point", "last-month", package],
        )?;
        get_json(&self.client, url).await
    }
}

#[async_trait]
impl SignalConnector for NpmConnector {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::Downloads
    }

    async fn fetch_signal(&self, identifier: &str) -> SignalOutcome {
        let package = identifier.trim().to_lowercase();
        match self.last_month(&package).await {
            Ok(Some(body)) => {
                debug!("npm '{}': {} downloads last month", body.package, body.downloads);
                SignalOutcome::from_count(self.kind(), body.downloads)
            }
            Ok(None) => SignalOutcome::NotFound,
            Err(e) => {
                warn!("npm download lookup for '{package}' failed: {e}");
                SignalOutcome::Unavailable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_download_point() {
        let body: DownloadPointResponse = serde_json::from_str(
            r#"{"downloads": 104857600, "start": "2024-01-01",
                "end": "2024-01-31", "package": "react"}"#,
        )
        .unwrap();
        assert_eq!(body.package, "react");
        assert_eq!(
            SignalOutcome::from_count(ConnectorKind::Downloads, body.downloads).score(),
            Some(89)
        );
    }

    #[test]
    fn test_zero_downloads_is_not_found() {
        let body: DownloadPointResponse =
            serde_json::from_str(r#"{"downloads": 0, "package": "left-padder"}"#).unwrap();
        assert_eq!(
            SignalOutcome::from_count(ConnectorKind::Downloads, body.downloads),
            SignalOutcome::NotFound
        );
    }
}
