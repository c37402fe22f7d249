//! Package release connector. Release counts stand in for ecosystem maturity.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::IgnoredAny;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{endpoint, get_json, ConnectorKind, SignalConnector, SignalError, SignalOutcome};

pub const DEFAULT_BASE_URL: &str = "https://pypi.org";

#[derive(Debug, Deserialize)]
pub struct PackageResponse {
    /// Keyed by version string; only the number of keys matters.
    #[serde(default)]
    pub releases: HashMap<String, IgnoredAny>,
}

impl PackageResponse {
    pub fn release_count(&self) -> u64 {
        self.releases.len() as u64
    }
}

/// Counts published releases of a package (log base 10^3).
pub struct PyPiConnector {
    client: Client,
    base_url: String,
}

impl PyPiConnector {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn package(&self, name: &str) -> Result<Option<PackageResponse>, SignalError> {
        let url = endpoint(&self.base_url, &["pypi", name, "json"])?;
        get_json(&self.client, url).await
    }
}

#[async_trait]
impl SignalConnector for PyPiConnector {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::Releases
    }

    async fn fetch_signal(&self, identifier: &str) -> SignalOutcome {
        let name = identifier.trim().to_lowercase();
        match self.package(&name).await {
            Ok(Some(body)) => {
                debug!("PyPI '{name}': {} releases", body.release_count());
                SignalOutcome::from_count(self.kind(), body.release_count())
            }
            Ok(None) => SignalOutcome::NotFound,
            Err(e) => {
                warn!("PyPI lookup for '{name}' failed: {e}");
                SignalOutcome::Unavailable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_release_keys() {
        let body: PackageResponse = serde_json::from_str(
            r#"{"info": {"name": "django", "summary": "web framework"},
                "releases": {"1.0": [], "1.1": [{"filename": "x.tar.gz"}], "2.0": [], "3.0": []}}"#,
        )
        .unwrap();
        assert_eq!(body.release_count(), 4);
        // log10(4) / 3 * 100 = 20.07
        assert_eq!(
            SignalOutcome::from_count(ConnectorKind::Releases, body.release_count()).score(),
            Some(20)
        );
    }

    #[test]
    fn test_missing_releases_is_not_found() {
        let body: PackageResponse =
            serde_json::from_str(r#"{"info": {"name": "empty"}}"#).unwrap();
        assert_eq!(body.release_count(), 0);
        assert_eq!(
            SignalOutcome::from_count(ConnectorKind::Releases, body.release_count()),
            SignalOutcome::NotFound
        );
    }
}
