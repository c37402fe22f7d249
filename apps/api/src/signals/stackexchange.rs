//! Q&A tag connector. Question counts drive the demand signal.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{endpoint, get_json, ConnectorKind, SignalConnector, SignalError, SignalOutcome};

pub const DEFAULT_BASE_URL: &str = "https://api.stackexchange.com/2.3";
const SITE: &str = "stackoverflow";

#[derive(Debug, Deserialize)]
pub struct TagInfoResponse {
    #[serde(default)]
    pub items: Vec<TagInfo>,
}

#[derive(Debug, Deserialize)]
pub struct TagInfo {
    pub name: String,
    pub count: u64,
}

impl TagInfoResponse {
    pub fn question_count(&self) -> u64 {
        self.items.first().map(|t| t.count).unwrap_or(0)
    }
}

/// Tags are lower-case on the Q&A site.
pub fn tag_for(identifier: &str) -> String {
    identifier.trim().to_lowercase()
}

/// Looks up the question count for a tag (log base 10^7).
pub struct StackExchangeConnector {
    client: Client,
    base_url: String,
}

impl StackExchangeConnector {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn tag_info(&self, tag: &str) -> Result<Option<TagInfoResponse>, SignalError> {
        let mut url = endpoint(&self.base_url, &["tags", tag, "info"])?;
        url.query_pairs_mut().append_pair("site", SITE);
        get_json(&self.client, url).await
    }
}

#[async_trait]
impl SignalConnector for StackExchangeConnector {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::Questions
    }

    async fn fetch_signal(&self, identifier: &str) -> SignalOutcome {
        let tag = tag_for(identifier);
        match self.tag_info(&tag).await {
            Ok(Some(body)) => {
                debug!("StackExchange tag '{tag}': {} questions", body.question_count());
                SignalOutcome::from_count(self.kind(), body.question_count())
            }
            Ok(None) => SignalOutcome::NotFound,
            Err(e) => {
                warn!("StackExchange lookup for tag '{tag}' failed: {e}");
                SignalOutcome::Unavailable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_is_lower_cased() {
        assert_eq!(tag_for(" Node.js "), "node.js");
        assert_eq!(tag_for("C#"), "c#");
    }

    #[test]
    fn test_parses_tag_info() {
        let body: TagInfoResponse = serde_json::from_str(
            r#"{"items": [{"has_synonyms": true, "is_moderator_only": false,
                "is_required": false, "count": 2191247, "name": "python"}],
                "has_more": false, "quota_max": 300, "quota_remaining": 290}"#,
        )
        .unwrap();
        assert_eq!(body.items[0].name, "python");
        assert_eq!(body.question_count(), 2_191_247);
        assert_eq!(
            SignalOutcome::from_count(ConnectorKind::Questions, body.question_count()).score(),
            Some(91)
        );
    }

    #[test]
    fn test_unknown_tag_has_no_items() {
        let body: TagInfoResponse =
            serde_json::from_str(r#"{"items": [], "has_more": false}"#).unwrap();
        assert_eq!(body.question_count(), 0);
        assert_eq!(
            SignalOutcome::from_count(ConnectorKind::Questions, body.question_count()),
            SignalOutcome::NotFound
        );
    }
}
