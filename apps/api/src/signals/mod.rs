//! Source Connectors: one adapter per public developer-ecosystem API.
//!
//! Every connector turns a single identifier (skill name or job title) into a
//! raw upstream count plus its log-scale 0–100 score. Connectors never return
//! errors to their caller: network failures, non-success statuses and bad
//! bodies all collapse into `SignalOutcome::Unavailable`, while a legitimate
//! "nothing matched" is `SignalOutcome::NotFound`.

pub mod github;
pub mod npm;
pub mod pypi;
pub mod stackexchange;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

pub use github::GitHubConnector;
pub use npm::NpmConnector;
pub use pypi::PyPiConnector;
pub use stackexchange::StackExchangeConnector;

const USER_AGENT: &str = concat!("careerlens-api/", env!("CARGO_PKG_VERSION"));

// ────────────────────────────────────────────────────────────────────────────
// Connector kinds
// ────────────────────────────────────────────────────────────────────────────

/// The four upstream families, declared in invocation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorKind {
    /// Code-repository search. The primary connector.
    Repositories,
    /// Q&A tag question counts.
    Questions,
    /// Package monthly downloads.
    Downloads,
    /// Package release counts.
    Releases,
}

impl ConnectorKind {
    /// Invocation order. `sources` in an analysis follows this order.
    pub const ALL: [ConnectorKind; 4] = [
        ConnectorKind::Repositories,
        ConnectorKind::Questions,
        ConnectorKind::Downloads,
        ConnectorKind::Releases,
    ];

    /// log10 of the count that should map to a score of 100.
    pub fn log_divisor(self) -> f64 {
        match self {
            ConnectorKind::Repositories => 6.0,
            ConnectorKind::Questions => 7.0,
            ConnectorKind::Downloads => 9.0,
            ConnectorKind::Releases => 3.0,
        }
    }

    /// Label reported in `AnalysisResult::sources`.
    pub fn source_label(self) -> &'static str {
        match self {
            ConnectorKind::Repositories => "GitHub API",
            ConnectorKind::Questions => "StackExchange API",
            ConnectorKind::Downloads => "NPM Registry",
            ConnectorKind::Releases => "PyPI API",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Outcomes
// ────────────────────────────────────────────────────────────────────────────

/// Result of one connector call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalOutcome {
    /// Upstream reported a positive count.
    Found { raw_count: u64, score: u8 },
    /// Upstream answered, but the identifier has no data (404, empty result, zero count).
    NotFound,
    /// Upstream could not be reached or answered with garbage.
    Unavailable,
}

impl SignalOutcome {
    /// Builds an outcome from a raw count using the kind's normalization.
    pub fn from_count(kind: ConnectorKind, raw_count: u64) -> Self {
        if raw_count == 0 {
            return SignalOutcome::NotFound;
        }
        SignalOutcome::Found {
            raw_count,
            score: normalize_log_scale(raw_count, kind.log_divisor()),
        }
    }

    /// Score when found.
    pub fn score(&self) -> Option<u8> {
        match self {
            SignalOutcome::Found { score, .. } => Some(*score),
            _ => None,
        }
    }

    /// Score with "not found" read as a legitimate zero. `None` only when unavailable.
    pub fn score_or_zero(&self) -> Option<u8> {
        match self {
            SignalOutcome::Found { score, .. } => Some(*score),
            SignalOutcome::NotFound => Some(0),
            SignalOutcome::Unavailable => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, SignalOutcome::Unavailable)
    }
}

/// `round(clamp(log10(count) / divisor * 100, 0, 100))`, and 0 for a zero count.
pub fn normalize_log_scale(raw_count: u64, divisor: f64) -> u8 {
    if raw_count == 0 || divisor <= 0.0 {
        return 0;
    }
    let score = (raw_count as f64).log10() / divisor * 100.0;
    score.clamp(0.0, 100.0).round() as u8
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// A single upstream signal source.
///
/// Implementations must be infallible from the caller's point of view so the
/// aggregation fan-out can always settle every call.
#[async_trait]
pub trait SignalConnector: Send + Sync {
    fn kind(&self) -> ConnectorKind;

    async fn fetch_signal(&self, identifier: &str) -> SignalOutcome;
}

// ────────────────────────────────────────────────────────────────────────────
// Shared HTTP plumbing
// ────────────────────────────────────────────────────────────────────────────

/// Failure talking to an upstream. Logged, then folded into `Unavailable`.
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),
}

/// Builds the HTTP client shared by every connector.
pub fn build_http_client(timeout: Duration) -> Result<Client, SignalError> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?)
}

/// Appends percent-encoded path segments to a base URL.
pub(crate) fn endpoint(base_url: &str, segments: &[&str]) -> Result<Url, SignalError> {
    let mut url = Url::parse(base_url).map_err(|e| SignalError::InvalidUrl(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| SignalError::InvalidUrl(base_url.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// GETs a JSON body. `Ok(None)` for 404, an error for any other non-success.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: Url,
) -> Result<Option<T>, SignalError> {
    debug!("GET {url}");
    let response = client.get(url).send().await?;
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if !status.is_success() {
        return Err(SignalError::Status(status.as_u16()));
    }

    Ok(Some(response.json::<T>().await?))
}
