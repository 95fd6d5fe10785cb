use std::time::Duration;

use futures::StreamExt;
use thiserror::Error;

use crate::contribution::{Contribution, ContributionKind};
use crate::feed::parser::parse_feed;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_FEED_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Errors that can occur while retrieving and parsing a feed.
///
/// None of these are recovered locally: a failed feed fetch aborts the
/// whole run before anything is written to the remote.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// Request exceeded the 30-second timeout
    #[error("request timed out")]
    Timeout,
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Response body exceeded the 10MB size limit
    #[error("response too large")]
    ResponseTooLarge,
    /// Document could not be parsed as RSS or Atom
    #[error("parse error: {0}")]
    Parse(String),
}

/// Fetches one feed and normalizes its entries into contributions.
///
/// # Arguments
///
/// * `client` - Shared HTTP client (injected so tests can point at a mock
///   server)
/// * `url` - The feed URL
/// * `kind` - Content kind stamped on every produced record
///
/// # Errors
///
/// Returns a [`FetchError`] if the feed is unreachable, answers with a
/// non-2xx status, exceeds the size limit, or is not parseable RSS/Atom.
pub async fn fetch_contributions(
    client: &reqwest::Client,
    url: &str,
    kind: ContributionKind,
) -> Result<Vec<Contribution>, FetchError> {
    let response = tokio::time::timeout(FETCH_TIMEOUT, client.get(url).send())
        .await
        .map_err(|_| FetchError::Timeout)?
        .map_err(FetchError::Network)?;

    if !response.status().is_success() {
        return Err(FetchError::HttpStatus(response.status().as_u16()));
    }

    let bytes = read_limited_bytes(response, MAX_FEED_SIZE).await?;

    let parsed = parse_feed(&bytes, kind).map_err(|e| FetchError::Parse(e.to_string()))?;

    if parsed.skipped > 0 {
        tracing::warn!(
            feed = %url,
            skipped = parsed.skipped,
            "Entries without a link or timestamp skipped"
        );
    }

    tracing::debug!(
        feed = %url,
        kind = ?kind,
        entries = parsed.contributions.len(),
        "Feed fetched"
    );

    Ok(parsed.contributions)
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FetchError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
