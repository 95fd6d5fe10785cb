//! Client for the Stars contributions API (GraphQL over HTTP).
//!
//! Two operations: read the URL of every stored contribution, and create
//! a batch of new ones. Responses are decoded against an explicit
//! envelope schema so a shape mismatch fails here with a typed error
//! instead of silently downstream.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::contribution::Contribution;

const REMOTE_TIMEOUT: Duration = Duration::from_secs(20);

const KNOWN_URLS_QUERY: &str = "query getContributions { contributions { url } }";

const CREATE_CONTRIBUTIONS_MUTATION: &str = "mutation createContributions($input: [ContributionInput]) { createContributions(data: $input) { id title url } }";

/// Errors from talking to the Stars API.
///
/// Auth failures surface as `HttpStatus(401)`/`HttpStatus(403)`;
/// validation rejections arrive as `Api` with the server's messages.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// Request exceeded the 20-second timeout
    #[error("request timed out")]
    Timeout,
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// The server answered 200 but reported GraphQL-level errors
    #[error("API rejected the request: {}", .0.join("; "))]
    Api(Vec<String>),
    /// The response body did not match the expected schema
    #[error("unexpected response shape: {0}")]
    Schema(String),
}

/// A stored contribution as returned by the read query. Only the dedup
/// key is requested.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KnownContribution {
    pub url: String,
}

/// Remote confirmation for one created contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedContribution {
    pub id: String,
    pub title: String,
    pub url: String,
}

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct ContributionsData {
    contributions: Vec<KnownContribution>,
}

#[derive(Deserialize)]
struct CreateContributionsData {
    #[serde(rename = "createContributions")]
    create_contributions: Vec<CreatedContribution>,
}

/// Stars API client: endpoint, bearer token, and an injected HTTP client.
///
/// Constructed once at startup and passed to the orchestrator; tests
/// substitute a mock server via the endpoint.
pub struct StarsClient {
    http: reqwest::Client,
    endpoint: String,
    token: SecretString,
}

impl StarsClient {
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>, token: SecretString) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            token,
        }
    }

    /// Fetches the URL of every contribution the remote already stores.
    ///
    /// No filtering, no pagination: the full current set comes back in
    /// one query.
    pub async fn known_urls(&self) -> Result<Vec<KnownContribution>, RemoteError> {
        let data: ContributionsData = self
            .request(GraphQlRequest {
                query: KNOWN_URLS_QUERY,
                variables: None,
            })
            .await?;

        tracing::debug!(known = data.contributions.len(), "Read remote contributions");
        Ok(data.contributions)
    }

    /// Creates all `records` in a single batch mutation and returns the
    /// remote's confirmation for each.
    ///
    /// Callers only invoke this with a non-empty batch. Whether the
    /// remote applies the batch atomically is outside this client's
    /// control; a rejection surfaces as [`RemoteError::Api`] and no local
    /// retry happens.
    pub async fn create_contributions(
        &self,
        records: &[Contribution],
    ) -> Result<Vec<CreatedContribution>, RemoteError> {
        let data: CreateContributionsData = self
            .request(GraphQlRequest {
                query: CREATE_CONTRIBUTIONS_MUTATION,
                variables: Some(json!({ "input": records })),
            })
            .await?;

        tracing::info!(created = data.create_contributions.len(), "Created contributions");
        Ok(data.create_contributions)
    }

    async fn request<T>(&self, body: GraphQlRequest<'_>) -> Result<T, RemoteError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = tokio::time::timeout(
            REMOTE_TIMEOUT,
            self.http
                .post(&self.endpoint)
                .bearer_auth(self.token.expose_secret())
                .json(&body)
                .send(),
        )
        .await
        .map_err(|_| RemoteError::Timeout)?
        .map_err(RemoteError::Network)?;

        if !response.status().is_success() {
            return Err(RemoteError::HttpStatus(response.status().as_u16()));
        }

        let envelope: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|e| RemoteError::Schema(e.to_string()))?;

        if !envelope.errors.is_empty() {
            return Err(RemoteError::Api(
                envelope.errors.into_iter().map(|e| e.message).collect(),
            ));
        }

        envelope
            .data
            .ok_or_else(|| RemoteError::Schema("response carried neither data nor errors".into()))
    }
}
