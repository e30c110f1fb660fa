//! GraphQL health client for the vigil dashboard.
//!
//! This crate provides a lightweight client for the backend's health-check
//! GraphQL endpoint. It focuses on:
//!
//! - Constructing an HTTP client with sensible defaults
//! - Resolving and validating the base URL from `VIGIL_API_BASE`
//! - Issuing the fixed health query and deserializing the response
//! - Normalizing every failure mode into [`HealthCheckError`]
//!
//! The primary entry point is [`VigilClient`]. Create an instance via
//! [`VigilClient::new_from_env`] (or [`VigilClient::new`] with an explicit
//! base), then call [`VigilClient::check_health`].

use std::env;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Url, header};
use serde::Deserialize;
use tracing::{debug, warn};
use vigil_types::HealthPayload;

/// Environment variable overriding the backend base URL.
pub const API_BASE_ENV_VAR: &str = "VIGIL_API_BASE";

/// Default backend base URL for local development.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Path of the GraphQL endpoint, relative to the base URL.
pub const GRAPHQL_PATH: &str = "/api/graphql";

/// The fixed health query posted on every poll.
pub const HEALTH_QUERY: &str =
    "query { health { status timestamp api { status } database { status connection details } } }";

/// Hostnames allowed to use any scheme for local development.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

/// Everything that can go wrong during a single health check.
///
/// All four failure classes are caught at the client boundary; callers that
/// only need a human-readable message can rely on the `Display` impl.
#[derive(Debug, thiserror::Error)]
pub enum HealthCheckError {
    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("HTTP {status}: {reason}")]
    Http { status: u16, reason: String },
    /// The server answered 2xx but reported a GraphQL-level error.
    #[error("{0}")]
    GraphQl(String),
    /// The response body was not the expected JSON shape.
    #[error("Invalid response: {0}")]
    Malformed(String),
}

/// GraphQL response envelope for the health query.
#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<HealthData>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct HealthData {
    health: Option<HealthPayload>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: Option<String>,
}

/// Thin wrapper around a configured `reqwest::Client` for the health endpoint.
///
/// The client pre-configures default headers and a request timeout, and posts
/// the health query against a validated base URL.
#[derive(Debug, Clone)]
pub struct VigilClient {
    base_url: String,
    http: Client,
    user_agent: String,
}

impl VigilClient {
    /// Construct a [`VigilClient`] against an explicit base URL.
    ///
    /// Non-localhost hosts must use HTTPS; see [`validate_base_url`] rules.
    pub fn new(base_url: &str) -> Result<Self> {
        validate_base_url(base_url)?;

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(Duration::from_secs(30))
            .build()
            .context("build http client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            user_agent: format!("vigil/0.1; {}", env::consts::OS),
        })
    }

    /// Construct a [`VigilClient`] from the environment.
    ///
    /// The base URL is taken from `VIGIL_API_BASE` (if set) or falls back to
    /// the local development default.
    pub fn new_from_env() -> Result<Self> {
        let base_url = env::var(API_BASE_ENV_VAR).unwrap_or_else(|_| DEFAULT_API_BASE.into());
        Self::new(&base_url)
    }

    /// The fully resolved URL the health query is posted to.
    pub fn endpoint_url(&self) -> String {
        format!("{}{}", self.base_url, GRAPHQL_PATH)
    }

    /// Perform a single health check against the GraphQL endpoint.
    ///
    /// Failure normalization, in order of detection:
    /// - network/transport failure → [`HealthCheckError::Transport`]
    /// - non-2xx status → [`HealthCheckError::Http`] with code and reason phrase
    /// - body that is not the expected envelope → [`HealthCheckError::Malformed`]
    /// - a GraphQL `errors` array (even an empty one) → [`HealthCheckError::GraphQl`]
    ///   carrying the first error's message or a generic fallback
    /// - an envelope without `data.health` → [`HealthCheckError::Malformed`]
    pub async fn check_health(&self) -> Result<HealthPayload, HealthCheckError> {
        let url = self.endpoint_url();
        debug!(%url, "health check started");

        let body = serde_json::json!({ "query": HEALTH_QUERY });
        let response = self
            .http
            .post(&url)
            .header(header::USER_AGENT, &self.user_agent)
            .json(&body)
            .send()
            .await
            .map_err(|error| {
                warn!(%url, %error, "health check transport failure");
                HealthCheckError::Transport(error.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "health check returned non-success status");
            return Err(HealthCheckError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|error| HealthCheckError::Transport(error.to_string()))?;
        let envelope: GraphQlResponse =
            serde_json::from_str(&text).map_err(|error| HealthCheckError::Malformed(error.to_string()))?;

        if let Some(errors) = envelope.errors {
            let message = errors
                .into_iter()
                .next()
                .and_then(|error| error.message)
                .unwrap_or_else(|| "GraphQL query failed".to_string());
            warn!(%url, %message, "health check returned GraphQL errors");
            return Err(HealthCheckError::GraphQl(message));
        }

        let payload = envelope
            .data
            .and_then(|data| data.health)
            .ok_or_else(|| HealthCheckError::Malformed("missing health payload".to_string()))?;

        debug!(%url, status = ?payload.status, "health check completed");
        Ok(payload)
    }
}

/// Validate that a base URL is acceptable for use by the client.
///
/// Rules:
/// - `localhost` or `127.0.0.1`: any scheme is allowed
/// - otherwise: scheme must be HTTPS
fn validate_base_url(base: &str) -> Result<()> {
    let parsed_base_url =
        Url::parse(base).map_err(|e| anyhow!("Invalid {} URL '{}': {}", API_BASE_ENV_VAR, base, e))?;

    let host_name = parsed_base_url
        .host_str()
        .ok_or_else(|| anyhow!("{} must include a host", API_BASE_ENV_VAR))?;

    // Local development allowances: localhost/127.0.0.1 with any scheme.
    if LOCALHOST_DOMAINS
        .iter()
        .any(|&allowed| host_name.eq_ignore_ascii_case(allowed))
    {
        return Ok(());
    }

    if parsed_base_url.scheme() != "https" {
        return Err(anyhow!(
            "{} must use https for non-localhost hosts; got '{}://'",
            API_BASE_ENV_VAR,
            parsed_base_url.scheme()
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vigil_types::HealthLevel;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ok_health_body() -> serde_json::Value {
        json!({
            "data": {
                "health": {
                    "status": "ok",
                    "timestamp": "2025-01-01T00:00:00Z",
                    "api": { "status": "ok" },
                    "database": {
                        "status": "ok",
                        "connection": true,
                        "details": "PostgreSQL connected"
                    }
                }
            }
        })
    }

    fn client_for(server: &MockServer) -> VigilClient {
        VigilClient::new(&server.uri()).expect("mock server URL should validate")
    }

    #[tokio::test]
    async fn check_health_posts_fixed_query_and_parses_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .and(body_partial_json(json!({ "query": HEALTH_QUERY })))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_health_body()))
            .expect(1)
            .mount(&server)
            .await;

        let payload = client_for(&server).check_health().await.expect("check should succeed");

        assert_eq!(payload.status, HealthLevel::Ok);
        assert!(payload.database.connection);
        assert_eq!(payload.database.details.as_deref(), Some("PostgreSQL connected"));
    }

    #[tokio::test]
    async fn degraded_payload_is_parsed_not_treated_as_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "health": {
                        "status": "degraded",
                        "timestamp": "2025-01-01T00:00:00Z",
                        "api": { "status": "ok" },
                        "database": { "status": "degraded", "connection": true, "details": null }
                    }
                }
            })))
            .mount(&server)
            .await;

        let payload = client_for(&server).check_health().await.expect("degraded is a valid payload");
        assert_eq!(payload.status, HealthLevel::Degraded);
    }

    #[tokio::test]
    async fn non_success_status_surfaces_code_and_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let error = client_for(&server).check_health().await.expect_err("500 must fail");
        assert!(matches!(error, HealthCheckError::Http { status: 500, .. }));
        assert_eq!(error.to_string(), "HTTP 500: Internal Server Error");
    }

    #[tokio::test]
    async fn graphql_errors_surface_first_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errors": [
                    { "message": "health resolver unavailable" },
                    { "message": "second error is ignored" }
                ]
            })))
            .mount(&server)
            .await;

        let error = client_for(&server).check_health().await.expect_err("errors array must fail");
        assert_eq!(error.to_string(), "health resolver unavailable");
    }

    #[tokio::test]
    async fn empty_graphql_errors_array_uses_generic_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "errors": [] })))
            .mount(&server)
            .await;

        let error = client_for(&server).check_health().await.expect_err("present errors key must fail");
        assert_eq!(error.to_string(), "GraphQL query failed");
    }

    #[tokio::test]
    async fn body_that_is_not_json_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let error = client_for(&server).check_health().await.expect_err("html must fail");
        assert!(matches!(error, HealthCheckError::Malformed(_)));
    }

    #[tokio::test]
    async fn envelope_without_health_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
            .mount(&server)
            .await;

        let error = client_for(&server).check_health().await.expect_err("missing payload must fail");
        assert_eq!(error.to_string(), "Invalid response: missing health payload");
    }

    #[tokio::test]
    async fn connection_refused_is_a_transport_error() {
        // Port 1 is never bound in test environments.
        let client = VigilClient::new("http://127.0.0.1:1").expect("localhost should validate");
        let error = client.check_health().await.expect_err("unreachable host must fail");
        assert!(matches!(error, HealthCheckError::Transport(_)));
        assert!(!error.to_string().is_empty());
    }

    #[test]
    fn endpoint_url_appends_graphql_path_once() {
        let client = VigilClient::new("http://localhost:8000/").expect("trailing slash should validate");
        assert_eq!(client.endpoint_url(), "http://localhost:8000/api/graphql");
    }

    #[test]
    fn new_from_env_honors_override() {
        temp_env::with_var(API_BASE_ENV_VAR, Some("http://localhost:9999"), || {
            let client = VigilClient::new_from_env().expect("override should validate");
            assert_eq!(client.endpoint_url(), "http://localhost:9999/api/graphql");
        });
    }

    #[test]
    fn validate_base_url_rules() {
        assert!(validate_base_url("http://localhost:3000").is_ok());
        assert!(validate_base_url("http://127.0.0.1:8000").is_ok());
        assert!(validate_base_url("https://status.example.com").is_ok());
        assert!(validate_base_url("http://status.example.com").is_err());
        assert!(validate_base_url("not a url").is_err());
    }
}
