//! Equation API request execution.
//!
//! One GET per solve, `Accept: application/json`, cookies kept by the
//! underlying client. Every invocation yields exactly one [`Outcome`]; nothing
//! is retried.

use async_trait::async_trait;
use equasolve_common::sandbox::SandboxClient;
use equasolve_common::SolverError;
use reqwest::header::{ACCEPT, ORIGIN};
use serde::Serialize;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::request::{build_request_url, SolveParams};

/// Shown when a failure carries no message of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred while executing the request";

/// Result of one request execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "body", rename_all = "snake_case")]
pub enum Outcome {
    Success(serde_json::Value),
    Failure(String),
}

impl Outcome {
    /// Failure with `message`, or the fallback text when it is blank.
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Outcome::Failure(FALLBACK_ERROR_MESSAGE.to_string())
        } else {
            Outcome::Failure(message)
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

impl From<SolverError> for Outcome {
    fn from(err: SolverError) -> Self {
        let message = match err {
            SolverError::Api { message, .. } => message,
            SolverError::Http(e) => e.to_string(),
            other => other.to_string(),
        };
        Outcome::failure(message)
    }
}

/// Anything that can execute a built request URL against the Equation API.
#[async_trait]
pub trait EquationApi: Send + Sync {
    async fn execute(&self, url: &Url) -> Outcome;
}

/// Build the URL for `params` and execute it.
pub async fn fetch_outcome(api: &dyn EquationApi, base: &Url, params: &SolveParams) -> Outcome {
    match build_request_url(base, params) {
        Ok(url) => api.execute(&url).await,
        Err(e) => e.into(),
    }
}

pub struct HttpEquationApi {
    client: SandboxClient,
    origin: Option<String>,
}

impl HttpEquationApi {
    pub fn new(client: SandboxClient) -> Self {
        Self { client, origin: None }
    }

    /// Send `Origin: {origin}` with every request.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    async fn fetch_json(&self, url: &Url) -> equasolve_common::Result<serde_json::Value> {
        let mut request = self.client.get(url)?.header(ACCEPT, "application/json");
        if let Some(ref origin) = self.origin {
            request = request.header(ORIGIN, origin.as_str());
        }

        let resp = request.send().await?;
        let status = resp.status();
        debug!(status = status.as_u16(), "Equation API responded");

        if !status.is_success() {
            let body = resp.text().await?;
            return Err(SolverError::Api {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }

        Ok(resp.json::<serde_json::Value>().await?)
    }
}

#[async_trait]
impl EquationApi for HttpEquationApi {
    #[instrument(skip_all, fields(url = %url))]
    async fn execute(&self, url: &Url) -> Outcome {
        match self.fetch_json(url).await {
            Ok(payload) => Outcome::Success(payload),
            Err(e) => {
                warn!(error = %e, "Equation API request failed");
                e.into()
            }
        }
    }
}

/// Error text for a non-success response body: the JSON `message` field,
/// else the JSON `error` field, else the raw body.
pub fn extract_error_message(body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            ["message", "error"].iter().find_map(|field| {
                json[*field]
                    .as_str()
                    .filter(|s| !s.is_empty())
                    .map(String::from)
            })
        });
    from_json.unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_field_wins() {
        let body = r#"{"message":"Invalid equation","error":"Bad Request"}"#;
        assert_eq!(extract_error_message(body), "Invalid equation");
    }

    #[test]
    fn test_error_field_fallback() {
        let body = r#"{"status":400,"error":"Bad Request"}"#;
        assert_eq!(extract_error_message(body), "Bad Request");
        let body = r#"{"message":"","error":"Bad Request"}"#;
        assert_eq!(extract_error_message(body), "Bad Request");
    }

    #[test]
    fn test_raw_body_fallback() {
        assert_eq!(extract_error_message("upstream timed out"), "upstream timed out");
        assert_eq!(extract_error_message(r#"{"detail":"x"}"#), r#"{"detail":"x"}"#);
        assert_eq!(extract_error_message("[1,2]"), "[1,2]");
    }

    #[test]
    fn test_blank_failure_uses_fallback() {
        assert_eq!(Outcome::failure("  "), Outcome::Failure(FALLBACK_ERROR_MESSAGE.to_string()));
        let api_err = SolverError::Api { status: 500, message: String::new() };
        assert_eq!(Outcome::from(api_err), Outcome::Failure(FALLBACK_ERROR_MESSAGE.to_string()));
    }

    #[test]
    fn test_api_error_keeps_server_message_only() {
        let api_err = SolverError::Api { status: 422, message: "No roots in interval".into() };
        assert_eq!(Outcome::from(api_err), Outcome::Failure("No roots in interval".into()));
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(Outcome::Failure("boom".into())).unwrap();
        assert_eq!(json, serde_json::json!({"status": "failure", "body": "boom"}));
    }
}
