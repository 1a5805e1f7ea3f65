use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use crate::api::{AskRequest, AskResponse, ErrorResponse, SuggestionsResponse};

/// Errors produced while talking to the question-answering backend.
#[derive(Debug)]
pub enum AskError {
    /// The backend answered with a non-success status and a decodable body.
    Rejected {
        status: StatusCode,
        /// Server-supplied `error` text, if any.
        error: Option<String>,
    },
    /// No response was received (connection refused, timeout, reset).
    Transport(reqwest::Error),
    /// A response arrived but its body was not the expected JSON.
    Decode(String),
}

impl AskError {
    /// True when the failure should be reported as a connectivity problem
    /// rather than a server-reported error.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, AskError::Transport(_) | AskError::Decode(_))
    }
}

impl fmt::Display for AskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AskError::Rejected { status, error } => match error {
                Some(error) => write!(f, "backend returned {status}: {error}"),
                None => write!(f, "backend returned {status}"),
            },
            AskError::Transport(err) => write!(f, "request failed: {err}"),
            AskError::Decode(msg) => write!(f, "unexpected response body: {msg}"),
        }
    }
}

impl std::error::Error for AskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AskError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    Ask,
    Suggestions,
}

impl Endpoint {
    fn path(self) -> &'static str {
        match self {
            Endpoint::Ask => "ask",
            Endpoint::Suggestions => "suggestions",
        }
    }

    /// Full URL under `base_url`, which may carry a path prefix and
    /// trailing slashes.
    fn url(self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.path())
    }
}

/// The two calls the chat controller needs from a backend.
#[async_trait]
pub trait QaBackend: Send + Sync {
    async fn ask(&self, question: &str) -> Result<AskResponse, AskError>;
    async fn fetch_suggestions(&self) -> Result<Vec<String>, AskError>;
}

#[derive(Clone, Debug)]
pub struct QaClient {
    client: reqwest::Client,
    base_url: String,
}

impl QaClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AskError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AskError::Transport)?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl QaBackend for QaClient {
    async fn ask(&self, question: &str) -> Result<AskResponse, AskError> {
        let url = Endpoint::Ask.url(&self.base_url);
        debug!(%url, "Submitting question");

        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(&AskRequest {
                question: question.to_string(),
            })
            .send()
            .await
            .map_err(AskError::Transport)?;

        let status = response.status();
        let body = response.bytes().await.map_err(AskError::Transport)?;

        if !status.is_success() {
            let parsed: ErrorResponse = serde_json::from_slice(&body)
                .map_err(|err| AskError::Decode(err.to_string()))?;
            return Err(AskError::Rejected {
                status,
                error: parsed.error.filter(|text| !text.is_empty()),
            });
        }

        serde_json::from_slice::<AskResponse>(&body).map_err(|err| AskError::Decode(err.to_string()))
    }

    async fn fetch_suggestions(&self) -> Result<Vec<String>, AskError> {
        let url = Endpoint::Suggestions.url(&self.base_url);
        debug!(%url, "Loading suggestions");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(AskError::Transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(AskError::Transport)?;

        // Any decodable body is used, whatever the status
        let parsed: SuggestionsResponse =
            serde_json::from_slice(&body).map_err(|err| AskError::Decode(err.to_string()))?;
        if !status.is_success() {
            debug!(%status, "Suggestions returned a non-success status");
        }
        Ok(parsed.suggestions.unwrap_or_default())
    }
}
