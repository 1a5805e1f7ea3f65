use serde::{Deserialize, Serialize};

pub mod client;

pub use client::{AskError, QaBackend, QaClient};

/// Value the backend reports in `source` when it could not match a question.
pub const FALLBACK_SOURCE: &str = "fallback";

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AskResponse {
    pub answer: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub suggestions: Option<Vec<String>>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub contact_info: Option<ContactInfo>,
}

impl AskResponse {
    pub fn is_fallback(&self) -> bool {
        self.source.as_deref() == Some(FALLBACK_SOURCE)
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ContactInfo {
    #[serde(default)]
    pub admission_office: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub office_hours: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct SuggestionsResponse {
    #[serde(default)]
    pub suggestions: Option<Vec<String>>,
}
