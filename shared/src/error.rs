use serde_json::Value;
use thiserror::Error;

use crate::forms::FormError;

/// Failure category of a backend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The request never produced an HTTP response
    Network,
    /// Rejected client-side before reaching the network
    Validation,
    /// The backend answered with a non-2xx status
    Rejected { status: u16 },
    /// A 2xx body did not match the expected schema
    Decode,
}

/// Error surfaced to forms. `Display` is the display-ready message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    kind: ApiErrorKind,
    message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Validation, message)
    }

    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Rejected { status }, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Decode, message)
    }

    /// Build the rejection for a non-2xx response, preferring the body's
    /// `message`, then its `error`, then `fallback`.
    pub fn from_response(status: u16, body: &str, fallback: &str) -> Self {
        let message = extract_message(body).unwrap_or_else(|| fallback.to_string());
        Self::rejected(status, message)
    }

    pub fn kind(&self) -> &ApiErrorKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> Option<u16> {
        match self.kind {
            ApiErrorKind::Rejected { status } => Some(status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.kind, ApiErrorKind::Rejected { status: 401 })
    }
}

impl From<FormError> for ApiError {
    fn from(error: FormError) -> Self {
        Self::validation(error.to_string())
    }
}

/// Pull a human-readable message out of an error body, if it has one
pub fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error"].iter().find_map(|field| {
        value
            .get(field)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    })
}
