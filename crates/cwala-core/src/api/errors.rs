use std::fmt;

use serde_json::Value;

/// Categories of API failures for consistent error handling.
///
/// Client-side validation failures never reach this type; forms reject
/// invalid input before a request is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// No response received (connect failure, timeout).
    Network,
    /// The server answered with a 4xx/5xx status.
    Rejected,
    /// A 2xx body that does not decode as the expected shape.
    Parse,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Network => write!(f, "network"),
            ApiErrorKind::Rejected => write!(f, "rejected"),
            ApiErrorKind::Parse => write!(f, "parse"),
        }
    }
}

/// Structured error from the API layer with kind and details.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Error category
    pub kind: ApiErrorKind,
    /// One-line summary suitable for inline display
    pub message: String,
    /// Optional additional details (e.g., raw response body)
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Creates a network error from a transport failure.
    pub fn network(err: &reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "Request timed out".to_string()
        } else if err.is_connect() {
            "Could not connect to the server".to_string()
        } else {
            "Network error".to_string()
        };
        Self {
            kind: ApiErrorKind::Network,
            message,
            details: Some(err.to_string()),
        }
    }

    /// Creates a rejection error from a non-success status and body.
    ///
    /// Pulls a human-readable message out of `{"message": ...}` or
    /// `{"error": {"message": ...}}` bodies when present.
    pub fn rejected(status: u16, body: &str) -> Self {
        if let Some(msg) = extract_server_message(body) {
            return Self {
                kind: ApiErrorKind::Rejected,
                message: msg,
                details: Some(body.to_string()),
            };
        }
        Self {
            kind: ApiErrorKind::Rejected,
            message: format!("HTTP {}", status),
            details: if body.is_empty() {
                None
            } else {
                Some(body.to_string())
            },
        }
    }

    /// Creates a parse error for an undecodable success body.
    pub fn parse(err: impl fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: "Unexpected response from the server".to_string(),
            details: Some(err.to_string()),
        }
    }

    /// Message to show the user; network failures collapse to a generic
    /// connectivity line.
    pub fn display_message(&self) -> String {
        match self.kind {
            ApiErrorKind::Network => {
                "Unable to reach the server. Check your connection and try again.".to_string()
            }
            ApiErrorKind::Rejected | ApiErrorKind::Parse => self.message.clone(),
        }
    }
}

fn extract_server_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    if let Some(msg) = json.get("message").and_then(Value::as_str) {
        return Some(msg.to_string());
    }
    json.get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}
