//! Decoding of token-endpoint error bodies.
//!
//! The token endpoint wraps its real error inside the description of an
//! outer OAuth error object:
//!
//! ```text
//! {"error":"unsupported_token_type",
//!  "error_description":"400 Bad Request: \"{\"error_description\":\"...\",\"error\":\"invalid_request\"}\""}
//! ```
//!
//! Decoding happens in two stages. [`ErrorEnvelope`] reads the outer object,
//! then [`ErrorDetail`] splits its description into a [`StatusLine`] and the
//! inner JSON document.

use serde::Deserialize;
use thiserror::Error;

/// Why a provider error body could not be fully decoded.
#[derive(Debug, Error)]
pub enum MalformedProviderError {
    /// The body (or the embedded fragment) is not the expected JSON object
    #[error("not a JSON error object: {0}")]
    Json(#[from] serde_json::Error),

    /// The description has no `:` separating the status line from the detail
    #[error("no ':' separator in '{0}'")]
    MissingSeparator(String),

    /// The text before the first `:` is not `<3-digit code> <reason>`
    #[error("'{0}' is not a '<code> <reason>' status line")]
    BadStatusLine(String),
}

/// Outer OAuth error object returned by the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorEnvelope {
    /// OAuth error label, e.g. `unsupported_token_type`
    pub error: String,
    /// Description, which embeds the status line and the inner error
    #[serde(default)]
    pub error_description: String,
}

impl ErrorEnvelope {
    /// Decode the outer error object from a raw response body.
    pub fn parse(body: &str) -> Result<Self, MalformedProviderError> {
        Ok(serde_json::from_str(body)?)
    }
}

/// The `<code> <reason phrase>` prefix of an envelope description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    /// HTTP-style status code, e.g. 400
    pub code: u16,
    /// Reason phrase, e.g. `Bad Request`
    pub name: String,
}

impl StatusLine {
    /// Parse `"400 Bad Request"`.
    pub fn parse(text: &str) -> Result<Self, MalformedProviderError> {
        let bad = || MalformedProviderError::BadStatusLine(text.to_string());
        let text = text.trim();
        let (code, name) = text.split_once(' ').ok_or_else(bad)?;

        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }

        Ok(Self {
            code: code.parse().map_err(|_| bad())?,
            name: name.trim().to_string(),
        })
    }
}

/// The error carried inside an envelope description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    /// Status line preceding the first `:`
    pub status: StatusLine,
    /// Machine-readable tag, e.g. `invalid_request`
    pub tag: String,
    /// Human-readable description, trimmed
    pub description: String,
}

#[derive(Deserialize)]
struct InnerError {
    #[serde(default)]
    error: String,
    #[serde(default)]
    error_description: String,
}

impl ErrorDetail {
    /// Parse an envelope description such as
    /// `400 Bad Request: "{"error_description":"...","error":"invalid_request"}"`.
    ///
    /// Only the first `:` separates the status line; the inner message may
    /// contain more.
    pub fn parse(description: &str) -> Result<Self, MalformedProviderError> {
        let (head, tail) = description
            .split_once(':')
            .ok_or_else(|| MalformedProviderError::MissingSeparator(description.to_string()))?;

        let status = StatusLine::parse(head)?;
        let fragment = tail.trim().trim_matches('"');
        let inner: InnerError = serde_json::from_str(fragment)?;

        Ok(Self {
            status,
            tag: inner.error.trim().to_string(),
            description: inner.error_description.trim().to_string(),
        })
    }
}

/// A decoded token-endpoint failure.
///
/// Built by [`ProviderError::from_response`], which never fails: when the
/// body does not follow the nested layout, the fields fall back to the HTTP
/// status and whatever the outer object provided, and `raw_body` always
/// keeps the original text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code} {name}: {tag}: {description}")]
pub struct ProviderError {
    /// Status of the HTTP response itself
    pub http_status: u16,
    /// Status code reported inside the description
    pub code: u16,
    /// Reason phrase reported inside the description
    pub name: String,
    /// Outer OAuth error label
    pub label: String,
    /// Inner machine-readable error tag
    pub tag: String,
    /// Inner human-readable description
    pub description: String,
    /// Body exactly as received
    pub raw_body: String,
}

impl ProviderError {
    /// Decode a non-2xx token-endpoint response.
    pub fn from_response(http_status: u16, body: &str) -> Self {
        let fallback_name = reqwest::StatusCode::from_u16(http_status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown")
            .to_string();

        let envelope = match ErrorEnvelope::parse(body) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::debug!("Token error body is not an OAuth error object: {}", e);
                return Self {
                    http_status,
                    code: http_status,
                    name: fallback_name,
                    label: String::new(),
                    tag: String::new(),
                    description: body.trim().to_string(),
                    raw_body: body.to_string(),
                };
            }
        };

        match ErrorDetail::parse(&envelope.error_description) {
            Ok(detail) => Self {
                http_status,
                code: detail.status.code,
                name: detail.status.name,
                label: envelope.error,
                tag: detail.tag,
                description: detail.description,
                raw_body: body.to_string(),
            },
            Err(e) => {
                tracing::debug!("Token error description has no nested detail: {}", e);
                Self {
                    http_status,
                    code: http_status,
                    name: fallback_name,
                    tag: envelope.error.clone(),
                    label: envelope.error,
                    description: envelope.error_description.trim().to_string(),
                    raw_body: body.to_string(),
                }
            }
        }
    }
}
