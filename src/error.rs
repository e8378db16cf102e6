//! Error types for the Schwab API client.
//!
//! Every failure surfaces to the immediate caller with structured detail.
//! Nothing in this crate retries on its own.

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

use crate::auth::ProviderError;

/// A specialized `Result` type for Schwab operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all Schwab API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed before a response was received
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A resource endpoint returned a non-2xx response
    #[error("API error: status={status}, code={code:?}, message={message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Optional error code from the API
        code: Option<String>,
        /// Human-readable error message
        message: String,
        /// Raw response body for debugging
        body: Value,
    },

    /// The token endpoint rejected an exchange
    #[error("Token exchange rejected: {0}")]
    ProviderToken(ProviderError),

    /// The access token was rejected by a resource endpoint (401)
    #[error("Access token rejected; refresh required")]
    SessionExpired,

    /// No access token is available for a bearer-authenticated request
    #[error("No access token; complete the authorization code exchange first")]
    NotAuthenticated,

    /// A refresh was requested but no refresh token is stored
    #[error("Cannot refresh the access token: no refresh token is stored")]
    MissingRefreshToken,

    /// A value fell outside its enumerated set
    #[error("Invalid {parameter} '{value}'; valid values are: {allowed}")]
    InvalidParameter {
        /// Name of the offending parameter
        parameter: &'static str,
        /// The value supplied by the caller (after case normalization)
        value: String,
        /// The full valid set, comma separated
        allowed: String,
    },

    /// Parameters were individually valid but inconsistent together
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The market-open search used its whole attempt budget
    #[error("No open session for market '{market}' within {attempts} days of {start}")]
    MarketNeverOpened {
        /// Market identifier that was searched
        market: String,
        /// First date queried
        start: NaiveDate,
        /// Number of queries issued
        attempts: u32,
    },

    /// The requested sub-market is absent from an open market's hours
    #[error("Market '{market}' has no sub-market '{sub_market}' (available: {available})")]
    UnknownSubMarket {
        /// Market identifier
        market: String,
        /// Sub-market identifier requested by the caller
        sub_market: String,
        /// Sub-markets present in the response, comma separated
        available: String,
    },

    /// Rate limited by the API
    #[error("Rate limited; retry after {retry_after_secs} seconds")]
    RateLimited {
        /// Number of seconds to wait before retrying
        retry_after_secs: u64,
    },

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ProviderError> for Error {
    fn from(err: ProviderError) -> Self {
        Error::ProviderToken(err)
    }
}

impl Error {
    /// Returns `true` if the caller supplied input that was rejected before
    /// any request was sent.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidParameter { .. } | Error::InvalidInput(_)
        )
    }

    /// Returns `true` if the HTTP exchange itself failed or a resource
    /// endpoint answered with a non-2xx status.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            Error::Http(_)
                | Error::Api { .. }
                | Error::SessionExpired
                | Error::RateLimited { .. }
                | Error::NotFound(_)
        )
    }

    /// Returns `true` if this is an authentication-related error.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Error::ProviderToken(_)
                | Error::SessionExpired
                | Error::NotAuthenticated
                | Error::MissingRefreshToken
        )
    }

    /// Returns `true` if this error indicates a client-side issue
    /// (invalid input, bad request, etc.).
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 400 && *status < 500,
            Error::ProviderToken(e) => e.http_status >= 400 && e.http_status < 500,
            Error::InvalidParameter { .. }
            | Error::InvalidInput(_)
            | Error::UnknownSubMarket { .. }
            | Error::Config(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 500,
            Error::ProviderToken(e) => e.http_status >= 500,
            _ => false,
        }
    }

    pub(crate) fn invalid_parameter(
        parameter: &'static str,
        value: impl Into<String>,
        allowed: &[impl ToString],
    ) -> Self {
        Error::InvalidParameter {
            parameter,
            value: value.into(),
            allowed: allowed
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Create an API error from a resource endpoint response.
    ///
    /// The trader API answers `{"message": ..., "errors": [...]}`; the
    /// market-data API answers `{"errors": [{"id", "status", "title", "detail"}]}`.
    pub(crate) fn from_api_response(status: u16, body: Value) -> Self {
        let first = body.get("errors").and_then(|e| e.get(0));

        let code = first
            .and_then(|e| e.get("title").or_else(|| e.get("id")))
            .and_then(|c| c.as_str())
            .map(String::from);

        let message = body
            .get("message")
            .and_then(|m| m.as_str())
            .or_else(|| first.and_then(|e| e.get("detail")).and_then(|d| d.as_str()))
            .or_else(|| first.and_then(|e| e.as_str()))
            .unwrap_or("Unknown API error")
            .to_string();

        Error::Api {
            status,
            code,
            message,
            body,
        }
    }
}
