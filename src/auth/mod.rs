//! Authentication and token management for the Schwab API.
//!
//! Schwab uses the OAuth2 authorization-code flow:
//!
//! 1. Send the user to [`OAuthService::authorize_url`] to grant access.
//! 2. The browser is redirected to the registered callback URL with a
//!    one-time `code`; [`AuthorizationCallback::parse`] extracts it.
//! 3. [`OAuthService::exchange_authorization_code`] trades the code for an
//!    access token and a refresh token.
//! 4. [`OAuthService::refresh_access_token`] trades the refresh token for a
//!    new access token when the old one lapses.
//!
//! Tokens live in a [`TokenStore`] shared by every service of a client, so
//! a refreshed token is used by the very next request. The crate never
//! starts either exchange on its own.
//!
//! ```no_run
//! use schwab_rs::{ClientConfig, Credentials, SchwabClient};
//!
//! # async fn example() -> schwab_rs::Result<()> {
//! let client = SchwabClient::new(
//!     Credentials::new("app-key", "app-secret", "https://127.0.0.1/callback"),
//!     ClientConfig::default(),
//! )?;
//!
//! client.oauth().exchange_authorization_code("code", None).await?;
//! assert!(client.tokens().is_authenticated().await);
//! # Ok(())
//! # }
//! ```
//!
//! A rejected exchange surfaces as [`Error::ProviderToken`](crate::Error::ProviderToken)
//! carrying a decoded [`ProviderError`].

mod oauth;
mod provider_error;
mod tokens;

pub use oauth::{AuthorizationCallback, OAuthService};
pub use provider_error::{ErrorDetail, ErrorEnvelope, MalformedProviderError, ProviderError, StatusLine};
pub use tokens::{Credentials, TokenState, TokenStore};
