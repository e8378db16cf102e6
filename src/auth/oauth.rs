//! OAuth2 authorization-code and refresh-token exchanges.

use std::sync::Arc;

use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use crate::client::ClientInner;
use crate::{Error, Result};

use super::provider_error::ProviderError;
use super::tokens::TokenState;

/// Service for the OAuth2 token lifecycle.
///
/// Both exchanges POST a form to the token endpoint with
/// `Authorization: Basic base64(key:secret)`. A successful exchange
/// replaces the shared token state as a whole; a rejected one leaves it
/// untouched and returns [`Error::ProviderToken`].
///
/// # Example
///
/// ```no_run
/// use schwab_rs::auth::AuthorizationCallback;
///
/// # async fn example(client: schwab_rs::SchwabClient) -> schwab_rs::Result<()> {
/// // Send the user here, then read the URL the browser was redirected to
/// println!("{}", client.oauth().authorize_url());
///
/// let callback = AuthorizationCallback::parse(
///     "https://127.0.0.1/callback?code=C0.abc%40&session=5f1e",
/// )?;
/// let tokens = client.oauth().exchange_authorization_code(&callback.code, None).await?;
/// println!("Access token expires in {}s", tokens.expires_in());
///
/// // Later, before the access token lapses
/// client.oauth().refresh_access_token().await?;
/// # Ok(())
/// # }
/// ```
pub struct OAuthService {
    inner: Arc<ClientInner>,
}

/// Token endpoint success body.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    expires_in: i64,
    #[serde(default = "default_token_type")]
    token_type: String,
    #[serde(default)]
    scope: String,
    #[serde(default)]
    refresh_token: Option<String>,
    access_token: String,
    #[serde(default)]
    id_token: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl OAuthService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// URL the user must open in a browser to grant access.
    ///
    /// The library only builds this string; it never calls it.
    pub fn authorize_url(&self) -> String {
        let credentials = &self.inner.credentials;
        format!(
            "{}?client_id={}&redirect_uri={}",
            self.inner.config.endpoints.authorize_url(),
            urlencoding::encode(credentials.api_key()),
            urlencoding::encode(credentials.callback_url()),
        )
    }

    /// Exchange an authorization code for tokens.
    ///
    /// `redirect_uri` defaults to the registered callback URL.
    ///
    /// # Errors
    ///
    /// [`Error::ProviderToken`] if the token endpoint rejects the code, in
    /// which case the stored tokens are unchanged.
    pub async fn exchange_authorization_code(
        &self,
        code: &str,
        redirect_uri: Option<&str>,
    ) -> Result<TokenState> {
        let redirect_uri = redirect_uri.unwrap_or_else(|| self.inner.credentials.callback_url());
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ];

        let response = self.token_request(&form).await?;
        // Codes are single use; a fresh refresh token always accompanies them.
        self.store(response, None).await
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// # Errors
    ///
    /// [`Error::MissingRefreshToken`] without any network call if no
    /// refresh token is stored; [`Error::ProviderToken`] if the token
    /// endpoint rejects it.
    pub async fn refresh_access_token(&self) -> Result<TokenState> {
        let refresh_token = self
            .inner
            .tokens
            .refresh_token()
            .await
            .filter(|t| !t.expose_secret().is_empty())
            .ok_or(Error::MissingRefreshToken)?;

        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token.expose_secret()),
        ];

        let response = self.token_request(&form).await?;
        self.store(response, Some(refresh_token)).await
    }

    async fn token_request(&self, form: &[(&str, &str)]) -> Result<TokenResponse> {
        let url = self.inner.config.endpoints.token_url();
        let grant_type = form
            .iter()
            .find(|(k, _)| *k == "grant_type")
            .map(|(_, v)| *v)
            .unwrap_or_default();

        let mut basic = HeaderValue::from_str(&self.inner.credentials.basic_authorization())
            .map_err(|_| Error::Config("API key or secret is not a valid header value".to_string()))?;
        basic.set_sensitive(true);

        debug!(url = %url, grant_type, "requesting token");

        let response = self
            .inner
            .http
            .post(&url)
            .header(AUTHORIZATION, basic)
            .header(ACCEPT, "application/json")
            .form(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let err = ProviderError::from_response(status.as_u16(), &body);
            tracing::warn!(
                status = status.as_u16(),
                tag = %err.tag,
                grant_type,
                "token exchange rejected"
            );
            return Err(err.into());
        }

        let token_response: TokenResponse = serde_json::from_str(&body)?;
        info!(
            grant_type,
            expires_in = token_response.expires_in,
            "token exchange succeeded"
        );
        Ok(token_response)
    }

    async fn store(
        &self,
        response: TokenResponse,
        previous_refresh: Option<SecretString>,
    ) -> Result<TokenState> {
        let refresh_token = response
            .refresh_token
            .map(SecretString::from)
            .or(previous_refresh);

        let state = TokenState::issued(
            response.access_token,
            refresh_token,
            response.token_type,
            response.scope,
            response.expires_in,
            response.id_token,
        );
        self.inner.tokens.replace(state.clone()).await;
        Ok(state)
    }
}

/// Query values the provider appends to the callback URL after consent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationCallback {
    /// The one-time authorization code, percent-decoded
    pub code: String,
    /// The provider's session id, if present
    pub session: Option<String>,
}

impl AuthorizationCallback {
    /// Read `code` and `session` from the URL the browser was redirected to.
    pub fn parse(callback_url: &str) -> Result<Self> {
        let url = Url::parse(callback_url)?;
        let mut code = None;
        let mut session = None;

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "code" => code = Some(value.into_owned()),
                "session" => session = Some(value.into_owned()),
                _ => {}
            }
        }

        let code = code
            .filter(|c| !c.is_empty())
            .ok_or_else(|| Error::InvalidInput("callback URL has no 'code' parameter".to_string()))?;

        Ok(Self { code, session })
    }
}
