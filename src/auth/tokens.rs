//! Application credentials and OAuth token state.

use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{Error, Result};

/// Application credentials registered with the Schwab developer portal.
///
/// Immutable once built; owned by the client.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    api_secret: SecretString,
    callback_url: String,
}

impl Credentials {
    /// Create credentials from the app key, app secret and registered
    /// callback URL.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
            callback_url: callback_url.into(),
        }
    }

    /// Read credentials from `SCHWAB_API_KEY`, `SCHWAB_API_SECRET` and
    /// `SCHWAB_CALLBACK_URL`.
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| {
            std::env::var(name).map_err(|_| Error::Config(format!("{} must be set", name)))
        };
        Ok(Self::new(
            var("SCHWAB_API_KEY")?,
            var("SCHWAB_API_SECRET")?,
            var("SCHWAB_CALLBACK_URL")?,
        ))
    }

    /// The app key, also used as the OAuth `client_id`.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The registered callback URL.
    pub fn callback_url(&self) -> &str {
        &self.callback_url
    }

    /// `Basic base64(key:secret)` header value for the token endpoint.
    pub(crate) fn basic_authorization(&self) -> String {
        use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

        let pair = format!("{}:{}", self.api_key, self.api_secret.expose_secret());
        format!("Basic {}", BASE64.encode(pair))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("callback_url", &self.callback_url)
            .finish()
    }
}

/// Tokens obtained from the OAuth token endpoint.
///
/// A state is only ever replaced as a whole: a failed exchange leaves the
/// previous state in place.
#[derive(Clone)]
pub struct TokenState {
    access_token: SecretString,
    refresh_token: Option<SecretString>,
    token_type: String,
    scope: String,
    expires_in: i64,
    id_token: Option<SecretString>,
    obtained_at: Option<DateTime<Utc>>,
}

impl TokenState {
    /// A state with no tokens at all.
    pub fn empty() -> Self {
        Self::from_tokens(None, None)
    }

    /// A state seeded with tokens saved from an earlier session.
    ///
    /// Expiry metadata is unknown for seeded tokens.
    pub fn from_tokens(access_token: Option<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token: SecretString::from(access_token.unwrap_or_default()),
            refresh_token: refresh_token.map(SecretString::from),
            token_type: "Bearer".to_string(),
            scope: String::new(),
            expires_in: 0,
            id_token: None,
            obtained_at: None,
        }
    }

    pub(crate) fn issued(
        access_token: String,
        refresh_token: Option<SecretString>,
        token_type: String,
        scope: String,
        expires_in: i64,
        id_token: Option<String>,
    ) -> Self {
        Self {
            access_token: SecretString::from(access_token),
            refresh_token,
            token_type,
            scope,
            expires_in,
            id_token: id_token.map(SecretString::from),
            obtained_at: Some(Utc::now()),
        }
    }

    /// The bearer credential for resource requests (may be empty).
    pub fn access_token(&self) -> &SecretString {
        &self.access_token
    }

    /// Returns `true` if an access token is present.
    pub fn has_access_token(&self) -> bool {
        !self.access_token.expose_secret().is_empty()
    }

    /// The refresh token, absent until the first exchange unless seeded.
    pub fn refresh_token(&self) -> Option<&SecretString> {
        self.refresh_token.as_ref()
    }

    /// Token type, normally `Bearer`.
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Granted scope, normally `api`.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Lifetime of the access token in seconds, 0 when unknown.
    pub fn expires_in(&self) -> i64 {
        self.expires_in
    }

    /// Opaque OpenID token.
    pub fn id_token(&self) -> Option<&SecretString> {
        self.id_token.as_ref()
    }

    /// When this state was received from the token endpoint.
    pub fn obtained_at(&self) -> Option<DateTime<Utc>> {
        self.obtained_at
    }

    /// When the access token expires, if known.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.obtained_at
            .map(|at| at + Duration::seconds(self.expires_in))
    }
}

impl Default for TokenState {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for TokenState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenState")
            .field("access_token", &"[REDACTED]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .field("expires_in", &self.expires_in)
            .field("obtained_at", &self.obtained_at)
            .finish()
    }
}

/// Shared handle to the current [`TokenState`].
///
/// The request builder reads the access token from here on every call, so
/// a refresh is picked up without rebuilding the client. Clones share the
/// same state.
#[derive(Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<TokenState>>,
}

impl TokenStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with previously obtained tokens.
    pub fn from_tokens(access_token: Option<String>, refresh_token: Option<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(TokenState::from_tokens(
                access_token,
                refresh_token,
            ))),
        }
    }

    /// A copy of the current state.
    pub async fn snapshot(&self) -> TokenState {
        self.inner.read().await.clone()
    }

    /// The current access token.
    pub async fn access_token(&self) -> SecretString {
        self.inner.read().await.access_token.clone()
    }

    /// The current refresh token, if any.
    pub async fn refresh_token(&self) -> Option<SecretString> {
        self.inner.read().await.refresh_token.clone()
    }

    /// Returns `true` if an access token is present.
    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.has_access_token()
    }

    /// Lifetime of the current access token in seconds.
    pub async fn expires_in(&self) -> i64 {
        self.inner.read().await.expires_in
    }

    /// When the current access token expires, if known.
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().await.expires_at()
    }

    /// Check if the access token will expire within the given buffer.
    ///
    /// Tokens with unknown expiry are reported as not expiring.
    pub async fn expires_within(&self, buffer: Duration) -> bool {
        match self.expires_at().await {
            Some(at) => Utc::now() + buffer >= at,
            None => false,
        }
    }

    pub(crate) async fn replace(&self, state: TokenState) {
        *self.inner.write().await = state;
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore").finish_non_exhaustive()
    }
}
