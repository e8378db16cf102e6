//! HTTP client implementation for the Schwab API.

use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, LOCATION, RETRY_AFTER};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::api::{
    AccountsService, InstrumentsService, MarketHoursService, MoversService, OptionChainsService,
    OrdersService, PriceHistoryService, QuotesService, UserPreferenceService,
};
use crate::auth::{Credentials, OAuthService, TokenStore};
use crate::{Error, Result};

use super::config::ClientConfig;
use super::request::{Method, RawResponse, RequestDescriptor};

/// The main client for interacting with the Schwab API.
///
/// This client provides access to all API services through method calls
/// that return service structs. Every service shares the same
/// [`TokenStore`]: the OAuth service writes it, resource requests read the
/// access token from it on every call.
///
/// The client never starts the OAuth flow on its own. A resource request
/// made before any access token is available fails with
/// [`Error::NotAuthenticated`].
///
/// # Example
///
/// ```no_run
/// use schwab_rs::{ClientConfig, Credentials, SchwabClient};
///
/// # async fn example() -> schwab_rs::Result<()> {
/// let client = SchwabClient::new(Credentials::from_env()?, ClientConfig::default())?;
///
/// println!("Visit {}", client.oauth().authorize_url());
/// client.oauth().exchange_authorization_code("code-from-callback", None).await?;
///
/// let accounts = client.accounts().account_numbers().await?;
/// # Ok(())
/// # }
/// ```
pub struct SchwabClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) credentials: Credentials,
    pub(crate) tokens: TokenStore,
    pub(crate) config: ClientConfig,
}

impl SchwabClient {
    /// Create a client with no tokens.
    ///
    /// Complete the authorization code exchange before calling resource
    /// endpoints.
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        Self::with_token_store(credentials, TokenStore::new(), config)
    }

    /// Create a client from tokens obtained in an earlier session.
    pub fn with_tokens(
        credentials: Credentials,
        access_token: Option<String>,
        refresh_token: Option<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        Self::with_token_store(
            credentials,
            TokenStore::from_tokens(access_token, refresh_token),
            config,
        )
    }

    /// Create a client around an existing token store.
    ///
    /// The store is shared, not copied: tokens written through this client
    /// are visible to every other holder of the handle.
    pub fn with_token_store(
        credentials: Credentials,
        tokens: TokenStore,
        config: ClientConfig,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                credentials,
                tokens,
                config,
            }),
        })
    }

    /// Create a client from credentials in the environment and the default
    /// configuration.
    pub fn from_env() -> Result<Self> {
        Self::new(Credentials::from_env()?, ClientConfig::default())
    }

    /// Get the OAuth token lifecycle service.
    pub fn oauth(&self) -> OAuthService {
        OAuthService::new(self.inner.clone())
    }

    /// Get the accounts service.
    pub fn accounts(&self) -> AccountsService {
        AccountsService::new(self.inner.clone())
    }

    /// Get the orders service.
    pub fn orders(&self) -> OrdersService {
        OrdersService::new(self.inner.clone())
    }

    /// Get the user preference service.
    pub fn user_preference(&self) -> UserPreferenceService {
        UserPreferenceService::new(self.inner.clone())
    }

    /// Get the quotes service.
    pub fn quotes(&self) -> QuotesService {
        QuotesService::new(self.inner.clone())
    }

    /// Get the instruments service.
    pub fn instruments(&self) -> InstrumentsService {
        InstrumentsService::new(self.inner.clone())
    }

    /// Get the movers service.
    pub fn movers(&self) -> MoversService {
        MoversService::new(self.inner.clone())
    }

    /// Get the option chains service.
    pub fn option_chains(&self) -> OptionChainsService {
        OptionChainsService::new(self.inner.clone())
    }

    /// Get the price history service.
    pub fn price_history(&self) -> PriceHistoryService {
        PriceHistoryService::new(self.inner.clone())
    }

    /// Get the market hours service.
    pub fn market_hours(&self) -> MarketHoursService {
        MarketHoursService::new(self.inner.clone())
    }

    /// Get the shared token store.
    pub fn tokens(&self) -> &TokenStore {
        &self.inner.tokens
    }

    /// Get the application credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.inner.credentials
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Send an arbitrary resource request.
    ///
    /// The typed services are built on this; use it for endpoints they do
    /// not cover.
    pub async fn request(&self, desc: RequestDescriptor) -> Result<RawResponse> {
        self.inner.request(desc).await
    }
}

impl ClientInner {
    /// Build the bearer header from the token store as it is right now.
    async fn bearer_header(&self) -> Result<HeaderValue> {
        let token = self.tokens.access_token().await;
        if token.expose_secret().is_empty() {
            return Err(Error::NotAuthenticated);
        }

        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|_| Error::InvalidInput("Invalid token format".to_string()))?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Dispatch a resource request.
    pub(crate) async fn request(&self, desc: RequestDescriptor) -> Result<RawResponse> {
        let bearer = self.bearer_header().await?;
        let url = desc.url(&self.config.endpoints);

        debug!(method = %desc.method, url = %url, "dispatching request");

        let builder = match desc.method {
            Method::Get => self.http.get(&url),
            Method::Post => {
                let builder = self.http.post(&url);
                match desc.body {
                    Some(ref body) => builder.json(body),
                    None => builder,
                }
            }
        };

        let response = builder
            .header(AUTHORIZATION, bearer)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        self.handle_response(response, &url).await
    }

    /// Dispatch a request and decode the body into `T`.
    pub(crate) async fn request_json<T: DeserializeOwned>(
        &self,
        desc: RequestDescriptor,
    ) -> Result<T> {
        let raw = self.request(desc).await?;
        Ok(serde_json::from_value(raw.body)?)
    }

    /// Handle a resource response.
    async fn handle_response(&self, response: reqwest::Response, url: &str) -> Result<RawResponse> {
        let status = response.status();
        let status_code = status.as_u16();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        let text = response.text().await?;

        if status.is_success() {
            let body = if text.trim().is_empty() {
                Value::Null
            } else {
                serde_json::from_str(&text)?
            };
            return Ok(RawResponse {
                status: status_code,
                body,
                location,
            });
        }

        warn!(status = status_code, url = %url, "request failed");

        let body: Value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        match status_code {
            401 => Err(Error::SessionExpired),
            404 => {
                let message = body
                    .get("message")
                    .and_then(|m| m.as_str())
                    .unwrap_or(url)
                    .to_string();
                Err(Error::NotFound(message))
            }
            429 => Err(Error::RateLimited {
                retry_after_secs: retry_after.unwrap_or(60),
            }),
            _ => Err(Error::from_api_response(status_code, body)),
        }
    }
}

impl Clone for SchwabClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for SchwabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchwabClient")
            .field("credentials", &self.inner.credentials)
            .field("config", &self.inner.config)
            .finish()
    }
}
