//! Primitive types and newtypes for type-safe API interactions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The opaque hash that stands in for an account number.
///
/// Every account-scoped request addresses the account by this value, as
/// returned by `accounts().account_numbers()`.
///
/// # Example
///
/// ```
/// use schwab_rs::AccountHash;
///
/// let account = AccountHash::new("E49D5746FD010E582E364C28E9D6A763");
/// println!("Account: {}", account);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountHash(String);

impl AccountHash {
    /// Create a new account hash from a string.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the hash as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for AccountHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for AccountHash {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AccountHash {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A strongly-typed order ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Create a new order ID.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the order ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for OrderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// Production API host.
pub const DEFAULT_HOST: &str = "https://api.schwabapi.com";

/// Base URLs for the OAuth, trader and market-data APIs.
///
/// All three hang off a single host, which can be pointed at a proxy or a
/// mock server.
///
/// # Example
///
/// ```
/// use schwab_rs::Endpoints;
///
/// let endpoints = Endpoints::default();
/// assert_eq!(endpoints.trader_base(), "https://api.schwabapi.com/trader/v1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    host: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_HOST)
    }
}

impl Endpoints {
    /// Endpoints rooted at the given host, e.g. `https://api.schwabapi.com`.
    pub fn new(host: impl Into<String>) -> Self {
        let host: String = host.into();
        Self {
            host: host.trim_end_matches('/').to_string(),
        }
    }

    /// The host all endpoints hang off.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Browser authorization endpoint.
    pub fn authorize_url(&self) -> String {
        format!("{}/v1/oauth/authorize", self.host)
    }

    /// Token endpoint for code and refresh exchanges.
    pub fn token_url(&self) -> String {
        format!("{}/v1/oauth/token", self.host)
    }

    /// Base for accounts, orders and user preferences.
    pub fn trader_base(&self) -> String {
        format!("{}/trader/v1", self.host)
    }

    /// Base for quotes, instruments, movers, chains, price history and
    /// market hours.
    pub fn market_data_base(&self) -> String {
        format!("{}/marketdata/v1", self.host)
    }
}
