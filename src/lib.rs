//! # schwab-rs
//!
//! An async Rust client for the Charles Schwab trader and market-data APIs.
//!
//! ## Features
//!
//! - **Authentication**: OAuth2 authorization-code and refresh-token exchanges,
//!   with token-endpoint errors decoded into a structured [`ProviderError`](auth::ProviderError)
//! - **Accounts and orders**: account hashes, balances, positions, order
//!   history and a market equity order template
//! - **Market data**: quotes, instruments, movers, option chains, price
//!   history and market hours
//! - **Validation**: enumerated parameters are checked against canonical
//!   tables before any request is sent
//! - **Async-first**: built on Tokio and reqwest
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use schwab_rs::{ClientConfig, Credentials, SchwabClient};
//!
//! #[tokio::main]
//! async fn main() -> schwab_rs::Result<()> {
//!     let client = SchwabClient::new(Credentials::from_env()?, ClientConfig::default())?;
//!
//!     // 1. Send the user to the consent page
//!     println!("Open {}", client.oauth().authorize_url());
//!
//!     // 2. Exchange the code from the callback URL
//!     client.oauth().exchange_authorization_code("code", None).await?;
//!
//!     // 3. Call resource endpoints
//!     let accounts = client.accounts().account_numbers().await?;
//!     println!("Found {} accounts", accounts.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Market Data
//!
//! ```rust,no_run
//! use schwab_rs::api::{MarketOpenQuery, PriceHistoryQuery};
//!
//! # async fn example(client: schwab_rs::SchwabClient) -> schwab_rs::Result<()> {
//! let next_open = client
//!     .market_hours()
//!     .next_open_date(&MarketOpenQuery::new("equity").with_sub_market("EQ"))
//!     .await?;
//!
//! let query = PriceHistoryQuery {
//!     period_type: Some("day".to_string()),
//!     ..PriceHistoryQuery::new("AAPL")
//! };
//! let candles = client.price_history().get(&query).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Order Placement
//!
//! ```rust,no_run
//! use schwab_rs::AccountHash;
//!
//! # async fn example(client: schwab_rs::SchwabClient) -> schwab_rs::Result<()> {
//! let account = AccountHash::new("E5B3F1A2...");
//! let placed = client.orders().buy_market(&account, "AAPL", 5).await?;
//! println!("Order placed: {:?}", placed.order_id);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use error::{Error, Result};
pub use models::{AccountHash, Endpoints, OrderId};
pub use client::{ClientConfig, SchwabClient};
pub use auth::{Credentials, TokenStore};

/// Prelude module for convenient imports.
///
/// ```rust
/// use schwab_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        // Primitives
        AccountHash, OrderId, Endpoints,
        // Order payloads
        EquityOrder, PlacedOrder, Instruction, AssetType,
        // Account models
        AccountNumberHash, EquityPosition, Position,
        // Market hours
        MarketHours, MarketSession, SessionInterval,
    };
    pub use crate::api::{MarketOpenQuery, OptionChainQuery, OrdersQuery, PriceHistoryQuery};
    pub use crate::auth::{AuthorizationCallback, Credentials, ProviderError, TokenState, TokenStore};
    pub use crate::client::{ApiBase, ClientConfig, QueryParams, RequestDescriptor, SchwabClient};
}
