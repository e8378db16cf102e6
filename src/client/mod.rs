//! HTTP client and request builder for the Schwab API.
//!
//! This module provides the main entry point [`SchwabClient`] and the
//! [`RequestDescriptor`] every service request is described by.
//!
//! # Example
//!
//! ```no_run
//! use schwab_rs::{ClientConfig, Credentials, SchwabClient};
//!
//! # async fn example() -> schwab_rs::Result<()> {
//! let client = SchwabClient::with_tokens(
//!     Credentials::from_env()?,
//!     Some("access-token".to_string()),
//!     Some("refresh-token".to_string()),
//!     ClientConfig::default(),
//! )?;
//!
//! // Get account number hashes
//! let accounts = client.accounts().account_numbers().await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod http;
mod request;

pub use config::ClientConfig;
pub use http::SchwabClient;
pub use request::{ApiBase, Method, QueryParams, RawResponse, RequestDescriptor};
pub(crate) use http::ClientInner;
pub(crate) use request::path_segment;
