//! Market hours models.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Market hours keyed by market id, then by product (sub-market) id.
///
/// On a day the whole market is closed the provider returns a single
/// product named after the market itself:
///
/// ```text
/// {"equity": {"equity": {"date": "2024-11-16", "isOpen": false, ...}}}
/// ```
///
/// On a trading day the products are the sub-markets, e.g. `EQ` for equity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketHours(pub HashMap<String, HashMap<String, MarketSession>>);

impl MarketHours {
    /// All products reported for a market.
    pub fn products(&self, market: &str) -> Option<&HashMap<String, MarketSession>> {
        self.0.get(market)
    }

    /// A single product of a market.
    pub fn session(&self, market: &str, product: &str) -> Option<&MarketSession> {
        self.products(market).and_then(|p| p.get(product))
    }

    /// Returns `true` when the response is the whole-market closed marker.
    pub fn is_market_closed(&self, market: &str) -> bool {
        self.session(market, market).is_some()
    }

    /// Returns `true` when any product of the market is open.
    pub fn any_open(&self, market: &str) -> bool {
        self.products(market)
            .map(|p| p.values().any(|s| s.is_open))
            .unwrap_or(false)
    }

    /// Product ids reported for a market, sorted.
    pub fn product_ids(&self, market: &str) -> Vec<String> {
        let mut ids: Vec<String> = self
            .products(market)
            .map(|p| p.keys().cloned().collect())
            .unwrap_or_default();
        ids.sort();
        ids
    }
}

/// Hours of one product on one date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSession {
    /// Trading date
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Market type, e.g. `EQUITY`
    #[serde(default)]
    pub market_type: Option<String>,
    /// Exchange name
    #[serde(default)]
    pub exchange: Option<String>,
    /// Category
    #[serde(default)]
    pub category: Option<String>,
    /// Product id
    #[serde(default)]
    pub product: Option<String>,
    /// Product display name
    #[serde(default)]
    pub product_name: Option<String>,
    /// Whether the product trades on this date
    #[serde(default)]
    pub is_open: bool,
    /// Session windows keyed by `preMarket`, `regularMarket`, `postMarket`
    #[serde(default)]
    pub session_hours: Option<BTreeMap<String, Vec<SessionInterval>>>,
}

/// A trading window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInterval {
    /// Window start, in exchange local time
    pub start: DateTime<FixedOffset>,
    /// Window end, in exchange local time
    pub end: DateTime<FixedOffset>,
}
