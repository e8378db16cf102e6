//! Instruments service for symbol search and CUSIP lookup.

use std::sync::Arc;

use serde_json::Value;

use crate::client::{path_segment, ApiBase, ClientInner, QueryParams, RequestDescriptor};
use crate::models::reference::PROJECTIONS;
use crate::{Error, Result};

/// Service for instrument lookups.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: schwab_rs::SchwabClient) -> schwab_rs::Result<()> {
/// // Fundamentals for a ticker
/// let found = client.instruments().search("AAPL", "fundamental").await?;
///
/// // Ticker to CUSIP and back
/// let cusip = client.instruments().cusip_for_ticker("AAPL").await?;
/// let instrument = client.instruments().by_cusip(&cusip).await?;
/// # Ok(())
/// # }
/// ```
pub struct InstrumentsService {
    inner: Arc<ClientInner>,
}

impl InstrumentsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Search instruments.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Symbol, description or pattern, depending on the projection
    /// * `projection` - One of [`PROJECTIONS`], e.g. `symbol-search`
    pub async fn search(&self, symbol: &str, projection: &str) -> Result<Value> {
        let projection = PROJECTIONS.validate(projection)?;
        if symbol.trim().is_empty() {
            return Err(Error::InvalidInput("instrument symbol is empty".to_string()));
        }

        let mut query = QueryParams::new();
        query.insert("symbol", symbol.trim()).insert("projection", projection);

        let desc = RequestDescriptor::get(ApiBase::MarketData, "/instruments").with_query(query);
        self.inner.request_json(desc).await
    }

    /// Get an instrument by CUSIP.
    pub async fn by_cusip(&self, cusip: &str) -> Result<Value> {
        let cusip = cusip.trim().to_uppercase();
        if cusip.is_empty() {
            return Err(Error::InvalidInput("CUSIP is empty".to_string()));
        }

        let desc = RequestDescriptor::get(
            ApiBase::MarketData,
            format!("/instruments/{}", path_segment(&cusip)),
        );
        self.inner.request_json(desc).await
    }

    /// CUSIP of the first instrument a symbol search returns.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the search matches nothing or the match has
    /// no CUSIP.
    pub async fn cusip_for_ticker(&self, ticker: &str) -> Result<String> {
        let found = self.search(ticker, "symbol-search").await?;
        first_cusip(&found).ok_or_else(|| Error::NotFound(format!("no CUSIP for ticker {}", ticker)))
    }
}

fn first_cusip(found: &Value) -> Option<String> {
    found
        .get("instruments")
        .and_then(|i| i.get(0))
        .and_then(|i| i.get("cusip"))
        .and_then(|c| c.as_str())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_cusip() {
        let found = json!({
            "instruments": [
                {"cusip": "037833100", "symbol": "AAPL", "description": "Apple Inc", "exchange": "NASDAQ", "assetType": "EQUITY"}
            ]
        });
        assert_eq!(first_cusip(&found).as_deref(), Some("037833100"));
        assert_eq!(first_cusip(&json!({"instruments": []})), None);
        assert_eq!(first_cusip(&json!({})), None);
    }
}
