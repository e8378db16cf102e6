//! Quotes service for snapshot quotes.

use std::sync::Arc;

use serde_json::Value;

use crate::client::{path_segment, ApiBase, ClientInner, QueryParams, RequestDescriptor};
use crate::models::reference::QUOTE_FIELDS;
use crate::{Error, Result};

/// Service for quote operations.
///
/// `fields` selects root nodes of each quote (see [`QUOTE_FIELDS`]); an
/// empty slice returns them all.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: schwab_rs::SchwabClient) -> schwab_rs::Result<()> {
/// let quotes = client.quotes().list(&["AAPL", "MSFT"], &["quote"], false).await?;
/// println!("AAPL last: {}", quotes["AAPL"]["quote"]["lastPrice"]);
///
/// let spy = client.quotes().get("spy", &["quote", "fundamental"]).await?;
/// # Ok(())
/// # }
/// ```
pub struct QuotesService {
    inner: Arc<ClientInner>,
}

impl QuotesService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Quotes for several symbols, keyed by symbol.
    ///
    /// `indicative` asks for indicative quotes of ETF symbols as well.
    pub async fn list<S: AsRef<str>, F: AsRef<str>>(
        &self,
        symbols: &[S],
        fields: &[F],
        indicative: bool,
    ) -> Result<Value> {
        let symbols = normalize_symbols(symbols)?;
        let fields = QUOTE_FIELDS.validate_all(fields)?;

        let mut query = QueryParams::new();
        query
            .insert_list("symbols", &symbols)
            .insert_list("fields", &fields)
            .insert("indicative", indicative);

        let desc = RequestDescriptor::get(ApiBase::MarketData, "/quotes").with_query(query);
        self.inner.request_json(desc).await
    }

    /// Quote for a single symbol.
    pub async fn get<F: AsRef<str>>(&self, symbol: &str, fields: &[F]) -> Result<Value> {
        let symbol = normalize_symbols(&[symbol])?.remove(0);
        let fields = QUOTE_FIELDS.validate_all(fields)?;

        let mut query = QueryParams::new();
        query.insert_list("fields", &fields);

        let desc = RequestDescriptor::get(
            ApiBase::MarketData,
            format!("/{}/quotes", path_segment(&symbol)),
        )
        .with_query(query);
        self.inner.request_json(desc).await
    }
}

fn normalize_symbols<S: AsRef<str>>(symbols: &[S]) -> Result<Vec<String>> {
    let symbols: Vec<String> = symbols
        .iter()
        .map(|s| s.as_ref().trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect();

    if symbols.is_empty() {
        return Err(Error::InvalidInput("at least one symbol is required".to_string()));
    }
    Ok(symbols)
}
