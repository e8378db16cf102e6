//! Movers service for the top movers of an index.

use std::sync::Arc;

use serde_json::Value;

use crate::client::{path_segment, ApiBase, ClientInner, QueryParams, RequestDescriptor};
use crate::models::reference::{MOVER_FREQUENCIES, MOVER_INDICES, MOVER_SORTS};
use crate::Result;

/// Service for index movers.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: schwab_rs::SchwabClient) -> schwab_rs::Result<()> {
/// let movers = client
///     .movers()
///     .get("$SPX", Some("percent_change_up"), Some(5))
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct MoversService {
    inner: Arc<ClientInner>,
}

impl MoversService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Top movers of an index or exchange.
    ///
    /// # Arguments
    ///
    /// * `index` - One of [`MOVER_INDICES`], e.g. `$DJI` or `EQUITY_ALL`
    /// * `sort` - One of [`MOVER_SORTS`]
    /// * `frequency` - Minimum change in minutes, one of [`MOVER_FREQUENCIES`]
    pub async fn get(&self, index: &str, sort: Option<&str>, frequency: Option<u32>) -> Result<Value> {
        let index = MOVER_INDICES.validate(index)?;
        let sort = sort.map(|s| MOVER_SORTS.validate(s)).transpose()?;
        let frequency = frequency.map(|f| MOVER_FREQUENCIES.validate(f)).transpose()?;

        let mut query = QueryParams::new();
        query.insert_opt("sort", sort).insert_opt("frequency", frequency);

        let desc = RequestDescriptor::get(
            ApiBase::MarketData,
            format!("/movers/{}", path_segment(index)),
        )
        .with_query(query);
        self.inner.request_json(desc).await
    }
}
