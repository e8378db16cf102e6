//! Orders service for order lookup and placement.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::client::{path_segment, ApiBase, ClientInner, QueryParams, RequestDescriptor};
use crate::models::reference::ORDER_STATUSES;
use crate::models::{AccountHash, EquityOrder, OrderId, PlacedOrder};
use crate::{Error, Result};

/// Service for order operations.
///
/// # Example
///
/// ```no_run
/// use schwab_rs::AccountHash;
/// use schwab_rs::api::OrdersQuery;
/// use chrono::{Duration, Utc};
///
/// # async fn example(client: schwab_rs::SchwabClient) -> schwab_rs::Result<()> {
/// let account = AccountHash::new("E5B3F1A2...");
///
/// // Filled orders of the last week
/// let query = OrdersQuery {
///     from_entered_time: Some(Utc::now() - Duration::days(7)),
///     to_entered_time: Some(Utc::now()),
///     status: Some("filled".to_string()),
///     ..Default::default()
/// };
/// let orders = client.orders().list(&account, &query).await?;
///
/// // Buy five shares at market
/// let placed = client.orders().buy_market(&account, "AAPL", 5).await?;
/// println!("Order ID: {:?}", placed.order_id);
/// # Ok(())
/// # }
/// ```
pub struct OrdersService {
    inner: Arc<ClientInner>,
}

/// Query parameters for listing orders.
///
/// `from_entered_time` and `to_entered_time` go together: set both or
/// neither.
#[derive(Debug, Clone, Default)]
pub struct OrdersQuery {
    /// Maximum number of orders to return (provider default 3000)
    pub max_results: Option<u32>,
    /// No orders entered before this time
    pub from_entered_time: Option<DateTime<Utc>>,
    /// No orders entered after this time
    pub to_entered_time: Option<DateTime<Utc>>,
    /// Only orders with this status, see [`ORDER_STATUSES`]
    pub status: Option<String>,
}

impl OrdersQuery {
    /// Validate the query and encode it.
    pub(crate) fn to_params(&self) -> Result<QueryParams> {
        let mut query = QueryParams::new();
        query.insert_opt("maxResults", self.max_results);

        match (self.from_entered_time, self.to_entered_time) {
            (Some(from), Some(to)) => {
                if from > to {
                    return Err(Error::InvalidInput(format!(
                        "fromEnteredTime {} is after toEnteredTime {}",
                        from, to
                    )));
                }
                query.insert("fromEnteredTime", entered_time(&from));
                query.insert("toEnteredTime", entered_time(&to));
            }
            (None, None) => {}
            _ => {
                return Err(Error::InvalidInput(
                    "fromEnteredTime and toEnteredTime must be set together".to_string(),
                ))
            }
        }

        if let Some(ref status) = self.status {
            query.insert("status", ORDER_STATUSES.validate(status)?);
        }

        Ok(query)
    }
}

/// ISO-8601 with milliseconds, e.g. `2024-03-29T00:00:00.000Z`.
fn entered_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl OrdersService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List orders across every linked account.
    pub async fn list_all(&self, query: &OrdersQuery) -> Result<Value> {
        let desc = RequestDescriptor::get(ApiBase::Trader, "/orders").with_query(query.to_params()?);
        self.inner.request_json(desc).await
    }

    /// List orders for an account.
    pub async fn list(&self, account: &AccountHash, query: &OrdersQuery) -> Result<Value> {
        let desc = RequestDescriptor::get(ApiBase::Trader, orders_path(account))
            .with_query(query.to_params()?);
        self.inner.request_json(desc).await
    }

    /// Get a specific order by ID.
    pub async fn get(&self, account: &AccountHash, order_id: &OrderId) -> Result<Value> {
        let desc = RequestDescriptor::get(
            ApiBase::Trader,
            format!("{}/{}", orders_path(account), path_segment(order_id.as_str())),
        );
        self.inner.request_json(desc).await
    }

    /// Place an order.
    ///
    /// Any serializable payload is accepted; [`EquityOrder`] is the
    /// pre-built template. The provider answers with an empty body and the
    /// new order's URL in `Location`.
    pub async fn place<T: Serialize + ?Sized>(
        &self,
        account: &AccountHash,
        order: &T,
    ) -> Result<PlacedOrder> {
        let body = serde_json::to_value(order)?;
        let raw = self
            .inner
            .request(RequestDescriptor::post(ApiBase::Trader, orders_path(account), body))
            .await?;

        let placed = PlacedOrder::from_location(raw.status, raw.location.as_deref());
        info!(status = placed.status, order_id = ?placed.order_id, "order placed");
        Ok(placed)
    }

    /// Buy shares at market, good for the day.
    pub async fn buy_market(
        &self,
        account: &AccountHash,
        symbol: &str,
        quantity: u64,
    ) -> Result<PlacedOrder> {
        check_equity_order(symbol, quantity)?;
        self.place(account, &EquityOrder::buy(symbol.trim().to_uppercase(), quantity))
            .await
    }

    /// Sell shares at market, good for the day.
    pub async fn sell_market(
        &self,
        account: &AccountHash,
        symbol: &str,
        quantity: u64,
    ) -> Result<PlacedOrder> {
        check_equity_order(symbol, quantity)?;
        self.place(account, &EquityOrder::sell(symbol.trim().to_uppercase(), quantity))
            .await
    }
}

fn orders_path(account: &AccountHash) -> String {
    format!("/accounts/{}/orders", path_segment(account.as_str()))
}

fn check_equity_order(symbol: &str, quantity: u64) -> Result<()> {
    if symbol.trim().is_empty() {
        return Err(Error::InvalidInput("order symbol is empty".to_string()));
    }
    if quantity == 0 {
        return Err(Error::InvalidInput("order quantity must be positive".to_string()));
    }
    Ok(())
}
