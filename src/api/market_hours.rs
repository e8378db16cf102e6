//! Market hours service and next-open-date search.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use chrono_tz::America::New_York;
use tracing::debug;

use crate::client::{path_segment, ApiBase, ClientInner, QueryParams, RequestDescriptor};
use crate::models::reference::MARKETS;
use crate::models::{MarketHours, MarketSession};
use crate::{Error, Result};

/// Number of days searched for an open session by default.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Service for market hours.
///
/// # Example
///
/// ```no_run
/// use schwab_rs::api::MarketOpenQuery;
///
/// # async fn example(client: schwab_rs::SchwabClient) -> schwab_rs::Result<()> {
/// // Today's hours for equities and options
/// let hours = client.market_hours().markets(&["equity", "option"], None).await?;
///
/// // Next day the regular equity market trades
/// let query = MarketOpenQuery::new("equity").with_sub_market("EQ");
/// let date = client.market_hours().next_open_date(&query).await?;
/// println!("Next open: {}", date);
/// # Ok(())
/// # }
/// ```
pub struct MarketHoursService {
    inner: Arc<ClientInner>,
}

/// Parameters of a next-open-date search.
///
/// The search queries one date at a time, starting at `start`, and moves
/// forward a calendar day after every date that is not open. Every query
/// counts against `max_attempts`.
#[derive(Debug, Clone)]
pub struct MarketOpenQuery {
    /// Market id, see [`MARKETS`]
    pub market: String,
    /// Product within the market, e.g. `EQ`; `None` accepts any open product
    pub sub_market: Option<String>,
    /// First date to check; `None` is today in New York
    pub start: Option<NaiveDate>,
    /// Maximum number of dates to query
    pub max_attempts: u32,
}

impl MarketOpenQuery {
    /// Search `market` from today with the default budget.
    pub fn new(market: impl Into<String>) -> Self {
        Self {
            market: market.into(),
            sub_market: None,
            start: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Require a specific product to be open.
    pub fn with_sub_market(mut self, sub_market: impl Into<String>) -> Self {
        self.sub_market = Some(sub_market.into());
        self
    }

    /// Start the search at `date`.
    pub fn starting(mut self, date: NaiveDate) -> Self {
        self.start = Some(date);
        self
    }

    /// Set the number of dates queried before giving up.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

impl MarketHoursService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Hours of several markets on a date (today when `None`).
    ///
    /// An empty `markets` slice asks for every market.
    pub async fn markets<S: AsRef<str>>(
        &self,
        markets: &[S],
        date: Option<NaiveDate>,
    ) -> Result<MarketHours> {
        let markets = if markets.is_empty() {
            MARKETS.values().to_vec()
        } else {
            MARKETS.validate_all(markets)?
        };

        let mut query = QueryParams::new();
        query
            .insert_list("markets", &markets)
            .insert_opt("date", date.map(|d| d.format("%Y-%m-%d")));

        let desc = RequestDescriptor::get(ApiBase::MarketData, "/markets").with_query(query);
        self.inner.request_json(desc).await
    }

    /// Hours of one market on a date (today when `None`).
    pub async fn market(&self, market: &str, date: Option<NaiveDate>) -> Result<MarketHours> {
        let market = MARKETS.validate(market)?;

        let mut query = QueryParams::new();
        query.insert_opt("date", date.map(|d| d.format("%Y-%m-%d")));

        let desc = RequestDescriptor::get(
            ApiBase::MarketData,
            format!("/markets/{}", path_segment(market)),
        )
        .with_query(query);
        self.inner.request_json(desc).await
    }

    /// First date, on or after the start date, the market is open.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownSubMarket`] as soon as an open day's response does
    ///   not list the requested sub-market
    /// - [`Error::MarketNeverOpened`] after `max_attempts` queries found no
    ///   open date
    pub async fn next_open_date(&self, query: &MarketOpenQuery) -> Result<NaiveDate> {
        let (date, _) = self.resolve(query).await?;
        Ok(date)
    }

    /// Hours of the next open date.
    ///
    /// Returns the requested sub-market's entry, or the first open product
    /// (by id) when no sub-market was given. Its `session_hours` holds the
    /// pre-market, regular and post-market windows.
    pub async fn next_session_hours(&self, query: &MarketOpenQuery) -> Result<MarketSession> {
        let (date, hours) = self.resolve(query).await?;
        let market = MARKETS.validate(&query.market)?;

        let product = match sub_market(query) {
            Some(sub) => Some(sub.to_string()),
            None => hours
                .product_ids(market)
                .into_iter()
                .find(|id| hours.session(market, id).map(|s| s.is_open).unwrap_or(false)),
        };

        product
            .and_then(|p| hours.session(market, &p).cloned())
            .ok_or_else(|| Error::NotFound(format!("no open session for {} on {}", market, date)))
    }

    async fn resolve(&self, query: &MarketOpenQuery) -> Result<(NaiveDate, MarketHours)> {
        let market = MARKETS.validate(&query.market)?;
        let sub_market = sub_market(query);
        let start = query.start.unwrap_or_else(today_in_new_york);

        let mut date = start;
        for attempt in 1..=query.max_attempts {
            debug!(market, date = %date, attempt, "checking market hours");
            let hours = self.market(market, Some(date)).await?;

            if is_open(&hours, market, sub_market)? {
                return Ok((date, hours));
            }

            date = date
                .succ_opt()
                .ok_or_else(|| Error::InvalidInput(format!("no date follows {}", date)))?;
        }

        Err(Error::MarketNeverOpened {
            market: market.to_string(),
            start,
            attempts: query.max_attempts,
        })
    }
}

fn sub_market(query: &MarketOpenQuery) -> Option<&str> {
    query
        .sub_market
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Decide whether one day's response counts as open.
fn is_open(hours: &MarketHours, market: &str, sub_market: Option<&str>) -> Result<bool> {
    if hours.is_market_closed(market) {
        return Ok(false);
    }

    match sub_market {
        None => Ok(hours.any_open(market)),
        Some(sub) => match hours.session(market, sub) {
            Some(session) => Ok(session.is_open),
            None => Err(Error::UnknownSubMarket {
                market: market.to_string(),
                sub_market: sub.to_string(),
                available: hours.product_ids(market).join(", "),
            }),
        },
    }
}

fn today_in_new_york() -> NaiveDate {
    Utc::now().with_timezone(&New_York).date_naive()
}
