//! Price history service for OHLCV candles.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::client::{ApiBase, ClientInner, QueryParams, RequestDescriptor};
use crate::models::reference::{
    frequency_rule, period_rule, FrequencyRule, PeriodRule, FREQUENCY_TYPES, PERIOD_TYPES,
};
use crate::{Error, Result};

/// Period type the provider assumes when none is sent.
const PROVIDER_PERIOD_TYPE: &str = "day";

/// Service for price history.
///
/// # Example
///
/// ```no_run
/// use schwab_rs::api::PriceHistoryQuery;
///
/// # async fn example(client: schwab_rs::SchwabClient) -> schwab_rs::Result<()> {
/// // One year of weekly candles
/// let query = PriceHistoryQuery {
///     period_type: Some("year".to_string()),
///     frequency_type: Some("weekly".to_string()),
///     ..PriceHistoryQuery::new("AAPL")
/// };
/// let candles = client.price_history().get(&query).await?;
/// # Ok(())
/// # }
/// ```
pub struct PriceHistoryService {
    inner: Arc<ClientInner>,
}

/// Query parameters for price history.
///
/// The chart parameters constrain each other:
///
/// | periodType | period              | frequencyType          |
/// |------------|---------------------|------------------------|
/// | `day`      | 1, 2, 3, 4, 5, 10*  | minute*                |
/// | `month`    | 1*, 2, 3, 6         | daily, weekly*         |
/// | `year`     | 1*, 2, 3, 5, 10, 15, 20 | daily, weekly, monthly* |
/// | `ytd`      | 1*                  | daily, weekly*         |
///
/// `frequency` is 1, 5, 10, 15 or 30 for `minute` and 1 otherwise.
/// Starred values are the defaults. A missing `period` is sent as the
/// default for the period type; a missing `frequency` is sent as 1.
#[derive(Debug, Clone, Default)]
pub struct PriceHistoryQuery {
    /// Symbol to chart
    pub symbol: String,
    /// Chart period unit
    pub period_type: Option<String>,
    /// Number of period units
    pub period: Option<u32>,
    /// Candle unit
    pub frequency_type: Option<String>,
    /// Number of candle units per candle
    pub frequency: Option<u32>,
    /// First candle time
    pub start_date: Option<DateTime<Utc>>,
    /// Last candle time
    pub end_date: Option<DateTime<Utc>>,
    /// Include pre- and post-market candles
    pub need_extended_hours_data: Option<bool>,
    /// Include the previous close
    pub need_previous_close: Option<bool>,
}

impl PriceHistoryQuery {
    /// A query for `symbol` with every other parameter left to the provider.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    /// Validate the query and encode it, dates as epoch milliseconds.
    pub(crate) fn to_params(&self) -> Result<QueryParams> {
        let symbol = self.symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(Error::InvalidInput("price history symbol is empty".to_string()));
        }

        let period_type = self
            .period_type
            .as_deref()
            .map(|p| PERIOD_TYPES.validate(p))
            .transpose()?;
        let period_rule = rule_for_period(period_type.unwrap_or(PROVIDER_PERIOD_TYPE))?;

        let period = match (period_type, self.period) {
            (_, Some(period)) => Some(check_period(period_rule, period)?),
            (Some(_), None) => Some(period_rule.default_period),
            (None, None) => None,
        };

        let frequency_type = match self.frequency_type.as_deref() {
            Some(f) => Some(check_frequency_type(period_rule, FREQUENCY_TYPES.validate(f)?)?),
            None => None,
        };
        let frequency_rule =
            rule_for_frequency(frequency_type.unwrap_or(period_rule.default_frequency_type))?;

        let frequency = match (frequency_type, self.frequency) {
            (_, Some(frequency)) => Some(check_frequency(frequency_rule, frequency)?),
            (Some(_), None) => Some(frequency_rule.default_frequency),
            (None, None) => None,
        };

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(Error::InvalidInput(format!(
                    "startDate {} is after endDate {}",
                    start, end
                )));
            }
        }

        let mut query = QueryParams::new();
        query
            .insert("symbol", symbol)
            .insert_opt("periodType", period_type)
            .insert_opt("period", period)
            .insert_opt("frequencyType", frequency_type)
            .insert_opt("frequency", frequency)
            .insert_opt("startDate", self.start_date.map(|d| d.timestamp_millis()))
            .insert_opt("endDate", self.end_date.map(|d| d.timestamp_millis()))
            .insert_opt("needExtendedHoursData", self.need_extended_hours_data)
            .insert_opt("needPreviousClose", self.need_previous_close);

        Ok(query)
    }
}

fn rule_for_period(period_type: &str) -> Result<&'static PeriodRule> {
    period_rule(period_type)
        .ok_or_else(|| Error::invalid_parameter("periodType", period_type, PERIOD_TYPES.values()))
}

fn rule_for_frequency(frequency_type: &str) -> Result<&'static FrequencyRule> {
    frequency_rule(frequency_type).ok_or_else(|| {
        Error::invalid_parameter("frequencyType", frequency_type, FREQUENCY_TYPES.values())
    })
}

fn check_period(rule: &PeriodRule, period: u32) -> Result<u32> {
    if rule.periods.contains(&period) {
        Ok(period)
    } else {
        Err(Error::invalid_parameter("period", period.to_string(), rule.periods))
    }
}

fn check_frequency_type(rule: &PeriodRule, frequency_type: &'static str) -> Result<&'static str> {
    if rule.frequency_types.contains(&frequency_type) {
        Ok(frequency_type)
    } else {
        Err(Error::invalid_parameter(
            "frequencyType",
            frequency_type,
            rule.frequency_types,
        ))
    }
}

fn check_frequency(rule: &FrequencyRule, frequency: u32) -> Result<u32> {
    if rule.frequencies.contains(&frequency) {
        Ok(frequency)
    } else {
        Err(Error::invalid_parameter("frequency", frequency.to_string(), rule.frequencies))
    }
}

impl PriceHistoryService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get candles for a symbol.
    pub async fn get(&self, query: &PriceHistoryQuery) -> Result<Value> {
        let desc = RequestDescriptor::get(ApiBase::MarketData, "/pricehistory")
            .with_query(query.to_params()?);
        self.inner.request_json(desc).await
    }
}
