//! Option chains service.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::client::{ApiBase, ClientInner, QueryParams, RequestDescriptor};
use crate::models::reference::{
    CONTRACT_TYPES, ENTITLEMENTS, EXPIRATION_MONTHS, OPTION_STRATEGIES, OPTION_TYPES,
    STRIKE_RANGES,
};
use crate::{Error, Result};

/// Service for option chains and expirations.
///
/// # Example
///
/// ```no_run
/// use schwab_rs::api::OptionChainQuery;
/// use chrono::NaiveDate;
///
/// # async fn example(client: schwab_rs::SchwabClient) -> schwab_rs::Result<()> {
/// let query = OptionChainQuery {
///     contract_type: Some("CALL".to_string()),
///     strike_count: Some(10),
///     from_date: NaiveDate::from_ymd_opt(2025, 1, 1),
///     to_date: NaiveDate::from_ymd_opt(2025, 3, 31),
///     ..OptionChainQuery::new("AAPL")
/// };
/// let chain = client.option_chains().chain(&query).await?;
///
/// let expirations = client.option_chains().expiration_chain("AAPL").await?;
/// # Ok(())
/// # }
/// ```
pub struct OptionChainsService {
    inner: Arc<ClientInner>,
}

/// Query parameters for an option chain.
///
/// Only `symbol` is required. Enumerated fields are validated against the
/// sets in [`reference`](crate::models::reference) before anything is sent.
#[derive(Debug, Clone, Default)]
pub struct OptionChainQuery {
    /// Underlying symbol
    pub symbol: String,
    /// `CALL`, `PUT` or `ALL`
    pub contract_type: Option<String>,
    /// Number of strikes above and below the at-the-money price
    pub strike_count: Option<u32>,
    /// Include a quote of the underlying
    pub include_underlying_quote: Option<bool>,
    /// Chain strategy, see [`OPTION_STRATEGIES`]
    pub strategy: Option<String>,
    /// Strike interval for spread strategies
    pub interval: Option<Decimal>,
    /// A single strike price
    pub strike: Option<Decimal>,
    /// `ITM`, `NTM` or `OTM`
    pub range: Option<String>,
    /// First expiration date to include
    pub from_date: Option<NaiveDate>,
    /// Last expiration date to include
    pub to_date: Option<NaiveDate>,
    /// Volatility for `ANALYTICAL` calculations
    pub volatility: Option<Decimal>,
    /// Underlying price for `ANALYTICAL` calculations
    pub underlying_price: Option<Decimal>,
    /// Interest rate for `ANALYTICAL` calculations
    pub interest_rate: Option<Decimal>,
    /// Days to expiration for `ANALYTICAL` calculations
    pub days_to_expiration: Option<u32>,
    /// Expiration month, see [`EXPIRATION_MONTHS`]
    pub exp_month: Option<String>,
    /// `S`, `NS` or `ALL`
    pub option_type: Option<String>,
    /// `NP`, `PN` or `PP`
    pub entitlement: Option<String>,
}

impl OptionChainQuery {
    /// A query for every contract of `symbol`.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    /// Validate the query and encode it.
    pub(crate) fn to_params(&self) -> Result<QueryParams> {
        let symbol = self.symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(Error::InvalidInput("option chain symbol is empty".to_string()));
        }

        if let (Some(from), Some(to)) = (self.from_date, self.to_date) {
            if from > to {
                return Err(Error::InvalidInput(format!(
                    "fromDate {} is after toDate {}",
                    from, to
                )));
            }
        }

        let validate = |set: &crate::models::reference::NameSet, value: &Option<String>| {
            value.as_deref().map(|v| set.validate(v)).transpose()
        };

        let mut query = QueryParams::new();
        query
            .insert("symbol", symbol)
            .insert_opt("contractType", validate(&CONTRACT_TYPES, &self.contract_type)?)
            .insert_opt("strikeCount", self.strike_count)
            .insert_opt("includeUnderlyingQuote", self.include_underlying_quote)
            .insert_opt("strategy", validate(&OPTION_STRATEGIES, &self.strategy)?)
            .insert_opt("interval", self.interval)
            .insert_opt("strike", self.strike)
            .insert_opt("range", validate(&STRIKE_RANGES, &self.range)?)
            .insert_opt("fromDate", self.from_date.map(|d| d.format("%Y-%m-%d")))
            .insert_opt("toDate", self.to_date.map(|d| d.format("%Y-%m-%d")))
            .insert_opt("volatility", self.volatility)
            .insert_opt("underlyingPrice", self.underlying_price)
            .insert_opt("interestRate", self.interest_rate)
            .insert_opt("daysToExpiration", self.days_to_expiration)
            .insert_opt("expMonth", validate(&EXPIRATION_MONTHS, &self.exp_month)?)
            .insert_opt("optionType", validate(&OPTION_TYPES, &self.option_type)?)
            .insert_opt("entitlement", validate(&ENTITLEMENTS, &self.entitlement)?);

        Ok(query)
    }
}

impl OptionChainsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get an option chain.
    pub async fn chain(&self, query: &OptionChainQuery) -> Result<Value> {
        let desc =
            RequestDescriptor::get(ApiBase::MarketData, "/chains").with_query(query.to_params()?);
        self.inner.request_json(desc).await
    }

    /// Get the expiration dates of a symbol's option series.
    pub async fn expiration_chain(&self, symbol: &str) -> Result<Value> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(Error::InvalidInput("option chain symbol is empty".to_string()));
        }

        let mut query = QueryParams::new();
        query.insert("symbol", symbol);

        let desc = RequestDescriptor::get(ApiBase::MarketData, "/expirationchain").with_query(query);
        self.inner.request_json(desc).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_minimal_query() {
        let params = OptionChainQuery::new("aapl").to_params().unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("symbol"), Some("AAPL"));
    }

    #[test]
    fn test_full_query_encoding() {
        let query = OptionChainQuery {
            contract_type: Some("call".to_string()),
            strategy: Some("vertical".to_string()),
            interval: Some(dec!(2.5)),
            range: Some("otm".to_string()),
            from_date: NaiveDate::from_ymd_opt(2025, 1, 1),
            to_date: NaiveDate::from_ymd_opt(2025, 3, 31),
            exp_month: Some("mar".to_string()),
            include_underlying_quote: Some(true),
            ..OptionChainQuery::new("SPY")
        };
        let params = query.to_params().unwrap();
        assert_eq!(params.get("contractType"), Some("CALL"));
        assert_eq!(params.get("strategy"), Some("VERTICAL"));
        assert_eq!(params.get("interval"), Some("2.5"));
        assert_eq!(params.get("range"), Some("OTM"));
        assert_eq!(params.get("fromDate"), Some("2025-01-01"));
        assert_eq!(params.get("toDate"), Some("2025-03-31"));
        assert_eq!(params.get("expMonth"), Some("MAR"));
        assert_eq!(params.get("includeUnderlyingQuote"), Some("true"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let query = OptionChainQuery {
            entitlement: Some("XX".to_string()),
            ..OptionChainQuery::new("SPY")
        };
        assert!(query.to_params().unwrap_err().is_validation_error());

        let query = OptionChainQuery {
            from_date: NaiveDate::from_ymd_opt(2025, 4, 1),
            to_date: NaiveDate::from_ymd_opt(2025, 3, 31),
            ..OptionChainQuery::new("SPY")
        };
        assert!(query.to_params().unwrap_err().is_validation_error());
        assert!(OptionChainQuery::new(" ").to_params().is_err());
    }
}
