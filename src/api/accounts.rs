//! Accounts service for account numbers, balances and positions.

use std::sync::Arc;

use serde_json::Value;

use crate::client::{path_segment, ApiBase, ClientInner, QueryParams, RequestDescriptor};
use crate::models::{AccountHash, AccountNumberHash, EquityPosition, Position};
use crate::Result;

/// Service for account-related operations.
///
/// Every account is addressed by its hash value, never its plain number.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: schwab_rs::SchwabClient) -> schwab_rs::Result<()> {
/// // Look up the hash of each linked account
/// let accounts = client.accounts().account_numbers().await?;
/// for pair in &accounts {
///     println!("Account {} -> {}", pair.account_number, pair.hash_value);
/// }
///
/// // Long stock positions of the first account
/// if let Some(pair) = accounts.first() {
///     let positions = client.accounts().long_equity_positions(&pair.hash_value).await?;
///     println!("{} positions", positions.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct AccountsService {
    inner: Arc<ClientInner>,
}

impl AccountsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List plain account numbers with their hash values.
    pub async fn account_numbers(&self) -> Result<Vec<AccountNumberHash>> {
        self.inner
            .request_json(RequestDescriptor::get(ApiBase::Trader, "/accounts/accountNumbers"))
            .await
    }

    /// Balances of every linked account, with positions when asked for.
    pub async fn list(&self, positions: bool) -> Result<Value> {
        let mut query = QueryParams::new();
        if positions {
            query.insert("fields", "positions");
        }
        let desc = RequestDescriptor::get(ApiBase::Trader, "/accounts").with_query(query);
        self.inner.request_json(desc).await
    }

    /// A single account.
    ///
    /// # Arguments
    ///
    /// * `account` - The account's hash value
    /// * `fields` - Extra nodes to include, e.g. `positions`
    pub async fn get<S: AsRef<str>>(&self, account: &AccountHash, fields: &[S]) -> Result<Value> {
        let mut query = QueryParams::new();
        query.insert_list("fields", fields);
        let desc = RequestDescriptor::get(
            ApiBase::Trader,
            format!("/accounts/{}", path_segment(account.as_str())),
        )
        .with_query(query);
        self.inner.request_json(desc).await
    }

    /// Long equity positions of an account, with the instrument flattened in.
    ///
    /// Short positions and non-equity instruments are skipped. An account
    /// without a `positions` node yields an empty list.
    pub async fn long_equity_positions(&self, account: &AccountHash) -> Result<Vec<EquityPosition>> {
        let body = self.get(account, &["positions"]).await?;
        long_equity_positions(&body)
    }
}

fn long_equity_positions(account: &Value) -> Result<Vec<EquityPosition>> {
    let Some(positions) = account
        .get("securitiesAccount")
        .and_then(|a| a.get("positions"))
    else {
        return Ok(Vec::new());
    };

    let positions: Vec<Position> = serde_json::from_value(positions.clone())?;
    Ok(positions
        .into_iter()
        .filter(Position::is_long_equity)
        .map(EquityPosition::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_long_equity_filter() {
        let account = json!({
            "securitiesAccount": {
                "positions": [
                    {
                        "longQuantity": 2.0,
                        "shortQuantity": 0.0,
                        "averagePrice": 0.305,
                        "marketValue": 0.7,
                        "instrument": {"assetType": "EQUITY", "cusip": "205750300", "symbol": "LODE", "netChange": -0.0025}
                    },
                    {
                        "longQuantity": 0.0,
                        "shortQuantity": 10.0,
                        "averagePrice": 12.0,
                        "marketValue": -120.0,
                        "instrument": {"assetType": "EQUITY", "symbol": "XYZ"}
                    },
                    {
                        "longQuantity": 1.0,
                        "shortQuantity": 0.0,
                        "averagePrice": 3.1,
                        "marketValue": 310.0,
                        "instrument": {"assetType": "OPTION", "symbol": "AAPL  250117C00150000"}
                    }
                ]
            }
        });

        let positions = long_equity_positions(&account).unwrap();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].symbol, "LODE");
    }

    #[test]
    fn test_no_positions_node() {
        let account = json!({"securitiesAccount": {"accountNumber": "123"}});
        assert!(long_equity_positions(&account).unwrap().is_empty());
    }
}
