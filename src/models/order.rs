//! Order payloads and placement results.

use serde::{Deserialize, Serialize};

use super::enums::*;
use super::primitives::OrderId;

/// A single-leg market order for an equity, good for the day.
///
/// This is the one pre-built order template the crate offers. The JSON it
/// produces is a pure function of symbol, quantity and side.
///
/// # Example
///
/// ```
/// use schwab_rs::models::EquityOrder;
///
/// let order = EquityOrder::buy("AAPL", 5);
/// assert_eq!(
///     order.to_json().unwrap(),
///     EquityOrder::buy("AAPL", 5).to_json().unwrap(),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityOrder {
    /// Always `MARKET`
    pub order_type: OrderType,
    /// Always `NORMAL`
    pub session: Session,
    /// Always `DAY`
    pub duration: Duration,
    /// Always `SINGLE`
    pub order_strategy_type: OrderStrategyType,
    /// The single leg of the order
    pub order_leg_collection: OrderLeg,
}

/// One leg of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLeg {
    /// Buy or sell
    pub instruction: Instruction,
    /// Number of shares
    pub quantity: u64,
    /// What is traded
    pub instrument: OrderInstrument,
}

/// The instrument an order leg trades.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInstrument {
    /// Ticker symbol
    pub symbol: String,
    /// Asset class
    pub asset_type: AssetType,
}

impl EquityOrder {
    /// A market order to buy `quantity` shares of `symbol`.
    pub fn buy(symbol: impl Into<String>, quantity: u64) -> Self {
        Self::market(Instruction::Buy, symbol, quantity)
    }

    /// A market order to sell `quantity` shares of `symbol`.
    pub fn sell(symbol: impl Into<String>, quantity: u64) -> Self {
        Self::market(Instruction::Sell, symbol, quantity)
    }

    fn market(instruction: Instruction, symbol: impl Into<String>, quantity: u64) -> Self {
        Self {
            order_type: OrderType::Market,
            session: Session::Normal,
            duration: Duration::Day,
            order_strategy_type: OrderStrategyType::Single,
            order_leg_collection: OrderLeg {
                instruction,
                quantity,
                instrument: OrderInstrument {
                    symbol: symbol.into(),
                    asset_type: AssetType::Equity,
                },
            },
        }
    }

    /// Serialize the payload exactly as it is sent.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Result of placing an order.
///
/// The provider answers `201 Created` with an empty body; the new order's
/// id is the last segment of the `Location` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    /// HTTP status of the placement response
    pub status: u16,
    /// Id of the created order, when the provider reported one
    pub order_id: Option<OrderId>,
}

impl PlacedOrder {
    pub(crate) fn from_location(status: u16, location: Option<&str>) -> Self {
        let order_id = location
            .and_then(|l| l.trim_end_matches('/').rsplit('/').next())
            .filter(|id| !id.is_empty())
            .map(OrderId::new);
        Self { status, order_id }
    }
}
