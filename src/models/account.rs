//! Account identifiers and positions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::AssetType;
use super::primitives::AccountHash;

/// A plain account number paired with its hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountNumberHash {
    /// The account number as shown to the customer
    pub account_number: String,
    /// The value used to address the account in requests
    pub hash_value: AccountHash,
}

/// A position as returned inside `securitiesAccount.positions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Shares held short
    #[serde(default)]
    pub short_quantity: Decimal,
    /// Shares held long
    #[serde(default)]
    pub long_quantity: Decimal,
    /// Average cost
    #[serde(default)]
    pub average_price: Decimal,
    /// Current market value
    #[serde(default)]
    pub market_value: Decimal,
    /// Profit or loss since the previous close
    #[serde(default)]
    pub current_day_profit_loss: Decimal,
    /// Instrument held
    pub instrument: PositionInstrument,
}

/// The instrument behind a [`Position`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionInstrument {
    /// Asset class
    pub asset_type: AssetType,
    /// CUSIP identifier
    #[serde(default)]
    pub cusip: Option<String>,
    /// Ticker symbol
    pub symbol: String,
    /// Net change on the day
    #[serde(default)]
    pub net_change: Option<Decimal>,
}

/// A long equity position with its instrument flattened in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityPosition {
    /// Ticker symbol
    pub symbol: String,
    /// CUSIP identifier
    pub cusip: Option<String>,
    /// Shares held long
    pub long_quantity: Decimal,
    /// Average cost
    pub average_price: Decimal,
    /// Current market value
    pub market_value: Decimal,
    /// Net change on the day
    pub net_change: Option<Decimal>,
}

impl Position {
    /// Returns `true` for a long position in an equity.
    pub fn is_long_equity(&self) -> bool {
        self.long_quantity > Decimal::ZERO && self.instrument.asset_type == AssetType::Equity
    }
}

impl From<Position> for EquityPosition {
    fn from(p: Position) -> Self {
        Self {
            symbol: p.instrument.symbol,
            cusip: p.instrument.cusip,
            long_quantity: p.long_quantity,
            average_price: p.average_price,
            market_value: p.market_value,
            net_change: p.instrument.net_change,
        }
    }
}
