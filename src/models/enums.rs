//! Enumeration types used in order payloads.
//!
//! Query parameters are validated against the string tables in
//! [`reference`](super::reference); these enums cover the values the crate
//! itself writes into request bodies.

use serde::{Deserialize, Serialize};

/// Instruction for an order leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Instruction {
    /// Buy shares
    Buy,
    /// Sell shares
    Sell,
    /// Buy to cover a short position
    BuyToCover,
    /// Sell short
    SellShort,
}

impl Instruction {
    /// Returns `true` if this is a buy-side instruction.
    pub fn is_buy(&self) -> bool {
        matches!(self, Instruction::Buy | Instruction::BuyToCover)
    }
}

/// How the order is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Execute at the prevailing market price
    Market,
    /// Execute at a limit price or better
    Limit,
    /// Market order once a stop price trades
    Stop,
    /// Limit order once a stop price trades
    StopLimit,
}

/// Trading session the order may execute in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Session {
    /// Regular market hours
    Normal,
    /// Pre-market
    Am,
    /// After-hours
    Pm,
    /// All sessions
    Seamless,
}

/// How long an order stays working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Duration {
    /// Expires at the end of the session
    Day,
    /// Good till cancelled
    GoodTillCancel,
    /// Fill entirely or cancel
    FillOrKill,
}

/// Order strategy shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStrategyType {
    /// A standalone order
    Single,
    /// One cancels other
    Oco,
    /// First triggers second
    Trigger,
}

/// Asset class of an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    /// Stock or ETF
    Equity,
    /// Option contract
    Option,
    /// Market index
    Index,
    /// Mutual fund
    MutualFund,
    /// Cash equivalent
    CashEquivalent,
    /// Fixed income
    FixedIncome,
    /// Currency
    Currency,
    /// Anything else
    #[serde(other)]
    Unknown,
}
