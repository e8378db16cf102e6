//! Data models for the Schwab API.
//!
//! Models are organized by domain:
//!
//! - [`primitives`] - Identifiers like `AccountHash`, `OrderId` and the host `Endpoints`
//! - [`enums`] - Enumeration types written into order payloads
//! - [`reference`] - Canonical whitelists for enumerated request parameters
//! - [`account`] - Account number pairs and positions
//! - [`order`] - The market equity order template and placement result
//! - [`market_hours`] - Market hours responses

pub mod primitives;
pub mod enums;
pub mod reference;
pub mod account;
pub mod order;
pub mod market_hours;

// Re-export commonly used types
pub use primitives::*;
pub use enums::*;
pub use account::*;
pub use order::*;
pub use market_hours::*;
