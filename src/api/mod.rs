//! API service modules for Schwab endpoints.
//!
//! Each service provides methods for interacting with a specific
//! subset of the trader or market-data API. Enumerated parameters are
//! validated before any request is sent.

mod accounts;
mod instruments;
mod market_hours;
mod movers;
mod option_chains;
mod orders;
mod price_history;
mod quotes;
mod user_preference;

pub use accounts::AccountsService;
pub use instruments::InstrumentsService;
pub use market_hours::{MarketHoursService, MarketOpenQuery, DEFAULT_MAX_ATTEMPTS};
pub use movers::MoversService;
pub use option_chains::{OptionChainQuery, OptionChainsService};
pub use orders::{OrdersQuery, OrdersService};
pub use price_history::{PriceHistoryQuery, PriceHistoryService};
pub use quotes::QuotesService;
pub use user_preference::UserPreferenceService;
