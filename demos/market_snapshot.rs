//! Print a market snapshot with previously saved tokens.
//!
//! Run with: SCHWAB_API_KEY=... SCHWAB_API_SECRET=... SCHWAB_CALLBACK_URL=... \
//!     SCHWAB_ACCESS_TOKEN=... cargo run --example market_snapshot

use schwab_rs::api::{MarketOpenQuery, PriceHistoryQuery};
use schwab_rs::{ClientConfig, Credentials, SchwabClient};

#[tokio::main]
async fn main() -> schwab_rs::Result<()> {
    tracing_subscriber::fmt::init();

    let access_token = std::env::var("SCHWAB_ACCESS_TOKEN").ok();
    let refresh_token = std::env::var("SCHWAB_REFRESH_TOKEN").ok();
    let client = SchwabClient::with_tokens(
        Credentials::from_env()?,
        access_token,
        refresh_token,
        ClientConfig::default(),
    )?;

    // 1. Quotes
    println!("=== Quotes ===");
    let quotes = client.quotes().list(&["AAPL", "MSFT", "SPY"], &["quote"], false).await?;
    for symbol in ["AAPL", "MSFT", "SPY"] {
        println!("{:<6} last {}", symbol, quotes[symbol]["quote"]["lastPrice"]);
    }
    println!();

    // 2. Movers
    println!("=== $SPX movers by volume ===");
    let movers = client.movers().get("$SPX", Some("volume"), Some(0)).await?;
    if let Some(screeners) = movers["screeners"].as_array() {
        for mover in screeners.iter().take(5) {
            println!("{:<6} volume {}", mover["symbol"], mover["volume"]);
        }
    }
    println!();

    // 3. Price history, ten days of one-minute candles
    let query = PriceHistoryQuery {
        period_type: Some("day".to_string()),
        ..PriceHistoryQuery::new("AAPL")
    };
    let history = client.price_history().get(&query).await?;
    let candles = history["candles"].as_array().map(Vec::len).unwrap_or(0);
    println!("=== AAPL price history: {} candles ===\n", candles);

    // 4. Next regular equity session
    let query = MarketOpenQuery::new("equity").with_sub_market("EQ");
    let session = client.market_hours().next_session_hours(&query).await?;
    println!("=== Next equity session: {:?} ===", session.date);
    if let Some(hours) = session.session_hours {
        for (name, windows) in hours {
            for window in windows {
                println!("{:<14} {} - {}", name, window.start, window.end);
            }
        }
    }

    Ok(())
}
