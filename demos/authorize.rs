//! Walk through the OAuth authorization-code flow.
//!
//! Prints the consent URL, reads the redirected callback URL from stdin,
//! exchanges its code for tokens, then refreshes once.
//!
//! Run with: SCHWAB_API_KEY=... SCHWAB_API_SECRET=... SCHWAB_CALLBACK_URL=... \
//!     cargo run --example authorize

use std::io::{self, BufRead, Write};

use schwab_rs::auth::AuthorizationCallback;
use schwab_rs::SchwabClient;
use secrecy::ExposeSecret;

#[tokio::main]
async fn main() -> schwab_rs::Result<()> {
    tracing_subscriber::fmt::init();

    let client = SchwabClient::from_env()?;

    println!("Open this URL and log in:\n\n  {}\n", client.oauth().authorize_url());
    print!("Paste the URL you were redirected to: ");
    io::stdout().flush().ok();

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| schwab_rs::Error::InvalidInput(e.to_string()))?;

    let callback = AuthorizationCallback::parse(line.trim())?;
    let state = client
        .oauth()
        .exchange_authorization_code(&callback.code, None)
        .await?;

    println!("Token type:   {}", state.token_type());
    println!("Scope:        {}", state.scope());
    println!("Expires in:   {}s", state.expires_in());
    println!("Has refresh:  {}", state.refresh_token().is_some());

    let refreshed = client.oauth().refresh_access_token().await?;
    println!(
        "Refreshed, new access token ends in ...{}",
        tail(refreshed.access_token().expose_secret())
    );

    let accounts = client.accounts().account_numbers().await?;
    for pair in accounts {
        println!("Account {} -> {}", pair.account_number, pair.hash_value);
    }

    Ok(())
}

fn tail(token: &str) -> &str {
    let start = token.len().saturating_sub(4);
    token.get(start..).unwrap_or("")
}
