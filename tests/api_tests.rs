//! Integration tests for schwab-rs against a mock Schwab server.
//!
//! Every test starts its own wiremock server and points the client's host
//! at it. Call counts are asserted with `Mock::expect`, which is verified
//! when the server is dropped.
//!
//! Run with: cargo test --test api_tests

use std::sync::Once;

use chrono::NaiveDate;
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{any, body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use schwab_rs::prelude::*;

static INIT: Once = Once::new();

/// Initialize logging for tests
fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

const CALLBACK: &str = "https://127.0.0.1/callback";

/// Build a client whose every endpoint lives on the mock server.
fn client_for(server: &MockServer, access: Option<&str>, refresh: Option<&str>) -> SchwabClient {
    init_logging();
    SchwabClient::with_tokens(
        Credentials::new("key", "secret", CALLBACK),
        access.map(String::from),
        refresh.map(String::from),
        ClientConfig::default().with_host(server.uri()),
    )
    .unwrap()
}

fn token_body() -> Value {
    json!({
        "expires_in": 1800,
        "token_type": "Bearer",
        "scope": "api",
        "refresh_token": "R",
        "access_token": "A",
        "id_token": "I"
    })
}

fn closed_day(date: &str) -> Value {
    json!({
        "equity": {
            "equity": {"date": date, "marketType": "EQUITY", "product": "equity", "isOpen": false}
        }
    })
}

fn open_day(date: &str) -> Value {
    json!({
        "equity": {
            "EQ": {
                "date": date,
                "marketType": "EQUITY",
                "product": "EQ",
                "productName": "equity",
                "isOpen": true,
                "sessionHours": {
                    "preMarket": [{"start": format!("{date}T07:00:00-05:00"), "end": format!("{date}T09:30:00-05:00")}],
                    "regularMarket": [{"start": format!("{date}T09:30:00-05:00"), "end": format!("{date}T16:00:00-05:00")}],
                    "postMarket": [{"start": format!("{date}T16:00:00-05:00"), "end": format!("{date}T20:00:00-05:00")}]
                }
            }
        }
    })
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

// =============================================================================
// OAuth Token Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_authorization_code_exchange_updates_tokens() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/oauth/token"))
        .and(header("authorization", "Basic a2V5OnNlY3JldA=="))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=C0DE%40"))
        .and(body_string_contains("redirect_uri=https%3A%2F%2F127.0.0.1%2Fcallback"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/trader/v1/userPreference"))
        .and(header("authorization", "Bearer A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accounts": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, None, None);
    let state = client
        .oauth()
        .exchange_authorization_code("C0DE@", None)
        .await
        .unwrap();

    assert_eq!(state.access_token().expose_secret(), "A");
    assert_eq!(state.refresh_token().unwrap().expose_secret(), "R");
    assert_eq!(state.expires_in(), 1800);
    assert_eq!(state.token_type(), "Bearer");
    assert_eq!(state.scope(), "api");
    assert_eq!(state.id_token().unwrap().expose_secret(), "I");

    let stored = client.tokens().snapshot().await;
    assert_eq!(stored.access_token().expose_secret(), "A");
    assert_eq!(client.tokens().expires_in().await, 1800);

    let prefs = client.user_preference().get().await.unwrap();
    assert_eq!(prefs["accounts"], json!([]));
}

#[tokio::test]
async fn test_refresh_without_refresh_token_makes_no_call() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, None, None);
    let err = client.oauth().refresh_access_token().await.unwrap_err();

    assert!(matches!(err, Error::MissingRefreshToken));
    assert!(err.is_auth_error());
}

#[tokio::test]
async fn test_refresh_uses_stored_token_and_next_request_sees_it() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/oauth/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=OLD-R"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "expires_in": 1800,
            "token_type": "Bearer",
            "scope": "api",
            "access_token": "NEW-A",
            "id_token": "I"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/trader/v1/accounts/accountNumbers"))
        .and(header("authorization", "Bearer NEW-A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"accountNumber": "12345678", "hashValue": "E5B3F1A2"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("OLD-A"), Some("OLD-R"));
    let state = client.oauth().refresh_access_token().await.unwrap();

    assert_eq!(state.access_token().expose_secret(), "NEW-A");
    // The response had no refresh_token; the previous one is kept.
    assert_eq!(state.refresh_token().unwrap().expose_secret(), "OLD-R");

    let accounts = client.accounts().account_numbers().await.unwrap();
    assert_eq!(accounts[0].hash_value, AccountHash::new("E5B3F1A2"));
}

#[tokio::test]
async fn test_provider_error_is_decoded_and_state_kept() {
    let server = MockServer::start().await;

    let body = r#"{"error":"unsupported_token_type","error_description":"400 Bad Request: \"{\"error_description\":\"Bad authorization code: String length must be a multiple of four. \",\"error\":\"invalid_request\"}\""}"#;

    Mock::given(method("POST"))
        .and(path("/v1/oauth/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("PRIOR"), None);
    let err = client
        .oauth()
        .exchange_authorization_code("bad", None)
        .await
        .unwrap_err();

    match err {
        Error::ProviderToken(e) => {
            assert_eq!(e.code, 400);
            assert_eq!(e.name, "Bad Request");
            assert_eq!(e.tag, "invalid_request");
            assert_eq!(
                e.description,
                "Bad authorization code: String length must be a multiple of four."
            );
            assert_eq!(e.label, "unsupported_token_type");
            assert_eq!(e.http_status, 400);
        }
        other => panic!("Expected ProviderToken error, got {other:?}"),
    }

    let stored = client.tokens().snapshot().await;
    assert_eq!(stored.access_token().expose_secret(), "PRIOR");
}

#[tokio::test]
async fn test_explicit_redirect_uri() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/oauth/token"))
        .and(body_string_contains("redirect_uri=https%3A%2F%2Fexample.com%2Fcb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, None, None);
    client
        .oauth()
        .exchange_authorization_code("code", Some("https://example.com/cb"))
        .await
        .unwrap();
    assert!(client.tokens().is_authenticated().await);
}

// =============================================================================
// Request Builder Tests
// =============================================================================

#[tokio::test]
async fn test_request_without_access_token_makes_no_call() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, None, None);
    let err = client.user_preference().get().await.unwrap_err();
    assert!(matches!(err, Error::NotAuthenticated));
}

#[tokio::test]
async fn test_shared_token_store_is_read_live() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/trader/v1/userPreference"))
        .and(header("authorization", "Bearer A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let store = TokenStore::new();
    let config = ClientConfig::default().with_host(server.uri());
    let authorizer = SchwabClient::with_token_store(
        Credentials::new("key", "secret", CALLBACK),
        store.clone(),
        config.clone(),
    )
    .unwrap();
    let reader = SchwabClient::with_token_store(
        Credentials::new("key", "secret", CALLBACK),
        store,
        config,
    )
    .unwrap();

    authorizer
        .oauth()
        .exchange_authorization_code("code", None)
        .await
        .unwrap();
    reader.user_preference().get().await.unwrap();
}

#[tokio::test]
async fn test_quotes_query_encoding() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/marketdata/v1/quotes"))
        .and(query_param("symbols", "AAPL,MSFT"))
        .and(query_param("fields", "quote,fundamental"))
        .and(query_param("indicative", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "AAPL": {"quote": {"lastPrice": 189.5}},
            "MSFT": {"quote": {"lastPrice": 402.1}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("A"), None);
    let quotes = client
        .quotes()
        .list(&["aapl", "msft"], &["Quote", "fundamental"], false)
        .await
        .unwrap();
    assert_eq!(quotes["AAPL"]["quote"]["lastPrice"], json!(189.5));
}

#[tokio::test]
async fn test_movers_index_is_path_encoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/marketdata/v1/movers/%24DJI"))
        .and(query_param("sort", "VOLUME"))
        .and(query_param("frequency", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"screeners": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("A"), None);
    let movers = client.movers().get("$dji", Some("volume"), Some(5)).await.unwrap();
    assert_eq!(movers["screeners"], json!([]));
}

#[tokio::test]
async fn test_non_success_statuses() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trader/v1/userPreference"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "expired"})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/marketdata/v1/instruments/000000000"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/marketdata/v1/expirationchain"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "12"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/trader/v1/accounts"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Invalid fields value",
            "errors": ["fields"]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, Some("A"), None);

    let err = client.user_preference().get().await.unwrap_err();
    assert!(matches!(err, Error::SessionExpired));

    let err = client.instruments().by_cusip("000000000").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let err = client.option_chains().expiration_chain("AAPL").await.unwrap_err();
    assert!(matches!(err, Error::RateLimited { retry_after_secs: 12 }));

    let err = client.accounts().list(true).await.unwrap_err();
    match err {
        Error::Api { status, message, .. } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid fields value");
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

// =============================================================================
// Parameter Validation Tests
// =============================================================================

#[tokio::test]
async fn test_invalid_parameters_make_no_calls() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("A"), None);
    let account = AccountHash::new("E5B3F1A2");

    let errors = vec![
        client.movers().get("$NOPE", None, None).await.unwrap_err(),
        client.movers().get("$SPX", Some("alphabetical"), None).await.unwrap_err(),
        client.movers().get("$SPX", None, Some(15)).await.unwrap_err(),
        client.instruments().search("AAPL", "everything").await.unwrap_err(),
        client.quotes().get("AAPL", &["greeks"]).await.unwrap_err(),
        client.market_hours().market("crypto", None).await.unwrap_err(),
        client.market_hours().markets(&["equity", "metals"], None).await.unwrap_err(),
        client
            .orders()
            .list(
                &account,
                &OrdersQuery {
                    status: Some("done".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err(),
        client
            .orders()
            .list_all(&OrdersQuery {
                to_entered_time: Some(chrono::Utc::now()),
                ..Default::default()
            })
            .await
            .unwrap_err(),
        client
            .price_history()
            .get(&PriceHistoryQuery {
                period_type: Some("day".to_string()),
                period: Some(7),
                ..PriceHistoryQuery::new("AAPL")
            })
            .await
            .unwrap_err(),
        client
            .option_chains()
            .chain(&OptionChainQuery {
                strategy: Some("IRON_CONDOR".to_string()),
                ..OptionChainQuery::new("SPY")
            })
            .await
            .unwrap_err(),
        client.orders().buy_market(&account, "AAPL", 0).await.unwrap_err(),
    ];

    for err in errors {
        assert!(err.is_validation_error(), "expected validation error, got {err:?}");
    }
}

#[tokio::test]
async fn test_validation_message_names_value_and_set() {
    let server = MockServer::start().await;
    let client = client_for(&server, Some("A"), None);

    let err = client.instruments().search("AAPL", "Everything").await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("'everything'"));
    assert!(message.contains(
        "symbol-search, symbol-regex, desc-search, desc-regex, search, fundamental"
    ));
}

#[tokio::test]
async fn test_price_history_default_period() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/marketdata/v1/pricehistory"))
        .and(query_param("symbol", "AAPL"))
        .and(query_param("periodType", "day"))
        .and(query_param("period", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "symbol": "AAPL",
            "empty": false,
            "candles": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("A"), None);
    let history = client
        .price_history()
        .get(&PriceHistoryQuery {
            period_type: Some("DAY".to_string()),
            ..PriceHistoryQuery::new("aapl")
        })
        .await
        .unwrap();
    assert_eq!(history["symbol"], "AAPL");
}

// =============================================================================
// Order Tests
// =============================================================================

#[tokio::test]
async fn test_buy_market_posts_template_and_reads_location() {
    let server = MockServer::start().await;

    let location = format!("{}/trader/v1/accounts/E5B3F1A2/orders/1000432", server.uri());

    Mock::given(method("POST"))
        .and(path("/trader/v1/accounts/E5B3F1A2/orders"))
        .and(header("authorization", "Bearer A"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "orderType": "MARKET",
            "session": "NORMAL",
            "duration": "DAY",
            "orderStrategyType": "SINGLE",
            "orderLegCollection": {
                "instruction": "BUY",
                "quantity": 5,
                "instrument": {"symbol": "AAPL", "assetType": "EQUITY"}
            }
        })))
        .respond_with(ResponseTemplate::new(201).insert_header("Location", location.as_str()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("A"), None);
    let placed = client
        .orders()
        .buy_market(&AccountHash::new("E5B3F1A2"), "aapl", 5)
        .await
        .unwrap();

    assert_eq!(placed.status, 201);
    assert_eq!(placed.order_id, Some(OrderId::new("1000432")));
}

#[tokio::test]
async fn test_order_list_time_window() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trader/v1/accounts/E5B3F1A2/orders"))
        .and(query_param("fromEnteredTime", "2024-03-01T00:00:00.000Z"))
        .and(query_param("toEnteredTime", "2024-03-29T00:00:00.000Z"))
        .and(query_param("status", "FILLED"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("A"), None);
    let from = date("2024-03-01").and_hms_opt(0, 0, 0).unwrap().and_utc();
    let to = date("2024-03-29").and_hms_opt(0, 0, 0).unwrap().and_utc();
    let orders = client
        .orders()
        .list(
            &AccountHash::new("E5B3F1A2"),
            &OrdersQuery {
                from_entered_time: Some(from),
                to_entered_time: Some(to),
                status: Some("filled".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(orders, json!([]));
}

// =============================================================================
// Account Tests
// =============================================================================

#[tokio::test]
async fn test_long_equity_positions() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trader/v1/accounts/E5B3F1A2"))
        .and(query_param("fields", "positions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "securitiesAccount": {
                "type": "CASH",
                "accountNumber": "12345678",
                "positions": [
                    {
                        "shortQuantity": 0.0,
                        "averagePrice": 0.305,
                        "currentDayProfitLoss": 0.0,
                        "longQuantity": 2.0,
                        "instrument": {"assetType": "EQUITY", "cusip": "205750300", "symbol": "LODE", "netChange": -0.0025},
                        "marketValue": 0.7
                    },
                    {
                        "shortQuantity": 0.0,
                        "averagePrice": 1.0,
                        "longQuantity": 100.0,
                        "instrument": {"assetType": "CASH_EQUIVALENT", "symbol": "MMDA1"},
                        "marketValue": 100.0
                    }
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("A"), None);
    let positions = client
        .accounts()
        .long_equity_positions(&AccountHash::new("E5B3F1A2"))
        .await
        .unwrap();

    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0].symbol, "LODE");
    assert_eq!(positions[0].cusip.as_deref(), Some("205750300"));
}

#[tokio::test]
async fn test_cusip_for_ticker() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/marketdata/v1/instruments"))
        .and(query_param("symbol", "AAPL"))
        .and(query_param("projection", "symbol-search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "instruments": [{"cusip": "037833100", "symbol": "AAPL", "assetType": "EQUITY"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("A"), None);
    let cusip = client.instruments().cusip_for_ticker("AAPL").await.unwrap();
    assert_eq!(cusip, "037833100");
}

// =============================================================================
// Market-Open Resolver Tests
// =============================================================================

/// Mount one market-hours response for one date, expected exactly once.
async fn mount_day(server: &MockServer, day: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path("/marketdata/v1/markets/equity"))
        .and(query_param("date", day))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_next_open_date_after_three_closed_days() {
    let server = MockServer::start().await;

    mount_day(&server, "2024-11-28", closed_day("2024-11-28")).await;
    mount_day(&server, "2024-11-29", closed_day("2024-11-29")).await;
    mount_day(&server, "2024-11-30", closed_day("2024-11-30")).await;
    mount_day(&server, "2024-12-01", open_day("2024-12-01")).await;

    let client = client_for(&server, Some("A"), None);
    let query = MarketOpenQuery::new("equity")
        .with_sub_market("EQ")
        .starting(date("2024-11-28"));

    let found = client.market_hours().next_open_date(&query).await.unwrap();
    assert_eq!(found, date("2024-12-01"));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 4);
}

#[tokio::test]
async fn test_next_open_date_exhausts_budget() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/marketdata/v1/markets/equity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(closed_day("2024-11-16")))
        .expect(10)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("A"), None);
    let query = MarketOpenQuery::new("equity")
        .with_sub_market("EQ")
        .starting(date("2024-11-16"));

    let err = client.market_hours().next_open_date(&query).await.unwrap_err();
    match err {
        Error::MarketNeverOpened { market, start, attempts } => {
            assert_eq!(market, "equity");
            assert_eq!(start, date("2024-11-16"));
            assert_eq!(attempts, 10);
        }
        other => panic!("Expected MarketNeverOpened, got {other:?}"),
    }
}

#[tokio::test]
async fn test_next_open_date_unknown_sub_market_fails_fast() {
    let server = MockServer::start().await;

    mount_day(&server, "2024-11-18", open_day("2024-11-18")).await;

    let client = client_for(&server, Some("A"), None);
    let query = MarketOpenQuery::new("equity")
        .with_sub_market("EQO")
        .starting(date("2024-11-18"));

    let err = client.market_hours().next_open_date(&query).await.unwrap_err();
    match err {
        Error::UnknownSubMarket { market, sub_market, available } => {
            assert_eq!(market, "equity");
            assert_eq!(sub_market, "EQO");
            assert_eq!(available, "EQ");
        }
        other => panic!("Expected UnknownSubMarket, got {other:?}"),
    }
}

#[tokio::test]
async fn test_next_session_hours() {
    let server = MockServer::start().await;

    mount_day(&server, "2024-11-16", closed_day("2024-11-16")).await;
    mount_day(&server, "2024-11-17", closed_day("2024-11-17")).await;
    mount_day(&server, "2024-11-18", open_day("2024-11-18")).await;

    let client = client_for(&server, Some("A"), None);
    let query = MarketOpenQuery::new("EQUITY").starting(date("2024-11-16"));

    let session = client.market_hours().next_session_hours(&query).await.unwrap();
    assert_eq!(session.date, Some(date("2024-11-18")));
    let hours = session.session_hours.unwrap();
    assert_eq!(
        hours["regularMarket"][0].start.to_rfc3339(),
        "2024-11-18T09:30:00-05:00"
    );
    assert_eq!(hours.len(), 3);
}

#[tokio::test]
async fn test_markets_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/marketdata/v1/markets"))
        .and(query_param("markets", "equity,option"))
        .and(query_param("date", "2024-11-18"))
        .respond_with(ResponseTemplate::new(200).set_body_json(open_day("2024-11-18")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("A"), None);
    let hours = client
        .market_hours()
        .markets(&["Equity", "OPTION"], Some(date("2024-11-18")))
        .await
        .unwrap();
    assert!(hours.any_open("equity"));
}
