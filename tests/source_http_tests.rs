mod support;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crossedge::adapter::outbound::http::HttpSettings;
use crossedge::adapter::outbound::kalshi::{KalshiConfig, KalshiSource};
use crossedge::adapter::outbound::polymarket::{PolymarketConfig, PolymarketSource};
use crossedge::domain::platform::Platform;
use crossedge::error::{Error, PlatformError};
use crossedge::port::outbound::source::MarketSource;
use rust_decimal_macros::dec;

#[derive(Default)]
struct Recorder {
    hits: AtomicUsize,
    headers: Mutex<Vec<HeaderMap>>,
}

impl Recorder {
    fn record(&self, headers: HeaderMap) -> usize {
        self.headers.lock().unwrap().push(headers);
        self.hits.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    fn header(&self, request: usize, name: &str) -> Option<String> {
        self.headers.lock().unwrap()[request]
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }
}

fn fast_network() -> HttpSettings {
    HttpSettings {
        timeout_ms: 2_000,
        connect_timeout_ms: 1_000,
        total_timeout_ms: 5_000,
        retry_max_attempts: 3,
        retry_backoff_ms: 0,
        retry_max_backoff_ms: 0,
    }
}

fn kalshi_market(ticker: &str, market_type: &str) -> serde_json::Value {
    json!({
        "ticker": ticker,
        "event_ticker": "KXBTC",
        "title": format!("Market {ticker}"),
        "market_type": market_type,
        "status": "active",
        "close_time": "2030-06-30T20:00:00Z",
        "yes_ask": 41,
        "no_ask": 61,
        "rules_primary": "Resolves Yes if the reference rate is above the strike."
    })
}

fn gamma_market(condition_id: &str) -> serde_json::Value {
    json!({
        "conditionId": condition_id,
        "question": format!("Market {condition_id}?"),
        "endDate": "2030-06-30T20:00:00Z",
        "description": "Resolves per the official source.",
        "active": true,
        "closed": false,
        "outcomes": "[\"Yes\", \"No\"]",
        "outcomePrices": "[\"0.52\", \"0.48\"]",
        "events": [{ "ticker": "bitcoin-june" }]
    })
}

async fn kalshi_source(router: Router, api_key: Option<&str>) -> KalshiSource {
    kalshi_source_with_cap(router, api_key, KalshiConfig::default().max_pages).await
}

async fn kalshi_source_with_cap(
    router: Router,
    api_key: Option<&str>,
    max_pages: usize,
) -> KalshiSource {
    let base = support::mock_server::spawn(router).await;
    let config = KalshiConfig {
        api_url: base.to_string(),
        page_size: 2,
        max_pages,
        ..KalshiConfig::default()
    };
    KalshiSource::from_config(&config, &fast_network(), api_key).unwrap()
}

async fn polymarket_source(router: Router, api_key: Option<&str>) -> PolymarketSource {
    let base = support::mock_server::spawn(router).await;
    let config = PolymarketConfig {
        gamma_api_url: base.to_string(),
        page_size: 2,
        ..PolymarketConfig::default()
    };
    PolymarketSource::from_config(&config, &fast_network(), api_key).unwrap()
}

#[tokio::test]
async fn kalshi_follows_cursor_and_skips_non_binary() {
    async fn markets(
        State(recorder): State<Arc<Recorder>>,
        headers: HeaderMap,
        Query(query): Query<HashMap<String, String>>,
    ) -> Json<serde_json::Value> {
        recorder.record(headers);
        assert_eq!(query.get("status").map(String::as_str), Some("open"));
        match query.get("cursor").map(String::as_str) {
            None => Json(json!({
                "markets": [kalshi_market("KX-1", "binary"), kalshi_market("KX-2", "scalar")],
                "cursor": "page-2"
            })),
            Some("page-2") => Json(json!({
                "markets": [kalshi_market("KX-3", "binary")],
                "cursor": ""
            })),
            Some(other) => panic!("unexpected cursor {other}"),
        }
    }

    let recorder = Arc::new(Recorder::default());
    let router = Router::new()
        .route("/trade-api/v2/markets", get(markets))
        .with_state(recorder.clone());
    let source = kalshi_source(router, Some("kalshi-token")).await;

    let listings = source.fetch_active_markets().await.unwrap();

    let ids: Vec<&str> = listings.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, ["KX-1", "KX-3"]);
    assert!(listings.iter().all(|l| l.platform == Platform::Kalshi));
    assert_eq!(listings[0].outcome("yes").and_then(|q| q.price), Some(dec!(0.41)));
    assert_eq!(listings[0].outcome("no").and_then(|q| q.price), Some(dec!(0.61)));
    assert_eq!(recorder.hits(), 2);
    assert_eq!(
        recorder.header(0, "authorization").as_deref(),
        Some("Bearer kalshi-token")
    );
}

#[tokio::test]
async fn kalshi_stops_at_page_cap_with_cursor_pending() {
    async fn endless(
        State(recorder): State<Arc<Recorder>>,
        headers: HeaderMap,
    ) -> Json<serde_json::Value> {
        let page = recorder.record(headers);
        Json(json!({
            "markets": [kalshi_market(&format!("KX-{page}"), "binary")],
            "cursor": format!("page-{}", page + 1)
        }))
    }

    let recorder = Arc::new(Recorder::default());
    let router = Router::new()
        .route("/trade-api/v2/markets", get(endless))
        .with_state(recorder.clone());
    let source = kalshi_source_with_cap(router, None, 1).await;

    let listings = source.fetch_active_markets().await.unwrap();

    let ids: Vec<&str> = listings.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, ["KX-1"]);
    assert_eq!(recorder.hits(), 1);
}

#[tokio::test]
async fn polymarket_pages_by_offset_until_short_page() {
    async fn markets(
        State(recorder): State<Arc<Recorder>>,
        headers: HeaderMap,
        Query(query): Query<HashMap<String, String>>,
    ) -> Json<serde_json::Value> {
        recorder.record(headers);
        assert_eq!(query.get("closed").map(String::as_str), Some("false"));
        match query.get("offset").map(String::as_str) {
            Some("0") => Json(json!([gamma_market("0x1"), gamma_market("0x2")])),
            Some("2") => Json(json!([gamma_market("0x3")])),
            other => panic!("unexpected offset {other:?}"),
        }
    }

    let recorder = Arc::new(Recorder::default());
    let router = Router::new()
        .route("/markets", get(markets))
        .with_state(recorder.clone());
    let source = polymarket_source(router, Some("poly-key")).await;

    let listings = source.fetch_active_markets().await.unwrap();

    let ids: Vec<&str> = listings.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, ["0x1", "0x2", "0x3"]);
    assert_eq!(listings[0].entity_hint.as_deref(), Some("bitcoin-june"));
    assert_eq!(listings[0].outcome("yes").and_then(|q| q.price), Some(dec!(0.52)));
    assert_eq!(recorder.hits(), 2);
    assert_eq!(recorder.header(0, "poly_api_key").as_deref(), Some("poly-key"));
}

#[tokio::test]
async fn unauthorized_is_not_retried() {
    async fn denied(State(recorder): State<Arc<Recorder>>, headers: HeaderMap) -> Response {
        recorder.record(headers);
        (StatusCode::UNAUTHORIZED, "invalid token").into_response()
    }

    let recorder = Arc::new(Recorder::default());
    let router = Router::new()
        .route("/trade-api/v2/markets", get(denied))
        .with_state(recorder.clone());
    let source = kalshi_source(router, Some("bad")).await;

    let err = source.fetch_active_markets().await.unwrap_err();

    assert!(matches!(
        err,
        Error::Platform(PlatformError::AuthenticationFailure {
            platform: Platform::Kalshi,
            ..
        })
    ));
    assert_eq!(recorder.hits(), 1);
}

#[tokio::test]
async fn transient_server_error_is_retried() {
    async fn flaky(State(recorder): State<Arc<Recorder>>, headers: HeaderMap) -> Response {
        if recorder.record(headers) == 1 {
            return (StatusCode::SERVICE_UNAVAILABLE, "try later").into_response();
        }
        Json(json!([gamma_market("0x1")])).into_response()
    }

    let recorder = Arc::new(Recorder::default());
    let router = Router::new()
        .route("/markets", get(flaky))
        .with_state(recorder.clone());
    let source = polymarket_source(router, None).await;

    let listings = source.fetch_active_markets().await.unwrap();

    assert_eq!(listings.len(), 1);
    assert_eq!(recorder.hits(), 2);
    assert_eq!(recorder.header(0, "poly_api_key"), None);
}

#[tokio::test]
async fn persistent_rate_limit_surfaces_after_bounded_retries() {
    async fn limited(State(recorder): State<Arc<Recorder>>, headers: HeaderMap) -> Response {
        recorder.record(headers);
        (StatusCode::TOO_MANY_REQUESTS, [("retry-after", "0")], "slow down").into_response()
    }

    let recorder = Arc::new(Recorder::default());
    let router = Router::new()
        .route("/markets", get(limited))
        .with_state(recorder.clone());
    let source = polymarket_source(router, None).await;

    let err = source.fetch_active_markets().await.unwrap_err();

    assert!(matches!(
        err,
        Error::Platform(PlatformError::RateLimited {
            platform: Platform::Polymarket,
            ..
        })
    ));
    assert_eq!(recorder.hits(), 3);
}

#[tokio::test]
async fn undecodable_payload_is_a_network_failure() {
    async fn garbage(State(recorder): State<Arc<Recorder>>, headers: HeaderMap) -> &'static str {
        recorder.record(headers);
        "<html>maintenance</html>"
    }

    let recorder = Arc::new(Recorder::default());
    let router = Router::new()
        .route("/trade-api/v2/markets", get(garbage))
        .with_state(recorder.clone());
    let source = kalshi_source(router, None).await;

    let err = source.fetch_active_markets().await.unwrap_err();

    let Error::Platform(PlatformError::NetworkFailure { reason, .. }) = err else {
        panic!("expected network failure, got {err:?}");
    };
    assert!(reason.contains("invalid response payload"));
    assert_eq!(recorder.hits(), 3);
}
