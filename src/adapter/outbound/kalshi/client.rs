//! Kalshi trade API client.
//!
//! Lists open markets with cursor pagination. Only binary markets are
//! passed on; prices come from the YES and NO asks with no fallback to
//! bids or last trade.

use async_trait::async_trait;
use tracing::{debug, info, warn};
use url::Url;

use super::dto::response::{KalshiMarket, KalshiMarketsResponse};
use super::settings::KalshiConfig;
use crate::adapter::outbound::http::{endpoint, AuthHeader, HttpSettings, PlatformHttp};
use crate::domain::platform::Platform;
use crate::error::Result;
use crate::port::outbound::source::{MarketListing, MarketSource, OutcomeQuote};

/// [`MarketSource`] backed by the Kalshi trade API.
#[derive(Debug)]
pub struct KalshiSource {
    http: PlatformHttp,
    markets_url: Url,
    page_size: usize,
    max_pages: usize,
}

impl KalshiSource {
    /// Build a source from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the API URL does not parse.
    pub fn from_config(
        config: &KalshiConfig,
        network: &HttpSettings,
        api_key: Option<&str>,
    ) -> Result<Self> {
        let base = Url::parse(&config.api_url)?;
        Ok(Self {
            http: PlatformHttp::new(Platform::Kalshi, network, api_key.map(AuthHeader::bearer)),
            markets_url: endpoint(&base, &["trade-api", "v2", "markets"])?,
            page_size: config.page_size.max(1),
            max_pages: config.max_pages.max(1),
        })
    }

    /// Fetch one page of open markets.
    pub async fn get_markets_page(&self, cursor: Option<&str>) -> Result<KalshiMarketsResponse> {
        let mut url = self.markets_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("status", "open")
                .append_pair("limit", &self.page_size.to_string());
            if let Some(cursor) = cursor {
                query.append_pair("cursor", cursor);
            }
        }

        debug!(url = %url, "Fetching markets page (Kalshi)");
        self.http.get_json(&url).await
    }
}

#[async_trait]
impl MarketSource for KalshiSource {
    fn platform(&self) -> Platform {
        Platform::Kalshi
    }

    async fn fetch_active_markets(&self) -> Result<Vec<MarketListing>> {
        let mut listings = Vec::new();
        let mut skipped = 0usize;
        let mut cursor: Option<String> = None;

        for _ in 0..self.max_pages {
            let page = self.get_markets_page(cursor.as_deref()).await?;
            cursor = page.next_cursor().map(str::to_string);

            for market in page.markets {
                if market.is_binary() {
                    listings.push(MarketListing::from(market));
                } else {
                    skipped += 1;
                }
            }

            if cursor.is_none() {
                break;
            }
        }

        if cursor.is_some() {
            warn!(
                max_pages = self.max_pages,
                count = listings.len(),
                "Kalshi page cap reached, listing is incomplete"
            );
        }

        info!(
            count = listings.len(),
            skipped_non_binary = skipped,
            "Fetched Kalshi markets"
        );
        Ok(listings)
    }
}

impl From<KalshiMarket> for MarketListing {
    fn from(m: KalshiMarket) -> Self {
        let outcomes = vec![
            OutcomeQuote::new("Yes", m.yes_price()),
            OutcomeQuote::new("No", m.no_price()),
        ];

        Self {
            platform: Platform::Kalshi,
            active: m.is_open(),
            id: m.ticker,
            question: m.title,
            resolution_time: m.close_time,
            outcomes,
            settlement_description: m.rules_primary,
            entity_hint: m.event_ticker,
        }
    }
}
