//! Polymarket Gamma API client.
//!
//! Pages through `/markets?active=true&closed=false` by offset and turns
//! each [`GammaMarket`] into a [`MarketListing`].

use async_trait::async_trait;
use tracing::{debug, info, warn};
use url::Url;

use super::dto::response::GammaMarket;
use super::settings::PolymarketConfig;
use crate::adapter::outbound::http::{endpoint, AuthHeader, HttpSettings, PlatformHttp};
use crate::domain::platform::Platform;
use crate::error::Result;
use crate::port::outbound::source::{MarketListing, MarketSource, OutcomeQuote};

/// Header carrying the optional Polymarket API key.
const API_KEY_HEADER: &str = "POLY_API_KEY";

/// [`MarketSource`] backed by the Polymarket Gamma API.
#[derive(Debug)]
pub struct PolymarketSource {
    http: PlatformHttp,
    gamma_url: Url,
    page_size: usize,
    max_pages: usize,
}

impl PolymarketSource {
    /// Build a source from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the Gamma URL does not parse.
    pub fn from_config(
        config: &PolymarketConfig,
        network: &HttpSettings,
        api_key: Option<&str>,
    ) -> Result<Self> {
        let auth = api_key.map(|key| AuthHeader::new(API_KEY_HEADER, key));
        Ok(Self {
            http: PlatformHttp::new(Platform::Polymarket, network, auth),
            gamma_url: Url::parse(&config.gamma_api_url)?,
            page_size: config.page_size.max(1),
            max_pages: config.max_pages.max(1),
        })
    }

    /// Fetch one page of open markets starting at `offset`.
    pub async fn get_gamma_markets(&self, offset: usize) -> Result<Vec<GammaMarket>> {
        let mut url = endpoint(&self.gamma_url, &["markets"])?;
        url.query_pairs_mut()
            .append_pair("active", "true")
            .append_pair("closed", "false")
            .append_pair("limit", &self.page_size.to_string())
            .append_pair("offset", &offset.to_string());

        debug!(url = %url, "Fetching markets page (Gamma)");
        self.http.get_json(&url).await
    }
}

#[async_trait]
impl MarketSource for PolymarketSource {
    fn platform(&self) -> Platform {
        Platform::Polymarket
    }

    async fn fetch_active_markets(&self) -> Result<Vec<MarketListing>> {
        let mut listings = Vec::new();
        let mut exhausted = false;
        for page in 0..self.max_pages {
            let markets = self.get_gamma_markets(page * self.page_size).await?;
            exhausted = markets.len() < self.page_size;
            listings.extend(markets.into_iter().map(MarketListing::from));
            if exhausted {
                break;
            }
        }

        if !exhausted {
            warn!(
                max_pages = self.max_pages,
                count = listings.len(),
                "Polymarket page cap reached, listing may be incomplete"
            );
        }

        info!(count = listings.len(), "Fetched Polymarket markets");
        Ok(listings)
    }
}

impl From<GammaMarket> for MarketListing {
    fn from(m: GammaMarket) -> Self {
        let names = m.outcome_names();
        let prices = m.outcome_prices();

        let outcomes = if names.is_empty() {
            prices
                .into_iter()
                .map(|price| OutcomeQuote::new("", price))
                .collect()
        } else {
            names
                .into_iter()
                .enumerate()
                .map(|(i, name)| OutcomeQuote::new(name, prices.get(i).copied().flatten()))
                .collect()
        };

        Self {
            platform: Platform::Polymarket,
            active: m.is_open(),
            entity_hint: m.event_ticker().map(str::to_string),
            id: m.condition_id,
            question: m.question,
            resolution_time: m.end_date,
            outcomes,
            settlement_description: m.description,
        }
    }
}
