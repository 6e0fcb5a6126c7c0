//! Gamma API response types.
//!
//! The Gamma API (`gamma-api.polymarket.com`) serves market discovery as a
//! flat JSON array. Outcome names and prices arrive as JSON-encoded strings
//! inside the JSON document and are decoded lazily.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

/// Market data from the Gamma API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GammaMarket {
    /// Condition ID, the stable market identifier.
    #[serde(default)]
    pub condition_id: String,
    /// Market question.
    #[serde(default)]
    pub question: Option<String>,
    /// Resolution timestamp (ISO 8601).
    #[serde(default)]
    pub end_date: Option<String>,
    /// Resolution rules text.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the market is active.
    #[serde(default)]
    pub active: bool,
    /// Whether the market is closed.
    #[serde(default)]
    pub closed: bool,
    /// JSON-encoded outcome names (e.g., `["Yes", "No"]`).
    #[serde(default)]
    pub outcomes: Option<String>,
    /// JSON-encoded outcome prices (e.g., `["0.65", "0.35"]`).
    #[serde(default)]
    pub outcome_prices: Option<String>,
    /// Parent events; the first one's ticker groups related markets.
    #[serde(default)]
    pub events: Vec<GammaEvent>,
}

/// Event summary embedded in a Gamma market.
#[derive(Debug, Deserialize)]
pub struct GammaEvent {
    #[serde(default)]
    pub ticker: Option<String>,
}

impl GammaMarket {
    /// Open for trading: active and not closed.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.active && !self.closed
    }

    /// Ticker of the parent event, if any.
    #[must_use]
    pub fn event_ticker(&self) -> Option<&str> {
        self.events.first().and_then(|e| e.ticker.as_deref())
    }

    /// Parse the JSON-encoded outcome names.
    pub fn outcome_names(&self) -> Vec<String> {
        self.decode_list(self.outcomes.as_deref(), "outcomes")
    }

    /// Parse the JSON-encoded outcome prices.
    ///
    /// Positions are preserved: an entry that is not a decimal becomes
    /// `None` rather than shifting later prices onto the wrong outcome.
    pub fn outcome_prices(&self) -> Vec<Option<Decimal>> {
        self.decode_list(self.outcome_prices.as_deref(), "outcome_prices")
            .iter()
            .map(|raw| Decimal::from_str(raw.trim()).ok())
            .collect()
    }

    fn decode_list(&self, raw: Option<&str>, field: &'static str) -> Vec<String> {
        raw.and_then(|s| {
            serde_json::from_str::<Vec<String>>(s)
                .map_err(|e| {
                    debug!(
                        error = %e,
                        raw = %s,
                        condition_id = %self.condition_id,
                        field,
                        "Failed to parse JSON-encoded list"
                    );
                })
                .ok()
        })
        .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn gamma_market_deserializes_from_api_response() {
        let json = r#"{
            "conditionId": "0xabc123",
            "question": "Will Bitcoin close above $100k on Dec 31?",
            "endDate": "2030-12-31T12:00:00Z",
            "description": "Resolves YES if the Coinbase BTC-USD close is above $100,000.",
            "active": true,
            "closed": false,
            "outcomes": "[\"Yes\", \"No\"]",
            "outcomePrices": "[\"0.65\", \"0.35\"]",
            "clobTokenIds": "[\"token-yes\", \"token-no\"]",
            "volume24hr": 8456.03,
            "events": [{"ticker": "bitcoin-above-100k", "title": "BTC"}]
        }"#;

        let market: GammaMarket = serde_json::from_str(json).unwrap();

        assert_eq!(market.condition_id, "0xabc123");
        assert_eq!(market.end_date.as_deref(), Some("2030-12-31T12:00:00Z"));
        assert!(market
            .description
            .as_deref()
            .unwrap_or_default()
            .contains("Coinbase"));
        assert!(market.is_open());
        assert_eq!(market.event_ticker(), Some("bitcoin-above-100k"));
        assert_eq!(market.outcome_names(), vec!["Yes", "No"]);
        assert_eq!(
            market.outcome_prices(),
            vec![Some(dec!(0.65)), Some(dec!(0.35))]
        );
    }

    #[test]
    fn gamma_market_handles_missing_optional_fields() {
        let json = r#"{ "conditionId": "0xdef456", "active": true, "closed": false }"#;

        let market: GammaMarket = serde_json::from_str(json).unwrap();

        assert!(market.question.is_none());
        assert!(market.end_date.is_none());
        assert!(market.event_ticker().is_none());
        assert!(market.outcome_names().is_empty());
        assert!(market.outcome_prices().is_empty());
    }

    #[test]
    fn closed_market_is_not_open() {
        let json = r#"{ "conditionId": "0x1", "active": true, "closed": true }"#;
        let market: GammaMarket = serde_json::from_str(json).unwrap();
        assert!(!market.is_open());
    }

    #[test]
    fn bad_price_entry_keeps_its_position() {
        let json = r#"{
            "conditionId": "0x2",
            "outcomes": "[\"Yes\", \"No\"]",
            "outcomePrices": "[\"n/a\", \"0.40\"]"
        }"#;
        let market: GammaMarket = serde_json::from_str(json).unwrap();
        assert_eq!(market.outcome_prices(), vec![None, Some(dec!(0.40))]);
    }

    #[test]
    fn undecodable_list_is_empty() {
        let json = r#"{ "conditionId": "0x3", "outcomes": "Yes,No" }"#;
        let market: GammaMarket = serde_json::from_str(json).unwrap();
        assert!(market.outcome_names().is_empty());
    }
}
