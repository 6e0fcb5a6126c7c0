//! Normalized market representation shared across platforms.
//!
//! - [`NormalizedMarket`] - one binary market quote in canonical form
//! - [`NormalizedMarketBuilder`] - validating constructor used by the normalizer

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::error::DomainError;
use super::id::MarketId;
use super::money::{is_unit_interval, Price};
use super::platform::Platform;

/// A platform market in canonical form.
///
/// `yes_price` and `no_price` are independent quotes: their sum need not be
/// 1 because each side carries its own spread. Both are validated to lie in
/// `[0, 1]` at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedMarket {
    platform: Platform,
    market_id: MarketId,
    question: String,
    resolution_time: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::float")]
    yes_price: Price,
    #[serde(with = "rust_decimal::serde::float")]
    no_price: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    settlement_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    underlying_entity: Option<String>,
    active: bool,
    outcome_count: usize,
}

impl NormalizedMarket {
    /// Start building a market for the given platform and id.
    pub fn builder(platform: Platform, market_id: MarketId) -> NormalizedMarketBuilder {
        NormalizedMarketBuilder::new(platform, market_id)
    }

    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    #[must_use]
    pub const fn market_id(&self) -> &MarketId {
        &self.market_id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub const fn resolution_time(&self) -> DateTime<Utc> {
        self.resolution_time
    }

    #[must_use]
    pub const fn yes_price(&self) -> Price {
        self.yes_price
    }

    #[must_use]
    pub const fn no_price(&self) -> Price {
        self.no_price
    }

    #[must_use]
    pub fn settlement_description(&self) -> Option<&str> {
        self.settlement_description.as_deref()
    }

    #[must_use]
    pub fn underlying_entity(&self) -> Option<&str> {
        self.underlying_entity.as_deref()
    }

    /// Whether the platform reports the market as open for trading.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub const fn outcome_count(&self) -> usize {
        self.outcome_count
    }

    /// Check if this is a binary (YES/NO) market.
    #[must_use]
    pub const fn is_binary(&self) -> bool {
        self.outcome_count == 2
    }

    /// Absolute difference between this market's resolution time and another's.
    #[must_use]
    pub fn resolution_delta(&self, other: &Self) -> Duration {
        (self.resolution_time - other.resolution_time).abs()
    }

    /// Case-insensitive entity agreement.
    ///
    /// Returns `None` when either side has no entity tag, so callers can
    /// decide how to treat unknowns.
    #[must_use]
    pub fn same_entity(&self, other: &Self) -> Option<bool> {
        match (self.underlying_entity(), other.underlying_entity()) {
            (Some(a), Some(b)) => Some(a.eq_ignore_ascii_case(b)),
            _ => None,
        }
    }
}

/// Builder for [`NormalizedMarket`] that enforces the domain invariants.
#[derive(Debug, Clone)]
pub struct NormalizedMarketBuilder {
    platform: Platform,
    market_id: MarketId,
    question: Option<String>,
    resolution_time: Option<DateTime<Utc>>,
    yes_price: Option<Price>,
    no_price: Option<Price>,
    settlement_description: Option<String>,
    underlying_entity: Option<String>,
    active: bool,
    outcome_count: usize,
}

impl NormalizedMarketBuilder {
    fn new(platform: Platform, market_id: MarketId) -> Self {
        Self {
            platform,
            market_id,
            question: None,
            resolution_time: None,
            yes_price: None,
            no_price: None,
            settlement_description: None,
            underlying_entity: None,
            active: true,
            outcome_count: 2,
        }
    }

    pub fn question(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }

    pub fn resolution_time(mut self, at: DateTime<Utc>) -> Self {
        self.resolution_time = Some(at);
        self
    }

    /// Set both quotes at once.
    pub fn prices(mut self, yes: Price, no: Price) -> Self {
        self.yes_price = Some(yes);
        self.no_price = Some(no);
        self
    }

    pub fn yes_price(mut self, yes: Price) -> Self {
        self.yes_price = Some(yes);
        self
    }

    pub fn no_price(mut self, no: Price) -> Self {
        self.no_price = Some(no);
        self
    }

    pub fn settlement_description(mut self, text: Option<String>) -> Self {
        self.settlement_description = text.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn underlying_entity(mut self, entity: Option<String>) -> Self {
        self.underlying_entity = entity
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn outcome_count(mut self, count: usize) -> Self {
        self.outcome_count = count;
        self
    }

    /// Validate and build the market.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingField`] for an absent question,
    /// resolution time or price, and [`DomainError::PriceOutOfRange`] for a
    /// price outside `[0, 1]`.
    pub fn build(self) -> Result<NormalizedMarket, DomainError> {
        let question = self
            .question
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .ok_or(DomainError::MissingField { field: "question" })?;
        let resolution_time = self.resolution_time.ok_or(DomainError::MissingField {
            field: "resolution_time",
        })?;
        let yes_price = self
            .yes_price
            .ok_or(DomainError::MissingField { field: "yes_price" })?;
        let no_price = self
            .no_price
            .ok_or(DomainError::MissingField { field: "no_price" })?;

        if !is_unit_interval(yes_price) {
            return Err(DomainError::PriceOutOfRange {
                field: "yes_price",
                value: yes_price,
            });
        }
        if !is_unit_interval(no_price) {
            return Err(DomainError::PriceOutOfRange {
                field: "no_price",
                value: no_price,
            });
        }

        Ok(NormalizedMarket {
            platform: self.platform,
            market_id: self.market_id,
            question,
            resolution_time,
            yes_price,
            no_price,
            settlement_description: self.settlement_description,
            underlying_entity: self.underlying_entity,
            active: self.active,
            outcome_count: self.outcome_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn base() -> NormalizedMarketBuilder {
        NormalizedMarket::builder(Platform::Kalshi, MarketId::new("KX-1"))
            .question("Will the Fed cut rates in December?")
            .resolution_time(Utc.with_ymd_and_hms(2030, 12, 18, 19, 0, 0).unwrap())
            .prices(dec!(0.40), dec!(0.62))
    }

    #[test]
    fn builds_valid_market() {
        let market = base().build().unwrap();
        assert_eq!(market.platform(), Platform::Kalshi);
        assert_eq!(market.yes_price(), dec!(0.40));
        assert_eq!(market.no_price(), dec!(0.62));
        assert!(market.is_binary());
        assert!(market.is_active());
    }

    #[test]
    fn prices_need_not_sum_to_one() {
        let market = base().prices(dec!(0.55), dec!(0.52)).build().unwrap();
        assert_eq!(market.yes_price() + market.no_price(), dec!(1.07));
    }

    #[test]
    fn rejects_out_of_range_price() {
        let err = base().prices(dec!(1.2), dec!(0.1)).build().unwrap_err();
        assert_eq!(
            err,
            DomainError::PriceOutOfRange {
                field: "yes_price",
                value: dec!(1.2)
            }
        );
    }

    #[test]
    fn rejects_blank_question() {
        let err = base().question("   ").build().unwrap_err();
        assert_eq!(err, DomainError::MissingField { field: "question" });
    }

    #[test]
    fn rejects_missing_no_price() {
        let err = NormalizedMarket::builder(Platform::Polymarket, MarketId::new("0x1"))
            .question("Q?")
            .resolution_time(Utc::now())
            .yes_price(dec!(0.5))
            .build()
            .unwrap_err();
        assert_eq!(err, DomainError::MissingField { field: "no_price" });
    }

    #[test]
    fn blank_optional_text_becomes_none() {
        let market = base()
            .settlement_description(Some("  ".into()))
            .underlying_entity(Some(" ".into()))
            .build()
            .unwrap();
        assert!(market.settlement_description().is_none());
        assert!(market.underlying_entity().is_none());
    }

    #[test]
    fn same_entity_is_case_insensitive_and_unknown_without_tags() {
        let a = base().underlying_entity(Some("BTC".into())).build().unwrap();
        let b = base().underlying_entity(Some("btc".into())).build().unwrap();
        let c = base().build().unwrap();
        assert_eq!(a.same_entity(&b), Some(true));
        assert_eq!(a.same_entity(&c), None);
    }

    #[test]
    fn serializes_prices_as_numbers() {
        let json = serde_json::to_value(base().build().unwrap()).unwrap();
        assert_eq!(json["platform"], "kalshi");
        assert_eq!(json["yes_price"], 0.4);
        assert!(json.get("settlement_description").is_none());
    }
}
