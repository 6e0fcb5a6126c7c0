//! Kalshi trade API v2 response types.

use rust_decimal::Decimal;
use serde::Deserialize;

/// One page of `GET /trade-api/v2/markets`.
#[derive(Debug, Deserialize)]
pub struct KalshiMarketsResponse {
    #[serde(default)]
    pub markets: Vec<KalshiMarket>,
    /// Opaque cursor for the next page; empty or absent on the last page.
    #[serde(default)]
    pub cursor: Option<String>,
}

impl KalshiMarketsResponse {
    /// Cursor for the next page, if there is one.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        self.cursor.as_deref().filter(|c| !c.is_empty())
    }
}

/// A Kalshi market. Prices are integer cents.
#[derive(Debug, Deserialize)]
pub struct KalshiMarket {
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub event_ticker: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub market_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Time trading closes, used as the resolution time.
    #[serde(default)]
    pub close_time: Option<String>,
    #[serde(default)]
    pub yes_ask: Option<i64>,
    #[serde(default)]
    pub no_ask: Option<i64>,
    #[serde(default)]
    pub rules_primary: Option<String>,
}

impl KalshiMarket {
    /// Binary unless the API says otherwise.
    #[must_use]
    pub fn is_binary(&self) -> bool {
        self.market_type
            .as_deref()
            .map_or(true, |t| t.eq_ignore_ascii_case("binary"))
    }

    /// Open for trading. A missing status counts as open because the
    /// request already filters on `status=open`.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status
            .as_deref()
            .map_or(true, |s| matches!(s, "open" | "active"))
    }

    /// YES ask as a fraction of the $1 payout.
    #[must_use]
    pub fn yes_price(&self) -> Option<Decimal> {
        self.yes_ask.map(cents)
    }

    /// NO ask as a fraction of the $1 payout.
    #[must_use]
    pub fn no_price(&self) -> Option<Decimal> {
        self.no_ask.map(cents)
    }
}

fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}
