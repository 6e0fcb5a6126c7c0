//! Canonical entity tagging.
//!
//! Platforms tag markets inconsistently (Kalshi series tickers, Polymarket
//! free text), so entities are recognized from the question text and, as a
//! fallback, from a ticker-style hint. A tag is only assigned when exactly
//! one known entity is found; ambiguous or unknown markets stay untagged and
//! are never blocked on entity.

/// A recognizable underlying with its question aliases and ticker prefixes.
struct KnownEntity {
    tag: &'static str,
    aliases: &'static [&'static str],
    ticker_prefixes: &'static [&'static str],
}

const KNOWN_ENTITIES: &[KnownEntity] = &[
    KnownEntity {
        tag: "BTC",
        aliases: &["bitcoin", "btc"],
        ticker_prefixes: &["BTC"],
    },
    KnownEntity {
        tag: "ETH",
        aliases: &["ethereum", "eth", "ether"],
        ticker_prefixes: &["ETH"],
    },
    KnownEntity {
        tag: "SOL",
        aliases: &["solana"],
        ticker_prefixes: &["SOL"],
    },
    KnownEntity {
        tag: "FED",
        aliases: &["fed", "fomc", "federal reserve", "fed funds"],
        ticker_prefixes: &["FED", "FOMC"],
    },
    KnownEntity {
        tag: "CPI",
        aliases: &["cpi", "inflation"],
        ticker_prefixes: &["CPI"],
    },
    KnownEntity {
        tag: "GDP",
        aliases: &["gdp"],
        ticker_prefixes: &["GDP"],
    },
    KnownEntity {
        tag: "SPX",
        aliases: &["s&p 500", "s&p", "spx", "sp500"],
        ticker_prefixes: &["INX", "SPX"],
    },
    KnownEntity {
        tag: "NASDAQ",
        aliases: &["nasdaq", "nasdaq 100", "ndx"],
        ticker_prefixes: &["NASDAQ", "NDX"],
    },
    KnownEntity {
        tag: "OIL",
        aliases: &["crude oil", "wti", "oil"],
        ticker_prefixes: &["WTI", "OIL"],
    },
    KnownEntity {
        tag: "GOLD",
        aliases: &["gold"],
        ticker_prefixes: &["GOLD"],
    },
    KnownEntity {
        tag: "UNEMPLOYMENT",
        aliases: &["unemployment", "jobless"],
        ticker_prefixes: &["U3", "UNEMP"],
    },
];

/// Recognize a canonical entity tag for a market.
///
/// The question text wins; the hint is consulted only when the question
/// yields nothing.
#[must_use]
pub fn recognize(question: &str, hint: Option<&str>) -> Option<String> {
    from_question(question)
        .or_else(|| hint.and_then(from_ticker))
        .map(str::to_string)
}

fn from_question(question: &str) -> Option<&'static str> {
    let padded = format!(" {} ", normalize(question));
    unique(
        KNOWN_ENTITIES
            .iter()
            .filter(|e| {
                e.aliases
                    .iter()
                    .any(|alias| padded.contains(&format!(" {alias} ")))
            })
            .map(|e| e.tag),
    )
}

fn from_ticker(hint: &str) -> Option<&'static str> {
    let upper = hint.trim().to_ascii_uppercase();
    let stem = upper.strip_prefix("KX").unwrap_or(&upper);
    unique(
        KNOWN_ENTITIES
            .iter()
            .filter(|e| e.ticker_prefixes.iter().any(|p| stem.starts_with(p)))
            .map(|e| e.tag),
    )
}

/// Lowercase and collapse everything except alphanumerics and `&` to spaces.
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '&' { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn unique(mut tags: impl Iterator<Item = &'static str>) -> Option<&'static str> {
    let first = tags.next()?;
    if tags.all(|t| t == first) {
        Some(first)
    } else {
        None
    }
}
