//! Offline keyword-overlap matcher.
//!
//! Scores each pair by Jaccard similarity of the questions' content words.
//! Numbers must agree when both questions carry them, so "$100k" never
//! matches "$120k". A shared entity tag adds a small bonus.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::error::Result;
use crate::port::outbound::matcher::{MarketSummary, ProposedMatch, SemanticMatcher};

/// Bonus added when both markets carry the same entity tag.
const ENTITY_BONUS: f64 = 0.1;

/// Default minimum score for a proposal.
pub const DEFAULT_MIN_SCORE: f64 = 0.5;

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "at", "be", "by", "close", "does", "end", "for", "in", "is", "it",
    "of", "on", "or", "than", "the", "this", "to", "will", "with",
];

/// Token-overlap [`SemanticMatcher`] that needs no external service.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    min_score: f64,
}

impl KeywordMatcher {
    #[must_use]
    pub fn new(min_score: f64) -> Self {
        Self {
            min_score: min_score.clamp(0.0, 1.0),
        }
    }

    /// Similarity of two questions in `[0, 1]`, or `None` when their
    /// numbers disagree.
    fn score(&self, a: &MarketSummary, b: &MarketSummary) -> Option<(f64, Vec<String>)> {
        let tokens_a = Tokens::from_question(&a.question);
        let tokens_b = Tokens::from_question(&b.question);

        if !tokens_a.numbers.is_empty()
            && !tokens_b.numbers.is_empty()
            && tokens_a.numbers != tokens_b.numbers
        {
            return None;
        }

        let union = tokens_a.words.union(&tokens_b.words).count();
        if union == 0 {
            return None;
        }
        let shared: Vec<String> = tokens_a.words.intersection(&tokens_b.words).cloned().collect();

        #[allow(clippy::cast_precision_loss)]
        let mut score = shared.len() as f64 / union as f64;
        if a.underlying_entity.is_some() && a.underlying_entity == b.underlying_entity {
            score += ENTITY_BONUS;
        }
        Some((score.min(1.0), shared))
    }
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SCORE)
    }
}

#[async_trait]
impl SemanticMatcher for KeywordMatcher {
    fn name(&self) -> &'static str {
        "keyword"
    }

    async fn propose_matches(
        &self,
        markets_a: &[MarketSummary],
        markets_b: &[MarketSummary],
    ) -> Result<Vec<ProposedMatch>> {
        let mut proposals = Vec::new();
        for (index_a, a) in markets_a.iter().enumerate() {
            for (index_b, b) in markets_b.iter().enumerate() {
                let Some((score, shared)) = self.score(a, b) else {
                    continue;
                };
                if score >= self.min_score {
                    let rationale =
                        format!("keyword overlap {score:.2} (shared: {})", shared.join(", "));
                    proposals.push(ProposedMatch::new(index_a, index_b, score, rationale));
                }
            }
        }
        Ok(proposals)
    }

    fn batch_limit(&self) -> usize {
        200
    }
}

/// Question split into content words and numbers.
struct Tokens {
    words: BTreeSet<String>,
    numbers: BTreeSet<String>,
}

impl Tokens {
    fn from_question(question: &str) -> Self {
        // Thousands separators go first so "$100,000" stays one number.
        let cleaned: String = question
            .to_lowercase()
            .replace(',', "")
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '.' { c } else { ' ' })
            .collect();

        let mut words = BTreeSet::new();
        let mut numbers = BTreeSet::new();
        for raw in cleaned.split_whitespace() {
            let token = raw.trim_matches('.');
            if token.is_empty() || STOP_WORDS.contains(&token) {
                continue;
            }
            if token.chars().any(|c| c.is_ascii_digit()) {
                let number = expand_number(token);
                numbers.insert(number.clone());
                words.insert(number);
            } else {
                words.insert(token.to_string());
            }
        }
        Self { words, numbers }
    }
}

/// Expand `k`/`m` suffixes so "100k" and "100000" compare equal.
fn expand_number(token: &str) -> String {
    let (digits, multiplier) = match token.strip_suffix('k') {
        Some(rest) => (rest, 1_000u64),
        None => match token.strip_suffix('m') {
            Some(rest) => (rest, 1_000_000u64),
            None => (token, 1),
        },
    };
    match digits.parse::<u64>() {
        Ok(value) => value.saturating_mul(multiplier).to_string(),
        Err(_) => token.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::domain::id::MarketId;

    fn summary(id: &str, question: &str, entity: Option<&str>) -> MarketSummary {
        MarketSummary {
            id: MarketId::new(id),
            question: question.into(),
            resolution_time: Utc::now(),
            settlement_description: None,
            underlying_entity: entity.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn matches_rephrased_question() {
        let a = vec![summary("K1", "Will Bitcoin close above $100,000 on Dec 31?", Some("BTC"))];
        let b = vec![summary("P1", "Bitcoin above $100k on December 31", Some("BTC"))];

        let proposals = KeywordMatcher::default().propose_matches(&a, &b).await.unwrap();

        assert_eq!(proposals.len(), 1);
        assert_eq!((proposals[0].index_a, proposals[0].index_b), (0, 0));
        assert!(proposals[0].confidence >= DEFAULT_MIN_SCORE);
        assert!(proposals[0].rationale.contains("bitcoin"));
    }

    #[tokio::test]
    async fn different_thresholds_never_match() {
        let a = vec![summary("K1", "Bitcoin above $100k on Dec 31", Some("BTC"))];
        let b = vec![summary("P1", "Bitcoin above $120k on Dec 31", Some("BTC"))];

        let proposals = KeywordMatcher::new(0.0).propose_matches(&a, &b).await.unwrap();

        assert!(proposals.is_empty());
    }

    #[tokio::test]
    async fn unrelated_questions_fall_below_floor() {
        let a = vec![summary("K1", "Will the Fed cut rates in March?", Some("FED"))];
        let b = vec![summary("P1", "Will Ethereum flip Bitcoin by market cap?", None)];

        let proposals = KeywordMatcher::default().propose_matches(&a, &b).await.unwrap();

        assert!(proposals.is_empty());
    }

    #[test]
    fn entity_bonus_is_capped() {
        let matcher = KeywordMatcher::default();
        let a = summary("K1", "Fed cuts rates", Some("FED"));
        let b = summary("P1", "Fed cuts rates", Some("FED"));

        let (score, _) = matcher.score(&a, &b).unwrap();

        assert!((score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn numbers_expand_suffixes() {
        assert_eq!(expand_number("100k"), "100000");
        assert_eq!(expand_number("2m"), "2000000");
        assert_eq!(expand_number("2030"), "2030");
        assert_eq!(expand_number("4.5"), "4.5");
    }

    #[test]
    fn stop_words_are_ignored() {
        let tokens = Tokens::from_question("Will the Fed cut in March?");
        assert!(tokens.words.contains("fed"));
        assert!(!tokens.words.contains("the"));
        assert!(!tokens.words.contains("will"));
    }
}
