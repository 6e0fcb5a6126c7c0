//! LLM-backed semantic matcher.
//!
//! Markets are shown to the model under short reference ids (`A1`, `B3`)
//! which are mapped back to positions when parsing the reply. Prices are
//! never part of the prompt.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::port::outbound::llm::Llm;
use crate::port::outbound::matcher::{MarketSummary, ProposedMatch, SemanticMatcher};

/// Settlement text is cut to this many characters in the prompt.
const MAX_SETTLEMENT_CHARS: usize = 400;

/// Default number of markets per side in one prompt.
pub const DEFAULT_BATCH_LIMIT: usize = 15;

/// Semantic matcher that delegates equivalence judgements to an [`Llm`].
pub struct LlmMatcher {
    llm: Arc<dyn Llm>,
    batch_limit: usize,
}

impl LlmMatcher {
    pub fn new(llm: Arc<dyn Llm>) -> Self {
        Self {
            llm,
            batch_limit: DEFAULT_BATCH_LIMIT,
        }
    }

    #[must_use]
    pub fn with_batch_limit(mut self, limit: usize) -> Self {
        self.batch_limit = limit.max(1);
        self
    }

    fn build_prompt(&self, markets_a: &[MarketSummary], markets_b: &[MarketSummary]) -> String {
        let list_a = describe_all("A", markets_a);
        let list_b = describe_all("B", markets_b);

        format!(
            r#"You compare prediction markets listed on two different platforms.
Decide which market in list A and which market in list B resolve on exactly
the same real-world event, with the same YES condition and the same
settlement source.

## List A
{list_a}

## List B
{list_b}

## Output (JSON only)
```json
{{
  "matches": [
    {{
      "a": "A1",
      "b": "B2",
      "confidence": 0.93,
      "rationale": "Both resolve YES if BTC closes above $100k on Dec 31 per Coinbase"
    }}
  ]
}}
```

Rules:
- Use the ids exactly as shown (A1, B1, ...)
- Each A and each B market may appear in at most one match
- Different thresholds, dates, or settlement sources are NOT the same event
- confidence is a number between 0 and 1
- Return an empty array if nothing matches
"#
        )
    }

    fn parse_response(
        &self,
        response: &str,
        markets_a: &[MarketSummary],
        markets_b: &[MarketSummary],
    ) -> Result<Vec<ProposedMatch>> {
        let json_str = extract_json(response)?;
        let parsed: LlmResponse = serde_json::from_str(json_str)
            .map_err(|e| Error::Parse(format!("Invalid matcher JSON: {e}")))?;

        let index_a = short_ids("A", markets_a.len());
        let index_b = short_ids("B", markets_b.len());

        let proposals = parsed
            .matches
            .into_iter()
            .filter_map(|raw| {
                let (Some(&a), Some(&b)) = (
                    index_a.get(raw.a.trim().to_ascii_uppercase().as_str()),
                    index_b.get(raw.b.trim().to_ascii_uppercase().as_str()),
                ) else {
                    warn!(a = %raw.a, b = %raw.b, "Matcher referenced unknown market ids");
                    return None;
                };
                if !(0.0..=1.0).contains(&raw.confidence) {
                    warn!(
                        a = %raw.a,
                        b = %raw.b,
                        confidence = raw.confidence,
                        "Matcher returned confidence outside [0, 1]"
                    );
                    return None;
                }
                Some(ProposedMatch::new(a, b, raw.confidence, raw.rationale))
            })
            .collect();

        Ok(proposals)
    }
}

#[async_trait]
impl SemanticMatcher for LlmMatcher {
    fn name(&self) -> &'static str {
        "llm"
    }

    async fn propose_matches(
        &self,
        markets_a: &[MarketSummary],
        markets_b: &[MarketSummary],
    ) -> Result<Vec<ProposedMatch>> {
        if markets_a.is_empty() || markets_b.is_empty() {
            return Ok(vec![]);
        }

        let prompt = self.build_prompt(markets_a, markets_b);
        let response = self.llm.complete(&prompt).await?;
        debug!(
            provider = self.llm.name(),
            markets_a = markets_a.len(),
            markets_b = markets_b.len(),
            "LLM matching complete"
        );

        self.parse_response(&response, markets_a, markets_b)
    }

    fn batch_limit(&self) -> usize {
        self.batch_limit
    }
}

fn describe_all(prefix: &str, markets: &[MarketSummary]) -> String {
    markets
        .iter()
        .enumerate()
        .map(|(i, m)| describe(&format!("{prefix}{}", i + 1), m))
        .collect::<Vec<_>>()
        .join("\n")
}

fn describe(short_id: &str, market: &MarketSummary) -> String {
    let mut text = format!(
        "{short_id}: {}\n   Resolves: {}",
        market.question,
        market.resolution_time.format("%Y-%m-%d %H:%M UTC")
    );
    if let Some(entity) = &market.underlying_entity {
        text.push_str(&format!("\n   Entity: {entity}"));
    }
    if let Some(rules) = &market.settlement_description {
        let rules: String = rules.chars().take(MAX_SETTLEMENT_CHARS).collect();
        text.push_str(&format!("\n   Settlement: {}", rules.replace('\n', " ")));
    }
    text
}

fn short_ids(prefix: &str, len: usize) -> HashMap<String, usize> {
    (0..len).map(|i| (format!("{prefix}{}", i + 1), i)).collect()
}

fn extract_json(text: &str) -> Result<&str> {
    if let Some(start) = text.find("```json") {
        let start = start + 7;
        let end = text[start..]
            .find("```")
            .map_or(text.len(), |i| start + i);
        Ok(text[start..end].trim())
    } else if let Some(start) = text.find('{') {
        text.rfind('}')
            .filter(|&end| end > start)
            .map(|end| &text[start..=end])
            .ok_or_else(|| Error::Parse("Unbalanced JSON in matcher response".into()))
    } else {
        Err(Error::Parse("No JSON found in matcher response".into()))
    }
}

#[derive(Deserialize)]
struct LlmResponse {
    #[serde(default)]
    matches: Vec<RawMatch>,
}

#[derive(Deserialize)]
struct RawMatch {
    a: String,
    b: String,
    confidence: f64,
    #[serde(default)]
    rationale: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;

    use crate::domain::id::MarketId;

    struct MockLlm {
        response: String,
        prompts: Mutex<Vec<String>>,
    }

    impl MockLlm {
        fn new(response: impl Into<String>) -> Self {
            Self {
                response: response.into(),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Llm for MockLlm {
        fn name(&self) -> &'static str {
            "mock"
        }

        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.response.clone())
        }
    }

    fn summary(id: &str, question: &str) -> MarketSummary {
        MarketSummary {
            id: MarketId::new(id),
            question: question.into(),
            resolution_time: Utc.with_ymd_and_hms(2030, 12, 31, 22, 0, 0).unwrap(),
            settlement_description: Some("Per the official source.".into()),
            underlying_entity: Some("BTC".into()),
        }
    }

    fn markets() -> (Vec<MarketSummary>, Vec<MarketSummary>) {
        (
            vec![
                summary("KXBTC-100K", "Bitcoin above $100k on Dec 31?"),
                summary("KXETH-5K", "Ethereum above $5k on Dec 31?"),
            ],
            vec![
                summary("0xeth", "Will ETH close above $5,000 in 2030?"),
                summary("0xbtc", "Will BTC close above $100,000 in 2030?"),
            ],
        )
    }

    #[tokio::test]
    async fn maps_short_ids_to_positions() {
        let response = r#"Here you go:
```json
{"matches": [
  {"a": "A1", "b": "B2", "confidence": 0.94, "rationale": "Same BTC threshold"},
  {"a": "a2", "b": "b1", "confidence": 0.9, "rationale": "Same ETH threshold"}
]}
```"#;
        let matcher = LlmMatcher::new(Arc::new(MockLlm::new(response)));
        let (a, b) = markets();

        let proposals = matcher.propose_matches(&a, &b).await.unwrap();

        assert_eq!(
            proposals,
            vec![
                ProposedMatch::new(0, 1, 0.94, "Same BTC threshold"),
                ProposedMatch::new(1, 0, 0.9, "Same ETH threshold"),
            ]
        );
    }

    #[tokio::test]
    async fn drops_unknown_ids_and_bad_confidence() {
        let response = r#"{"matches": [
            {"a": "A9", "b": "B1", "confidence": 0.9},
            {"a": "A1", "b": "B2", "confidence": 1.7},
            {"a": "A2", "b": "B1", "confidence": 0.8, "rationale": "ok"}
        ]}"#;
        let matcher = LlmMatcher::new(Arc::new(MockLlm::new(response)));
        let (a, b) = markets();

        let proposals = matcher.propose_matches(&a, &b).await.unwrap();

        assert_eq!(proposals, vec![ProposedMatch::new(1, 0, 0.8, "ok")]);
    }

    #[tokio::test]
    async fn prompt_has_no_prices_and_lists_both_sides() {
        let llm = Arc::new(MockLlm::new(r#"{"matches": []}"#));
        let matcher = LlmMatcher::new(llm.clone());
        let (a, b) = markets();

        let proposals = matcher.propose_matches(&a, &b).await.unwrap();
        assert!(proposals.is_empty());

        let prompts = llm.prompts.lock().unwrap();
        let prompt = &prompts[0];
        assert!(prompt.contains("A1: Bitcoin above $100k on Dec 31?"));
        assert!(prompt.contains("B2: Will BTC close above $100,000 in 2030?"));
        assert!(prompt.contains("Resolves: 2030-12-31 22:00 UTC"));
        assert!(!prompt.to_lowercase().contains("price"));
    }

    #[tokio::test]
    async fn empty_side_skips_the_call() {
        let llm = Arc::new(MockLlm::new("not json"));
        let matcher = LlmMatcher::new(llm.clone());
        let (a, _) = markets();

        assert!(matcher.propose_matches(&a, &[]).await.unwrap().is_empty());
        assert!(llm.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_json_reply_is_a_parse_error() {
        let matcher = LlmMatcher::new(Arc::new(MockLlm::new("I cannot help with that")));
        let (a, b) = markets();

        let err = matcher.propose_matches(&a, &b).await.unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[tokio::test]
    async fn closing_brace_before_opening_is_a_parse_error() {
        let matcher = LlmMatcher::new(Arc::new(MockLlm::new("No matches}. Output: {")));
        let (a, b) = markets();

        let err = matcher.propose_matches(&a, &b).await.unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn batch_limit_is_at_least_one() {
        let matcher = LlmMatcher::new(Arc::new(MockLlm::new(""))).with_batch_limit(0);
        assert_eq!(matcher.batch_limit(), 1);
    }
}
