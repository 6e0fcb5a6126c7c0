//! Component factory: builds sources, matcher and pipeline from [`Config`].

use std::sync::Arc;

use tracing::{info, warn};

use super::config::llm::LlmProvider;
use super::config::matching::MatcherKind;
use super::config::settings::Config;
use crate::adapter::outbound::disabled::DisabledSource;
use crate::adapter::outbound::kalshi::KalshiSource;
use crate::adapter::outbound::llm::anthropic::Anthropic;
use crate::adapter::outbound::llm::openai::OpenAi;
use crate::adapter::outbound::matcher::{KeywordMatcher, LlmMatcher};
use crate::adapter::outbound::polymarket::PolymarketSource;
use crate::application::pipeline::Pipeline;
use crate::domain::platform::Platform;
use crate::error::{ConfigError, Error, Result};
use crate::port::outbound::llm::Llm;
use crate::port::outbound::matcher::SemanticMatcher;
use crate::port::outbound::source::MarketSource;

/// Build the platform A (Kalshi) source.
///
/// # Errors
///
/// Returns an error if the configured URL is invalid.
pub fn build_kalshi_source(config: &Config) -> Result<Arc<dyn MarketSource>> {
    if !config.kalshi.enabled {
        warn!(platform = %Platform::Kalshi, "Integration disabled in configuration");
        return Ok(Arc::new(DisabledSource::new(Platform::Kalshi)));
    }
    let source = KalshiSource::from_config(
        &config.kalshi,
        &config.network,
        config.secrets.kalshi_api_key.as_deref(),
    )?;
    Ok(Arc::new(source))
}

/// Build the platform B (Polymarket) source.
///
/// # Errors
///
/// Returns an error if the configured URL is invalid.
pub fn build_polymarket_source(config: &Config) -> Result<Arc<dyn MarketSource>> {
    if !config.polymarket.enabled {
        warn!(platform = %Platform::Polymarket, "Integration disabled in configuration");
        return Ok(Arc::new(DisabledSource::new(Platform::Polymarket)));
    }
    let source = PolymarketSource::from_config(
        &config.polymarket,
        &config.network,
        config.secrets.polymarket_api_key.as_deref(),
    )?;
    Ok(Arc::new(source))
}

/// Build the LLM client for the configured provider.
///
/// # Errors
///
/// Returns [`ConfigError::MissingField`] naming the API key variable when it
/// is not set.
pub fn build_llm_client(config: &Config) -> Result<Arc<dyn Llm>> {
    let timeout = config.llm_timeout();
    let client: Arc<dyn Llm> = match config.llm.provider {
        LlmProvider::Anthropic => {
            let api_key = api_key("ANTHROPIC_API_KEY")?;
            let settings = &config.llm.anthropic;
            Arc::new(
                Anthropic::new(api_key, &settings.model, settings.max_tokens, settings.temperature)
                    .with_timeout(timeout),
            )
        }
        LlmProvider::OpenAi => {
            let api_key = api_key("OPENAI_API_KEY")?;
            let settings = &config.llm.openai;
            Arc::new(
                OpenAi::new(api_key, &settings.model, settings.max_tokens, settings.temperature)
                    .with_timeout(timeout),
            )
        }
    };

    info!(provider = client.name(), "LLM client initialized");
    Ok(client)
}

/// Build the configured semantic matcher.
///
/// # Errors
///
/// Fails when the LLM matcher is selected without its API key.
pub fn build_matcher(config: &Config) -> Result<Arc<dyn SemanticMatcher>> {
    let matcher: Arc<dyn SemanticMatcher> = match config.matching.matcher {
        MatcherKind::Llm => Arc::new(
            LlmMatcher::new(build_llm_client(config)?).with_batch_limit(config.matching.batch_size),
        ),
        MatcherKind::Keyword => Arc::new(KeywordMatcher::new(config.matching.keyword_min_score)),
    };
    info!(matcher = matcher.name(), "Semantic matcher initialized");
    Ok(matcher)
}

/// Wire the full detection pipeline.
///
/// # Errors
///
/// Propagates source, matcher, and threshold validation failures.
pub fn build_pipeline(config: &Config) -> Result<Pipeline> {
    Pipeline::try_new(
        build_kalshi_source(config)?,
        build_polymarket_source(config)?,
        build_matcher(config)?,
        config.pipeline(),
    )
}

fn api_key(var: &'static str) -> Result<String> {
    std::env::var(var)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or(Error::Config(ConfigError::MissingField { field: var }))
}
