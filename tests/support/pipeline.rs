//! Pipeline wiring for integration tests.

use std::sync::Arc;

use crossedge::application::pipeline::Pipeline;
use crossedge::domain::platform::Platform;
use crossedge::port::outbound::matcher::SemanticMatcher;
use crossedge::port::outbound::source::{MarketListing, MarketSource};
use crossedge::testkit;
use crossedge::testkit::source::ScriptedSource;

/// A pipeline over two scripted sources with fast retries.
pub fn pipeline(
    source_a: impl MarketSource + 'static,
    source_b: impl MarketSource + 'static,
    matcher: impl SemanticMatcher + 'static,
) -> Pipeline {
    Pipeline::try_new(
        Arc::new(source_a),
        Arc::new(source_b),
        Arc::new(matcher),
        testkit::config::pipeline(),
    )
    .expect("valid pipeline")
}

pub fn kalshi(listings: Vec<MarketListing>) -> ScriptedSource {
    ScriptedSource::new(Platform::Kalshi, listings)
}

pub fn polymarket(listings: Vec<MarketListing>) -> ScriptedSource {
    ScriptedSource::new(Platform::Polymarket, listings)
}
