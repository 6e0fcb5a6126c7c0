//! Mock [`MarketSource`] implementations for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::platform::Platform;
use crate::error::{PlatformError, Result};
use crate::port::outbound::source::{MarketListing, MarketSource};

/// Returns the same listings, or the same error, on every fetch.
pub struct ScriptedSource {
    platform: Platform,
    response: std::result::Result<Vec<MarketListing>, PlatformError>,
    fetches: Arc<AtomicUsize>,
}

impl ScriptedSource {
    pub fn new(platform: Platform, listings: Vec<MarketListing>) -> Self {
        Self {
            platform,
            response: Ok(listings),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A source whose every fetch fails with `error`.
    pub fn failing(platform: Platform, error: PlatformError) -> Self {
        Self {
            platform,
            response: Err(error),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared counter of fetch calls.
    pub fn fetches(&self) -> Arc<AtomicUsize> {
        self.fetches.clone()
    }
}

#[async_trait]
impl MarketSource for ScriptedSource {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn fetch_active_markets(&self) -> Result<Vec<MarketListing>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.response.clone().map_err(Into::into)
    }
}
