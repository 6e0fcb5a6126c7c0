//! Placeholder source for a platform switched off in configuration.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::platform::Platform;
use crate::error::{PlatformError, Result};
use crate::port::outbound::source::{MarketListing, MarketSource};

/// Source that always reports the integration as not implemented.
#[derive(Debug, Clone, Copy)]
pub struct DisabledSource {
    platform: Platform,
}

impl DisabledSource {
    #[must_use]
    pub const fn new(platform: Platform) -> Self {
        Self { platform }
    }
}

#[async_trait]
impl MarketSource for DisabledSource {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn fetch_active_markets(&self) -> Result<Vec<MarketListing>> {
        debug!(platform = %self.platform, "Integration disabled");
        Err(PlatformError::NotImplemented {
            platform: self.platform,
        }
        .into())
    }
}
