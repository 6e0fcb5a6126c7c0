//! Opportunity reporting view models for inbound adapters.
//!
//! The CLI and the HTTP endpoint both consume [`OpportunityQuery`] and
//! render the resulting [`OpportunityReport`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::opportunity::ArbitrageOpportunity;
use crate::error::Result;

/// Per-stage counts for one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Listings received from platform A.
    pub fetched_a: usize,

    /// Listings received from platform B.
    pub fetched_b: usize,

    /// Listings that normalized successfully (both platforms).
    pub normalized: usize,

    /// Listings dropped as malformed (both platforms).
    pub malformed: usize,

    /// Markets remaining after the deterministic filter (both platforms).
    pub comparable: usize,

    /// Cross-platform pairs passed to the matcher after pre-blocking.
    pub eligible_pairs: usize,

    /// Candidates accepted after confidence floor and tie-break.
    pub candidates: usize,

    /// Opportunities reported.
    pub opportunities: usize,

    /// True when the reasoning service failed and matching produced nothing.
    pub matching_degraded: bool,
}

/// Result of asking for the current opportunities.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OpportunityReport {
    /// The pipeline ran.
    Ready {
        run_id: Uuid,
        generated_at: DateTime<Utc>,
        opportunities: Vec<ArbitrageOpportunity>,
        stats: RunStats,
    },

    /// A platform integration is not available; no run was possible.
    NotAvailable {
        reason: String,
    },
}

impl OpportunityReport {
    /// Opportunities in the report, empty when not available.
    #[must_use]
    pub fn opportunities(&self) -> &[ArbitrageOpportunity] {
        match self {
            Self::Ready { opportunities, .. } => opportunities,
            Self::NotAvailable { .. } => &[],
        }
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

/// Read-side entry point for opportunity reports.
#[async_trait]
pub trait OpportunityQuery: Send + Sync {
    /// Run detection and return the report.
    ///
    /// # Errors
    ///
    /// Returns platform failures other than the not-implemented signal,
    /// which is reported as [`OpportunityReport::NotAvailable`].
    async fn get_opportunities(&self) -> Result<OpportunityReport>;
}
