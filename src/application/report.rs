//! Opportunity query service backing the CLI and HTTP endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use super::pipeline::Pipeline;
use crate::error::Result;
use crate::port::inbound::report::{OpportunityQuery, OpportunityReport};

/// Runs the pipeline on demand and shapes the result for reporting.
#[derive(Clone)]
pub struct OpportunityService {
    pipeline: Arc<Pipeline>,
}

impl OpportunityService {
    #[must_use]
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        Self { pipeline }
    }
}

#[async_trait]
impl OpportunityQuery for OpportunityService {
    async fn get_opportunities(&self) -> Result<OpportunityReport> {
        match self.pipeline.run().await {
            Ok(outcome) => Ok(OpportunityReport::Ready {
                run_id: outcome.run_id,
                generated_at: outcome.generated_at,
                opportunities: outcome.opportunities,
                stats: outcome.stats,
            }),
            Err(err) if err.is_not_implemented() => {
                warn!(error = %err, "Opportunity report not available");
                Ok(OpportunityReport::NotAvailable {
                    reason: err.to_string(),
                })
            }
            Err(err) => Err(err),
        }
    }
}
