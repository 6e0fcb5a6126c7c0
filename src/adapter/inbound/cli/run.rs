//! Handler for the `run` command.

use std::sync::Arc;

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::{config, output};
use crate::application::report::OpportunityService;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory;
use crate::port::inbound::report::{OpportunityQuery, OpportunityReport};

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    if args.json {
        output::enable_json();
    }

    let mut config = config::resolve(args.config.as_deref())?;
    apply_overrides(&mut config, args);
    config.validate()?;
    config.init_logging();

    print_startup(&config);

    let pipeline = factory::build_pipeline(&config)?;
    let service = OpportunityService::new(Arc::new(pipeline));
    let report = service.get_opportunities().await?;

    if output::is_json() {
        output::json_output(&serde_json::to_value(&report)?);
        return Ok(());
    }
    print_report(&report);
    Ok(())
}

fn apply_overrides(config: &mut Config, args: &RunArgs) {
    if let Some(min_edge_bps) = args.min_edge_bps {
        config.thresholds.min_edge_bps = min_edge_bps;
    }
    if let Some(min_confidence) = args.min_confidence {
        config.matching.min_confidence = min_confidence;
    }
}

fn print_startup(config: &Config) {
    if output::is_json() {
        return;
    }
    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Matcher", config.matching.matcher);
    output::field("Min edge", format!("{} bps", config.thresholds.min_edge_bps));
    output::field(
        "Min confidence",
        format!("{:.0}%", config.matching.min_confidence * 100.0),
    );
}

fn print_report(report: &OpportunityReport) {
    match report {
        OpportunityReport::NotAvailable { reason } => {
            output::warning(&format!("Opportunities not available: {reason}"));
        }
        OpportunityReport::Ready {
            run_id,
            generated_at,
            opportunities,
            stats,
        } => {
            output::section("Run");
            output::field("Run id", run_id);
            output::field("Generated", generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
            output::run_stats(stats);
            if stats.matching_degraded {
                output::warning("Matching service unavailable; results are incomplete");
            }

            output::section("Opportunities");
            if opportunities.is_empty() {
                output::note("No opportunities above the edge threshold");
                return;
            }
            output::lines(&output::opportunity_table(opportunities));
            for (index, opportunity) in opportunities.iter().enumerate() {
                output::section(&format!(
                    "{}. {}",
                    index + 1,
                    opportunity.market_a().question()
                ));
                output::lines(opportunity.description());
                output::field("Rationale", opportunity.rationale());
                for risk in opportunity.risks() {
                    output::note(&format!("- {risk}"));
                }
            }
            output::hint(&format!(
                "run {} for machine-readable output",
                output::highlight("crossedge run --json")
            ));
        }
    }
}
