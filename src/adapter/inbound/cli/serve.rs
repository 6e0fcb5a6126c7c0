//! Handler for the `serve` command.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::adapter::inbound::cli::command::ServeArgs;
use crate::adapter::inbound::cli::{config, output};
use crate::adapter::inbound::http;
use crate::application::report::OpportunityService;
use crate::error::{ConfigError, Result};
use crate::infrastructure::factory;

/// Execute the serve command.
pub async fn execute(args: &ServeArgs) -> Result<()> {
    let mut config = config::resolve(args.config.as_deref())?;
    if let Some(bind) = &args.bind {
        config.server.bind.clone_from(bind);
    }
    config.validate()?;
    config.init_logging();

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .map_err(|err: std::net::AddrParseError| ConfigError::InvalidValue {
            field: "server.bind",
            reason: err.to_string(),
        })?;

    let pipeline = factory::build_pipeline(&config)?;
    let service = Arc::new(OpportunityService::new(Arc::new(pipeline)));

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Listening", format!("http://{addr}"));
    output::field("Endpoint", "GET /api/opportunities");
    output::field("Matcher", config.matching.matcher);
    output::hint("press Ctrl+C to stop");

    http::serve(addr, service, http::shutdown_signal()).await
}
