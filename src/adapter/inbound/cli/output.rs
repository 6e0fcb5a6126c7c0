//! Astral-style CLI output formatting.
//!
//! Provides consistent terminal output with support for JSON mode (for
//! scripting) and quiet mode. Styling follows the Astral tools aesthetic
//! with colored symbols and structured formatting.

use std::fmt::Display;
use std::io::IsTerminal;
use std::sync::{OnceLock, RwLock};

use owo_colors::{OwoColorize, Style};
use serde_json::json;
use tabled::settings::Style as TableStyle;
use tabled::{Table, Tabled};

use super::command::ColorChoice;
use crate::domain::opportunity::ArbitrageOpportunity;
use crate::port::inbound::report::RunStats;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Emit ANSI colors.
    pub color: bool,
}

impl OutputConfig {
    #[must_use]
    pub fn new(json: bool, quiet: bool, color: ColorChoice) -> Self {
        let color = match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
            }
        };
        Self { json, quiet, color }
    }
}

/// Global output configuration singleton.
static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn write_config(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

/// Check if regular (non-JSON) output should be suppressed.
fn regular_output_suppressed(config: OutputConfig) -> bool {
    !config.json && config.quiet
}

/// Apply `style` when colors are enabled.
fn paint(config: OutputConfig, value: impl Display, style: Style) -> String {
    if config.color && !config.json {
        value.style(style).to_string()
    } else {
        value.to_string()
    }
}

/// Emit a JSON line with type and payload structure.
fn emit_json_line(kind: &str, payload: serde_json::Value) {
    println!(
        "{}",
        json!({
            "type": kind,
            "payload": payload,
        })
    );
}

/// Apply output settings from global CLI flags.
///
/// Call this early in the CLI entry point.
pub fn configure(config: OutputConfig) {
    write_config(config);
}

/// Switch JSON mode on for the rest of the process.
pub fn enable_json() {
    let mut config = read_config();
    config.json = true;
    write_config(config);
}

#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

#[must_use]
pub fn is_quiet() -> bool {
    read_config().quiet
}

/// Print the application header with name and version.
pub fn header(version: &str) {
    let config = read_config();
    if config.json {
        emit_json_line(
            "header",
            json!({
                "app": "crossedge",
                "version": version,
            }),
        );
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!(
        "{} {}",
        paint(config, "crossedge", Style::new().bold()),
        paint(config, version, Style::new().dimmed())
    );
    println!();
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let config = read_config();
    let value = value.to_string();

    if config.json {
        emit_json_line(
            "field",
            json!({
                "label": label,
                "value": value,
            }),
        );
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!(
        "  {} {}",
        paint(config, format!("{label:<14}"), Style::new().dimmed()),
        value
    );
}

/// Print a success line.
pub fn success(message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("success", json!({ "message": message }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {} {}", paint(config, "✓", Style::new().green()), message);
}

/// Print a warning line. Shown even in quiet mode.
pub fn warning(message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("warning", json!({ "message": message }));
        return;
    }

    println!("  {} {}", paint(config, "⚠", Style::new().yellow()), message);
}

/// Print an error line to stderr.
pub fn error(message: &str) {
    let config = read_config();

    if config.json {
        eprintln!(
            "{}",
            json!({
                "type": "error",
                "payload": { "message": message },
            })
        );
        return;
    }

    eprintln!("  {} {}", paint(config, "×", Style::new().red()), message);
}

/// Print a section header.
pub fn section(title: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("section", json!({ "title": title }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!();
    println!("{}", paint(config, title, Style::new().bold()));
}

/// Print a note.
pub fn note(message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("note", json!({ "message": message }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {}", paint(config, message, Style::new().dimmed()));
}

/// Print a hint with "hint:" prefix.
pub fn hint(message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("hint", json!({ "message": message }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!(
        "  {}: {}",
        paint(config, "hint", Style::new().cyan().dimmed()),
        paint(config, message, Style::new().dimmed())
    );
}

/// Print multiple lines of content, each indented.
pub fn lines(content: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("lines", json!({ "content": content }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    for line in content.lines() {
        println!("  {line}");
    }
}

/// Emit a JSON value directly, pretty-printed.
pub fn json_output(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(_) => println!("{value}"),
    }
}

/// Format a highlighted value in cyan.
pub fn highlight(value: impl Display) -> String {
    paint(read_config(), value, Style::new().cyan())
}

/// Format a positive value in green.
pub fn positive(value: impl Display) -> String {
    paint(read_config(), value, Style::new().green())
}

#[derive(Tabled)]
struct OpportunityRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Kalshi")]
    market_a: String,
    #[tabled(rename = "Polymarket")]
    market_b: String,
    #[tabled(rename = "Hedge")]
    leg: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Edge (bps)")]
    edge_bps: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
    #[tabled(rename = "Risks")]
    risks: usize,
}

impl OpportunityRow {
    fn new(rank: usize, opportunity: &ArbitrageOpportunity) -> Self {
        Self {
            rank,
            market_a: opportunity.market_a().market_id().to_string(),
            market_b: opportunity.market_b().market_id().to_string(),
            leg: opportunity.leg().to_string(),
            cost: opportunity.combined_cost().to_string(),
            edge_bps: opportunity.edge_bps().to_string(),
            confidence: format!("{:.0}%", opportunity.confidence() * 100.0),
            risks: opportunity.risks().len(),
        }
    }
}

/// Render opportunities as a table.
#[must_use]
pub fn opportunity_table(opportunities: &[ArbitrageOpportunity]) -> String {
    let rows: Vec<OpportunityRow> = opportunities
        .iter()
        .enumerate()
        .map(|(index, opportunity)| OpportunityRow::new(index + 1, opportunity))
        .collect();
    Table::new(rows).with(TableStyle::rounded()).to_string()
}

/// Print the per-stage counts of a run.
pub fn run_stats(stats: &RunStats) {
    field("Fetched", format!("{} / {}", stats.fetched_a, stats.fetched_b));
    field(
        "Normalized",
        format!("{} ({} malformed)", stats.normalized, stats.malformed),
    );
    field("Comparable", stats.comparable);
    field("Pairs", stats.eligible_pairs);
    field("Candidates", stats.candidates);
    field("Opportunities", positive(stats.opportunities));
}
