//! Wayplan - conversational travel plan explorer
//!
//! CLI entry point: one-shot plan requests, the chat REPL, the terminal UI,
//! and destination catalog search.

use std::fs;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use eyre::{Context, Result};
use tracing::{debug, info};

use placeindex::Catalog;
use plancore::{DateRange, synthesize};
use wayplan::cli::{Cli, Command};
use wayplan::client::{FetchPlanRequest, PlannerClient};
use wayplan::config::Config;
use wayplan::{HttpPlannerClient, output, repl, tui};

fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wayplan")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("wayplan.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    debug!(base_url = %config.service.base_url, "main: config loaded");

    match cli.command {
        Some(Command::Plan {
            destination,
            start,
            end,
            origin,
            budget,
            style,
            preferences,
            dislikes,
            json,
        }) => {
            debug!(%destination, %start, %end, "main: matched Plan command");
            let request = FetchPlanRequest {
                origin: origin.unwrap_or_else(|| config.defaults.origin.clone()),
                destination,
                date_range: DateRange::new(start, end),
                total_budget_usd: budget.unwrap_or(config.defaults.budget_usd),
                travel_style: style.unwrap_or_else(|| config.defaults.travel_style.clone()),
                preferences,
                dislikes,
            };
            cmd_plan(&config, request, json).await
        }
        Some(Command::Chat) => {
            debug!("main: matched Chat command");
            repl::run_interactive(&config).await
        }
        Some(Command::Tui) => {
            debug!("main: matched Tui command");
            tui::run(&config).await
        }
        Some(Command::Places { query, limit }) => {
            debug!(%query, limit, "main: matched Places command");
            cmd_places(&query, limit)
        }
        None => {
            debug!("main: no command specified, printing help");
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}

/// Fetch a plan once, print it, and release the server-side session.
async fn cmd_plan(config: &Config, request: FetchPlanRequest, json: bool) -> Result<()> {
    let client = HttpPlannerClient::from_config(&config.service).context("Failed to create planner client")?;

    println!(
        "Planning {} -> {} ({} day(s))...",
        request.origin, request.destination, request.date_range.day_count
    );

    let response = client
        .fetch_plan(request)
        .await
        .context("Planner service request failed")?;
    info!(session_id = %response.session_id, "cmd_plan: plan received");

    let days = synthesize(&response.bundle).context("Failed to derive day plans")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&days)?);
    } else {
        if !response.narrative_summary.is_empty() {
            println!();
            println!("{}", response.narrative_summary);
        }
        println!();
        output::print_plan_overview(&response.bundle);
        output::print_itinerary(&days);
        println!(
            "{}",
            "Run `wp chat` or `wp tui` to revise a plan in conversation.".dimmed()
        );
    }

    // One-shot mode has no further turns; let the service drop the session.
    if let Err(e) = client.end_session(&response.session_id).await {
        debug!(error = %e, "cmd_plan: failed to end one-shot session");
    }

    Ok(())
}

/// Search the destination catalog from the command line.
fn cmd_places(query: &str, limit: usize) -> Result<()> {
    let matches = Catalog::builtin().search(query, limit);
    debug!(%query, count = matches.len(), "cmd_places: search complete");

    if matches.is_empty() {
        println!("{}", "no matches".dimmed());
        return Ok(());
    }

    for place in matches {
        println!(
            "{} {} {} {}",
            place.code.yellow(),
            place.primary_label.bold(),
            place.secondary_label.dimmed(),
            format!("[{}]", place.region).cyan()
        );
    }

    Ok(())
}
