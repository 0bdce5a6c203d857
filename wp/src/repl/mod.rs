//! Interactive chat REPL
//!
//! Multi-turn conversation with the planner service in the terminal, with
//! slash commands for inspecting the current plan between turns.

mod chat;

pub use chat::ChatRepl;

use std::sync::Arc;

use eyre::{Context, Result};

use crate::client::HttpPlannerClient;
use crate::config::Config;

/// Run the interactive REPL.
///
/// This is the main entry point for `wp chat`.
pub async fn run_interactive(config: &Config) -> Result<()> {
    let client = HttpPlannerClient::from_config(&config.service).context("Failed to create planner client")?;

    let mut repl = ChatRepl::new(Arc::new(client));
    repl.run().await
}
