//! CLI command definitions

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Wayplan - conversational travel plan explorer
#[derive(Parser)]
#[command(
    name = "wp",
    about = "Plan a trip, then revise it in conversation",
    version,
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Request a plan once and print the itinerary
    Plan {
        /// Destination (free text, or "City (CODE)" from `wp places`)
        destination: String,

        /// First day of the trip (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// Last day of the trip (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,

        /// Where the trip starts; falls back to the configured default
        #[arg(long)]
        origin: Option<String>,

        /// Total budget in USD; falls back to the configured default
        #[arg(long)]
        budget: Option<f64>,

        /// Travel style (e.g. budget, standard, premium)
        #[arg(long)]
        style: Option<String>,

        /// Things to lean into (repeatable)
        #[arg(long = "prefer", value_name = "PREFERENCE")]
        preferences: Vec<String>,

        /// Things to avoid (repeatable)
        #[arg(long = "avoid", value_name = "DISLIKE")]
        dislikes: Vec<String>,

        /// Emit the derived day plans as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Open the multi-turn chat REPL
    Chat,

    /// Launch the full-screen terminal UI
    Tui,

    /// Search the destination catalog
    Places {
        /// Free-text query (code, city, airport, or region)
        query: String,

        /// Maximum results to return
        #[arg(short, long, default_value_t = 8)]
        limit: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_command() {
        let cli = Cli::parse_from(["wp"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parse_plan() {
        let cli = Cli::parse_from([
            "wp",
            "plan",
            "Paris (CDG)",
            "--start",
            "2026-09-01",
            "--end",
            "2026-09-04",
            "--budget",
            "2500",
            "--prefer",
            "museums",
            "--prefer",
            "food",
            "--avoid",
            "crowds",
        ]);

        if let Some(Command::Plan {
            destination,
            start,
            end,
            budget,
            preferences,
            dislikes,
            ..
        }) = cli.command
        {
            assert_eq!(destination, "Paris (CDG)");
            assert_eq!(start, NaiveDate::from_ymd_opt(2026, 9, 1).expect("valid date"));
            assert_eq!(end, NaiveDate::from_ymd_opt(2026, 9, 4).expect("valid date"));
            assert_eq!(budget, Some(2500.0));
            assert_eq!(preferences, vec!["museums", "food"]);
            assert_eq!(dislikes, vec!["crowds"]);
        } else {
            panic!("Expected Plan command");
        }
    }

    #[test]
    fn test_cli_plan_rejects_bad_date() {
        let result = Cli::try_parse_from(["wp", "plan", "Rome", "--start", "not-a-date", "--end", "2026-09-04"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_chat_and_tui() {
        assert!(matches!(Cli::parse_from(["wp", "chat"]).command, Some(Command::Chat)));
        assert!(matches!(Cli::parse_from(["wp", "tui"]).command, Some(Command::Tui)));
    }

    #[test]
    fn test_cli_parse_places_with_limit() {
        let cli = Cli::parse_from(["wp", "places", "paris", "--limit", "3"]);
        if let Some(Command::Places { query, limit }) = cli.command {
            assert_eq!(query, "paris");
            assert_eq!(limit, 3);
        } else {
            panic!("Expected Places command");
        }
    }

    #[test]
    fn test_cli_with_config_and_verbose() {
        let cli = Cli::parse_from(["wp", "-c", "/tmp/wayplan.yml", "-v", "chat"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/wayplan.yml")));
        assert!(cli.verbose);
    }
}
