//! CLI argument parsing for placeindex

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pi")]
#[command(author, version, about = "Ranked search over the destination catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search the catalog
    Search {
        /// Free-text query (code, city, airport, or region)
        #[arg(required = true)]
        query: String,

        /// Maximum results to return
        #[arg(short, long, default_value_t = 8)]
        limit: usize,

        /// Emit matches as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the whole catalog
    List,
}
