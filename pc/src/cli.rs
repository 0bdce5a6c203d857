//! CLI argument parsing for plancore

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "plancore")]
#[command(author, version, about = "Derive a day-by-day itinerary from a plan bundle", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Synthesize day plans from a bundle JSON document
    Synthesize {
        /// Path to the bundle JSON file
        #[arg(required = true)]
        bundle: PathBuf,

        /// Emit the derived day plans as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print a sample bundle document to adapt by hand
    Sample,
}
