use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use placeindex::Catalog;
use placeindex::cli::{Cli, Command};

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let catalog = Catalog::builtin();

    match cli.command {
        Command::Search { query, limit, json } => {
            let matches = catalog.search(&query, limit);
            info!("query '{}' matched {} place(s)", query, matches.len());

            if json {
                println!("{}", serde_json::to_string_pretty(&matches)?);
            } else if matches.is_empty() {
                println!("{}", "no matches".dimmed());
            } else {
                for place in matches {
                    println!(
                        "{} {} {} {}",
                        place.code.yellow(),
                        place.primary_label.bold(),
                        place.secondary_label.dimmed(),
                        format!("[{}]", place.region).cyan()
                    );
                }
            }
        }
        Command::List => {
            for place in catalog.places() {
                println!(
                    "{} {} {}",
                    place.code.yellow(),
                    place.primary_label.bold(),
                    format!("[{}]", place.region).cyan()
                );
            }
        }
    }

    Ok(())
}
