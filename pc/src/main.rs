use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use plancore::cli::{Cli, Command};
use plancore::model::{
    Attraction, DailyForecast, DateRange, DiningOption, HiddenGem, LodgingOption, PlanBundle, TransportOption,
};
use plancore::{DayPlan, synthesize};

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();

    match cli.command {
        Command::Synthesize { bundle, json } => {
            let content = std::fs::read_to_string(&bundle)
                .context(format!("Failed to read bundle file {}", bundle.display()))?;
            let bundle: PlanBundle = serde_json::from_str(&content).context("Failed to parse bundle JSON")?;

            info!("synthesizing {} day(s)", bundle.date_range.as_ref().map(|r| r.day_count).unwrap_or(0));

            let days = synthesize(&bundle)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&days)?);
            } else {
                for day in &days {
                    print_day(day);
                }
            }
        }
        Command::Sample => {
            println!("{}", serde_json::to_string_pretty(&sample_bundle())?);
        }
    }

    Ok(())
}

/// Print one derived day in a compact human-readable form.
fn print_day(day: &DayPlan) {
    let mut heading = format!("Day {} - {}", day.day_number, day.date);
    if !day.notes.is_empty() {
        let notes: Vec<String> = day.notes.iter().map(|n| n.to_string()).collect();
        heading.push_str(&format!(" ({})", notes.join(", ")));
    }
    println!("{}", heading.bold());

    if let Some(weather) = &day.weather {
        println!(
            "  {} {:.1}C, {} (rain {:.0}%)",
            "weather:".cyan(),
            weather.average_temp_c,
            weather.dominant_condition,
            weather.rain_probability * 100.0
        );
    }
    if let Some(poi) = &day.morning_poi {
        println!("  {} {}", "morning:".cyan(), poi.name);
    }
    if let Some(poi) = &day.afternoon_poi {
        println!("  {} {}", "afternoon:".cyan(), poi.name);
    }
    if let Some(pick) = &day.dining_pick {
        println!("  {} {}", "dinner:".cyan(), pick.name);
    }
    if let Some(gem) = &day.hidden_gem {
        println!("  {} {} ({})", "hidden gem:".cyan(), gem.name, gem.source.dimmed());
    }
    println!();
}

/// A small but fully-populated bundle for experimenting with the engine.
fn sample_bundle() -> PlanBundle {
    let start = chrono::NaiveDate::from_ymd_opt(2026, 9, 1).expect("valid date");
    let end = chrono::NaiveDate::from_ymd_opt(2026, 9, 4).expect("valid date");

    PlanBundle {
        date_range: Some(DateRange::new(start, end)),
        forecast_series: vec![
            DailyForecast {
                date: start,
                average_temp_c: 22.5,
                dominant_condition: "partly cloudy".to_string(),
                rain_probability: 0.2,
                note: String::new(),
            },
            DailyForecast {
                date: start + chrono::Duration::days(2),
                average_temp_c: 19.0,
                dominant_condition: "light rain".to_string(),
                rain_probability: 0.7,
                note: "pack a jacket".to_string(),
            },
        ],
        recommended_transport: Some(TransportOption {
            price_usd: 640.0,
            carriers: vec!["Air France".to_string()],
            total_duration_minutes: 460,
            stop_count: 0,
            legs: vec![],
        }),
        recommended_lodging: Some(LodgingOption {
            name: "Hotel du Centre".to_string(),
            rate_per_night_usd: 140.0,
            total_rate_usd: 420.0,
            rating: 4.4,
        }),
        points_of_interest: vec![
            Attraction {
                name: "Louvre Museum".to_string(),
                rating: 4.7,
                description: "World's largest art museum".to_string(),
                category: "museum".to_string(),
                is_outdoor: false,
            },
            Attraction {
                name: "Luxembourg Gardens".to_string(),
                rating: 4.6,
                description: "Palace gardens with fountains".to_string(),
                category: "park".to_string(),
                is_outdoor: true,
            },
            Attraction {
                name: "Musee d'Orsay".to_string(),
                rating: 4.7,
                description: "Impressionist collection in a former rail station".to_string(),
                category: "museum".to_string(),
                is_outdoor: false,
            },
        ],
        dining_options: vec![
            DiningOption {
                name: "Chez Janou".to_string(),
                rating: 4.4,
                category: "provencal".to_string(),
                price_tier: "$$".to_string(),
                address: "2 Rue Roger Verlomme".to_string(),
            },
            DiningOption {
                name: "Le Petit Vendome".to_string(),
                rating: 4.3,
                category: "bistro".to_string(),
                price_tier: "$$".to_string(),
                address: "8 Rue des Capucines".to_string(),
            },
        ],
        hidden_gems: vec![HiddenGem {
            name: "Passage des Panoramas".to_string(),
            source: "reddit".to_string(),
            snippet: "Oldest covered arcade in the city".to_string(),
            mention_count: 5,
        }],
        budget: None,
        narrative_summary: String::new(),
    }
}
