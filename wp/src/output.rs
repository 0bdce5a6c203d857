//! Colored terminal output for plans
//!
//! Shared by the one-shot `wp plan` command and the chat REPL. The TUI has
//! its own ratatui rendering and does not go through here.

use colored::Colorize;

use plancore::{BudgetSummary, DayPlan, LodgingOption, PlanBundle, TransportOption};

/// Print the full derived itinerary, one block per day.
pub fn print_itinerary(days: &[DayPlan]) {
    for day in days {
        print_day(day);
    }
}

/// Print one derived day.
pub fn print_day(day: &DayPlan) {
    let mut heading = format!("Day {} - {}", day.day_number, day.date);
    if !day.notes.is_empty() {
        let notes: Vec<String> = day.notes.iter().map(|n| n.to_string()).collect();
        heading.push_str(&format!(" ({})", notes.join(", ")));
    }
    println!("{}", heading.bold());

    if let Some(weather) = &day.weather {
        let mut line = format!(
            "{:.1}C, {} (rain {:.0}%)",
            weather.average_temp_c,
            weather.dominant_condition,
            weather.rain_probability * 100.0
        );
        if !weather.note.is_empty() {
            line.push_str(&format!(" - {}", weather.note));
        }
        println!("  {} {}", "weather:".cyan(), line);
    }
    if let Some(poi) = &day.morning_poi {
        println!("  {} {} {}", "morning:".cyan(), poi.name, format!("({:.1})", poi.rating).dimmed());
    }
    if let Some(poi) = &day.afternoon_poi {
        println!("  {} {} {}", "afternoon:".cyan(), poi.name, format!("({:.1})", poi.rating).dimmed());
    }
    if let Some(pick) = &day.dining_pick {
        println!("  {} {} {}", "dinner:".cyan(), pick.name, pick.price_tier.dimmed());
    }
    if let Some(gem) = &day.hidden_gem {
        println!("  {} {} {}", "hidden gem:".cyan(), gem.name, format!("via {}", gem.source).dimmed());
    }
    println!();
}

/// Print the bundle's transport, lodging, and budget blocks when present.
pub fn print_plan_overview(bundle: &PlanBundle) {
    if let Some(transport) = bundle.available_transport() {
        print_transport(transport);
    }
    if let Some(lodging) = bundle.available_lodging() {
        print_lodging(lodging);
    }
    if let Some(budget) = &bundle.budget {
        print_budget(budget);
    }
}

fn print_transport(transport: &TransportOption) {
    println!("{}", "Getting there".bold());
    println!(
        "  {} via {}, {}h{:02}m, {} stop(s)",
        format!("${:.0}", transport.price_usd).green(),
        transport.carriers.join(" + "),
        transport.total_duration_minutes / 60,
        transport.total_duration_minutes % 60,
        transport.stop_count
    );
    for leg in &transport.legs {
        println!(
            "    {} {} -> {} ({} -> {})",
            leg.carrier.dimmed(),
            leg.departure,
            leg.arrival,
            leg.departure_time,
            leg.arrival_time
        );
    }
    println!();
}

fn print_lodging(lodging: &LodgingOption) {
    println!("{}", "Staying at".bold());
    println!(
        "  {} - {}/night, {} total, rated {:.1}",
        lodging.name,
        format!("${:.0}", lodging.rate_per_night_usd).green(),
        format!("${:.0}", lodging.total_rate_usd).green(),
        lodging.rating
    );
    println!();
}

/// Print the trip cost estimate.
pub fn print_budget(budget: &BudgetSummary) {
    println!("{}", "Budget".bold());
    println!(
        "  estimated {} of {} ({})",
        format!("${:.0}", budget.estimated_total_usd).green(),
        format!("${:.0}", budget.total_budget_usd),
        budget.status
    );
    println!(
        "  transport ${:.0} / lodging ${:.0} / food ${:.0} / activities ${:.0}",
        budget.breakdown.transport_usd,
        budget.breakdown.lodging_usd,
        budget.breakdown.food_usd,
        budget.breakdown.activities_usd
    );
    for suggestion in &budget.suggestions {
        println!("  {} {}", "tip:".yellow(), suggestion);
    }
    println!();
}
