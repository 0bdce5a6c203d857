//! Day-by-day itinerary synthesis
//!
//! A pure function from a plan bundle to an ordered list of day plans.
//! Determinism is part of the contract: identical bundles produce identical
//! output, with no randomness and no wall-clock dependence beyond the
//! supplied date range. Attractions are assigned strictly by list position
//! (two per day, no reuse); suitability-aware matching such as swapping
//! outdoor attractions on rainy days is intentionally not done here.

use chrono::Duration;

use crate::error::SynthesisError;
use crate::model::{DayNote, DayPlan, PlanBundle};

/// Derive the ordered day plans for a bundle.
///
/// The output always has exactly `date_range.day_count` entries. Missing or
/// empty bundle fields leave the corresponding day-plan fields absent; the
/// only inputs that are validated are the presence of the date range and a
/// positive day count.
pub fn synthesize(bundle: &PlanBundle) -> Result<Vec<DayPlan>, SynthesisError> {
    let range = bundle.date_range.as_ref().ok_or(SynthesisError::MissingDateRange)?;
    if range.day_count < 1 {
        return Err(SynthesisError::InvalidDayCount {
            day_count: range.day_count,
        });
    }
    let day_count = range.day_count as usize;

    let has_arrival = bundle.available_transport().is_some() || bundle.available_lodging().is_some();

    let mut days = Vec::with_capacity(day_count);
    for i in 0..day_count {
        let date = range.start + Duration::days(i as i64);
        let is_first_day = i == 0;
        let is_last_day = i == day_count - 1;

        // Exact date match only, no interpolation across gaps.
        let weather = bundle.forecast_series.iter().find(|f| f.date == date).cloned();

        // Attractions are consumed two per day in list order with no reuse
        // and no wraparound; once the list runs out, later days keep their
        // slots empty.
        let morning_poi = bundle.points_of_interest.get(2 * i).cloned();
        let afternoon_poi = bundle.points_of_interest.get(2 * i + 1).cloned();

        // Dining cycles: a list shorter than the trip repeats.
        let dining_pick = if bundle.dining_options.is_empty() {
            None
        } else {
            Some(bundle.dining_options[i % bundle.dining_options.len()].clone())
        };

        // Hidden gems land on every second day (odd zero-based index),
        // cycling through the list.
        let hidden_gem = if i % 2 == 1 && !bundle.hidden_gems.is_empty() {
            Some(bundle.hidden_gems[(i / 2) % bundle.hidden_gems.len()].clone())
        } else {
            None
        };

        let mut notes = Vec::new();
        if is_first_day && has_arrival {
            notes.push(DayNote::Arrival);
        }
        if is_last_day {
            notes.push(DayNote::Departure);
        }
        if !is_first_day && !is_last_day && morning_poi.is_none() && afternoon_poi.is_none() {
            notes.push(DayNote::FreeDay);
        }

        days.push(DayPlan {
            day_number: (i + 1) as i64,
            date,
            is_first_day,
            is_last_day,
            weather,
            morning_poi,
            afternoon_poi,
            dining_pick,
            hidden_gem,
            notes,
        });
    }

    Ok(days)
}
