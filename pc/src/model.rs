//! Plan bundle data model
//!
//! These types model the aggregate output of the upstream planner service:
//! several independently-produced result sets (forecasts, transport, lodging,
//! attractions, dining, hidden gems, cost estimates) loosely correlated by a
//! shared date range. Every field of [`PlanBundle`] is independently optional
//! or empty, so a partial document from the service deserializes and
//! synthesizes without error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Authoritative date span of a trip.
///
/// `day_count` alone decides how many day slots the itinerary has; the
/// content lists are sampled into those slots, never the other way around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub day_count: i64,
}

impl DateRange {
    /// Build a range from start and end dates.
    ///
    /// Spans shorter than one day collapse to a single-day trip.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        let day_count = (end - start).num_days().max(1);
        Self { start, end, day_count }
    }
}

/// One day's forecast, keyed by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,

    #[serde(default)]
    pub average_temp_c: f64,

    #[serde(default)]
    pub dominant_condition: String,

    /// Probability in 0.0..=1.0
    #[serde(default)]
    pub rain_probability: f64,

    #[serde(default)]
    pub note: String,
}

/// A single leg of the recommended transport option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportLeg {
    pub carrier: String,

    #[serde(default)]
    pub departure: String,

    #[serde(default)]
    pub arrival: String,

    #[serde(default)]
    pub departure_time: String,

    #[serde(default)]
    pub arrival_time: String,

    #[serde(default)]
    pub duration_minutes: u32,
}

/// The single recommended transport option, if the service found one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportOption {
    pub price_usd: f64,

    #[serde(default)]
    pub carriers: Vec<String>,

    #[serde(default)]
    pub total_duration_minutes: u32,

    #[serde(default)]
    pub stop_count: u32,

    #[serde(default)]
    pub legs: Vec<TransportLeg>,
}

impl TransportOption {
    /// A zero-priced option is the service's way of saying "none available".
    pub fn is_available(&self) -> bool {
        self.price_usd > 0.0
    }
}

/// The single recommended lodging option, if the service found one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LodgingOption {
    pub name: String,

    #[serde(default)]
    pub rate_per_night_usd: f64,

    #[serde(default)]
    pub total_rate_usd: f64,

    #[serde(default)]
    pub rating: f64,
}

impl LodgingOption {
    /// A zero-rate option means "none available".
    pub fn is_available(&self) -> bool {
        self.total_rate_usd > 0.0
    }
}

/// A point of interest discovered for the destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    pub name: String,

    #[serde(default)]
    pub rating: f64,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub is_outdoor: bool,
}

/// A dining option discovered for the destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiningOption {
    pub name: String,

    #[serde(default)]
    pub rating: f64,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub price_tier: String,

    #[serde(default)]
    pub address: String,
}

/// A lesser-known spot surfaced from community mentions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiddenGem {
    pub name: String,

    #[serde(default)]
    pub source: String,

    #[serde(default)]
    pub snippet: String,

    #[serde(default = "default_mention_count")]
    pub mention_count: u32,
}

fn default_mention_count() -> u32 {
    1
}

/// Whether the estimated spend fits the traveler's budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Over,
    Under,
    #[default]
    Balanced,
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Over => write!(f, "over"),
            Self::Under => write!(f, "under"),
            Self::Balanced => write!(f, "balanced"),
        }
    }
}

/// Estimated cost split by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostBreakdown {
    pub transport_usd: f64,
    pub lodging_usd: f64,
    pub food_usd: f64,
    pub activities_usd: f64,
}

/// Cost estimate for the whole trip.
///
/// Carried through the bundle for display only; synthesis never reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetSummary {
    pub breakdown: CostBreakdown,
    pub estimated_total_usd: f64,
    pub total_budget_usd: f64,
    pub remaining_usd: f64,
    pub status: BudgetStatus,
    pub suggestions: Vec<String>,
}

/// The aggregate external input to synthesis.
///
/// Any field may be absent or empty without invalidating the rest; the
/// synthesis engine fills whatever day slots the present data supports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanBundle {
    /// Authoritative source of itinerary length.
    pub date_range: Option<DateRange>,

    /// Daily forecasts, keyed by date; need not cover every day.
    pub forecast_series: Vec<DailyForecast>,

    /// At most one recommended transport option.
    pub recommended_transport: Option<TransportOption>,

    /// At most one recommended lodging option.
    pub recommended_lodging: Option<LodgingOption>,

    /// Attractions in service-ranked order.
    pub points_of_interest: Vec<Attraction>,

    /// Dining options in service-ranked order.
    pub dining_options: Vec<DiningOption>,

    /// Community-sourced hidden gems.
    pub hidden_gems: Vec<HiddenGem>,

    /// Trip cost estimate, display-only.
    pub budget: Option<BudgetSummary>,

    /// Narrative summary produced once alongside the first plan.
    pub narrative_summary: String,
}

impl PlanBundle {
    /// The recommended transport, unless absent or marked unavailable.
    pub fn available_transport(&self) -> Option<&TransportOption> {
        self.recommended_transport.as_ref().filter(|t| t.is_available())
    }

    /// The recommended lodging, unless absent or marked unavailable.
    pub fn available_lodging(&self) -> Option<&LodgingOption> {
        self.recommended_lodging.as_ref().filter(|l| l.is_available())
    }
}

/// Marker attached to a derived day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayNote {
    /// First day, with transport and/or lodging to check into.
    Arrival,
    /// Last day.
    Departure,
    /// Middle day with no attraction slots filled.
    FreeDay,
}

impl std::fmt::Display for DayNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Arrival => write!(f, "arrival"),
            Self::Departure => write!(f, "departure"),
            Self::FreeDay => write!(f, "free day"),
        }
    }
}

/// One derived day of the itinerary.
///
/// Fully recomputed from the bundle on every synthesis call; never stored,
/// never mutated in place. `day_number` is the only identity that survives
/// recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// 1-based position within the trip.
    pub day_number: i64,
    pub date: NaiveDate,
    pub is_first_day: bool,
    pub is_last_day: bool,
    pub weather: Option<DailyForecast>,
    pub morning_poi: Option<Attraction>,
    pub afternoon_poi: Option<Attraction>,
    pub dining_pick: Option<DiningOption>,
    pub hidden_gem: Option<HiddenGem>,
    pub notes: Vec<DayNote>,
}

impl DayPlan {
    /// Check if this day carries the free-day placeholder.
    pub fn is_free_day(&self) -> bool {
        self.notes.contains(&DayNote::FreeDay)
    }
}
