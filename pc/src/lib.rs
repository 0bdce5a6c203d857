//! PlanCore - plan bundle model and itinerary synthesis
//!
//! The deterministic heart of the travel planner: types for the aggregate
//! bundle returned by the upstream planner service, and a pure function that
//! turns a bundle into an ordered day-by-day itinerary.
//!
//! # Core Concepts
//!
//! - **Bundle in, days out**: [`synthesize`] is the only operation; it reads
//!   a [`PlanBundle`] and derives one [`DayPlan`] per day of the date range.
//! - **Partial data is normal**: any bundle field may be absent or empty;
//!   the corresponding day-plan fields simply stay empty.
//! - **Nothing is cached**: day plans are recomputed from the bundle on
//!   every call and carry no identity beyond their day number.

pub mod cli;
pub mod error;
pub mod model;
pub mod synthesis;

pub use error::SynthesisError;
pub use model::{
    Attraction, BudgetStatus, BudgetSummary, CostBreakdown, DailyForecast, DateRange, DayNote, DayPlan, DiningOption,
    HiddenGem, LodgingOption, PlanBundle, TransportLeg, TransportOption,
};
pub use synthesis::synthesize;
