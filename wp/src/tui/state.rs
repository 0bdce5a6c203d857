//! TUI application state
//!
//! Pure data structures for the TUI; no rendering logic here. The session is
//! the single source of truth for plan data: day plans are re-derived from
//! the bundle on every frame, and the session's revision counter tells the
//! itinerary view when to drop its view-local day selection.

use ratatui::layout::Rect;
use tracing::debug;

use placeindex::Catalog;
use plancore::DateRange;

use crate::client::{ChatTurnResponse, FetchPlanRequest, FetchPlanResponse};
use crate::config::Config;
use crate::session::{Role, Session};
use crate::tui::selector::PlaceSelector;

/// Top-level views, cycled with Left/Right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Setup,
    Chat,
    Itinerary,
}

impl View {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Setup => "Setup",
            Self::Chat => "Chat",
            Self::Itinerary => "Itinerary",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Setup => Self::Chat,
            Self::Chat => Self::Itinerary,
            Self::Itinerary => Self::Setup,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Setup => Self::Itinerary,
            Self::Chat => Self::Setup,
            Self::Itinerary => Self::Chat,
        }
    }
}

/// Fields of the trip form, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupField {
    Origin,
    Destination,
    StartDate,
    EndDate,
    Budget,
    Style,
    Preferences,
    Dislikes,
    Submit,
}

/// Navigation order of the form fields.
pub const SETUP_FIELDS: [SetupField; 9] = [
    SetupField::Origin,
    SetupField::Destination,
    SetupField::StartDate,
    SetupField::EndDate,
    SetupField::Budget,
    SetupField::Style,
    SetupField::Preferences,
    SetupField::Dislikes,
    SetupField::Submit,
];

impl SetupField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Origin => "Origin",
            Self::Destination => "Destination",
            Self::StartDate => "Start date",
            Self::EndDate => "End date",
            Self::Budget => "Budget (USD)",
            Self::Style => "Travel style",
            Self::Preferences => "Preferences",
            Self::Dislikes => "Dislikes",
            Self::Submit => "Submit",
        }
    }

    pub fn next(&self) -> Self {
        let i = SETUP_FIELDS.iter().position(|f| f == self).unwrap_or(0);
        SETUP_FIELDS[(i + 1) % SETUP_FIELDS.len()]
    }

    pub fn prev(&self) -> Self {
        let i = SETUP_FIELDS.iter().position(|f| f == self).unwrap_or(0);
        SETUP_FIELDS[(i + SETUP_FIELDS.len() - 1) % SETUP_FIELDS.len()]
    }

    pub fn is_selector(&self) -> bool {
        matches!(self, Self::Origin | Self::Destination)
    }
}

/// The trip request form, including the two destination selectors.
pub struct SetupForm {
    pub origin: PlaceSelector,
    pub destination: PlaceSelector,
    pub start_date: String,
    pub end_date: String,
    pub budget: String,
    pub travel_style: String,
    pub preferences: String,
    pub dislikes: String,
    pub focus: SetupField,
}

impl SetupForm {
    pub fn new(config: &Config) -> Self {
        let catalog = Catalog::builtin();
        Self {
            origin: PlaceSelector::new(config.defaults.origin.clone(), catalog)
                .with_on_change(|value| debug!(%value, "origin changed")),
            destination: PlaceSelector::new("", catalog).with_on_change(|value| debug!(%value, "destination changed")),
            start_date: String::new(),
            end_date: String::new(),
            budget: format!("{:.0}", config.defaults.budget_usd),
            travel_style: config.defaults.travel_style.clone(),
            preferences: String::new(),
            dislikes: String::new(),
            focus: SetupField::Origin,
        }
    }

    /// The selector behind a field, when the field has one.
    pub fn selector_mut(&mut self, field: SetupField) -> Option<&mut PlaceSelector> {
        match field {
            SetupField::Origin => Some(&mut self.origin),
            SetupField::Destination => Some(&mut self.destination),
            _ => None,
        }
    }

    /// The selector behind the focused field, when it has one.
    pub fn focused_selector_mut(&mut self) -> Option<&mut PlaceSelector> {
        self.selector_mut(self.focus)
    }

    /// Plain-text buffer behind a non-selector field.
    pub fn text_mut(&mut self, field: SetupField) -> Option<&mut String> {
        match field {
            SetupField::StartDate => Some(&mut self.start_date),
            SetupField::EndDate => Some(&mut self.end_date),
            SetupField::Budget => Some(&mut self.budget),
            SetupField::Style => Some(&mut self.travel_style),
            SetupField::Preferences => Some(&mut self.preferences),
            SetupField::Dislikes => Some(&mut self.dislikes),
            _ => None,
        }
    }

    /// Display value of a field for rendering.
    pub fn display_value(&self, field: SetupField) -> &str {
        match field {
            SetupField::Origin => self.origin.value(),
            SetupField::Destination => self.destination.value(),
            SetupField::StartDate => &self.start_date,
            SetupField::EndDate => &self.end_date,
            SetupField::Budget => &self.budget,
            SetupField::Style => &self.travel_style,
            SetupField::Preferences => &self.preferences,
            SetupField::Dislikes => &self.dislikes,
            SetupField::Submit => "",
        }
    }

    /// Validate the form into a plan request.
    pub fn to_request(&self) -> Result<FetchPlanRequest, String> {
        let destination = self.destination.value().trim();
        if destination.is_empty() {
            return Err("destination is required".to_string());
        }

        let start: chrono::NaiveDate = self
            .start_date
            .trim()
            .parse()
            .map_err(|_| "start date must be YYYY-MM-DD".to_string())?;
        let end: chrono::NaiveDate = self
            .end_date
            .trim()
            .parse()
            .map_err(|_| "end date must be YYYY-MM-DD".to_string())?;

        let budget: f64 = self
            .budget
            .trim()
            .parse()
            .map_err(|_| "budget must be a number".to_string())?;

        Ok(FetchPlanRequest {
            origin: self.origin.value().trim().to_string(),
            destination: destination.to_string(),
            date_range: DateRange::new(start, end),
            total_budget_usd: budget,
            travel_style: self.travel_style.trim().to_string(),
            preferences: split_list(&self.preferences),
            dislikes: split_list(&self.dislikes),
        })
    }
}

/// Split a comma-separated input line into trimmed entries.
fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// A request the runner should dispatch to the planner service.
#[derive(Debug, Clone)]
pub enum PendingRequest {
    FetchPlan(FetchPlanRequest),
    ChatTurn { session_id: String, message: String },
}

/// What came back from a dispatched request.
#[derive(Debug)]
pub enum RequestOutcome {
    PlanReady(FetchPlanResponse),
    TurnReady(ChatTurnResponse),
    Failed(String),
}

/// A finished request, tagged with the generation it was dispatched under.
#[derive(Debug)]
pub struct CompletedRequest {
    pub generation: u64,
    pub outcome: RequestOutcome,
}

/// Screen regions recorded during render for mouse hit-testing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutMap {
    pub origin_input: Rect,
    pub origin_dropdown: Rect,
    pub destination_input: Rect,
    pub destination_dropdown: Rect,
}

/// Main TUI application state.
pub struct AppState {
    /// Current top-level view
    pub view: View,
    /// Trip request form (Setup view)
    pub form: SetupForm,
    /// Chat input buffer
    pub chat_input: String,
    /// Chat history scroll offset from the bottom
    pub chat_scroll: usize,
    /// The live planning session, if a plan has been fetched
    pub session: Option<Session>,
    /// A planner request is in flight; further submissions are rejected
    pub busy: bool,
    /// Transient status line
    pub status: Option<String>,
    /// Last inline error, shown until the next successful action
    pub error: Option<String>,
    /// Selected day in the itinerary view (view-local override)
    pub selected_day: usize,
    /// Bundle revision the day selection was made against
    pub seen_revision: u64,
    /// Generation of the most recently dispatched request; completions
    /// carrying an older generation are dropped
    pub generation: u64,
    /// Request waiting for the runner to dispatch
    pub pending_request: Option<PendingRequest>,
    /// Help overlay visible
    pub show_help: bool,
    /// Should the app quit
    pub should_quit: bool,
    /// Screen regions recorded during the last render
    pub layout: LayoutMap,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            view: View::default(),
            form: SetupForm::new(config),
            chat_input: String::new(),
            chat_scroll: 0,
            session: None,
            busy: false,
            status: None,
            error: None,
            selected_day: 0,
            seen_revision: 0,
            generation: 0,
            pending_request: None,
            show_help: false,
            should_quit: false,
            layout: LayoutMap::default(),
        }
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }

    /// Queue a request for the runner, rejecting it while one is in flight.
    pub fn submit_request(&mut self, request: PendingRequest) {
        if self.busy {
            self.status = Some("a request is already in flight".to_string());
            return;
        }
        self.pending_request = Some(request);
    }

    /// Called on every tick: reconcile view-local state with the session.
    ///
    /// The revision counter is the only signal that the bundle was replaced;
    /// when it moves, the itinerary's day selection is a stale view-local
    /// override and is discarded.
    pub fn tick(&mut self) {
        if let Some(session) = &self.session
            && session.revision != self.seen_revision
        {
            debug!(revision = session.revision, "bundle changed, resetting day selection");
            self.selected_day = 0;
            self.seen_revision = session.revision;
        }
    }

    /// Fold a finished request back into the state.
    ///
    /// Completions from an abandoned dispatch (older generation, or a
    /// session that is gone) are dropped without touching anything.
    pub fn apply_completion(&mut self, completed: CompletedRequest) {
        if completed.generation != self.generation {
            debug!(
                completed = completed.generation,
                current = self.generation,
                "dropping stale completion"
            );
            return;
        }

        self.busy = false;

        match completed.outcome {
            RequestOutcome::PlanReady(response) => {
                let session = Session::new(response.session_id, response.bundle, response.narrative_summary);
                self.session = Some(session);
                self.selected_day = 0;
                self.seen_revision = 0;
                self.view = View::Itinerary;
                self.status = Some("plan ready".to_string());
                self.error = None;
            }
            RequestOutcome::TurnReady(response) => {
                let Some(session) = &mut self.session else {
                    debug!("turn completed but session is gone, dropping");
                    return;
                };
                if response.session_id != session.id {
                    debug!(
                        expected = %session.id,
                        received = %response.session_id,
                        "turn completed for a different session, dropping"
                    );
                    return;
                }

                session.append_turn(Role::Assistant, response.reply);
                if let Some(bundle) = response.bundle {
                    session.replace_bundle(bundle);
                    self.status = Some(format!("plan updated (revision {})", session.revision));
                } else {
                    self.status = None;
                }
                self.chat_scroll = 0;
                self.error = None;
            }
            RequestOutcome::Failed(message) => {
                // Prior plan and history stay on screen; only the error line
                // is added.
                self.set_error(message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plancore::PlanBundle;

    fn test_config() -> Config {
        Config::default()
    }

    fn bundle(day_count: i64) -> PlanBundle {
        let start = chrono::NaiveDate::from_ymd_opt(2026, 9, 1).expect("valid date");
        PlanBundle {
            date_range: Some(DateRange {
                start,
                end: start + chrono::Duration::days(day_count),
                day_count,
            }),
            ..Default::default()
        }
    }

    fn plan_ready(generation: u64, day_count: i64) -> CompletedRequest {
        CompletedRequest {
            generation,
            outcome: RequestOutcome::PlanReady(FetchPlanResponse {
                session_id: "s-1".to_string(),
                bundle: bundle(day_count),
                narrative_summary: "pinned".to_string(),
            }),
        }
    }

    #[test]
    fn test_view_cycle_is_closed() {
        let mut view = View::Setup;
        for _ in 0..3 {
            view = view.next();
        }
        assert_eq!(view, View::Setup);
        assert_eq!(View::Setup.prev(), View::Itinerary);
    }

    #[test]
    fn test_setup_field_navigation_wraps() {
        assert_eq!(SetupField::Submit.next(), SetupField::Origin);
        assert_eq!(SetupField::Origin.prev(), SetupField::Submit);
    }

    #[test]
    fn test_form_validation_requires_destination_and_dates() {
        let form = SetupForm::new(&test_config());
        assert!(form.to_request().is_err());

        let mut form = SetupForm::new(&test_config());
        form.destination = PlaceSelector::new("Paris (CDG)", Catalog::builtin());
        form.start_date = "2026-09-01".to_string();
        form.end_date = "2026-09-04".to_string();

        let request = form.to_request().expect("valid form");
        assert_eq!(request.destination, "Paris (CDG)");
        assert_eq!(request.date_range.day_count, 3);
        assert_eq!(request.total_budget_usd, 2_000.0);
    }

    #[test]
    fn test_form_splits_preference_lists() {
        let mut form = SetupForm::new(&test_config());
        form.destination = PlaceSelector::new("Rome (FCO)", Catalog::builtin());
        form.start_date = "2026-09-01".to_string();
        form.end_date = "2026-09-03".to_string();
        form.preferences = "museums, street food ,".to_string();

        let request = form.to_request().expect("valid form");
        assert_eq!(request.preferences, vec!["museums", "street food"]);
        assert!(request.dislikes.is_empty());
    }

    #[test]
    fn test_submit_rejected_while_busy() {
        let mut state = AppState::new(&test_config());
        state.busy = true;

        state.submit_request(PendingRequest::ChatTurn {
            session_id: "s-1".to_string(),
            message: "hello".to_string(),
        });

        assert!(state.pending_request.is_none());
        assert!(state.status.is_some());
    }

    #[test]
    fn test_plan_completion_creates_session_and_switches_view() {
        let mut state = AppState::new(&test_config());
        state.busy = true;
        state.generation = 1;

        state.apply_completion(plan_ready(1, 3));

        assert!(!state.busy);
        assert_eq!(state.view, View::Itinerary);
        let session = state.session.as_ref().expect("session");
        assert_eq!(session.narrative_summary, "pinned");
        assert_eq!(session.day_plans().expect("plans").len(), 3);
    }

    #[test]
    fn test_stale_generation_completion_is_dropped() {
        let mut state = AppState::new(&test_config());
        state.busy = true;
        state.generation = 2;

        // A completion from generation 1 arrives after the state moved on.
        state.apply_completion(plan_ready(1, 3));

        assert!(state.busy, "stale completion must not clear the busy flag");
        assert!(state.session.is_none());
    }

    #[test]
    fn test_turn_for_other_session_is_dropped() {
        let mut state = AppState::new(&test_config());
        state.generation = 1;
        state.apply_completion(plan_ready(1, 3));

        state.generation = 2;
        state.busy = true;
        state.apply_completion(CompletedRequest {
            generation: 2,
            outcome: RequestOutcome::TurnReady(ChatTurnResponse {
                session_id: "s-9".to_string(),
                reply: "stale".to_string(),
                bundle: Some(bundle(7)),
            }),
        });

        let session = state.session.as_ref().expect("session");
        assert_eq!(session.revision, 0);
        assert_eq!(session.chat_history.len(), 1);
    }

    #[test]
    fn test_revision_change_resets_day_selection() {
        let mut state = AppState::new(&test_config());
        state.generation = 1;
        state.apply_completion(plan_ready(1, 5));

        state.selected_day = 3;
        state.tick();
        assert_eq!(state.selected_day, 3, "selection survives while revision is stable");

        state.session.as_mut().expect("session").replace_bundle(bundle(4));
        state.tick();
        assert_eq!(state.selected_day, 0, "selection resets when the bundle is replaced");
        assert_eq!(state.seen_revision, 1);
    }

    #[test]
    fn test_failed_completion_keeps_prior_state() {
        let mut state = AppState::new(&test_config());
        state.generation = 1;
        state.apply_completion(plan_ready(1, 3));

        let session_before = state.session.clone();
        state.busy = true;
        state.generation = 2;
        state.apply_completion(CompletedRequest {
            generation: 2,
            outcome: RequestOutcome::Failed("planner unavailable".to_string()),
        });

        assert!(!state.busy);
        assert_eq!(state.session, session_before);
        assert_eq!(state.error.as_deref(), Some("planner unavailable"));
    }
}
