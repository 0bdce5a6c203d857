//! Destination selector widget
//!
//! Wraps the place catalog behind an interactive text input: query text,
//! open/closed candidate list, highlighted candidate, and commit/cancel
//! transitions. Every text change and every commit notifies the external
//! callback synchronously with the resulting display string, so the widget
//! holds no state the caller cannot reconstruct from that callback stream
//! plus the initial value. Free text is valid output even when nothing was
//! ever selected.

use placeindex::{Catalog, Place};

/// Fixed cap on the candidate dropdown.
pub const CANDIDATE_CAP: usize = 8;

/// Widget visibility state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorState {
    Closed,
    Open {
        candidates: Vec<Place>,
        highlight: Option<usize>,
    },
}

/// Inputs the widget reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorEvent {
    /// The full text changed to this value while focused.
    TextEdited(String),
    /// The field gained focus.
    FocusGained,
    /// Directional navigation.
    MoveUp,
    MoveDown,
    /// Explicit confirmation of the highlighted candidate.
    Commit,
    /// Escape-equivalent; closes without altering the text.
    Cancel,
    /// Pointer hover over candidate row `i`.
    Hover(usize),
    /// Pointer-down on candidate row `i`.
    ClickCandidate(usize),
    /// Any interaction outside the widget's boundary.
    OutsideInteraction,
}

/// Interactive place picker backed by the catalog.
pub struct PlaceSelector {
    value: String,
    state: SelectorState,
    catalog: &'static Catalog,
    on_change: Box<dyn FnMut(&str) + Send>,
}

impl PlaceSelector {
    /// Create a closed selector mirroring an externally supplied value.
    pub fn new(initial_value: impl Into<String>, catalog: &'static Catalog) -> Self {
        Self {
            value: initial_value.into(),
            state: SelectorState::Closed,
            catalog,
            on_change: Box::new(|_| {}),
        }
    }

    /// Install the value-changed callback.
    pub fn with_on_change(mut self, on_change: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_change = Box::new(on_change);
        self
    }

    /// Current text value.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, SelectorState::Open { .. })
    }

    /// Candidate rows, empty while closed.
    pub fn candidates(&self) -> &[Place] {
        match &self.state {
            SelectorState::Open { candidates, .. } => candidates,
            SelectorState::Closed => &[],
        }
    }

    /// Highlighted candidate index, if any.
    pub fn highlight(&self) -> Option<usize> {
        match &self.state {
            SelectorState::Open { highlight, .. } => *highlight,
            SelectorState::Closed => None,
        }
    }

    /// Apply one event to the state machine.
    pub fn dispatch(&mut self, event: SelectorEvent) {
        match event {
            SelectorEvent::TextEdited(text) => {
                self.value = text;
                (self.on_change)(&self.value);
                self.open_with_fresh_candidates();
            }

            SelectorEvent::FocusGained => {
                if !self.is_open() && !self.value.trim().is_empty() {
                    self.open_with_fresh_candidates();
                }
            }

            SelectorEvent::MoveDown => match &mut self.state {
                SelectorState::Open { candidates, highlight } if !candidates.is_empty() => {
                    *highlight = Some(match *highlight {
                        None => 0,
                        Some(i) if i + 1 >= candidates.len() => 0,
                        Some(i) => i + 1,
                    });
                }
                SelectorState::Open { .. } => {}
                SelectorState::Closed => {
                    // Move-down on a closed field opens it without selecting.
                    if !self.value.trim().is_empty() {
                        self.open_with_fresh_candidates();
                    }
                }
            },

            SelectorEvent::MoveUp => {
                if let SelectorState::Open { candidates, highlight } = &mut self.state
                    && !candidates.is_empty()
                {
                    *highlight = Some(match *highlight {
                        None | Some(0) => candidates.len() - 1,
                        Some(i) => i - 1,
                    });
                }
            }

            SelectorEvent::Commit => {
                let picked = match &self.state {
                    SelectorState::Open {
                        candidates,
                        highlight: Some(i),
                    } => candidates.get(*i).cloned(),
                    _ => None,
                };
                match picked {
                    Some(place) => self.commit_candidate(place),
                    // Nothing highlighted: close and keep the free text.
                    None => self.state = SelectorState::Closed,
                }
            }

            SelectorEvent::ClickCandidate(i) => {
                let picked = match &self.state {
                    SelectorState::Open { candidates, .. } => candidates.get(i).cloned(),
                    SelectorState::Closed => None,
                };
                if let Some(place) = picked {
                    self.commit_candidate(place);
                }
            }

            SelectorEvent::Hover(i) => {
                if let SelectorState::Open { candidates, highlight } = &mut self.state
                    && i < candidates.len()
                {
                    *highlight = Some(i);
                }
            }

            SelectorEvent::Cancel | SelectorEvent::OutsideInteraction => {
                self.state = SelectorState::Closed;
            }
        }
    }

    fn open_with_fresh_candidates(&mut self) {
        let candidates = self
            .catalog
            .search(&self.value, CANDIDATE_CAP)
            .into_iter()
            .cloned()
            .collect();
        self.state = SelectorState::Open {
            candidates,
            highlight: None,
        };
    }

    fn commit_candidate(&mut self, place: Place) {
        self.value = place.display_value();
        (self.on_change)(&self.value);
        self.state = SelectorState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn selector_with_log() -> (PlaceSelector, Arc<Mutex<Vec<String>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let selector = PlaceSelector::new("", Catalog::builtin())
            .with_on_change(move |value| sink.lock().expect("lock").push(value.to_string()));
        (selector, log)
    }

    fn type_text(selector: &mut PlaceSelector, text: &str) {
        selector.dispatch(SelectorEvent::TextEdited(text.to_string()));
    }

    #[test]
    fn test_starts_closed_with_initial_value() {
        let selector = PlaceSelector::new("Berlin (BER)", Catalog::builtin());
        assert!(!selector.is_open());
        assert_eq!(selector.value(), "Berlin (BER)");
        assert!(selector.candidates().is_empty());
    }

    #[test]
    fn test_text_edit_fires_callback_and_opens() {
        let (mut selector, log) = selector_with_log();

        type_text(&mut selector, "par");

        assert_eq!(log.lock().expect("lock").as_slice(), ["par"]);
        assert!(selector.is_open());
        assert!(!selector.candidates().is_empty());
        assert_eq!(selector.highlight(), None);
    }

    #[test]
    fn test_every_edit_recomputes_and_resets_highlight() {
        let (mut selector, log) = selector_with_log();

        type_text(&mut selector, "paris");
        selector.dispatch(SelectorEvent::MoveDown);
        assert_eq!(selector.highlight(), Some(0));

        type_text(&mut selector, "pari");
        assert_eq!(selector.highlight(), None);
        assert_eq!(log.lock().expect("lock").len(), 2);
    }

    #[test]
    fn test_candidate_cap_is_respected() {
        let (mut selector, _log) = selector_with_log();

        // "a" substring-matches most of the catalog; the dropdown still
        // shows at most the cap.
        type_text(&mut selector, "a");
        assert!(selector.candidates().len() <= CANDIDATE_CAP);
    }

    #[test]
    fn test_focus_with_text_opens() {
        let mut selector = PlaceSelector::new("tokyo", Catalog::builtin());
        selector.dispatch(SelectorEvent::FocusGained);
        assert!(selector.is_open());

        // Focus with empty text stays closed.
        let mut empty = PlaceSelector::new("   ", Catalog::builtin());
        empty.dispatch(SelectorEvent::FocusGained);
        assert!(!empty.is_open());
    }

    #[test]
    fn test_move_down_while_closed_opens_without_selecting() {
        let mut selector = PlaceSelector::new("lisbon", Catalog::builtin());
        selector.dispatch(SelectorEvent::MoveDown);
        assert!(selector.is_open());
        assert_eq!(selector.highlight(), None);
    }

    #[test]
    fn test_navigation_wraps_both_ways() {
        let (mut selector, _log) = selector_with_log();
        type_text(&mut selector, "paris");
        let len = selector.candidates().len();
        assert_eq!(len, 2, "builtin catalog has two Paris airports");

        // Down from none lands on the first candidate, then wraps.
        selector.dispatch(SelectorEvent::MoveDown);
        assert_eq!(selector.highlight(), Some(0));
        selector.dispatch(SelectorEvent::MoveDown);
        assert_eq!(selector.highlight(), Some(1));
        selector.dispatch(SelectorEvent::MoveDown);
        assert_eq!(selector.highlight(), Some(0));

        // Up from the first wraps to the last.
        selector.dispatch(SelectorEvent::MoveUp);
        assert_eq!(selector.highlight(), Some(1));
    }

    #[test]
    fn test_commit_composes_display_value() {
        let (mut selector, log) = selector_with_log();
        type_text(&mut selector, "paris");
        selector.dispatch(SelectorEvent::MoveDown);
        selector.dispatch(SelectorEvent::Commit);

        assert!(!selector.is_open());
        assert_eq!(selector.value(), "Paris (CDG)");
        assert_eq!(log.lock().expect("lock").as_slice(), ["paris", "Paris (CDG)"]);
    }

    #[test]
    fn test_commit_without_highlight_closes_and_keeps_text() {
        let (mut selector, log) = selector_with_log();
        type_text(&mut selector, "somewhere odd");
        selector.dispatch(SelectorEvent::Commit);

        assert!(!selector.is_open());
        assert_eq!(selector.value(), "somewhere odd");
        // Only the edit notified; closing is not a value change.
        assert_eq!(log.lock().expect("lock").len(), 1);
    }

    #[test]
    fn test_click_commits_clicked_candidate() {
        let (mut selector, log) = selector_with_log();
        type_text(&mut selector, "paris");

        selector.dispatch(SelectorEvent::ClickCandidate(1));

        assert!(!selector.is_open());
        assert_eq!(selector.value(), "Paris (ORY)");
        assert_eq!(log.lock().expect("lock").len(), 2);
    }

    #[test]
    fn test_click_out_of_range_does_nothing() {
        let (mut selector, log) = selector_with_log();
        type_text(&mut selector, "paris");

        selector.dispatch(SelectorEvent::ClickCandidate(99));

        assert!(selector.is_open());
        assert_eq!(log.lock().expect("lock").len(), 1);
    }

    #[test]
    fn test_hover_highlights_without_committing() {
        let (mut selector, log) = selector_with_log();
        type_text(&mut selector, "paris");

        selector.dispatch(SelectorEvent::Hover(1));
        assert_eq!(selector.highlight(), Some(1));
        assert!(selector.is_open());
        assert_eq!(log.lock().expect("lock").len(), 1);

        // Out-of-range hover is ignored.
        selector.dispatch(SelectorEvent::Hover(42));
        assert_eq!(selector.highlight(), Some(1));
    }

    #[test]
    fn test_cancel_closes_without_altering_text() {
        let (mut selector, log) = selector_with_log();
        type_text(&mut selector, "bangkok");
        selector.dispatch(SelectorEvent::MoveDown);

        selector.dispatch(SelectorEvent::Cancel);

        assert!(!selector.is_open());
        assert_eq!(selector.value(), "bangkok");
        assert_eq!(log.lock().expect("lock").len(), 1);
    }

    #[test]
    fn test_outside_interaction_closes() {
        let (mut selector, _log) = selector_with_log();
        type_text(&mut selector, "rome");
        assert!(selector.is_open());

        selector.dispatch(SelectorEvent::OutsideInteraction);
        assert!(!selector.is_open());
        assert_eq!(selector.value(), "rome");
    }
}
