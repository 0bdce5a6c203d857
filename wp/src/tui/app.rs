//! TUI application logic
//!
//! Translates terminal input into state changes. Keyboard events are routed
//! by view; mouse events are routed through the selector hit-testing rules,
//! where candidate rows are always tested before the outside-click check so
//! a click on a candidate can never be swallowed by close-on-outside-click.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::session::Role;
use crate::tui::selector::SelectorEvent;

use super::state::{AppState, PendingRequest, SetupField, View};

/// The TUI application: state plus input handling.
pub struct App {
    state: AppState,
}

impl App {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Handle a key event.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // Ctrl+C quits from anywhere, help overlay included.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.state.should_quit = true;
            return;
        }

        if self.state.show_help {
            self.state.show_help = false;
            return;
        }
        match key.code {
            KeyCode::F(1) => {
                self.state.show_help = true;
                return;
            }
            KeyCode::Left => {
                self.switch_view(self.state.view.prev());
                return;
            }
            KeyCode::Right => {
                self.switch_view(self.state.view.next());
                return;
            }
            _ => {}
        }

        match self.state.view {
            View::Setup => self.handle_setup_key(key),
            View::Chat => self.handle_chat_key(key),
            View::Itinerary => self.handle_itinerary_key(key),
        }
    }

    /// Switch top-level view, closing any open selector on the way out.
    fn switch_view(&mut self, view: View) {
        self.close_selectors();
        self.state.view = view;
    }

    fn close_selectors(&mut self) {
        self.state.form.origin.dispatch(SelectorEvent::OutsideInteraction);
        self.state.form.destination.dispatch(SelectorEvent::OutsideInteraction);
    }

    // === Setup view ===

    fn handle_setup_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => self.focus_field(self.state.form.focus.next()),
            KeyCode::BackTab => self.focus_field(self.state.form.focus.prev()),

            KeyCode::Down => {
                if let Some(selector) = self.state.form.focused_selector_mut() {
                    // Move-down on a closed selector opens it; if it stays
                    // closed (blank text) fall through to field navigation.
                    let was_open = selector.is_open();
                    selector.dispatch(SelectorEvent::MoveDown);
                    if !was_open && !selector.is_open() {
                        self.focus_field(self.state.form.focus.next());
                    }
                } else {
                    self.focus_field(self.state.form.focus.next());
                }
            }
            KeyCode::Up => {
                if let Some(selector) = self.state.form.focused_selector_mut()
                    && selector.is_open()
                {
                    selector.dispatch(SelectorEvent::MoveUp);
                } else {
                    self.focus_field(self.state.form.focus.prev());
                }
            }

            KeyCode::Enter => {
                if let Some(selector) = self.state.form.focused_selector_mut()
                    && selector.is_open()
                {
                    selector.dispatch(SelectorEvent::Commit);
                } else if self.state.form.focus == SetupField::Submit {
                    self.submit_form();
                } else {
                    self.focus_field(self.state.form.focus.next());
                }
            }

            KeyCode::Esc => {
                if let Some(selector) = self.state.form.focused_selector_mut()
                    && selector.is_open()
                {
                    selector.dispatch(SelectorEvent::Cancel);
                } else {
                    self.state.error = None;
                    self.state.status = None;
                }
            }

            KeyCode::Char(c) => self.edit_focused_field(|value| value.push(c)),
            KeyCode::Backspace => self.edit_focused_field(|value| {
                value.pop();
            }),

            _ => {}
        }
    }

    /// Move form focus, closing the selector being left and notifying the
    /// one being entered.
    fn focus_field(&mut self, field: SetupField) {
        let leaving = self.state.form.focus;
        if leaving != field
            && let Some(selector) = self.state.form.selector_mut(leaving)
        {
            selector.dispatch(SelectorEvent::OutsideInteraction);
        }

        self.state.form.focus = field;
        if let Some(selector) = self.state.form.selector_mut(field) {
            selector.dispatch(SelectorEvent::FocusGained);
        }
    }

    /// Apply an edit to the focused field's text.
    fn edit_focused_field(&mut self, edit: impl FnOnce(&mut String)) {
        let focus = self.state.form.focus;
        if focus.is_selector() {
            let Some(selector) = self.state.form.focused_selector_mut() else {
                return;
            };
            let mut value = selector.value().to_string();
            edit(&mut value);
            selector.dispatch(SelectorEvent::TextEdited(value));
        } else if let Some(text) = self.state.form.text_mut(focus) {
            edit(text);
        }
    }

    fn submit_form(&mut self) {
        match self.state.form.to_request() {
            Ok(request) => {
                self.state.error = None;
                self.state.submit_request(PendingRequest::FetchPlan(request));
            }
            Err(message) => self.state.set_error(message),
        }
    }

    // === Chat view ===

    fn handle_chat_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_chat_turn(),
            KeyCode::Char(c) => self.state.chat_input.push(c),
            KeyCode::Backspace => {
                self.state.chat_input.pop();
            }
            KeyCode::Esc => self.state.chat_input.clear(),
            KeyCode::Up => self.state.chat_scroll = self.state.chat_scroll.saturating_add(1),
            KeyCode::Down => self.state.chat_scroll = self.state.chat_scroll.saturating_sub(1),
            _ => {}
        }
    }

    fn submit_chat_turn(&mut self) {
        if self.state.busy {
            // One outstanding planner call per session; further submissions
            // are rejected, not queued.
            self.state.status = Some("still waiting for the planner...".to_string());
            return;
        }

        let message = self.state.chat_input.trim().to_string();
        if message.is_empty() {
            return;
        }

        let Some(session) = &mut self.state.session else {
            self.state.set_error("no plan yet - create one in the Setup view");
            return;
        };

        session.append_turn(Role::User, message.clone());
        let session_id = session.id.clone();

        self.state.chat_input.clear();
        self.state.chat_scroll = 0;
        self.state.submit_request(PendingRequest::ChatTurn { session_id, message });
    }

    // === Itinerary view ===

    fn handle_itinerary_key(&mut self, key: KeyEvent) {
        let day_count = self
            .state
            .session
            .as_ref()
            .and_then(|s| s.bundle.date_range.as_ref())
            .map(|r| r.day_count.max(1) as usize)
            .unwrap_or(0);

        match key.code {
            KeyCode::Char('q') => self.state.should_quit = true,
            KeyCode::Char('?') => self.state.show_help = true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.selected_day = self.state.selected_day.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if day_count > 0 && self.state.selected_day + 1 < day_count {
                    self.state.selected_day += 1;
                }
            }
            _ => {}
        }
    }

    // === Mouse ===

    /// Handle a mouse event.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match self.state.view {
            View::Setup => self.handle_setup_mouse(mouse),
            View::Chat => match mouse.kind {
                MouseEventKind::ScrollUp => self.state.chat_scroll = self.state.chat_scroll.saturating_add(1),
                MouseEventKind::ScrollDown => self.state.chat_scroll = self.state.chat_scroll.saturating_sub(1),
                _ => {}
            },
            View::Itinerary => match mouse.kind {
                MouseEventKind::ScrollUp => self.state.selected_day = self.state.selected_day.saturating_sub(1),
                MouseEventKind::ScrollDown => {
                    let key = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
                    self.handle_itinerary_key(key);
                }
                _ => {}
            },
        }
    }

    fn handle_setup_mouse(&mut self, mouse: MouseEvent) {
        let (col, row) = (mouse.column, mouse.row);
        let layout = self.state.layout;

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                // Candidate rows first: a pointer-down on a candidate is a
                // commit, and must win over the outside-boundary check.
                if let Some(i) = candidate_at(layout.origin_dropdown, col, row) {
                    self.state.form.origin.dispatch(SelectorEvent::ClickCandidate(i));
                    return;
                }
                if let Some(i) = candidate_at(layout.destination_dropdown, col, row) {
                    self.state.form.destination.dispatch(SelectorEvent::ClickCandidate(i));
                    return;
                }

                if contains(layout.origin_input, col, row) {
                    self.focus_field(SetupField::Origin);
                    return;
                }
                if contains(layout.destination_input, col, row) {
                    self.focus_field(SetupField::Destination);
                    return;
                }

                // Anywhere else is outside the widgets' boundaries.
                self.close_selectors();
            }
            MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(i) = candidate_at(layout.origin_dropdown, col, row) {
                    self.state.form.origin.dispatch(SelectorEvent::Hover(i));
                } else if let Some(i) = candidate_at(layout.destination_dropdown, col, row) {
                    self.state.form.destination.dispatch(SelectorEvent::Hover(i));
                }
            }
            _ => {}
        }
    }
}

fn contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

/// Candidate row index under the pointer, if the dropdown is showing there.
fn candidate_at(dropdown: Rect, col: u16, row: u16) -> Option<usize> {
    if contains(dropdown, col, row) {
        Some((row - dropdown.y) as usize)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn app() -> App {
        App::new(AppState::new(&Config::default()))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn click(col: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: col,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_left_right_cycle_views() {
        let mut app = app();
        assert_eq!(app.state().view, View::Setup);

        press(&mut app, KeyCode::Right);
        assert_eq!(app.state().view, View::Chat);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.state().view, View::Itinerary);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.state().view, View::Setup);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.state().view, View::Itinerary);
    }

    #[test]
    fn test_typing_into_destination_opens_dropdown() {
        let mut app = app();
        press(&mut app, KeyCode::Tab); // Origin -> Destination
        assert_eq!(app.state().form.focus, SetupField::Destination);

        type_str(&mut app, "paris");
        assert_eq!(app.state().form.destination.value(), "paris");
        assert!(app.state().form.destination.is_open());
    }

    #[test]
    fn test_enter_commits_highlighted_candidate() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "paris");
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.state().form.destination.value(), "Paris (CDG)");
        assert!(!app.state().form.destination.is_open());
    }

    #[test]
    fn test_moving_focus_closes_open_selector() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "rome");
        assert!(app.state().form.destination.is_open());

        press(&mut app, KeyCode::Tab);
        assert!(!app.state().form.destination.is_open());
        assert_eq!(app.state().form.focus, SetupField::StartDate);
        // The free text survives the close.
        assert_eq!(app.state().form.destination.value(), "rome");
    }

    #[test]
    fn test_down_on_blank_selector_moves_focus_instead() {
        let mut app = app();
        press(&mut app, KeyCode::Tab); // Destination, empty
        press(&mut app, KeyCode::Down);
        assert_eq!(app.state().form.focus, SetupField::StartDate);
    }

    #[test]
    fn test_submit_with_invalid_form_sets_error() {
        let mut app = app();
        // Navigate to Submit without filling anything in.
        for _ in 0..8 {
            press(&mut app, KeyCode::Tab);
        }
        assert_eq!(app.state().form.focus, SetupField::Submit);

        press(&mut app, KeyCode::Enter);
        assert!(app.state().error.is_some());
        assert!(app.state().pending_request.is_none());
    }

    #[test]
    fn test_valid_form_queues_fetch_request() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "lisbon");
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter); // commit "Lisbon (LIS)"

        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "2026-09-01");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "2026-09-04");

        for _ in 0..5 {
            press(&mut app, KeyCode::Tab);
        }
        assert_eq!(app.state().form.focus, SetupField::Submit);
        press(&mut app, KeyCode::Enter);

        match &app.state().pending_request {
            Some(PendingRequest::FetchPlan(request)) => {
                assert_eq!(request.destination, "Lisbon (LIS)");
                assert_eq!(request.date_range.day_count, 3);
            }
            other => panic!("expected a queued fetch, got {:?}", other),
        }
    }

    #[test]
    fn test_click_on_candidate_commits_despite_being_outside_input() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "paris");
        assert!(app.state().form.destination.is_open());

        // Simulate the rects the last render would have recorded: the
        // dropdown sits below the input row.
        app.state_mut().layout.destination_input = Rect::new(10, 2, 30, 1);
        app.state_mut().layout.destination_dropdown = Rect::new(10, 3, 30, 2);

        // The click lands outside the input, but on candidate row 1; it must
        // commit rather than close-on-outside-click.
        app.handle_mouse(click(12, 4));

        assert_eq!(app.state().form.destination.value(), "Paris (ORY)");
        assert!(!app.state().form.destination.is_open());
    }

    #[test]
    fn test_click_elsewhere_closes_open_selector() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "paris");
        app.state_mut().layout.destination_input = Rect::new(10, 2, 30, 1);
        app.state_mut().layout.destination_dropdown = Rect::new(10, 3, 30, 2);

        app.handle_mouse(click(60, 10));

        assert!(!app.state().form.destination.is_open());
        assert_eq!(app.state().form.destination.value(), "paris");
    }

    #[test]
    fn test_hover_moves_highlight_without_committing() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "paris");
        app.state_mut().layout.destination_dropdown = Rect::new(10, 3, 30, 2);

        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: 12,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });

        assert_eq!(app.state().form.destination.highlight(), Some(1));
        assert!(app.state().form.destination.is_open());
    }

    #[test]
    fn test_chat_turn_requires_session() {
        let mut app = app();
        press(&mut app, KeyCode::Right); // Chat view
        type_str(&mut app, "make it cheaper");
        press(&mut app, KeyCode::Enter);

        assert!(app.state().error.is_some());
        assert!(app.state().pending_request.is_none());
    }

    #[test]
    fn test_chat_turn_rejected_while_busy() {
        let mut app = app();
        app.state_mut().busy = true;
        press(&mut app, KeyCode::Right);
        type_str(&mut app, "hello");
        press(&mut app, KeyCode::Enter);

        assert!(app.state().pending_request.is_none());
        // The input is kept so the user can resubmit.
        assert_eq!(app.state().chat_input, "hello");
    }

    #[test]
    fn test_help_overlay_closes_on_any_key() {
        let mut app = app();
        press(&mut app, KeyCode::F(1));
        assert!(app.state().show_help);

        press(&mut app, KeyCode::Char('x'));
        assert!(!app.state().show_help);
        // The keypress that closed help is not interpreted further.
        assert_eq!(app.state().form.origin.value(), "auto");
    }
}
