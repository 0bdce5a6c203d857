//! TUI views and rendering
//!
//! Day plans are re-derived from the session bundle on every frame; nothing
//! derived is cached between draws. Rendering also records the screen
//! regions of the destination selectors so mouse events can be hit-tested.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use plancore::DayPlan;

use crate::session::Role;
use crate::tui::selector::PlaceSelector;

use super::state::{AppState, SETUP_FIELDS, SetupField, View};

/// Column where form values (and selector dropdowns) start.
const FORM_LABEL_WIDTH: u16 = 15;

/// Main render function.
pub fn render(state: &mut AppState, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(state, frame, chunks[0]);

    match state.view {
        View::Setup => render_setup(state, frame, chunks[1]),
        View::Chat => render_chat(state, frame, chunks[1]),
        View::Itinerary => render_itinerary(state, frame, chunks[1]),
    }

    render_footer(state, frame, chunks[2]);

    if state.show_help {
        render_help_overlay(frame, chunks[1]);
    }
}

/// Render the header bar with view tabs and session status.
fn render_header(state: &AppState, frame: &mut Frame, area: Rect) {
    let mut spans = vec![Span::styled(
        "Wayplan ",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];

    for view in [View::Setup, View::Chat, View::Itinerary] {
        spans.push(Span::raw("│ "));
        let style = if view == state.view {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(view.display_name(), style));
        spans.push(Span::raw(" "));
    }

    spans.push(Span::raw("│ "));
    match &state.session {
        Some(session) => spans.push(Span::styled(
            format!("revision {}", session.revision),
            Style::default().fg(Color::Green),
        )),
        None => spans.push(Span::styled("no plan", Style::default().fg(Color::DarkGray))),
    }

    if state.busy {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled("working...", Style::default().fg(Color::Yellow)));
    }

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// Render the trip request form.
fn render_setup(state: &mut AppState, frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Plan a trip ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::with_capacity(SETUP_FIELDS.len());
    for field in SETUP_FIELDS {
        let focused = state.form.focus == field;
        let marker = if focused { "> " } else { "  " };
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let line = if field == SetupField::Submit {
            Line::from(vec![
                Span::raw(marker),
                Span::styled("[ Request plan ]", label_style),
            ])
        } else {
            Line::from(vec![
                Span::raw(marker),
                Span::styled(format!("{:<12} ", field.label()), label_style),
                Span::raw(state.form.display_value(field).to_string()),
            ])
        };
        lines.push(line);
    }

    frame.render_widget(Paragraph::new(lines), inner);

    // Record input rows for mouse hit-testing, then draw any open dropdown
    // on top of the rows below it.
    state.layout.origin_input = field_rect(inner, 0);
    state.layout.destination_input = field_rect(inner, 1);

    state.layout.origin_dropdown = render_dropdown(&state.form.origin, frame, inner, 0);
    state.layout.destination_dropdown = render_dropdown(&state.form.destination, frame, inner, 1);
}

/// The single-row rect of form field `index` inside the form area.
fn field_rect(inner: Rect, index: u16) -> Rect {
    if index >= inner.height {
        return Rect::default();
    }
    Rect::new(inner.x, inner.y + index, inner.width, 1)
}

/// Draw a selector's candidate list under its input row.
///
/// Returns the rect the candidates occupy (zero-sized while closed) so the
/// mouse router can hit-test candidate rows before the outside-click check.
fn render_dropdown(selector: &PlaceSelector, frame: &mut Frame, inner: Rect, field_index: u16) -> Rect {
    let candidates = selector.candidates();
    if candidates.is_empty() {
        return Rect::default();
    }

    let y = inner.y + field_index + 1;
    let available = (inner.y + inner.height).saturating_sub(y);
    let height = (candidates.len() as u16).min(available);
    if height == 0 {
        return Rect::default();
    }

    let width = inner.width.saturating_sub(FORM_LABEL_WIDTH).min(44);
    let area = Rect::new(inner.x + FORM_LABEL_WIDTH, y, width, height);

    let items: Vec<ListItem> = candidates
        .iter()
        .enumerate()
        .map(|(i, place)| {
            let line = Line::from(vec![
                Span::styled(format!("{} ", place.code), Style::default().fg(Color::Yellow)),
                Span::raw(place.primary_label.clone()),
                Span::styled(format!("  {}", place.region), Style::default().fg(Color::DarkGray)),
            ]);
            let style = if selector.highlight() == Some(i) {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else {
                Style::default().bg(Color::Black)
            };
            ListItem::new(line).style(style)
        })
        .collect();

    frame.render_widget(Clear, area);
    frame.render_widget(List::new(items), area);

    area
}

/// Render the chat view: history above, input below.
fn render_chat(state: &AppState, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let mut lines: Vec<Line> = Vec::new();
    match &state.session {
        Some(session) => {
            for message in &session.chat_history {
                match message.role {
                    Role::User => {
                        lines.push(Line::from(vec![
                            Span::styled("you: ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                            Span::raw(message.text.clone()),
                        ]));
                    }
                    Role::Assistant => {
                        lines.extend(tui_markdown::from_str(&message.text).lines);
                    }
                }
                lines.push(Line::from(""));
            }
        }
        None => {
            lines.push(Line::from(Span::styled(
                "No plan yet. Fill in the Setup view first.",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    if let Some(error) = &state.error {
        lines.push(Line::from(Span::styled(
            format!("error: {}", error),
            Style::default().fg(Color::Red),
        )));
    }

    // Keep the tail visible; scrolling moves the window up from the bottom.
    let height = chunks[0].height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(height + state.chat_scroll);

    let history = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(" Conversation "))
        .wrap(Wrap { trim: false })
        .scroll((scroll as u16, 0));
    frame.render_widget(history, chunks[0]);

    let prompt = if state.busy { "waiting for the planner..." } else { "" };
    let input = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Green)),
        Span::raw(state.chat_input.clone()),
        Span::styled(prompt, Style::default().fg(Color::Yellow)),
    ]))
    .block(Block::default().borders(Borders::ALL).title(" Message "));
    frame.render_widget(input, chunks[1]);
}

/// Render the itinerary view: day list on the left, detail on the right.
fn render_itinerary(state: &AppState, frame: &mut Frame, area: Rect) {
    let Some(session) = &state.session else {
        let placeholder = Paragraph::new("No plan yet. Fill in the Setup view first.")
            .block(Block::default().borders(Borders::ALL).title(" Itinerary "));
        frame.render_widget(placeholder, area);
        return;
    };

    // Derived fresh on every frame; the bundle is the only source of truth.
    let days = match session.day_plans() {
        Ok(days) => days,
        Err(e) => {
            let error = Paragraph::new(Span::styled(
                format!("cannot derive itinerary: {}", e),
                Style::default().fg(Color::Red),
            ))
            .block(Block::default().borders(Borders::ALL).title(" Itinerary "));
            frame.render_widget(error, area);
            return;
        }
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
        .split(area);

    render_day_list(state, &days, frame, chunks[0]);
    render_day_detail(state, &days, frame, chunks[1]);
}

fn render_day_list(state: &AppState, days: &[DayPlan], frame: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = days
        .iter()
        .enumerate()
        .map(|(i, day)| {
            let mut spans = vec![
                Span::styled(
                    format!("Day {:<2} ", day.day_number),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(day.date.to_string()),
            ];
            if !day.notes.is_empty() {
                let notes: Vec<String> = day.notes.iter().map(|n| n.to_string()).collect();
                spans.push(Span::styled(
                    format!("  [{}]", notes.join(", ")),
                    Style::default().fg(Color::Magenta),
                ));
            }

            let item = ListItem::new(Line::from(spans));
            if i == state.selected_day {
                item.style(Style::default().bg(Color::DarkGray).fg(Color::White))
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Days "));
    frame.render_widget(list, area);
}

fn render_day_detail(state: &AppState, days: &[DayPlan], frame: &mut Frame, area: Rect) {
    let session = match &state.session {
        Some(s) => s,
        None => return,
    };

    let mut lines: Vec<Line> = Vec::new();

    if let Some(day) = days.get(state.selected_day) {
        let field = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("{:<12} ", label), Style::default().fg(Color::Cyan)),
                Span::raw(value),
            ])
        };

        match &day.weather {
            Some(weather) => lines.push(field(
                "weather",
                format!(
                    "{:.1}C, {} (rain {:.0}%)",
                    weather.average_temp_c,
                    weather.dominant_condition,
                    weather.rain_probability * 100.0
                ),
            )),
            None => lines.push(field("weather", "no forecast".to_string())),
        }
        if let Some(poi) = &day.morning_poi {
            lines.push(field("morning", format!("{} ({:.1})", poi.name, poi.rating)));
        }
        if let Some(poi) = &day.afternoon_poi {
            lines.push(field("afternoon", format!("{} ({:.1})", poi.name, poi.rating)));
        }
        if let Some(pick) = &day.dining_pick {
            lines.push(field("dinner", format!("{} {}", pick.name, pick.price_tier)));
        }
        if let Some(gem) = &day.hidden_gem {
            lines.push(field("hidden gem", format!("{} (via {})", gem.name, gem.source)));
        }
        if day.is_free_day() {
            lines.push(Line::from(Span::styled(
                "free day - nothing scheduled",
                Style::default().fg(Color::Magenta),
            )));
        }
    }

    if let Some(budget) = &session.bundle.budget {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "budget: ${:.0} of ${:.0} ({})",
                budget.estimated_total_usd, budget.total_budget_usd, budget.status
            ),
            Style::default().fg(Color::Green),
        )));
    }

    if !session.narrative_summary.is_empty() {
        lines.push(Line::from(""));
        lines.extend(tui_markdown::from_str(&session.narrative_summary).lines);
    }

    let title = format!(" Day {} ", state.selected_day + 1);
    let detail = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    frame.render_widget(detail, area);
}

/// Render the footer with key hints plus the status or error line.
fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    let hint = |key: &'static str, action: &'static str| {
        [
            Span::styled(key, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(action),
        ]
    };

    let mut spans: Vec<Span> = Vec::new();
    spans.extend(hint(" ←/→", " Views "));
    match state.view {
        View::Setup => {
            spans.extend(hint(" Tab", " Next field "));
            spans.extend(hint(" Enter", " Select/Submit "));
            spans.extend(hint(" Esc", " Close "));
        }
        View::Chat => {
            spans.extend(hint(" Enter", " Send "));
            spans.extend(hint(" ↑/↓", " Scroll "));
        }
        View::Itinerary => {
            spans.extend(hint(" ↑/↓", " Day "));
            spans.extend(hint(" q", " Quit "));
        }
    }
    spans.extend(hint(" F1", " Help "));

    if let Some(error) = &state.error {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(error.clone(), Style::default().fg(Color::Red)));
    } else if let Some(status) = &state.status {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(status.clone(), Style::default().fg(Color::Yellow)));
    }

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Render help overlay.
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let key = |k: &'static str, action: &'static str| {
        Line::from(vec![
            Span::styled(format!("{:<12}", k), Style::default().fg(Color::Cyan)),
            Span::raw(action),
        ])
    };

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )),
        Line::from(""),
        key("←/→", "Cycle Setup / Chat / Itinerary"),
        key("F1", "Toggle this help"),
        key("Ctrl+c", "Quit"),
        Line::from(""),
        Line::from(Span::styled("Setup", Style::default().add_modifier(Modifier::BOLD))),
        key("Tab/↑/↓", "Move between fields"),
        key("↑/↓", "Navigate destination candidates when open"),
        key("Enter", "Pick candidate / next field / submit"),
        key("Esc", "Close the candidate list"),
        Line::from(""),
        Line::from(Span::styled("Chat", Style::default().add_modifier(Modifier::BOLD))),
        key("Enter", "Send the message"),
        key("↑/↓", "Scroll the conversation"),
        Line::from(""),
        Line::from(Span::styled("Itinerary", Style::default().add_modifier(Modifier::BOLD))),
        key("↑/↓, j/k", "Select a day"),
        key("q", "Quit"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .style(Style::default().bg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(help, popup_area);
}

/// Helper to create a centered rect.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
