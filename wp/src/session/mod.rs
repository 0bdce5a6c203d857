//! Travel-planning session state
//!
//! A session owns the current plan bundle and the conversation around it.
//! Two artifacts survive every bundle replacement untouched: the narrative
//! summary pinned at creation, and the append-only chat history. The
//! `revision` counter marks bundle replacement events so a consuming view
//! knows to discard any view-local override and re-derive; it is not a
//! version of the narrative.

use serde::{Deserialize, Serialize};
use tracing::debug;

use plancore::{DayPlan, PlanBundle, SynthesisError, synthesize};

mod store;

pub use store::SessionStore;

/// Seed reply used when the service produced no narrative.
const GENERIC_ACK: &str = "Your travel plan is ready. Ask me anything about it.";

/// Who said a chat line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One line of the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

impl ChatMessage {
    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

/// A live planning session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Identifier assigned by the planner service.
    pub id: String,

    /// Current plan bundle; replaced wholesale, never merged.
    pub bundle: PlanBundle,

    /// Narrative pinned at creation; bundle replacements never touch it.
    pub narrative_summary: String,

    /// Append-only conversation log.
    pub chat_history: Vec<ChatMessage>,

    /// Bundle replacement counter, starting at 0.
    pub revision: u64,
}

impl Session {
    /// Create a session around the first successfully fetched bundle.
    ///
    /// The chat history is seeded with one assistant message: the narrative
    /// summary when the service produced one, a generic acknowledgment
    /// otherwise.
    pub fn new(id: impl Into<String>, bundle: PlanBundle, narrative_summary: impl Into<String>) -> Self {
        let id = id.into();
        let narrative_summary = narrative_summary.into();

        let seed = if narrative_summary.is_empty() {
            ChatMessage::assistant(GENERIC_ACK)
        } else {
            ChatMessage::assistant(narrative_summary.clone())
        };

        debug!(%id, "Session::new: created");
        Self {
            id,
            bundle,
            narrative_summary,
            chat_history: vec![seed],
            revision: 0,
        }
    }

    /// Replace the whole bundle with what the service returned.
    ///
    /// No field-by-field merge happens: the new bundle is authoritative.
    /// The narrative summary and chat history are left untouched.
    pub fn replace_bundle(&mut self, bundle: PlanBundle) {
        self.bundle = bundle;
        self.revision += 1;
        debug!(id = %self.id, revision = self.revision, "replace_bundle: applied");
    }

    /// Append one conversational turn. Does not touch bundle or revision.
    pub fn append_turn(&mut self, role: Role, text: impl Into<String>) {
        self.chat_history.push(ChatMessage { role, text: text.into() });
    }

    /// Derive the current day plans.
    ///
    /// Always recomputed from the stored bundle; nothing derived is cached
    /// between calls.
    pub fn day_plans(&self) -> Result<Vec<DayPlan>, SynthesisError> {
        synthesize(&self.bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use plancore::DateRange;

    fn bundle(day_count: i64) -> PlanBundle {
        let start = NaiveDate::from_ymd_opt(2026, 9, 1).expect("valid date");
        PlanBundle {
            date_range: Some(DateRange {
                start,
                end: start + chrono::Duration::days(day_count),
                day_count,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_session_seeds_chat_with_narrative() {
        let session = Session::new("s-1", bundle(3), "Three easy days in Lisbon.");

        assert_eq!(session.revision, 0);
        assert_eq!(session.chat_history.len(), 1);
        assert_eq!(session.chat_history[0].role, Role::Assistant);
        assert_eq!(session.chat_history[0].text, "Three easy days in Lisbon.");
    }

    #[test]
    fn test_new_session_without_narrative_uses_generic_ack() {
        let session = Session::new("s-1", bundle(3), "");

        assert_eq!(session.chat_history.len(), 1);
        assert_eq!(session.chat_history[0].text, GENERIC_ACK);
        assert!(session.narrative_summary.is_empty());
    }

    #[test]
    fn test_replace_bundle_bumps_revision_once_per_call() {
        let mut session = Session::new("s-1", bundle(3), "pinned");

        session.replace_bundle(bundle(4));
        assert_eq!(session.revision, 1);

        session.replace_bundle(bundle(5));
        assert_eq!(session.revision, 2);
    }

    #[test]
    fn test_replace_bundle_is_wholesale() {
        let mut original = bundle(3);
        original.narrative_summary = "old text inside the bundle".to_string();
        let mut session = Session::new("s-1", original, "pinned");

        // The replacement has fewer populated fields; none of the old
        // bundle's content survives.
        session.replace_bundle(bundle(4));
        assert!(session.bundle.narrative_summary.is_empty());
        assert_eq!(session.bundle.date_range.as_ref().expect("range").day_count, 4);
    }

    #[test]
    fn test_narrative_pin_survives_any_number_of_replacements() {
        let mut session = Session::new("s-1", bundle(3), "pinned narrative");

        for n in 1..=20 {
            let mut replacement = bundle(3);
            replacement.narrative_summary = format!("attempt {n} to overwrite");
            session.replace_bundle(replacement);
        }

        assert_eq!(session.narrative_summary, "pinned narrative");
        assert_eq!(session.revision, 20);
    }

    #[test]
    fn test_append_turn_grows_history_only() {
        let mut session = Session::new("s-1", bundle(3), "pinned");
        let revision_before = session.revision;
        let bundle_before = session.bundle.clone();

        session.append_turn(Role::User, "make it cheaper");
        session.append_turn(Role::Assistant, "looking into it");

        assert_eq!(session.chat_history.len(), 3);
        assert_eq!(session.revision, revision_before);
        assert_eq!(session.bundle, bundle_before);
    }

    #[test]
    fn test_day_plans_recompute_from_current_bundle() {
        let mut session = Session::new("s-1", bundle(3), "pinned");
        assert_eq!(session.day_plans().expect("plans").len(), 3);

        session.replace_bundle(bundle(5));
        assert_eq!(session.day_plans().expect("plans").len(), 5);
    }

    #[test]
    fn test_day_plans_surface_validation_errors() {
        let session = Session::new("s-1", PlanBundle::default(), "pinned");
        assert_eq!(session.day_plans(), Err(SynthesisError::MissingDateRange));
    }
}
