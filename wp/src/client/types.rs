//! Planner service request/response types
//!
//! Wire shapes for the three collaborator operations: fetching a plan,
//! sending a chat turn, and ending a session. The bundle payloads reuse the
//! plancore model directly.

use plancore::{DateRange, PlanBundle};
use serde::{Deserialize, Serialize};

/// Everything needed to request a fresh plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchPlanRequest {
    pub origin: String,
    pub destination: String,
    pub date_range: DateRange,
    pub total_budget_usd: f64,
    pub travel_style: String,

    #[serde(default)]
    pub preferences: Vec<String>,

    #[serde(default)]
    pub dislikes: Vec<String>,
}

/// A freshly generated plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchPlanResponse {
    pub session_id: String,

    #[serde(default)]
    pub bundle: PlanBundle,

    /// Narrative produced once with the first plan; pinned at the session.
    #[serde(default)]
    pub narrative_summary: String,
}

/// One conversational turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurnRequest {
    /// Absent to start a new chat session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    pub message: String,
}

/// The service's reply to a chat turn.
///
/// A present `bundle` is the sole signal that the plan data changed and a
/// re-synthesis is needed; its absence means the turn was purely
/// conversational.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurnResponse {
    pub session_id: String,
    pub reply: String,

    #[serde(default)]
    pub bundle: Option<PlanBundle>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_omits_absent_session_id() {
        let request = ChatTurnRequest {
            session_id: None,
            message: "plan me a weekend in Lisbon".to_string(),
        };

        let json = serde_json::to_value(&request).expect("serializes");
        assert!(json.get("session_id").is_none());

        let request = ChatTurnRequest {
            session_id: Some("s-1".to_string()),
            message: "cheaper hotel please".to_string(),
        };
        let json = serde_json::to_value(&request).expect("serializes");
        assert_eq!(json["session_id"], "s-1");
    }

    #[test]
    fn test_chat_response_bundle_is_optional() {
        let json = r#"{ "session_id": "s-1", "reply": "done" }"#;
        let response: ChatTurnResponse = serde_json::from_str(json).expect("parses");
        assert!(response.bundle.is_none());

        let json = r#"{
            "session_id": "s-1",
            "reply": "rebuilt your plan",
            "bundle": { "narrative_summary": "ignored on replacement" }
        }"#;
        let response: ChatTurnResponse = serde_json::from_str(json).expect("parses");
        assert!(response.bundle.is_some());
    }

    #[test]
    fn test_fetch_response_tolerates_missing_narrative() {
        let json = r#"{ "session_id": "s-9", "bundle": {} }"#;
        let response: FetchPlanResponse = serde_json::from_str(json).expect("parses");
        assert!(response.narrative_summary.is_empty());
    }
}
