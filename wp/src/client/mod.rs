//! Planner service client
//!
//! The upstream planner service produces the plan bundles; this module is
//! the only place that talks to it. Everything above works against the
//! [`PlannerClient`] trait so the service can be swapped for a mock in
//! tests.

use async_trait::async_trait;

mod error;
mod http;
mod types;

pub use error::PlannerError;
pub use http::HttpPlannerClient;
pub use types::{ChatTurnRequest, ChatTurnResponse, FetchPlanRequest, FetchPlanResponse};

/// Boundary to the upstream planner service.
#[async_trait]
pub trait PlannerClient: Send + Sync {
    /// Request a fresh plan for a trip.
    async fn fetch_plan(&self, request: FetchPlanRequest) -> Result<FetchPlanResponse, PlannerError>;

    /// Send one conversational turn. A `None` session id starts a new chat
    /// session; the reply carries a replacement bundle only when the turn
    /// changed the underlying plan data.
    async fn send_chat_turn(&self, session_id: Option<&str>, message: &str)
    -> Result<ChatTurnResponse, PlannerError>;

    /// End a session and release whatever the service holds for it.
    async fn end_session(&self, session_id: &str) -> Result<(), PlannerError>;
}
