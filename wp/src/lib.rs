//! Wayplan - conversational travel plan explorer
//!
//! The stateful half of the workspace: configuration, the planner-service
//! client, the session layer that owns plan bundles and drives re-synthesis,
//! a chat REPL, and a terminal UI with an interactive destination selector.
//!
//! The deterministic pieces live in sibling crates: `plancore` (bundle model
//! and day-by-day synthesis) and `placeindex` (ranked destination search).

pub mod cli;
pub mod client;
pub mod config;
pub mod output;
pub mod repl;
pub mod session;
pub mod tui;

pub use client::{HttpPlannerClient, PlannerClient, PlannerError};
pub use config::Config;
pub use session::{ChatMessage, Role, Session, SessionStore};
