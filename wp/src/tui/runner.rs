//! TUI runner - main loop that owns the terminal and the planner client
//!
//! The runner draws frames, feeds terminal events to the app, and dispatches
//! queued planner requests onto the runtime. At most one request is in
//! flight at a time; each dispatch is stamped with a generation number, and
//! a completion whose generation no longer matches the state is dropped so
//! an abandoned fetch can never touch a session that has moved on.

use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::client::PlannerClient;

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::state::{CompletedRequest, PendingRequest, RequestOutcome};
use super::views;

/// TUI runner that manages the terminal and event loop.
pub struct TuiRunner {
    app: App,
    terminal: Tui,
    client: Arc<dyn PlannerClient>,
    event_handler: EventHandler,
    completions_tx: mpsc::UnboundedSender<CompletedRequest>,
    completions_rx: mpsc::UnboundedReceiver<CompletedRequest>,
}

impl TuiRunner {
    pub fn new(terminal: Tui, client: Arc<dyn PlannerClient>, app: App) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            app,
            terminal,
            client,
            event_handler: EventHandler::new(Duration::from_millis(33)), // ~30 FPS
            completions_tx,
            completions_rx,
        }
    }

    /// Run the TUI main loop.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.terminal.draw(|frame| views::render(self.app.state_mut(), frame))?;

            match self.event_handler.next().await? {
                Event::Tick => self.handle_tick(),
                Event::Key(key) => self.app.handle_key(key),
                Event::Mouse(mouse) => self.app.handle_mouse(mouse),
                Event::Resize(_, _) => {}
            }

            if self.app.state().should_quit {
                break;
            }
        }

        self.close_session().await;
        Ok(())
    }

    /// Periodic work: fold in finished requests, dispatch queued ones, and
    /// let the state reconcile itself against the session revision.
    fn handle_tick(&mut self) {
        while let Ok(completed) = self.completions_rx.try_recv() {
            self.app.state_mut().apply_completion(completed);
        }

        if let Some(request) = self.app.state_mut().pending_request.take() {
            self.dispatch(request);
        }

        self.app.state_mut().tick();
    }

    /// Send one planner request on the runtime, stamped with a fresh
    /// generation.
    fn dispatch(&mut self, request: PendingRequest) {
        let state = self.app.state_mut();
        state.busy = true;
        state.generation += 1;
        let generation = state.generation;

        let client = Arc::clone(&self.client);
        let tx = self.completions_tx.clone();

        debug!(generation, ?request, "dispatching planner request");
        tokio::spawn(async move {
            let outcome = match request {
                PendingRequest::FetchPlan(request) => match client.fetch_plan(request).await {
                    Ok(response) => RequestOutcome::PlanReady(response),
                    Err(e) => RequestOutcome::Failed(e.to_string()),
                },
                PendingRequest::ChatTurn { session_id, message } => {
                    match client.send_chat_turn(Some(&session_id), &message).await {
                        Ok(response) => RequestOutcome::TurnReady(response),
                        Err(e) => RequestOutcome::Failed(e.to_string()),
                    }
                }
            };

            // The receiver is gone when the TUI already shut down; nothing
            // to deliver to in that case.
            let _ = tx.send(CompletedRequest { generation, outcome });
        });
    }

    /// End the live session at the service before leaving, best effort.
    async fn close_session(&mut self) {
        let Some(session) = self.app.state_mut().session.take() else {
            return;
        };

        debug!(id = %session.id, "ending session on exit");
        let end = self.client.end_session(&session.id);
        if let Err(e) = tokio::time::timeout(Duration::from_secs(3), end)
            .await
            .unwrap_or_else(|_| {
                Err(crate::client::PlannerError::Timeout(Duration::from_secs(3)))
            })
        {
            warn!(error = %e, "failed to end session on exit");
        }
    }
}
