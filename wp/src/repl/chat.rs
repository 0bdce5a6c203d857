//! REPL session management
//!
//! The REPL owns at most one live planning session. Each submitted line is
//! one chat turn; the service's reply may carry a replacement bundle, which
//! is the sole signal that the plan data changed. Failed turns leave the
//! session exactly as it was and stay retryable.

use std::sync::Arc;

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, warn};

use crate::client::PlannerClient;
use crate::output;
use crate::session::{Role, Session};

/// Interactive chat REPL over a planner client.
pub struct ChatRepl {
    client: Arc<dyn PlannerClient>,
    session: Option<Session>,
}

impl ChatRepl {
    pub fn new(client: Arc<dyn PlannerClient>) -> Self {
        Self { client, session: None }
    }

    /// Run the REPL main loop.
    pub async fn run(&mut self) -> Result<()> {
        self.print_welcome();

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            let readline = rl.readline(&format!("{} ", ">".bright_green()));

            match readline {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(input);

                    if input.starts_with('/') {
                        match self.handle_slash_command(input).await {
                            SlashResult::Continue => continue,
                            SlashResult::Quit => break,
                        }
                    } else {
                        self.process_turn(input).await;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        self.close_session().await;
        println!("Goodbye!");
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "Wayplan Chat".bright_cyan().bold());
        println!("Describe a trip to start, then revise it in conversation.");
        println!("Type {} for commands, {} to quit", "/help".yellow(), "/quit".yellow());
        println!();
    }

    /// Send one chat turn and fold the reply into the session.
    async fn process_turn(&mut self, message: &str) {
        let session_id = self.session.as_ref().map(|s| s.id.clone());

        let response = match self.client.send_chat_turn(session_id.as_deref(), message).await {
            Ok(r) => r,
            Err(e) => {
                // Prior state stays intact; the turn can simply be retried.
                warn!(error = %e, "chat turn failed");
                println!("{} {}", "error:".red(), e);
                return;
            }
        };

        match &mut self.session {
            Some(session) => {
                if response.session_id != session.id {
                    debug!(
                        expected = %session.id,
                        received = %response.session_id,
                        "reply for a different session, dropping"
                    );
                    println!("{} reply arrived for a stale session, ignoring", "warning:".yellow());
                    return;
                }

                session.append_turn(Role::User, message);
                session.append_turn(Role::Assistant, response.reply.clone());
                println!("{}", response.reply);

                if let Some(bundle) = response.bundle {
                    session.replace_bundle(bundle);
                    println!(
                        "{}",
                        format!("(plan updated, revision {}; /days to view)", session.revision).dimmed()
                    );
                }
            }
            None => {
                // First turn of a chat-initiated session: the reply is the
                // narrative pinned at creation, so it also seeds the history.
                let bundle = response.bundle.unwrap_or_default();
                let session = Session::new(response.session_id, bundle, response.reply.clone());
                println!("{}", response.reply);
                if session.bundle.date_range.is_some() {
                    println!("{}", "(plan ready; /days to view)".dimmed());
                }
                self.session = Some(session);
            }
        }
    }

    async fn handle_slash_command(&mut self, input: &str) -> SlashResult {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts.first().copied().unwrap_or("");

        match cmd {
            "/help" | "/h" => {
                self.print_help();
                SlashResult::Continue
            }
            "/quit" | "/q" | "/exit" => SlashResult::Quit,
            "/days" | "/d" => {
                self.print_days();
                SlashResult::Continue
            }
            "/summary" | "/s" => {
                match &self.session {
                    Some(s) if !s.narrative_summary.is_empty() => println!("{}", s.narrative_summary),
                    Some(_) => println!("{}", "No narrative summary for this plan.".dimmed()),
                    None => self.print_no_session(),
                }
                SlashResult::Continue
            }
            "/budget" | "/b" => {
                match &self.session {
                    Some(s) => match &s.bundle.budget {
                        Some(budget) => output::print_budget(budget),
                        None => println!("{}", "No budget estimate in the current plan.".dimmed()),
                    },
                    None => self.print_no_session(),
                }
                SlashResult::Continue
            }
            "/revision" | "/r" => {
                match &self.session {
                    Some(s) => println!("session {} at revision {}", s.id, s.revision),
                    None => self.print_no_session(),
                }
                SlashResult::Continue
            }
            "/new" | "/n" => {
                self.close_session().await;
                println!("{}", "Session ended. Describe a new trip to start over.".dimmed());
                SlashResult::Continue
            }
            _ => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
                println!("Type {} for available commands", "/help".yellow());
                SlashResult::Continue
            }
        }
    }

    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:12} Show this help", "/help".yellow());
        println!("  {:12} Print the current day-by-day itinerary", "/days".yellow());
        println!("  {:12} Print the pinned narrative summary", "/summary".yellow());
        println!("  {:12} Print the trip cost estimate", "/budget".yellow());
        println!("  {:12} Show the session id and revision", "/revision".yellow());
        println!("  {:12} End the session and start over", "/new".yellow());
        println!("  {:12} Exit the REPL", "/quit".yellow());
        println!();
        println!("Anything else is sent to the planner as a chat turn.");
        println!();
    }

    /// Re-derive and print day plans from the current bundle.
    fn print_days(&self) {
        let Some(session) = &self.session else {
            self.print_no_session();
            return;
        };

        match session.day_plans() {
            Ok(days) => {
                println!();
                output::print_plan_overview(&session.bundle);
                output::print_itinerary(&days);
            }
            Err(e) => println!("{} {}", "error:".red(), e),
        }
    }

    fn print_no_session(&self) {
        println!("{}", "No plan yet. Describe a trip to start one.".dimmed());
    }

    /// End the current session at the service, best effort.
    async fn close_session(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(id = %session.id, "ending session");
            if let Err(e) = self.client.end_session(&session.id).await {
                warn!(error = %e, "failed to end session");
            }
        }
    }
}

/// Result of handling a slash command
enum SlashResult {
    Continue,
    Quit,
}
