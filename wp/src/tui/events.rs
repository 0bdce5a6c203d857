//! TUI event plumbing
//!
//! Terminal input is polled on a dedicated thread and forwarded over a
//! channel so the async main loop can await events alongside planner-request
//! completions. A tick fires whenever the poll window elapses with no input.

use std::time::Duration;

use crossterm::event::{self, KeyEvent, MouseEvent};
use eyre::Result;
use tokio::sync::mpsc;

/// Terminal events the app reacts to.
#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
}

/// Bridges crossterm's blocking poll loop into the async runtime.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        std::thread::spawn(move || {
            loop {
                let ready = event::poll(tick_rate).unwrap_or(false);
                let forwarded = if ready {
                    match event::read() {
                        Ok(event::Event::Key(key)) => tx.send(Event::Key(key)),
                        Ok(event::Event::Mouse(mouse)) => tx.send(Event::Mouse(mouse)),
                        Ok(event::Event::Resize(w, h)) => tx.send(Event::Resize(w, h)),
                        Ok(_) => continue,
                        Err(_) => break,
                    }
                } else {
                    tx.send(Event::Tick)
                };

                if forwarded.is_err() {
                    // Receiver dropped; the TUI is shutting down.
                    break;
                }
            }
        });

        Self { rx }
    }

    /// Wait for the next event.
    pub async fn next(&mut self) -> Result<Event> {
        self.rx.recv().await.ok_or_else(|| eyre::eyre!("Event channel closed"))
    }
}
