//! Unified event loop merging crossterm input, tick, and fetch completions.

use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

use scanhist_core::{FetchError, LoadTicket, Page, ScanRecord};

/// A finished fetch, sent back from its task to the main loop.
#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: LoadTicket,
    pub result: Result<Page<ScanRecord>, FetchError>,
}

/// Unified event type consumed by the main loop.
#[derive(Debug)]
pub enum AppEvent {
    /// Keyboard input (already filtered to Press only).
    Key(KeyEvent),
    /// Render tick; also expires toasts.
    Tick,
    Fetch(FetchOutcome),
    #[allow(dead_code)]
    Resize(u16, u16),
}

pub struct EventHandler {
    tick_rate: Duration,
    fetch_rx: Option<mpsc::Receiver<FetchOutcome>>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self {
            tick_rate,
            fetch_rx: None,
        }
    }

    pub fn set_fetch_receiver(&mut self, rx: mpsc::Receiver<FetchOutcome>) {
        self.fetch_rx = Some(rx);
    }

    fn try_fetch(&mut self) -> Option<AppEvent> {
        let rx = self.fetch_rx.as_mut()?;
        rx.try_recv().ok().map(AppEvent::Fetch)
    }

    /// Wait for the next event. Returns `Tick` if nothing happens within the tick rate.
    pub async fn next(&mut self) -> anyhow::Result<AppEvent> {
        if let Some(evt) = self.try_fetch() {
            return Ok(evt);
        }

        if event::poll(self.tick_rate)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(AppEvent::Key(key));
                }
                Event::Resize(w, h) => return Ok(AppEvent::Resize(w, h)),
                _ => {}
            }
        }

        // Completions that landed during the poll wait.
        if let Some(evt) = self.try_fetch() {
            return Ok(evt);
        }

        Ok(AppEvent::Tick)
    }
}
