//! Paged list controller.
//!
//! Drives fetching and accumulation for one cursor-paginated view. Every
//! issued load gets a sequence number; a completion is applied only if it
//! belongs to the most recently issued load, so overlapping requests that
//! resolve out of order cannot corrupt `items`.

use scanhist_types::{Cursor, Page};
use tracing::{debug, info, warn};

use crate::error::FetchError;
use crate::notify::Notifier;
use crate::source::PageSource;
use crate::state::{PageState, Transition};
use crate::view::ListView;

/// Handle for one issued load. Pass it back to
/// [`PagedListController::complete`] together with the fetch result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
    cursor: Option<Cursor>,
}

impl LoadTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Cursor to fetch with; `None` means the first page.
    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }
}

/// Outcome of handing a result back to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The result was merged into the state (or recorded as the error).
    Applied,
    /// A newer load was issued since; the result was dropped.
    Stale,
}

pub struct PagedListController<T, N> {
    state: PageState<T>,
    notifier: N,
    issued: u64,
}

impl<T, N: Notifier> PagedListController<T, N> {
    pub fn new(notifier: N) -> Self {
        Self {
            state: PageState::new(),
            notifier,
            issued: 0,
        }
    }

    pub fn state(&self) -> &PageState<T> {
        &self.state
    }

    pub fn view(&self, placeholders: usize) -> ListView<'_, T> {
        self.state.view(placeholders)
    }

    /// Sequence number of the most recently issued load (0 before any).
    pub fn latest_seq(&self) -> u64 {
        self.issued
    }

    /// Start a load: marks the state loading and clears any error.
    ///
    /// Not guarded against overlapping loads; the sequence number decides
    /// which completion wins.
    pub fn begin(&mut self, cursor: Option<Cursor>) -> LoadTicket {
        self.issued += 1;
        self.state.apply(Transition::Started);
        debug!(seq = self.issued, cursor = ?cursor, "page load issued");
        LoadTicket {
            seq: self.issued,
            cursor,
        }
    }

    /// Apply the result of a load started with [`begin`](Self::begin).
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        result: Result<Page<T>, FetchError>,
    ) -> Completion {
        if ticket.seq != self.issued {
            debug!(
                seq = ticket.seq,
                latest = self.issued,
                "discarding stale page result"
            );
            return Completion::Stale;
        }

        match result {
            Ok(page) => {
                let batch = page.items.len();
                let appended = ticket.cursor.is_some();
                self.state.apply(Transition::Succeeded {
                    requested: ticket.cursor,
                    page,
                });
                info!(
                    seq = ticket.seq,
                    batch,
                    total = self.state.items().len(),
                    appended,
                    has_next = self.state.has_next_page(),
                    "page loaded"
                );
            }
            Err(e) => {
                let message = e.user_message().to_string();
                warn!(seq = ticket.seq, error = %message, "page load failed");
                self.notifier.error(&message);
                self.state.apply(Transition::Failed { message });
            }
        }
        Completion::Applied
    }

    /// Issue, await and apply one load.
    pub async fn load_page<S>(&mut self, source: &S, cursor: Option<Cursor>) -> Completion
    where
        S: PageSource<Item = T> + ?Sized,
    {
        let ticket = self.begin(cursor);
        let result = source.fetch_page(ticket.cursor()).await;
        self.complete(ticket, result)
    }

    /// Initial load on mount.
    pub fn mount(&mut self) -> LoadTicket {
        self.begin(None)
    }

    /// "Load More": continue from the current cursor. Returns `None` when
    /// the control would not be offered.
    pub fn load_more(&mut self) -> Option<LoadTicket> {
        if !self.state.can_load_more() {
            return None;
        }
        let cursor = self.state.cursor().cloned()?;
        Some(self.begin(Some(cursor)))
    }

    /// "Try Again": only offered in the error state. Restarts from the
    /// first page, so a success replaces every page accumulated so far.
    pub fn retry(&mut self) -> Option<LoadTicket> {
        self.state.error()?;
        Some(self.begin(None))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
