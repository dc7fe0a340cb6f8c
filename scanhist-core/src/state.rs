//! Page state and its transition function.
//!
//! `PageState` only changes through [`PageState::apply`]; every mutation the
//! controller performs is one of the [`Transition`] variants.

use scanhist_types::{Cursor, Page};

use crate::view::ListView;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Freshly created, first fetch not issued yet.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded.
    Loaded,
    /// The last fetch failed.
    Errored,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Loading => "Loading",
            Self::Loaded => "Loaded",
            Self::Errored => "Errored",
        }
    }
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Transition<T> {
    /// A fetch was issued.
    Started,
    /// A fetch issued with `requested` as its cursor returned `page`.
    Succeeded {
        requested: Option<Cursor>,
        page: Page<T>,
    },
    /// A fetch failed with a user-facing message.
    Failed { message: String },
}

// ---------------------------------------------------------------------------
// PageState
// ---------------------------------------------------------------------------

/// Accumulated results and fetch status for one paginated view.
#[derive(Debug, Clone, PartialEq)]
pub struct PageState<T> {
    items: Vec<T>,
    cursor: Option<Cursor>,
    has_next_page: bool,
    phase: Phase,
    error: Option<String>,
}

impl<T> Default for PageState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            cursor: None,
            has_next_page: true,
            phase: Phase::Idle,
            error: None,
        }
    }
}

impl<T> PageState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Continuation token from the last successful fetch.
    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    pub fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True while a fetch is in flight, and on a fresh state whose first
    /// fetch has not resolved yet.
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// "Load More" is offered only on a settled, error-free state that
    /// still has a continuation token.
    pub fn can_load_more(&self) -> bool {
        self.has_next_page && !self.is_loading() && self.error.is_none()
    }

    pub fn apply(&mut self, transition: Transition<T>) {
        match transition {
            Transition::Started => {
                self.phase = Phase::Loading;
                self.error = None;
            }
            Transition::Succeeded { requested, page } => {
                if requested.is_some() {
                    self.items.extend(page.items);
                } else {
                    self.items = page.items;
                }
                self.has_next_page = page.next.is_some();
                self.cursor = page.next;
                self.phase = Phase::Loaded;
            }
            Transition::Failed { message } => {
                self.error = Some(message);
                self.phase = Phase::Errored;
            }
        }
    }

    /// Observable rendering state with `placeholders` skeleton cards while
    /// loading.
    pub fn view(&self, placeholders: usize) -> ListView<'_, T> {
        if let Some(message) = self.error.as_deref() {
            return ListView::Error { message };
        }
        let loading = self.is_loading();
        ListView::List {
            items: &self.items,
            placeholders: if loading { placeholders } else { 0 },
            empty: !loading && self.items.is_empty(),
            load_more: self.has_next_page && !loading,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
