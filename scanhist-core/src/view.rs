//! What a renderer should draw for a given [`PageState`](crate::PageState).

/// Skeleton cards shown while a page is loading.
pub const DEFAULT_PLACEHOLDERS: usize = 4;

pub const EMPTY_TITLE: &str = "No Scans Found";
pub const EMPTY_DETAIL: &str = "You haven't submitted any files for scanning yet.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListView<'a, T> {
    /// Error block with a retry affordance. The list and placeholders are
    /// suppressed.
    Error { message: &'a str },
    List {
        items: &'a [T],
        /// Skeleton cards to draw after `items`; zero unless loading.
        placeholders: usize,
        /// Show the empty-state message.
        empty: bool,
        /// Show the "Load More" control.
        load_more: bool,
    },
}

impl<T> ListView<'_, T> {
    pub fn shows_retry(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn shows_load_more(&self) -> bool {
        matches!(self, Self::List { load_more: true, .. })
    }

    pub fn shows_empty_state(&self) -> bool {
        matches!(self, Self::List { empty: true, .. })
    }

    pub fn placeholder_count(&self) -> usize {
        match self {
            Self::List { placeholders, .. } => *placeholders,
            Self::Error { .. } => 0,
        }
    }

    pub fn item_count(&self) -> usize {
        match self {
            Self::List { items, .. } => items.len(),
            Self::Error { .. } => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{PageState, Transition};
    use scanhist_types::{Cursor, Page};

    #[test]
    fn fresh_state_shows_placeholders_only() {
        let state: PageState<u8> = PageState::new();
        let view = state.view(DEFAULT_PLACEHOLDERS);
        assert_eq!(view.placeholder_count(), 4);
        assert_eq!(view.item_count(), 0);
        assert!(!view.shows_empty_state());
        assert!(!view.shows_load_more());
        assert!(!view.shows_retry());
    }

    #[test]
    fn error_suppresses_list() {
        let mut state = PageState::new();
        state.apply(Transition::Started);
        state.apply(Transition::Succeeded {
            requested: None,
            page: Page::new(vec![1u8, 2], Some(Cursor::from("t"))),
        });
        state.apply(Transition::Started);
        state.apply(Transition::Failed {
            message: "offline".into(),
        });

        let view = state.view(4);
        assert_eq!(view, ListView::Error { message: "offline" });
        assert_eq!(view.item_count(), 0);
        assert_eq!(view.placeholder_count(), 0);
        assert!(!view.shows_load_more());
    }

    #[test]
    fn loaded_empty_page_shows_empty_state() {
        let mut state: PageState<u8> = PageState::new();
        state.apply(Transition::Started);
        state.apply(Transition::Succeeded {
            requested: None,
            page: Page::last(vec![]),
        });

        let view = state.view(4);
        assert!(view.shows_empty_state());
        assert!(!view.shows_load_more());
        assert_eq!(view.placeholder_count(), 0);
    }

    #[test]
    fn loading_more_keeps_items_and_adds_placeholders() {
        let mut state = PageState::new();
        state.apply(Transition::Started);
        state.apply(Transition::Succeeded {
            requested: None,
            page: Page::new(vec![1u8], Some(Cursor::from("t"))),
        });
        state.apply(Transition::Started);

        let view = state.view(2);
        assert_eq!(view.item_count(), 1);
        assert_eq!(view.placeholder_count(), 2);
        assert!(!view.shows_load_more());
    }
}
