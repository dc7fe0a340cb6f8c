//! Scan history grid: cards, loading skeletons, empty and error states.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use scanhist_core::{EMPTY_DETAIL, EMPTY_TITLE, ListView, ScanRecord};

use crate::card::card_text;
use crate::tui::app::{Action, HistoryScreenState, Screen};
use crate::tui::theme::Theme;

/// Rows taken by one card, borders included.
pub const CARD_HEIGHT: u16 = 7;

/// Grid columns for a given terminal width.
pub fn columns_for_width(width: u16) -> usize {
    match width {
        0..60 => 1,
        60..90 => 2,
        90..120 => 3,
        _ => 4,
    }
}

/// Adjust the first visible row so `selected_row` is on screen.
pub fn scroll_to(first_row: usize, selected_row: usize, visible_rows: usize) -> usize {
    let visible_rows = visible_rows.max(1);
    if selected_row < first_row {
        selected_row
    } else if selected_row >= first_row + visible_rows {
        selected_row + 1 - visible_rows
    } else {
        first_row
    }
}

pub fn render(
    frame: &mut ratatui::Frame,
    area: Rect,
    state: &mut HistoryScreenState,
    view: &ListView<'_, ScanRecord>,
    theme: &Theme,
) {
    match *view {
        ListView::Error { message } => render_error(frame, area, message, theme),
        ListView::List {
            items,
            placeholders,
            empty,
            load_more,
        } => {
            let (grid_area, button_area) = if load_more {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(CARD_HEIGHT), Constraint::Length(1)])
                    .split(area);
                (chunks[0], Some(chunks[1]))
            } else {
                (area, None)
            };

            if empty {
                render_empty(frame, grid_area, theme);
            } else {
                render_grid(frame, grid_area, state, items, placeholders, theme);
            }

            if let Some(button_area) = button_area {
                let button = Paragraph::new(Line::from(Span::styled(" [m] Load More ", theme.button)))
                    .alignment(Alignment::Center);
                frame.render_widget(button, button_area);
            }
        }
    }
}

fn render_grid(
    frame: &mut ratatui::Frame,
    area: Rect,
    state: &mut HistoryScreenState,
    items: &[ScanRecord],
    placeholders: usize,
    theme: &Theme,
) {
    let columns = columns_for_width(area.width);
    state.columns = columns;

    let cells = items.len() + placeholders;
    let total_rows = cells.div_ceil(columns);
    let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
    state.first_row = scroll_to(state.first_row, state.selected / columns, visible_rows)
        .min(total_rows.saturating_sub(visible_rows));

    let card_width = area.width / columns as u16;
    let first = state.first_row * columns;
    let last = (first + visible_rows * columns).min(cells);

    for index in first..last {
        let row = (index / columns - state.first_row) as u16;
        let col = (index % columns) as u16;
        let rect = Rect {
            x: area.x + col * card_width,
            y: area.y + row * CARD_HEIGHT,
            width: card_width,
            height: CARD_HEIGHT.min(area.height.saturating_sub(row * CARD_HEIGHT)),
        };
        match items.get(index) {
            Some(record) => render_card(frame, rect, record, index == state.selected, theme),
            None => render_placeholder(frame, rect, theme),
        }
    }
}

fn render_card(
    frame: &mut ratatui::Frame,
    area: Rect,
    record: &ScanRecord,
    selected: bool,
    theme: &Theme,
) {
    let card = card_text(record);
    let border = if selected {
        theme.card_border_selected
    } else {
        theme.card_border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(format!(" {} ", card.title), theme.text_bold));

    let lines: Vec<Line> = card
        .lines
        .into_iter()
        .map(|(label, value)| {
            let value_style = match label {
                "Verdict" if is_alarming(&value) => theme.text_error,
                "Status" | "Verdict" => theme.text_accent,
                _ => theme.base,
            };
            Line::from(vec![
                Span::styled(format!("{label}: "), theme.text_dim),
                Span::styled(value, value_style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn is_alarming(verdict: &str) -> bool {
    matches!(
        verdict.to_ascii_lowercase().as_str(),
        "malicious" | "infected" | "suspicious"
    )
}

/// Skeleton card: one tall bar and two shorter ones.
fn render_placeholder(frame: &mut ratatui::Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.placeholder);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = usize::from(inner.width.saturating_sub(1));
    let bar = |len: usize| Line::from(Span::styled("\u{2591}".repeat(len), theme.placeholder));
    let lines = vec![
        bar(width),
        bar(width),
        Line::from(""),
        bar(width * 3 / 4),
        bar(width / 2),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_empty(frame: &mut ratatui::Frame, area: Rect, theme: &Theme) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(EMPTY_TITLE, theme.text_bold)),
        Line::from(""),
        Line::from(Span::styled(EMPTY_DETAIL, theme.text_dim)),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.card_border);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        centered(area, 8),
    );
}

fn render_error(frame: &mut ratatui::Frame, area: Rect, message: &str, theme: &Theme) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("Error: {message}"), theme.text_error)),
        Line::from(""),
        Line::from(Span::styled(" [r] Try Again ", theme.button)),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.error_block);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        centered(area, 7),
    );
}

/// A full-width band of `height` rows in the vertical middle of `area`.
fn centered(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    Rect {
        x: area.x,
        y: area.y + (area.height - height) / 2,
        width: area.width,
        height,
    }
}

pub fn handle_key(key: KeyEvent, state: &mut HistoryScreenState, item_count: usize) -> Vec<Action> {
    let mut actions = Vec::new();
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => actions.push(Action::Quit),
        KeyCode::Char('m') | KeyCode::Enter => actions.push(Action::LoadMore),
        KeyCode::Char('r') => actions.push(Action::Retry),
        KeyCode::Char('t') => actions.push(Action::ToggleTheme),
        KeyCode::Char('x') => actions.push(Action::DismissToast),
        KeyCode::Char('?') | KeyCode::F(1) => actions.push(Action::SwitchScreen(Screen::Help)),
        KeyCode::Right | KeyCode::Char('l') => state.next(item_count),
        KeyCode::Left | KeyCode::Char('h') => state.previous(),
        KeyCode::Down | KeyCode::Char('j') => state.down(item_count),
        KeyCode::Up | KeyCode::Char('k') => state.up(),
        KeyCode::Home | KeyCode::Char('g') => state.selected = 0,
        KeyCode::End | KeyCode::Char('G') => state.last(item_count),
        _ => {}
    }
    actions
}

pub fn footer_hints(view: &ListView<'_, ScanRecord>) -> Vec<(&'static str, &'static str)> {
    let mut hints = vec![("hjkl", "move")];
    if view.shows_load_more() {
        hints.push(("m", "load more"));
    }
    if view.shows_retry() {
        hints.push(("r", "try again"));
    }
    hints.extend([("t", "theme"), ("?", "help"), ("q", "quit")]);
    hints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn column_breakpoints() {
        assert_eq!(columns_for_width(40), 1);
        assert_eq!(columns_for_width(60), 2);
        assert_eq!(columns_for_width(100), 3);
        assert_eq!(columns_for_width(200), 4);
    }

    #[test]
    fn scroll_follows_selection() {
        assert_eq!(scroll_to(0, 0, 3), 0);
        assert_eq!(scroll_to(0, 2, 3), 0);
        assert_eq!(scroll_to(0, 3, 3), 1);
        assert_eq!(scroll_to(4, 1, 3), 1);
        assert_eq!(scroll_to(0, 5, 0), 5);
    }

    #[test]
    fn keys_map_to_actions() {
        let mut state = HistoryScreenState::default();
        assert_eq!(handle_key(key(KeyCode::Char('m')), &mut state, 0), [Action::LoadMore]);
        assert_eq!(handle_key(key(KeyCode::Enter), &mut state, 0), [Action::LoadMore]);
        assert_eq!(handle_key(key(KeyCode::Char('r')), &mut state, 0), [Action::Retry]);
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut state, 0), [Action::Quit]);
        assert!(handle_key(key(KeyCode::Char('j')), &mut state, 3).is_empty());
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn hints_follow_view() {
        let items = [ScanRecord::new("a")];
        let list = ListView::List {
            items: &items,
            placeholders: 0,
            empty: false,
            load_more: true,
        };
        assert!(footer_hints(&list).contains(&("m", "load more")));
        assert!(!footer_hints(&list).contains(&("r", "try again")));

        let error = ListView::Error { message: "down" };
        assert!(footer_hints(&error).contains(&("r", "try again")));
    }
}
