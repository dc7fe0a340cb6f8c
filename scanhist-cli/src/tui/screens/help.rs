//! Help screen: keybinding reference.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::tui::app::{Action, HelpScreenState, Screen};
use crate::tui::theme::Theme;

pub fn render(frame: &mut ratatui::Frame, area: Rect, state: &HelpScreenState, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.card_border)
        .title(" Help ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible: Vec<Line> = help_lines(theme)
        .into_iter()
        .skip(usize::from(state.scroll))
        .collect();
    frame.render_widget(Paragraph::new(visible).wrap(Wrap { trim: false }), inner);
}

pub fn handle_key(key: KeyEvent, state: &mut HelpScreenState) -> Vec<Action> {
    let mut actions = Vec::new();
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('?') | KeyCode::F(1) => {
            actions.push(Action::SwitchScreen(Screen::History));
        }
        KeyCode::Down | KeyCode::Char('j') => state.scroll = state.scroll.saturating_add(1),
        KeyCode::Up | KeyCode::Char('k') => state.scroll = state.scroll.saturating_sub(1),
        KeyCode::Home => state.scroll = 0,
        KeyCode::Char('t') => actions.push(Action::ToggleTheme),
        _ => {}
    }
    actions
}

pub fn footer_hints() -> Vec<(&'static str, &'static str)> {
    vec![("j/k", "scroll"), ("Esc", "back")]
}

fn help_lines(theme: &Theme) -> Vec<Line<'static>> {
    let bold = |s: &'static str| Line::from(Span::styled(s, theme.text_bold));
    let normal = |s: &'static str| Line::from(s);

    vec![
        normal(""),
        bold("  === Scan History ==="),
        normal(""),
        normal("  h j k l / arrows   Move between cards"),
        normal("  g / Home           First card"),
        normal("  G / End            Last loaded card"),
        normal("  m / Enter          Load more (when offered)"),
        normal("  r                  Try again after an error"),
        normal("  x                  Dismiss notification"),
        normal("  t                  Toggle dark/light theme"),
        normal("  ? / F1             This help"),
        normal("  q / Esc / Ctrl+C   Quit"),
        normal(""),
        bold("  === Notes ==="),
        normal(""),
        normal("  Try again restarts from the first page."),
        normal("  Notifications close by themselves after a few seconds."),
    ]
}
