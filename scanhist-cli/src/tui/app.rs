//! App state, key routing and fetch dispatch.

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tokio::sync::mpsc;
use tracing::debug;

use scanhist_core::{Completion, LoadTicket, PageSource, PagedListController, ScanRecord};

use super::event::FetchOutcome;
use super::screens;
use super::theme::{Theme, ThemeMode};
use super::toast::ToastNotifier;

/// Page source shared with the fetch tasks.
pub type SharedSource = Arc<dyn PageSource<Item = ScanRecord>>;

// ---------------------------------------------------------------------------
// Screens and actions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    History,
    Help,
}

/// Requests a screen makes of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    SwitchScreen(Screen),
    LoadMore,
    Retry,
    ToggleTheme,
    DismissToast,
}

// ---------------------------------------------------------------------------
// Per-screen state
// ---------------------------------------------------------------------------

/// Card selection and scroll position on the history grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryScreenState {
    pub selected: usize,
    /// Column count used by the last render; vertical moves step by it.
    pub columns: usize,
    /// First grid row on screen.
    pub first_row: usize,
}

impl Default for HistoryScreenState {
    fn default() -> Self {
        Self {
            selected: 0,
            columns: 1,
            first_row: 0,
        }
    }
}

impl HistoryScreenState {
    pub fn next(&mut self, count: usize) {
        if self.selected + 1 < count {
            self.selected += 1;
        }
    }

    pub fn previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn down(&mut self, count: usize) {
        let target = self.selected + self.columns.max(1);
        if target < count {
            self.selected = target;
        } else if count > 0 {
            self.selected = count - 1;
        }
    }

    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(self.columns.max(1));
    }

    pub fn last(&mut self, count: usize) {
        self.selected = count.saturating_sub(1);
    }

    /// Keep the selection inside a list that may have shrunk.
    pub fn clamp(&mut self, count: usize) {
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
    }
}

#[derive(Debug, Default)]
pub struct HelpScreenState {
    pub scroll: u16,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct AppSettings {
    pub placeholders: usize,
    pub theme: ThemeMode,
    /// Shown in the header.
    pub api_url: String,
}

pub struct App {
    pub screen: Screen,
    pub controller: PagedListController<ScanRecord, ToastNotifier>,
    pub toasts: ToastNotifier,
    pub history_state: HistoryScreenState,
    pub help_state: HelpScreenState,
    pub placeholders: usize,
    pub theme: ThemeMode,
    pub api_url: String,
    pub should_quit: bool,

    source: SharedSource,
    fetch_tx: mpsc::Sender<FetchOutcome>,
    fetch_rx: Option<mpsc::Receiver<FetchOutcome>>,
}

impl App {
    pub fn new(source: SharedSource, settings: AppSettings) -> Self {
        let (fetch_tx, fetch_rx) = mpsc::channel(16);
        let toasts = ToastNotifier::default();
        Self {
            screen: Screen::History,
            controller: PagedListController::new(toasts.clone()),
            toasts,
            history_state: HistoryScreenState::default(),
            help_state: HelpScreenState::default(),
            placeholders: settings.placeholders,
            theme: settings.theme,
            api_url: settings.api_url,
            should_quit: false,
            source,
            fetch_tx,
            fetch_rx: Some(fetch_rx),
        }
    }

    /// Receiver for fetch completions; hand it to the event handler.
    pub fn take_fetch_rx(&mut self) -> Option<mpsc::Receiver<FetchOutcome>> {
        self.fetch_rx.take()
    }

    /// Issue the first-page load.
    pub fn mount(&mut self) {
        let ticket = self.controller.mount();
        self.dispatch(ticket);
    }

    fn dispatch(&self, ticket: LoadTicket) {
        let source = self.source.clone();
        let tx = self.fetch_tx.clone();
        debug!(seq = ticket.seq(), cursor = ?ticket.cursor(), "dispatching fetch");
        tokio::spawn(async move {
            let result = source.fetch_page(ticket.cursor()).await;
            // The receiver is gone only when the app is shutting down.
            let _ = tx.send(FetchOutcome { ticket, result }).await;
        });
    }

    pub fn handle_fetch(&mut self, outcome: FetchOutcome) -> Completion {
        let completion = self.controller.complete(outcome.ticket, outcome.result);
        if completion == Completion::Applied {
            self.history_state
                .clamp(self.controller.state().items().len());
        }
        completion
    }

    pub fn handle_tick(&mut self, now: Instant) {
        self.toasts.expire(now);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        let actions = match self.screen {
            Screen::History => screens::history::handle_key(
                key,
                &mut self.history_state,
                self.controller.state().items().len(),
            ),
            Screen::Help => screens::help::handle_key(key, &mut self.help_state),
        };

        for action in actions {
            self.apply_action(action);
        }
    }

    fn apply_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::SwitchScreen(screen) => self.screen = screen,
            Action::LoadMore => match self.controller.load_more() {
                Some(ticket) => self.dispatch(ticket),
                None => debug!("load more not available"),
            },
            Action::Retry => match self.controller.retry() {
                Some(ticket) => {
                    self.toasts.dismiss();
                    self.dispatch(ticket);
                }
                None => debug!("nothing to retry"),
            },
            Action::ToggleTheme => self.theme = self.theme.toggled(),
            Action::DismissToast => self.toasts.dismiss(),
        }
    }

    pub fn render(&mut self, frame: &mut ratatui::Frame) {
        let palette = self.theme.palette();
        frame.render_widget(Block::default().style(palette.base), frame.area());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(6),
                Constraint::Length(1),
            ])
            .split(frame.area());

        render_header(frame, chunks[0], self, palette);

        let view = self.controller.view(self.placeholders);
        match self.screen {
            Screen::History => {
                screens::history::render(frame, chunks[1], &mut self.history_state, &view, palette)
            }
            Screen::Help => screens::help::render(frame, chunks[1], &self.help_state, palette),
        }

        let hints = match self.screen {
            Screen::History => screens::history::footer_hints(&view),
            Screen::Help => screens::help::footer_hints(),
        };
        render_footer(frame, chunks[2], &hints, palette);

        if let Some(toast) = self.toasts.current() {
            render_toast(frame, chunks[1], &toast.message, palette);
        }
    }
}

// ---------------------------------------------------------------------------
// Shared widgets
// ---------------------------------------------------------------------------

fn render_header(frame: &mut ratatui::Frame, area: Rect, app: &App, palette: &Theme) {
    let state = app.controller.state();
    let status = format!(
        "{} scan(s) loaded  |  {}  |  {}  |  theme: {}",
        state.items().len(),
        state.phase().label(),
        app.api_url,
        app.theme.label(),
    );
    let lines = vec![
        Line::from(Span::styled(" Scan History", palette.title)),
        Line::from(Span::styled(format!(" {status}"), palette.text_dim)),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_footer(frame: &mut ratatui::Frame, area: Rect, hints: &[(&str, &str)], palette: &Theme) {
    let mut spans = Vec::new();
    for (key, desc) in hints {
        spans.push(Span::styled(format!(" {key}"), palette.footer_key));
        spans.push(Span::raw(format!(":{desc}  ")));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(palette.footer_bg),
        area,
    );
}

fn render_toast(frame: &mut ratatui::Frame, area: Rect, message: &str, palette: &Theme) {
    let width = area.width.min(60);
    let height = 3.min(area.height);
    let rect = Rect {
        x: area.x + area.width - width,
        y: area.y + area.height - height,
        width,
        height,
    };
    frame.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" x:close ")
        .style(palette.toast);
    frame.render_widget(
        Paragraph::new(message.to_string())
            .block(block)
            .wrap(Wrap { trim: true }),
        rect,
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use scanhist_core::{Cursor, FetchError, Page};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Hands out canned responses in order.
    #[derive(Default)]
    struct Canned(Mutex<VecDeque<Result<Page<ScanRecord>, FetchError>>>);

    impl Canned {
        fn with(responses: Vec<Result<Page<ScanRecord>, FetchError>>) -> Arc<Self> {
            Arc::new(Self(Mutex::new(responses.into())))
        }
    }

    #[async_trait]
    impl PageSource for Canned {
        type Item = ScanRecord;

        async fn fetch_page(&self, _cursor: Option<&Cursor>) -> Result<Page<ScanRecord>, FetchError> {
            self.0
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(FetchError::new("no more responses")))
        }
    }

    fn records(ids: &[&str]) -> Vec<ScanRecord> {
        ids.iter().map(|id| ScanRecord::new(*id)).collect()
    }

    fn app_with(source: Arc<Canned>) -> (App, mpsc::Receiver<FetchOutcome>) {
        let mut app = App::new(
            source,
            AppSettings {
                placeholders: 4,
                theme: ThemeMode::Dark,
                api_url: "http://test".into(),
            },
        );
        let rx = app.take_fetch_rx().unwrap();
        (app, rx)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn settle(app: &mut App, rx: &mut mpsc::Receiver<FetchOutcome>) -> Completion {
        let outcome = rx.recv().await.unwrap();
        app.handle_fetch(outcome)
    }

    fn screen_text(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test]
    async fn mount_then_load_more() {
        let source = Canned::with(vec![
            Ok(Page::new(records(&["a", "b"]), Some(Cursor::from("t1")))),
            Ok(Page::last(records(&["c"]))),
        ]);
        let (mut app, mut rx) = app_with(source);

        app.mount();
        assert!(app.controller.state().is_loading());
        assert_eq!(settle(&mut app, &mut rx).await, Completion::Applied);
        assert_eq!(app.controller.state().items().len(), 2);

        app.handle_key(press(KeyCode::Char('m')));
        assert!(app.controller.state().is_loading());
        settle(&mut app, &mut rx).await;

        let ids: Vec<_> = app
            .controller
            .state()
            .items()
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert!(!app.controller.view(4).shows_load_more());
    }

    #[tokio::test]
    async fn failure_raises_toast_and_retry_recovers() {
        let source = Canned::with(vec![
            Err(FetchError::new("connection refused")),
            Ok(Page::last(records(&["a"]))),
        ]);
        let (mut app, mut rx) = app_with(source);

        app.mount();
        settle(&mut app, &mut rx).await;
        assert_eq!(app.toasts.current().unwrap().message, "connection refused");
        let text = screen_text(&mut app);
        assert!(text.contains("Error: connection refused"));
        assert!(text.contains("Try Again"));

        app.handle_key(press(KeyCode::Char('r')));
        assert!(app.toasts.current().is_none());
        settle(&mut app, &mut rx).await;
        assert_eq!(app.controller.state().items().len(), 1);
        assert_eq!(app.controller.state().error(), None);
    }

    #[tokio::test]
    async fn load_more_ignored_while_loading() {
        let source = Canned::with(vec![Ok(Page::new(
            records(&["a"]),
            Some(Cursor::from("t1")),
        ))]);
        let (mut app, mut rx) = app_with(source);

        app.mount();
        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.controller.latest_seq(), 1);
        settle(&mut app, &mut rx).await;
        assert!(app.controller.view(4).shows_load_more());
    }

    #[tokio::test]
    async fn empty_collection_renders_empty_state() {
        let source = Canned::with(vec![Ok(Page::last(vec![]))]);
        let (mut app, mut rx) = app_with(source);

        app.mount();
        settle(&mut app, &mut rx).await;

        let text = screen_text(&mut app);
        assert!(text.contains(scanhist_core::EMPTY_TITLE));
        assert!(!text.contains("Load More"));
    }

    #[tokio::test]
    async fn loaded_page_renders_cards_and_load_more() {
        let source = Canned::with(vec![Ok(Page::new(
            vec![ScanRecord::new("s1").with_field("fileName", "invoice.pdf")],
            Some(Cursor::from("t1")),
        ))]);
        let (mut app, mut rx) = app_with(source);

        app.mount();
        settle(&mut app, &mut rx).await;

        let text = screen_text(&mut app);
        assert!(text.contains("Scan History"));
        assert!(text.contains("invoice.pdf"));
        assert!(text.contains("Load More"));
    }

    #[tokio::test]
    async fn keys_for_quit_help_and_theme() {
        let (mut app, _rx) = app_with(Canned::with(vec![]));

        app.handle_key(press(KeyCode::Char('t')));
        assert_eq!(app.theme, ThemeMode::Light);

        app.handle_key(press(KeyCode::Char('?')));
        assert_eq!(app.screen, Screen::Help);
        app.handle_key(press(KeyCode::Esc));
        assert_eq!(app.screen, Screen::History);
        assert!(!app.should_quit);

        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn history_navigation_steps_by_columns() {
        let mut state = HistoryScreenState {
            columns: 3,
            ..Default::default()
        };
        state.down(7);
        assert_eq!(state.selected, 3);
        state.down(7);
        assert_eq!(state.selected, 6);
        state.down(7);
        assert_eq!(state.selected, 6);
        state.up();
        assert_eq!(state.selected, 3);
        state.next(7);
        assert_eq!(state.selected, 4);
        state.previous();
        state.previous();
        assert_eq!(state.selected, 2);
        state.last(7);
        assert_eq!(state.selected, 6);
        state.clamp(2);
        assert_eq!(state.selected, 1);
        state.clamp(0);
        assert_eq!(state.selected, 0);
    }
}
