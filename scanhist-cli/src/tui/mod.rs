//! Interactive terminal view of the scan history.

mod app;
mod event;
mod screens;
mod terminal;
pub mod theme;
mod toast;

use std::time::{Duration, Instant};

pub use app::{AppSettings, SharedSource};

use app::App;
use event::{AppEvent, EventHandler};
use terminal::TerminalGuard;

/// Run the interactive view until the user quits.
pub async fn run_tui(source: SharedSource, settings: AppSettings) -> anyhow::Result<()> {
    let _guard = TerminalGuard::setup()?;
    let mut term = terminal::create_terminal()?;

    let mut app = App::new(source, settings);
    let mut events = EventHandler::new(Duration::from_millis(100));
    if let Some(rx) = app.take_fetch_rx() {
        events.set_fetch_receiver(rx);
    }

    app.mount();

    loop {
        term.draw(|frame| app.render(frame))?;

        match events.next().await? {
            AppEvent::Key(key) => app.handle_key(key),
            AppEvent::Fetch(outcome) => {
                app.handle_fetch(outcome);
            }
            AppEvent::Tick => app.handle_tick(Instant::now()),
            AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            break;
        }
    }

    let loaded = app.controller.state().items().len();
    drop(term);
    drop(_guard);

    println!("{loaded} scan(s) loaded");
    Ok(())
}
