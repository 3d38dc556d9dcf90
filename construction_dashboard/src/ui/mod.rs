//! Interactive terminal dashboard.

pub mod app;
pub mod render;

use std::io;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::runtime::Runtime;
use tracing::{debug, info, warn};

use crate::{
    config::DashboardConfig,
    dashboard::load_view,
    errors::Error,
    models::selection::Selection,
    providers::DataProvider,
    ui::app::{Action, App},
};

type Term = Terminal<CrosstermBackend<io::Stdout>>;

/// Runs the dashboard until the user quits. The terminal is restored even when
/// the loop fails.
pub fn run(
    runtime: &Runtime,
    provider: &dyn DataProvider,
    config: &DashboardConfig,
) -> Result<(), Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, runtime, provider, config);
    let restored = restore(&mut terminal);
    // Loop errors take precedence over restore errors.
    result.and(restored)
}

/// Undoes the terminal setup. Every step runs even if an earlier one fails.
fn restore<W: io::Write>(terminal: &mut Terminal<CrosstermBackend<W>>) -> Result<(), Error> {
    let steps = [
        disable_raw_mode(),
        execute!(terminal.backend_mut(), LeaveAlternateScreen),
        terminal.show_cursor(),
    ];
    first_failure(steps).map_err(Error::from)
}

/// Logs every failed step and returns the first one.
fn first_failure(steps: impl IntoIterator<Item = io::Result<()>>) -> io::Result<()> {
    let mut first = Ok(());
    for step in steps {
        if let Err(e) = step {
            warn!(error = %e, "failed to restore terminal");
            if first.is_ok() {
                first = Err(e);
            }
        }
    }
    first
}

fn event_loop(
    terminal: &mut Term,
    runtime: &Runtime,
    provider: &dyn DataProvider,
    config: &DashboardConfig,
) -> Result<(), Error> {
    let initial = Selection::default();
    let mut app = App::new(initial);
    reload(terminal, runtime, provider, config, &mut app, initial)?;

    loop {
        terminal.draw(|f| render::draw(f, &app, &config.display))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match app.handle_key(key.code) {
            Action::None => {}
            Action::Quit => {
                info!("quit requested");
                return Ok(());
            }
            Action::Reload(selection) => {
                reload(terminal, runtime, provider, config, &mut app, selection)?;
            }
        }
    }
}

fn reload(
    terminal: &mut Term,
    runtime: &Runtime,
    provider: &dyn DataProvider,
    config: &DashboardConfig,
    app: &mut App,
    selection: Selection,
) -> Result<(), Error> {
    debug!(symbol = selection.symbol(), period = %selection.period, "reloading");
    app.begin_loading();
    terminal.draw(|f| render::draw(f, app, &config.display))?;
    let view = runtime.block_on(load_view(provider, selection, &config.display));
    app.set_view(view);
    Ok(())
}
