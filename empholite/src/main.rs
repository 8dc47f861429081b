//! Empholite terminal client
//!
//! # Usage
//!
//! ```sh
//! # Responses page against a local backend
//! empholite --base-url http://localhost:8080
//!
//! # Login page with custom fields, logging to a file
//! RUST_LOG=debug empholite --page login --login-field email --log-file empholite.log
//! ```

use std::cell::RefCell;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use empholite::action::Action;
use empholite::api::ApiClient;
use empholite::app::EmpholiteUi;
use empholite::config::{Args, Config};
use empholite::effect::handle_effect;
use empholite::logging::init_tracing;
use empholite::reducer::reducer;
use empholite::state::{AppState, Page};
use empholite_dispatch::{EffectRuntime, EffectStoreWithMiddleware, LoggingMiddleware};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::try_from(Args::parse()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_tracing(config.log_file.as_deref()) {
        eprintln!("Warning: could not open log file: {e}");
    }

    let client = match ApiClient::new(config.base_url.clone(), config.timeout) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(config, client).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Terminal error");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config, client: ApiClient) -> io::Result<()> {
    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, config, client).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: Config,
    client: ApiClient,
) -> io::Result<()> {
    info!(base_url = %client.base_url(), page = ?config.page, "Starting");

    let state = AppState::new(config.page).with_login_fields(config.login_fields);
    let store = EffectStoreWithMiddleware::new(state, reducer, LoggingMiddleware::new());
    let mut runtime = EffectRuntime::from_store(store);

    // Each page loads its data on mount
    runtime.enqueue(match config.page {
        Page::Home => Action::ResponsesFetch,
        Page::Login => Action::SessionCheck,
    });

    let ui = RefCell::new(EmpholiteUi::default());

    runtime
        .run(
            terminal,
            |frame, area, state| ui.borrow_mut().render(frame, area, state),
            |event, state| ui.borrow_mut().map_event(event, state),
            |action| matches!(action, Action::Quit),
            |effect, ctx| handle_effect(&client, effect, ctx),
        )
        .await
}
