pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod logging;
pub mod ui;

use std::io::{self, Stdout};

use anyhow::{Context, Result};
use app::events::{AppEvent, spawn_input_task};
use app::settings::{config_dir, load_runtime_settings};
use app::state::{AppMode, AppState, weather_client};
use chrono::{Local, Utc};
use cli::Cli;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing::info;

pub async fn run(cli: Cli) -> Result<()> {
    cli.validate()?;
    if cli.one_shot {
        return run_one_shot(&cli).await;
    }

    // Logging is best effort here: stderr is hidden behind the alternate screen.
    let log_path = config_dir().and_then(|dir| logging::init_file(&dir).ok());
    info!(log = ?log_path, "starting dashboard");

    let mut terminal = setup_terminal()?;
    let result = run_inner(&mut terminal, cli).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn run_one_shot(cli: &Cli) -> Result<()> {
    logging::init_stderr()?;
    let (settings, _) = load_runtime_settings(cli, true);
    let city = cli
        .requested_city()
        .context("--one-shot needs a city")?;

    let report = weather_client(cli)?
        .fetch(&city)
        .await
        .with_context(|| format!("weather lookup for {city} failed"))?;
    print!(
        "{}",
        ui::text::render_report(&report, &settings, Utc::now(), &Local)
    );
    Ok(())
}

async fn run_inner(terminal: &mut Terminal<CrosstermBackend<Stdout>>, cli: Cli) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(256);
    let input_stream = spawn_input_task();
    tokio::pin!(input_stream);
    let (settings, settings_path) = load_runtime_settings(&cli, true);
    let mut app = AppState::new(settings, settings_path);

    tx.send(AppEvent::Bootstrap).await?;

    while app.running {
        tokio::select! {
            maybe_input = input_stream.next() => {
                if let Some(input) = maybe_input {
                    app.handle_event(AppEvent::Input(input), &tx, &cli).await?;
                }
            }
            maybe_event = rx.recv() => {
                if let Some(event) = maybe_event {
                    app.handle_event(event, &tx, &cli).await?;
                }
            }
        }

        terminal.draw(|frame| ui::render(frame, &app))?;

        if app.mode == AppMode::Quit {
            app.running = false;
        }
    }

    info!("dashboard closed");
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    install_panic_hook();
    enable_raw_mode().context("enabling raw mode failed")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn install_panic_hook() {
    let existing = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
        existing(panic);
    }));
}
