//! Fairway - terminal client for tournament registration forms
//!
//! A Ratatui-based TUI for filling in volunteer, vendor, media, pro-am,
//! procurement and job applications, and for managing accreditation
//! locations, zones and access levels through the tournament API.
//!
//! `fairway submit <slug> <record.json>` submits one record without the UI.

mod api;
mod app;
mod config;
mod platform;
mod schema;
mod state;
mod ui;

use anyhow::{Context, Result};
use api::HttpSubmitter;
use app::App;
use config::AppConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fairway=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = AppConfig::resolve()?;
    let submitter = HttpSubmitter::new(config.base_url(), config.timeout())?;
    let mut app = App::new(Arc::new(submitter), config.base_url(), config.session());
    app.load_modules().await;

    // `fairway submit <slug> <record.json>` sends one record without the UI
    if let [command, slug, path] = args.as_slice() {
        if command == "submit" {
            return submit_file(&mut app, slug, Path::new(path)).await;
        }
    }
    // Optional form slug to open straight away, e.g. `fairway volunteer`
    if let Some(slug) = args.first() {
        app.open_form(slug);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn submit_file(app: &mut App, slug: &str, path: &Path) -> Result<()> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read record from {}", path.display()))?;
    let record: Map<String, Value> = serde_json::from_str(&content)
        .with_context(|| format!("{} must hold a JSON object", path.display()))?;
    let receipt = app.submit_record(slug, &record).await?;
    println!("Submitted {slug} (HTTP {})", receipt.status);
    if !receipt.body.is_null() {
        println!("{}", serde_json::to_string_pretty(&receipt.body)?);
    }
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Form scrolling needs the real screen size
        let term_size = terminal.size()?;
        app.terminal_size = Some((term_size.height, term_size.width));

        // Pick up finished requests before drawing
        app.poll_tasks();

        terminal.draw(|frame| ui::draw(frame, app))?;

        // Poll faster while a submission is in flight so its outcome shows promptly
        let poll_duration = if app.is_submitting() {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };

        if event::poll(poll_duration)? {
            match event::read()? {
                Event::Key(key) => {
                    // Global quit: Ctrl+C
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        return Ok(());
                    }
                    app.handle_key(key)?;
                }
                Event::Resize(_width, _height) => {
                    // Picked up from terminal.size() on the next pass
                }
                _ => {}
            }
        }

        // Let spawned submissions make progress between frames
        tokio::task::yield_now().await;

        if app.should_quit() {
            return Ok(());
        }
    }
}
