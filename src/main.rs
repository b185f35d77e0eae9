mod audio;
mod config;
mod controller;
mod error;
mod logging;
mod model;
mod view;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::Mutex;

use audio::AudioBackend;
use config::Config;
use controller::AppController;
use model::{AppModel, CatalogClient, Route};
use view::AppView;

/// Search the iTunes catalog for albums by artist and preview their tracks
#[derive(Parser, Debug)]
#[command(name = "music-search", version, about)]
struct Args {
    /// Path to the config file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start at a route, e.g. `/album/1440857781`
    #[arg(short, long)]
    route: Option<String>,

    /// Run an artist search on startup
    #[arg(short, long)]
    search: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    let _log_guard = match logging::init_logging(&config.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        }
    };

    tracing::info!("=== Music Search Starting ===");
    tracing::debug!(base_url = %config.api.base_url, "Using catalog endpoint");

    let catalog = CatalogClient::from_config(&config.api)?;
    let (audio_backend, preview_events) =
        AudioBackend::spawn(config.preview.enabled, config.preview.clamped_volume())?;

    let mut app_model = AppModel::new();
    app_model.set_catalog_client(catalog);

    let model = Arc::new(Mutex::new(app_model));
    let controller = AppController::new(model.clone(), audio_backend.clone());
    controller.start_preview_event_listener(preview_events);

    if let Some(term) = args.search.filter(|term| !term.is_empty()) {
        model.lock().await.update_search_query(term.clone()).await;
        let controller = controller.clone();
        tokio::spawn(async move {
            controller.perform_search(&term).await;
        });
    }

    if let Some(path) = args.route {
        let route = Route::parse(&path);
        tracing::info!(path = %path, route = %route.path(), "Initial route");
        let controller = controller.clone();
        tokio::spawn(async move {
            controller.navigate_to(route).await;
        });
    }

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model.clone(), controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    audio_backend.shutdown();

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Music Search shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
) -> Result<()> {
    loop {
        let (ui_state, content_state, preview_state, should_quit) = {
            let model_guard = model.lock().await;
            (
                model_guard.get_ui_state().await,
                model_guard.get_content_state().await,
                model_guard.get_preview_state().await,
                model_guard.should_quit().await,
            )
        };

        if should_quit {
            break;
        }

        terminal.draw(|f| {
            AppView::render(f, &ui_state, &content_state, &preview_state);
        })?;

        // Short poll so responses landing in the background show up promptly
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }
    }

    Ok(())
}
