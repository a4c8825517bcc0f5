// ============================================================================
// LazyTrader - Dashboard du backend AI Investment Trader
// ============================================================================
// Programme TUI : un champ de saisie, deux boutons, une zone JSON.
// Chaque appui sur un bouton = un GET bloquant vers le backend.
//
// Modes :
// - lazytrader                : dashboard interactif
// - lazytrader quote <SYMBOL> : une quote, JSON sur stdout
// - lazytrader health         : health check, JSON sur stdout
// ============================================================================

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info, warn};

use lazytrader::actions::{fetch_once, perform};
use lazytrader::api::BackendClient;
use lazytrader::app::App;
use lazytrader::cli::{Cli, Commands};
use lazytrader::models::BackendRequest;
use lazytrader::ui::events::{handle_event, EventHandler};
use lazytrader::ui::render;

// ============================================================================
// Initialisation du logging
// ============================================================================
// Les println! cassent l'affichage une fois le TUI lancé : on log vers un
// fichier, avec rotation quotidienne.
// ============================================================================

/// Répertoire des logs
///
/// - Linux : ~/.local/share/lazytrader/logs
/// - macOS : ~/Library/Application Support/lazytrader/logs
/// - Sinon : ./logs
fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("lazytrader").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

/// Initialise le système de logging vers fichier
///
/// # Utilisation
/// ```bash
/// tail -f ~/.local/share/lazytrader/logs/lazytrader.log.*
/// RUST_LOG=lazytrader=trace cargo run
/// ```
fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "lazytrader.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lazytrader=debug,info".into()),
        )
        .try_init()
        .context("Échec de l'initialisation du subscriber tracing")?;

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    // .env avant clap : les options ont un fallback sur l'environnement
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_logging().unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {:#}", e);
        eprintln!("   Continuing without logging...");
    });

    let config = cli.backend_config();
    info!(origin = %config.origin, api = config.variant.label(), "LazyTrader starting up");

    let client = BackendClient::new(config)?;
    let runtime = tokio::runtime::Runtime::new().context("Échec de la création du runtime tokio")?;

    match cli.command {
        Some(Commands::Quote { symbol }) => {
            run_once(&runtime, &client, BackendRequest::Quote { symbol })
        }
        Some(Commands::Health) => run_once(&runtime, &client, BackendRequest::Health),
        None => run_dashboard(&runtime, &client),
    }
}

/// Mode non interactif : une requête, JSON pretty-printé sur stdout
fn run_once(runtime: &tokio::runtime::Runtime, client: &BackendClient, request: BackendRequest) -> Result<()> {
    info!(request = %request.label(), "Running one-shot request");
    let json = runtime.block_on(fetch_once(client, &request))?;
    println!("{}", json);
    Ok(())
}

/// Mode interactif : setup du terminal, event loop, restauration
fn run_dashboard(runtime: &tokio::runtime::Runtime, client: &BackendClient) -> Result<()> {
    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let mut app = App::new(client.config().variant.has_health());
    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &events, runtime, client);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// 1. Dessine l'interface
// 2. Lit un événement (ou un tick)
// 3. Si un bouton est pressé : GET bloquant, puis nouvel affichage
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
    runtime: &tokio::runtime::Runtime,
    client: &BackendClient,
) -> Result<()> {
    while app.is_running() {
        terminal.draw(|frame| render(frame, app))?;

        let event = match events.next() {
            Ok(event) => event,
            Err(e) => {
                warn!(error = ?e, "Failed to read terminal event");
                continue;
            }
        };

        if let Some(action) = handle_event(app, event) {
            // Le message d'attente est dessiné avant que l'appel ne bloque
            runtime.block_on(perform(app, client, action, |app| {
                terminal.draw(|frame| render(frame, app))?;
                Ok(())
            }))?;
        }
    }

    Ok(())
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================
// Raw mode + alternate screen. Toujours restaurer avant de quitter !
// ============================================================================

/// Configure le terminal en mode TUI
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal à son état normal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
