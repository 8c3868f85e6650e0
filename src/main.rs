// ============================================================================
// CoinBoard - Tableau de marché crypto dans le terminal
// ============================================================================
// Charge le marché CoinGecko et l'affiche dans un tableau triable,
// filtrable, avec choix de la devise
//
// ARCHITECTURE :
// 1. Thread UI : event loop (render → résultats du worker → input), seul
//    propriétaire de App
// 2. Worker thread : runtime tokio qui exécute les fetchs HTTP
// 3. Channels mpsc : FetchRequest vers le worker, FetchResponse en retour
// ============================================================================

use std::io;
use std::sync::mpsc;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use coinboard::api::CoinGeckoClient;
use coinboard::app::App;
use coinboard::config::{Config, APP_NAME};
use coinboard::controller::{self, FetchRequest, FetchResponse};
use coinboard::input::handle_event;
use coinboard::ui::{render, EventHandler};

// ============================================================================
// Initialisation du logging
// ============================================================================
// Les println! ne fonctionnent pas une fois le TUI lancé : on log vers un
// fichier, avec rotation quotidienne
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// Les logs sont écrits dans `config.log_dir` :
/// - Linux : ~/.local/share/coinboard/logs/coinboard.log.AAAA-MM-JJ
///
/// # Utilisation
/// ```bash
/// # Voir les logs en temps réel
/// tail -f ~/.local/share/coinboard/logs/coinboard.log.*
///
/// # Contrôler le niveau de log
/// RUST_LOG=coinboard=trace cargo run
/// ```
fn init_logging(config: &Config) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    std::fs::create_dir_all(&config.log_dir)
        .context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(
        Rotation::DAILY,
        config.log_dir.clone(),
        format!("{}.log", APP_NAME),
    );

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true)
                .with_thread_ids(true) // UI et worker sont sur deux threads
                .with_line_number(true),
        )
        .with(
            // Par défaut : debug pour coinboard, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coinboard=debug,info".into()),
        )
        .init();

    info!(log_dir = ?config.log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    let config = Config::default();

    // Logging avant tout le reste ; en cas d'échec on continue sans
    init_logging(&config).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!(api = %config.api_base_url, currency = %config.default_currency, "CoinBoard starting up");

    let client = CoinGeckoClient::new(config.api_base_url.clone())
        .context("Échec de la création du client HTTP")?;

    let (request_tx, request_rx) = mpsc::channel::<FetchRequest>();
    let (response_tx, response_rx) = mpsc::channel::<FetchResponse>();

    info!("Spawning background fetch worker");
    spawn_fetch_worker(client, request_rx, response_tx)?;

    let mut app = App::from_config(&config);

    // Premier cycle fetch-and-render : l'overlay de chargement s'affiche
    // dès la première frame
    let initial = controller::start_initial_load(&mut app);
    request_tx
        .send(initial)
        .context("Le worker de fetch s'est arrêté")?;

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let events = EventHandler::new(config.tick_rate);

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &events, &request_tx, &response_rx);

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
// Worker de fetch
// ============================================================================
// Thread OS avec son propre runtime tokio : un fetch à la fois, pour la
// requête la plus récente. Quand le channel de requêtes se ferme (fin de
// l'event loop), le worker s'arrête.
// ============================================================================

fn spawn_fetch_worker(
    client: CoinGeckoClient,
    request_rx: mpsc::Receiver<FetchRequest>,
    response_tx: mpsc::Sender<FetchResponse>,
) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Échec de la création du runtime tokio")?;

    std::thread::Builder::new()
        .name("fetch-worker".to_string())
        .spawn(move || {
            while let Ok(request) = request_rx.recv() {
                // Changements de devise rapprochés : seul le dernier est fetché
                let request = controller::latest_request(request, &request_rx);
                debug!(?request, "Worker received fetch request");

                let response = runtime.block_on(controller::run_fetch(&client, request));

                if response_tx.send(response).is_err() {
                    // L'UI est partie, plus personne pour lire
                    break;
                }
            }
            info!("Fetch worker exiting (channel closed)");
        })
        .context("Échec du lancement du worker de fetch")?;

    Ok(())
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// À chaque itération :
//   1. Dessiner l'interface
//   2. Appliquer les réponses du worker
//   3. Traiter l'événement clavier
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
    request_tx: &mpsc::Sender<FetchRequest>,
    response_rx: &mpsc::Receiver<FetchResponse>,
) -> Result<()> {
    while app.is_running() {
        terminal.draw(|frame| render(frame, app))?;

        // Non bloquant : toutes les réponses arrivées depuis la dernière frame
        loop {
            match response_rx.try_recv() {
                Ok(response) => {
                    controller::complete_fetch(app, response);
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    anyhow::bail!("Le worker de fetch s'est arrêté");
                }
            }
        }

        let event = events.next()?;
        if let Some(action) = handle_event(app, event) {
            if let Some(request) = controller::apply_action(app, action) {
                request_tx
                    .send(request)
                    .context("Le worker de fetch s'est arrêté")?;
            }
        }
    }

    Ok(())
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================
// IMPORTANT : toujours restaurer le terminal avant de quitter !
// ============================================================================

/// Configure le terminal en mode TUI (raw mode + écran alternatif)
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Échec de l'activation du raw mode")?;

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
