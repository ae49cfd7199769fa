use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event;
use ratatui::crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use folio_core::config_file::{self, ConfigFile};
use folio_core::{Config, ContactTransport, HttpTransport, ResponseMode};

mod action;
mod app;
mod backend;
mod content;
mod input;
mod logging;
mod theme;
mod tui_event;
mod view;

use app::App;

const DEFAULT_TICK_MS: u64 = 50;

/// folio: a terminal portfolio with an idle scroll affordance and a contact form.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Read configuration from this file instead of the default locations
    #[arg(long)]
    config: Option<PathBuf>,

    /// Contact endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Shared secret sent with every contact submission
    #[arg(long)]
    secret: Option<String>,

    /// How to treat the endpoint's reply: opaque (default) or readable
    #[arg(long)]
    response_mode: Option<String>,

    /// Color theme: slate (default) or ink
    #[arg(long)]
    theme: Option<String>,

    /// Write logs here instead of the platform data directory
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Resolve the effective config. Precedence: CLI > env > config file > defaults.
fn resolve_config(args: &Args, file_cfg: &ConfigFile) -> anyhow::Result<Config> {
    let mut config = Config::default();
    config_file::apply_to_config(file_cfg, &mut config);
    config_file::apply_env(&mut config);

    if let Some(endpoint) = args.endpoint.as_ref().filter(|e| !e.is_empty()) {
        config.endpoint = endpoint.clone();
    }
    if let Some(secret) = args.secret.as_ref().filter(|s| !s.is_empty()) {
        config.secret = Some(secret.clone());
    }
    if let Some(raw) = &args.response_mode {
        config.response_mode = ResponseMode::parse(raw).ok_or_else(|| {
            anyhow::anyhow!("unknown response mode '{raw}' (expected opaque or readable)")
        })?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let _log_guard = logging::init_tracing(args.log_file.clone())?;

    let file_cfg = match &args.config {
        Some(path) => config_file::try_load_from_path(path)
            .map_err(|e| anyhow::anyhow!("failed to load {}: {e}", path.display()))?,
        None => config_file::load_config(),
    };
    let config = resolve_config(&args, &file_cfg)?;

    let display = file_cfg.display.clone().unwrap_or_default();
    let theme_name = args
        .theme
        .clone()
        .or(display.theme)
        .unwrap_or_else(|| "slate".to_string());
    let theme = theme::Theme::by_name(&theme_name);
    let tick_rate = Duration::from_millis(display.tick_ms.unwrap_or(DEFAULT_TICK_MS).max(10));

    if config.secret.is_none() {
        tracing::warn!("no contact secret configured; submissions will be rejected");
    }
    tracing::info!(
        endpoint = %config.endpoint,
        response_mode = config.response_mode.as_str(),
        idle_timeout_ms = config.idle_timeout.as_millis() as u64,
        theme = %theme_name,
        "starting folio"
    );

    let transport: Arc<dyn ContactTransport> = Arc::new(HttpTransport::new(config.response_mode)?);

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let backend_terminal = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_terminal)?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    let size = terminal.size()?;
    let mut app = App::new(&config, theme, size.width, size.height, Instant::now());

    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    app.backend_cmd_tx = Some(cmd_tx);

    let cancel = CancellationToken::new();
    tokio::spawn(backend::run(transport, cmd_rx, event_tx, cancel.clone()));

    // Also handle Ctrl+C at the OS level for clean shutdown
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_for_signal.cancel();
        }
    });

    loop {
        terminal.draw(|f| app.view(f))?;

        tokio::select! {
            maybe_event = event_rx.recv() => {
                if let Some(backend_event) = maybe_event {
                    app.handle_backend_event(backend_event);
                    while let Ok(evt) = event_rx.try_recv() {
                        app.handle_backend_event(evt);
                    }
                }
            }
            _ = async {
                if event::poll(tick_rate).unwrap_or(false)
                    && let Ok(evt) = event::read()
                {
                    let action = input::map_event(&evt, &app.input_mode);
                    app.update(action);
                }
            } => {}
        }

        app.update(action::Action::Tick);

        if app.should_quit || cancel.is_cancelled() {
            cancel.cancel();
            break;
        }
    }

    app.teardown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    tracing::info!("folio exited");

    Ok(())
}
