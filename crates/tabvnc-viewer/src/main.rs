//! TabVNC viewer entry point.
//!
//! Loads the configuration, wires the infrastructure adapters into the two
//! use cases, and runs the session and control contexts until Ctrl-C.
//!
//! # Usage
//!
//! ```text
//! tabvnc-viewer [OPTIONS]
//!
//! Options:
//!   --config    <PATH>   Config file [default: platform config dir]
//!   --host      <HOST>   Remote server host (overrides config)
//!   --port      <PORT>   Remote server port (overrides config)
//!   --log-level <LEVEL>  Log filter when RUST_LOG is unset (overrides config)
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable           | Description          |
//! |--------------------|----------------------|
//! | `TABVNC_CONFIG`    | Config file path     |
//! | `TABVNC_HOST`      | Remote server host   |
//! | `TABVNC_PORT`      | Remote server port   |
//! | `TABVNC_LOG_LEVEL` | Log filter fallback  |
//!
//! `RUST_LOG` always takes precedence over the configured log level.

use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tabvnc_viewer::application::control_input::ControlInputUseCase;
use tabvnc_viewer::application::display_update::{DisplayControl, DisplayUpdateAdapter, DrawSurface};
use tabvnc_viewer::application::orchestrate_session::{OrchestratorPorts, SessionOrchestrator};
use tabvnc_viewer::application::session_state::SessionState;
use tabvnc_viewer::application::status::StatusScreen;
use tabvnc_viewer::infrastructure::input::{ScriptedButtons, ScriptedKeyboard, ScriptedTouchSource};
use tabvnc_viewer::infrastructure::network::RouteLink;
use tabvnc_viewer::infrastructure::session::MockSession;
use tabvnc_viewer::infrastructure::status_screen::SurfaceStatusScreen;
use tabvnc_viewer::infrastructure::storage::config::{load_config, ViewerConfig};
use tabvnc_viewer::infrastructure::surface::MemorySurface;
use tabvnc_viewer::runtime::spawn_contexts;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// TabVNC touch-tablet viewer.
#[derive(Debug, Parser)]
#[command(name = "tabvnc-viewer", about = "Touch-tablet remote framebuffer viewer")]
struct Cli {
    /// Config file path.
    #[arg(long, env = "TABVNC_CONFIG")]
    config: Option<PathBuf>,

    /// Remote server host.
    #[arg(long, env = "TABVNC_HOST")]
    host: Option<String>,

    /// Remote server port.
    #[arg(long, env = "TABVNC_PORT")]
    port: Option<u16>,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, env = "TABVNC_LOG_LEVEL")]
    log_level: Option<String>,
}

impl Cli {
    fn apply(self, config: &mut ViewerConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(level) = self.log_level {
            config.log.level = level;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply(&mut config);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level)),
        )
        .with_thread_names(true)
        .init();

    info!(server = %config.server_address(), "TabVNC viewer starting");

    // ── Display ───────────────────────────────────────────────────────────────
    // In production: replace MemorySurface with the panel driver.
    let mut panel = MemorySurface::new(config.display.width, config.display.height);
    panel.set_rotation(config.display.rotation);
    panel.set_brightness(config.display.brightness);
    let surface = Arc::new(Mutex::new(panel));
    let display = Arc::new(DisplayControl::new());
    let state = Arc::new(SessionState::new());

    // ── Remote session ────────────────────────────────────────────────────────
    // In production: replace MockSession with the RFB protocol client.
    let session = Arc::new(MockSession::new());
    let adapter = DisplayUpdateAdapter::new(
        Arc::clone(&surface),
        Arc::clone(&display),
        config.adapter_settings(),
    );
    let options = session.attach_sink(Box::new(adapter));
    info!(?options, "framebuffer sink attached");

    // ── Status screen ─────────────────────────────────────────────────────────
    let status: Arc<dyn StatusScreen> =
        Arc::new(SurfaceStatusScreen::new(Arc::clone(&surface), Arc::clone(&display)));

    // ── Input devices ─────────────────────────────────────────────────────────
    // In production: replace the scripted sources with the touch controller,
    // the I2C keyboard and the button GPIO drivers.
    let touch = Arc::new(ScriptedTouchSource::new());
    let keyboard = Arc::new(ScriptedKeyboard::new(false));
    let buttons = Arc::new(ScriptedButtons::new());

    let orchestrator = SessionOrchestrator::new(
        OrchestratorPorts {
            session: session.clone(),
            link: Arc::new(RouteLink::new(config.server.host.clone(), config.server.port)),
            touch,
            status: Arc::clone(&status),
            display,
            state: Arc::clone(&state),
        },
        config.orchestrator_settings(),
    );
    let control = ControlInputUseCase::new(
        keyboard,
        buttons,
        session,
        status,
        state,
        config.server_address(),
    );

    // ── Ctrl-C handler ────────────────────────────────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);
    std::thread::Builder::new()
        .name("signal".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
                Ok(rt) => rt,
                Err(e) => {
                    warn!("failed to build signal runtime: {e}");
                    return;
                }
            };
            if rt.block_on(tokio::signal::ctrl_c()).is_ok() {
                info!("shutdown signal received");
                running_clone.store(false, Ordering::Relaxed);
            }
        })
        .context("failed to spawn signal thread")?;

    let contexts = spawn_contexts(orchestrator, control, config.control_period(), running)?;
    info!("TabVNC viewer ready.  Press Ctrl-C to exit.");
    contexts.join()?;

    info!("TabVNC viewer stopped");
    Ok(())
}
