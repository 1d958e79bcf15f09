//! Execution contexts.
//!
//! The viewer runs two independent loops, each on its own named OS thread
//! with a single-threaded Tokio runtime:
//!
//! ```text
//! session-ctx   SessionOrchestrator::run_quantum, then sleep for the delay it returns
//! control-ctx   ControlInputUseCase::poll_once, then sleep for the control period
//! ```
//!
//! The two contexts share only `SessionState` (atomics) and the surface mutex.
//! Both loops stop once `running` is cleared.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use crate::application::control_input::ControlInputUseCase;
use crate::application::orchestrate_session::SessionOrchestrator;

/// Errors that can occur while starting or joining the execution contexts.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to spawn {name} thread: {source}")]
    Spawn {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to build runtime for {name}: {source}")]
    Build {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} thread panicked")]
    Panicked(&'static str),
}

const SESSION_CONTEXT: &str = "session-ctx";
const CONTROL_CONTEXT: &str = "control-ctx";

/// Handles to the two running contexts.
pub struct Contexts {
    session: JoinHandle<Result<(), RuntimeError>>,
    control: JoinHandle<Result<(), RuntimeError>>,
}

impl Contexts {
    /// Waits for both contexts to finish.
    ///
    /// # Errors
    ///
    /// Returns the first context error, or [`RuntimeError::Panicked`].
    pub fn join(self) -> Result<(), RuntimeError> {
        let session = self.session.join().map_err(|_| RuntimeError::Panicked(SESSION_CONTEXT))?;
        let control = self.control.join().map_err(|_| RuntimeError::Panicked(CONTROL_CONTEXT))?;
        session.and(control)
    }
}

/// Spawns the session and control contexts.
///
/// # Errors
///
/// Returns [`RuntimeError::Spawn`] if a thread cannot be created.  If the
/// control thread fails to spawn, `running` is cleared so the session thread
/// exits on its own.
pub fn spawn_contexts(
    mut orchestrator: SessionOrchestrator,
    control: ControlInputUseCase,
    control_period: Duration,
    running: Arc<AtomicBool>,
) -> Result<Contexts, RuntimeError> {
    let session_running = Arc::clone(&running);
    let session = spawn_context(SESSION_CONTEXT, move || async move {
        while session_running.load(Ordering::Relaxed) {
            let delay = orchestrator.run_quantum().await;
            tokio::time::sleep(delay).await;
        }
    })?;

    let control_running = Arc::clone(&running);
    let control = spawn_context(CONTROL_CONTEXT, move || async move {
        while control_running.load(Ordering::Relaxed) {
            control.poll_once().await;
            tokio::time::sleep(control_period).await;
        }
    })
    .map_err(|e| {
        running.store(false, Ordering::Relaxed);
        e
    })?;

    Ok(Contexts { session, control })
}

/// Runs `body` on a new thread named `name` inside a current-thread runtime.
fn spawn_context<F, Fut>(
    name: &'static str,
    body: F,
) -> Result<JoinHandle<Result<(), RuntimeError>>, RuntimeError>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: std::future::Future<Output = ()>,
{
    std::thread::Builder::new()
        .name(name.to_string())
        .spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|source| RuntimeError::Build { name, source })?;
            info!(context = name, "context started");
            rt.block_on(body());
            debug!(context = name, "context stopped");
            Ok(())
        })
        .map_err(|source| RuntimeError::Spawn { name, source })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::display_update::DisplayControl;
    use crate::application::orchestrate_session::{OrchestratorPorts, OrchestratorSettings};
    use crate::application::session_state::SessionState;
    use crate::application::status::{OverlayInfo, StatusLevel, StatusScreen};
    use crate::infrastructure::input::{ScriptedButtons, ScriptedKeyboard, ScriptedTouchSource};
    use crate::infrastructure::network::MockLink;
    use crate::infrastructure::session::MockSession;

    struct NullStatus;

    impl StatusScreen for NullStatus {
        fn show_status(&self, _title: &str, _message: &str, _level: StatusLevel) {}
        fn show_overlay(&self, _info: &OverlayInfo) {}
        fn clear_overlay(&self) {}
    }

    #[test]
    fn test_contexts_run_until_flag_cleared() {
        // Arrange
        let session = Arc::new(MockSession::connected());
        let state = Arc::new(SessionState::new());
        state.set_session_up(true);
        let status: Arc<dyn StatusScreen> = Arc::new(NullStatus);
        let keyboard = Arc::new(ScriptedKeyboard::new(true));
        keyboard.type_bytes(b"hi");
        let orchestrator = SessionOrchestrator::new(
            OrchestratorPorts {
                session: session.clone(),
                link: Arc::new(MockLink::up()),
                touch: Arc::new(ScriptedTouchSource::new()),
                status: Arc::clone(&status),
                display: Arc::new(DisplayControl::new()),
                state: Arc::clone(&state),
            },
            OrchestratorSettings::default(),
        );
        let control = ControlInputUseCase::new(
            keyboard,
            Arc::new(ScriptedButtons::new()),
            session.clone(),
            status,
            state,
            "127.0.0.1:5900".to_string(),
        );
        let running = Arc::new(AtomicBool::new(true));

        // Act
        let contexts =
            spawn_contexts(orchestrator, control, Duration::from_millis(1), Arc::clone(&running))
                .expect("spawn");
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while (session.pump_count() < 5 || session.calls().len() < 4)
            && std::time::Instant::now() < deadline
        {
            std::thread::sleep(Duration::from_millis(1));
        }
        running.store(false, Ordering::Relaxed);

        // Assert
        contexts.join().expect("join");
        assert!(session.pump_count() >= 5);
        assert_eq!(session.calls().len(), 4);
    }
}
