//! Runs the content-pull executable and reports its outcome.
//!
//! With serialization on, triggers are coalesced: at most one run is in
//! progress and at most one follow-up is pending. Every trigger that arrives
//! while a run is in progress shares the result of that single follow-up,
//! since one pull already picks up everything pushed before it started.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::process::Command;
use tokio::sync::watch;

use crate::config::UpdaterConfig;
use crate::observability::metrics;

/// Outcome of an update run that exited zero.
#[derive(Debug, Clone)]
pub struct UpdateReport {
    /// Exit code; `None` only if the process was killed by a signal.
    pub status: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

/// Errors from running the update procedure.
#[derive(Debug, Clone, Error)]
pub enum UpdateError {
    /// The executable could not be started.
    #[error("failed to spawn {path}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The executable ran and exited non-zero (or was killed).
    #[error("update procedure exited with status {status:?}")]
    Failed { status: Option<i32>, stderr: String },

    /// The background task running the procedure panicked or was cancelled.
    #[error("update task aborted")]
    Aborted,
}

type RunResult = Result<UpdateReport, UpdateError>;
type RunSender = watch::Sender<Option<RunResult>>;
type RunReceiver = watch::Receiver<Option<RunResult>>;

/// Coalescing state shared by clones of a serializing updater.
#[derive(Debug, Default)]
struct RunSlots {
    /// A run is in progress.
    running: bool,
    /// The single pending follow-up run, if any trigger arrived mid-run.
    follow_up: Option<RunSender>,
}

/// Invokes a fixed executable with no arguments.
///
/// Cheap to clone; clones share the coalescing state.
#[derive(Debug, Clone)]
pub struct ScriptUpdater {
    path: Arc<PathBuf>,
    slots: Option<Arc<Mutex<RunSlots>>>,
}

impl ScriptUpdater {
    pub fn new(path: impl Into<PathBuf>, serialize: bool) -> Self {
        Self {
            path: Arc::new(path.into()),
            slots: serialize.then(|| Arc::new(Mutex::new(RunSlots::default()))),
        }
    }

    pub fn from_config(config: &UpdaterConfig) -> Self {
        Self::new(config.script_path.clone(), config.serialize)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Trigger the procedure and wait for the run that covers this trigger.
    ///
    /// Runs happen on their own task. Dropping this future (for example when
    /// the request deadline fires) only stops the waiting; the process still
    /// runs to completion and its outcome is still logged.
    pub async fn run(&self) -> Result<UpdateReport, UpdateError> {
        let mut rx = match &self.slots {
            Some(slots) => self.join_or_start(slots),
            None => self.start_driver(None),
        };

        let result = match rx.wait_for(Option::is_some).await {
            Ok(value) => value.clone(),
            Err(_) => None,
        };
        result.unwrap_or_else(|| {
            tracing::error!("Update task aborted");
            Err(UpdateError::Aborted)
        })
    }

    fn join_or_start(&self, slots: &Arc<Mutex<RunSlots>>) -> RunReceiver {
        let mut state = slots.lock().unwrap_or_else(|e| e.into_inner());
        if !state.running {
            state.running = true;
            return self.start_driver(Some(slots.clone()));
        }

        match &state.follow_up {
            Some(tx) => tx.subscribe(),
            None => {
                tracing::info!(script = %self.path.display(), "Update already running, scheduling one follow-up");
                let (tx, rx) = watch::channel(None);
                state.follow_up = Some(tx);
                rx
            }
        }
    }

    /// Spawn the task that runs the procedure, then any follow-up queued meanwhile.
    fn start_driver(&self, slots: Option<Arc<Mutex<RunSlots>>>) -> RunReceiver {
        let (tx, rx) = watch::channel(None);
        let updater = self.clone();

        tokio::spawn(async move {
            let mut current = tx;
            loop {
                let result = updater.run_once().await;
                current.send_replace(Some(result));

                let Some(slots) = &slots else { break };
                let mut state = slots.lock().unwrap_or_else(|e| e.into_inner());
                match state.follow_up.take() {
                    Some(next) => current = next,
                    None => {
                        state.running = false;
                        break;
                    }
                }
            }
        });

        rx
    }

    async fn run_once(&self) -> RunResult {
        let start = Instant::now();
        tracing::info!(script = %self.path.display(), "Running update procedure");

        let result = self.execute(start).await;
        match &result {
            Ok(report) => {
                tracing::info!(
                    elapsed_ms = report.elapsed.as_millis() as u64,
                    stdout = %report.stdout,
                    "[pull ok]"
                );
                metrics::record_update("success", start);
            }
            Err(UpdateError::Failed { status, stderr }) => {
                tracing::error!(status = ?status, stderr = %stderr, "[pull error]");
                metrics::record_update("failure", start);
            }
            Err(e) => {
                tracing::error!(error = %e, "[pull error]");
                metrics::record_update("failure", start);
            }
        }
        result
    }

    async fn execute(&self, start: Instant) -> RunResult {
        let output = Command::new(self.path.as_path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| UpdateError::Spawn {
                path: self.path.to_path_buf(),
                source: Arc::new(source),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if output.status.success() {
            Ok(UpdateReport {
                status: output.status.code(),
                success: true,
                stdout,
                stderr,
                elapsed: start.elapsed(),
            })
        } else {
            Err(UpdateError::Failed {
                status: output.status.code(),
                stderr,
            })
        }
    }
}
