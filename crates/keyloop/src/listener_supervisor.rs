//! Spawns the hotkey listener as a child process and tears it down.

use crate::{
    AppError, AppResult,
    config::{ListenerConfig, RestartPolicy},
};

use std::{
    ffi::OsString,
    panic::Location,
    path::{Path, PathBuf},
    process::Stdio,
    time::Duration,
};

use error_location::ErrorLocation;
use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

/// How a supervision run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorExit {
    /// Shutdown was requested and the child was terminated.
    Shutdown {
        /// Respawns performed before shutdown.
        restarts: u32,
    },
    /// The child exited and the restart policy said to leave it.
    ChildExited {
        /// Respawns performed before giving up.
        restarts: u32,
    },
    /// The child could not be spawned.
    SpawnFailed,
}

/// Owns the listener child process.
#[derive(Debug, Clone)]
pub struct ListenerSupervisor {
    program: PathBuf,
    pub(crate) args: Vec<OsString>,
    policy: RestartPolicy,
    max_restarts: u32,
    grace: Duration,
}

impl ListenerSupervisor {
    /// Supervisor for an arbitrary command.
    pub fn new(
        program: impl Into<PathBuf>,
        args: Vec<OsString>,
        policy: RestartPolicy,
        max_restarts: u32,
        grace: Duration,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            policy,
            max_restarts,
            grace,
        }
    }

    /// Supervisor running this executable's `listener` subcommand.
    #[track_caller]
    pub fn for_current_exe(
        signal_dir: &Path,
        keybinds_path: &Path,
        config: &ListenerConfig,
    ) -> AppResult<Self> {
        let program = std::env::current_exe().map_err(|e| AppError::ProcessSpawnFailed {
            reason: format!("Failed to locate own executable: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let args = vec![
            OsString::from("listener"),
            OsString::from("--signal-dir"),
            signal_dir.as_os_str().to_owned(),
            OsString::from("--keybinds"),
            keybinds_path.as_os_str().to_owned(),
            OsString::from("--check-interval-ms"),
            OsString::from(config.config_check_interval().as_millis().to_string()),
        ];

        Ok(Self::new(
            program,
            args,
            config.restart_policy,
            config.max_restarts,
            config.terminate_grace(),
        ))
    }

    #[track_caller]
    fn spawn_child(&self) -> AppResult<Child> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| AppError::ProcessSpawnFailed {
                reason: format!("{:?}: {}", self.program, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(pid = ?child.id(), program = ?self.program, "Listener process started");

        Ok(child)
    }

    /// Keep the listener running until `cancel` fires, then terminate it.
    ///
    /// A spawn failure is logged and ends supervision; the app carries on
    /// without hotkeys.
    #[instrument(skip(self, cancel), fields(policy = ?self.policy))]
    pub async fn run(self, cancel: CancellationToken) -> SupervisorExit {
        let mut restarts = 0;
        let mut child = match self.spawn_child() {
            Ok(child) => child,
            Err(e) => {
                error!(error = %e, "Hotkeys unavailable");
                return SupervisorExit::SpawnFailed;
            }
        };

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    self.terminate(&mut child).await;
                    return SupervisorExit::Shutdown { restarts };
                }
                status = child.wait() => {
                    let success = match &status {
                        Ok(status) => {
                            warn!(status = %status, "Listener process exited");
                            status.success()
                        }
                        Err(e) => {
                            error!(error = %e, "Failed to wait on listener process");
                            false
                        }
                    };

                    if !self.policy.should_restart(success, restarts, self.max_restarts) {
                        info!(restarts, "Listener not restarted, hotkeys unavailable");
                        return SupervisorExit::ChildExited { restarts };
                    }

                    restarts += 1;
                    info!(restarts, max_restarts = self.max_restarts, "Restarting listener");

                    child = match self.spawn_child() {
                        Ok(child) => child,
                        Err(e) => {
                            error!(error = %e, "Hotkeys unavailable");
                            return SupervisorExit::SpawnFailed;
                        }
                    };
                }
            }
        }
    }

    /// SIGTERM, wait up to the grace period, then kill.
    async fn terminate(&self, child: &mut Child) {
        #[cfg(unix)]
        if let Some(pid) = child.id() {
            // SAFETY: `pid` is our own child and has not been reaped, since
            // `id()` returns `None` once it has.
            let rc = unsafe { libc::kill(pid as libc::pid_t, libc::SIGTERM) };
            if rc == 0 {
                match tokio::time::timeout(self.grace, child.wait()).await {
                    Ok(Ok(status)) => {
                        info!(status = %status, "Listener process terminated");
                        return;
                    }
                    Ok(Err(e)) => warn!(error = %e, "Failed to wait on listener process"),
                    Err(_) => warn!(
                        grace_ms = self.grace.as_millis(),
                        "Listener ignored SIGTERM, killing"
                    ),
                }
            }
        }

        match child.kill().await {
            Ok(()) => info!("Listener process killed"),
            Err(e) => warn!(error = %e, "Failed to kill listener process"),
        }
    }
}
