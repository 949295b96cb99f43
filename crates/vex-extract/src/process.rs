//! Extraction engine process lifecycle.
//!
//! One process per request, never reused. The relay task spawned by
//! [`ExtractionProcess::stream`] owns the child until it is reaped.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::{Child, ChildStdout, Command};
use tracing::{debug, warn};

use vex_core::{ExtractionRequest, RelayConfig, VexConfig};

use crate::error::{ExtractError, ExtractResult};
use crate::relay::{self, RelayBody, RelayOutcome, RelaySender};

/// Launches the extraction engine against a fixed database.
#[derive(Debug, Clone)]
pub struct Extractor {
    executable: PathBuf,
    database: PathBuf,
    relay: RelayConfig,
}

impl Extractor {
    pub fn new(executable: impl Into<PathBuf>, database: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            database: database.into(),
            relay: RelayConfig::default(),
        }
    }

    pub fn from_config(config: &VexConfig) -> Self {
        Self::new(&config.executable, &config.database).with_relay(config.relay)
    }

    pub fn with_relay(mut self, relay: RelayConfig) -> Self {
        self.relay = relay;
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn database(&self) -> &Path {
        &self.database
    }

    pub fn relay(&self) -> RelayConfig {
        self.relay
    }

    /// `<executable> <database> <south> <west> <north> <east> -`
    ///
    /// stdin and stderr are null: the engine is chatty on stderr and would
    /// block once an undrained pipe filled up.
    pub fn command(&self, request: &ExtractionRequest) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.arg(&self.database)
            .args(request.engine_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        cmd
    }

    /// Start the engine for one request.
    pub fn spawn(&self, request: &ExtractionRequest) -> ExtractResult<ExtractionProcess> {
        let mut child = self
            .command(request)
            .spawn()
            .map_err(|source| ExtractError::Spawn {
                executable: self.executable.display().to_string(),
                source,
            })?;

        let stdout = child.stdout.take().ok_or(ExtractError::MissingStdout)?;

        debug!(
            pid = ?child.id(),
            file = request.filename(),
            "extraction process started"
        );

        Ok(ExtractionProcess {
            child,
            stdout,
            relay: self.relay,
        })
    }
}

/// A running engine whose stdout has not been relayed yet.
#[derive(Debug)]
pub struct ExtractionProcess {
    child: Child,
    stdout: ChildStdout,
    relay: RelayConfig,
}

impl ExtractionProcess {
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Hand stdout to a relay task and return the body side.
    ///
    /// Must be called inside a tokio runtime.
    pub fn stream(self) -> RelayBody {
        let (tx, body) = relay::channel(self.relay);
        tokio::spawn(self.supervise(tx));
        body
    }

    async fn supervise(self, tx: RelaySender) {
        let Self {
            mut child, stdout, ..
        } = self;
        let pid = child.id();

        let outcome = tx.pump(stdout).await;

        match outcome {
            RelayOutcome::Finished { bytes } => {
                debug!(?pid, bytes, "extraction output complete");
            }
            RelayOutcome::ConsumerGone { bytes } | RelayOutcome::ReadFailed { bytes } => {
                debug!(?pid, bytes, ?outcome, "stopping extraction process");
                if let Err(e) = child.start_kill() {
                    debug!(?pid, error = %e, "kill failed, process likely exited");
                }
            }
        }

        match child.wait().await {
            Ok(status) if status.success() => debug!(?pid, %status, "extraction process exited"),
            Ok(status) => warn!(?pid, %status, "extraction process exited unsuccessfully"),
            Err(e) => warn!(?pid, error = %e, "failed to reap extraction process"),
        }
    }
}
