//! Detecting and stopping a running Steam client.

use crate::config::SteamPaths;
use crate::error::{Result, UpdateError};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;

pub const DEFAULT_PROC_ROOT: &str = "/proc";
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(1);

pub struct SteamClient {
    paths: SteamPaths,
    proc_root: PathBuf,
    settle_delay: Duration,
}

impl SteamClient {
    pub fn new(paths: SteamPaths) -> Self {
        Self {
            paths,
            proc_root: PathBuf::from(DEFAULT_PROC_ROOT),
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }

    #[cfg(test)]
    pub fn with_proc_root(mut self, proc_root: impl Into<PathBuf>) -> Self {
        self.proc_root = proc_root.into();
        self
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    /// PID recorded in `steam.pid`, or `None` when the file does not exist.
    pub fn read_pid(&self) -> Result<Option<u32>> {
        let pid_file = self.paths.pid_file();

        let content = match fs::read_to_string(&pid_file) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(
                    "No PID file at {}, assuming steam is not running",
                    pid_file.display()
                );
                return Ok(None);
            }
            Err(e) => return Err(UpdateError::fs("read PID file", pid_file, e)),
        };

        content
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|source| UpdateError::InvalidPid {
                path: pid_file,
                content,
                source,
            })
    }

    pub fn is_running(&self) -> Result<bool> {
        let Some(pid) = self.read_pid()? else {
            return Ok(false);
        };

        let stat = self.proc_root.join(pid.to_string()).join("stat");
        let running = stat.exists();
        tracing::debug!("Steam PID {} running: {}", pid, running);
        Ok(running)
    }

    /// Run `steam.sh -shutdown` and give the client time to exit.
    pub async fn shutdown(&self) -> Result<()> {
        let script = self.paths.shutdown_script();
        tracing::debug!("Executing: {} -shutdown", script.display());

        let status = Command::new(&script)
            .arg("-shutdown")
            .status()
            .await
            .map_err(|source| UpdateError::Process {
                script: script.clone(),
                source,
            })?;

        if !status.success() {
            return Err(UpdateError::ShutdownFailed { script, status });
        }

        // Steam keeps helper processes and file locks around briefly after exit
        tokio::time::sleep(self.settle_delay).await;
        Ok(())
    }
}
