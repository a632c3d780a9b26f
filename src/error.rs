use reqwest::StatusCode;
use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, UpdateError>;

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("request to {url} failed")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} returned {status}: {body}")]
    Api {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("unable to decode release metadata for {repo}")]
    InvalidRelease {
        repo: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no matching download for release {tag} (expected asset '{expected}')")]
    NotFound { tag: String, expected: String },

    #[error("unable to read tar stream")]
    Archive(#[source] io::Error),

    #[error("unable to {action} {}", .path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error converting PID in {}, content was '{}'", .path.display(), .content.trim())]
    InvalidPid {
        path: PathBuf,
        content: String,
        #[source]
        source: ParseIntError,
    },

    #[error("unable to run {}", .script.display())]
    Process {
        script: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} exited with {status}", .script.display())]
    ShutdownFailed { script: PathBuf, status: ExitStatus },
}

impl UpdateError {
    pub fn fs(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        UpdateError::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }
}
