use crate::types::install_dir_name;
use std::path::PathBuf;

pub const DEFAULT_STEAM_DIR: &str = "~/.steam/";
pub const DEFAULT_REPO: &str = "GloriousEggroll/proton-ge-custom";
pub const DEFAULT_API_URL: &str = "https://api.github.com";

pub const PID_FILE_NAME: &str = "steam.pid";
pub const SHUTDOWN_SCRIPT_NAME: &str = "steam.sh";
pub const COMPAT_TOOLS_DIR_NAME: &str = "compatibilitytools.d";

/// Locations inside a Steam installation, all derived from one base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SteamPaths {
    base: PathBuf,
}

impl SteamPaths {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Build from a user-supplied directory, expanding a leading `~`.
    pub fn from_arg(steam_dir: &str) -> Self {
        let base = expand_home(steam_dir);
        tracing::debug!("Steam directory: {}", base.display());
        Self::new(base)
    }

    pub fn pid_file(&self) -> PathBuf {
        self.base.join(PID_FILE_NAME)
    }

    pub fn shutdown_script(&self) -> PathBuf {
        self.base.join(SHUTDOWN_SCRIPT_NAME)
    }

    pub fn compat_tools_dir(&self) -> PathBuf {
        self.base.join(COMPAT_TOOLS_DIR_NAME)
    }

    pub fn install_dir(&self, tag: &str) -> PathBuf {
        self.compat_tools_dir().join(install_dir_name(tag))
    }
}

pub fn expand_home(path: &str) -> PathBuf {
    let rest = if path == "~" {
        ""
    } else if let Some(rest) = path.strip_prefix("~/") {
        rest
    } else {
        return PathBuf::from(path);
    };

    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => {
            tracing::warn!("Could not determine home directory, using '{}' as given", path);
            PathBuf::from(path)
        }
    }
}

/// GitHub API base, overridable through `GITHUB_API_URL`.
pub fn github_api_url() -> String {
    std::env::var("GITHUB_API_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

pub fn github_token() -> Option<String> {
    std::env::var("GITHUB_TOKEN")
        .ok()
        .filter(|token| !token.trim().is_empty())
}
