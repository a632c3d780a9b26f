use serde::{Deserialize, Serialize};

pub const INSTALL_DIR_PREFIX: &str = "Proton-";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GitHubRelease {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<GitHubAsset>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GitHubAsset {
    pub name: String,
    pub browser_download_url: String,
}

/// A release tag together with the asset chosen for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRelease {
    pub tag: String,
    pub asset_name: String,
    pub download_url: String,
}

impl ResolvedRelease {
    pub fn install_dir_name(&self) -> String {
        install_dir_name(&self.tag)
    }
}

/// Name of the directory a release unpacks into, e.g. `Proton-GE-Proton9-4`.
pub fn install_dir_name(tag: &str) -> String {
    format!("{}{}", INSTALL_DIR_PREFIX, tag)
}

/// Counts of what an extraction pass wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    pub files: usize,
    pub links: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    AlreadyInstalled(std::path::PathBuf),
    Installed {
        dir: std::path::PathBuf,
        summary: ExtractSummary,
    },
}
