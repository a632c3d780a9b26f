//! Installing Proton-GE releases into Steam
//!
//! This module provides functionality for:
//! - Resolving the latest release and its tarball (see [`github`])
//! - Detecting an existing installation of a release
//! - Stopping Steam, downloading and unpacking the release

pub mod github;

pub use github::resolve_latest;

use crate::config::SteamPaths;
use crate::download::{download_file, extract_tar_gz};
use crate::error::{Result, UpdateError};
use crate::steam::SteamClient;
use crate::types::{ResolvedRelease, UpdateOutcome};
use std::time::Duration;
use tempfile::TempDir;

pub struct UpdateOptions {
    pub api_base: String,
    pub repo: String,
    pub paths: SteamPaths,
    pub settle_delay: Duration,
}

/// Whether `compatibilitytools.d/Proton-<tag>` already exists.
pub fn is_installed(paths: &SteamPaths, tag: &str) -> bool {
    let dir = paths.install_dir(tag);
    let installed = dir.symlink_metadata().is_ok();
    tracing::debug!("Checking for {}: {}", dir.display(), installed);
    installed
}

/// Download `release` and unpack it into the compatibility tools directory.
pub async fn download_and_install(
    release: &ResolvedRelease,
    paths: &SteamPaths,
) -> Result<UpdateOutcome> {
    let temp_dir = TempDir::new().map_err(|e| UpdateError::fs("create", std::env::temp_dir(), e))?;
    let archive_path = temp_dir.path().join(&release.asset_name);

    download_file(&release.download_url, &archive_path).await?;

    let root = paths.compat_tools_dir();
    let summary = extract_tar_gz(&archive_path, &root)?;
    tracing::debug!(
        "Extracted {} files and {} links, skipped {} entries",
        summary.files,
        summary.links,
        summary.skipped
    );

    Ok(UpdateOutcome::Installed {
        dir: paths.install_dir(&release.tag),
        summary,
    })
}

pub async fn update_proton(options: &UpdateOptions) -> Result<UpdateOutcome> {
    let release = resolve_latest(&options.api_base, &options.repo).await?;

    if is_installed(&options.paths, &release.tag) {
        tracing::info!(
            "Steam already has compatibility tool '{}' available",
            release.install_dir_name()
        );
        return Ok(UpdateOutcome::AlreadyInstalled(
            options.paths.install_dir(&release.tag),
        ));
    }

    let steam =
        SteamClient::new(options.paths.clone()).with_settle_delay(options.settle_delay);
    if steam.is_running()? {
        tracing::info!("Stopping steam");
        steam.shutdown().await?;
    }

    download_and_install(&release, &options.paths).await
}
