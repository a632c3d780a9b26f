//! GitHub API interaction module
//!
//! Looks up the latest release of a repository and picks the Proton tarball
//! out of its assets.

use crate::config::github_token;
use crate::error::{Result, UpdateError};
use crate::types::{install_dir_name, GitHubRelease, ResolvedRelease};

/// Build GitHub API URL for the latest release of `repo` ("owner/repo").
pub fn build_gh_release_url(api_base: &str, repo: &str) -> String {
    format!(
        "{}/repos/{}/releases/latest",
        api_base.trim_end_matches('/'),
        repo
    )
}

/// Asset name a release tag is published under, e.g. `Proton-GE-Proton9-4.tar.gz`.
pub fn expected_asset_name(tag: &str) -> String {
    format!("{}.tar.gz", install_dir_name(tag))
}

/// Fetch the latest release of `repo` from the GitHub API rooted at `api_base`.
pub async fn get_gh_release_info(api_base: &str, repo: &str) -> Result<GitHubRelease> {
    let url = build_gh_release_url(api_base, repo);
    tracing::debug!("Fetching GitHub release info from: {}", url);

    let client = reqwest::Client::new();
    let mut request = client
        .get(&url)
        .header("Accept", "application/vnd.github.v3+json")
        .header(
            "User-Agent",
            concat!("proton-updater/", env!("CARGO_PKG_VERSION")),
        );

    if let Some(token) = github_token() {
        request = request.header("Authorization", format!("token {}", token));
        tracing::debug!("Using GITHUB_TOKEN");
    }

    let network = |source| UpdateError::Network {
        url: url.clone(),
        source,
    };

    let response = request.send().await.map_err(network)?;
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error response".to_string());
        return Err(UpdateError::Api {
            url: url.clone(),
            status,
            body: body.trim().to_string(),
        });
    }

    let bytes = response.bytes().await.map_err(network)?;
    serde_json::from_slice(&bytes).map_err(|source| UpdateError::InvalidRelease {
        repo: repo.to_string(),
        source,
    })
}

/// Pick the first asset named `Proton-<tag>.tar.gz`, in listed order.
pub fn select_asset(release: &GitHubRelease) -> Result<ResolvedRelease> {
    let expected = expected_asset_name(&release.tag_name);

    for asset in &release.assets {
        tracing::debug!("Found asset named '{}'", asset.name);
        if asset.name == expected {
            tracing::info!("Selected asset. Download URL: {}", asset.browser_download_url);
            return Ok(ResolvedRelease {
                tag: release.tag_name.clone(),
                asset_name: asset.name.clone(),
                download_url: asset.browser_download_url.clone(),
            });
        }
    }

    Err(UpdateError::NotFound {
        tag: release.tag_name.clone(),
        expected,
    })
}

pub async fn resolve_latest(api_base: &str, repo: &str) -> Result<ResolvedRelease> {
    let release = get_gh_release_info(api_base, repo).await?;
    tracing::info!("Found latest release of tag {}", release.tag_name);
    select_asset(&release)
}
