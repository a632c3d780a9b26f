use crate::error::{Result, UpdateError};
use crate::types::ExtractSummary;
use flate2::read::GzDecoder;
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Component, Path};
use tar::Archive;

/// Stream `url` into `local_path`, showing a progress bar on a terminal.
pub async fn download_file(url: &str, local_path: &Path) -> Result<u64> {
    tracing::info!("Downloading {}", url);

    let network = |source| UpdateError::Network {
        url: url.to_string(),
        source,
    };

    let response = reqwest::get(url).await.map_err(network)?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(UpdateError::Api {
            url: url.to_string(),
            status,
            body: body.trim().to_string(),
        });
    }

    let pb = match response.content_length() {
        Some(total) => {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::with_template(
                    "{msg} {spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
            );
            pb
        }
        None => ProgressBar::new_spinner(),
    };
    let filename = local_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    pb.set_message(format!("Downloading {}", filename));

    let mut file = File::create(local_path).map_err(|e| UpdateError::fs("create", local_path, e))?;
    let mut downloaded = 0u64;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(network)?;
        file.write_all(&chunk)
            .map_err(|e| UpdateError::fs("write", local_path, e))?;
        downloaded += chunk.len() as u64;
        pb.set_position(downloaded);
    }
    file.flush()
        .map_err(|e| UpdateError::fs("write", local_path, e))?;

    pb.finish_with_message("Download complete");
    tracing::debug!("Downloaded {} bytes to {}", downloaded, local_path.display());
    Ok(downloaded)
}

/// Unpack a `.tar.gz` file on disk into `root`.
pub fn extract_tar_gz(archive_path: &Path, root: &Path) -> Result<ExtractSummary> {
    tracing::info!(
        "Extracting {} into {}",
        archive_path.display(),
        root.display()
    );
    let file =
        File::open(archive_path).map_err(|e| UpdateError::fs("open archive", archive_path, e))?;
    extract_entries(file, root)
}

/// Unpack a gzip-compressed tar stream into `root`, one entry at a time.
///
/// Directory entries are skipped; the directories they describe come into
/// existence only when a later file or link needs them. Symlink targets are
/// written verbatim. Entries that would land outside `root` are skipped.
pub fn extract_entries<R: Read>(reader: R, root: &Path) -> Result<ExtractSummary> {
    let mut archive = Archive::new(GzDecoder::new(reader));
    let mut summary = ExtractSummary::default();

    for entry in archive.entries().map_err(UpdateError::Archive)? {
        let mut entry = entry.map_err(UpdateError::Archive)?;
        let entry_type = entry.header().entry_type();

        if entry_type.is_dir()
            || entry_type.is_pax_global_extensions()
            || entry_type.is_pax_local_extensions()
        {
            summary.skipped += 1;
            continue;
        }

        let name = entry.path().map_err(UpdateError::Archive)?.into_owned();
        if !stays_inside_root(&name) {
            tracing::warn!("Skipping entry outside install root: {}", name.display());
            summary.skipped += 1;
            continue;
        }
        let target = root.join(&name);

        if entry_type.is_symlink() {
            let link = entry
                .link_name()
                .map_err(UpdateError::Archive)?
                .ok_or_else(|| {
                    UpdateError::Archive(io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("symlink {} has no target", name.display()),
                    ))
                })?
                .into_owned();
            tracing::info!("Creating link from {} to {}", name.display(), link.display());
            create_symbolic_link(&target, &link)?;
            summary.links += 1;
        } else {
            let mode = entry.header().mode().map_err(UpdateError::Archive)?;
            tracing::info!("Extracting {}", name.display());
            create_regular_file(&mut entry, &target, mode)?;
            summary.files += 1;
        }
    }

    Ok(summary)
}

/// Create every missing ancestor of `target`.
pub fn ensure_parent_dirs(target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| UpdateError::fs("create directory", parent, e))?;
    }
    Ok(())
}

fn stays_inside_root(name: &Path) -> bool {
    name.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

fn create_regular_file<R: Read>(content: &mut R, target: &Path, mode: u32) -> Result<()> {
    ensure_parent_dirs(target)?;

    // Handle is dropped at the end of this scope, before the next entry
    let mut file =
        open_truncated(target, mode).map_err(|e| UpdateError::fs("create file", target, e))?;
    io::copy(content, &mut file).map_err(|e| UpdateError::fs("write file", target, e))?;
    apply_mode(&file, mode).map_err(|e| UpdateError::fs("set permissions on", target, e))?;

    Ok(())
}

#[cfg(unix)]
fn open_truncated(target: &Path, mode: u32) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(mode & 0o7777)
        .open(target)
}

#[cfg(not(unix))]
fn open_truncated(target: &Path, _mode: u32) -> io::Result<File> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(target)
}

// The open mode is filtered by the umask; set the recorded bits explicitly.
#[cfg(unix)]
fn apply_mode(file: &File, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(fs::Permissions::from_mode(mode & 0o7777))
}

#[cfg(not(unix))]
fn apply_mode(_file: &File, _mode: u32) -> io::Result<()> {
    Ok(())
}

fn create_symbolic_link(target: &Path, link: &Path) -> Result<()> {
    ensure_parent_dirs(target)?;

    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(link, target)
            .map_err(|e| UpdateError::fs("create link", target, e))
    }
    #[cfg(not(unix))]
    {
        let _ = link;
        Err(UpdateError::fs(
            "create link",
            target,
            io::Error::new(io::ErrorKind::Unsupported, "symbolic links are not supported"),
        ))
    }
}
