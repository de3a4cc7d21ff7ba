//! Remote folder creation and file upload
//!
//! Mirrors the local download folder into the configured Nextcloud folder,
//! preserving the relative directory structure.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use super::NextcloudClient;
use crate::config::NextcloudConfig;
use crate::workdir;

/// Remote path for a local file or directory, relative to the download
/// folder and rooted at the configured document folder. Always uses forward
/// slashes regardless of the local platform.
pub fn remote_path(document_folder: &str, root: &Path, local: &Path) -> Result<String> {
    let relative = local
        .strip_prefix(root)
        .with_context(|| format!("{:?} is not below the download folder {:?}", local, root))?;

    let mut remote = document_folder.trim_matches('/').to_string();
    for component in relative.components() {
        remote.push('/');
        remote.push_str(&component.as_os_str().to_string_lossy());
    }
    Ok(remote)
}

/// Create the remote target folder tree when it is absent (or when forced).
///
/// Returns true when folders were created, false when creation was skipped
/// because the target folder already exists.
pub async fn create_remote_folders(
    client: &NextcloudClient,
    config: &NextcloudConfig,
    download_path: &Path,
    force: bool,
) -> Result<bool> {
    if client.folder_exists(&config.document_folder).await? && !force {
        println!("Skip folder creation! Already existing!");
        return Ok(false);
    }

    println!(
        "Creating upload target folders in '{}'",
        config.document_folder
    );
    client.makedirs(&config.document_folder).await?;

    for dir in workdir::collect_dirs(download_path)? {
        let remote = remote_path(&config.document_folder, download_path, &dir)?;
        info!("creating remote folder '{}'", remote);
        client.makedirs(&remote).await?;
    }

    println!("{} Folder creation successful!", "✓".green().bold());
    Ok(true)
}

/// Upload every file below the download folder to its remote counterpart.
///
/// Returns the number of files uploaded.
pub async fn upload_folder(
    client: &NextcloudClient,
    config: &NextcloudConfig,
    download_path: &Path,
) -> Result<usize> {
    let files = workdir::collect_files(download_path)?;
    println!(
        "Uploading {} files from {:?} to '{}'",
        files.len(),
        download_path,
        config.document_folder
    );

    let bar = ProgressBar::new(files.len() as u64);
    bar.set_style(ProgressStyle::with_template(
        "{bar:40} {pos}/{len} {wide_msg}",
    )?);

    for file in &files {
        let remote = remote_path(&config.document_folder, download_path, file)?;
        bar.set_message(remote.clone());

        let contents = tokio::fs::read(file)
            .await
            .with_context(|| format!("failed to read local file {:?}", file))?;
        client.upload_file(&remote, contents).await?;
        bar.inc(1);
    }
    bar.finish_and_clear();

    println!(
        "{} Upload to Nextcloud successful! ({} files)",
        "✓".green().bold(),
        files.len()
    );
    Ok(files.len())
}
