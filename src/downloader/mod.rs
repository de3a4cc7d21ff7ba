//! Trade Republic document download via the external `pytr` tool
//!
//! The brokerage API itself is pytr's job; this module only builds the
//! command line, forwards the interactive 2FA verification code to the
//! child process and surfaces its exit status.

use std::io::Write as _;
use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tracing::{info, warn};

use crate::config::TradeRepublicConfig;
use crate::error::PipelineError;

/// Argument vector for `pytr dl_docs`, exposed for testing.
pub fn dl_docs_args(config: &TradeRepublicConfig, download_path: &Path) -> Vec<String> {
    vec![
        "dl_docs".to_string(),
        "-n".to_string(),
        config.phone_number.clone(),
        "-p".to_string(),
        config.pin.clone(),
        "--last_days".to_string(),
        config.days_to_download.to_string(),
        download_path.display().to_string(),
    ]
}

/// Run `pytr dl_docs`, prompting on the terminal for the 2FA verification
/// code Trade Republic sends and piping it into the child process.
pub async fn download_docs(config: &TradeRepublicConfig, download_path: &Path) -> Result<()> {
    let args = dl_docs_args(config, download_path);
    info!("starting pytr dl_docs into {:?}", download_path);

    let mut child = Command::new("pytr")
        .args(&args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("failed to start pytr (is it installed and on PATH?)")?;

    let code = prompt_verification_code().await?;

    let mut stdin = child
        .stdin
        .take()
        .context("pytr child process has no stdin handle")?;
    stdin
        .write_all(format!("{}\n", code.trim()).as_bytes())
        .await
        .context("failed to send verification code to pytr")?;
    drop(stdin);

    let output = child
        .wait_with_output()
        .await
        .context("failed to wait for pytr to finish")?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
        println!("{}", stdout.trim_end());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        warn!("pytr stderr: {}", stderr.trim_end());
    }

    if !output.status.success() {
        return Err(PipelineError::DownloaderFailed(output.status.to_string()).into());
    }

    info!("pytr dl_docs finished successfully");
    Ok(())
}

async fn prompt_verification_code() -> Result<String> {
    print!("Enter verification code: ");
    std::io::stdout().flush()?;

    let mut code = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut code)
        .await
        .context("failed to read verification code from terminal")?;
    Ok(code)
}
