//! Configuration from environment variables
//!
//! All settings come from the process environment; `main` loads a `.env`
//! file from the working directory first, so both sources look the same
//! here. See `.env.example` for the full key list.
//!
//! Keys are only required when the stage that consumes them actually runs,
//! so e.g. `--noupload` lifts the requirement on the `NC_*` keys.

use std::path::PathBuf;

use anyhow::Result;

use crate::error::PipelineError;
use crate::pipeline::StagePlan;

/// Trade Republic credentials and download window
#[derive(Debug, Clone)]
pub struct TradeRepublicConfig {
    pub phone_number: String,
    pub pin: String,
    /// Number of days of history to download, 0 for everything
    pub days_to_download: u32,
}

/// Nextcloud endpoint, credentials and remote target folder
#[derive(Debug, Clone)]
pub struct NextcloudConfig {
    pub url: String,
    pub auth_user: String,
    pub auth_pass: String,
    /// Remote folder receiving the uploads, e.g. "Documents/TradeRepublic"
    pub document_folder: String,
}

/// Full pipeline configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Local working directory for downloads, CSV output and upload source
    pub download_path: PathBuf,
    /// Present when the download stage runs
    pub trade_republic: Option<TradeRepublicConfig>,
    /// Present when the upload stage runs
    pub nextcloud: Option<NextcloudConfig>,
}

impl Config {
    /// Read configuration from the process environment, validating only the
    /// keys the planned stages need.
    pub fn from_env(plan: &StagePlan) -> Result<Self> {
        Self::from_lookup(plan, |key| std::env::var(key).ok())
    }

    /// Testable core of `from_env`: `lookup` resolves a key to its value.
    pub fn from_lookup<F>(plan: &StagePlan, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let download_path = PathBuf::from(require(&lookup, "TR_DOC_DOWNLOAD_PATH")?);

        let trade_republic = if plan.download {
            let days_raw = require(&lookup, "TR_DAYS_TO_DOWNLOAD")?;
            let days_to_download =
                days_raw
                    .trim()
                    .parse::<u32>()
                    .map_err(|e| PipelineError::InvalidEnv {
                        key: "TR_DAYS_TO_DOWNLOAD",
                        message: format!("expected a non-negative integer, got '{days_raw}' ({e})"),
                    })?;

            Some(TradeRepublicConfig {
                phone_number: require(&lookup, "TR_PHONE_NUMBER")?,
                pin: require(&lookup, "TR_PIN")?,
                days_to_download,
            })
        } else {
            None
        };

        let nextcloud = if plan.upload {
            Some(NextcloudConfig {
                url: require(&lookup, "NC_URL")?,
                auth_user: require(&lookup, "NC_AUTH_USER")?,
                auth_pass: require(&lookup, "NC_AUTH_PASS")?,
                document_folder: require(&lookup, "NC_TR_DOCUMENT_FOLDER")?,
            })
        } else {
            None
        };

        Ok(Config {
            download_path,
            trade_republic,
            nextcloud,
        })
    }
}

fn require<F>(lookup: &F, key: &'static str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(PipelineError::MissingEnv(key).into()),
    }
}
