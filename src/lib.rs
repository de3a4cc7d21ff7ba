//! tr-docs - Trade Republic document pipeline
//!
//! This library orchestrates the download of Trade Republic transaction
//! documents via the external `pytr` tool, generates a CSV for import into
//! Portfolio Performance and uploads everything to a Nextcloud folder.

pub mod cli;
pub mod config;
pub mod downloader;
pub mod error;
pub mod export;
pub mod nextcloud;
pub mod pipeline;
pub mod workdir;
