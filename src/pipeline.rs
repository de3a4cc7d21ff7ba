//! Stage sequencing
//!
//! One invocation runs up to four stages in fixed order: reset the local
//! download folder, download documents via pytr, generate the Portfolio
//! Performance import CSV and upload everything to Nextcloud. The first
//! stage error aborts the run; there are no retries.

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::info;

use crate::cli::Cli;
use crate::config::Config;
use crate::downloader;
use crate::export::{self, ExportRow};
use crate::nextcloud::{upload, NextcloudClient};
use crate::workdir;

/// Which stages of the pipeline actually run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagePlan {
    pub reset: bool,
    pub download: bool,
    pub csv: bool,
    pub upload: bool,
}

impl StagePlan {
    /// Derive the plan from the CLI flags. The CSV stage is also skipped
    /// when both download and deletion were skipped: then the folder holds
    /// only data of a previous run and the CSV would duplicate it.
    pub fn from_cli(cli: &Cli) -> Self {
        StagePlan {
            reset: !cli.skipdel,
            download: !cli.nodl,
            csv: !cli.nocsv && (!cli.nodl || !cli.skipdel),
            upload: !cli.noupload,
        }
    }
}

/// Run all planned stages in order.
pub async fn run(plan: &StagePlan, force_folder_create: bool, config: &Config) -> Result<()> {
    if plan.reset {
        println!("Checking for existing download folder.");
        if workdir::reset_download_folder(&config.download_path)? {
            println!(
                "Deleted existing & not empty doc path: {:?}",
                config.download_path
            );
        } else {
            println!("All good, no folder found. Starting download.");
        }
    } else {
        println!("Skipping deletion of existing download folder.");
    }

    if plan.download {
        let tr = config
            .trade_republic
            .as_ref()
            .context("download stage needs Trade Republic configuration")?;
        downloader::download_docs(tr, &config.download_path).await?;
    } else {
        println!("Skipping document download.");
    }

    if plan.csv {
        let (csv_path, rows) = export::generate(&config.download_path)?;
        println!(
            "\n{} Wrote {} transactions to {:?}\n",
            "✓".green().bold(),
            rows.len(),
            csv_path
        );
        print_preview(&rows);
    } else {
        println!("Skipping CSV generation.");
    }

    if plan.upload {
        let nc = config
            .nextcloud
            .as_ref()
            .context("upload stage needs Nextcloud configuration")?;
        let client = NextcloudClient::new(nc)?;
        upload::create_remote_folders(&client, nc, &config.download_path, force_folder_create)
            .await?;
        upload::upload_folder(&client, nc, &config.download_path).await?;
    } else {
        println!("Skipping Nextcloud upload.");
    }

    info!("pipeline finished");
    Ok(())
}

/// Preview the first CSV rows as a table.
fn print_preview(rows: &[ExportRow]) {
    use tabled::{settings::Style, Table, Tabled};

    if rows.is_empty() {
        return;
    }

    #[derive(Tabled)]
    struct RowPreview {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Type")]
        kind: String,
        #[tabled(rename = "Value")]
        value: String,
        #[tabled(rename = "Currency")]
        currency: String,
        #[tabled(rename = "Note")]
        note: String,
    }

    let preview: Vec<RowPreview> = rows
        .iter()
        .take(10)
        .map(|row| RowPreview {
            date: row.date.format("%Y-%m-%d").to_string(),
            kind: row.kind.label().to_string(),
            value: row.value.to_string(),
            currency: row.currency.clone(),
            note: row.note.clone(),
        })
        .collect();

    let table = Table::new(preview).with(Style::rounded()).to_string();
    println!("{}", table);

    if rows.len() > 10 {
        println!("\n... and {} more transactions", rows.len() - 10);
    }
}
