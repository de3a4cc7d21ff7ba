//! Portfolio Performance import CSV writer
//!
//! Produces `<YYYYMMDD>_pp_import.csv` in the download folder, semicolon
//! delimited the way Portfolio Performance expects its generic CSV import.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use csv::WriterBuilder;
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::events::{self, TimelineEvent, TransactionKind};
use super::EVENTS_FILE_NAME;

/// One CSV row of the export
#[derive(Debug, Clone)]
pub struct ExportRow {
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub value: Decimal,
    pub currency: String,
    pub note: String,
}

/// Build CSV rows from the raw event dump. Events that do not map to a
/// transaction or carry an unparseable timestamp are skipped with a warning.
pub fn build_rows(timeline: &[TimelineEvent]) -> Vec<ExportRow> {
    let mut rows = Vec::new();

    for event in timeline {
        let Some((kind, value)) = events::classify(event) else {
            continue;
        };

        let date = match events::parse_event_date(&event.timestamp) {
            Ok(date) => date,
            Err(e) => {
                warn!("skipping event '{}': {}", event.event_type, e);
                continue;
            }
        };

        let currency = event
            .amount
            .as_ref()
            .and_then(|a| a.currency.clone())
            .unwrap_or_else(|| "EUR".to_string());

        let note = match (&event.title, &event.subtitle) {
            (Some(title), Some(subtitle)) => format!("{} - {}", title, subtitle),
            (Some(title), None) => title.clone(),
            (None, Some(subtitle)) => subtitle.clone(),
            (None, None) => String::new(),
        };

        rows.push(ExportRow {
            date,
            kind,
            value,
            currency,
            note,
        });
    }

    rows
}

/// Dated file name for the export, e.g. `20250827_pp_import.csv`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("{}_pp_import.csv", date.format("%Y%m%d"))
}

/// Write rows as a semicolon delimited CSV.
pub fn write_rows(rows: &[ExportRow], path: &Path) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .with_context(|| format!("failed to create CSV file {:?}", path))?;

    writer.write_record(["Date", "Type", "Value", "Currency", "Note"])?;
    for row in rows {
        writer.write_record([
            row.date.format("%Y-%m-%d").to_string(),
            row.kind.label().to_string(),
            row.value.to_string(),
            row.currency.clone(),
            row.note.clone(),
        ])?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write CSV file {:?}", path))?;

    Ok(())
}

/// Generate the import CSV from `all_events.json` in the download folder.
///
/// Returns the path of the written file and the rows it contains.
pub fn generate(download_path: &Path) -> Result<(PathBuf, Vec<ExportRow>)> {
    let events_path = download_path.join(EVENTS_FILE_NAME);
    let timeline = events::load_events(&events_path)?;

    let rows = build_rows(&timeline);
    let csv_path = download_path.join(export_file_name(Local::now().date_naive()));
    write_rows(&rows, &csv_path)?;

    info!(
        "wrote {} transactions to {:?} ({} events skipped)",
        rows.len(),
        csv_path,
        timeline.len() - rows.len()
    );
    Ok((csv_path, rows))
}
