//! pytr timeline event model and classification
//!
//! `pytr dl_docs` dumps the account timeline as `all_events.json`, a JSON
//! array of event objects. Only a subset of event types corresponds to a
//! transaction Portfolio Performance can import; everything else (card
//! notices, documents-ready events, ...) is skipped.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};

/// One entry of the pytr timeline dump. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TimelineEvent {
    pub timestamp: String,
    #[serde(rename = "eventType")]
    pub event_type: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub amount: Option<EventAmount>,
}

/// Monetary amount attached to an event
#[derive(Debug, Clone, Deserialize)]
pub struct EventAmount {
    pub value: Option<f64>,
    pub currency: Option<String>,
}

/// Portfolio Performance transaction type an event maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Deposit,
    Removal,
    Interest,
    Dividend,
    TaxRefund,
    Buy,
    Sell,
}

impl TransactionKind {
    /// Column value Portfolio Performance expects in the Type field
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Removal => "Removal",
            TransactionKind::Interest => "Interest",
            TransactionKind::Dividend => "Dividend",
            TransactionKind::TaxRefund => "Tax Refund",
            TransactionKind::Buy => "Buy",
            TransactionKind::Sell => "Sell",
        }
    }
}

/// Load the event dump from `all_events.json`.
pub fn load_events(path: &Path) -> Result<Vec<TimelineEvent>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open event dump {:?} (did the download run?)", path))?;
    let events: Vec<TimelineEvent> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse event dump {:?}", path))?;
    info!("loaded {} timeline events from {:?}", events.len(), path);
    Ok(events)
}

/// Map an event type to a transaction kind. Trade events carry the
/// direction in the sign of the amount, so those need `value` as well.
pub fn classify(event: &TimelineEvent) -> Option<(TransactionKind, Decimal)> {
    // Cent precision; from_f64 would otherwise drag binary noise into the CSV.
    let value = event
        .amount
        .as_ref()
        .and_then(|a| a.value)
        .and_then(Decimal::from_f64)?
        .round_dp(2);

    let kind = match event.event_type.as_str() {
        "PAYMENT_INBOUND" | "PAYMENT_INBOUND_SEPA_DIRECT_DEBIT" | "INCOMING_TRANSFER" => {
            TransactionKind::Deposit
        }
        "PAYMENT_OUTBOUND" | "OUTGOING_TRANSFER" | "OUTGOING_TRANSFER_DELEGATION" => {
            TransactionKind::Removal
        }
        "INTEREST_PAYOUT" | "INTEREST_PAYOUT_CREATED" => TransactionKind::Interest,
        "CREDIT" | "ssp_corporate_action_invoice_cash" => TransactionKind::Dividend,
        "TAX_REFUND" => TransactionKind::TaxRefund,
        "ORDER_EXECUTED"
        | "TRADE_INVOICE"
        | "SAVINGS_PLAN_EXECUTED"
        | "SAVINGS_PLAN_INVOICE_CREATED"
        | "trading_savingsplan_executed" => {
            if value < Decimal::ZERO {
                TransactionKind::Buy
            } else {
                TransactionKind::Sell
            }
        }
        other => {
            warn!("skipping event with unmapped type '{}'", other);
            return None;
        }
    };

    Some((kind, value))
}

/// Parse a pytr event timestamp. The dump mixes strict RFC 3339 with the
/// `+0000` offset spelling, so try both.
pub fn parse_event_date(timestamp: &str) -> Result<NaiveDate> {
    DateTime::parse_from_rfc3339(timestamp)
        .or_else(|_| DateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .map(|dt| dt.date_naive())
        .with_context(|| format!("failed to parse event timestamp '{}'", timestamp))
}
