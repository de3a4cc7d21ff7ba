// Export module - Portfolio Performance import CSV from pytr event data

pub mod events;
pub mod pp_csv;

pub use events::{TimelineEvent, TransactionKind};
pub use pp_csv::{generate, ExportRow};

/// File name of the event dump `pytr dl_docs` leaves in the download folder.
pub const EVENTS_FILE_NAME: &str = "all_events.json";
