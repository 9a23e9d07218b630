//! Loading of raw donation CSV files.

pub mod error;
pub mod loader;
pub mod timestamp;

pub use error::{IngestError, Result};
pub use loader::{
    DropReason, DroppedRow, LoadReport, LoadedRecords, load_records, load_records_from_reader,
};
pub use timestamp::{AmountError, parse_amount, parse_timestamp};
