//! Enriched dataset writer.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDateTime, Timelike};
use csv::WriterBuilder;
use sha2::{Digest, Sha256};
use tracing::info;

use donation_model::{EnrichedRecord, OutputOptions, columns};

use crate::error::{OutputError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// What [`write_enriched`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub path: PathBuf,
    pub rows: usize,
    pub bytes: usize,
    /// Hex SHA-256 of the file contents.
    pub sha256: String,
    /// `false` for a dry run.
    pub written: bool,
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Whole seconds keep the short layout; sub-second parts are preserved.
fn timestamp_cell(timestamp: NaiveDateTime) -> String {
    let format = if timestamp.nanosecond() == 0 {
        columns::TIMESTAMP_FORMAT
    } else {
        columns::FRACTIONAL_TIMESTAMP_FORMAT
    };
    timestamp.format(format).to_string()
}

fn record_row(record: &EnrichedRecord) -> Vec<String> {
    let raw = &record.raw;
    let greg = &record.gregorian;
    let hijri = record.hijri.as_ref();
    let class = &record.classification;
    vec![
        raw.id.clone(),
        timestamp_cell(raw.donated_at),
        raw.amount.to_string(),
        raw.category.clone(),
        record.category_en.clone(),
        greg.year.to_string(),
        greg.month.to_string(),
        greg.month_name().to_string(),
        greg.quarter.to_string(),
        greg.day.to_string(),
        greg.weekday.to_string(),
        greg.weekday_name().to_string(),
        greg.week.to_string(),
        greg.hour.to_string(),
        greg.date.format(columns::DATE_FORMAT).to_string(),
        opt(hijri.map(|h| h.year)),
        opt(hijri.map(|h| h.month)),
        opt(hijri.map(|h| h.day)),
        opt(hijri.map(|h| h.month_name())),
        opt(hijri.map(|h| h.month_length)),
        class.is_ramadan.to_string(),
        opt(class.ramadan_period.map(|p| p.as_str())),
        opt(class.islamic_event.map(|e| e.as_str())),
    ]
}

/// Serialize records into the enriched CSV layout.
pub fn render_enriched(records: &[EnrichedRecord], options: &OutputOptions) -> Result<Vec<u8>> {
    let csv_error = |source: csv::Error| OutputError::Csv {
        path: PathBuf::from("<memory>"),
        source,
    };
    let mut buffer = Vec::new();
    if options.write_bom {
        buffer.extend_from_slice(UTF8_BOM);
    }
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(buffer);
    writer
        .write_record(columns::ENRICHED_COLUMNS)
        .map_err(csv_error)?;
    for record in records {
        writer.write_record(record_row(record)).map_err(csv_error)?;
    }
    writer.into_inner().map_err(|err| OutputError::Io {
        path: PathBuf::from("<memory>"),
        source: err.into_error(),
    })
}

/// Write the enriched dataset to `path`, replacing any earlier file.
pub fn write_enriched(
    path: &Path,
    records: &[EnrichedRecord],
    options: &OutputOptions,
) -> Result<WriteSummary> {
    let bytes = render_enriched(records, options)?;
    let sha256 = hex::encode(Sha256::digest(&bytes));
    let io_error = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };
    if !options.dry_run {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(path, &bytes).map_err(io_error)?;
    }
    info!(
        path = %path.display(),
        rows = records.len(),
        bytes = bytes.len(),
        dry_run = options.dry_run,
        "enriched dataset rendered"
    );
    Ok(WriteSummary {
        path: path.to_path_buf(),
        rows: records.len(),
        bytes: bytes.len(),
        sha256,
        written: !options.dry_run,
    })
}
