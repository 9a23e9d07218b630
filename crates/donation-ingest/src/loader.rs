//! Raw donation loading.
//!
//! Every non-blank data row ends up either as a [`RawRecord`] or as a
//! [`DroppedRow`], so `retained + dropped == total_rows` always holds.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use donation_model::{RawRecord, columns};

use crate::error::{IngestError, Result};
use crate::timestamp::{AmountError, parse_amount, parse_timestamp};

/// Why a row was excluded from the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DropReason {
    InvalidAmount,
    NegativeAmount,
    InvalidTimestamp,
}

impl DropReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropReason::InvalidAmount => "invalid amount",
            DropReason::NegativeAmount => "negative amount",
            DropReason::InvalidTimestamp => "invalid timestamp",
        }
    }
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRow {
    /// 1-based line in the source file.
    pub line: u64,
    pub reason: DropReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub retained: usize,
    pub dropped: usize,
    pub drops: Vec<DroppedRow>,
}

impl LoadReport {
    pub fn counts_by_reason(&self) -> BTreeMap<DropReason, usize> {
        let mut counts = BTreeMap::new();
        for drop in &self.drops {
            *counts.entry(drop.reason).or_insert(0) += 1;
        }
        counts
    }
}

#[derive(Debug, Clone)]
pub struct LoadedRecords {
    pub records: Vec<RawRecord>,
    pub report: LoadReport,
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_lowercase()
}

fn normalize_cell(raw: &str) -> &str {
    raw.trim().trim_matches('\u{feff}').trim()
}

/// Positions of the required columns in the header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    id: usize,
    donation_date: usize,
    amount: usize,
    category: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord, path: &Path) -> Result<Self> {
        let names: Vec<String> = headers.iter().map(normalize_header).collect();
        let find = |column: &'static str| {
            names
                .iter()
                .position(|name| name == column)
                .ok_or_else(|| IngestError::MissingColumn {
                    path: path.to_path_buf(),
                    column,
                })
        };
        Ok(Self {
            id: find(columns::ID)?,
            donation_date: find(columns::DONATION_DATE)?,
            amount: find(columns::AMOUNT)?,
            category: find(columns::CATEGORY)?,
        })
    }
}

fn cell(record: &StringRecord, index: usize) -> &str {
    normalize_cell(record.get(index).unwrap_or(""))
}

fn parse_row(record: &StringRecord, index: ColumnIndex) -> std::result::Result<RawRecord, DropReason> {
    let amount = parse_amount(cell(record, index.amount)).map_err(|error| match error {
        AmountError::NotNumeric => DropReason::InvalidAmount,
        AmountError::Negative => DropReason::NegativeAmount,
    })?;
    let donated_at =
        parse_timestamp(cell(record, index.donation_date)).ok_or(DropReason::InvalidTimestamp)?;
    Ok(RawRecord {
        id: cell(record, index.id).to_string(),
        amount,
        donated_at,
        category: cell(record, index.category).to_string(),
    })
}

/// Load donation records from a CSV file.
pub fn load_records(path: &Path) -> Result<LoadedRecords> {
    if !path.exists() {
        return Err(IngestError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let file = std::fs::File::open(path).map_err(|error| IngestError::Csv {
        path: path.to_path_buf(),
        source: csv::Error::from(error),
    })?;
    load_records_from_reader(file, path)
}

/// Load donation records from any reader; `source` is used for messages only.
pub fn load_records_from_reader<R: Read>(input: R, source: &Path) -> Result<LoadedRecords> {
    let csv_error = |error: csv::Error| IngestError::Csv {
        path: source.to_path_buf(),
        source: error,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);
    let headers = reader.headers().map_err(csv_error)?.clone();
    let index = ColumnIndex::from_headers(&headers, source)?;

    let mut records = Vec::new();
    let mut report = LoadReport::default();
    for (row_number, result) in reader.records().enumerate() {
        let record = result.map_err(csv_error)?;
        if record.iter().all(|value| normalize_cell(value).is_empty()) {
            continue;
        }
        report.total_rows += 1;
        let line = record
            .position()
            .map_or(row_number as u64 + 2, csv::Position::line);
        match parse_row(&record, index) {
            Ok(raw) => records.push(raw),
            Err(reason) => {
                debug!(line, reason = %reason, "dropping malformed row");
                report.drops.push(DroppedRow { line, reason });
            }
        }
    }
    report.retained = records.len();
    report.dropped = report.drops.len();
    info!(
        source = %source.display(),
        total_rows = report.total_rows,
        retained = report.retained,
        dropped = report.dropped,
        "records loaded"
    );
    Ok(LoadedRecords { records, report })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(contents: &str) -> Result<LoadedRecords> {
        load_records_from_reader(contents.as_bytes(), Path::new("inline.csv"))
    }

    #[test]
    fn header_matching_ignores_case_bom_and_order() {
        let loaded = load(
            "\u{feff}DonationType , Amount,ID,DonationDate\nسقيا الماء,20,7,2024-01-01 10:00:00\n",
        )
        .unwrap();
        assert_eq!(loaded.records.len(), 1);
        let record = &loaded.records[0];
        assert_eq!(record.id, "7");
        assert_eq!(record.amount, 20.0);
        assert_eq!(record.category, "سقيا الماء");
    }

    #[test]
    fn missing_column_is_fatal() {
        let error = load("id,amount,donationtype\n1,2,x\n").unwrap_err();
        assert!(matches!(
            error,
            IngestError::MissingColumn {
                column: "donationdate",
                ..
            }
        ));
    }

    #[test]
    fn blank_rows_are_not_counted() {
        let loaded = load("id,donationdate,amount,donationtype\n,,,\n1,2024-01-01,5,x\n").unwrap();
        assert_eq!(loaded.report.total_rows, 1);
        assert_eq!(loaded.report.retained, 1);
    }

    #[test]
    fn short_rows_read_missing_cells_as_empty() {
        let loaded = load("id,donationdate,amount,donationtype\n1,2024-01-01,5\n").unwrap();
        assert_eq!(loaded.records[0].category, "");
    }
}
