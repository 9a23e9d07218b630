//! Loading of the enriched dataset for display, with a raw-data fallback.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord};
use tracing::{info, warn};

use donation_calendar::gregorian_parts;
use donation_ingest::{load_records, parse_timestamp};
use donation_model::{
    EnrichedRecord, EventClassification, HijriDate, IslamicEvent, RamadanPeriod, RawRecord,
    columns,
};

use crate::error::{OutputError, Result};

/// Records ready for display.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<EnrichedRecord>,
    /// `false` when loaded from raw data: no Hijri fields and untranslated labels.
    pub calendar_features: bool,
    pub source: PathBuf,
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_lowercase()
}

struct Row<'a> {
    path: &'a Path,
    line: u64,
    record: &'a StringRecord,
    index: &'a HashMap<&'static str, usize>,
}

impl Row<'_> {
    fn text(&self, column: &'static str) -> &str {
        self.index
            .get(column)
            .and_then(|&i| self.record.get(i))
            .map_or("", str::trim)
    }

    fn invalid(&self, column: &'static str, message: impl Into<String>) -> OutputError {
        OutputError::InvalidValue {
            path: self.path.to_path_buf(),
            line: self.line,
            column,
            message: message.into(),
        }
    }

    fn parsed<T: FromStr>(&self, column: &'static str) -> Result<Option<T>>
    where
        T::Err: ToString,
    {
        let value = self.text(column);
        if value.is_empty() {
            return Ok(None);
        }
        value
            .parse()
            .map(Some)
            .map_err(|err: T::Err| self.invalid(column, err.to_string()))
    }

    fn required<T: FromStr>(&self, column: &'static str) -> Result<T>
    where
        T::Err: ToString,
    {
        self.parsed(column)?
            .ok_or_else(|| self.invalid(column, "empty value"))
    }

    fn boolean(&self, column: &'static str) -> Result<bool> {
        match self.text(column).to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" | "" => Ok(false),
            other => Err(self.invalid(column, format!("`{other}` is not a boolean"))),
        }
    }

    fn hijri(&self) -> Result<Option<HijriDate>> {
        let Some(year) = self.parsed::<i32>(columns::HIJRI_YEAR)? else {
            return Ok(None);
        };
        let date = HijriDate::new(
            year,
            self.required(columns::HIJRI_MONTH)?,
            self.required(columns::HIJRI_DAY)?,
            self.required(columns::HIJRI_MONTH_LENGTH)?,
        );
        if !date.is_valid() {
            return Err(self.invalid(columns::HIJRI_DAY, "not a valid Hijri date"));
        }
        Ok(Some(date))
    }

    fn to_record(&self) -> Result<EnrichedRecord> {
        let donated_at = parse_timestamp(self.text(columns::DONATION_DATE))
            .ok_or_else(|| self.invalid(columns::DONATION_DATE, "unparseable timestamp"))?;
        let category = self.text(columns::CATEGORY).to_string();
        let category_en = match self.text(columns::CATEGORY_EN) {
            "" => category.clone(),
            label => label.to_string(),
        };
        Ok(EnrichedRecord {
            raw: RawRecord {
                id: self.text(columns::ID).to_string(),
                amount: self.required(columns::AMOUNT)?,
                donated_at,
                category,
            },
            gregorian: gregorian_parts(donated_at),
            hijri: self.hijri()?,
            classification: EventClassification {
                is_ramadan: self.boolean(columns::IS_RAMADAN)?,
                ramadan_period: self.parsed::<RamadanPeriod>(columns::RAMADAN_PERIOD)?,
                islamic_event: self.parsed::<IslamicEvent>(columns::ISLAMIC_EVENT)?,
            },
            category_en,
        })
    }
}

/// Read an enriched dataset written by [`write_enriched`](crate::write_enriched).
///
/// Gregorian dimensions are recomputed from `donationdate`.
pub fn read_enriched(path: &Path) -> Result<Vec<EnrichedRecord>> {
    let csv_error = |source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(normalize_header)
        .collect();
    let mut index = HashMap::new();
    for column in columns::ENRICHED_COLUMNS {
        let position = headers.iter().position(|h| h == column).ok_or_else(|| {
            OutputError::MissingColumn {
                path: path.to_path_buf(),
                column,
            }
        })?;
        index.insert(column, position);
    }

    let mut records = Vec::new();
    for (row_number, result) in reader.records().enumerate() {
        let record = result.map_err(csv_error)?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let row = Row {
            path,
            line: record.position().map_or(row_number as u64 + 2, csv::Position::line),
            record: &record,
            index: &index,
        };
        records.push(row.to_record()?);
    }
    Ok(records)
}

/// Raw records with Gregorian dimensions only.
fn raw_dataset(raw: &Path) -> Result<Vec<EnrichedRecord>> {
    let loaded = load_records(raw)?;
    Ok(loaded
        .records
        .into_iter()
        .map(|raw| EnrichedRecord {
            gregorian: gregorian_parts(raw.donated_at),
            hijri: None,
            classification: EventClassification::default(),
            category_en: raw.category.clone(),
            raw,
        })
        .collect())
}

/// Load the enriched artifact, falling back to the raw file when it is missing.
pub fn load_dataset(processed: &Path, raw: &Path) -> Result<Dataset> {
    if processed.exists() {
        let records = read_enriched(processed)?;
        info!(path = %processed.display(), records = records.len(), "enriched dataset loaded");
        return Ok(Dataset {
            records,
            calendar_features: true,
            source: processed.to_path_buf(),
        });
    }
    if !raw.exists() {
        return Err(OutputError::NoDataset {
            processed: processed.to_path_buf(),
            raw: raw.to_path_buf(),
        });
    }
    warn!(
        processed = %processed.display(),
        raw = %raw.display(),
        "enriched dataset missing, using raw data without calendar features"
    );
    Ok(Dataset {
        records: raw_dataset(raw)?,
        calendar_features: false,
        source: raw.to_path_buf(),
    })
}
