//! Configuration options for an enrichment run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::{CalendarVariant, OutOfRangePolicy};

/// First day covered by the Umm al-Qura tables (1 Muharram 1343).
pub const SUPPORTED_MIN_DATE: NaiveDate = NaiveDate::from_ymd_opt(1924, 8, 1).expect("valid date");

/// Last day covered by the Umm al-Qura tables (end of 1500 AH).
pub const SUPPORTED_MAX_DATE: NaiveDate =
    NaiveDate::from_ymd_opt(2077, 11, 16).expect("valid date");

/// Options for Hijri conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarOptions {
    pub variant: CalendarVariant,
    /// Earliest Gregorian date converted (inclusive).
    pub min_date: NaiveDate,
    /// Latest Gregorian date converted (inclusive).
    pub max_date: NaiveDate,
    pub out_of_range: OutOfRangePolicy,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self {
            variant: CalendarVariant::default(),
            min_date: SUPPORTED_MIN_DATE,
            max_date: SUPPORTED_MAX_DATE,
            out_of_range: OutOfRangePolicy::default(),
        }
    }
}

impl CalendarOptions {
    #[must_use]
    pub fn with_variant(mut self, variant: CalendarVariant) -> Self {
        self.variant = variant;
        self
    }

    #[must_use]
    pub fn with_range(mut self, min_date: NaiveDate, max_date: NaiveDate) -> Self {
        self.min_date = min_date;
        self.max_date = max_date;
        self
    }

    #[must_use]
    pub fn with_out_of_range(mut self, policy: OutOfRangePolicy) -> Self {
        self.out_of_range = policy;
        self
    }
}

/// Inclusive Gregorian year window; an open bound keeps everything on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct YearWindow {
    pub from_year: Option<i32>,
    pub to_year: Option<i32>,
}

impl YearWindow {
    pub fn new(from_year: Option<i32>, to_year: Option<i32>) -> Self {
        Self { from_year, to_year }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from_year.is_none() && self.to_year.is_none()
    }

    pub fn contains(&self, year: i32) -> bool {
        self.from_year.is_none_or(|from| year >= from) && self.to_year.is_none_or(|to| year <= to)
    }
}

/// Options for category translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationOptions {
    /// Source language code of the category labels.
    pub source_lang: String,
    /// Target language code of the display labels.
    pub target_lang: String,
    /// Upper bound on concurrent translation calls.
    pub workers: usize,
    /// Per-call timeout in seconds.
    pub timeout_secs: u64,
    /// Additional attempts after a failed call.
    pub retries: u32,
    /// Pause after each external call, in milliseconds.
    pub delay_ms: u64,
    /// Skip the external service entirely.
    pub offline: bool,
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self {
            source_lang: "ar".to_string(),
            target_lang: "en".to_string(),
            workers: 4,
            timeout_secs: 10,
            retries: 0,
            delay_ms: 100,
            offline: false,
        }
    }
}

/// Options for writing the enriched dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputOptions {
    /// Prefix the file with a UTF-8 byte-order mark (spreadsheet friendly).
    pub write_bom: bool,
    /// Run every stage but do not write the artifact.
    pub dry_run: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            write_bom: true,
            dry_run: false,
        }
    }
}

/// All options of one enrichment run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichOptions {
    pub calendar: CalendarOptions,
    pub years: YearWindow,
    pub translation: TranslationOptions,
    pub output: OutputOptions,
}
