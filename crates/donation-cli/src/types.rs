use std::path::PathBuf;

use donation_ingest::LoadReport;
use donation_output::{DatasetSummary, WriteSummary};
use donation_translate::TranslationReport;

/// Counts from the calendar stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalendarReport {
    pub converted: usize,
    /// Out-of-range records kept with empty Hijri fields.
    pub flagged: usize,
    /// Out-of-range records removed.
    pub dropped: usize,
    /// In-range records the converter could not place; kept or removed
    /// according to the out-of-range policy.
    pub failed: usize,
    pub ramadan: usize,
    pub events: usize,
}

#[derive(Debug)]
pub struct EnrichResult {
    pub input: PathBuf,
    pub load: LoadReport,
    /// Records outside the `--from-year`/`--to-year` window.
    pub outside_years: usize,
    pub calendar: CalendarReport,
    pub translation: TranslationReport,
    pub output: WriteSummary,
    /// Figures over the written records.
    pub dataset: DatasetSummary,
    pub duration_ms: u128,
}

#[derive(Debug)]
pub struct InspectResult {
    pub source: PathBuf,
    pub calendar_features: bool,
    pub total_records: usize,
    pub matched: usize,
    pub summary: DatasetSummary,
}
