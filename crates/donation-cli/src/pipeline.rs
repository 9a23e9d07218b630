//! Enrichment pipeline with explicit stages.
//!
//! 1. **Load**: read the raw CSV, dropping malformed rows
//! 2. **Years**: keep records inside the `--from-year`/`--to-year` window
//! 3. **Calendar**: Gregorian dimensions, Hijri date, event classification
//! 4. **Translate**: display labels for donation categories
//! 5. **Output**: write the enriched CSV
//!
//! Each stage takes the output of the previous stage and returns typed results.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Datelike;
use tracing::{debug, info, info_span, warn};

use donation_calendar::{
    CalendarAnnotation, CalendarEnricher, CalendarError, HijriConverter, gregorian_parts,
};
use donation_ingest::{LoadedRecords, load_records};
use donation_model::{
    EnrichOptions, EnrichedRecord, EventClassification, GregorianParts, OutOfRangePolicy,
    OutputOptions, RawRecord, YearWindow,
};
use donation_output::{WriteSummary, summarize, write_enriched};
use donation_translate::{
    CategoryTranslator, StaticLabels, TranslationReport, TranslationService,
};

use crate::logging::redact_value;
use crate::types::{CalendarReport, EnrichResult};

/// Categories listed in the run summary.
const TOP_CATEGORIES: usize = 10;

/// `<dir>/<stem>_Processed.csv` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "donations".to_string(), |s| s.to_string_lossy().into_owned());
    input.with_file_name(format!("{stem}_Processed.csv"))
}

// ============================================================================
// Stage 1: Load
// ============================================================================

pub fn load(input: &Path) -> Result<LoadedRecords> {
    load_records(input).with_context(|| format!("load {}", input.display()))
}

// ============================================================================
// Stage 2: Year window
// ============================================================================

/// Returns the kept records and how many were outside the window.
pub fn filter_years(records: Vec<RawRecord>, window: &YearWindow) -> (Vec<RawRecord>, usize) {
    if window.is_unbounded() {
        return (records, 0);
    }
    let before = records.len();
    let kept: Vec<RawRecord> = records
        .into_iter()
        .filter(|record| window.contains(record.donated_at.year()))
        .collect();
    let excluded = before - kept.len();
    (kept, excluded)
}

// ============================================================================
// Stage 3: Calendar
// ============================================================================

/// A record with its calendar dimensions; `annotation` is `None` when the
/// date was out of range or could not be converted under the `flag` policy.
#[derive(Debug, Clone)]
pub struct CalendarRow {
    pub raw: RawRecord,
    pub gregorian: GregorianParts,
    pub annotation: Option<CalendarAnnotation>,
}

pub fn annotate<C: HijriConverter>(
    records: Vec<RawRecord>,
    enricher: &CalendarEnricher<C>,
    policy: OutOfRangePolicy,
) -> (Vec<CalendarRow>, CalendarReport) {
    let mut report = CalendarReport::default();
    let mut rows = Vec::with_capacity(records.len());
    for raw in records {
        let gregorian = gregorian_parts(raw.donated_at);
        let annotation = match enricher.annotate(gregorian.date) {
            Ok(annotation) => {
                report.converted += 1;
                if annotation.classification.is_ramadan {
                    report.ramadan += 1;
                }
                if annotation.classification.islamic_event.is_some() {
                    report.events += 1;
                }
                Some(annotation)
            }
            Err(error) => {
                let out_of_range = matches!(error, CalendarError::OutOfRange { .. });
                if out_of_range {
                    debug!(
                        id = redact_value(&raw.id),
                        date = %gregorian.date,
                        policy = ?policy,
                        "date outside supported Hijri range"
                    );
                } else {
                    warn!(
                        id = redact_value(&raw.id),
                        date = %gregorian.date,
                        policy = ?policy,
                        error = %error,
                        "hijri conversion failed"
                    );
                    report.failed += 1;
                }
                match policy {
                    OutOfRangePolicy::Flag => {
                        if out_of_range {
                            report.flagged += 1;
                        }
                        None
                    }
                    OutOfRangePolicy::Drop => {
                        if out_of_range {
                            report.dropped += 1;
                        }
                        continue;
                    }
                }
            }
        };
        rows.push(CalendarRow {
            raw,
            gregorian,
            annotation,
        });
    }
    (rows, report)
}

// ============================================================================
// Stage 4: Translate
// ============================================================================

pub fn translate<S: TranslationService>(
    rows: Vec<CalendarRow>,
    translator: &mut CategoryTranslator<S>,
) -> (Vec<EnrichedRecord>, TranslationReport) {
    let report = translator.prepare(rows.iter().map(|row| row.raw.category.as_str()));
    let records = rows
        .into_iter()
        .map(|row| {
            let category_en = translator.label_for(&row.raw.category).to_string();
            let (hijri, classification) = match row.annotation {
                Some(annotation) => (Some(annotation.hijri), annotation.classification),
                None => (None, EventClassification::default()),
            };
            EnrichedRecord {
                raw: row.raw,
                gregorian: row.gregorian,
                hijri,
                classification,
                category_en,
            }
        })
        .collect();
    (records, report)
}

// ============================================================================
// Stage 5: Output
// ============================================================================

pub fn output(
    path: &Path,
    records: &[EnrichedRecord],
    options: &OutputOptions,
) -> Result<WriteSummary> {
    write_enriched(path, records, options).with_context(|| format!("write {}", path.display()))
}

// ============================================================================
// Full run
// ============================================================================

/// Everything one run needs; the converter and service are injected.
pub struct PipelineInput<'a, C, S> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub options: &'a EnrichOptions,
    pub converter: C,
    pub service: S,
    pub labels: StaticLabels,
}

pub fn run<C: HijriConverter, S: TranslationService>(
    config: PipelineInput<'_, C, S>,
) -> Result<EnrichResult> {
    let PipelineInput {
        input,
        output: output_path,
        options,
        converter,
        service,
        labels,
    } = config;
    let run_span = info_span!("enrich", input = %input.display());
    let _run_guard = run_span.enter();
    let started = Instant::now();

    let stage = Instant::now();
    let LoadedRecords {
        records,
        report: load_report,
    } = info_span!("load").in_scope(|| load(input))?;
    info!(
        total_rows = load_report.total_rows,
        retained = load_report.retained,
        dropped = load_report.dropped,
        duration_ms = stage.elapsed().as_millis(),
        "load complete"
    );

    let (records, outside_years) = filter_years(records, &options.years);
    if outside_years > 0 {
        info!(
            from_year = ?options.years.from_year,
            to_year = ?options.years.to_year,
            excluded = outside_years,
            "year window applied"
        );
    }

    let stage = Instant::now();
    let enricher = CalendarEnricher::new(converter);
    let (rows, calendar) = info_span!("calendar", variant = %options.calendar.variant)
        .in_scope(|| annotate(records, &enricher, options.calendar.out_of_range));
    info!(
        converted = calendar.converted,
        flagged = calendar.flagged,
        dropped = calendar.dropped,
        failed = calendar.failed,
        ramadan = calendar.ramadan,
        events = calendar.events,
        duration_ms = stage.elapsed().as_millis(),
        "calendar complete"
    );

    let stage = Instant::now();
    let mut translator = CategoryTranslator::from_options(service, labels, &options.translation);
    let (records, translation) =
        info_span!("translate").in_scope(|| translate(rows, &mut translator));
    info!(
        distinct = translation.distinct_labels,
        service_calls = translation.service_calls(),
        failed = translation.failed,
        duration_ms = stage.elapsed().as_millis(),
        "translate complete"
    );

    let stage = Instant::now();
    let written = info_span!("output", path = %output_path.display())
        .in_scope(|| output(output_path, &records, &options.output))?;
    info!(
        rows = written.rows,
        sha256 = %written.sha256,
        duration_ms = stage.elapsed().as_millis(),
        "output complete"
    );

    let all: Vec<&EnrichedRecord> = records.iter().collect();
    let dataset = summarize(&all, TOP_CATEGORIES).context("summarize enriched records")?;

    Ok(EnrichResult {
        input: input.to_path_buf(),
        load: load_report,
        outside_years,
        calendar,
        translation,
        output: written,
        dataset,
        duration_ms: started.elapsed().as_millis(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_sits_next_to_input() {
        assert_eq!(
            default_output_path(Path::new("data/General_Donation.csv")),
            PathBuf::from("data/General_Donation_Processed.csv")
        );
        assert_eq!(
            default_output_path(Path::new("donations.csv")),
            PathBuf::from("donations_Processed.csv")
        );
    }
}
