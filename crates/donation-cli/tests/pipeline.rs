//! End-to-end enrichment runs with injected calendar and translation stubs.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use tempfile::tempdir;

use donation_calendar::{CalendarError, HijriConverter, RangeCheckedConverter};
use donation_cli::pipeline::{PipelineInput, run};
use donation_model::{
    CalendarOptions, EnrichOptions, HijriDate, OutOfRangePolicy, OutputOptions, YearWindow,
};
use donation_output::read_enriched;
use donation_translate::{Result as TranslateResult, StaticLabels, TranslationService};

/// 2025-03-01 is 1 Ramadan 1446 (29 days); Shawwal follows.
struct Ramadan1446;

impl HijriConverter for Ramadan1446 {
    fn to_hijri(&self, date: NaiveDate) -> donation_calendar::Result<HijriDate> {
        let offset = (date - NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()).num_days();
        match offset {
            0..=28 => Ok(HijriDate::new(1446, 9, offset as u32 + 1, 29)),
            29..=58 => Ok(HijriDate::new(1446, 10, offset as u32 - 28, 30)),
            _ => Ok(HijriDate::new(1446, 1, 1, 30)),
        }
    }
}

#[derive(Default)]
struct Counting {
    calls: AtomicUsize,
}

impl TranslationService for Counting {
    fn translate(&self, text: &str) -> TranslateResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("[{text}]"))
    }
}

const INPUT: &str = "\u{feff}id,donationdate,amount,donationtype\n\
1,2025-03-10 21:15:00,100,سقيا الماء\n\
2,2025-03-30 09:00:00,50,وقف\n\
3,2025-03-31 10:00:00,25,وقف\n\
4,garbage,10,وقف\n\
5,1900-01-01 10:00:00,5,كفالة يتيم\n\
6,2025-03-05 12:00:00,-1,وقف\n";

fn write_input(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("General_Donation.csv");
    fs::write(&path, INPUT).unwrap();
    path
}

fn converter(options: &CalendarOptions) -> RangeCheckedConverter<Ramadan1446> {
    RangeCheckedConverter::new(Ramadan1446, options.min_date, options.max_date)
}

#[test]
fn enrich_run_classifies_translates_and_writes() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path());
    let output = dir.path().join("out").join("General_Donation_Processed.csv");
    let options = EnrichOptions::default();
    let service = Counting::default();

    let result = run(PipelineInput {
        input: &input,
        output: &output,
        options: &options,
        converter: converter(&options.calendar),
        service: &service,
        labels: StaticLabels::builtin(),
    })
    .unwrap();

    assert_eq!(result.load.total_rows, 6);
    assert_eq!(result.load.dropped, 2);
    assert_eq!(result.calendar.converted, 3);
    assert_eq!(result.calendar.flagged, 1);
    assert_eq!(result.calendar.ramadan, 1);
    assert_eq!(result.calendar.events, 2);
    assert_eq!(result.translation.translated, 1);
    assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    assert_eq!(result.output.rows, 4);

    let records = read_enriched(&output).unwrap();
    let by_id = |id: &str| records.iter().find(|r| r.raw.id == id).unwrap();
    assert_eq!(by_id("1").category_en, "Water Supply");
    assert_eq!(by_id("1").hijri.map(|h| h.day), Some(10));
    assert!(by_id("1").is_ramadan());
    assert_eq!(by_id("2").category_en, "[وقف]");
    assert_eq!(
        by_id("2").islamic_event().map(|e| e.as_str()),
        Some("Eid al-Fitr")
    );
    let old = by_id("5");
    assert_eq!(old.hijri, None);
    assert!(!old.is_ramadan());
    assert_eq!(old.gregorian.year, 1900);
}

#[test]
fn rerun_produces_identical_bytes() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path());
    let output = dir.path().join("processed.csv");
    let options = EnrichOptions::default();

    let mut digests = Vec::new();
    let mut contents = Vec::new();
    for _ in 0..2 {
        let result = run(PipelineInput {
            input: &input,
            output: &output,
            options: &options,
            converter: converter(&options.calendar),
            service: Counting::default(),
            labels: StaticLabels::builtin(),
        })
        .unwrap();
        digests.push(result.output.sha256);
        contents.push(fs::read(&output).unwrap());
    }
    assert_eq!(digests[0], digests[1]);
    assert_eq!(contents[0], contents[1]);
}

#[test]
fn drop_policy_and_year_window() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path());
    let output = dir.path().join("processed.csv");
    let options = EnrichOptions {
        calendar: CalendarOptions::default().with_out_of_range(OutOfRangePolicy::Drop),
        years: YearWindow::new(Some(1800), None),
        output: OutputOptions {
            write_bom: false,
            dry_run: false,
        },
        ..EnrichOptions::default()
    };
    let result = run(PipelineInput {
        input: &input,
        output: &output,
        options: &options,
        converter: converter(&options.calendar),
        service: Counting::default(),
        labels: StaticLabels::builtin(),
    })
    .unwrap();
    assert_eq!(result.calendar.dropped, 1);
    assert_eq!(result.output.rows, 3);
    assert!(fs::read(&output).unwrap().starts_with(b"id,"));

    let windowed = EnrichOptions {
        years: YearWindow::new(Some(2025), Some(2025)),
        ..EnrichOptions::default()
    };
    let result = run(PipelineInput {
        input: &input,
        output: &output,
        options: &windowed,
        converter: converter(&windowed.calendar),
        service: Counting::default(),
        labels: StaticLabels::builtin(),
    })
    .unwrap();
    assert_eq!(result.outside_years, 1);
    assert_eq!(result.output.rows, 3);
}

#[test]
fn missing_input_is_fatal() {
    let dir = tempdir().unwrap();
    let options = EnrichOptions::default();
    let error = run(PipelineInput {
        input: &dir.path().join("absent.csv"),
        output: &dir.path().join("out.csv"),
        options: &options,
        converter: converter(&options.calendar),
        service: Counting::default(),
        labels: StaticLabels::builtin(),
    })
    .unwrap_err();
    assert!(format!("{error:#}").contains("absent.csv"));
}

/// Like [`Ramadan1446`] but reports day 0 for 2025-03-31.
struct DayZeroOn31March;

impl HijriConverter for DayZeroOn31March {
    fn to_hijri(&self, date: NaiveDate) -> donation_calendar::Result<HijriDate> {
        if date == NaiveDate::from_ymd_opt(2025, 3, 31).unwrap() {
            return Ok(HijriDate::new(1446, 10, 0, 29));
        }
        Ramadan1446.to_hijri(date)
    }
}

#[test]
fn invalid_hijri_dates_follow_the_out_of_range_policy() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path());
    let output = dir.path().join("processed.csv");

    let flag = EnrichOptions::default();
    let result = run(PipelineInput {
        input: &input,
        output: &output,
        options: &flag,
        converter: RangeCheckedConverter::new(
            DayZeroOn31March,
            flag.calendar.min_date,
            flag.calendar.max_date,
        ),
        service: Counting::default(),
        labels: StaticLabels::builtin(),
    })
    .unwrap();
    assert_eq!(result.calendar.failed, 1);
    assert_eq!(result.calendar.converted, 2);
    assert_eq!(result.calendar.flagged, 1);
    assert_eq!(result.output.rows, 4);
    let records = read_enriched(&output).unwrap();
    let failed = records.iter().find(|r| r.raw.id == "3").unwrap();
    assert_eq!(failed.hijri, None);
    assert!(!failed.is_ramadan());
    assert_eq!(failed.islamic_event(), None);
    let ramadan = records.iter().find(|r| r.raw.id == "1").unwrap();
    assert_eq!(ramadan.hijri.map(|h| h.day), Some(10));

    let drop = EnrichOptions {
        calendar: CalendarOptions::default().with_out_of_range(OutOfRangePolicy::Drop),
        ..EnrichOptions::default()
    };
    let result = run(PipelineInput {
        input: &input,
        output: &output,
        options: &drop,
        converter: RangeCheckedConverter::new(
            DayZeroOn31March,
            drop.calendar.min_date,
            drop.calendar.max_date,
        ),
        service: Counting::default(),
        labels: StaticLabels::builtin(),
    })
    .unwrap();
    assert_eq!(result.calendar.failed, 1);
    assert_eq!(result.calendar.dropped, 1);
    assert_eq!(result.output.rows, 2);
    let ids: Vec<String> = read_enriched(&output)
        .unwrap()
        .into_iter()
        .map(|r| r.raw.id)
        .collect();
    assert_eq!(ids, ["1", "2"]);
}

#[test]
fn a_failing_converter_still_writes_every_record() {
    struct Broken;
    impl HijriConverter for Broken {
        fn to_hijri(&self, date: NaiveDate) -> donation_calendar::Result<HijriDate> {
            Err(CalendarError::Conversion {
                date,
                message: "broken".to_string(),
            })
        }
    }
    let dir = tempdir().unwrap();
    let input = write_input(dir.path());
    let output = dir.path().join("out.csv");
    let options = EnrichOptions::default();
    let result = run(PipelineInput {
        input: &input,
        output: &output,
        options: &options,
        converter: Broken,
        service: Counting::default(),
        labels: StaticLabels::builtin(),
    })
    .unwrap();
    assert_eq!(result.calendar.converted, 0);
    assert_eq!(result.calendar.failed, 4);
    assert_eq!(result.output.rows, 4);
    assert!(output.exists());
}
