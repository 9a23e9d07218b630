use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use comfy_table::{CellAlignment, Table};
use tracing::{debug, info, info_span};

use donation_calendar::{EventRuleTable, converter_for};
use donation_cli::pipeline::{self, PipelineInput, default_output_path};
use donation_cli::types::{EnrichResult, InspectResult};
use donation_model::{
    CalendarOptions, EnrichOptions, OutputOptions, SUPPORTED_MAX_DATE, SUPPORTED_MIN_DATE,
    TranslationOptions, YearWindow,
};
use donation_output::{RecordFilter, load_dataset, summarize};
use donation_translate::{
    GoogleTranslateClient, OfflineTranslator, StaticLabels, TranslationService,
};

use crate::cli::{EnrichArgs, InspectArgs};
use crate::summary::{align_column, apply_table_style, header_cell};

pub fn run_events() -> Result<()> {
    let rules = EventRuleTable::standard();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Hijri month"),
        header_cell("Days"),
        header_cell("Label"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for rule in rules.rules() {
        table.add_row(vec![
            format!("{} ({})", rule.month_name(), rule.month()),
            rule.days().describe(),
            rule.label().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_enrich(args: &EnrichArgs) -> Result<EnrichResult> {
    let options = enrich_options(args)?;
    debug!(
        options = %serde_json::to_string(&options).context("serialize options")?,
        "run options"
    );
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    let labels = static_labels(args.translations.as_deref())?;
    let service: Box<dyn TranslationService> = if options.translation.offline {
        Box::new(OfflineTranslator)
    } else {
        Box::new(
            GoogleTranslateClient::new(&options.translation)
                .context("build translation client")?,
        )
    };
    pipeline::run(PipelineInput {
        input: &args.input,
        output: &output,
        options: &options,
        converter: converter_for(&options.calendar),
        service,
        labels,
    })
}

pub fn run_inspect(args: &InspectArgs) -> Result<InspectResult> {
    let span = info_span!("inspect", processed = %args.processed.display());
    let _guard = span.enter();
    if let (Some(from), Some(to)) = (args.from, args.to)
        && from > to
    {
        bail!("--from {from} is after --to {to}");
    }
    let dataset = load_dataset(&args.processed, &args.raw).context("load dataset")?;
    let filter = RecordFilter::default()
        .with_dates(args.from, args.to)
        .with_categories(args.categories.iter().cloned())
        .with_amounts(args.min_amount, args.max_amount)
        .ramadan_only(args.ramadan_only);
    let matched = filter.apply(&dataset.records);
    let summary = summarize(&matched, args.top).context("summarize dataset")?;
    info!(
        total = dataset.records.len(),
        matched = matched.len(),
        calendar_features = dataset.calendar_features,
        "dataset filtered"
    );
    Ok(InspectResult {
        source: dataset.source.clone(),
        calendar_features: dataset.calendar_features,
        total_records: dataset.records.len(),
        matched: matched.len(),
        summary,
    })
}

fn enrich_options(args: &EnrichArgs) -> Result<EnrichOptions> {
    let min_date = args.min_date.unwrap_or(SUPPORTED_MIN_DATE);
    let max_date = args.max_date.unwrap_or(SUPPORTED_MAX_DATE);
    if min_date > max_date {
        bail!("--min-date {min_date} is after --max-date {max_date}");
    }
    if let (Some(from), Some(to)) = (args.from_year, args.to_year)
        && from > to
    {
        bail!("--from-year {from} is after --to-year {to}");
    }
    if args.workers == 0 {
        bail!("--workers must be at least 1");
    }
    Ok(EnrichOptions {
        calendar: CalendarOptions::default()
            .with_variant(args.calendar.into())
            .with_range(min_date, max_date)
            .with_out_of_range(args.out_of_range.into()),
        years: YearWindow::new(args.from_year, args.to_year),
        translation: TranslationOptions {
            source_lang: args.source_lang.clone(),
            target_lang: args.target_lang.clone(),
            workers: args.workers,
            timeout_secs: args.translate_timeout_secs,
            retries: args.translate_retries,
            delay_ms: args.translate_delay_ms,
            offline: args.offline,
        },
        output: OutputOptions {
            write_bom: !args.no_bom,
            dry_run: args.dry_run,
        },
    })
}

fn static_labels(path: Option<&Path>) -> Result<StaticLabels> {
    let mut labels = StaticLabels::builtin();
    if let Some(path) = path {
        let json = fs::read_to_string(path)
            .with_context(|| format!("read translations {}", path.display()))?;
        let merged = labels
            .extend_from_json(&json)
            .with_context(|| format!("parse translations {}", path.display()))?;
        info!(path = %path.display(), merged, "translation overrides loaded");
    }
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::{Cli, Command};

    fn enrich_args(extra: &[&str]) -> EnrichArgs {
        let mut argv = vec!["donations", "enrich", "input.csv"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Enrich(args) => args,
            _ => panic!("expected enrich"),
        }
    }

    #[test]
    fn options_follow_flags() {
        let options = enrich_options(&enrich_args(&[
            "--calendar",
            "civil",
            "--out-of-range",
            "drop",
            "--from-year",
            "2020",
            "--no-bom",
            "--offline",
        ]))
        .unwrap();
        assert_eq!(options.calendar.variant, donation_model::CalendarVariant::Civil);
        assert_eq!(
            options.calendar.out_of_range,
            donation_model::OutOfRangePolicy::Drop
        );
        assert_eq!(options.years, YearWindow::new(Some(2020), None));
        assert!(!options.output.write_bom);
        assert!(options.translation.offline);
    }

    #[test]
    fn inverted_ranges_are_rejected() {
        assert!(
            enrich_options(&enrich_args(&[
                "--min-date",
                "2025-01-01",
                "--max-date",
                "2024-01-01"
            ]))
            .is_err()
        );
        assert!(
            enrich_options(&enrich_args(&["--from-year", "2025", "--to-year", "2024"])).is_err()
        );
        assert!(enrich_options(&enrich_args(&["--workers", "0"])).is_err());
    }

    #[test]
    fn translation_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.json");
        fs::write(&path, r#"{"وقف": "Endowment"}"#).unwrap();
        let labels = static_labels(Some(&path)).unwrap();
        assert_eq!(labels.get("وقف"), Some("Endowment"));

        fs::write(&path, "not json").unwrap();
        let error = static_labels(Some(&path)).unwrap_err();
        assert!(format!("{error:#}").contains("parse translations"));
    }
}
