//! CLI argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use donation_model::{CalendarVariant, OutOfRangePolicy};

#[derive(Parser)]
#[command(
    name = "donations",
    version,
    about = "Enrich donation records with Hijri dates, Ramadan periods and Islamic events",
    long_about = "Enrich donation records with calendar features.\n\n\
                  Adds Gregorian dimensions, the Hijri date, Ramadan period and Islamic\n\
                  event tags, and English category labels, then writes a processed CSV\n\
                  for analytics."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow donor identifiers in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Enrich a raw donation CSV and write the processed dataset.
    Enrich(EnrichArgs),

    /// Summarize the processed dataset, optionally filtered.
    Inspect(InspectArgs),

    /// List the Islamic event rules used for classification.
    Events,
}

#[derive(Parser)]
pub struct EnrichArgs {
    /// Raw donation CSV with id, donationdate, amount and donationtype columns.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file (default: <INPUT dir>/<stem>_Processed.csv).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Islamic calendar computation.
    #[arg(long = "calendar", value_enum, default_value = "umm-al-qura")]
    pub calendar: CalendarArg,

    /// Earliest date converted to Hijri (default: start of the supported tables).
    #[arg(long = "min-date", value_name = "YYYY-MM-DD")]
    pub min_date: Option<NaiveDate>,

    /// Latest date converted to Hijri (default: end of the supported tables).
    #[arg(long = "max-date", value_name = "YYYY-MM-DD")]
    pub max_date: Option<NaiveDate>,

    /// What to do with records outside the convertible range.
    #[arg(long = "out-of-range", value_enum, default_value = "flag")]
    pub out_of_range: OutOfRangeArg,

    /// Keep only donations from this year on.
    #[arg(long = "from-year", value_name = "YEAR")]
    pub from_year: Option<i32>,

    /// Keep only donations up to and including this year.
    #[arg(long = "to-year", value_name = "YEAR")]
    pub to_year: Option<i32>,

    /// Do not call the translation service; unknown labels stay as they are.
    #[arg(long = "offline")]
    pub offline: bool,

    /// JSON object of extra "source": "display" category labels.
    #[arg(long = "translations", value_name = "FILE")]
    pub translations: Option<PathBuf>,

    /// Language of the source category labels.
    #[arg(long = "source-lang", default_value = "ar")]
    pub source_lang: String,

    /// Language of the display labels.
    #[arg(long = "target-lang", default_value = "en")]
    pub target_lang: String,

    /// Concurrent translation calls.
    #[arg(long = "workers", default_value_t = 4)]
    pub workers: usize,

    /// Timeout per translation call, in seconds.
    #[arg(long = "translate-timeout-secs", default_value_t = 10)]
    pub translate_timeout_secs: u64,

    /// Extra attempts after a transient translation failure.
    #[arg(long = "translate-retries", default_value_t = 0)]
    pub translate_retries: u32,

    /// Pause after each translation call, in milliseconds.
    #[arg(long = "translate-delay-ms", default_value_t = 100)]
    pub translate_delay_ms: u64,

    /// Write the CSV without a UTF-8 byte-order mark.
    #[arg(long = "no-bom")]
    pub no_bom: bool,

    /// Run every stage and report, but do not write the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Processed dataset written by `enrich`.
    #[arg(
        long = "processed",
        value_name = "PATH",
        default_value = "data/General_Donation_Processed.csv"
    )]
    pub processed: PathBuf,

    /// Raw dataset used when the processed one is missing.
    #[arg(long = "raw", value_name = "PATH", default_value = "data/General_Donation.csv")]
    pub raw: PathBuf,

    /// First donation date to include.
    #[arg(long = "from", value_name = "YYYY-MM-DD")]
    pub from: Option<NaiveDate>,

    /// Last donation date to include.
    #[arg(long = "to", value_name = "YYYY-MM-DD")]
    pub to: Option<NaiveDate>,

    /// Display category to include (repeatable).
    #[arg(long = "category", value_name = "LABEL")]
    pub categories: Vec<String>,

    #[arg(long = "min-amount", value_name = "AMOUNT")]
    pub min_amount: Option<f64>,

    #[arg(long = "max-amount", value_name = "AMOUNT")]
    pub max_amount: Option<f64>,

    /// Only donations made during Ramadan.
    #[arg(long = "ramadan-only")]
    pub ramadan_only: bool,

    /// Number of categories listed.
    #[arg(long = "top", default_value_t = 10)]
    pub top: usize,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum CalendarArg {
    UmmAlQura,
    Civil,
}

impl From<CalendarArg> for CalendarVariant {
    fn from(arg: CalendarArg) -> Self {
        match arg {
            CalendarArg::UmmAlQura => CalendarVariant::UmmAlQura,
            CalendarArg::Civil => CalendarVariant::Civil,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutOfRangeArg {
    Flag,
    Drop,
}

impl From<OutOfRangeArg> for OutOfRangePolicy {
    fn from(arg: OutOfRangeArg) -> Self {
        match arg {
            OutOfRangeArg::Flag => OutOfRangePolicy::Flag,
            OutOfRangeArg::Drop => OutOfRangePolicy::Drop,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
