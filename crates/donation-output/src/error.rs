use std::path::PathBuf;

use thiserror::Error;

use donation_ingest::IngestError;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("csv {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{}: missing column `{column}`", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },
    #[error("{}:{line}: invalid `{column}` value: {message}", path.display())]
    InvalidValue {
        path: PathBuf,
        line: u64,
        column: &'static str,
        message: String,
    },
    #[error(
        "no dataset found: neither {} nor {} exists",
        processed.display(),
        raw.display()
    )]
    NoDataset { processed: PathBuf, raw: PathBuf },
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error("summary aggregation failed: {0}")]
    Frame(#[from] polars::error::PolarsError),
}

pub type Result<T> = std::result::Result<T, OutputError>;
