//! Translation of donation category labels into a display language.

pub mod error;
pub mod google;
pub mod service;
pub mod static_labels;
pub mod translator;

pub use error::{Result, TranslateError};
pub use google::{GoogleTranslateClient, parse_response};
pub use service::{OfflineTranslator, TranslationService};
pub use static_labels::{BUILTIN_LABELS, StaticLabels};
pub use translator::{CategoryTranslator, TranslationReport};
