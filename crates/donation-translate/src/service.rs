//! The translation service seam.

use crate::error::{Result, TranslateError};

/// Translates one source-language label into the display language.
pub trait TranslationService: Send + Sync {
    fn translate(&self, text: &str) -> Result<String>;
}

impl<T: TranslationService + ?Sized> TranslationService for &T {
    fn translate(&self, text: &str) -> Result<String> {
        (**self).translate(text)
    }
}

impl<T: TranslationService + ?Sized> TranslationService for Box<T> {
    fn translate(&self, text: &str) -> Result<String> {
        (**self).translate(text)
    }
}

/// A service that is never reachable; every label falls back to itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineTranslator;

impl TranslationService for OfflineTranslator {
    fn translate(&self, _text: &str) -> Result<String> {
        Err(TranslateError::Unavailable)
    }
}
