//! Per-run category translation with a shared cache.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use donation_model::TranslationOptions;

use crate::error::{Result, TranslateError};
use crate::service::TranslationService;
use crate::static_labels::StaticLabels;

const DEFAULT_WORKERS: usize = 4;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(100);
/// Backoff doubles per attempt up to this many doublings.
const MAX_BACKOFF_SHIFT: u32 = 6;

/// Outcome of one [`CategoryTranslator::prepare`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslationReport {
    /// Distinct non-empty labels seen.
    pub distinct_labels: usize,
    /// Labels answered by the static table.
    pub static_hits: usize,
    /// Labels already cached by an earlier call.
    pub cached: usize,
    /// Labels translated by the service.
    pub translated: usize,
    /// Labels that kept their source form after a failed call.
    pub failed: usize,
}

impl TranslationReport {
    pub fn service_calls(&self) -> usize {
        self.translated + self.failed
    }
}

/// Maps source category labels to display labels.
///
/// Lookups go static table, then cache, then the label itself. Only
/// [`prepare`](Self::prepare) talks to the service and writes the cache.
pub struct CategoryTranslator<S> {
    service: S,
    labels: StaticLabels,
    cache: HashMap<String, String>,
    workers: usize,
    retries: u32,
    retry_delay: Duration,
}

impl<S: TranslationService> CategoryTranslator<S> {
    pub fn new(service: S, labels: StaticLabels) -> Self {
        Self {
            service,
            labels,
            cache: HashMap::new(),
            workers: DEFAULT_WORKERS,
            retries: 0,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    pub fn from_options(service: S, labels: StaticLabels, options: &TranslationOptions) -> Self {
        Self::new(service, labels)
            .with_workers(options.workers)
            .with_retries(options.retries)
            .with_retry_delay(Duration::from_millis(options.delay_ms))
    }

    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    #[must_use]
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Pause before the first retry; each further retry waits twice as long.
    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn static_labels(&self) -> &StaticLabels {
        &self.labels
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Translate every label not yet known, each exactly once.
    pub fn prepare<'a, I>(&mut self, labels: I) -> TranslationReport
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut report = TranslationReport::default();
        let mut seen = BTreeSet::new();
        let mut pending = Vec::new();
        for label in labels {
            if label.is_empty() || !seen.insert(label) {
                continue;
            }
            report.distinct_labels += 1;
            if self.labels.contains(label) {
                report.static_hits += 1;
            } else if self.cache.contains_key(label) {
                report.cached += 1;
            } else {
                pending.push(label.to_string());
            }
        }

        if !pending.is_empty() {
            debug!(pending = pending.len(), workers = self.workers, "translating labels");
            let outcomes = self.translate_all(&pending);
            for (label, outcome) in pending.into_iter().zip(outcomes) {
                match outcome {
                    Ok(translated) => {
                        report.translated += 1;
                        self.cache.insert(label, translated);
                    }
                    Err(error) => {
                        warn!(error = %error, "translation failed, keeping source label");
                        report.failed += 1;
                        self.cache.insert(label.clone(), label);
                    }
                }
            }
        }

        info!(
            distinct = report.distinct_labels,
            static_hits = report.static_hits,
            cached = report.cached,
            translated = report.translated,
            failed = report.failed,
            "category labels prepared"
        );
        report
    }

    /// Display label for `label`. Never calls the service.
    pub fn label_for<'a>(&'a self, label: &'a str) -> &'a str {
        if label.is_empty() {
            return label;
        }
        self.labels
            .get(label)
            .or_else(|| self.cache.get(label).map(String::as_str))
            .unwrap_or(label)
    }

    /// Results come back in `pending` order.
    fn translate_all(&self, pending: &[String]) -> Vec<Result<String>> {
        let workers = self.workers.clamp(1, pending.len());
        let next = AtomicUsize::new(0);
        let (sender, receiver) = mpsc::channel();
        thread::scope(|scope| {
            for _ in 0..workers {
                let sender = sender.clone();
                let next = &next;
                scope.spawn(move || {
                    loop {
                        let index = next.fetch_add(1, Ordering::Relaxed);
                        let Some(label) = pending.get(index) else {
                            break;
                        };
                        if sender.send((index, self.translate_one(label))).is_err() {
                            break;
                        }
                    }
                });
            }
        });
        drop(sender);

        let mut outcomes: Vec<Option<Result<String>>> = pending.iter().map(|_| None).collect();
        for (index, outcome) in receiver {
            outcomes[index] = Some(outcome);
        }
        outcomes
            .into_iter()
            .map(|outcome| outcome.unwrap_or(Err(TranslateError::Unavailable)))
            .collect()
    }

    fn backoff(&self, attempt: u32) -> Duration {
        self.retry_delay
            .saturating_mul(1 << attempt.min(MAX_BACKOFF_SHIFT))
    }

    fn translate_one(&self, label: &str) -> Result<String> {
        let mut attempt = 0;
        loop {
            let outcome = self.service.translate(label).and_then(|translated| {
                if translated.trim().is_empty() {
                    Err(TranslateError::Malformed("empty translation".to_string()))
                } else {
                    Ok(translated)
                }
            });
            match outcome {
                Err(error) if attempt < self.retries && error.is_retryable() => {
                    let backoff = self.backoff(attempt);
                    attempt += 1;
                    debug!(
                        attempt,
                        backoff_ms = backoff.as_millis(),
                        error = %error,
                        "retrying translation"
                    );
                    thread::sleep(backoff);
                }
                other => return other,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::OfflineTranslator;

    #[test]
    fn empty_label_maps_to_empty() {
        let mut translator = CategoryTranslator::new(OfflineTranslator, StaticLabels::builtin());
        let report = translator.prepare(["", ""]);
        assert_eq!(report.distinct_labels, 0);
        assert_eq!(translator.label_for(""), "");
    }

    #[test]
    fn offline_keeps_unknown_labels() {
        let mut translator = CategoryTranslator::new(OfflineTranslator, StaticLabels::builtin());
        let report = translator.prepare(["وقف", "سقيا الماء"]);
        assert_eq!(report.static_hits, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(translator.label_for("وقف"), "وقف");
        assert_eq!(translator.label_for("سقيا الماء"), "Water Supply");
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        let translator = CategoryTranslator::new(OfflineTranslator, StaticLabels::default())
            .with_retry_delay(Duration::from_millis(100));
        assert_eq!(translator.backoff(0), Duration::from_millis(100));
        assert_eq!(translator.backoff(1), Duration::from_millis(200));
        assert_eq!(translator.backoff(2), Duration::from_millis(400));
        assert_eq!(translator.backoff(40), Duration::from_millis(6_400));
    }

    #[test]
    fn unprepared_labels_fall_back_to_themselves() {
        let translator = CategoryTranslator::new(OfflineTranslator, StaticLabels::default());
        assert_eq!(translator.label_for("غير معروف"), "غير معروف");
        assert_eq!(translator.cached_len(), 0);
    }
}
