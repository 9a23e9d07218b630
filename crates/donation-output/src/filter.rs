//! Record filters for the display layer.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use donation_model::EnrichedRecord;

/// Conjunction of optional constraints; an empty filter keeps every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    /// Inclusive bounds on the donation date.
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    /// Display labels to keep; empty keeps all.
    pub categories: BTreeSet<String>,
    /// Inclusive bounds on the amount.
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub ramadan_only: bool,
}

impl RecordFilter {
    #[must_use]
    pub fn with_dates(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_amounts(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_amount = min;
        self.max_amount = max;
        self
    }

    #[must_use]
    pub fn ramadan_only(mut self, enabled: bool) -> Self {
        self.ramadan_only = enabled;
        self
    }

    pub fn matches(&self, record: &EnrichedRecord) -> bool {
        let date = record.gregorian.date;
        let amount = record.raw.amount;
        self.from.is_none_or(|from| date >= from)
            && self.to.is_none_or(|to| date <= to)
            && (self.categories.is_empty() || self.categories.contains(&record.category_en))
            && self.min_amount.is_none_or(|min| amount >= min)
            && self.max_amount.is_none_or(|max| amount <= max)
            && (!self.ramadan_only || record.is_ramadan())
    }

    pub fn apply<'a>(&self, records: &'a [EnrichedRecord]) -> Vec<&'a EnrichedRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use donation_calendar::gregorian_parts;
    use donation_model::{EventClassification, RawRecord};

    fn record(day: u32, amount: f64, category: &str, is_ramadan: bool) -> EnrichedRecord {
        let donated_at = NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        EnrichedRecord {
            raw: RawRecord {
                id: day.to_string(),
                amount,
                donated_at,
                category: category.to_string(),
            },
            gregorian: gregorian_parts(donated_at),
            hijri: None,
            classification: EventClassification {
                is_ramadan,
                ..EventClassification::default()
            },
            category_en: category.to_string(),
        }
    }

    fn ids(records: &[&EnrichedRecord]) -> Vec<String> {
        records.iter().map(|record| record.raw.id.clone()).collect()
    }

    fn sample() -> Vec<EnrichedRecord> {
        vec![
            record(1, 10.0, "Water Supply", true),
            record(5, 50.0, "Zakat", true),
            record(20, 100.0, "Water Supply", false),
        ]
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let records = sample();
        assert_eq!(RecordFilter::default().apply(&records).len(), 3);
    }

    #[test]
    fn date_and_amount_bounds_are_inclusive() {
        let records = sample();
        let dates = RecordFilter::default().with_dates(
            NaiveDate::from_ymd_opt(2025, 3, 5),
            NaiveDate::from_ymd_opt(2025, 3, 20),
        );
        assert_eq!(ids(&dates.apply(&records)), ["5", "20"]);

        let amounts = RecordFilter::default().with_amounts(Some(10.0), Some(50.0));
        assert_eq!(ids(&amounts.apply(&records)), ["1", "5"]);
    }

    #[test]
    fn categories_and_ramadan_combine() {
        let records = sample();
        let filter = RecordFilter::default()
            .with_categories(["Water Supply"])
            .ramadan_only(true);
        assert_eq!(ids(&filter.apply(&records)), ["1"]);
    }
}
