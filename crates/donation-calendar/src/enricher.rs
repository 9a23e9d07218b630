use chrono::NaiveDate;

use donation_model::{EventClassification, HijriDate};

use crate::error::Result;
use crate::events::EventRuleTable;
use crate::hijri::HijriConverter;

/// Hijri date and classification of one Gregorian date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarAnnotation {
    pub hijri: HijriDate,
    pub classification: EventClassification,
}

/// Pairs a converter with a rule table.
///
/// A date the converter rejects (for example one outside the supported
/// range) never reaches the classifier.
#[derive(Debug, Clone)]
pub struct CalendarEnricher<C> {
    converter: C,
    rules: EventRuleTable,
}

impl<C: HijriConverter> CalendarEnricher<C> {
    pub fn new(converter: C) -> Self {
        Self {
            converter,
            rules: EventRuleTable::standard(),
        }
    }

    #[must_use]
    pub fn with_rules(mut self, rules: EventRuleTable) -> Self {
        self.rules = rules;
        self
    }

    pub fn rules(&self) -> &EventRuleTable {
        &self.rules
    }

    pub fn annotate(&self, date: NaiveDate) -> Result<CalendarAnnotation> {
        let hijri = self.converter.to_hijri(date)?;
        Ok(CalendarAnnotation {
            hijri,
            classification: self.rules.classify(&hijri),
        })
    }
}
