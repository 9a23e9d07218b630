//! Ramadan and Islamic event classification.
//!
//! Classification is a lookup over an ordered list of tagged rules. Rules are
//! evaluated top to bottom and the first match wins, so the order of the
//! table *is* the precedence:
//!
//! | # | Hijri window                  | Result                       |
//! |---|-------------------------------|------------------------------|
//! | 1 | Ramadan 1-10                  | Ramadan, First 10 Days       |
//! | 2 | Ramadan 11-20                 | Ramadan, Middle 10 Days      |
//! | 3 | Ramadan 21 to end of month    | Ramadan, Last 10 Days        |
//! | 4 | Shawwal 1-3                   | Eid al-Fitr                  |
//! | 5 | Dhu al-Hijjah 10              | Eid al-Adha                  |
//! | 6 | Dhu al-Hijjah 8-13            | Hajj                         |
//! | 7 | Muharram 10                   | Day of Ashura                |
//! | 8 | Rabi al-Awwal 12              | Mawlid al-Nabi               |
//!
//! The Ramadan period rules always come first and must partition the whole
//! month; an event rule inside Ramadan is rejected when the table is built.
//! "End of month" is the converter-reported month length, never 30.

use donation_model::{
    EventClassification, HijriDate, IslamicEvent, RAMADAN_MONTH, RamadanPeriod, hijri_month_name,
};

use crate::error::RuleTableError;

/// Longest possible Hijri month.
const MAX_MONTH_LENGTH: u32 = 30;

/// Inclusive range of days within a Hijri month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySpan {
    /// A single day.
    On(u32),
    /// `first..=last`.
    Between(u32, u32),
    /// `first` through the last day of the month.
    FromDay(u32),
}

impl DaySpan {
    pub fn contains(&self, day: u32, month_length: u32) -> bool {
        match *self {
            DaySpan::On(only) => day == only,
            DaySpan::Between(first, last) => (first..=last).contains(&day),
            DaySpan::FromDay(first) => (first..=month_length).contains(&day),
        }
    }

    fn bounds(&self) -> (u32, u32) {
        match *self {
            DaySpan::On(only) => (only, only),
            DaySpan::Between(first, last) => (first, last),
            DaySpan::FromDay(first) => (first, MAX_MONTH_LENGTH),
        }
    }

    pub fn describe(&self) -> String {
        match *self {
            DaySpan::On(only) => only.to_string(),
            DaySpan::Between(first, last) => format!("{first}-{last}"),
            DaySpan::FromDay(first) => format!("{first}-end"),
        }
    }
}

/// One row of the classification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventRule {
    /// A segment of Ramadan.
    Ramadan { days: DaySpan, period: RamadanPeriod },
    /// A named event in some other month.
    Event {
        month: u32,
        days: DaySpan,
        event: IslamicEvent,
    },
}

impl EventRule {
    pub fn month(&self) -> u32 {
        match self {
            EventRule::Ramadan { .. } => RAMADAN_MONTH,
            EventRule::Event { month, .. } => *month,
        }
    }

    pub fn days(&self) -> DaySpan {
        match self {
            EventRule::Ramadan { days, .. } | EventRule::Event { days, .. } => *days,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventRule::Ramadan { period, .. } => period.as_str(),
            EventRule::Event { event, .. } => event.as_str(),
        }
    }

    pub fn month_name(&self) -> &'static str {
        hijri_month_name(self.month()).unwrap_or("Unknown")
    }

    pub fn matches(&self, date: &HijriDate) -> bool {
        date.month == self.month() && self.days().contains(date.day, date.month_length)
    }
}

/// Ordered, validated list of classification rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRuleTable {
    rules: Vec<EventRule>,
}

impl Default for EventRuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl EventRuleTable {
    /// The standard table.
    pub fn standard() -> Self {
        Self {
            rules: vec![
                EventRule::Ramadan {
                    days: DaySpan::Between(1, 10),
                    period: RamadanPeriod::First10,
                },
                EventRule::Ramadan {
                    days: DaySpan::Between(11, 20),
                    period: RamadanPeriod::Middle10,
                },
                EventRule::Ramadan {
                    days: DaySpan::FromDay(21),
                    period: RamadanPeriod::Last10,
                },
                EventRule::Event {
                    month: 10,
                    days: DaySpan::Between(1, 3),
                    event: IslamicEvent::EidAlFitr,
                },
                EventRule::Event {
                    month: 12,
                    days: DaySpan::On(10),
                    event: IslamicEvent::EidAlAdha,
                },
                EventRule::Event {
                    month: 12,
                    days: DaySpan::Between(8, 13),
                    event: IslamicEvent::Hajj,
                },
                EventRule::Event {
                    month: 1,
                    days: DaySpan::On(10),
                    event: IslamicEvent::Ashura,
                },
                EventRule::Event {
                    month: 3,
                    days: DaySpan::On(12),
                    event: IslamicEvent::Mawlid,
                },
            ],
        }
    }

    /// Build a custom table, checking it the same way the standard one is.
    pub fn new(rules: Vec<EventRule>) -> Result<Self, RuleTableError> {
        validate(&rules)?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[EventRule] {
        &self.rules
    }

    /// Classify a Hijri date. `is_ramadan` depends on the month alone.
    pub fn classify(&self, date: &HijriDate) -> EventClassification {
        let mut classification = EventClassification {
            is_ramadan: date.is_ramadan(),
            ..EventClassification::default()
        };
        match self.rules.iter().find(|rule| rule.matches(date)) {
            Some(EventRule::Ramadan { period, .. }) => {
                classification.ramadan_period = Some(*period);
            }
            Some(EventRule::Event { event, .. }) => {
                classification.islamic_event = Some(*event);
            }
            None => {}
        }
        classification
    }
}

fn validate(rules: &[EventRule]) -> Result<(), RuleTableError> {
    let mut coverage = [0u8; MAX_MONTH_LENGTH as usize];
    for (index, rule) in rules.iter().enumerate() {
        let month = rule.month();
        if !(1..=12).contains(&month) {
            return Err(RuleTableError::InvalidMonth { index, month });
        }
        let (first, last) = rule.days().bounds();
        if first == 0 || first > last || last > MAX_MONTH_LENGTH {
            return Err(RuleTableError::InvalidSpan { index, first, last });
        }
        match rule {
            EventRule::Ramadan { .. } => {
                for day in first..=last {
                    coverage[(day - 1) as usize] += 1;
                }
            }
            EventRule::Event { event, .. } if month == RAMADAN_MONTH => {
                return Err(RuleTableError::EventInsideRamadan {
                    index,
                    event: event.as_str().to_string(),
                });
            }
            EventRule::Event { .. } => {}
        }
    }
    for (offset, count) in coverage.iter().enumerate() {
        let day = offset as u32 + 1;
        match *count {
            0 => return Err(RuleTableError::RamadanGap { day }),
            1 => {}
            _ => return Err(RuleTableError::RamadanOverlap { day }),
        }
    }
    Ok(())
}
