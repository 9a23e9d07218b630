use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("date {date} is outside the supported Hijri range {min}..={max}")]
    OutOfRange {
        date: NaiveDate,
        min: NaiveDate,
        max: NaiveDate,
    },
    #[error("hijri conversion failed for {date}: {message}")]
    Conversion { date: NaiveDate, message: String },
    #[error("converter produced an invalid hijri date for {date}: {year}-{month}-{day} ({month_length} days)")]
    InvalidHijriDate {
        date: NaiveDate,
        year: i32,
        month: u32,
        day: u32,
        month_length: u32,
    },
}

/// Problems found while building an event rule table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleTableError {
    #[error("rule {index}: month {month} is not a Hijri month")]
    InvalidMonth { index: usize, month: u32 },
    #[error("rule {index}: day span {first}..={last} is outside 1..=30")]
    InvalidSpan { index: usize, first: u32, last: u32 },
    #[error("rule {index}: event {event} falls inside Ramadan, which takes precedence")]
    EventInsideRamadan { index: usize, event: String },
    #[error("Ramadan day {day} is not covered by any period rule")]
    RamadanGap { day: u32 },
    #[error("Ramadan day {day} is covered by more than one period rule")]
    RamadanOverlap { day: u32 },
}

pub type Result<T> = std::result::Result<T, CalendarError>;
