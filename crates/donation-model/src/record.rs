//! Donation records before and after enrichment.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::enums::{IslamicEvent, RAMADAN_MONTH, RamadanPeriod, hijri_month_name};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// A validated source row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Donor or record identifier, as given by the source.
    pub id: String,
    /// Non-negative donation amount.
    pub amount: f64,
    /// Local wall-clock timestamp of the donation.
    pub donated_at: NaiveDateTime,
    /// Source-language category label (may be empty).
    pub category: String,
}

/// Gregorian calendar dimensions of a timestamp.
///
/// `weekday` counts from Monday = 0; `week` is the ISO-8601 week number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GregorianParts {
    pub year: i32,
    pub month: u32,
    pub quarter: u32,
    pub day: u32,
    pub weekday: u32,
    pub week: u32,
    pub hour: u32,
    pub date: NaiveDate,
}

impl GregorianParts {
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES
            .get(self.month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or("Unknown")
    }

    pub fn weekday_name(&self) -> &'static str {
        WEEKDAY_NAMES
            .get(self.weekday as usize)
            .copied()
            .unwrap_or("Unknown")
    }
}

/// A date in the Hijri calendar together with the length of its month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HijriDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Days in this Hijri month (29 or 30).
    pub month_length: u32,
}

impl HijriDate {
    pub fn new(year: i32, month: u32, day: u32, month_length: u32) -> Self {
        Self {
            year,
            month,
            day,
            month_length,
        }
    }

    pub fn month_name(&self) -> &'static str {
        hijri_month_name(self.month).unwrap_or("Unknown")
    }

    pub fn is_ramadan(&self) -> bool {
        self.month == RAMADAN_MONTH
    }

    /// Month in 1..=12, month length 29 or 30, day within the month.
    pub fn is_valid(&self) -> bool {
        (1..=12).contains(&self.month)
            && (29..=30).contains(&self.month_length)
            && (1..=self.month_length).contains(&self.day)
    }
}

/// Ramadan membership and event tag for one Hijri date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventClassification {
    pub is_ramadan: bool,
    pub ramadan_period: Option<RamadanPeriod>,
    pub islamic_event: Option<IslamicEvent>,
}

/// A source record with every derived dimension attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub raw: RawRecord,
    pub gregorian: GregorianParts,
    /// `None` when the date was outside the supported Hijri range.
    pub hijri: Option<HijriDate>,
    pub classification: EventClassification,
    /// Display form of `raw.category`.
    pub category_en: String,
}

impl EnrichedRecord {
    pub fn is_ramadan(&self) -> bool {
        self.classification.is_ramadan
    }

    pub fn ramadan_period(&self) -> Option<RamadanPeriod> {
        self.classification.ramadan_period
    }

    pub fn islamic_event(&self) -> Option<IslamicEvent> {
        self.classification.islamic_event
    }
}
