//! Type-safe enumerations for calendar tags and pipeline policies.
//!
//! Each enum carries the display label written to the enriched dataset
//! (`as_str`) and parses back from it (`FromStr`), so the writer and the
//! display-layer reader agree on one spelling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical Hijri month names, indexed by `month - 1`.
pub const HIJRI_MONTH_NAMES: [&str; 12] = [
    "Muharram",
    "Safar",
    "Rabi al-Awwal",
    "Rabi al-Thani",
    "Jumada al-Awwal",
    "Jumada al-Thani",
    "Rajab",
    "Shaban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qadah",
    "Dhu al-Hijjah",
];

/// Hijri month number of Ramadan.
pub const RAMADAN_MONTH: u32 = 9;

/// Returns the canonical name of a Hijri month (1-12).
pub fn hijri_month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    HIJRI_MONTH_NAMES.get(index).copied()
}

/// Ten-day segment of Ramadan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RamadanPeriod {
    /// Days 1-10.
    First10,
    /// Days 11-20.
    Middle10,
    /// Day 21 through the last day of the month (29 or 30).
    Last10,
}

impl RamadanPeriod {
    pub const ALL: [RamadanPeriod; 3] = [
        RamadanPeriod::First10,
        RamadanPeriod::Middle10,
        RamadanPeriod::Last10,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RamadanPeriod::First10 => "First 10 Days",
            RamadanPeriod::Middle10 => "Middle 10 Days",
            RamadanPeriod::Last10 => "Last 10 Days",
        }
    }
}

impl fmt::Display for RamadanPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RamadanPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        match normalized.as_str() {
            "FIRST 10 DAYS" | "FIRST10" => Ok(RamadanPeriod::First10),
            "MIDDLE 10 DAYS" | "MIDDLE10" => Ok(RamadanPeriod::Middle10),
            "LAST 10 DAYS" | "LAST10" => Ok(RamadanPeriod::Last10),
            _ => Err(format!("Unknown Ramadan period: {s}")),
        }
    }
}

/// Named Islamic event derived from a Hijri (month, day) window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[non_exhaustive]
pub enum IslamicEvent {
    /// 1-3 Shawwal.
    EidAlFitr,
    /// 10 Dhu al-Hijjah.
    EidAlAdha,
    /// 8-13 Dhu al-Hijjah, excluding the day of Eid al-Adha.
    Hajj,
    /// 10 Muharram.
    Ashura,
    /// 12 Rabi al-Awwal.
    Mawlid,
}

impl IslamicEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            IslamicEvent::EidAlFitr => "Eid al-Fitr",
            IslamicEvent::EidAlAdha => "Eid al-Adha",
            IslamicEvent::Hajj => "Hajj",
            IslamicEvent::Ashura => "Day of Ashura",
            IslamicEvent::Mawlid => "Mawlid al-Nabi",
        }
    }
}

impl fmt::Display for IslamicEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IslamicEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        match normalized.as_str() {
            "EID AL-FITR" | "EIDALFITR" => Ok(IslamicEvent::EidAlFitr),
            "EID AL-ADHA" | "EIDALADHA" => Ok(IslamicEvent::EidAlAdha),
            "HAJJ" => Ok(IslamicEvent::Hajj),
            "DAY OF ASHURA" | "ASHURA" => Ok(IslamicEvent::Ashura),
            "MAWLID AL-NABI" | "MAWLID" => Ok(IslamicEvent::Mawlid),
            _ => Err(format!("Unknown Islamic event: {s}")),
        }
    }
}

/// Which Islamic calendar computation backs the Hijri converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CalendarVariant {
    /// Saudi Umm al-Qura tables.
    #[default]
    UmmAlQura,
    /// Arithmetical (tabular) civil calendar.
    Civil,
}

impl CalendarVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalendarVariant::UmmAlQura => "umm-al-qura",
            CalendarVariant::Civil => "civil",
        }
    }
}

impl fmt::Display for CalendarVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What happens to a record whose date falls outside the supported Hijri range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutOfRangePolicy {
    /// Keep the record with empty Hijri columns.
    #[default]
    Flag,
    /// Exclude the record from the enriched output.
    Drop,
}
