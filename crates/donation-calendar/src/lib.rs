//! Calendar enrichment: Gregorian dimensions, Hijri conversion and Islamic
//! event classification.

pub mod enricher;
pub mod error;
pub mod events;
pub mod gregorian;
pub mod hijri;

pub use enricher::{CalendarAnnotation, CalendarEnricher};
pub use error::{CalendarError, Result, RuleTableError};
pub use events::{DaySpan, EventRule, EventRuleTable};
pub use gregorian::gregorian_parts;
pub use hijri::{HijriConverter, IcuHijriConverter, RangeCheckedConverter, converter_for};
