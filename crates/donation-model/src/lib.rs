pub mod columns;
pub mod enums;
pub mod options;
pub mod record;

pub use enums::{
    CalendarVariant, HIJRI_MONTH_NAMES, IslamicEvent, OutOfRangePolicy, RAMADAN_MONTH,
    RamadanPeriod, hijri_month_name,
};
pub use options::{
    CalendarOptions, EnrichOptions, OutputOptions, SUPPORTED_MAX_DATE, SUPPORTED_MIN_DATE,
    TranslationOptions, YearWindow,
};
pub use record::{EnrichedRecord, EventClassification, GregorianParts, HijriDate, RawRecord};
