//! Column names for the raw input and the enriched dataset.
//!
//! These names are the contract with the display layer and must stay stable
//! across runs.

pub const ID: &str = "id";
pub const DONATION_DATE: &str = "donationdate";
pub const AMOUNT: &str = "amount";
pub const CATEGORY: &str = "donationtype";
pub const CATEGORY_EN: &str = "donationtype_en";
pub const YEAR: &str = "year";
pub const MONTH: &str = "month";
pub const MONTH_NAME: &str = "month_name";
pub const QUARTER: &str = "quarter";
pub const DAY: &str = "day";
pub const WEEKDAY: &str = "weekday";
pub const WEEKDAY_NAME: &str = "weekday_name";
pub const WEEK: &str = "week";
pub const HOUR: &str = "hour";
pub const DATE: &str = "date";
pub const HIJRI_YEAR: &str = "hijri_year";
pub const HIJRI_MONTH: &str = "hijri_month";
pub const HIJRI_DAY: &str = "hijri_day";
pub const HIJRI_MONTH_NAME: &str = "hijri_month_name";
pub const HIJRI_MONTH_LENGTH: &str = "hijri_month_length";
pub const IS_RAMADAN: &str = "is_ramadan";
pub const RAMADAN_PERIOD: &str = "ramadan_period";
pub const ISLAMIC_EVENT: &str = "islamic_event";

/// Columns every raw input file must provide.
pub const RAW_COLUMNS: [&str; 4] = [ID, DONATION_DATE, AMOUNT, CATEGORY];

/// Output column order of the enriched dataset.
pub const ENRICHED_COLUMNS: [&str; 23] = [
    ID,
    DONATION_DATE,
    AMOUNT,
    CATEGORY,
    CATEGORY_EN,
    YEAR,
    MONTH,
    MONTH_NAME,
    QUARTER,
    DAY,
    WEEKDAY,
    WEEKDAY_NAME,
    WEEK,
    HOUR,
    DATE,
    HIJRI_YEAR,
    HIJRI_MONTH,
    HIJRI_DAY,
    HIJRI_MONTH_NAME,
    HIJRI_MONTH_LENGTH,
    IS_RAMADAN,
    RAMADAN_PERIOD,
    ISLAMIC_EVENT,
];

/// Timestamp layout of `donationdate` in the enriched dataset.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `donationdate` layout for timestamps with a sub-second part.
pub const FRACTIONAL_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Layout of `date` in the enriched dataset.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
