//! Parsing of source timestamps and amounts.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: [&str; 7] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse a source timestamp into local wall-clock time.
///
/// An explicit UTC offset is discarded; the wall-clock reading is kept as is.
/// A bare date is taken as midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed);
        }
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.naive_local());
    }
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(value, format) {
            return parsed.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Why an amount cell was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountError {
    NotNumeric,
    Negative,
}

/// Parse a donation amount. Must be finite and non-negative.
pub fn parse_amount(raw: &str) -> Result<f64, AmountError> {
    let value: f64 = raw.trim().parse().map_err(|_| AmountError::NotNumeric)?;
    if !value.is_finite() {
        return Err(AmountError::NotNumeric);
    }
    if value < 0.0 {
        return Err(AmountError::Negative);
    }
    // Normalizes -0.0.
    Ok(value + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn parses_supported_layouts() {
        let expected = at(2024, 3, 11, 20, 5, 9);
        assert_eq!(parse_timestamp("2024-03-11 20:05:09"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-11T20:05:09"), Some(expected));
        assert_eq!(parse_timestamp(" 2024-03-11 20:05:09 "), Some(expected));
        assert_eq!(parse_timestamp("2024/03/11 20:05:09"), Some(expected));
        assert_eq!(parse_timestamp("03/11/2024 20:05:09"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-11T20:05:09+04:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-03-11 20:05"),
            Some(at(2024, 3, 11, 20, 5, 0))
        );
        assert_eq!(parse_timestamp("2024-03-11"), Some(at(2024, 3, 11, 0, 0, 0)));
    }

    #[test]
    fn keeps_fractional_seconds() {
        let parsed = parse_timestamp("2024-03-11 20:05:09.250").unwrap();
        assert_eq!(parsed.and_utc().timestamp_subsec_millis(), 250);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2024-13-01 00:00:00"), None);
        assert_eq!(parse_timestamp("2023-02-29"), None);
    }

    #[test]
    fn amounts() {
        assert_eq!(parse_amount("150"), Ok(150.0));
        assert_eq!(parse_amount(" 12.5 "), Ok(12.5));
        assert_eq!(parse_amount("0"), Ok(0.0));
        assert!(parse_amount("-0").unwrap().is_sign_positive());
        assert_eq!(parse_amount("-5"), Err(AmountError::Negative));
        assert_eq!(parse_amount("abc"), Err(AmountError::NotNumeric));
        assert_eq!(parse_amount(""), Err(AmountError::NotNumeric));
        assert_eq!(parse_amount("NaN"), Err(AmountError::NotNumeric));
        assert_eq!(parse_amount("inf"), Err(AmountError::NotNumeric));
    }
}
