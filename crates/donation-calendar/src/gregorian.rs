//! Gregorian calendar dimensions.

use chrono::{Datelike, NaiveDateTime, Timelike};

use donation_model::GregorianParts;

/// Derive the Gregorian dimensions of a timestamp.
///
/// Weekday numbering starts at Monday = 0. The week is the ISO-8601 week
/// number, so the first days of January can belong to week 52 or 53 of the
/// previous ISO year and the last days of December to week 1.
pub fn gregorian_parts(timestamp: NaiveDateTime) -> GregorianParts {
    let date = timestamp.date();
    GregorianParts {
        year: date.year(),
        month: date.month(),
        quarter: (date.month() - 1) / 3 + 1,
        day: date.day(),
        weekday: date.weekday().num_days_from_monday(),
        week: date.iso_week().week(),
        hour: timestamp.hour(),
        date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, 30, 0)
            .unwrap()
    }

    #[test]
    fn quarters() {
        assert_eq!(gregorian_parts(at(2024, 1, 1, 0)).quarter, 1);
        assert_eq!(gregorian_parts(at(2024, 3, 31, 0)).quarter, 1);
        assert_eq!(gregorian_parts(at(2024, 4, 1, 0)).quarter, 2);
        assert_eq!(gregorian_parts(at(2024, 9, 30, 0)).quarter, 3);
        assert_eq!(gregorian_parts(at(2024, 12, 31, 0)).quarter, 4);
    }

    #[test]
    fn hour_is_kept() {
        assert_eq!(gregorian_parts(at(2024, 5, 5, 23)).hour, 23);
        assert_eq!(gregorian_parts(at(2024, 5, 5, 0)).hour, 0);
    }

    #[test]
    fn weekday_starts_on_monday() {
        let monday = gregorian_parts(at(2025, 3, 10, 12));
        assert_eq!(monday.weekday, 0);
        assert_eq!(monday.weekday_name(), "Monday");
        let sunday = gregorian_parts(at(2025, 3, 16, 12));
        assert_eq!(sunday.weekday, 6);
        assert_eq!(sunday.weekday_name(), "Sunday");
    }

    #[test]
    fn iso_weeks_around_new_year() {
        let first = gregorian_parts(at(2021, 1, 1, 9));
        assert_eq!((first.year, first.week, first.weekday), (2021, 53, 4));
        let last = gregorian_parts(at(2024, 12, 30, 9));
        assert_eq!((last.year, last.week), (2024, 1));
        assert_eq!(gregorian_parts(at(2025, 3, 10, 9)).week, 11);
    }
}
