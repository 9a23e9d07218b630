//! Gregorian to Hijri conversion.
//!
//! The calendar arithmetic itself is delegated to `icu_calendar`; this module
//! only invokes it consistently, reports the true month length alongside the
//! day, and enforces the supported date range before anything downstream sees
//! the result.

use chrono::{Datelike, NaiveDate};
use icu_calendar::{AnyCalendar, AnyCalendarKind, Date, Iso};
use tracing::{trace, warn};

use donation_model::{CalendarOptions, CalendarVariant, HijriDate};

use crate::error::{CalendarError, Result};

/// Converts a Gregorian date to its Hijri counterpart.
///
/// Implementations must be deterministic: the same date always yields the same
/// Hijri date, and the reported day never exceeds `month_length`.
pub trait HijriConverter: Send + Sync {
    fn to_hijri(&self, date: NaiveDate) -> Result<HijriDate>;
}

impl<T: HijriConverter + ?Sized> HijriConverter for &T {
    fn to_hijri(&self, date: NaiveDate) -> Result<HijriDate> {
        (**self).to_hijri(date)
    }
}

impl<T: HijriConverter + ?Sized> HijriConverter for Box<T> {
    fn to_hijri(&self, date: NaiveDate) -> Result<HijriDate> {
        (**self).to_hijri(date)
    }
}

/// Hijri converter backed by the ICU4X Hijri calendars: the published
/// Umm al-Qura tables, or the tabular civil calendar (type II leap years,
/// Friday epoch).
#[derive(Debug, Clone, Copy, Default)]
pub struct IcuHijriConverter {
    variant: CalendarVariant,
}

impl IcuHijriConverter {
    pub fn new(variant: CalendarVariant) -> Self {
        Self { variant }
    }

    pub fn variant(&self) -> CalendarVariant {
        self.variant
    }

    fn calendar(&self) -> AnyCalendar {
        match self.variant {
            CalendarVariant::UmmAlQura => AnyCalendar::new(AnyCalendarKind::HijriUmmAlQura),
            CalendarVariant::Civil => AnyCalendar::new(AnyCalendarKind::HijriTabularTypeIIFriday),
        }
    }
}

impl HijriConverter for IcuHijriConverter {
    fn to_hijri(&self, date: NaiveDate) -> Result<HijriDate> {
        let converted = iso_date(date)?.to_calendar(self.calendar());
        Ok(HijriDate::new(
            converted.year().era_year_or_related_iso(),
            u32::from(converted.month().ordinal),
            u32::from(converted.day_of_month().0),
            u32::from(converted.days_in_month()),
        ))
    }
}

fn iso_date(date: NaiveDate) -> Result<Date<Iso>> {
    let conversion = |message: String| CalendarError::Conversion { date, message };
    let month = u8::try_from(date.month()).map_err(|e| conversion(e.to_string()))?;
    let day = u8::try_from(date.day()).map_err(|e| conversion(e.to_string()))?;
    Date::try_new_iso(date.year(), month, day).map_err(|e| conversion(e.to_string()))
}

/// Restricts a converter to a supported Gregorian range and rejects any
/// Hijri date it produces that is not a real day of its month.
#[derive(Debug, Clone)]
pub struct RangeCheckedConverter<C> {
    inner: C,
    min: NaiveDate,
    max: NaiveDate,
}

impl<C: HijriConverter> RangeCheckedConverter<C> {
    pub fn new(inner: C, min: NaiveDate, max: NaiveDate) -> Self {
        Self { inner, min, max }
    }

    pub fn min_date(&self) -> NaiveDate {
        self.min
    }

    pub fn max_date(&self) -> NaiveDate {
        self.max
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.min..=self.max).contains(&date)
    }
}

impl<C: HijriConverter> HijriConverter for RangeCheckedConverter<C> {
    fn to_hijri(&self, date: NaiveDate) -> Result<HijriDate> {
        if !self.contains(date) {
            trace!(%date, min = %self.min, max = %self.max, "date outside hijri range");
            return Err(CalendarError::OutOfRange {
                date,
                min: self.min,
                max: self.max,
            });
        }
        let hijri = self.inner.to_hijri(date)?;
        if !hijri.is_valid() {
            warn!(
                %date,
                year = hijri.year,
                month = hijri.month,
                day = hijri.day,
                month_length = hijri.month_length,
                "converter produced an invalid hijri date"
            );
            return Err(CalendarError::InvalidHijriDate {
                date,
                year: hijri.year,
                month: hijri.month,
                day: hijri.day,
                month_length: hijri.month_length,
            });
        }
        Ok(hijri)
    }
}

/// Build the converter described by the calendar options.
pub fn converter_for(options: &CalendarOptions) -> RangeCheckedConverter<IcuHijriConverter> {
    RangeCheckedConverter::new(
        IcuHijriConverter::new(options.variant),
        options.min_date,
        options.max_date,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    struct Fixed(HijriDate);

    impl HijriConverter for Fixed {
        fn to_hijri(&self, _date: NaiveDate) -> Result<HijriDate> {
            Ok(self.0)
        }
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let converter = RangeCheckedConverter::new(
            Fixed(HijriDate::new(1446, 1, 1, 30)),
            date(2020, 1, 1),
            date(2020, 12, 31),
        );
        assert!(converter.to_hijri(date(2020, 1, 1)).is_ok());
        assert!(converter.to_hijri(date(2020, 12, 31)).is_ok());
        assert_eq!(
            converter.to_hijri(date(2019, 12, 31)),
            Err(CalendarError::OutOfRange {
                date: date(2019, 12, 31),
                min: date(2020, 1, 1),
                max: date(2020, 12, 31),
            })
        );
        assert!(matches!(
            converter.to_hijri(date(2021, 1, 1)),
            Err(CalendarError::OutOfRange { .. })
        ));
    }

    #[test]
    fn invalid_inner_dates_are_rejected() {
        let converter = RangeCheckedConverter::new(
            Fixed(HijriDate::new(1446, 9, 30, 29)),
            date(2020, 1, 1),
            date(2030, 1, 1),
        );
        assert!(matches!(
            converter.to_hijri(date(2025, 3, 30)),
            Err(CalendarError::InvalidHijriDate { day: 30, month_length: 29, .. })
        ));
    }

    #[test]
    fn umm_al_qura_ramadan_1446() {
        let converter = IcuHijriConverter::new(CalendarVariant::UmmAlQura);
        let first = converter.to_hijri(date(2025, 3, 1)).unwrap();
        assert_eq!((first.year, first.month, first.day), (1446, 9, 1));
        let tenth = converter.to_hijri(date(2025, 3, 10)).unwrap();
        assert_eq!((tenth.year, tenth.month, tenth.day), (1446, 9, 10));
        assert!((29..=30).contains(&tenth.month_length));
    }

    #[test]
    fn conversion_is_deterministic() {
        for variant in [CalendarVariant::UmmAlQura, CalendarVariant::Civil] {
            let converter = converter_for(&CalendarOptions::default().with_variant(variant));
            let day = date(2023, 6, 28);
            assert_eq!(converter.to_hijri(day), converter.to_hijri(day));
        }
    }
}
