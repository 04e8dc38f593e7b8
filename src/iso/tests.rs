use alloc::string::ToString;

use super::{
    IsoDate, IsoDateTime, IsoTime, Month, Weekday, DAY_OF_MONTH, DAY_OF_WEEK, DAY_OF_YEAR,
    ISO_HOUR, MAX_YEAR, MILLI_OF_SECOND, MINUTE_OF_HOUR, MONTH_OF_YEAR, NANO_OF_SECOND, YEAR,
};
use crate::{
    components::{
        chronology::TimePoint,
        element::ChronoEntity,
        overflow::OverflowUnit,
        unit::{CalendarUnit, ClockUnit, IsoUnit},
    },
    error::ErrorKind,
    options::OverflowPolicy,
};

fn date(year: i32, month: u8, day: u8) -> IsoDate {
    IsoDate::try_new(year, month, day).unwrap()
}

fn time(hour: u8, minute: u8) -> IsoTime {
    IsoTime::try_new(hour, minute, 0, 0).unwrap()
}

fn datetime(year: i32, month: u8, day: u8, hour: u8, minute: u8) -> IsoDateTime {
    IsoDateTime::try_new(date(year, month, day), time(hour, minute)).unwrap()
}

#[test]
fn date_validation() {
    assert!(IsoDate::try_new(2012, 2, 29).is_ok());
    assert!(IsoDate::try_new(2011, 2, 29).is_err());
    assert!(IsoDate::try_new(2011, 13, 1).is_err());
    assert!(IsoDate::try_new(2011, 4, 0).is_err());
    assert!(IsoDate::try_new(MAX_YEAR, 12, 31).is_ok());
    assert!(IsoDate::try_new(MAX_YEAR + 1, 1, 1).is_err());
}

#[test]
fn epoch_days_and_weekday() {
    let epoch = date(1970, 1, 1);
    assert_eq!(epoch.to_epoch_days(), 0);
    assert_eq!(epoch.day_of_week(), Weekday::Thursday);
    assert_eq!(IsoDate::from_epoch_days(-1).unwrap(), date(1969, 12, 31));
    assert_eq!(date(2000, 3, 1).to_epoch_days(), 11_017);
    assert_eq!(date(2024, 12, 31).day_of_year(), 366);
    assert_eq!(date(2023, 12, 31).day_of_year(), 365);
}

#[test]
fn calendar_unit_arithmetic() {
    let start = date(2011, 5, 31);
    assert_eq!(
        start.plus(1, CalendarUnit::Months).unwrap(),
        date(2011, 6, 30)
    );
    assert_eq!(
        start.plus(2, CalendarUnit::Weeks).unwrap(),
        date(2011, 6, 14)
    );
    assert_eq!(
        start.minus(3, CalendarUnit::Months).unwrap(),
        date(2011, 2, 28)
    );

    let carry = OverflowUnit::new(CalendarUnit::Months, OverflowPolicy::CarryOver);
    assert_eq!(start.plus(1, carry).unwrap(), date(2011, 7, 1));

    assert_eq!(
        date(2011, 1, 1)
            .until(&date(2012, 1, 1), CalendarUnit::Days)
            .unwrap(),
        365
    );
}

#[test]
fn clock_units_on_date_are_rejected() {
    let err = date(2011, 5, 31)
        .plus(1, IsoUnit::Clock(ClockUnit::Hours))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RuleNotFound);
}

#[test]
fn clock_wraps_around_midnight() {
    assert_eq!(time(23, 30).plus(1, ClockUnit::Hours).unwrap(), time(0, 30));
    assert_eq!(
        IsoTime::END_OF_DAY.plus(1, ClockUnit::Hours).unwrap(),
        time(1, 0)
    );
    assert_eq!(
        IsoTime::END_OF_DAY.plus(0, ClockUnit::Hours).unwrap(),
        IsoTime::END_OF_DAY
    );
    assert_eq!(
        time(0, 15).minus(30, ClockUnit::Minutes).unwrap(),
        time(23, 45)
    );
    assert_eq!(
        IsoTime::MIDNIGHT
            .until(&IsoTime::END_OF_DAY, ClockUnit::Hours)
            .unwrap(),
        24
    );
}

#[test]
fn clock_arithmetic_reaches_end_of_day() {
    assert_eq!(time(23, 0).plus(1, ClockUnit::Hours).unwrap(), IsoTime::END_OF_DAY);
    assert_eq!(IsoTime::MIDNIGHT.plus(24, ClockUnit::Hours).unwrap(), IsoTime::END_OF_DAY);
    assert_eq!(time(10, 0).plus(38, ClockUnit::Hours).unwrap(), time(0, 0));
    assert_eq!(IsoTime::END_OF_DAY.minus(1, ClockUnit::Hours).unwrap(), time(23, 0));
}

#[test]
fn end_of_day_only_on_the_hour() {
    assert!(IsoTime::try_new(24, 0, 0, 0).is_ok());
    assert!(IsoTime::try_new(24, 0, 0, 1).is_err());
    assert!(IsoTime::try_new(24, 1, 0, 0).is_err());
    assert_eq!(
        IsoTime::from_nano_of_day(crate::NS_PER_DAY).unwrap(),
        IsoTime::END_OF_DAY
    );
}

#[test]
fn datetime_carries_into_the_date() {
    let start = datetime(2011, 12, 31, 23, 30);
    assert_eq!(
        start.plus(45, ClockUnit::Minutes).unwrap(),
        datetime(2012, 1, 1, 0, 15)
    );
    assert_eq!(
        start.plus(2, CalendarUnit::Months).unwrap(),
        datetime(2012, 2, 29, 23, 30)
    );
    assert_eq!(
        datetime(2012, 1, 1, 0, 0)
            .until(&datetime(2012, 1, 2, 6, 0), ClockUnit::Hours)
            .unwrap(),
        30
    );
}

#[test]
fn datetime_normalizes_end_of_day() {
    let dt = IsoDateTime::try_new(date(2011, 2, 28), IsoTime::END_OF_DAY).unwrap();
    assert_eq!(dt, datetime(2011, 3, 1, 0, 0));
}

#[test]
fn date_elements() {
    let d = date(2012, 2, 29);
    assert_eq!(d.get(&YEAR).unwrap(), 2012);
    assert_eq!(d.get(&MONTH_OF_YEAR).unwrap(), Month::February);
    assert_eq!(d.get(&DAY_OF_WEEK).unwrap(), Weekday::Wednesday);
    assert_eq!(d.maximum(&DAY_OF_MONTH).unwrap(), 29);
    assert_eq!(d.maximum(&DAY_OF_YEAR).unwrap(), 366);

    // Changing the year clamps the day.
    assert_eq!(d.with(&YEAR, 2013).unwrap(), date(2013, 2, 28));
    assert_eq!(
        d.with(&MONTH_OF_YEAR, Month::April).unwrap(),
        date(2012, 4, 29)
    );
    assert_eq!(
        d.with(&DAY_OF_WEEK, Weekday::Monday).unwrap(),
        date(2012, 2, 27)
    );
    assert_eq!(d.with(&DAY_OF_YEAR, 1).unwrap(), date(2012, 1, 1));

    let err = d.with(&DAY_OF_MONTH, 30).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
}

#[test]
fn time_elements() {
    let t = IsoTime::try_new(12, 30, 15, 123_456_789).unwrap();
    assert_eq!(t.get(&ISO_HOUR).unwrap(), 12);
    assert_eq!(t.get(&MILLI_OF_SECOND).unwrap(), 123);
    assert_eq!(t.maximum(&ISO_HOUR).unwrap(), 23);
    assert_eq!(
        t.with(&MILLI_OF_SECOND, 999).unwrap(),
        IsoTime::try_new(12, 30, 15, 999_456_789).unwrap()
    );

    assert_eq!(time(10, 0).maximum(&ISO_HOUR).unwrap(), 24);
    assert_eq!(IsoTime::END_OF_DAY.maximum(&MINUTE_OF_HOUR).unwrap(), 0);
    assert_eq!(
        time(10, 0).with(&ISO_HOUR, 24).unwrap(),
        IsoTime::END_OF_DAY
    );
    assert!(time(10, 5).with(&ISO_HOUR, 24).is_err());
}

#[test]
fn datetime_elements() {
    let dt = datetime(2012, 2, 29, 10, 0);
    assert_eq!(dt.maximum(&ISO_HOUR).unwrap(), 23);
    assert_eq!(dt.get(&DAY_OF_MONTH).unwrap(), 29);
    assert_eq!(dt.get(&NANO_OF_SECOND).unwrap(), 0);
    assert_eq!(dt.with(&YEAR, 2011).unwrap(), datetime(2011, 2, 28, 10, 0));
    assert!(dt.with(&ISO_HOUR, 24).is_err());
}

#[test]
fn element_identity() {
    assert_eq!(YEAR.to_string(), "YEAR");
    assert_eq!(YEAR.symbol(), 'u');
    assert!(YEAR.is_date_element());
    assert!(ISO_HOUR.is_time_element());
    assert_eq!(DAY_OF_MONTH.default_maximum(), 31);
    assert_eq!(MONTH_OF_YEAR.default_minimum(), Month::January);
    assert_ne!(DAY_OF_MONTH, DAY_OF_YEAR);
}

#[test]
fn unknown_elements_are_reported() {
    let err = IsoTime::MIDNIGHT.get(&YEAR).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RuleNotFound);
    assert!(!IsoDate::supports(&ISO_HOUR));
    assert!(IsoDateTime::supports(&ISO_HOUR));
}

#[test]
fn eras() {
    assert_eq!(date(1, 1, 1).era().map(|era| era.code()), Some("ce"));
    assert_eq!(date(0, 12, 31).era().map(|era| era.code()), Some("bce"));
}

#[test]
fn text_form() {
    assert_eq!(date(2011, 5, 3).to_string(), "2011-05-03");
    assert_eq!(date(-44, 3, 15).to_string(), "-000044-03-15");
    assert_eq!(date(12_345, 1, 1).to_string(), "+012345-01-01");
    assert_eq!(time(9, 5).to_string(), "09:05");
    assert_eq!(
        IsoTime::try_new(9, 5, 7, 1_000).unwrap().to_string(),
        "09:05:07.000001000"
    );
    assert_eq!(IsoTime::END_OF_DAY.to_string(), "24:00");
    assert_eq!(datetime(2011, 5, 3, 17, 45).to_string(), "2011-05-03T17:45");
}
