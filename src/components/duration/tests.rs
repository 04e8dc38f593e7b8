use alloc::string::ToString;
use core::str::FromStr;

use super::{Duration, Item, TimeSpan};
use crate::{
    components::{
        chronology::TimePoint,
        unit::{CalendarUnit, ClockUnit},
    },
    error::ErrorKind,
    iso::{IsoDate, IsoTime, MAX_YEAR},
    Sign,
};

fn date(year: i32, month: u8, day: u8) -> IsoDate {
    IsoDate::try_new(year, month, day).unwrap()
}

fn calendar(text: &str) -> Duration<CalendarUnit> {
    Duration::from_str(text).unwrap()
}

#[test]
fn items_reject_negative_amounts() {
    let err = Item::new(-1, CalendarUnit::Days).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
    assert_eq!(Item::new(3, CalendarUnit::Weeks).unwrap().to_string(), "3W");
}

#[test]
fn construction_sorts_and_drops_zero_items() {
    let duration = Duration::from_items(
        [
            Item::new(3, CalendarUnit::Days).unwrap(),
            Item::new(0, CalendarUnit::Months).unwrap(),
            Item::new(2, CalendarUnit::Years).unwrap(),
        ],
        false,
    )
    .unwrap();
    assert_eq!(duration.items().len(), 2);
    assert_eq!(duration.to_string(), "P2Y,3D");
    assert_eq!(duration.partial_amount(CalendarUnit::Days), 3);
    assert_eq!(duration.partial_amount(CalendarUnit::Months), 0);
    assert!(!duration.contains(CalendarUnit::Months));
}

#[test]
fn duplicate_units_are_rejected() {
    let err = Duration::from_items(
        [
            Item::new(1, ClockUnit::Hours).unwrap(),
            Item::new(2, ClockUnit::Hours).unwrap(),
        ],
        false,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
}

#[test]
fn empty_duration() {
    let zero = Duration::<CalendarUnit>::zero();
    assert!(zero.is_empty());
    assert_eq!(zero.sign(), Sign::Zero);
    assert_eq!(zero.to_string(), "PT0S");
    assert_eq!(zero.inverse(), zero);
    assert!(!zero.inverse().is_negative());

    // A negative sign on no items is dropped.
    let empty = Duration::<CalendarUnit>::from_items([], true).unwrap();
    assert!(!empty.is_negative());
    assert_eq!(empty, Duration::default());
}

#[test]
fn plus_merges_items() {
    let duration = Duration::of(1, CalendarUnit::Months).unwrap();
    assert_eq!(
        duration.plus(2, CalendarUnit::Days).unwrap().to_string(),
        "P1M,2D"
    );
    assert!(duration.plus(-1, CalendarUnit::Months).unwrap().is_empty());
    assert_eq!(
        duration.plus(-3, CalendarUnit::Months).unwrap().to_string(),
        "-P2M"
    );

    let mixed = Duration::of_calendar_units(1, 1, 0)
        .unwrap()
        .plus(-2, CalendarUnit::Months)
        .unwrap_err();
    assert_eq!(mixed.kind(), ErrorKind::Range);
}

#[test]
fn mixed_signs_are_rejected() {
    let err = Duration::of_calendar_units(1, -1, 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
    let negative = Duration::of_clock_units(-1, -30, 0).unwrap();
    assert_eq!(negative.sign(), Sign::Negative);
    assert_eq!(negative.to_string(), "-P1H,30M");
}

#[test]
fn duration_algebra() {
    let a = calendar("P1Y,2D");
    let b = calendar("P3M,2D");
    assert_eq!(a.plus_duration(&b).unwrap().to_string(), "P1Y,3M,4D");
    assert_eq!(a.plus_duration(&b).unwrap().minus_duration(&b).unwrap(), a);
    assert_eq!(a.inverse().to_string(), "-P1Y,2D");
    assert_eq!(a.inverse().abs(), a);
    assert_eq!(a.multiplied_by(-2).unwrap().to_string(), "-P2Y,4D");
    assert!(a.multiplied_by(0).unwrap().is_empty());
    assert_eq!(
        calendar("P1D").multiplied_by(i64::MAX).unwrap().partial_amount(CalendarUnit::Days),
        i64::MAX
    );
    let err = calendar("P2D").multiplied_by(i64::MAX).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Arithmetic);
}

#[test]
fn parses_text_form() {
    assert_eq!(
        calendar("P1Y,2M"),
        Duration::of_calendar_units(1, 2, 0).unwrap()
    );
    assert_eq!(calendar("-P3D").sign(), Sign::Negative);
    assert!(calendar("PT0S").is_empty());
    assert!(calendar("-PT0S").is_empty());
    assert!(calendar("P0D").is_empty());

    let clock = Duration::<ClockUnit>::from_str("P90M,15003").unwrap();
    assert_eq!(clock.partial_amount(ClockUnit::Minutes), 90);
    assert_eq!(clock.partial_amount(ClockUnit::Millis), 1500);
    assert_eq!(clock.to_string(), "P90M,15003");
}

#[test]
fn rejects_malformed_text() {
    for text in ["1Y", "P", "PX", "P-1D", "PY", "P1Y,,2D", "P99999999999999999999D"] {
        let err = Duration::<CalendarUnit>::from_str(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax, "{text}");
    }
    let err = Duration::<CalendarUnit>::from_str("P1Y,1Y").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
}

#[test]
fn applies_forward_coarsest_first() {
    let start = date(2012, 1, 31);
    assert_eq!(calendar("P1M,1D").add_to(&start).unwrap(), date(2012, 3, 1));
    assert_eq!(
        start.plus_span(&calendar("P1Y,1M")).unwrap(),
        date(2013, 2, 28)
    );
    assert_eq!(
        Duration::<CalendarUnit>::zero().add_to(&start).unwrap(),
        start
    );

    let time = IsoTime::try_new(10, 0, 0, 0).unwrap();
    let span = Duration::of_clock_units(1, 30, 0).unwrap();
    assert_eq!(
        span.add_to(&time).unwrap(),
        IsoTime::try_new(11, 30, 0, 0).unwrap()
    );

    // Landing exactly on the end of the day keeps the 24:00 marker.
    let span = Duration::of_clock_units(14, 0, 0).unwrap();
    assert_eq!(span.add_to(&time).unwrap(), IsoTime::END_OF_DAY);
    assert_eq!(span.subtract_from(&IsoTime::END_OF_DAY).unwrap(), time);
}

#[test]
fn applies_backward_finest_first() {
    let start = date(2012, 3, 31);
    assert_eq!(
        calendar("P1M,1D").subtract_from(&start).unwrap(),
        date(2012, 2, 29)
    );
    assert_eq!(
        start.minus_span(&calendar("P1M,1D")).unwrap(),
        date(2012, 2, 29)
    );
    // A negative duration added moves backward.
    assert_eq!(
        calendar("-P1M,1D").add_to(&start).unwrap(),
        date(2012, 2, 29)
    );
}

#[test]
fn application_out_of_range_fails() {
    let last = date(MAX_YEAR, 12, 31);
    assert!(calendar("P1D").add_to(&last).is_err());
    assert!(calendar("P1M").add_to(&last).is_err());
}

#[test]
fn folding_overflow_fails() {
    let huge = Duration::from_items(
        [
            Item::new(i64::MAX, CalendarUnit::Years).unwrap(),
            Item::new(1, CalendarUnit::Months).unwrap(),
        ],
        false,
    )
    .unwrap();
    let start = date(2012, 1, 1);
    assert_eq!(
        huge.add_to(&start).unwrap_err().kind(),
        ErrorKind::Arithmetic
    );
    assert_eq!(
        huge.subtract_from(&start).unwrap_err().kind(),
        ErrorKind::Arithmetic
    );
}
