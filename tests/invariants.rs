//! Properties that hold across the whole engine, exercised through the
//! public API only.

use core::str::FromStr;

use temporal_engine::{
    components::{ChronoEntity, Duration, Metric, TimePoint, TimeSpan},
    error::ErrorKind,
    iso::{IsoDate, IsoDateTime, IsoTime, DAY_OF_MONTH},
    options::OverflowPolicy,
    CalendarUnit, ClockUnit,
};

fn date(year: i32, month: u8, day: u8) -> IsoDate {
    IsoDate::try_new(year, month, day).unwrap()
}

fn sample_dates() -> Vec<IsoDate> {
    let mut dates = Vec::new();
    for year in [1999, 2000, 2011, 2012] {
        for month in 1..=12 {
            for day in [1, 15, 28] {
                dates.push(date(year, month, day));
            }
            dates.push(date(year, month, date(year, month, 1).days_in_month()));
        }
    }
    dates
}

#[test]
fn plus_then_until_round_trips_for_days() {
    let start = date(2011, 5, 31);
    for amount in [-1000, -31, -1, 0, 1, 29, 365, 100_000] {
        let end = start.plus(amount, CalendarUnit::Days).unwrap();
        assert_eq!(start.until(&end, CalendarUnit::Days).unwrap(), amount);
        assert_eq!(end.minus(amount, CalendarUnit::Days).unwrap(), start);
    }
}

#[test]
fn until_is_antisymmetric() {
    let dates = sample_dates();
    for unit in [CalendarUnit::Years, CalendarUnit::Months, CalendarUnit::Weeks] {
        for a in dates.iter().step_by(7) {
            for b in dates.iter().step_by(5) {
                assert_eq!(
                    a.until(b, unit).unwrap(),
                    -b.until(a, unit).unwrap(),
                    "{a} {b} {unit:?}"
                );
            }
        }
    }
}

#[test]
fn metric_is_antisymmetric() {
    let metric = Metric::years_months_days();
    let dates = sample_dates();
    for a in dates.iter().step_by(11) {
        for b in dates.iter().step_by(13) {
            let forward = metric.between(a, b).unwrap();
            let backward = metric.between(b, a).unwrap();
            assert_eq!(backward, forward.inverse(), "{a} {b}");
        }
    }
}

#[test]
fn standard_metric_reaches_the_end() {
    let metric = Metric::years_months_days();
    let dates = sample_dates();
    for a in dates.iter().step_by(3) {
        for b in dates.iter().step_by(17) {
            if a > b {
                continue;
            }
            let duration = metric.between(a, b).unwrap();
            assert_eq!(a.plus_span(&duration).unwrap(), *b, "{a} + {duration}");
        }
    }
}

#[test]
fn reversible_metric_round_trips_backward() {
    let metric = Metric::years_months_days().reversible();
    let dates = sample_dates();
    for a in dates.iter().step_by(3) {
        for b in dates.iter().step_by(17) {
            if a > b {
                continue;
            }
            let duration = metric.between(a, b).unwrap();
            assert_eq!(a.plus_span(&duration).unwrap(), *b, "{a} + {duration}");
            assert_eq!(b.minus_span(&duration).unwrap(), *a, "{b} - {duration}");
        }
    }
}

#[test]
fn empty_duration_is_identity() {
    let zero = Duration::<CalendarUnit>::zero();
    for d in sample_dates().iter().step_by(9) {
        assert_eq!(zero.add_to(d).unwrap(), *d);
        assert_eq!(zero.subtract_from(d).unwrap(), *d);
    }
    let time = IsoTime::END_OF_DAY;
    assert_eq!(Duration::<ClockUnit>::zero().add_to(&time).unwrap(), time);
}

#[test]
fn month_overflow_policies() {
    let start = date(2011, 5, 31);
    let expected = [
        (OverflowPolicy::PreviousValidDate, Some(date(2011, 6, 30))),
        (OverflowPolicy::NextValidDate, Some(date(2011, 7, 1))),
        (OverflowPolicy::EndOfMonth, Some(date(2011, 6, 30))),
        (OverflowPolicy::CarryOver, Some(date(2011, 7, 1))),
        (OverflowPolicy::UnlessInvalid, None),
        (OverflowPolicy::KeepingLastDate, Some(date(2011, 6, 30))),
        (OverflowPolicy::JodaMetric, Some(date(2011, 6, 30))),
    ];
    for (policy, result) in expected {
        let unit = CalendarUnit::Months.with_policy(policy);
        match result {
            Some(end) => assert_eq!(start.plus(1, unit).unwrap(), end, "{policy}"),
            None => assert_eq!(start.plus(1, unit).unwrap_err().kind(), ErrorKind::Range),
        }
    }
}

#[test]
fn text_form_round_trips() {
    for text in ["PT0S", "P1Y", "-P2Y,10M,28D", "P3W,2D", "P1I,1C,1E,1Q"] {
        let duration = Duration::<CalendarUnit>::from_str(text).unwrap();
        assert_eq!(duration.to_string(), text);
    }
    for text in ["P1H,30M", "-P5S,3503", "P1M,16,1009"] {
        let duration = Duration::<ClockUnit>::from_str(text).unwrap();
        assert_eq!(duration.to_string(), text);
    }
}

#[test]
fn date_time_arithmetic_matches_date_arithmetic() {
    let time = IsoTime::try_new(13, 45, 0, 0).unwrap();
    for d in sample_dates().iter().step_by(5) {
        let dt = IsoDateTime::try_new(*d, time).unwrap();
        for unit in [CalendarUnit::Months, CalendarUnit::Days, CalendarUnit::Years] {
            let moved = dt.plus(7, unit).unwrap();
            assert_eq!(moved.date(), d.plus(7, unit).unwrap());
            assert_eq!(moved.time(), time);
        }
    }
}

#[test]
fn elements_stay_within_their_bounds() {
    for d in sample_dates() {
        let day = d.get(&DAY_OF_MONTH).unwrap();
        assert!(d.minimum(&DAY_OF_MONTH).unwrap() <= day);
        assert!(day <= d.maximum(&DAY_OF_MONTH).unwrap());
        assert_eq!(d.with(&DAY_OF_MONTH, day).unwrap(), d);
    }
}

#[test]
fn clock_metric_round_trips() {
    let metric = Metric::clock_units();
    let times = [
        IsoTime::MIDNIGHT,
        IsoTime::try_new(0, 0, 0, 1).unwrap(),
        IsoTime::try_new(9, 15, 30, 250).unwrap(),
        IsoTime::try_new(23, 59, 59, 999_999_999).unwrap(),
        IsoTime::END_OF_DAY,
    ];
    for start in times {
        for end in times {
            let duration = metric.between(&start, &end).unwrap();
            assert_eq!(start.plus_span(&duration).unwrap(), end, "{start} -> {end}");
            assert_eq!(end.minus_span(&duration).unwrap(), start, "{start} -> {end}");
        }
    }
}
