//! Chronologies and the per-unit arithmetic rules they register.

use core::fmt;

#[cfg(not(feature = "std"))]
use core_maths::CoreFloat;
use tinystr::TinyAsciiStr;

use crate::{
    components::{duration::TimeSpan, unit::Unit},
    utils, TemporalError, TemporalResult,
};

/// Relative tolerance when checking whether two unit lengths have an
/// integral ratio.
const CONVERSION_TOLERANCE: f64 = 1e-9;
/// Conversion factors must lie strictly below this bound.
const MAX_CONVERSION_FACTOR: i64 = 1_000_000;

/// The arithmetic of one unit on one time point type.
pub trait UnitRule<T> {
    /// Adds `amount` units to `point`.
    fn add_to(&self, point: &T, amount: i64) -> TemporalResult<T>;

    /// Counts the whole units between `start` and `end`, truncated toward
    /// zero. `between(a, b) == -between(b, a)` holds for every rule.
    fn between(&self, start: &T, end: &T) -> TemporalResult<i64>;
}

/// Resolves units to their rules for one time point type.
pub trait Chronology<U: Unit> {
    /// The time point type of this chronology.
    type Point;
    /// The rule type of this chronology.
    type Rule: UnitRule<Self::Point>;

    /// Returns the rule of `unit`, or a rule not found error when the
    /// unit is unsupported.
    fn rule(&self, unit: U) -> TemporalResult<Self::Rule>;

    /// The length of `unit` in seconds as seen by this chronology.
    fn length(&self, unit: U) -> f64 {
        unit.length()
    }

    /// Returns how many `fine` units make up one `coarse` unit, if amounts
    /// of `coarse` can be folded into `fine`.
    fn conversion_factor(&self, coarse: U, fine: U) -> Option<i64> {
        if !coarse.is_compatible(&fine) {
            return None;
        }
        let fine_length = self.length(fine);
        if fine_length <= 0.0 {
            return None;
        }
        let ratio = self.length(coarse) / fine_length;
        let factor = ratio.round();
        if (ratio - factor).abs() > ratio * CONVERSION_TOLERANCE {
            return None;
        }
        let factor = factor as i64;
        (1 < factor && factor < MAX_CONVERSION_FACTOR).then_some(factor)
    }
}

/// A point on a time axis that supports arithmetic in units of `U`.
pub trait TimePoint<U: Unit>: Sized + Clone + Ord {
    /// The chronology of this time point.
    type Chronology: Chronology<U, Point = Self>;

    /// Returns the chronology of this time point.
    fn chronology(&self) -> Self::Chronology;

    /// Adds `amount` units.
    fn plus(&self, amount: i64, unit: U) -> TemporalResult<Self> {
        trace!("adding {amount} {unit:?}");
        self.chronology().rule(unit)?.add_to(self, amount)
    }

    /// Subtracts `amount` units.
    fn minus(&self, amount: i64, unit: U) -> TemporalResult<Self> {
        self.plus(utils::checked_neg(amount)?, unit)
    }

    /// Counts the whole units from `self` until `end`.
    fn until(&self, end: &Self, unit: U) -> TemporalResult<i64> {
        self.chronology().rule(unit)?.between(self, end)
    }

    /// Adds a time span.
    fn plus_span<S: TimeSpan<U>>(&self, span: &S) -> TemporalResult<Self> {
        span.add_to(self)
    }

    /// Subtracts a time span.
    fn minus_span<S: TimeSpan<U>>(&self, span: &S) -> TemporalResult<Self> {
        span.subtract_from(self)
    }
}

// ==== Calendar contracts ====

/// An era of a calendar system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarEra {
    code: TinyAsciiStr<8>,
    start: i64,
}

impl CalendarEra {
    /// Creates an era beginning at the day number `start`.
    #[inline]
    #[must_use]
    pub const fn new(code: TinyAsciiStr<8>, start: i64) -> Self {
        Self { code, start }
    }

    /// Returns the era code.
    #[inline]
    #[must_use]
    pub fn code(&self) -> &str {
        self.code.as_str()
    }

    /// Returns the first day number of this era.
    #[inline]
    #[must_use]
    pub const fn start(&self) -> i64 {
        self.start
    }
}

/// The day-number transform of a calendar system.
///
/// A day number counts days relative to 1970-01-01 on every calendar.
pub trait CalendarSystem: Copy + fmt::Debug {
    /// The calendar date type.
    type Date: Copy + Ord + fmt::Debug;

    /// Converts a day number into a date.
    fn to_date(&self, day_number: i64) -> TemporalResult<Self::Date>;

    /// Converts a date into its day number.
    fn to_day_number(&self, date: &Self::Date) -> i64;

    /// The smallest supported day number.
    fn min_day_number(&self) -> i64;

    /// The largest supported day number.
    fn max_day_number(&self) -> i64;

    /// The eras of this calendar, ordered by their start.
    fn eras(&self) -> &'static [CalendarEra];

    /// Returns the era containing `date`.
    fn era(&self, date: &Self::Date) -> Option<&'static CalendarEra> {
        let day_number = self.to_day_number(date);
        self.eras()
            .iter()
            .rev()
            .find(|era| era.start() <= day_number)
    }

    /// Checks that a day number is supported.
    fn check_day_number(&self, day_number: i64) -> TemporalResult<i64> {
        if day_number < self.min_day_number() || day_number > self.max_day_number() {
            return Err(TemporalError::range().with_message("Day number out of calendar range."));
        }
        Ok(day_number)
    }
}

/// A calendar system whose dates are organized in months.
///
/// Months are addressed by a running month index, so that adding months
/// is integer addition on the index.
pub trait MonthBasedCalendar: CalendarSystem {
    /// Returns the running month index of `date`.
    fn month_index(&self, date: &Self::Date) -> i64;

    /// Returns the day of month of `date`.
    fn day_of_month(&self, date: &Self::Date) -> i64;

    /// Returns the number of days in the month with the given index.
    fn days_in_month(&self, month_index: i64) -> TemporalResult<i64>;

    /// Builds the date for a month index and a valid day of month.
    fn date_from_month_index(&self, month_index: i64, day: i64) -> TemporalResult<Self::Date>;

    /// Whether `date` is the last day of its month.
    fn is_last_day_of_month(&self, date: &Self::Date) -> TemporalResult<bool> {
        Ok(self.day_of_month(date) == self.days_in_month(self.month_index(date))?)
    }

    /// Adds days through the day-number transform.
    fn plus_days(&self, date: &Self::Date, days: i64) -> TemporalResult<Self::Date> {
        let day_number = utils::checked_add(self.to_day_number(date), days)?;
        self.to_date(self.check_day_number(day_number)?)
    }
}

/// A time point carrying a date of a month based calendar.
pub trait CalendarDate: Sized {
    /// The calendar of the date.
    type Calendar: MonthBasedCalendar;
    /// The time of day carried alongside the date; `()` for plain dates.
    type WallTime: Ord + Copy;

    /// Returns the calendar.
    fn calendar(&self) -> Self::Calendar;

    /// Returns the calendar date.
    fn calendar_date(&self) -> <Self::Calendar as CalendarSystem>::Date;

    /// Returns the time of day.
    fn wall_time(&self) -> Self::WallTime;

    /// Returns a copy with the date replaced and the time of day kept.
    fn with_calendar_date(&self, date: <Self::Calendar as CalendarSystem>::Date) -> Self;
}

#[cfg(test)]
mod tests {
    use super::Chronology;
    use crate::{
        components::unit::{CalendarUnit, ClockUnit, IsoUnit},
        iso::{IsoDateChronology, IsoDateTimeChronology, IsoTimeChronology},
    };

    #[test]
    fn calendar_conversion_factors() {
        let chrono = IsoDateChronology;
        let factor = |a, b| Chronology::<CalendarUnit>::conversion_factor(&chrono, a, b);
        assert_eq!(factor(CalendarUnit::Years, CalendarUnit::Months), Some(12));
        assert_eq!(
            factor(CalendarUnit::Millennia, CalendarUnit::Months),
            Some(12_000)
        );
        assert_eq!(
            factor(CalendarUnit::Quarters, CalendarUnit::Months),
            Some(3)
        );
        assert_eq!(factor(CalendarUnit::Weeks, CalendarUnit::Days), Some(7));
        assert_eq!(factor(CalendarUnit::Months, CalendarUnit::Days), None);
        assert_eq!(factor(CalendarUnit::Years, CalendarUnit::Days), None);
        assert_eq!(factor(CalendarUnit::Months, CalendarUnit::Months), None);
        assert_eq!(factor(CalendarUnit::Days, CalendarUnit::Weeks), None);
    }

    #[test]
    fn clock_conversion_factors() {
        let chrono = IsoTimeChronology;
        let factor = |a, b| Chronology::<ClockUnit>::conversion_factor(&chrono, a, b);
        assert_eq!(factor(ClockUnit::Hours, ClockUnit::Minutes), Some(60));
        assert_eq!(factor(ClockUnit::Hours, ClockUnit::Seconds), Some(3_600));
        assert_eq!(factor(ClockUnit::Seconds, ClockUnit::Micros), None);
        assert_eq!(factor(ClockUnit::Seconds, ClockUnit::Millis), Some(1_000));
        assert_eq!(factor(ClockUnit::Hours, ClockUnit::Nanos), None);
    }

    #[test]
    fn mixed_units_do_not_convert() {
        let chrono = IsoDateTimeChronology;
        let factor = |a: IsoUnit, b: IsoUnit| chrono.conversion_factor(a, b);
        assert_eq!(
            factor(CalendarUnit::Days.into(), ClockUnit::Hours.into()),
            None
        );
        assert_eq!(
            factor(CalendarUnit::Years.into(), CalendarUnit::Months.with_carry_over().into()),
            None
        );
        assert_eq!(
            factor(
                CalendarUnit::Years.with_carry_over().into(),
                CalendarUnit::Months.with_carry_over().into()
            ),
            Some(12)
        );
    }
}
