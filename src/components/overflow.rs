//! Calendar units decorated with a day-of-month overflow policy, and the
//! calendar rule resolving them.

use core::{cmp::Ordering, fmt};

use crate::{
    components::{
        chronology::{CalendarDate, MonthBasedCalendar, UnitRule},
        unit::{CalendarUnit, Unit},
    },
    options::OverflowPolicy,
    utils, TemporalError, TemporalResult,
};

/// A calendar unit with an attached overflow policy.
///
/// Equality and hashing consider both the base unit and the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverflowUnit {
    base: CalendarUnit,
    policy: OverflowPolicy,
}

impl OverflowUnit {
    #[inline]
    #[must_use]
    pub const fn new(base: CalendarUnit, policy: OverflowPolicy) -> Self {
        Self { base, policy }
    }

    #[inline]
    #[must_use]
    pub const fn base(&self) -> CalendarUnit {
        self.base
    }

    #[inline]
    #[must_use]
    pub const fn policy(&self) -> OverflowPolicy {
        self.policy
    }
}

impl Unit for OverflowUnit {
    fn length(&self) -> f64 {
        self.base.length()
    }

    fn symbol(&self) -> char {
        self.base.symbol()
    }

    fn is_compatible(&self, other: &Self) -> bool {
        self.policy == other.policy && self.base.is_compatible(&other.base)
    }
}

impl fmt::Display for OverflowUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.base.symbol(), self.policy)
    }
}

// ==== CalendarRule ====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arithmetic {
    Days { per: i64 },
    Months { per: i64, policy: OverflowPolicy },
}

/// The unit rule of a calendar unit on any time point carrying a date of
/// the calendar `C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarRule<C> {
    calendar: C,
    arithmetic: Arithmetic,
}

impl<C: MonthBasedCalendar> CalendarRule<C> {
    /// Creates the rule for `unit` resolving day-of-month overflow with
    /// `policy`. Units of the day family ignore the policy.
    #[must_use]
    pub fn new(calendar: C, unit: CalendarUnit, policy: OverflowPolicy) -> Self {
        let arithmetic = match (unit.months(), unit.days()) {
            (Some(per), _) => Arithmetic::Months { per, policy },
            (None, Some(per)) => Arithmetic::Days { per },
            (None, None) => Arithmetic::Days { per: 1 },
        };
        Self {
            calendar,
            arithmetic,
        }
    }

    /// Creates the rule of an overflow unit.
    #[must_use]
    pub fn for_overflow_unit(calendar: C, unit: OverflowUnit) -> Self {
        Self::new(calendar, unit.base(), unit.policy())
    }

    fn add_months(
        &self,
        date: &C::Date,
        months: i64,
        policy: OverflowPolicy,
    ) -> TemporalResult<C::Date> {
        let calendar = &self.calendar;
        let target = utils::checked_add(calendar.month_index(date), months)?;
        let day = calendar.day_of_month(date);
        let days_in_month = calendar.days_in_month(target)?;

        if policy == OverflowPolicy::EndOfMonth {
            return calendar.date_from_month_index(target, days_in_month);
        }
        if day <= days_in_month {
            return calendar.date_from_month_index(target, day);
        }

        match policy {
            OverflowPolicy::PreviousValidDate | OverflowPolicy::JodaMetric => {
                calendar.date_from_month_index(target, days_in_month)
            }
            OverflowPolicy::NextValidDate => {
                calendar.date_from_month_index(utils::checked_add(target, 1)?, 1)
            }
            OverflowPolicy::CarryOver => {
                let end = calendar.date_from_month_index(target, days_in_month)?;
                calendar.plus_days(&end, day - days_in_month)
            }
            OverflowPolicy::UnlessInvalid => Err(TemporalError::range().with_message(
                alloc::format!("Day of month {day} does not exist in the resulting month."),
            )),
            OverflowPolicy::KeepingLastDate => {
                if calendar.is_last_day_of_month(date)? {
                    calendar.date_from_month_index(target, days_in_month)
                } else {
                    calendar.date_from_month_index(utils::checked_add(target, 1)?, 1)
                }
            }
            OverflowPolicy::EndOfMonth => calendar.date_from_month_index(target, days_in_month),
        }
    }

    fn days_between<T: CalendarDate<Calendar = C>>(&self, start: &T, end: &T) -> i64 {
        let calendar = &self.calendar;
        let delta = calendar.to_day_number(&end.calendar_date())
            - calendar.to_day_number(&start.calendar_date());
        adjust_for_remainder(delta, end.wall_time().cmp(&start.wall_time()))
    }

    fn months_between<T: CalendarDate<Calendar = C>>(
        &self,
        start: &T,
        end: &T,
        policy: OverflowPolicy,
    ) -> TemporalResult<i64> {
        let calendar = &self.calendar;
        let start_date = start.calendar_date();
        let end_date = end.calendar_date();

        if policy == OverflowPolicy::JodaMetric {
            let start_key = (calendar.to_day_number(&start_date), start.wall_time());
            let end_key = (calendar.to_day_number(&end_date), end.wall_time());
            if start_key > end_key {
                return Ok(-self.months_between(end, start, policy)?);
            }
        }

        let delta = calendar.month_index(&end_date) - calendar.month_index(&start_date);
        let mut start_day = calendar.day_of_month(&start_date);
        let end_day = calendar.day_of_month(&end_date);

        match policy {
            OverflowPolicy::KeepingLastDate => {
                if calendar.is_last_day_of_month(&start_date)?
                    && calendar.is_last_day_of_month(&end_date)?
                {
                    start_day = end_day;
                }
            }
            OverflowPolicy::JodaMetric => {
                if calendar.is_last_day_of_month(&end_date)? && start_day > end_day {
                    start_day = end_day;
                }
            }
            _ => {}
        }

        let remainder = (end_day, end.wall_time()).cmp(&(start_day, start.wall_time()));
        Ok(adjust_for_remainder(delta, remainder))
    }
}

/// Truncates a raw delta toward zero when the remainder of the end point
/// has not yet reached the remainder of the start point.
fn adjust_for_remainder(delta: i64, remainder: Ordering) -> i64 {
    match remainder {
        Ordering::Less if delta > 0 => delta - 1,
        Ordering::Greater if delta < 0 => delta + 1,
        _ => delta,
    }
}

impl<C, T> UnitRule<T> for CalendarRule<C>
where
    C: MonthBasedCalendar,
    T: CalendarDate<Calendar = C>,
{
    fn add_to(&self, point: &T, amount: i64) -> TemporalResult<T> {
        if amount == 0 {
            return Ok(point.with_calendar_date(point.calendar_date()));
        }
        let date = point.calendar_date();
        let result = match self.arithmetic {
            Arithmetic::Days { per } => self
                .calendar
                .plus_days(&date, utils::checked_mul(amount, per)?)?,
            Arithmetic::Months { per, policy } => {
                self.add_months(&date, utils::checked_mul(amount, per)?, policy)?
            }
        };
        Ok(point.with_calendar_date(result))
    }

    fn between(&self, start: &T, end: &T) -> TemporalResult<i64> {
        match self.arithmetic {
            Arithmetic::Days { per } => Ok(self.days_between(start, end) / per),
            Arithmetic::Months { per, policy } => {
                Ok(self.months_between(start, end, policy)? / per)
            }
        }
    }
}
