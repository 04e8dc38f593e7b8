//! The elements of the ISO time point types and their rules.

use core::fmt;

use date_equations::gregorian;
use tinystr::tinystr;

use super::{ClockRule, IsoCalendar, IsoDate, IsoDateTime, IsoTime, MAX_YEAR, MIN_YEAR};
use crate::{
    components::{
        chronology::UnitRule,
        element::{ChronoEntity, Element, ElementKind, ElementRule, ElementValue},
        overflow::CalendarRule,
        unit::{CalendarUnit, ClockUnit},
    },
    options::OverflowPolicy,
    utils, TemporalError, TemporalResult,
};

// ==== Value types ====

/// A month of the ISO calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    January = 1,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    const ALL: [Self; 12] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
    ];

    /// Returns the month number, January being 1.
    #[inline]
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }
}

impl ElementValue for Month {
    fn into_raw(self) -> i64 {
        i64::from(self.number())
    }

    fn try_from_raw(raw: i64) -> TemporalResult<Self> {
        usize::try_from(raw - 1)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or_else(|| TemporalError::range().with_message("Month out of range."))
    }
}

/// A day of the ISO week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Monday = 1,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Maps the ISO weekday number (Monday = 1 .. Sunday = 7).
    #[must_use]
    pub const fn from_iso_number(number: u8) -> Self {
        match number {
            1 => Self::Monday,
            2 => Self::Tuesday,
            3 => Self::Wednesday,
            4 => Self::Thursday,
            5 => Self::Friday,
            6 => Self::Saturday,
            _ => Self::Sunday,
        }
    }

    #[inline]
    #[must_use]
    pub const fn iso_number(self) -> u8 {
        self as u8
    }
}

impl ElementValue for Weekday {
    fn into_raw(self) -> i64 {
        i64::from(self.iso_number())
    }

    fn try_from_raw(raw: i64) -> TemporalResult<Self> {
        match u8::try_from(raw) {
            Ok(number @ 1..=7) => Ok(Self::from_iso_number(number)),
            _ => Err(TemporalError::range().with_message("Weekday out of range.")),
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ==== Elements ====

pub const YEAR: Element<i32> =
    Element::new(tinystr!(24, "YEAR"), 'u', MIN_YEAR, MAX_YEAR, ElementKind::Date);
pub const MONTH_OF_YEAR: Element<Month> = Element::new(
    tinystr!(24, "MONTH_OF_YEAR"),
    'M',
    Month::January,
    Month::December,
    ElementKind::Date,
);
pub const DAY_OF_MONTH: Element<i32> =
    Element::new(tinystr!(24, "DAY_OF_MONTH"), 'd', 1, 31, ElementKind::Date);
pub const DAY_OF_WEEK: Element<Weekday> = Element::new(
    tinystr!(24, "DAY_OF_WEEK"),
    'E',
    Weekday::Monday,
    Weekday::Sunday,
    ElementKind::Date,
);
pub const DAY_OF_YEAR: Element<i32> =
    Element::new(tinystr!(24, "DAY_OF_YEAR"), 'D', 1, 366, ElementKind::Date);

/// The hour of day in `0..=24`, where 24 marks the end of the day.
pub const ISO_HOUR: Element<i32> =
    Element::new(tinystr!(24, "ISO_HOUR"), 'H', 0, 24, ElementKind::Time);
pub const MINUTE_OF_HOUR: Element<i32> =
    Element::new(tinystr!(24, "MINUTE_OF_HOUR"), 'm', 0, 59, ElementKind::Time);
pub const SECOND_OF_MINUTE: Element<i32> =
    Element::new(tinystr!(24, "SECOND_OF_MINUTE"), 's', 0, 59, ElementKind::Time);
pub const MILLI_OF_SECOND: Element<i32> =
    Element::new(tinystr!(24, "MILLI_OF_SECOND"), 'S', 0, 999, ElementKind::Time);
pub const MICRO_OF_SECOND: Element<i32> =
    Element::new(tinystr!(24, "MICRO_OF_SECOND"), 'U', 0, 999_999, ElementKind::Time);
pub const NANO_OF_SECOND: Element<i32> =
    Element::new(tinystr!(24, "NANO_OF_SECOND"), 'n', 0, 999_999_999, ElementKind::Time);

// ==== IsoDate rules ====

fn invalid(element: &str, value: i64) -> TemporalError {
    TemporalError::range().with_message(alloc::format!("{element} value {value} is out of range."))
}

/// Builds a date from a possibly overflowing day of month by clamping it.
fn clamped(year: i64, month: i64, day: i64) -> TemporalResult<IsoDate> {
    let year = utils::to_i32(year)?;
    let month = u8::try_from(month).map_err(|_| invalid("MONTH_OF_YEAR", month))?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(invalid("YEAR", i64::from(year)));
    }
    let day = day.min(i64::from(gregorian::days_in_month(year, month)));
    IsoDate::try_new(year, month, day as u8)
}

struct YearRule;

impl ElementRule<IsoDate> for YearRule {
    fn value(&self, context: &IsoDate) -> i64 {
        i64::from(context.year())
    }

    fn minimum(&self, _: &IsoDate) -> i64 {
        i64::from(MIN_YEAR)
    }

    fn maximum(&self, _: &IsoDate) -> i64 {
        i64::from(MAX_YEAR)
    }

    fn with_value(&self, context: &IsoDate, value: i64) -> TemporalResult<IsoDate> {
        if !self.is_valid(context, value) {
            return Err(invalid("YEAR", value));
        }
        clamped(value, i64::from(context.month()), i64::from(context.day()))
    }

    fn advance(&self, context: &IsoDate, amount: i64) -> TemporalResult<IsoDate> {
        let year = utils::checked_add(i64::from(context.year()), amount)?;
        clamped(year, i64::from(context.month()), i64::from(context.day()))
    }

    fn child(&self) -> Option<&'static str> {
        Some("MONTH_OF_YEAR")
    }
}

struct MonthRule;

impl ElementRule<IsoDate> for MonthRule {
    fn value(&self, context: &IsoDate) -> i64 {
        i64::from(context.month())
    }

    fn minimum(&self, _: &IsoDate) -> i64 {
        1
    }

    fn maximum(&self, _: &IsoDate) -> i64 {
        12
    }

    fn with_value(&self, context: &IsoDate, value: i64) -> TemporalResult<IsoDate> {
        if !self.is_valid(context, value) {
            return Err(invalid("MONTH_OF_YEAR", value));
        }
        clamped(i64::from(context.year()), value, i64::from(context.day()))
    }

    fn advance(&self, context: &IsoDate, amount: i64) -> TemporalResult<IsoDate> {
        CalendarRule::new(IsoCalendar, CalendarUnit::Months, OverflowPolicy::PreviousValidDate)
            .add_to(context, amount)
    }

    fn child(&self) -> Option<&'static str> {
        Some("DAY_OF_MONTH")
    }
}

struct DayOfMonthRule;

impl ElementRule<IsoDate> for DayOfMonthRule {
    fn value(&self, context: &IsoDate) -> i64 {
        i64::from(context.day())
    }

    fn minimum(&self, _: &IsoDate) -> i64 {
        1
    }

    fn maximum(&self, context: &IsoDate) -> i64 {
        i64::from(context.days_in_month())
    }

    fn with_value(&self, context: &IsoDate, value: i64) -> TemporalResult<IsoDate> {
        if !self.is_valid(context, value) {
            return Err(invalid("DAY_OF_MONTH", value));
        }
        IsoDate::try_new(context.year(), context.month(), value as u8)
    }

    fn advance(&self, context: &IsoDate, amount: i64) -> TemporalResult<IsoDate> {
        context.plus_days(amount)
    }
}

struct DayOfWeekRule;

impl ElementRule<IsoDate> for DayOfWeekRule {
    fn value(&self, context: &IsoDate) -> i64 {
        i64::from(context.day_of_week().iso_number())
    }

    fn minimum(&self, _: &IsoDate) -> i64 {
        1
    }

    fn maximum(&self, _: &IsoDate) -> i64 {
        7
    }

    /// Moves within the ISO week (Monday to Sunday) of the date.
    fn with_value(&self, context: &IsoDate, value: i64) -> TemporalResult<IsoDate> {
        if !self.is_valid(context, value) {
            return Err(invalid("DAY_OF_WEEK", value));
        }
        context.plus_days(value - self.value(context))
    }

    fn advance(&self, context: &IsoDate, amount: i64) -> TemporalResult<IsoDate> {
        context.plus_days(amount)
    }
}

struct DayOfYearRule;

impl ElementRule<IsoDate> for DayOfYearRule {
    fn value(&self, context: &IsoDate) -> i64 {
        i64::from(context.day_of_year())
    }

    fn minimum(&self, _: &IsoDate) -> i64 {
        1
    }

    fn maximum(&self, context: &IsoDate) -> i64 {
        i64::from(context.days_in_year())
    }

    fn with_value(&self, context: &IsoDate, value: i64) -> TemporalResult<IsoDate> {
        if !self.is_valid(context, value) {
            return Err(invalid("DAY_OF_YEAR", value));
        }
        context.plus_days(value - self.value(context))
    }

    fn advance(&self, context: &IsoDate, amount: i64) -> TemporalResult<IsoDate> {
        context.plus_days(amount)
    }
}

impl ChronoEntity for IsoDate {
    fn element_rule(name: &str) -> Option<&'static dyn ElementRule<Self>> {
        let rule: &'static dyn ElementRule<Self> = match name {
            "YEAR" => &YearRule,
            "MONTH_OF_YEAR" => &MonthRule,
            "DAY_OF_MONTH" => &DayOfMonthRule,
            "DAY_OF_WEEK" => &DayOfWeekRule,
            "DAY_OF_YEAR" => &DayOfYearRule,
            _ => return None,
        };
        Some(rule)
    }
}

// ==== IsoTime rules ====

fn time_with(hour: i64, minute: i64, second: i64, nanosecond: i64) -> TemporalResult<IsoTime> {
    let narrow = |value: i64| u8::try_from(value).map_err(|_| invalid("time", value));
    let nanosecond =
        u32::try_from(nanosecond).map_err(|_| invalid("NANO_OF_SECOND", nanosecond))?;
    IsoTime::try_new(narrow(hour)?, narrow(minute)?, narrow(second)?, nanosecond)
}

/// The maximum of a field finer than the hour: zero at `24:00`.
fn finer_maximum(context: &IsoTime, maximum: i64) -> i64 {
    if context.is_end_of_day() {
        0
    } else {
        maximum
    }
}

struct HourRule;

impl ElementRule<IsoTime> for HourRule {
    fn value(&self, context: &IsoTime) -> i64 {
        i64::from(context.hour())
    }

    fn minimum(&self, _: &IsoTime) -> i64 {
        0
    }

    fn maximum(&self, context: &IsoTime) -> i64 {
        if context.minute() == 0 && context.second() == 0 && context.nanosecond() == 0 {
            24
        } else {
            23
        }
    }

    fn with_value(&self, context: &IsoTime, value: i64) -> TemporalResult<IsoTime> {
        if !self.is_valid(context, value) {
            return Err(invalid("ISO_HOUR", value));
        }
        time_with(
            value,
            i64::from(context.minute()),
            i64::from(context.second()),
            i64::from(context.nanosecond()),
        )
    }

    fn advance(&self, context: &IsoTime, amount: i64) -> TemporalResult<IsoTime> {
        context.plus_wrapping(amount, ClockUnit::Hours)
    }

    fn child(&self) -> Option<&'static str> {
        Some("MINUTE_OF_HOUR")
    }

    fn end_of_day_marker(&self) -> Option<i64> {
        Some(24)
    }
}

struct MinuteRule;

impl ElementRule<IsoTime> for MinuteRule {
    fn value(&self, context: &IsoTime) -> i64 {
        i64::from(context.minute())
    }

    fn minimum(&self, _: &IsoTime) -> i64 {
        0
    }

    fn maximum(&self, context: &IsoTime) -> i64 {
        finer_maximum(context, 59)
    }

    fn with_value(&self, context: &IsoTime, value: i64) -> TemporalResult<IsoTime> {
        if !self.is_valid(context, value) {
            return Err(invalid("MINUTE_OF_HOUR", value));
        }
        time_with(
            i64::from(context.hour()),
            value,
            i64::from(context.second()),
            i64::from(context.nanosecond()),
        )
    }

    fn advance(&self, context: &IsoTime, amount: i64) -> TemporalResult<IsoTime> {
        context.plus_wrapping(amount, ClockUnit::Minutes)
    }

    fn child(&self) -> Option<&'static str> {
        Some("SECOND_OF_MINUTE")
    }
}

struct SecondRule;

impl ElementRule<IsoTime> for SecondRule {
    fn value(&self, context: &IsoTime) -> i64 {
        i64::from(context.second())
    }

    fn minimum(&self, _: &IsoTime) -> i64 {
        0
    }

    fn maximum(&self, context: &IsoTime) -> i64 {
        finer_maximum(context, 59)
    }

    fn with_value(&self, context: &IsoTime, value: i64) -> TemporalResult<IsoTime> {
        if !self.is_valid(context, value) {
            return Err(invalid("SECOND_OF_MINUTE", value));
        }
        time_with(
            i64::from(context.hour()),
            i64::from(context.minute()),
            value,
            i64::from(context.nanosecond()),
        )
    }

    fn advance(&self, context: &IsoTime, amount: i64) -> TemporalResult<IsoTime> {
        context.plus_wrapping(amount, ClockUnit::Seconds)
    }

    fn child(&self) -> Option<&'static str> {
        Some("NANO_OF_SECOND")
    }
}

/// A sub-second fraction with 3, 6 or 9 digits.
struct FractionRule {
    digits: u32,
    unit: ClockUnit,
}

impl FractionRule {
    /// Nanoseconds per unit of this fraction.
    const fn scale(&self) -> i64 {
        self.unit.nanos()
    }
}

impl ElementRule<IsoTime> for FractionRule {
    fn value(&self, context: &IsoTime) -> i64 {
        i64::from(context.nanosecond()) / self.scale()
    }

    fn minimum(&self, _: &IsoTime) -> i64 {
        0
    }

    fn maximum(&self, context: &IsoTime) -> i64 {
        finer_maximum(context, 1_000_000_000 / self.scale() - 1)
    }

    /// Sets the fraction and keeps the digits below it.
    fn with_value(&self, context: &IsoTime, value: i64) -> TemporalResult<IsoTime> {
        if !self.is_valid(context, value) {
            return Err(invalid("fraction of second", value));
        }
        let below = i64::from(context.nanosecond()) % self.scale();
        time_with(
            i64::from(context.hour()),
            i64::from(context.minute()),
            i64::from(context.second()),
            value * self.scale() + below,
        )
    }

    fn advance(&self, context: &IsoTime, amount: i64) -> TemporalResult<IsoTime> {
        context.plus_wrapping(amount, self.unit)
    }

    fn fraction_digits(&self) -> Option<u32> {
        Some(self.digits)
    }
}

static MILLI_RULE: FractionRule = FractionRule {
    digits: 3,
    unit: ClockUnit::Millis,
};
static MICRO_RULE: FractionRule = FractionRule {
    digits: 6,
    unit: ClockUnit::Micros,
};
static NANO_RULE: FractionRule = FractionRule {
    digits: 9,
    unit: ClockUnit::Nanos,
};

impl ChronoEntity for IsoTime {
    fn element_rule(name: &str) -> Option<&'static dyn ElementRule<Self>> {
        let rule: &'static dyn ElementRule<Self> = match name {
            "ISO_HOUR" => &HourRule,
            "MINUTE_OF_HOUR" => &MinuteRule,
            "SECOND_OF_MINUTE" => &SecondRule,
            "MILLI_OF_SECOND" => &MILLI_RULE,
            "MICRO_OF_SECOND" => &MICRO_RULE,
            "NANO_OF_SECOND" => &NANO_RULE,
            _ => return None,
        };
        Some(rule)
    }
}

// ==== IsoDateTime delegates ====

/// Resolves a date element on the date part of a date-time.
struct DateDelegate(&'static dyn ElementRule<IsoDate>);

impl ElementRule<IsoDateTime> for DateDelegate {
    fn value(&self, context: &IsoDateTime) -> i64 {
        self.0.value(&context.date())
    }

    fn minimum(&self, context: &IsoDateTime) -> i64 {
        self.0.minimum(&context.date())
    }

    fn maximum(&self, context: &IsoDateTime) -> i64 {
        self.0.maximum(&context.date())
    }

    fn with_value(&self, context: &IsoDateTime, value: i64) -> TemporalResult<IsoDateTime> {
        IsoDateTime::try_new(self.0.with_value(&context.date(), value)?, context.time())
    }

    fn advance(&self, context: &IsoDateTime, amount: i64) -> TemporalResult<IsoDateTime> {
        IsoDateTime::try_new(self.0.advance(&context.date(), amount)?, context.time())
    }

    fn child(&self) -> Option<&'static str> {
        self.0.child().or(Some("ISO_HOUR"))
    }
}

/// Resolves a time element on the time part of a date-time. Moving the
/// element carries into the date.
struct TimeDelegate {
    inner: &'static dyn ElementRule<IsoTime>,
    unit: ClockUnit,
}

impl ElementRule<IsoDateTime> for TimeDelegate {
    fn value(&self, context: &IsoDateTime) -> i64 {
        self.inner.value(&context.time())
    }

    fn minimum(&self, context: &IsoDateTime) -> i64 {
        self.inner.minimum(&context.time())
    }

    fn maximum(&self, context: &IsoDateTime) -> i64 {
        // A date-time never shows 24:00.
        match self.inner.end_of_day_marker() {
            Some(marker) => marker - 1,
            None => self.inner.maximum(&context.time()),
        }
    }

    fn with_value(&self, context: &IsoDateTime, value: i64) -> TemporalResult<IsoDateTime> {
        if !self.is_valid(context, value) {
            return Err(invalid("time element", value));
        }
        IsoDateTime::try_new(context.date(), self.inner.with_value(&context.time(), value)?)
    }

    fn advance(&self, context: &IsoDateTime, amount: i64) -> TemporalResult<IsoDateTime> {
        ClockRule::new(self.unit).add_to(context, amount)
    }

    fn child(&self) -> Option<&'static str> {
        self.inner.child()
    }

    fn fraction_digits(&self) -> Option<u32> {
        self.inner.fraction_digits()
    }
}

static DT_YEAR: DateDelegate = DateDelegate(&YearRule);
static DT_MONTH: DateDelegate = DateDelegate(&MonthRule);
static DT_DAY_OF_MONTH: DateDelegate = DateDelegate(&DayOfMonthRule);
static DT_DAY_OF_WEEK: DateDelegate = DateDelegate(&DayOfWeekRule);
static DT_DAY_OF_YEAR: DateDelegate = DateDelegate(&DayOfYearRule);
static DT_HOUR: TimeDelegate = TimeDelegate {
    inner: &HourRule,
    unit: ClockUnit::Hours,
};
static DT_MINUTE: TimeDelegate = TimeDelegate {
    inner: &MinuteRule,
    unit: ClockUnit::Minutes,
};
static DT_SECOND: TimeDelegate = TimeDelegate {
    inner: &SecondRule,
    unit: ClockUnit::Seconds,
};
static DT_MILLI: TimeDelegate = TimeDelegate {
    inner: &MILLI_RULE,
    unit: ClockUnit::Millis,
};
static DT_MICRO: TimeDelegate = TimeDelegate {
    inner: &MICRO_RULE,
    unit: ClockUnit::Micros,
};
static DT_NANO: TimeDelegate = TimeDelegate {
    inner: &NANO_RULE,
    unit: ClockUnit::Nanos,
};

impl ChronoEntity for IsoDateTime {
    fn element_rule(name: &str) -> Option<&'static dyn ElementRule<Self>> {
        let rule: &'static dyn ElementRule<Self> = match name {
            "YEAR" => &DT_YEAR,
            "MONTH_OF_YEAR" => &DT_MONTH,
            "DAY_OF_MONTH" => &DT_DAY_OF_MONTH,
            "DAY_OF_WEEK" => &DT_DAY_OF_WEEK,
            "DAY_OF_YEAR" => &DT_DAY_OF_YEAR,
            "ISO_HOUR" => &DT_HOUR,
            "MINUTE_OF_HOUR" => &DT_MINUTE,
            "SECOND_OF_MINUTE" => &DT_SECOND,
            "MILLI_OF_SECOND" => &DT_MILLI,
            "MICRO_OF_SECOND" => &DT_MICRO,
            "NANO_OF_SECOND" => &DT_NANO,
            _ => return None,
        };
        Some(rule)
    }
}
