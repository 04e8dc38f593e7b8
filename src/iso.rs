//! This module implements the reference ISO-8601 chronology.
//!
//! The three time point types are:
//!   - `IsoDate`
//!   - `IsoTime`
//!   - `IsoDateTime`
//!
//! An `IsoDate` is a date of the proleptic Gregorian calendar within the
//! years [`MIN_YEAR`] to [`MAX_YEAR`].
//!
//! An `IsoTime` is a wall time with nanosecond precision. The hour 24 is
//! allowed as the distinct end-of-day marker `24:00`, but only with all
//! finer fields zero.
//!
//! An `IsoDateTime` combines both. It never carries `24:00`; that time is
//! normalized to midnight of the following day.

use core::fmt;

use date_equations::gregorian;
use tinystr::tinystr;
use writeable::Writeable;

use crate::{
    components::{
        chronology::{
            CalendarDate, CalendarEra, CalendarSystem, Chronology, MonthBasedCalendar, TimePoint,
            UnitRule,
        },
        overflow::{CalendarRule, OverflowUnit},
        unit::{CalendarUnit, ClockUnit, IsoUnit},
    },
    options::OverflowPolicy,
    utils, TemporalError, TemporalResult, NS_PER_DAY,
};

mod elements;

#[cfg(test)]
mod tests;

pub use elements::{
    Month, Weekday, DAY_OF_MONTH, DAY_OF_WEEK, DAY_OF_YEAR, ISO_HOUR, MICRO_OF_SECOND,
    MILLI_OF_SECOND, MINUTE_OF_HOUR, MONTH_OF_YEAR, NANO_OF_SECOND, SECOND_OF_MINUTE, YEAR,
};

/// The smallest supported ISO year.
pub const MIN_YEAR: i32 = -99_999;
/// The largest supported ISO year.
pub const MAX_YEAR: i32 = 99_999;

const MIN_DAY_NUMBER: i64 = gregorian::epoch_days_from_ymd(MIN_YEAR, 1, 1);
const MAX_DAY_NUMBER: i64 = gregorian::epoch_days_from_ymd(MAX_YEAR, 12, 31);

static ISO_ERAS: [CalendarEra; 2] = [
    CalendarEra::new(tinystr!(8, "bce"), MIN_DAY_NUMBER),
    CalendarEra::new(tinystr!(8, "ce"), gregorian::epoch_days_from_ymd(1, 1, 1)),
];

// ==== IsoCalendar ====

/// The proleptic Gregorian calendar.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IsoCalendar;

impl IsoCalendar {
    fn year_and_month(month_index: i64) -> TemporalResult<(i32, u8)> {
        let year = utils::to_i32(month_index.div_euclid(12))?;
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(TemporalError::range().with_message("Year out of ISO range."));
        }
        Ok((year, (month_index.rem_euclid(12) + 1) as u8))
    }
}

impl CalendarSystem for IsoCalendar {
    type Date = IsoDate;

    fn to_date(&self, day_number: i64) -> TemporalResult<IsoDate> {
        IsoDate::from_epoch_days(day_number)
    }

    fn to_day_number(&self, date: &IsoDate) -> i64 {
        date.to_epoch_days()
    }

    fn min_day_number(&self) -> i64 {
        MIN_DAY_NUMBER
    }

    fn max_day_number(&self) -> i64 {
        MAX_DAY_NUMBER
    }

    fn eras(&self) -> &'static [CalendarEra] {
        &ISO_ERAS
    }
}

impl MonthBasedCalendar for IsoCalendar {
    fn month_index(&self, date: &IsoDate) -> i64 {
        i64::from(date.year) * 12 + i64::from(date.month) - 1
    }

    fn day_of_month(&self, date: &IsoDate) -> i64 {
        i64::from(date.day)
    }

    fn days_in_month(&self, month_index: i64) -> TemporalResult<i64> {
        let (year, month) = Self::year_and_month(month_index)?;
        Ok(i64::from(gregorian::days_in_month(year, month)))
    }

    fn date_from_month_index(&self, month_index: i64, day: i64) -> TemporalResult<IsoDate> {
        let (year, month) = Self::year_and_month(month_index)?;
        let day = u8::try_from(day)
            .map_err(|_| TemporalError::range().with_message("Day of month out of range."))?;
        IsoDate::try_new(year, month, day)
    }
}

// ==== IsoDate ====

/// A date of the ISO calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate {
    year: i32,
    month: u8,
    day: u8,
}

impl IsoDate {
    /// Creates a date without validation.
    #[inline]
    pub(crate) const fn new_unchecked(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Creates a validated date.
    pub fn try_new(year: i32, month: u8, day: u8) -> TemporalResult<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(TemporalError::range().with_message("Year out of ISO range."));
        }
        if !(1..=12).contains(&month) {
            return Err(TemporalError::range().with_message("Month out of range."));
        }
        if day < 1 || day > gregorian::days_in_month(year, month) {
            return Err(TemporalError::range().with_message("Day of month out of range."));
        }
        Ok(Self::new_unchecked(year, month, day))
    }

    /// Creates the date of the given epoch days.
    pub fn from_epoch_days(epoch_days: i64) -> TemporalResult<Self> {
        if !(MIN_DAY_NUMBER..=MAX_DAY_NUMBER).contains(&epoch_days) {
            return Err(TemporalError::range().with_message("Epoch days out of ISO range."));
        }
        let (year, month, day) = gregorian::ymd_from_epoch_days(epoch_days);
        Ok(Self::new_unchecked(year, month, day))
    }

    #[inline]
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[inline]
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    #[inline]
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Returns the days since 1970-01-01.
    #[inline]
    #[must_use]
    pub const fn to_epoch_days(&self) -> i64 {
        gregorian::epoch_days_from_ymd(self.year, self.month, self.day)
    }

    #[inline]
    #[must_use]
    pub const fn is_leap_year(&self) -> bool {
        gregorian::is_leap_year(self.year)
    }

    #[inline]
    #[must_use]
    pub const fn days_in_month(&self) -> u8 {
        gregorian::days_in_month(self.year, self.month)
    }

    #[inline]
    #[must_use]
    pub const fn days_in_year(&self) -> u16 {
        if self.is_leap_year() {
            366
        } else {
            365
        }
    }

    /// Returns the day of the year, starting at 1.
    #[inline]
    #[must_use]
    pub const fn day_of_year(&self) -> u16 {
        (self.to_epoch_days() - gregorian::epoch_days_from_ymd(self.year, 1, 1) + 1) as u16
    }

    #[inline]
    #[must_use]
    pub const fn day_of_week(&self) -> Weekday {
        Weekday::from_iso_number(gregorian::weekday_from_epoch_days(self.to_epoch_days()))
    }

    /// Returns the era of this date.
    #[must_use]
    pub fn era(&self) -> Option<&'static CalendarEra> {
        IsoCalendar.era(self)
    }

    /// Adds days to this date.
    pub fn plus_days(&self, days: i64) -> TemporalResult<Self> {
        IsoCalendar.plus_days(self, days)
    }
}

impl CalendarDate for IsoDate {
    type Calendar = IsoCalendar;
    type WallTime = ();

    fn calendar(&self) -> IsoCalendar {
        IsoCalendar
    }

    fn calendar_date(&self) -> IsoDate {
        *self
    }

    fn wall_time(&self) {}

    fn with_calendar_date(&self, date: IsoDate) -> Self {
        date
    }
}

// ==== IsoTime ====

/// A wall time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoTime {
    hour: u8,
    minute: u8,
    second: u8,
    nanosecond: u32,
}

impl IsoTime {
    /// 00:00
    pub const MIDNIGHT: Self = Self::new_unchecked(0, 0, 0, 0);
    /// 24:00
    pub const END_OF_DAY: Self = Self::new_unchecked(24, 0, 0, 0);

    #[inline]
    pub(crate) const fn new_unchecked(hour: u8, minute: u8, second: u8, nanosecond: u32) -> Self {
        Self {
            hour,
            minute,
            second,
            nanosecond,
        }
    }

    /// Creates a validated wall time.
    pub fn try_new(hour: u8, minute: u8, second: u8, nanosecond: u32) -> TemporalResult<Self> {
        let end_of_day = hour == 24 && minute == 0 && second == 0 && nanosecond == 0;
        if (hour > 23 && !end_of_day) || minute > 59 || second > 59 || nanosecond > 999_999_999 {
            return Err(TemporalError::range().with_message("Time is not valid."));
        }
        Ok(Self::new_unchecked(hour, minute, second, nanosecond))
    }

    /// Creates a wall time from the nanoseconds since midnight, where
    /// `NS_PER_DAY` maps to `24:00`.
    pub fn from_nano_of_day(nanos: i64) -> TemporalResult<Self> {
        if !(0..=NS_PER_DAY).contains(&nanos) {
            return Err(TemporalError::range().with_message("Nano of day out of range."));
        }
        let hour = nanos / ClockUnit::Hours.nanos();
        let minute = nanos % ClockUnit::Hours.nanos() / ClockUnit::Minutes.nanos();
        let second = nanos % ClockUnit::Minutes.nanos() / ClockUnit::Seconds.nanos();
        let nanosecond = nanos % ClockUnit::Seconds.nanos();
        Ok(Self::new_unchecked(
            hour as u8,
            minute as u8,
            second as u8,
            nanosecond as u32,
        ))
    }

    #[inline]
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    #[inline]
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    #[inline]
    #[must_use]
    pub const fn second(&self) -> u8 {
        self.second
    }

    #[inline]
    #[must_use]
    pub const fn nanosecond(&self) -> u32 {
        self.nanosecond
    }

    /// Whether this is the end-of-day marker `24:00`.
    #[inline]
    #[must_use]
    pub const fn is_end_of_day(&self) -> bool {
        self.hour == 24
    }

    /// Returns the nanoseconds since midnight; `24:00` yields `NS_PER_DAY`.
    #[inline]
    #[must_use]
    pub const fn nano_of_day(&self) -> i64 {
        self.hour as i64 * ClockUnit::Hours.nanos()
            + self.minute as i64 * ClockUnit::Minutes.nanos()
            + self.second as i64 * ClockUnit::Seconds.nanos()
            + self.nanosecond as i64
    }

    /// Adds clock units, wrapping around midnight. Adding zero returns
    /// `self`, so `24:00` is only kept in that case.
    pub(crate) fn plus_wrapping(&self, amount: i64, unit: ClockUnit) -> TemporalResult<Self> {
        if amount == 0 {
            return Ok(*self);
        }
        let delta = i128::from(amount) * i128::from(unit.nanos());
        let nanos = (i128::from(self.nano_of_day()) + delta).rem_euclid(i128::from(NS_PER_DAY));
        Self::from_nano_of_day(nanos as i64)
    }

    /// Adds clock units like [`Self::plus_wrapping`], except that a forward
    /// sum landing exactly on the end of the current day yields `24:00`.
    fn plus_clock(&self, amount: i64, unit: ClockUnit) -> TemporalResult<Self> {
        let delta = i128::from(amount) * i128::from(unit.nanos());
        if amount > 0 && i128::from(self.nano_of_day()) + delta == i128::from(NS_PER_DAY) {
            return Ok(Self::END_OF_DAY);
        }
        self.plus_wrapping(amount, unit)
    }
}

// ==== IsoDateTime ====

/// A date with a wall time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDateTime {
    date: IsoDate,
    time: IsoTime,
}

impl IsoDateTime {
    /// Creates a date-time; `24:00` is normalized to midnight of the next day.
    pub fn try_new(date: IsoDate, time: IsoTime) -> TemporalResult<Self> {
        if time.is_end_of_day() {
            return Ok(Self {
                date: date.plus_days(1)?,
                time: IsoTime::MIDNIGHT,
            });
        }
        Ok(Self { date, time })
    }

    #[inline]
    #[must_use]
    pub const fn date(&self) -> IsoDate {
        self.date
    }

    #[inline]
    #[must_use]
    pub const fn time(&self) -> IsoTime {
        self.time
    }

    /// Nanoseconds since 1970-01-01T00:00.
    fn epoch_nanos(&self) -> i128 {
        i128::from(self.date.to_epoch_days()) * i128::from(NS_PER_DAY)
            + i128::from(self.time.nano_of_day())
    }

    /// Adds clock units, carrying whole days into the date.
    fn plus_carrying(&self, amount: i64, unit: ClockUnit) -> TemporalResult<Self> {
        if amount == 0 {
            return Ok(*self);
        }
        let total = self.epoch_nanos() + i128::from(amount) * i128::from(unit.nanos());
        let days = i64::try_from(total.div_euclid(i128::from(NS_PER_DAY)))
            .map_err(|_| TemporalError::arithmetic().with_message("Date-time out of range."))?;
        let nanos = total.rem_euclid(i128::from(NS_PER_DAY)) as i64;
        Ok(Self {
            date: IsoDate::from_epoch_days(days)?,
            time: IsoTime::from_nano_of_day(nanos)?,
        })
    }
}

impl CalendarDate for IsoDateTime {
    type Calendar = IsoCalendar;
    type WallTime = IsoTime;

    fn calendar(&self) -> IsoCalendar {
        IsoCalendar
    }

    fn calendar_date(&self) -> IsoDate {
        self.date
    }

    fn wall_time(&self) -> IsoTime {
        self.time
    }

    fn with_calendar_date(&self, date: IsoDate) -> Self {
        Self {
            date,
            time: self.time,
        }
    }
}

// ==== Clock rule ====

/// The unit rule of a clock unit on the ISO time types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockRule {
    unit: ClockUnit,
}

impl ClockRule {
    #[inline]
    #[must_use]
    pub const fn new(unit: ClockUnit) -> Self {
        Self { unit }
    }

    fn count(&self, nanos: i128) -> TemporalResult<i64> {
        i64::try_from(nanos / i128::from(self.unit.nanos()))
            .map_err(|_| TemporalError::arithmetic().with_message("Distance out of range."))
    }
}

impl UnitRule<IsoTime> for ClockRule {
    fn add_to(&self, point: &IsoTime, amount: i64) -> TemporalResult<IsoTime> {
        point.plus_clock(amount, self.unit)
    }

    fn between(&self, start: &IsoTime, end: &IsoTime) -> TemporalResult<i64> {
        self.count(i128::from(end.nano_of_day() - start.nano_of_day()))
    }
}

impl UnitRule<IsoDateTime> for ClockRule {
    fn add_to(&self, point: &IsoDateTime, amount: i64) -> TemporalResult<IsoDateTime> {
        point.plus_carrying(amount, self.unit)
    }

    fn between(&self, start: &IsoDateTime, end: &IsoDateTime) -> TemporalResult<i64> {
        self.count(end.epoch_nanos() - start.epoch_nanos())
    }
}

// ==== Chronologies ====

fn unsupported<U: fmt::Display>(unit: U, target: &str) -> TemporalError {
    TemporalError::rule_not_found()
        .with_message(alloc::format!("Unit {unit} is not supported on {target}."))
}

/// The chronology of [`IsoDate`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IsoDateChronology;

impl Chronology<CalendarUnit> for IsoDateChronology {
    type Point = IsoDate;
    type Rule = CalendarRule<IsoCalendar>;

    fn rule(&self, unit: CalendarUnit) -> TemporalResult<Self::Rule> {
        Ok(CalendarRule::new(IsoCalendar, unit, OverflowPolicy::default()))
    }
}

impl Chronology<OverflowUnit> for IsoDateChronology {
    type Point = IsoDate;
    type Rule = CalendarRule<IsoCalendar>;

    fn rule(&self, unit: OverflowUnit) -> TemporalResult<Self::Rule> {
        Ok(CalendarRule::for_overflow_unit(IsoCalendar, unit))
    }
}

impl Chronology<IsoUnit> for IsoDateChronology {
    type Point = IsoDate;
    type Rule = CalendarRule<IsoCalendar>;

    fn rule(&self, unit: IsoUnit) -> TemporalResult<Self::Rule> {
        match unit {
            IsoUnit::Calendar(unit) => Chronology::<CalendarUnit>::rule(self, unit),
            IsoUnit::Overflow(unit) => Chronology::<OverflowUnit>::rule(self, unit),
            IsoUnit::Clock(_) => Err(unsupported(unit, "IsoDate")),
        }
    }
}

/// The chronology of [`IsoTime`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IsoTimeChronology;

impl Chronology<ClockUnit> for IsoTimeChronology {
    type Point = IsoTime;
    type Rule = ClockRule;

    fn rule(&self, unit: ClockUnit) -> TemporalResult<ClockRule> {
        Ok(ClockRule::new(unit))
    }
}

impl Chronology<IsoUnit> for IsoTimeChronology {
    type Point = IsoTime;
    type Rule = ClockRule;

    fn rule(&self, unit: IsoUnit) -> TemporalResult<ClockRule> {
        match unit {
            IsoUnit::Clock(unit) => Ok(ClockRule::new(unit)),
            _ => Err(unsupported(unit, "IsoTime")),
        }
    }
}

/// The chronology of [`IsoDateTime`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IsoDateTimeChronology;

/// The unit rules of [`IsoDateTime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsoDateTimeRule {
    Calendar(CalendarRule<IsoCalendar>),
    Clock(ClockRule),
}

impl UnitRule<IsoDateTime> for IsoDateTimeRule {
    fn add_to(&self, point: &IsoDateTime, amount: i64) -> TemporalResult<IsoDateTime> {
        match self {
            Self::Calendar(rule) => rule.add_to(point, amount),
            Self::Clock(rule) => rule.add_to(point, amount),
        }
    }

    fn between(&self, start: &IsoDateTime, end: &IsoDateTime) -> TemporalResult<i64> {
        match self {
            Self::Calendar(rule) => rule.between(start, end),
            Self::Clock(rule) => rule.between(start, end),
        }
    }
}

impl Chronology<CalendarUnit> for IsoDateTimeChronology {
    type Point = IsoDateTime;
    type Rule = CalendarRule<IsoCalendar>;

    fn rule(&self, unit: CalendarUnit) -> TemporalResult<Self::Rule> {
        Ok(CalendarRule::new(IsoCalendar, unit, OverflowPolicy::default()))
    }
}

impl Chronology<OverflowUnit> for IsoDateTimeChronology {
    type Point = IsoDateTime;
    type Rule = CalendarRule<IsoCalendar>;

    fn rule(&self, unit: OverflowUnit) -> TemporalResult<Self::Rule> {
        Ok(CalendarRule::for_overflow_unit(IsoCalendar, unit))
    }
}

impl Chronology<ClockUnit> for IsoDateTimeChronology {
    type Point = IsoDateTime;
    type Rule = ClockRule;

    fn rule(&self, unit: ClockUnit) -> TemporalResult<ClockRule> {
        Ok(ClockRule::new(unit))
    }
}

impl Chronology<IsoUnit> for IsoDateTimeChronology {
    type Point = IsoDateTime;
    type Rule = IsoDateTimeRule;

    fn rule(&self, unit: IsoUnit) -> TemporalResult<IsoDateTimeRule> {
        Ok(match unit {
            IsoUnit::Calendar(unit) => IsoDateTimeRule::Calendar(CalendarRule::new(
                IsoCalendar,
                unit,
                OverflowPolicy::default(),
            )),
            IsoUnit::Overflow(unit) => {
                IsoDateTimeRule::Calendar(CalendarRule::for_overflow_unit(IsoCalendar, unit))
            }
            IsoUnit::Clock(unit) => IsoDateTimeRule::Clock(ClockRule::new(unit)),
        })
    }
}

macro_rules! impl_time_point {
    ($point:ty, $chronology:ty, [$($unit:ty),+]) => {
        $(
            impl TimePoint<$unit> for $point {
                type Chronology = $chronology;

                fn chronology(&self) -> $chronology {
                    <$chronology>::default()
                }
            }
        )+
    };
}

impl_time_point!(IsoDate, IsoDateChronology, [CalendarUnit, OverflowUnit, IsoUnit]);
impl_time_point!(IsoTime, IsoTimeChronology, [ClockUnit, IsoUnit]);
impl_time_point!(
    IsoDateTime,
    IsoDateTimeChronology,
    [CalendarUnit, OverflowUnit, ClockUnit, IsoUnit]
);

// ==== Text form ====

fn write_padded<W: fmt::Write + ?Sized>(value: u32, width: usize, sink: &mut W) -> fmt::Result {
    let mut digits = 1;
    let mut rest = value / 10;
    while rest > 0 {
        digits += 1;
        rest /= 10;
    }
    for _ in digits..width {
        sink.write_char('0')?;
    }
    value.write_to(sink)
}

impl Writeable for IsoDate {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        if (0..=9999).contains(&self.year) {
            write_padded(self.year as u32, 4, sink)?;
        } else {
            sink.write_char(if self.year < 0 { '-' } else { '+' })?;
            write_padded(self.year.unsigned_abs(), 6, sink)?;
        }
        sink.write_char('-')?;
        write_padded(u32::from(self.month), 2, sink)?;
        sink.write_char('-')?;
        write_padded(u32::from(self.day), 2, sink)
    }
}

impl Writeable for IsoTime {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        write_padded(u32::from(self.hour), 2, sink)?;
        sink.write_char(':')?;
        write_padded(u32::from(self.minute), 2, sink)?;
        if self.second == 0 && self.nanosecond == 0 {
            return Ok(());
        }
        sink.write_char(':')?;
        write_padded(u32::from(self.second), 2, sink)?;
        if self.nanosecond == 0 {
            return Ok(());
        }
        sink.write_char('.')?;
        write_padded(self.nanosecond, 9, sink)
    }
}

impl Writeable for IsoDateTime {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        self.date.write_to(sink)?;
        sink.write_char('T')?;
        self.time.write_to(sink)
    }
}

writeable::impl_display_with_writeable!(IsoDate);
writeable::impl_display_with_writeable!(IsoTime);
writeable::impl_display_with_writeable!(IsoDateTime);
