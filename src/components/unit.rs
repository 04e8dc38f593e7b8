//! Units of temporal distance.
//!
//! A unit is a typed tag for a quantity of time. Its estimated average
//! length in seconds decides whether amounts of two units can be
//! converted into each other.

use core::{fmt, hash::Hash};

use crate::{components::overflow::OverflowUnit, options::OverflowPolicy};

/// Seconds per day.
const DAY_SECONDS: f64 = 86_400.0;
/// The average length of a Gregorian month in seconds.
const MONTH_SECONDS: f64 = 2_629_746.0;

/// A unit of temporal distance.
pub trait Unit: Copy + Eq + Hash + fmt::Debug + fmt::Display + 'static {
    /// The estimated average length of this unit in seconds.
    fn length(&self) -> f64;

    /// Whether this unit is at least one day long.
    fn is_calendrical(&self) -> bool {
        self.length() >= DAY_SECONDS
    }

    /// The symbol used in the textual form of a duration.
    fn symbol(&self) -> char;

    /// Whether amounts of this unit may be folded into amounts of `other`.
    fn is_compatible(&self, other: &Self) -> bool;
}

/// A unit whose symbol identifies it unambiguously, so that durations in
/// it can be read back from their text form.
pub trait UnitSymbol: Unit {
    /// Resolves a unit from its symbol.
    fn from_symbol(symbol: char) -> Option<Self>;
}

// ==== CalendarUnit ====

/// The calendrical units of the ISO calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CalendarUnit {
    /// 1000 years
    Millennia,
    /// 100 years
    Centuries,
    /// 10 years
    Decades,
    Years,
    /// 3 months
    Quarters,
    Months,
    Weeks,
    Days,
}

impl CalendarUnit {
    /// All calendar units, coarsest first.
    pub const ALL: [Self; 8] = [
        Self::Millennia,
        Self::Centuries,
        Self::Decades,
        Self::Years,
        Self::Quarters,
        Self::Months,
        Self::Weeks,
        Self::Days,
    ];

    /// The number of months in this unit, for units of the month family.
    #[inline]
    #[must_use]
    pub const fn months(self) -> Option<i64> {
        match self {
            Self::Millennia => Some(12_000),
            Self::Centuries => Some(1_200),
            Self::Decades => Some(120),
            Self::Years => Some(12),
            Self::Quarters => Some(3),
            Self::Months => Some(1),
            Self::Weeks | Self::Days => None,
        }
    }

    /// The number of days in this unit, for units of the day family.
    #[inline]
    #[must_use]
    pub const fn days(self) -> Option<i64> {
        match self {
            Self::Weeks => Some(7),
            Self::Days => Some(1),
            _ => None,
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// Returns this unit decorated with an overflow policy.
    #[inline]
    #[must_use]
    pub const fn with_policy(self, policy: OverflowPolicy) -> OverflowUnit {
        OverflowUnit::new(self, policy)
    }

    #[inline]
    #[must_use]
    pub const fn previous_valid_date(self) -> OverflowUnit {
        self.with_policy(OverflowPolicy::PreviousValidDate)
    }

    #[inline]
    #[must_use]
    pub const fn next_valid_date(self) -> OverflowUnit {
        self.with_policy(OverflowPolicy::NextValidDate)
    }

    #[inline]
    #[must_use]
    pub const fn at_end_of_month(self) -> OverflowUnit {
        self.with_policy(OverflowPolicy::EndOfMonth)
    }

    #[inline]
    #[must_use]
    pub const fn with_carry_over(self) -> OverflowUnit {
        self.with_policy(OverflowPolicy::CarryOver)
    }

    #[inline]
    #[must_use]
    pub const fn unless_invalid(self) -> OverflowUnit {
        self.with_policy(OverflowPolicy::UnlessInvalid)
    }

    #[inline]
    #[must_use]
    pub const fn keeping_end_of_month(self) -> OverflowUnit {
        self.with_policy(OverflowPolicy::KeepingLastDate)
    }

    #[inline]
    #[must_use]
    pub const fn with_joda_metric(self) -> OverflowUnit {
        self.with_policy(OverflowPolicy::JodaMetric)
    }
}

impl Unit for CalendarUnit {
    fn length(&self) -> f64 {
        match (self.months(), self.days()) {
            (Some(months), _) => months as f64 * MONTH_SECONDS,
            (_, Some(days)) => days as f64 * DAY_SECONDS,
            (None, None) => 0.0,
        }
    }

    fn symbol(&self) -> char {
        match self {
            Self::Millennia => 'I',
            Self::Centuries => 'C',
            Self::Decades => 'E',
            Self::Years => 'Y',
            Self::Quarters => 'Q',
            Self::Months => 'M',
            Self::Weeks => 'W',
            Self::Days => 'D',
        }
    }

    fn is_compatible(&self, _: &Self) -> bool {
        true
    }
}

impl UnitSymbol for CalendarUnit {
    fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|unit| unit.symbol() == symbol)
    }
}

impl fmt::Display for CalendarUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        f.write_char(self.symbol())
    }
}

// ==== ClockUnit ====

/// The clock units of the ISO time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClockUnit {
    Hours,
    Minutes,
    Seconds,
    Millis,
    Micros,
    Nanos,
}

impl ClockUnit {
    /// All clock units, coarsest first.
    pub const ALL: [Self; 6] = [
        Self::Hours,
        Self::Minutes,
        Self::Seconds,
        Self::Millis,
        Self::Micros,
        Self::Nanos,
    ];

    /// The number of nanoseconds in this unit.
    #[inline]
    #[must_use]
    pub const fn nanos(self) -> i64 {
        match self {
            Self::Hours => 3_600_000_000_000,
            Self::Minutes => 60_000_000_000,
            Self::Seconds => 1_000_000_000,
            Self::Millis => 1_000_000,
            Self::Micros => 1_000,
            Self::Nanos => 1,
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl Unit for ClockUnit {
    fn length(&self) -> f64 {
        self.nanos() as f64 / 1e9
    }

    fn symbol(&self) -> char {
        match self {
            Self::Hours => 'H',
            Self::Minutes => 'M',
            Self::Seconds => 'S',
            Self::Millis => '3',
            Self::Micros => '6',
            Self::Nanos => '9',
        }
    }

    fn is_compatible(&self, _: &Self) -> bool {
        true
    }
}

impl UnitSymbol for ClockUnit {
    fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|unit| unit.symbol() == symbol)
    }
}

impl fmt::Display for ClockUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        f.write_char(self.symbol())
    }
}

// ==== IsoUnit ====

/// Any unit usable on an ISO date-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IsoUnit {
    Calendar(CalendarUnit),
    Overflow(OverflowUnit),
    Clock(ClockUnit),
}

impl Unit for IsoUnit {
    fn length(&self) -> f64 {
        match self {
            Self::Calendar(unit) => unit.length(),
            Self::Overflow(unit) => unit.length(),
            Self::Clock(unit) => unit.length(),
        }
    }

    fn symbol(&self) -> char {
        match self {
            Self::Calendar(unit) => unit.symbol(),
            Self::Overflow(unit) => unit.symbol(),
            Self::Clock(unit) => unit.symbol(),
        }
    }

    fn is_compatible(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Calendar(a), Self::Calendar(b)) => a.is_compatible(b),
            (Self::Overflow(a), Self::Overflow(b)) => a.is_compatible(b),
            (Self::Clock(a), Self::Clock(b)) => a.is_compatible(b),
            _ => false,
        }
    }
}

impl fmt::Display for IsoUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Calendar(unit) => fmt::Display::fmt(unit, f),
            Self::Overflow(unit) => fmt::Display::fmt(unit, f),
            Self::Clock(unit) => fmt::Display::fmt(unit, f),
        }
    }
}

impl From<CalendarUnit> for IsoUnit {
    fn from(value: CalendarUnit) -> Self {
        Self::Calendar(value)
    }
}

impl From<OverflowUnit> for IsoUnit {
    fn from(value: OverflowUnit) -> Self {
        Self::Overflow(value)
    }
}

impl From<ClockUnit> for IsoUnit {
    fn from(value: ClockUnit) -> Self {
        Self::Clock(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{CalendarUnit, ClockUnit, IsoUnit, Unit, UnitSymbol};
    use crate::options::OverflowPolicy;

    #[test]
    fn calendrical_flag() {
        assert!(CalendarUnit::Days.is_calendrical());
        assert!(CalendarUnit::Millennia.is_calendrical());
        assert!(!ClockUnit::Hours.is_calendrical());
        assert_eq!(CalendarUnit::Years.length(), 31_556_952.0);
        assert_eq!(CalendarUnit::Months.length(), 2_629_746.0);
    }

    #[test]
    fn symbols_resolve() {
        for unit in CalendarUnit::ALL {
            assert_eq!(CalendarUnit::from_symbol(unit.symbol()), Some(unit));
        }
        for unit in ClockUnit::ALL {
            assert_eq!(ClockUnit::from_symbol(unit.symbol()), Some(unit));
        }
        assert_eq!(CalendarUnit::from_symbol('H'), None);
    }

    #[test]
    fn iso_unit_compatibility() {
        let months = IsoUnit::from(CalendarUnit::Months);
        let years = IsoUnit::from(CalendarUnit::Years);
        let hours = IsoUnit::from(ClockUnit::Hours);
        let carry = IsoUnit::from(CalendarUnit::Months.with_carry_over());
        let carry_years = IsoUnit::from(CalendarUnit::Years.with_carry_over());
        let clamp = IsoUnit::from(CalendarUnit::Years.with_policy(OverflowPolicy::EndOfMonth));

        assert!(years.is_compatible(&months));
        assert!(!months.is_compatible(&hours));
        assert!(!months.is_compatible(&carry));
        assert!(carry_years.is_compatible(&carry));
        assert!(!clamp.is_compatible(&carry));
    }
}
