//! This module implements `Duration` along with its items and the
//! algorithm applying a time span to a time point.

use alloc::vec::Vec;
use core::{fmt, str::FromStr};

use writeable::Writeable;

use crate::{
    components::{
        chronology::{Chronology, TimePoint},
        normalizer::Normalizer,
        unit::{CalendarUnit, ClockUnit, Unit, UnitSymbol},
    },
    utils, Sign, TemporalError, TemporalResult,
};

#[cfg(test)]
mod tests;

/// The text form of the empty duration.
const ZERO_TEXT: &str = "PT0S";

// ==== Item ====

/// A non-negative amount of one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Item<U> {
    amount: i64,
    unit: U,
}

impl<U: Unit> Item<U> {
    /// Creates a new item, rejecting negative amounts.
    pub fn new(amount: i64, unit: U) -> TemporalResult<Self> {
        if amount < 0 {
            return Err(TemporalError::range().with_message("Item amounts must not be negative."));
        }
        Ok(Self { amount, unit })
    }

    #[inline]
    #[must_use]
    pub const fn amount(&self) -> i64 {
        self.amount
    }

    #[inline]
    #[must_use]
    pub const fn unit(&self) -> U {
        self.unit
    }
}

impl<U: Unit> fmt::Display for Item<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit)
    }
}

// ==== TimeSpan ====

/// An ordered, duplicate-free sequence of items sharing one sign.
pub trait TimeSpan<U: Unit> {
    /// Returns the items, coarsest unit first.
    fn total_length(&self) -> &[Item<U>];

    /// Whether the span is negative.
    fn is_negative(&self) -> bool;

    /// Whether the span is positive.
    fn is_positive(&self) -> bool {
        !self.is_negative() && !self.is_empty()
    }

    /// Whether the span has no items.
    fn is_empty(&self) -> bool {
        self.total_length().is_empty()
    }

    /// Whether the span has an item in `unit`.
    fn contains(&self, unit: U) -> bool {
        self.total_length().iter().any(|item| item.unit() == unit)
    }

    /// Returns the unsigned amount of `unit`, or zero.
    fn partial_amount(&self, unit: U) -> i64 {
        self.total_length()
            .iter()
            .find(|item| item.unit() == unit)
            .map_or(0, Item::amount)
    }

    /// Adds this span to a time point.
    fn add_to<T: TimePoint<U>>(&self, point: &T) -> TemporalResult<T> {
        apply_span(self.total_length(), self.is_negative(), point)
    }

    /// Subtracts this span from a time point.
    fn subtract_from<T: TimePoint<U>>(&self, point: &T) -> TemporalResult<T> {
        apply_span(self.total_length(), !self.is_negative(), point)
    }
}

/// Applies items to a time point.
///
/// Forward application walks the items coarsest to finest and folds each
/// run of convertible items into the finest unit of the run before
/// calling its rule once. Backward application walks finest to coarsest
/// and folds the coarser items of each run into the current one.
fn apply_span<U: Unit, T: TimePoint<U>>(
    items: &[Item<U>],
    negative: bool,
    point: &T,
) -> TemporalResult<T> {
    let chronology = point.chronology();
    let mut result = point.clone();

    if !negative {
        let mut index = 0;
        while index < items.len() {
            let mut unit = items[index].unit();
            let mut amount = items[index].amount();
            let mut next = index + 1;
            while let Some(item) = items.get(next) {
                let Some(factor) = chronology.conversion_factor(unit, item.unit()) else {
                    break;
                };
                amount = utils::checked_add(utils::checked_mul(amount, factor)?, item.amount())?;
                unit = item.unit();
                next += 1;
            }
            trace!("applying +{amount} {unit:?}");
            result = result.plus(amount, unit)?;
            index = next;
        }
    } else {
        let mut end = items.len();
        while end > 0 {
            let unit = items[end - 1].unit();
            let mut amount = items[end - 1].amount();
            let mut start = end - 1;
            while start > 0 {
                let coarser = items[start - 1];
                let Some(factor) = chronology.conversion_factor(coarser.unit(), unit) else {
                    break;
                };
                amount = utils::checked_add(amount, utils::checked_mul(coarser.amount(), factor)?)?;
                start -= 1;
            }
            trace!("applying -{amount} {unit:?}");
            result = result.minus(amount, unit)?;
            end = start;
        }
    }

    Ok(result)
}

// ==== Duration ====

/// An immutable amount of time in one or more units.
///
/// The items are sorted coarsest first, every unit occurs at most once,
/// no item has a zero amount, and one sign applies to all items. The
/// empty duration is never negative.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Duration<U: Unit> {
    items: Vec<Item<U>>,
    negative: bool,
}

impl<U: Unit> Default for Duration<U> {
    fn default() -> Self {
        Self::zero()
    }
}

// ==== Private Duration methods ====

impl<U: Unit> Duration<U> {
    /// Builds a duration from signed amounts that must share one sign.
    fn from_signed(amounts: &[(i64, U)]) -> TemporalResult<Self> {
        let mut sign = Sign::Zero;
        let mut items = Vec::with_capacity(amounts.len());
        for &(amount, unit) in amounts {
            if amount == 0 {
                continue;
            }
            let item_sign = Sign::from(amount.signum() as i8);
            if sign != Sign::Zero && sign != item_sign {
                return Err(
                    TemporalError::range().with_message("Duration items must share one sign.")
                );
            }
            sign = item_sign;
            let magnitude = i64::try_from(amount.unsigned_abs())
                .map_err(|_| TemporalError::arithmetic().with_message("Amount out of range."))?;
            items.push(Item::new(magnitude, unit)?);
        }
        Self::from_items(items, sign == Sign::Negative)
    }

    /// Returns the items as signed amounts.
    fn signed_items(&self) -> impl Iterator<Item = (i64, U)> + '_ {
        let multiplier = if self.negative { -1 } else { 1 };
        self.items
            .iter()
            .map(move |item| (item.amount() * multiplier, item.unit()))
    }

    /// Adds signed amounts unit by unit.
    fn merge(&self, others: impl Iterator<Item = (i64, U)>) -> TemporalResult<Self> {
        let mut amounts: Vec<(i64, U)> = self.signed_items().collect();
        for (amount, unit) in others {
            match amounts.iter_mut().find(|(_, u)| *u == unit) {
                Some((current, _)) => *current = utils::checked_add(*current, amount)?,
                None => amounts.push((amount, unit)),
            }
        }
        Self::from_signed(&amounts)
    }
}

// ==== Public Duration API ====

impl<U: Unit> Duration<U> {
    /// Returns the empty duration.
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            items: Vec::new(),
            negative: false,
        }
    }

    /// Creates a duration of a single signed amount.
    pub fn of(amount: i64, unit: U) -> TemporalResult<Self> {
        Self::from_signed(&[(amount, unit)])
    }

    /// Creates a duration from unsigned items and a sign.
    ///
    /// Zero items are dropped and the remaining items are sorted coarsest
    /// first. A unit occurring twice is a range error.
    pub fn from_items<I>(items: I, negative: bool) -> TemporalResult<Self>
    where
        I: IntoIterator<Item = Item<U>>,
    {
        let mut items: Vec<Item<U>> = items
            .into_iter()
            .filter(|item| item.amount() != 0)
            .collect();
        for (index, item) in items.iter().enumerate() {
            if items[index + 1..].iter().any(|other| other.unit() == item.unit()) {
                return Err(TemporalError::range()
                    .with_message(alloc::format!("Duplicate unit in duration: {}", item.unit())));
            }
        }
        items.sort_by(|a, b| b.unit().length().total_cmp(&a.unit().length()));
        let negative = negative && !items.is_empty();
        Ok(Self { items, negative })
    }

    /// Returns a copy with `amount` added to the item of `unit`.
    ///
    /// A result whose items would carry different signs is a range error.
    pub fn plus(&self, amount: i64, unit: U) -> TemporalResult<Self> {
        self.merge(core::iter::once((amount, unit)))
    }

    /// Adds another duration item by item.
    pub fn plus_duration(&self, other: &Self) -> TemporalResult<Self> {
        self.merge(other.signed_items())
    }

    /// Subtracts another duration item by item.
    pub fn minus_duration(&self, other: &Self) -> TemporalResult<Self> {
        self.plus_duration(&other.inverse())
    }

    /// Returns the duration with the opposite sign.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            items: self.items.clone(),
            negative: !self.negative && !self.items.is_empty(),
        }
    }

    /// Returns the absolute duration.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            items: self.items.clone(),
            negative: false,
        }
    }

    /// Multiplies every item by `factor`; a negative factor flips the sign.
    pub fn multiplied_by(&self, factor: i64) -> TemporalResult<Self> {
        if factor == 0 {
            return Ok(Self::zero());
        }
        let magnitude = i64::try_from(factor.unsigned_abs())
            .map_err(|_| TemporalError::arithmetic().with_message("Factor out of range."))?;
        let items = self
            .items
            .iter()
            .map(|item| Item::new(utils::checked_mul(item.amount(), magnitude)?, item.unit()))
            .collect::<TemporalResult<Vec<_>>>()?;
        Self::from_items(items, self.negative != (factor < 0))
    }

    /// Normalizes the duration.
    pub fn with<N: Normalizer<U>>(&self, normalizer: &N) -> TemporalResult<Self> {
        normalizer.normalize(self)
    }

    /// Returns the sign of the duration.
    #[inline]
    #[must_use]
    pub fn sign(&self) -> Sign {
        if self.items.is_empty() {
            Sign::Zero
        } else if self.negative {
            Sign::Negative
        } else {
            Sign::Positive
        }
    }

    /// Returns the items, coarsest first.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[Item<U>] {
        &self.items
    }
}

impl Duration<CalendarUnit> {
    /// Creates a duration in years, months and days sharing one sign.
    pub fn of_calendar_units(years: i64, months: i64, days: i64) -> TemporalResult<Self> {
        Self::from_signed(&[
            (years, CalendarUnit::Years),
            (months, CalendarUnit::Months),
            (days, CalendarUnit::Days),
        ])
    }
}

impl Duration<ClockUnit> {
    /// Creates a duration in hours, minutes and seconds sharing one sign.
    pub fn of_clock_units(hours: i64, minutes: i64, seconds: i64) -> TemporalResult<Self> {
        Self::from_signed(&[
            (hours, ClockUnit::Hours),
            (minutes, ClockUnit::Minutes),
            (seconds, ClockUnit::Seconds),
        ])
    }
}

impl<U: Unit> TimeSpan<U> for Duration<U> {
    fn total_length(&self) -> &[Item<U>] {
        &self.items
    }

    fn is_negative(&self) -> bool {
        self.negative
    }
}

// ==== Text form ====

impl<U: Unit> Writeable for Duration<U> {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        if self.items.is_empty() {
            return sink.write_str(ZERO_TEXT);
        }
        if self.negative {
            sink.write_char('-')?;
        }
        sink.write_char('P')?;
        for (index, item) in self.items.iter().enumerate() {
            if index > 0 {
                sink.write_char(',')?;
            }
            item.amount().write_to(sink)?;
            write!(sink, "{}", item.unit())?;
        }
        Ok(())
    }
}

impl<U: Unit> fmt::Display for Duration<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

impl<U: UnitSymbol> FromStr for Duration<U> {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        if rest == ZERO_TEXT {
            return Ok(Self::zero());
        }
        let body = rest.strip_prefix('P').ok_or_else(|| {
            TemporalError::syntax().with_message("Duration text must start with 'P'.")
        })?;
        if body.is_empty() {
            return Err(TemporalError::syntax().with_message("Duration text has no items."));
        }
        let items = body
            .split(',')
            .map(parse_item::<U>)
            .collect::<TemporalResult<Vec<_>>>()?;
        Self::from_items(items, negative)
    }
}

fn parse_item<U: UnitSymbol>(text: &str) -> TemporalResult<Item<U>> {
    let mut chars = text.chars();
    let symbol = chars
        .next_back()
        .ok_or_else(|| TemporalError::syntax().with_message("Empty duration item."))?;
    let unit = U::from_symbol(symbol).ok_or_else(|| {
        TemporalError::syntax().with_message(alloc::format!("Unknown unit symbol: {symbol}"))
    })?;
    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TemporalError::syntax()
            .with_message(alloc::format!("Invalid duration amount: {text}")));
    }
    let amount = digits
        .parse::<i64>()
        .map_err(|_| TemporalError::syntax().with_message("Duration amount out of range."))?;
    Item::new(amount, unit)
}
