//! Normalizers re-express a time span in fewer or different units.
//!
//! Normalizers are stateless. The normalizers of every unit and mode are
//! kept in static tables, see [`ClockUnit::only`] and friends.

use alloc::vec::Vec;

use crate::{
    components::{
        duration::{Duration, Item, TimeSpan},
        unit::{CalendarUnit, ClockUnit, Unit},
    },
    options::NormalizerMode,
    utils, TemporalError, TemporalResult,
};

/// Transforms a time span into a normalized duration.
pub trait Normalizer<U: Unit> {
    /// Normalizes `span`. The input is never modified and an empty span
    /// always yields the empty duration.
    fn normalize<S: TimeSpan<U> + ?Sized>(&self, span: &S) -> TemporalResult<Duration<U>>;
}

// ==== ClockNormalizer ====

/// A normalizer for durations in clock units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockNormalizer {
    unit: ClockUnit,
    mode: NormalizerMode,
}

static CLOCK_ONLY: [ClockNormalizer; 6] = clock_table(NormalizerMode::Only);
static CLOCK_TRUNCATED: [ClockNormalizer; 6] = clock_table(NormalizerMode::Truncate);
static CLOCK_ROUNDED: [ClockNormalizer; 6] = clock_table(NormalizerMode::Round);

const fn clock_table(mode: NormalizerMode) -> [ClockNormalizer; 6] {
    let units = ClockUnit::ALL;
    let mut table = [ClockNormalizer::new(ClockUnit::Hours, mode); 6];
    let mut index = 0;
    while index < units.len() {
        table[index] = ClockNormalizer::new(units[index], mode);
        index += 1;
    }
    table
}

impl ClockNormalizer {
    #[inline]
    #[must_use]
    pub const fn new(unit: ClockUnit, mode: NormalizerMode) -> Self {
        Self { unit, mode }
    }

    #[inline]
    #[must_use]
    pub const fn unit(&self) -> ClockUnit {
        self.unit
    }

    #[inline]
    #[must_use]
    pub const fn mode(&self) -> NormalizerMode {
        self.mode
    }

    /// Splits an absolute amount of nanoseconds into hours, minutes,
    /// seconds and a remainder in the target unit.
    fn decompose(&self, nanos: i64) -> TemporalResult<Duration<ClockUnit>> {
        let hours = nanos / ClockUnit::Hours.nanos();
        let minutes = nanos % ClockUnit::Hours.nanos() / ClockUnit::Minutes.nanos();
        let seconds = nanos % ClockUnit::Minutes.nanos() / ClockUnit::Seconds.nanos();
        let fraction = nanos % ClockUnit::Seconds.nanos();

        let mut items = Vec::with_capacity(4);
        items.push(Item::new(hours, ClockUnit::Hours)?);
        if self.unit >= ClockUnit::Minutes {
            items.push(Item::new(minutes, ClockUnit::Minutes)?);
        }
        if self.unit >= ClockUnit::Seconds {
            items.push(Item::new(seconds, ClockUnit::Seconds)?);
        }
        if self.unit > ClockUnit::Seconds {
            items.push(Item::new(fraction / self.unit.nanos(), self.unit)?);
        }
        Duration::from_items(items, false)
    }
}

impl ClockUnit {
    /// The normalizer collapsing a duration into this unit.
    #[inline]
    #[must_use]
    pub fn only(self) -> &'static ClockNormalizer {
        &CLOCK_ONLY[self.index()]
    }

    /// The normalizer keeping the items at or finer than this unit.
    #[inline]
    #[must_use]
    pub fn truncated(self) -> &'static ClockNormalizer {
        &CLOCK_TRUNCATED[self.index()]
    }

    /// The normalizer rounding a duration half-up to this unit.
    #[inline]
    #[must_use]
    pub fn rounded(self) -> &'static ClockNormalizer {
        &CLOCK_ROUNDED[self.index()]
    }
}

impl Normalizer<ClockUnit> for ClockNormalizer {
    fn normalize<S: TimeSpan<ClockUnit> + ?Sized>(
        &self,
        span: &S,
    ) -> TemporalResult<Duration<ClockUnit>> {
        if span.is_empty() {
            return Ok(Duration::zero());
        }
        let negative = span.is_negative();

        if self.mode == NormalizerMode::Truncate {
            let items = span
                .total_length()
                .iter()
                .filter(|item| item.unit() >= self.unit)
                .copied();
            return Duration::from_items(items, negative);
        }

        let mut nanos = 0i64;
        for item in span.total_length() {
            let item_nanos = utils::checked_mul(item.amount(), item.unit().nanos())?;
            nanos = utils::checked_add(nanos, item_nanos)?;
        }
        let step = self.unit.nanos();

        let result = match self.mode {
            NormalizerMode::Only => {
                Duration::from_items([Item::new(nanos / step, self.unit)?], false)?
            }
            _ if self.unit == ClockUnit::Nanos => self.decompose(nanos)?,
            _ => {
                let mut quotient = nanos / step;
                if nanos % step >= step - step / 2 {
                    quotient += 1;
                }
                self.decompose(utils::checked_mul(quotient, step)?)?
            }
        };

        Ok(if negative { result.inverse() } else { result })
    }
}

// ==== CalendarNormalizer ====

/// A normalizer for durations in calendar units.
///
/// Only the [`NormalizerMode::Only`] and [`NormalizerMode::Truncate`]
/// modes exist for calendar units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarNormalizer {
    unit: CalendarUnit,
    mode: NormalizerMode,
}

static CALENDAR_ONLY: [CalendarNormalizer; 8] = calendar_table(NormalizerMode::Only);
static CALENDAR_TRUNCATED: [CalendarNormalizer; 8] = calendar_table(NormalizerMode::Truncate);

const fn calendar_table(mode: NormalizerMode) -> [CalendarNormalizer; 8] {
    let units = CalendarUnit::ALL;
    let mut table = [CalendarNormalizer {
        unit: CalendarUnit::Days,
        mode,
    }; 8];
    let mut index = 0;
    while index < units.len() {
        table[index] = CalendarNormalizer {
            unit: units[index],
            mode,
        };
        index += 1;
    }
    table
}

impl CalendarNormalizer {
    #[inline]
    #[must_use]
    pub const fn unit(&self) -> CalendarUnit {
        self.unit
    }

    #[inline]
    #[must_use]
    pub const fn mode(&self) -> NormalizerMode {
        self.mode
    }
}

impl CalendarUnit {
    /// The normalizer collapsing a duration into this unit.
    #[inline]
    #[must_use]
    pub fn only(self) -> &'static CalendarNormalizer {
        &CALENDAR_ONLY[self.index()]
    }

    /// The normalizer keeping the items at or finer than this unit.
    #[inline]
    #[must_use]
    pub fn truncated(self) -> &'static CalendarNormalizer {
        &CALENDAR_TRUNCATED[self.index()]
    }
}

impl Normalizer<CalendarUnit> for CalendarNormalizer {
    fn normalize<S: TimeSpan<CalendarUnit> + ?Sized>(
        &self,
        span: &S,
    ) -> TemporalResult<Duration<CalendarUnit>> {
        if span.is_empty() {
            return Ok(Duration::zero());
        }
        let negative = span.is_negative();

        if self.mode == NormalizerMode::Truncate {
            let items = span
                .total_length()
                .iter()
                .filter(|item| item.unit() >= self.unit)
                .copied();
            return Duration::from_items(items, negative);
        }

        // Only-mode converts within the month family or the day family.
        let family = |unit: CalendarUnit| match self.unit.months() {
            Some(_) => unit.months(),
            None => unit.days(),
        };
        let Some(target) = family(self.unit) else {
            return Err(TemporalError::assert());
        };

        let mut total = 0i64;
        for item in span.total_length() {
            let factor = family(item.unit()).ok_or_else(|| {
                TemporalError::range().with_message(alloc::format!(
                    "Cannot convert {} into {}.",
                    item.unit(),
                    self.unit
                ))
            })?;
            total = utils::checked_add(total, utils::checked_mul(item.amount(), factor)?)?;
        }
        Duration::from_items([Item::new(total / target, self.unit)?], negative)
    }
}
