//! Computing the duration between two time points.

use alloc::vec::Vec;

use crate::{
    components::{
        chronology::{Chronology, TimePoint},
        duration::{Duration, Item},
        unit::{CalendarUnit, ClockUnit, Unit},
    },
    utils, TemporalError, TemporalResult,
};

/// Computes durations between time points in a fixed set of units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric<U: Unit> {
    units: Vec<U>,
    reversible: bool,
}

impl<U: Unit> Metric<U> {
    /// Creates a metric over `units`.
    ///
    /// The units are sorted coarsest first. An empty set or a repeated
    /// unit is a range error.
    pub fn new<I: IntoIterator<Item = U>>(units: I) -> TemporalResult<Self> {
        let mut units: Vec<U> = units.into_iter().collect();
        if units.is_empty() {
            return Err(TemporalError::range().with_message("A metric needs at least one unit."));
        }
        for (index, unit) in units.iter().enumerate() {
            if units[index + 1..].contains(unit) {
                return Err(TemporalError::range()
                    .with_message(alloc::format!("Duplicate unit in metric: {unit}")));
            }
        }
        units.sort_by(|a, b| b.length().total_cmp(&a.length()));
        Ok(Self {
            units,
            reversible: false,
        })
    }

    /// Returns a reversible variant of this metric.
    ///
    /// For a reversible metric `end.minus_span(&metric.between(start, end)?)`
    /// always yields `start`.
    #[must_use]
    pub fn reversible(self) -> Self {
        Self {
            reversible: true,
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn is_reversible(&self) -> bool {
        self.reversible
    }

    #[inline]
    #[must_use]
    pub fn units(&self) -> &[U] {
        &self.units
    }

    /// Computes the duration from `start` to `end`.
    ///
    /// If `start` is after `end` the points are swapped and the result
    /// negated, so that `between(b, a) == between(a, b).inverse()`.
    pub fn between<T: TimePoint<U>>(&self, start: &T, end: &T) -> TemporalResult<Duration<U>> {
        if start == end {
            return Ok(Duration::zero());
        }
        let (first, last, negative) = if start > end {
            (end, start, true)
        } else {
            (start, end, false)
        };

        let chronology = first.chronology();
        let mut cursor = first.clone();
        let mut items = Vec::with_capacity(self.units.len());
        let mut index = 0;

        while index < self.units.len() {
            // Fold the following convertible units into one group, keeping
            // the factor of each unit relative to the finest one.
            let mut factors = Vec::from([1i64]);
            let mut next = index + 1;
            while let Some(&unit) = self.units.get(next) {
                let Some(factor) = chronology.conversion_factor(self.units[next - 1], unit) else {
                    break;
                };
                for existing in &mut factors {
                    *existing = utils::checked_mul(*existing, factor)?;
                }
                factors.push(1);
                next += 1;
            }
            let finest = self.units[next - 1];

            let mut amount = cursor.until(last, finest)?;
            if self.reversible {
                while amount > 0 && cursor.plus(amount, finest)?.minus(amount, finest)? != cursor {
                    amount -= 1;
                }
            }
            debug!(
                "metric group {:?} resolved to {amount} {finest:?}",
                &self.units[index..next]
            );
            cursor = cursor.plus(amount, finest)?;

            let mut remaining = amount;
            for (&unit, &factor) in self.units[index..next].iter().zip(&factors) {
                items.push(Item::new(remaining / factor, unit)?);
                remaining %= factor;
            }
            index = next;
        }

        Duration::from_items(items, negative)
    }
}

impl Metric<CalendarUnit> {
    /// A metric in years, months and days.
    #[must_use]
    pub fn years_months_days() -> Self {
        Self {
            units: Vec::from([CalendarUnit::Years, CalendarUnit::Months, CalendarUnit::Days]),
            reversible: false,
        }
    }
}

impl Metric<ClockUnit> {
    /// A metric in hours, minutes, seconds and nanoseconds.
    #[must_use]
    pub fn clock_units() -> Self {
        Self {
            units: Vec::from([
                ClockUnit::Hours,
                ClockUnit::Minutes,
                ClockUnit::Seconds,
                ClockUnit::Nanos,
            ]),
            reversible: false,
        }
    }
}
