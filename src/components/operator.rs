//! Stateless operators adjusting a time point.
//!
//! Element operators are built from an [`Element`] and one
//! [`OperatorKind`]; the kind is a closed set matched exhaustively when
//! the operator is applied. [`FullValueOperator`] and [`PeriodOperator`]
//! work directly on the ISO types.

use core::{cmp::Ordering, num::NonZeroU32};

use num_rational::Ratio;

use crate::{
    components::element::{ChronoEntity, Element, ElementRule, ElementValue},
    iso::{IsoDate, IsoDateTime, IsoTime},
    options::{NavigationDirection, StepRounding},
    rounding::StepRounder,
    temporal_assert, utils, TemporalError, TemporalResult, TemporalUnwrap,
};

/// The element all sub-second fraction elements resolve through.
const NANO_OF_SECOND: &str = "NANO_OF_SECOND";

/// An adjustment of a time point.
pub trait ChronoOperator<T> {
    /// Applies the adjustment, returning a new time point.
    fn apply(&self, entity: &T) -> TemporalResult<T>;
}

/// A query evaluated against a time point.
pub trait ChronoFunction<T> {
    /// The result type.
    type Output;

    /// Evaluates the query.
    fn apply(&self, entity: &T) -> TemporalResult<Self::Output>;
}

// ==== Element operators ====

/// The adjustment an [`ElementOperator`] performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind<V> {
    /// Set the element to its contextual minimum.
    Minimize,
    /// Set the element to its contextual maximum.
    Maximize,
    /// Move the element one step back.
    Decrement,
    /// Move the element one step forward.
    Increment,
    /// Set every finer element to its minimum.
    Floor,
    /// Set every finer element to its maximum.
    Ceiling,
    /// Set the element leniently.
    Lenient(V),
    /// Move the element to the given ordinal.
    Navigate(NavigationDirection, V),
    /// Round the element to a multiple of the step.
    RoundToStep(StepRounding, NonZeroU32),
}

impl<V> OperatorKind<V> {
    fn name(&self) -> &'static str {
        match self {
            Self::Minimize => "minimize",
            Self::Maximize => "maximize",
            Self::Decrement => "decrement",
            Self::Increment => "increment",
            Self::Floor => "floor",
            Self::Ceiling => "ceiling",
            Self::Lenient(_) => "set leniently",
            Self::Navigate(NavigationDirection::Next, _) => "navigate to next",
            Self::Navigate(NavigationDirection::Previous, _) => "navigate to previous",
            Self::Navigate(NavigationDirection::NextOrSame, _) => "navigate to next or same",
            Self::Navigate(NavigationDirection::PreviousOrSame, _) => {
                "navigate to previous or same"
            }
            Self::RoundToStep(..) => "round",
        }
    }
}

/// An operator adjusting one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementOperator<V: ElementValue> {
    element: Element<V>,
    kind: OperatorKind<V>,
}

impl<V: ElementValue> ElementOperator<V> {
    #[inline]
    #[must_use]
    pub const fn new(element: Element<V>, kind: OperatorKind<V>) -> Self {
        Self { element, kind }
    }

    #[inline]
    #[must_use]
    pub const fn element(&self) -> &Element<V> {
        &self.element
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> OperatorKind<V> {
        self.kind
    }
}

impl<T: ChronoEntity, V: ElementValue> ChronoOperator<T> for ElementOperator<V> {
    fn apply(&self, entity: &T) -> TemporalResult<T> {
        let Some(rule) = T::element_rule(self.element.name()) else {
            let message = alloc::format!(
                "Cannot {} {} on this type.",
                self.kind.name(),
                self.element
            );
            return Err(match self.kind {
                OperatorKind::Navigate(..) => TemporalError::navigation(),
                _ => TemporalError::rule_not_found(),
            }
            .with_message(message));
        };

        match self.kind {
            OperatorKind::Minimize => rule.with_value(entity, rule.minimum(entity)),
            OperatorKind::Maximize => rule.with_value(entity, rule.maximum(entity)),
            OperatorKind::Decrement => rule.advance(entity, -1),
            OperatorKind::Increment => rule.advance(entity, 1),
            OperatorKind::Floor => match rule.fraction_digits() {
                Some(digits) => with_fraction(entity, digits, false),
                None => walk_children(rule.child(), entity, |child, current| {
                    child.minimum(current)
                }),
            },
            OperatorKind::Ceiling => match rule.fraction_digits() {
                Some(digits) => with_fraction(entity, digits, true),
                None => walk_children(rule.child(), entity, |child, current| {
                    child.maximum(current)
                }),
            },
            OperatorKind::Lenient(value) => rule.with_lenient(entity, value.into_raw()),
            OperatorKind::Navigate(direction, target) => {
                let target = target.into_raw();
                let lowest = self.element.default_minimum().into_raw();
                let highest = match rule.end_of_day_marker() {
                    Some(marker) => marker - 1,
                    None => self.element.default_maximum().into_raw(),
                };
                if !(lowest..=highest).contains(&target) {
                    return Err(TemporalError::range().with_message(alloc::format!(
                        "Navigation target {target} is out of range for {}.",
                        self.element
                    )));
                }
                navigate(rule, entity, direction, target)
            }
            OperatorKind::RoundToStep(mode, step) => {
                let rounded = StepRounder::from_step(rule.value(entity), step)?.round(mode)?;
                let value = V::try_from_raw(rounded)?;
                rule.with_lenient(entity, value.into_raw())
            }
        }
    }
}

/// Sets each element of the child chain starting at `child` to the value
/// chosen by `select`.
fn walk_children<T: ChronoEntity>(
    mut child: Option<&'static str>,
    entity: &T,
    select: impl Fn(&dyn ElementRule<T>, &T) -> i64,
) -> TemporalResult<T> {
    let mut result = entity.clone();
    while let Some(name) = child {
        let rule = T::element_rule(name).ok_or_else(|| {
            TemporalError::rule_not_found()
                .with_message(alloc::format!("Element not supported: {name}"))
        })?;
        let value = select(rule, &result);
        result = rule.with_value(&result, value)?;
        child = rule.child();
    }
    Ok(result)
}

/// Zeroes the nanosecond digits below a fraction width, or fills them
/// with nines for a ceiling.
fn with_fraction<T: ChronoEntity>(entity: &T, digits: u32, ceiling: bool) -> TemporalResult<T> {
    let nano = T::element_rule(NANO_OF_SECOND).ok_or_else(|| {
        TemporalError::rule_not_found().with_message("Element not supported: NANO_OF_SECOND")
    })?;
    let scale = 10i64.pow(9u32.checked_sub(digits).temporal_unwrap()?);
    let value = nano.value(entity);
    let mut adjusted = value - value.rem_euclid(scale);
    if ceiling {
        adjusted = (adjusted + scale - 1).min(nano.maximum(entity));
    }
    nano.with_value(entity, adjusted)
}

/// Moves to the nearest point in `direction` showing `target`, stepping
/// period by period where the current one cannot show it.
fn navigate<T: ChronoEntity>(
    rule: &dyn ElementRule<T>,
    entity: &T,
    direction: NavigationDirection,
    target: i64,
) -> TemporalResult<T> {
    let current = cycle_position(rule, entity);
    let within = match current.cmp(&target) {
        Ordering::Equal => direction.allows_same(),
        Ordering::Less => direction.is_forward(),
        Ordering::Greater => !direction.is_forward(),
    };
    let mut result = if within {
        entity.clone()
    } else {
        next_period(rule, entity, direction.is_forward())?
    };
    while !rule.is_valid(&result, target) {
        result = next_period(rule, &result, direction.is_forward())?;
    }
    rule.with_value(&result, target)
}

/// The value of the element, reading the end-of-day marker as the start of
/// the following cycle.
fn cycle_position<T>(rule: &dyn ElementRule<T>, entity: &T) -> i64 {
    let value = rule.value(entity);
    if rule.end_of_day_marker() == Some(value) {
        rule.minimum(entity)
    } else {
        value
    }
}

/// Moves to the first value of the following cycle, or to the last value
/// of the preceding one.
fn next_period<T>(rule: &dyn ElementRule<T>, entity: &T, forward: bool) -> TemporalResult<T> {
    let current = cycle_position(rule, entity);
    let amount = if forward {
        let last = match rule.end_of_day_marker() {
            Some(marker) => marker - 1,
            None => rule.maximum(entity),
        };
        last - current + 1
    } else {
        rule.minimum(entity) - current - 1
    };
    rule.advance(entity, amount)
}

// ==== Element operator constructors ====

impl<V: ElementValue> Element<V> {
    /// Sets the element to its contextual minimum.
    #[inline]
    #[must_use]
    pub const fn minimized(self) -> ElementOperator<V> {
        ElementOperator::new(self, OperatorKind::Minimize)
    }

    /// Sets the element to its contextual maximum.
    #[inline]
    #[must_use]
    pub const fn maximized(self) -> ElementOperator<V> {
        ElementOperator::new(self, OperatorKind::Maximize)
    }

    #[inline]
    #[must_use]
    pub const fn decremented(self) -> ElementOperator<V> {
        ElementOperator::new(self, OperatorKind::Decrement)
    }

    #[inline]
    #[must_use]
    pub const fn incremented(self) -> ElementOperator<V> {
        ElementOperator::new(self, OperatorKind::Increment)
    }

    /// Keeps the element and sets all finer elements to their minimum.
    #[inline]
    #[must_use]
    pub const fn at_floor(self) -> ElementOperator<V> {
        ElementOperator::new(self, OperatorKind::Floor)
    }

    /// Keeps the element and sets all finer elements to their maximum.
    #[inline]
    #[must_use]
    pub const fn at_ceiling(self) -> ElementOperator<V> {
        ElementOperator::new(self, OperatorKind::Ceiling)
    }

    #[inline]
    #[must_use]
    pub const fn set_lenient(self, value: V) -> ElementOperator<V> {
        ElementOperator::new(self, OperatorKind::Lenient(value))
    }

    #[inline]
    #[must_use]
    pub const fn set_to_next(self, value: V) -> ElementOperator<V> {
        ElementOperator::new(self, OperatorKind::Navigate(NavigationDirection::Next, value))
    }

    #[inline]
    #[must_use]
    pub const fn set_to_previous(self, value: V) -> ElementOperator<V> {
        ElementOperator::new(self, OperatorKind::Navigate(NavigationDirection::Previous, value))
    }

    #[inline]
    #[must_use]
    pub const fn set_to_next_or_same(self, value: V) -> ElementOperator<V> {
        ElementOperator::new(
            self,
            OperatorKind::Navigate(NavigationDirection::NextOrSame, value),
        )
    }

    #[inline]
    #[must_use]
    pub const fn set_to_previous_or_same(self, value: V) -> ElementOperator<V> {
        ElementOperator::new(
            self,
            OperatorKind::Navigate(NavigationDirection::PreviousOrSame, value),
        )
    }

    #[inline]
    #[must_use]
    pub const fn rounded_up(self, step: NonZeroU32) -> ElementOperator<V> {
        ElementOperator::new(self, OperatorKind::RoundToStep(StepRounding::Up, step))
    }

    #[inline]
    #[must_use]
    pub const fn rounded_half(self, step: NonZeroU32) -> ElementOperator<V> {
        ElementOperator::new(self, OperatorKind::RoundToStep(StepRounding::Half, step))
    }

    #[inline]
    #[must_use]
    pub const fn rounded_down(self, step: NonZeroU32) -> ElementOperator<V> {
        ElementOperator::new(self, OperatorKind::RoundToStep(StepRounding::Down, step))
    }

    /// Returns the function computing the element's proportional position
    /// within its range.
    #[inline]
    #[must_use]
    pub const fn ratio(self) -> RatioFunction<V> {
        RatioFunction { element: self }
    }
}

// ==== RatioFunction ====

/// Computes `(value - min) / (max - min + 1)` as an exact fraction.
///
/// For elements extended by an end-of-day marker the denominator is the
/// distance from the minimum to the marker, and the marker itself yields 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatioFunction<V: ElementValue> {
    element: Element<V>,
}

impl<T: ChronoEntity, V: ElementValue> ChronoFunction<T> for RatioFunction<V> {
    type Output = Ratio<i64>;

    fn apply(&self, entity: &T) -> TemporalResult<Ratio<i64>> {
        let rule = T::require_rule(&self.element)?;
        let value = rule.value(entity);
        let minimum = rule.minimum(entity);

        let denominator = match rule.end_of_day_marker() {
            Some(marker) if value == marker => return Ok(Ratio::from_integer(1)),
            Some(marker) => utils::checked_sub(marker, minimum)?,
            None => utils::checked_add(utils::checked_sub(rule.maximum(entity), minimum)?, 1)?,
        };
        temporal_assert!(denominator > 0, "empty range for {}", self.element);
        Ok(Ratio::new(utils::checked_sub(value, minimum)?, denominator))
    }
}

// ==== FullValueOperator ====

/// Rounds or advances a wall time to a full hour or minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullValueOperator {
    /// Rounds half-up to the full hour.
    RoundedToFullHour,
    /// Rounds half-up to the full minute.
    RoundedToFullMinute,
    /// Moves to the next full hour.
    NextFullHour,
    /// Moves to the next full minute.
    NextFullMinute,
}

impl FullValueOperator {
    /// Returns the adjusted wall time as minutes of the day in `0..=1440`.
    fn minute_of_day(self, time: &IsoTime) -> i64 {
        // 24:00 counts as the start of the following day when advancing.
        let hour = i64::from(time.hour());
        let minute = i64::from(time.minute());
        match self {
            Self::RoundedToFullHour => (hour + i64::from(minute >= 30)) * 60,
            Self::RoundedToFullMinute => hour * 60 + minute + i64::from(time.second() >= 30),
            Self::NextFullHour => (hour % 24 + 1) * 60,
            Self::NextFullMinute => (hour % 24) * 60 + minute + 1,
        }
    }
}

impl ChronoOperator<IsoTime> for FullValueOperator {
    fn apply(&self, entity: &IsoTime) -> TemporalResult<IsoTime> {
        let minutes = self.minute_of_day(entity);
        IsoTime::try_new((minutes / 60) as u8, (minutes % 60) as u8, 0, 0)
    }
}

impl ChronoOperator<IsoDateTime> for FullValueOperator {
    fn apply(&self, entity: &IsoDateTime) -> TemporalResult<IsoDateTime> {
        let time = <Self as ChronoOperator<IsoTime>>::apply(self, &entity.time())?;
        IsoDateTime::try_new(entity.date(), time)
    }
}

// ==== PeriodOperator ====

/// Moves a date to the boundary of a neighbouring month, quarter or year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodOperator {
    FirstDayOfNextMonth,
    FirstDayOfNextQuarter,
    FirstDayOfNextYear,
    LastDayOfPreviousMonth,
    LastDayOfPreviousQuarter,
    LastDayOfPreviousYear,
}

impl ChronoOperator<IsoDate> for PeriodOperator {
    fn apply(&self, entity: &IsoDate) -> TemporalResult<IsoDate> {
        let year = entity.year();
        let month = entity.month();
        let quarter_start = (month - 1) / 3 * 3 + 1;

        let (year, month, last) = match self {
            Self::FirstDayOfNextMonth if month == 12 => (year + 1, 1, false),
            Self::FirstDayOfNextMonth => (year, month + 1, false),
            Self::FirstDayOfNextQuarter if quarter_start == 10 => (year + 1, 1, false),
            Self::FirstDayOfNextQuarter => (year, quarter_start + 3, false),
            Self::FirstDayOfNextYear => (year + 1, 1, false),
            Self::LastDayOfPreviousMonth if month == 1 => (year - 1, 12, true),
            Self::LastDayOfPreviousMonth => (year, month - 1, true),
            Self::LastDayOfPreviousQuarter if quarter_start == 1 => (year - 1, 12, true),
            Self::LastDayOfPreviousQuarter => (year, quarter_start - 1, true),
            Self::LastDayOfPreviousYear => (year - 1, 12, true),
        };
        let day = if last {
            date_equations::gregorian::days_in_month(year, month)
        } else {
            1
        };
        IsoDate::try_new(year, month, day)
    }
}

impl ChronoOperator<IsoDateTime> for PeriodOperator {
    fn apply(&self, entity: &IsoDateTime) -> TemporalResult<IsoDateTime> {
        let date = <Self as ChronoOperator<IsoDate>>::apply(self, &entity.date())?;
        IsoDateTime::try_new(date, entity.time())
    }
}
