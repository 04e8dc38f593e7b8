//! Elements: typed keys addressing one component of a time point.
//!
//! An [`Element`] is a named, typed key such as the year or the hour of
//! a time point. Elements carry no behavior of their own; a time point
//! type resolves each element it supports to an [`ElementRule`] through
//! [`ChronoEntity::element_rule`].

use core::{
    fmt,
    hash::{Hash, Hasher},
};

use tinystr::TinyAsciiStr;

use crate::{components::operator::ChronoOperator, utils, TemporalError, TemporalResult};

/// Whether an element addresses the date or the time of a time point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Date,
    Time,
}

/// A value an element can hold.
///
/// Rules operate on the raw `i64` representation so that they can be
/// stored as trait objects; the typed element API converts through this
/// trait.
pub trait ElementValue: Copy + Eq + Ord + fmt::Debug + 'static {
    /// Returns the raw integer representation.
    fn into_raw(self) -> i64;

    /// Converts a raw integer back into a value.
    fn try_from_raw(raw: i64) -> TemporalResult<Self>;
}

impl ElementValue for i32 {
    #[inline]
    fn into_raw(self) -> i64 {
        i64::from(self)
    }

    #[inline]
    fn try_from_raw(raw: i64) -> TemporalResult<Self> {
        utils::to_i32(raw)
    }
}

/// A typed, named key for one component of a time point.
///
/// Two elements are equal when their names are equal.
#[derive(Debug, Clone, Copy)]
pub struct Element<V: ElementValue> {
    name: TinyAsciiStr<24>,
    symbol: char,
    default_minimum: V,
    default_maximum: V,
    kind: ElementKind,
}

impl<V: ElementValue> Element<V> {
    /// Creates a new element.
    #[inline]
    #[must_use]
    pub const fn new(
        name: TinyAsciiStr<24>,
        symbol: char,
        default_minimum: V,
        default_maximum: V,
        kind: ElementKind,
    ) -> Self {
        Self {
            name,
            symbol,
            default_minimum,
            default_maximum,
            kind,
        }
    }

    /// Returns the name of this element.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the format symbol of this element.
    #[inline]
    #[must_use]
    pub const fn symbol(&self) -> char {
        self.symbol
    }

    /// Returns the minimum value regardless of context.
    #[inline]
    #[must_use]
    pub const fn default_minimum(&self) -> V {
        self.default_minimum
    }

    /// Returns the maximum value regardless of context.
    #[inline]
    #[must_use]
    pub const fn default_maximum(&self) -> V {
        self.default_maximum
    }

    #[inline]
    #[must_use]
    pub const fn is_date_element(&self) -> bool {
        matches!(self.kind, ElementKind::Date)
    }

    #[inline]
    #[must_use]
    pub const fn is_time_element(&self) -> bool {
        matches!(self.kind, ElementKind::Time)
    }
}

impl<V: ElementValue> PartialEq for Element<V> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<V: ElementValue> Eq for Element<V> {}

impl<V: ElementValue> Hash for Element<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl<V: ElementValue> fmt::Display for Element<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The strategy resolving one element on one time point type.
///
/// All values are raw integers, see [`ElementValue`].
pub trait ElementRule<T>: Sync {
    /// Returns the current value of the element.
    fn value(&self, context: &T) -> i64;

    /// Returns the minimum value in the given context.
    fn minimum(&self, context: &T) -> i64;

    /// Returns the maximum value in the given context.
    fn maximum(&self, context: &T) -> i64;

    /// Whether `value` can be set in the given context.
    fn is_valid(&self, context: &T, value: i64) -> bool {
        (self.minimum(context)..=self.maximum(context)).contains(&value)
    }

    /// Sets the element strictly, rejecting invalid values with a range error.
    fn with_value(&self, context: &T, value: i64) -> TemporalResult<T>;

    /// Moves the time point by `amount` steps of this element, carrying
    /// into coarser components where necessary.
    fn advance(&self, context: &T, amount: i64) -> TemporalResult<T>;

    /// Sets the element leniently: values outside the range are resolved
    /// by moving the time point.
    fn with_lenient(&self, context: &T, value: i64) -> TemporalResult<T> {
        let delta = utils::checked_sub(value, self.value(context))?;
        self.advance(context, delta)
    }

    /// The name of the next finer element, if any.
    fn child(&self) -> Option<&'static str> {
        None
    }

    /// The number of decimal digits for sub-second fraction elements.
    fn fraction_digits(&self) -> Option<u32> {
        None
    }

    /// The virtual value marking the end of the day, if the element's
    /// range is extended by one.
    fn end_of_day_marker(&self) -> Option<i64> {
        None
    }
}

/// A time point type that can be accessed by elements.
pub trait ChronoEntity: Sized + Clone + 'static {
    /// Returns the rule registered for the element name.
    fn element_rule(name: &str) -> Option<&'static dyn ElementRule<Self>>;

    /// Whether the element is supported by this type.
    fn supports<V: ElementValue>(element: &Element<V>) -> bool {
        Self::element_rule(element.name()).is_some()
    }

    #[doc(hidden)]
    fn require_rule<V: ElementValue>(
        element: &Element<V>,
    ) -> TemporalResult<&'static dyn ElementRule<Self>> {
        Self::element_rule(element.name()).ok_or_else(|| {
            TemporalError::rule_not_found()
                .with_message(alloc::format!("Element not supported: {element}"))
        })
    }

    /// Returns the value of the element.
    fn get<V: ElementValue>(&self, element: &Element<V>) -> TemporalResult<V> {
        V::try_from_raw(Self::require_rule(element)?.value(self))
    }

    /// Returns the minimum of the element in the context of `self`.
    fn minimum<V: ElementValue>(&self, element: &Element<V>) -> TemporalResult<V> {
        V::try_from_raw(Self::require_rule(element)?.minimum(self))
    }

    /// Returns the maximum of the element in the context of `self`.
    fn maximum<V: ElementValue>(&self, element: &Element<V>) -> TemporalResult<V> {
        V::try_from_raw(Self::require_rule(element)?.maximum(self))
    }

    /// Whether `value` is a valid value for the element.
    fn is_valid<V: ElementValue>(&self, element: &Element<V>, value: V) -> bool {
        Self::element_rule(element.name())
            .is_some_and(|rule| rule.is_valid(self, value.into_raw()))
    }

    /// Returns a copy with the element set to `value`.
    fn with<V: ElementValue>(&self, element: &Element<V>, value: V) -> TemporalResult<Self> {
        Self::require_rule(element)?.with_value(self, value.into_raw())
    }

    /// Applies an operator to this time point.
    fn adjust<O: ChronoOperator<Self>>(&self, operator: &O) -> TemporalResult<Self> {
        operator.apply(self)
    }
}
