//! The generic building blocks of the engine.
//!
//! Time points expose their components through [`element`]s and move along
//! their time axis in [`unit`]s. A [`chronology`] binds both to a concrete
//! time point type.

pub mod chronology;
pub mod duration;
pub mod element;
pub mod metric;
pub mod normalizer;
pub mod operator;
pub mod overflow;
pub mod unit;

#[doc(inline)]
pub use chronology::{
    CalendarDate, CalendarEra, CalendarSystem, Chronology, MonthBasedCalendar, TimePoint,
    UnitRule,
};
#[doc(inline)]
pub use duration::{Duration, Item, TimeSpan};
#[doc(inline)]
pub use element::{ChronoEntity, Element, ElementKind, ElementRule, ElementValue};
#[doc(inline)]
pub use metric::Metric;
#[doc(inline)]
pub use normalizer::{CalendarNormalizer, ClockNormalizer, Normalizer};
#[doc(inline)]
pub use operator::{
    ChronoFunction, ChronoOperator, ElementOperator, FullValueOperator, OperatorKind,
    PeriodOperator, RatioFunction,
};
#[doc(inline)]
pub use overflow::{CalendarRule, OverflowUnit};
#[doc(inline)]
pub use unit::{CalendarUnit, ClockUnit, IsoUnit, Unit, UnitSymbol};
