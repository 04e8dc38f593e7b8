//! The `temporal_engine` crate is a generic calculus for dates and times.
//!
//! Time points expose their components through typed elements and move
//! along their time axis in units. Durations, metrics, normalizers and
//! operators are built on top of these two notions and work for every
//! time point type that registers its rules with a chronology.
//!
//! ```rust
//! use core::str::FromStr;
//! use temporal_engine::{
//!     components::{ChronoEntity, Duration, Metric, TimePoint, TimeSpan},
//!     iso::{IsoDate, Weekday, DAY_OF_WEEK},
//!     CalendarUnit,
//! };
//!
//! let start = IsoDate::try_new(2011, 1, 31).unwrap();
//!
//! // Day-of-month overflow is resolved by the default policy.
//! let end = start.plus(1, CalendarUnit::Months).unwrap();
//! assert_eq!(end, IsoDate::try_new(2011, 2, 28).unwrap());
//!
//! // Durations have a compact text form.
//! let duration = Duration::<CalendarUnit>::from_str("P1M,3D").unwrap();
//! assert_eq!(duration.add_to(&start).unwrap().to_string(), "2011-03-03");
//!
//! // Metrics compute the duration between two time points.
//! let metric = Metric::years_months_days();
//! let distance = metric.between(&start, &end).unwrap();
//! assert_eq!(distance.to_string(), "P28D");
//!
//! // Operators adjust single elements.
//! let monday = end.adjust(&DAY_OF_WEEK.set_to_next(Weekday::Monday)).unwrap();
//! assert_eq!(monday.to_string(), "2011-03-07");
//! ```
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/boa-dev/boa/main/assets/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/boa-dev/boa/main/assets/logo.svg"
)]
#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    // Currently throws a false positive regarding dependencies that are only used in tests.
    unused_crate_dependencies,
    clippy::module_name_repetitions,
    clippy::redundant_pub_crate,
    clippy::too_many_lines,
    clippy::cognitive_complexity,
    clippy::missing_errors_doc,
    clippy::let_unit_value,
    clippy::option_if_let_else,

    // It may be worth to look if we can fix the issues highlighted by these lints.
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap,
)]

extern crate alloc;
extern crate core;

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod logging;

pub mod components;
pub mod error;
pub mod iso;
pub mod options;

#[doc(hidden)]
pub(crate) mod rounding;
#[doc(hidden)]
pub(crate) mod utils;

use core::cmp::Ordering;

/// Re-export of `TinyAsciiStr` from `tinystr`.
pub use tinystr::TinyAsciiStr;

#[doc(inline)]
pub use error::TemporalError;

pub use crate::components::{CalendarUnit, ClockUnit, Duration, IsoUnit};

/// The engine's result type
pub type TemporalResult<T> = Result<T, TemporalError>;

/// A library specific trait for unwrapping assertions.
pub(crate) trait TemporalUnwrap {
    type Output;

    /// `temporal_engine` based assertion for unwrapping. This will panic in
    /// debug builds, but throws error during runtime.
    fn temporal_unwrap(self) -> TemporalResult<Self::Output>;
}

impl<T> TemporalUnwrap for Option<T> {
    type Output = T;

    fn temporal_unwrap(self) -> TemporalResult<Self::Output> {
        debug_assert!(self.is_some());
        self.ok_or(TemporalError::assert())
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! temporal_assert {
    ($condition:expr $(,)*) => {
        if !$condition {
            return Err($crate::TemporalError::assert());
        }
    };
    ($condition:expr, $($args:tt)+) => {
        if !$condition {
            #[cfg(feature = "log")]
            log::error!($($args)+);
            return Err($crate::TemporalError::assert());
        }
    };
}

/// A general Sign type.
#[repr(i8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Sign {
    #[default]
    Positive = 1,
    Zero = 0,
    Negative = -1,
}

impl From<i8> for Sign {
    fn from(value: i8) -> Self {
        match value.cmp(&0) {
            Ordering::Greater => Self::Positive,
            Ordering::Equal => Self::Zero,
            Ordering::Less => Self::Negative,
        }
    }
}

// Relevant numeric constants
/// Nanoseconds per day constant: 8.64e+13
pub const NS_PER_DAY: i64 = 86_400_000_000_000;
