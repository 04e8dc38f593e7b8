//! # Date Equations
//!
//! Date Equations is a small library of calendar calculations used by
//! `temporal_engine` as its day-number transform. The Gregorian
//! implementation is informed by the work of Cassio Neri and Lorenz
//! Schneider on applying Euclidean affine functions to calendar
//! algorithms.
//!
//! ``` rust
//! use date_equations::gregorian;
//!
//! let date = gregorian::ymd_from_epoch_days(0);
//! assert_eq!(date, (1970, 1, 1));
//!
//! let days = gregorian::epoch_days_from_ymd(2011, 5, 31);
//! assert_eq!(gregorian::ymd_from_epoch_days(days), (2011, 5, 31));
//! ```
#![no_std]

pub mod gregorian;
