//! Gregorian Date Calculations
//!
//! All functions operate on epoch days, the count of days relative to
//! 1970-01-01 (epoch day 0), using the proleptic Gregorian calendar.
//!
//! ## Extending Neri-Schneider shift window
//!
//! In their paper, Neri-Schneider calculated for a Rata Die shift
//! of 82, which only covers a range of 32_767 years around the epoch.
//! The computations here shift by 680 cycles of 400 years so that every
//! intermediate value stays non-negative for years in [-271_821, 275_760].
//!
//! | Significant Date | Computational Rata Die | Rata Die Shift
//! | -----------------|------------------------|-----------------|
//! | April 19, -271_821 | -99,280,533 | 65,427 |
//! | January 1, 1970 | 719,468 | 100,065,428 |
//! | September 14, 275,760 | 100_719_469 | 200,065,429 |
//!
pub mod neri_schneider;

pub use neri_schneider::{
    days_in_month, epoch_days_from_ymd, is_leap_year, rata_die_from_gregorian_date,
    weekday_from_epoch_days, ymd_from_epoch_days,
};
