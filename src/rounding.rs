//! Implementation of step rounding functionality

use crate::{error::TemporalError, options::StepRounding, TemporalResult, TemporalUnwrap};

use core::num::NonZeroU32;

use num_traits::{CheckedAdd, CheckedMul, CheckedSub, ConstZero, Euclid, NumCast};

pub(crate) trait Steppable:
    Euclid + CheckedAdd + CheckedSub + CheckedMul + PartialOrd + NumCast + ConstZero + Copy
{
}

impl<T> Steppable for T where
    T: Euclid + CheckedAdd + CheckedSub + CheckedMul + PartialOrd + NumCast + ConstZero + Copy
{
}

/// Rounds a value to an integer multiple of a step.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub(crate) struct StepRounder<T: Steppable> {
    value: T,
    step: T,
}

impl<T: Steppable> StepRounder<T> {
    #[inline]
    pub(crate) fn from_step(value: T, step: NonZeroU32) -> TemporalResult<Self> {
        let step = <T as NumCast>::from(step.get()).temporal_unwrap()?;
        Ok(Self { value, step })
    }

    /// `floor(value / step) * step`
    #[inline]
    pub(crate) fn floor(&self) -> TemporalResult<T> {
        self.value
            .div_euclid(&self.step)
            .checked_mul(&self.step)
            .ok_or(TemporalError::arithmetic())
    }

    /// `ceil(value / step) * step`
    #[inline]
    pub(crate) fn ceil(&self) -> TemporalResult<T> {
        let floor = self.floor()?;
        if self.value.rem_euclid(&self.step) == T::ZERO {
            return Ok(floor);
        }
        floor
            .checked_add(&self.step)
            .ok_or(TemporalError::arithmetic())
    }

    #[inline]
    pub(crate) fn round(&self, mode: StepRounding) -> TemporalResult<T> {
        match mode {
            StepRounding::Up => self.ceil(),
            StepRounding::Down => self.floor(),
            StepRounding::Half => {
                let floor = self.floor()?;
                let ceil = self.ceil()?;
                let below = self
                    .value
                    .checked_sub(&floor)
                    .ok_or(TemporalError::arithmetic())?;
                let above = ceil
                    .checked_sub(&self.value)
                    .ok_or(TemporalError::arithmetic())?;
                // Ties go up.
                if below < above {
                    Ok(floor)
                } else {
                    Ok(ceil)
                }
            }
        }
    }
}
