//! Utility arithmetic shared by the rule implementations.

use crate::{TemporalError, TemporalResult};

#[inline]
pub(crate) fn checked_add(lhs: i64, rhs: i64) -> TemporalResult<i64> {
    lhs.checked_add(rhs)
        .ok_or(TemporalError::arithmetic().with_message("integer overflow during addition."))
}

#[inline]
pub(crate) fn checked_sub(lhs: i64, rhs: i64) -> TemporalResult<i64> {
    lhs.checked_sub(rhs)
        .ok_or(TemporalError::arithmetic().with_message("integer overflow during subtraction."))
}

#[inline]
pub(crate) fn checked_mul(lhs: i64, rhs: i64) -> TemporalResult<i64> {
    lhs.checked_mul(rhs)
        .ok_or(TemporalError::arithmetic().with_message("integer overflow during multiplication."))
}

#[inline]
pub(crate) fn checked_neg(value: i64) -> TemporalResult<i64> {
    value
        .checked_neg()
        .ok_or(TemporalError::arithmetic().with_message("integer overflow during negation."))
}

/// Converts an `i64` into an `i32`, raising a range error when it does not fit.
#[inline]
pub(crate) fn to_i32(value: i64) -> TemporalResult<i32> {
    i32::try_from(value)
        .map_err(|_| TemporalError::range().with_message("value exceeds i32 range."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn overflow_is_an_arithmetic_error() {
        assert_eq!(checked_add(1, 2), Ok(3));
        assert_eq!(
            checked_add(i64::MAX, 1).map_err(|e| e.kind()),
            Err(ErrorKind::Arithmetic)
        );
        assert_eq!(
            checked_mul(i64::MAX / 2, 3).map_err(|e| e.kind()),
            Err(ErrorKind::Arithmetic)
        );
        assert_eq!(
            checked_neg(i64::MIN).map_err(|e| e.kind()),
            Err(ErrorKind::Arithmetic)
        );
        assert_eq!(
            to_i32(i64::MAX).map_err(|e| e.kind()),
            Err(ErrorKind::Range)
        );
    }
}
