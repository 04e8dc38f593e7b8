//! Native implementation of the engine's option enums.
//!
//! Options select behavior explicitly at each call site; there is no
//! process-wide configuration.

use core::{fmt, str::FromStr};

// ==== OverflowPolicy ====

/// The day-of-month overflow policy applied when adding whole calendar
/// units produces a day that does not exist in the resulting month.
///
/// The default is [`OverflowPolicy::PreviousValidDate`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverflowPolicy {
    /// Clamp to the last valid day of the resulting month.
    #[default]
    PreviousValidDate,
    /// Roll into the first day of the following month.
    NextValidDate,
    /// Always snap to the last day of the resulting month.
    EndOfMonth,
    /// Add the overflowing days past the end of the resulting month.
    CarryOver,
    /// Reject the addition with a range error.
    UnlessInvalid,
    /// Clamp only when the start date was the last day of its month,
    /// otherwise roll forward.
    KeepingLastDate,
    /// Joda-Time compatible month arithmetic.
    JodaMetric,
}

impl OverflowPolicy {
    /// All policies, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::PreviousValidDate,
        Self::NextValidDate,
        Self::EndOfMonth,
        Self::CarryOver,
        Self::UnlessInvalid,
        Self::KeepingLastDate,
        Self::JodaMetric,
    ];

    /// Returns the canonical name of this policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PreviousValidDate => "PREVIOUS_VALID_DATE",
            Self::NextValidDate => "NEXT_VALID_DATE",
            Self::EndOfMonth => "END_OF_MONTH",
            Self::CarryOver => "CARRY_OVER",
            Self::UnlessInvalid => "UNLESS_INVALID",
            Self::KeepingLastDate => "KEEPING_LAST_DATE",
            Self::JodaMetric => "JODA_METRIC",
        }
    }
}

/// A parsing error for `OverflowPolicy`
#[derive(Debug, Clone, Copy)]
pub struct ParseOverflowPolicyError;

impl fmt::Display for ParseOverflowPolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid overflow policy")
    }
}

impl FromStr for OverflowPolicy {
    type Err = ParseOverflowPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_str() == s)
            .ok_or(ParseOverflowPolicyError)
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_str().fmt(f)
    }
}

// ==== NavigationDirection ====

/// The direction an ordinal navigation operator moves in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationDirection {
    /// Strictly after the current value.
    Next,
    /// Strictly before the current value.
    Previous,
    /// After the current value, or the current value itself.
    NextOrSame,
    /// Before the current value, or the current value itself.
    PreviousOrSame,
}

impl NavigationDirection {
    /// Whether this direction moves forward.
    #[inline]
    #[must_use]
    pub const fn is_forward(self) -> bool {
        matches!(self, Self::Next | Self::NextOrSame)
    }

    /// Whether the current value is an acceptable result.
    #[inline]
    #[must_use]
    pub const fn allows_same(self) -> bool {
        matches!(self, Self::NextOrSame | Self::PreviousOrSame)
    }
}

/// A parsing error for `NavigationDirection`.
#[derive(Debug, Clone, Copy)]
pub struct ParseNavigationDirectionError;

impl fmt::Display for ParseNavigationDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid navigation direction")
    }
}

impl FromStr for NavigationDirection {
    type Err = ParseNavigationDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "next" => Ok(Self::Next),
            "previous" => Ok(Self::Previous),
            "nextOrSame" => Ok(Self::NextOrSame),
            "previousOrSame" => Ok(Self::PreviousOrSame),
            _ => Err(ParseNavigationDirectionError),
        }
    }
}

impl fmt::Display for NavigationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Next => "next",
            Self::Previous => "previous",
            Self::NextOrSame => "nextOrSame",
            Self::PreviousOrSame => "previousOrSame",
        }
        .fmt(f)
    }
}

// ==== StepRounding ====

/// The rounding mode of a round-to-step operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepRounding {
    /// Round to the multiple of the step at or above the value.
    Up,
    /// Round to the closer multiple, ties resolved up.
    Half,
    /// Round to the multiple of the step at or below the value.
    Down,
}

/// A parsing error for `StepRounding`.
#[derive(Debug, Clone, Copy)]
pub struct ParseStepRoundingError;

impl fmt::Display for ParseStepRoundingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid step rounding mode")
    }
}

impl FromStr for StepRounding {
    type Err = ParseStepRoundingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "half" => Ok(Self::Half),
            "down" => Ok(Self::Down),
            _ => Err(ParseStepRoundingError),
        }
    }
}

impl fmt::Display for StepRounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => "up",
            Self::Half => "half",
            Self::Down => "down",
        }
        .fmt(f)
    }
}

// ==== NormalizerMode ====

/// The family a normalizer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalizerMode {
    /// Collapse the whole span into the target unit.
    Only,
    /// Keep the items at or finer than the target unit.
    Truncate,
    /// Round the next finer unit half-up into the target unit.
    Round,
}

impl fmt::Display for NormalizerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Only => "only",
            Self::Truncate => "truncate",
            Self::Round => "round",
        }
        .fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::{NavigationDirection, OverflowPolicy, StepRounding};
    use alloc::string::ToString;
    use core::str::FromStr;

    #[test]
    fn overflow_policy_names() {
        for policy in OverflowPolicy::ALL {
            let name = policy.to_string();
            assert_eq!(OverflowPolicy::from_str(&name).ok(), Some(policy));
        }
        assert_eq!(OverflowPolicy::default().to_string(), "PREVIOUS_VALID_DATE");
        assert!(OverflowPolicy::from_str("carry_over").is_err());
    }

    #[test]
    fn navigation_direction_flags() {
        assert!(NavigationDirection::Next.is_forward());
        assert!(!NavigationDirection::Next.allows_same());
        assert!(!NavigationDirection::PreviousOrSame.is_forward());
        assert!(NavigationDirection::PreviousOrSame.allows_same());
        assert_eq!(
            NavigationDirection::from_str("nextOrSame").ok(),
            Some(NavigationDirection::NextOrSame)
        );
    }

    #[test]
    fn step_rounding_parse() {
        assert_eq!(
            StepRounding::from_str("half").ok(),
            Some(StepRounding::Half)
        );
        assert!(StepRounding::from_str("ceil").is_err());
    }
}
