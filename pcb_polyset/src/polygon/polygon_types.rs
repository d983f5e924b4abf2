//! Supporting public types used by the polygon set operations.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents the orientation of a ring.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RingOrientation {
    /// Ring encloses zero area (all points collinear or fewer than 3 points).
    Degenerate,
    /// Ring is directionally clockwise.
    Clockwise,
    /// Ring is directionally counter clockwise.
    CounterClockwise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
/// Boolean operation to apply to polygon sets.
pub enum BooleanOp {
    /// Return the union of the sets.
    Or,
    /// Return the intersection of the sets.
    And,
    /// Return the exclusion of a set from another.
    Not,
    /// Exclusive OR between sets.
    Xor,
}

impl BooleanOp {
    /// Returns `true` if a location with the given containment in the first and second operand is
    /// part of the result.
    #[inline]
    pub fn keeps(self, in_first: bool, in_second: bool) -> bool {
        match self {
            BooleanOp::Or => in_first || in_second,
            BooleanOp::And => in_first && in_second,
            BooleanOp::Not => in_first && !in_second,
            BooleanOp::Xor => in_first != in_second,
        }
    }
}

/// Location of a point relative to a ring or polygon.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PointLocation {
    Inside,
    Outside,
    OnBoundary,
}
