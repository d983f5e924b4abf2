use super::Vector2;
use crate::core::units::{checked_iu, to_mm, IU_PER_MM};
use crate::error::GeometryError;
use std::ops;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Point (or vector) with integer internal unit coordinates.
///
/// Ordering is lexicographic on `(x, y)`, which gives a deterministic total order used for
/// canonical ring starts and map keys.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Point { x, y }
    }

    /// Snap a millimetre position to the nearest internal unit point.
    ///
    /// # Examples
    ///
    /// ```
    /// # use pcb_polyset::core::math::*;
    /// let p = Point::from_mm(Vector2::new(1.0, -0.5)).unwrap();
    /// assert_eq!(p, Point::new(1_000_000, -500_000));
    /// ```
    pub fn from_mm(v: Vector2<f64>) -> Result<Self, GeometryError> {
        if !v.is_finite() {
            return Err(GeometryError::NonFiniteCoordinate);
        }

        Ok(Point::new(
            checked_iu((v.x * IU_PER_MM).round())?,
            checked_iu((v.y * IU_PER_MM).round())?,
        ))
    }

    /// Position in millimetres.
    #[inline]
    pub fn to_mm(&self) -> Vector2<f64> {
        Vector2::new(to_mm(self.x), to_mm(self.y))
    }

    /// Dot product, exact.
    #[inline]
    pub fn dot(&self, other: Point) -> i128 {
        self.x as i128 * other.x as i128 + self.y as i128 * other.y as i128
    }

    /// Perpendicular dot product (`self.x * other.y - self.y * other.x`), exact.
    #[inline]
    pub fn perp_dot(&self, other: Point) -> i128 {
        self.x as i128 * other.y as i128 - self.y as i128 * other.x as i128
    }
}

impl ops::Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl ops::Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Twice the signed area of the triangle `p0, p1, point`. Positive if `point` is left of the
/// directed line `p0 -> p1`, negative if right, zero if collinear.
///
/// # Examples
///
/// ```
/// # use pcb_polyset::core::math::*;
/// let a = Point::new(0, 0);
/// let b = Point::new(10, 0);
/// assert!(orient2d(a, b, Point::new(5, 1)) > 0);
/// assert!(orient2d(a, b, Point::new(5, -1)) < 0);
/// assert_eq!(orient2d(a, b, Point::new(20, 0)), 0);
/// ```
#[inline]
pub fn orient2d(p0: Point, p1: Point, point: Point) -> i128 {
    (p1 - p0).perp_dot(point - p0)
}

/// Same as [orient2d] for points given in any scale as 128 bit pairs (used for doubled midpoint
/// coordinates).
#[inline]
pub fn orient2d_wide(p0: (i128, i128), p1: (i128, i128), point: (i128, i128)) -> i128 {
    (p1.0 - p0.0) * (point.1 - p0.1) - (p1.1 - p0.1) * (point.0 - p0.0)
}

/// Returns `true` if `point` lies on the closed segment `p0 -> p1`.
#[inline]
pub fn point_on_segment(p0: Point, p1: Point, point: Point) -> bool {
    orient2d(p0, p1, point) == 0
        && point.x >= p0.x.min(p1.x)
        && point.x <= p0.x.max(p1.x)
        && point.y >= p0.y.min(p1.y)
        && point.y <= p0.y.max(p1.y)
}

/// Integer division rounding to the nearest value (ties away from zero).
#[inline]
pub fn div_round(numerator: i128, denominator: i128) -> i128 {
    let (n, d) = if denominator < 0 {
        (-numerator, -denominator)
    } else {
        (numerator, denominator)
    };

    if n >= 0 {
        (2 * n + d) / (2 * d)
    } else {
        -((-2 * n + d) / (2 * d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn div_round_to_nearest() {
        assert_eq!(div_round(7, 2), 4);
        assert_eq!(div_round(-7, 2), -4);
        assert_eq!(div_round(5, 3), 2);
        assert_eq!(div_round(4, 3), 1);
        assert_eq!(div_round(-4, -3), 1);
        assert_eq!(div_round(4, -3), -1);
    }

    #[test]
    fn point_on_segment_includes_end_points() {
        let a = Point::new(0, 0);
        let b = Point::new(10, 10);
        assert!(point_on_segment(a, b, a));
        assert!(point_on_segment(a, b, Point::new(5, 5)));
        assert!(!point_on_segment(a, b, Point::new(11, 11)));
        assert!(!point_on_segment(a, b, Point::new(5, 6)));
    }

    #[test]
    fn from_mm_rejects_out_of_range() {
        assert!(Point::from_mm(Vector2::new(2.0e6, 0.0)).is_err());
        assert!(Point::from_mm(Vector2::new(0.0, f64::INFINITY)).is_err());
    }
}
