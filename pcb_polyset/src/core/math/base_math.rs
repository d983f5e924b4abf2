use super::Vector2;
use crate::core::traits::Real;

/// Returns the (min, max) values from `v1` and `v2`.
///
/// # Examples
///
/// ```
/// # use pcb_polyset::core::math::*;
/// let (min_val, max_val) = min_max(8, 4);
/// assert_eq!(min_val, 4);
/// assert_eq!(max_val, 8);
/// ```
#[inline]
pub fn min_max<T>(v1: T, v2: T) -> (T, T)
where
    T: PartialOrd,
{
    if v1 < v2 {
        (v1, v2)
    } else {
        (v2, v1)
    }
}

/// Normalize radians to be between `0` and `2PI`, e.g. `-PI/4` becomes `7PI/4` and `5PI` becomes
/// `PI`.
///
/// # Examples
///
/// ```
/// # use pcb_polyset::core::math::*;
/// # use pcb_polyset::core::traits::*;
/// use std::f64::consts::PI;
/// assert!(normalize_radians(5.0 * PI).fuzzy_eq(PI));
/// assert!(normalize_radians(-PI / 4.0).fuzzy_eq(7.0 * PI / 4.0));
/// assert!(normalize_radians(PI).fuzzy_eq(PI));
/// ```
#[inline]
pub fn normalize_radians<T>(angle: T) -> T
where
    T: Real,
{
    if angle >= T::zero() && angle <= T::tau() {
        return angle;
    }

    angle - (angle / T::tau()).floor() * T::tau()
}

/// Tests if `test_angle` lies strictly inside the counter clockwise sweep going from
/// `start_angle` to `end_angle`.
///
/// # Examples
///
/// ```
/// # use pcb_polyset::core::math::*;
/// use std::f64::consts::PI;
/// assert!(angle_is_strictly_between(0.0, -PI / 2.0, PI / 2.0));
/// assert!(!angle_is_strictly_between(PI, -PI / 2.0, PI / 2.0));
/// // sweep wraps around through 0
/// assert!(angle_is_strictly_between(0.0, 3.0 * PI / 2.0, PI / 2.0));
/// ```
#[inline]
pub fn angle_is_strictly_between<T>(test_angle: T, start_angle: T, end_angle: T) -> bool
where
    T: Real,
{
    let end_sweep = normalize_radians(end_angle - start_angle);
    let mid_sweep = normalize_radians(test_angle - start_angle);

    mid_sweep > T::zero() && mid_sweep < end_sweep
}

/// Angle of the direction vector going from `p0` to `p1`.
#[inline]
pub fn angle<T>(p0: Vector2<T>, p1: Vector2<T>) -> T
where
    T: Real,
{
    T::atan2(p1.y - p0.y, p1.x - p0.x)
}

/// Returns the point on the circle with `radius`, `center`, and polar `angle` in radians given.
#[inline]
pub fn point_on_circle<T>(radius: T, center: Vector2<T>, angle: T) -> Vector2<T>
where
    T: Real,
{
    Vector2::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// Factor a circle radius must be multiplied by so a regular polygon with `segment_count` sides
/// fully contains the circle (apothem equal to the original radius), `1 / cos(PI / n)`.
///
/// # Examples
///
/// ```
/// # use pcb_polyset::core::math::*;
/// # use pcb_polyset::core::traits::*;
/// // a square needs sqrt(2) to cover its inscribed circle
/// assert!(circle_correction_factor::<f64>(4).fuzzy_eq(2.0f64.sqrt()));
/// assert!(circle_correction_factor::<f64>(64) > 1.0);
/// ```
#[inline]
pub fn circle_correction_factor<T>(segment_count: u32) -> T
where
    T: Real,
{
    let n: T = num_traits::cast(segment_count.max(3)).unwrap_or_else(T::one);
    T::one() / (T::pi() / n).cos()
}
