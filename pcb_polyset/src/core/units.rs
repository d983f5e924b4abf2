//! Conversion between millimetres and internal units.
//!
//! All geometry is stored as integer internal units (IU) of one nanometre, the same resolution
//! board files use. Coordinates are bounded by [MAX_COORD_IU] so exact predicates on them fit in
//! 128 bit integers.
use crate::error::GeometryError;

/// Number of internal units per millimetre.
pub const IU_PER_MM: f64 = 1_000_000.0;

/// Largest absolute coordinate value (in internal units) accepted, roughly 1.1 km.
pub const MAX_COORD_IU: i64 = 1 << 40;

/// Convert an internal unit value to millimetres.
///
/// # Examples
///
/// ```
/// # use pcb_polyset::core::units::*;
/// assert_eq!(to_mm(2_500_000), 2.5);
/// ```
#[inline]
pub fn to_mm(iu: i64) -> f64 {
    iu as f64 / IU_PER_MM
}

/// Convert a millimetre value to the nearest internal unit value.
///
/// Fails for NaN/infinite values and for values outside of `±MAX_COORD_IU`.
///
/// # Examples
///
/// ```
/// # use pcb_polyset::core::units::*;
/// assert_eq!(from_mm(0.1).unwrap(), 100_000);
/// assert!(from_mm(f64::NAN).is_err());
/// ```
#[inline]
pub fn from_mm(mm: f64) -> Result<i64, GeometryError> {
    if !mm.is_finite() {
        return Err(GeometryError::NonFiniteCoordinate);
    }

    checked_iu((mm * IU_PER_MM).round())
}

/// Check an already scaled (but not yet integer) value is within range and convert it.
#[inline]
pub(crate) fn checked_iu(value: f64) -> Result<i64, GeometryError> {
    if !value.is_finite() {
        return Err(GeometryError::NonFiniteCoordinate);
    }

    if value.abs() > MAX_COORD_IU as f64 {
        return Err(GeometryError::CoordinateOutOfRange { value_mm: value / IU_PER_MM });
    }

    Ok(value as i64)
}

/// Convert an internal unit area (squared internal units) to square millimetres.
#[inline]
pub fn area_to_mm2(area_iu: f64) -> f64 {
    area_iu / (IU_PER_MM * IU_PER_MM)
}
