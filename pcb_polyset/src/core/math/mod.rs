//! Core math functions and types, real valued (millimetre) vectors and exact integer points.
mod base_math;
mod point;
mod vector2;

pub use base_math::*;
pub use point::*;
pub use vector2::*;
