//! Core module has common/shared math, traits, and unit conversion modules.
pub mod math;
pub mod traits;
pub mod units;
