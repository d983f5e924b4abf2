//! Polygon sets and the boolean/fracture operations on them.
mod polygon_set;
mod polygon_types;
mod region;
pub(crate) mod ring;
mod snapshot;

/// Internal algorithms made public for testing and benchmarking purposes.
pub mod internal;

pub use polygon_set::*;
pub use polygon_types::*;
pub use region::*;
pub use ring::Ring;
pub use snapshot::*;
