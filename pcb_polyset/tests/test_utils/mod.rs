#![allow(dead_code)]
mod boards;
mod set_properties;

pub use boards::*;
pub use set_properties::*;
