//! This crate provides a polygon set engine for comparing printed circuit board copper layers.
//!
//! The engine ([polygon]) holds sets of polygons with holes in integer internal units and supports
//! exact union, difference, intersection and xor, plus "fracturing" (replacing holes with zero
//! width slits) for consumers that can only draw plain outlines.
//!
//! On top of it the crate converts board items (tracks, vias, zones, pads) to polygon sets
//! ([extract]), merges them per electrical net for one layer ([aggregate]), and diffs two
//! versions of a board layer net by net ([diff]). The board items themselves are described by a
//! small plain data model ([board]), loading board files is left to the caller.
//!
//! # Example
//!
//! ```
//! use pcb_polyset::prelude::*;
//!
//! let layers = LayerTable::standard();
//! let front = layers.layer_by_name("F.Cu").unwrap();
//!
//! let mut old_board = Board::new();
//! let gnd = old_board.add_net("GND");
//! old_board.add_track(Track::new(vec2(0.0, 0.0), vec2(10.0, 0.0), 0.25, front, gnd));
//!
//! let mut new_board = old_board.clone();
//! new_board.add_via(Via::through(vec2(10.0, 0.0), 0.6, 0.3, gnd));
//!
//! let diff = diff_boards(&old_board, &new_board, front, &TessellationOptions::new()).unwrap();
//! assert!(diff.removed.is_empty());
//! assert!(!diff.added.is_empty());
//! ```
#[macro_use]
mod macros;

pub mod aggregate;
pub mod board;
pub mod core;
pub mod diff;
pub mod error;
pub mod extract;
pub mod polygon;

pub use static_aabb2d_index::AABB;

pub use error::{Error, Result};

/// Commonly used types and functions.
pub mod prelude {
    pub use crate::aggregate::{net_polygons, NetPolygons};
    pub use crate::board::{
        Board, BoardItem, Layer, LayerSet, LayerTable, Module, Net, NetCode, Pad, PadShape, Track,
        Via, Zone,
    };
    pub use crate::core::math::{vec2, Point, Vector2};
    pub use crate::diff::{diff_boards, diff_net_polygons, LayerDiff, NetDiff, NetDiffKind};
    pub use crate::error::{BoardError, Error, ExtractError, GeometryError};
    pub use crate::extract::{extract_item_shape, TessellationOptions};
    pub use crate::polygon::{Polygon, PolygonSet};
}
