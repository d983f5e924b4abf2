//! Plain data model of the board items the polygon pipeline consumes.
//!
//! This is not a board file parser, callers build a [Board] from whatever source they load.
mod items;
mod layer;
mod net;

pub use items::*;
pub use layer::*;
pub use net::*;

use crate::error::BoardError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Board contents: copper items, footprints, graphics, and the net table.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Board {
    pub tracks: Vec<Track>,
    pub vias: Vec<Via>,
    pub zones: Vec<Zone>,
    pub modules: Vec<Module>,
    pub drawings: Vec<Drawing>,
    nets: NetTable,
}

impl Board {
    pub fn new() -> Self {
        Default::default()
    }

    /// Register a net by name, returning its code (existing code if already registered).
    pub fn add_net(&mut self, name: &str) -> NetCode {
        self.nets.add(name)
    }

    pub fn add_track(&mut self, track: Track) -> &mut Self {
        self.tracks.push(track);
        self
    }

    pub fn add_via(&mut self, via: Via) -> &mut Self {
        self.vias.push(via);
        self
    }

    pub fn add_zone(&mut self, zone: Zone) -> &mut Self {
        self.zones.push(zone);
        self
    }

    pub fn add_module(&mut self, module: Module) -> &mut Self {
        self.modules.push(module);
        self
    }

    pub fn add_drawing(&mut self, drawing: Drawing) -> &mut Self {
        self.drawings.push(drawing);
        self
    }

    #[inline]
    pub fn nets(&self) -> &NetTable {
        &self.nets
    }

    #[inline]
    pub fn nets_mut(&mut self) -> &mut NetTable {
        &mut self.nets
    }

    /// Resolve a net code to its net.
    pub fn net(&self, code: NetCode) -> Result<&Net, BoardError> {
        self.nets.get(code)
    }

    /// Iterate the copper items: tracks, vias, zones, and the pads of every module.
    pub fn copper_items(&self) -> impl Iterator<Item = BoardItem<'_>> + '_ {
        self.tracks
            .iter()
            .map(BoardItem::Track)
            .chain(self.vias.iter().map(BoardItem::Via))
            .chain(self.zones.iter().map(BoardItem::Zone))
            .chain(
                self.modules
                    .iter()
                    .flat_map(|m| m.pads.iter().map(BoardItem::Pad)),
            )
    }

    /// Iterate every item, the copper items followed by the drawings.
    pub fn items(&self) -> impl Iterator<Item = BoardItem<'_>> + '_ {
        self.copper_items()
            .chain(self.drawings.iter().map(BoardItem::Drawing))
    }
}
