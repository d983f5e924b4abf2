use crate::error::BoardError;
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of layer ids a board can use.
pub const LAYER_COUNT: u8 = 50;

/// Board layer, identified by id (`0` is the front copper layer, `31` the back copper layer).
///
/// Ids are always below [LAYER_COUNT], deserialized values are checked the same way as
/// [Layer::new].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub struct Layer(u8);

impl Layer {
    pub const F_CU: Layer = Layer(0);
    pub const B_CU: Layer = Layer(31);

    /// Create a layer from its id, failing for ids outside the layer range.
    pub fn new(id: u8) -> Result<Self, BoardError> {
        if id >= LAYER_COUNT {
            return Err(BoardError::InvalidLayerId { id });
        }
        Ok(Layer(id))
    }

    #[inline]
    pub fn id(self) -> u8 {
        self.0
    }

    /// Returns `true` for the front, back, and inner copper layers.
    #[inline]
    pub fn is_copper(self) -> bool {
        self.0 <= Layer::B_CU.0
    }

    /// Inner copper layer `In<n>.Cu` for `n` in `1..=30`.
    pub fn inner_copper(n: u8) -> Result<Self, BoardError> {
        if n == 0 || n >= Layer::B_CU.0 {
            return Err(BoardError::InvalidLayerId { id: n });
        }
        Ok(Layer(n))
    }
}

impl TryFrom<u8> for Layer {
    type Error = BoardError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Layer::new(id)
    }
}

impl From<Layer> for u8 {
    fn from(layer: Layer) -> Self {
        layer.0
    }
}

/// Set of layers an item is present on.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayerSet(u64);

impl LayerSet {
    #[inline]
    pub fn new() -> Self {
        LayerSet(0)
    }

    pub fn single(layer: Layer) -> Self {
        let mut result = Self::new();
        result.insert(layer);
        result
    }

    /// All copper layers from `from` to `to` inclusive (in either order).
    pub fn copper_through(from: Layer, to: Layer) -> Self {
        let (lo, hi) = crate::core::math::min_max(from.0, to.0);
        let mut result = Self::new();
        for id in lo..=hi.min(Layer::B_CU.0) {
            result.insert(Layer(id));
        }
        result
    }

    /// All copper layers.
    #[inline]
    pub fn all_copper() -> Self {
        Self::copper_through(Layer::F_CU, Layer::B_CU)
    }

    #[inline]
    pub fn insert(&mut self, layer: Layer) {
        self.0 |= 1 << layer.0;
    }

    #[inline]
    pub fn with(mut self, layer: Layer) -> Self {
        self.insert(layer);
        self
    }

    #[inline]
    pub fn contains(&self, layer: Layer) -> bool {
        self.0 & (1 << layer.0) != 0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate the layers in id order.
    pub fn iter(&self) -> impl Iterator<Item = Layer> + '_ {
        (0..LAYER_COUNT)
            .map(Layer)
            .filter(move |l| self.contains(*l))
    }
}

impl FromIterator<Layer> for LayerSet {
    fn from_iter<I: IntoIterator<Item = Layer>>(iter: I) -> Self {
        let mut result = LayerSet::new();
        for l in iter {
            result.insert(l);
        }
        result
    }
}

/// Lookup between layer names and layers.
///
/// Constructed explicitly and passed to whatever needs it, [LayerTable::standard] gives the
/// default board layer names.
#[derive(Debug, Clone)]
pub struct LayerTable {
    names: Vec<String>,
    by_name: HashMap<String, Layer>,
}

impl LayerTable {
    /// Table with the standard layer names: `F.Cu`, `In1.Cu` .. `In30.Cu`, `B.Cu` and the
    /// technical layers.
    pub fn standard() -> Self {
        let mut names = Vec::with_capacity(LAYER_COUNT as usize);
        names.push("F.Cu".to_string());
        names.extend((1..=30).map(|n| format!("In{n}.Cu")));
        names.push("B.Cu".to_string());
        names.extend(
            [
                "B.Adhes",
                "F.Adhes",
                "B.Paste",
                "F.Paste",
                "B.SilkS",
                "F.SilkS",
                "B.Mask",
                "F.Mask",
                "Dwgs.User",
                "Cmts.User",
                "Eco1.User",
                "Eco2.User",
                "Edge.Cuts",
                "Margin",
                "B.CrtYd",
                "F.CrtYd",
                "B.Fab",
                "F.Fab",
            ]
            .iter()
            .map(|s| s.to_string()),
        );

        Self::from_names(names)
    }

    /// Table using `names[i]` as the name of layer id `i`, names past the layer count are
    /// ignored.
    pub fn from_names(names: Vec<String>) -> Self {
        let mut names = names;
        names.truncate(LAYER_COUNT as usize);
        let by_name = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), Layer(i as u8)))
            .collect();

        LayerTable { names, by_name }
    }

    pub fn layer_by_name(&self, name: &str) -> Result<Layer, BoardError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| BoardError::UnknownLayer {
                name: name.to_string(),
            })
    }

    pub fn name_of(&self, layer: Layer) -> Option<&str> {
        self.names.get(layer.0 as usize).map(String::as_str)
    }

    /// Iterate `(layer, name)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (Layer, &str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(|(i, n)| (Layer(i as u8), n.as_str()))
    }
}
