//! Grouping of extracted item shapes by net for one board layer.
use crate::{
    board::{Board, Layer, Net},
    error::{GeometryError, Result},
    extract::{extract_item_shape, TessellationOptions},
    polygon::PolygonSet,
};
use log::{debug, trace};
use std::collections::BTreeMap;

/// Shapes of the individual items on one layer grouped by net, in board order.
#[derive(Debug, Clone, Default)]
pub struct NetFragments {
    nets: BTreeMap<Net, Vec<PolygonSet>>,
}

impl NetFragments {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push(&mut self, net: Net, fragment: PolygonSet) {
        self.nets.entry(net).or_default().push(fragment);
    }

    pub fn get(&self, net: &Net) -> Option<&[PolygonSet]> {
        self.nets.get(net).map(Vec::as_slice)
    }

    /// Number of nets with at least one fragment.
    #[inline]
    pub fn len(&self) -> usize {
        self.nets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nets.is_empty()
    }

    /// Total number of fragments across all nets.
    pub fn fragment_count(&self) -> usize {
        self.nets.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Net, &[PolygonSet])> + '_ {
        self.nets.iter().map(|(n, f)| (n, f.as_slice()))
    }
}

/// One merged and fractured polygon set per net.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetPolygons {
    nets: BTreeMap<Net, PolygonSet>,
}

impl NetPolygons {
    pub fn new() -> Self {
        Default::default()
    }

    /// Set the polygons of `net`, returning the previous set if there was one.
    pub fn insert(&mut self, net: Net, polygons: PolygonSet) -> Option<PolygonSet> {
        self.nets.insert(net, polygons)
    }

    pub fn get(&self, net: &Net) -> Option<&PolygonSet> {
        self.nets.get(net)
    }

    pub fn contains(&self, net: &Net) -> bool {
        self.nets.contains_key(net)
    }

    /// Iterate the nets in name order.
    pub fn nets(&self) -> impl Iterator<Item = &Net> + '_ {
        self.nets.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Net, &PolygonSet)> + '_ {
        self.nets.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nets.is_empty()
    }

    /// Sum of the areas of all nets in square millimetres.
    pub fn total_area(&self) -> f64 {
        self.nets.values().map(PolygonSet::area).sum()
    }
}

impl FromIterator<(Net, PolygonSet)> for NetPolygons {
    fn from_iter<I: IntoIterator<Item = (Net, PolygonSet)>>(iter: I) -> Self {
        NetPolygons {
            nets: iter.into_iter().collect(),
        }
    }
}

/// Extract the shape of every track, via, zone, and pad present on `layer` and group them by
/// net. Drawings are not copper and are skipped.
pub fn collect_net_fragments(
    board: &Board,
    layer: Layer,
    options: &TessellationOptions,
) -> Result<NetFragments> {
    let mut fragments = NetFragments::new();
    for item in board.copper_items() {
        if !item.layers().contains(layer) {
            continue;
        }

        let Some(code) = item.net() else {
            continue;
        };

        let net = board.net(code)?.clone();
        let shape = extract_item_shape(item, options)?;
        if shape.is_empty() {
            trace!("{} on net \"{}\" has no area, skipped", item.kind_name(), net);
            continue;
        }

        fragments.push(net, shape);
    }

    let skipped = board
        .drawings
        .iter()
        .filter(|d| d.layer() == layer)
        .count();
    if skipped > 0 {
        debug!("{skipped} drawings on layer {} not included", layer.id());
    }

    Ok(fragments)
}

/// Union the fragments of each net into one set and fracture it.
pub fn merge_net_fragments(fragments: NetFragments) -> Result<NetPolygons, GeometryError> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        let merged = fragments
            .nets
            .into_par_iter()
            .map(|(net, list)| merge_fragments(&net, list).map(|set| (net, set)))
            .collect::<Result<Vec<_>, GeometryError>>()?;

        Ok(merged.into_iter().collect())
    }

    #[cfg(not(feature = "parallel"))]
    {
        fragments
            .nets
            .into_iter()
            .map(|(net, list)| merge_fragments(&net, list).map(|set| (net, set)))
            .collect()
    }
}

/// Shapes of all items on `layer` merged per net and fractured.
pub fn net_polygons(
    board: &Board,
    layer: Layer,
    options: &TessellationOptions,
) -> Result<NetPolygons> {
    let fragments = collect_net_fragments(board, layer, options)?;
    Ok(merge_net_fragments(fragments)?)
}

/// Union `fragments` pairwise (balanced so each set takes part in a logarithmic number of
/// unions) then fracture the result.
fn merge_fragments(net: &Net, fragments: Vec<PolygonSet>) -> Result<PolygonSet, GeometryError> {
    debug!(
        "unify polyset for \"{}\" with {} subpolygons",
        net,
        fragments.len()
    );

    let mut level = fragments;
    while level.len() > 1 {
        let mut next = Vec::with_capacity((level.len() + 1) / 2);
        let mut iter = level.into_iter();
        while let Some(mut a) = iter.next() {
            if let Some(b) = iter.next() {
                a.union(&b)?;
            }
            next.push(a);
        }
        level = next;
    }

    let mut merged = level.pop().unwrap_or_default();
    merged.fracture()?;
    Ok(merged)
}
