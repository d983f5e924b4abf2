//! Net by net comparison of two versions of a board layer.
use crate::{
    aggregate::{net_polygons, NetPolygons},
    board::{Board, Layer, Net},
    error::{GeometryError, Result},
    extract::TessellationOptions,
    polygon::PolygonSet,
};
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// How the geometry of one net changed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum NetDiffKind {
    /// Net present in both versions with identical geometry.
    Unchanged,
    /// Net present in both versions with geometry added, removed, or both.
    Modified,
    /// Net only present in the new version.
    Added,
    /// Net only present in the old version.
    Removed,
}

/// Difference of one net.
#[derive(Debug, Clone, PartialEq)]
pub struct NetDiff {
    pub kind: NetDiffKind,
    /// Geometry of the new version not covered by the old version.
    pub added: PolygonSet,
    /// Geometry of the old version not covered by the new version.
    pub removed: PolygonSet,
}

/// Difference of a board layer.
///
/// `unchanged` is the union of all old and new geometry (every net, both versions). It is meant
/// as the background drawn under `added` and `removed`, not as the area that stayed the same.
/// All three sets are fractured.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerDiff {
    pub unchanged: PolygonSet,
    pub added: PolygonSet,
    pub removed: PolygonSet,
    pub per_net: BTreeMap<Net, NetDiff>,
}

impl LayerDiff {
    /// Returns `true` if no geometry was added or removed on any net.
    pub fn is_identical(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Iterate the nets that are not [NetDiffKind::Unchanged].
    pub fn changed_nets(&self) -> impl Iterator<Item = (&Net, &NetDiff)> + '_ {
        self.per_net
            .iter()
            .filter(|(_, d)| d.kind != NetDiffKind::Unchanged)
    }
}

/// Diff two per net polygon maps.
///
/// Every net present in either map is processed, geometry is never combined across nets before
/// the per net differences are taken.
pub fn diff_net_polygons(old: &NetPolygons, new: &NetPolygons) -> Result<LayerDiff, GeometryError> {
    let all_nets: BTreeSet<&Net> = old.nets().chain(new.nets()).collect();
    let mut result = LayerDiff::default();

    for net in all_nets {
        let (kind, added, removed) = match (old.get(net), new.get(net)) {
            (Some(old_set), Some(new_set)) => {
                result.unchanged.union(old_set)?;
                result.unchanged.union(new_set)?;

                let mut removed = old_set.clone();
                removed.difference(new_set)?;
                let mut added = new_set.clone();
                added.difference(old_set)?;

                let kind = if added.is_empty() && removed.is_empty() {
                    NetDiffKind::Unchanged
                } else {
                    NetDiffKind::Modified
                };
                (kind, added, removed)
            }
            (Some(old_set), None) => {
                result.unchanged.union(old_set)?;
                (NetDiffKind::Removed, PolygonSet::new(), old_set.clone())
            }
            (None, Some(new_set)) => {
                result.unchanged.union(new_set)?;
                (NetDiffKind::Added, new_set.clone(), PolygonSet::new())
            }
            (None, None) => continue,
        };

        debug!(
            "net \"{}\" {:?}: {} added, {} removed polygons",
            net,
            kind,
            added.polygon_count(),
            removed.polygon_count()
        );

        result.added.union(&added)?;
        result.removed.union(&removed)?;

        let mut net_diff = NetDiff {
            kind,
            added,
            removed,
        };
        net_diff.added.fracture()?;
        net_diff.removed.fracture()?;
        result.per_net.insert(net.clone(), net_diff);
    }

    result.unchanged.fracture()?;
    result.added.fracture()?;
    result.removed.fracture()?;

    Ok(result)
}

/// Diff `layer` of two versions of a board.
pub fn diff_boards(
    old: &Board,
    new: &Board,
    layer: Layer,
    options: &TessellationOptions,
) -> Result<LayerDiff> {
    let old_polygons = net_polygons(old, layer, options)?;
    let new_polygons = net_polygons(new, layer, options)?;
    debug!(
        "diffing layer {}: {} old nets, {} new nets",
        layer.id(),
        old_polygons.len(),
        new_polygons.len()
    );

    Ok(diff_net_polygons(&old_polygons, &new_polygons)?)
}
