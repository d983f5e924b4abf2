use super::{
    internal::{boolean::boolean, fracture::fracture_region},
    BooleanOp, Polygon, Region, Ring,
};
use crate::{
    core::{
        math::{Point, Vector2},
        units::{area_to_mm2, checked_iu, from_mm, to_mm},
    },
    error::GeometryError,
};
use static_aabb2d_index::AABB;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Set of polygons (outlines with holes) supporting boolean operations and fracturing.
///
/// Geometry is held in integer internal units (see [units](crate::core::units)), everything
/// crossing the API (construction from points, [Polygon] snapshots, areas, extents) is in
/// millimetres.
///
/// Results of boolean operations are normalized: polygons do not overlap, outlines are counter
/// clockwise, holes are clockwise, redundant points are removed, and the polygon order is
/// deterministic. A fractured set holds outlines only.
///
/// # Examples
///
/// ```
/// # use pcb_polyset::polygon::*;
/// # use pcb_polyset::core::math::*;
/// let mut a = PolygonSet::new();
/// a.add_outline([vec2(0.0, 0.0), vec2(10.0, 0.0), vec2(10.0, 10.0), vec2(0.0, 10.0)])
///     .unwrap();
/// let mut b = PolygonSet::new();
/// b.add_outline([vec2(2.0, 2.0), vec2(4.0, 2.0), vec2(4.0, 4.0), vec2(2.0, 4.0)])
///     .unwrap();
///
/// a.difference(&b).unwrap();
/// assert_eq!(a.polygon_count(), 1);
/// assert!(a.has_holes());
///
/// a.fracture().unwrap();
/// assert!(!a.has_holes());
/// assert!((a.area() - 96.0).abs() < 1e-9);
/// ```
#[derive(Debug, Default, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolygonSet {
    regions: Vec<Region>,
}

impl PolygonSet {
    /// Create a new empty set.
    #[inline]
    pub fn new() -> Self {
        PolygonSet {
            regions: Vec::new(),
        }
    }

    /// Alias of [PolygonSet::new].
    #[inline]
    pub fn empty() -> Self {
        Self::new()
    }

    /// Create a set from regions given in internal units, orientation is normalized but no other
    /// processing happens (overlapping regions stay overlapping until a boolean operation or
    /// [PolygonSet::simplify]).
    pub fn from_regions(regions: Vec<Region>) -> Self {
        let mut regions = regions;
        for r in regions.iter_mut() {
            r.normalize_orientation();
        }
        PolygonSet { regions }
    }

    /// Create a set holding one polygon.
    pub fn from_polygon(polygon: &Polygon) -> Result<Self, GeometryError> {
        let mut result = Self::new();
        let index = result.add_outline(polygon.outline().iter().copied())?;
        for h in polygon.holes() {
            result.add_hole(index, h.iter().copied())?;
        }
        Ok(result)
    }

    /// Regions of the set in internal units.
    #[inline]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Add a new polygon outline (millimetre points), returns the index of the new polygon.
    pub fn add_outline<I>(&mut self, points: I) -> Result<usize, GeometryError>
    where
        I: IntoIterator<Item = Vector2<f64>>,
    {
        let mut ring = checked_ring(points)?;
        ring.orient(true);
        self.regions.push(Region::new(ring));
        Ok(self.regions.len() - 1)
    }

    /// Add a hole (millimetre points) to the polygon at `polygon_index`.
    pub fn add_hole<I>(&mut self, polygon_index: usize, points: I) -> Result<(), GeometryError>
    where
        I: IntoIterator<Item = Vector2<f64>>,
    {
        let count = self.regions.len();
        let region = self
            .regions
            .get_mut(polygon_index)
            .ok_or(GeometryError::InvalidPolygonIndex {
                index: polygon_index,
                count,
            })?;

        let mut ring = checked_ring(points)?;
        ring.orient(false);
        region.holes.push(ring);
        Ok(())
    }

    /// Add a region given in internal units (orientation is normalized).
    pub fn add_region(&mut self, region: Region) {
        let mut region = region;
        region.normalize_orientation();
        self.regions.push(region);
    }

    /// Set self to the union of self and `other`.
    pub fn union(&mut self, other: &PolygonSet) -> Result<(), GeometryError> {
        if other.is_empty() {
            return Ok(());
        }

        if self.is_empty() {
            self.regions = other.regions.clone();
            return Ok(());
        }

        if !extents_overlap(self.extents_iu(), other.extents_iu()) {
            self.regions.extend(other.regions.iter().cloned());
            self.sort_regions();
            return Ok(());
        }

        self.boolean_assign(other, BooleanOp::Or)
    }

    /// Set self to self minus `other`.
    pub fn difference(&mut self, other: &PolygonSet) -> Result<(), GeometryError> {
        if self.is_empty() || other.is_empty() {
            return Ok(());
        }

        if !extents_overlap(self.extents_iu(), other.extents_iu()) {
            return Ok(());
        }

        self.boolean_assign(other, BooleanOp::Not)
    }

    /// Set self to the intersection of self and `other`.
    pub fn intersection(&mut self, other: &PolygonSet) -> Result<(), GeometryError> {
        if self.is_empty() || other.is_empty()
            || !extents_overlap(self.extents_iu(), other.extents_iu())
        {
            self.regions.clear();
            return Ok(());
        }

        self.boolean_assign(other, BooleanOp::And)
    }

    /// Set self to the areas covered by exactly one of self and `other`.
    pub fn xor(&mut self, other: &PolygonSet) -> Result<(), GeometryError> {
        if other.is_empty() {
            return Ok(());
        }

        self.boolean_assign(other, BooleanOp::Xor)
    }

    fn boolean_assign(&mut self, other: &PolygonSet, op: BooleanOp) -> Result<(), GeometryError> {
        log::trace!(
            "{op:?} of {} and {} polygons",
            self.regions.len(),
            other.regions.len()
        );
        self.regions = boolean(&self.regions, &other.regions, op)?;
        Ok(())
    }

    /// Normalize the set: overlapping polygons are merged, self intersections resolved, zero width
    /// slits removed, and holes rebuilt.
    pub fn simplify(&mut self) -> Result<(), GeometryError> {
        self.regions = boolean(&self.regions, &[], BooleanOp::Or)?;
        Ok(())
    }

    /// Remove all holes by joining each hole to its outline with a zero width slit.
    pub fn fracture(&mut self) -> Result<(), GeometryError> {
        for r in self.regions.iter_mut().filter(|r| r.has_holes()) {
            *r = Region::new(fracture_region(r)?);
        }
        Ok(())
    }

    /// Undo [PolygonSet::fracture], slits are removed and the holes they connected restored.
    #[inline]
    pub fn unfracture(&mut self) -> Result<(), GeometryError> {
        self.simplify()
    }

    /// Point in time snapshot of the polygons in the set.
    pub fn iter(&self) -> PolygonIter {
        let polygons: Vec<Polygon> = self
            .regions
            .iter()
            .map(|r| Polygon::new(r.outline.to_mm(), r.holes.iter().map(Ring::to_mm).collect()))
            .collect();

        PolygonIter {
            inner: polygons.into_iter(),
        }
    }

    #[inline]
    pub fn polygon_count(&self) -> usize {
        self.regions.len()
    }

    pub fn hole_count(&self) -> usize {
        self.regions.iter().map(|r| r.holes.len()).sum()
    }

    /// Total number of points across all rings.
    pub fn vertex_count(&self) -> usize {
        self.regions
            .iter()
            .flat_map(|r| r.iter_rings())
            .map(Ring::len)
            .sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn has_holes(&self) -> bool {
        self.regions.iter().any(Region::has_holes)
    }

    /// Sum of the polygon areas in square millimetres (overlaps are counted more than once if
    /// the set has not been normalized).
    pub fn area(&self) -> f64 {
        let doubled: i128 = self.regions.iter().map(Region::double_area).sum();
        area_to_mm2(doubled as f64 / 2.0)
    }

    /// Bounding box in millimetres, `None` if the set is empty.
    pub fn extents(&self) -> Option<AABB> {
        self.extents_iu().map(|b| {
            AABB::new(
                to_mm(b.min_x as i64),
                to_mm(b.min_y as i64),
                to_mm(b.max_x as i64),
                to_mm(b.max_y as i64),
            )
        })
    }

    fn extents_iu(&self) -> Option<AABB> {
        self.regions
            .iter()
            .filter_map(Region::extents)
            .reduce(|a, b| {
                AABB::new(
                    a.min_x.min(b.min_x),
                    a.min_y.min(b.min_y),
                    a.max_x.max(b.max_x),
                    a.max_y.max(b.max_y),
                )
            })
    }

    /// Translate all polygons by `dx`, `dy` millimetres.
    ///
    /// Fails with [GeometryError::CoordinateOutOfRange] (leaving the set unchanged) if any moved
    /// point would leave the coordinate range.
    pub fn translate(&mut self, dx: f64, dy: f64) -> Result<(), GeometryError> {
        let offset = Point::new(from_mm(dx)?, from_mm(dy)?);
        if let Some(b) = self.extents_iu() {
            for x in [b.min_x, b.max_x] {
                checked_iu(x + offset.x as f64)?;
            }
            for y in [b.min_y, b.max_y] {
                checked_iu(y + offset.y as f64)?;
            }
        }

        for r in self.regions.iter_mut() {
            r.translate(offset);
        }
        Ok(())
    }

    fn sort_regions(&mut self) {
        self.regions
            .sort_by(|a, b| a.outline.points().cmp(b.outline.points()));
    }

    /// Regions with every ring at its canonical start and a deterministic order.
    fn canonical_regions(&self) -> Vec<Region> {
        let mut regions = self.regions.clone();
        for r in regions.iter_mut() {
            r.canonicalize();
        }
        regions.sort_by(|a, b| a.outline.points().cmp(b.outline.points()));
        regions
    }
}

/// Convert millimetre points to a ring, failing if fewer than 3 distinct points remain.
fn checked_ring<I>(points: I) -> Result<Ring, GeometryError>
where
    I: IntoIterator<Item = Vector2<f64>>,
{
    let mut points = Ring::from_mm(points)?.into_points();
    points.dedup();
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    if points.len() < 3 {
        return Err(GeometryError::DegenerateRing {
            point_count: points.len(),
        });
    }

    Ok(Ring::from_points(points))
}

/// Returns `true` if the two boxes overlap or touch.
fn extents_overlap(a: Option<AABB>, b: Option<AABB>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => {
            a.min_x <= b.max_x && b.min_x <= a.max_x && a.min_y <= b.max_y && b.min_y <= a.max_y
        }
        _ => false,
    }
}

/// Structural equality, independent of ring start points and polygon/hole order.
impl PartialEq for PolygonSet {
    fn eq(&self, other: &Self) -> bool {
        self.regions.len() == other.regions.len()
            && self.canonical_regions() == other.canonical_regions()
    }
}

impl Eq for PolygonSet {}

impl fmt::Display for PolygonSet {
    /// Writes the debug text form: `polyset <count>`, then for each polygon `poly <ring count>`
    /// followed by each ring as its point count and one `x y` line (internal units) per point.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "polyset {}", self.regions.len())?;
        for r in self.regions.iter() {
            writeln!(f, "poly {}", 1 + r.holes.len())?;
            for ring in r.iter_rings() {
                writeln!(f, "{}", ring.len())?;
                for p in ring.points() {
                    writeln!(f, " {} {}", p.x, p.y)?;
                }
            }
            writeln!(f, "endpoly")?;
        }
        Ok(())
    }
}

/// Iterator over a snapshot of the polygons in a [PolygonSet].
#[derive(Debug, Clone)]
pub struct PolygonIter {
    inner: std::vec::IntoIter<Polygon>,
}

impl Iterator for PolygonIter {
    type Item = Polygon;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for PolygonIter {}

impl<'a> IntoIterator for &'a PolygonSet {
    type Item = Polygon;
    type IntoIter = PolygonIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{math::vec2, traits::FuzzyEq};

    fn square(x: f64, y: f64, size: f64) -> [Vector2<f64>; 4] {
        [
            vec2(x, y),
            vec2(x + size, y),
            vec2(x + size, y + size),
            vec2(x, y + size),
        ]
    }

    #[test]
    fn add_outline_normalizes_orientation() {
        let mut set = PolygonSet::new();
        let mut points = square(0.0, 0.0, 1.0);
        points.reverse();
        let index = set.add_outline(points).unwrap();
        assert_eq!(index, 0);
        assert!(set.regions()[0].outline.double_area() > 0);

        set.add_hole(0, square(0.25, 0.25, 0.5)).unwrap();
        assert!(set.regions()[0].holes[0].double_area() < 0);
    }

    #[test]
    fn add_outline_rejects_degenerate_rings() {
        let mut set = PolygonSet::new();
        let err = set
            .add_outline([vec2(0.0, 0.0), vec2(1.0, 1.0), vec2(0.0, 0.0)])
            .unwrap_err();
        assert_eq!(err, GeometryError::DegenerateRing { point_count: 2 });
        assert!(set.is_empty());
    }

    #[test]
    fn add_hole_with_bad_index() {
        let mut set = PolygonSet::new();
        set.add_outline(square(0.0, 0.0, 1.0)).unwrap();
        assert_eq!(
            set.add_hole(3, square(0.0, 0.0, 0.1)),
            Err(GeometryError::InvalidPolygonIndex { index: 3, count: 1 })
        );
    }

    #[test]
    fn disjoint_union_keeps_both() {
        let mut a = PolygonSet::new();
        a.add_outline(square(0.0, 0.0, 1.0)).unwrap();
        let mut b = PolygonSet::new();
        b.add_outline(square(5.0, 5.0, 1.0)).unwrap();
        a.union(&b).unwrap();
        assert_eq!(a.polygon_count(), 2);
        assert_fuzzy_eq!(a.area(), 2.0);
    }

    #[test]
    fn intersection_of_disjoint_sets_is_empty() {
        let mut a = PolygonSet::new();
        a.add_outline(square(0.0, 0.0, 1.0)).unwrap();
        let mut b = PolygonSet::new();
        b.add_outline(square(5.0, 5.0, 1.0)).unwrap();
        a.intersection(&b).unwrap();
        assert!(a.is_empty());
    }

    #[test]
    fn iteration_is_a_snapshot() {
        let mut set = PolygonSet::new();
        set.add_outline(square(0.0, 0.0, 1.0)).unwrap();
        let iter = set.iter();
        set.add_outline(square(5.0, 5.0, 1.0)).unwrap();
        assert_eq!(iter.len(), 1);
        assert_eq!(set.iter().len(), 2);
    }

    #[test]
    fn fracture_then_unfracture_restores_holes() {
        let mut set = PolygonSet::new();
        let i = set.add_outline(square(0.0, 0.0, 10.0)).unwrap();
        set.add_hole(i, square(2.0, 2.0, 2.0)).unwrap();
        set.add_hole(i, square(6.0, 6.0, 2.0)).unwrap();
        let original = set.clone();

        set.fracture().unwrap();
        assert!(!set.has_holes());
        assert_eq!(set.polygon_count(), 1);
        assert_fuzzy_eq!(set.area(), 92.0);

        set.unfracture().unwrap();
        assert_eq!(set.hole_count(), 2);
        assert_eq!(set, original);
    }

    #[test]
    fn display_debug_format() {
        let mut set = PolygonSet::new();
        set.add_outline([vec2(0.0, 0.0), vec2(0.001, 0.0), vec2(0.0, 0.001)])
            .unwrap();
        let text = set.to_string();
        assert_eq!(
            text,
            "polyset 1\npoly 1\n3\n 0 0\n 1000 0\n 0 1000\nendpoly\n"
        );
    }

    #[test]
    fn translate_moves_extents() {
        let mut set = PolygonSet::new();
        set.add_outline(square(0.0, 0.0, 1.0)).unwrap();
        set.translate(2.0, -1.0).unwrap();
        let extents = set.extents().unwrap();
        assert_fuzzy_eq!(extents.min_x, 2.0);
        assert_fuzzy_eq!(extents.min_y, -1.0);
        assert_fuzzy_eq!(extents.max_x, 3.0);
        assert_fuzzy_eq!(extents.max_y, 0.0);
    }

    #[test]
    fn translate_out_of_range_leaves_set_unchanged() {
        let mut set = PolygonSet::new();
        set.add_outline(square(500_000.0, 0.0, 1.0)).unwrap();
        let original = set.clone();
        let err = set.translate(1.0e6, 0.0).unwrap_err();
        assert!(matches!(err, GeometryError::CoordinateOutOfRange { value_mm } if value_mm > 1.0e6));
        assert_eq!(set, original);

        // moving back towards the origin is fine
        set.translate(-500_000.0, 0.0).unwrap();
        assert_fuzzy_eq!(set.extents().unwrap().min_x, 0.0);
    }
}
