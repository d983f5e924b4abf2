//! Splitting of directed edges at all their mutual intersects.
//!
//! After [split_at_intersects] returns any two edges are either equal (ignoring direction),
//! share only an end point, or do not touch at all.
use crate::{
    core::math::{div_round, orient2d, point_on_segment, Point},
    error::GeometryError,
    polygon::Region,
};
use static_aabb2d_index as aabb_index;
use static_aabb2d_index::{StaticAABB2DIndex, StaticAABB2DIndexBuilder};

/// Which boolean operand an edge came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operand {
    First,
    Second,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Edge {
    pub start: Point,
    pub end: Point,
    pub operand: Operand,
}

impl Edge {
    #[inline]
    pub fn new(start: Point, end: Point, operand: Operand) -> Self {
        Edge {
            start,
            end,
            operand,
        }
    }
}

/// Append all non zero length edges of `regions` to `edges`.
pub fn collect_edges(regions: &[Region], operand: Operand, edges: &mut Vec<Edge>) {
    for r in regions.iter().flat_map(|r| r.iter_rings()) {
        edges.extend(
            r.iter_segments()
                .filter(|(p0, p1)| p0 != p1)
                .map(|(p0, p1)| Edge::new(p0, p1, operand)),
        );
    }
}

/// Build a spatial index of the edge bounding boxes, the edge index is the key.
pub fn create_edge_index(edges: &[Edge]) -> StaticAABB2DIndex<f64> {
    let mut builder = StaticAABB2DIndexBuilder::new(edges.len());
    for e in edges.iter() {
        builder.add(
            e.start.x.min(e.end.x) as f64,
            e.start.y.min(e.end.y) as f64,
            e.start.x.max(e.end.x) as f64,
            e.start.y.max(e.end.y) as f64,
        );
    }

    unwrap_spatial_index(builder)
}

/// Helper function to unwrap a spatial index from a builder, item count always matches and the
/// coordinates are plain `f64` values so building cannot fail.
fn unwrap_spatial_index(builder: StaticAABB2DIndexBuilder<f64>) -> StaticAABB2DIndex<f64> {
    match builder.build() {
        Ok(x) => x,
        Err(e) => unreachable!("internal library error: failed to build spatial index: {e}"),
    }
}

/// Repeatedly split edges at intersects until no more splits are found.
///
/// Proper crossings are rounded to the nearest integer point which may introduce new intersects
/// with other edges close by, those are resolved by the next pass. Fails if splits are still
/// found after `max_passes`.
pub fn split_at_intersects(
    mut edges: Vec<Edge>,
    max_passes: usize,
) -> Result<Vec<Edge>, GeometryError> {
    for pass in 0..max_passes {
        let split_points = find_split_points(&edges);
        let split_count: usize = split_points.iter().map(Vec::len).sum();
        if split_count == 0 {
            return Ok(edges);
        }

        log::trace!("split pass {pass}: {split_count} split points over {} edges", edges.len());
        edges = apply_splits(edges, split_points);
    }

    if find_split_points(&edges).iter().all(Vec::is_empty) {
        return Ok(edges);
    }

    Err(GeometryError::UnresolvedIntersections { passes: max_passes })
}

/// Find the points each edge must be split at (end points of the edge itself are never
/// returned).
fn find_split_points(edges: &[Edge]) -> Vec<Vec<Point>> {
    let mut result = vec![Vec::new(); edges.len()];
    if edges.len() < 2 {
        return result;
    }

    let index = create_edge_index(edges);
    let mut query_stack = Vec::with_capacity(8);

    for (i, e1) in edges.iter().enumerate() {
        let mut query_visitor = |j: usize| -> aabb_index::Control<()> {
            // each pair visited once
            if j <= i {
                return aabb_index::Control::Continue;
            }

            let e2 = &edges[j];
            let (s1, s2) = segment_split_points(e1.start, e1.end, e2.start, e2.end);
            if let Some(s) = s1 {
                result[i].extend_from_slice(s.as_slice());
            }
            if let Some(s) = s2 {
                result[j].extend_from_slice(s.as_slice());
            }

            aabb_index::Control::Continue
        };

        index.visit_query_with_stack(
            e1.start.x.min(e1.end.x) as f64,
            e1.start.y.min(e1.end.y) as f64,
            e1.start.x.max(e1.end.x) as f64,
            e1.start.y.max(e1.end.y) as f64,
            &mut query_visitor,
            &mut query_stack,
        );
    }

    result
}

/// Up to two split points for a single segment.
#[derive(Debug, Default, Clone, Copy)]
struct SplitPoints {
    points: [Point; 2],
    count: usize,
}

impl SplitPoints {
    fn push(&mut self, p: Point) {
        if self.count < 2 && !self.points[..self.count].contains(&p) {
            self.points[self.count] = p;
            self.count += 1;
        }
    }

    fn as_slice(&self) -> &[Point] {
        &self.points[..self.count]
    }
}

/// Split points of segment `a` and segment `b` (in that order) caused by their intersect.
fn segment_split_points(
    a0: Point,
    a1: Point,
    b0: Point,
    b1: Point,
) -> (Option<SplitPoints>, Option<SplitPoints>) {
    let mut split_a = SplitPoints::default();
    let mut split_b = SplitPoints::default();

    // end points lying inside the other segment (touching and overlapping cases)
    for p in [b0, b1] {
        if p != a0 && p != a1 && point_on_segment(a0, a1, p) {
            split_a.push(p);
        }
    }
    for p in [a0, a1] {
        if p != b0 && p != b1 && point_on_segment(b0, b1, p) {
            split_b.push(p);
        }
    }

    // proper crossing, both segments strictly straddle each other
    let d1 = orient2d(a0, a1, b0);
    let d2 = orient2d(a0, a1, b1);
    let d3 = orient2d(b0, b1, a0);
    let d4 = orient2d(b0, b1, a1);
    if d1.signum() * d2.signum() < 0 && d3.signum() * d4.signum() < 0 {
        let denom = d3 - d4;
        let x = a0.x as i128 + div_round((a1.x - a0.x) as i128 * d3, denom);
        let y = a0.y as i128 + div_round((a1.y - a0.y) as i128 * d3, denom);
        let crossing = Point::new(x as i64, y as i64);
        if crossing != a0 && crossing != a1 {
            split_a.push(crossing);
        }
        if crossing != b0 && crossing != b1 {
            split_b.push(crossing);
        }
    }

    let to_option = |s: SplitPoints| if s.count == 0 { None } else { Some(s) };
    (to_option(split_a), to_option(split_b))
}

/// Replace each edge with the chain of sub edges going through its split points.
fn apply_splits(edges: Vec<Edge>, mut split_points: Vec<Vec<Point>>) -> Vec<Edge> {
    let extra: usize = split_points.iter().map(Vec::len).sum();
    let mut result = Vec::with_capacity(edges.len() + extra);

    for (e, splits) in edges.into_iter().zip(split_points.iter_mut()) {
        if splits.is_empty() {
            result.push(e);
            continue;
        }

        let dir = e.end - e.start;
        splits.sort_by_key(|p| (*p - e.start).dot(dir));
        splits.dedup();

        let mut prev = e.start;
        for &p in splits.iter().chain(std::iter::once(&e.end)) {
            if p != prev {
                result.push(Edge::new(prev, p, e.operand));
                prev = p;
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i64, y: i64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn crossing_segments_split_at_rounded_point() {
        let (a, b) = segment_split_points(p(0, 0), p(10, 10), p(0, 10), p(10, 0));
        assert_eq!(a.unwrap().as_slice(), &[p(5, 5)]);
        assert_eq!(b.unwrap().as_slice(), &[p(5, 5)]);

        // exact crossing at (1.5, 1.5) rounds away from zero
        let (a, _) = segment_split_points(p(0, 0), p(3, 3), p(0, 3), p(3, 0));
        assert_eq!(a.unwrap().as_slice(), &[p(2, 2)]);
    }

    #[test]
    fn touching_segment_splits_only_the_touched_one() {
        let (a, b) = segment_split_points(p(0, 0), p(10, 0), p(5, 0), p(5, 5));
        assert_eq!(a.unwrap().as_slice(), &[p(5, 0)]);
        assert!(b.is_none());
    }

    #[test]
    fn overlapping_segments_split_at_each_others_end_points() {
        let (a, b) = segment_split_points(p(0, 0), p(10, 0), p(5, 0), p(15, 0));
        assert_eq!(a.unwrap().as_slice(), &[p(5, 0)]);
        assert_eq!(b.unwrap().as_slice(), &[p(10, 0)]);
    }

    #[test]
    fn shared_end_point_does_not_split() {
        let (a, b) = segment_split_points(p(0, 0), p(10, 0), p(10, 0), p(10, 10));
        assert!(a.is_none());
        assert!(b.is_none());
    }

    #[test]
    fn split_at_intersects_settles() {
        let edges = vec![
            Edge::new(p(0, 0), p(10, 10), Operand::First),
            Edge::new(p(0, 10), p(10, 0), Operand::Second),
            Edge::new(p(0, 5), p(10, 5), Operand::Second),
        ];
        let result = split_at_intersects(edges, 16).unwrap();
        assert!(find_split_points(&result).iter().all(Vec::is_empty));
        // each of the three edges is cut into two at (5, 5)
        assert_eq!(result.len(), 6);
    }
}
