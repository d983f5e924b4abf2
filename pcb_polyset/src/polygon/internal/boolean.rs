//! Boolean operations between two sets of regions.
//!
//! The approach is the same for every operation:
//! 1. collect the directed edges of both operands and split them at all intersects,
//! 2. group coincident edges and compute the winding number of each operand on both sides of
//!    every group,
//! 3. keep the groups where the operation result differs between the two sides (directed so the
//!    result interior is on the left),
//! 4. stitch the kept edges into rings and assemble the rings into outlines with holes.
//!
//! Winding uses the non-zero rule so overlapping or self intersecting input is handled, and zero
//! width slits (equal edges in opposite directions) cancel out.
use super::intersects::{collect_edges, create_edge_index, split_at_intersects, Edge, Operand};
use crate::{
    core::math::Point,
    error::GeometryError,
    polygon::{
        ring::{edge_crossing, scaled},
        BooleanOp, PointLocation, Region, Ring,
    },
};
use std::collections::BTreeMap;

/// Upper bound on edge split passes before giving up.
pub const MAX_SPLIT_PASSES: usize = 32;

/// Net count of coincident edges, `+1` for each edge going the key direction and `-1` for each
/// going the opposite way.
#[derive(Debug, Default, Copy, Clone)]
struct EdgeGroup {
    first_count: i32,
    second_count: i32,
}

/// Undirected key for an edge with the lower point first. "Lower" means smaller y, or equal y
/// with larger x, so the right side of the key direction always contains the positive x (or for
/// horizontal edges positive y) neighborhood of the edge midpoint.
#[inline]
fn group_key(start: Point, end: Point) -> ((Point, Point), bool) {
    let start_is_lower = start.y < end.y || (start.y == end.y && start.x > end.x);
    if start_is_lower {
        ((start, end), true)
    } else {
        ((end, start), false)
    }
}

/// Perform the boolean `op` between `first` and `second`.
pub fn boolean(
    first: &[Region],
    second: &[Region],
    op: BooleanOp,
) -> Result<Vec<Region>, GeometryError> {
    let mut edges = Vec::new();
    collect_edges(first, Operand::First, &mut edges);
    collect_edges(second, Operand::Second, &mut edges);
    if edges.is_empty() {
        return Ok(Vec::new());
    }

    let edges = split_at_intersects(edges, MAX_SPLIT_PASSES)?;
    let result_edges = classify_edges(&edges, op);
    let rings = stitch_rings(&result_edges)?;

    Ok(assemble_regions(rings))
}

/// Returns the directed edges bounding the result of `op`, interior on the left.
fn classify_edges(edges: &[Edge], op: BooleanOp) -> Vec<(Point, Point)> {
    let mut groups: BTreeMap<(Point, Point), EdgeGroup> = BTreeMap::new();
    for e in edges.iter() {
        let (key, forward) = group_key(e.start, e.end);
        let delta = if forward { 1 } else { -1 };
        let group = groups.entry(key).or_default();
        match e.operand {
            Operand::First => group.first_count += delta,
            Operand::Second => group.second_count += delta,
        }
    }

    let index = create_edge_index(edges);
    let index_max_x = edges
        .iter()
        .map(|e| e.start.x.max(e.end.x))
        .max()
        .unwrap_or(0) as f64;
    let mut query_stack = Vec::with_capacity(8);
    let mut result = Vec::new();

    for (&(lower, upper), group) in groups.iter() {
        if group.first_count == 0 && group.second_count == 0 {
            continue;
        }

        // doubled coordinates so the midpoint is integer
        let mid = (
            lower.x as i128 + upper.x as i128,
            lower.y as i128 + upper.y as i128,
        );
        let mid_x = mid.0 as f64 / 2.0;
        let mid_y = mid.1 as f64 / 2.0;

        // winding of each operand on the right side, all edges of this group excluded
        let mut first_right = 0;
        let mut second_right = 0;
        let mut query_visitor = |i: usize| -> static_aabb2d_index::Control<()> {
            let e = &edges[i];
            let (key, _) = group_key(e.start, e.end);
            if key == (lower, upper) {
                return static_aabb2d_index::Control::Continue;
            }

            let crossing = edge_crossing(scaled(e.start, 2), scaled(e.end, 2), mid);
            match e.operand {
                Operand::First => first_right += crossing,
                Operand::Second => second_right += crossing,
            }

            static_aabb2d_index::Control::Continue
        };

        index.visit_query_with_stack(
            mid_x,
            mid_y,
            index_max_x.max(mid_x),
            mid_y,
            &mut query_visitor,
            &mut query_stack,
        );

        let first_left = first_right + group.first_count;
        let second_left = second_right + group.second_count;
        let right_inside = op.keeps(first_right != 0, second_right != 0);
        let left_inside = op.keeps(first_left != 0, second_left != 0);

        match (left_inside, right_inside) {
            (true, false) => result.push((lower, upper)),
            (false, true) => result.push((upper, lower)),
            _ => {}
        }
    }

    result
}

/// Join directed edges into closed rings.
///
/// The successor of every edge is the edge leaving its end point with the sharpest left turn, and
/// a ring closes when the walk gets back to its first edge. The successor only depends on the
/// edge, so the rings found do not depend on the edge order. Regions touching at a single point
/// stay separate rings, a hole touching its outline at a single point is merged into the outline
/// ring.
fn stitch_rings(edges: &[(Point, Point)]) -> Result<Vec<Ring>, GeometryError> {
    let mut outgoing: BTreeMap<Point, Vec<usize>> = BTreeMap::new();
    for (i, (start, _)) in edges.iter().enumerate() {
        outgoing.entry(*start).or_default().push(i);
    }

    let mut visited = vec![false; edges.len()];
    let mut rings = Vec::new();

    for start_index in 0..edges.len() {
        if visited[start_index] {
            continue;
        }

        visited[start_index] = true;
        let mut points = vec![edges[start_index].0];
        let mut current = start_index;

        loop {
            let (from, to) = edges[current];
            let incoming = to - from;
            let next = outgoing
                .get(&to)
                .into_iter()
                .flatten()
                .copied()
                .max_by(|&a, &b| {
                    let turn_a = turn_angle(incoming, edges[a].1 - to);
                    let turn_b = turn_angle(incoming, edges[b].1 - to);
                    turn_a.total_cmp(&turn_b)
                });

            let next = match next {
                Some(j) => j,
                None => return Err(GeometryError::OpenBoundary { x: to.x, y: to.y }),
            };
            if next == start_index {
                break;
            }
            // two edges sharing a successor means the boundary is not a set of closed rings
            if visited[next] {
                return Err(GeometryError::OpenBoundary { x: to.x, y: to.y });
            }

            visited[next] = true;
            points.push(to);
            current = next;
        }

        let ring = Ring::from_points(points);
        let ring = ring.remove_redundant().unwrap_or(ring);
        if ring.len() >= 3 && ring.double_area() != 0 {
            rings.push(ring);
        }
    }

    Ok(rings)
}

/// Signed turn from direction `incoming` to direction `outgoing` in `(-PI, PI]`, positive is a
/// left turn. Reversing back along the incoming direction counts as the most right turn.
fn turn_angle(incoming: Point, outgoing: Point) -> f64 {
    let cross = incoming.perp_dot(outgoing);
    let dot = incoming.dot(outgoing);
    if cross == 0 && dot < 0 {
        return -std::f64::consts::PI;
    }

    (cross as f64).atan2(dot as f64)
}

/// Group rings into regions, counter clockwise rings are outlines and clockwise rings are holes
/// assigned to the smallest outline containing them.
fn assemble_regions(rings: Vec<Ring>) -> Vec<Region> {
    let (outlines, holes): (Vec<Ring>, Vec<Ring>) =
        rings.into_iter().partition(|r| r.double_area() > 0);

    let mut regions: Vec<Region> = outlines.into_iter().map(Region::new).collect();
    let extents: Vec<_> = regions.iter().map(|r| r.extents()).collect();
    let areas: Vec<i128> = regions.iter().map(|r| r.outline.double_area()).collect();

    for hole in holes {
        let hole_area = -hole.double_area();
        let hole_extents = hole.extents();
        let parent = (0..regions.len())
            .filter(|&i| areas[i] >= hole_area)
            .filter(|&i| match (&extents[i], &hole_extents) {
                (Some(outer), Some(inner)) => {
                    outer.min_x <= inner.min_x
                        && outer.min_y <= inner.min_y
                        && outer.max_x >= inner.max_x
                        && outer.max_y >= inner.max_y
                }
                _ => false,
            })
            .filter(|&i| ring_contains_ring(&regions[i].outline, &hole))
            .min_by_key(|&i| areas[i]);

        match parent {
            Some(i) => regions[i].holes.push(hole),
            None => {
                log::warn!(
                    "dropping hole with {} points, no enclosing outline found",
                    hole.len()
                );
            }
        }
    }

    for r in regions.iter_mut() {
        r.canonicalize();
    }
    regions.sort_by(|a, b| a.outline.points().cmp(b.outline.points()));

    regions
}

/// Returns `true` if `inner` lies inside `outer` (the rings may touch but not cross).
fn ring_contains_ring(outer: &Ring, inner: &Ring) -> bool {
    for p in inner.points() {
        match outer.locate(*p) {
            PointLocation::Inside => return true,
            PointLocation::Outside => return false,
            PointLocation::OnBoundary => {}
        }
    }

    // every vertex is on the boundary, try segment midpoints
    for (p0, p1) in inner.iter_segments() {
        let mid = (
            p0.x as i128 + p1.x as i128,
            p0.y as i128 + p1.y as i128,
        );
        match outer.locate_scaled(2, mid) {
            PointLocation::Inside => return true,
            PointLocation::Outside => return false,
            PointLocation::OnBoundary => {}
        }
    }

    // coincident with the outer boundary
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring;

    fn square(x: i64, y: i64, size: i64) -> Region {
        Region::new(ring![(x, y), (x + size, y), (x + size, y + size), (x, y + size)])
    }

    fn total_area(regions: &[Region]) -> i128 {
        regions.iter().map(Region::double_area).sum()
    }

    fn canonical_rings(edges: &[(Point, Point)]) -> Vec<Ring> {
        let mut rings = stitch_rings(edges).unwrap();
        for r in rings.iter_mut() {
            r.canonicalize();
        }
        rings.sort_by(|a, b| a.points().cmp(b.points()));
        rings
    }

    #[test]
    fn stitching_does_not_depend_on_edge_order() {
        // outline with a diamond shaped hole touching its left edge at (0, 15)
        let ring_edges = |points: &[(i64, i64)]| {
            let n = points.len();
            (0..n)
                .map(|i| {
                    let (x0, y0) = points[i];
                    let (x1, y1) = points[(i + 1) % n];
                    (Point::new(x0, y0), Point::new(x1, y1))
                })
                .collect::<Vec<_>>()
        };
        let mut edges = ring_edges(&[(0, 0), (30, 0), (30, 30), (0, 30), (0, 15)]);
        edges.extend(ring_edges(&[(0, 15), (5, 20), (10, 15), (5, 10)]));

        let expected = canonical_rings(&edges);
        assert_eq!(expected.len(), 1);
        assert_eq!(expected[0].double_area(), 2 * (900 - 50));

        for shift in 1..edges.len() {
            let mut rotated = edges.clone();
            rotated.rotate_left(shift);
            assert_eq!(canonical_rings(&rotated), expected, "rotated by {}", shift);
        }
    }

    #[test]
    fn stitching_unmatched_edges_fails() {
        let edges = [
            (Point::new(0, 0), Point::new(10, 0)),
            (Point::new(10, 0), Point::new(10, 10)),
        ];
        assert!(matches!(
            stitch_rings(&edges),
            Err(GeometryError::OpenBoundary { .. })
        ));
    }

    #[test]
    fn union_of_overlapping_squares() {
        let result = boolean(&[square(0, 0, 10)], &[square(5, 5, 10)], BooleanOp::Or).unwrap();
        assert_eq!(result.len(), 1);
        assert!(!result[0].has_holes());
        assert_eq!(result[0].outline.len(), 8);
        assert_eq!(total_area(&result), 2 * (100 + 100 - 25));
    }

    #[test]
    fn intersection_and_difference_of_overlapping_squares() {
        let a = [square(0, 0, 10)];
        let b = [square(5, 5, 10)];
        let and = boolean(&a, &b, BooleanOp::And).unwrap();
        assert_eq!(and.len(), 1);
        assert_eq!(total_area(&and), 2 * 25);

        let not = boolean(&a, &b, BooleanOp::Not).unwrap();
        assert_eq!(not.len(), 1);
        assert_eq!(total_area(&not), 2 * 75);

        let xor = boolean(&a, &b, BooleanOp::Xor).unwrap();
        assert_eq!(total_area(&xor), 2 * 150);
    }

    #[test]
    fn difference_creates_hole() {
        let result = boolean(&[square(0, 0, 30)], &[square(10, 10, 10)], BooleanOp::Not).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].holes.len(), 1);
        assert_eq!(total_area(&result), 2 * (900 - 100));
        assert!(result[0].holes[0].double_area() < 0);
    }

    #[test]
    fn shared_edge_squares_merge() {
        let result = boolean(&[square(0, 0, 10)], &[square(10, 0, 10)], BooleanOp::Or).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].outline.len(), 4);
        assert_eq!(total_area(&result), 2 * 200);
    }

    #[test]
    fn squares_touching_at_corner_stay_separate() {
        let result = boolean(&[square(0, 0, 10)], &[square(10, 10, 10)], BooleanOp::Or).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(total_area(&result), 2 * 200);
    }

    #[test]
    fn self_union_resolves_overlap_within_operand() {
        let result = boolean(&[square(0, 0, 10), square(5, 0, 10)], &[], BooleanOp::Or).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(total_area(&result), 2 * 150);
    }

    #[test]
    fn slit_edges_cancel() {
        // square with hole joined by a zero width slit along y = 10
        let fractured = Region::new(ring![
            (0, 0),
            (30, 0),
            (30, 30),
            (0, 30),
            (0, 10),
            (10, 10),
            (10, 20),
            (20, 20),
            (20, 10),
            (10, 10),
            (0, 10)
        ]);
        let result = boolean(&[fractured], &[], BooleanOp::Or).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].holes.len(), 1);
        assert_eq!(result[0].outline.len(), 4);
        assert_eq!(total_area(&result), 2 * 800);
    }

    #[test]
    fn island_inside_hole_is_separate_region() {
        let outer = Region::with_holes(
            ring![(0, 0), (50, 0), (50, 50), (0, 50)],
            vec![ring![(10, 10), (10, 40), (40, 40), (40, 10)]],
        );
        let island = square(20, 20, 10);
        let result = boolean(&[outer], &[island], BooleanOp::Or).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.iter().filter(|r| r.has_holes()).count(), 1);
        assert_eq!(total_area(&result), 2 * (2500 - 900 + 100));
    }
}
