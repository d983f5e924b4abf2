//! Joining holes into their outline with zero width slits.
use crate::{
    core::math::{angle_is_strictly_between, Point},
    error::GeometryError,
    polygon::{Region, Ring},
};

/// Where a bridge from a hole lands on the outline.
#[derive(Debug, Copy, Clone)]
struct BridgeTarget {
    /// Index of the outline point the hole sequence is inserted after.
    insert_after: usize,
    /// Landing point on the outline.
    point: Point,
    /// `true` if `point` is the existing outline point at `insert_after`.
    on_vertex: bool,
}

/// Convert `region` to a single ring without holes.
///
/// Holes are processed left to right by their left most point. Each hole is joined by a
/// horizontal bridge going from its left most point to the closest outline edge on its left, the
/// outline then travels along the bridge, around the hole and back along the bridge.
pub fn fracture_region(region: &Region) -> Result<Ring, GeometryError> {
    if region.holes.is_empty() {
        return Ok(region.outline.clone());
    }

    let mut holes: Vec<(usize, &Ring)> = region
        .holes
        .iter()
        .filter(|h| !h.is_empty())
        .map(|h| (left_most_index(h), h))
        .collect();
    holes.sort_by_key(|(i, h)| {
        let p = h.points()[*i];
        (p.x, p.y)
    });

    let mut outline: Vec<Point> = region.outline.points().to_vec();
    for (start, hole) in holes {
        let h = hole.points()[start];
        let target = find_bridge_target(&outline, h)?;

        let hole_len = hole.len();
        let mut inserted = Vec::with_capacity(hole_len + 3);
        if !target.on_vertex {
            inserted.push(target.point);
        }
        inserted.extend((0..hole_len).map(|k| hole.points()[(start + k) % hole_len]));
        inserted.push(h);
        inserted.push(target.point);

        let at = target.insert_after + 1;
        outline.splice(at..at, inserted);
        outline.dedup();
    }

    while outline.len() > 1 && outline.first() == outline.last() {
        outline.pop();
    }

    Ok(Ring::from_points(outline))
}

/// Index of the left most point (smallest x, then smallest y).
fn left_most_index(ring: &Ring) -> usize {
    ring.points()
        .iter()
        .enumerate()
        .min_by_key(|(_, p)| (p.x, p.y))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the closest crossing of a ray going in the negative x direction from `h` with the
/// `outline`.
fn find_bridge_target(outline: &[Point], h: Point) -> Result<BridgeTarget, GeometryError> {
    let n = outline.len();
    // (x position, target) of closest crossing found so far
    let mut best: Option<(f64, BridgeTarget)> = None;

    for i in 0..n {
        let a = outline[i];
        let b = outline[(i + 1) % n];
        // horizontal edges (including earlier bridges) never block the ray
        if a.y == b.y || h.y < a.y.min(b.y) || h.y > a.y.max(b.y) {
            continue;
        }

        let candidate = if a.y == h.y {
            (a.x as f64, vertex_target(i, a))
        } else if b.y == h.y {
            (b.x as f64, vertex_target((i + 1) % n, b))
        } else {
            let dy = (b.y - a.y) as f64;
            let x = a.x as f64 + (h.y - a.y) as f64 * (b.x - a.x) as f64 / dy;
            let point = Point::new(x.round() as i64, h.y);
            let target = if point == a {
                vertex_target(i, a)
            } else if point == b {
                vertex_target((i + 1) % n, b)
            } else {
                BridgeTarget {
                    insert_after: i,
                    point,
                    on_vertex: false,
                }
            };
            (x, target)
        };

        if candidate.0 > h.x as f64 {
            continue;
        }

        match best {
            Some((best_x, _)) if best_x >= candidate.0 => {}
            _ => best = Some(candidate),
        }
    }

    let (_, target) = best.ok_or(GeometryError::FractureFailed { x: h.x, y: h.y })?;
    if !target.on_vertex {
        return Ok(target);
    }

    // the landing point may be visited more than once by the outline (e.g. where an earlier
    // bridge starts), pick the visit whose interior sector faces the hole
    Ok(select_vertex_visit(outline, target, h))
}

#[inline]
fn vertex_target(index: usize, point: Point) -> BridgeTarget {
    BridgeTarget {
        insert_after: index,
        point,
        on_vertex: true,
    }
}

fn select_vertex_visit(outline: &[Point], target: BridgeTarget, h: Point) -> BridgeTarget {
    let n = outline.len();
    let visits: Vec<usize> = (0..n).filter(|&i| outline[i] == target.point).collect();
    if visits.len() < 2 || h == target.point {
        return target;
    }

    let v = target.point;
    let direction_angle = 0.0f64;
    let angle_to = |p: Point| ((p.y - v.y) as f64).atan2((p.x - v.x) as f64);

    visits
        .into_iter()
        .find(|&i| {
            let next = outline[(i + 1) % n];
            let prev = outline[(i + n - 1) % n];
            // interior of a counter clockwise ring lies counter clockwise from the outgoing
            // direction to the incoming direction
            angle_is_strictly_between(direction_angle, angle_to(next), angle_to(prev))
        })
        .map(|i| vertex_target(i, v))
        .unwrap_or(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring;

    #[test]
    fn region_without_holes_is_unchanged() {
        let region = Region::new(ring![(0, 0), (10, 0), (10, 10), (0, 10)]);
        let result = fracture_region(&region).unwrap();
        assert_eq!(&result, &region.outline);
    }

    #[test]
    fn single_hole_bridged_to_left_edge() {
        let region = Region::with_holes(
            ring![(0, 0), (30, 0), (30, 30), (0, 30)],
            vec![ring![(10, 10), (10, 20), (20, 20), (20, 10)]],
        );
        let result = fracture_region(&region).unwrap();
        assert_eq!(result.double_area(), region.double_area());
        let expected = ring![
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
        ];
        assert_eq!(result, expected);
    }

    #[test]
    fn second_hole_bridges_to_first_hole() {
        let region = Region::with_holes(
            ring![(0, 0), (50, 0), (50, 30), (0, 30)],
            vec![
                ring![(30, 10), (30, 20), (40, 20), (40, 10)],
                ring![(10, 10), (10, 20), (20, 20), (20, 10)],
            ],
        );
        let result = fracture_region(&region).unwrap();
        assert_eq!(result.double_area(), region.double_area());
        // second hole lands on the right edge of the first hole
        assert!(result
            .iter_segments()
            .any(|(a, b)| a == Point::new(20, 10) && b == Point::new(30, 10)));
    }

    #[test]
    fn hole_without_outline_fails() {
        let region = Region::with_holes(
            ring![(0, 0), (10, 0), (10, 10), (0, 10)],
            vec![ring![(20, 20), (20, 30), (30, 30), (30, 20)]],
        );
        // ray from (20, 20) going left never crosses a non horizontal outline edge at y = 20
        assert!(matches!(
            fracture_region(&region),
            Err(GeometryError::FractureFailed { x: 20, y: 20 })
        ));
    }
}
