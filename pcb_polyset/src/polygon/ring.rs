use super::{PointLocation, RingOrientation};
use crate::{
    core::{
        math::{orient2d, orient2d_wide, Point, Vector2},
        units::area_to_mm2,
    },
    error::GeometryError,
};
use static_aabb2d_index::AABB;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Closed ring of integer points, the last point implicitly connects back to the first.
///
/// Rings stored in a [PolygonSet](super::PolygonSet) are normalized so outlines are counter
/// clockwise and holes are clockwise.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ring {
    points: Vec<Point>,
}

impl Ring {
    /// Create a new empty ring.
    #[inline]
    pub fn new() -> Self {
        Ring { points: Vec::new() }
    }

    #[inline]
    pub fn from_points(points: Vec<Point>) -> Self {
        Ring { points }
    }

    /// Create a ring from millimetre positions, snapping each to the nearest internal unit.
    pub fn from_mm<I>(positions: I) -> Result<Self, GeometryError>
    where
        I: IntoIterator<Item = Vector2<f64>>,
    {
        let points = positions
            .into_iter()
            .map(Point::from_mm)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Ring { points })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Iterate the segments of the ring as `(start, end)` pairs, including the closing segment.
    pub fn iter_segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Twice the signed area enclosed (shoelace sum), positive for counter clockwise rings.
    pub fn double_area(&self) -> i128 {
        if self.points.len() < 3 {
            return 0;
        }

        self.iter_segments().map(|(p0, p1)| p0.perp_dot(p1)).sum()
    }

    /// Signed area in square millimetres.
    #[inline]
    pub fn area(&self) -> f64 {
        area_to_mm2(self.double_area() as f64 / 2.0)
    }

    pub fn orientation(&self) -> RingOrientation {
        match self.double_area().signum() {
            1 => RingOrientation::CounterClockwise,
            -1 => RingOrientation::Clockwise,
            _ => RingOrientation::Degenerate,
        }
    }

    /// Reverse the direction of the ring.
    #[inline]
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Orient the ring counter clockwise (`ccw` is `true`) or clockwise.
    pub fn orient(&mut self, ccw: bool) {
        let area = self.double_area();
        if (ccw && area < 0) || (!ccw && area > 0) {
            self.reverse();
        }
    }

    /// Bounding box in internal units, `None` if the ring is empty.
    pub fn extents(&self) -> Option<AABB> {
        let first = self.points.first()?;
        let mut result = AABB::new(
            first.x as f64,
            first.y as f64,
            first.x as f64,
            first.y as f64,
        );

        for p in self.points.iter().skip(1) {
            let (x, y) = (p.x as f64, p.y as f64);
            result.min_x = result.min_x.min(x);
            result.min_y = result.min_y.min(y);
            result.max_x = result.max_x.max(x);
            result.max_y = result.max_y.max(y);
        }

        Some(result)
    }

    /// Winding number of the ring around `point`, the result is meaningless for points on the
    /// boundary (see [Ring::locate]).
    #[inline]
    pub fn winding_number(&self, point: Point) -> i32 {
        winding_number_scaled(&self.points, 1, (point.x as i128, point.y as i128))
    }

    /// Locate `point` relative to the ring using the non-zero fill rule.
    pub fn locate(&self, point: Point) -> PointLocation {
        self.locate_scaled(1, (point.x as i128, point.y as i128))
    }

    /// Same as [Ring::locate] with `point` given in coordinates multiplied by `scale`.
    pub(crate) fn locate_scaled(&self, scale: i128, point: (i128, i128)) -> PointLocation {
        if on_boundary_scaled(&self.points, scale, point) {
            PointLocation::OnBoundary
        } else if winding_number_scaled(&self.points, scale, point) != 0 {
            PointLocation::Inside
        } else {
            PointLocation::Outside
        }
    }

    /// Remove repeat points and points that are collinear with their neighbors (this includes
    /// zero width spikes). Returns `None` if nothing was removed.
    pub fn remove_redundant(&self) -> Option<Ring> {
        let mut result: Vec<Point> = Vec::with_capacity(self.points.len());
        for &p in self.points.iter() {
            if result.last() == Some(&p) {
                continue;
            }

            while result.len() >= 2 && orient2d(result[result.len() - 2], result[result.len() - 1], p) == 0 {
                result.pop();
            }

            if result.last() != Some(&p) {
                result.push(p);
            }
        }

        // fix up where the ring wraps around
        loop {
            let n = result.len();
            if n >= 2 && result[0] == result[n - 1] {
                result.pop();
            } else if n >= 3 && orient2d(result[n - 2], result[n - 1], result[0]) == 0 {
                result.pop();
            } else if n >= 3 && orient2d(result[n - 1], result[0], result[1]) == 0 {
                result.remove(0);
            } else {
                break;
            }
        }

        if result.len() == self.points.len() {
            return None;
        }

        Some(Ring { points: result })
    }

    /// Rotate the ring so it starts at its smallest point (if the smallest point repeats the
    /// rotation giving the smallest point sequence is used). Two rings describing the same
    /// closed path compare equal after this.
    pub fn canonicalize(&mut self) {
        let n = self.points.len();
        let Some(&min_point) = self.points.iter().min() else {
            return;
        };

        let mut best = None;
        for start in (0..n).filter(|&i| self.points[i] == min_point) {
            best = match best {
                None => Some(start),
                Some(b) => {
                    let candidate = (0..n).map(|k| self.points[(start + k) % n]);
                    let current = (0..n).map(|k| self.points[(b + k) % n]);
                    if candidate.lt(current) {
                        Some(start)
                    } else {
                        Some(b)
                    }
                }
            };
        }

        if let Some(start) = best {
            self.points.rotate_left(start);
        }
    }

    /// Translate all points by `offset`.
    pub fn translate(&mut self, offset: Point) {
        for p in self.points.iter_mut() {
            *p = *p + offset;
        }
    }

    /// Ring points converted to millimetres.
    pub fn to_mm(&self) -> Vec<Vector2<f64>> {
        self.points.iter().map(Point::to_mm).collect()
    }
}

/// Winding number using the half open crossing rule (counts edges that cross upward with the
/// point strictly left, and downward with the point strictly right) for a ray going in the
/// positive x direction. `point` is given in coordinates multiplied by `scale`.
pub(crate) fn winding_number_scaled(points: &[Point], scale: i128, point: (i128, i128)) -> i32 {
    let n = points.len();
    let mut winding = 0;
    for i in 0..n {
        let p0 = scaled(points[i], scale);
        let p1 = scaled(points[(i + 1) % n], scale);
        winding += edge_crossing(p0, p1, point);
    }

    winding
}

/// Crossing contribution of a single edge for [winding_number_scaled].
#[inline]
pub(crate) fn edge_crossing(p0: (i128, i128), p1: (i128, i128), point: (i128, i128)) -> i32 {
    if p0.1 <= point.1 {
        if p1.1 > point.1 && orient2d_wide(p0, p1, point) > 0 {
            return 1;
        }
    } else if p1.1 <= point.1 && orient2d_wide(p0, p1, point) < 0 {
        return -1;
    }

    0
}

fn on_boundary_scaled(points: &[Point], scale: i128, point: (i128, i128)) -> bool {
    let n = points.len();
    (0..n).any(|i| {
        let p0 = scaled(points[i], scale);
        let p1 = scaled(points[(i + 1) % n], scale);
        orient2d_wide(p0, p1, point) == 0
            && point.0 >= p0.0.min(p1.0)
            && point.0 <= p0.0.max(p1.0)
            && point.1 >= p0.1.min(p1.1)
            && point.1 <= p0.1.max(p1.1)
    })
}

#[inline]
pub(crate) fn scaled(p: Point, scale: i128) -> (i128, i128) {
    (p.x as i128 * scale, p.y as i128 * scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring;

    #[test]
    fn area_and_orientation() {
        let mut r = ring![(0, 0), (10, 0), (10, 10), (0, 10)];
        assert_eq!(r.double_area(), 200);
        assert_eq!(r.orientation(), RingOrientation::CounterClockwise);
        r.reverse();
        assert_eq!(r.orientation(), RingOrientation::Clockwise);
        r.orient(true);
        assert_eq!(r.double_area(), 200);

        let line = ring![(0, 0), (5, 5), (10, 10)];
        assert_eq!(line.orientation(), RingOrientation::Degenerate);
    }

    #[test]
    fn locate_points() {
        let r = ring![(0, 0), (10, 0), (10, 10), (0, 10)];
        assert_eq!(r.locate(Point::new(5, 5)), PointLocation::Inside);
        assert_eq!(r.locate(Point::new(15, 5)), PointLocation::Outside);
        assert_eq!(r.locate(Point::new(10, 5)), PointLocation::OnBoundary);
        assert_eq!(r.locate(Point::new(0, 0)), PointLocation::OnBoundary);
        // ray passes exactly through a vertex
        assert_eq!(r.locate(Point::new(-5, 10)), PointLocation::Outside);
        assert_eq!(r.locate(Point::new(-5, 0)), PointLocation::Outside);
        // clockwise ring has negative winding but is still inside with non-zero rule
        let mut cw = r.clone();
        cw.reverse();
        assert_eq!(cw.winding_number(Point::new(5, 5)), -1);
        assert_eq!(cw.locate(Point::new(5, 5)), PointLocation::Inside);
    }

    #[test]
    fn remove_redundant_points() {
        let r = ring![(0, 0), (5, 0), (10, 0), (10, 10), (10, 10), (0, 10), (0, 5)];
        let simplified = r.remove_redundant().unwrap();
        assert_eq!(simplified.points().len(), 4);
        assert_eq!(simplified.double_area(), r.double_area());

        let already_simple = ring![(0, 0), (10, 0), (10, 10)];
        assert!(already_simple.remove_redundant().is_none());

        // spike going out and back along the same line
        let spike = ring![(0, 0), (10, 0), (20, 0), (10, 0), (10, 10), (0, 10)];
        let simplified = spike.remove_redundant().unwrap();
        assert_eq!(simplified.double_area(), 200);
        assert_eq!(simplified.points().len(), 4);
    }

    #[test]
    fn canonicalize_rotates_to_smallest_point() {
        let mut a = ring![(10, 0), (10, 10), (0, 10), (0, 0)];
        let mut b = ring![(0, 10), (0, 0), (10, 0), (10, 10)];
        a.canonicalize();
        b.canonicalize();
        assert_eq!(a, b);
        assert_eq!(a.points()[0], Point::new(0, 0));
    }
}
