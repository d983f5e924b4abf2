use super::{PointLocation, Ring};
use crate::core::math::Point;
use static_aabb2d_index::AABB;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One polygon of a [PolygonSet](super::PolygonSet) in internal units: an outline with zero or
/// more holes.
///
/// A fractured region has no holes, its outline instead travels into each former hole along a
/// zero width slit.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Region {
    pub outline: Ring,
    pub holes: Vec<Ring>,
}

impl Region {
    #[inline]
    pub fn new(outline: Ring) -> Self {
        Region {
            outline,
            holes: Vec::new(),
        }
    }

    #[inline]
    pub fn with_holes(outline: Ring, holes: Vec<Ring>) -> Self {
        Region { outline, holes }
    }

    #[inline]
    pub fn has_holes(&self) -> bool {
        !self.holes.is_empty()
    }

    /// Iterate the outline followed by all the holes.
    pub fn iter_rings(&self) -> impl Iterator<Item = &Ring> + '_ {
        std::iter::once(&self.outline).chain(self.holes.iter())
    }

    /// Twice the enclosed area (outline area minus hole areas).
    pub fn double_area(&self) -> i128 {
        self.iter_rings().map(|r| r.double_area()).sum()
    }

    pub fn extents(&self) -> Option<AABB> {
        self.outline.extents()
    }

    /// Locate `point` relative to the region (points in holes are outside).
    pub fn locate(&self, point: Point) -> PointLocation {
        let mut winding = 0;
        for r in self.iter_rings() {
            match r.locate(point) {
                PointLocation::OnBoundary => return PointLocation::OnBoundary,
                _ => winding += r.winding_number(point),
            }
        }

        if winding != 0 {
            PointLocation::Inside
        } else {
            PointLocation::Outside
        }
    }

    /// Orient outline counter clockwise and holes clockwise.
    pub fn normalize_orientation(&mut self) {
        self.outline.orient(true);
        for h in self.holes.iter_mut() {
            h.orient(false);
        }
    }

    /// Rotate every ring to its canonical start and sort the holes.
    pub fn canonicalize(&mut self) {
        for r in std::iter::once(&mut self.outline).chain(self.holes.iter_mut()) {
            r.canonicalize();
        }
        self.holes.sort_by(|a, b| a.points().cmp(b.points()));
    }

    pub fn translate(&mut self, offset: Point) {
        for r in std::iter::once(&mut self.outline).chain(self.holes.iter_mut()) {
            r.translate(offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring;

    #[test]
    fn locate_treats_holes_as_outside() {
        let region = Region::with_holes(
            ring![(0, 0), (30, 0), (30, 30), (0, 30)],
            vec![ring![(10, 10), (10, 20), (20, 20), (20, 10)]],
        );
        assert_eq!(region.locate(Point::new(5, 5)), PointLocation::Inside);
        assert_eq!(region.locate(Point::new(15, 15)), PointLocation::Outside);
        assert_eq!(region.locate(Point::new(10, 15)), PointLocation::OnBoundary);
        assert_eq!(region.locate(Point::new(30, 5)), PointLocation::OnBoundary);
        assert_eq!(region.locate(Point::new(40, 5)), PointLocation::Outside);
    }
}
