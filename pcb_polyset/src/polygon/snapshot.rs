use crate::core::math::Vector2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Snapshot of one polygon of a [PolygonSet](super::PolygonSet) in millimetres.
///
/// Equality ignores which point a ring starts at and the order of the holes, but not the ring
/// direction. Outlines are counter clockwise and holes clockwise when produced by a set.
#[derive(Debug, Default, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Polygon {
    outline: Vec<Vector2<f64>>,
    holes: Vec<Vec<Vector2<f64>>>,
}

impl Polygon {
    pub fn new(outline: Vec<Vector2<f64>>, holes: Vec<Vec<Vector2<f64>>>) -> Self {
        Polygon { outline, holes }
    }

    #[inline]
    pub fn outline(&self) -> &[Vector2<f64>] {
        &self.outline
    }

    #[inline]
    pub fn holes(&self) -> &[Vec<Vector2<f64>>] {
        &self.holes
    }

    #[inline]
    pub fn has_holes(&self) -> bool {
        !self.holes.is_empty()
    }

    /// Area enclosed in square millimetres (outline minus holes).
    pub fn area(&self) -> f64 {
        ring_area(&self.outline).abs() - self.holes.iter().map(|h| ring_area(h).abs()).sum::<f64>()
    }
}

fn ring_area(points: &[Vector2<f64>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let doubled: f64 = (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum();
    doubled / 2.0
}

/// Returns `true` if `a` is a rotation of `b`.
fn rings_equal_cyclic(a: &[Vector2<f64>], b: &[Vector2<f64>]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    if a.is_empty() {
        return true;
    }

    let n = a.len();
    (0..n)
        .filter(|&offset| b[offset] == a[0])
        .any(|offset| (0..n).all(|k| a[k] == b[(k + offset) % n]))
}

impl PartialEq for Polygon {
    fn eq(&self, other: &Self) -> bool {
        if !rings_equal_cyclic(&self.outline, &other.outline)
            || self.holes.len() != other.holes.len()
        {
            return false;
        }

        // holes compared as a multiset
        let mut matched = vec![false; other.holes.len()];
        self.holes.iter().all(|h| {
            let found = other
                .holes
                .iter()
                .enumerate()
                .find(|(i, o)| !matched[*i] && rings_equal_cyclic(h, o))
                .map(|(i, _)| i);
            match found {
                Some(i) => {
                    matched[i] = true;
                    true
                }
                None => false,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64) -> Vector2<f64> {
        Vector2::new(x, y)
    }

    #[test]
    fn equality_ignores_start_point_and_hole_order() {
        let hole1 = vec![v(1.0, 1.0), v(1.0, 2.0), v(2.0, 2.0)];
        let hole2 = vec![v(5.0, 5.0), v(5.0, 6.0), v(6.0, 6.0)];
        let a = Polygon::new(
            vec![v(0.0, 0.0), v(10.0, 0.0), v(10.0, 10.0), v(0.0, 10.0)],
            vec![hole1.clone(), hole2.clone()],
        );
        let b = Polygon::new(
            vec![v(10.0, 10.0), v(0.0, 10.0), v(0.0, 0.0), v(10.0, 0.0)],
            vec![hole2, hole1],
        );
        assert_eq!(a, b);
    }

    #[test]
    fn equality_respects_direction() {
        let a = Polygon::new(vec![v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0)], Vec::new());
        let b = Polygon::new(vec![v(0.0, 0.0), v(1.0, 1.0), v(1.0, 0.0)], Vec::new());
        assert_ne!(a, b);
    }

    #[test]
    fn area_subtracts_holes() {
        let p = Polygon::new(
            vec![v(0.0, 0.0), v(10.0, 0.0), v(10.0, 10.0), v(0.0, 10.0)],
            vec![vec![v(2.0, 2.0), v(2.0, 4.0), v(4.0, 4.0), v(4.0, 2.0)]],
        );
        assert!((p.area() - 96.0).abs() < 1e-9);
    }
}
