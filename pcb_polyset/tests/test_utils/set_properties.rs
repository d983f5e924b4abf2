use pcb_polyset::{core::traits::FuzzyEq, prelude::*, AABB};

/// Fuzzy compare AABB values
pub fn aabb_fuzzy_eq_eps(a: &AABB, b: &AABB, eps: f64) -> bool {
    a.min_x.fuzzy_eq_eps(b.min_x, eps)
        && a.min_y.fuzzy_eq_eps(b.min_y, eps)
        && a.max_x.fuzzy_eq_eps(b.max_x, eps)
        && a.max_y.fuzzy_eq_eps(b.max_y, eps)
}

/// Holds a set of properties of a polygon set for comparison in tests
#[derive(Debug, Copy, Clone)]
pub struct SetProperties {
    pub polygon_count: usize,
    pub hole_count: usize,
    pub area: f64,
    pub extents: Option<AABB>,
}

impl SetProperties {
    // property comparer epsilon (square millimetres and millimetres)
    pub const PROP_CMP_EPS: f64 = 1e-9;

    pub fn new(polygon_count: usize, hole_count: usize, area: f64, extents: Option<AABB>) -> Self {
        Self {
            polygon_count,
            hole_count,
            area,
            extents,
        }
    }

    pub fn from_set(set: &PolygonSet) -> Self {
        Self::new(set.polygon_count(), set.hole_count(), set.area(), set.extents())
    }

    pub fn matches(&self, other: &Self) -> bool {
        let extents_match = match (&self.extents, &other.extents) {
            (Some(a), Some(b)) => aabb_fuzzy_eq_eps(a, b, Self::PROP_CMP_EPS),
            (None, None) => true,
            _ => false,
        };

        self.polygon_count == other.polygon_count
            && self.hole_count == other.hole_count
            && self.area.fuzzy_eq_eps(other.area, Self::PROP_CMP_EPS)
            && extents_match
    }
}

/// Axis aligned rectangle from `(x0, y0)` to `(x1, y1)` in millimetres.
pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> PolygonSet {
    let mut result = PolygonSet::new();
    result
        .add_outline([vec2(x0, y0), vec2(x1, y0), vec2(x1, y1), vec2(x0, y1)])
        .unwrap();
    result
}

pub fn square(x: f64, y: f64, size: f64) -> PolygonSet {
    rect(x, y, x + size, y + size)
}

/// Square of `size` with a centered square hole of `hole_size`.
pub fn square_with_hole(x: f64, y: f64, size: f64, hole_size: f64) -> PolygonSet {
    let mut result = square(x, y, size);
    let h0 = (size - hole_size) / 2.0;
    let h1 = h0 + hole_size;
    result
        .add_hole(
            0,
            [
                vec2(x + h0, y + h0),
                vec2(x + h0, y + h1),
                vec2(x + h1, y + h1),
                vec2(x + h1, y + h0),
            ],
        )
        .unwrap();
    result
}

/// Smallest distance from `center` to the lines through the edges of `outline`.
pub fn min_edge_distance(outline: &[Vector2], center: Vector2) -> f64 {
    let n = outline.len();
    (0..n)
        .map(|i| {
            let a = outline[i];
            let b = outline[(i + 1) % n];
            let ab = b - a;
            (ab.perp_dot(center - a)).abs() / ab.length()
        })
        .fold(f64::INFINITY, f64::min)
}
