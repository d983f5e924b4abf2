//! Conversion of board items to polygon sets.
//!
//! Round features (via and track ends, circular pads, rounded corners, clearance rounding) are
//! tessellated into regular polygons whose radius is enlarged by the circle correction factor
//! `1 / cos(PI / n)` so the polygon never lies inside the true circle.
use crate::{
    board::{BoardItem, Pad, PadShape, Track, Via, Zone},
    core::{
        math::{circle_correction_factor, point_on_circle, vec2, Point, Vector2},
        traits::Real,
        units::{checked_iu, IU_PER_MM},
    },
    error::{ExtractError, GeometryError},
    polygon::{PolygonSet, Region, Ring},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fewest segments used for a full circle, below this vertex snapping could pull polygon edges
/// inside the circle.
pub const MIN_SEGMENTS_PER_CIRCLE: u32 = 8;

/// Sizes below one internal unit are treated as zero.
const SIZE_EPSILON_MM: f64 = 1.0 / IU_PER_MM;

/// Options for converting board items to polygons.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct TessellationOptions {
    /// Number of segments used to approximate a full circle.
    pub segments_per_circle: u32,
    /// Clearance added around every item in millimetres.
    pub clearance_mm: f64,
}

impl TessellationOptions {
    #[inline]
    pub fn new() -> Self {
        Self {
            segments_per_circle: 64,
            clearance_mm: 0.0,
        }
    }

    #[inline]
    pub fn with_clearance(mut self, clearance_mm: f64) -> Self {
        self.clearance_mm = clearance_mm;
        self
    }

    /// Segment count actually used: at least [MIN_SEGMENTS_PER_CIRCLE] and rounded up to an even
    /// count so half circles split evenly.
    #[inline]
    pub fn segments(&self) -> u32 {
        let segments = self.segments_per_circle.max(MIN_SEGMENTS_PER_CIRCLE);
        segments + segments % 2
    }

    /// Radius correction factor `1 / cos(PI / segments)`.
    #[inline]
    pub fn correction_factor(&self) -> f64 {
        circle_correction_factor(self.segments())
    }

    /// Tessellation radius in internal units for a true radius of `radius_mm`.
    ///
    /// Rounded up and enlarged by one unit so the apothem stays at or above the true radius after
    /// the vertexes are snapped to integer positions.
    pub fn radius_iu(&self, radius_mm: f64) -> Result<i64, GeometryError> {
        if !radius_mm.is_finite() {
            return Err(GeometryError::NonFiniteCoordinate);
        }
        checked_iu((radius_mm * IU_PER_MM * self.correction_factor()).ceil() + 1.0)
    }
}

impl Default for TessellationOptions {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Convert one board item to the polygon set covering its copper plus the clearance in
/// `options`.
///
/// Drawings (graphic segments, text, dimensions, targets) have no conversion and fail with
/// [ExtractError::UnsupportedItemKind].
pub fn extract_item_shape(
    item: BoardItem<'_>,
    options: &TessellationOptions,
) -> Result<PolygonSet, ExtractError> {
    let result = match item {
        BoardItem::Track(t) => track_shape(t, options)?,
        BoardItem::Via(v) => via_shape(v, options)?,
        BoardItem::Zone(z) => zone_shape(z, options)?,
        BoardItem::Pad(p) => pad_shape(p, options)?,
        BoardItem::Drawing(d) => {
            return Err(ExtractError::UnsupportedItemKind {
                kind: d.kind_name(),
            })
        }
    };

    Ok(result)
}

fn track_shape(track: &Track, options: &TessellationOptions) -> Result<PolygonSet, GeometryError> {
    let radius = track.width / 2.0 + options.clearance_mm;
    capsule_set(track.start, track.end, radius, options)
}

fn via_shape(via: &Via, options: &TessellationOptions) -> Result<PolygonSet, GeometryError> {
    let radius = via.diameter / 2.0 + options.clearance_mm;
    circle_set(via.position, radius, options)
}

fn zone_shape(zone: &Zone, options: &TessellationOptions) -> Result<PolygonSet, GeometryError> {
    let mut result = PolygonSet::new();
    let index = result.add_outline(zone.outline.iter().copied())?;
    for h in zone.holes.iter() {
        result.add_hole(index, h.iter().copied())?;
    }

    inflate(result, options.clearance_mm, options)
}

fn pad_shape(pad: &Pad, options: &TessellationOptions) -> Result<PolygonSet, GeometryError> {
    let clearance = options.clearance_mm;
    let half_w = pad.size.x / 2.0;
    let half_h = pad.size.y / 2.0;
    let to_board = |local: Vector2<f64>| {
        local.rotate_about(Vector2::zero(), pad.orientation.to_radians()) + pad.position
    };

    match &pad.shape {
        PadShape::Circle => circle_set(pad.position, half_w + clearance, options),
        PadShape::Rect => {
            let rect = rect_set(half_w, half_h, to_board)?;
            inflate(rect, clearance, options)
        }
        PadShape::Oval => {
            let corner_radius = half_w.min(half_h);
            rounded_rect_set(half_w, half_h, corner_radius, to_board, clearance, options)
        }
        PadShape::RoundRect { corner_radius } => {
            let corner_radius = corner_radius.clamp(0.0, half_w.min(half_h));
            rounded_rect_set(half_w, half_h, corner_radius, to_board, clearance, options)
        }
        PadShape::Custom { outline } => {
            let mut result = PolygonSet::new();
            result.add_outline(outline.iter().map(|p| to_board(*p)))?;
            inflate(result, clearance, options)
        }
    }
}

/// Rectangle of half size `half_w` x `half_h` with corners rounded by `corner_radius`, then grown
/// by `clearance`. Degenerates to a capsule or circle when the straight sides vanish.
fn rounded_rect_set<F>(
    half_w: f64,
    half_h: f64,
    corner_radius: f64,
    to_board: F,
    clearance: f64,
    options: &TessellationOptions,
) -> Result<PolygonSet, GeometryError>
where
    F: Fn(Vector2<f64>) -> Vector2<f64>,
{
    if corner_radius < SIZE_EPSILON_MM {
        return inflate(rect_set(half_w, half_h, to_board)?, clearance, options);
    }

    let inner_w = half_w - corner_radius;
    let inner_h = half_h - corner_radius;
    let radius = corner_radius + clearance;
    match (inner_w < SIZE_EPSILON_MM, inner_h < SIZE_EPSILON_MM) {
        (true, true) => circle_set(to_board(Vector2::zero()), radius, options),
        (true, false) => {
            let start = to_board(vec2(0.0, -inner_h));
            let end = to_board(vec2(0.0, inner_h));
            capsule_set(start, end, radius, options)
        }
        (false, true) => {
            let start = to_board(vec2(-inner_w, 0.0));
            let end = to_board(vec2(inner_w, 0.0));
            capsule_set(start, end, radius, options)
        }
        (false, false) => inflate(rect_set(inner_w, inner_h, to_board)?, radius, options),
    }
}

fn rect_set<F>(half_w: f64, half_h: f64, to_board: F) -> Result<PolygonSet, GeometryError>
where
    F: Fn(Vector2<f64>) -> Vector2<f64>,
{
    let mut result = PolygonSet::new();
    result.add_outline(
        [
            vec2(-half_w, -half_h),
            vec2(half_w, -half_h),
            vec2(half_w, half_h),
            vec2(-half_w, half_h),
        ]
        .into_iter()
        .map(to_board),
    )?;
    Ok(result)
}

fn circle_set(
    center: Vector2<f64>,
    radius_mm: f64,
    options: &TessellationOptions,
) -> Result<PolygonSet, GeometryError> {
    if radius_mm < SIZE_EPSILON_MM {
        return Ok(PolygonSet::new());
    }

    let center = Point::from_mm(center)?;
    let radius = options.radius_iu(radius_mm)?;
    let ring = circle_ring(center, radius, options.segments())?;
    Ok(PolygonSet::from_regions(vec![Region::new(ring)]))
}

fn capsule_set(
    start: Vector2<f64>,
    end: Vector2<f64>,
    radius_mm: f64,
    options: &TessellationOptions,
) -> Result<PolygonSet, GeometryError> {
    if radius_mm < SIZE_EPSILON_MM {
        return Ok(PolygonSet::new());
    }

    let start = Point::from_mm(start)?;
    let end = Point::from_mm(end)?;
    let radius = options.radius_iu(radius_mm)?;
    let ring = capsule_ring(start, end, radius, options.segments())?;
    Ok(PolygonSet::from_regions(vec![Region::new(ring)]))
}

/// Grow every polygon of `set` by `clearance_mm` (Minkowski sum with a disk), computed as the
/// union of the set with a capsule along every ring segment.
fn inflate(
    set: PolygonSet,
    clearance_mm: f64,
    options: &TessellationOptions,
) -> Result<PolygonSet, GeometryError> {
    if clearance_mm < SIZE_EPSILON_MM {
        return Ok(set);
    }

    let radius = options.radius_iu(clearance_mm)?;
    let segments = options.segments();
    let mut capsules = Vec::new();
    for ring in set.regions().iter().flat_map(Region::iter_rings) {
        for (p0, p1) in ring.iter_segments() {
            capsules.push(Region::new(capsule_ring(p0, p1, radius, segments)?));
        }
    }

    let mut result = set;
    result.union(&PolygonSet::from_regions(capsules))?;
    Ok(result)
}

/// Point at `radius` internal units from `center` at polar `angle`, snapped to integer units.
fn snapped_point(center: Point, radius: i64, angle: f64) -> Result<Point, GeometryError> {
    let c = vec2(center.x as f64, center.y as f64);
    let p = point_on_circle(radius as f64, c, angle);
    Ok(Point::new(checked_iu(p.x.round())?, checked_iu(p.y.round())?))
}

/// Regular polygon with `segments` sides and circumradius `radius` (counter clockwise).
pub fn circle_ring(center: Point, radius: i64, segments: u32) -> Result<Ring, GeometryError> {
    let segments = segments.max(MIN_SEGMENTS_PER_CIRCLE);
    let step = f64::tau() / segments as f64;
    let points = (0..segments)
        .map(|k| snapped_point(center, radius, step * k as f64))
        .collect::<Result<Vec<_>, _>>()?;
    let ring = Ring::from_points(points);
    Ok(ring.remove_redundant().unwrap_or(ring))
}

/// Stadium around the segment `start -> end` with half arcs of `segments / 2` sides (rounded up)
/// at each end (counter clockwise).
///
/// Arc steps never exceed `2 * PI / segments`, so a radius corrected for `segments` keeps every
/// edge at or outside the true radius.
pub fn capsule_ring(
    start: Point,
    end: Point,
    radius: i64,
    segments: u32,
) -> Result<Ring, GeometryError> {
    if start == end {
        return circle_ring(start, radius, segments);
    }

    let half = (segments.max(MIN_SEGMENTS_PER_CIRCLE) + 1) / 2;
    let step = f64::pi() / half as f64;
    let dir = ((end.y - start.y) as f64).atan2((end.x - start.x) as f64);
    let end_arc_start = dir - f64::pi() / 2.0;
    let start_arc_start = dir + f64::pi() / 2.0;

    let mut points = Vec::with_capacity(2 * (half as usize + 1));
    for k in 0..=half {
        points.push(snapped_point(end, radius, end_arc_start + step * k as f64)?);
    }
    for k in 0..=half {
        points.push(snapped_point(start, radius, start_arc_start + step * k as f64)?);
    }

    let ring = Ring::from_points(points);
    Ok(ring.remove_redundant().unwrap_or(ring))
}
