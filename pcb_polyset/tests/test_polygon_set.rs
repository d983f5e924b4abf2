mod test_utils;

use pcb_polyset::{core::traits::FuzzyEq, prelude::*, AABB};
use test_utils::{rect, square, square_with_hole, SetProperties};

#[test]
fn union_with_empty_is_identity() {
    let a = square_with_hole(0.0, 0.0, 10.0, 4.0);

    let mut result = a.clone();
    result.union(&PolygonSet::new()).unwrap();
    assert_eq!(result, a);

    let mut result = PolygonSet::new();
    result.union(&a).unwrap();
    assert_eq!(result, a);
}

#[test]
fn difference_and_intersection_partition_the_operand() {
    let a = square(0.0, 0.0, 10.0);
    let b = square(5.0, 5.0, 10.0);

    let mut outside = a.clone();
    outside.difference(&b).unwrap();
    let mut inside = a.clone();
    inside.intersection(&b).unwrap();

    assert!(outside.area().fuzzy_eq_eps(75.0, 1e-9));
    assert!(inside.area().fuzzy_eq_eps(25.0, 1e-9));
    assert_eq!(inside, square(5.0, 5.0, 5.0));

    let mut rejoined = outside;
    rejoined.union(&inside).unwrap();
    assert_eq!(rejoined, a);
}

#[test]
fn xor_is_symmetric() {
    let a = square(0.0, 0.0, 10.0);
    let b = rect(5.0, -5.0, 20.0, 5.0);

    let mut ab = a.clone();
    ab.xor(&b).unwrap();
    let mut ba = b.clone();
    ba.xor(&a).unwrap();

    assert_eq!(ab, ba);
    // 100 + 150 - 2 * 25
    assert!(ab.area().fuzzy_eq_eps(200.0, 1e-9));
}

#[test]
fn disjoint_operands() {
    let a = square(0.0, 0.0, 1.0);
    let b = square(5.0, 5.0, 1.0);

    let mut union = a.clone();
    union.union(&b).unwrap();
    assert_eq!(union.polygon_count(), 2);

    let mut difference = a.clone();
    difference.difference(&b).unwrap();
    assert_eq!(difference, a);

    let mut intersection = a.clone();
    intersection.intersection(&b).unwrap();
    assert!(intersection.is_empty());
}

#[test]
fn union_then_difference_restores_the_operand() {
    // second operand fully inside the hole of the first
    let a = square_with_hole(0.0, 0.0, 10.0, 4.0);
    let b = square(3.5, 3.5, 3.0);
    let mut set = a.clone();
    set.union(&b).unwrap();
    assert_eq!(set.polygon_count(), 2);
    set.difference(&b).unwrap();
    assert_eq!(set, a);

    // disjoint operands side by side
    let a = square(0.0, 0.0, 10.0);
    let b = square(20.0, 0.0, 5.0);
    let mut set = a.clone();
    set.union(&b).unwrap();
    set.difference(&b).unwrap();
    assert_eq!(set, a);
}

#[test]
fn union_fills_hole() {
    let mut a = square_with_hole(0.0, 0.0, 10.0, 4.0);
    a.union(&square(2.0, 2.0, 6.0)).unwrap();
    let expected = SetProperties::new(
        1,
        0,
        100.0,
        Some(AABB::new(0.0, 0.0, 10.0, 10.0)),
    );
    assert!(SetProperties::from_set(&a).matches(&expected), "{:?}", a);
}

#[test]
fn fracture_removes_holes_and_keeps_area() {
    let original = square_with_hole(0.0, 0.0, 10.0, 4.0);
    let mut fractured = original.clone();
    fractured.fracture().unwrap();

    let expected = SetProperties::new(1, 0, 84.0, original.extents());
    assert!(SetProperties::from_set(&fractured).matches(&expected));
    assert!(fractured.iter().all(|p| !p.has_holes()));

    let mut twice = fractured.clone();
    twice.fracture().unwrap();
    assert_eq!(twice, fractured);
}

#[test]
fn unfracture_restores_holes() {
    let original = square_with_hole(0.0, 0.0, 10.0, 4.0);
    let mut set = original.clone();
    set.fracture().unwrap();
    set.unfracture().unwrap();

    assert_eq!(set.hole_count(), 1);
    assert_eq!(set, original);
}

#[test]
fn unfracture_with_hole_touching_the_outline() {
    let mut diamond = PolygonSet::new();
    diamond
        .add_outline([
            vec2(0.0, 15.0),
            vec2(5.0, 10.0),
            vec2(10.0, 15.0),
            vec2(5.0, 20.0),
        ])
        .unwrap();

    // diamond notch touches the left edge at (0, 15), the second hole is free standing
    let mut original = square(0.0, 0.0, 30.0);
    original.difference(&diamond).unwrap();
    original.difference(&square(15.0, 22.0, 5.0)).unwrap();
    assert_eq!(original.polygon_count(), 1);
    assert!(original.area().fuzzy_eq_eps(900.0 - 50.0 - 25.0, 1e-9));

    let mut set = original.clone();
    set.fracture().unwrap();
    assert_eq!(set.hole_count(), 0);
    assert!(set.area().fuzzy_eq_eps(original.area(), 1e-9));

    set.unfracture().unwrap();
    assert_eq!(set, original);
    assert!(set.area().fuzzy_eq_eps(original.area(), 1e-9));
}

#[test]
fn fracture_multiple_holes() {
    let mut set = square(0.0, 0.0, 30.0);
    for x in [5.0, 20.0] {
        set.add_hole(
            0,
            [
                vec2(x, 5.0),
                vec2(x, 10.0),
                vec2(x + 5.0, 10.0),
                vec2(x + 5.0, 5.0),
            ],
        )
        .unwrap();
    }
    let area = set.area();

    set.fracture().unwrap();
    assert_eq!(set.polygon_count(), 1);
    assert_eq!(set.hole_count(), 0);
    assert!(set.area().fuzzy_eq_eps(area, 1e-9));
}

#[test]
fn snapshot_iteration() {
    let mut set = square_with_hole(0.0, 0.0, 10.0, 4.0);
    set.union(&square(20.0, 0.0, 2.0)).unwrap();

    let polygons: Vec<Polygon> = set.iter().collect();
    assert_eq!(polygons.len(), 2);
    assert_eq!(set.iter().len(), 2);

    let total: f64 = polygons.iter().map(Polygon::area).sum();
    assert!(total.fuzzy_eq_eps(set.area(), 1e-9));
    assert_eq!(polygons.iter().filter(|p| p.has_holes()).count(), 1);
    assert!(polygons.iter().all(|p| p.outline().len() == 4));

    // snapshots are copies, mutating the set afterwards leaves them untouched
    set.translate(1.0, 0.0).unwrap();
    assert_ne!(set.iter().collect::<Vec<_>>(), polygons);
}

#[test]
fn invalid_hole_index() {
    let mut set = square(0.0, 0.0, 1.0);
    let err = set
        .add_hole(3, [vec2(0.2, 0.2), vec2(0.2, 0.4), vec2(0.4, 0.4)])
        .unwrap_err();
    assert_eq!(err, GeometryError::InvalidPolygonIndex { index: 3, count: 1 });
}
