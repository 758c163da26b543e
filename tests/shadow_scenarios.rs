//! End-to-end shadow scenarios on real building outlines.

#![allow(clippy::unwrap_used)]

use approx::assert_abs_diff_eq;
use std::f64::consts::{FRAC_PI_4, PI};

use umbra::geometry::TangentPlane;
use umbra::math::polygon_2d::{point_in_polygon_2d, signed_area_2d};
use umbra::math::Point2;
use umbra::operations::shadow::project_planar;
use umbra::{
    project, BuildingShape, CollectionConfig, ShadowRegion, ShapeCollection, ShapeEdit,
    SunDirection,
};

const C_SHAPE: &str = include_str!("fixtures/c_shape.json");
const STEPPED: &str = include_str!("fixtures/stepped.json");
const U_SHAPE: &str = include_str!("fixtures/u_shape.json");
const COMPOSITE: &str = include_str!("fixtures/composite.json");

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn collection(sun: SunDirection) -> ShapeCollection {
    ShapeCollection::new(CollectionConfig {
        sun,
        ..CollectionConfig::default()
    })
    .unwrap()
}

/// Checks the invariants every projected shadow satisfies, on the plane
/// anchored at the shape's first vertex.
fn assert_well_formed(shape: &BuildingShape) {
    let footprint = shape.footprint();
    let plane = TangentPlane::new(footprint.vertices()[0].position);
    let base: Vec<Point2> = footprint.coords().iter().map(|p| plane.to_local(p)).collect();
    let region = shape.shadow().to_local(&plane);

    assert!(!region.is_empty());
    assert_eq!(region.is_multi(), region.len() > 1);
    for poly in region.polygons() {
        assert!(poly.exterior.len() >= 3);
        assert!(signed_area_2d(&poly.exterior) > 0.0);
        for hole in &poly.holes {
            assert!(hole.len() >= 3);
            assert!(signed_area_2d(hole) < 0.0);
        }
    }

    // The shadow covers the footprint itself.
    assert!(region.area() + 0.05 >= signed_area_2d(&base).abs());
    let (lo, hi) = region.bounding_box().unwrap();
    for p in &base {
        assert!(p.x >= lo.x - 1e-3 && p.x <= hi.x + 1e-3);
        assert!(p.y >= lo.y - 1e-3 && p.y <= hi.y + 1e-3);
    }
}

#[test]
fn square_scenario_extends_ten_metres_south() {
    init_tracing();
    let square = [
        Point2::new(0.0, 0.0),
        Point2::new(0.0, 10.0),
        Point2::new(10.0, 10.0),
        Point2::new(10.0, 0.0),
    ];
    let region = project_planar(&square, &[10.0; 4], SunDirection::new(FRAC_PI_4, 0.0)).unwrap();
    let (lo, hi) = region.bounding_box().unwrap();
    assert_abs_diff_eq!(lo.y, -10.0, epsilon = 1e-6);
    assert_abs_diff_eq!(hi.y, 10.0, epsilon = 1e-6);
    assert_eq!(region.len(), 1);
}

#[test]
fn tall_corner_scenario_is_not_rectangular() {
    init_tracing();
    let square = [
        Point2::new(0.0, 0.0),
        Point2::new(0.0, 10.0),
        Point2::new(10.0, 10.0),
        Point2::new(10.0, 0.0),
    ];
    let sun = SunDirection::new(FRAC_PI_4, 0.0);
    let uniform = project_planar(&square, &[10.0; 4], sun).unwrap();
    let tall = project_planar(&square, &[10.0, 10.0, 40.0, 10.0], sun).unwrap();

    assert!(tall.area() > uniform.area());
    let ShadowRegion::Single(poly) = &tall else {
        panic!("expected one polygon, got {tall:?}");
    };
    assert!(poly.exterior.len() > 4);
    // The 40 m corner at (10, 10) casts to (10, -30).
    assert!(poly
        .exterior
        .iter()
        .any(|p| (p - Point2::new(10.0, -30.0)).norm() < 1e-6));
}

#[test]
fn c_shape_with_tall_vertex() {
    init_tracing();
    let mut shapes = collection(SunDirection::from_degrees(28.0, 215.0));
    assert_eq!(shapes.load(C_SHAPE).unwrap(), None);
    assert_eq!(shapes.len(), 1);
    let shape = shapes.shapes().next().unwrap();
    assert_eq!(shape.footprint().len(), 12);
    assert_well_formed(shape);
}

#[test]
fn fixtures_stay_well_formed_through_the_day() {
    init_tracing();
    let mut shapes = collection(SunDirection::below_horizon());
    for text in [C_SHAPE, STEPPED, U_SHAPE, COMPOSITE] {
        shapes.load(text).unwrap();
        for (altitude, azimuth) in [(8.0, 95.0), (35.0, 140.0), (62.0, 180.0), (30.0, 230.0), (5.0, 280.0)] {
            shapes
                .set_sun_direction(SunDirection::from_degrees(altitude, azimuth))
                .unwrap();
            for shape in shapes.shapes() {
                assert_well_formed(shape);
            }
        }
    }
}

#[test]
fn fixture_shadows_are_deterministic() {
    let sun = SunDirection::from_degrees(21.0, 250.0);
    let mut a = collection(sun);
    let mut b = collection(sun);
    a.load(COMPOSITE).unwrap();
    b.load(COMPOSITE).unwrap();
    let first: Vec<&ShadowRegion> = a.shapes().map(BuildingShape::shadow).collect();
    let second: Vec<&ShadowRegion> = b.shapes().map(BuildingShape::shadow).collect();
    assert_eq!(first, second);
}

#[test]
fn night_clears_every_shadow() {
    let mut shapes = collection(SunDirection::from_degrees(40.0, 170.0));
    shapes.load(U_SHAPE).unwrap();
    assert!(shapes.shapes().all(|s| !s.shadow().is_empty()));
    shapes
        .set_sun_direction(SunDirection::from_degrees(-4.0, 300.0))
        .unwrap();
    assert!(shapes.shapes().all(|s| s.shadow().is_empty()));
}

#[test]
fn raising_a_vertex_grows_the_shadow() {
    let sun = SunDirection::from_degrees(30.0, 200.0);
    let mut shapes = collection(sun);
    shapes.load(STEPPED).unwrap();
    let id = shapes.ids()[0];
    let plane = TangentPlane::new(shapes.shape(id).unwrap().footprint().vertices()[0].position);
    let before = shapes.shape(id).unwrap().shadow().to_local(&plane).area();

    shapes.select(id).unwrap();
    shapes
        .edit_selected(ShapeEdit::SetHeight {
            index: 3,
            height: 45.0,
        })
        .unwrap();
    let shape = shapes.shape(id).unwrap();
    let after = shape.shadow().to_local(&plane).area();
    assert!(after > before);
    assert_eq!(shape.shadow(), &project(shape.footprint(), sun).unwrap());
}

#[test]
fn shadow_contains_points_just_outside_the_lit_side() {
    // Sun in the south: the area just north of the building is in shadow,
    // the area just south is not.
    let square = [
        Point2::new(0.0, 0.0),
        Point2::new(0.0, 10.0),
        Point2::new(10.0, 10.0),
        Point2::new(10.0, 0.0),
    ];
    let region =
        project_planar(&square, &[20.0; 4], SunDirection::from_degrees(45.0, 180.0)).unwrap();
    let exterior = &region.polygons()[0].exterior;
    assert!(point_in_polygon_2d(&Point2::new(5.0, 15.0), exterior));
    assert!(!point_in_polygon_2d(&Point2::new(5.0, -1.0), exterior));
}

/// Outer 30 m square with a 10 m courtyard, reached from the east by a
/// passage between y = 12 and y = 18.
fn courtyard_c() -> Vec<Point2> {
    [
        (0.0, 0.0),
        (30.0, 0.0),
        (30.0, 12.0),
        (20.0, 12.0),
        (20.0, 10.0),
        (10.0, 10.0),
        (10.0, 20.0),
        (20.0, 20.0),
        (20.0, 18.0),
        (30.0, 18.0),
        (30.0, 30.0),
        (0.0, 30.0),
    ]
    .iter()
    .map(|&(x, y)| Point2::new(x, y))
    .collect()
}

#[test]
fn closed_courtyard_becomes_a_hole() {
    init_tracing();
    // Sun in the south: every edge casts 8 m north. The passage is shaded
    // over, the courtyard keeps a 2 m strip of light along its north wall.
    let region = project_planar(&courtyard_c(), &[8.0; 12], SunDirection::new(FRAC_PI_4, PI)).unwrap();
    let ShadowRegion::Single(poly) = &region else {
        panic!("expected one polygon, got {region:?}");
    };
    assert_eq!(poly.holes.len(), 1);
    assert_abs_diff_eq!(region.area(), 1120.0, epsilon = 1e-6);

    let hole = &poly.holes[0];
    assert!(signed_area_2d(hole) < 0.0);
    assert_abs_diff_eq!(signed_area_2d(hole), -20.0, epsilon = 1e-6);
    for p in hole {
        assert!(p.x > 10.0 - 1e-6 && p.x < 20.0 + 1e-6);
        assert!(p.y > 18.0 - 1e-6 && p.y < 20.0 + 1e-6);
    }
    // Lit strip inside the courtyard, shaded courtyard floor below it.
    assert!(point_in_polygon_2d(&Point2::new(15.0, 19.0), hole));
    assert!(point_in_polygon_2d(&Point2::new(15.0, 17.0), &poly.exterior));
    assert!(!point_in_polygon_2d(&Point2::new(15.0, 17.0), hole));
    let (lo, hi) = region.bounding_box().unwrap();
    assert_abs_diff_eq!(lo.y, 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(hi.y, 38.0, epsilon = 1e-6);
}

#[test]
fn courtyard_without_height_stays_open() {
    let region = project_planar(&courtyard_c(), &[0.0; 12], SunDirection::new(FRAC_PI_4, PI)).unwrap();
    let ShadowRegion::Single(poly) = &region else {
        panic!("expected one polygon, got {region:?}");
    };
    assert!(poly.holes.is_empty());
    assert_abs_diff_eq!(region.area(), 740.0, epsilon = 1e-6);
}

/// Bow-tie outline whose edges cross at (13, 5): the left lobe winds one
/// way, the right lobe the other.
fn figure_eight() -> [Point2; 4] {
    [
        Point2::new(0.0, 0.0),
        Point2::new(26.0, 10.0),
        Point2::new(26.0, 0.0),
        Point2::new(0.0, 10.0),
    ]
}

#[test]
fn flat_figure_eight_is_two_parts() {
    let region = project_planar(&figure_eight(), &[0.0; 4], SunDirection::new(FRAC_PI_4, 0.0)).unwrap();
    assert!(region.is_multi());
    assert_eq!(region.len(), 2);
    for poly in region.polygons() {
        assert!(poly.holes.is_empty());
        assert_abs_diff_eq!(signed_area_2d(&poly.exterior), 65.0, epsilon = 1e-6);
    }
}

#[test]
fn figure_eight_shadow_covers_both_lobes() {
    init_tracing();
    let region = project_planar(&figure_eight(), &[1.0; 4], SunDirection::new(FRAC_PI_4, 0.0)).unwrap();
    let ShadowRegion::Single(poly) = &region else {
        panic!("expected one polygon, got {region:?}");
    };
    assert!(poly.holes.is_empty());
    assert!(point_in_polygon_2d(&Point2::new(3.0, 5.0), &poly.exterior));
    assert!(point_in_polygon_2d(&Point2::new(24.0, 5.0), &poly.exterior));
    assert_abs_diff_eq!(region.area(), 156.0, epsilon = 1e-6);
}
