//! End-to-end scenarios on profile-built reference surfaces.

use approx::assert_abs_diff_eq;

use fault_geodesy::{Line, Point};
use fault_surface::{BoundingBox, FaultSurface, Mesh, MeshSurface, MultiSurface};
use test_harness::assertions::{
    assert_all_passed, assert_azimuth_close, assert_bbox_bounds, assert_close,
};
use test_harness::fixtures::{
    kite_section, mesh_from_profiles, north_dipping_pair, northeast_section, two_section_surface,
    vertical_section,
};
use test_harness::helpers::site_grid;
use test_harness::oracle::run_all_checks;

/// Length of 0.1 degree of arc on the reference sphere (km).
const TENTH: f64 = 11.119492664455873;

#[test]
fn single_vertical_section() {
    let ms = MultiSurface::from_surfaces([vertical_section().unwrap()]).unwrap();
    assert_close(ms.get_dip(), 90.0, 1e-3, "dip").unwrap();
    assert_close(ms.get_width(), 20.0, 0.01, "width").unwrap();
    assert_close(ms.get_area(), 3.0 * TENTH * 20.0, 0.02, "area").unwrap();
    assert_azimuth_close(ms.get_strike(), 90.0, 0.1, "strike").unwrap();
    let expected = BoundingBox::new(0.0, 0.3, -0.00001, 0.0);
    assert_bbox_bounds(&ms, &expected, 1e-6, "bbox").unwrap();
    assert!(assert_bbox_bounds(&ms, &BoundingBox::new(0.0, 0.2, -0.00001, 0.0), 1e-6, "bbox").is_err());

    let sites = Mesh::new(vec![0.15, 0.15, 0.4], vec![0.1, -0.1, 0.0]).unwrap();
    let rjb = ms.get_joyner_boore_distance(&sites);
    assert_abs_diff_eq!(rjb[0], TENTH, epsilon = 1e-2);
    assert_abs_diff_eq!(rjb[2], TENTH, epsilon = 1e-2);
    let rx = ms.get_rx_distance(&sites);
    assert_abs_diff_eq!(rx[0], -TENTH, epsilon = 1e-2);
    assert_abs_diff_eq!(rx[1], TENTH, epsilon = 1e-2);
    let ry0 = ms.get_ry0_distance(&sites);
    assert_abs_diff_eq!(ry0[0], 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(ry0[2], TENTH, epsilon = 1e-2);
}

#[test]
fn two_section_aggregates() {
    let ms = two_section_surface().unwrap();
    let vertical = vertical_section().unwrap();
    let northeast = northeast_section().unwrap();

    let (a1, a2) = (vertical.get_area(), northeast.get_area());
    assert_eq!(ms.get_areas(), &[a1, a2]);
    assert_eq!(ms.get_area(), a1 + a2);
    let expected_width = (vertical.get_width() * a1 + northeast.get_width() * a2) / (a1 + a2);
    assert_close(ms.get_width(), expected_width, 1e-9, "width").unwrap();
    let expected_dip = (vertical.get_dip() * a1 + northeast.get_dip() * a2) / (a1 + a2);
    assert_close(ms.get_dip(), expected_dip, 1e-9, "dip").unwrap();
    assert_close(northeast.get_dip(), 60.0, 0.01, "northeast dip").unwrap();
    assert_azimuth_close(northeast.get_strike(), 45.0, 0.5, "northeast strike").unwrap();

    let strike = ms.get_strike();
    assert!(strike > 45.0 && strike < 90.0, "strike {strike}");
    assert_eq!(ms.get_middle_point(), vertical.get_middle_point());

    let sites = site_grid(&ms.get_bounding_box(), 0.2, 7);
    assert_all_passed(&run_all_checks(&ms, &sites), "two sections").unwrap();
}

#[test]
fn holed_north_dipping_pair() {
    let pair = north_dipping_pair().unwrap();
    let west_second = pair[0].mesh().get(0, 1).unwrap();
    let ms = MultiSurface::from_surfaces(pair).unwrap();

    assert_azimuth_close(ms.get_strike(), 270.0, 1.0, "strike").unwrap();
    assert_eq!(ms.edge_set()[0].points()[0], west_second);
    assert!(!ms.gc2().is_reversed(0) && !ms.gc2().is_reversed(1));
    assert_close(ms.get_dip(), 60.93, 0.01, "dip").unwrap();

    let (lons, lats) = ms.get_surface_boundaries();
    assert_eq!(lons.len(), lats.len());
    assert!(lons.iter().chain(&lats).all(|v| v.is_finite()));

    // Above the west section, north of its trace.
    let sites = Mesh::new(vec![-0.1, -0.1, 0.1], vec![0.025, -0.1, 0.1]).unwrap();
    let rjb = ms.get_joyner_boore_distance(&sites);
    assert_eq!(rjb[0], 0.0);
    assert_abs_diff_eq!(rjb[1], TENTH, epsilon = 1e-2);
    // Westward traces dipping north: the hanging wall is north.
    let rx = ms.get_rx_distance(&sites);
    assert!(rx[0] > 0.0 && rx[2] > 0.0, "rx {rx:?}");
    assert_abs_diff_eq!(rx[1], -TENTH, epsilon = 1e-2);

    let grid = site_grid(&ms.get_bounding_box(), 0.3, 9);
    assert_all_passed(&run_all_checks(&ms, &grid), "north dipping pair").unwrap();
}

#[test]
fn kite_section_rx_sign() {
    let ms = MultiSurface::from_surfaces([kite_section().unwrap()]).unwrap();
    assert_azimuth_close(ms.get_strike(), 90.0, 1e-3, "strike").unwrap();

    let sites = Mesh::new(vec![0.1, 0.1, 0.3], vec![-0.05, 0.1, -0.02]).unwrap();
    let rjb = ms.get_joyner_boore_distance(&sites);
    assert_eq!(rjb[0], 0.0);
    let rx = ms.get_rx_distance(&sites);
    assert_abs_diff_eq!(rx[0], 0.5 * TENTH, epsilon = 1e-2);
    assert_abs_diff_eq!(rx[1], -TENTH, epsilon = 1e-3);
    let ry0 = ms.get_ry0_distance(&sites);
    assert_abs_diff_eq!(ry0[0], 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(ry0[2], TENTH, epsilon = 1e-2);
}

#[test]
fn westward_section_dipping_north() {
    let profiles = [0.2, 0.0]
        .iter()
        .map(|&lon| Line::new(vec![Point::surface(lon, 0.0), Point::new(lon, 0.05, 15.0)]).unwrap())
        .collect::<Vec<_>>();
    let section = MeshSurface::new(mesh_from_profiles(&profiles, 2.0, 2.0).unwrap()).unwrap();
    let ms = MultiSurface::from_surfaces([section]).unwrap();
    assert_azimuth_close(ms.get_strike(), 270.0, 1e-6, "strike").unwrap();

    // Hanging wall to the north: north of the east end, south of the west end.
    let sites = Mesh::new(vec![0.2, 0.0], vec![0.1, -0.1]).unwrap();
    let rx = ms.get_rx_distance(&sites);
    assert_abs_diff_eq!(rx[0], TENTH, epsilon = 1e-4);
    assert_abs_diff_eq!(rx[1], -TENTH, epsilon = 1e-4);
}
