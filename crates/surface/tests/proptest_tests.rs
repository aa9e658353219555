//! Property-based tests for multi-surface invariants using the `proptest` crate.

use std::sync::Arc;

use proptest::prelude::*;

use fault_surface::{FaultSurface, Mesh, MultiSurface, PlanarSurface, Point};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Planar section parameters: origin lon/lat, trace length, strike, dip, width.
fn arb_plane() -> impl Strategy<Value = (f64, f64, f64, f64, f64, f64)> {
    (
        -10.0f64..10.0,
        -10.0f64..10.0,
        5.0f64..50.0,
        0.0f64..360.0,
        20.0f64..90.0,
        2.0f64..20.0,
    )
}

/// Site offsets in degrees around the section origin.
fn arb_offsets() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-1.0f64..1.0, -1.0f64..1.0), 1..8)
}

fn plane(params: (f64, f64, f64, f64, f64, f64)) -> PlanarSurface {
    let (lon, lat, length, strike, dip, width) = params;
    let top_left = Point::surface(lon, lat);
    let top_right = top_left.point_at(length, 0.0, strike);
    let (down, across) = (width * dip.to_radians().sin(), width * dip.to_radians().cos());
    let bottom_left = top_left.point_at(across, down, strike + 90.0);
    let bottom_right = top_right.point_at(across, down, strike + 90.0);
    PlanarSurface::from_corner_points(top_left, top_right, bottom_right, bottom_left).unwrap()
}

/// The same section seen from the other end of its trace.
fn flipped(params: (f64, f64, f64, f64, f64, f64)) -> PlanarSurface {
    let p = plane(params);
    PlanarSurface::from_corner_points(p.top_right(), p.top_left(), p.bottom_left(), p.bottom_right())
        .unwrap()
}

fn sites_around(lon: f64, lat: f64, offsets: &[(f64, f64)]) -> Mesh {
    Mesh::new(
        offsets.iter().map(|(dx, _)| lon + dx).collect(),
        offsets.iter().map(|(_, dy)| lat + dy).collect(),
    )
    .unwrap()
}

const TOL: f64 = 1e-6;

// ---------------------------------------------------------------------------
// 1. Joyner-Boore distance of a union is the pointwise minimum
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn rjb_union_is_pointwise_min(a in arb_plane(), b in arb_plane(), offsets in arb_offsets()) {
        let sa: Arc<dyn FaultSurface> = Arc::new(plane(a));
        let sb: Arc<dyn FaultSurface> = Arc::new(plane(b));
        let sites = sites_around(a.0, a.1, &offsets);

        let union = MultiSurface::new(vec![sa.clone(), sb.clone()]).unwrap();
        let only_a = MultiSurface::new(vec![sa]).unwrap();
        let only_b = MultiSurface::new(vec![sb]).unwrap();

        let rjb = union.get_joyner_boore_distance(&sites);
        let ra = only_a.get_joyner_boore_distance(&sites);
        let rb = only_b.get_joyner_boore_distance(&sites);
        for i in 0..sites.len() {
            prop_assert!((rjb[i] - ra[i].min(rb[i])).abs() < TOL,
                "site {}: union {} != min({}, {})", i, rjb[i], ra[i], rb[i]);
        }
    }
}

// ---------------------------------------------------------------------------
// 2. Rjb and Ry0 are never negative, Rrup never below Rjb
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn distances_are_non_negative(a in arb_plane(), offsets in arb_offsets()) {
        let ms = MultiSurface::from_surfaces([plane(a)]).unwrap();
        let sites = sites_around(a.0, a.1, &offsets);
        let rjb = ms.get_joyner_boore_distance(&sites);
        let ry0 = ms.get_ry0_distance(&sites);
        let rrup = ms.get_min_distance(&sites);
        for i in 0..sites.len() {
            prop_assert!(rjb[i] >= 0.0, "rjb[{}] = {}", i, rjb[i]);
            prop_assert!(ry0[i] >= 0.0, "ry0[{}] = {}", i, ry0[i]);
            prop_assert!(rrup[i] + TOL >= rjb[i], "rrup {} < rjb {}", rrup[i], rjb[i]);
        }
    }
}

// ---------------------------------------------------------------------------
// 3. Aggregate area is the sum of the section areas
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn area_is_additive(a in arb_plane(), b in arb_plane()) {
        let pa = plane(a);
        let pb = plane(b);
        let expected = pa.get_area() + pb.get_area();
        let ms = MultiSurface::from_surfaces([pa, pb]).unwrap();
        prop_assert!((ms.get_area() - expected).abs() < TOL);
        prop_assert_eq!(ms.get_areas().len(), 2);
        prop_assert_eq!(ms.edge_set().len(), 2);
    }
}

// ---------------------------------------------------------------------------
// 4. Bounding box holds every mesh node and touches each side
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn bounding_box_contains_mesh(a in arb_plane(), b in arb_plane()) {
        let ms = MultiSurface::from_surfaces([plane(a), plane(b)]).unwrap();
        let bb = ms.get_bounding_box();
        let nodes = ms.mesh();
        let (lons, lats) = (nodes.lons(), nodes.lats());
        for i in 0..nodes.len() {
            prop_assert!(bb.contains(lons[i], lats[i]));
        }
        prop_assert!(lons.contains(&bb.west) && lons.contains(&bb.east));
        prop_assert!(lats.contains(&bb.south) && lats.contains(&bb.north));
    }
}

// ---------------------------------------------------------------------------
// 5. Reversing the trace flips the sign of Rx and keeps Ry0
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn rx_flips_with_trace_direction(a in arb_plane(), offsets in arb_offsets()) {
        let forward = MultiSurface::from_surfaces([plane(a)]).unwrap();
        let backward = MultiSurface::from_surfaces([flipped(a)]).unwrap();
        let sites = sites_around(a.0, a.1, &offsets);
        let rx_f = forward.get_rx_distance(&sites);
        let rx_b = backward.get_rx_distance(&sites);
        let ry_f = forward.get_ry0_distance(&sites);
        let ry_b = backward.get_ry0_distance(&sites);
        for i in 0..sites.len() {
            prop_assert!((rx_f[i] + rx_b[i]).abs() < TOL,
                "rx {} vs {}", rx_f[i], rx_b[i]);
            prop_assert!((ry_f[i] - ry_b[i]).abs() < TOL,
                "ry0 {} vs {}", ry_f[i], ry_b[i]);
        }
    }
}

// ---------------------------------------------------------------------------
// 6. Middle point comes from the first section
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn middle_point_of_first_section(a in arb_plane(), b in arb_plane()) {
        let first = plane(a);
        let expected = first.get_middle_point();
        let ms = MultiSurface::from_surfaces([first, plane(b)]).unwrap();
        prop_assert_eq!(ms.get_middle_point(), expected);
    }
}
