//! Verification oracles: pure functions returning pass/fail verdicts.
//!
//! Each oracle returns an `OracleVerdict` with diagnostic detail, not panics.
//! This lets a scenario collect all failures in one pass.

use fault_surface::{FaultSurface, Mesh, MultiSurface};
use serde::Serialize;

use crate::helpers::relative_error;

/// The result of a single oracle check.
#[derive(Debug, Clone, Serialize)]
pub struct OracleVerdict {
    pub oracle_name: String,
    pub passed: bool,
    pub detail: String,
    pub value: Option<f64>,
}

impl OracleVerdict {
    fn pass(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: None,
        }
    }

    fn pass_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: Some(value),
        }
    }

    fn fail(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: None,
        }
    }

    fn fail_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: Some(value),
        }
    }
}

// ── Aggregate Geometry Oracles ──────────────────────────────────────────────

/// Total area equals the sum of the per-section areas.
pub fn check_area_sum(ms: &MultiSurface) -> OracleVerdict {
    let name = "area_sum";
    let sum: f64 = ms.surfaces().iter().map(|s| s.get_area()).sum();
    let total = ms.get_area();
    if total == sum && ms.get_areas().len() == ms.surfaces().len() {
        OracleVerdict::pass_val(name, format!("total area {total:.3} km2"), total)
    } else {
        OracleVerdict::fail_val(
            name,
            format!("total {total} != section sum {sum} ({} areas)", ms.get_areas().len()),
            total,
        )
    }
}

/// Width equals the area-weighted mean of the section widths.
pub fn check_weighted_width(ms: &MultiSurface, rel_tol: f64) -> OracleVerdict {
    let name = "weighted_width";
    let (num, den) = ms
        .surfaces()
        .iter()
        .map(|s| (s.get_width(), s.get_area()))
        .fold((0.0, 0.0), |(n, d), (w, a)| (n + w * a, d + a));
    let expected = num / den;
    let width = ms.get_width();
    let err = relative_error(width, expected);
    if err <= rel_tol {
        OracleVerdict::pass_val(name, format!("width {width:.3} km"), width)
    } else {
        OracleVerdict::fail_val(
            name,
            format!("width {width} vs weighted {expected} (rel err {err:.2e})"),
            width,
        )
    }
}

/// One edge per section, matching the first and last valid node of the
/// shallowest populated row.
pub fn check_edge_set(ms: &MultiSurface) -> OracleVerdict {
    let name = "edge_set";
    let edges = ms.edge_set();
    if edges.len() != ms.surfaces().len() {
        return OracleVerdict::fail(
            name,
            format!("{} edges for {} sections", edges.len(), ms.surfaces().len()),
        );
    }
    for (i, (edge, surface)) in edges.iter().zip(ms.surfaces()).enumerate() {
        let Some((first, last)) = surface.mesh().top_edge() else {
            return OracleVerdict::fail(name, format!("section {i} has no top edge"));
        };
        let points = edge.points();
        if points.len() != 2 || points[0] != first || points[1] != last {
            return OracleVerdict::fail(
                name,
                format!("section {i}: edge {points:?} != top row ({first:?}, {last:?})"),
            );
        }
    }
    OracleVerdict::pass(name, format!("{} edges", edges.len()))
}

/// Bounding box holds every valid node and each side touches one.
pub fn check_bounding_box(ms: &MultiSurface) -> OracleVerdict {
    let name = "bounding_box";
    let bb = ms.get_bounding_box();
    let nodes = ms.mesh();
    let (lons, lats) = (nodes.lons(), nodes.lats());
    if let Some(i) = (0..nodes.len()).find(|&i| !bb.contains(lons[i], lats[i])) {
        return OracleVerdict::fail(
            name,
            format!("node ({}, {}) outside {bb:?}", lons[i], lats[i]),
        );
    }
    let touches = lons.contains(&bb.west)
        && lons.contains(&bb.east)
        && lats.contains(&bb.south)
        && lats.contains(&bb.north);
    if touches {
        OracleVerdict::pass(
            name,
            format!(
                "[{:.3}, {:.3}] x [{:.3}, {:.3}] over {} nodes",
                bb.west,
                bb.east,
                bb.south,
                bb.north,
                nodes.len()
            ),
        )
    } else {
        OracleVerdict::fail(name, format!("{bb:?} does not touch the mesh on every side"))
    }
}

/// Middle point is the first section's middle point.
pub fn check_middle_point(ms: &MultiSurface) -> OracleVerdict {
    let name = "middle_point";
    let mid = ms.get_middle_point();
    let expected = ms.surfaces()[0].get_middle_point();
    if mid == expected {
        OracleVerdict::pass(name, format!("{mid:?}"))
    } else {
        OracleVerdict::fail(name, format!("{mid:?} != first section {expected:?}"))
    }
}

// ── Distance Oracles ────────────────────────────────────────────────────────

/// Joyner-Boore distance equals the pointwise minimum over sections.
pub fn check_rjb_is_min(ms: &MultiSurface, sites: &Mesh) -> OracleVerdict {
    let name = "rjb_is_min";
    let rjb = ms.get_joyner_boore_distance(sites);
    let per_section: Vec<Vec<f64>> = ms
        .surfaces()
        .iter()
        .map(|s| s.get_joyner_boore_distance(sites))
        .collect();
    for (i, &d) in rjb.iter().enumerate() {
        let min = per_section.iter().map(|r| r[i]).fold(f64::INFINITY, f64::min);
        if d != min {
            return OracleVerdict::fail_val(name, format!("site {i}: {d} != min {min}"), d);
        }
    }
    OracleVerdict::pass(name, format!("{} sites", rjb.len()))
}

/// Rjb and Ry0 are finite and non-negative at every site.
pub fn check_distances_non_negative(ms: &MultiSurface, sites: &Mesh) -> OracleVerdict {
    let name = "distances_non_negative";
    let rjb = ms.get_joyner_boore_distance(sites);
    let ry0 = ms.get_ry0_distance(sites);
    let bad = rjb
        .iter()
        .zip(&ry0)
        .position(|(&a, &b)| !(a >= 0.0 && b >= 0.0));
    match bad {
        Some(i) => OracleVerdict::fail(name, format!("site {i}: rjb {} ry0 {}", rjb[i], ry0[i])),
        None => OracleVerdict::pass(name, format!("{} sites", rjb.len())),
    }
}

/// Run every oracle.
pub fn run_all_checks(ms: &MultiSurface, sites: &Mesh) -> Vec<OracleVerdict> {
    vec![
        check_area_sum(ms),
        check_weighted_width(ms, 1e-9),
        check_edge_set(ms),
        check_bounding_box(ms),
        check_middle_point(ms),
        check_rjb_is_min(ms, sites),
        check_distances_non_negative(ms, sites),
    ]
}
