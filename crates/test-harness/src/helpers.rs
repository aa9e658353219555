//! Helper functions: error type, site grids, float comparison.

use fault_geodesy::{BoundingBox, GeodesyError, Point};
use fault_surface::{Mesh, SurfaceError};

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("invalid fixture: {reason}")]
    Fixture { reason: String },

    #[error("surface error: {0}")]
    Surface(#[from] SurfaceError),

    #[error("geodesy error: {0}")]
    Geodesy(#[from] GeodesyError),

    #[error("report serialization failed: {0}")]
    Report(#[from] serde_json::Error),
}

// ── Sites ───────────────────────────────────────────────────────────────────

/// Regular `n` x `n` grid of surface sites covering `bbox` widened by
/// `margin` degrees on every side.
pub fn site_grid(bbox: &BoundingBox, margin: f64, n: usize) -> Mesh {
    let n = n.max(2);
    let step = |lo: f64, hi: f64, i: usize| lo + (hi - lo) * i as f64 / (n - 1) as f64;
    let (west, east) = (bbox.west - margin, bbox.east + margin);
    let (south, north) = (bbox.south - margin, bbox.north + margin);
    let points: Vec<Point> = (0..n)
        .flat_map(|i| (0..n).map(move |j| Point::surface(step(west, east, j), step(south, north, i))))
        .collect();
    Mesh::from_points(&points)
}

// ── Float Comparison ────────────────────────────────────────────────────────

/// `|actual - expected| / |expected|`, or the absolute error when `expected` is 0.
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    let diff = (actual - expected).abs();
    if expected == 0.0 {
        diff
    } else {
        diff / expected.abs()
    }
}
