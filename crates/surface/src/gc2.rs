//! Generalized Coordinate System (GC2) of Spudich & Chiou (2015).
//!
//! Multi-section traces are combined into one strike-parallel coordinate `U`
//! and one strike-normal coordinate `T` by distance-weighting every trace
//! segment. `T` is the Rx distance; `U` measured against the trace length
//! gives Ry0.

use fault_geodesy::geodetic::normalize_azimuth;
use fault_geodesy::{Line, LocalProjection};
use nalgebra::Vector2;
use tracing::{debug, warn};

use crate::Tolerance;
use crate::mesh::Mesh;

#[derive(Debug, Clone, Copy)]
struct Segment {
    start: Vector2<f64>,
    u_hat: Vector2<f64>,
    t_hat: Vector2<f64>,
    length: f64,
    /// Position of `start` along the aggregate trace.
    offset: f64,
}

/// Oriented, projected trace segments of an edge set.
#[derive(Debug, Clone)]
pub struct Gc2Frame {
    projection: LocalProjection,
    segments: Vec<Segment>,
    reversed: Vec<bool>,
    b_hat: Vector2<f64>,
    length: f64,
    tolerance: Tolerance,
}

impl Gc2Frame {
    pub fn build(edges: &[Line], tolerance: Tolerance) -> Self {
        let projection =
            LocalProjection::centred_on(edges.iter().flat_map(|e| e.points().iter().copied()));
        let traces: Vec<Vec<Vector2<f64>>> = edges
            .iter()
            .map(|e| {
                e.points()
                    .iter()
                    .map(|p| projection.project(p.longitude, p.latitude))
                    .collect()
            })
            .collect();

        let a_hat = reference_axis(&traces);
        let chords: Vec<Vector2<f64>> = traces.iter().map(|t| chord(t)).collect();
        let total: f64 = chords.iter().map(|c| c.dot(&a_hat)).sum();
        let reversed: Vec<bool> = chords.iter().map(|c| c.dot(&a_hat) * total < 0.0).collect();

        let oriented: Vec<Vec<Vector2<f64>>> = traces
            .into_iter()
            .zip(&reversed)
            .map(|(mut t, &rev)| {
                if rev {
                    t.reverse();
                }
                t
            })
            .collect();

        let b_vec: Vector2<f64> = oriented.iter().map(|t| chord(t)).sum();
        let b_hat = if b_vec.norm() > tolerance.min_segment_length {
            b_vec.normalize()
        } else {
            a_hat
        };

        let origin = oriented
            .iter()
            .filter_map(|t| t.first())
            .map(|p| p.dot(&b_hat))
            .fold(f64::INFINITY, f64::min);

        let mut segments = Vec::new();
        let mut length = 0.0_f64;
        for trace in &oriented {
            let Some(first) = trace.first() else {
                continue;
            };
            let mut offset = first.dot(&b_hat) - origin;
            for pair in trace.windows(2) {
                let delta = pair[1] - pair[0];
                let seg_len = delta.norm();
                if tolerance.is_degenerate_segment(seg_len) {
                    continue;
                }
                let u_hat = delta / seg_len;
                segments.push(Segment {
                    start: pair[0],
                    u_hat,
                    t_hat: Vector2::new(u_hat.y, -u_hat.x),
                    length: seg_len,
                    offset,
                });
                offset += seg_len;
            }
            length = length.max(offset);
        }

        let frame = Self {
            projection,
            segments,
            reversed,
            b_hat,
            length,
            tolerance,
        };
        if frame.segments.is_empty() {
            warn!(edges = edges.len(), "no usable trace segment, GC2 coordinates are undefined");
        }
        debug!(
            segments = frame.segments.len(),
            reversed = frame.reversed.iter().filter(|r| **r).count(),
            length = frame.length,
            strike = frame.strike(),
            "gc2 frame"
        );
        frame
    }

    pub fn projection(&self) -> &LocalProjection {
        &self.projection
    }

    /// Total length (km) of the oriented trace.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Whether edge `index` runs against the common trace direction.
    pub fn is_reversed(&self, index: usize) -> bool {
        self.reversed.get(index).copied().unwrap_or(false)
    }

    /// Azimuth of the resultant trace direction, `[0, 360)`.
    pub fn strike(&self) -> f64 {
        normalize_azimuth(self.b_hat.x.atan2(self.b_hat.y).to_degrees())
    }

    /// `(T, U)` for every site.
    pub fn generalised_coordinates(&self, sites: &Mesh) -> (Vec<f64>, Vec<f64>) {
        sites
            .lons()
            .iter()
            .zip(sites.lats())
            .map(|(&lon, &lat)| self.coordinates_at(&self.projection.project(lon, lat)))
            .unzip()
    }

    pub fn rx_distance(&self, sites: &Mesh) -> Vec<f64> {
        self.generalised_coordinates(sites).0
    }

    pub fn ry0_distance(&self, sites: &Mesh) -> Vec<f64> {
        let (_, u) = self.generalised_coordinates(sites);
        u.into_iter()
            .map(|u| {
                if u < 0.0 {
                    -u
                } else if u > self.length {
                    u - self.length
                } else if u.is_nan() {
                    f64::NAN
                } else {
                    0.0
                }
            })
            .collect()
    }

    fn coordinates_at(&self, site: &Vector2<f64>) -> (f64, f64) {
        let mut sum_w = 0.0;
        let mut sum_wt = 0.0;
        let mut sum_wu = 0.0;
        for seg in &self.segments {
            let r = site - seg.start;
            let u = r.dot(&seg.u_hat);
            let t = r.dot(&seg.t_hat);
            let w = if self.tolerance.is_on_trace(t) {
                if (0.0..=seg.length).contains(&u) {
                    return (0.0, u + seg.offset);
                }
                1.0 / (u - seg.length) - 1.0 / u
            } else {
                (((seg.length - u) / t).atan() - (-u / t).atan()) / t
            };
            sum_w += w;
            sum_wt += w * t;
            sum_wu += w * (u + seg.offset);
        }
        if sum_w == 0.0 {
            return (f64::NAN, f64::NAN);
        }
        (sum_wt / sum_w, sum_wu / sum_w)
    }
}

/// Unit vector from the western to the eastern member of the farthest pair
/// of trace end points; due east when every end point coincides.
fn reference_axis(traces: &[Vec<Vector2<f64>>]) -> Vector2<f64> {
    let ends: Vec<Vector2<f64>> = traces
        .iter()
        .flat_map(|t| t.first().into_iter().chain(t.last()))
        .copied()
        .collect();
    let mut best = (0.0, Vector2::new(1.0, 0.0));
    for (i, a) in ends.iter().enumerate() {
        for b in &ends[i + 1..] {
            let d = (b - a).norm();
            if d > best.0 {
                let (west, east) = if (a.x, a.y) <= (b.x, b.y) { (a, b) } else { (b, a) };
                best = (d, (east - west) / d);
            }
        }
    }
    best.1
}

fn chord(trace: &[Vector2<f64>]) -> Vector2<f64> {
    match (trace.first(), trace.last()) {
        (Some(first), Some(last)) => last - first,
        _ => Vector2::zeros(),
    }
}
