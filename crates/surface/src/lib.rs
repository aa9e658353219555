//! Multi-section fault surfaces and the seismological distance metrics
//! computed against them.
//!
//! A [`MultiSurface`] aggregates an ordered list of fault sections, each
//! implementing [`FaultSurface`], into one logical rupture surface. It
//! exposes aggregate geometry (area, width, dip, strike, bounding box,
//! boundary traces) and the Joyner-Boore, Rx, Ry0 and rupture distances to
//! an arbitrary site [`Mesh`].

pub mod csv;
pub mod error;
pub mod footprint;
pub mod gc2;
pub mod gridded;
pub mod mesh;
pub mod multi;
pub mod planar;
pub mod surface;

pub use error::SurfaceError;
pub use fault_geodesy::{BoundingBox, Line, Point};
pub use footprint::Footprint;
pub use gc2::Gc2Frame;
pub use gridded::MeshSurface;
pub use mesh::{Mesh, RectangularMesh};
pub use multi::MultiSurface;
pub use planar::PlanarSurface;
pub use surface::FaultSurface;

use serde::{Deserialize, Serialize};

/// Tolerances used by the distance calculations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Sites closer than this to a trace segment (km) are treated as lying on it.
    pub on_trace: f64,
    /// Trace segments shorter than this (km) are ignored.
    pub min_segment_length: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            on_trace: 1e-3,
            min_segment_length: 1e-6,
        }
    }
}

impl Tolerance {
    pub fn is_on_trace(&self, offset: f64) -> bool {
        offset.abs() < self.on_trace
    }

    pub fn is_degenerate_segment(&self, length: f64) -> bool {
        length < self.min_segment_length
    }
}
