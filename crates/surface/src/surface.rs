use std::fmt::Debug;

use fault_geodesy::{BoundingBox, Point};

use crate::footprint::Footprint;
use crate::mesh::{Mesh, RectangularMesh};

/// Geometry every fault section exposes to [`MultiSurface`](crate::MultiSurface).
///
/// Implementors compute their scalars once at construction; the provided
/// methods derive everything else from the mesh and the footprint.
pub trait FaultSurface: Debug + Send + Sync {
    fn mesh(&self) -> &RectangularMesh;

    fn footprint(&self) -> &Footprint;

    /// Area in km².
    fn get_area(&self) -> f64;

    /// Down-dip width in km.
    fn get_width(&self) -> f64;

    /// Strike in degrees, `[0, 360)`.
    fn get_strike(&self) -> f64;

    /// Dip in degrees, `(0, 90]`.
    fn get_dip(&self) -> f64;

    /// First and last valid node of the shallowest populated row.
    fn top_edge(&self) -> (Point, Point);

    /// Mean depth of the top edge end points.
    fn get_top_edge_depth(&self) -> f64 {
        let (first, last) = self.top_edge();
        (first.depth + last.depth) * 0.5
    }

    fn get_bounding_box(&self) -> BoundingBox {
        self.mesh().get_bounding_box()
    }

    fn get_middle_point(&self) -> Point {
        self.mesh().get_middle_point()
    }

    /// Closed outline of the section as `(lons, lats)`.
    fn get_surface_boundaries(&self) -> (Vec<f64>, Vec<f64>) {
        self.mesh()
            .boundary()
            .into_iter()
            .map(|p| (p.longitude, p.latitude))
            .unzip()
    }

    fn get_joyner_boore_distance(&self, sites: &Mesh) -> Vec<f64> {
        self.footprint().joyner_boore_distance(sites)
    }

    fn get_min_distance(&self, sites: &Mesh) -> Vec<f64> {
        self.footprint().min_distance(sites)
    }
}
