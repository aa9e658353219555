use fault_geodesy::geodetic::normalize_azimuth;
use fault_geodesy::{Point, spherical_centroid, tangent_basis, to_cartesian};
use nalgebra::Vector3;
use tracing::trace;

use crate::error::SurfaceError;
use crate::footprint::Footprint;
use crate::mesh::RectangularMesh;
use crate::surface::FaultSurface;

/// A quadrilateral fault section given by its four corners.
#[derive(Debug, Clone)]
pub struct PlanarSurface {
    corners: [Point; 4],
    mesh: RectangularMesh,
    footprint: Footprint,
    area: f64,
    width: f64,
    strike: f64,
    dip: f64,
}

impl PlanarSurface {
    /// Corners in the order top-left, top-right, bottom-right, bottom-left,
    /// looking at the section from the hanging wall.
    pub fn from_corner_points(
        top_left: Point,
        top_right: Point,
        bottom_right: Point,
        bottom_left: Point,
    ) -> Result<Self, SurfaceError> {
        let corners = [top_left, top_right, bottom_right, bottom_left];
        if let Some(index) = corners.iter().position(|c| !c.is_finite()) {
            return Err(SurfaceError::NonFiniteCorner { index });
        }
        let mesh = RectangularMesh::from_points(vec![
            vec![top_left, top_right],
            vec![bottom_left, bottom_right],
        ])?;
        let footprint = Footprint::new(&mesh);

        let local = corners.map(|c| footprint.projection().project_point(&c));
        let width = ((local[0] - local[3]).norm() + (local[1] - local[2]).norm()) * 0.5;

        let xyz = corners.map(|c| to_cartesian(&c));
        let normal = (xyz[2] - xyz[0]).cross(&(xyz[3] - xyz[1]));
        let area = normal.norm() * 0.5;
        let centre = spherical_centroid(corners).unwrap_or(top_left);
        let [east, north, up] = tangent_basis(centre.longitude, centre.latitude);
        let normal = Vector3::new(normal.dot(&east), normal.dot(&north), normal.dot(&up));
        let dip = if area > 0.0 { normal_dip(&normal) } else { f64::NAN };
        let strike = if dip > FLAT_DIP {
            normal_strike(&normal)
        } else {
            top_left.azimuth(&top_right)
        };
        trace!(area, width, strike, dip, "planar section");

        Ok(Self {
            corners,
            mesh,
            footprint,
            area,
            width,
            strike,
            dip,
        })
    }

    /// Twelve values: lon, lat, depth of each corner in
    /// [`from_corner_points`](Self::from_corner_points) order.
    pub fn from_array(values: &[f64; 12]) -> Result<Self, SurfaceError> {
        let corner = |i: usize| Point::from_array([values[3 * i], values[3 * i + 1], values[3 * i + 2]]);
        Self::from_corner_points(corner(0), corner(1), corner(2), corner(3))
    }

    pub fn corners(&self) -> &[Point; 4] {
        &self.corners
    }

    pub fn top_left(&self) -> Point {
        self.corners[0]
    }

    pub fn top_right(&self) -> Point {
        self.corners[1]
    }

    pub fn bottom_right(&self) -> Point {
        self.corners[2]
    }

    pub fn bottom_left(&self) -> Point {
        self.corners[3]
    }
}

impl FaultSurface for PlanarSurface {
    fn mesh(&self) -> &RectangularMesh {
        &self.mesh
    }

    fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    fn get_area(&self) -> f64 {
        self.area
    }

    fn get_width(&self) -> f64 {
        self.width
    }

    fn get_strike(&self) -> f64 {
        self.strike
    }

    fn get_dip(&self) -> f64 {
        self.dip
    }

    fn top_edge(&self) -> (Point, Point) {
        (self.corners[0], self.corners[1])
    }
}

/// Planes flatter than this (degrees) take their strike from the top edge.
const FLAT_DIP: f64 = 1e-3;

/// Angle between a plane normal (east, north, up) and the vertical.
fn normal_dip(normal: &Vector3<f64>) -> f64 {
    normal.xy().norm().atan2(normal.z.abs()).to_degrees()
}

/// Azimuth of the horizontal line of the plane that keeps the normal's
/// winding: corners listed top-left to top-right strike that way.
fn normal_strike(normal: &Vector3<f64>) -> f64 {
    normalize_azimuth(normal.y.atan2(-normal.x).to_degrees())
}
