use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::geodetic::{azimuth, geodetic_distance, point_at, spherical_centroid};
use crate::point::Point;

/// Azimuthal equidistant projection centred on a reference point.
///
/// Maps lon/lat to a local plane in km with `x` pointing east and `y` north
/// at the centre. Distance and azimuth from the centre are preserved, so the
/// projection stays usable for sites anywhere except the antipode of the
/// centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalProjection {
    pub lon0: f64,
    pub lat0: f64,
}

impl LocalProjection {
    pub fn new(lon0: f64, lat0: f64) -> Self {
        Self { lon0, lat0 }
    }

    /// Projection centred on the spherical centroid of `points`.
    ///
    /// Points straddling the antimeridian are centred where they lie. Falls
    /// back to the bounding box middle when the centroid is undefined.
    pub fn centred_on<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let points: Vec<Point> = points.into_iter().collect();
        match spherical_centroid(points.iter().copied()) {
            Some(c) => Self::new(c.longitude, c.latitude),
            None => {
                let (lon, lat) = BoundingBox::from_points(&points).middle();
                Self::new(lon, lat)
            }
        }
    }

    pub fn project(&self, lon: f64, lat: f64) -> Vector2<f64> {
        let dist = geodetic_distance(self.lon0, self.lat0, lon, lat);
        if dist == 0.0 {
            return Vector2::zeros();
        }
        let (sin_az, cos_az) = azimuth(self.lon0, self.lat0, lon, lat).to_radians().sin_cos();
        Vector2::new(dist * sin_az, dist * cos_az)
    }

    /// Project a point into the local 3-D frame, `z` up (negative depth).
    pub fn project_point(&self, p: &Point) -> Vector3<f64> {
        let xy = self.project(p.longitude, p.latitude);
        Vector3::new(xy.x, xy.y, -p.depth)
    }

    pub fn unproject(&self, xy: &Vector2<f64>) -> (f64, f64) {
        let dist = xy.norm();
        if dist == 0.0 {
            return (self.lon0, self.lat0);
        }
        let azim = xy.x.atan2(xy.y).to_degrees();
        point_at(self.lon0, self.lat0, azim, dist)
    }
}
