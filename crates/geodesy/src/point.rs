use serde::{Deserialize, Serialize};

use crate::geodetic::{azimuth, geodetic_distance, middle_point, point_at};

/// A location on or below the earth surface.
///
/// Longitude and latitude in decimal degrees, depth in km (down-positive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub longitude: f64,
    pub latitude: f64,
    pub depth: f64,
}

impl Point {
    pub fn new(longitude: f64, latitude: f64, depth: f64) -> Self {
        Self {
            longitude,
            latitude,
            depth,
        }
    }

    /// A point on the earth surface (depth 0).
    pub fn surface(longitude: f64, latitude: f64) -> Self {
        Self::new(longitude, latitude, 0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.longitude.is_finite() && self.latitude.is_finite() && self.depth.is_finite()
    }

    /// Great-circle distance between the surface projections (km).
    pub fn horizontal_distance(&self, other: &Self) -> f64 {
        geodetic_distance(self.longitude, self.latitude, other.longitude, other.latitude)
    }

    /// Straight-line distance combining horizontal and depth separation (km).
    pub fn distance(&self, other: &Self) -> f64 {
        self.horizontal_distance(other).hypot(other.depth - self.depth)
    }

    /// Azimuth towards `other`, degrees in `[0, 360)`.
    pub fn azimuth(&self, other: &Self) -> f64 {
        azimuth(self.longitude, self.latitude, other.longitude, other.latitude)
    }

    /// Point at a horizontal distance along `azimuth`, shifted `vertical_increment` km down.
    pub fn point_at(&self, horizontal_distance: f64, vertical_increment: f64, azimuth: f64) -> Self {
        let (lon, lat) = point_at(self.longitude, self.latitude, azimuth, horizontal_distance);
        Self::new(lon, lat, self.depth + vertical_increment)
    }

    /// Geodetic midpoint, depth averaged.
    pub fn midpoint(&self, other: &Self) -> Self {
        let (lon, lat) = middle_point(self.longitude, self.latitude, other.longitude, other.latitude);
        Self::new(lon, lat, (self.depth + other.depth) * 0.5)
    }

    pub fn from_array(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}
