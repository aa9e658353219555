//! Spherical-earth geodetic primitives used by the fault surface engine.
//!
//! Longitudes and latitudes are decimal degrees, depths and distances are
//! kilometres, depth is positive downwards.

pub mod bbox;
pub mod error;
pub mod geodetic;
pub mod line;
pub mod point;
pub mod projection;

pub use bbox::BoundingBox;
pub use error::GeodesyError;
pub use geodetic::{
    azimuth, geodetic_distance, middle_point, npoints_between, npoints_towards, point_at,
    spherical_centroid, tangent_basis, to_cartesian,
};
pub use line::Line;
pub use point::Point;
pub use projection::LocalProjection;

/// Mean earth radius (km).
pub const EARTH_RADIUS: f64 = 6371.0;
