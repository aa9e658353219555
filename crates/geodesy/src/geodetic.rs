//! Great-circle distance, azimuth and point projection on a spherical earth.

use std::f64::consts::PI;

use nalgebra::Vector3;

use crate::point::Point;
use crate::EARTH_RADIUS;

/// Great-circle distance (km) between two points, haversine formula.
pub fn geodetic_distance(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let (lon1, lat1) = (lon1.to_radians(), lat1.to_radians());
    let (lon2, lat2) = (lon2.to_radians(), lat2.to_radians());
    let h = ((lat1 - lat2) / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * ((lon1 - lon2) / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS * h.sqrt().min(1.0).asin()
}

/// Forward azimuth from the first point to the second, degrees in `[0, 360)`.
pub fn azimuth(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let (lon1, lat1) = (lon1.to_radians(), lat1.to_radians());
    let (lon2, lat2) = (lon2.to_radians(), lat2.to_radians());
    let cos_lat2 = lat2.cos();
    let true_course = ((lon1 - lon2).sin() * cos_lat2)
        .atan2(lat1.cos() * lat2.sin() - lat1.sin() * cos_lat2 * (lon1 - lon2).cos())
        .to_degrees();
    normalize_azimuth(360.0 - true_course)
}

/// Wrap an angle in degrees into `[0, 360)`.
pub fn normalize_azimuth(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Point reached travelling `distance` km from `(lon, lat)` along `azimuth`.
///
/// The returned longitude is wrapped into `[-180, 180)`.
pub fn point_at(lon: f64, lat: f64, azimuth: f64, distance: f64) -> (f64, f64) {
    let lon = lon.to_radians();
    let (sin_lat, cos_lat) = lat.to_radians().sin_cos();
    let tc = (360.0 - azimuth).to_radians();
    let (sin_dist, cos_dist) = (distance / EARTH_RADIUS).sin_cos();

    let sin_lats = (sin_lat * cos_dist + cos_lat * sin_dist * tc.cos()).clamp(-1.0, 1.0);
    let lats = sin_lats.asin();
    let dlon = (tc.sin() * sin_dist * cos_lat).atan2(cos_dist - sin_lat * sin_lats);
    let lons = (lon - dlon + PI).rem_euclid(2.0 * PI) - PI;
    (lons.to_degrees(), lats.to_degrees())
}

/// `npoints` points from an origin along an azimuth.
///
/// Points are equally spaced by `hdist / (npoints - 1)` horizontally and
/// `vdist / (npoints - 1)` vertically; the first one is the origin itself.
pub fn npoints_towards(
    lon: f64,
    lat: f64,
    depth: f64,
    azimuth: f64,
    hdist: f64,
    vdist: f64,
    npoints: usize,
) -> Vec<Point> {
    match npoints {
        0 => Vec::new(),
        1 => vec![Point::new(lon, lat, depth)],
        _ => {
            let steps = (npoints - 1) as f64;
            (0..npoints)
                .map(|i| {
                    if i == 0 {
                        return Point::new(lon, lat, depth);
                    }
                    let frac = i as f64 / steps;
                    let (plon, plat) = point_at(lon, lat, azimuth, hdist * frac);
                    Point::new(plon, plat, depth + vdist * frac)
                })
                .collect()
        }
    }
}

/// `npoints` points from `start` to `end` inclusive, both ends exact.
pub fn npoints_between(start: &Point, end: &Point, npoints: usize) -> Vec<Point> {
    let hdist = start.horizontal_distance(end);
    let vdist = end.depth - start.depth;
    let azim = start.azimuth(end);
    let mut points = npoints_towards(
        start.longitude,
        start.latitude,
        start.depth,
        azim,
        hdist,
        vdist,
        npoints,
    );
    if npoints > 1 {
        if let Some(last) = points.last_mut() {
            *last = *end;
        }
    }
    points
}

/// Geodetic midpoint of two surface points.
pub fn middle_point(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> (f64, f64) {
    if lon1 == lon2 && lat1 == lat2 {
        return (lon1, lat1);
    }
    let dist = geodetic_distance(lon1, lat1, lon2, lat2);
    let azim = azimuth(lon1, lat1, lon2, lat2);
    point_at(lon1, lat1, azim, dist / 2.0)
}

/// Centroid of a point cloud: mean of the unit vectors, mean depth.
///
/// Returns `None` when no finite point is supplied or the unit vectors
/// cancel out (e.g. two antipodal points).
pub fn spherical_centroid<I>(points: I) -> Option<Point>
where
    I: IntoIterator<Item = Point>,
{
    let mut sum = Vector3::zeros();
    let mut depth = 0.0;
    let mut count = 0usize;
    for p in points.into_iter().filter(Point::is_finite) {
        sum += unit_vector(p.longitude, p.latitude);
        depth += p.depth;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    let norm = sum.norm();
    if norm < 1e-12 {
        return None;
    }
    let v = sum / norm;
    let lat = v.z.clamp(-1.0, 1.0).asin().to_degrees();
    let lon = v.y.atan2(v.x).to_degrees();
    Some(Point::new(lon, lat, depth / count as f64))
}

/// Unit vector of a lon/lat pair on the sphere.
pub fn unit_vector(lon: f64, lat: f64) -> Vector3<f64> {
    let (sin_lon, cos_lon) = lon.to_radians().sin_cos();
    let (sin_lat, cos_lat) = lat.to_radians().sin_cos();
    Vector3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
}

/// Earth-centred Cartesian coordinates (km) of a point below the sphere.
pub fn to_cartesian(p: &Point) -> Vector3<f64> {
    unit_vector(p.longitude, p.latitude) * (EARTH_RADIUS - p.depth)
}

/// East, north and up unit vectors of the tangent plane at `(lon, lat)`.
pub fn tangent_basis(lon: f64, lat: f64) -> [Vector3<f64>; 3] {
    let (sin_lon, cos_lon) = lon.to_radians().sin_cos();
    let (sin_lat, cos_lat) = lat.to_radians().sin_cos();
    [
        Vector3::new(-sin_lon, cos_lon, 0.0),
        Vector3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat),
        Vector3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// One degree of arc on the reference sphere.
    const DEGREE_KM: f64 = EARTH_RADIUS * PI / 180.0;

    #[test]
    fn test_distance_along_equator() {
        let d = geodetic_distance(0.0, 0.0, 1.0, 0.0);
        assert_abs_diff_eq!(d, DEGREE_KM, epsilon = 1e-9);
    }

    #[test]
    fn test_distance_along_meridian() {
        let d = geodetic_distance(10.0, -0.5, 10.0, 0.5);
        assert_abs_diff_eq!(d, DEGREE_KM, epsilon = 1e-9);
    }

    #[test]
    fn test_distance_to_antipode() {
        let d = geodetic_distance(0.0, 0.0, 180.0, 0.0);
        assert_abs_diff_eq!(d, PI * EARTH_RADIUS, epsilon = 1e-6);
    }

    #[test]
    fn test_cardinal_azimuths() {
        assert_abs_diff_eq!(azimuth(0.0, 0.0, 0.0, 1.0), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(azimuth(0.0, 0.0, 1.0, 0.0), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(azimuth(0.0, 0.0, 0.0, -1.0), 180.0, epsilon = 1e-9);
        assert_abs_diff_eq!(azimuth(0.0, 0.0, -1.0, 0.0), 270.0, epsilon = 1e-9);
    }

    #[test]
    fn test_normalize_azimuth() {
        assert_abs_diff_eq!(normalize_azimuth(-90.0), 270.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_azimuth(720.0), 0.0, epsilon = 1e-12);
        assert!(normalize_azimuth(-1e-17) < 360.0);
    }

    #[test]
    fn test_point_at_inverts_distance_and_azimuth() {
        let (lon, lat) = point_at(12.0, 41.0, 37.0, 55.0);
        assert_abs_diff_eq!(geodetic_distance(12.0, 41.0, lon, lat), 55.0, epsilon = 1e-6);
        assert_abs_diff_eq!(azimuth(12.0, 41.0, lon, lat), 37.0, epsilon = 1e-6);
    }

    #[test]
    fn test_point_at_wraps_longitude() {
        let (lon, _) = point_at(179.9, 0.0, 90.0, 2.0 * DEGREE_KM * 0.1);
        assert!(lon < -179.0, "expected wrap to western hemisphere, got {lon}");
    }

    #[test]
    fn test_npoints_towards_spacing() {
        let pts = npoints_towards(0.32, 0.0, 0.0, 45.0, 10.0, 10.0, 3);
        assert_eq!(pts.len(), 3);
        assert_eq!(pts[0], Point::new(0.32, 0.0, 0.0));
        assert_abs_diff_eq!(pts[1].depth, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pts[2].depth, 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pts[0].horizontal_distance(&pts[2]), 10.0, epsilon = 1e-6);
    }

    #[test]
    fn test_npoints_between_hits_both_ends() {
        let a = Point::new(-70.1, 19.6, 0.0);
        let b = Point::new(-70.5, 19.7, 12.0);
        let pts = npoints_between(&a, &b, 5);
        assert_eq!(pts.first(), Some(&a));
        assert_eq!(pts.last(), Some(&b));
        assert_abs_diff_eq!(pts[2].depth, 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_middle_point_on_equator() {
        let (lon, lat) = middle_point(0.0, 0.0, 0.3, 0.0);
        assert_abs_diff_eq!(lon, 0.15, epsilon = 1e-9);
        assert_abs_diff_eq!(lat, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_centroid_of_symmetric_points() {
        let c = spherical_centroid([
            Point::new(-1.0, 0.0, 2.0),
            Point::new(1.0, 0.0, 4.0),
            Point::new(0.0, 1.0, 6.0),
            Point::new(0.0, -1.0, 8.0),
        ])
        .unwrap();
        assert_abs_diff_eq!(c.longitude, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.latitude, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.depth, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cartesian_shrinks_with_depth() {
        let top = to_cartesian(&Point::surface(90.0, 0.0));
        assert_abs_diff_eq!(top.y, EARTH_RADIUS, epsilon = 1e-9);
        let deep = to_cartesian(&Point::new(90.0, 0.0, 10.0));
        assert_abs_diff_eq!(deep.norm(), EARTH_RADIUS - 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_tangent_basis_is_orthonormal() {
        let [east, north, up] = tangent_basis(-118.0, 34.0);
        assert_abs_diff_eq!(east.cross(&north), up, epsilon = 1e-12);
        assert_abs_diff_eq!(up, unit_vector(-118.0, 34.0), epsilon = 1e-12);
        let [east, north, _] = tangent_basis(0.0, 0.0);
        assert_abs_diff_eq!(east, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(north, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_centroid_ignores_non_finite() {
        let c = spherical_centroid([Point::new(f64::NAN, 0.0, 0.0), Point::new(5.0, 5.0, 1.0)]).unwrap();
        assert_abs_diff_eq!(c.longitude, 5.0, epsilon = 1e-9);
        assert!(spherical_centroid(std::iter::empty()).is_none());
    }
}
