use serde::{Deserialize, Serialize};

use crate::point::Point;

/// Longitude/latitude extent in degrees.
///
/// Computed with plain min/max: boxes crossing the antimeridian are not
/// wrapped and come out spanning the whole longitude range in between.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
}

impl BoundingBox {
    pub fn new(west: f64, east: f64, south: f64, north: f64) -> Self {
        Self {
            west,
            east,
            south,
            north,
        }
    }

    /// The inverted box that any point expands.
    pub fn empty() -> Self {
        Self {
            west: f64::INFINITY,
            east: f64::NEG_INFINITY,
            south: f64::INFINITY,
            north: f64::NEG_INFINITY,
        }
    }

    /// Box enclosing every finite point; non-finite points are skipped.
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let mut bb = Self::empty();
        for p in points {
            bb.expand_to_include(p);
        }
        bb
    }

    pub fn expand_to_include(&mut self, p: &Point) {
        if !p.longitude.is_finite() || !p.latitude.is_finite() {
            return;
        }
        self.west = self.west.min(p.longitude);
        self.east = self.east.max(p.longitude);
        self.south = self.south.min(p.latitude);
        self.north = self.north.max(p.latitude);
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            west: self.west.min(other.west),
            east: self.east.max(other.east),
            south: self.south.min(other.south),
            north: self.north.max(other.north),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.west > self.east || self.south > self.north
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.west && lon <= self.east && lat >= self.south && lat <= self.north
    }

    /// Arithmetic centre `(lon, lat)`.
    pub fn middle(&self) -> (f64, f64) {
        ((self.west + self.east) * 0.5, (self.south + self.north) * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_skips_nan() {
        let pts = [
            Point::new(-70.5, 19.6, 0.0),
            Point::new(f64::NAN, 50.0, 0.0),
            Point::new(-70.1, 19.8, 10.0),
        ];
        let bb = BoundingBox::from_points(&pts);
        assert_eq!(bb, BoundingBox::new(-70.5, -70.1, 19.6, 19.8));
        assert!(bb.contains(-70.3, 19.7));
        assert!(!bb.contains(-70.3, 50.0));
    }

    #[test]
    fn test_empty_box() {
        let bb = BoundingBox::from_points(&[]);
        assert!(bb.is_empty());
        let other = BoundingBox::new(0.0, 1.0, 0.0, 1.0);
        assert_eq!(bb.union(&other), other);
    }

    #[test]
    fn test_union_and_middle() {
        let a = BoundingBox::new(0.0, 1.0, 0.0, 1.0);
        let b = BoundingBox::new(2.0, 3.0, -1.0, 0.5);
        let u = a.union(&b);
        assert_eq!(u, BoundingBox::new(0.0, 3.0, -1.0, 1.0));
        assert_eq!(u.middle(), (1.5, 0.0));
    }
}
