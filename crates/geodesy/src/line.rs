use serde::{Deserialize, Serialize};

use crate::error::GeodesyError;
use crate::point::Point;

/// An ordered polyline of at least two points, e.g. a fault profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    points: Vec<Point>,
}

impl Line {
    pub fn new(points: Vec<Point>) -> Result<Self, GeodesyError> {
        if points.len() < 2 {
            return Err(GeodesyError::TooFewPoints {
                found: points.len(),
            });
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Total 3-D length (km).
    pub fn get_length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(&w[1])).sum()
    }

    /// Azimuth from the first to the last point.
    pub fn get_azimuth(&self) -> f64 {
        self.points[0].azimuth(&self.points[self.points.len() - 1])
    }

    /// Resample into `npoints` points equally spaced along the 3-D length.
    ///
    /// The first and last points are kept exactly.
    pub fn resample_to_num_points(&self, npoints: usize) -> Result<Self, GeodesyError> {
        if npoints < 2 {
            return Err(GeodesyError::TooFewPoints { found: npoints });
        }
        let mut cumulative = Vec::with_capacity(self.points.len());
        let mut total = 0.0;
        cumulative.push(0.0);
        for w in self.points.windows(2) {
            total += w[0].distance(&w[1]);
            cumulative.push(total);
        }

        let last = self.points.len() - 1;
        let mut resampled = Vec::with_capacity(npoints);
        let mut seg = 0;
        for k in 0..npoints {
            if k == npoints - 1 {
                resampled.push(self.points[last]);
                break;
            }
            let target = total * k as f64 / (npoints - 1) as f64;
            while seg < last - 1 && cumulative[seg + 1] < target {
                seg += 1;
            }
            let (a, b) = (self.points[seg], self.points[seg + 1]);
            let seg_len = cumulative[seg + 1] - cumulative[seg];
            let frac = if seg_len > 0.0 {
                ((target - cumulative[seg]) / seg_len).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let hdist = a.horizontal_distance(&b) * frac;
            let vdist = (b.depth - a.depth) * frac;
            resampled.push(if hdist > 0.0 {
                a.point_at(hdist, vdist, a.azimuth(&b))
            } else {
                Point::new(a.longitude, a.latitude, a.depth + vdist)
            });
        }
        Ok(Self { points: resampled })
    }
}
