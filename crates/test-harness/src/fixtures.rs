//! Reference fault sections built from down-dip profiles.
//!
//! Profiles run from the top of the section to its bottom, ordered along
//! strike. They are resampled to a common number of rows and joined by
//! great-circle interpolation between neighbouring profiles.

use fault_geodesy::{npoints_between, npoints_towards, Line, Point};
use fault_surface::{MeshSurface, MultiSurface, RectangularMesh};

use crate::helpers::HarnessError;

/// Build a mesh from at least two profiles.
///
/// Rows are spaced about `vspacing` km down-dip (every profile gets the
/// number of rows the longest one needs); columns between two profiles are
/// spaced about `hspacing` km along their top points.
pub fn mesh_from_profiles(
    profiles: &[Line],
    vspacing: f64,
    hspacing: f64,
) -> Result<RectangularMesh, HarnessError> {
    if profiles.len() < 2 {
        return Err(HarnessError::Fixture {
            reason: format!("need at least two profiles, got {}", profiles.len()),
        });
    }
    if !(vspacing > 0.0 && hspacing > 0.0) {
        return Err(HarnessError::Fixture {
            reason: format!("spacings must be positive, got {vspacing} and {hspacing}"),
        });
    }

    let longest = profiles.iter().map(Line::get_length).fold(0.0, f64::max);
    let num_rows = (longest / vspacing).ceil().max(1.0) as usize + 1;
    let resampled = profiles
        .iter()
        .map(|p| p.resample_to_num_points(num_rows))
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows: Vec<Vec<Point>> = vec![Vec::new(); num_rows];
    for (k, pair) in resampled.windows(2).enumerate() {
        let (left, right) = (pair[0].points(), pair[1].points());
        let top_distance = left[0].horizontal_distance(&right[0]);
        let intervals = (top_distance / hspacing).round().max(1.0) as usize;
        let is_last = k + 2 == resampled.len();
        for (r, row) in rows.iter_mut().enumerate() {
            let mut strip = npoints_between(&left[r], &right[r], intervals + 1);
            if !is_last {
                strip.pop();
            }
            row.extend(strip);
        }
    }
    Ok(RectangularMesh::from_points(rows)?)
}

/// Copy of `mesh` with the listed `(row, column)` nodes removed.
pub fn punch_holes(
    mesh: &RectangularMesh,
    holes: &[(usize, usize)],
) -> Result<RectangularMesh, HarnessError> {
    let (rows, cols) = mesh.shape();
    if let Some(&(r, c)) = holes.iter().find(|(r, c)| *r >= rows || *c >= cols) {
        return Err(HarnessError::Fixture {
            reason: format!("hole ({r}, {c}) outside {rows}x{cols} mesh"),
        });
    }
    let grid = (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| {
                    if holes.contains(&(r, c)) {
                        None
                    } else {
                        mesh.get(r, c)
                    }
                })
                .collect()
        })
        .collect();
    Ok(RectangularMesh::from_rows(grid)?)
}

fn profile(top: Point, bottom: Point) -> Result<Line, HarnessError> {
    Ok(Line::new(vec![top, bottom])?)
}

/// Near-vertical section 0.3 degrees long on the equator, 20 km deep.
pub fn vertical_section() -> Result<MeshSurface, HarnessError> {
    let profiles = [0.0, 0.15, 0.3]
        .iter()
        .map(|&lon| profile(Point::surface(lon, 0.0), Point::new(lon, -0.00001, 20.0)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(MeshSurface::new(mesh_from_profiles(&profiles, 2.0, 2.0)?)?)
}

/// Section striking north-east from (0.32, 0), dipping 60 degrees south-east.
pub fn northeast_section() -> Result<MeshSurface, HarnessError> {
    let tops = npoints_towards(0.32, 0.0, 0.0, 45.0, 30.0, 0.0, 3);
    let (down, across) = (15.0 * 60f64.to_radians().sin(), 15.0 * 60f64.to_radians().cos());
    let profiles = tops
        .iter()
        .map(|top| profile(*top, top.point_at(across, down, 135.0)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(MeshSurface::new(mesh_from_profiles(&profiles, 2.0, 2.0)?)?)
}

fn north_dipping(east: f64, west: f64) -> Result<RectangularMesh, HarnessError> {
    let profiles = [east, (east + west) * 0.5, west]
        .iter()
        .map(|&lon| profile(Point::surface(lon, 0.0), Point::new(lon, 0.05, 10.0)))
        .collect::<Result<Vec<_>, _>>()?;
    mesh_from_profiles(&profiles, 2.0, 2.0)
}

/// Two westward sections dipping north, sharing the node at (0, 0), both
/// with missing nodes along their edges.
///
/// The first section runs from 0 to -0.2 degrees longitude and lacks its
/// top-left node; the second runs from 0.2 to 0 and lacks its last column
/// below the top row.
pub fn north_dipping_pair() -> Result<Vec<MeshSurface>, HarnessError> {
    let west = north_dipping(0.0, -0.2)?;
    let west = punch_holes(&west, &[(0, 0), (1, 0)])?;

    let east = north_dipping(0.2, 0.0)?;
    let (rows, cols) = east.shape();
    let holes: Vec<(usize, usize)> = (1..rows).map(|r| (r, cols - 1)).collect();
    let east = punch_holes(&east, &holes)?;

    Ok(vec![MeshSurface::new(west)?, MeshSurface::new(east)?])
}

/// Eastward section whose down-dip extent widens towards its centre, giving
/// a kite-shaped footprint south of the trace.
pub fn kite_section() -> Result<MeshSurface, HarnessError> {
    let profiles = [(0.0, -0.05, 10.0), (0.1, -0.1, 12.0), (0.2, -0.05, 10.0)]
        .iter()
        .map(|&(lon, lat, depth)| profile(Point::surface(lon, 0.0), Point::new(lon, lat, depth)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(MeshSurface::new(mesh_from_profiles(&profiles, 1.0, 1.0)?)?)
}

/// The vertical and north-east sections as one surface.
pub fn two_section_surface() -> Result<MultiSurface, HarnessError> {
    Ok(MultiSurface::from_surfaces([vertical_section()?, northeast_section()?])?)
}
