use fault_geodesy::Point;
use fault_geodesy::geodetic::normalize_azimuth;
use tracing::trace;

use crate::error::SurfaceError;
use crate::footprint::Footprint;
use crate::mesh::RectangularMesh;
use crate::surface::FaultSurface;

/// A fault section described by a pre-built, possibly holed, mesh.
#[derive(Debug, Clone)]
pub struct MeshSurface {
    mesh: RectangularMesh,
    footprint: Footprint,
    top_edge: (Point, Point),
    area: f64,
    width: f64,
    strike: f64,
    dip: f64,
}

impl MeshSurface {
    pub fn new(mesh: RectangularMesh) -> Result<Self, SurfaceError> {
        let top_edge = mesh.top_edge().ok_or(SurfaceError::EmptyMesh)?;
        let footprint = Footprint::new(&mesh);

        let areas = footprint.cell_areas();
        let area: f64 = areas.iter().sum();
        let dip = weighted_dip(&areas, &footprint.cell_dips());
        let width = mean_column_length(&mesh);
        let strike = mean_strike(&mesh).unwrap_or_else(|| top_edge.0.azimuth(&top_edge.1));
        trace!(area, width, strike, dip, cells = areas.len(), "mesh section");

        Ok(Self {
            mesh,
            footprint,
            top_edge,
            area,
            width,
            strike,
            dip,
        })
    }
}

impl FaultSurface for MeshSurface {
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
        self.top_edge
    }
}

fn weighted_dip(areas: &[f64], dips: &[f64]) -> f64 {
    let (sum, weight) = areas
        .iter()
        .zip(dips)
        .filter(|(_, d)| d.is_finite())
        .fold((0.0, 0.0), |(s, w), (a, d)| (s + a * d, w + a));
    if weight > 0.0 { sum / weight } else { f64::NAN }
}

/// Mean over columns of the down-dip length through their valid nodes.
fn mean_column_length(mesh: &RectangularMesh) -> f64 {
    let (rows, cols) = mesh.shape();
    let lengths: Vec<f64> = (0..cols)
        .map(|c| {
            let column: Vec<Point> = (0..rows).filter_map(|r| mesh.get(r, c)).collect();
            column.windows(2).map(|w| w[0].distance(&w[1])).sum::<f64>()
        })
        .filter(|len| *len > 0.0)
        .collect();
    if lengths.is_empty() {
        return f64::NAN;
    }
    lengths.iter().sum::<f64>() / lengths.len() as f64
}

/// Length-weighted circular mean of the along-row segment azimuths.
fn mean_strike(mesh: &RectangularMesh) -> Option<f64> {
    let (rows, cols) = mesh.shape();
    let (mut east, mut north) = (0.0, 0.0);
    for r in 0..rows {
        for c in 1..cols {
            let (Some(a), Some(b)) = (mesh.get(r, c - 1), mesh.get(r, c)) else {
                continue;
            };
            let length = a.horizontal_distance(&b);
            let (sin, cos) = a.azimuth(&b).to_radians().sin_cos();
            east += length * sin;
            north += length * cos;
        }
    }
    if east == 0.0 && north == 0.0 {
        return None;
    }
    Some(normalize_azimuth(east.atan2(north).to_degrees()))
}
