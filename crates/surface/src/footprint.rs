//! Fault meshes projected into a local km frame, and the distance kernels
//! evaluated against them.

use fault_geodesy::LocalProjection;
use nalgebra::{Vector2, Vector3};

use crate::mesh::{Mesh, RectangularMesh};

/// A mesh projected with a [`LocalProjection`] centred on its valid nodes.
///
/// Coordinates are `(x east, y north, z up)` in km. Missing nodes are
/// dropped: `cells` only holds complete cells, `links` every pair of
/// adjacent valid nodes and `nodes` every valid node, so meshes without a
/// single complete cell still answer distance queries.
#[derive(Debug, Clone)]
pub struct Footprint {
    projection: LocalProjection,
    nodes: Vec<Vector3<f64>>,
    links: Vec<(Vector3<f64>, Vector3<f64>)>,
    cells: Vec<[Vector3<f64>; 4]>,
}

impl Footprint {
    pub fn new(mesh: &RectangularMesh) -> Self {
        let projection = LocalProjection::centred_on(mesh.valid_points());
        let nodes = mesh.valid_points().map(|p| projection.project_point(&p)).collect();
        let links = mesh
            .links()
            .map(|(a, b)| (projection.project_point(&a), projection.project_point(&b)))
            .collect();
        let cells = mesh
            .cells()
            .map(|cell| cell.map(|p| projection.project_point(&p)))
            .collect();
        Self {
            projection,
            nodes,
            links,
            cells,
        }
    }

    pub fn projection(&self) -> &LocalProjection {
        &self.projection
    }

    /// Complete cells, vertices in mesh order (top-left, top-right,
    /// bottom-right, bottom-left).
    pub fn cells(&self) -> &[[Vector3<f64>; 4]] {
        &self.cells
    }

    pub fn cell_areas(&self) -> Vec<f64> {
        self.cells.iter().map(cell_area).collect()
    }

    pub fn cell_dips(&self) -> Vec<f64> {
        self.cells.iter().map(cell_dip).collect()
    }

    /// Horizontal distance from each site to the surface projection of the
    /// mesh; zero for sites above a cell.
    pub fn joyner_boore_distance(&self, sites: &Mesh) -> Vec<f64> {
        sites
            .lons()
            .iter()
            .zip(sites.lats())
            .map(|(&lon, &lat)| self.horizontal_distance(&self.projection.project(lon, lat)))
            .collect()
    }

    /// 3-D distance from each site, at its depth, to the mesh.
    pub fn min_distance(&self, sites: &Mesh) -> Vec<f64> {
        sites
            .points()
            .map(|site| self.spatial_distance(&self.projection.project_point(&site)))
            .collect()
    }

    fn horizontal_distance(&self, site: &Vector2<f64>) -> f64 {
        let inside = self.cells.iter().any(|cell| {
            let outline = cell.map(|v| v.xy());
            point_in_polygon(site, &outline)
        });
        if inside {
            return 0.0;
        }
        let to_links = self
            .links
            .iter()
            .map(|(a, b)| point_segment_distance_2d(site, &a.xy(), &b.xy()));
        let to_nodes = self.nodes.iter().map(|n| (n.xy() - site).norm());
        to_links.chain(to_nodes).fold(f64::INFINITY, f64::min)
    }

    fn spatial_distance(&self, site: &Vector3<f64>) -> f64 {
        let to_cells = self.cells.iter().flat_map(|c| {
            [(c[0], c[1], c[2]), (c[0], c[2], c[3])]
                .into_iter()
                .filter(|(a, b, c)| (b - a).cross(&(c - a)).norm_squared() > 0.0)
                .map(|(a, b, c)| (closest_point_on_triangle(site, &a, &b, &c) - site).norm())
        });
        let to_links = self
            .links
            .iter()
            .map(|(a, b)| point_segment_distance_3d(site, a, b));
        let to_nodes = self.nodes.iter().map(|n| (n - site).norm());
        to_cells.chain(to_links).chain(to_nodes).fold(f64::INFINITY, f64::min)
    }
}

/// Area of a cell split into the triangles (0, 1, 2) and (0, 2, 3).
pub fn cell_area(cell: &[Vector3<f64>; 4]) -> f64 {
    let d = cell[2] - cell[0];
    let first = (cell[1] - cell[0]).cross(&d).norm();
    let second = d.cross(&(cell[3] - cell[0])).norm();
    0.5 * (first + second)
}

/// Dip of a cell in degrees, from the normal spanned by its diagonals.
pub fn cell_dip(cell: &[Vector3<f64>; 4]) -> f64 {
    let normal = (cell[2] - cell[0]).cross(&(cell[3] - cell[1]));
    let norm = normal.norm();
    if norm == 0.0 {
        return f64::NAN;
    }
    (normal.z.abs() / norm).min(1.0).acos().to_degrees()
}

/// Winding-number inclusion test; points on an edge may go either way.
pub fn point_in_polygon(point: &Vector2<f64>, polygon: &[Vector2<f64>]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut winding: i32 = 0;
    for i in 0..n {
        let p1 = polygon[i];
        let p2 = polygon[(i + 1) % n];
        let cross = (p2.x - p1.x) * (point.y - p1.y) - (p2.y - p1.y) * (point.x - p1.x);
        if p1.y <= point.y {
            if p2.y > point.y && cross > 0.0 {
                winding += 1;
            }
        } else if p2.y <= point.y && cross < 0.0 {
            winding -= 1;
        }
    }
    winding != 0
}

pub fn point_segment_distance_2d(p: &Vector2<f64>, a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq == 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

pub fn point_segment_distance_3d(p: &Vector3<f64>, a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq == 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

/// Closest point to `p` on triangle `abc` (barycentric region tests).
///
/// The triangle must not be degenerate.
pub fn closest_point_on_triangle(
    p: &Vector3<f64>,
    a: &Vector3<f64>,
    b: &Vector3<f64>,
    c: &Vector3<f64>,
) -> Vector3<f64> {
    let ab = b - a;
    let ac = c - a;
    let ap = p - a;

    let d1 = ab.dot(&ap);
    let d2 = ac.dot(&ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return *a;
    }

    let bp = p - b;
    let d3 = ab.dot(&bp);
    let d4 = ac.dot(&bp);
    if d3 >= 0.0 && d4 <= d3 {
        return *b;
    }

    let vc = d1.mul_add(d4, -(d3 * d2));
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return a + ab * v;
    }

    let cp = p - c;
    let d5 = ab.dot(&cp);
    let d6 = ac.dot(&cp);
    if d6 >= 0.0 && d5 <= d6 {
        return *c;
    }

    let vb = d5.mul_add(d2, -(d1 * d6));
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return a + ac * w;
    }

    let va = d3.mul_add(d6, -(d5 * d4));
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return b + (c - b) * w;
    }

    let denom = 1.0 / (va + vb + vc);
    a + ab * (vb * denom) + ac * (vc * denom)
}
