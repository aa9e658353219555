//! Structured fault meshes and flat site collections.

use fault_geodesy::{BoundingBox, Point, spherical_centroid};
use serde::{Deserialize, Serialize};

use crate::error::SurfaceError;

/// A structured grid of fault-surface nodes.
///
/// Rows run down-dip (row 0 is the shallowest), columns run along strike.
/// Nodes the mesh builder could not populate are `None`; every routine
/// below skips them.
#[derive(Debug, Clone, PartialEq)]
pub struct RectangularMesh {
    rows: usize,
    cols: usize,
    nodes: Vec<Option<Point>>,
}

impl RectangularMesh {
    /// Build a mesh from rows of optional nodes.
    ///
    /// Nodes with non-finite coordinates are stored as missing. Fails on
    /// ragged rows or when no node is valid.
    pub fn from_rows(rows: Vec<Vec<Option<Point>>>) -> Result<Self, SurfaceError> {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, Vec::len);
        if num_rows == 0 || num_cols == 0 {
            return Err(SurfaceError::EmptyMesh);
        }
        let mut nodes = Vec::with_capacity(num_rows * num_cols);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != num_cols {
                return Err(SurfaceError::RaggedMesh {
                    row,
                    expected: num_cols,
                    found: values.len(),
                });
            }
            nodes.extend(values.into_iter().map(|p| p.filter(Point::is_finite)));
        }
        if nodes.iter().all(Option::is_none) {
            return Err(SurfaceError::EmptyMesh);
        }
        Ok(Self {
            rows: num_rows,
            cols: num_cols,
            nodes,
        })
    }

    /// Build a mesh from complete rows; non-finite points become missing nodes.
    pub fn from_points(rows: Vec<Vec<Point>>) -> Result<Self, SurfaceError> {
        Self::from_rows(
            rows.into_iter()
                .map(|row| row.into_iter().map(Some).collect())
                .collect(),
        )
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Point> {
        if row < self.rows && col < self.cols {
            self.nodes[row * self.cols + col]
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> &[Option<Point>] {
        let start = row.min(self.rows) * self.cols;
        let end = (row + 1).min(self.rows) * self.cols;
        &self.nodes[start..end]
    }

    pub fn valid_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.nodes.iter().flatten().copied()
    }

    pub fn num_valid(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn lons(&self) -> Vec<Vec<f64>> {
        self.component(|p| p.longitude)
    }

    pub fn lats(&self) -> Vec<Vec<f64>> {
        self.component(|p| p.latitude)
    }

    pub fn depths(&self) -> Vec<Vec<f64>> {
        self.component(|p| p.depth)
    }

    fn component(&self, f: impl Fn(&Point) -> f64) -> Vec<Vec<f64>> {
        self.nodes
            .chunks(self.cols)
            .map(|row| row.iter().map(|n| n.as_ref().map_or(f64::NAN, &f)).collect())
            .collect()
    }

    /// Complete cells as `[top-left, top-right, bottom-right, bottom-left]`.
    pub fn cells(&self) -> impl Iterator<Item = [Point; 4]> + '_ {
        let rows = self.rows.saturating_sub(1);
        let cols = self.cols.saturating_sub(1);
        (0..rows).flat_map(move |r| {
            (0..cols).filter_map(move |c| {
                Some([
                    self.get(r, c)?,
                    self.get(r, c + 1)?,
                    self.get(r + 1, c + 1)?,
                    self.get(r + 1, c)?,
                ])
            })
        })
    }

    /// Pairs of adjacent valid nodes along rows and down columns.
    pub fn links(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let along = (0..self.rows).flat_map(move |r| {
            (0..self.cols.saturating_sub(1))
                .filter_map(move |c| Some((self.get(r, c)?, self.get(r, c + 1)?)))
        });
        let down = (0..self.rows.saturating_sub(1)).flat_map(move |r| {
            (0..self.cols).filter_map(move |c| Some((self.get(r, c)?, self.get(r + 1, c)?)))
        });
        along.chain(down)
    }

    /// First and last valid node of the shallowest row holding any.
    pub fn top_edge(&self) -> Option<(Point, Point)> {
        (0..self.rows).find_map(|r| {
            let row = self.row(r);
            let first = row.iter().flatten().next()?;
            let last = row.iter().rev().flatten().next()?;
            Some((*first, *last))
        })
    }

    pub fn get_bounding_box(&self) -> BoundingBox {
        let mut bb = BoundingBox::empty();
        for p in self.valid_points() {
            bb.expand_to_include(&p);
        }
        bb
    }

    /// Middle node of the grid.
    ///
    /// With an odd dimension the central row/column is used, with an even one
    /// the midpoint of the two central ones. Falls back to the centroid of the
    /// valid nodes when a central node is missing.
    pub fn get_middle_point(&self) -> Point {
        self.central_node()
            .or_else(|| spherical_centroid(self.valid_points()))
            .unwrap_or_else(|| Point::new(f64::NAN, f64::NAN, f64::NAN))
    }

    fn central_node(&self) -> Option<Point> {
        let mid = self.rows / 2;
        if self.rows % 2 == 1 {
            self.row_middle(mid)
        } else {
            let upper = self.row_middle(mid - 1)?;
            let lower = self.row_middle(mid)?;
            Some(upper.midpoint(&lower))
        }
    }

    fn row_middle(&self, row: usize) -> Option<Point> {
        let mid = self.cols / 2;
        if self.cols % 2 == 1 {
            self.get(row, mid)
        } else {
            let left = self.get(row, mid - 1)?;
            let right = self.get(row, mid)?;
            Some(left.midpoint(&right))
        }
    }

    /// Closed perimeter of the valid part of the mesh.
    ///
    /// Walks the top row left to right, the last valid node of every inner row
    /// downwards, the bottom row right to left and the first valid node of
    /// every inner row upwards, then repeats the starting node.
    pub fn boundary(&self) -> Vec<Point> {
        let spans: Vec<(usize, usize, usize)> = (0..self.rows)
            .filter_map(|r| {
                let row = self.row(r);
                let first = row.iter().position(Option::is_some)?;
                let last = row.iter().rposition(Option::is_some)?;
                Some((r, first, last))
            })
            .collect();
        let (Some(&(top, _, _)), Some(&(bottom, _, _))) = (spans.first(), spans.last()) else {
            return Vec::new();
        };

        let mut outline: Vec<Point> = self.row(top).iter().flatten().copied().collect();
        let inner = if spans.len() > 2 { &spans[1..spans.len() - 1] } else { &[][..] };
        outline.extend(inner.iter().filter_map(|&(r, _, last)| self.get(r, last)));
        if bottom != top {
            outline.extend(self.row(bottom).iter().rev().flatten().copied());
        }
        outline.extend(inner.iter().rev().filter_map(|&(r, first, _)| self.get(r, first)));
        if let Some(&start) = outline.first() {
            outline.push(start);
        }
        outline
    }
}

/// A flat collection of sites, index-aligned with every distance result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    lons: Vec<f64>,
    lats: Vec<f64>,
    depths: Vec<f64>,
}

impl Mesh {
    /// Sites at the earth surface.
    pub fn new(lons: Vec<f64>, lats: Vec<f64>) -> Result<Self, SurfaceError> {
        let depths = vec![0.0; lons.len()];
        Self::with_depths(lons, lats, depths)
    }

    pub fn with_depths(lons: Vec<f64>, lats: Vec<f64>, depths: Vec<f64>) -> Result<Self, SurfaceError> {
        if lons.len() != lats.len() || lons.len() != depths.len() {
            return Err(SurfaceError::LengthMismatch {
                lons: lons.len(),
                lats: lats.len(),
                depths: depths.len(),
            });
        }
        Ok(Self { lons, lats, depths })
    }

    pub fn from_points(points: &[Point]) -> Self {
        Self {
            lons: points.iter().map(|p| p.longitude).collect(),
            lats: points.iter().map(|p| p.latitude).collect(),
            depths: points.iter().map(|p| p.depth).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lons.is_empty()
    }

    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    pub fn depths(&self) -> &[f64] {
        &self.depths
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.lons
            .iter()
            .zip(&self.lats)
            .zip(&self.depths)
            .map(|((&lon, &lat), &depth)| Point::new(lon, lat, depth))
    }
}
