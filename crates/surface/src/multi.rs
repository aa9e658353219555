use std::sync::Arc;

use fault_geodesy::{BoundingBox, Line, Point};
use tracing::{debug, info, instrument, warn};

use crate::Tolerance;
use crate::error::SurfaceError;
use crate::gc2::Gc2Frame;
use crate::mesh::Mesh;
use crate::surface::FaultSurface;

/// An ordered collection of fault sections treated as one rupture surface.
///
/// Per-section areas, the edge set and the GC2 frame are computed once in
/// the constructor. Sections are shared through `Arc` and never mutated.
#[derive(Debug, Clone)]
pub struct MultiSurface {
    surfaces: Vec<Arc<dyn FaultSurface>>,
    areas: Vec<f64>,
    edge_set: Vec<Line>,
    gc2: Gc2Frame,
    tolerance: Tolerance,
}

impl MultiSurface {
    pub fn new(surfaces: Vec<Arc<dyn FaultSurface>>) -> Result<Self, SurfaceError> {
        Self::with_tolerance(surfaces, Tolerance::default())
    }

    #[instrument(skip(surfaces), fields(sections = surfaces.len()))]
    pub fn with_tolerance(
        surfaces: Vec<Arc<dyn FaultSurface>>,
        tolerance: Tolerance,
    ) -> Result<Self, SurfaceError> {
        if surfaces.is_empty() {
            return Err(SurfaceError::EmptySurfaceList);
        }
        let areas: Vec<f64> = surfaces.iter().map(|s| s.get_area()).collect();
        let edge_set = surfaces
            .iter()
            .map(|s| {
                let (first, last) = s.top_edge();
                Line::new(vec![first, last])
            })
            .collect::<Result<Vec<_>, _>>()?;
        let gc2 = Gc2Frame::build(&edge_set, tolerance);

        info!(
            sections = surfaces.len(),
            total_area = areas.iter().sum::<f64>(),
            trace_length = gc2.length(),
            "multi-surface assembled"
        );

        Ok(Self {
            surfaces,
            areas,
            edge_set,
            gc2,
            tolerance,
        })
    }

    /// Aggregate sections of a single concrete type.
    pub fn from_surfaces<S, I>(surfaces: I) -> Result<Self, SurfaceError>
    where
        S: FaultSurface + 'static,
        I: IntoIterator<Item = S>,
    {
        Self::new(
            surfaces
                .into_iter()
                .map(|s| Arc::new(s) as Arc<dyn FaultSurface>)
                .collect(),
        )
    }

    pub fn surfaces(&self) -> &[Arc<dyn FaultSurface>] {
        &self.surfaces
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    pub fn gc2(&self) -> &Gc2Frame {
        &self.gc2
    }

    /// Area of every section, in section order.
    pub fn get_areas(&self) -> &[f64] {
        &self.areas
    }

    pub fn get_area(&self) -> f64 {
        self.areas.iter().sum()
    }

    /// Area-weighted mean width.
    pub fn get_width(&self) -> f64 {
        self.area_weighted("width", |s| s.get_width())
    }

    /// Area-weighted mean dip.
    pub fn get_dip(&self) -> f64 {
        self.area_weighted("dip", |s| s.get_dip())
    }

    /// Area-weighted mean depth of the section top edges.
    pub fn get_top_edge_depth(&self) -> f64 {
        self.area_weighted("top edge depth", |s| s.get_top_edge_depth())
    }

    /// Bearing of the oriented aggregate trace, `[0, 360)`.
    pub fn get_strike(&self) -> f64 {
        self.gc2.strike()
    }

    /// Top edge of every section as a two-point line, in section order.
    pub fn edge_set(&self) -> &[Line] {
        &self.edge_set
    }

    pub fn get_bounding_box(&self) -> BoundingBox {
        self.surfaces
            .iter()
            .map(|s| s.get_bounding_box())
            .fold(BoundingBox::empty(), |acc, bb| acc.union(&bb))
    }

    /// Middle point of the first section.
    pub fn get_middle_point(&self) -> Point {
        self.surfaces[0].get_middle_point()
    }

    /// Closed outlines of all sections, concatenated in section order.
    pub fn get_surface_boundaries(&self) -> (Vec<f64>, Vec<f64>) {
        let mut lons = Vec::new();
        let mut lats = Vec::new();
        for s in &self.surfaces {
            let (x, y) = s.get_surface_boundaries();
            lons.extend(x);
            lats.extend(y);
        }
        (lons, lats)
    }

    /// Every valid mesh node of every section.
    pub fn mesh(&self) -> Mesh {
        let points: Vec<Point> = self
            .surfaces
            .iter()
            .flat_map(|s| s.mesh().valid_points())
            .collect();
        Mesh::from_points(&points)
    }

    #[instrument(skip_all, fields(sites = sites.len()))]
    pub fn get_joyner_boore_distance(&self, sites: &Mesh) -> Vec<f64> {
        self.pointwise_min(sites, |s| s.get_joyner_boore_distance(sites))
    }

    /// Rupture distance: closest 3-D approach of each site to any section.
    #[instrument(skip_all, fields(sites = sites.len()))]
    pub fn get_min_distance(&self, sites: &Mesh) -> Vec<f64> {
        self.pointwise_min(sites, |s| s.get_min_distance(sites))
    }

    /// GC2 `(T, U)` coordinates of every site.
    #[instrument(skip_all, fields(sites = sites.len()))]
    pub fn get_generalised_coordinates(&self, sites: &Mesh) -> (Vec<f64>, Vec<f64>) {
        self.gc2.generalised_coordinates(sites)
    }

    /// Strike-normal distance, positive on the hanging wall.
    #[instrument(skip_all, fields(sites = sites.len()))]
    pub fn get_rx_distance(&self, sites: &Mesh) -> Vec<f64> {
        self.gc2.rx_distance(sites)
    }

    /// Strike-parallel distance beyond the trace ends, zero alongside it.
    #[instrument(skip_all, fields(sites = sites.len()))]
    pub fn get_ry0_distance(&self, sites: &Mesh) -> Vec<f64> {
        self.gc2.ry0_distance(sites)
    }

    fn pointwise_min(&self, sites: &Mesh, distance: impl Fn(&dyn FaultSurface) -> Vec<f64>) -> Vec<f64> {
        let mut best = vec![f64::INFINITY; sites.len()];
        for surface in &self.surfaces {
            for (b, d) in best.iter_mut().zip(distance(surface.as_ref())) {
                *b = b.min(d);
            }
        }
        debug!(sites = sites.len(), sections = self.surfaces.len(), "pointwise minimum");
        best
    }

    fn area_weighted(&self, quantity: &str, value: impl Fn(&dyn FaultSurface) -> f64) -> f64 {
        let total = self.get_area();
        if total == 0.0 {
            warn!(quantity, "sections have zero total area");
            return f64::NAN;
        }
        self.surfaces
            .iter()
            .zip(&self.areas)
            .map(|(s, a)| value(s.as_ref()) * a)
            .sum::<f64>()
            / total
    }
}
