//! Structured surface reports: plain text for reading, JSON for tooling.

use std::fmt;

use fault_geodesy::{BoundingBox, Point};
use fault_surface::{FaultSurface, Mesh, MultiSurface};
use serde::Serialize;

use crate::helpers::HarnessError;
use crate::oracle::{run_all_checks, OracleVerdict};

/// A complete description of a multi-surface.
#[derive(Debug, Clone, Serialize)]
pub struct SurfaceReport {
    pub sections: Vec<SectionEntry>,
    pub total_area: f64,
    pub width: f64,
    pub dip: f64,
    pub strike: f64,
    pub top_edge_depth: f64,
    pub trace_length: f64,
    pub bounding_box: BoundingBox,
    pub middle_point: Point,
    pub checks: Vec<OracleVerdict>,
}

/// A single section's report entry.
#[derive(Debug, Clone, Serialize)]
pub struct SectionEntry {
    pub index: usize,
    pub rows: usize,
    pub cols: usize,
    pub valid_nodes: usize,
    pub area: f64,
    pub width: f64,
    pub dip: f64,
    pub strike: f64,
    pub top_edge: [Point; 2],
    pub reversed: bool,
}

impl SurfaceReport {
    /// Describe `ms` and run every oracle against `sites`.
    pub fn build(ms: &MultiSurface, sites: &Mesh) -> Self {
        let sections = ms
            .surfaces()
            .iter()
            .enumerate()
            .map(|(index, s)| {
                let (rows, cols) = s.mesh().shape();
                let (first, last) = s.top_edge();
                SectionEntry {
                    index,
                    rows,
                    cols,
                    valid_nodes: s.mesh().num_valid(),
                    area: s.get_area(),
                    width: s.get_width(),
                    dip: s.get_dip(),
                    strike: s.get_strike(),
                    top_edge: [first, last],
                    reversed: ms.gc2().is_reversed(index),
                }
            })
            .collect();
        Self {
            sections,
            total_area: ms.get_area(),
            width: ms.get_width(),
            dip: ms.get_dip(),
            strike: ms.get_strike(),
            top_edge_depth: ms.get_top_edge_depth(),
            trace_length: ms.gc2().length(),
            bounding_box: ms.get_bounding_box(),
            middle_point: ms.get_middle_point(),
            checks: run_all_checks(ms, sites),
        }
    }

    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Format the report as text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Multi-Surface Report ===\n\n");

        out.push_str(&format!("Sections ({}):\n", self.sections.len()));
        for s in &self.sections {
            let rev = if s.reversed { " [REVERSED]" } else { "" };
            out.push_str(&format!(
                "  [{}] {}x{} mesh, {} valid nodes{}\n",
                s.index, s.rows, s.cols, s.valid_nodes, rev,
            ));
            out.push_str(&format!(
                "      area={:.3} km2 width={:.3} km dip={:.2} strike={:.2}\n",
                s.area, s.width, s.dip, s.strike,
            ));
            let [a, b] = s.top_edge;
            out.push_str(&format!(
                "      top edge ({:.4}, {:.4}, {:.2}) -> ({:.4}, {:.4}, {:.2})\n",
                a.longitude, a.latitude, a.depth, b.longitude, b.latitude, b.depth,
            ));
        }

        out.push_str(&format!(
            "\nAggregate: area={:.3} km2 width={:.3} km dip={:.2} strike={:.2} top depth={:.2} km\n",
            self.total_area, self.width, self.dip, self.strike, self.top_edge_depth,
        ));
        out.push_str(&format!("Trace length: {:.3} km\n", self.trace_length));

        let bb = &self.bounding_box;
        out.push_str(&format!(
            "Bounding Box: lon [{:.4}, {:.4}] lat [{:.4}, {:.4}]\n",
            bb.west, bb.east, bb.south, bb.north,
        ));
        let m = &self.middle_point;
        out.push_str(&format!(
            "Middle Point: ({:.4}, {:.4}, {:.2})\n",
            m.longitude, m.latitude, m.depth,
        ));

        if !self.checks.is_empty() {
            out.push_str(&format!("\nOracle Results ({} checks):\n", self.checks.len()));
            for v in &self.checks {
                let status = if v.passed { "PASS" } else { "FAIL" };
                out.push_str(&format!("  [{}] {}: {}\n", status, v.oracle_name, v.detail));
            }
        }

        out
    }

    pub fn to_json(&self) -> Result<String, HarnessError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for SurfaceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}
