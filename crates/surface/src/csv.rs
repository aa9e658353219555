//! Loading multi-surfaces from plain comma-separated section files.
//!
//! Each non-blank row holds one planar section as twelve numbers: longitude,
//! latitude and depth of the top-left, top-right, bottom-right and
//! bottom-left corners. There is no header; lines starting with `#` are
//! comments.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::error::SurfaceError;
use crate::multi::MultiSurface;
use crate::planar::PlanarSurface;
use crate::surface::FaultSurface;

const FIELDS: usize = 12;

/// Parse every section row of `text`.
pub fn parse_planes(text: &str) -> Result<Vec<PlanarSurface>, SurfaceError> {
    let mut planes = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let row = raw.trim();
        if row.is_empty() || row.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = row.split(',').map(str::trim).collect();
        if fields.len() != FIELDS {
            return Err(SurfaceError::CsvFieldCount {
                line,
                found: fields.len(),
            });
        }
        let mut values = [0.0; FIELDS];
        for (field, (slot, text)) in values.iter_mut().zip(&fields).enumerate() {
            *slot = text
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| SurfaceError::CsvValue {
                    line,
                    field: field + 1,
                    value: (*text).to_string(),
                })?;
        }
        planes.push(PlanarSurface::from_array(&values)?);
    }
    Ok(planes)
}

impl MultiSurface {
    /// One planar section per row of the file at `path`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self, SurfaceError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SurfaceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_csv_str(&text)
    }

    pub fn from_csv_str(text: &str) -> Result<Self, SurfaceError> {
        let planes = parse_planes(text)?;
        info!(sections = planes.len(), "parsed planar sections");
        Self::new(
            planes
                .into_iter()
                .map(|p| Arc::new(p) as Arc<dyn FaultSurface>)
                .collect(),
        )
    }
}
