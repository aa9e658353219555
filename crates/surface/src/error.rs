use std::path::PathBuf;

use fault_geodesy::GeodesyError;
use thiserror::Error;

/// Failures building surfaces, meshes, or loading section files.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("a multi-surface needs at least one section")]
    EmptySurfaceList,

    #[error("mesh has no valid node")]
    EmptyMesh,

    #[error("mesh row {row} has {found} nodes, expected {expected}")]
    RaggedMesh {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("coordinate arrays differ in length: {lons} longitudes, {lats} latitudes, {depths} depths")]
    LengthMismatch {
        lons: usize,
        lats: usize,
        depths: usize,
    },

    #[error("planar corner {index} has non-finite coordinates")]
    NonFiniteCorner { index: usize },

    #[error("line {line}: expected 12 fields (4 corners x lon/lat/depth), found {found}")]
    CsvFieldCount { line: usize, found: usize },

    #[error("line {line}, field {field}: invalid number {value:?}")]
    CsvValue {
        line: usize,
        field: usize,
        value: String,
    },

    #[error("cannot read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Geodesy(#[from] GeodesyError),
}
