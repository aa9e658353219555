use thiserror::Error;

/// Failures constructing geodetic value objects.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeodesyError {
    #[error("a line needs at least 2 points, found {found}")]
    TooFewPoints { found: usize },
}
