//! Test harness for multi-section fault surfaces.
//!
//! Builds reference surfaces from down-dip profiles, verifies aggregate
//! geometry and distance invariants, and renders diagnostic reports.
//!
//! # Key Components
//!
//! - [`fixtures`]: Profile-to-mesh builder and standard reference sections
//! - [`oracle`]: Verification functions returning pass/fail verdicts
//! - [`report`]: Structured text and JSON surface descriptions
//! - [`helpers`]: Error type, site grids, float comparison
//! - [`assertions`]: Assertion helpers with diagnostics

pub mod assertions;
pub mod fixtures;
pub mod helpers;
pub mod oracle;
pub mod report;

pub use helpers::HarnessError;
pub use oracle::OracleVerdict;
pub use report::SurfaceReport;
