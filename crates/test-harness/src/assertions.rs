//! Assertion helpers with diagnostic output.
//!
//! Every failure includes the context label, expected vs actual and the
//! tolerance that was exceeded.

use fault_geodesy::BoundingBox;
use fault_surface::MultiSurface;

use crate::helpers::{relative_error, HarnessError};
use crate::oracle::OracleVerdict;

/// Assert `actual` is within `rel_tol` relative error of `expected`.
pub fn assert_close(actual: f64, expected: f64, rel_tol: f64, ctx: &str) -> Result<(), HarnessError> {
    let err = relative_error(actual, expected);
    if err <= rel_tol {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected {:.6}, got {:.6} (rel err {:.2e} > {:.2e})",
                ctx, expected, actual, err, rel_tol,
            ),
        })
    }
}

/// Assert `actual` is within `tol` degrees of `expected` on the circle.
pub fn assert_azimuth_close(actual: f64, expected: f64, tol: f64, ctx: &str) -> Result<(), HarnessError> {
    let diff = (actual - expected).rem_euclid(360.0);
    let diff = diff.min(360.0 - diff);
    if diff <= tol {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected azimuth {:.3}, got {:.3} (off by {:.3} > {})",
                ctx, expected, actual, diff, tol,
            ),
        })
    }
}

/// Assert the bounding box matches expected bounds within `tol` degrees.
pub fn assert_bbox_bounds(
    ms: &MultiSurface,
    expected: &BoundingBox,
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let actual = ms.get_bounding_box();
    let sides = [
        ("west", actual.west, expected.west),
        ("east", actual.east, expected.east),
        ("south", actual.south, expected.south),
        ("north", actual.north, expected.north),
    ];
    for (side, got, want) in sides {
        if (got - want).abs() > tol {
            return Err(HarnessError::AssertionFailed {
                detail: format!(
                    "[{}] bounding box {}: expected {:.6}, got {:.6} (tol={})",
                    ctx, side, want, got, tol,
                ),
            });
        }
    }
    Ok(())
}

/// Assert every verdict passed, listing all failures otherwise.
pub fn assert_all_passed(verdicts: &[OracleVerdict], ctx: &str) -> Result<(), HarnessError> {
    let failures: Vec<String> = verdicts
        .iter()
        .filter(|v| !v.passed)
        .map(|v| format!("{}: {}", v.oracle_name, v.detail))
        .collect();
    if failures.is_empty() {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!("[{}] {} failed checks: {}", ctx, failures.len(), failures.join("; ")),
        })
    }
}
