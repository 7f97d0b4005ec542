//! Robust Estimation Helpers
//!
//! Iteration-count and inlier bookkeeping shared by RANSAC-style model
//! estimators that run on top of the native matrices.

/// Number of RANSAC iterations still needed
///
/// Given the desired confidence `p` that at least one sample is outlier
/// free and the current outlier ratio `ep`, returns how many iterations are
/// required for a model of `model_points` points, capped at `max_iters`.
/// Both ratios are clamped into `[0, 1]`.
///
/// # Errors
/// `EstimationError::OutOfRange` when `model_points` is not positive.
pub fn ransac_update_num_iters(
    p: f64,
    ep: f64,
    model_points: i32,
    max_iters: i32,
) -> Result<i32, EstimationError> {
    if model_points <= 0 {
        return Err(EstimationError::OutOfRange(
            "the number of model points should be positive".to_string(),
        ));
    }

    let p = p.clamp(0.0, 1.0);
    let ep = ep.clamp(0.0, 1.0);

    let num = (1.0 - p).max(f64::MIN_POSITIVE);
    let denom = 1.0 - (1.0 - ep).powi(model_points);
    if denom < f64::MIN_POSITIVE {
        return Ok(0);
    }

    let num = num.ln();
    let denom = denom.ln();

    if denom >= 0.0 || -num >= f64::from(max_iters) * -denom {
        Ok(max_iters)
    } else {
        Ok((num / denom).round_ties_even() as i32)
    }
}

/// Mark inliers whose reprojection error is within `threshold`
///
/// Errors are compared against the squared threshold, as produced by
/// estimators that report squared distances. Writes 1 for inliers and 0 for
/// outliers into `mask` and returns the inlier count. Only the common prefix
/// of `errors` and `mask` is examined.
pub fn find_inliers(errors: &[f32], threshold: f64, mask: &mut [u8]) -> usize {
    let threshold = threshold * threshold;
    let mut good = 0;
    for (err, m) in errors.iter().zip(mask.iter_mut()) {
        let inlier = f64::from(*err) <= threshold;
        *m = u8::from(inlier);
        good += usize::from(inlier);
    }
    good
}

/// Estimation helper errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EstimationError {
    /// Argument outside its valid range
    OutOfRange(String),
    /// Point sets or masks that must be the same length are not
    SizeMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for EstimationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstimationError::OutOfRange(msg) => write!(f, "Out of range: {}", msg),
            EstimationError::SizeMismatch { expected, actual } => {
                write!(f, "Size mismatch: expected {} points, got {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for EstimationError {}
