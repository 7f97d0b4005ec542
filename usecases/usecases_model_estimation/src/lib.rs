//! Use Cases Layer: Model Estimation
//!
//! Robust fitting of a geometric model to point correspondences. A
//! [`ModelKernel`] solves for candidate models from a minimal subset and
//! scores every correspondence against a model; [`ModelEstimator`] drives
//! it with RANSAC or least-median-of-squares.
//!
//! ## Modules
//!
//! - **[`kernel`]**: the per-model solver trait
//! - **[`subset`]**: degenerate (collinear) subset detection
//! - **[`estimator`]**: subset sampling and the RANSAC / LMeDS drivers
//!
//! ## Architecture
//!
//! Depends only on `entities_mat_types` for the point type, the iteration
//! update and the inlier test. Sampling uses a seedable `rand::rngs::StdRng`
//! so runs can be reproduced with [`ModelEstimator::set_seed`].
//!
//! ## See Also
//!
//! - [`entities_mat_types`](../../entities/entities_mat_types/index.html): `ransac_update_num_iters`, `find_inliers`

pub mod estimator;
pub mod kernel;
pub mod subset;

pub use estimator::{Estimate, ModelEstimator, LMEDS_OUTLIER_RATIO, MAX_SUBSET_ATTEMPTS};
pub use kernel::ModelKernel;
pub use subset::check_subset;
