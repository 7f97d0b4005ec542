//! Model Kernels

use entities_mat_types::CvPoint2D64f;

/// Solver for one kind of model from point correspondences `m1[i] -> m2[i]`
pub trait ModelKernel {
    type Model: Clone;

    /// Correspondences in a minimal subset
    fn model_points(&self) -> usize;

    /// Every model consistent with a minimal subset
    ///
    /// May return several solutions, or none for a degenerate subset.
    fn run_kernel(&self, m1: &[CvPoint2D64f], m2: &[CvPoint2D64f]) -> Vec<Self::Model>;

    /// Write the squared error of each correspondence under `model` into `err`
    fn compute_reproj_error(
        &self,
        m1: &[CvPoint2D64f],
        m2: &[CvPoint2D64f],
        model: &Self::Model,
        err: &mut [f32],
    );
}
