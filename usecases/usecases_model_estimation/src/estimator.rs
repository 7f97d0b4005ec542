//! Robust Model Estimator
//!
//! [`ModelEstimator`] samples minimal subsets of the correspondences, hands
//! them to its kernel and keeps the model the data agrees with best:
//! - RANSAC: the model with the most correspondences under a reprojection
//!   threshold, stopping early once the outlier ratio makes further samples
//!   pointless
//! - LMeDS: the model with the smallest median error, needing no threshold
//!   but tolerating fewer than half outliers
//!
//! Both write the final inlier mask into the caller's buffer.

use entities_mat_types::{find_inliers, ransac_update_num_iters, CvPoint2D64f, EstimationError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::kernel::ModelKernel;
use crate::subset::check_subset;

/// Sampling attempts before a subset search gives up
pub const MAX_SUBSET_ATTEMPTS: usize = 300;

/// Outlier ratio LMeDS plans its iteration count for
pub const LMEDS_OUTLIER_RATIO: f64 = 0.45;

/// A model accepted by one of the drivers
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate<M> {
    pub model: M,
    /// Correspondences marked in the mask
    pub inliers: usize,
    /// Sampling iterations run
    pub iterations: i32,
}

/// Robust estimator around a [`ModelKernel`]
pub struct ModelEstimator<K: ModelKernel> {
    kernel: K,
    max_iters: i32,
    check_partial_subsets: bool,
    rng: StdRng,
}

impl<K: ModelKernel> ModelEstimator<K> {
    /// Estimator running at most `max_iters` RANSAC iterations, seeded from
    /// the OS
    pub fn new(kernel: K, max_iters: i32) -> Self {
        Self {
            kernel,
            max_iters,
            check_partial_subsets: true,
            rng: StdRng::from_entropy(),
        }
    }

    /// Restart sampling from `seed`
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Check degeneracy as each subset point is drawn (the default) rather
    /// than once the subset is complete
    pub fn set_check_partial_subsets(&mut self, partial: bool) {
        self.check_partial_subsets = partial;
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    pub fn max_iters(&self) -> i32 {
        self.max_iters
    }

    /// Score `model` and mark correspondences whose error is within
    /// `threshold`
    ///
    /// `err` receives the squared errors, `mask` 1 for inliers and 0
    /// otherwise. Returns the inlier count.
    pub fn find_inliers(
        &self,
        m1: &[CvPoint2D64f],
        m2: &[CvPoint2D64f],
        model: &K::Model,
        err: &mut [f32],
        mask: &mut [u8],
        threshold: f64,
    ) -> usize {
        self.kernel.compute_reproj_error(m1, m2, model, err);
        find_inliers(err, threshold, mask)
    }

    /// Draw a random subset of distinct correspondences into `ms1`/`ms2`
    ///
    /// The subset size is `ms1.len()`. Collinear subsets on either side are
    /// redrawn. Returns false when no acceptable subset turned up within
    /// `max_attempts`.
    pub fn get_subset(
        &mut self,
        m1: &[CvPoint2D64f],
        m2: &[CvPoint2D64f],
        ms1: &mut [CvPoint2D64f],
        ms2: &mut [CvPoint2D64f],
        max_attempts: usize,
    ) -> bool {
        let model_points = ms1.len().min(ms2.len());
        let count = m1.len().min(m2.len());
        if count < model_points {
            return false;
        }

        let mut idx = vec![0usize; model_points];
        let mut attempts = 0;
        let mut drawn = 0;

        while attempts < max_attempts {
            drawn = 0;
            while drawn < model_points && attempts < max_attempts {
                let pick = self.rng.gen_range(0..count);
                if idx[..drawn].contains(&pick) {
                    continue;
                }
                idx[drawn] = pick;
                ms1[drawn] = m1[pick];
                ms2[drawn] = m2[pick];
                if self.check_partial_subsets
                    && (!check_subset(&ms1[..=drawn], true) || !check_subset(&ms2[..=drawn], true))
                {
                    attempts += 1;
                    continue;
                }
                drawn += 1;
            }
            if !self.check_partial_subsets
                && drawn == model_points
                && (!check_subset(&ms1[..drawn], false) || !check_subset(&ms2[..drawn], false))
            {
                attempts += 1;
                continue;
            }
            break;
        }

        drawn == model_points && attempts < max_attempts
    }

    /// Fit with RANSAC
    ///
    /// A model is accepted once more than `model_points - 1` correspondences
    /// fall within `threshold`; each better model shortens the remaining
    /// iterations to reach `confidence`. `mask` is left untouched unless a
    /// model is found.
    ///
    /// # Errors
    /// `SizeMismatch` when `m2` or `mask` differ in length from `m1`;
    /// `OutOfRange` for a kernel with no model points.
    pub fn run_ransac(
        &mut self,
        m1: &[CvPoint2D64f],
        m2: &[CvPoint2D64f],
        mask: &mut [u8],
        threshold: f64,
        confidence: f64,
    ) -> Result<Option<Estimate<K::Model>>, EstimationError> {
        let count = m1.len();
        check_lengths(count, m2.len(), mask.len())?;
        let model_points = self.model_points()?;
        if count < model_points {
            return Ok(None);
        }

        let (mut ms1, mut ms2, mut niters) = self.subset_buffers(m1, m2, self.max_iters);
        let mut err = vec![0f32; count];
        let mut tmask = vec![0u8; count];
        let mut best: Option<K::Model> = None;
        let mut max_good = 0;

        let mut iter = 0;
        while iter < niters {
            if count > model_points && !self.get_subset(m1, m2, &mut ms1, &mut ms2, MAX_SUBSET_ATTEMPTS) {
                if iter == 0 {
                    debug!("no non-degenerate subset found");
                    return Ok(None);
                }
                break;
            }

            for model in self.kernel.run_kernel(&ms1, &ms2) {
                let good = self.find_inliers(m1, m2, &model, &mut err, &mut tmask, threshold);
                if good > max_good.max(model_points - 1) {
                    mask.copy_from_slice(&tmask);
                    best = Some(model);
                    max_good = good;
                    let outlier_ratio = (count - good) as f64 / count as f64;
                    niters = ransac_update_num_iters(confidence, outlier_ratio, model_points as i32, niters)?;
                    trace!(inliers = good, niters, "RANSAC model improved");
                }
            }
            iter += 1;
        }

        if iter == self.max_iters {
            debug!(iterations = iter, "RANSAC ran to the iteration limit");
        }

        Ok(best.map(|model| Estimate {
            model,
            inliers: max_good,
            iterations: iter,
        }))
    }

    /// Fit with least median of squares
    ///
    /// `max_iters` caps the iterations: positive as given, negative as a
    /// multiple of the correspondence count, zero as the count itself. The
    /// inlier threshold is derived from the best median; `mask` is written
    /// whenever any model was found, and the estimate is returned only when
    /// at least `model_points` correspondences agree.
    ///
    /// # Errors
    /// `SizeMismatch` when `m2` or `mask` differ in length from `m1`;
    /// `OutOfRange` for a kernel with no model points.
    pub fn run_lmeds(
        &mut self,
        m1: &[CvPoint2D64f],
        m2: &[CvPoint2D64f],
        mask: &mut [u8],
        confidence: f64,
        max_iters: i32,
    ) -> Result<Option<Estimate<K::Model>>, EstimationError> {
        let count = m1.len();
        check_lengths(count, m2.len(), mask.len())?;
        let model_points = self.model_points()?;
        if count < model_points {
            return Ok(None);
        }

        let count_i32 = i32::try_from(count).unwrap_or(i32::MAX);
        let max_iters = match max_iters {
            n if n > 0 => n,
            n if n < 0 => n.saturating_neg().saturating_mul(count_i32),
            _ => count_i32,
        };

        let (mut ms1, mut ms2, _) = self.subset_buffers(m1, m2, max_iters);
        let planned = ((1.0 - confidence).ln()
            / (1.0 - (1.0 - LMEDS_OUTLIER_RATIO).powi(model_points as i32)).ln())
        .round_ties_even() as i32;
        let niters = planned.max(3).min(max_iters);

        let mut err = vec![0f32; count];
        let mut sorted = vec![0f32; count];
        let mut best: Option<K::Model> = None;
        let mut min_median = f64::MAX;

        let mut iter = 0;
        while iter < niters {
            if count > model_points && !self.get_subset(m1, m2, &mut ms1, &mut ms2, MAX_SUBSET_ATTEMPTS) {
                if iter == 0 {
                    debug!("no non-degenerate subset found");
                    return Ok(None);
                }
                break;
            }

            for model in self.kernel.run_kernel(&ms1, &ms2) {
                self.kernel.compute_reproj_error(m1, m2, &model, &mut err);
                sorted.copy_from_slice(&err);
                sorted.sort_unstable_by(f32::total_cmp);
                let median = if count % 2 != 0 {
                    f64::from(sorted[count / 2])
                } else {
                    (f64::from(sorted[count / 2 - 1]) + f64::from(sorted[count / 2])) * 0.5
                };
                if median < min_median {
                    min_median = median;
                    best = Some(model);
                }
            }
            iter += 1;
        }

        let Some(model) = best else {
            return Ok(None);
        };

        let sigma = 2.5 * 1.4826 * (1.0 + 5.0 / (count - model_points) as f64) * min_median.sqrt();
        let sigma = sigma.max(0.001);
        let inliers = self.find_inliers(m1, m2, &model, &mut err, mask, sigma);
        trace!(median = min_median, sigma, inliers, "LMeDS finished");

        Ok((inliers >= model_points).then_some(Estimate {
            model,
            inliers,
            iterations: iter,
        }))
    }

    fn model_points(&self) -> Result<usize, EstimationError> {
        match self.kernel.model_points() {
            0 => Err(EstimationError::OutOfRange(
                "the number of model points should be positive".to_string(),
            )),
            n => Ok(n),
        }
    }

    // Subset buffers and iteration budget: a set no larger than one subset
    // is used whole, once
    fn subset_buffers(
        &self,
        m1: &[CvPoint2D64f],
        m2: &[CvPoint2D64f],
        max_iters: i32,
    ) -> (Vec<CvPoint2D64f>, Vec<CvPoint2D64f>, i32) {
        let model_points = self.kernel.model_points();
        if m1.len() > model_points {
            (
                vec![CvPoint2D64f::default(); model_points],
                vec![CvPoint2D64f::default(); model_points],
                max_iters,
            )
        } else {
            (m1.to_vec(), m2.to_vec(), 1)
        }
    }
}

fn check_lengths(count: usize, m2: usize, mask: usize) -> Result<(), EstimationError> {
    for actual in [m2, mask] {
        if actual != count {
            return Err(EstimationError::SizeMismatch { expected: count, actual });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Affine map `u = a x + b y + c`, `v = d x + e y + f` from three points
    struct AffineKernel;

    fn solve3(m: [[f64; 3]; 3], r: [f64; 3]) -> Option<[f64; 3]> {
        let det = |m: [[f64; 3]; 3]| {
            m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1]) - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
                + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
        };
        let d = det(m);
        if d.abs() < 1e-12 {
            return None;
        }
        let mut out = [0.0; 3];
        for (col, value) in out.iter_mut().enumerate() {
            let mut mc = m;
            for row in 0..3 {
                mc[row][col] = r[row];
            }
            *value = det(mc) / d;
        }
        Some(out)
    }

    impl ModelKernel for AffineKernel {
        type Model = [f64; 6];

        fn model_points(&self) -> usize {
            3
        }

        fn run_kernel(&self, m1: &[CvPoint2D64f], m2: &[CvPoint2D64f]) -> Vec<[f64; 6]> {
            let a = [
                [m1[0].x, m1[0].y, 1.0],
                [m1[1].x, m1[1].y, 1.0],
                [m1[2].x, m1[2].y, 1.0],
            ];
            let u = solve3(a, [m2[0].x, m2[1].x, m2[2].x]);
            let v = solve3(a, [m2[0].y, m2[1].y, m2[2].y]);
            match (u, v) {
                (Some(u), Some(v)) => vec![[u[0], u[1], u[2], v[0], v[1], v[2]]],
                _ => Vec::new(),
            }
        }

        fn compute_reproj_error(
            &self,
            m1: &[CvPoint2D64f],
            m2: &[CvPoint2D64f],
            model: &[f64; 6],
            err: &mut [f32],
        ) {
            for ((p, q), e) in m1.iter().zip(m2).zip(err.iter_mut()) {
                let du = model[0] * p.x + model[1] * p.y + model[2] - q.x;
                let dv = model[3] * p.x + model[4] * p.y + model[5] - q.y;
                *e = (du * du + dv * dv) as f32;
            }
        }
    }

    const TRUE_MODEL: [f64; 6] = [1.1, 0.2, 3.0, -0.1, 0.9, -2.0];

    fn apply(model: &[f64; 6], p: CvPoint2D64f) -> CvPoint2D64f {
        CvPoint2D64f::new(
            model[0] * p.x + model[1] * p.y + model[2],
            model[3] * p.x + model[4] * p.y + model[5],
        )
    }

    /// 20 exact correspondences followed by `outliers` displaced ones
    fn correspondences(outliers: usize) -> (Vec<CvPoint2D64f>, Vec<CvPoint2D64f>) {
        let m1: Vec<_> = (0..20 + outliers)
            .map(|i| CvPoint2D64f::new((i * 7 % 20) as f64 + 0.1 * i as f64, (i * i % 17) as f64))
            .collect();
        let m2 = m1
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let q = apply(&TRUE_MODEL, *p);
                if i >= 20 {
                    CvPoint2D64f::new(q.x + 40.0, q.y - 35.0)
                } else {
                    q
                }
            })
            .collect();
        (m1, m2)
    }

    fn assert_model_close(model: &[f64; 6]) {
        for (got, want) in model.iter().zip(TRUE_MODEL) {
            assert!((got - want).abs() < 1e-6, "{:?} vs {:?}", model, TRUE_MODEL);
        }
    }

    fn seeded(seed: u64) -> ModelEstimator<AffineKernel> {
        let mut estimator = ModelEstimator::new(AffineKernel, 1000);
        estimator.set_seed(seed);
        estimator
    }

    #[test]
    fn test_ransac_separates_outliers() {
        let (m1, m2) = correspondences(5);
        let mut mask = vec![0u8; m1.len()];
        let estimate = seeded(7)
            .run_ransac(&m1, &m2, &mut mask, 1.0, 0.99)
            .unwrap()
            .expect("model");

        assert_model_close(&estimate.model);
        assert_eq!(estimate.inliers, 20);
        assert!(mask[..20].iter().all(|&m| m == 1));
        assert!(mask[20..].iter().all(|&m| m == 0));
        assert!(estimate.iterations >= 1 && estimate.iterations < 1000);
    }

    #[test]
    fn test_lmeds_separates_outliers() {
        let (m1, m2) = correspondences(5);
        let mut mask = vec![0u8; m1.len()];
        let estimate = seeded(11)
            .run_lmeds(&m1, &m2, &mut mask, 0.99, 0)
            .unwrap()
            .expect("model");

        assert_model_close(&estimate.model);
        assert_eq!(estimate.inliers, 20);
        assert!(mask[20..].iter().all(|&m| m == 0));
    }

    #[test]
    fn test_lmeds_iteration_budget() {
        // ln(0.01) / ln(1 - 0.55^3) rounds to 25, matching the 25 points
        let (m1, m2) = correspondences(5);
        let mut mask = vec![0u8; m1.len()];
        let estimate = seeded(3).run_lmeds(&m1, &m2, &mut mask, 0.99, 0).unwrap().expect("model");
        assert_eq!(estimate.iterations, 25);

        let estimate = seeded(3).run_lmeds(&m1, &m2, &mut mask, 0.99, 4).unwrap().expect("model");
        assert_eq!(estimate.iterations, 4);
    }

    #[test]
    fn test_minimal_set_runs_once() {
        let m1 = vec![
            CvPoint2D64f::new(0.0, 0.0),
            CvPoint2D64f::new(4.0, 0.0),
            CvPoint2D64f::new(0.0, 3.0),
        ];
        let m2: Vec<_> = m1.iter().map(|p| apply(&TRUE_MODEL, *p)).collect();
        let mut mask = vec![0u8; 3];
        let estimate = seeded(1).run_ransac(&m1, &m2, &mut mask, 0.5, 0.99).unwrap().expect("model");
        assert_eq!(estimate.iterations, 1);
        assert_eq!(mask, vec![1, 1, 1]);
        assert_model_close(&estimate.model);
    }

    #[test]
    fn test_too_few_points() {
        let m1 = vec![CvPoint2D64f::new(0.0, 0.0), CvPoint2D64f::new(1.0, 0.0)];
        let mut mask = vec![7u8; 2];
        assert_eq!(seeded(1).run_ransac(&m1, &m1, &mut mask, 1.0, 0.99), Ok(None));
        assert_eq!(seeded(1).run_lmeds(&m1, &m1, &mut mask, 0.99, 0), Ok(None));
        assert_eq!(mask, vec![7, 7]);
    }

    #[test]
    fn test_length_mismatch() {
        let (m1, m2) = correspondences(0);
        let mut short = vec![0u8; 3];
        assert_eq!(
            seeded(1).run_ransac(&m1, &m2, &mut short, 1.0, 0.99),
            Err(EstimationError::SizeMismatch { expected: 20, actual: 3 })
        );
        let mut mask = vec![0u8; 20];
        assert!(seeded(1).run_lmeds(&m1, &m2[..19], &mut mask, 0.99, 0).is_err());
    }

    #[test]
    fn test_collinear_points_have_no_subset() {
        let m1: Vec<_> = (0..10).map(|i| CvPoint2D64f::new(i as f64, 2.0 * i as f64)).collect();
        let m2: Vec<_> = m1.iter().map(|p| apply(&TRUE_MODEL, *p)).collect();
        let mut estimator = seeded(5);
        let mut ms1 = [CvPoint2D64f::default(); 3];
        let mut ms2 = [CvPoint2D64f::default(); 3];
        assert!(!estimator.get_subset(&m1, &m2, &mut ms1, &mut ms2, MAX_SUBSET_ATTEMPTS));

        let mut mask = vec![0u8; 10];
        assert_eq!(estimator.run_ransac(&m1, &m2, &mut mask, 1.0, 0.99), Ok(None));
        assert!(mask.iter().all(|&m| m == 0));

        estimator.set_check_partial_subsets(false);
        assert!(!estimator.get_subset(&m1, &m2, &mut ms1, &mut ms2, MAX_SUBSET_ATTEMPTS));
    }

    #[test]
    fn test_subset_points_are_distinct() {
        let (m1, m2) = correspondences(0);
        let mut estimator = seeded(9);
        let mut ms1 = [CvPoint2D64f::default(); 3];
        let mut ms2 = [CvPoint2D64f::default(); 3];
        for _ in 0..50 {
            assert!(estimator.get_subset(&m1, &m2, &mut ms1, &mut ms2, MAX_SUBSET_ATTEMPTS));
            assert!(ms1[0] != ms1[1] && ms1[1] != ms1[2] && ms1[0] != ms1[2]);
            assert!(check_subset(&ms1, false));
            for (p, q) in ms1.iter().zip(&ms2) {
                let i = m1.iter().position(|m| m == p).unwrap();
                assert_eq!(m2[i], *q);
            }
        }
    }

    #[test]
    fn test_seed_reproduces_samples() {
        let (m1, m2) = correspondences(5);
        let draw = |seed: u64| {
            let mut estimator = seeded(seed);
            let mut ms1 = [CvPoint2D64f::default(); 3];
            let mut ms2 = [CvPoint2D64f::default(); 3];
            (0..10)
                .map(|_| {
                    assert!(estimator.get_subset(&m1, &m2, &mut ms1, &mut ms2, MAX_SUBSET_ATTEMPTS));
                    ms1
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(42), draw(42));
        assert_ne!(draw(42), draw(43));
    }

    #[test]
    fn test_zero_model_points_rejected() {
        struct Empty;
        impl ModelKernel for Empty {
            type Model = ();
            fn model_points(&self) -> usize {
                0
            }
            fn run_kernel(&self, _: &[CvPoint2D64f], _: &[CvPoint2D64f]) -> Vec<()> {
                Vec::new()
            }
            fn compute_reproj_error(&self, _: &[CvPoint2D64f], _: &[CvPoint2D64f], _: &(), _: &mut [f32]) {}
        }

        let points = [CvPoint2D64f::default(); 2];
        let mut mask = [0u8; 2];
        let mut estimator = ModelEstimator::new(Empty, 10);
        assert!(matches!(
            estimator.run_ransac(&points, &points, &mut mask, 1.0, 0.99),
            Err(EstimationError::OutOfRange(_))
        ));
    }
}
