//! Degenerate Subset Detection

use entities_mat_types::CvPoint2D64f;

/// Whether `points` contains no three collinear points
///
/// With `last_only` only triples that include the final point are checked,
/// for subsets grown one point at a time. Tolerance scales with the
/// coordinate differences by `f32::EPSILON`.
pub fn check_subset(points: &[CvPoint2D64f], last_only: bool) -> bool {
    let Some(last) = points.len().checked_sub(1) else {
        return true;
    };
    let first = if last_only { last } else { 0 };
    let eps = f64::from(f32::EPSILON);

    for i in first..=last {
        let pi = points[i];
        for j in 0..i {
            let dx1 = points[j].x - pi.x;
            let dy1 = points[j].y - pi.y;
            for k in 0..j {
                let dx2 = points[k].x - pi.x;
                let dy2 = points[k].y - pi.y;
                if (dx2 * dy1 - dy2 * dx1).abs() <= eps * (dx1.abs() + dy1.abs() + dx2.abs() + dy2.abs()) {
                    return false;
                }
            }
        }
    }
    true
}
