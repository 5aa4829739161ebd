//! Modified Hausdorff distance between point sets
//!
//! The classical Hausdorff distance takes the worst-case nearest-neighbor
//! distance and is therefore dominated by single outlier points. The
//! modified form used here averages the nearest-neighbor distances in
//! each direction and takes the larger of the two directed results,
//! which is robust to outliers while remaining symmetric.
//!
//! The computation is exact: a full O(|A|*|B|) pairwise scan, no spatial
//! index or approximation. Classification correctness depends on exact
//! distances, and glyph point sets are small enough that the quadratic
//! scan is not a bottleneck.

use crate::pointset::PointSet;

/// Compute the modified Hausdorff distance between two point sets.
///
/// Defined as `max(d(A->B), d(B->A))` where the directed distance
/// `d(A->B)` is the mean over points of A of the Euclidean distance to
/// the nearest point of B. Symmetric by construction and zero for
/// identical sets; the triangle inequality is not guaranteed.
///
/// # Edge cases
///
/// * Both sets empty: 0.0 (identical degenerate inputs).
/// * Exactly one set empty: `f64::INFINITY`, so an empty set is
///   maximally dissimilar to every non-empty set.
///
/// # Examples
///
/// ```
/// use glyphmatch_core::{PointSet, metric::modified_hausdorff};
///
/// let a: PointSet = [(0.0, 0.0), (1.0, 0.0)].into_iter().collect();
/// let b: PointSet = [(0.0, 1.0), (1.0, 1.0)].into_iter().collect();
/// assert_eq!(modified_hausdorff(&a, &b), 1.0);
/// ```
pub fn modified_hausdorff(a: &PointSet, b: &PointSet) -> f64 {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => 0.0,
        (true, false) | (false, true) => f64::INFINITY,
        (false, false) => directed_mean_distance(a, b).max(directed_mean_distance(b, a)),
    }
}

/// Mean nearest-neighbor distance from every point of `from` to `to`.
///
/// Both sets must be non-empty. Minimization runs over squared
/// distances; the square root is taken once per source point.
fn directed_mean_distance(from: &PointSet, to: &PointSet) -> f64 {
    let mut total = 0.0f64;
    for (ax, ay) in from.iter() {
        let mut nearest_sq = f64::INFINITY;
        for (bx, by) in to.iter() {
            let dx = (ax - bx) as f64;
            let dy = (ay - by) as f64;
            let dist_sq = dx * dx + dy * dy;
            if dist_sq < nearest_sq {
                nearest_sq = dist_sq;
            }
        }
        total += nearest_sq.sqrt();
    }
    total / from.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(coords: &[(f32, f32)]) -> PointSet {
        coords.iter().copied().collect()
    }

    #[test]
    fn test_identical_sets_distance_zero() {
        let a = points(&[(0.0, 0.0), (3.0, 4.0), (-1.5, 2.0)]);
        assert_eq!(modified_hausdorff(&a, &a), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let a = points(&[(0.0, 0.0), (1.0, 1.0), (5.0, 2.0)]);
        let b = points(&[(2.0, 2.0), (-3.0, 1.0)]);
        assert_eq!(modified_hausdorff(&a, &b), modified_hausdorff(&b, &a));
    }

    #[test]
    fn test_non_negative() {
        let a = points(&[(0.0, 0.0), (-2.0, -7.0)]);
        let b = points(&[(10.0, 4.0)]);
        assert!(modified_hausdorff(&a, &b) >= 0.0);
    }

    #[test]
    fn test_both_empty_is_zero() {
        let empty = PointSet::new();
        assert_eq!(modified_hausdorff(&empty, &empty), 0.0);
    }

    #[test]
    fn test_one_empty_is_sentinel() {
        let empty = PointSet::new();
        let b = points(&[(1.0, 1.0)]);
        assert_eq!(modified_hausdorff(&empty, &b), f64::INFINITY);
        assert_eq!(modified_hausdorff(&b, &empty), f64::INFINITY);
    }

    #[test]
    fn test_parallel_segments() {
        // Every point of a is exactly 1.0 from its nearest point of b,
        // and vice versa, so both directed means are 1.0.
        let a = points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let b = points(&[(0.0, 1.0), (1.0, 1.0), (2.0, 1.0)]);
        assert_eq!(modified_hausdorff(&a, &b), 1.0);
    }

    #[test]
    fn test_directed_asymmetry_resolved_by_max() {
        // a -> b has mean (0 + 1) / 2 = 0.5; b -> a is 0 since b's only
        // point lies on a. The max picks the larger directed mean.
        let a = points(&[(0.0, 0.0), (1.0, 0.0)]);
        let b = points(&[(0.0, 0.0)]);
        assert_eq!(modified_hausdorff(&a, &b), 0.5);
    }

    #[test]
    fn test_outlier_is_averaged_not_dominant() {
        // Classical Hausdorff would report 10 (the outlier's distance);
        // the modified form averages it into the directed mean.
        let a = points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let mut with_outlier = a.clone();
        with_outlier.push(3.0, 10.0);
        let d = modified_hausdorff(&a, &with_outlier);
        assert!(d > 0.0);
        assert!(d < 10.0);
        assert_eq!(d, 10.0 / 5.0);
    }
}
