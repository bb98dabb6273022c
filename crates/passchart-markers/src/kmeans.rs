//! Seeded k-means over pixel positions.
//!
//! k-means++ seeding followed by Lloyd refinement, repeated `n_init` times
//! from one deterministic random stream; the run with the lowest inertia is
//! kept. Equal inputs and parameters always give equal centroids.

use crate::params::KMeansParams;
use log::{trace, warn};
use passchart_core::PixelPoint;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Best partition found.
#[derive(Clone, Debug)]
pub struct KMeansResult {
    pub centroids: Vec<PixelPoint>,
    /// Cluster index per input point.
    pub labels: Vec<usize>,
    /// Sum of squared distances to assigned centroids.
    pub inertia: f64,
}

/// Partition `points` into `k` clusters.
///
/// Returns `None` when `k == 0` or there are fewer points than clusters.
/// Callers are expected to pass distinct points.
pub fn kmeans(points: &[PixelPoint], k: usize, params: &KMeansParams) -> Option<KMeansResult> {
    if k == 0 || points.len() < k {
        warn!("k-means: k = {k}, n = {}", points.len());
        return None;
    }

    let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
    let mut best: Option<KMeansResult> = None;

    for run in 0..params.n_init.max(1) {
        let seeds = plus_plus_seeds(points, k, &mut rng);
        let result = lloyd(points, seeds, params.max_iters);
        trace!("k-means run {run}: inertia {:.3}", result.inertia);
        if best.as_ref().is_none_or(|b| result.inertia < b.inertia) {
            best = Some(result);
        }
    }

    best
}

/// k-means++ seeding: first center uniform, the rest drawn with probability
/// proportional to squared distance from the nearest chosen center.
fn plus_plus_seeds(points: &[PixelPoint], k: usize, rng: &mut ChaCha8Rng) -> Vec<PixelPoint> {
    let mut centers = Vec::with_capacity(k);
    centers.push(points[rng.gen_range(0..points.len())]);

    let mut d2: Vec<f64> = points.iter().map(|p| p.distance_sq(&centers[0])).collect();

    while centers.len() < k {
        let total: f64 = d2.iter().sum();
        let next = if total > 0.0 {
            let mut target = rng.gen::<f64>() * total;
            let mut chosen = None;
            for (i, &d) in d2.iter().enumerate() {
                if d <= 0.0 {
                    continue;
                }
                if target < d {
                    chosen = Some(i);
                    break;
                }
                target -= d;
            }
            // Rounding can run past the end; take the last candidate.
            chosen.or_else(|| d2.iter().rposition(|&d| d > 0.0)).unwrap_or(0)
        } else {
            rng.gen_range(0..points.len())
        };

        let c = points[next];
        centers.push(c);
        for (slot, p) in d2.iter_mut().zip(points) {
            *slot = slot.min(p.distance_sq(&c));
        }
    }

    centers
}

fn nearest(p: &PixelPoint, centers: &[PixelPoint]) -> (usize, f64) {
    let mut best = (0usize, f64::INFINITY);
    for (i, c) in centers.iter().enumerate() {
        let d = p.distance_sq(c);
        if d < best.1 {
            best = (i, d);
        }
    }
    best
}

fn lloyd(points: &[PixelPoint], mut centers: Vec<PixelPoint>, max_iters: usize) -> KMeansResult {
    let k = centers.len();
    let mut labels = vec![usize::MAX; points.len()];

    for _ in 0..max_iters.max(1) {
        // Assignment step.
        let mut changed = false;
        for (label, p) in labels.iter_mut().zip(points) {
            let (c, _) = nearest(p, &centers);
            if *label != c {
                *label = c;
                changed = true;
            }
        }
        if !changed {
            break;
        }

        // Update step.
        let mut sums = vec![(0.0f64, 0.0f64, 0usize); k];
        for (&l, p) in labels.iter().zip(points) {
            sums[l].0 += p.row;
            sums[l].1 += p.col;
            sums[l].2 += 1;
        }
        for (c, &(sr, sc, n)) in sums.iter().enumerate() {
            if n > 0 {
                centers[c] = PixelPoint::new(sr / n as f64, sc / n as f64);
            }
        }

        // Re-seed empty clusters at the point farthest from its center.
        for c in 0..k {
            if sums[c].2 > 0 {
                continue;
            }
            let far = points
                .iter()
                .enumerate()
                .map(|(i, p)| (i, p.distance_sq(&centers[labels[i]])))
                .fold((0usize, -1.0f64), |acc, x| if x.1 > acc.1 { x } else { acc });
            centers[c] = points[far.0];
            labels[far.0] = c;
        }
    }

    let inertia = labels
        .iter()
        .zip(points)
        .map(|(&l, p)| p.distance_sq(&centers[l]))
        .sum();

    KMeansResult {
        centroids: centers,
        labels,
        inertia,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn square(row: f64, col: f64, half: i32) -> Vec<PixelPoint> {
        let mut v = Vec::new();
        for dr in -half..=half {
            for dc in -half..=half {
                v.push(PixelPoint::new(row + dr as f64, col + dc as f64));
            }
        }
        v
    }

    fn sorted(mut c: Vec<PixelPoint>) -> Vec<PixelPoint> {
        c.sort_by(|a, b| a.row.total_cmp(&b.row).then(a.col.total_cmp(&b.col)));
        c
    }

    #[test]
    fn finds_separated_blobs() {
        let mut pts = square(100.0, 100.0, 3);
        pts.extend(square(300.0, 500.0, 3));
        pts.extend(square(50.0, 900.0, 2));

        let res = kmeans(&pts, 3, &KMeansParams::default()).unwrap();
        let c = sorted(res.centroids);
        assert_abs_diff_eq!(c[0].row, 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c[0].col, 900.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c[1].row, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c[2].col, 500.0, epsilon = 1e-9);
        assert_abs_diff_eq!(res.inertia, 2.0 * 392.0 + 100.0, epsilon = 1e-9);
    }

    #[test]
    fn is_deterministic() {
        let mut pts = square(10.0, 10.0, 4);
        pts.extend(square(14.0, 22.0, 4));
        let p = KMeansParams::default();
        let a = kmeans(&pts, 2, &p).unwrap();
        let b = kmeans(&pts, 2, &p).unwrap();
        assert_eq!(a.centroids, b.centroids);
        assert_eq!(a.labels, b.labels);
    }

    #[test]
    fn k_equal_to_point_count() {
        let pts = vec![PixelPoint::new(0.0, 0.0), PixelPoint::new(5.0, 5.0)];
        let res = kmeans(&pts, 2, &KMeansParams::default()).unwrap();
        assert_abs_diff_eq!(res.inertia, 0.0);
        assert_ne!(res.labels[0], res.labels[1]);
    }

    #[test]
    fn rejects_too_few_points() {
        let pts = vec![PixelPoint::new(0.0, 0.0)];
        assert!(kmeans(&pts, 2, &KMeansParams::default()).is_none());
        assert!(kmeans(&pts, 0, &KMeansParams::default()).is_none());
    }
}
