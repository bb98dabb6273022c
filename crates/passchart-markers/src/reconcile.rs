//! Merge reconciliation for incompletion markers.
//!
//! Overlapping incompletion markers look like a single blob, so k-means
//! with the declared count splits one marker into two tight neighbors.
//! Adjacent clusters (in row order) that are close and compact relative to
//! the whole population are taken to be one marker and the target count is
//! reduced by one per such pair.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::cluster::EventCluster;
use crate::params::ReconcileParams;

/// Which threshold set accepted a merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeTest {
    /// Population is compact and the pair sum is small.
    Tight,
    /// Pair sum alone is small.
    Loose,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MergedPair {
    /// Indices into the row-sorted cluster list.
    pub first: usize,
    pub second: usize,
    pub distance: f64,
    pub test: MergeTest,
}

/// Outcome of one reconciliation pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Clusters examined.
    pub clusters: usize,
    /// Cluster count after merging.
    pub target: usize,
    pub mean_dispersion: f64,
    pub median_dispersion: f64,
    pub merged: Vec<MergedPair>,
}

impl Reconciliation {
    pub fn merges(&self) -> usize {
        self.merged.len()
    }
}

/// Decide how many of `clusters` are really distinct markers.
pub fn reconcile(clusters: &[EventCluster], params: &ReconcileParams) -> Reconciliation {
    let dispersions: Vec<f64> = clusters.iter().map(|c| c.dispersion).collect();
    let mean_dispersion = mean(&dispersions);
    let median_dispersion = median(&dispersions);

    let mut order: Vec<&EventCluster> = clusters.iter().collect();
    order.sort_by(|a, b| {
        a.centroid
            .row
            .total_cmp(&b.centroid.row)
            .then(a.centroid.col.total_cmp(&b.centroid.col))
    });

    let population_tight = mean_dispersion < params.tight_population_max
        && median_dispersion < params.tight_population_max;

    let mut merged = Vec::new();
    for (i, pair) in order.windows(2).enumerate() {
        let (a, b) = (pair[0], pair[1]);
        let distance = a.centroid.distance(&b.centroid);
        if distance >= params.proximity_px {
            continue;
        }
        let pair_sum = a.dispersion + b.dispersion;
        let test = if population_tight && pair_sum < params.tight_pair_sum_max {
            Some(MergeTest::Tight)
        } else if pair_sum < params.loose_pair_sum_max {
            Some(MergeTest::Loose)
        } else {
            None
        };
        if let Some(test) = test {
            debug!(
                "merge clusters {i}/{} at {distance:.1}px, dispersion sum {pair_sum:.1} ({test:?})",
                i + 1
            );
            merged.push(MergedPair {
                first: i,
                second: i + 1,
                distance,
                test,
            });
        }
    }

    Reconciliation {
        clusters: clusters.len(),
        target: clusters.len() - merged.len(),
        mean_dispersion,
        median_dispersion,
        merged,
    }
}

fn mean(v: &[f64]) -> f64 {
    if v.is_empty() {
        return 0.0;
    }
    v.iter().sum::<f64>() / v.len() as f64
}

/// Median; the mean of the middle two for even lengths.
fn median(v: &[f64]) -> f64 {
    if v.is_empty() {
        return 0.0;
    }
    let mut s = v.to_vec();
    s.sort_by(f64::total_cmp);
    let m = s.len() / 2;
    if s.len() % 2 == 0 {
        (s[m - 1] + s[m]) / 2.0
    } else {
        s[m]
    }
}
