//! Turn marker pixels into one centroid per declared event.

use log::{debug, warn};
use passchart_core::{MarkerPixel, OutcomeKind, PixelPoint};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::density::keep_densest;
use crate::kmeans::kmeans;
use crate::params::{ClusterParams, KMeansParams};
use crate::reconcile::{reconcile, Reconciliation};

/// One k-means cluster of marker pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventCluster {
    pub centroid: PixelPoint,
    pub members: usize,
    /// Mean squared distance of the members to the centroid.
    pub dispersion: f64,
}

/// Centroids found for one outcome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventCentroids {
    pub kind: OutcomeKind,
    /// Events declared in the metadata.
    pub declared: usize,
    /// Located events, sorted by (row, col). Never longer than `declared`.
    pub centroids: Vec<PixelPoint>,
    /// Present when the merge reconciler ran.
    pub reconciliation: Option<Reconciliation>,
}

impl EventCentroids {
    pub fn empty(kind: OutcomeKind, declared: usize) -> Self {
        Self {
            kind,
            declared,
            centroids: Vec::new(),
            reconciliation: None,
        }
    }

    /// Declared events without a location.
    pub fn unresolved(&self) -> usize {
        self.declared - self.centroids.len()
    }

    /// `declared` slots: located centroids first, then `None`s.
    pub fn slots(&self) -> impl Iterator<Item = Option<PixelPoint>> + '_ {
        self.centroids
            .iter()
            .copied()
            .map(Some)
            .chain(std::iter::repeat(None).take(self.unresolved()))
    }
}

/// k-means partition of `pixels` into `k` clusters, sorted by (row, col).
///
/// `k` is clamped to the number of pixels; pixels must be distinct.
pub fn partition(pixels: &[MarkerPixel], k: usize, params: &KMeansParams) -> Vec<EventCluster> {
    let k = k.min(pixels.len());
    if k == 0 {
        return Vec::new();
    }
    let points: Vec<PixelPoint> = pixels.iter().map(|p| p.to_point()).collect();
    let Some(res) = kmeans(&points, k, params) else {
        return Vec::new();
    };

    let mut members = vec![0usize; k];
    let mut spread = vec![0.0f64; k];
    for (&l, p) in res.labels.iter().zip(&points) {
        members[l] += 1;
        spread[l] += p.distance_sq(&res.centroids[l]);
    }

    let mut clusters: Vec<EventCluster> = res
        .centroids
        .iter()
        .enumerate()
        .map(|(i, &centroid)| EventCluster {
            centroid,
            members: members[i],
            dispersion: if members[i] > 0 {
                spread[i] / members[i] as f64
            } else {
                0.0
            },
        })
        .collect();
    clusters.sort_by(|a, b| {
        a.centroid
            .row
            .total_cmp(&b.centroid.row)
            .then(a.centroid.col.total_cmp(&b.centroid.col))
    });
    clusters
}

/// Locate `declared` events of `kind` among `pixels`.
///
/// Touchdown pixels are first reduced to their densest clusters.
/// Incompletion clusters go through the merge reconciler and are
/// re-partitioned with the reduced count.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(pixels, params), fields(pixels = pixels.len()))
)]
pub fn cluster_events(
    pixels: &[MarkerPixel],
    kind: OutcomeKind,
    declared: usize,
    params: &ClusterParams,
) -> EventCentroids {
    if declared == 0 {
        return EventCentroids::empty(kind, 0);
    }
    if pixels.is_empty() {
        warn!("{kind}: {declared} declared, no marker pixels");
        return EventCentroids::empty(kind, declared);
    }

    let filtered;
    let pixels = if kind == OutcomeKind::Touchdown && params.density.enabled {
        filtered = keep_densest(pixels, declared, params.density.eps);
        &filtered[..]
    } else {
        pixels
    };

    let mut clusters = partition(pixels, declared, &params.kmeans);
    if clusters.len() < declared {
        warn!(
            "{kind}: {declared} declared, only {} distinct pixels",
            clusters.len()
        );
    }

    let mut reconciliation = None;
    if kind == OutcomeKind::Incomplete {
        let r = reconcile(&clusters, &params.reconcile);
        if r.target < clusters.len() {
            debug!("{kind}: {} clusters reconciled to {}", clusters.len(), r.target);
            clusters = partition(pixels, r.target, &params.kmeans);
        }
        reconciliation = Some(r);
    }

    EventCentroids {
        kind,
        declared,
        centroids: clusters.into_iter().map(|c| c.centroid).collect(),
        reconciliation,
    }
}
