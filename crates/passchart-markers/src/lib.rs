//! Outcome-marker localization on a rectified pass chart.
//!
//! For each outcome the chart is thresholded on that outcome's color
//! ([`segment`]), and the marker pixels are grouped into one cluster per
//! declared event ([`cluster_events`]). Touchdown pixels are density
//! filtered first; incompletion clusters go through the merge
//! [`reconcile`]r because overlapping white markers are easily split in two.
//!
//! Declared events that cannot be located are reported as unresolved
//! rather than invented.

mod cluster;
mod denoise;
mod density;
mod kmeans;
mod params;
mod reconcile;
mod segment;

pub use cluster::{cluster_events, partition, EventCentroids, EventCluster};
pub use denoise::nl_means_denoise;
pub use density::{dbscan, keep_densest};
pub use kmeans::{kmeans, KMeansResult};
pub use params::{
    ClusterParams, DensityParams, KMeansParams, MarkerParams, NlMeansParams, ReconcileParams,
    SegmentParams, TouchdownParams,
};
pub use reconcile::{reconcile, MergeTest, MergedPair, Reconciliation};
pub use segment::{isolate_touchdowns, segment};

use passchart_core::OutcomeKind;
use passchart_field::FieldImage;

/// Segment and cluster one outcome.
pub fn locate_markers(
    field: &FieldImage,
    kind: OutcomeKind,
    declared: usize,
    params: &MarkerParams,
) -> EventCentroids {
    if declared == 0 {
        return EventCentroids::empty(kind, 0);
    }
    let pixels = segment(field, kind, &params.segment);
    cluster_events(&pixels, kind, declared, &params.cluster)
}
