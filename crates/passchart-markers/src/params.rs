use passchart_core::{HsvRange, Rgb, RgbRange};
use serde::{Deserialize, Serialize};

/// Non-local-means settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NlMeansParams {
    /// Filter strength; larger values smooth more.
    pub h: f32,
    /// Half size of the comparison patch (3 → 7×7).
    pub template_radius: usize,
    /// Half size of the search window (10 → 21×21).
    pub search_radius: usize,
}

impl Default for NlMeansParams {
    fn default() -> Self {
        Self {
            h: 3.0,
            template_radius: 3,
            search_radius: 10,
        }
    }
}

impl NlMeansParams {
    pub fn with_h(h: f32) -> Self {
        Self {
            h,
            ..Self::default()
        }
    }
}

/// Touchdown isolation: blue markers share their hue with the scrimmage line
/// and the trajectory lines, so they are recolored to a sentinel first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchdownParams {
    /// Reference marker color.
    pub marker_color: Rgb,
    /// Pixels closer than this (RGB distance) to `marker_color` are recolored.
    pub max_color_distance: f32,
    /// ...provided their blue channel exceeds this.
    pub min_blue: u8,
    pub sentinel: Rgb,
    /// HSV band that selects the sentinel.
    pub sentinel_hsv: HsvRange,
    pub denoise: NlMeansParams,
}

impl Default for TouchdownParams {
    fn default() -> Self {
        Self {
            marker_color: [20, 80, 200],
            max_color_distance: 32.0,
            min_blue: 100,
            sentinel: [255, 255, 0],
            sentinel_hsv: HsvRange::new([20, 100, 100], [30, 255, 255]),
            denoise: NlMeansParams::with_h(10.0),
        }
    }
}

/// Color thresholds per outcome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentParams {
    /// Green band for completions.
    pub complete_hsv: HsvRange,
    /// White box for incompletions.
    pub incomplete_rgb: RgbRange,
    pub incomplete_denoise: NlMeansParams,
    /// Red box for interceptions.
    pub interception_rgb: RgbRange,
    pub interception_denoise: NlMeansParams,
    pub touchdown: TouchdownParams,
}

impl Default for SegmentParams {
    fn default() -> Self {
        Self {
            complete_hsv: HsvRange::new([40, 100, 100], [80, 255, 255]),
            incomplete_rgb: RgbRange::new([230, 230, 230], [255, 255, 255]),
            incomplete_denoise: NlMeansParams::with_h(3.0),
            interception_rgb: RgbRange::new([150, 0, 0], [255, 30, 30]),
            interception_denoise: NlMeansParams::with_h(10.0),
            touchdown: TouchdownParams::default(),
        }
    }
}

/// Seeded k-means settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KMeansParams {
    pub seed: u64,
    /// Independent k-means++ restarts; the lowest inertia wins.
    pub n_init: usize,
    /// Max Lloyd iterations per restart.
    pub max_iters: usize,
}

impl Default for KMeansParams {
    fn default() -> Self {
        Self {
            seed: 0,
            n_init: 10,
            max_iters: 300,
        }
    }
}

/// Touchdown density pre-filter (DBSCAN).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityParams {
    pub enabled: bool,
    /// Neighborhood radius in pixels.
    pub eps: f64,
}

impl Default for DensityParams {
    fn default() -> Self {
        Self {
            enabled: true,
            eps: 10.0,
        }
    }
}

/// Incompletion merge thresholds. Empirically tuned; recalibrate if the
/// chart rendering changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileParams {
    /// Adjacent centroids closer than this (pixels) are merge candidates.
    pub proximity_px: f64,
    /// Mean and median dispersion must both be below this for the tight test.
    pub tight_population_max: f64,
    /// Pair dispersion sum bound of the tight test.
    pub tight_pair_sum_max: f64,
    /// Pair dispersion sum bound of the loose test.
    pub loose_pair_sum_max: f64,
}

impl Default for ReconcileParams {
    fn default() -> Self {
        Self {
            proximity_px: 15.0,
            tight_population_max: 30.0,
            tight_pair_sum_max: 45.0,
            loose_pair_sum_max: 50.0,
        }
    }
}

/// Everything after segmentation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterParams {
    pub kmeans: KMeansParams,
    pub density: DensityParams,
    pub reconcile: ReconcileParams,
}

/// Segmentation plus clustering settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerParams {
    pub segment: SegmentParams,
    pub cluster: ClusterParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_hold_the_calibrated_thresholds() {
        let p = MarkerParams::default();
        assert_eq!(p.segment.complete_hsv, HsvRange::new([40, 100, 100], [80, 255, 255]));
        assert_eq!(p.segment.touchdown.sentinel, [255, 255, 0]);
        assert_eq!(p.segment.incomplete_denoise.h, 3.0);
        assert_eq!(p.cluster.kmeans.seed, 0);
        assert_eq!(p.cluster.reconcile.proximity_px, 15.0);
        assert_eq!(p.cluster.density.eps, 10.0);
    }

    #[test]
    fn partial_json_overrides_one_field() {
        let json = r#"{ "segment": { "touchdown": { "max_color_distance": 40.0 } } }"#;
        let p: MarkerParams = serde_json::from_str(json).unwrap();
        assert_eq!(p.segment.touchdown.max_color_distance, 40.0);
        assert_eq!(p.segment.touchdown.min_blue, 100);
        assert_eq!(p.cluster, ClusterParams::default());
    }
}
