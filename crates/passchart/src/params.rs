//! Pipeline configuration.

use std::{fs, path::Path};

use passchart_field::{CorrectionParams, MappingParams};
use passchart_markers::{ClusterParams, MarkerParams, SegmentParams};
use serde::{Deserialize, Serialize};

use crate::error::PassChartIoError;

/// Expected raster size and the rows kept from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputParams {
    pub expected_width: usize,
    pub expected_height: usize,
    /// Rows kept from the top; the rest of the chart is legend.
    pub crop_rows: usize,
}

impl Default for InputParams {
    fn default() -> Self {
        Self {
            expected_width: 1200,
            expected_height: 1200,
            crop_rows: 680,
        }
    }
}

/// Every tunable of the extraction pipeline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    pub input: InputParams,
    pub correction: CorrectionParams,
    pub segment: SegmentParams,
    pub cluster: ClusterParams,
    pub mapping: MappingParams,
}

impl PipelineParams {
    /// Load a JSON config from disk. Missing sections keep their defaults.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, PassChartIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), PassChartIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub(crate) fn marker_params(&self) -> MarkerParams {
        MarkerParams {
            segment: self.segment.clone(),
            cluster: self.cluster.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let json = r#"{
            "input": { "crop_rows": 600 },
            "cluster": { "reconcile": { "proximity_px": 20.0 } }
        }"#;
        let p: PipelineParams = serde_json::from_str(json).unwrap();
        assert_eq!(p.input.crop_rows, 600);
        assert_eq!(p.input.expected_width, 1200);
        assert_eq!(p.cluster.reconcile.proximity_px, 20.0);
        assert_eq!(p.cluster.reconcile.loose_pair_sum_max, 50.0);
        assert_eq!(p.correction, CorrectionParams::default());
    }

    #[test]
    fn json_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        let mut p = PipelineParams::default();
        p.cluster.kmeans.seed = 7;
        p.write_json(&path).unwrap();
        assert_eq!(PipelineParams::load_json(&path).unwrap(), p);
    }
}
