use passchart_core::Rgb;
use serde::{Deserialize, Serialize};

/// Background color of the chart field, used for padding and erasure.
pub const FIELD_GREY: Rgb = [86, 96, 108];

/// Parameters for trapezoid detection and perspective correction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectionParams {
    /// Luma above which a pixel counts as part of the field (not background).
    pub luma_threshold: u8,
    /// Column scanned top-down to find the far edge of the field.
    pub reference_column: usize,
    /// Red level in column 0 marking where the near edge of the field begins.
    pub near_edge_red_threshold: u8,
    /// Corrected images wider than this are rejected.
    pub max_corrected_width: usize,
    /// Corrected images wider than this use the 70+ yard profile.
    pub profile_width_threshold: usize,
    /// Fill color for the side padding.
    pub border_color: Rgb,
}

impl Default for CorrectionParams {
    fn default() -> Self {
        Self {
            luma_threshold: 40,
            reference_column: 600,
            near_edge_red_threshold: 70,
            max_corrected_width: 1398,
            profile_width_threshold: 1370,
            border_color: FIELD_GREY,
        }
    }
}

/// Pixel-to-yard calibration shared by both profiles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingParams {
    /// Sideline margin on each side of the field, in pixels.
    pub sideline_margin_px: f64,
    /// Standard field width in yards.
    pub field_width_yards: f64,
}

impl Default for MappingParams {
    fn default() -> Self {
        Self {
            sideline_margin_px: 40.0,
            field_width_yards: 53.33,
        }
    }
}
