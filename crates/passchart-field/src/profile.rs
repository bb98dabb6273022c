//! Calibration profiles.
//!
//! Charts show either ~55 or ~75 yards past the line of scrimmage. Which one
//! is decided once per image from the corrected width, and the resulting
//! [`FieldProfile`] is carried by the [`FieldImage`] to every later stage.

use passchart_core::RgbImage;
use serde::{Deserialize, Serialize};

use crate::sideline::{SidelineLayout, FIFTY_YARD_LAYOUT, SEVENTY_YARD_LAYOUT};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldProfile {
    /// Up to 50 yard labels past the line of scrimmage.
    FiftyYard,
    /// 70+ yard labels past the line of scrimmage.
    SeventyYard,
}

/// Fixed pixel calibration of one profile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProfileCalibration {
    /// Row of the line of scrimmage.
    pub los_row: f64,
    /// Row of the farthest calibrated yard line.
    pub top_row: f64,
    /// Yards between `top_row` and `los_row`.
    pub downfield_yards: f64,
    /// Touchdown exclusion band, as offsets from the image bottom: rows `r`
    /// with `height - outer < r < height - inner` are excluded.
    pub touchdown_band_from_bottom: (usize, usize),
}

const FIFTY_YARD_CALIBRATION: ProfileCalibration = ProfileCalibration {
    los_row: 572.0,
    top_row: 5.0,
    downfield_yards: 55.0,
    touchdown_band_from_bottom: (111, 105),
};

const SEVENTY_YARD_CALIBRATION: ProfileCalibration = ProfileCalibration {
    los_row: 596.0,
    top_row: 0.0,
    downfield_yards: 75.0,
    touchdown_band_from_bottom: (86, 81),
};

impl FieldProfile {
    /// Pick the profile for a corrected image of `width` pixels. A width of
    /// exactly `wide_threshold` is a 50-yard chart.
    pub fn for_width(width: usize, wide_threshold: usize) -> Self {
        if width > wide_threshold {
            FieldProfile::SeventyYard
        } else {
            FieldProfile::FiftyYard
        }
    }

    pub fn calibration(self) -> &'static ProfileCalibration {
        match self {
            FieldProfile::FiftyYard => &FIFTY_YARD_CALIBRATION,
            FieldProfile::SeventyYard => &SEVENTY_YARD_CALIBRATION,
        }
    }

    pub fn sideline_layout(self) -> &'static SidelineLayout {
        match self {
            FieldProfile::FiftyYard => &FIFTY_YARD_LAYOUT,
            FieldProfile::SeventyYard => &SEVENTY_YARD_LAYOUT,
        }
    }
}

impl ProfileCalibration {
    /// Whether `row` lies in the touchdown exclusion band of an image `height` rows tall.
    pub fn in_touchdown_band(&self, row: usize, height: usize) -> bool {
        let (outer, inner) = self.touchdown_band_from_bottom;
        let row = row as i64;
        let height = height as i64;
        row > height - outer as i64 && row < height - inner as i64
    }
}

/// Rectified chart image together with its calibration profile.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldImage {
    pub image: RgbImage,
    pub profile: FieldProfile,
}

impl FieldImage {
    pub fn new(image: RgbImage, profile: FieldProfile) -> Self {
        Self { image, profile }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.image.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.image.height
    }

    #[inline]
    pub fn calibration(&self) -> &'static ProfileCalibration {
        self.profile.calibration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_threshold_is_exclusive() {
        assert_eq!(FieldProfile::for_width(1370, 1370), FieldProfile::FiftyYard);
        assert_eq!(FieldProfile::for_width(1371, 1370), FieldProfile::SeventyYard);

        // The boundary width still gets a touchdown band.
        let cal = FieldProfile::for_width(1370, 1370).calibration();
        assert_eq!(cal.touchdown_band_from_bottom, (111, 105));
        assert!(cal.in_touchdown_band(572, 680));
    }

    #[test]
    fn touchdown_band_is_open_interval() {
        let cal = FieldProfile::FiftyYard.calibration();
        // height 680: band is 569 < r < 575
        assert!(!cal.in_touchdown_band(569, 680));
        assert!(cal.in_touchdown_band(570, 680));
        assert!(cal.in_touchdown_band(574, 680));
        assert!(!cal.in_touchdown_band(575, 680));

        let cal = FieldProfile::SeventyYard.calibration();
        // height 680: band is 594 < r < 599
        assert!(cal.in_touchdown_band(596, 680));
        assert!(!cal.in_touchdown_band(599, 680));
    }

    #[test]
    fn profile_serializes_snake_case() {
        let json = serde_json::to_string(&FieldProfile::SeventyYard).unwrap();
        assert_eq!(json, "\"seventy_yard\"");
    }
}
