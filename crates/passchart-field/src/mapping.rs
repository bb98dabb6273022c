use passchart_core::{FieldCoords, PixelPoint};

use crate::params::MappingParams;
use crate::profile::{FieldImage, FieldProfile};

/// Linear pixel ↔ yard conversion for one rectified chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldMapper {
    center_col: f64,
    los_row: f64,
    px_per_yard_x: f64,
    px_per_yard_y: f64,
}

impl FieldMapper {
    pub fn new(width: usize, profile: FieldProfile, params: &MappingParams) -> Self {
        let cal = profile.calibration();
        let width = width as f64;
        Self {
            center_col: width / 2.0,
            los_row: cal.los_row,
            px_per_yard_x: (width - 2.0 * params.sideline_margin_px) / params.field_width_yards,
            px_per_yard_y: (cal.los_row - cal.top_row) / cal.downfield_yards,
        }
    }

    pub fn for_field(field: &FieldImage, params: &MappingParams) -> Self {
        Self::new(field.width(), field.profile, params)
    }

    pub fn px_per_yard(&self) -> (f64, f64) {
        (self.px_per_yard_x, self.px_per_yard_y)
    }

    /// Pixel → yards. `x` is signed from the field center, `y` positive downfield.
    pub fn to_field(&self, p: PixelPoint) -> FieldCoords {
        FieldCoords {
            x: (p.col - self.center_col) / self.px_per_yard_x,
            y: (self.los_row - p.row) / self.px_per_yard_y,
        }
    }

    /// Yards → pixel; inverse of [`FieldMapper::to_field`].
    pub fn to_pixel(&self, c: FieldCoords) -> PixelPoint {
        PixelPoint {
            row: self.los_row - c.y * self.px_per_yard_y,
            col: self.center_col + c.x * self.px_per_yard_x,
        }
    }

    /// Map an optional centroid; an absent centroid stays absent.
    pub fn map(&self, p: Option<PixelPoint>) -> Option<FieldCoords> {
        p.map(|p| self.to_field(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn origin_is_los_at_center() {
        for (width, profile) in [
            (1360, FieldProfile::FiftyYard),
            (1390, FieldProfile::SeventyYard),
        ] {
            let m = FieldMapper::new(width, profile, &MappingParams::default());
            let los = profile.calibration().los_row;
            let c = m.to_field(PixelPoint::new(los, width as f64 / 2.0));
            assert_relative_eq!(c.x, 0.0, epsilon = 1e-12);
            assert_relative_eq!(c.y, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn one_calibrated_yard_is_one_yard() {
        let m = FieldMapper::new(1360, FieldProfile::FiftyYard, &MappingParams::default());
        let (sx, sy) = m.px_per_yard();
        assert_relative_eq!(sx, 1280.0 / 53.33, epsilon = 1e-9);
        assert_relative_eq!(sy, 567.0 / 55.0, epsilon = 1e-9);

        let right = m.to_field(PixelPoint::new(572.0, 680.0 + sx));
        assert_relative_eq!(right.x, 1.0, epsilon = 1e-9);
        let downfield = m.to_field(PixelPoint::new(572.0 - sy, 680.0));
        assert_relative_eq!(downfield.y, 1.0, epsilon = 1e-9);
        let behind = m.to_field(PixelPoint::new(572.0 + sy, 680.0));
        assert_relative_eq!(behind.y, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn seventy_yard_top_row_is_seventy_five_yards() {
        let m = FieldMapper::new(1390, FieldProfile::SeventyYard, &MappingParams::default());
        let c = m.to_field(PixelPoint::new(0.0, 695.0));
        assert_relative_eq!(c.y, 75.0, epsilon = 1e-9);
    }

    #[test]
    fn inverse_round_trips() {
        let m = FieldMapper::new(1390, FieldProfile::SeventyYard, &MappingParams::default());
        let c = FieldCoords { x: -12.5, y: 31.0 };
        let back = m.to_field(m.to_pixel(c));
        assert_relative_eq!(back.x, c.x, epsilon = 1e-9);
        assert_relative_eq!(back.y, c.y, epsilon = 1e-9);
    }

    #[test]
    fn absent_centroid_maps_to_none() {
        let m = FieldMapper::new(1360, FieldProfile::FiftyYard, &MappingParams::default());
        assert!(m.map(None).is_none());
    }
}
