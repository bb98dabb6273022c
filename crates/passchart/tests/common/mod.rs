#![allow(dead_code)]

use passchart::core::{FieldCoords, RgbImage};
use passchart::field::{FieldMapper, FieldProfile, MappingParams, FIELD_GREY};

pub const GREEN: [u8; 3] = [40, 200, 60];
pub const WHITE: [u8; 3] = [245, 245, 245];
pub const RED: [u8; 3] = [220, 10, 10];
pub const TD_BLUE: [u8; 3] = [20, 80, 200];
/// Touchdown markers already drawn in the sentinel yellow.
pub const YELLOW: [u8; 3] = [255, 255, 0];

/// Canonical 1200×1200 chart whose field is already rectangular.
pub struct ChartBuilder {
    pub image: RgbImage,
    mapper: FieldMapper,
}

impl ChartBuilder {
    pub fn new() -> Self {
        Self {
            image: RgbImage::filled(1200, 1200, FIELD_GREY),
            mapper: FieldMapper::new(1200, FieldProfile::FiftyYard, &MappingParams::default()),
        }
    }

    /// Filled disc of radius 6 centered on the pixel nearest to `at`.
    pub fn marker(mut self, at: FieldCoords, color: [u8; 3]) -> Self {
        let p = self.mapper.to_pixel(at);
        let (cy, cx) = (p.row.round() as i64, p.col.round() as i64);
        for dy in -6i64..=6 {
            for dx in -6i64..=6 {
                if dx * dx + dy * dy <= 36 {
                    self.image.put((cx + dx) as usize, (cy + dy) as usize, color);
                }
            }
        }
        self
    }

    /// Field coordinates of the marker actually drawn for `at`.
    pub fn drawn_at(&self, at: FieldCoords) -> FieldCoords {
        let p = self.mapper.to_pixel(at);
        self.mapper.to_field(passchart::core::PixelPoint::new(p.row.round(), p.col.round()))
    }

    pub fn build(self) -> RgbImage {
        self.image
    }
}

pub const COMPLETE_A: FieldCoords = FieldCoords { x: -9.5, y: 26.0 };
pub const COMPLETE_B: FieldCoords = FieldCoords { x: 12.0, y: 8.0 };
pub const TOUCHDOWN: FieldCoords = FieldCoords { x: 0.0, y: 45.0 };
pub const INCOMPLETE: FieldCoords = FieldCoords { x: -14.0, y: 12.0 };

/// Two completions, one touchdown and one incompletion.
pub fn scenario() -> ChartBuilder {
    scenario_with_touchdown(TD_BLUE)
}

/// [`scenario`] with the touchdown marker drawn in `color`.
pub fn scenario_with_touchdown(color: [u8; 3]) -> ChartBuilder {
    ChartBuilder::new()
        .marker(COMPLETE_A, GREEN)
        .marker(COMPLETE_B, GREEN)
        .marker(TOUCHDOWN, color)
        .marker(INCOMPLETE, WHITE)
}

/// Metadata matching [`scenario`]: completions include the touchdown.
pub const SCENARIO_META: &str = r#"{
    "completions": 3, "touchdowns": 1, "interceptions": 0, "attempts": 4,
    "firstName": "Jane", "lastName": "Doe", "team": "SEA", "gameId": 2018090900
}"#;
