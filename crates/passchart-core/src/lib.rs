//! Core types and utilities for pass-chart extraction.
//!
//! Pixel buffers, color space conversion, the 4-point homography used by the
//! perspective corrector, and the outcome/event/count types shared by the
//! rest of the workspace. Nothing here knows about field layouts.

mod color;
mod homography;
mod image;
mod logger;
mod types;

pub use color::{rgb_distance, rgb_to_hsv, Hsv, HsvRange, RgbRange};
pub use homography::{homography_from_4pt, warp_perspective_rgb, Homography};
pub use image::{luma, sample_bilinear_rgb, GrayImage, Rgb, RgbImage, RgbImageView};
pub use types::{FieldCoords, MarkerPixel, OutcomeKind, PassCount, PassEvent, PixelPoint};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
