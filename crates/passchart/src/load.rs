//! Decoding chart files with the `image` crate.

use std::path::Path;

use image::ImageReader;
use passchart_core::RgbImage;

use crate::error::PassChartIoError;

/// Copy an `image::RgbImage` into the workspace buffer type.
pub fn rgb_from_image(img: &image::RgbImage) -> RgbImage {
    RgbImage {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw().clone(),
    }
}

/// Copy a workspace buffer into an `image::RgbImage`, e.g. for saving.
pub fn rgb_to_image(img: &RgbImage) -> Option<image::RgbImage> {
    image::RgbImage::from_raw(img.width as u32, img.height as u32, img.data.clone())
}

/// Decode any supported format into RGB.
pub fn load_rgb(path: impl AsRef<Path>) -> Result<RgbImage, PassChartIoError> {
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?.to_rgb8();
    Ok(rgb_from_image(&img))
}
