//! Perspective correction of the trapezoidal field.
//!
//! The chart camera looks down the field, so the far edge is narrower than
//! the near edge. The image is padded on both sides until the extrapolated
//! side lines meet the image corners, then a 4-point homography stretches the
//! trapezoid into the padded rectangle.

use log::{debug, warn};
use nalgebra::Point2;
use passchart_core::{homography_from_4pt, luma, warp_perspective_rgb, Homography, RgbImage};
use serde::{Deserialize, Serialize};

use crate::params::CorrectionParams;
use crate::profile::{FieldImage, FieldProfile};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Reasons a chart cannot be rectified.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CorrectionError {
    #[error("reference column {column} is outside the image (width {width})")]
    ReferenceColumnOutOfRange { column: usize, width: usize },
    #[error("far edge of the field not found in column {column}")]
    TopEdgeNotFound { column: usize },
    #[error("near edge of the field not found in column 0")]
    NearEdgeNotFound,
    #[error("corrected width {width} exceeds the maximum of {max}")]
    TooWide { width: usize, max: usize },
    #[error("field corners are degenerate")]
    DegenerateQuad,
}

/// Measurements of the field trapezoid in the raw image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTrapezoid {
    /// Row of the far (top) edge.
    pub top_row: usize,
    /// Column of the top-left corner.
    pub top_left: usize,
    /// First row at which the field reaches column 0.
    pub near_edge_start: usize,
    /// Columns of padding added on each side.
    pub border: usize,
}

impl FieldTrapezoid {
    /// Source corners in the padded image: BL, TL, TR, BR.
    pub fn source_corners(&self, width: usize, height: usize) -> [Point2<f32>; 4] {
        let w = width as f32;
        let h = height as f32;
        let tl = self.top_left as f32;
        let b = self.border as f32;
        [
            Point2::new(0.0, h),
            Point2::new(tl + b, 0.0),
            Point2::new(w - tl + b, 0.0),
            Point2::new(w + 2.0 * b, h),
        ]
    }

    /// Destination corners (full padded rectangle): BL, TL, TR, BR.
    pub fn target_corners(&self, width: usize, height: usize) -> [Point2<f32>; 4] {
        let w = (width + 2 * self.border) as f32;
        let h = height as f32;
        [
            Point2::new(0.0, h),
            Point2::new(0.0, 0.0),
            Point2::new(w, 0.0),
            Point2::new(w, h),
        ]
    }

    pub fn corrected_width(&self, width: usize) -> usize {
        width + 2 * self.border
    }
}

/// Rectified field plus the measurements used to produce it.
#[derive(Clone, Debug)]
pub struct CorrectedField {
    pub field: FieldImage,
    pub trapezoid: FieldTrapezoid,
    /// Maps rectified pixels back into the padded source image.
    pub h_src_from_rect: Homography,
}

/// Locate the far edge, the top-left corner and the near-edge start of the field.
pub fn detect_trapezoid(
    image: &RgbImage,
    params: &CorrectionParams,
) -> Result<FieldTrapezoid, CorrectionError> {
    let width = image.width;
    let height = image.height;
    let column = params.reference_column;
    if column >= width {
        return Err(CorrectionError::ReferenceColumnOutOfRange { column, width });
    }

    let bright = |x: usize, y: usize| luma(&image.get(x, y)) > params.luma_threshold;

    let top_row = (0..height)
        .find(|&y| bright(column, y))
        .ok_or(CorrectionError::TopEdgeNotFound { column })?;
    // The scan above guarantees at least `column` is bright on this row.
    let top_left = (0..width).find(|&x| bright(x, top_row)).unwrap_or(column);

    let near_edge_start = (0..height)
        .find(|&y| image.get(0, y)[0] > params.near_edge_red_threshold)
        .ok_or(CorrectionError::NearEdgeNotFound)?;

    let border = if top_left == 0 {
        0
    } else if near_edge_start == 0 {
        return Err(CorrectionError::DegenerateQuad);
    } else {
        let extended = (top_left as f64 * height as f64 / near_edge_start as f64).ceil() as usize;
        extended.saturating_sub(top_left)
    };

    Ok(FieldTrapezoid {
        top_row,
        top_left,
        near_edge_start,
        border,
    })
}

/// Rectify a raw chart.
///
/// Returns [`CorrectionError::TooWide`] when the padded image would exceed
/// `params.max_corrected_width`; such charts are malformed.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(image, params),
        fields(width = image.width, height = image.height)
    )
)]
pub fn correct_perspective(
    image: &RgbImage,
    params: &CorrectionParams,
) -> Result<CorrectedField, CorrectionError> {
    let trapezoid = detect_trapezoid(image, params)?;
    let out_w = trapezoid.corrected_width(image.width);
    let out_h = image.height;
    debug!(
        "field trapezoid: top row {}, top-left {}, near edge {}, border {} -> {}x{}",
        trapezoid.top_row,
        trapezoid.top_left,
        trapezoid.near_edge_start,
        trapezoid.border,
        out_w,
        out_h
    );

    if out_w > params.max_corrected_width {
        warn!(
            "corrected width {out_w} exceeds {}, rejecting chart",
            params.max_corrected_width
        );
        return Err(CorrectionError::TooWide {
            width: out_w,
            max: params.max_corrected_width,
        });
    }

    let padded = image.pad_horizontal(trapezoid.border, params.border_color);
    let src = trapezoid.source_corners(image.width, image.height);
    let dst = trapezoid.target_corners(image.width, image.height);
    let h_src_from_rect = homography_from_4pt(&dst, &src).ok_or(CorrectionError::DegenerateQuad)?;

    let rect = warp_perspective_rgb(
        &padded.view(),
        h_src_from_rect,
        out_w,
        out_h,
        params.border_color,
    );
    let profile = FieldProfile::for_width(out_w, params.profile_width_threshold);

    Ok(CorrectedField {
        field: FieldImage::new(rect, profile),
        trapezoid,
        h_src_from_rect,
    })
}
