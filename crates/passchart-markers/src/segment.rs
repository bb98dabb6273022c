//! Per-outcome marker segmentation.
//!
//! Each outcome is drawn in its own color. Thresholding yields a mask whose
//! pixels carry their luma; all outcomes except completions are then
//! denoised and the surviving non-zero pixels are returned in row-major
//! order.

use log::debug;
use passchart_core::{luma, rgb_distance, GrayImage, MarkerPixel, OutcomeKind, RgbImage};
use passchart_field::FieldImage;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::denoise::nl_means_denoise;
use crate::params::{SegmentParams, TouchdownParams};

/// Pixels of `field` that belong to markers of `kind`.
#[cfg_attr(feature = "tracing", instrument(level = "debug", skip(field, params)))]
pub fn segment(field: &FieldImage, kind: OutcomeKind, params: &SegmentParams) -> Vec<MarkerPixel> {
    let img = &field.image;
    let pixels = match kind {
        OutcomeKind::Complete => {
            let range = params.complete_hsv;
            marker_pixels(&mask(img, |px| range.contains_rgb(px)))
        }
        OutcomeKind::Incomplete => {
            let range = params.incomplete_rgb;
            let m = mask(img, |px| range.contains(px));
            marker_pixels(&nl_means_denoise(&m, &params.incomplete_denoise))
        }
        OutcomeKind::Interception => {
            let range = params.interception_rgb;
            let m = mask(img, |px| range.contains(px));
            marker_pixels(&nl_means_denoise(&m, &params.interception_denoise))
        }
        OutcomeKind::Touchdown => {
            let td = &params.touchdown;
            let prepared = isolate_touchdowns(field, td);
            let m = mask(&prepared, |px| td.sentinel_hsv.contains_rgb(px));
            marker_pixels(&nl_means_denoise(&m, &td.denoise))
        }
    };
    debug!("{kind}: {} marker pixels", pixels.len());
    pixels
}

/// Copy of the field with the touchdown band blanked and touchdown-blue
/// pixels recolored to the sentinel.
pub fn isolate_touchdowns(field: &FieldImage, params: &TouchdownParams) -> RgbImage {
    let mut out = field.image.clone();
    let (w, h) = (out.width, out.height);
    let cal = field.calibration();

    for y in 0..h {
        if cal.in_touchdown_band(y, h) {
            out.fill_rect(0, y, w.saturating_sub(1), y, [0, 0, 0]);
            continue;
        }
        for x in 0..w {
            let px = out.get(x, y);
            if px[2] > params.min_blue
                && rgb_distance(px, params.marker_color) < params.max_color_distance
            {
                out.put(x, y, params.sentinel);
            }
        }
    }
    out
}

/// Luma of every pixel accepted by `keep`, zero elsewhere.
fn mask(img: &RgbImage, keep: impl Fn([u8; 3]) -> bool) -> GrayImage {
    let mut out = GrayImage::new(img.width, img.height);
    for (dst, px) in out.data.iter_mut().zip(img.data.chunks_exact(3)) {
        let rgb = [px[0], px[1], px[2]];
        if keep(rgb) {
            // A kept pixel must stay visible to the denoiser.
            *dst = luma(px).max(1);
        }
    }
    out
}

fn marker_pixels(mask: &GrayImage) -> Vec<MarkerPixel> {
    mask.data
        .iter()
        .enumerate()
        .filter(|(_, &v)| v != 0)
        .map(|(i, _)| MarkerPixel::new((i / mask.width) as u32, (i % mask.width) as u32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use passchart_field::{FieldProfile, FIELD_GREY};

    const GREEN: [u8; 3] = [40, 200, 60];
    const WHITE: [u8; 3] = [245, 245, 245];
    const RED: [u8; 3] = [220, 10, 10];
    const TD_BLUE: [u8; 3] = [20, 80, 200];
    const YELLOW: [u8; 3] = [255, 255, 0];

    fn field_with(blocks: &[(usize, usize, [u8; 3])]) -> FieldImage {
        let mut img = RgbImage::filled(160, 150, FIELD_GREY);
        for &(x, y, c) in blocks {
            img.fill_rect(x, y, x + 6, y + 6, c);
        }
        FieldImage::new(img, FieldProfile::FiftyYard)
    }

    #[test]
    fn complete_selects_green_only() {
        let field = field_with(&[(10, 10, GREEN), (60, 10, WHITE), (100, 10, RED)]);
        let px = segment(&field, OutcomeKind::Complete, &SegmentParams::default());
        assert_eq!(px.len(), 49);
        assert!(px.iter().all(|p| (10..=16).contains(&p.col) && (10..=16).contains(&p.row)));
    }

    #[test]
    fn incomplete_and_interception_survive_denoising() {
        let field = field_with(&[(10, 10, GREEN), (60, 10, WHITE), (100, 10, RED)]);
        let params = SegmentParams::default();

        let white = segment(&field, OutcomeKind::Incomplete, &params);
        assert_eq!(white.len(), 49);
        assert!(white.iter().all(|p| (60..=66).contains(&p.col)));

        let red = segment(&field, OutcomeKind::Interception, &params);
        assert_eq!(red.len(), 49);
        assert!(red.iter().all(|p| (100..=106).contains(&p.col)));
    }

    #[test]
    fn touchdown_ignores_exclusion_band() {
        // Band rows for height 150 under the 50-yard profile: 40..=44.
        let mut field = field_with(&[(20, 90, TD_BLUE)]);
        field.image.fill_rect(0, 40, 159, 44, TD_BLUE);

        let td = segment(&field, OutcomeKind::Touchdown, &SegmentParams::default());
        assert_eq!(td.len(), 49);
        assert!(td.iter().all(|p| (90..=96).contains(&p.row)));
    }

    #[test]
    fn yellow_marker_survives_outside_band_only() {
        let mut field = field_with(&[(20, 90, YELLOW)]);
        field.image.fill_rect(0, 42, 159, 42, YELLOW);

        let prepared = isolate_touchdowns(&field, &TouchdownParams::default());
        assert_eq!(prepared.get(23, 93), YELLOW);
        assert_eq!(prepared.get(80, 42), [0, 0, 0]);

        let td = segment(&field, OutcomeKind::Touchdown, &SegmentParams::default());
        assert_eq!(td.len(), 49);
        assert!(td.iter().all(|p| (90..=96).contains(&p.row) && (20..=26).contains(&p.col)));
    }

    #[test]
    fn isolate_recolors_marker_blue() {
        let field = field_with(&[(20, 90, [30, 85, 190])]);
        let params = TouchdownParams::default();
        let out = isolate_touchdowns(&field, &params);
        assert_eq!(out.get(23, 93), params.sentinel);
        assert_eq!(out.get(0, 0), FIELD_GREY);
        assert_eq!(out.get(0, 42), [0, 0, 0]);
    }

    #[test]
    fn field_grey_is_never_a_marker() {
        let field = field_with(&[]);
        let params = SegmentParams::default();
        for kind in OutcomeKind::ALL {
            assert!(segment(&field, kind, &params).is_empty(), "{kind}");
        }
    }
}
