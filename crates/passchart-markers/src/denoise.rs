//! Non-local-means denoising of a single-channel mask.
//!
//! Each output pixel is a weighted mean of the pixels in its search window,
//! weighted by `exp(-d / h²)` where `d` is the mean squared difference of
//! the two surrounding template patches. Template accesses outside the image
//! are clamped to the nearest edge pixel.
//!
//! Masks from the segmenter are mostly zero. A pixel whose whole search
//! window is zero stays zero, so those pixels are skipped via an integral
//! image of the non-zero indicator.

use crate::params::NlMeansParams;
use passchart_core::GrayImage;

/// Denoise `src` with non-local means.
pub fn nl_means_denoise(src: &GrayImage, params: &NlMeansParams) -> GrayImage {
    let (w, h) = (src.width, src.height);
    let mut out = GrayImage::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    let occupancy = OccupancyIntegral::new(src);
    let tr = params.template_radius as isize;
    let sr = params.search_radius as isize;
    let area = ((2 * tr + 1) * (2 * tr + 1)) as f32;
    let h2 = (params.h * params.h).max(f32::EPSILON);

    let at = |x: isize, y: isize| -> i32 {
        let xc = x.clamp(0, w as isize - 1) as usize;
        let yc = y.clamp(0, h as isize - 1) as usize;
        src.get(xc, yc) as i32
    };

    for y in 0..h as isize {
        for x in 0..w as isize {
            let x0 = (x - sr).max(0);
            let y0 = (y - sr).max(0);
            let x1 = (x + sr).min(w as isize - 1);
            let y1 = (y + sr).min(h as isize - 1);
            if occupancy.count(x0 as usize, y0 as usize, x1 as usize, y1 as usize) == 0 {
                continue;
            }

            let mut sum_w = 0.0f32;
            let mut sum_v = 0.0f32;
            for qy in y0..=y1 {
                for qx in x0..=x1 {
                    let mut ssd = 0i32;
                    for dy in -tr..=tr {
                        for dx in -tr..=tr {
                            let d = at(x + dx, y + dy) - at(qx + dx, qy + dy);
                            ssd += d * d;
                        }
                    }
                    let weight = (-(ssd as f32 / area) / h2).exp();
                    sum_w += weight;
                    sum_v += weight * src.get(qx as usize, qy as usize) as f32;
                }
            }

            // sum_w >= 1: the pixel always matches itself.
            let v = (sum_v / sum_w).round().clamp(0.0, 255.0) as u8;
            out.data[y as usize * w + x as usize] = v;
        }
    }

    out
}

/// Summed-area table of `src != 0`.
struct OccupancyIntegral {
    stride: usize,
    sums: Vec<u32>,
}

impl OccupancyIntegral {
    fn new(src: &GrayImage) -> Self {
        let stride = src.width + 1;
        let mut sums = vec![0u32; stride * (src.height + 1)];
        for y in 0..src.height {
            let mut row = 0u32;
            for x in 0..src.width {
                row += (src.get(x, y) != 0) as u32;
                sums[(y + 1) * stride + x + 1] = sums[y * stride + x + 1] + row;
            }
        }
        Self { stride, sums }
    }

    /// Non-zero count over the inclusive rectangle.
    fn count(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> u32 {
        let s = |x: usize, y: usize| self.sums[y * self.stride + x];
        s(x1 + 1, y1 + 1) + s(x0, y0) - s(x0, y1 + 1) - s(x1 + 1, y0)
    }
}
