//! Color space helpers.
//!
//! HSV values follow the 8-bit OpenCV convention: hue in `[0, 180)` (degrees
//! halved), saturation and value in `[0, 255]`. Hue bands in the pipeline
//! parameters are expressed in that scale.

use serde::{Deserialize, Serialize};

use crate::Rgb;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

/// Convert an RGB pixel to 8-bit HSV.
pub fn rgb_to_hsv(px: Rgb) -> Hsv {
    let [r, g, b] = px.map(|c| c as f32);
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = v - min;

    let s = if v > 0.0 { delta / v * 255.0 } else { 0.0 };

    let h_deg = if delta <= 0.0 {
        0.0
    } else if v == r {
        60.0 * (g - b) / delta
    } else if v == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    let h_deg = if h_deg < 0.0 { h_deg + 360.0 } else { h_deg };
    // 360° wraps to 0 after halving and rounding.
    let h = ((h_deg / 2.0).round() as u32 % 180) as u8;

    Hsv {
        h,
        s: s.round().clamp(0.0, 255.0) as u8,
        v: v as u8,
    }
}

/// Inclusive per-channel HSV band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvRange {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    #[inline]
    pub fn contains(&self, hsv: Hsv) -> bool {
        in_box([hsv.h, hsv.s, hsv.v], self.lower, self.upper)
    }

    #[inline]
    pub fn contains_rgb(&self, px: Rgb) -> bool {
        self.contains(rgb_to_hsv(px))
    }
}

/// Inclusive per-channel RGB box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbRange {
    pub lower: Rgb,
    pub upper: Rgb,
}

impl RgbRange {
    pub const fn new(lower: Rgb, upper: Rgb) -> Self {
        Self { lower, upper }
    }

    #[inline]
    pub fn contains(&self, px: Rgb) -> bool {
        in_box(px, self.lower, self.upper)
    }
}

#[inline]
fn in_box(v: [u8; 3], lo: [u8; 3], hi: [u8; 3]) -> bool {
    (0..3).all(|c| lo[c] <= v[c] && v[c] <= hi[c])
}

/// Euclidean RGB distance.
#[inline]
pub fn rgb_distance(a: Rgb, b: Rgb) -> f32 {
    let d: f32 = (0..3)
        .map(|c| {
            let x = a[c] as f32 - b[c] as f32;
            x * x
        })
        .sum();
    d.sqrt()
}
