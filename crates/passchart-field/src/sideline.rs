//! Sideline label erasure.
//!
//! The rectified chart carries yard-line numbers and a line-of-scrimmage tag
//! on both sidelines. Their colors overlap the marker colors, so they are
//! painted over with the field grey before segmentation. Positions are fixed
//! per profile; nothing is detected.

use passchart_core::{Rgb, RgbImage};

use crate::profile::FieldImage;

/// Inclusive pixel rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl PixelRect {
    /// Build from two opposite corners given in any order.
    pub fn from_corners((xa, ya): (usize, usize), (xb, yb): (usize, usize)) -> Self {
        Self {
            x0: xa.min(xb),
            y0: ya.min(yb),
            x1: xa.max(xb),
            y1: ya.max(yb),
        }
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        (self.x0..=self.x1).contains(&x) && (self.y0..=self.y1).contains(&y)
    }
}

/// Rows covered by one yard-line number on each sideline.
#[derive(Clone, Copy, Debug)]
pub struct YardLabel {
    pub yards: u32,
    pub left_rows: (usize, usize),
    pub right_rows: (usize, usize),
}

/// Label positions of one profile.
#[derive(Clone, Copy, Debug)]
pub struct SidelineLayout {
    pub los_left: ((usize, usize), (usize, usize)),
    pub los_right: ((usize, usize), (usize, usize)),
    /// Columns spanned by the left-hand numbers.
    pub left_cols: (usize, usize),
    /// First column of the right-hand numbers; they run to the image edge.
    pub right_start_col: usize,
    pub labels: &'static [YardLabel],
}

#[rustfmt::skip]
pub(crate) const FIFTY_YARD_LAYOUT: SidelineLayout = SidelineLayout {
    los_left: ((20, 562), (84, 578)),
    los_right: ((1340, 562), (1278, 578)),
    left_cols: (0, 33),
    right_start_col: 1331,
    labels: &[
        YardLabel { yards: 10, left_rows: (455, 476), right_rows: (457, 476) },
        YardLabel { yards: 20, left_rows: (349, 373), right_rows: (351, 373) },
        YardLabel { yards: 30, left_rows: (243, 269), right_rows: (245, 269) },
        YardLabel { yards: 40, left_rows: (137, 165), right_rows: (139, 165) },
        YardLabel { yards: 50, left_rows: (30, 60), right_rows: (32, 60) },
    ],
};

#[rustfmt::skip]
pub(crate) const SEVENTY_YARD_LAYOUT: SidelineLayout = SidelineLayout {
    los_left: ((18, 587), (86, 601)),
    los_right: ((1308, 601), (1374, 587)),
    left_cols: (0, 33),
    right_start_col: 1362,
    labels: &[
        YardLabel { yards: 10, left_rows: (503, 520), right_rows: (505, 520) },
        YardLabel { yards: 20, left_rows: (421, 440), right_rows: (423, 440) },
        YardLabel { yards: 30, left_rows: (338, 360), right_rows: (340, 360) },
        YardLabel { yards: 40, left_rows: (255, 279), right_rows: (257, 279) },
        YardLabel { yards: 50, left_rows: (173, 200), right_rows: (175, 200) },
        YardLabel { yards: 60, left_rows: (90, 118), right_rows: (92, 118) },
        YardLabel { yards: 70, left_rows: (8, 38), right_rows: (10, 38) },
    ],
};

impl SidelineLayout {
    /// All rectangles to erase for an image `width` pixels wide.
    pub fn rects(&self, width: usize) -> Vec<PixelRect> {
        let right_edge = width.saturating_sub(1).max(self.right_start_col);
        let mut rects = Vec::with_capacity(2 + 2 * self.labels.len());
        rects.push(PixelRect::from_corners(self.los_left.0, self.los_left.1));
        rects.push(PixelRect::from_corners(self.los_right.0, self.los_right.1));
        for label in self.labels {
            rects.push(PixelRect::from_corners(
                (self.left_cols.0, label.left_rows.0),
                (self.left_cols.1, label.left_rows.1),
            ));
            rects.push(PixelRect::from_corners(
                (self.right_start_col, label.right_rows.0),
                (right_edge, label.right_rows.1),
            ));
        }
        rects
    }
}

/// Paint `layout`'s rectangles with `color`. Parts outside the image are skipped.
pub fn erase_labels(image: &mut RgbImage, layout: &SidelineLayout, color: Rgb) {
    for r in layout.rects(image.width) {
        image.fill_rect(r.x0, r.y0, r.x1, r.y1, color);
    }
}

/// Erase the sideline labels of `field` in place using its own profile.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip(field, color), fields(profile = ?field.profile))
)]
pub fn erase_sidelines(field: &mut FieldImage, color: Rgb) {
    let layout = field.profile.sideline_layout();
    erase_labels(&mut field.image, layout, color);
}
