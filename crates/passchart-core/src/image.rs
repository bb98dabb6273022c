/// An RGB triple, channel order R, G, B.
pub type Rgb = [u8; 3];

#[derive(Clone, Copy, Debug)]
pub struct RgbImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major RGB, len = w*h*3
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl RgbImage {
    /// Image of the given size filled with one color.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Self {
        let mut data = Vec::with_capacity(width * height * 3);
        for _ in 0..width * height {
            data.extend_from_slice(&color);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap a raw row-major RGB buffer. Returns `None` on a length mismatch.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        (data.len() == width * height * 3).then_some(Self {
            width,
            height,
            data,
        })
    }

    pub fn view(&self) -> RgbImageView<'_> {
        RgbImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.view().get(x, y)
    }

    #[inline]
    pub fn put(&mut self, x: usize, y: usize, color: Rgb) {
        let i = (y * self.width + x) * 3;
        self.data[i..i + 3].copy_from_slice(&color);
    }

    /// Fill the inclusive rectangle `[x0, x1] × [y0, y1]`, clipped to the image.
    pub fn fill_rect(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, color: Rgb) {
        if self.width == 0 || self.height == 0 || x0 >= self.width || y0 >= self.height {
            return;
        }
        let x1 = x1.min(self.width - 1);
        let y1 = y1.min(self.height - 1);
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.put(x, y, color);
            }
        }
    }

    /// Copy of the rows `[0, rows)`.
    pub fn top_rows(&self, rows: usize) -> Self {
        let rows = rows.min(self.height);
        Self {
            width: self.width,
            height: rows,
            data: self.data[..rows * self.width * 3].to_vec(),
        }
    }

    /// Pad left and right by `border` columns of `color`.
    pub fn pad_horizontal(&self, border: usize, color: Rgb) -> Self {
        let width = self.width + 2 * border;
        let mut out = Self::filled(width, self.height, color);
        let row_bytes = self.width * 3;
        for y in 0..self.height {
            let src = &self.data[y * row_bytes..(y + 1) * row_bytes];
            let dst_start = (y * width + border) * 3;
            out.data[dst_start..dst_start + row_bytes].copy_from_slice(src);
        }
        out
    }

    /// BT.601 luma plane.
    pub fn to_luma(&self) -> GrayImage {
        let data = self.data.chunks_exact(3).map(luma).collect();
        GrayImage {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

impl RgbImageView<'_> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        let i = (y * self.width + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}

impl GrayImage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }
}

/// BT.601 luma of an RGB pixel, rounded.
#[inline]
pub fn luma(px: &[u8]) -> u8 {
    let v = 0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32;
    v.round().clamp(0.0, 255.0) as u8
}

#[inline]
fn get_rgb(src: &RgbImageView<'_>, x: i32, y: i32, border: Rgb) -> [f32; 3] {
    if x < 0 || y < 0 || x >= src.width as i32 || y >= src.height as i32 {
        return border.map(|c| c as f32);
    }
    src.get(x as usize, y as usize).map(|c| c as f32)
}

/// Bilinear RGB sample; out-of-image taps read `border`.
#[inline]
pub fn sample_bilinear_rgb(src: &RgbImageView<'_>, x: f32, y: f32, border: Rgb) -> Rgb {
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = get_rgb(src, x0, y0, border);
    let p10 = get_rgb(src, x0 + 1, y0, border);
    let p01 = get_rgb(src, x0, y0 + 1, border);
    let p11 = get_rgb(src, x0 + 1, y0 + 1, border);

    let mut out = [0u8; 3];
    for c in 0..3 {
        let a = p00[c] + fx * (p10[c] - p00[c]);
        let b = p01[c] + fx * (p11[c] - p01[c]);
        out[c] = (a + fy * (b - a)).round().clamp(0.0, 255.0) as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_rect_clips_to_image() {
        let mut img = RgbImage::filled(4, 3, [0, 0, 0]);
        img.fill_rect(2, 1, 100, 100, [9, 9, 9]);
        assert_eq!(img.get(1, 1), [0, 0, 0]);
        assert_eq!(img.get(3, 2), [9, 9, 9]);
        assert_eq!(img.get(2, 0), [0, 0, 0]);
    }

    #[test]
    fn pad_keeps_interior() {
        let mut img = RgbImage::filled(2, 2, [1, 2, 3]);
        img.put(1, 1, [7, 7, 7]);
        let padded = img.pad_horizontal(3, [50, 60, 70]);
        assert_eq!(padded.width, 8);
        assert_eq!(padded.get(0, 0), [50, 60, 70]);
        assert_eq!(padded.get(3, 0), [1, 2, 3]);
        assert_eq!(padded.get(4, 1), [7, 7, 7]);
        assert_eq!(padded.get(7, 1), [50, 60, 70]);
    }

    #[test]
    fn bilinear_at_integer_coords_is_exact() {
        let mut img = RgbImage::filled(3, 3, [10, 20, 30]);
        img.put(1, 1, [200, 100, 0]);
        let v = img.view();
        assert_eq!(sample_bilinear_rgb(&v, 1.0, 1.0, [0, 0, 0]), [200, 100, 0]);
        assert_eq!(sample_bilinear_rgb(&v, 0.5, 1.0, [0, 0, 0]), [105, 60, 15]);
    }
}
