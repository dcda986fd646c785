use crate::foundation::core::{Canvas, Rgb8};

/// Colour and depth buffers for one frame.
///
/// Coordinates put the origin at the bottom-left corner with +y up; rows are stored top-first
/// so exporting is a straight copy. Larger depth values are closer to the viewer.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawTarget {
    canvas: Canvas,
    color: Vec<Rgb8>,
    depth: Vec<f64>,
}

impl DrawTarget {
    /// A cleared target filled with `background` and an infinitely far depth buffer.
    pub fn new(canvas: Canvas, background: Rgb8) -> Self {
        let n = canvas.pixel_count();
        Self {
            canvas,
            color: vec![background; n],
            depth: vec![f64::NEG_INFINITY; n],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    /// Target dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        let (w, h) = (i64::from(self.canvas.width), i64::from(self.canvas.height));
        if x < 0 || y < 0 || x >= w || y >= h {
            return None;
        }
        Some(((h - 1 - y) * w + x) as usize)
    }

    /// Colour at `(x, y)`, `None` when out of bounds.
    pub fn pixel(&self, x: i64, y: i64) -> Option<Rgb8> {
        self.index(x, y).map(|i| self.color[i])
    }

    /// Depth at `(x, y)`, `None` when out of bounds.
    pub fn depth(&self, x: i64, y: i64) -> Option<f64> {
        self.index(x, y).map(|i| self.depth[i])
    }

    /// Write `color` at `(x, y)` when `z` is closer than what is stored there.
    ///
    /// Returns `true` when the pixel was written.
    pub fn plot(&mut self, x: i64, y: i64, z: f64, color: Rgb8) -> bool {
        let Some(i) = self.index(x, y) else {
            return false;
        };
        if z > self.depth[i] {
            self.depth[i] = z;
            self.color[i] = color;
            true
        } else {
            false
        }
    }

    /// Rows top-first, tightly packed RGB8.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.color.iter().flat_map(|c| [c.r, c.g, c.b]).collect()
    }

    /// Copy into an `image` buffer (top row first).
    pub fn to_rgb_image(&self) -> image::RgbImage {
        let w = self.canvas.width;
        image::RgbImage::from_fn(w, self.canvas.height, |x, row| {
            let c = self.color[(row * w + x) as usize];
            image::Rgb([c.r, c.g, c.b])
        })
    }
}
