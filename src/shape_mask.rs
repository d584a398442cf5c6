//! Lumen Photos - Shape Mask Rendering
//!
//! Crops/masks decoded thumbnails into display shapes. A [`ShapeMask`]
//! decides its bounding rect from the source dimensions and then draws
//! itself through a shader that samples the source image; everything
//! it leaves untouched stays transparent.

use image::{DynamicImage, Rgba, RgbaImage};

/// Bounding rectangle of a mask within a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskRect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl MaskRect {
    pub fn right(&self) -> u32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.top + self.height
    }
}

/// Centered square: side = min(width, height), symmetric margins.
pub fn center_square_rect(source_width: u32, source_height: u32) -> MaskRect {
    let side = source_width.min(source_height);
    let horizontal_margin = (source_width - side) / 2;
    let vertical_margin = (source_height - side) / 2;
    MaskRect {
        left: horizontal_margin,
        top: vertical_margin,
        width: side,
        height: side,
    }
}

/// Samples the source image, translated so the mask rect's top-left
/// maps to the canvas origin. Out-of-bounds reads clamp to the edge.
pub struct SourceShader {
    pixels: RgbaImage,
    dx: i64,
    dy: i64,
}

impl SourceShader {
    fn new(pixels: RgbaImage, rect: &MaskRect) -> Self {
        Self {
            pixels,
            dx: rect.left as i64,
            dy: rect.top as i64,
        }
    }

    pub fn sample(&self, x: u32, y: u32) -> Rgba<u8> {
        let max_x = self.pixels.width() as i64 - 1;
        let max_y = self.pixels.height() as i64 - 1;
        let sx = (x as i64 + self.dx).clamp(0, max_x) as u32;
        let sy = (y as i64 + self.dy).clamp(0, max_y) as u32;
        *self.pixels.get_pixel(sx, sy)
    }
}

/// A crop region plus a draw routine - the capability pair a display
/// shape needs.
pub trait ShapeMask: Send + Sync {
    /// Stable name, used for cache keys.
    fn name(&self) -> &'static str;

    /// Bounding rect of the shape within a source of the given size.
    fn rect(&self, source_width: u32, source_height: u32) -> MaskRect;

    /// Paint the shape onto the canvas, reading pixels from the shader.
    fn draw(&self, canvas: &mut RgbaImage, shader: &SourceShader);
}

/// Applies a [`ShapeMask`] to decoded images.
pub struct ShapeMaskTransformation<M: ShapeMask> {
    mask: M,
}

impl<M: ShapeMask> ShapeMaskTransformation<M> {
    pub fn new(mask: M) -> Self {
        Self { mask }
    }

    /// Stable cache key for an external image-caching layer.
    pub fn key(&self) -> String {
        format!("ShapeMask-{}", self.mask.name())
    }

    /// Render the mask over the source image.
    ///
    /// Consumes the source: its buffer backs the shader during the draw
    /// and is released when the transform returns.
    pub fn transform(&self, source: DynamicImage) -> RgbaImage {
        let rgba = source.into_rgba8();
        let rect = self.mask.rect(rgba.width(), rgba.height());
        if rect.width == 0 || rect.height == 0 {
            return RgbaImage::new(rect.width, rect.height);
        }

        let shader = SourceShader::new(rgba, &rect);
        let mut canvas = RgbaImage::new(rect.width, rect.height);
        self.mask.draw(&mut canvas, &shader);
        canvas
    }
}

/// Plain centered square crop.
pub struct CenterSquareMask;

impl ShapeMask for CenterSquareMask {
    fn name(&self) -> &'static str {
        "center-square"
    }

    fn rect(&self, source_width: u32, source_height: u32) -> MaskRect {
        center_square_rect(source_width, source_height)
    }

    fn draw(&self, canvas: &mut RgbaImage, shader: &SourceShader) {
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                canvas.put_pixel(x, y, shader.sample(x, y));
            }
        }
    }
}

/// Circle inscribed in the centered square.
pub struct CircleMask;

impl ShapeMask for CircleMask {
    fn name(&self) -> &'static str {
        "circle"
    }

    fn rect(&self, source_width: u32, source_height: u32) -> MaskRect {
        center_square_rect(source_width, source_height)
    }

    fn draw(&self, canvas: &mut RgbaImage, shader: &SourceShader) {
        let cx = canvas.width() as f64 / 2.0;
        let cy = canvas.height() as f64 / 2.0;
        let radius = canvas.width().min(canvas.height()) as f64 / 2.0;

        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= radius * radius {
                    canvas.put_pixel(x, y, shader.sample(x, y));
                }
            }
        }
    }
}
