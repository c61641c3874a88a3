use crate::color::Color;
use crate::regions::Region;
use image::RgbaImage;

/// Transparent canvas that accumulates brush strokes, one region at a time.
pub struct Painting {
    canvas: RgbaImage,
    paint_color: Color,
}

impl Painting {
    pub fn new(width: u32, height: u32, paint_color: Color) -> Self {
        Self {
            canvas: RgbaImage::new(width, height),
            paint_color,
        }
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.canvas.dimensions()
    }

    pub fn paint_color(&self) -> Color {
        self.paint_color
    }

    pub fn set_paint_color(&mut self, color: Color) {
        self.paint_color = color;
    }

    /// Stamp every in-bounds point of `region` with the paint color, fully opaque.
    pub fn paint_region(&mut self, region: &Region) {
        let (width, height) = self.canvas.dimensions();
        let pixel = self.paint_color.to_pixel(u8::MAX);
        for p in region.points() {
            if p.x < width && p.y < height {
                self.canvas.put_pixel(p.x, p.y, pixel);
            }
        }
    }

    pub fn clear(&mut self) {
        let (width, height) = self.canvas.dimensions();
        self.canvas = RgbaImage::new(width, height);
    }
}
