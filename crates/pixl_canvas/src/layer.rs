use pixl_assets::Image;
use pixl_graphics_hal::{
    texture::{PixelFormat, Texture},
    Graphics, Rect, Rgba, Size,
};

/// An RGBA8 canvas in CPU memory, top row first. Images and text are
/// composited onto it, then the whole canvas is uploaded to a texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    size: Size<u32>,
    pixels: Vec<u8>,
}

/// Source-over compositing of a straight alpha color onto a straight alpha
/// pixel. `coverage` scales the source alpha, as glyph rasterization yields.
fn blend(dst: &mut [u8], src: [u8; 4], coverage: f32) {
    let sa = src[3] as f32 / 255. * coverage.clamp(0., 1.);
    if sa <= 0. {
        return;
    }

    let da = dst[3] as f32 / 255.;
    let out_a = sa + da * (1. - sa);

    for c in 0..3 {
        let s = src[c] as f32;
        let d = dst[c] as f32;
        dst[c] = ((s * sa + d * da * (1. - sa)) / out_a).round() as u8;
    }
    dst[3] = (out_a * 255.).round() as u8;
}

impl Layer {
    pub fn new(size: impl Into<Size<u32>>) -> Self {
        let size = size.into();
        Self {
            size,
            pixels: vec![0; size.area() * 4],
        }
    }

    pub fn size(&self) -> Size<u32> {
        self.size
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Makes every pixel fully transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.offset(x as i32, y as i32)?;
        self.pixels[i..i + 4].try_into().ok()
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.size.w || y as u32 >= self.size.h {
            return None;
        }

        Some((y as usize * self.size.w as usize + x as usize) * 4)
    }

    /// Composites `color` over one pixel. Pixels outside the layer are ignored.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: [u8; 4], coverage: f32) {
        if let Some(i) = self.offset(x, y) {
            blend(&mut self.pixels[i..i + 4], color, coverage);
        }
    }

    /// Composites `image` with its top-left corner at (x, y), clipped to the layer.
    pub fn draw_image(&mut self, image: &Image, x: i32, y: i32) {
        if image.size.is_empty() {
            return;
        }

        let w = image.size.w as usize;

        for (row, line) in image.pixels.chunks_exact(w * 4).enumerate() {
            for (column, pixel) in line.chunks_exact(4).enumerate() {
                let color = [pixel[0], pixel[1], pixel[2], pixel[3]];
                self.blend_pixel(x + column as i32, y + row as i32, color, 1.);
            }
        }
    }

    /// Composites a solid rectangle, clipped to the layer.
    pub fn fill_rect(&mut self, rect: Rect<i32>, color: Rgba<u8>) {
        let color = [color.r, color.g, color.b, color.a];

        for y in rect.y.max(0)..rect.bottom().min(self.size.h as i32) {
            for x in rect.x.max(0)..rect.right().min(self.size.w as i32) {
                self.blend_pixel(x, y, color, 1.);
            }
        }
    }

    /// Replaces the contents of `texture`, which takes the size of the layer.
    pub fn upload<G: Graphics>(&self, texture: &impl Texture<G>) {
        texture.write(PixelFormat::Rgba, self.size, &self.pixels);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(w: u32, h: u32, color: [u8; 4]) -> Image {
        Image {
            pixels: color.repeat((w * h) as usize),
            size: Size::new(w, h),
        }
    }

    #[test]
    fn starts_transparent() {
        let layer = Layer::new((4, 3));

        assert_eq!(layer.pixels().len(), 48);
        assert_eq!(layer.pixel(3, 2), Some([0, 0, 0, 0]));
        assert_eq!(layer.pixel(4, 0), None);
    }

    #[test]
    fn opaque_source_replaces() {
        let mut layer = Layer::new((2, 2));
        layer.fill_rect(Rect::new(0, 0, 2, 2), Rgba::new(0, 0, 255, 255));
        layer.draw_image(&image(1, 1, [255, 0, 0, 255]), 1, 1);

        assert_eq!(layer.pixel(1, 1), Some([255, 0, 0, 255]));
        assert_eq!(layer.pixel(0, 0), Some([0, 0, 255, 255]));
    }

    #[test]
    fn half_transparent_source_mixes() {
        let mut layer = Layer::new((1, 1));
        layer.fill_rect(Rect::new(0, 0, 1, 1), Rgba::new(0, 0, 0, 255));
        layer.draw_image(&image(1, 1, [255, 255, 255, 128]), 0, 0);

        assert_eq!(layer.pixel(0, 0), Some([128, 128, 128, 255]));
    }

    #[test]
    fn source_over_transparent_keeps_color() {
        let mut layer = Layer::new((1, 1));
        layer.draw_image(&image(1, 1, [200, 100, 50, 64]), 0, 0);

        assert_eq!(layer.pixel(0, 0), Some([200, 100, 50, 64]));
    }

    #[test]
    fn images_are_clipped() {
        let mut layer = Layer::new((3, 3));
        layer.draw_image(&image(2, 2, [9, 9, 9, 255]), -1, 2);

        assert_eq!(layer.pixel(0, 2), Some([9, 9, 9, 255]));
        assert_eq!(layer.pixel(1, 2), Some([0, 0, 0, 0]));
        assert_eq!(layer.pixel(0, 1), Some([0, 0, 0, 0]));
    }

    #[test]
    fn empty_images_draw_nothing() {
        let mut layer = Layer::new((3, 3));
        layer.draw_image(&image(0, 3, [9, 9, 9, 255]), 0, 0);
        layer.draw_image(&image(2, 0, [9, 9, 9, 255]), 0, 0);

        assert!(layer.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn clear_resets_pixels() {
        let mut layer = Layer::new((2, 1));
        layer.fill_rect(Rect::new(-5, -5, 10, 10), Rgba::new(1, 2, 3, 255));
        assert_eq!(layer.pixel(1, 0), Some([1, 2, 3, 255]));

        layer.clear();
        assert!(layer.pixels().iter().all(|&b| b == 0));
    }
}
