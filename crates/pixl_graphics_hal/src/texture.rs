use crate::{Graphics, Rect, Size};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    Alpha,
    Rgb,
    Rgba,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Alpha => 1,
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }
}

/// A GPU texture, sampled with nearest filtering and clamped to its edges.
/// Released when dropped.
pub trait Texture<G: Graphics> {
    fn new(renderer: G, format: PixelFormat, size: Size<u32>, bytes: Option<&[u8]>) -> Self;

    fn size(&self) -> Size<u32>;

    /// Replaces the whole image, reallocating if the size changed.
    fn write(&self, format: PixelFormat, size: Size<u32>, bytes: &[u8]);

    fn write_rect(&self, format: PixelFormat, rect: Rect<u32>, bytes: &[u8]);
}
