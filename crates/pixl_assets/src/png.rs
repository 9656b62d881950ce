use std::path::Path;

use anyhow::{Context, Result};
use pixl_geometry::Size;
use rgb::ComponentBytes;

/// Decoded RGBA8 pixels, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub pixels: Vec<u8>,
    pub size: Size<u32>,
}

impl Image {
    /// RGBA of a pixel, `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.w || y >= self.size.h {
            return None;
        }

        let i = (y as usize * self.size.w as usize + x as usize) * 4;
        self.pixels[i..i + 4].try_into().ok()
    }
}

pub fn decode_png(png: &[u8]) -> Result<Image> {
    let image = lodepng::decode32(png)?;
    let size = Size::new(image.width as u32, image.height as u32);
    let pixels = image.buffer.as_bytes().to_owned();

    Ok(Image { pixels, size })
}

pub fn load_png(path: impl AsRef<Path>) -> Result<Image> {
    let path = path.as_ref();
    let bytes =
        std::fs::read(path).with_context(|| format!("unable to read image {}", path.display()))?;

    decode_png(&bytes).with_context(|| format!("unable to decode image {}", path.display()))
}
