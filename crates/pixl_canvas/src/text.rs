use std::path::Path;

use ab_glyph::{point, Font as _, FontArc, FontVec, InvalidFont, PxScale, ScaleFont};
use anyhow::{Context, Result};
use log::debug;
use pixl_graphics_hal::Point;

use crate::Layer;

const WHITE: [u8; 4] = [255, 255, 255, 255];

/// A TrueType or OpenType font. Cheap to clone.
#[derive(Clone, Debug)]
pub struct Font(FontArc);

impl Font {
    pub fn try_from_bytes(data: Vec<u8>) -> Result<Self, InvalidFont> {
        let font = FontVec::try_from_vec(data)?;
        Ok(Self(FontArc::new(font)))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data =
            std::fs::read(path).with_context(|| format!("unable to read font {}", path.display()))?;

        let font = Self::try_from_bytes(data)
            .with_context(|| format!("invalid font {}", path.display()))?;

        debug!("loaded font {} with {} glyphs", path.display(), font.0.glyph_count());
        Ok(font)
    }
}

/// Text printed in white onto a [Layer], top-left corner at `position`.
pub struct Text {
    font: Font,
    size: f32,
    position: Point<i32>,
}

/// Baseline of the n-th line, given the top of the text block.
fn baseline(top: i32, ascent: f32, line_height: f32, line: usize) -> f32 {
    top as f32 + ascent + line as f32 * line_height
}

impl Text {
    /// `size` is the line height in pixels.
    pub fn new(font: Font, size: f32, position: impl Into<Point<i32>>) -> Self {
        Self {
            font,
            size,
            position: position.into(),
        }
    }

    pub fn set_size(&mut self, size: f32) {
        self.size = size;
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn set_position(&mut self, position: impl Into<Point<i32>>) {
        self.position = position.into();
    }

    pub fn position(&self) -> Point<i32> {
        self.position
    }

    /// Rasterizes `text` onto `layer`. A `\n` starts a new line.
    pub fn print(&self, layer: &mut Layer, text: &str) {
        let font = &self.font.0;
        let scaled = font.as_scaled(PxScale::from(self.size));
        let line_height = scaled.height() + scaled.line_gap();

        for (line, content) in text.lines().enumerate() {
            let y = baseline(self.position.y, scaled.ascent(), line_height, line);
            let mut x = self.position.x as f32;
            let mut previous = None;

            for c in content.chars() {
                let id = scaled.glyph_id(c);
                if let Some(previous) = previous {
                    x += scaled.kern(previous, id);
                }
                previous = Some(id);

                let glyph = id.with_scale_and_position(scaled.scale(), point(x, y));
                x += scaled.h_advance(id);

                let Some(outlined) = font.outline_glyph(glyph) else {
                    continue;
                };

                let bounds = outlined.px_bounds();
                let (left, top) = (bounds.min.x as i32, bounds.min.y as i32);
                outlined.draw(|gx, gy, coverage| {
                    layer.blend_pixel(left + gx as i32, top + gy as i32, WHITE, coverage);
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_not_a_font() {
        assert!(Font::try_from_bytes(vec![0; 64]).is_err());
    }

    #[test]
    fn load_names_the_file() {
        let error = Font::load("/nonexistent/DejaVuSans.ttf").unwrap_err();
        assert!(format!("{error:#}").contains("DejaVuSans.ttf"));
    }

    #[test]
    fn lines_advance_by_line_height() {
        assert_eq!(baseline(10, 12., 16., 0), 22.);
        assert_eq!(baseline(10, 12., 16., 2), 54.);
    }
}
