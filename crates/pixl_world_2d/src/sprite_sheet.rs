use derive_more::Constructor;
use pixl_geometry::{Rect, Size};

use crate::Error;

/// A cell of a sprite sheet. Rows select an animation, columns are its frames.
#[derive(Constructor, Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame {
    pub row: u32,
    pub column: u32,
}

/// An image split into a grid of equally sized cells.
///
/// Texture coordinates have their origin in the top-left corner of the image,
/// with v growing downwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteSheet {
    image_size: Size<u32>,
    cell_size: Size<u32>,

    texel_size: [f32; 2],
}

impl SpriteSheet {
    pub fn new(
        image_size: impl Into<Size<u32>>,
        cell_size: impl Into<Size<u32>>,
    ) -> Result<Self, Error> {
        let image_size = image_size.into();
        let cell_size = cell_size.into();

        if cell_size.is_empty()
            || image_size.is_empty()
            || image_size.w % cell_size.w != 0
            || image_size.h % cell_size.h != 0
        {
            return Err(Error::InvalidSpriteSheet {
                image: image_size,
                cell: cell_size,
            });
        }

        Ok(Self {
            image_size,
            cell_size,
            texel_size: [
                cell_size.w as f32 / image_size.w as f32,
                cell_size.h as f32 / image_size.h as f32,
            ],
        })
    }

    pub fn image_size(&self) -> Size<u32> {
        self.image_size
    }

    pub fn cell_size(&self) -> Size<u32> {
        self.cell_size
    }

    /// Frames per row.
    pub fn columns(&self) -> u32 {
        self.image_size.w / self.cell_size.w
    }

    pub fn rows(&self) -> u32 {
        self.image_size.h / self.cell_size.h
    }

    /// The cell in texture space.
    pub fn uv_rect(&self, frame: Frame) -> Rect<f32> {
        Rect::new(
            frame.column as f32 * self.texel_size[0],
            frame.row as f32 * self.texel_size[1],
            self.texel_size[0],
            self.texel_size[1],
        )
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::ErrorKind;

    #[test]
    fn grid_dimensions() {
        let sheet = SpriteSheet::new((92, 46), (23, 23)).unwrap();

        assert_eq!(sheet.columns(), 4);
        assert_eq!(sheet.rows(), 2);
    }

    #[test]
    fn uv_rect_of_a_cell() {
        let sheet = SpriteSheet::new((92, 46), (23, 23)).unwrap();
        let uv = sheet.uv_rect(Frame::new(1, 2));

        assert_approx_eq!(f32, uv.x, 0.5);
        assert_approx_eq!(f32, uv.y, 0.5);
        assert_approx_eq!(f32, uv.x + uv.w, 0.75);
        assert_approx_eq!(f32, uv.y + uv.h, 1.0);
    }

    #[test]
    fn rejects_zero_cells() {
        let error = SpriteSheet::new((92, 23), (0, 23)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn rejects_images_not_divisible_by_cell() {
        assert!(SpriteSheet::new((100, 23), (23, 23)).is_err());
        assert!(SpriteSheet::new((92, 30), (23, 23)).is_err());
    }
}
