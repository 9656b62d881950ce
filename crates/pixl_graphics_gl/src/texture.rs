use std::cell::Cell;

use glow::{HasContext, PixelUnpackData};
use pixl_graphics_hal::{
    texture::{PixelFormat, Texture},
    Rect, Size, WindowBackend,
};

use crate::{constants::GlConstant, Gl};

fn expected_len(format: PixelFormat, size: Size<u32>) -> usize {
    size.area() * format.bytes_per_pixel()
}

pub struct GlTexture<B: WindowBackend> {
    ctx: Gl<B>,
    format: PixelFormat,
    pub size: Cell<Size<u32>>,
    pub texture: glow::Texture,
}

impl<B: WindowBackend> Texture<Gl<B>> for GlTexture<B> {
    fn new(ctx: Gl<B>, format: PixelFormat, size: Size<u32>, bytes: Option<&[u8]>) -> Self {
        if let Some(bytes) = bytes {
            assert_eq!(bytes.len(), expected_len(format, size));
        }

        let texture = unsafe {
            let mut ctx = ctx.get_ref();
            let texture = ctx.gl.create_texture().expect("unable to create a texture");
            ctx.bind_texture(Some(texture));

            let gl = ctx.gl;
            for (parameter, value) in [
                (glow::TEXTURE_MIN_FILTER, glow::NEAREST),
                (glow::TEXTURE_MAG_FILTER, glow::NEAREST),
                (glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE),
                (glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE),
            ] {
                gl.tex_parameter_i32(glow::TEXTURE_2D, parameter, value as i32);
            }

            let format = format.gl_const();
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                format as i32,
                size.w as i32,
                size.h as i32,
                0,
                format,
                glow::UNSIGNED_BYTE,
                bytes,
            );

            texture
        };

        GlTexture {
            ctx,
            format,
            size: Cell::new(size),
            texture,
        }
    }

    fn size(&self) -> Size<u32> {
        self.size.get()
    }

    fn write(&self, format: PixelFormat, size: Size<u32>, bytes: &[u8]) {
        assert_eq!(format, self.format, "format must not change");
        assert_eq!(bytes.len(), expected_len(format, size));

        let mut ctx = self.ctx.get_ref();
        ctx.bind_texture(Some(self.texture));

        let format = format.gl_const();
        unsafe {
            ctx.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                format as i32,
                size.w as i32,
                size.h as i32,
                0,
                format,
                glow::UNSIGNED_BYTE,
                Some(bytes),
            )
        };

        self.size.set(size);
    }

    fn write_rect(&self, format: PixelFormat, rect: Rect<u32>, bytes: &[u8]) {
        assert_eq!(format, self.format, "format must not change");
        assert_eq!(bytes.len(), expected_len(format, rect.size()));

        let mut ctx = self.ctx.get_ref();
        ctx.bind_texture(Some(self.texture));

        unsafe {
            ctx.gl.tex_sub_image_2d(
                glow::TEXTURE_2D,
                0,
                rect.x as i32,
                rect.y as i32,
                rect.w as i32,
                rect.h as i32,
                format.gl_const(),
                glow::UNSIGNED_BYTE,
                PixelUnpackData::Slice(bytes),
            )
        };
    }
}

impl<B: WindowBackend> Drop for GlTexture<B> {
    fn drop(&mut self) {
        let mut ctx = self.ctx.get_ref();
        if ctx.state.bound_texture == Some(self.texture) {
            ctx.bind_texture(None);
        }

        unsafe { ctx.gl.delete_texture(self.texture) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_length_counts_channels() {
        assert_eq!(expected_len(PixelFormat::Rgba, Size::new(92, 23)), 92 * 23 * 4);
        assert_eq!(expected_len(PixelFormat::Alpha, Size::new(3, 2)), 6);
    }
}
