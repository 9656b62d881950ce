use pixl_graphics_hal::{
    buffer::{BufferKind, BufferUsage},
    draw_params::BlendingFactor,
    texture::PixelFormat,
    vertex::AttributeKind,
};

pub trait GlConstant {
    fn gl_const(self) -> u32;
}

impl GlConstant for AttributeKind {
    fn gl_const(self) -> u32 {
        match self {
            AttributeKind::I8 => glow::BYTE,
            AttributeKind::U8 => glow::UNSIGNED_BYTE,
            AttributeKind::I16 => glow::SHORT,
            AttributeKind::U16 => glow::UNSIGNED_SHORT,
            AttributeKind::F32 => glow::FLOAT,
        }
    }
}

impl GlConstant for BufferKind {
    fn gl_const(self) -> u32 {
        match self {
            BufferKind::Index => glow::ELEMENT_ARRAY_BUFFER,
            BufferKind::Vertex => glow::ARRAY_BUFFER,
        }
    }
}

impl GlConstant for BufferUsage {
    fn gl_const(self) -> u32 {
        match self {
            BufferUsage::Static => glow::STATIC_DRAW,
            BufferUsage::Dynamic => glow::DYNAMIC_DRAW,
            BufferUsage::Stream => glow::STREAM_DRAW,
        }
    }
}

impl GlConstant for BlendingFactor {
    fn gl_const(self) -> u32 {
        match self {
            BlendingFactor::Zero => glow::ZERO,
            BlendingFactor::One => glow::ONE,
            BlendingFactor::SourceAlpha => glow::SRC_ALPHA,
            BlendingFactor::OneMinusSourceAlpha => glow::ONE_MINUS_SRC_ALPHA,
            BlendingFactor::DestinationAlpha => glow::DST_ALPHA,
            BlendingFactor::OneMinusDestinationAlpha => glow::ONE_MINUS_DST_ALPHA,
        }
    }
}

impl GlConstant for PixelFormat {
    fn gl_const(self) -> u32 {
        match self {
            PixelFormat::Alpha => glow::ALPHA,
            PixelFormat::Rgb => glow::RGB,
            PixelFormat::Rgba => glow::RGBA,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_blending_maps_to_gl_factors() {
        assert_eq!(BlendingFactor::SourceAlpha.gl_const(), glow::SRC_ALPHA);
        assert_eq!(
            BlendingFactor::OneMinusSourceAlpha.gl_const(),
            glow::ONE_MINUS_SRC_ALPHA
        );
    }

    #[test]
    fn quad_indices_are_element_arrays() {
        assert_eq!(BufferKind::Index.gl_const(), glow::ELEMENT_ARRAY_BUFFER);
        assert_eq!(BufferUsage::Stream.gl_const(), glow::STREAM_DRAW);
    }
}
