use std::rc::Rc;

use buffer::GlBuffer;
use context::GlContext;
use derive_more::Deref;
use frame_buffer::GlFrameBuffer;
use pixl_graphics_hal::{Graphics, GraphicsInfo, WindowBackend};
use shader::GlShader;
use texture::GlTexture;

mod buffer;
mod constants;
mod context;
mod frame_buffer;
mod shader;
mod texture;

/// OpenGL 2.1 / GLES2 level graphics through glow.
#[derive(Deref)]
pub struct Gl<B: WindowBackend>(pub Rc<GlContext<B>>);

impl<B: WindowBackend> Clone for Gl<B> {
    fn clone(&self) -> Self {
        Gl(self.0.clone())
    }
}

impl<B: WindowBackend> Graphics for Gl<B> {
    type Backend = B;
    type Shader = GlShader<B>;
    type Texture = GlTexture<B>;
    type FrameBuffer = GlFrameBuffer<B>;
    type ByteBuffer = GlBuffer<B>;

    fn new(backend: B) -> Self {
        let ctx = unsafe { GlContext::new(backend) };
        ctx.log_info();

        Self(Rc::new(ctx))
    }

    fn info(&self) -> GraphicsInfo {
        self.info.clone()
    }

    fn swap_buffers(&self) {
        self.get_ref().bind_frame_buffer(None);
        self.default_frame_buffer_size.take();
        self.backend.swap_buffers();
    }
}
