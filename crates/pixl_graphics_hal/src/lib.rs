use std::{ffi::c_void, rc::Rc};

use buffer::{Buffer, BufferData, BufferKind, BufferUsage, ByteBuffer};
use bytemuck::Pod;
use frame_buffer::{FrameBuffer, FrameBufferError};
use shader::{Shader, ShaderError, ShaderSource};
use texture::{PixelFormat, Texture};

pub use pixl_geometry::*;

pub mod buffer;
pub mod draw_params;
pub mod frame_buffer;
pub mod quad;
pub mod shader;
pub mod texture;
pub mod uniforms;
pub mod vertex;

pub trait WindowBackend
where
    Self: 'static,
{
    /// Called when a frame finishes rendering and should be displayed on screen.
    fn swap_buffers(&self);

    fn get_proc_address(&self, symbol: &str) -> *const c_void;

    /// Size of the screen frame buffer in pixels. Queried on every use of the
    /// default frame buffer, so window resizes are picked up.
    fn default_frame_buffer_size(&self) -> Size<u32>;
}

/// Driver facts reported once at start-up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphicsInfo {
    pub vendor: String,
    pub renderer: String,
    pub version: String,
    pub shading_language_version: String,
}

pub trait Graphics
where
    Self: Sized + Clone + 'static,
{
    type Backend: WindowBackend;
    type Shader: Shader<Self>;
    type Texture: Texture<Self>;
    type FrameBuffer: FrameBuffer<Self>;
    type ByteBuffer: ByteBuffer<Self>;

    fn new(backend: Self::Backend) -> Self;

    fn info(&self) -> GraphicsInfo;

    fn default_frame_buffer(&self) -> Self::FrameBuffer {
        Self::FrameBuffer::default(self.clone())
    }

    fn new_shader(&self, source: &ShaderSource) -> Result<Self::Shader, ShaderError> {
        Self::Shader::new(self.clone(), source)
    }

    fn new_buffer<'a, T: Pod>(
        &self,
        kind: BufferKind,
        usage: BufferUsage,
        data: impl Into<BufferData<'a, T>>,
    ) -> Buffer<Self, T> {
        Buffer::new(self.clone(), kind, usage, data.into())
    }

    fn new_texture(
        &self,
        format: PixelFormat,
        size: impl Into<Size<u32>>,
        bytes: Option<&[u8]>,
    ) -> Self::Texture {
        Self::Texture::new(self.clone(), format, size.into(), bytes)
    }

    fn new_frame_buffer(
        &self,
        texture: Rc<Self::Texture>,
    ) -> Result<Self::FrameBuffer, FrameBufferError> {
        Self::FrameBuffer::new(self.clone(), texture)
    }

    fn swap_buffers(&self);
}
