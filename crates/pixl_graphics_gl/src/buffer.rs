use glow::HasContext;
use pixl_graphics_hal::{
    buffer::{BufferData, BufferKind, BufferUsage, ByteBuffer},
    WindowBackend,
};

use crate::{constants::GlConstant, Gl};

pub struct GlBuffer<B: WindowBackend> {
    pub ctx: Gl<B>,
    pub len: usize,
    pub kind: BufferKind,
    pub buffer: glow::Buffer,
}

impl<B: WindowBackend> ByteBuffer<Gl<B>> for GlBuffer<B> {
    fn new(ctx: Gl<B>, kind: BufferKind, usage: BufferUsage, data: BufferData<u8>) -> Self {
        let len = data.len();

        let buffer = unsafe {
            let mut ctx = ctx.get_ref();
            let buffer = ctx.gl.create_buffer().expect("unable to create a buffer");

            ctx.bind_buffer(kind, Some(buffer));

            let target = kind.gl_const();
            let usage = usage.gl_const();

            match data {
                BufferData::Data(data) => ctx.gl.buffer_data_u8_slice(target, data, usage),
                BufferData::Empty(len) => ctx.gl.buffer_data_size(target, len as i32, usage),
            }

            buffer
        };

        Self {
            ctx,
            len,
            kind,
            buffer,
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn write(&self, offset: usize, data: &[u8]) {
        assert!(
            offset + data.len() <= self.len,
            "attempting to write beyond buffer limits"
        );

        let mut ctx = self.ctx.get_ref();
        ctx.bind_buffer(self.kind, Some(self.buffer));

        unsafe {
            ctx.gl
                .buffer_sub_data_u8_slice(self.kind.gl_const(), offset as i32, data)
        };
    }
}

impl<B: WindowBackend> Drop for GlBuffer<B> {
    fn drop(&mut self) {
        let mut ctx = self.ctx.get_ref();
        if ctx.state.bound_buffers[self.kind] == Some(self.buffer) {
            ctx.bind_buffer(self.kind, None);
        }

        unsafe { ctx.gl.delete_buffer(self.buffer) };
    }
}
