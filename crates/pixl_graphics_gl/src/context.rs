use std::cell::{Cell, RefCell, RefMut};

use enum_map::EnumMap;
use glow::HasContext;
use log::{info, warn};
use pixl_graphics_hal::{
    buffer::BufferKind, draw_params::Blend, GraphicsInfo, Rect, Rgba, Size, WindowBackend,
};

use crate::constants::GlConstant;

/// Objects and settings currently bound, so redundant GL calls are skipped.
#[derive(Default)]
pub struct GlState {
    pub clear_color: Option<Rgba<f32>>,
    pub blend: Option<Blend>,
    pub viewport: Option<Rect<u32>>,

    /// Only texture unit 0 is used.
    pub bound_texture: Option<glow::Texture>,
    pub bound_program: Option<glow::Program>,
    pub bound_buffers: EnumMap<BufferKind, Option<glow::Buffer>>,
    pub bound_frame_buffer: Option<glow::Framebuffer>,

    /// Bit mask of enabled vertex attribute arrays.
    pub enabled_attributes: u32,
}

pub struct GlContext<B: WindowBackend> {
    pub gl: glow::Context,
    pub backend: B,
    pub state: RefCell<GlState>,
    pub info: GraphicsInfo,
    pub frame_buffer_objects: bool,
    /// Cached for the current frame, reset on swap.
    pub default_frame_buffer_size: Cell<Option<Size<u32>>>,
}

impl<B: WindowBackend> GlContext<B> {
    pub unsafe fn new(backend: B) -> Self {
        let gl = glow::Context::from_loader_function(|s| backend.get_proc_address(s));

        gl.pixel_store_i32(glow::PACK_ALIGNMENT, 1);
        gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);

        let info = GraphicsInfo {
            vendor: gl.get_parameter_string(glow::VENDOR),
            renderer: gl.get_parameter_string(glow::RENDERER),
            version: gl.get_parameter_string(glow::VERSION),
            shading_language_version: gl.get_parameter_string(glow::SHADING_LANGUAGE_VERSION),
        };

        let extensions = gl.supported_extensions();
        let frame_buffer_objects = has_core_frame_buffers(&info.version)
            || extensions.contains("GL_ARB_framebuffer_object")
            || extensions.contains("GL_EXT_framebuffer_object");

        Self {
            gl,
            backend,
            state: RefCell::new(GlState::default()),
            info,
            frame_buffer_objects,
            default_frame_buffer_size: Cell::new(None),
        }
    }

    pub fn log_info(&self) {
        info!("GL vendor: {}", self.info.vendor);
        info!("GL renderer: {}", self.info.renderer);
        info!("GL version: {}", self.info.version);
        info!("GLSL version: {}", self.info.shading_language_version);

        if !self.frame_buffer_objects {
            warn!("frame buffer objects are not supported, render targets will fail");
        }
    }

    pub fn default_frame_buffer_size(&self) -> Size<u32> {
        match self.default_frame_buffer_size.get() {
            Some(size) => size,
            None => {
                let size = self.backend.default_frame_buffer_size();
                self.default_frame_buffer_size.set(Some(size));
                size
            }
        }
    }

    pub fn get_ref(&self) -> GlContextRef<'_> {
        GlContextRef {
            gl: &self.gl,
            state: self.state.borrow_mut(),
        }
    }
}

/// GLES2 and desktop GL 3.0 have frame buffer objects in core.
fn has_core_frame_buffers(version: &str) -> bool {
    if version.starts_with("OpenGL ES") {
        return true;
    }

    version
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .and_then(|major| major.parse::<u32>().ok())
        .map_or(false, |major| major >= 3)
}

pub struct GlContextRef<'a> {
    pub gl: &'a glow::Context,
    pub state: RefMut<'a, GlState>,
}

impl<'a> GlContextRef<'a> {
    pub fn set_blend(&mut self, blend: Option<Blend>) {
        if self.state.blend == blend {
            return;
        }

        unsafe {
            match blend {
                Some(blend) => {
                    if self.state.blend.is_none() {
                        self.gl.enable(glow::BLEND);
                    }
                    self.gl
                        .blend_func(blend.source.gl_const(), blend.destination.gl_const());
                }
                None => self.gl.disable(glow::BLEND),
            }
        }

        self.state.blend = blend;
    }

    pub fn set_viewport(&mut self, viewport: Rect<u32>) {
        if self.state.viewport != Some(viewport) {
            unsafe {
                let rect: Rect<i32> = (&viewport).into();
                self.gl.viewport(rect.x, rect.y, rect.w, rect.h)
            };
            self.state.viewport = Some(viewport);
        }
    }

    pub fn clear(&mut self, color: Rgba<f32>) {
        if self.state.clear_color != Some(color) {
            unsafe { self.gl.clear_color(color.r, color.g, color.b, color.a) };
            self.state.clear_color = Some(color);
        }

        unsafe { self.gl.clear(glow::COLOR_BUFFER_BIT) };
    }

    pub fn use_program(&mut self, program: Option<glow::Program>) {
        if self.state.bound_program != program {
            unsafe { self.gl.use_program(program) };
            self.state.bound_program = program;
        }
    }

    pub fn bind_texture(&mut self, texture: Option<glow::Texture>) {
        if self.state.bound_texture != texture {
            unsafe { self.gl.bind_texture(glow::TEXTURE_2D, texture) };
            self.state.bound_texture = texture;
        }
    }

    pub fn bind_frame_buffer(&mut self, frame_buffer: Option<glow::Framebuffer>) {
        if self.state.bound_frame_buffer != frame_buffer {
            unsafe { self.gl.bind_framebuffer(glow::FRAMEBUFFER, frame_buffer) };
            self.state.bound_frame_buffer = frame_buffer;
        }
    }

    pub fn bind_buffer(&mut self, kind: BufferKind, buffer: Option<glow::Buffer>) {
        if self.state.bound_buffers[kind] != buffer {
            unsafe { self.gl.bind_buffer(kind.gl_const(), buffer) };
            self.state.bound_buffers[kind] = buffer;
        }
    }

    /// Enables exactly the attribute arrays in `mask`.
    pub fn set_enabled_attributes(&mut self, mask: u32) {
        let changed = self.state.enabled_attributes ^ mask;

        for location in (0..32).filter(|&l| changed & (1 << l) != 0) {
            unsafe {
                if mask & (1 << location) != 0 {
                    self.gl.enable_vertex_attrib_array(location);
                } else {
                    self.gl.disable_vertex_attrib_array(location);
                }
            }
        }

        self.state.enabled_attributes = mask;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_buffers_are_core_since_gl3_and_gles2() {
        assert!(has_core_frame_buffers("3.3.0 NVIDIA 535.54"));
        assert!(has_core_frame_buffers("4.6 (Compatibility Profile) Mesa 23.1"));
        assert!(has_core_frame_buffers("OpenGL ES 2.0 Mesa 22.0"));
        assert!(!has_core_frame_buffers("2.1 Metal - 83.1"));
        assert!(!has_core_frame_buffers(""));
    }
}
