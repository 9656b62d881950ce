use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
};

use glow::HasContext;
use log::{error, warn};
use pixl_graphics_hal::{
    shader::{Shader, ShaderError, ShaderSource, ShaderStage},
    uniforms::{Uniform, UniformValue},
    WindowBackend,
};

use crate::{context::GlContextRef, Gl};

pub struct GlUniform {
    pub location: glow::UniformLocation,
    /// Last value set, to skip redundant updates.
    pub value: Option<UniformValue>,
}

pub struct GlShader<B: WindowBackend> {
    pub ctx: Gl<B>,
    pub program: glow::Program,
    pub attributes: HashMap<String, u32>,
    pub uniforms: RefCell<HashMap<String, GlUniform>>,
    /// Missing uniforms already reported, so the log is not flooded every frame.
    missing: RefCell<HashSet<&'static str>>,
}

unsafe fn compile_stage(
    gl: &glow::Context,
    stage: ShaderStage,
    source: &str,
) -> Result<glow::Shader, ShaderError> {
    let kind = match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    };

    let shader = gl
        .create_shader(kind)
        .map_err(|e| ShaderError::Create(stage, e))?;

    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if !gl.get_shader_compile_status(shader) {
        let log = gl.get_shader_info_log(shader);
        error!("{stage:?} shader failed to compile:\n{log}");
        gl.delete_shader(shader);
        return Err(ShaderError::Compile { stage, log });
    }

    Ok(shader)
}

pub unsafe fn compile_program(
    gl: &glow::Context,
    source: &ShaderSource,
) -> Result<glow::Program, ShaderError> {
    let vertex = compile_stage(gl, ShaderStage::Vertex, source.vertex)?;
    let fragment = match compile_stage(gl, ShaderStage::Fragment, source.fragment) {
        Ok(fragment) => fragment,
        Err(e) => {
            gl.delete_shader(vertex);
            return Err(e);
        }
    };

    let program = gl.create_program().expect("unable to create a program");
    gl.attach_shader(program, vertex);
    gl.attach_shader(program, fragment);
    gl.link_program(program);

    for shader in [vertex, fragment] {
        gl.detach_shader(program, shader);
        gl.delete_shader(shader);
    }

    if !gl.get_program_link_status(program) {
        let log = gl.get_program_info_log(program);
        error!("shader program failed to link:\n{log}");
        gl.delete_program(program);
        return Err(ShaderError::Link(log));
    }

    Ok(program)
}

unsafe fn get_uniforms(gl: &glow::Context, program: glow::Program) -> HashMap<String, GlUniform> {
    let count = gl.get_active_uniforms(program);

    (0..count)
        .filter_map(|i| gl.get_active_uniform(program, i))
        .filter_map(|uniform| {
            let location = gl.get_uniform_location(program, &uniform.name)?;
            Some((
                uniform.name,
                GlUniform {
                    location,
                    value: None,
                },
            ))
        })
        .collect()
}

unsafe fn get_attributes(gl: &glow::Context, program: glow::Program) -> HashMap<String, u32> {
    let count = gl.get_active_attributes(program);

    (0..count)
        .filter_map(|i| gl.get_active_attribute(program, i))
        .filter_map(|attribute| {
            let location = gl.get_attrib_location(program, &attribute.name)?;
            Some((attribute.name, location))
        })
        .collect()
}

impl<B: WindowBackend> Shader<Gl<B>> for GlShader<B> {
    fn new(ctx: Gl<B>, source: &ShaderSource) -> Result<Self, ShaderError> {
        let (program, uniforms, attributes) = unsafe {
            let gl = &ctx.gl;
            let program = compile_program(gl, source)?;
            (
                program,
                get_uniforms(gl, program),
                get_attributes(gl, program),
            )
        };

        Ok(Self {
            ctx,
            program,
            attributes,
            uniforms: RefCell::new(uniforms),
            missing: RefCell::new(HashSet::new()),
        })
    }
}

impl<B: WindowBackend> GlShader<B> {
    /// Sets uniforms on this program, which must be in use. Uniforms the
    /// program does not declare are reported once and skipped.
    pub(crate) fn set_uniforms(&self, ctx: &GlContextRef, uniforms: &[Uniform]) {
        let mut declared = self.uniforms.borrow_mut();

        for uniform in uniforms {
            let Some(gl_uniform) = declared.get_mut(uniform.name) else {
                if self.missing.borrow_mut().insert(uniform.name) {
                    warn!("shader has no active uniform {:?}", uniform.name);
                }
                continue;
            };

            if gl_uniform.value == Some(uniform.value) {
                continue;
            }

            let location = Some(&gl_uniform.location);
            unsafe {
                match uniform.value {
                    UniformValue::Int(v) => ctx.gl.uniform_1_i32(location, v),
                    UniformValue::Float(v) => ctx.gl.uniform_1_f32(location, v),
                    UniformValue::Vec2([x, y]) => ctx.gl.uniform_2_f32(location, x, y),
                    UniformValue::Vec3([x, y, z]) => ctx.gl.uniform_3_f32(location, x, y, z),
                    UniformValue::Vec4([x, y, z, w]) => {
                        ctx.gl.uniform_4_f32(location, x, y, z, w)
                    }
                }
            }

            gl_uniform.value = Some(uniform.value);
        }
    }

    /// Points a sampler uniform at texture unit 0. Samplers the program does
    /// not declare are ignored.
    pub(crate) fn set_sampler(&self, ctx: &GlContextRef, name: &str) {
        let mut declared = self.uniforms.borrow_mut();
        let Some(sampler) = declared.get_mut(name) else {
            return;
        };

        let unit = UniformValue::Int(0);
        if sampler.value != Some(unit) {
            unsafe { ctx.gl.uniform_1_i32(Some(&sampler.location), 0) };
            sampler.value = Some(unit);
        }
    }
}

impl<B: WindowBackend> Drop for GlShader<B> {
    fn drop(&mut self) {
        let mut ctx = self.ctx.get_ref();
        if ctx.state.bound_program == Some(self.program) {
            ctx.use_program(None);
        }

        unsafe { ctx.gl.delete_program(self.program) };
    }
}
