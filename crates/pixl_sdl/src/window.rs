use std::{ffi::c_void, rc::Rc};

use anyhow::{Context, Error, Result};
use log::{info, warn};
use pixl_core::PixlConfig;
use pixl_graphics_hal::{Size, WindowBackend};
use sdl2::video::{GLProfile, SwapInterval};

use crate::{SdlClock, SdlEvents};

pub struct SdlWindowBackend(Rc<sdl2::video::Window>);

impl WindowBackend for SdlWindowBackend {
    fn swap_buffers(&self) {
        self.0.gl_swap_window();
    }

    fn get_proc_address(&self, symbol: &str) -> *const c_void {
        self.0.subsystem().gl_get_proc_address(symbol) as *const c_void
    }

    fn default_frame_buffer_size(&self) -> Size<u32> {
        self.0.drawable_size().into()
    }
}

/// An SDL window with a current OpenGL context.
///
/// Must outlive every graphics object created through its backend.
pub struct SdlWindow {
    _joysticks: Vec<sdl2::joystick::Joystick>,
    _gl_context: sdl2::video::GLContext,
    window: Rc<sdl2::video::Window>,
    video: sdl2::VideoSubsystem,
    sdl: sdl2::Sdl,
}

impl SdlWindow {
    pub fn new(config: &PixlConfig) -> Result<Self> {
        let sdl = sdl2::init().map_err(Error::msg).context("unable to init SDL")?;
        let video = sdl.video().map_err(Error::msg).context("unable to init video")?;

        let gl_attr = video.gl_attr();
        gl_attr.set_context_profile(GLProfile::Compatibility);
        gl_attr.set_double_buffer(true);
        if config.multisample > 0 {
            gl_attr.set_multisample_buffers(1);
            gl_attr.set_multisample_samples(config.multisample);
        }

        let window = video
            .window(&config.title, config.width, config.height)
            .opengl()
            .position_centered()
            .build()
            .context("unable to create a window")?;

        let gl_context = window
            .gl_create_context()
            .map_err(Error::msg)
            .context("unable to create a GL context")?;

        window
            .gl_make_current(&gl_context)
            .map_err(Error::msg)
            .context("unable to make the GL context current")?;

        if config.vsync {
            if let Err(e) = video.gl_set_swap_interval(SwapInterval::VSync) {
                warn!("unable to enable vsync: {e}");
            }
        }

        sdl.mouse().show_cursor(config.show_cursor);

        let joysticks = open_joysticks(&sdl);

        Ok(Self {
            _joysticks: joysticks,
            _gl_context: gl_context,
            window: Rc::new(window),
            video,
            sdl,
        })
    }

    pub fn backend(&self) -> SdlWindowBackend {
        SdlWindowBackend(self.window.clone())
    }

    pub fn events(&self) -> Result<SdlEvents> {
        let pump = self
            .sdl
            .event_pump()
            .map_err(Error::msg)
            .context("unable to get the event pump")?;

        Ok(SdlEvents::new(pump))
    }

    pub fn clock(&self) -> Result<SdlClock> {
        let timer = self
            .sdl
            .timer()
            .map_err(Error::msg)
            .context("unable to get the SDL timer")?;

        Ok(SdlClock::new(timer))
    }

    pub fn video(&self) -> &sdl2::VideoSubsystem {
        &self.video
    }
}

/// Opens every attached joystick and lists them in the log. Joysticks are
/// optional, so failures are only logged.
fn open_joysticks(sdl: &sdl2::Sdl) -> Vec<sdl2::joystick::Joystick> {
    let subsystem = match sdl.joystick() {
        Ok(subsystem) => subsystem,
        Err(e) => {
            warn!("joysticks are unavailable: {e}");
            return Vec::new();
        }
    };

    let count = subsystem.num_joysticks().unwrap_or(0);
    if count == 0 {
        return Vec::new();
    }

    info!("joysticks found:");
    (0..count)
        .filter_map(|i| {
            let name = subsystem
                .name_for_index(i)
                .unwrap_or_else(|_| "unknown".to_owned());
            info!(" {name} ({i})");

            subsystem
                .open(i)
                .map_err(|e| warn!("unable to open joystick {i}: {e}"))
                .ok()
        })
        .collect()
}
