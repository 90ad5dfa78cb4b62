//! Per-demo window and backend settings.

/// Settings for one demo window.
///
/// The GL and Metal constructors mirror how each family of demos sets up its
/// window: the GL demo asks for a fixed-size window, the Metal demos let the
/// window resize, sync to the display and count frames.
#[derive(Clone, Debug)]
pub struct DemoConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub backends: wgpu::Backends,
    pub resizable: bool,
    pub vsync: bool,
    pub clear_colour: wgpu::Color,
    pub count_frames: bool,
}

impl DemoConfig {
    pub const DEFAULT_WIDTH: u32 = 800;
    pub const DEFAULT_HEIGHT: u32 = 600;

    pub fn gl(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            backends: wgpu::Backends::GL,
            resizable: false,
            vsync: true,
            clear_colour: wgpu::Color::BLACK,
            count_frames: false,
        }
    }

    pub fn metal(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            backends: wgpu::Backends::METAL,
            resizable: true,
            vsync: true,
            clear_colour: wgpu::Color::BLACK,
            count_frames: true,
        }
    }

    /// Human readable name of the configured backend, used in error messages.
    pub fn backend_name(&self) -> &'static str {
        backend_name(self.backends)
    }
}

pub(crate) fn backend_name(backends: wgpu::Backends) -> &'static str {
    if backends == wgpu::Backends::GL {
        "OpenGL"
    } else if backends == wgpu::Backends::METAL {
        "Metal"
    } else {
        "GPU"
    }
}
