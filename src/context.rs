use std::sync::Arc;

use anyhow::{Context as _, anyhow};
use winit::{dpi::PhysicalPosition, window::Window};

use crate::config::DemoConfig;

/// Window size and cursor position as last reported by the window.
///
/// Both are plain arrays so they can be copied straight into a
/// [`FrameUniform`](crate::vertex::FrameUniform). Window events and drawing
/// run on the same thread, so the last value written is the one read.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputState {
    pub window_size: [i32; 2],
    pub cursor: [f32; 2],
}

impl InputState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            window_size: [width as i32, height as i32],
            cursor: [0.0; 2],
        }
    }

    pub fn resized(&mut self, width: u32, height: u32) {
        self.window_size = [width as i32, height as i32];
    }

    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.cursor = [position.x as f32, position.y as f32];
    }
}

/// Everything a demo needs to build its GPU resources.
///
/// Device and queue are reference counted inside wgpu, so cloning them out of
/// the [`Context`] only clones the handles.
#[derive(Clone, Debug)]
pub struct InitContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    pub adapter_info: wgpu::AdapterInfo,
    pub input: InputState,
}

impl From<&Context> for InitContext {
    fn from(ctx: &Context) -> Self {
        Self {
            device: ctx.device.clone(),
            queue: ctx.queue.clone(),
            surface_format: ctx.config.format,
            adapter_info: ctx.adapter_info.clone(),
            input: ctx.input,
        }
    }
}

#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub adapter_info: wgpu::AdapterInfo,
    pub clear_colour: wgpu::Color,
    pub input: InputState,
}

impl Context {
    pub async fn new(window: Arc<Window>, demo: &DemoConfig) -> anyhow::Result<Self> {
        let size = window.inner_size();

        log::debug!("wgpu setup for {}", demo.backend_name());
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: demo.backends,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create a surface for the window")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .with_context(|| format!("no {} adapter available", demo.backend_name()))?;

        let adapter_info = adapter.get_info();
        log::info!(
            "{} adapter: {} ({:?})",
            demo.backend_name(),
            adapter_info.name,
            adapter_info.backend
        );
        if demo.backends == wgpu::Backends::GL {
            log::info!("OpenGL version {}", adapter_info.driver_info);
        }

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Demo Device"),
                required_features: wgpu::Features::empty(),
                // GL drivers rarely reach the default limits.
                required_limits: if demo.backends == wgpu::Backends::GL {
                    wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits())
                } else {
                    wgpu::Limits::default()
                },
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create the device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        // Vertex colours are authored in linear space, so prefer an sRGB target.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow!("the surface is not supported by {}", adapter_info.name))?;
        let present_mode = if demo.vsync {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::AutoNoVsync
        };
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            adapter_info,
            clear_colour: demo.clear_colour,
            input: InputState::new(size.width, size.height),
        })
    }

    /// Reconfigures the surface for a new drawable size. Zero sizes happen
    /// while the window is minimised and are ignored.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        true
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}
