//! Window event loop and the per-frame render loop.
//!
//! A demo is a [`Demo`] built by a [`DemoConstructor`] once the window and
//! device exist. [`run`] owns everything else.
//!
//! # Frame loop
//!
//! Every redraw does the same thing:
//! 1. Let the demo update per-frame data (`on_update`)
//! 2. Acquire the next surface texture
//! 3. Clear it to the configured colour
//! 4. Let the demo bind its state and draw (`on_render`)
//! 5. Submit and present
//! 6. Count the frame and request the next redraw
//!
//! All window and device calls happen on the thread that called [`run`],
//! which must be the main thread: both winit and the Metal layer refuse to
//! work from anywhere else.

use std::{iter, pin::Pin, sync::Arc};

use anyhow::{Context as _, anyhow};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    config::DemoConfig,
    context::{Context, InitContext},
    fps::FpsCounter,
};

/// One example program: its GPU resources and how it draws them.
///
/// Window events reach the demo after [`Context::input`] has been updated,
/// so reading the input state from the context always sees the latest
/// values.
pub trait Demo {
    fn on_window_event(&mut self, _ctx: &Context, _event: &WindowEvent) {}

    /// Called once per frame before the render pass is opened.
    fn on_update(&mut self, _ctx: &Context) {}

    /// Binds the demo's pipeline and buffers and issues its draw call. Runs
    /// every frame with full rebinding.
    fn on_render(&self, ctx: &Context, render_pass: &mut wgpu::RenderPass<'_>);
}

/// Builds the demo once the device exists. Shader compilation is async in
/// wgpu, so the constructor is too.
pub type DemoConstructor = Box<dyn FnOnce(InitContext) -> DemoFuture>;

pub type DemoFuture = Pin<Box<dyn Future<Output = anyhow::Result<Box<dyn Demo>>>>>;

/// Wraps an `async fn(InitContext) -> anyhow::Result<D>` into a
/// [`DemoConstructor`].
pub fn constructor<D, F, Fut>(build: F) -> DemoConstructor
where
    D: Demo + 'static,
    F: FnOnce(InitContext) -> Fut + 'static,
    Fut: Future<Output = anyhow::Result<D>> + 'static,
{
    Box::new(move |ctx: InitContext| -> DemoFuture {
        Box::pin(async move {
            let demo = build(ctx).await?;
            Ok(Box::new(demo) as Box<dyn Demo>)
        })
    })
}

struct AppState {
    ctx: Context,
    demo: Box<dyn Demo>,
    fps: Option<FpsCounter>,
}

impl AppState {
    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            self.demo.on_render(&self.ctx, &mut render_pass);
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

struct App {
    async_runtime: tokio::runtime::Runtime,
    config: DemoConfig,
    state: Option<AppState>,
    // Taken on the first `resumed`.
    constructor: Option<DemoConstructor>,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: DemoConfig, constructor: DemoConstructor) -> anyhow::Result<Self> {
        let async_runtime =
            tokio::runtime::Runtime::new().context("failed to start the async runtime")?;
        Ok(Self {
            async_runtime,
            config,
            state: None,
            constructor: Some(constructor),
            error: None,
        })
    }

    fn init(
        &self,
        event_loop: &ActiveEventLoop,
        constructor: DemoConstructor,
    ) -> anyhow::Result<AppState> {
        let window_attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height))
            .with_resizable(self.config.resizable);
        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create the window")?,
        );

        let ctx = self
            .async_runtime
            .block_on(Context::new(window, &self.config))?;
        let demo = self.async_runtime.block_on(constructor((&ctx).into()))?;
        let fps = self
            .config
            .count_frames
            .then(|| FpsCounter::start(self.async_runtime.handle()));

        Ok(AppState { ctx, demo, fps })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(constructor) = self.constructor.take() else {
            return;
        };
        match self.init(event_loop, constructor) {
            Ok(state) => {
                state.ctx.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        match &event {
            WindowEvent::CursorMoved { position, .. } => state.ctx.input.cursor_moved(*position),
            WindowEvent::Resized(size) => state.ctx.input.resized(size.width, size.height),
            _ => (),
        }
        state.demo.on_window_event(&state.ctx, &event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                state.ctx.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                state.demo.on_update(&state.ctx);
                match state.render() {
                    Ok(()) => {
                        if let Some(fps) = &state.fps {
                            fps.frame();
                        }
                    }
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.ctx.resize(size.width, size.height);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        self.fail(event_loop, anyhow!("the GPU ran out of memory"));
                        return;
                    }
                    Err(e) => log::error!("Unable to render {}", e),
                }
                state.ctx.window.request_redraw();
            }
            _ => (),
        }
    }
}

/// Initialises `env_logger` with an `info` default, overridable through
/// `RUST_LOG`. Safe to call more than once.
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    if let Err(e) = env_logger::Builder::from_env(env).try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    }
}

/// Opens the window described by `config`, builds the demo and runs the frame
/// loop until the window is closed.
///
/// Must be called from the main thread. Errors during setup or a fatal
/// surface error end the loop and are returned.
pub fn run(config: DemoConfig, constructor: DemoConstructor) -> anyhow::Result<()> {
    init_logging();

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, constructor)?;
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
