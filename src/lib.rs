//! gfx-primer
//!
//! Small bootstraps that open a window and draw through the GL or Metal
//! backend of wgpu. Each demo binary under `demos/` is a short linear `main`
//! that hands a configuration and a constructor to [`app::run`]; everything
//! the demos would otherwise duplicate (window, device, surface, frame loop)
//! lives here.
//!
//! High-level modules
//! - `app`: the winit event loop, the [`app::Demo`] trait and the frame loop
//! - `boot`: two timed loops joined by a completion barrier
//! - `config`: per-demo window and backend settings
//! - `context`: window-bound GPU context (instance, surface, device, queue)
//! - `device_info`: adapter enumeration and the device report
//! - `fps`: once-per-second frame counter
//! - `pipeline`: the single render pipeline helper every demo uses
//! - `shader`: WGSL compilation with the compiler log surfaced on failure
//! - `texture`: PNG decoding and texture upload
//! - `vertex`: the fixed vertex tables and their buffer layouts
//!

pub mod app;
pub mod boot;
pub mod config;
pub mod context;
pub mod device_info;
pub mod fps;
pub mod pipeline;
pub mod shader;
pub mod texture;
pub mod vertex;

// Re-exports commonly used types for convenience in downstream code.
pub use winit::event::WindowEvent;
pub use wgpu;
