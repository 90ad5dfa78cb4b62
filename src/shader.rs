//! WGSL compilation with the compiler log surfaced on failure.
//!
//! wgpu reports shader errors asynchronously: the module is always returned,
//! and whether it is usable only shows up in its compilation info or in a
//! validation error scope. [`compile`] checks both and turns a broken module
//! into a [`ShaderError`] carrying the compiler text unchanged.

use std::fmt;

/// Position + colour in, colour interpolated across the triangle.
pub const RAINBOW_WGSL: &str = include_str!("shaders/rainbow.wgsl");
/// Clip-space position in, samples the bound texture.
pub const TEXTURED_WGSL: &str = include_str!("shaders/textured.wgsl");
/// Pixel position in, moved by the cursor and scaled by the window size.
pub const MOVING_WGSL: &str = include_str!("shaders/moving.wgsl");

#[derive(Debug, Clone, PartialEq)]
pub enum ShaderError {
    Compile { label: String, log: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Compile { label, log } => write!(f, "failed to compile {label}: {log}"),
        }
    }
}

impl std::error::Error for ShaderError {}

/// Compile `source` into a shader module on `device`.
pub async fn compile(
    device: &wgpu::Device,
    label: &str,
    source: &str,
) -> Result<wgpu::ShaderModule, ShaderError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    let info = module.get_compilation_info().await;
    let scope_error = device.pop_error_scope().await;

    match compile_log(&info, scope_error.as_ref()) {
        None => {
            log::debug!("compiled shader {label}");
            Ok(module)
        }
        Some(log) => Err(ShaderError::Compile {
            label: label.to_owned(),
            log,
        }),
    }
}

/// The error text of a failed compilation, or `None` when the module is
/// usable. Error messages win over the scope's summary, which only repeats
/// them with less detail.
fn compile_log(info: &wgpu::CompilationInfo, scope_error: Option<&wgpu::Error>) -> Option<String> {
    let errors: Vec<&str> = info
        .messages
        .iter()
        .filter(|message| matches!(message.message_type, wgpu::CompilationMessageType::Error))
        .map(|message| message.message.as_str())
        .collect();
    if !errors.is_empty() {
        return Some(errors.join("\n"));
    }
    scope_error.map(|e| e.to_string())
}
