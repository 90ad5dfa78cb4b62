//! Fixed vertex tables and the layouts that describe them to the GPU.
//!
//! Every table here is a constant: the demos upload it once and never touch it
//! again.

use std::mem;

/// Position and colour, three floats each. Used by the rainbow triangle.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl ColorVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ColorVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

pub const COLORED_TRIANGLE: [ColorVertex; 3] = [
    // top
    ColorVertex {
        position: [0.0, 0.5, 0.0],
        color: [1.0, 0.0, 0.0],
    },
    // left
    ColorVertex {
        position: [-0.5, -0.5, 0.0],
        color: [0.0, 1.0, 0.0],
    },
    // right
    ColorVertex {
        position: [0.5, -0.5, 0.0],
        color: [0.0, 0.0, 1.0],
    },
];

/// Homogeneous position, colour and texture coordinate.
///
/// The texture coordinate is padded to four floats so the struct keeps the
/// 16 byte alignment of the other two fields; only `u` and `v` are read.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TexturedVertex {
    pub position: [f32; 4],
    pub color: [f32; 4],
    pub tex_coord: [f32; 4],
}

impl TexturedVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<TexturedVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

pub const TEXTURED_TRIANGLE: [TexturedVertex; 3] = [
    // top
    TexturedVertex {
        position: [0.0, 1.0, 0.0, 1.0],
        color: [1.0, 0.0, 0.0, 1.0],
        tex_coord: [1.0, 0.0, 0.0, 0.0],
    },
    // left
    TexturedVertex {
        position: [-0.75, -0.75, 0.0, 1.0],
        color: [0.0, 1.0, 0.0, 1.0],
        tex_coord: [1.0, 1.0, 0.0, 0.0],
    },
    // right
    TexturedVertex {
        position: [0.75, -0.75, 0.0, 1.0],
        color: [0.0, 0.0, 1.0, 1.0],
        tex_coord: [0.0, 1.0, 0.0, 0.0],
    },
];

pub const TEXTURED_TRIANGLE_INDICES: [u16; 3] = [0, 1, 2];

/// Unit cube as a triangle list, one row per vertex: x, y, z, u, v.
///
/// Shares the texture mapping of the textured demo. The demo itself draws
/// [`TEXTURED_TRIANGLE`]; the cube has no camera to be viewed through.
pub const CUBE_VERTICES: [[f32; 5]; 36] = [
    // Bottom
    [-1.0, -1.0, -1.0, 0.0, 0.0],
    [1.0, -1.0, -1.0, 1.0, 0.0],
    [-1.0, -1.0, 1.0, 0.0, 1.0],
    [1.0, -1.0, -1.0, 1.0, 0.0],
    [1.0, -1.0, 1.0, 1.0, 1.0],
    [-1.0, -1.0, 1.0, 0.0, 1.0],
    // Top
    [-1.0, 1.0, -1.0, 0.0, 0.0],
    [-1.0, 1.0, 1.0, 0.0, 1.0],
    [1.0, 1.0, -1.0, 1.0, 0.0],
    [1.0, 1.0, -1.0, 1.0, 0.0],
    [-1.0, 1.0, 1.0, 0.0, 1.0],
    [1.0, 1.0, 1.0, 1.0, 1.0],
    // Front
    [-1.0, -1.0, 1.0, 1.0, 0.0],
    [1.0, -1.0, 1.0, 0.0, 0.0],
    [-1.0, 1.0, 1.0, 1.0, 1.0],
    [1.0, -1.0, 1.0, 0.0, 0.0],
    [1.0, 1.0, 1.0, 0.0, 1.0],
    [-1.0, 1.0, 1.0, 1.0, 1.0],
    // Back
    [-1.0, -1.0, -1.0, 0.0, 0.0],
    [-1.0, 1.0, -1.0, 0.0, 1.0],
    [1.0, -1.0, -1.0, 1.0, 0.0],
    [1.0, -1.0, -1.0, 1.0, 0.0],
    [-1.0, 1.0, -1.0, 0.0, 1.0],
    [1.0, 1.0, -1.0, 1.0, 1.0],
    // Left
    [-1.0, -1.0, 1.0, 0.0, 1.0],
    [-1.0, 1.0, -1.0, 1.0, 0.0],
    [-1.0, -1.0, -1.0, 0.0, 0.0],
    [-1.0, -1.0, 1.0, 0.0, 1.0],
    [-1.0, 1.0, 1.0, 1.0, 1.0],
    [-1.0, 1.0, -1.0, 1.0, 0.0],
    // Right
    [1.0, -1.0, 1.0, 1.0, 1.0],
    [1.0, -1.0, -1.0, 1.0, 0.0],
    [1.0, 1.0, -1.0, 0.0, 0.0],
    [1.0, -1.0, 1.0, 1.0, 1.0],
    [1.0, 1.0, -1.0, 0.0, 0.0],
    [1.0, 1.0, 1.0, 0.0, 1.0],
];

/// Vertex positioned in pixels relative to the cursor.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PixelVertex {
    pub position: [f32; 4],
    pub color: [f32; 4],
}

impl PixelVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<PixelVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

pub const PIXEL_TRIANGLE: [PixelVertex; 3] = [
    PixelVertex {
        position: [0.0, -100.0, 0.0, 1.0],
        color: [1.0, 0.0, 0.0, 1.0],
    },
    PixelVertex {
        position: [-100.0, 100.0, 0.0, 1.0],
        color: [0.0, 1.0, 0.0, 1.0],
    },
    PixelVertex {
        position: [100.0, 100.0, 0.0, 1.0],
        color: [0.0, 0.0, 1.0, 1.0],
    },
];

/// Per-frame values read by the vertex shader: window size in pixels and the
/// cursor position. Matches the WGSL `FrameUniform` struct, 16 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    pub window_size: [i32; 2],
    pub cursor: [f32; 2],
}

impl From<crate::context::InputState> for FrameUniform {
    fn from(input: crate::context::InputState) -> Self {
        Self {
            window_size: input.window_size,
            cursor: input.cursor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::InputState;

    #[test]
    fn strides_match_struct_sizes() {
        assert_eq!(ColorVertex::desc().array_stride, 24);
        assert_eq!(TexturedVertex::desc().array_stride, 48);
        assert_eq!(PixelVertex::desc().array_stride, 32);
    }

    #[test]
    fn attributes_do_not_overlap() {
        for layout in [
            ColorVertex::desc(),
            TexturedVertex::desc(),
            PixelVertex::desc(),
        ] {
            let mut end = 0;
            for attribute in layout.attributes {
                assert!(attribute.offset >= end);
                end = attribute.offset + attribute.format.size();
            }
            assert!(end <= layout.array_stride);
        }
    }

    #[test]
    fn triangle_is_red_green_blue() {
        let colors: Vec<[f32; 3]> = COLORED_TRIANGLE.iter().map(|v| v.color).collect();
        assert_eq!(
            colors,
            vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
        );
    }

    #[test]
    fn indices_address_every_textured_vertex() {
        for index in TEXTURED_TRIANGLE_INDICES {
            assert!((index as usize) < TEXTURED_TRIANGLE.len());
        }
    }

    #[test]
    fn cube_has_six_faces_on_the_unit_bounds() {
        assert_eq!(CUBE_VERTICES.len(), 6 * 6);
        for [x, y, z, u, v] in CUBE_VERTICES {
            // every vertex lies on at least one face plane
            assert!(x.abs() == 1.0 || y.abs() == 1.0 || z.abs() == 1.0);
            assert!((0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn frame_uniform_is_sixteen_bytes() {
        assert_eq!(mem::size_of::<FrameUniform>(), 16);
        let input = InputState {
            window_size: [1280, 720],
            cursor: [64.0, 32.0],
        };
        let uniform = FrameUniform::from(input);
        assert_eq!(uniform.window_size, [1280, 720]);
        assert_eq!(bytemuck::bytes_of(&uniform).len(), 16);
    }
}
