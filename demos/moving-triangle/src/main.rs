//! A triangle that follows the mouse cursor.
//!
//! The vertices are in pixels; the vertex shader moves them by the cursor
//! position and maps them to clip space using the window size, both uploaded
//! once per frame.

use gfx_primer::{
    app::{self, Demo},
    config::DemoConfig,
    context::{Context, InitContext},
    pipeline, shader,
    vertex::{FrameUniform, PIXEL_TRIANGLE, PixelVertex},
    wgpu::{self, util::DeviceExt},
};

const WINDOW_TITLE: &str = "Metal Rainbow Triangle";

struct MovingTriangle {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
}

impl MovingTriangle {
    async fn new(ctx: InitContext) -> anyhow::Result<Self> {
        println!("Metal device: {}", ctx.adapter_info.name);

        let frame_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Frame Uniform Buffer"),
                contents: bytemuck::cast_slice(&[FrameUniform::from(ctx.input)]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let frame_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("frame_bind_group_layout"),
            });
        let frame_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
            label: Some("frame_bind_group"),
        });

        let shader = shader::compile(&ctx.device, "Moving Shader", shader::MOVING_WGSL).await?;
        let layout = pipeline::mk_layout(&ctx.device, "Moving Pipeline Layout", &[&frame_layout]);
        let pipeline = pipeline::mk_render_pipeline(
            &ctx.device,
            &layout,
            ctx.surface_format,
            &[PixelVertex::desc()],
            &shader,
        );

        let vertex_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Pixel Vertex Buffer"),
                contents: bytemuck::cast_slice(&PIXEL_TRIANGLE),
                usage: wgpu::BufferUsages::VERTEX,
            });

        Ok(Self {
            pipeline,
            vertex_buffer,
            frame_buffer,
            frame_bind_group,
        })
    }
}

impl Demo for MovingTriangle {
    fn on_update(&mut self, ctx: &Context) {
        ctx.queue.write_buffer(
            &self.frame_buffer,
            0,
            bytemuck::cast_slice(&[FrameUniform::from(ctx.input)]),
        );
    }

    fn on_render(&self, _: &Context, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.frame_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..PIXEL_TRIANGLE.len() as u32, 0..1);
    }
}

fn main() -> anyhow::Result<()> {
    app::run(
        DemoConfig::metal(WINDOW_TITLE),
        app::constructor(MovingTriangle::new),
    )
}
