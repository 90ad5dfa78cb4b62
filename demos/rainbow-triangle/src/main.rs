use gfx_primer::{
    app::{self, Demo},
    config::DemoConfig,
    context::{Context, InitContext},
    pipeline, shader,
    vertex::{COLORED_TRIANGLE, ColorVertex},
    wgpu::{self, util::DeviceExt},
};

const WINDOW_TITLE: &str = "OpenGL Rainbow Triangle";

struct RainbowTriangle {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
}

impl RainbowTriangle {
    async fn new(ctx: InitContext) -> anyhow::Result<Self> {
        let shader = shader::compile(&ctx.device, "Rainbow Shader", shader::RAINBOW_WGSL).await?;
        let layout = pipeline::mk_layout(&ctx.device, "Rainbow Pipeline Layout", &[]);
        let pipeline = pipeline::mk_render_pipeline(
            &ctx.device,
            &layout,
            ctx.surface_format,
            &[ColorVertex::desc()],
            &shader,
        );

        let vertex_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Triangle Vertex Buffer"),
                contents: bytemuck::cast_slice(&COLORED_TRIANGLE),
                usage: wgpu::BufferUsages::VERTEX,
            });

        Ok(Self {
            pipeline,
            vertex_buffer,
        })
    }
}

impl Demo for RainbowTriangle {
    fn on_render(&self, _: &Context, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..COLORED_TRIANGLE.len() as u32, 0..1);
    }
}

fn main() -> anyhow::Result<()> {
    app::run(
        DemoConfig::gl(WINDOW_TITLE),
        app::constructor(RainbowTriangle::new),
    )
}
