use std::path::{Path, PathBuf};

use gfx_primer::{
    app::{self, Demo},
    config::DemoConfig,
    context::{Context, InitContext},
    pipeline, shader,
    texture::{Texture, TextureData},
    vertex::{TEXTURED_TRIANGLE, TEXTURED_TRIANGLE_INDICES, TexturedVertex},
    wgpu::{self, util::DeviceExt},
};

const WINDOW_TITLE: &str = "Metal Cube";
const TEXTURE_FILE: &str = "diamond_ore.png";

/// Assets live next to this package's manifest, wherever the binary is run
/// from.
fn asset_path(file_name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("assets")
        .join(file_name)
}

struct TexturedTriangle {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    texture_bind_group: wgpu::BindGroup,
}

impl TexturedTriangle {
    async fn new(ctx: InitContext) -> anyhow::Result<Self> {
        println!("Metal device: {}", ctx.adapter_info.name);

        let data = TextureData::open(asset_path(TEXTURE_FILE))?;
        let texture = Texture::upload(&ctx.device, &ctx.queue, &data, TEXTURE_FILE);
        let texture_layout = Texture::bind_group_layout(&ctx.device);
        let texture_bind_group = texture.bind_group(&ctx.device, &texture_layout);

        let shader = shader::compile(&ctx.device, "Textured Shader", shader::TEXTURED_WGSL).await?;
        let layout = pipeline::mk_layout(&ctx.device, "Textured Pipeline Layout", &[&texture_layout]);
        let pipeline = pipeline::mk_render_pipeline(
            &ctx.device,
            &layout,
            ctx.surface_format,
            &[TexturedVertex::desc()],
            &shader,
        );

        let vertex_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Textured Vertex Buffer"),
                contents: bytemuck::cast_slice(&TEXTURED_TRIANGLE),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Textured Index Buffer"),
                contents: bytemuck::cast_slice(&TEXTURED_TRIANGLE_INDICES),
                usage: wgpu::BufferUsages::INDEX,
            });

        Ok(Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            texture_bind_group,
        })
    }
}

impl Demo for TexturedTriangle {
    fn on_render(&self, _: &Context, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.texture_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..TEXTURED_TRIANGLE_INDICES.len() as u32, 0, 0..1);
    }
}

fn main() -> anyhow::Result<()> {
    app::run(
        DemoConfig::metal(WINDOW_TITLE),
        app::constructor(TexturedTriangle::new),
    )
}
