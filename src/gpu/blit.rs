use wgpu::{
    BindGroup, BindGroupLayout, Device, Queue, RenderPipeline, Sampler, Texture, TextureFormat,
    TextureView,
};

use crate::canvas::Canvas;

/// Presents the CPU framebuffer: each frame the canvas is copied into an
/// RGBA texture and stretched over the surface with a fullscreen
/// triangle. Row uploads are padded to wgpu's 256-byte alignment.
pub struct BlitPipeline {
    pipeline: RenderPipeline,
    bind_group_layout: BindGroupLayout,
    sampler: Sampler,
    texture: Texture,
    bind_group: BindGroup,
    tex_w: u32,
    tex_h: u32,
    padded_bpr: u32,
    upload: Vec<u8>,
}

impl BlitPipeline {
    pub fn new(device: &Device, format: TextureFormat, width: u32, height: u32) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("blit-shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/blit.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("blit-bind-group-layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("blit-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("blit-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        // The canvas texture is sampled 1:1; nearest keeps cell edges
        // crisp.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("blit-sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let (texture, bind_group, tex_w, tex_h, padded_bpr, upload) =
            Self::make_target(device, &bind_group_layout, &sampler, width, height);

        Self {
            pipeline,
            bind_group_layout,
            sampler,
            texture,
            bind_group,
            tex_w,
            tex_h,
            padded_bpr,
            upload,
        }
    }

    /// Recreate the canvas texture for a new window size.
    pub fn resize(&mut self, device: &Device, width: u32, height: u32) {
        let (texture, bind_group, tex_w, tex_h, padded_bpr, upload) =
            Self::make_target(device, &self.bind_group_layout, &self.sampler, width, height);
        self.texture = texture;
        self.bind_group = bind_group;
        self.tex_w = tex_w;
        self.tex_h = tex_h;
        self.padded_bpr = padded_bpr;
        self.upload = upload;
    }

    /// Copy the canvas into the texture, padding each row.
    pub fn upload(&mut self, queue: &Queue, canvas: &Canvas) {
        let rows = canvas.height().min(self.tex_h as usize);
        let cols = canvas.width().min(self.tex_w as usize);
        let bpr = self.padded_bpr as usize;

        for y in 0..rows {
            let src: &[u8] = bytemuck::cast_slice(&canvas.row(y)[..cols]);
            self.upload[y * bpr..y * bpr + src.len()].copy_from_slice(src);
        }

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &self.upload,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(self.padded_bpr),
                rows_per_image: Some(self.tex_h),
            },
            wgpu::Extent3d {
                width: self.tex_w,
                height: self.tex_h,
                depth_or_array_layers: 1,
            },
        );
    }

    /// Blit the uploaded frame to the given surface view.
    pub fn draw(&self, encoder: &mut wgpu::CommandEncoder, view: &TextureView) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("blit-pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }

    fn make_target(
        device: &Device,
        layout: &BindGroupLayout,
        sampler: &Sampler,
        width: u32,
        height: u32,
    ) -> (Texture, BindGroup, u32, u32, u32, Vec<u8>) {
        let tex_w = width.max(1);
        let tex_h = height.max(1);

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("canvas-texture"),
            size: wgpu::Extent3d {
                width: tex_w,
                height: tex_h,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("blit-bind-group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
            ],
        });

        let padded_bpr = (4 * tex_w).div_ceil(256) * 256;
        let upload = vec![0u8; (padded_bpr * tex_h) as usize];

        (texture, bind_group, tex_w, tex_h, padded_bpr, upload)
    }
}
