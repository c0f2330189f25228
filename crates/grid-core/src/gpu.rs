//! Instanced cube renderer shared by the web and native frontends.
//!
//! Owns the pipeline, the unit cube, depth target and the two instance
//! streams (grid and dot field). The frontends own surface setup and the
//! event loop; each frame they hand a [`FrameOutput`] and a target view.

use crate::dots::DotField;
use crate::engine::FrameOutput;
use crate::mesh::{unit_cube, MeshVertex, SceneUniforms};
use crate::writer::{InstanceColor, InstanceTransform};
use crate::GRID_WGSL;
use glam::Vec3;
use wgpu::util::DeviceExt;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const LIGHT_DIR: Vec3 = Vec3::new(0.4, 1.0, 0.3);
const AMBIENT: f32 = 0.35;
const FOG_DENSITY: f32 = 0.018;
const CUBE_VERTICES: u32 = 36;

const MESH_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
const TRANSFORM_ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
    2 => Float32x4, 3 => Float32x4, 4 => Float32x4, 5 => Float32x4
];
const COLOR_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![6 => Float32x3];

pub fn create_depth_texture(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::TextureView) {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("grid_depth"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = tex.create_view(&wgpu::TextureViewDescriptor::default());
    (tex, view)
}

/// One transform and one color buffer sized for `capacity` instances.
pub fn create_instance_buffers(
    device: &wgpu::Device,
    label: &str,
    capacity: usize,
) -> (wgpu::Buffer, wgpu::Buffer) {
    let capacity = capacity.max(1) as u64;
    let usage = wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST;
    let transforms = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(&format!("{label}_transforms")),
        size: capacity * std::mem::size_of::<InstanceTransform>() as u64,
        usage,
        mapped_at_creation: false,
    });
    let colors = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(&format!("{label}_colors")),
        size: capacity * std::mem::size_of::<InstanceColor>() as u64,
        usage,
        mapped_at_creation: false,
    });
    (transforms, colors)
}

pub fn make_grid_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    color_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let buffers = [
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &MESH_ATTRS,
        },
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceTransform>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &TRANSFORM_ATTRS,
        },
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceColor>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &COLOR_ATTRS,
        },
    ];
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("grid_pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

pub struct GridRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    cube_vb: wgpu::Buffer,
    _depth_tex: wgpu::Texture,
    depth_view: wgpu::TextureView,

    // Grid instances; reallocated only when a larger lattice arrives
    grid_transforms: wgpu::Buffer,
    grid_colors: wgpu::Buffer,
    grid_capacity: usize,
    grid_count: u32,

    // Dot field instances, uploaded once
    dot_transforms: wgpu::Buffer,
    dot_colors: wgpu::Buffer,
    dot_count: u32,

    clear_color: wgpu::Color,
}

impl GridRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color_format: wgpu::TextureFormat,
        size: (u32, u32),
        grid_capacity: usize,
        dots: &DotField,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("grid_shader"),
            source: wgpu::ShaderSource::Wgsl(GRID_WGSL.into()),
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("grid_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("grid_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("grid_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("grid_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let pipeline = make_grid_pipeline(device, &pl, &shader, color_format);

        let cube = unit_cube();
        let cube_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_vb"),
            contents: bytemuck::cast_slice(&cube),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let (depth_tex, depth_view) = create_depth_texture(device, size.0, size.1);
        let (grid_transforms, grid_colors) = create_instance_buffers(device, "grid", grid_capacity);

        let (dot_t, dot_c) = dots.instances();
        let (dot_transforms, dot_colors) = create_instance_buffers(device, "dots", dot_t.len());
        queue.write_buffer(&dot_transforms, 0, bytemuck::cast_slice(&dot_t));
        queue.write_buffer(&dot_colors, 0, bytemuck::cast_slice(&dot_c));
        log::info!(
            "[gpu] renderer ready: {} grid slots, {} dots",
            grid_capacity,
            dot_t.len()
        );

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            cube_vb,
            _depth_tex: depth_tex,
            depth_view,
            grid_transforms,
            grid_colors,
            grid_capacity: grid_capacity.max(1),
            grid_count: 0,
            dot_transforms,
            dot_colors,
            dot_count: dot_t.len() as u32,
            clear_color: wgpu::Color {
                r: 0.01,
                g: 0.012,
                b: 0.02,
                a: 1.0,
            },
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        let (tex, view) = create_depth_texture(device, width, height);
        self._depth_tex = tex;
        self.depth_view = view;
    }

    /// Upload dirty instance data (if any) and record the grid and dot draws.
    pub fn encode(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        frame_out: &FrameOutput<'_>,
    ) {
        if frame_out.dirty.any() {
            self.upload_grid(device, queue, frame_out);
        }
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&SceneUniforms::from_camera(
                frame_out.camera,
                LIGHT_DIR,
                AMBIENT,
                FOG_DENSITY,
            )),
        );

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("grid_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.cube_vb.slice(..));

        if self.grid_count > 0 {
            rpass.set_vertex_buffer(1, self.grid_transforms.slice(..));
            rpass.set_vertex_buffer(2, self.grid_colors.slice(..));
            rpass.draw(0..CUBE_VERTICES, 0..self.grid_count);
        }
        if self.dot_count > 0 {
            rpass.set_vertex_buffer(1, self.dot_transforms.slice(..));
            rpass.set_vertex_buffer(2, self.dot_colors.slice(..));
            rpass.draw(0..CUBE_VERTICES, 0..self.dot_count);
        }
    }

    fn upload_grid(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, frame_out: &FrameOutput<'_>) {
        let count = frame_out.transforms.len();
        if count > self.grid_capacity {
            let (t, c) = create_instance_buffers(device, "grid", count);
            self.grid_transforms = t;
            self.grid_colors = c;
            self.grid_capacity = count;
            log::info!("[gpu] grid instance buffers grown to {}", count);
        }
        queue.write_buffer(&self.grid_transforms, 0, bytemuck::cast_slice(frame_out.transforms));
        queue.write_buffer(&self.grid_colors, 0, bytemuck::cast_slice(frame_out.colors));
        self.grid_count = count as u32;
    }
}
