use crate::core::camera::Camera;
use crate::core::color::srgb_to_linear;
use crate::core::constants::{
    AMBIENT_LIGHT_INTENSITY, POINT_LIGHT_INTENSITY, POINT_LIGHT_POSITION,
};
use crate::core::geometry::{MeshData, Topology};
use crate::core::scene::{Material, Scene};
use crate::core::TextureImage;
use glam::Mat4;
use web_sys as web;

mod helpers;
mod mesh;
mod targets;
use mesh::{primitive_topology, GpuMesh};
use targets::DepthTarget;

/// Upper bound on nodes drawn per frame; one dynamic uniform slot each.
const MAX_DRAWS: usize = 64;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    light_pos: [f32; 4],
    light_color: [f32; 4],
    ambient: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct DrawUniforms {
    model: [[f32; 4]; 4],
    normal_matrix: [[f32; 4]; 4],
    color: [f32; 4],
    emissive: [f32; 4],
    // mode, shininess, texture weight, vertex color weight
    params: [f32; 4],
}

const MODE_UNLIT: f32 = 0.0;
const MODE_PHONG: f32 = 1.0;
const MODE_STANDARD: f32 = 2.0;

fn rgba(rgb: [f32; 3], w: f32) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], w]
}

impl DrawUniforms {
    /// `has_colors` says whether the geometry carries per-vertex colors.
    fn new(model: Mat4, material: &Material, has_colors: bool) -> Self {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        let (color, emissive, params) = match *material {
            Material::Phong {
                color,
                textured,
                emissive,
                emissive_intensity,
                shininess,
            } => (
                srgb_to_linear(color),
                rgba(srgb_to_linear(emissive), emissive_intensity),
                [MODE_PHONG, shininess, flag(textured), 0.0],
            ),
            Material::Basic {
                color,
                vertex_colors,
            } => (
                srgb_to_linear(color),
                [0.0; 4],
                [MODE_UNLIT, 0.0, 0.0, flag(vertex_colors && has_colors)],
            ),
            Material::Standard {
                color,
                emissive,
                emissive_intensity,
            } => (
                srgb_to_linear(color),
                rgba(srgb_to_linear(emissive), emissive_intensity),
                [MODE_STANDARD, 0.0, 0.0, 0.0],
            ),
            Material::Points => ([1.0; 3], [0.0; 4], [MODE_UNLIT, 0.0, 0.0, flag(has_colors)]),
            Material::Line { color } => (
                srgb_to_linear(color),
                [0.0; 4],
                [MODE_UNLIT, 0.0, 0.0, 0.0],
            ),
        };
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: model.inverse().transpose().to_cols_array_2d(),
            color: rgba(color, 1.0),
            emissive,
            params,
        }
    }
}

struct Pipelines {
    triangles: wgpu::RenderPipeline,
    lines: wgpu::RenderPipeline,
    points: wgpu::RenderPipeline,
}

impl Pipelines {
    fn for_topology(&self, topology: Topology) -> &wgpu::RenderPipeline {
        match topology {
            Topology::Triangles => &self.triangles,
            Topology::Lines => &self.lines,
            Topology::Points => &self.points,
        }
    }
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth: DepthTarget,
    pipelines: Pipelines,

    frame_bgl: wgpu::BindGroupLayout,
    frame_buffer: wgpu::Buffer,
    frame_bg: wgpu::BindGroup,
    sampler: wgpu::Sampler,
    globe_tex: wgpu::Texture,

    draw_buffer: wgpu::Buffer,
    draw_bg: wgpu::BindGroup,
    draw_stride: u64,
    draw_staging: Vec<u8>,

    meshes: Vec<Option<GpuMesh>>,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth = DepthTarget::new(&device, width, height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
        });

        let frame_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let draw_size = std::mem::size_of::<DrawUniforms>() as u64;
        let draw_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("draw_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(draw_size),
                },
                count: None,
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_layout"),
            bind_group_layouts: &[&frame_bgl, &draw_bgl],
            push_constant_ranges: &[],
        });
        let pipelines = Pipelines {
            triangles: helpers::make_scene_pipeline(
                &device,
                &layout,
                &shader,
                primitive_topology(Topology::Triangles),
                format,
            ),
            lines: helpers::make_scene_pipeline(
                &device,
                &layout,
                &shader,
                primitive_topology(Topology::Lines),
                format,
            ),
            points: helpers::make_scene_pipeline(
                &device,
                &layout,
                &shader,
                primitive_topology(Topology::Points),
                format,
            ),
        };

        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame_uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("globe_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let white = TextureImage::white();
        let (globe_tex, globe_view) = helpers::upload_rgba_texture(
            &device,
            &queue,
            "globe_tex",
            white.width,
            white.height,
            &white.rgba,
        );
        let frame_bg =
            create_frame_bind_group(&device, &frame_bgl, &frame_buffer, &globe_view, &sampler);

        let align = device.limits().min_uniform_buffer_offset_alignment.max(1) as u64;
        let draw_stride = draw_size.div_ceil(align) * align;
        let draw_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("draw_uniforms"),
            size: draw_stride * MAX_DRAWS as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let draw_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("draw_bg"),
            layout: &draw_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &draw_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(draw_size),
                }),
            }],
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth,
            pipelines,
            frame_bgl,
            frame_buffer,
            frame_bg,
            sampler,
            globe_tex,
            draw_buffer,
            draw_bg,
            draw_stride,
            draw_staging: vec![0; (draw_stride as usize) * MAX_DRAWS],
            meshes: Vec::new(),
            width,
            height,
            clear_color: wgpu::Color::BLACK,
        })
    }

    /// Replace the globe texture; the frame bind group is rebuilt around it.
    pub fn set_globe_texture(&mut self, image: &TextureImage) {
        let (tex, view) = helpers::upload_rgba_texture(
            &self.device,
            &self.queue,
            "globe_tex",
            image.width,
            image.height,
            &image.rgba,
        );
        self.globe_tex.destroy();
        self.globe_tex = tex;
        self.frame_bg = create_frame_bind_group(
            &self.device,
            &self.frame_bgl,
            &self.frame_buffer,
            &view,
            &self.sampler,
        );
    }

    /// Upload geometry added to the scene since the last call.
    pub fn sync_geometries(&mut self, scene: &Scene) {
        let geometries = scene.geometries();
        for (i, mesh) in geometries.iter().enumerate().skip(self.meshes.len()) {
            let label = format!("geometry_{}", i);
            self.meshes.push(GpuMesh::upload(&self.device, &label, mesh));
        }
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth.recreate(&self.device, width, height);
        }
    }

    /// Reconfigure after the surface was lost or went stale.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<(), wgpu::SurfaceError> {
        let light = POINT_LIGHT_INTENSITY;
        let frame_uniforms = FrameUniforms {
            view_proj: camera.view_proj().to_cols_array_2d(),
            eye: camera.eye.extend(1.0).to_array(),
            light_pos: POINT_LIGHT_POSITION.extend(1.0).to_array(),
            light_color: [light, light, light, 1.0],
            ambient: [
                AMBIENT_LIGHT_INTENSITY,
                AMBIENT_LIGHT_INTENSITY,
                AMBIENT_LIGHT_INTENSITY,
                1.0,
            ],
        };
        self.queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&frame_uniforms));

        // (uniform offset, geometry index)
        let mut draws: Vec<(u32, usize)> = Vec::with_capacity(scene.len());
        for (_, node) in scene.iter().filter(|(_, n)| n.visible) {
            let gi = node.geometry.index();
            if !matches!(self.meshes.get(gi), Some(Some(_))) {
                continue;
            }
            if draws.len() == MAX_DRAWS {
                log::warn!("[render] more than {} visible meshes, dropping the rest", MAX_DRAWS);
                break;
            }
            let offset = draws.len() as u64 * self.draw_stride;
            let has_colors = scene
                .geometry(node.geometry)
                .is_some_and(MeshData::has_vertex_colors);
            let u = DrawUniforms::new(node.transform.matrix(), &node.material, has_colors);
            let start = offset as usize;
            self.draw_staging[start..start + std::mem::size_of::<DrawUniforms>()]
                .copy_from_slice(bytemuck::bytes_of(&u));
            draws.push((offset as u32, gi));
        }
        if let Some(&(last, _)) = draws.last() {
            let used = last as usize + std::mem::size_of::<DrawUniforms>();
            self.queue
                .write_buffer(&self.draw_buffer, 0, &self.draw_staging[..used]);
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.frame_bg, &[]);
            for &(offset, gi) in &draws {
                let Some(Some(mesh)) = self.meshes.get(gi) else {
                    continue;
                };
                rpass.set_pipeline(self.pipelines.for_topology(mesh.topology));
                rpass.set_bind_group(1, &self.draw_bg, &[offset]);
                mesh.draw(&mut rpass);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Release GPU resources. The surface is dropped with `self`.
    pub fn dispose(self) {
        for mesh in self.meshes.iter().flatten() {
            mesh.destroy();
        }
        self.globe_tex.destroy();
        self.depth.tex.destroy();
        self.frame_buffer.destroy();
        self.draw_buffer.destroy();
        self.device.destroy();
    }
}

fn create_frame_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    frame_buffer: &wgpu::Buffer,
    globe_view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("frame_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(globe_view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}
