use crate::assets::{ImageData, MeshData, Vertex};
use crate::constants::{AMBIENT, CLEAR_COLOR, LIGHT_DIR};
use crate::core::constants::CARD_BACK_COLOR;
use crate::world::World;
use glam::{Affine3A, Mat4};
use web_sys as web;

mod helpers;
mod mesh;
use mesh::GpuPrimitive;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    light_dir: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct DrawUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

const DRAW_UNIFORM_SIZE: u64 = std::mem::size_of::<DrawUniforms>() as u64;
const INITIAL_DRAW_CAPACITY: u64 = 64;

/// Which texture a draw samples.
#[derive(Clone, Copy)]
enum Material {
    Plain,
    /// Base colour texture of the model, by image index.
    Model(usize),
    CardImage,
}

#[derive(Clone, Copy)]
enum PrimitiveRef {
    Mesh { mesh: usize, primitive: usize },
    CardFront,
    CardBack,
}

struct DrawItem {
    primitive: PrimitiveRef,
    model: Affine3A,
    color: [f32; 4],
    material: Material,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,

    _depth_tex: wgpu::Texture,
    depth_view: wgpu::TextureView,

    globals_buffer: wgpu::Buffer,
    globals_bg: wgpu::BindGroup,

    draw_bgl: wgpu::BindGroupLayout,
    draw_buffer: wgpu::Buffer,
    draw_bg: wgpu::BindGroup,
    draw_stride: u64,
    draw_capacity: u64,
    draw_staging: Vec<u8>,

    plain_bg: wgpu::BindGroup,
    card_bg: wgpu::BindGroup,
    model_bgs: Vec<Option<wgpu::BindGroup>>,
    // Held so their views stay valid
    _textures: Vec<wgpu::Texture>,

    meshes: Vec<Vec<GpuPrimitive>>,
    card_front: GpuPrimitive,
    card_back: GpuPrimitive,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        meshes: &[MeshData],
        model_images: &[Option<ImageData>],
        card_image: Option<&ImageData>,
    ) -> anyhow::Result<Self> {
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
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
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
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {}x{} format={:?}", width, height, format);

        let (depth_tex, depth_view) = helpers::create_depth_texture(&device, width, height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });

        // group 0: per-frame globals
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
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
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        // group 1: per-draw uniforms at dynamic offsets
        let draw_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("draw_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(DRAW_UNIFORM_SIZE),
                },
                count: None,
            }],
        });
        let align = device.limits().min_uniform_buffer_offset_alignment as u64;
        let draw_stride = DRAW_UNIFORM_SIZE.div_ceil(align) * align;
        let (draw_buffer, draw_bg) =
            create_draw_buffer(&device, &draw_bgl, draw_stride, INITIAL_DRAW_CAPACITY);

        // group 2: base colour texture
        let texture_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            anisotropy_clamp: 4,
            ..Default::default()
        });
        // glTF samplers wrap by default
        let repeat_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("repeat_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            anisotropy_clamp: 4,
            ..Default::default()
        });
        let (white_tex, white_view) =
            helpers::create_rgba_texture(&device, &queue, "white_tex", 1, 1, &[255; 4]);
        let mut textures = vec![white_tex];
        let plain_bg = texture_bind_group(&device, &texture_bgl, &white_view, &linear_sampler);
        let card_bg = match card_image {
            Some(img) => {
                let (card_tex, card_view) = helpers::create_rgba_texture(
                    &device,
                    &queue,
                    "card_tex",
                    img.width,
                    img.height,
                    &img.rgba,
                );
                textures.push(card_tex);
                texture_bind_group(&device, &texture_bgl, &card_view, &linear_sampler)
            }
            None => texture_bind_group(&device, &texture_bgl, &white_view, &linear_sampler),
        };
        let model_bgs: Vec<Option<wgpu::BindGroup>> = model_images
            .iter()
            .enumerate()
            .map(|(i, img)| {
                let img = img.as_ref()?;
                let (tex, view) = helpers::create_rgba_texture(
                    &device,
                    &queue,
                    &format!("model_tex_{i}"),
                    img.width,
                    img.height,
                    &img.rgba,
                );
                textures.push(tex);
                Some(texture_bind_group(
                    &device,
                    &texture_bgl,
                    &view,
                    &repeat_sampler,
                ))
            })
            .collect();

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_layout"),
            bind_group_layouts: &[&globals_bgl, &draw_bgl, &texture_bgl],
            push_constant_ranges: &[],
        });
        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2],
        };
        let pipeline =
            helpers::make_scene_pipeline(&device, &pipeline_layout, &shader, vertex_layout, format);

        let meshes = mesh::upload_meshes(&device, meshes);
        let card_front = mesh::card_quad(&device, "card_front", [1.0; 4]);
        let [r, g, b] = CARD_BACK_COLOR;
        let card_back = mesh::card_quad(&device, "card_back", [r, g, b, 1.0]);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            _depth_tex: depth_tex,
            depth_view,
            globals_buffer,
            globals_bg,
            draw_bgl,
            draw_buffer,
            draw_bg,
            draw_stride,
            draw_capacity: INITIAL_DRAW_CAPACITY,
            draw_staging: Vec::new(),
            plain_bg,
            card_bg,
            model_bgs,
            _textures: textures,
            meshes,
            card_front,
            card_back,
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: 1.0,
            },
        })
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
            let (depth_tex, depth_view) =
                helpers::create_depth_texture(&self.device, width, height);
            self._depth_tex = depth_tex;
            self.depth_view = depth_view;
        }
    }

    fn ensure_draw_capacity(&mut self, count: u64) {
        if count <= self.draw_capacity {
            return;
        }
        let capacity = count.next_power_of_two();
        let (buffer, bg) = create_draw_buffer(&self.device, &self.draw_bgl, self.draw_stride, capacity);
        self.draw_buffer = buffer;
        self.draw_bg = bg;
        self.draw_capacity = capacity;
    }

    pub fn render(&mut self, world: &World) -> Result<(), wgpu::SurfaceError> {
        let aspect = self.width as f32 / self.height.max(1) as f32;
        let globals = Globals {
            view_proj: world.camera.view_proj(aspect).to_cols_array_2d(),
            light_dir: LIGHT_DIR.normalize().extend(AMBIENT).to_array(),
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        // Collect draws: visible box parts, then the two card faces
        let mut items: Vec<DrawItem> = Vec::new();
        let transforms = world.box_scene.world_transforms(&world.box_root);
        let visible = world.box_scene.effective_visibility();
        for (id, node) in world.box_scene.nodes() {
            if !visible[id] {
                continue;
            }
            let Some(mesh) = node.mesh else {
                continue;
            };
            let Some(prims) = self.meshes.get(mesh) else {
                continue;
            };
            for (primitive, p) in prims.iter().enumerate() {
                items.push(DrawItem {
                    primitive: PrimitiveRef::Mesh { mesh, primitive },
                    model: transforms[id],
                    color: p.base_color,
                    material: p.texture.map_or(Material::Plain, Material::Model),
                });
            }
        }
        items.push(DrawItem {
            primitive: PrimitiveRef::CardFront,
            model: world.card_front_world(),
            color: self.card_front.base_color,
            material: Material::CardImage,
        });
        items.push(DrawItem {
            primitive: PrimitiveRef::CardBack,
            model: world.card_back_world(),
            color: self.card_back.base_color,
            material: Material::Plain,
        });

        self.ensure_draw_capacity(items.len() as u64);
        let stride = self.draw_stride as usize;
        let mut staging = std::mem::take(&mut self.draw_staging);
        staging.clear();
        staging.resize(items.len() * stride, 0);
        for (i, item) in items.iter().enumerate() {
            let u = DrawUniforms {
                model: Mat4::from(item.model).to_cols_array_2d(),
                color: item.color,
            };
            let off = i * stride;
            staging[off..off + DRAW_UNIFORM_SIZE as usize].copy_from_slice(bytemuck::bytes_of(&u));
        }
        self.queue.write_buffer(&self.draw_buffer, 0, &staging);
        self.draw_staging = staging;

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
            rpass.set_bind_group(0, &self.globals_bg, &[]);
            for (i, item) in items.iter().enumerate() {
                let prim = match item.primitive {
                    PrimitiveRef::Mesh { mesh, primitive } => &self.meshes[mesh][primitive],
                    PrimitiveRef::CardFront => &self.card_front,
                    PrimitiveRef::CardBack => &self.card_back,
                };
                let offset = (i * stride) as wgpu::DynamicOffset;
                rpass.set_bind_group(1, &self.draw_bg, &[offset]);
                let tex_bg = match item.material {
                    Material::Plain => &self.plain_bg,
                    Material::Model(image) => self
                        .model_bgs
                        .get(image)
                        .and_then(Option::as_ref)
                        .unwrap_or(&self.plain_bg),
                    Material::CardImage => &self.card_bg,
                };
                rpass.set_bind_group(2, tex_bg, &[]);
                rpass.set_vertex_buffer(0, prim.vertex_buffer.slice(..));
                rpass.set_index_buffer(prim.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..prim.index_count, 0, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn create_draw_buffer(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    stride: u64,
    capacity: u64,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("draw_uniforms"),
        size: stride * capacity,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("draw_bg"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: wgpu::BufferSize::new(DRAW_UNIFORM_SIZE),
            }),
        }],
    });
    (buffer, bg)
}

fn texture_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("texture_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}
