use crate::assets::{MeshData, Vertex};
use crate::core::constants::{CARD_HEIGHT, CARD_WIDTH};
use wgpu::util::DeviceExt;

pub struct GpuPrimitive {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub base_color: [f32; 4],
    /// Model image index sampled for the base colour.
    pub texture: Option<usize>,
}

impl GpuPrimitive {
    pub fn upload(
        device: &wgpu::Device,
        label: &str,
        vertices: &[Vertex],
        indices: &[u32],
        base_color: [f32; 4],
    ) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            base_color,
            texture: None,
        }
    }
}

/// Upload every primitive of every model mesh, preserving mesh indices.
pub fn upload_meshes(device: &wgpu::Device, meshes: &[MeshData]) -> Vec<Vec<GpuPrimitive>> {
    meshes
        .iter()
        .enumerate()
        .map(|(mi, mesh)| {
            mesh.primitives
                .iter()
                .filter(|p| !p.indices.is_empty())
                .map(|p| {
                    let mut gpu = GpuPrimitive::upload(
                        device,
                        &format!("mesh_{mi}"),
                        &p.vertices,
                        &p.indices,
                        p.base_color,
                    );
                    gpu.texture = p.base_texture;
                    gpu
                })
                .collect()
        })
        .collect()
}

/// Card-sized quad in the XY plane facing +Z, UV origin at the top-left.
pub fn card_quad(device: &wgpu::Device, label: &str, base_color: [f32; 4]) -> GpuPrimitive {
    let hw = CARD_WIDTH * 0.5;
    let hh = CARD_HEIGHT * 0.5;
    let n = [0.0, 0.0, 1.0];
    let vertices = [
        Vertex {
            position: [-hw, -hh, 0.0],
            normal: n,
            uv: [0.0, 1.0],
        },
        Vertex {
            position: [hw, -hh, 0.0],
            normal: n,
            uv: [1.0, 1.0],
        },
        Vertex {
            position: [hw, hh, 0.0],
            normal: n,
            uv: [1.0, 0.0],
        },
        Vertex {
            position: [-hw, hh, 0.0],
            normal: n,
            uv: [0.0, 0.0],
        },
    ];
    GpuPrimitive::upload(device, label, &vertices, &[0, 1, 2, 0, 2, 3], base_color)
}
