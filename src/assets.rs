use crate::scene::{Bounds, NodeId, Scene, SceneNode};
use glam::{Quat, Vec3};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("fetch {url} failed: {reason}")]
    Fetch { url: String, reason: String },
    #[error("fetch {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("invalid glTF: {0}")]
    Gltf(#[from] gltf::Error),
    #[error("glTF mesh {mesh} has no POSITION attribute")]
    MissingPositions { mesh: usize },
    #[error("glTF model has no scene")]
    NoScene,
    #[error("image decode failed: {0}")]
    Image(#[from] image::ImageError),
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

pub struct PrimitiveData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub base_color: [f32; 4],
    /// Index into [`Model::images`] of the base colour texture.
    pub base_texture: Option<usize>,
}

pub struct MeshData {
    pub primitives: Vec<PrimitiveData>,
    pub bounds: Option<Bounds>,
}

/// A loaded model: node hierarchy plus the meshes its nodes reference.
pub struct Model {
    pub scene: Scene,
    pub meshes: Vec<MeshData>,
    /// Decoded glTF images by image index; `None` where decoding failed or
    /// the image lives outside the binary chunk.
    pub images: Vec<Option<ImageData>>,
}

pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, AssetError> {
    let fetch_err = |e: wasm_bindgen::JsValue| AssetError::Fetch {
        url: url.to_string(),
        reason: format!("{:?}", e),
    };
    let window = web::window().ok_or_else(|| AssetError::Fetch {
        url: url.to_string(),
        reason: "no window".to_string(),
    })?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(fetch_err)?;
    let resp: web::Response = resp_value.dyn_into().map_err(fetch_err)?;
    if !resp.ok() {
        return Err(AssetError::Status {
            url: url.to_string(),
            status: resp.status(),
        });
    }
    let buf = JsFuture::from(resp.array_buffer().map_err(fetch_err)?)
        .await
        .map_err(fetch_err)?;
    let bytes = js_sys::Uint8Array::new(&buf).to_vec();
    log::info!("[assets] fetched {} ({} bytes)", url, bytes.len());
    Ok(bytes)
}

/// Parse a binary glTF into a node arena and CPU-side mesh data.
///
/// Only the embedded binary chunk is read; external buffer URIs are ignored.
pub fn load_model(bytes: &[u8]) -> Result<Model, AssetError> {
    let gltf = gltf::Gltf::from_slice(bytes)?;
    let blob = gltf.blob.as_deref();

    let mut meshes = Vec::new();
    for mesh in gltf.meshes() {
        let mut primitives = Vec::new();
        let mut bounds: Option<Bounds> = None;
        for prim in mesh.primitives() {
            let reader = prim.reader(|buffer| match buffer.source() {
                gltf::buffer::Source::Bin => blob,
                gltf::buffer::Source::Uri(_) => None,
            });
            let pbr = prim.material().pbr_metallic_roughness();
            let base_texture = pbr.base_color_texture();
            let positions: Vec<[f32; 3]> = reader
                .read_positions()
                .ok_or(AssetError::MissingPositions { mesh: mesh.index() })?
                .collect();
            let n = positions.len();
            let normals: Vec<[f32; 3]> = reader
                .read_normals()
                .map(|it| it.collect())
                .unwrap_or_else(|| vec![[0.0, 1.0, 0.0]; n]);
            let uvs: Vec<[f32; 2]> = reader
                .read_tex_coords(base_texture.as_ref().map_or(0, |info| info.tex_coord()))
                .map(|it| it.into_f32().collect())
                .unwrap_or_else(|| vec![[0.0, 0.0]; n]);
            let indices: Vec<u32> = reader
                .read_indices()
                .map(|it| it.into_u32().collect())
                .unwrap_or_else(|| (0..n as u32).collect());

            if let Some(b) = Bounds::from_points(&positions) {
                bounds = Some(bounds.map_or(b, |acc| acc.union(b)));
            }
            let vertices = positions
                .iter()
                .zip(normals.iter().chain(std::iter::repeat(&[0.0, 1.0, 0.0])))
                .zip(uvs.iter().chain(std::iter::repeat(&[0.0, 0.0])))
                .map(|((p, nrm), uv)| Vertex {
                    position: *p,
                    normal: *nrm,
                    uv: *uv,
                })
                .collect();
            primitives.push(PrimitiveData {
                vertices,
                indices,
                base_color: pbr.base_color_factor(),
                base_texture: base_texture.map(|info| info.texture().source().index()),
            });
        }
        meshes.push(MeshData { primitives, bounds });
    }

    let root_scene = gltf
        .default_scene()
        .or_else(|| gltf.scenes().next())
        .ok_or(AssetError::NoScene)?;
    let mut scene = Scene::default();
    for node in root_scene.nodes() {
        push_node(&mut scene, &node, None);
    }
    let images = load_embedded_images(&gltf, blob);
    log::info!(
        "[assets] model nodes={} meshes={} images={}",
        scene.len(),
        meshes.len(),
        images.iter().flatten().count()
    );
    Ok(Model {
        scene,
        meshes,
        images,
    })
}

/// Decode every image stored in the binary chunk. Failures are logged and
/// leave a hole so primitives fall back to their base colour.
fn load_embedded_images(gltf: &gltf::Gltf, blob: Option<&[u8]>) -> Vec<Option<ImageData>> {
    gltf.images()
        .map(|image| {
            let bytes = match image.source() {
                gltf::image::Source::View { view, .. } => match view.buffer().source() {
                    gltf::buffer::Source::Bin => {
                        blob.and_then(|b| b.get(view.offset()..view.offset() + view.length()))
                    }
                    gltf::buffer::Source::Uri(_) => None,
                },
                gltf::image::Source::Uri { .. } => None,
            };
            let Some(bytes) = bytes else {
                log::warn!("[assets] image {} is not embedded; skipped", image.index());
                return None;
            };
            match load_image(bytes) {
                Ok(img) => Some(img),
                Err(e) => {
                    log::warn!("[assets] image {} not decoded: {}", image.index(), e);
                    None
                }
            }
        })
        .collect()
}

fn push_node(scene: &mut Scene, node: &gltf::Node, parent: Option<NodeId>) {
    let (t, r, s) = node.transform().decomposed();
    let id = scene.push(SceneNode {
        name: node.name().map(str::to_string),
        parent,
        translation: Vec3::from_array(t),
        rotation: Quat::from_array(r),
        scale: Vec3::from_array(s),
        visible: true,
        mesh: node.mesh().map(|m| m.index()),
    });
    for child in node.children() {
        push_node(scene, &child, Some(id));
    }
}

pub fn load_image(bytes: &[u8]) -> Result<ImageData, AssetError> {
    let img = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = img.dimensions();
    Ok(ImageData {
        width,
        height,
        rgba: img.into_raw(),
    })
}
