use crate::core::{PartId, PartNodes};
use fnv::FnvHashMap;
use glam::{Affine3A, Quat, Vec3};

pub type NodeId = usize;

/// Axis-aligned bounds in a node's local space.
#[derive(Clone, Copy, Debug)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn from_points(points: &[[f32; 3]]) -> Option<Self> {
        let first = Vec3::from_array(*points.first()?);
        let (min, max) = points.iter().fold((first, first), |(min, max), p| {
            let p = Vec3::from_array(*p);
            (min.min(p), max.max(p))
        });
        Some(Self { min, max })
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// World-space bounds of this box after `transform`.
    pub fn transformed(&self, transform: &Affine3A) -> Self {
        let corners = [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ];
        let first = transform.transform_point3(corners[0]);
        let (min, max) = corners[1..].iter().fold((first, first), |(min, max), c| {
            let p = transform.transform_point3(*c);
            (min.min(p), max.max(p))
        });
        Self { min, max }
    }
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: Option<String>,
    pub parent: Option<NodeId>,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub visible: bool,
    /// Index into the model's mesh list.
    pub mesh: Option<usize>,
}

impl SceneNode {
    pub fn local_transform(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// Flat node arena of one model instance. Parents always precede children.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    nodes: Vec<SceneNode>,
    by_name: FnvHashMap<String, NodeId>,
}

/// Node name as animation bindings see it: whitespace becomes `_` and the
/// path characters `[ ] . : /` are dropped, so `Cube.001` reads `Cube001`.
pub fn sanitize_node_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '[' | ']' | '.' | ':' | '/'))
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

impl Scene {
    /// Append `node`, storing its name in sanitized form.
    pub fn push(&mut self, mut node: SceneNode) -> NodeId {
        let id = self.nodes.len();
        debug_assert!(node.parent.map_or(true, |p| p < id));
        node.name = node.name.as_deref().map(sanitize_node_name);
        if let Some(name) = &node.name {
            // First node wins on duplicate names
            self.by_name.entry(name.clone()).or_insert(id);
        }
        self.nodes.push(node);
        id
    }

    /// A fresh copy that can be animated independently of `self`.
    pub fn instantiate(&self) -> Scene {
        self.clone()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter().enumerate()
    }

    /// World transforms of every node, given the transform of the scene root.
    pub fn world_transforms(&self, root: &Affine3A) -> Vec<Affine3A> {
        let mut out: Vec<Affine3A> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let parent = node.parent.map_or(*root, |p| out[p]);
            out.push(parent * node.local_transform());
        }
        out
    }

    /// A node is drawn only if it and all of its ancestors are visible.
    pub fn effective_visibility(&self) -> Vec<bool> {
        let mut out: Vec<bool> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let parent_visible = node.parent.map_or(true, |p| out[p]);
            out.push(parent_visible && node.visible);
        }
        out
    }
}

impl PartNodes for Scene {
    fn find_by_name(&self, name: &str) -> Option<PartId> {
        self.by_name.get(name).copied()
    }

    fn scale(&self, id: PartId) -> Vec3 {
        self.nodes.get(id).map_or(Vec3::ONE, |n| n.scale)
    }

    fn set_scale(&mut self, id: PartId, scale: Vec3) {
        if let Some(n) = self.nodes.get_mut(id) {
            n.scale = scale;
        }
    }

    fn set_visible(&mut self, id: PartId, visible: bool) {
        if let Some(n) = self.nodes.get_mut(id) {
            n.visible = visible;
        }
    }
}
