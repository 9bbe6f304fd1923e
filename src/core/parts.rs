use fnv::FnvHashMap;
use glam::Vec3;
use smallvec::SmallVec;

/// Stable handle of a node inside a loaded model instance.
pub type PartId = usize;

/// Scene-graph access needed to animate named parts.
///
/// The box never reparents or destroys nodes; it only looks them up by name
/// and writes their scale and visibility.
pub trait PartNodes {
    fn find_by_name(&self, name: &str) -> Option<PartId>;
    fn scale(&self, id: PartId) -> Vec3;
    fn set_scale(&mut self, id: PartId, scale: Vec3);
    fn set_visible(&mut self, id: PartId, visible: bool);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PartRole {
    Lid,
    Body,
}

/// Ordered set of parts sharing one role.
#[derive(Clone, Debug)]
pub struct PartGroup {
    pub role: PartRole,
    parts: SmallVec<[PartId; 16]>,
}

impl PartGroup {
    /// Resolve `names` against `nodes`, silently dropping names that have no
    /// matching part.
    pub fn resolve<N: PartNodes + ?Sized>(role: PartRole, names: &[&str], nodes: &N) -> Self {
        let mut parts = SmallVec::new();
        for name in names {
            match nodes.find_by_name(name) {
                Some(id) => parts.push(id),
                None => log::debug!("[giftbox] no part named {:?} ({:?})", name, role),
            }
        }
        Self { role, parts }
    }

    #[inline]
    pub fn ids(&self) -> &[PartId] {
        &self.parts
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Resting scale of every animated part, captured once and never mutated.
#[derive(Clone, Debug, Default)]
pub struct ScaleTable {
    scales: FnvHashMap<PartId, Vec3>,
}

impl ScaleTable {
    pub fn capture<'a, N, I>(nodes: &N, ids: I) -> Self
    where
        N: PartNodes + ?Sized,
        I: IntoIterator<Item = &'a PartId>,
    {
        let scales = ids.into_iter().map(|&id| (id, nodes.scale(id))).collect();
        Self { scales }
    }

    #[inline]
    pub fn get(&self, id: PartId) -> Option<Vec3> {
        self.scales.get(&id).copied()
    }
}
