use crate::assets::MeshData;
use crate::camera::Camera;
use crate::constants::{
    BOX_POSITION, BOX_SCALE, CARD_GROUP_POSITION, CARD_GROUP_SCALE, CARD_QUAD_SCALE,
};
use crate::core::constants::{CARD_BACK_OFFSET, CARD_HEIGHT, CARD_WIDTH};
use crate::core::{BoxConfig, CardConfig, Cursor, GiftBox, GiftCard};
use crate::input::{self, PickTarget};
use crate::scene::{Bounds, Scene};
use glam::{Affine3A, Quat, Vec3};
use std::cell::Cell;
use std::f32::consts::PI;
use std::rc::Rc;
use std::time::Duration;

/// Everything the page animates: one gift box, one card, the camera.
///
/// The box tells the page it opened through a shared flag; the page then
/// enables the card on the next tick.
pub struct World {
    pub gift_box: GiftBox,
    pub box_scene: Scene,
    pub box_root: Affine3A,
    mesh_bounds: Vec<Option<Bounds>>,
    pub card: GiftCard,
    pub card_parent: Affine3A,
    pub camera: Camera,
    box_opened: Rc<Cell<bool>>,
}

impl World {
    pub fn new(template: &Scene, meshes: &[MeshData]) -> Self {
        let box_scene = template.instantiate();
        let box_opened = Rc::new(Cell::new(false));
        let opened_flag = box_opened.clone();
        let gift_box = GiftBox::new(&box_scene, BoxConfig::default())
            .with_on_open(move || opened_flag.set(true));
        Self {
            gift_box,
            box_scene,
            box_root: Affine3A::from_scale_rotation_translation(
                Vec3::splat(BOX_SCALE),
                Quat::IDENTITY,
                BOX_POSITION,
            ),
            mesh_bounds: meshes.iter().map(|m| m.bounds).collect(),
            card: GiftCard::new(CardConfig::default()),
            card_parent: Affine3A::from_scale_rotation_translation(
                Vec3::splat(CARD_GROUP_SCALE),
                Quat::IDENTITY,
                CARD_GROUP_POSITION,
            ),
            camera: Camera::default(),
            box_opened,
        }
    }

    pub fn update(&mut self, dt: Duration) {
        if self.box_opened.get() && !self.card.is_enabled() {
            self.card.set_enabled(true);
        }
        self.gift_box.update(&mut self.box_scene, dt);
        let camera_pose = self.camera.pose();
        self.card.update(dt, &camera_pose, &self.card_parent);
    }

    /// World transform of the card node (flip included), before quad scaling.
    pub fn card_world(&self) -> Affine3A {
        self.card_parent * self.card.transform().to_affine()
    }

    /// World transform of the front quad.
    pub fn card_front_world(&self) -> Affine3A {
        self.card_world() * Affine3A::from_scale(Vec3::splat(CARD_QUAD_SCALE))
    }

    /// World transform of the back quad: behind the front, facing away.
    pub fn card_back_world(&self) -> Affine3A {
        self.card_world()
            * Affine3A::from_scale(Vec3::splat(CARD_QUAD_SCALE))
            * Affine3A::from_translation(Vec3::new(0.0, 0.0, -CARD_BACK_OFFSET))
            * Affine3A::from_rotation_y(PI)
    }

    fn box_hit(&self, ro: Vec3, rd: Vec3) -> Option<f32> {
        let transforms = self.box_scene.world_transforms(&self.box_root);
        let visible = self.box_scene.effective_visibility();
        self.box_scene
            .nodes()
            .filter(|(id, _)| visible[*id])
            .filter_map(|(id, node)| {
                let bounds = node.mesh.and_then(|m| self.mesh_bounds.get(m).copied().flatten())?;
                let world = bounds.transformed(&transforms[id]);
                input::ray_aabb(ro, rd, world.min, world.max)
            })
            .min_by(|a, b| a.total_cmp(b))
    }

    fn card_hit(&self, ro: Vec3, rd: Vec3) -> Option<f32> {
        let half = Vec3::new(CARD_WIDTH * 0.5, CARD_HEIGHT * 0.5, CARD_BACK_OFFSET * 2.0);
        let world = Bounds {
            min: -half,
            max: half,
        }
        .transformed(&self.card_front_world());
        input::ray_aabb(ro, rd, world.min, world.max)
    }

    /// Object under the ray, nearest first.
    pub fn pick(&self, ro: Vec3, rd: Vec3) -> Option<PickTarget> {
        input::nearest_hit([
            (PickTarget::GiftBox, self.box_hit(ro, rd)),
            (PickTarget::Card, self.card_hit(ro, rd)),
        ])
    }

    pub fn click(&mut self, target: Option<PickTarget>) {
        match target {
            Some(PickTarget::GiftBox) => {
                self.gift_box.click();
            }
            Some(PickTarget::Card) => {
                self.card.click();
            }
            None => {}
        }
    }

    pub fn hover(&self, target: Option<PickTarget>) -> Cursor {
        match target {
            Some(PickTarget::GiftBox) => self.gift_box.hover(),
            Some(PickTarget::Card) => self.card.hover(),
            None => self.card.pointer_leave(),
        }
    }

    pub fn flip_card(&mut self) {
        self.card.flip();
    }

    /// Put an inspected card back down, as clicking it would.
    pub fn put_card_down(&mut self) {
        if self.card.is_inspecting() {
            self.card.click();
        }
    }
}
