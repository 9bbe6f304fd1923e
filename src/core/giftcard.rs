use super::constants::{
    FLIP_RATE, INSPECT_DISTANCE, INSPECT_RATE, REST_EULER_XYZ, REST_POSITION, REST_RATE,
};
use super::cursor::Cursor;
use super::pose::Pose;
use super::smoothing::{damp, damp_quat, damp_vec3};
use glam::{Affine3A, EulerRot, Quat, Vec3};
use std::f32::consts::PI;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardPose {
    Resting,
    Inspecting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardFace {
    Front,
    Back,
}

#[derive(Clone, Debug)]
pub struct CardConfig {
    pub inspect_distance: f32,
    pub inspect_rate: f32,
    pub rest_rate: f32,
    pub flip_rate: f32,
    /// Resting pose in the parent's local frame.
    pub rest: Pose,
}

impl Default for CardConfig {
    fn default() -> Self {
        let [x, y, z] = REST_EULER_XYZ;
        Self {
            inspect_distance: INSPECT_DISTANCE,
            inspect_rate: INSPECT_RATE,
            rest_rate: REST_RATE,
            flip_rate: FLIP_RATE,
            rest: Pose::new(
                Vec3::from_array(REST_POSITION),
                Quat::from_euler(EulerRot::XYZ, x, y, z),
            ),
        }
    }
}

/// A card that can be picked up, turned toward the viewer and flipped over.
pub struct GiftCard {
    config: CardConfig,
    enabled: bool,
    pose_state: CardPose,
    face: CardFace,
    // Local to the parent, without the flip rotation
    pose: Pose,
    face_angle: f32,
}

impl GiftCard {
    pub fn new(config: CardConfig) -> Self {
        let pose = config.rest;
        Self {
            config,
            enabled: false,
            pose_state: CardPose::Resting,
            face: CardFace::Front,
            pose,
            face_angle: 0.0,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            log::info!("[card] enabled={}", enabled);
        }
        self.enabled = enabled;
    }

    /// Toggle between resting and inspecting. Ignored while disabled.
    pub fn click(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        self.pose_state = match self.pose_state {
            CardPose::Resting => CardPose::Inspecting,
            CardPose::Inspecting => CardPose::Resting,
        };
        log::info!("[card] pose={:?}", self.pose_state);
        true
    }

    /// Turn the card over. Only possible while it is being inspected.
    pub fn flip(&mut self) -> bool {
        if self.pose_state != CardPose::Inspecting {
            return false;
        }
        self.face = match self.face {
            CardFace::Front => CardFace::Back,
            CardFace::Back => CardFace::Front,
        };
        log::info!("[card] face={:?}", self.face);
        true
    }

    #[inline]
    pub fn hover(&self) -> Cursor {
        if self.enabled {
            Cursor::Pointer
        } else {
            Cursor::Default
        }
    }

    #[inline]
    pub fn pointer_leave(&self) -> Cursor {
        Cursor::Default
    }

    /// World-space point the card flies to while inspected.
    #[inline]
    pub fn inspect_target_world(&self, camera: &Pose) -> Vec3 {
        camera.position + camera.forward() * self.config.inspect_distance
    }

    /// Target pose in the parent's local frame.
    pub fn target_pose(&self, camera: &Pose, parent_world: &Affine3A) -> Pose {
        match self.pose_state {
            CardPose::Inspecting => {
                Pose::new(self.inspect_target_world(camera), camera.orientation)
                    .to_parent_local(parent_world)
            }
            CardPose::Resting => self.config.rest,
        }
    }

    pub fn update(&mut self, dt: Duration, camera: &Pose, parent_world: &Affine3A) {
        let dt_sec = dt.as_secs_f32();
        let target = self.target_pose(camera, parent_world);
        let rate = match self.pose_state {
            CardPose::Inspecting => self.config.inspect_rate,
            CardPose::Resting => self.config.rest_rate,
        };
        self.pose.position = damp_vec3(self.pose.position, target.position, rate, dt_sec);
        self.pose.orientation = damp_quat(self.pose.orientation, target.orientation, rate, dt_sec);

        let show_back = self.pose_state == CardPose::Inspecting && self.face == CardFace::Back;
        let face_target = if show_back { PI } else { 0.0 };
        self.face_angle = damp(self.face_angle, face_target, self.config.flip_rate, dt_sec);
    }

    /// Current local transform including the flip rotation.
    pub fn transform(&self) -> Pose {
        Pose::new(
            self.pose.position,
            self.pose.orientation * Quat::from_rotation_y(self.face_angle),
        )
    }

    #[inline]
    pub fn pose(&self) -> CardPose {
        self.pose_state
    }

    #[inline]
    pub fn face(&self) -> CardFace {
        self.face
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn is_inspecting(&self) -> bool {
        self.pose_state == CardPose::Inspecting
    }
}
