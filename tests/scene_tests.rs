// Host-side tests for the scene node arena and its use by the gift box.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod cursor {
        include!("../src/core/cursor.rs");
    }
    pub mod parts {
        include!("../src/core/parts.rs");
    }
    pub mod smoothing {
        include!("../src/core/smoothing.rs");
    }
    pub mod giftbox {
        include!("../src/core/giftbox.rs");
    }
    pub use parts::{PartId, PartNodes};
}
mod scene {
    include!("../src/scene.rs");
}

use crate::core::giftbox::{BoxConfig, GiftBox};
use crate::core::PartNodes;
use glam::{Affine3A, Quat, Vec3};
use scene::*;
use std::time::Duration;

fn node(name: &str, parent: Option<NodeId>, translation: Vec3, scale: Vec3) -> SceneNode {
    SceneNode {
        name: Some(name.to_string()),
        parent,
        translation,
        rotation: Quat::IDENTITY,
        scale,
        visible: true,
        mesh: None,
    }
}

/// Root -> Lid -> Bow, Root -> Body
fn box_scene() -> Scene {
    let mut scene = Scene::default();
    let root = scene.push(node("Root", None, Vec3::ZERO, Vec3::ONE));
    let lid = scene.push(node("Lid", Some(root), Vec3::new(0.0, 1.0, 0.0), Vec3::splat(2.0)));
    scene.push(node("Bow", Some(lid), Vec3::new(0.0, 0.5, 0.0), Vec3::ONE));
    scene.push(node("Body", Some(root), Vec3::ZERO, Vec3::ONE));
    scene
}

#[test]
fn world_transforms_compose_parent_chain() {
    let scene = box_scene();
    let root = Affine3A::from_translation(Vec3::new(10.0, 0.0, 0.0));
    let world = scene.world_transforms(&root);
    assert_eq!(world.len(), scene.len());

    let bow = scene.find_by_name("Bow").unwrap();
    let origin = world[bow].transform_point3(Vec3::ZERO);
    // Lid scale of 2 doubles the bow's offset
    assert!((origin - Vec3::new(10.0, 2.0, 0.0)).length() < 1e-6);
}

#[test]
fn hidden_parent_hides_children() {
    let mut scene = box_scene();
    let lid = scene.find_by_name("Lid").unwrap();
    scene.set_visible(lid, false);

    let vis = scene.effective_visibility();
    let bow = scene.find_by_name("Bow").unwrap();
    let body = scene.find_by_name("Body").unwrap();
    assert!(!vis[lid]);
    assert!(!vis[bow]);
    assert!(vis[body]);
}

#[test]
fn duplicate_names_resolve_to_first_node() {
    let mut scene = Scene::default();
    let first = scene.push(node("Cube", None, Vec3::ZERO, Vec3::ONE));
    scene.push(node("Cube", None, Vec3::X, Vec3::ONE));
    assert_eq!(scene.find_by_name("Cube"), Some(first));
    assert_eq!(scene.find_by_name("Sphere"), None);
}

#[test]
fn node_names_are_sanitized_like_animation_bindings() {
    assert_eq!(sanitize_node_name("Cube.001"), "Cube001");
    assert_eq!(sanitize_node_name("Gift Box"), "Gift_Box");
    assert_eq!(sanitize_node_name("Bow\tKnot"), "Bow_Knot");
    assert_eq!(sanitize_node_name("arm[0]:left/hand"), "arm0lefthand");
    assert_eq!(sanitize_node_name("Cube_Body_0"), "Cube_Body_0");
}

#[test]
fn dotted_names_are_found_by_their_clean_form() {
    let mut scene = Scene::default();
    let dotted = scene.push(node("Cube.001", None, Vec3::ZERO, Vec3::ONE));
    let spaced = scene.push(node("Gift Box", None, Vec3::ZERO, Vec3::ONE));
    assert_eq!(scene.find_by_name("Cube001"), Some(dotted));
    assert_eq!(scene.find_by_name("Gift_Box"), Some(spaced));
    assert_eq!(scene.find_by_name("Cube.001"), None);

    let names: Vec<_> = scene.nodes().filter_map(|(_, n)| n.name.clone()).collect();
    assert_eq!(names, ["Cube001", "Gift_Box"]);
}

#[test]
fn clean_names_that_collide_keep_the_first_node() {
    let mut scene = Scene::default();
    let first = scene.push(node("Cube.001", None, Vec3::ZERO, Vec3::ONE));
    scene.push(node("Cube001", None, Vec3::ZERO, Vec3::ONE));
    assert_eq!(scene.find_by_name("Cube001"), Some(first));
}

#[test]
fn out_of_range_ids_are_ignored() {
    let mut scene = box_scene();
    scene.set_scale(99, Vec3::ZERO);
    scene.set_visible(99, false);
    assert_eq!(scene.scale(99), Vec3::ONE);
}

#[test]
fn instances_animate_independently() {
    let template = box_scene();
    let mut instance = template.instantiate();
    let lid = instance.find_by_name("Lid").unwrap();
    instance.set_scale(lid, Vec3::ZERO);
    assert_eq!(template.scale(lid), Vec3::splat(2.0));
}

#[test]
fn bounds_follow_transform() {
    let bounds = Bounds::from_points(&[[-1.0, 0.0, -1.0], [1.0, 2.0, 1.0]]).unwrap();
    let moved = bounds.transformed(&Affine3A::from_scale_rotation_translation(
        Vec3::splat(0.5),
        Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        Vec3::new(0.0, 1.0, 0.0),
    ));
    assert!((moved.min - Vec3::new(-0.5, 1.0, -0.5)).length() < 1e-5);
    assert!((moved.max - Vec3::new(0.5, 2.0, 0.5)).length() < 1e-5);

    let other = Bounds::from_points(&[[3.0, 3.0, 3.0]]).unwrap();
    let all = bounds.union(other);
    assert_eq!(all.max, Vec3::splat(3.0));
    assert!(Bounds::from_points(&[]).is_none());
}

#[test]
fn gift_box_shrinks_scene_parts() {
    let mut scene = box_scene();
    let mut gift = GiftBox::new(
        &scene,
        BoxConfig {
            lid_names: &["Lid"],
            body_names: &["Body"],
            body_delay: None,
            ..BoxConfig::default()
        },
    );
    gift.click();
    for _ in 0..150 {
        gift.update(&mut scene, Duration::from_millis(16));
    }

    let vis = scene.effective_visibility();
    let lid = scene.find_by_name("Lid").unwrap();
    let bow = scene.find_by_name("Bow").unwrap();
    let root = scene.find_by_name("Root").unwrap();
    assert!(!vis[lid]);
    assert!(!vis[bow], "children of the lid vanish with it");
    assert!(vis[root]);
    assert!(scene.scale(lid).x < 0.02);
}
