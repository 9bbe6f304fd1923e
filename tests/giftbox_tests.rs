// Host-side tests for the gift box open/shrink state machine.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod cursor {
    include!("../src/core/cursor.rs");
}
mod parts {
    include!("../src/core/parts.rs");
}
mod smoothing {
    include!("../src/core/smoothing.rs");
}
mod giftbox {
    include!("../src/core/giftbox.rs");
}

use giftbox::*;
use glam::Vec3;
use parts::{PartId, PartNodes, PartRole};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);

/// Minimal node table standing in for a loaded model.
struct FakeModel {
    names: Vec<&'static str>,
    scales: Vec<Vec3>,
    visible: Vec<bool>,
}

impl FakeModel {
    fn new(parts: &[(&'static str, Vec3)]) -> Self {
        Self {
            names: parts.iter().map(|(n, _)| *n).collect(),
            scales: parts.iter().map(|(_, s)| *s).collect(),
            visible: vec![true; parts.len()],
        }
    }

    fn id(&self, name: &str) -> PartId {
        self.names.iter().position(|n| *n == name).unwrap()
    }
}

impl PartNodes for FakeModel {
    fn find_by_name(&self, name: &str) -> Option<PartId> {
        self.names.iter().position(|n| *n == name)
    }
    fn scale(&self, id: PartId) -> Vec3 {
        self.scales[id]
    }
    fn set_scale(&mut self, id: PartId, scale: Vec3) {
        self.scales[id] = scale;
    }
    fn set_visible(&mut self, id: PartId, visible: bool) {
        self.visible[id] = visible;
    }
}

const LID: &[&str] = &["Lid", "Ribbon", "Bow"];
const BODY: &[&str] = &["Body"];

fn model() -> FakeModel {
    FakeModel::new(&[
        ("Lid", Vec3::ONE),
        ("Ribbon", Vec3::new(2.0, 0.5, 2.0)),
        ("Bow", Vec3::splat(0.25)),
        ("Body", Vec3::new(1.0, 3.0, 1.0)),
        ("Table", Vec3::ONE),
    ])
}

fn config(body_delay: Option<Duration>) -> BoxConfig {
    BoxConfig {
        lid_names: LID,
        body_names: BODY,
        body_delay,
        ..BoxConfig::default()
    }
}

fn run(gift: &mut GiftBox, nodes: &mut FakeModel, frames: usize, dt: Duration) {
    for _ in 0..frames {
        gift.update(nodes, dt);
    }
}

#[test]
fn closed_box_keeps_full_scale() {
    let mut nodes = model();
    let originals = nodes.scales.clone();
    let mut gift = GiftBox::new(&nodes, config(Some(Duration::from_millis(500))));

    run(&mut gift, &mut nodes, 100, FRAME);

    assert_eq!(gift.state(), BoxState::Closed);
    assert_eq!(gift.progress(PartRole::Lid), 1.0);
    assert_eq!(gift.progress(PartRole::Body), 1.0);
    assert_eq!(nodes.scales, originals);
    assert!(nodes.visible.iter().all(|v| *v));
}

#[test]
fn first_click_opens_and_notifies_once() {
    let nodes = model();
    let fired = Rc::new(Cell::new(0u32));
    let fired_cb = fired.clone();
    let mut gift =
        GiftBox::new(&nodes, config(None)).with_on_open(move || fired_cb.set(fired_cb.get() + 1));

    assert!(gift.click());
    assert!(!gift.click());
    assert!(!gift.click());

    assert_eq!(gift.state(), BoxState::Opened);
    assert_eq!(fired.get(), 1);
}

#[test]
fn clicks_after_opening_do_not_restart_the_body_delay() {
    let mut nodes = model();
    let mut gift = GiftBox::new(&nodes, config(Some(Duration::from_millis(500))));
    gift.click();
    run(&mut gift, &mut nodes, 20, FRAME);
    gift.click();
    run(&mut gift, &mut nodes, 20, FRAME);

    // 640ms since the opening click: body must already be shrinking
    assert!(gift.progress(PartRole::Body) < 1.0);
}

#[test]
fn opened_box_disappears_within_two_seconds() {
    for delay in [None, Some(Duration::from_millis(500))] {
        let mut nodes = model();
        let mut gift = GiftBox::new(&nodes, config(delay));
        gift.click();
        run(&mut gift, &mut nodes, 125, FRAME);

        assert!(gift.progress(PartRole::Lid) < 0.01, "delay {:?}", delay);
        assert!(gift.progress(PartRole::Body) < 0.01, "delay {:?}", delay);
        for name in LID.iter().chain(BODY) {
            assert!(!nodes.visible[nodes.id(name)], "{} still visible", name);
        }
    }
}

#[test]
fn body_waits_for_delay_while_lid_shrinks() {
    let mut nodes = model();
    let mut gift = GiftBox::new(&nodes, config(Some(Duration::from_millis(500))));
    gift.click();

    // 31 frames = 496ms, still inside the delay
    for _ in 0..31 {
        gift.update(&mut nodes, FRAME);
        assert_eq!(gift.progress(PartRole::Body), 1.0);
    }
    assert!(gift.progress(PartRole::Lid) < 1.0);
    assert_eq!(nodes.scales[nodes.id("Body")], Vec3::new(1.0, 3.0, 1.0));

    run(&mut gift, &mut nodes, 10, FRAME);
    assert!(gift.progress(PartRole::Body) < 1.0);
    assert!(gift.progress(PartRole::Body) > gift.progress(PartRole::Lid));
}

#[test]
fn body_delay_starts_on_the_frame_after_the_click() {
    let mut nodes = model();
    let mut gift = GiftBox::new(&nodes, config(Some(Duration::from_millis(500))));
    gift.click();

    // A long first frame is mostly time from before the click
    gift.update(&mut nodes, Duration::from_millis(100));
    run(&mut gift, &mut nodes, 25, FRAME);
    assert_eq!(gift.progress(PartRole::Body), 1.0);
    assert!(gift.progress(PartRole::Lid) < 0.01);

    // 400ms counted so far; the body lets go once 500ms have passed
    run(&mut gift, &mut nodes, 6, FRAME);
    assert_eq!(gift.progress(PartRole::Body), 1.0);
    run(&mut gift, &mut nodes, 1, FRAME);
    assert!(gift.progress(PartRole::Body) < 1.0);
}

#[test]
fn without_delay_lid_and_body_move_together() {
    let mut nodes = model();
    let mut gift = GiftBox::new(&nodes, config(None));
    gift.click();
    run(&mut gift, &mut nodes, 7, FRAME);
    assert_eq!(gift.progress(PartRole::Lid), gift.progress(PartRole::Body));
    assert!(gift.progress(PartRole::Lid) < 1.0);
}

#[test]
fn part_scale_tracks_original_times_progress() {
    let mut nodes = model();
    let originals = nodes.scales.clone();
    let mut gift = GiftBox::new(&nodes, config(Some(Duration::from_millis(500))));

    // Irregular frame times, including hitches and a zero-length frame
    let frame_ms = [16u64, 33, 7, 0, 120, 16, 16, 50, 3, 250, 16, 16];
    gift.update(&mut nodes, FRAME);
    gift.click();
    for (i, ms) in frame_ms.iter().cycle().take(60).enumerate() {
        gift.update(&mut nodes, Duration::from_millis(*ms));

        for (names, role) in [(LID, PartRole::Lid), (BODY, PartRole::Body)] {
            let progress = gift.progress(role);
            assert!((0.0..=1.0).contains(&progress), "frame {i}: {progress}");
            for name in names {
                let id = nodes.id(name);
                assert_eq!(nodes.scales[id], originals[id] * progress, "frame {i} {name}");
                assert_eq!(nodes.visible[id], progress > 0.01, "frame {i} {name}");
            }
        }
    }
    // Parts outside both groups are never touched
    let table = nodes.id("Table");
    assert_eq!(nodes.scales[table], Vec3::ONE);
}

#[test]
fn progress_is_frame_rate_independent() {
    let mut coarse_nodes = model();
    let mut fine_nodes = model();
    let mut coarse = GiftBox::new(&coarse_nodes, config(None));
    let mut fine = GiftBox::new(&fine_nodes, config(None));
    coarse.click();
    fine.click();

    run(&mut coarse, &mut coarse_nodes, 3, Duration::from_millis(100));
    run(&mut fine, &mut fine_nodes, 30, Duration::from_millis(10));

    assert!((coarse.progress(PartRole::Lid) - fine.progress(PartRole::Lid)).abs() < 1e-4);
}

#[test]
fn huge_frame_never_overshoots() {
    let mut nodes = model();
    let mut gift = GiftBox::new(&nodes, config(None));
    gift.click();
    gift.update(&mut nodes, Duration::from_secs(10));
    assert!(gift.progress(PartRole::Lid) >= 0.0);
    assert!(gift.progress(PartRole::Body) >= 0.0);
    assert!(nodes.scales.iter().all(|s| s.min_element() >= 0.0));
}

#[test]
fn missing_part_names_are_dropped() {
    let mut nodes = FakeModel::new(&[("Lid", Vec3::ONE), ("Body", Vec3::ONE)]);
    let mut gift = GiftBox::new(&nodes, config(None));

    assert_eq!(gift.part_count(PartRole::Lid), 1);
    assert_eq!(gift.part_count(PartRole::Body), 1);

    gift.click();
    run(&mut gift, &mut nodes, 10, FRAME);
    assert!(nodes.scales[0].x < 1.0);
}

#[test]
fn model_without_named_parts_still_animates_progress() {
    let mut nodes = FakeModel::new(&[("Teapot", Vec3::ONE)]);
    let mut gift = GiftBox::new(&nodes, config(None));
    gift.click();
    run(&mut gift, &mut nodes, 10, FRAME);

    assert!(gift.progress(PartRole::Lid) < 1.0);
    assert_eq!(nodes.scales[0], Vec3::ONE);
    assert!(nodes.visible[0]);
}

#[test]
fn original_scales_are_captured_once() {
    let mut nodes = model();
    let mut gift = GiftBox::new(&nodes, config(None));
    gift.click();
    run(&mut gift, &mut nodes, 5, FRAME);
    let progress = gift.progress(PartRole::Lid);
    let bow = nodes.id("Bow");

    // Shrinking must not compound: scale stays relative to the first capture
    assert_eq!(nodes.scales[bow], Vec3::splat(0.25) * progress);
}

#[test]
fn hovering_the_box_shows_pointer() {
    let nodes = model();
    let gift = GiftBox::new(&nodes, config(None));
    assert_eq!(gift.hover(), cursor::Cursor::Pointer);
}

#[test]
fn default_config_uses_model_part_names() {
    let cfg = BoxConfig::default();
    assert!(cfg.lid_names.contains(&"Torus"));
    assert_eq!(cfg.body_names, &["Cube_Body_0"]);
    assert_eq!(cfg.body_delay, Some(Duration::from_millis(500)));
}
