use crate::core::Cursor;
use glam::{Vec2, Vec3};
use web_sys as web;

/// Objects that react to the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickTarget {
    GiftBox,
    Card,
}

/// Slab test of a ray against an axis-aligned box.
///
/// Returns the distance to the entry point, or to the exit point when the
/// origin is inside the box. Misses and boxes behind the origin give `None`.
#[inline]
pub fn ray_aabb(ray_origin: Vec3, ray_dir: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = ray_dir.recip();
    let t0 = (min - ray_origin) * inv;
    let t1 = (max - ray_origin) * inv;
    let t_near = t0.min(t1).max_element();
    let t_far = t0.max(t1).min_element();
    if t_near > t_far || t_far < 0.0 {
        return None;
    }
    Some(if t_near >= 0.0 { t_near } else { t_far })
}

/// Closest hit wins; only it receives the event.
#[inline]
pub fn nearest_hit<T: Copy>(hits: impl IntoIterator<Item = (T, Option<f32>)>) -> Option<T> {
    let mut best = None::<(T, f32)>;
    for (target, t) in hits {
        if let Some(t) = t {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((target, t)),
            }
        }
    }
    best.map(|(target, _)| target)
}

/// Where the pointer is and which cursor it shows. Shared by the pointer
/// handlers and the frame loop, which re-picks every frame because objects
/// move and change their affordance under a still pointer.
#[derive(Clone, Copy, Debug, Default)]
pub struct HoverState {
    pointer_px: Option<Vec2>,
    cursor: Cursor,
}

impl HoverState {
    /// Canvas pixel position, `None` while the pointer is outside the canvas.
    #[inline]
    pub fn pointer_px(&self) -> Option<Vec2> {
        self.pointer_px
    }

    #[inline]
    pub fn pointer_moved(&mut self, px: Vec2) {
        self.pointer_px = Some(px);
    }

    /// Forget the pointer; returns the cursor to apply if it changed.
    pub fn pointer_left(&mut self) -> Option<Cursor> {
        self.pointer_px = None;
        self.show(Cursor::Default)
    }

    /// Returns `cursor` when it differs from the one on screen.
    pub fn show(&mut self, cursor: Cursor) -> Option<Cursor> {
        if self.cursor == cursor {
            return None;
        }
        self.cursor = cursor;
        Some(cursor)
    }
}

// ---------------- Pointer helpers ----------------
#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let w = (rect.width() as f32).max(1.0);
    let h = (rect.height() as f32).max(1.0);
    let sx = (x_css / w) * canvas.width() as f32;
    let sy = (y_css / h) * canvas.height() as f32;
    Vec2::new(sx, sy)
}
