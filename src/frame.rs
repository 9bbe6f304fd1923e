use crate::constants::MAX_FRAME_DT_SEC;
use crate::events;
use crate::input::HoverState;
use crate::overlay;
use crate::render;
use crate::world::World;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub world: Rc<RefCell<World>>,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub hover: Rc<RefCell<HoverState>>,
    pub gpu: Option<render::GpuState<'a>>,
    pub last_instant: Instant,
    pub last_hint: &'static str,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = clamp_frame_dt(now - self.last_instant);
        self.last_instant = now;

        let mut world = self.world.borrow_mut();
        world.update(dt);

        // The box shrinks and the card moves under a pointer that may not move
        events::refresh_hover(&self.canvas, &world, &mut self.hover.borrow_mut());

        let hint = overlay::hint_text(world.gift_box.state(), world.card.pose(), world.card.face());
        if hint != self.last_hint {
            overlay::update_hint(&self.document, hint);
            self.last_hint = hint;
        }

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            if let Err(e) = g.render(&world) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

/// Tab switches and debugger pauses would otherwise jump every animation to
/// its end in one frame.
#[inline]
fn clamp_frame_dt(dt: Duration) -> Duration {
    dt.min(Duration::from_secs_f32(MAX_FRAME_DT_SEC))
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    meshes: &[crate::assets::MeshData],
    model_images: &[Option<crate::assets::ImageData>],
    card_image: Option<&crate::assets::ImageData>,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, meshes, model_images, card_image).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
