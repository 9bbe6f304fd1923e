use crate::camera::screen_to_world_ray;
use crate::dom;
use crate::input::{self, HoverState, PickTarget};
use crate::world::World;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub world: Rc<RefCell<World>>,
    pub hover: Rc<RefCell<HoverState>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerleave(&w);
    wire_click(&w);
    wire_contextmenu(&w);
}

fn pick_at(w: &InputWiring, ev: &web::MouseEvent) -> Option<PickTarget> {
    let pos = input::pointer_canvas_px(ev, &w.canvas);
    let world = w.world.borrow();
    let (ro, rd) = screen_to_world_ray(&w.canvas, pos.x, pos.y, &world.camera);
    world.pick(ro, rd)
}

/// Re-pick under the last known pointer position and update the cursor.
pub fn refresh_hover(canvas: &web::HtmlCanvasElement, world: &World, hover: &mut HoverState) {
    let Some(pos) = hover.pointer_px() else {
        return;
    };
    let (ro, rd) = screen_to_world_ray(canvas, pos.x, pos.y, &world.camera);
    let target = world.pick(ro, rd);
    if let Some(cursor) = hover.show(world.hover(target)) {
        dom::set_cursor(cursor);
    }
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let mut hover = w.hover.borrow_mut();
        hover.pointer_moved(input::pointer_canvas_px(&ev, &w.canvas));
        refresh_hover(&w.canvas, &w.world.borrow(), &mut hover);
    }) as Box<dyn FnMut(_)>);

    _ = w
        .canvas
        .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerleave(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        if let Some(cursor) = w.hover.borrow_mut().pointer_left() {
            dom::set_cursor(cursor);
        }
    }) as Box<dyn FnMut(_)>);

    _ = w
        .canvas
        .add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_click(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let target = pick_at(&w, &ev);
        if target.is_some() {
            ev.stop_propagation();
            log::debug!("[click] {:?}", target);
        }
        let mut world = w.world.borrow_mut();
        world.click(target);
        refresh_hover(&w.canvas, &world, &mut w.hover.borrow_mut());
    }) as Box<dyn FnMut(_)>);

    _ = w
        .canvas
        .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_contextmenu(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        if pick_at(&w, &ev) == Some(PickTarget::Card) {
            w.world.borrow_mut().flip_card();
            ev.prevent_default();
            ev.stop_propagation();
        }
    }) as Box<dyn FnMut(_)>);

    _ = w
        .canvas
        .add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
    closure.forget();
}
