use crate::world::World;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    FlipCard,
    PutCardDown,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        "f" | "F" => Some(KeyAction::FlipCard),
        "Escape" => Some(KeyAction::PutCardDown),
        _ => None,
    }
}

pub fn handle_global_keydown(ev: &web::KeyboardEvent, world: &Rc<RefCell<World>>) {
    match action_for_key(&ev.key()) {
        Some(KeyAction::FlipCard) => {
            world.borrow_mut().flip_card();
            ev.prevent_default();
        }
        Some(KeyAction::PutCardDown) => {
            world.borrow_mut().put_card_down();
        }
        None => {}
    }
}

pub fn wire_global_keydown(world: Rc<RefCell<World>>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &world);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
