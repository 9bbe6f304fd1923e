#![cfg(target_arch = "wasm32")]
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod camera;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;
mod scene;
mod world;

use constants::{CARD_IMAGE_URL, GIFTBOX_URL};

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// The card image is optional: without it the front face renders plain.
async fn load_card_image() -> Option<assets::ImageData> {
    let loaded = match assets::fetch_bytes(CARD_IMAGE_URL).await {
        Ok(bytes) => assets::load_image(&bytes),
        Err(e) => Err(e),
    };
    match loaded {
        Ok(img) => {
            log::info!("[assets] card image {}x{}", img.width, img.height);
            Some(img)
        }
        Err(e) => {
            log::warn!("[assets] card image unavailable: {}", e);
            None
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("giftbox-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let model_bytes = assets::fetch_bytes(GIFTBOX_URL).await?;
    let model = assets::load_model(&model_bytes)?;
    let card_image = load_card_image().await;

    let world = Rc::new(RefCell::new(world::World::new(&model.scene, &model.meshes)));
    let gpu = frame::init_gpu(&canvas, &model.meshes, &model.images, card_image.as_ref()).await;

    let hover = Rc::new(RefCell::new(input::HoverState::default()));

    events::wire_global_keydown(world.clone());
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        world: world.clone(),
        hover: hover.clone(),
    });

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        world,
        canvas,
        document,
        hover,
        gpu,
        last_instant: Instant::now(),
        last_hint: "",
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
