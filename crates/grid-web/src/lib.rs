#![cfg(target_arch = "wasm32")]
use grid_core::{Discipline, FrameClock, GridEngine, SceneKind};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod dom;
mod events;
mod frame;
mod input;
mod render;

thread_local! {
    // Written by the page's section navigation, read once per frame.
    static FOCUS: Rc<Cell<Option<Discipline>>> = Rc::new(Cell::new(None));
}

/// Show only the sources of one discipline (`engineering`, `research`,
/// `product`). Hidden sources keep moving.
#[wasm_bindgen]
pub fn set_focus(name: &str) -> Result<(), JsValue> {
    let discipline: Discipline = name
        .parse()
        .map_err(|e: grid_core::UnknownDiscipline| JsValue::from(js_sys::Error::new(&e.to_string())))?;
    FOCUS.with(|f| f.set(Some(discipline)));
    log::info!("[focus] {}", discipline);
    Ok(())
}

#[wasm_bindgen]
pub fn clear_focus() {
    FOCUS.with(|f| f.set(None));
    log::info!("[focus] cleared");
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("grid-web starting");

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
        .get_element_by_id("grid-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #grid-canvas"))?;
    let scene = match dom::data_attribute(&canvas_el, "scene") {
        Some(name) => name.parse::<SceneKind>().unwrap_or_else(|e| {
            log::warn!("{}; falling back to home", e);
            SceneKind::Home
        }),
        None => SceneKind::Home,
    };
    if let Some(name) = dom::data_attribute(&canvas_el, "focus") {
        match name.parse::<Discipline>() {
            Ok(d) => FOCUS.with(|f| f.set(Some(d))),
            Err(e) => log::warn!("{}", e),
        }
    }
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let engine = GridEngine::new(
        scene.profile(),
        dom::viewport_css_width(),
        dom::device_class(),
    )?;
    let engine = Rc::new(RefCell::new(engine));
    let clock = Rc::new(RefCell::new(FrameClock::new()));

    events::wire_resize(&canvas, engine.clone(), clock.clone());

    let pointer = Rc::new(RefCell::new(input::PointerInput::default()));
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        pointer: pointer.clone(),
    });

    // Don't hold the engine borrow across the await; resize events may arrive meanwhile.
    let (grid_capacity, dots) = {
        let e = engine.borrow();
        (e.lattice().len(), e.dots().clone())
    };
    let gpu = frame::init_gpu(&canvas, grid_capacity, &dots).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        engine,
        clock,
        pointer,
        focus: FOCUS.with(|f| f.clone()),
        canvas,
        gpu,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
