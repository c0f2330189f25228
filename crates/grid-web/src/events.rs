use crate::dom;
use crate::input;
use grid_core::{FrameClock, GridEngine};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub pointer: Rc<RefCell<input::PointerInput>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerleave(&w);
}

// The grid sits behind page content, so listen on the window rather than
// the canvas.
fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if let Some(ndc) = input::pointer_canvas_ndc(&ev, &w.canvas) {
            w.pointer.borrow_mut().ndc = Some(ndc);
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerleave(w: &InputWiring) {
    let pointer = w.pointer.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        pointer.borrow_mut().ndc = None;
    }) as Box<dyn FnMut(_)>);
    if let Some(root) = dom::window_document().and_then(|d| d.document_element()) {
        _ = root.add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Keep the canvas backing store in sync and hand every resize to the
/// engine's debouncer. The lattice itself is only rebuilt at a frame boundary.
pub fn wire_resize(
    canvas: &web::HtmlCanvasElement,
    engine: Rc<RefCell<GridEngine>>,
    clock: Rc<RefCell<FrameClock>>,
) {
    dom::sync_canvas_backing_size(canvas);
    let canvas = canvas.clone();
    dom::add_window_listener("resize", move || {
        dom::sync_canvas_backing_size(&canvas);
        let now = clock.borrow().elapsed();
        engine
            .borrow_mut()
            .queue_resize(dom::viewport_css_width(), dom::device_class(), now);
    });
}
