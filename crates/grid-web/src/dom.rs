use grid_core::DeviceClass;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// Four cores or fewer counts as low power.
const LOW_POWER_MAX_CORES: f64 = 4.0;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Match the canvas backing store to its CSS size times devicePixelRatio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Layout width in CSS pixels; this is what the tier breakpoints refer to.
pub fn viewport_css_width() -> f32 {
    web::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .map(|v| v as f32)
        .unwrap_or(0.0)
}

pub fn device_class() -> DeviceClass {
    let Some(window) = web::window() else {
        return DeviceClass::Standard;
    };
    let coarse = window
        .match_media("(pointer: coarse)")
        .ok()
        .flatten()
        .map(|m| m.matches())
        .unwrap_or(false);
    let cores = window.navigator().hardware_concurrency();
    if coarse || (cores > 0.0 && cores <= LOW_POWER_MAX_CORES) {
        DeviceClass::LowPower
    } else {
        DeviceClass::Standard
    }
}

pub fn data_attribute(el: &web::Element, name: &str) -> Option<String> {
    el.get_attribute(&format!("data-{name}"))
        .filter(|v| !v.trim().is_empty())
}

pub fn add_window_listener(event: &str, mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
