use glam::Vec2;
use web_sys as web;

/// Latest pointer sample, in normalized device coordinates.
#[derive(Default, Clone, Copy)]
pub struct PointerInput {
    pub ndc: Option<Vec2>,
}

/// Pointer position relative to the canvas, mapped to `[-1, 1]` with +Y up.
/// Points outside the canvas map outside that range.
#[inline]
pub fn pointer_canvas_ndc(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Option<Vec2> {
    let rect = canvas.get_bounding_client_rect();
    let w = rect.width() as f32;
    let h = rect.height() as f32;
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    Some(Vec2::new(x_css / w * 2.0 - 1.0, 1.0 - y_css / h * 2.0))
}
