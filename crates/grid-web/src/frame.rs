use crate::input;
use crate::render;
use grid_core::{Discipline, DotField, FrameClock, FrameInput, GridEngine, Viewport};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub engine: Rc<RefCell<GridEngine>>,
    pub clock: Rc<RefCell<FrameClock>>,
    pub pointer: Rc<RefCell<input::PointerInput>>,
    pub focus: Rc<Cell<Option<Discipline>>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let time = self.clock.borrow_mut().tick();
        let (w, h) = (self.canvas.width(), self.canvas.height());
        let input = FrameInput {
            elapsed: time.elapsed,
            dt: time.dt,
            pointer_ndc: self.pointer.borrow().ndc,
            viewport: Viewport::new(w as f32, h as f32),
            focus: self.focus.get(),
        };

        let mut engine = self.engine.borrow_mut();
        let uploaded = match engine.advance(&input) {
            Ok(out) => match &mut self.gpu {
                Some(g) => {
                    g.resize_if_needed(w, h);
                    match g.render(&out) {
                        Ok(()) => true,
                        Err(e) => {
                            log::error!("render error: {:?}", e);
                            false
                        }
                    }
                }
                None => false,
            },
            Err(e) => {
                log::error!("frame error: {}", e);
                false
            }
        };
        if uploaded {
            engine.acknowledge_upload();
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    grid_capacity: usize,
    dots: &DotField,
) -> Option<render::GpuState> {
    match render::GpuState::new(canvas, grid_capacity, dots).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
