use crate::camera::canvas_aspect;
use crate::constants::{HOVER_BRIGHTEN, MARKER_COLOR, MARKER_PULSE_HZ};
use crate::render::{self, MarkerInstance};
use exhibit_core::{Camera, ViewController, ViewEvent, ViewId, HOTSPOT_MARKER_SIZE};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub controller: Rc<RefCell<ViewController>>,
    pub camera: Rc<RefCell<Camera>>,
    pub hover: Rc<RefCell<Option<ViewId>>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState>,
    pub last_instant: Instant,
    pub time_accum: f32,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        self.time_accum += dt.as_secs_f32();

        let (event, pose, hotspots) = {
            let mut c = self.controller.borrow_mut();
            let event = c.tick(dt);
            (event, c.camera_pose(), c.hotspots())
        };

        if let Some(ViewEvent::Arrived(id)) = event {
            let _ = self.canvas.set_attribute("data-arrived", id.as_str());
            log::info!("[view] arrived at {}", id);
        }

        {
            let mut cam = self.camera.borrow_mut();
            cam.set_pose(pose.0, pose.1);
            cam.aspect = canvas_aspect(&self.canvas);
        }

        let hover = *self.hover.borrow();
        let pulse = 1.0 + 0.08 * (self.time_accum * MARKER_PULSE_HZ * std::f32::consts::TAU).sin();
        let markers: Vec<MarkerInstance> = hotspots
            .iter()
            .map(|h| {
                let hovered = hover == Some(h.view);
                let k = if hovered { HOVER_BRIGHTEN } else { 1.0 };
                let size = HOTSPOT_MARKER_SIZE * if hovered { 1.15 } else { pulse };
                MarkerInstance {
                    center_size: [h.position.x, h.position.y, h.position.z, size],
                    color: [
                        (MARKER_COLOR[0] * k).min(1.0),
                        (MARKER_COLOR[1] * k).min(1.0),
                        (MARKER_COLOR[2] * k).min(1.0),
                        1.0,
                    ],
                }
            })
            .collect();

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            g.set_camera(&self.camera.borrow());
            if let Err(e) = g.render(&markers) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState> {
    match render::GpuState::new(canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

type TickHandle = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: TickHandle = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &TickHandle) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
