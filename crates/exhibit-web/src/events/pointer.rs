use crate::camera;
use crate::constants::{BACK_BUTTON_ID, TOUR_NEXT_ID, TOUR_PREV_ID};
use crate::input::{self, CLICK_SLOP_PX};
use crate::keys::ViewCommand;
use exhibit_core::{Camera, ViewController, ViewId};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub controller: Rc<RefCell<ViewController>>,
    pub camera: Rc<RefCell<Camera>>,
    pub mouse_state: Rc<RefCell<input::MouseState>>,
    pub hover: Rc<RefCell<Option<ViewId>>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    // pointermove
    {
        let mouse_state_m = w.mouse_state.clone();
        let hover_m = w.hover.clone();
        let controller_m = w.controller.clone();
        let camera_m = w.camera.clone();
        let canvas_mouse = w.canvas.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let pos = input::pointer_canvas_px(&ev, &canvas_mouse);
            {
                let mut ms = mouse_state_m.borrow_mut();
                if ms.down {
                    let dx = pos.x - ms.x;
                    let dy = pos.y - ms.y;
                    if dx * dx + dy * dy > CLICK_SLOP_PX * CLICK_SLOP_PX {
                        ms.dragged = true;
                    }
                } else {
                    ms.x = pos.x;
                    ms.y = pos.y;
                }
            }
            let (ro, rd) = camera::screen_to_world_ray(&canvas_mouse, &camera_m.borrow(), pos);
            let picked = controller_m.borrow().pick(ro, rd);
            *hover_m.borrow_mut() = picked;
            let cursor = if picked.is_some() { "pointer" } else { "default" };
            let _ = canvas_mouse.style().set_property("cursor", cursor);
        }) as Box<dyn FnMut(_)>);
        let _ = w
            .canvas
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointerdown
    {
        let mouse_state_d = w.mouse_state.clone();
        let canvas_down = w.canvas.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let pos = input::pointer_canvas_px(&ev, &canvas_down);
            let mut ms = mouse_state_d.borrow_mut();
            ms.x = pos.x;
            ms.y = pos.y;
            ms.down = true;
            ms.dragged = false;
        }) as Box<dyn FnMut(_)>);
        let _ = w
            .canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointerup: a release over a hotspot without dragging selects it
    {
        let mouse_state_u = w.mouse_state.clone();
        let hover_u = w.hover.clone();
        let controller_u = w.controller.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            let was_click = {
                let mut ms = mouse_state_u.borrow_mut();
                let click = ms.down && !ms.dragged;
                ms.down = false;
                ms.dragged = false;
                click
            };
            if !was_click {
                return;
            }
            let target = *hover_u.borrow();
            if let Some(id) = target {
                log::info!("[pointer] hotspot {}", id);
                super::run_view_command(&controller_u, ViewCommand::Select(id));
            }
        }) as Box<dyn FnMut(_)>);
        let _ = w
            .canvas
            .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Leaving the canvas clears the hover highlight
    {
        let hover_l = w.hover.clone();
        let mouse_state_l = w.mouse_state.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            *hover_l.borrow_mut() = None;
            mouse_state_l.borrow_mut().down = false;
        }) as Box<dyn FnMut(_)>);
        let _ = w
            .canvas
            .add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Wires `[data-view]` buttons plus the back and tour buttons to the controller.
pub fn wire_view_buttons(document: &web::Document, controller: &Rc<RefCell<ViewController>>) {
    if let Ok(nodes) = document.query_selector_all("[data-view]") {
        for i in 0..nodes.length() {
            let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
                continue;
            };
            let Some(raw) = el.get_attribute("data-view") else {
                continue;
            };
            let id = match raw.parse::<ViewId>() {
                Ok(id) => id,
                Err(e) => {
                    log::warn!("[buttons] ignoring data-view={:?}: {}", raw, e);
                    continue;
                }
            };
            let controller_b = controller.clone();
            crate::dom::on_click(&el, move |_| {
                super::run_view_command(&controller_b, ViewCommand::Select(id));
            });
        }
    }

    let buttons = [
        (BACK_BUTTON_ID, ViewCommand::Back),
        (TOUR_NEXT_ID, ViewCommand::Next),
        (TOUR_PREV_ID, ViewCommand::Prev),
    ];
    for (id, cmd) in buttons {
        let controller_b = controller.clone();
        crate::dom::add_click_listener(document, id, move || {
            super::run_view_command(&controller_b, cmd);
        });
    }
}
