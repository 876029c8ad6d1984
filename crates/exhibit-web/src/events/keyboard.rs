use crate::keys::{pager_command_for_key, view_command_for_key, ViewCommand};
use exhibit_core::{PagerCommand, ViewController};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// True when the key event is aimed at a text field and should be left alone.
fn typing_into_field(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .map(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT"))
        .unwrap_or(false)
}

pub fn handle_view_keydown(ev: &web::KeyboardEvent, controller: &Rc<RefCell<ViewController>>) {
    if typing_into_field(ev) {
        return;
    }
    let key = ev.key();
    let Some(cmd) = view_command_for_key(&key) else {
        return;
    };
    if cmd != ViewCommand::ToggleHelp {
        // Arrows would scroll the page and Backspace may navigate away.
        ev.prevent_default();
    }
    log::debug!("[keys] {} -> {:?}", key, cmd);
    super::run_view_command(controller, cmd);
}

pub fn wire_view_keys(controller: Rc<RefCell<ViewController>>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_view_keydown(&ev, &controller);
            }) as Box<dyn FnMut(_)>);
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Keyboard paging for the content browsers; `on_page` receives each command.
pub fn wire_pager_keys(mut on_page: impl FnMut(PagerCommand) + 'static) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                if typing_into_field(&ev) {
                    return;
                }
                if let Some(cmd) = pager_command_for_key(&ev.key()) {
                    ev.prevent_default();
                    on_page(cmd);
                }
            }) as Box<dyn FnMut(_)>);
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
