pub mod keyboard;
pub mod pointer;

pub use keyboard::{wire_pager_keys, wire_view_keys};
pub use pointer::{wire_input_handlers, wire_view_buttons, InputWiring};

use crate::constants::MUSEUM_CANVAS_ID;
use crate::dom;
use crate::keys::ViewCommand;
use crate::overlay;
use exhibit_core::ViewController;
use std::cell::RefCell;
use std::rc::Rc;

/// Runs a navigation command and mirrors the resulting overlay changes into
/// the DOM.
pub fn run_view_command(controller: &Rc<RefCell<ViewController>>, cmd: ViewCommand) {
    let Some(document) = dom::window_document() else {
        return;
    };
    let (change, title) = {
        let mut c = controller.borrow_mut();
        let change = match cmd {
            ViewCommand::Next => Some(c.next()),
            ViewCommand::Prev => Some(c.prev()),
            ViewCommand::Back => c.back(),
            ViewCommand::Select(id) => Some(c.select(id)),
            ViewCommand::ToggleHelp => None,
        };
        (change, c.registry().get(c.active()).title)
    };
    if cmd == ViewCommand::ToggleHelp {
        overlay::toggle_help(&document);
        return;
    }
    if let Some(change) = change {
        if let Some(canvas) = document.get_element_by_id(MUSEUM_CANVAS_ID) {
            let _ = canvas.remove_attribute("data-arrived");
        }
        overlay::apply_change(&document, &change);
        overlay::set_view_title(&document, title);
    }
}
