use crate::constants::{HELP_OVERLAY_ID, VIEW_TITLE_ID};
use crate::dom;
use exhibit_core::{Overlay, OverlaySet, ViewChange};
use web_sys as web;

/// Exit actions first, then entry actions, so two info panels never overlap.
pub fn apply_change(document: &web::Document, change: &ViewChange) {
    for o in change.hidden.iter() {
        dom::set_visible_by_id(document, o.element_id(), false);
    }
    for o in change.shown.iter() {
        dom::set_visible_by_id(document, o.element_id(), true);
    }
}

/// Forces every overlay element to match `visible`.
pub fn sync_all(document: &web::Document, visible: OverlaySet) {
    for o in Overlay::ALL {
        dom::set_visible_by_id(document, o.element_id(), visible.contains(o));
    }
}

pub fn set_view_title(document: &web::Document, title: &str) {
    dom::set_text_by_id(document, VIEW_TITLE_ID, title);
}

#[inline]
pub fn is_help_hidden(document: &web::Document) -> bool {
    document
        .get_element_by_id(HELP_OVERLAY_ID)
        .map(|el| !dom::is_visible(&el))
        .unwrap_or(true)
}

#[inline]
pub fn toggle_help(document: &web::Document) {
    let show = is_help_hidden(document);
    dom::set_visible_by_id(document, HELP_OVERLAY_ID, show);
}
