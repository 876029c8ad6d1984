use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = wasm_bindgen::closure::Closure::wrap(
            Box::new(move || handler()) as Box<dyn FnMut()>
        );
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Click handler on an element created at runtime.
pub fn on_click(el: &web::Element, handler: impl FnMut(web::MouseEvent) + 'static) {
    let closure = wasm_bindgen::closure::Closure::wrap(
        Box::new(handler) as Box<dyn FnMut(web::MouseEvent)>
    );
    let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

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

/// Shows or hides via the `hidden` class, with an inline style fallback for
/// pages without the stylesheet.
pub fn set_visible(el: &web::Element, visible: bool) {
    let cl = el.class_list();
    if visible {
        let _ = cl.remove_1("hidden");
        let _ = el.set_attribute("style", "");
    } else {
        let _ = cl.add_1("hidden");
        let _ = el.set_attribute("style", "display:none");
    }
}

pub fn is_visible(el: &web::Element) -> bool {
    if el.class_list().contains("hidden") {
        return false;
    }
    !el.get_attribute("style")
        .map(|s| s.contains("display:none"))
        .unwrap_or(false)
}

pub fn set_visible_by_id(document: &web::Document, id: &str, visible: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        set_visible(&el, visible);
    }
}

pub fn set_text_by_id(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

pub fn clear_children(el: &web::Element) {
    while let Some(child) = el.first_child() {
        let _ = el.remove_child(&child);
    }
}

/// Creates `<tag class=…>text</tag>`; text is set as text content, never HTML.
pub fn create_el(
    document: &web::Document,
    tag: &str,
    class: &str,
    text: Option<&str>,
) -> anyhow::Result<web::Element> {
    let el = document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!("create_element({tag}): {:?}", e))?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    if let Some(t) = text {
        el.set_text_content(Some(t));
    }
    Ok(el)
}

pub fn append(parent: &web::Element, child: &web::Element) {
    let _ = parent.append_child(child);
}

pub fn local_storage() -> Option<web::Storage> {
    web::window().and_then(|w| w.local_storage().ok().flatten())
}

/// One listener on `container` for `event`, dispatched to the nearest
/// ancestor of the target matching `selector`. Wired once; children can be
/// rebuilt freely.
pub fn on_delegated(
    container: &web::Element,
    event: &str,
    selector: &str,
    mut handler: impl FnMut(web::Element, &web::Event) + 'static,
) {
    let selector = selector.to_string();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::Event| {
        let matched = ev
            .target()
            .and_then(|t| t.dyn_into::<web::Element>().ok())
            .and_then(|el| el.closest(&selector).ok().flatten());
        if let Some(el) = matched {
            handler(el, &ev);
        }
    }) as Box<dyn FnMut(web::Event)>);
    let _ = container.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}
