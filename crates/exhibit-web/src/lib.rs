#![cfg(target_arch = "wasm32")]
use exhibit_core::{Camera, SiteConfig, ViewController};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod actions;
mod camera;
mod catalog_page;
mod constants;
mod dom;
mod events;
mod fetch;
mod forum_page;
mod frame;
mod input;
mod keys;
mod overlay;
mod render;

use constants::{CATALOG_ROOT_ID, FORUM_ROOT_ID, MUSEUM_CANVAS_ID};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("exhibit-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn page_config(root: &web::Element) -> SiteConfig {
    SiteConfig::with_overrides(root.get_attribute("data-config").as_deref())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    if let Some(canvas_el) = document.get_element_by_id(MUSEUM_CANVAS_ID) {
        let config = page_config(&canvas_el);
        let canvas: web::HtmlCanvasElement = canvas_el
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        return init_museum(&document, canvas, &config).await;
    }
    if let Some(root) = document.get_element_by_id(CATALOG_ROOT_ID) {
        let config = page_config(&root);
        return catalog_page::init(root, &config).await;
    }
    if let Some(root) = document.get_element_by_id(FORUM_ROOT_ID) {
        let config = page_config(&root);
        return forum_page::init(root, &config).await;
    }
    log::warn!("no exhibit root element on this page");
    Ok(())
}

async fn init_museum(
    document: &web::Document,
    canvas: web::HtmlCanvasElement,
    config: &SiteConfig,
) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    dom::sync_canvas_backing_size(&canvas);
    {
        let canvas_resize = canvas.clone();
        let resize_closure = Closure::wrap(Box::new(move || {
            dom::sync_canvas_backing_size(&canvas_resize);
        }) as Box<dyn FnMut()>);
        window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())
            .ok();
        resize_closure.forget();
    }

    let controller = {
        let mut c = ViewController::museum();
        c.set_transition_factor(config.transition_factor);
        Rc::new(RefCell::new(c))
    };
    let camera = {
        let (position, orientation) = controller.borrow().camera_pose();
        Rc::new(RefCell::new(Camera::new(
            position,
            orientation,
            camera::canvas_aspect(&canvas),
        )))
    };
    {
        let c = controller.borrow();
        overlay::sync_all(document, c.visible_overlays());
        overlay::set_view_title(document, c.registry().get(c.active()).title);
    }
    let _ = canvas.set_attribute("data-arrived", controller.borrow().active().as_str());

    let hover = Rc::new(RefCell::new(None));
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        controller: controller.clone(),
        camera: camera.clone(),
        mouse_state: Rc::new(RefCell::new(input::MouseState::default())),
        hover: hover.clone(),
    });
    events::wire_view_buttons(document, &controller);
    events::wire_view_keys(controller.clone());

    let gpu = frame::init_gpu(&canvas).await;
    if gpu.is_none() {
        log::warn!("[gpu] continuing without markers");
    }
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        controller,
        camera,
        hover,
        canvas,
        gpu,
        last_instant: Instant::now(),
        time_accum: 0.0,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
