//! Content browser: letter bar, paged list and a detail panel for one of the
//! species, books or articles tables.

use crate::actions::{letter_for_button, LETTER_ATTR, SLUG_ATTR};
use crate::constants::NOT_FOUND_TEXT;
use crate::dom;
use crate::events;
use crate::fetch;
use exhibit_core::{
    available_letters, filter_by_letter, search, Article, Book, Catalog, CatalogEntry,
    LetterSelector, Pager, SiteConfig, Species,
};
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Extra fields shown in the detail panel below the title.
pub trait DetailFields: CatalogEntry {
    fn fields(&self) -> Vec<(&'static str, String)>;
    fn body(&self) -> &str;
}

impl DetailFields for Species {
    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut f = vec![
            ("Scientific name", self.scientific_name.clone()),
            ("Habitat", self.habitat.clone()),
        ];
        if let Some(diet) = &self.diet {
            f.push(("Diet", diet.clone()));
        }
        f
    }
    fn body(&self) -> &str {
        &self.description
    }
}

impl DetailFields for Book {
    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut f = vec![("Author", self.author.clone())];
        if let Some(year) = self.year {
            f.push(("Year", year.to_string()));
        }
        if let Some(genre) = &self.genre {
            f.push(("Genre", genre.clone()));
        }
        f
    }
    fn body(&self) -> &str {
        &self.summary
    }
}

impl DetailFields for Article {
    fn fields(&self) -> Vec<(&'static str, String)> {
        self.category
            .iter()
            .map(|c| ("Category", c.clone()))
            .collect()
    }
    fn body(&self) -> &str {
        if self.body.is_empty() {
            &self.summary
        } else {
            &self.body
        }
    }
}

struct CatalogView<T> {
    catalog: Catalog<T>,
    selector: LetterSelector,
    query: String,
    pager: Pager,
}

impl<T: CatalogEntry> CatalogView<T> {
    fn visible(&self) -> Vec<&T> {
        let by_letter = filter_by_letter(self.catalog.entries(), self.selector);
        search(&by_letter, &self.query)
    }

    fn refilter(&mut self) {
        let total = self.visible().len();
        self.pager.reset(total);
    }
}

#[derive(Clone)]
struct CatalogDom {
    letters: web::Element,
    list: web::Element,
    status: web::Element,
    detail: web::Element,
}

type Shared<T> = Rc<RefCell<CatalogView<T>>>;

pub async fn init(root: web::Element, config: &SiteConfig) -> anyhow::Result<()> {
    let kind = root.get_attribute("data-kind").unwrap_or_default();
    match kind.as_str() {
        "species" => mount::<Species>(root, &config.species_url, config.page_size).await,
        "books" => mount::<Book>(root, &config.books_url, config.page_size).await,
        "articles" => mount::<Article>(root, &config.articles_url, config.page_size).await,
        other => anyhow::bail!("unknown catalog kind {:?}", other),
    }
}

async fn mount<T>(root: web::Element, url: &str, page_size: usize) -> anyhow::Result<()>
where
    T: DetailFields + DeserializeOwned + 'static,
{
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let text = fetch::fetch_text(url).await?;
    let catalog = Catalog::<T>::from_json_str(&text)?;
    log::info!("[catalog] loaded {} entries from {}", catalog.len(), url);

    let ui = CatalogDom {
        letters: dom::create_el(&document, "nav", "letter-bar", None)?,
        list: dom::create_el(&document, "ul", "catalog-list", None)?,
        status: dom::create_el(&document, "div", "pager-status", None)?,
        detail: dom::create_el(&document, "section", "catalog-detail", None)?,
    };
    dom::clear_children(&root);
    let search_box = dom::create_el(&document, "input", "catalog-search", None)?;
    let _ = search_box.set_attribute("type", "search");
    let _ = search_box.set_attribute("placeholder", "Search");
    dom::append(&root, &ui.letters);
    dom::append(&root, &search_box);
    dom::append(&root, &ui.list);
    dom::append(&root, &ui.status);
    dom::append(&root, &ui.detail);

    let total = catalog.len();
    let state: Shared<T> = Rc::new(RefCell::new(CatalogView {
        catalog,
        selector: LetterSelector::All,
        query: String::new(),
        pager: Pager::new(page_size, total),
    }));

    render_letters(&state, &ui)?;
    render_list(&state, &ui)?;

    // Deep link: #slug opens that entry
    let hash = web::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default();
    let slug = hash.trim_start_matches('#');
    if !slug.is_empty() {
        render_detail(&state, &ui, slug)?;
    }

    wire_clicks(&state, &ui);
    wire_search(&search_box, &state, &ui);
    wire_wheel(&root, &state, &ui);
    {
        let state_k = state.clone();
        let ui_k = ui.clone();
        events::wire_pager_keys(move |cmd| {
            let changed = state_k.borrow_mut().pager.apply(cmd);
            if changed {
                if let Err(e) = render_list(&state_k, &ui_k) {
                    log::error!("[catalog] render error: {:?}", e);
                }
            }
        });
    }
    Ok(())
}

fn render_letters<T: CatalogEntry>(state: &Shared<T>, ui: &CatalogDom) -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let (available, current) = {
        let s = state.borrow();
        (available_letters(s.catalog.entries()), s.selector)
    };
    dom::clear_children(&ui.letters);

    let mut choices = vec![(LetterSelector::All, "All".to_string())];
    choices.extend(('A'..='Z').map(|c| (LetterSelector::Letter(c), c.to_string())));
    for (selector, label) in choices {
        let class = if selector == current {
            "letter active"
        } else {
            "letter"
        };
        let button = dom::create_el(&document, "button", class, Some(&label))?;
        let (key, enabled) = match selector {
            LetterSelector::All => ("all".to_string(), true),
            LetterSelector::Letter(c) => (c.to_string(), available.contains(&c)),
        };
        let _ = button.set_attribute(LETTER_ATTR, &key);
        if !enabled {
            let _ = button.set_attribute("disabled", "");
        }
        dom::append(&ui.letters, &button);
    }
    Ok(())
}

fn render_list<T: CatalogEntry>(state: &Shared<T>, ui: &CatalogDom) -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    dom::clear_children(&ui.list);

    let s = state.borrow();
    let visible = s.visible();
    let range = s.pager.page_range();
    if visible.is_empty() {
        let empty = dom::create_el(&document, "li", "catalog-empty", Some("No entries"))?;
        dom::append(&ui.list, &empty);
    }
    for entry in visible.get(range).unwrap_or_default() {
        let item = dom::create_el(&document, "li", "catalog-item", Some(entry.title()))?;
        let _ = item.set_attribute(SLUG_ATTR, entry.slug());
        dom::append(&ui.list, &item);
    }
    ui.status.set_text_content(Some(&format!(
        "Page {} of {}",
        s.pager.page() + 1,
        s.pager.page_count()
    )));
    Ok(())
}

/// Letter and list clicks are delegated from their containers, so
/// re-rendering never adds listeners.
fn wire_clicks<T>(state: &Shared<T>, ui: &CatalogDom)
where
    T: DetailFields + 'static,
{
    {
        let state_l = state.clone();
        let ui_l = ui.clone();
        let buttons = format!("[{LETTER_ATTR}]");
        dom::on_delegated(&ui.letters, "click", &buttons, move |button, _| {
            if button.has_attribute("disabled") {
                return;
            }
            let raw = button.get_attribute(LETTER_ATTR);
            let Some(selector) = letter_for_button(raw.as_deref()) else {
                log::warn!("[catalog] bad letter button {:?}", raw);
                return;
            };
            {
                let mut s = state_l.borrow_mut();
                s.selector = selector;
                s.refilter();
            }
            let rendered =
                render_letters(&state_l, &ui_l).and_then(|_| render_list(&state_l, &ui_l));
            if let Err(e) = rendered {
                log::error!("[catalog] render error: {:?}", e);
            }
        });
    }
    {
        let state_c = state.clone();
        let ui_c = ui.clone();
        let items = format!("[{SLUG_ATTR}]");
        dom::on_delegated(&ui.list, "click", &items, move |item, _| {
            let Some(slug) = item.get_attribute(SLUG_ATTR) else {
                return;
            };
            if let Some(w) = web::window() {
                let _ = w.location().set_hash(&slug);
            }
            if let Err(e) = render_detail(&state_c, &ui_c, &slug) {
                log::error!("[catalog] detail error: {:?}", e);
            }
        });
    }
}

fn render_detail<T: DetailFields>(
    state: &Shared<T>,
    ui: &CatalogDom,
    slug: &str,
) -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    dom::clear_children(&ui.detail);
    let s = state.borrow();
    let Some(entry) = s.catalog.find(slug) else {
        log::warn!("[catalog] no entry {:?}", slug);
        let missing = dom::create_el(&document, "p", "not-found", Some(NOT_FOUND_TEXT))?;
        dom::append(&ui.detail, &missing);
        return Ok(());
    };
    let title = dom::create_el(&document, "h2", "", Some(entry.title()))?;
    dom::append(&ui.detail, &title);
    let fields = dom::create_el(&document, "dl", "detail-fields", None)?;
    for (label, value) in entry.fields() {
        if value.is_empty() {
            continue;
        }
        dom::append(&fields, &dom::create_el(&document, "dt", "", Some(label))?);
        dom::append(&fields, &dom::create_el(&document, "dd", "", Some(&value))?);
    }
    dom::append(&ui.detail, &fields);
    for para in entry.body().split("\n\n").filter(|p| !p.trim().is_empty()) {
        dom::append(&ui.detail, &dom::create_el(&document, "p", "", Some(para.trim()))?);
    }
    Ok(())
}

fn wire_search<T>(input: &web::Element, state: &Shared<T>, ui: &CatalogDom)
where
    T: DetailFields + 'static,
{
    let state_s = state.clone();
    let ui_s = ui.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::Event| {
        let Some(field) = ev
            .target()
            .and_then(|t| t.dyn_into::<web::HtmlInputElement>().ok())
        else {
            return;
        };
        {
            let mut s = state_s.borrow_mut();
            s.query = field.value();
            s.refilter();
        }
        if let Err(e) = render_list(&state_s, &ui_s) {
            log::error!("[catalog] render error: {:?}", e);
        }
    }) as Box<dyn FnMut(_)>);
    let _ = input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_wheel<T>(root: &web::Element, state: &Shared<T>, ui: &CatalogDom)
where
    T: DetailFields + 'static,
{
    let state_w = state.clone();
    let ui_w = ui.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let changed = state_w.borrow_mut().pager.on_scroll(ev.delta_y());
        if changed {
            if let Err(e) = render_list(&state_w, &ui_w) {
                log::error!("[catalog] render error: {:?}", e);
            }
        }
    }) as Box<dyn FnMut(_)>);
    let _ = root.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}
