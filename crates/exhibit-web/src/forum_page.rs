//! Forum UI over a [`ForumStore`]: post list with comments, a post form, and
//! localStorage persistence of local edits.

use crate::actions::{
    forum_action, parse_id, ForumAction, COMMENT_FORM_ATTR, DELETE_COMMENT_ATTR, DELETE_POST_ATTR,
};
use crate::dom;
use crate::fetch;
use exhibit_core::{Comment, ForumSnapshot, ForumStore, NewComment, NewPost, Post, SiteConfig, User};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

struct ForumPage {
    store: ForumStore,
    current_user: u32,
    storage_key: String,
    rendered_revision: Option<u64>,
}

#[derive(Clone)]
struct ForumDom {
    posts: web::Element,
    error: web::Element,
}

type Shared = Rc<RefCell<ForumPage>>;

async fn fetch_snapshot(config: &SiteConfig) -> anyhow::Result<ForumSnapshot> {
    let users: Vec<User> = fetch::fetch_json(&config.forum_users_url).await?;
    let posts: Vec<Post> = fetch::fetch_json(&config.forum_posts_url).await?;
    let comments: Vec<Comment> = fetch::fetch_json(&config.forum_comments_url).await?;
    Ok(ForumSnapshot {
        users,
        posts,
        comments,
    })
}

fn restore(key: &str) -> Option<ForumStore> {
    let json = dom::local_storage()?.get_item(key).ok().flatten()?;
    match ForumStore::from_json(&json) {
        Ok(store) => Some(store),
        Err(e) => {
            log::warn!("[forum] discarding stored copy: {}", e);
            None
        }
    }
}

fn persist(page: &ForumPage) {
    let Some(storage) = dom::local_storage() else {
        return;
    };
    match page.store.to_json() {
        Ok(json) => {
            if storage.set_item(&page.storage_key, &json).is_err() {
                log::warn!("[forum] localStorage write failed");
            }
        }
        Err(e) => log::error!("[forum] serialize error: {}", e),
    }
}

fn now_secs() -> i64 {
    (js_sys::Date::now() / 1000.0) as i64
}

pub async fn init(root: web::Element, config: &SiteConfig) -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let store = match restore(&config.forum_storage_key) {
        Some(store) => {
            log::info!("[forum] restored {} posts from localStorage", store.post_count());
            store
        }
        None => ForumStore::from_snapshot(fetch_snapshot(config).await?),
    };
    let current_user = root
        .get_attribute("data-user")
        .and_then(|s| s.parse::<u32>().ok())
        .or_else(|| store.snapshot().users.first().map(|u| u.id))
        .unwrap_or(0);

    dom::clear_children(&root);
    let ui = ForumDom {
        posts: dom::create_el(&document, "div", "forum-posts", None)?,
        error: dom::create_el(&document, "p", "forum-error hidden", None)?,
    };
    let form = build_post_form(&document)?;
    let reload = dom::create_el(&document, "button", "forum-reload", Some("Reload"))?;
    dom::append(&root, &reload);
    dom::append(&root, &form);
    dom::append(&root, &ui.error);
    dom::append(&root, &ui.posts);

    let page: Shared = Rc::new(RefCell::new(ForumPage {
        store,
        current_user,
        storage_key: config.forum_storage_key.clone(),
        rendered_revision: None,
    }));
    render_posts(&page, &ui)?;
    wire_post_form(&form, &page, &ui);
    wire_post_actions(&page, &ui);

    // Reload drops local edits and re-reads the JSON files.
    {
        let page_r = page.clone();
        let ui_r = ui.clone();
        let config_r = config.clone();
        dom::on_click(&reload, move |_| {
            let page_r = page_r.clone();
            let ui_r = ui_r.clone();
            let config_r = config_r.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match fetch_snapshot(&config_r).await {
                    Ok(snapshot) => {
                        {
                            let mut p = page_r.borrow_mut();
                            p.store.replace(snapshot);
                            if let Some(storage) = dom::local_storage() {
                                let _ = storage.remove_item(&p.storage_key);
                            }
                        }
                        refresh(&page_r, &ui_r);
                    }
                    Err(e) => show_error(&ui_r, &format!("Reload failed: {e}")),
                }
            });
        });
    }
    Ok(())
}

fn build_post_form(document: &web::Document) -> anyhow::Result<web::Element> {
    let form = dom::create_el(document, "form", "post-form", None)?;
    let title = dom::create_el(document, "input", "", None)?;
    let _ = title.set_attribute("name", "title");
    let _ = title.set_attribute("placeholder", "Title");
    let body = dom::create_el(document, "textarea", "", None)?;
    let _ = body.set_attribute("name", "body");
    let _ = body.set_attribute("placeholder", "Write something");
    let tags = dom::create_el(document, "input", "", None)?;
    let _ = tags.set_attribute("name", "tags");
    let _ = tags.set_attribute("placeholder", "tags, comma separated");
    let submit = dom::create_el(document, "button", "", Some("Post"))?;
    let _ = submit.set_attribute("type", "submit");
    for el in [&title, &body, &tags, &submit] {
        dom::append(&form, el);
    }
    Ok(form)
}

fn field_value(form: &web::Element, name: &str) -> String {
    let Ok(Some(el)) = form.query_selector(&format!("[name={name}]")) else {
        return String::new();
    };
    if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
        input.value()
    } else if let Some(area) = el.dyn_ref::<web::HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

fn reset_form(form: &web::Element) {
    if let Some(f) = form.dyn_ref::<web::HtmlFormElement>() {
        f.reset();
    }
}

fn on_submit(form: &web::Element, mut handler: impl FnMut(&web::Element) + 'static) {
    let form_s = form.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::Event| {
        ev.prevent_default();
        handler(&form_s);
    }) as Box<dyn FnMut(_)>);
    let _ = form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_post_form(form: &web::Element, page: &Shared, ui: &ForumDom) {
    let page_f = page.clone();
    let ui_f = ui.clone();
    on_submit(form, move |form| {
        let result = {
            let mut p = page_f.borrow_mut();
            let new = NewPost {
                author_id: p.current_user,
                title: field_value(form, "title"),
                body: field_value(form, "body"),
                tags: field_value(form, "tags")
                    .split(',')
                    .map(str::to_string)
                    .collect(),
            };
            p.store.add_post(new, now_secs())
        };
        match result {
            Ok(_) => {
                reset_form(form);
                persist(&page_f.borrow());
                refresh(&page_f, &ui_f);
            }
            Err(e) => show_error(&ui_f, &e.to_string()),
        }
    });
}

/// Delete buttons and comment forms are rebuilt on every render, so their
/// events are delegated from the post container.
fn wire_post_actions(page: &Shared, ui: &ForumDom) {
    {
        let page_d = page.clone();
        let ui_d = ui.clone();
        let selector = format!("[{DELETE_POST_ATTR}], [{DELETE_COMMENT_ATTR}]");
        dom::on_delegated(&ui.posts, "click", &selector, move |button, _| {
            let action = forum_action(
                button.get_attribute(DELETE_POST_ATTR).as_deref(),
                button.get_attribute(DELETE_COMMENT_ATTR).as_deref(),
            );
            let result = match action {
                Some(ForumAction::DeletePost(id)) => {
                    page_d.borrow_mut().store.delete_post(id).map(|_| ())
                }
                Some(ForumAction::DeleteComment(id)) => {
                    page_d.borrow_mut().store.delete_comment(id).map(|_| ())
                }
                None => return,
            };
            after_mutation(&page_d, &ui_d, result);
        });
    }
    {
        let page_c = page.clone();
        let ui_c = ui.clone();
        let selector = format!("form[{COMMENT_FORM_ATTR}]");
        dom::on_delegated(&ui.posts, "submit", &selector, move |form, ev| {
            ev.prevent_default();
            let Some(post_id) = parse_id(form.get_attribute(COMMENT_FORM_ATTR).as_deref()) else {
                return;
            };
            let result = {
                let mut p = page_c.borrow_mut();
                let new = NewComment {
                    post_id,
                    author_id: p.current_user,
                    body: field_value(&form, "body"),
                };
                p.store.add_comment(new, now_secs())
            };
            after_mutation(&page_c, &ui_c, result.map(|_| ()));
        });
    }
}

fn show_error(ui: &ForumDom, message: &str) {
    log::warn!("[forum] {}", message);
    ui.error.set_text_content(Some(message));
    dom::set_visible(&ui.error, true);
}

fn refresh(page: &Shared, ui: &ForumDom) {
    dom::set_visible(&ui.error, false);
    if let Err(e) = render_posts(page, ui) {
        log::error!("[forum] render error: {:?}", e);
    }
}

/// Rebuilds the post list unless it already reflects the store's revision.
fn render_posts(page: &Shared, ui: &ForumDom) -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let revision = page.borrow().store.revision();
    if page.borrow().rendered_revision == Some(revision) {
        return Ok(());
    }
    dom::clear_children(&ui.posts);

    let p = page.borrow();
    let posts = p.store.posts_newest_first();
    if posts.is_empty() {
        dom::append(
            &ui.posts,
            &dom::create_el(&document, "p", "forum-empty", Some("No posts yet"))?,
        );
    }
    for post in posts {
        let article = dom::create_el(&document, "article", "post", None)?;
        let _ = article.set_attribute("data-post", &post.id.to_string());
        dom::append(&article, &dom::create_el(&document, "h3", "", Some(&post.title))?);
        let author = p.store.user(post.author_id).map(User::label).unwrap_or("unknown");
        dom::append(
            &article,
            &dom::create_el(&document, "p", "post-meta", Some(&format!("by {author}")))?,
        );
        dom::append(&article, &dom::create_el(&document, "p", "post-body", Some(&post.body))?);
        if !post.tags.is_empty() {
            let tags = dom::create_el(&document, "ul", "post-tags", None)?;
            for tag in &post.tags {
                dom::append(&tags, &dom::create_el(&document, "li", "tag", Some(tag))?);
            }
            dom::append(&article, &tags);
        }

        let comments = dom::create_el(&document, "ul", "comments", None)?;
        for c in p.store.comments_for(post.id) {
            let who = p.store.user(c.author_id).map(User::label).unwrap_or("unknown");
            let line = format!("{who}: {}", c.body);
            let item = dom::create_el(&document, "li", "comment", Some(&line))?;
            if c.author_id == p.current_user {
                let del = dom::create_el(&document, "button", "delete", Some("Delete"))?;
                let _ = del.set_attribute(DELETE_COMMENT_ATTR, &c.id.to_string());
                dom::append(&item, &del);
            }
            dom::append(&comments, &item);
        }
        dom::append(&article, &comments);

        let comment_form = dom::create_el(&document, "form", "comment-form", None)?;
        let body = dom::create_el(&document, "textarea", "", None)?;
        let _ = body.set_attribute("name", "body");
        let _ = body.set_attribute("placeholder", "Reply");
        let submit = dom::create_el(&document, "button", "", Some("Comment"))?;
        let _ = submit.set_attribute("type", "submit");
        dom::append(&comment_form, &body);
        dom::append(&comment_form, &submit);
        let _ = comment_form.set_attribute(COMMENT_FORM_ATTR, &post.id.to_string());
        dom::append(&article, &comment_form);

        if post.author_id == p.current_user {
            let del = dom::create_el(&document, "button", "delete", Some("Delete post"))?;
            let _ = del.set_attribute(DELETE_POST_ATTR, &post.id.to_string());
            dom::append(&article, &del);
        }
        dom::append(&ui.posts, &article);
    }
    drop(p);
    page.borrow_mut().rendered_revision = Some(revision);
    Ok(())
}

fn after_mutation(page: &Shared, ui: &ForumDom, result: Result<(), exhibit_core::ForumError>) {
    match result {
        Ok(()) => {
            persist(&page.borrow());
            refresh(page, ui);
        }
        Err(e) => show_error(ui, &e.to_string()),
    }
}
