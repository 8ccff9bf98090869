//! Scene to DOM.
//!
//! Every render discards the surface's children and rebuilds one
//! `.pb-item` per scene node. User text only ever goes through
//! `textContent` or attribute values, never markup.

use pagecraft_render::{BlockNode, Preview, Scene};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

pub const ITEM_CLASS: &str = "pb-item";
pub const HANDLE_CLASS: &str = "pb-handle";

/// Give the surface at least `min_height` pixels before it is measured.
pub fn reserve_height(surface: &HtmlElement, min_height: f64) -> Result<(), JsValue> {
    surface
        .style()
        .set_property("min-height", &format!("{}px", min_height))
}

/// Rebuild the surface from `scene`.
pub fn render_scene(document: &Document, surface: &HtmlElement, scene: &Scene) -> Result<(), JsValue> {
    surface.set_text_content(None);
    surface
        .style()
        .set_property("min-height", &format!("{}px", scene.height))?;
    for node in &scene.nodes {
        let item = build_item(document, node)?;
        surface.append_child(&item)?;
    }
    Ok(())
}

fn build_item(document: &Document, node: &BlockNode) -> Result<HtmlElement, JsValue> {
    let item = create(document, "div", ITEM_CLASS)?;
    if node.selected {
        item.class_list().add_1("selected")?;
    }
    item.set_attribute("data-id", node.id.as_str())?;
    item.set_attribute("data-kind", node.kind.as_str())?;
    item.set_tab_index(node.tab_index as i32);

    let style = item.style();
    let b = node.bounds;
    style.set_property("left", &format!("{}px", b.x))?;
    style.set_property("top", &format!("{}px", b.y))?;
    style.set_property("width", &format!("{}px", b.width))?;
    style.set_property("height", &format!("{}px", b.height))?;

    match &node.preview {
        Preview::Card { title, body, chips } => {
            append_text(document, &item, "div", "pb-item__title", title)?;
            append_text(document, &item, "div", "pb-item__body", body)?;
            if !chips.is_empty() {
                let row = create(document, "div", "pb-item__chips")?;
                for chip in chips {
                    append_text(document, &row, "span", "pb-chip", chip)?;
                }
                item.append_child(&row)?;
            }
        }
        Preview::Text { title, body } => {
            append_text(document, &item, "div", "pb-item__title", title)?;
            append_text(document, &item, "div", "pb-item__body", body)?;
        }
        Preview::Button { label } => {
            append_text(document, &item, "span", "pb-chip pb-chip--center", label)?;
        }
        Preview::Image { url: Some(url), caption } => {
            let img = document.create_element("img")?;
            img.set_class_name("pb-item__image");
            img.set_attribute("src", url)?;
            img.set_attribute("alt", caption)?;
            img.set_attribute("draggable", "false")?;
            item.append_child(&img)?;
        }
        Preview::Image { url: None, caption } => {
            append_text(document, &item, "div", "pb-item__placeholder", caption)?;
        }
        Preview::Spacer => {}
    }

    let handle = create(document, "div", &format!("{} br", HANDLE_CLASS))?;
    handle.set_title("Resize");
    item.append_child(&handle)?;
    Ok(item)
}

fn create(document: &Document, tag: &str, class: &str) -> Result<HtmlElement, JsValue> {
    let el = document.create_element(tag)?.dyn_into::<HtmlElement>()?;
    el.set_class_name(class);
    Ok(el)
}

fn append_text(
    document: &Document,
    parent: &Element,
    tag: &str,
    class: &str,
    text: &str,
) -> Result<(), JsValue> {
    let el = create(document, tag, class)?;
    el.set_text_content(Some(text));
    parent.append_child(&el)?;
    Ok(())
}

/// The `.pb-item` an event target sits in, and whether it hit the handle.
pub fn locate_item(target: &Element) -> Option<(String, bool)> {
    let item = target.closest(&format!(".{}", ITEM_CLASS)).ok()??;
    let id = item.get_attribute("data-id")?;
    let on_handle = target.class_list().contains(HANDLE_CLASS);
    Some((id, on_handle))
}
