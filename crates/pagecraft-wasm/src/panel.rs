//! Inspector panel DOM.
//!
//! The form is built once on mount; renders only refresh values,
//! visibility and the disabled state.

use std::cell::RefCell;
use std::collections::HashMap;

use pagecraft_core::{BlockId, BlockKind};
use pagecraft_editor::{Field, InspectorState};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
};

/// Attribute naming the field an input edits.
pub const FIELD_ATTR: &str = "data-field";
/// Attribute naming the kind an add button creates.
pub const ADD_ATTR: &str = "data-add";
pub const DELETE_ID: &str = "pbDelete";

enum Control {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
    Select(HtmlSelectElement),
}

impl Control {
    fn element(&self) -> &HtmlElement {
        match self {
            Control::Input(el) => &**el,
            Control::TextArea(el) => &**el,
            Control::Select(el) => &**el,
        }
    }

    fn set_value(&self, value: &str) {
        match self {
            Control::Input(el) => el.set_value(value),
            Control::TextArea(el) => el.set_value(value),
            Control::Select(el) => el.set_value(value),
        }
    }

    fn set_disabled(&self, disabled: bool) {
        match self {
            Control::Input(el) => el.set_disabled(disabled),
            Control::TextArea(el) => el.set_disabled(disabled),
            Control::Select(el) => el.set_disabled(disabled),
        }
    }
}

struct Row {
    wrapper: HtmlElement,
    control: Control,
}

/// The mounted inspector form.
pub struct Panel {
    rows: HashMap<Field, Row>,
    empty_note: HtmlElement,
    delete: HtmlElement,
    /// Block the form showed on the previous update.
    bound: RefCell<Option<BlockId>>,
}

impl Panel {
    /// Build the form inside `root`, replacing whatever it held.
    pub fn build(document: &Document, root: &Element, slots: usize) -> Result<Self, JsValue> {
        root.set_text_content(None);

        let empty_note = create(document, "p", "muted")?;
        empty_note.set_text_content(Some("No blocks yet."));
        root.append_child(&empty_note)?;

        let mut rows = HashMap::new();
        for field in Field::all(slots) {
            let wrapper = create(document, "div", "pb-field")?;
            let label = create(document, "label", "")?;
            label.set_text_content(Some(&label_for(field)));
            wrapper.append_child(&label)?;

            let control = build_control(document, field)?;
            let el = control.element();
            el.set_id(&format!("pb-{}", field.key()));
            el.set_attribute(FIELD_ATTR, &field.key())?;
            label.set_attribute("for", &el.id())?;
            wrapper.append_child(el)?;

            root.append_child(&wrapper)?;
            rows.insert(field, Row { wrapper, control });
        }

        let toolbar = create(document, "div", "pb-btnrow")?;
        for kind in BlockKind::ALL {
            let button = create(document, "button", "btn")?;
            button.set_attribute("type", "button")?;
            button.set_attribute(ADD_ATTR, kind.as_str())?;
            button.set_text_content(Some(&format!("Add {}", kind.as_str())));
            toolbar.append_child(&button)?;
        }
        let delete = create(document, "button", "btn danger")?;
        delete.set_attribute("type", "button")?;
        delete.set_id(DELETE_ID);
        delete.set_text_content(Some("Delete"));
        toolbar.append_child(&delete)?;
        root.append_child(&toolbar)?;

        Ok(Self {
            rows,
            empty_note,
            delete,
            bound: RefCell::new(None),
        })
    }

    /// Refresh the form from `state`.
    ///
    /// The focused control keeps its text while the same block stays
    /// bound; a different block overwrites it too.
    pub fn update(&self, state: &InspectorState, document: &Document) {
        let current = state.block_id().cloned();
        let rebound = self.bound.replace(current.clone()) != current;
        let focused = document.active_element();
        let is_focused = |el: &HtmlElement| focused.as_ref().map_or(false, |f| f == &**el);

        match state {
            InspectorState::Empty => {
                self.empty_note.set_hidden(false);
                self.delete.set_hidden(true);
                for row in self.rows.values() {
                    row.wrapper.set_hidden(false);
                    row.control.set_value("");
                    row.control.set_disabled(true);
                }
            }
            InspectorState::Bound { values, .. } => {
                self.empty_note.set_hidden(true);
                self.delete.set_hidden(false);
                for value in values {
                    let Some(row) = self.rows.get(&value.field) else {
                        continue;
                    };
                    row.wrapper.set_hidden(!value.visible);
                    row.control.set_disabled(!value.visible);
                    if rebound || !is_focused(row.control.element()) {
                        row.control.set_value(&value.value);
                    }
                }
            }
        }
    }
}

fn build_control(document: &Document, field: Field) -> Result<Control, JsValue> {
    let control = match field {
        Field::Kind => {
            let select = document.create_element("select")?.dyn_into::<HtmlSelectElement>()?;
            for kind in BlockKind::ALL {
                let option = document.create_element("option")?;
                option.set_attribute("value", kind.as_str())?;
                option.set_text_content(Some(kind.label()));
                select.append_child(&option)?;
            }
            Control::Select(select)
        }
        Field::Body => {
            Control::TextArea(document.create_element("textarea")?.dyn_into::<HtmlTextAreaElement>()?)
        }
        _ => {
            let input = document.create_element("input")?.dyn_into::<HtmlInputElement>()?;
            if field.is_geometry() {
                input.set_type("number");
                input.set_attribute("step", "1")?;
            }
            Control::Input(input)
        }
    };
    Ok(control)
}

fn label_for(field: Field) -> String {
    match field {
        Field::Kind => "Type".into(),
        Field::Title => "Title".into(),
        Field::Body => "Body".into(),
        Field::Note => "Note (optional)".into(),
        Field::ButtonLabel(slot) => format!("Button {} label", slot + 1),
        Field::ButtonUrl(slot) => format!("Button {} URL", slot + 1),
        Field::ImageUrl => "Image URL".into(),
        Field::X => "X (%)".into(),
        Field::Y => "Y (%)".into(),
        Field::W => "Width (%)".into(),
        Field::H => "Height (%)".into(),
    }
}

fn create(document: &Document, tag: &str, class: &str) -> Result<HtmlElement, JsValue> {
    let el = document.create_element(tag)?.dyn_into::<HtmlElement>()?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}

/// Value of the control that fired an input event, with the field it edits.
pub fn read_control(target: &Element) -> Option<(Field, String)> {
    let field = target.get_attribute(FIELD_ATTR)?.parse::<Field>().ok()?;
    let value = if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = target.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else if let Some(select) = target.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else {
        return None;
    };
    Some((field, value))
}
