//! WebAssembly browser host for the pagecraft editor.
//!
//! Mounts an [`EditorSession`] onto an existing page: a positioned
//! surface element, an inspector panel, a hidden form field that receives
//! the serialized layout, and an element carrying the initial payload.
//!
//! ## Example
//!
//! ```js
//! import init, { PageBuilder } from 'pagecraft-wasm';
//!
//! await init();
//! const builder = PageBuilder.mount({ surfaceId: 'pbSurface' });
//! builder.addBlock('image');
//! console.log(builder.serialize());
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec2;
use pagecraft_core::{BlockId, BlockKind, LayoutDocument};
use pagecraft_editor::{Action, EditorSession, PointerEvent};
use pagecraft_layout::Surface;
use pagecraft_render::HitPart;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement};

mod dom;
mod panel;
mod types;

pub use types::*;

use panel::Panel;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();
}

/// Asks the user a yes/no question.
type Confirm = Box<dyn Fn(&str) -> bool>;

struct Host {
    document: Document,
    session: RefCell<EditorSession>,
    surface: HtmlElement,
    panel: Option<Panel>,
    field: Option<HtmlInputElement>,
    confirm: Confirm,
}

impl Host {
    /// Current surface size, read from layout on every call.
    fn surface_size(&self) -> Surface {
        let rect = self.surface.get_bounding_client_rect();
        Surface::new(rect.width(), rect.height())
    }

    /// Pointer position relative to the surface's top-left corner.
    fn local_position(&self, event: &web_sys::MouseEvent) -> DVec2 {
        let rect = self.surface.get_bounding_client_rect();
        DVec2::new(
            f64::from(event.client_x()) - rect.left(),
            f64::from(event.client_y()) - rect.top(),
        )
    }

    fn render(&self) -> Result<(), JsValue> {
        // The measured height must already include canvas.minHeight.
        let min_height = self.session.borrow().document().canvas.min_height;
        dom::reserve_height(&self.surface, min_height)?;
        let frame = self
            .session
            .borrow()
            .render(self.surface_size())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        dom::render_scene(&self.document, &self.surface, &frame.scene)?;
        if let Some(panel) = &self.panel {
            panel.update(&frame.inspector, &self.document);
        }
        if let Some(field) = &self.field {
            field.set_value(&frame.serialized);
        }
        Ok(())
    }

    /// Render from inside an event handler, where errors can only be logged.
    fn rerender(&self) {
        if let Err(err) = self.render() {
            web_sys::console::error_2(&"pagecraft: render failed".into(), &err);
        }
    }

    fn write_field(&self) {
        let Some(field) = &self.field else {
            return;
        };
        match self.session.borrow().serialize() {
            Ok(json) => field.set_value(&json),
            Err(err) => web_sys::console::error_1(&format!("pagecraft: {}", err).into()),
        }
    }

    /// No session borrow is held while the modal confirm dialog is open.
    fn delete_selected(&self) -> bool {
        if self.session.borrow().selected_block().is_none() {
            return false;
        }
        if !(self.confirm)("Delete this block?") {
            return false;
        }
        let deleted = self
            .session
            .borrow_mut()
            .delete_selected(|_| true)
            .is_some();
        if deleted {
            self.rerender();
        }
        deleted
    }

    fn apply_actions(&self, actions: &[Action], pointer_id: i32) {
        for action in actions {
            match action {
                Action::Render => self.rerender(),
                // The surface outlives the item nodes a render replaces, so it holds the capture.
                Action::CapturePointer => {
                    let _ = self.surface.set_pointer_capture(pointer_id);
                }
                Action::ReleasePointer => {
                    if self.surface.has_pointer_capture(pointer_id) {
                        let _ = self.surface.release_pointer_capture(pointer_id);
                    }
                }
            }
        }
    }

    fn on_pointer_down(&self, event: &web_sys::PointerEvent) {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let Some((id, on_handle)) = dom::locate_item(&target) else {
            return;
        };
        event.prevent_default();
        let part = if on_handle {
            HitPart::Handle
        } else {
            HitPart::Body
        };
        let down = PointerEvent::Down {
            block: BlockId::from(id),
            part,
            position: self.local_position(event),
        };
        let actions = self.session.borrow_mut().dispatch(down, self.surface_size());
        self.apply_actions(&actions, event.pointer_id());
    }

    fn on_pointer_move(&self, event: &web_sys::PointerEvent) {
        let moved = PointerEvent::Move {
            position: self.local_position(event),
        };
        let actions = self.session.borrow_mut().dispatch(moved, self.surface_size());
        self.apply_actions(&actions, event.pointer_id());
    }

    fn on_pointer_up(&self, event: &web_sys::PointerEvent) {
        let actions = self
            .session
            .borrow_mut()
            .dispatch(PointerEvent::Up, self.surface_size());
        self.apply_actions(&actions, event.pointer_id());
    }

    fn on_panel_input(&self, event: &Event) {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let Some((field, value)) = panel::read_control(&target) else {
            return;
        };
        let applied = self.session.borrow_mut().apply_field(field, &value);
        if applied {
            self.rerender();
        }
    }

    fn on_panel_click(&self, event: &Event) {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        if let Some(kind) = target.get_attribute(panel::ADD_ATTR) {
            if let Ok(kind) = kind.parse::<BlockKind>() {
                self.session.borrow_mut().add_block(kind);
                self.rerender();
            }
        } else if target.id() == panel::DELETE_ID {
            self.delete_selected();
        }
    }
}

fn listen<E, F>(target: &web_sys::EventTarget, name: &str, host: &Rc<Host>, handler: F) -> Result<(), JsValue>
where
    E: JsCast + 'static,
    F: Fn(&Host, &E) + 'static,
{
    let host = Rc::clone(host);
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(&host, &event);
        }
    });
    target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn js_err(context: &str) -> impl Fn(JsValue) -> JsError + '_ {
    move |err| JsError::new(&format!("{}: {:?}", context, err))
}

/// The page builder editor, mounted on the current page.
#[wasm_bindgen]
pub struct PageBuilder {
    host: Rc<Host>,
}

#[wasm_bindgen]
impl PageBuilder {
    /// Mount the editor. `options` may be omitted to use the default element ids.
    #[wasm_bindgen(js_name = mount)]
    pub fn mount(options: JsValue) -> Result<PageBuilder, JsError> {
        let opts: EditorOptionsJs = if options.is_undefined() || options.is_null() {
            EditorOptionsJs::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))?
        };
        let (ids, editor_options) = opts.into_core();

        let window = web_sys::window().ok_or_else(|| JsError::new("No window"))?;
        let document = window.document().ok_or_else(|| JsError::new("No document"))?;

        let surface = document
            .get_element_by_id(&ids.surface)
            .ok_or_else(|| JsError::new(&format!("Element not found: {}", ids.surface)))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| JsError::new(&format!("Not an HTML element: {}", ids.surface)))?;

        let raw = document
            .get_element_by_id(&ids.initial)
            .and_then(|el| el.text_content())
            .unwrap_or_default();
        let session = EditorSession::load(&raw, editor_options);

        let panel_root = document.get_element_by_id(&ids.panel);
        let panel = match &panel_root {
            Some(root) => Some(
                Panel::build(&document, root, session.options().button_slots)
                    .map_err(js_err("Failed to build inspector"))?,
            ),
            None => None,
        };
        let field = document
            .get_element_by_id(&ids.field)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
        let form = document.get_element_by_id(&ids.form);

        let confirm: Confirm =
            Box::new(move |message| window.confirm_with_message(message).unwrap_or(false));
        let host = Rc::new(Host {
            document,
            session: RefCell::new(session),
            surface,
            panel,
            field,
            confirm,
        });

        let surface_target: &web_sys::EventTarget = &host.surface;
        listen(surface_target, "pointerdown", &host, Host::on_pointer_down)
            .map_err(js_err("Failed to attach pointer listeners"))?;
        listen(surface_target, "pointermove", &host, Host::on_pointer_move)
            .map_err(js_err("Failed to attach pointer listeners"))?;
        listen(surface_target, "pointerup", &host, Host::on_pointer_up)
            .map_err(js_err("Failed to attach pointer listeners"))?;
        listen(surface_target, "pointercancel", &host, Host::on_pointer_up)
            .map_err(js_err("Failed to attach pointer listeners"))?;

        if let Some(root) = &panel_root {
            listen(root, "input", &host, Host::on_panel_input)
                .map_err(js_err("Failed to attach inspector listeners"))?;
            listen(root, "click", &host, Host::on_panel_click)
                .map_err(js_err("Failed to attach inspector listeners"))?;
        }
        if let Some(form) = &form {
            listen(form, "submit", &host, |host: &Host, _: &Event| host.write_field())
                .map_err(js_err("Failed to attach submit listener"))?;
        }

        host.render().map_err(js_err("Initial render failed"))?;
        Ok(PageBuilder { host })
    }

    /// Get the version of the editor.
    #[wasm_bindgen(js_name = version)]
    pub fn version() -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    /// Rebuild the surface and inspector, e.g. after the surface was resized.
    pub fn render(&self) -> Result<(), JsError> {
        self.host.render().map_err(js_err("Render failed"))
    }

    /// Current layout as compact JSON.
    pub fn serialize(&self) -> Result<String, JsError> {
        self.host
            .session
            .borrow()
            .serialize()
            .map_err(|e| JsError::new(&format!("Serialization failed: {}", e)))
    }

    /// Add a block of the given type (`card`, `text`, `button`, `image`, `spacer`).
    #[wasm_bindgen(js_name = addBlock)]
    pub fn add_block(&self, kind: &str) -> Result<String, JsError> {
        let kind: BlockKind = kind
            .parse()
            .map_err(|e| JsError::new(&format!("{}", e)))?;
        let id = self.host.session.borrow_mut().add_block(kind);
        self.render()?;
        Ok(id.to_string())
    }

    /// Delete the selected block after the user confirms.
    #[wasm_bindgen(js_name = deleteSelected)]
    pub fn delete_selected(&self) -> bool {
        self.host.delete_selected()
    }

    /// Select a block by id.
    pub fn select(&self, id: &str) -> Result<(), JsError> {
        self.host
            .session
            .borrow_mut()
            .select(&BlockId::from(id))
            .map_err(|e| JsError::new(&format!("{}", e)))?;
        self.render()
    }

    /// Id of the selected block, if any.
    #[wasm_bindgen(js_name = selectedId)]
    pub fn selected_id(&self) -> Option<String> {
        self.host.session.borrow().selection().id().map(|id| id.to_string())
    }

    /// Replace the layout with the default starter layout.
    #[wasm_bindgen(js_name = resetToStarter)]
    pub fn reset_to_starter(&self) -> Result<(), JsError> {
        self.host
            .session
            .borrow_mut()
            .replace_document(LayoutDocument::starter());
        self.render()
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use pagecraft_editor::EditorOptions;
    use std::rc::Weak;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn surface(document: &Document) -> HtmlElement {
        let surface = document
            .create_element("div")
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap();
        surface.style().set_property("position", "relative").unwrap();
        surface.style().set_property("width", "1000px").unwrap();
        document.body().unwrap().append_child(&surface).unwrap();
        surface
    }

    fn host_with(confirm: impl Fn(&Weak<Host>) -> bool + 'static) -> Rc<Host> {
        let document = web_sys::window().unwrap().document().unwrap();
        let surface = surface(&document);
        let session = EditorSession::new(LayoutDocument::starter(), EditorOptions::default());
        Rc::new_cyclic(|weak: &Weak<Host>| {
            let weak = weak.clone();
            Host {
                document,
                session: RefCell::new(session),
                surface,
                panel: None,
                field: None,
                confirm: Box::new(move |_| confirm(&weak)),
            }
        })
    }

    #[wasm_bindgen_test]
    fn first_render_sizes_the_surface_before_placing_blocks() {
        let host = host_with(|_| true);
        host.render().unwrap();

        let min_height = host.session.borrow().document().canvas.min_height;
        assert!(host.surface_size().height >= min_height);
        let item = host
            .surface
            .query_selector(".pb-item")
            .unwrap()
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap();
        assert_ne!(item.style().get_property_value("height").unwrap(), "0px");
    }

    #[wasm_bindgen_test]
    fn delete_confirms_without_holding_the_session() {
        let host = host_with(|weak| {
            weak.upgrade()
                .map_or(false, |host| host.session.try_borrow_mut().is_ok())
        });
        host.render().unwrap();
        let before = host.session.borrow().document().len();
        assert!(host.delete_selected());
        assert_eq!(host.session.borrow().document().len(), before - 1);
    }

    #[wasm_bindgen_test]
    fn declined_delete_keeps_the_block() {
        let host = host_with(|_| false);
        let before = host.session.borrow().document().len();
        assert!(!host.delete_selected());
        assert_eq!(host.session.borrow().document().len(), before);
    }
}
