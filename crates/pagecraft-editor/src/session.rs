//! The editing session.

use glam::DVec2;
use pagecraft_core::{
    Block, BlockContent, BlockId, BlockKind, IdSource, LayoutDocument, PageError, RandomIds,
};
use pagecraft_layout::Surface;
use pagecraft_render::{build_scene, HitPart, Scene};
use tracing::debug;

use crate::inspector::{self, Field, InspectorState};
use crate::interaction::{Action, Gesture, PointerEvent};
use crate::options::EditorOptions;
use crate::selection::Selection;

/// Everything a host needs to redraw after a change.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub scene: Scene,
    pub inspector: InspectorState,
    /// Compact JSON for the persistence field.
    pub serialized: String,
}

/// One open editor: the document plus selection and gesture state.
///
/// Hosts own the session and pass it by `&mut` to their event handlers.
pub struct EditorSession {
    document: LayoutDocument,
    selection: Selection,
    gesture: Gesture,
    ids: Box<dyn IdSource>,
    options: EditorOptions,
}

impl EditorSession {
    /// Open `document`, selecting its first block.
    pub fn new(document: LayoutDocument, options: EditorOptions) -> Self {
        Self::with_ids(document, options, Box::new(RandomIds::new()))
    }

    /// [`EditorSession::new`] with an explicit id source.
    pub fn with_ids(
        mut document: LayoutDocument,
        options: EditorOptions,
        ids: Box<dyn IdSource>,
    ) -> Self {
        for block in &mut document.blocks {
            if let BlockContent::Card(card) = &mut block.content {
                card.pad_buttons(options.button_slots);
            }
        }
        let selection = Selection::from_id(document.first_id().cloned());
        Self {
            document,
            selection,
            gesture: Gesture::Idle,
            ids,
            options,
        }
    }

    /// Open the initial payload leniently; malformed input yields an empty document.
    pub fn load(raw: &str, options: EditorOptions) -> Self {
        let mut ids = RandomIds::new();
        let document = LayoutDocument::load_with(raw, &mut ids);
        Self::with_ids(document, options, Box::new(ids))
    }

    pub fn document(&self) -> &LayoutDocument {
        &self.document
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_block(&self) -> Option<&Block> {
        self.selection.id().and_then(|id| self.document.block(id))
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Replace the document, e.g. with the starter layout.
    pub fn replace_document(&mut self, document: LayoutDocument) {
        let ids = std::mem::replace(&mut self.ids, Box::new(RandomIds::new()));
        *self = Self::with_ids(document, self.options.clone(), ids);
        debug!(blocks = self.document.len(), "document replaced");
    }

    pub fn select(&mut self, id: &BlockId) -> Result<(), PageError> {
        self.document.try_block(id)?;
        self.selection = Selection::Selected(id.clone());
        debug!(block = %id, "selected");
        Ok(())
    }

    /// Append a block of `kind` with its creation defaults and select it.
    pub fn add_block(&mut self, kind: BlockKind) -> BlockId {
        let id = self.document.fresh_id(self.ids.as_mut());
        let mut block = Block::starter(id.clone(), kind);
        if let BlockContent::Card(card) = &mut block.content {
            card.pad_buttons(self.options.button_slots);
        }
        self.document.push(block);
        self.selection = Selection::Selected(id.clone());
        debug!(block = %id, %kind, "block added");
        id
    }

    /// Delete the selected block once `confirm` agrees.
    ///
    /// Selection falls back to the first remaining block. Declining, or
    /// having nothing selected, leaves everything untouched.
    pub fn delete_selected(&mut self, confirm: impl FnOnce(&Block) -> bool) -> Option<Block> {
        let block = self.selected_block()?;
        if !confirm(block) {
            return None;
        }
        let id = block.id.clone();
        let removed = self.document.remove(&id)?;
        if self.gesture.target() == Some(&id) {
            self.gesture = Gesture::Idle;
        }
        self.selection = Selection::from_id(self.document.first_id().cloned());
        debug!(block = %id, remaining = self.document.len(), "block deleted");
        Some(removed)
    }

    /// Inspector contents for the current selection.
    pub fn inspector(&self) -> InspectorState {
        match self.selected_block() {
            Some(block) => inspector::inspect(block, self.options.button_slots),
            None => InspectorState::Empty,
        }
    }

    /// Write an inspector field on the selected block.
    ///
    /// Returns whether the model changed and needs a re-render.
    pub fn apply_field(&mut self, field: Field, value: &str) -> bool {
        let Some(id) = self.selection.id() else {
            return false;
        };
        let Some(block) = self.document.block_mut(id) else {
            return false;
        };
        let applied = inspector::apply(block, field, value, &self.options.limits);
        if applied {
            debug!(block = %block.id, %field, "field applied");
        }
        applied
    }

    /// Feed one pointer event through the gesture state machine.
    pub fn dispatch(&mut self, event: PointerEvent, surface: Surface) -> Vec<Action> {
        match event {
            PointerEvent::Down {
                block,
                part,
                position,
            } => {
                let Some(rect) = self.document.block(&block).map(|b| b.rect) else {
                    return Vec::new();
                };
                self.selection = Selection::Selected(block.clone());
                debug!(block = %block, ?part, "gesture start");
                self.gesture = Gesture::begin(block, part, position, rect);
                vec![Action::Render, Action::CapturePointer]
            }
            PointerEvent::Move { position } => {
                if self.gesture.is_idle() {
                    return Vec::new();
                }
                if self
                    .gesture
                    .track(&mut self.document, position, surface, &self.options.limits)
                {
                    vec![Action::Render]
                } else {
                    debug!("gesture target vanished");
                    self.gesture = Gesture::Idle;
                    vec![Action::ReleasePointer]
                }
            }
            PointerEvent::Up => {
                if std::mem::take(&mut self.gesture).is_idle() {
                    return Vec::new();
                }
                debug!("gesture end");
                vec![Action::ReleasePointer]
            }
        }
    }

    /// Pointer-down at a surface position, hit-tested against the current scene.
    ///
    /// For hosts that only know coordinates. Missing the blocks does nothing.
    pub fn pointer_down_at(&mut self, position: DVec2, surface: Surface) -> Vec<Action> {
        let Some(hit) = self.scene(surface).hit_test(position) else {
            return Vec::new();
        };
        self.dispatch(
            PointerEvent::Down {
                block: hit.id,
                part: hit.part,
                position,
            },
            surface,
        )
    }

    /// Grab the resize handle of `id` at `position`.
    pub fn start_resize(&mut self, id: BlockId, position: DVec2, surface: Surface) -> Vec<Action> {
        self.dispatch(
            PointerEvent::Down {
                block: id,
                part: HitPart::Handle,
                position,
            },
            surface,
        )
    }

    pub fn scene(&self, surface: Surface) -> Scene {
        build_scene(
            &self.document,
            self.selection.id(),
            surface,
            &self.options.render,
        )
    }

    /// Compact JSON of the current document.
    pub fn serialize(&self) -> Result<String, PageError> {
        self.document.to_json()
    }

    /// Scene, inspector and persisted JSON for the current state.
    pub fn render(&self, surface: Surface) -> Result<Frame, PageError> {
        Ok(Frame {
            scene: self.scene(surface),
            inspector: self.inspector(),
            serialized: self.serialize()?,
        })
    }
}
