//! Pointer gestures.
//!
//! Hosts translate their native pointer events into [`PointerEvent`]s
//! and feed them to [`EditorSession::dispatch`](crate::EditorSession::dispatch).
//! The returned [`Action`]s tell the host what to do next.

use glam::DVec2;
use pagecraft_core::{BlockId, LayoutDocument};
use pagecraft_layout::{percent_delta, GeometryLimits, Rect, Surface};
use pagecraft_render::HitPart;
use tracing::trace;

/// Normalized pointer input, positions in surface pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// Pointer pressed on a block's body or its resize handle.
    Down {
        block: BlockId,
        part: HitPart,
        position: DVec2,
    },
    Move { position: DVec2 },
    Up,
}

/// What the host should do after a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The model changed; rebuild the view.
    Render,
    /// Route further pointer events to the surface until release.
    CapturePointer,
    ReleasePointer,
}

/// Where a gesture started.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureStart {
    pub block: BlockId,
    /// Pointer position at pointer-down.
    pub pointer: DVec2,
    /// Block placement at pointer-down.
    pub rect: Rect,
}

/// The in-flight gesture. Only one exists at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging(GestureStart),
    Resizing(GestureStart),
}

impl Gesture {
    /// Start a gesture for a pointer-down on `part` of a block at `rect`.
    pub fn begin(block: BlockId, part: HitPart, pointer: DVec2, rect: Rect) -> Self {
        let start = GestureStart {
            block,
            pointer,
            rect,
        };
        match part {
            HitPart::Body => Gesture::Dragging(start),
            HitPart::Handle => Gesture::Resizing(start),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    pub fn start(&self) -> Option<&GestureStart> {
        match self {
            Gesture::Idle => None,
            Gesture::Dragging(start) | Gesture::Resizing(start) => Some(start),
        }
    }

    /// Block the gesture is moving or resizing.
    pub fn target(&self) -> Option<&BlockId> {
        self.start().map(|s| &s.block)
    }

    /// Apply a pointer move to `doc`.
    ///
    /// The pixel delta since pointer-down is converted to percent of the
    /// live surface and added to the start rect, then clamped. Returns
    /// false when idle or when the target block no longer exists.
    pub fn track(
        &self,
        doc: &mut LayoutDocument,
        position: DVec2,
        surface: Surface,
        limits: &GeometryLimits,
    ) -> bool {
        let Some(start) = self.start() else {
            return false;
        };
        let Some(block) = doc.block_mut(&start.block) else {
            return false;
        };
        let delta = percent_delta(position - start.pointer, surface);
        let current = block.rect;
        block.rect = match self {
            Gesture::Dragging(_) => current.with_origin(start.rect.origin() + delta, limits),
            Gesture::Resizing(_) => current.with_size(start.rect.size() + delta, limits),
            Gesture::Idle => current,
        };
        trace!(block = %start.block, ?delta, rect = ?block.rect, "gesture move");
        true
    }
}
