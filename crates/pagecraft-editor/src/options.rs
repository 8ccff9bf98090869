//! Editor configuration.

use pagecraft_core::BUTTON_SLOTS;
use pagecraft_layout::GeometryLimits;
use pagecraft_render::RenderOptions;

/// Options for an editing session.
#[derive(Debug, Clone)]
pub struct EditorOptions {
    /// Clamp ranges applied after every geometric edit.
    pub limits: GeometryLimits,
    /// Scene building knobs.
    pub render: RenderOptions,
    /// Card button slots exposed by the inspector.
    pub button_slots: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            limits: GeometryLimits::default(),
            render: RenderOptions::default(),
            button_slots: BUTTON_SLOTS,
        }
    }
}
