//! JavaScript-compatible option types.

use pagecraft_editor::EditorOptions;
use serde::{Deserialize, Serialize};

/// Element ids the host looks up on mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostIds {
    pub surface: String,
    pub panel: String,
    /// Hidden form field receiving the serialized layout.
    pub field: String,
    pub form: String,
    /// Element whose text content is the initial payload.
    pub initial: String,
}

impl Default for HostIds {
    fn default() -> Self {
        Self {
            surface: "pbSurface".into(),
            panel: "pbPanel".into(),
            field: "layout_json".into(),
            form: "pbSaveForm".into(),
            initial: "pbInitialJson".into(),
        }
    }
}

/// Mount options from JavaScript. Every key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorOptionsJs {
    #[serde(default)]
    pub surface_id: Option<String>,
    #[serde(default)]
    pub panel_id: Option<String>,
    #[serde(default)]
    pub field_id: Option<String>,
    #[serde(default)]
    pub form_id: Option<String>,
    #[serde(default)]
    pub initial_id: Option<String>,
    /// Resize handle side in pixels.
    #[serde(default)]
    pub handle_size: Option<f64>,
    /// Body preview length in characters.
    #[serde(default)]
    pub preview_chars: Option<usize>,
    #[serde(default)]
    pub button_slots: Option<usize>,
}

impl EditorOptionsJs {
    pub fn into_core(self) -> (HostIds, EditorOptions) {
        let mut ids = HostIds::default();
        if let Some(id) = self.surface_id {
            ids.surface = id;
        }
        if let Some(id) = self.panel_id {
            ids.panel = id;
        }
        if let Some(id) = self.field_id {
            ids.field = id;
        }
        if let Some(id) = self.form_id {
            ids.form = id;
        }
        if let Some(id) = self.initial_id {
            ids.initial = id;
        }

        let mut opts = EditorOptions::default();
        if let Some(size) = self.handle_size {
            opts.render.handle_size = size;
        }
        if let Some(chars) = self.preview_chars {
            opts.render.preview_chars = chars;
        }
        if let Some(slots) = self.button_slots {
            opts.button_slots = slots.max(1);
        }
        (ids, opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let (ids, opts) = EditorOptionsJs::default().into_core();
        assert_eq!(ids, HostIds::default());
        assert_eq!(ids.field, "layout_json");
        assert_eq!(opts.button_slots, 2);
        assert_eq!(opts.render.handle_size, 12.0);
    }

    #[test]
    fn test_options_from_json() {
        let js: EditorOptionsJs = serde_json::from_str(
            r#"{"surfaceId":"canvas","handleSize":16,"buttonSlots":0,"previewChars":80}"#,
        )
        .unwrap();
        let (ids, opts) = js.into_core();
        assert_eq!(ids.surface, "canvas");
        assert_eq!(ids.panel, "pbPanel");
        assert_eq!(opts.render.handle_size, 16.0);
        assert_eq!(opts.render.preview_chars, 80);
        assert_eq!(opts.button_slots, 1);
    }
}
