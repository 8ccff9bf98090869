//! Editing session for pagecraft layouts.
//!
//! [`EditorSession`] owns a [`LayoutDocument`](pagecraft_core::LayoutDocument)
//! together with the selection and the in-flight pointer gesture. Hosts
//! feed it toolbar commands, inspector edits and normalized pointer
//! events, then redraw from the [`Frame`] it renders.
//!
//! ```
//! use pagecraft_editor::{EditorOptions, EditorSession, Field};
//! use pagecraft_layout::Surface;
//!
//! let mut session = EditorSession::load("", EditorOptions::default());
//! session.add_block(pagecraft_core::BlockKind::Text);
//! assert!(session.apply_field(Field::Title, "Welcome"));
//!
//! let frame = session.render(Surface::new(800.0, 600.0)).unwrap();
//! assert_eq!(frame.scene.nodes.len(), 1);
//! assert!(frame.serialized.contains("Welcome"));
//! ```

pub mod inspector;
pub mod interaction;
pub mod options;
pub mod selection;
pub mod session;

pub use inspector::{Field, FieldValue, InspectorState, UnknownField};
pub use interaction::{Action, Gesture, GestureStart, PointerEvent};
pub use options::EditorOptions;
pub use selection::Selection;
pub use session::{EditorSession, Frame};
