//! Scene building for pagecraft layouts.
//!
//! Rendering is split in two: this crate turns a document plus the
//! current selection into a [`Scene`] of positioned, typed draw
//! instructions, and hosts (the browser binding, the SVG exporter) turn
//! a scene into pixels. Nothing here touches a DOM.

pub mod primitives;
pub mod scene;

pub use primitives::*;
pub use scene::{build_scene, truncate, RenderOptions};
