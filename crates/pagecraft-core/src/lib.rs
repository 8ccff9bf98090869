//! Core types for pagecraft layouts.
//!
//! This crate provides the foundational types used across the other
//! pagecraft crates:
//! - The layout document model (canvas settings and ordered blocks)
//! - Type-tagged block content
//! - The JSON wire format, with a lenient loader and a strict validator
//! - Block id generation
//! - Error types

pub mod block;
pub mod content;
pub mod document;
pub mod errors;
pub mod ids;
pub mod starter;
pub mod types;

pub use block::*;
pub use content::*;
pub use document::*;
pub use errors::*;
pub use ids::*;
pub use types::*;

pub use pagecraft_layout::{GeometryLimits, Rect};
