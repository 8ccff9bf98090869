//! Geometry for pagecraft layouts.
//!
//! Blocks store their placement as percentages of the editing surface.
//! This crate converts between those percentages and the pixel space of
//! whatever surface is currently displayed, and owns the clamp rules that
//! keep a block reachable.
//!
//! # Example
//!
//! ```
//! use pagecraft_layout::{Rect, Surface, GeometryLimits};
//!
//! let surface = Surface::new(1000.0, 500.0);
//! let rect = Rect::new(10.0, 10.0, 40.0, 20.0);
//! let bounds = rect.to_bounds(surface);
//! assert_eq!(bounds.x, 100.0);
//! assert_eq!(bounds.height, 100.0);
//!
//! let clamped = Rect::new(120.0, -4.0, 1.0, 300.0).clamped(&GeometryLimits::default());
//! assert_eq!(clamped, Rect::new(95.0, 0.0, 5.0, 100.0));
//! ```
//!
//! Surfaces are never cached here: callers pass the size they measured
//! for each conversion, so a window resize between two interactions
//! changes the pixels produced for the same percentages.

mod bounds;
mod geometry;
mod rect;

pub use bounds::Bounds;
pub use geometry::{
    clamp, percent_delta, percent_to_pixels, pixels_to_percent, Axis, GeometryLimits, Surface,
};
pub use rect::Rect;
