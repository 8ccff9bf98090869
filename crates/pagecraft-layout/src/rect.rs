//! Percent-space block rectangles.

use glam::DVec2;

use crate::bounds::Bounds;
use crate::geometry::{percent_to_pixels, Axis, GeometryLimits, Surface};

/// A block's placement as percentages of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Origin as a vector.
    pub fn origin(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Size as a vector.
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.w, self.h)
    }

    /// Move the origin, clamped.
    pub fn with_origin(self, origin: DVec2, limits: &GeometryLimits) -> Self {
        let (x, y) = limits.clamp_position(origin.x, origin.y);
        Self { x, y, ..self }
    }

    /// Change the size, clamped.
    pub fn with_size(self, size: DVec2, limits: &GeometryLimits) -> Self {
        let (w, h) = limits.clamp_size(size.x, size.y);
        Self { w, h, ..self }
    }

    /// All four values clamped into their ranges.
    pub fn clamped(self, limits: &GeometryLimits) -> Self {
        self.with_origin(self.origin(), limits)
            .with_size(self.size(), limits)
    }

    /// Whether every value already sits inside its range.
    pub fn is_within(&self, limits: &GeometryLimits) -> bool {
        self.clamped(limits) == *self
    }

    /// Pixel placement on a surface.
    pub fn to_bounds(&self, surface: Surface) -> Bounds {
        Bounds::new(
            percent_to_pixels(self.x, Axis::Horizontal, surface),
            percent_to_pixels(self.y, Axis::Vertical, surface),
            percent_to_pixels(self.w, Axis::Horizontal, surface),
            percent_to_pixels(self.h, Axis::Vertical, surface),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_bounds() {
        let rect = Rect::new(10.0, 20.0, 40.0, 50.0);
        let bounds = rect.to_bounds(Surface::new(1000.0, 500.0));
        assert_eq!(bounds, Bounds::new(100.0, 100.0, 400.0, 250.0));
    }

    #[test]
    fn test_clamped_keeps_overflow() {
        // x + w may exceed 100; only individual values are clamped.
        let rect = Rect::new(90.0, 90.0, 50.0, 50.0).clamped(&GeometryLimits::default());
        assert_eq!(rect, Rect::new(90.0, 90.0, 50.0, 50.0));
        assert!(rect.is_within(&GeometryLimits::default()));
    }

    #[test]
    fn test_with_origin_clamps() {
        let limits = GeometryLimits::default();
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0).with_origin(DVec2::new(99.0, -5.0), &limits);
        assert_eq!(rect, Rect::new(95.0, 0.0, 20.0, 20.0));
    }

    #[test]
    fn test_with_size_clamps() {
        let limits = GeometryLimits::default();
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0).with_size(DVec2::new(1.0, 500.0), &limits);
        assert_eq!(rect, Rect::new(10.0, 10.0, 5.0, 100.0));
    }
}
