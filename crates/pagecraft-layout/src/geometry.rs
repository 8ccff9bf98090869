//! Percent <-> pixel conversion and clamping.

use glam::DVec2;

/// Which surface dimension a quantity is relative to.
///
/// `x` and `w` are horizontal, `y` and `h` are vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Pixel size of the editing surface at the moment of a computation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

impl Surface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Extent along an axis.
    pub fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// A surface at least `min_height` pixels tall.
    pub fn with_min_height(self, min_height: f64) -> Self {
        Self {
            width: self.width,
            height: self.height.max(min_height),
        }
    }
}

/// Clamp `n` into `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics on `min > max`; `min` wins.
pub fn clamp(n: f64, min: f64, max: f64) -> f64 {
    min.max(max.min(n))
}

/// Convert a percentage of the surface into pixels.
pub fn percent_to_pixels(value: f64, axis: Axis, surface: Surface) -> f64 {
    value * surface.extent(axis) / 100.0
}

/// Convert pixels into a percentage of the surface.
///
/// A collapsed axis (zero or negative extent) yields 0.
pub fn pixels_to_percent(value: f64, axis: Axis, surface: Surface) -> f64 {
    let extent = surface.extent(axis);
    if extent <= 0.0 {
        return 0.0;
    }
    value * 100.0 / extent
}

/// Convert a pixel delta into a percent delta on both axes.
pub fn percent_delta(pixels: DVec2, surface: Surface) -> DVec2 {
    DVec2::new(
        pixels_to_percent(pixels.x, Axis::Horizontal, surface),
        pixels_to_percent(pixels.y, Axis::Vertical, surface),
    )
}

/// Clamp ranges applied after every geometric mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryLimits {
    /// Largest origin on either axis, leaving a margin so a block stays reachable.
    pub max_origin: f64,
    /// Smallest width in percent.
    pub min_width: f64,
    /// Smallest height in percent.
    pub min_height: f64,
    /// Largest width or height in percent.
    pub max_size: f64,
}

impl Default for GeometryLimits {
    fn default() -> Self {
        Self {
            max_origin: 95.0,
            min_width: 5.0,
            min_height: 6.0,
            max_size: 100.0,
        }
    }
}

impl GeometryLimits {
    /// Clamp an origin into `[0, max_origin]` on both axes.
    pub fn clamp_position(&self, x: f64, y: f64) -> (f64, f64) {
        (
            clamp(x, 0.0, self.max_origin),
            clamp(y, 0.0, self.max_origin),
        )
    }

    /// Clamp a size into the minimum/maximum ranges.
    pub fn clamp_size(&self, w: f64, h: f64) -> (f64, f64) {
        (
            clamp(w, self.min_width, self.max_size),
            clamp(h, self.min_height, self.max_size),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(1.0, 3.0, 2.0), 3.0);
    }

    #[test]
    fn test_axis_selection() {
        let surface = Surface::new(1000.0, 500.0);
        assert_eq!(percent_to_pixels(10.0, Axis::Horizontal, surface), 100.0);
        assert_eq!(percent_to_pixels(10.0, Axis::Vertical, surface), 50.0);
        assert_eq!(pixels_to_percent(50.0, Axis::Horizontal, surface), 5.0);
        assert_eq!(pixels_to_percent(30.0, Axis::Vertical, surface), 6.0);
    }

    #[test]
    fn test_collapsed_surface() {
        let surface = Surface::new(0.0, 0.0);
        assert_eq!(pixels_to_percent(50.0, Axis::Horizontal, surface), 0.0);
        assert_eq!(percent_to_pixels(50.0, Axis::Vertical, surface), 0.0);
    }

    #[test]
    fn test_surface_resize_changes_pixels() {
        let narrow = Surface::new(800.0, 600.0);
        let wide = Surface::new(1200.0, 600.0);
        let narrow_px = percent_to_pixels(25.0, Axis::Horizontal, narrow);
        let wide_px = percent_to_pixels(25.0, Axis::Horizontal, wide);
        assert_eq!(narrow_px, 200.0);
        assert_eq!(wide_px, 300.0);
    }

    #[test]
    fn test_percent_delta() {
        let delta = percent_delta(DVec2::new(50.0, 30.0), Surface::new(1000.0, 500.0));
        assert!((delta.x - 5.0).abs() < 1e-9);
        assert!((delta.y - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_limits() {
        let limits = GeometryLimits::default();
        assert_eq!(limits.clamp_position(100.0, -3.0), (95.0, 0.0));
        assert_eq!(limits.clamp_size(1.0, 2.0), (5.0, 6.0));
        assert_eq!(limits.clamp_size(150.0, 101.0), (100.0, 100.0));
    }

    #[test]
    fn test_with_min_height() {
        let surface = Surface::new(900.0, 300.0).with_min_height(560.0);
        assert_eq!(surface.height, 560.0);
        let surface = Surface::new(900.0, 700.0).with_min_height(560.0);
        assert_eq!(surface.height, 700.0);
    }

    proptest! {
        #[test]
        fn conversion_round_trips(
            p in 0.0f64..=100.0,
            width in 1.0f64..5000.0,
            height in 1.0f64..5000.0,
        ) {
            let surface = Surface::new(width, height);
            for axis in [Axis::Horizontal, Axis::Vertical] {
                let px = percent_to_pixels(p, axis, surface);
                let back = pixels_to_percent(px, axis, surface);
                prop_assert!((back - p).abs() < 1e-9);
            }
        }

        #[test]
        fn clamps_stay_in_range(x in -1e6f64..1e6, y in -1e6f64..1e6) {
            let limits = GeometryLimits::default();
            let (cx, cy) = limits.clamp_position(x, y);
            prop_assert!((0.0..=95.0).contains(&cx));
            prop_assert!((0.0..=95.0).contains(&cy));
            let (w, h) = limits.clamp_size(x, y);
            prop_assert!((5.0..=100.0).contains(&w));
            prop_assert!((6.0..=100.0).contains(&h));
        }
    }
}
