//! Export formats for pagecraft layouts.
//!
//! Exports work from a rendered [`Scene`], so they show exactly what the
//! editor surface shows for the same model and surface size.

#[cfg(feature = "svg")]
pub mod svg;

use std::path::Path;

use pagecraft_core::{ExportError, LayoutDocument};
use pagecraft_layout::Surface;
use pagecraft_render::{build_scene, RenderOptions, Scene};

#[cfg(feature = "svg")]
pub use svg::SvgOptions;

/// Export a scene to SVG.
#[cfg(feature = "svg")]
pub fn export_svg(scene: &Scene, options: &SvgOptions) -> Result<String, ExportError> {
    svg::export(scene, options)
}

/// Render `doc` on a surface of the given size and export it to SVG.
#[cfg(feature = "svg")]
pub fn document_to_svg(
    doc: &LayoutDocument,
    surface: Surface,
    options: &SvgOptions,
) -> Result<String, ExportError> {
    let scene = build_scene(doc, None, surface, &RenderOptions::default());
    svg::export(&scene, options)
}

/// Export a scene to an SVG file.
#[cfg(feature = "svg")]
pub fn write_svg(scene: &Scene, options: &SvgOptions, path: &Path) -> Result<(), ExportError> {
    let svg = svg::export(scene, options)?;
    std::fs::write(path, svg)?;
    tracing::debug!(path = %path.display(), "svg written");
    Ok(())
}
