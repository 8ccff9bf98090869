//! SVG export for rendered scenes.

use std::fmt::Write;

use pagecraft_core::ExportError;
use pagecraft_layout::Bounds;
use pagecraft_render::{BlockNode, Preview, Scene};

/// Colors and metrics for SVG output.
#[derive(Debug, Clone)]
pub struct SvgOptions {
    pub background: String,
    pub block_fill: String,
    pub block_stroke: String,
    /// Outline of the selected block.
    pub accent: String,
    pub text_color: String,
    pub muted_color: String,
    pub chip_fill: String,
    pub font_family: String,
    pub title_size: f64,
    pub body_size: f64,
    pub padding: f64,
    pub corner_radius: f64,
    /// Draw resize handles, as the editor surface does.
    pub show_handles: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            background: "#f6f7f9".into(),
            block_fill: "#ffffff".into(),
            block_stroke: "#d0d4dc".into(),
            accent: "#2f6fed".into(),
            text_color: "#1d2330".into(),
            muted_color: "#5b6475".into(),
            chip_fill: "#e8eefc".into(),
            font_family: "sans-serif".into(),
            title_size: 16.0,
            body_size: 13.0,
            padding: 12.0,
            corner_radius: 8.0,
            show_handles: false,
        }
    }
}

/// Export a scene to SVG.
pub fn export(scene: &Scene, options: &SvgOptions) -> Result<String, ExportError> {
    if scene.width <= 0.0 || scene.height <= 0.0 {
        return Err(ExportError::EmptySurface {
            width: scene.width,
            height: scene.height,
        });
    }

    // Blocks may overflow the surface; grow the canvas to keep them visible.
    let content = scene.content_bounds();
    let width = scene.width.max(content.right());
    let height = scene.height.max(content.bottom());

    let mut svg = String::new();
    writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        width, height, width, height
    )?;

    let mut builder = SvgBuilder {
        svg: &mut svg,
        options,
        indent: 1,
    };
    builder.background(width, height)?;
    for node in &scene.nodes {
        builder.export_node(node)?;
    }

    writeln!(svg, "</svg>")?;
    Ok(svg)
}

struct SvgBuilder<'a> {
    svg: &'a mut String,
    options: &'a SvgOptions,
    indent: usize,
}

impl<'a> SvgBuilder<'a> {
    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.svg.push_str("  ");
        }
    }

    fn line(&mut self, text: &str) -> Result<(), ExportError> {
        self.write_indent();
        writeln!(self.svg, "{}", text)?;
        Ok(())
    }

    fn background(&mut self, width: f64, height: f64) -> Result<(), ExportError> {
        let line = format!(
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{}" />"#,
            width, height, self.options.background
        );
        self.line(&line)
    }

    fn export_node(&mut self, node: &BlockNode) -> Result<(), ExportError> {
        let b = node.bounds;
        self.line(&format!(
            r#"<g data-id="{}" data-kind="{}">"#,
            escape_xml(node.id.as_str()),
            node.kind
        ))?;
        self.indent += 1;

        let o = self.options;
        let (stroke, stroke_width) = if node.selected {
            (o.accent.as_str(), 2.0)
        } else {
            (o.block_stroke.as_str(), 1.0)
        };
        let dash = if matches!(node.preview, Preview::Spacer) {
            r#" stroke-dasharray="4 4""#
        } else {
            ""
        };
        self.line(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" ry="{}" fill="{}" stroke="{}" stroke-width="{}"{} />"#,
            b.x, b.y, b.width, b.height, o.corner_radius, o.corner_radius, o.block_fill, stroke, stroke_width, dash
        ))?;

        match &node.preview {
            Preview::Card { title, body, chips } => {
                let mut y = b.y + o.padding + o.title_size;
                self.text(b.x + o.padding, y, title, o.title_size, &o.text_color, true)?;
                y += o.body_size * 1.5;
                self.text(b.x + o.padding, y, body, o.body_size, &o.muted_color, false)?;
                let mut x = b.x + o.padding;
                let chip_y = b.bottom() - o.padding - o.body_size * 2.0;
                for chip in chips {
                    x += self.chip(x, chip_y, chip)? + o.padding / 2.0;
                }
            }
            Preview::Text { title, body } => {
                let y = b.y + o.padding + o.title_size;
                self.text(b.x + o.padding, y, title, o.title_size, &o.text_color, true)?;
                self.text(
                    b.x + o.padding,
                    y + o.body_size * 1.5,
                    body,
                    o.body_size,
                    &o.muted_color,
                    false,
                )?;
            }
            Preview::Button { label } => {
                let width = chip_width(label, o.body_size);
                let x = b.x + (b.width - width) / 2.0;
                let y = b.y + (b.height - o.body_size * 2.0) / 2.0;
                self.chip(x, y, label)?;
            }
            Preview::Image { url: Some(url), .. } => {
                self.line(&format!(
                    r#"<image href="{}" x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="xMidYMid slice" />"#,
                    escape_xml(url),
                    b.x,
                    b.y,
                    b.width,
                    b.height
                ))?;
            }
            Preview::Image { url: None, caption } => {
                let (cx, cy) = (b.x + b.width / 2.0, b.y + b.height / 2.0);
                self.line(&format!(
                    r#"<text x="{}" y="{}" text-anchor="middle" fill="{}" font-size="{}" font-family="{}">{}</text>"#,
                    cx,
                    cy,
                    o.muted_color,
                    o.body_size,
                    o.font_family,
                    escape_xml(caption)
                ))?;
            }
            Preview::Spacer => {}
        }

        if o.show_handles {
            self.handle(node.handle)?;
        }

        self.indent -= 1;
        self.line("</g>")
    }

    fn text(
        &mut self,
        x: f64,
        y: f64,
        content: &str,
        size: f64,
        color: &str,
        bold: bool,
    ) -> Result<(), ExportError> {
        if content.is_empty() {
            return Ok(());
        }
        let weight = if bold { r#" font-weight="600""# } else { "" };
        let line = format!(
            r#"<text x="{}" y="{}" fill="{}" font-size="{}" font-family="{}"{}>{}</text>"#,
            x,
            y,
            color,
            size,
            self.options.font_family,
            weight,
            escape_xml(content)
        );
        self.line(&line)
    }

    /// Draw a label chip; returns its width.
    fn chip(&mut self, x: f64, y: f64, label: &str) -> Result<f64, ExportError> {
        let o = self.options;
        let width = chip_width(label, o.body_size);
        let height = o.body_size * 2.0;
        self.line(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" ry="{}" fill="{}" />"#,
            x,
            y,
            width,
            height,
            height / 2.0,
            height / 2.0,
            o.chip_fill
        ))?;
        self.line(&format!(
            r#"<text x="{}" y="{}" text-anchor="middle" fill="{}" font-size="{}" font-family="{}">{}</text>"#,
            x + width / 2.0,
            y + height * 0.68,
            o.accent,
            o.body_size,
            o.font_family,
            escape_xml(label)
        ))?;
        Ok(width)
    }

    fn handle(&mut self, handle: Bounds) -> Result<(), ExportError> {
        let line = format!(
            r#"<rect class="pb-handle" x="{}" y="{}" width="{}" height="{}" fill="{}" />"#,
            handle.x, handle.y, handle.width, handle.height, self.options.accent
        );
        self.line(&line)
    }
}

/// Rough chip width for a label; SVG has no text measurement.
fn chip_width(label: &str, font_size: f64) -> f64 {
    label.chars().count() as f64 * font_size * 0.6 + font_size * 1.5
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_core::{Block, BlockId, BlockKind, LayoutDocument};
    use pagecraft_layout::Surface;
    use pagecraft_render::{build_scene, RenderOptions};

    fn scene_for(doc: &LayoutDocument, selected: Option<&BlockId>) -> Scene {
        build_scene(doc, selected, Surface::new(800.0, 600.0), &RenderOptions::default())
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("<test>"), "&lt;test&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml(r#""q" 'a'"#), "&quot;q&quot; &apos;a&apos;");
    }

    #[test]
    fn test_export_empty_document() {
        let svg = export(&scene_for(&LayoutDocument::default(), None), &SvgOptions::default()).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"width="800" height="600""#));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(!svg.contains("<g "));
    }

    #[test]
    fn test_export_zero_surface_fails() {
        let scene = Scene::new(0.0, 0.0);
        assert!(matches!(
            export(&scene, &SvgOptions::default()),
            Err(ExportError::EmptySurface { .. })
        ));
    }

    #[test]
    fn test_export_starter_layout() {
        let doc = LayoutDocument::starter();
        let svg = export(&scene_for(&doc, None), &SvgOptions::default()).unwrap();
        assert_eq!(svg.matches("<g data-id=").count(), 3);
        assert!(svg.contains(r#"data-kind="card""#));
        assert!(!svg.contains("pb-handle"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut doc = LayoutDocument::default();
        let mut block = Block::starter(BlockId::from("t"), BlockKind::Text);
        if let pagecraft_core::BlockContent::Text(text) = &mut block.content {
            text.title = "<script>alert(1)</script>".into();
        }
        doc.push(block);
        let svg = export(&scene_for(&doc, None), &SvgOptions::default()).unwrap();
        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_selected_block_and_handles() {
        let mut doc = LayoutDocument::default();
        doc.push(Block::starter(BlockId::from("img"), BlockKind::Image));
        let options = SvgOptions {
            show_handles: true,
            ..SvgOptions::default()
        };
        let svg = export(&scene_for(&doc, Some(&BlockId::from("img"))), &options).unwrap();
        assert!(svg.contains(r##"stroke="#2f6fed" stroke-width="2""##));
        assert!(svg.contains("pb-handle"));
        assert!(svg.contains(">Image</text>"));
    }
}
