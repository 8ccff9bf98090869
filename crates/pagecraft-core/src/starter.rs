//! The layout a fresh site starts with, and what "reset" restores.

use pagecraft_layout::Rect;

use crate::block::Block;
use crate::content::{BlockContent, CardContent, Fields, Link, BUTTON_SLOTS};
use crate::document::{Canvas, LayoutDocument, LAYOUT_VERSION};
use crate::types::BlockId;

fn card(id: &str, rect: Rect, title: &str, body: &str, buttons: &[(&str, &str)], note: Option<&str>) -> Block {
    let mut content = CardContent {
        title: title.into(),
        body: body.into(),
        buttons: buttons.iter().map(|(label, url)| Link::new(*label, *url)).collect(),
        note: note.map(str::to_string),
        extra: Fields::new(),
    };
    content.pad_buttons(BUTTON_SLOTS);
    Block::new(BlockId::from(id), rect, BlockContent::Card(content))
}

impl LayoutDocument {
    /// Three-card home layout.
    pub fn starter() -> Self {
        Self {
            version: LAYOUT_VERSION,
            canvas: Canvas::default(),
            blocks: vec![
                card(
                    "classes",
                    Rect::new(0.0, 0.0, 49.0, 40.0),
                    "Life-skills classes",
                    "Weekly workshops: routines, budgeting, job search, and basic life skills.",
                    &[("What we do", "/what-we-do")],
                    None,
                ),
                card(
                    "openings",
                    Rect::new(51.0, 0.0, 49.0, 40.0),
                    "Upcoming openings",
                    "View current openings and apply in a few minutes.",
                    &[("View openings", "/openings"), ("Apply", "/apply")],
                    Some("Pricing is shared after a quick application so we can confirm fit and next steps."),
                ),
                card(
                    "careers",
                    Rect::new(0.0, 45.0, 100.0, 40.0),
                    "Jobs and training",
                    "Employment pathway and training opportunities.",
                    &[("Careers", "/careers"), ("Contact", "/contact")],
                    None,
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::validate;
    use pagecraft_layout::GeometryLimits;

    #[test]
    fn test_starter_is_valid() {
        let doc = LayoutDocument::starter();
        assert_eq!(doc.len(), 3);
        let limits = GeometryLimits::default();
        assert!(doc.blocks.iter().all(|b| b.rect.is_within(&limits)));

        let report = validate(&doc.to_json().unwrap()).unwrap();
        assert!(report.is_clean(), "{:?}", report.findings);
        assert_eq!(report.document, doc);
    }
}
