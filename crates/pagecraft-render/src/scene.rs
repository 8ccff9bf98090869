//! Scene building from a layout document.

use pagecraft_core::{Block, BlockContent, BlockId, LayoutDocument};
use pagecraft_layout::Surface;

use crate::primitives::{BlockNode, Preview, Scene};

/// Knobs for scene building.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Side of the square resize handle, in pixels.
    pub handle_size: f64,
    /// Body text longer than this many characters is cut and marked with `…`.
    pub preview_chars: usize,
    /// Maximum button chips shown on a card.
    pub card_chips: usize,
    /// Caption for image blocks without a URL.
    pub image_placeholder: String,
    /// Label for button blocks without one.
    pub button_placeholder: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            handle_size: 12.0,
            preview_chars: 160,
            card_chips: 2,
            image_placeholder: "Image".to_string(),
            button_placeholder: "Button".to_string(),
        }
    }
}

/// Build the scene for `doc` on a surface of the given (live) size.
///
/// The output depends only on the arguments: rendering the same model
/// twice yields equal scenes.
pub fn build_scene(
    doc: &LayoutDocument,
    selected: Option<&BlockId>,
    surface: Surface,
    options: &RenderOptions,
) -> Scene {
    let mut scene = Scene::new(surface.width, surface.with_min_height(doc.canvas.min_height).height);

    for (tab_index, block) in doc.blocks.iter().enumerate() {
        let bounds = block.rect.to_bounds(surface);
        scene.push(BlockNode {
            id: block.id.clone(),
            kind: block.kind(),
            bounds,
            selected: selected == Some(&block.id),
            tab_index,
            preview: preview(block, options),
            handle: bounds.bottom_right_square(options.handle_size),
        });
    }

    scene
}

fn preview(block: &Block, options: &RenderOptions) -> Preview {
    match &block.content {
        BlockContent::Card(card) => Preview::Card {
            title: title_or_id(&card.title, block),
            body: truncate(&card.body, options.preview_chars),
            chips: card
                .buttons
                .iter()
                .filter(|b| !b.label.trim().is_empty())
                .take(options.card_chips)
                .map(|b| b.label.clone())
                .collect(),
        },
        BlockContent::Text(text) => Preview::Text {
            title: title_or_id(&text.title, block),
            body: truncate(&text.body, options.preview_chars),
        },
        BlockContent::Button(button) => Preview::Button {
            label: if button.label.trim().is_empty() {
                options.button_placeholder.clone()
            } else {
                button.label.clone()
            },
        },
        BlockContent::Image(image) => {
            let url = image.url.trim();
            if url.is_empty() {
                Preview::Image {
                    url: None,
                    caption: options.image_placeholder.clone(),
                }
            } else {
                Preview::Image {
                    url: Some(url.to_string()),
                    caption: url.to_string(),
                }
            }
        }
        BlockContent::Spacer(_) => Preview::Spacer,
    }
}

fn title_or_id(title: &str, block: &Block) -> String {
    if title.trim().is_empty() {
        block.id.to_string()
    } else {
        title.to_string()
    }
}

/// Cut `text` to `limit` characters, marking the cut with `…`.
pub fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}
