//! Draw instructions produced for a layout.
//!
//! A [`Scene`] is what every consumer draws from: the browser host turns
//! it into DOM nodes, the export crate into SVG.

use glam::DVec2;
use pagecraft_core::{BlockId, BlockKind};
use pagecraft_layout::Bounds;

/// Type-specific preview shown inside a block.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    /// Title, truncated body, and up to two button chips.
    Card {
        title: String,
        body: String,
        chips: Vec<String>,
    },
    Text {
        title: String,
        body: String,
    },
    /// A single centered label chip.
    Button { label: String },
    /// The image URL, or a placeholder caption when none is set.
    Image { url: Option<String>, caption: String },
    Spacer,
}

/// One block placed on the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockNode {
    pub id: BlockId,
    pub kind: BlockKind,
    /// Pixel placement on the surface.
    pub bounds: Bounds,
    pub selected: bool,
    /// Position in document order; doubles as stacking and tab order.
    pub tab_index: usize,
    pub preview: Preview,
    /// Resize handle, bottom-right corner of `bounds`.
    pub handle: Bounds,
}

/// Which part of a block a point landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    Handle,
}

/// Result of [`Scene::hit_test`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub id: BlockId,
    pub part: HitPart,
}

/// The complete set of draw instructions for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Surface width in pixels.
    pub width: f64,
    /// Surface height in pixels, never below the canvas minimum.
    pub height: f64,
    /// Blocks in document order (last is topmost).
    pub nodes: Vec<BlockNode>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            nodes: Vec::new(),
        }
    }

    pub fn push(&mut self, node: BlockNode) {
        self.nodes.push(node);
    }

    pub fn node(&self, id: &BlockId) -> Option<&BlockNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn selected(&self) -> Option<&BlockNode> {
        self.nodes.iter().find(|n| n.selected)
    }

    /// Find the topmost block at a point.
    pub fn hit_test(&self, point: DVec2) -> Option<Hit> {
        // Test in reverse order (last one is on top)
        self.nodes.iter().rev().find_map(|node| {
            let part = if node.handle.contains(point) {
                HitPart::Handle
            } else if node.bounds.contains(point) {
                HitPart::Body
            } else {
                return None;
            };
            Some(Hit {
                id: node.id.clone(),
                part,
            })
        })
    }

    /// Bounding box of all blocks, overflow included.
    pub fn content_bounds(&self) -> Bounds {
        self.nodes
            .iter()
            .map(|n| n.bounds)
            .reduce(|acc, b| acc.union(&b))
            .unwrap_or_default()
    }
}
