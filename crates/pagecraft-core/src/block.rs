//! Positioned content blocks.

use pagecraft_layout::{GeometryLimits, Rect};

use crate::content::BlockContent;
use crate::types::{BlockId, BlockKind};

/// One positioned content unit of a layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: BlockId,
    /// Placement in percent of the surface.
    pub rect: Rect,
    pub content: BlockContent,
}

impl Block {
    pub fn new(id: BlockId, rect: Rect, content: BlockContent) -> Self {
        Self { id, rect, content }
    }

    /// A block of `kind` with its creation defaults.
    pub fn starter(id: BlockId, kind: BlockKind) -> Self {
        Self::new(id, starter_rect(kind), BlockContent::starter(kind))
    }

    pub fn kind(&self) -> BlockKind {
        self.content.kind()
    }

    /// Switch kind, keeping every stored content field.
    pub fn set_kind(&mut self, kind: BlockKind) {
        self.content = self.content.retype(kind);
    }

    /// Clamp geometry into `limits`. Returns whether anything changed.
    pub fn clamp_geometry(&mut self, limits: &GeometryLimits) -> bool {
        let clamped = self.rect.clamped(limits);
        let changed = clamped != self.rect;
        self.rect = clamped;
        changed
    }
}

/// Placement a newly added block of `kind` starts at.
pub fn starter_rect(kind: BlockKind) -> Rect {
    match kind {
        BlockKind::Card => Rect::new(5.0, 5.0, 40.0, 22.0),
        BlockKind::Text => Rect::new(5.0, 5.0, 50.0, 14.0),
        BlockKind::Button => Rect::new(5.0, 5.0, 18.0, 8.0),
        BlockKind::Image => Rect::new(5.0, 5.0, 30.0, 25.0),
        BlockKind::Spacer => Rect::new(5.0, 5.0, 90.0, 6.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_rects_within_limits() {
        let limits = GeometryLimits::default();
        for kind in BlockKind::ALL {
            assert!(starter_rect(kind).is_within(&limits), "{kind} starts out of range");
        }
    }

    #[test]
    fn test_set_kind() {
        let mut block = Block::starter(BlockId::from("b1"), BlockKind::Card);
        block.set_kind(BlockKind::Spacer);
        assert_eq!(block.kind(), BlockKind::Spacer);
        block.set_kind(BlockKind::Card);
        assert_eq!(block.content, BlockContent::starter(BlockKind::Card));
    }

    #[test]
    fn test_clamp_geometry_reports_change() {
        let mut block = Block::starter(BlockId::from("b1"), BlockKind::Text);
        assert!(!block.clamp_geometry(&GeometryLimits::default()));
        block.rect.x = 150.0;
        assert!(block.clamp_geometry(&GeometryLimits::default()));
        assert_eq!(block.rect.x, 95.0);
    }
}
