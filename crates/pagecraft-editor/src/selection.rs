//! Selection state.

use pagecraft_core::BlockId;

/// Which block the inspector and gestures target.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Selected(BlockId),
}

impl Selection {
    /// Select `id` if given, otherwise nothing.
    pub fn from_id(id: Option<BlockId>) -> Self {
        id.map_or(Selection::None, Selection::Selected)
    }

    pub fn id(&self) -> Option<&BlockId> {
        match self {
            Selection::None => None,
            Selection::Selected(id) => Some(id),
        }
    }

    pub fn is_selected(&self, id: &BlockId) -> bool {
        self.id() == Some(id)
    }
}
