//! Inspector form model.
//!
//! The inspector shows one form bound to the selected block. Reading it
//! ([`inspect`]) yields display strings for every field; writing it
//! ([`apply`]) edits the block in place. There is no pending state: every
//! accepted edit is already part of the document.

use std::fmt;
use std::str::FromStr;

use glam::DVec2;
use pagecraft_core::{Block, BlockContent, BlockId, BlockKind};
use pagecraft_layout::GeometryLimits;

/// One editable inspector field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Kind,
    Title,
    Body,
    Note,
    /// Label of the card button in the given zero-based slot.
    ButtonLabel(usize),
    /// URL of the card button in the given zero-based slot.
    ButtonUrl(usize),
    ImageUrl,
    X,
    Y,
    W,
    H,
}

impl Field {
    /// Every field, in form order, for `slots` button slots.
    pub fn all(slots: usize) -> Vec<Field> {
        let mut fields = vec![Field::Kind, Field::Title, Field::Body, Field::Note];
        for slot in 0..slots {
            fields.push(Field::ButtonLabel(slot));
            fields.push(Field::ButtonUrl(slot));
        }
        fields.extend([Field::ImageUrl, Field::X, Field::Y, Field::W, Field::H]);
        fields
    }

    /// Stable form key, e.g. `title` or `button1Url`.
    pub fn key(&self) -> String {
        match self {
            Field::Kind => "kind".into(),
            Field::Title => "title".into(),
            Field::Body => "body".into(),
            Field::Note => "note".into(),
            Field::ButtonLabel(slot) => format!("button{}Label", slot + 1),
            Field::ButtonUrl(slot) => format!("button{}Url", slot + 1),
            Field::ImageUrl => "imageUrl".into(),
            Field::X => "x".into(),
            Field::Y => "y".into(),
            Field::W => "w".into(),
            Field::H => "h".into(),
        }
    }

    pub fn is_geometry(&self) -> bool {
        matches!(self, Field::X | Field::Y | Field::W | Field::H)
    }

    /// Whether the field means anything for a block of `kind`.
    pub fn applies_to(&self, kind: BlockKind) -> bool {
        match self {
            Field::Kind | Field::X | Field::Y | Field::W | Field::H => true,
            Field::Title | Field::Body => matches!(kind, BlockKind::Card | BlockKind::Text),
            Field::Note => kind == BlockKind::Card,
            Field::ButtonLabel(slot) | Field::ButtonUrl(slot) => {
                kind == BlockKind::Card || (kind == BlockKind::Button && *slot == 0)
            }
            Field::ImageUrl => kind == BlockKind::Image,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Error for a form key that names no field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown inspector field: {}", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s {
            "kind" => Field::Kind,
            "title" => Field::Title,
            "body" => Field::Body,
            "note" => Field::Note,
            "imageUrl" => Field::ImageUrl,
            "x" => Field::X,
            "y" => Field::Y,
            "w" => Field::W,
            "h" => Field::H,
            other => return button_field(other).ok_or_else(|| UnknownField(other.to_string())),
        };
        Ok(field)
    }
}

fn button_field(key: &str) -> Option<Field> {
    let rest = key.strip_prefix("button")?;
    let (number, make): (&str, fn(usize) -> Field) = if let Some(n) = rest.strip_suffix("Label") {
        (n, Field::ButtonLabel)
    } else if let Some(n) = rest.strip_suffix("Url") {
        (n, Field::ButtonUrl)
    } else {
        return None;
    };
    let slot: usize = number.parse().ok()?;
    slot.checked_sub(1).map(make)
}

/// Display state of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    pub field: Field,
    pub value: String,
    /// False for fields that do not apply to the block's kind.
    pub visible: bool,
}

/// What the inspector panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectorState {
    /// Nothing selected: every field disabled and cleared, adding offered.
    Empty,
    Bound {
        block_id: BlockId,
        kind: BlockKind,
        values: Vec<FieldValue>,
    },
}

impl InspectorState {
    pub fn is_bound(&self) -> bool {
        matches!(self, InspectorState::Bound { .. })
    }

    pub fn block_id(&self) -> Option<&BlockId> {
        match self {
            InspectorState::Empty => None,
            InspectorState::Bound { block_id, .. } => Some(block_id),
        }
    }

    /// Current display value of `field`, if bound.
    pub fn value(&self, field: Field) -> Option<&str> {
        match self {
            InspectorState::Empty => None,
            InspectorState::Bound { values, .. } => values
                .iter()
                .find(|v| v.field == field)
                .map(|v| v.value.as_str()),
        }
    }

    pub fn is_visible(&self, field: Field) -> bool {
        match self {
            InspectorState::Empty => false,
            InspectorState::Bound { values, .. } => {
                values.iter().any(|v| v.field == field && v.visible)
            }
        }
    }
}

/// Populate the form from `block`.
pub fn inspect(block: &Block, slots: usize) -> InspectorState {
    let kind = block.kind();
    let values = Field::all(slots)
        .into_iter()
        .map(|field| FieldValue {
            field,
            value: read(block, field),
            visible: field.applies_to(kind),
        })
        .collect();
    InspectorState::Bound {
        block_id: block.id.clone(),
        kind,
        values,
    }
}

fn read(block: &Block, field: Field) -> String {
    let rect = &block.rect;
    match (field, &block.content) {
        (Field::Kind, _) => block.kind().as_str().to_string(),
        (Field::X, _) => display_number(rect.x),
        (Field::Y, _) => display_number(rect.y),
        (Field::W, _) => display_number(rect.w),
        (Field::H, _) => display_number(rect.h),
        (Field::Title, BlockContent::Card(c)) => c.title.clone(),
        (Field::Title, BlockContent::Text(c)) => c.title.clone(),
        (Field::Body, BlockContent::Card(c)) => c.body.clone(),
        (Field::Body, BlockContent::Text(c)) => c.body.clone(),
        (Field::Note, BlockContent::Card(c)) => c.note.clone().unwrap_or_default(),
        (Field::ButtonLabel(slot), BlockContent::Card(c)) => {
            c.buttons.get(slot).map(|b| b.label.clone()).unwrap_or_default()
        }
        (Field::ButtonUrl(slot), BlockContent::Card(c)) => {
            c.buttons.get(slot).map(|b| b.url.clone()).unwrap_or_default()
        }
        (Field::ButtonLabel(0), BlockContent::Button(c)) => c.label.clone(),
        (Field::ButtonUrl(0), BlockContent::Button(c)) => c.url.clone(),
        (Field::ImageUrl, BlockContent::Image(c)) => c.url.clone(),
        _ => String::new(),
    }
}

/// Geometry is shown rounded to whole percents.
fn display_number(value: f64) -> String {
    format!("{}", value.round() as i64)
}

/// Write `raw` into `field` of `block`.
///
/// Returns whether the edit was accepted. Unparsable numbers, unknown
/// kinds and fields that do not apply to the block's kind are ignored.
pub fn apply(block: &mut Block, field: Field, raw: &str, limits: &GeometryLimits) -> bool {
    if field.is_geometry() {
        return apply_geometry(block, field, raw, limits);
    }
    if field == Field::Kind {
        return match raw.trim().parse::<BlockKind>() {
            Ok(kind) => {
                block.set_kind(kind);
                true
            }
            Err(_) => false,
        };
    }

    let text = raw.to_string();
    match (field, &mut block.content) {
        (Field::Title, BlockContent::Card(c)) => c.title = text,
        (Field::Title, BlockContent::Text(c)) => c.title = text,
        (Field::Body, BlockContent::Card(c)) => c.body = text,
        (Field::Body, BlockContent::Text(c)) => c.body = text,
        (Field::Note, BlockContent::Card(c)) => {
            c.note = if text.trim().is_empty() { None } else { Some(text) };
        }
        (Field::ButtonLabel(slot), BlockContent::Card(c)) => {
            c.pad_buttons(slot + 1);
            c.buttons[slot].label = text;
        }
        (Field::ButtonUrl(slot), BlockContent::Card(c)) => {
            c.pad_buttons(slot + 1);
            c.buttons[slot].url = text;
        }
        (Field::ButtonLabel(0), BlockContent::Button(c)) => c.label = text,
        (Field::ButtonUrl(0), BlockContent::Button(c)) => c.url = text,
        (Field::ImageUrl, BlockContent::Image(c)) => c.url = text,
        _ => return false,
    }
    true
}

fn apply_geometry(block: &mut Block, field: Field, raw: &str, limits: &GeometryLimits) -> bool {
    let value = match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => return false,
    };
    let rect = block.rect;
    block.rect = match field {
        Field::X => rect.with_origin(DVec2::new(value, rect.y), limits),
        Field::Y => rect.with_origin(DVec2::new(rect.x, value), limits),
        Field::W => rect.with_size(DVec2::new(value, rect.h), limits),
        Field::H => rect.with_size(DVec2::new(rect.w, value), limits),
        _ => return false,
    };
    true
}
