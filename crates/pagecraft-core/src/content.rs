//! Type-specific block content.
//!
//! Each block kind has its own content record. Keys a record does not
//! know are kept in `extra`, so retyping a block (card -> text -> card)
//! never loses what was typed into fields the intermediate kind hides.

use serde_json::{Map, Value};

use crate::types::BlockKind;

/// Raw `content` object as it appears on the wire.
pub type Fields = Map<String, Value>;

/// Number of button slots the inspector exposes on a card.
pub const BUTTON_SLOTS: usize = 2;

/// A labelled link (card button).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl Link {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }

    /// Read a link object, accepting `href` as an alias of `url`.
    fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        let url = map
            .get("url")
            .or_else(|| map.get("href"))
            .map(text_of)
            .unwrap_or_default();
        Some(Self {
            label: map.get("label").map(text_of).unwrap_or_default(),
            url,
        })
    }

    fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("label".into(), Value::String(self.label.clone()));
        map.insert("url".into(), Value::String(self.url.clone()));
        Value::Object(map)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CardContent {
    pub title: String,
    pub body: String,
    pub buttons: Vec<Link>,
    pub note: Option<String>,
    pub extra: Fields,
}

impl CardContent {
    /// Grow `buttons` to at least `slots` entries. Never truncates.
    pub fn pad_buttons(&mut self, slots: usize) {
        while self.buttons.len() < slots {
            self.buttons.push(Link::default());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextContent {
    pub title: String,
    pub body: String,
    pub extra: Fields,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ButtonContent {
    pub label: String,
    pub url: String,
    pub extra: Fields,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageContent {
    pub url: String,
    pub extra: Fields,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpacerContent {
    pub extra: Fields,
}

/// Content of a block, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockContent {
    Card(CardContent),
    Text(TextContent),
    Button(ButtonContent),
    Image(ImageContent),
    Spacer(SpacerContent),
}

impl BlockContent {
    pub fn kind(&self) -> BlockKind {
        match self {
            BlockContent::Card(_) => BlockKind::Card,
            BlockContent::Text(_) => BlockKind::Text,
            BlockContent::Button(_) => BlockKind::Button,
            BlockContent::Image(_) => BlockKind::Image,
            BlockContent::Spacer(_) => BlockKind::Spacer,
        }
    }

    /// Content a freshly added block of `kind` starts with.
    pub fn starter(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Card => BlockContent::Card(CardContent {
                title: "New card".into(),
                body: "Edit me in the panel.".into(),
                buttons: vec![Link::new("Learn more", "/"), Link::default()],
                note: None,
                extra: Fields::new(),
            }),
            BlockKind::Text => BlockContent::Text(TextContent {
                title: "New text".into(),
                body: "Edit me in the panel.".into(),
                extra: Fields::new(),
            }),
            BlockKind::Button => BlockContent::Button(ButtonContent {
                label: "Learn more".into(),
                url: "/".into(),
                extra: Fields::new(),
            }),
            BlockKind::Image => BlockContent::Image(ImageContent::default()),
            BlockKind::Spacer => BlockContent::Spacer(SpacerContent::default()),
        }
    }

    /// Build typed content of `kind` from a raw object.
    ///
    /// Keys the kind understands are consumed, everything else lands in
    /// `extra`. Card buttons are padded to [`BUTTON_SLOTS`].
    pub fn from_fields(kind: BlockKind, mut fields: Fields) -> Self {
        match kind {
            BlockKind::Card => {
                let title = take_text(&mut fields, "title");
                let body = take_text(&mut fields, "body");
                let buttons = match fields.remove("buttons") {
                    Some(Value::Array(items)) => items.iter().filter_map(Link::from_value).collect(),
                    Some(other) => {
                        // Not a list: keep it around rather than guess.
                        fields.insert("buttons".into(), other);
                        Vec::new()
                    }
                    None => Vec::new(),
                };
                let note = match fields.remove("note") {
                    None | Some(Value::Null) => None,
                    Some(value) => Some(text_of(&value)),
                };
                let mut card = CardContent {
                    title,
                    body,
                    buttons,
                    note,
                    extra: fields,
                };
                card.pad_buttons(BUTTON_SLOTS);
                BlockContent::Card(card)
            }
            BlockKind::Text => BlockContent::Text(TextContent {
                title: take_text(&mut fields, "title"),
                body: take_text(&mut fields, "body"),
                extra: fields,
            }),
            BlockKind::Button => BlockContent::Button(ButtonContent {
                label: take_text(&mut fields, "label"),
                url: take_text(&mut fields, "url"),
                extra: fields,
            }),
            BlockKind::Image => BlockContent::Image(ImageContent {
                url: take_text(&mut fields, "url"),
                extra: fields,
            }),
            BlockKind::Spacer => BlockContent::Spacer(SpacerContent { extra: fields }),
        }
    }

    /// Flatten back into a raw object (typed keys plus `extra`).
    pub fn to_fields(&self) -> Fields {
        let mut fields = self.extra().clone();
        match self {
            BlockContent::Card(card) => {
                fields.insert("title".into(), Value::String(card.title.clone()));
                fields.insert("body".into(), Value::String(card.body.clone()));
                fields.insert(
                    "buttons".into(),
                    Value::Array(card.buttons.iter().map(Link::to_value).collect()),
                );
                if let Some(note) = &card.note {
                    fields.insert("note".into(), Value::String(note.clone()));
                }
            }
            BlockContent::Text(text) => {
                fields.insert("title".into(), Value::String(text.title.clone()));
                fields.insert("body".into(), Value::String(text.body.clone()));
            }
            BlockContent::Button(button) => {
                fields.insert("label".into(), Value::String(button.label.clone()));
                fields.insert("url".into(), Value::String(button.url.clone()));
            }
            BlockContent::Image(image) => {
                fields.insert("url".into(), Value::String(image.url.clone()));
            }
            BlockContent::Spacer(_) => {}
        }
        fields
    }

    /// Switch to another kind, carrying every stored field along.
    ///
    /// A button block's label and url are the same pair of fields as a
    /// card's first button, so switching between the two copies them over.
    pub fn retype(&self, kind: BlockKind) -> Self {
        if kind == self.kind() {
            return self.clone();
        }
        let mut next = BlockContent::from_fields(kind, self.to_fields());
        match (self, &mut next) {
            (BlockContent::Card(card), BlockContent::Button(button)) => {
                if let Some(first) = card.buttons.first() {
                    button.label = first.label.clone();
                    button.url = first.url.clone();
                }
            }
            (BlockContent::Button(button), BlockContent::Card(card)) => {
                card.extra.remove("label");
                card.extra.remove("url");
                card.pad_buttons(1);
                card.buttons[0] = Link::new(button.label.clone(), button.url.clone());
            }
            _ => {}
        }
        next
    }

    /// Keys this content does not interpret.
    pub fn extra(&self) -> &Fields {
        match self {
            BlockContent::Card(c) => &c.extra,
            BlockContent::Text(c) => &c.extra,
            BlockContent::Button(c) => &c.extra,
            BlockContent::Image(c) => &c.extra,
            BlockContent::Spacer(c) => &c.extra,
        }
    }
}

/// Render a scalar as text; `null` is empty.
fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn take_text(fields: &mut Fields, key: &str) -> String {
    fields.remove(key).as_ref().map(text_of).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_card_accepts_href_alias() {
        let content = BlockContent::from_fields(
            BlockKind::Card,
            fields(json!({"title": "T", "buttons": [{"label": "Go", "href": "/go"}]})),
        );
        let BlockContent::Card(card) = content else {
            panic!("expected a card");
        };
        assert_eq!(card.buttons[0], Link::new("Go", "/go"));
        assert_eq!(card.buttons.len(), BUTTON_SLOTS);
    }

    #[test]
    fn test_card_buttons_not_truncated() {
        let content = BlockContent::from_fields(
            BlockKind::Card,
            fields(json!({"buttons": [
                {"label": "a", "url": "/a"},
                {"label": "b", "url": "/b"},
                {"label": "c", "url": "/c"}
            ]})),
        );
        let BlockContent::Card(card) = content else {
            panic!("expected a card");
        };
        assert_eq!(card.buttons.len(), 3);
    }

    #[test]
    fn test_retype_preserves_storage() {
        let card = BlockContent::from_fields(
            BlockKind::Card,
            fields(json!({"title": "Hi", "body": "There", "buttons": [{"label": "Go", "url": "/go"}], "note": "n"})),
        );
        let text = card.retype(BlockKind::Text);
        let BlockContent::Text(ref inner) = text else {
            panic!("expected text");
        };
        assert_eq!(inner.title, "Hi");
        assert!(inner.extra.contains_key("buttons"));
        assert!(inner.extra.contains_key("note"));

        let back = text.retype(BlockKind::Card);
        assert_eq!(back, card);
    }

    #[test]
    fn test_card_to_button_takes_first_button() {
        let card = BlockContent::starter(BlockKind::Card);
        let button = card.retype(BlockKind::Button);
        let BlockContent::Button(ref inner) = button else {
            panic!("expected a button");
        };
        assert_eq!(inner.label, "Learn more");
        assert_eq!(inner.url, "/");

        // The second card button rides along in storage.
        let back = button.retype(BlockKind::Card);
        assert_eq!(back, card);
    }

    #[test]
    fn test_button_to_card_fills_first_button() {
        let button = BlockContent::from_fields(
            BlockKind::Button,
            fields(json!({"label": "Buy", "url": "/shop"})),
        );
        let BlockContent::Card(card) = button.retype(BlockKind::Card) else {
            panic!("expected a card");
        };
        assert_eq!(card.buttons[0], Link::new("Buy", "/shop"));
        assert_eq!(card.buttons.len(), BUTTON_SLOTS);
        assert!(!card.extra.contains_key("label"));
        assert!(!card.extra.contains_key("url"));
    }

    #[test]
    fn test_spacer_keeps_unknown_keys() {
        let spacer = BlockContent::from_fields(BlockKind::Spacer, fields(json!({"title": "kept"})));
        assert_eq!(spacer.to_fields(), fields(json!({"title": "kept"})));
    }

    #[test]
    fn test_note_null_is_absent() {
        let content = BlockContent::from_fields(BlockKind::Card, fields(json!({"note": null})));
        assert!(!content.to_fields().contains_key("note"));
    }

    #[test]
    fn test_non_string_scalars_become_text() {
        let content = BlockContent::from_fields(BlockKind::Text, fields(json!({"title": 42})));
        let BlockContent::Text(text) = content else {
            panic!("expected text");
        };
        assert_eq!(text.title, "42");
    }
}
