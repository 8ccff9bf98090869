//! The layout document and its JSON wire format.

use std::collections::HashSet;
use std::fmt;

use pagecraft_layout::{GeometryLimits, Rect};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::block::Block;
use crate::content::{BlockContent, Fields};
use crate::errors::PageError;
use crate::ids::{fresh_id, IdSource, RandomIds};
use crate::types::{BlockId, BlockKind};

/// Current schema version.
pub const LAYOUT_VERSION: u32 = 1;

/// Surface height used when a document does not carry a usable one.
pub const DEFAULT_MIN_HEIGHT: f64 = 560.0;

/// Canvas settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    /// Minimum rendered height of the editing surface, in pixels.
    pub min_height: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            min_height: DEFAULT_MIN_HEIGHT,
        }
    }
}

/// Canvas settings plus an ordered list of blocks.
///
/// Block order is stacking order and tab order.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutDocument {
    pub version: u32,
    pub canvas: Canvas,
    pub blocks: Vec<Block>,
}

impl Default for LayoutDocument {
    fn default() -> Self {
        Self {
            version: LAYOUT_VERSION,
            canvas: Canvas::default(),
            blocks: Vec::new(),
        }
    }
}

impl LayoutDocument {
    /// Load a document, degrading to the empty default on malformed input.
    pub fn load(raw: &str) -> Self {
        Self::load_with(raw, &mut RandomIds::new())
    }

    /// [`LayoutDocument::load`] with an explicit id source for repaired blocks.
    pub fn load_with(raw: &str, ids: &mut dyn IdSource) -> Self {
        let value = match serde_json::from_str::<Value>(raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(%err, "initial layout is not valid JSON, starting empty");
                return Self::default();
            }
        };
        match value {
            Value::Object(map) => Decoder::new(ids).decode(map).0,
            _ => {
                warn!("initial layout is not a JSON object, starting empty");
                Self::default()
            }
        }
    }

    /// Strict parse: the payload must be an object holding a `blocks` array.
    ///
    /// Individual blocks are still repaired the way [`LayoutDocument::load`]
    /// repairs them; use [`validate`] to see what was changed.
    pub fn parse(raw: &str) -> Result<Self, PageError> {
        validate(raw).map(|report| report.document)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    pub fn block_mut(&mut self, id: &BlockId) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| &b.id == id)
    }

    /// Lookup that reports a missing id as an error.
    pub fn try_block(&self, id: &BlockId) -> Result<&Block, PageError> {
        self.block(id).ok_or_else(|| PageError::BlockNotFound { id: id.0.clone() })
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.block(id).is_some()
    }

    pub fn first_id(&self) -> Option<&BlockId> {
        self.blocks.first().map(|b| &b.id)
    }

    /// Append a block at the top of the stacking order.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Remove a block by id. A missing id is a no-op.
    pub fn remove(&mut self, id: &BlockId) -> Option<Block> {
        let index = self.blocks.iter().position(|b| &b.id == id)?;
        Some(self.blocks.remove(index))
    }

    /// An id no block in this document uses.
    pub fn fresh_id(&self, ids: &mut dyn IdSource) -> BlockId {
        fresh_id(ids, |id| self.contains(id))
    }

    /// Wire representation.
    pub fn to_record(&self) -> DocumentRecord {
        DocumentRecord {
            version: self.version,
            canvas: CanvasRecord {
                min_height: self.canvas.min_height,
            },
            blocks: self.blocks.iter().map(BlockRecord::from_block).collect(),
        }
    }

    /// Compact JSON, as written into the persistence field.
    pub fn to_json(&self) -> Result<String, PageError> {
        Ok(serde_json::to_string(&self.to_record())?)
    }

    /// Indented JSON for tooling.
    pub fn to_json_pretty(&self) -> Result<String, PageError> {
        Ok(serde_json::to_string_pretty(&self.to_record())?)
    }
}

/// Wire form of a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub version: u32,
    pub canvas: CanvasRecord,
    pub blocks: Vec<BlockRecord>,
}

/// Wire form of the canvas settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasRecord {
    pub min_height: f64,
}

/// Wire form of a block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub content: Fields,
}

impl BlockRecord {
    fn from_block(block: &Block) -> Self {
        Self {
            id: block.id.0.clone(),
            kind: block.kind(),
            x: block.rect.x,
            y: block.rect.y,
            w: block.rect.w,
            h: block.rect.h,
            content: block.content.to_fields(),
        }
    }
}

/// Something the decoder had to repair or drop.
#[derive(Debug, Clone, PartialEq)]
pub enum Finding {
    /// `canvas` missing or not an object.
    MissingCanvas,
    /// `canvas.minHeight` missing, non-numeric or not positive.
    InvalidMinHeight,
    /// `blocks` missing or not an array (lenient load only).
    MissingBlocks,
    /// Entry at `index` is not an object.
    BlockNotObject { index: usize },
    /// Entry at `index` has a missing or unknown `type`.
    UnknownBlockType { index: usize, tag: String },
    /// Entry at `index` had no usable id; a fresh one was assigned.
    MissingId { index: usize, assigned: BlockId },
    /// Entry at `index` reused an id; a fresh one was assigned.
    DuplicateId { index: usize, id: BlockId, assigned: BlockId },
    /// A geometry value was missing and defaulted.
    MissingGeometry { id: BlockId, field: &'static str },
    /// A geometry value was outside its range and clamped.
    GeometryClamped { id: BlockId },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::MissingCanvas => write!(f, "canvas missing, using defaults"),
            Finding::InvalidMinHeight => {
                write!(f, "canvas.minHeight invalid, using {}", DEFAULT_MIN_HEIGHT)
            }
            Finding::MissingBlocks => write!(f, "blocks missing or not a list"),
            Finding::BlockNotObject { index } => write!(f, "blocks[{}] is not an object, dropped", index),
            Finding::UnknownBlockType { index, tag } => {
                write!(f, "blocks[{}] has unknown type {:?}, dropped", index, tag)
            }
            Finding::MissingId { index, assigned } => {
                write!(f, "blocks[{}] has no id, assigned {}", index, assigned)
            }
            Finding::DuplicateId { index, id, assigned } => {
                write!(f, "blocks[{}] reuses id {}, assigned {}", index, id, assigned)
            }
            Finding::MissingGeometry { id, field } => {
                write!(f, "block {} has no {}, defaulted", id, field)
            }
            Finding::GeometryClamped { id } => write!(f, "block {} geometry out of range, clamped", id),
        }
    }
}

/// Outcome of [`validate`].
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// The repaired document.
    pub document: LayoutDocument,
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    /// Whether the payload needed no repair.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Strictly parse `raw` and report every repair made along the way.
pub fn validate(raw: &str) -> Result<ValidationReport, PageError> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Object(map) = value else {
        return Err(PageError::InvalidLayout {
            reason: "expected a JSON object".into(),
        });
    };
    if !matches!(map.get("blocks"), Some(Value::Array(_))) {
        return Err(PageError::InvalidLayout {
            reason: "expected a `blocks` array".into(),
        });
    }
    let (document, findings) = Decoder::new(&mut RandomIds::new()).decode(map);
    Ok(ValidationReport { document, findings })
}

/// Geometry a loaded block falls back to when a value is missing.
const MISSING_GEOMETRY: [(&str, f64); 4] = [("x", 0.0), ("y", 0.0), ("w", 30.0), ("h", 20.0)];

struct Decoder<'a> {
    ids: &'a mut dyn IdSource,
    limits: GeometryLimits,
    findings: Vec<Finding>,
}

impl<'a> Decoder<'a> {
    fn new(ids: &'a mut dyn IdSource) -> Self {
        Self {
            ids,
            limits: GeometryLimits::default(),
            findings: Vec::new(),
        }
    }

    fn decode(mut self, mut map: Map<String, Value>) -> (LayoutDocument, Vec<Finding>) {
        let version = map
            .get("version")
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(LAYOUT_VERSION);

        let canvas = self.decode_canvas(map.get("canvas"));

        let entries = match map.remove("blocks") {
            Some(Value::Array(entries)) => entries,
            _ => {
                self.findings.push(Finding::MissingBlocks);
                Vec::new()
            }
        };

        let mut seen = HashSet::new();
        let mut blocks = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            if let Some(block) = self.decode_block(index, entry, &seen) {
                seen.insert(block.id.clone());
                blocks.push(block);
            }
        }

        for finding in &self.findings {
            debug!(%finding, "repaired layout");
        }

        let document = LayoutDocument {
            version,
            canvas,
            blocks,
        };
        (document, self.findings)
    }

    fn decode_canvas(&mut self, value: Option<&Value>) -> Canvas {
        let Some(Value::Object(canvas)) = value else {
            self.findings.push(Finding::MissingCanvas);
            return Canvas::default();
        };
        match canvas.get("minHeight").and_then(Value::as_f64) {
            Some(min_height) if min_height > 0.0 && min_height.is_finite() => Canvas { min_height },
            _ => {
                self.findings.push(Finding::InvalidMinHeight);
                Canvas::default()
            }
        }
    }

    fn decode_block(&mut self, index: usize, entry: Value, seen: &HashSet<BlockId>) -> Option<Block> {
        let Value::Object(mut map) = entry else {
            self.findings.push(Finding::BlockNotObject { index });
            return None;
        };

        let tag = map.get("type").and_then(Value::as_str).unwrap_or_default();
        let Ok(kind) = tag.parse::<BlockKind>() else {
            self.findings.push(Finding::UnknownBlockType {
                index,
                tag: tag.to_string(),
            });
            return None;
        };

        let id = match map.get("id").and_then(Value::as_str) {
            Some(id) if !id.is_empty() && !seen.contains(&BlockId::from(id)) => BlockId::from(id),
            Some(id) if !id.is_empty() => {
                let assigned = fresh_id(self.ids, |candidate| seen.contains(candidate));
                self.findings.push(Finding::DuplicateId {
                    index,
                    id: BlockId::from(id),
                    assigned: assigned.clone(),
                });
                assigned
            }
            _ => {
                let assigned = fresh_id(self.ids, |candidate| seen.contains(candidate));
                self.findings.push(Finding::MissingId {
                    index,
                    assigned: assigned.clone(),
                });
                assigned
            }
        };

        let mut values = [0.0; 4];
        for (slot, (field, fallback)) in values.iter_mut().zip(MISSING_GEOMETRY) {
            *slot = match map.get(field).and_then(Value::as_f64) {
                Some(v) if v.is_finite() => v,
                _ => {
                    self.findings.push(Finding::MissingGeometry {
                        id: id.clone(),
                        field,
                    });
                    fallback
                }
            };
        }
        let [x, y, w, h] = values;

        let content = match map.remove("content") {
            Some(Value::Object(fields)) => fields,
            _ => Fields::new(),
        };

        let mut block = Block::new(id, Rect::new(x, y, w, h), BlockContent::from_fields(kind, content));
        if block.clamp_geometry(&self.limits) {
            self.findings.push(Finding::GeometryClamped {
                id: block.id.clone(),
            });
        }
        Some(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{CardContent, Link};
    use crate::ids::SequentialIds;
    use proptest::prelude::*;

    const SCENARIO: &str = r#"{"version":1,"canvas":{"minHeight":600},"blocks":[{"id":"b1","type":"card","x":10,"y":10,"w":40,"h":20,"content":{"title":"Hi","body":"There","buttons":[{"label":"Go","url":"/go"}]}}]}"#;

    #[test]
    fn test_malformed_payload_is_default() {
        let doc = LayoutDocument::load("{not json");
        assert_eq!(doc, LayoutDocument::default());
        assert_eq!(doc.canvas.min_height, 560.0);
    }

    #[test]
    fn test_non_object_payload_is_default() {
        assert_eq!(LayoutDocument::load("[1, 2]"), LayoutDocument::default());
        assert_eq!(LayoutDocument::load(""), LayoutDocument::default());
    }

    #[test]
    fn test_default_document_json() {
        let json: Value = serde_json::from_str(&LayoutDocument::default().to_json().unwrap()).unwrap();
        insta::assert_json_snapshot!(json, @r###"
        {
          "blocks": [],
          "canvas": {
            "minHeight": 560.0
          },
          "version": 1
        }
        "###);
    }

    #[test]
    fn test_load_scenario() {
        let doc = LayoutDocument::load(SCENARIO);
        assert_eq!(doc.canvas.min_height, 600.0);
        assert_eq!(doc.len(), 1);
        let block = doc.block(&BlockId::from("b1")).unwrap();
        assert_eq!(block.rect, Rect::new(10.0, 10.0, 40.0, 20.0));
        let BlockContent::Card(card) = &block.content else {
            panic!("expected a card");
        };
        assert_eq!(card.title, "Hi");
        assert_eq!(card.buttons, vec![Link::new("Go", "/go"), Link::default()]);
    }

    #[test]
    fn test_partial_document_repaired() {
        let mut ids = SequentialIds::new();
        let doc = LayoutDocument::load_with(
            r#"{"blocks":[{"type":"text"},{"id":"a","type":"nope"},7,{"id":"a","type":"spacer","x":300}]}"#,
            &mut ids,
        );
        assert_eq!(doc.canvas, Canvas::default());
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.blocks[0].id.as_str(), "b1");
        assert_eq!(doc.blocks[0].rect, Rect::new(0.0, 0.0, 30.0, 20.0));
        assert_eq!(doc.blocks[1].id.as_str(), "a");
        assert_eq!(doc.blocks[1].rect.x, 95.0);
    }

    #[test]
    fn test_blocks_not_a_list() {
        let doc = LayoutDocument::load(r#"{"canvas":{"minHeight":0},"blocks":{}}"#);
        assert!(doc.is_empty());
        assert_eq!(doc.canvas.min_height, DEFAULT_MIN_HEIGHT);
    }

    #[test]
    fn test_duplicate_ids_reassigned() {
        let mut ids = SequentialIds::new();
        let doc = LayoutDocument::load_with(
            r#"{"blocks":[{"id":"b1","type":"text"},{"id":"b1","type":"text"}]}"#,
            &mut ids,
        );
        assert_eq!(doc.blocks[0].id.as_str(), "b1");
        assert_eq!(doc.blocks[1].id.as_str(), "b2");
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut doc = LayoutDocument::load(SCENARIO);
        assert!(doc.remove(&BlockId::from("zzz")).is_none());
        assert_eq!(doc.len(), 1);
        assert!(doc.remove(&BlockId::from("b1")).is_some());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_try_block() {
        let doc = LayoutDocument::default();
        let err = doc.try_block(&BlockId::from("b9")).unwrap_err();
        assert_eq!(err.to_string(), "Block not found: b9");
    }

    #[test]
    fn test_strict_parse_requires_blocks() {
        assert!(matches!(
            LayoutDocument::parse(r#"{"version":1}"#),
            Err(PageError::InvalidLayout { .. })
        ));
        assert!(matches!(LayoutDocument::parse("{not json"), Err(PageError::Json(_))));
        assert!(matches!(LayoutDocument::parse("[]"), Err(PageError::InvalidLayout { .. })));
        assert!(LayoutDocument::parse(r#"{"blocks":[]}"#).is_ok());
    }

    #[test]
    fn test_validate_reports_findings() {
        let report = validate(r#"{"canvas":{"minHeight":600},"blocks":[{"id":"a","type":"image","x":0,"y":0,"w":1,"h":10}]}"#)
            .unwrap();
        assert_eq!(
            report.findings,
            vec![Finding::GeometryClamped {
                id: BlockId::from("a")
            }]
        );
        assert!(!report.is_clean());

        let report = validate(SCENARIO).unwrap();
        assert!(report.is_clean());
    }

    #[test]
    fn test_href_written_back_as_url() {
        let doc = LayoutDocument::load(
            r#"{"canvas":{"minHeight":560},"blocks":[{"id":"c","type":"card","x":0,"y":0,"w":40,"h":20,"content":{"buttons":[{"label":"A","href":"/a"}]}}]}"#,
        );
        let json = doc.to_json().unwrap();
        assert!(json.contains(r#""url":"/a""#));
        assert!(!json.contains("href"));
    }

    fn arb_text() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 /]{0,12}"
    }

    fn arb_block(index: usize) -> impl Strategy<Value = Block> {
        let geometry = (0.0f64..=95.0, 0.0f64..=95.0, 5.0f64..=100.0, 6.0f64..=100.0);
        let kind = prop::sample::select(BlockKind::ALL.to_vec());
        (geometry, kind, arb_text(), arb_text(), prop::collection::vec((arb_text(), arb_text()), 0..4))
            .prop_map(move |((x, y, w, h), kind, title, body, links)| {
                let card = BlockContent::Card(CardContent {
                    title,
                    body,
                    buttons: links.into_iter().map(|(l, u)| Link::new(l, u)).collect(),
                    note: None,
                    extra: Fields::new(),
                });
                let mut content = card.retype(kind);
                if let BlockContent::Card(card) = &mut content {
                    card.pad_buttons(crate::content::BUTTON_SLOTS);
                }
                Block::new(BlockId(format!("b{}", index)), Rect::new(x, y, w, h), content)
            })
    }

    fn arb_document() -> impl Strategy<Value = LayoutDocument> {
        (1.0f64..2000.0, 0usize..6).prop_flat_map(|(min_height, count)| {
            let blocks: Vec<_> = (0..count).map(arb_block).collect();
            blocks.prop_map(move |blocks| LayoutDocument {
                version: LAYOUT_VERSION,
                canvas: Canvas { min_height },
                blocks,
            })
        })
    }

    proptest! {
        #[test]
        fn serialize_then_load_is_identity(doc in arb_document()) {
            let json = doc.to_json().unwrap();
            prop_assert_eq!(LayoutDocument::load(&json), doc);
        }
    }
}
