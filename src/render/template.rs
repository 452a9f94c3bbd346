//! Slot-based page template.
//!
//! The page is a fixed string with `__NAME__` markers. It is split once into
//! literal pieces and slots; filling walks the pieces and writes each bound
//! value through the escaping rule of its slot. Values are never rescanned,
//! so a title that happens to contain `__GUIDE_DATA__` stays text.

use super::escape;
use crate::{Error, Result};

use std::borrow::Cow;
use std::collections::BTreeMap;

/// How a value is made safe at its insertion point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    /// Element text content.
    Text,
    /// Double-quoted attribute value.
    Attribute,
    /// Serialized JSON inside a `<script>` element.
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Slot {
    Lang,
    Title,
    ImageSrc,
    ImageAlt,
    Placeholder,
    GuideData,
}

impl Slot {
    pub const ALL: [Slot; 6] = [
        Slot::Lang,
        Slot::Title,
        Slot::ImageSrc,
        Slot::ImageAlt,
        Slot::Placeholder,
        Slot::GuideData,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Slot::Lang => "LANG",
            Slot::Title => "TITLE",
            Slot::ImageSrc => "IMAGE_SRC",
            Slot::ImageAlt => "IMAGE_ALT",
            Slot::Placeholder => "PLACEHOLDER",
            Slot::GuideData => "GUIDE_DATA",
        }
    }

    pub fn context(self) -> Context {
        match self {
            Slot::Lang | Slot::ImageSrc | Slot::ImageAlt => Context::Attribute,
            Slot::Title | Slot::Placeholder => Context::Text,
            Slot::GuideData => Context::Script,
        }
    }

    fn from_name(name: &str) -> Option<Slot> {
        Slot::ALL.into_iter().find(|s| s.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(&'static str),
    Slot(Slot),
}

/// A compiled template.
#[derive(Debug, Clone)]
pub struct Template {
    pieces: Vec<Piece>,
}

impl Template {
    /// Split `source` at every `__NAME__` marker naming a known [`Slot`].
    /// Unknown markers stay literal text.
    pub fn compile(source: &'static str) -> Self {
        let mut pieces = Vec::new();
        let mut literal_start = 0;
        let mut cursor = 0;

        while let Some(open) = source[cursor..].find("__") {
            let open = cursor + open;
            let name_start = open + 2;
            let Some(close) = source[name_start..].find("__") else {
                break;
            };
            let close = name_start + close;

            match Slot::from_name(&source[name_start..close]) {
                Some(slot) => {
                    if literal_start < open {
                        pieces.push(Piece::Literal(&source[literal_start..open]));
                    }
                    pieces.push(Piece::Slot(slot));
                    cursor = close + 2;
                    literal_start = cursor;
                }
                // Not a marker; the real one may start one underscore later.
                None => cursor = open + 1,
            }
        }

        if literal_start < source.len() {
            pieces.push(Piece::Literal(&source[literal_start..]));
        }

        Self { pieces }
    }

    /// Slots in template order, repeats included.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.pieces.iter().filter_map(|p| match p {
            Piece::Slot(s) => Some(*s),
            Piece::Literal(_) => None,
        })
    }

    pub fn fill(&self, bindings: &Bindings<'_>) -> Result<String> {
        let mut out = String::with_capacity(self.literal_len() + bindings.value_len());
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Slot(slot) => {
                    let raw = bindings
                        .get(*slot)
                        .ok_or_else(|| Error::UnboundSlot(slot.name()))?;
                    out.push_str(&escape_for(slot.context(), raw));
                }
            }
        }
        Ok(out)
    }

    fn literal_len(&self) -> usize {
        self.pieces
            .iter()
            .map(|p| match p {
                Piece::Literal(text) => text.len(),
                Piece::Slot(_) => 0,
            })
            .sum()
    }
}

fn escape_for(context: Context, raw: &str) -> Cow<'_, str> {
    match context {
        Context::Text => escape::html_text(raw),
        Context::Attribute => escape::html_attribute(raw),
        Context::Script => escape::script_json(raw),
    }
}

/// Raw (unescaped) values for the slots of one fill.
#[derive(Debug, Default)]
pub struct Bindings<'a> {
    values: BTreeMap<Slot, &'a str>,
}

impl<'a> Bindings<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(mut self, slot: Slot, value: &'a str) -> Self {
        self.values.insert(slot, value);
        self
    }

    pub fn get(&self, slot: Slot) -> Option<&'a str> {
        self.values.get(&slot).copied()
    }

    fn value_len(&self) -> usize {
        self.values.values().map(|v| v.len()).sum()
    }
}
