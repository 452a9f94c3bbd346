//! Guide data model: categories and the sections pinned over the image.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A named style bucket shared by any number of sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// CSS color value used for the pin, header bar and title.
    pub color: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Category {
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            label: None,
        }
    }

    pub fn labeled(color: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            label: Some(label.into()),
        }
    }
}

/// Category lookup keyed by `categoryKey`.
///
/// Backed by a `BTreeMap` so the embedded JSON always lists keys in the same
/// order regardless of how the table was built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTable(BTreeMap<String, Category>);

impl CategoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table used when neither the caller nor the guide file supplies one.
    pub fn builtin() -> Self {
        [
            ("info", Category::labeled("#3b82f6", "Info")),
            ("tip", Category::labeled("#22c55e", "Tip")),
            ("warning", Category::labeled("#f59e0b", "Warning")),
            ("danger", Category::labeled("#ef4444", "Danger")),
            ("note", Category::labeled("#64748b", "Note")),
        ]
        .into_iter()
        .collect()
    }

    pub fn insert(&mut self, key: impl Into<String>, category: Category) -> Option<Category> {
        self.0.insert(key.into(), category)
    }

    pub fn get(&self, key: &str) -> Option<&Category> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Category)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Category)> for CategoryTable {
    fn from_iter<I: IntoIterator<Item = (K, Category)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, c)| (k.into(), c)).collect())
    }
}

/// Section identifier as produced by the editor: either a number or a string.
///
/// Editor numbers are JS doubles, so fractional and exponent forms are kept as
/// a JSON number. `1` and `1.0` are different ids, as are `1` and `"1"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionId::Number(n) => write!(f, "{}", n),
            SectionId::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<i64> for SectionId {
    fn from(n: i64) -> Self {
        SectionId::Number(n.into())
    }
}

impl From<i32> for SectionId {
    fn from(n: i32) -> Self {
        SectionId::Number(n.into())
    }
}

impl From<&str> for SectionId {
    fn from(s: &str) -> Self {
        SectionId::Text(s.to_string())
    }
}

impl From<String> for SectionId {
    fn from(s: String) -> Self {
        SectionId::Text(s)
    }
}

/// One annotation: a pin at `(x%, y%)` over the image plus its detail content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: SectionId,

    /// Horizontal position in percent of the image width, from the left edge.
    pub x: f64,

    /// Vertical position in percent of the image height, from the top edge.
    pub y: f64,

    pub category_key: String,

    /// Plain text; escaped by the viewer script before display.
    pub title: String,

    /// Trusted HTML, inserted into the content pane as-is. Callers sanitize.
    pub content: String,
}

impl Section {
    pub fn new(
        id: impl Into<SectionId>,
        x: f64,
        y: f64,
        category_key: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            category_key: category_key.into(),
            title: title.into(),
            content: content.into(),
        }
    }
}
