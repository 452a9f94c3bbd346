//! Guide input files and the checks run before rendering.
//!
//! A guide file is the JSON the editor saves:
//!
//! ```json
//! {
//!   "title": "Kitchen tour",
//!   "image": "kitchen.png",
//!   "categories": { "tip": { "color": "#22c55e", "label": "Tip" } },
//!   "sections": [
//!     { "id": 1, "x": 40.5, "y": 12, "categoryKey": "tip",
//!       "title": "Spices", "content": "<p>Top shelf.</p>" }
//!   ]
//! }
//! ```
//!
//! `categories` is optional. The renderer itself never looks at referential
//! integrity, so [`GuideFile::validate_and_build`] is where a bad
//! `categoryKey` gets caught.

use crate::model::{CategoryTable, Section, SectionId};
use crate::render::extract::ExtractedGuide;
use crate::{Error, Result};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideFile {
    pub title: String,
    pub image: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<CategoryTable>,

    #[serde(default)]
    pub sections: Vec<Section>,
}

/// A guide whose sections all resolve against `categories`.
#[derive(Debug, Clone)]
pub struct ValidatedGuide {
    pub title: String,
    pub image: String,
    pub categories: CategoryTable,
    pub sections: Vec<Section>,

    /// Problems that do not stop rendering (off-image pins, empty titles).
    pub warnings: Vec<String>,
}

// Characters that would end the inline `style` declarations colors land in.
const COLOR_FORBIDDEN: &[char] = &['"', '\'', '<', '>', ';', '{', '}'];

impl GuideFile {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the guide against `categories` and build the render input.
    ///
    /// Errors: unknown category key, duplicate section id, non-finite
    /// coordinate, or a category color that could escape its style attribute.
    /// Everything else is reported through `warnings`.
    pub fn validate_and_build(self, categories: &CategoryTable) -> Result<ValidatedGuide> {
        let mut warnings = Vec::new();

        for (key, category) in categories.iter() {
            if category.color.trim().is_empty() || category.color.contains(COLOR_FORBIDDEN) {
                return Err(Error::InvalidColor {
                    key: key.clone(),
                    color: category.color.clone(),
                });
            }
        }

        if self.title.trim().is_empty() {
            warnings.push("guide title is empty".to_string());
        }

        let mut seen: HashSet<&SectionId> = HashSet::new();
        for (index, section) in self.sections.iter().enumerate() {
            let label = index + 1;

            if !seen.insert(&section.id) {
                return Err(Error::DuplicateSectionId(section.id.to_string()));
            }

            if !categories.contains_key(&section.category_key) {
                return Err(Error::UnknownCategory {
                    section: section.id.to_string(),
                    key: section.category_key.clone(),
                });
            }

            for (axis, value) in [('x', section.x), ('y', section.y)] {
                if !value.is_finite() {
                    return Err(Error::NonFiniteCoordinate {
                        section: section.id.to_string(),
                        axis,
                        value,
                    });
                }
                if !(0.0..=100.0).contains(&value) {
                    warnings.push(format!(
                        "pin {} (section {}): {} = {} lies outside the image",
                        label, section.id, axis, value
                    ));
                }
            }

            if section.title.trim().is_empty() {
                warnings.push(format!("pin {} (section {}) has no title", label, section.id));
            }
        }

        Ok(ValidatedGuide {
            title: self.title,
            image: self.image,
            categories: categories.clone(),
            sections: self.sections,
            warnings,
        })
    }
}

impl From<ExtractedGuide> for GuideFile {
    fn from(guide: ExtractedGuide) -> Self {
        Self {
            title: guide.title,
            image: guide.image,
            categories: Some(guide.categories),
            sections: guide.sections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    fn table() -> CategoryTable {
        [("a", Category::new("#ff0000")), ("b", Category::new("blue"))]
            .into_iter()
            .collect()
    }

    fn guide(sections: Vec<Section>) -> GuideFile {
        GuideFile {
            title: "Guide".into(),
            image: "img.png".into(),
            categories: None,
            sections,
        }
    }

    #[test]
    fn parses_editor_json() {
        let g = GuideFile::from_json(
            r#"{"title":"T","image":"data:image/png;base64,AA==",
                "sections":[{"id":"s1","x":1,"y":2.5,"categoryKey":"a","title":"One","content":""}]}"#,
        )
        .unwrap();
        assert!(g.categories.is_none());
        assert_eq!(g.sections[0].id, SectionId::Text("s1".into()));
        assert_eq!(g.sections[0].y, 2.5);
    }

    #[test]
    fn loads_fractional_and_large_numeric_ids() {
        let g = GuideFile::from_json(
            r#"{"title":"T","image":"a.png","sections":[
                {"id":1.5,"x":1,"y":1,"categoryKey":"a","title":"A","content":""},
                {"id":1e3,"x":2,"y":2,"categoryKey":"a","title":"B","content":""},
                {"id":18446744073709551615,"x":3,"y":3,"categoryKey":"b","title":"C","content":""}]}"#,
        )
        .unwrap();
        assert_eq!(g.sections[0].id.to_string(), "1.5");
        assert_eq!(g.sections[2].id.to_string(), "18446744073709551615");

        let v = g.validate_and_build(&table()).unwrap();
        assert_eq!(v.sections.len(), 3);
    }

    #[test]
    fn valid_guide_has_no_warnings() {
        let v = guide(vec![
            Section::new(1, 10.0, 20.0, "a", "One", "<p>1</p>"),
            Section::new(2, 0.0, 100.0, "b", "Two", ""),
        ])
        .validate_and_build(&table())
        .unwrap();
        assert!(v.warnings.is_empty());
        assert_eq!(v.sections.len(), 2);
    }

    #[test]
    fn unknown_category_is_rejected() {
        let err = guide(vec![Section::new(3, 1.0, 1.0, "zzz", "T", "")])
            .validate_and_build(&table())
            .unwrap_err();
        match err {
            Error::UnknownCategory { section, key } => {
                assert_eq!(section, "3");
                assert_eq!(key, "zzz");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = guide(vec![
            Section::new("x", 1.0, 1.0, "a", "T", ""),
            Section::new("x", 2.0, 2.0, "a", "U", ""),
        ])
        .validate_and_build(&table())
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateSectionId(id) if id == "\"x\""));
    }

    #[test]
    fn number_and_string_ids_do_not_collide() {
        let v = guide(vec![
            Section::new(1, 1.0, 1.0, "a", "T", ""),
            Section::new("1", 2.0, 2.0, "a", "U", ""),
        ])
        .validate_and_build(&table());
        assert!(v.is_ok());
    }

    #[test]
    fn off_image_pins_and_blank_titles_warn() {
        let v = guide(vec![Section::new(1, -5.0, 120.0, "a", "  ", "")])
            .validate_and_build(&table())
            .unwrap();
        assert_eq!(v.warnings.len(), 3);
        assert!(v.warnings[0].contains("x = -5"));
        assert!(v.warnings[1].contains("y = 120"));
        assert!(v.warnings[2].contains("has no title"));
    }

    #[test]
    fn infinite_coordinate_is_rejected() {
        let err = guide(vec![Section::new(1, 5.0, f64::INFINITY, "a", "T", "")])
            .validate_and_build(&table())
            .unwrap_err();
        assert!(matches!(err, Error::NonFiniteCoordinate { axis: 'y', .. }));
    }

    #[test]
    fn style_breaking_color_is_rejected() {
        let mut categories = table();
        categories.insert("bad", Category::new("red\" onclick=\"x"));
        let err = guide(vec![]).validate_and_build(&categories).unwrap_err();
        assert!(matches!(err, Error::InvalidColor { key, .. } if key == "bad"));
    }
}
