//! Export annotated image guides as a single self-contained HTML document.
//!
//! A guide is a title, an image and an ordered list of [`Section`]s, each a pin
//! at percentage coordinates over the image with a category and rich-text
//! content. [`DocumentRenderer`] turns that into one HTML file with inlined
//! styles, inlined data and an inlined interaction script.

pub mod diagnostics;
pub mod error;
pub mod guide;
pub mod image;
pub mod model;
pub mod render;

pub use error::{Error, Result};
pub use guide::{GuideFile, ValidatedGuide};
pub use image::resolve_image;
pub use model::{Category, CategoryTable, Section, SectionId};
pub use render::extract::{extract_guide, ExtractedGuide};
pub use render::{DocumentRenderer, RenderOptions};
