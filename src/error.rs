//! Error types for rendering, validation and extraction.

use thiserror::Error;

/// Result type alias for guide operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building, validating or reading back a guide document.
#[derive(Error, Debug)]
pub enum Error {
    /// Serializing or parsing the embedded guide data failed
    #[error("guide data encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// JSON has no representation for NaN or infinities
    #[error("section {section}: {axis} coordinate is not finite ({value})")]
    NonFiniteCoordinate {
        section: String,
        axis: char,
        value: f64,
    },

    /// A template slot was left without a value
    #[error("template slot {0} has no value")]
    UnboundSlot(&'static str),

    #[error("section {section} references unknown category '{key}'")]
    UnknownCategory { section: String, key: String },

    #[error("duplicate section id {0}")]
    DuplicateSectionId(String),

    /// Category colors end up inside inline `style` attributes
    #[error("category '{key}' has an unusable color value {color:?}")]
    InvalidColor { key: String, color: String },

    /// Input is not a document produced by the renderer
    #[error("not a guide document: {0}")]
    MalformedDocument(String),

    #[error("bad document pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("unsupported image type for {0}")]
    UnsupportedImage(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
