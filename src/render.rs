//! Guide rendering (HTML) and reading rendered guides back.

pub mod escape;
pub mod extract;
mod html;
pub mod template;

pub use html::DocumentRenderer;

/// Page-level settings that are not part of the guide itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Value of the `lang` attribute on `<html>`.
    pub lang: String,
    /// Alt text of the guide image.
    pub image_alt: String,
    /// Message shown in the content pane before any pin is selected.
    pub placeholder: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            image_alt: "Guide Image".to_string(),
            placeholder: "Click a pin on the image to view details.".to_string(),
        }
    }
}
