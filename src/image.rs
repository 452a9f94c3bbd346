//! Image references: URLs pass through, local files can be inlined.

use crate::{Error, Result};

use base64::Engine;
use std::fs;
use std::path::Path;

/// Resolve the image reference that ends up in `<img src>`.
///
/// `data:` URIs and http(s) URLs are returned unchanged. Anything else is a
/// local path: with `embed` it is read and inlined as a base64 data URI so the
/// document stays self-contained, without it the path is kept as written.
pub fn resolve_image(reference: &str, embed: bool) -> Result<String> {
    if !embed || is_remote_or_inline(reference) {
        return Ok(reference.to_string());
    }

    let path = Path::new(reference);
    let mime = mime_for_path(path).ok_or_else(|| Error::UnsupportedImage(reference.to_string()))?;
    let bytes = fs::read(path)?;
    Ok(data_uri(mime, &bytes))
}

/// `data:<mime>;base64,<payload>`
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

fn is_remote_or_inline(reference: &str) -> bool {
    let lower = reference.trim_start().to_ascii_lowercase();
    lower.starts_with("data:") || lower.starts_with("http://") || lower.starts_with("https://")
}

fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "avif" => "image/avif",
        "ico" => "image/x-icon",
        _ => return None,
    };
    Some(mime)
}
