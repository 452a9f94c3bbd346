use super::template::{Bindings, Slot, Template};
use super::RenderOptions;
use crate::model::{CategoryTable, Section};
use crate::{Error, Result};

use serde::Serialize;

/// Data block embedded in the page and read back by the viewer script.
#[derive(Serialize)]
struct GuideData<'a> {
    categories: &'a CategoryTable,
    sections: &'a [Section],
}

/// Renders guides against one category table.
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    categories: CategoryTable,
    options: RenderOptions,
    template: Template,
}

impl DocumentRenderer {
    pub fn new(categories: CategoryTable) -> Self {
        Self {
            categories,
            options: RenderOptions::default(),
            template: Template::compile(PAGE),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render a self-contained HTML document (data embedded as JSON).
    ///
    /// Deterministic: equal inputs give byte-identical output and sections
    /// keep their order, so the Nth section is always the pin labeled N.
    /// Category references are not checked here; see
    /// [`GuideFile::validate_and_build`](crate::GuideFile::validate_and_build).
    pub fn render(&self, title: &str, image: &str, sections: &[Section]) -> Result<String> {
        let data = encode_guide_data(&self.categories, sections)?;

        let bindings = Bindings::new()
            .bind(Slot::Lang, &self.options.lang)
            .bind(Slot::Title, title)
            .bind(Slot::ImageSrc, image)
            .bind(Slot::ImageAlt, &self.options.image_alt)
            .bind(Slot::Placeholder, &self.options.placeholder)
            .bind(Slot::GuideData, &data);

        self.template.fill(&bindings)
    }
}

/// Serialize categories and sections for the data block.
///
/// serde_json writes non-finite floats as `null`, which would not read back as
/// a coordinate, so those are rejected instead.
fn encode_guide_data(categories: &CategoryTable, sections: &[Section]) -> Result<String> {
    for section in sections {
        for (axis, value) in [('x', section.x), ('y', section.y)] {
            if !value.is_finite() {
                return Err(Error::NonFiniteCoordinate {
                    section: section.id.to_string(),
                    axis,
                    value,
                });
            }
        }
    }

    Ok(serde_json::to_string(&GuideData {
        categories,
        sections,
    })?)
}

// Raw string on purpose: the script uses `${...}` template literals, which
// would fight with `format!`.
const PAGE: &str = r#"<!DOCTYPE html>
<html lang="__LANG__">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>__TITLE__</title>
<style>
  html, body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
    margin: 0;
    padding: 0;
    background-color: #f1f5f9;
    color: #334155;
    height: 100%;
    width: 100%;
    overflow: hidden;
  }
  .container { display: flex; height: 100%; width: 100%; }
  .image-panel {
    background-color: #e2e8f0;
    display: flex;
    align-items: center;
    justify-content: center;
    padding: 1rem;
    flex: 2;
    min-width: 0;
    overflow-y: auto;
    overflow-x: hidden;
  }
  .image-wrapper { position: relative; line-height: 0; display: inline-block; margin: auto; }
  img.guide-image {
    display: block;
    max-width: 100%;
    height: auto;
    object-fit: contain;
    box-shadow: 0 10px 15px -3px rgba(0,0,0,0.1);
    border-radius: 0.25rem;
  }
  .content-panel {
    background-color: #ffffff;
    padding: 2rem;
    overflow-y: auto;
    flex: 1;
    min-width: 320px;
    box-shadow: -5px 0 15px -3px rgba(0,0,0,0.1);
    z-index: 10;
  }

  .pin {
    position: absolute;
    width: 1.5rem;
    height: 1.5rem;
    border-radius: 9999px;
    transform: translate(-50%, -50%);
    cursor: pointer;
    transition: all 0.2s;
    display: flex;
    align-items: center;
    justify-content: center;
    font-size: 0.75rem;
    color: white;
    font-weight: bold;
    line-height: 1;
    box-shadow: 0 4px 6px -1px rgba(0,0,0,0.1);
  }
  .pin:hover { transform: translate(-50%, -50%) scale(1.2); }

  .content-placeholder {
    text-align: center;
    color: #94a3b8;
    display: flex;
    flex-direction: column;
    justify-content: center;
    align-items: center;
    height: 100%;
  }
  h1 { font-size: 1.5rem; font-weight: bold; margin: 0; word-break: break-word; }
  .content-html { line-height: 1.6; }
  .content-html img { max-width: 100%; height: auto; border-radius: 0.25rem; margin: 0.5rem 0; }
  .header-bar {
    border-bottom: 4px solid;
    padding-bottom: 0.75rem;
    margin-bottom: 1rem;
    display: flex;
    align-items: center;
    gap: 0.75rem;
  }
  .header-icon {
    width: 2rem;
    height: 2rem;
    border-radius: 9999px;
    display: flex;
    align-items: center;
    justify-content: center;
    color: white;
    font-weight: bold;
    flex-shrink: 0;
  }

  @media (max-width: 768px) {
    html, body { height: auto; overflow: auto; }
    .container { flex-direction: column; height: auto; }
    .image-panel { min-height: 60vh; padding: 0.5rem; align-items: flex-start; }
    .content-panel { min-width: unset; box-shadow: 0 -5px 15px -3px rgba(0,0,0,0.1); }
  }
</style>
</head>
<body>
<div class="container">
  <div id="image-panel" class="image-panel">
    <div id="image-wrapper" class="image-wrapper">
      <img src="__IMAGE_SRC__" alt="__IMAGE_ALT__" class="guide-image">
    </div>
  </div>
  <div id="content-panel" class="content-panel">
    <div class="content-placeholder">
      <h2>__TITLE__</h2>
      <p>__PLACEHOLDER__</p>
    </div>
  </div>
</div>

<script type="application/json" id="guide-data">__GUIDE_DATA__</script>
<script>
// Embedded guide data (JSON block above)
const DATA = JSON.parse(document.getElementById("guide-data").textContent);
const sections = DATA.sections;
const categories = DATA.categories;

const imageWrapper = document.getElementById("image-wrapper");
const contentPanel = document.getElementById("content-panel");
const PIN_SHADOW = "0 4px 6px -1px rgba(0,0,0,0.1)";
let activePin = null;

function categoryOf(section) {
  return categories[section.categoryKey] || {};
}

function escapeTitle(s) {
  return String(s).replace(/</g, "&lt;").replace(/>/g, "&gt;");
}

function renderPins() {
  imageWrapper.querySelectorAll(".pin").forEach((p) => p.remove());
  sections.forEach((section, index) => {
    const pin = document.createElement("div");
    pin.className = "pin";
    pin.style.left = `${section.x}%`;
    pin.style.top = `${section.y}%`;
    pin.style.backgroundColor = categoryOf(section).color;
    pin.dataset.id = section.id;
    pin.innerText = index + 1;
    pin.addEventListener("click", (e) => {
      e.stopPropagation();
      selectPin(section, pin, index + 1);
    });
    imageWrapper.appendChild(pin);
  });
}

function selectPin(section, pin, label) {
  const color = categoryOf(section).color;

  if (activePin) {
    activePin.style.transform = "translate(-50%, -50%) scale(1)";
    activePin.style.boxShadow = PIN_SHADOW;
  }
  activePin = pin;
  pin.style.transform = "translate(-50%, -50%) scale(1.25)";
  pin.style.boxShadow = `0 0 0 3px white, 0 0 0 5px ${color}`;

  contentPanel.innerHTML = `
    <div class="header-bar" style="border-color: ${color};">
      <div class="header-icon" style="background-color: ${color};">${label}</div>
      <h1 style="color: ${color};">${escapeTitle(section.title)}</h1>
    </div>
    <div class="content-html">${section.content}</div>
  `;
}

document.addEventListener("DOMContentLoaded", () => {
  // Pins are placed once the image has its final size.
  const image = imageWrapper.querySelector(".guide-image");
  if (image.complete) {
    renderPins();
  } else {
    image.addEventListener("load", renderPins, { once: true });
  }
});
</script>
</body>
</html>
"#;
