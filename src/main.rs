use pinguide::diagnostics;
use pinguide::{
    extract_guide, resolve_image, CategoryTable, DocumentRenderer, GuideFile, RenderOptions,
    ValidatedGuide,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs;

#[derive(Parser)]
#[command(name = "pinguide")]
#[command(about = "Annotated image guide exporter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a guide file into a single self-contained HTML document.
    Export {
        #[arg(long)]
        guide: String,

        /// Category table (JSON object keyed by category key).
        #[arg(long)]
        categories: Option<String>,

        /// Use this image instead of the one named in the guide.
        #[arg(long)]
        image: Option<String>,

        /// Inline a local image file as a data URI.
        #[arg(long)]
        embed_image: bool,

        #[arg(long, default_value = "en")]
        lang: String,

        /// Text shown before any pin is selected.
        #[arg(long)]
        placeholder: Option<String>,

        #[arg(short = 'o', long)]
        out: String,
    },

    /// Validate a guide file without rendering it.
    Check {
        #[arg(long)]
        guide: String,

        #[arg(long)]
        categories: Option<String>,
    },

    /// Recover the guide file from an exported HTML document.
    Extract {
        #[arg(long)]
        html: String,

        #[arg(short = 'o', long)]
        out: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Export {
            guide,
            categories,
            image,
            embed_image,
            lang,
            placeholder,
            out,
        } => {
            let validated = load_validated(&guide, categories.as_deref())?;

            let image_ref = image.as_deref().unwrap_or(&validated.image);
            let image_src = resolve_image(image_ref, embed_image)
                .with_context(|| diagnostics::error_message(format!("load image {}", image_ref)))?;

            let mut options = RenderOptions {
                lang,
                ..RenderOptions::default()
            };
            if let Some(text) = placeholder {
                options.placeholder = text;
            }

            let renderer = DocumentRenderer::new(validated.categories).with_options(options);
            let html = renderer
                .render(&validated.title, &image_src, &validated.sections)
                .with_context(|| diagnostics::error_message(format!("render {}", guide)))?;

            fs::write(&out, html)
                .with_context(|| diagnostics::error_message(format!("write {}", out)))?;
            eprintln!("Wrote {} ({} pins)", out, validated.sections.len());
        }

        Commands::Check { guide, categories } => {
            let validated = load_validated(&guide, categories.as_deref())?;
            println!(
                "{}: {} sections, {} categories, {} warnings",
                guide,
                validated.sections.len(),
                validated.categories.len(),
                validated.warnings.len()
            );
        }

        Commands::Extract { html, out } => {
            let text = fs::read_to_string(&html)
                .with_context(|| diagnostics::error_message(format!("read {}", html)))?;
            let extracted = extract_guide(&text)
                .with_context(|| diagnostics::error_message(format!("extract {}", html)))?;

            let guide = GuideFile::from(extracted);
            fs::write(&out, guide.to_json_pretty()?)
                .with_context(|| diagnostics::error_message(format!("write {}", out)))?;
            eprintln!("Wrote {} ({} sections)", out, guide.sections.len());
        }
    }

    Ok(())
}

/// Load a guide, pick its category table, validate, and print warnings.
///
/// Categories come from `--categories` first, then the guide file itself,
/// then the built-in table.
fn load_validated(guide_path: &str, categories_path: Option<&str>) -> anyhow::Result<ValidatedGuide> {
    let mut guide = GuideFile::load(guide_path)
        .with_context(|| diagnostics::error_message(format!("read guide file {}", guide_path)))?;

    let categories = match categories_path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| diagnostics::error_message(format!("read categories {}", path)))?;
            serde_json::from_str::<CategoryTable>(&text)
                .with_context(|| diagnostics::error_message(format!("parse categories {}", path)))?
        }
        None => match guide.categories.take() {
            Some(table) => table,
            None => {
                diagnostics::note("no category table given; using built-in categories");
                CategoryTable::builtin()
            }
        },
    };

    let validated = guide
        .validate_and_build(&categories)
        .with_context(|| diagnostics::error_message(format!("invalid guide {}", guide_path)))?;

    for warning in &validated.warnings {
        diagnostics::warn(format!("{}: {}", guide_path, warning));
    }

    Ok(validated)
}
