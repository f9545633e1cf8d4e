//! PDF rendering with printpdf

use std::io::Cursor;
use std::path::{Path, PathBuf};

use foodgram_core::DomainError;
use printpdf::{Mm, PdfDocument, Pt};

use super::layout::{PageLayout, PAGE_HEIGHT, PAGE_WIDTH, TITLE};

const LAYER_NAME: &str = "Layer 1";

/// TrueType font file used for every line of the document
#[derive(Debug, Clone)]
pub struct FontSource {
    path: PathBuf,
}

impl FontSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the font bytes
    pub async fn load(&self) -> Result<Vec<u8>, DomainError> {
        tokio::fs::read(&self.path).await.map_err(|e| {
            DomainError::ResourceUnavailable(format!(
                "font {} could not be read: {e}",
                self.path.display()
            ))
        })
    }
}

/// Render laid out pages into PDF bytes
pub fn render_pdf(pages: &[PageLayout], font: &[u8]) -> Result<Vec<u8>, DomainError> {
    let width = Mm::from(Pt(PAGE_WIDTH));
    let height = Mm::from(Pt(PAGE_HEIGHT));

    let (doc, first_page, first_layer) = PdfDocument::new(TITLE, width, height, LAYER_NAME);
    let font_ref = doc
        .add_external_font(Cursor::new(font))
        .map_err(|e| DomainError::ResourceUnavailable(format!("font could not be parsed: {e}")))?;

    for (index, page) in pages.iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(width, height, LAYER_NAME)
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);

        for line in &page.lines {
            layer.use_text(
                line.text.as_str(),
                line.size,
                Mm::from(Pt(line.x)),
                Mm::from(Pt(line.y)),
                &font_ref,
            );
        }
    }

    doc.save_to_bytes()
        .map_err(|e| DomainError::InternalError(format!("failed to write PDF: {e}")))
}
