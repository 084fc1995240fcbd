//! PDF access: text extraction and page rasterization via pdfium.
//!
//! Text extraction is the default path; rasterized pages feed the vision
//! variant of the model call for statements whose layout defeats the text
//! layer (scanned documents, dense tables).

#![allow(clippy::cast_possible_truncation)]

use std::path::Path;

use image::ImageFormat;
use pdfium_render::prelude::*;

use crate::error::{ExtractError, ExtractResult};

/// PDF points per inch - standard PostScript/PDF unit conversion factor.
const PDF_POINTS_PER_INCH: f32 = 72.0;

/// Reads PDF documents: text per page, or rendered PNG pages.
pub struct PdfReader {
    pdfium: Pdfium,
}

impl PdfReader {
    /// Creates a new reader bound to the system pdfium library.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pdfium: Pdfium::default(),
        }
    }

    /// Extracts the text of every page, with page markers.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or pdfium cannot load it.
    pub fn extract_text(&self, path: &Path) -> ExtractResult<String> {
        let document = self.load(path)?;

        let mut text = String::new();
        for (i, page) in document.pages().iter().enumerate() {
            let page_text = page
                .text()
                .map_err(|e| ExtractError::pdf(path.display().to_string(), e))?
                .all();

            text.push_str(&format!("--- Page {} ---\n", i + 1));
            text.push_str(&page_text);
            text.push('\n');
        }

        Ok(text)
    }

    /// Renders all pages to PNG at the given DPI.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded or a page fails to
    /// render or encode.
    pub fn render_pages(&self, path: &Path, dpi: u32) -> ExtractResult<Vec<PageImage>> {
        let document = self.load(path)?;

        let page_count = document.pages().len() as usize;
        let mut pages = Vec::with_capacity(page_count);

        for (i, page) in document.pages().iter().enumerate() {
            let page_number = (i + 1) as u32;

            let width = page.width().value;
            let height = page.height().value;

            let render_config = PdfRenderConfig::new()
                .set_target_width((width * dpi as f32 / PDF_POINTS_PER_INCH) as i32)
                .set_target_height((height * dpi as f32 / PDF_POINTS_PER_INCH) as i32);

            let bitmap = page
                .render_with_config(&render_config)
                .map_err(|e| ExtractError::pdf(path.display().to_string(), e))?;

            let image = bitmap.as_image();

            let mut png_data = Vec::new();
            image
                .write_to(&mut std::io::Cursor::new(&mut png_data), ImageFormat::Png)
                .map_err(|e| ExtractError::pdf(path.display().to_string(), e))?;

            pages.push(PageImage {
                page_number,
                png_data,
            });
        }

        Ok(pages)
    }

    /// Returns the number of pages in a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded.
    pub fn page_count(&self, path: &Path) -> ExtractResult<usize> {
        let document = self.load(path)?;
        Ok(document.pages().len() as usize)
    }

    fn load(&self, path: &Path) -> ExtractResult<PdfDocument<'_>> {
        if !path.exists() {
            return Err(ExtractError::DocumentNotFound {
                path: path.display().to_string(),
            });
        }

        self.pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| ExtractError::pdf(path.display().to_string(), e))
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}

/// One rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    /// 1-based page number.
    pub page_number: u32,

    /// PNG image data.
    pub png_data: Vec<u8>,
}

impl PageImage {
    /// Size of the PNG data in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.png_data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_image_size() {
        let page = PageImage {
            page_number: 1,
            png_data: vec![0u8; 128],
        };
        assert_eq!(page.size(), 128);
    }
}
