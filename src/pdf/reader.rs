//! PDF reader wrapper for PDFium

use crate::error::{Error, Result};
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::warn;

/// Get PDFium instance (creates new instance each time - PDFium is not thread-safe)
fn create_pdfium() -> Result<Pdfium> {
    // Try to bind to system library or use static linking
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
                "/opt/pdfium/lib",
            ))
        })
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| Error::Pdfium {
            reason: format!("Failed to initialize PDFium: {}", e),
        })?;

    Ok(Pdfium::new(bindings))
}

/// PDF reader using PDFium
///
/// All page text is extracted up front; the numbering scan and the selection
/// stage then work over plain strings without touching PDFium again. A page
/// whose text could not be extracted is stored as `None` and treated as
/// unnumbered downstream.
pub struct PdfReader {
    page_count: usize,
    page_texts: Vec<Option<String>>,
}

impl PdfReader {
    /// Open a PDF from a file path
    pub fn open<P: AsRef<Path>>(path: P, password: Option<&str>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(Error::PdfNotFound {
                path: path.display().to_string(),
            });
        }

        let data = std::fs::read(path)?;
        Self::open_bytes(&data, password)
    }

    /// Open a PDF from bytes
    pub fn open_bytes(data: &[u8], password: Option<&str>) -> Result<Self> {
        if data.len() < 4 || &data[0..4] != b"%PDF" {
            return Err(Error::InvalidPdf {
                reason: "Not a valid PDF file".to_string(),
            });
        }

        let pdfium = create_pdfium()?;

        let document = pdfium
            .load_pdf_from_byte_slice(data, password)
            .map_err(|e| match (Self::map_pdfium_error(e), password) {
                // A password error on a document we did supply a password for
                // means the password was wrong, not missing.
                (Error::PasswordRequired, Some(_)) => Error::IncorrectPassword,
                (err, _) => err,
            })?;

        let page_count = document.pages().len() as usize;
        let page_texts = Self::extract_all_page_texts(&document);

        Ok(Self {
            page_count,
            page_texts,
        })
    }

    /// Total physical page count
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Extracted text of a physical page (0-indexed), or `None` if extraction
    /// failed for that page.
    pub fn page_text(&self, index: usize) -> Option<&str> {
        self.page_texts.get(index)?.as_deref()
    }

    fn extract_all_page_texts(document: &PdfDocument) -> Vec<Option<String>> {
        let pages = document.pages();
        let mut texts = Vec::with_capacity(pages.len() as usize);

        for index in 0..pages.len() {
            match pages.get(index) {
                Ok(page) => match Self::extract_page_text_with_layout(&page) {
                    Ok(text) => texts.push(Some(text)),
                    Err(err) => {
                        warn!(
                            page = index + 1,
                            error = %err,
                            "text extraction failed, page treated as unnumbered"
                        );
                        texts.push(None);
                    }
                },
                Err(err) => {
                    warn!(
                        page = index + 1,
                        error = %err,
                        "failed to load page, treated as unnumbered"
                    );
                    texts.push(None);
                }
            }
        }

        texts
    }

    /// Extract text from a page with Y-coordinate based ordering (preserves reading order)
    ///
    /// The line structure matters here: the page-number detector only looks
    /// at the first few lines, so headers must come out on top.
    fn extract_page_text_with_layout(page: &PdfPage) -> Result<String> {
        let text_obj = match page.text() {
            Ok(t) => t,
            Err(_) => return Ok(String::new()),
        };

        // Collect all characters with their positions
        let mut chars_with_pos: Vec<(char, f32, f32)> = Vec::new();

        for segment in text_obj.segments().iter() {
            if let Ok(chars) = segment.chars() {
                for char_result in chars.iter() {
                    if let Some(c) = char_result.unicode_char() {
                        if let Ok(bounds) = char_result.loose_bounds() {
                            let x = bounds.left().value;
                            let y = bounds.top().value;
                            chars_with_pos.push((c, x, y));
                        }
                    }
                }
            }
        }

        if chars_with_pos.is_empty() {
            return Ok(String::new());
        }

        // Tolerance of ~5 points accounts for slight vertical variations within a line
        const Y_TOLERANCE: f32 = 5.0;

        // Sort by Y descending (top to bottom in PDF coordinates), then X ascending
        chars_with_pos.sort_by(|a, b| {
            let y_cmp = b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal);
            if y_cmp == std::cmp::Ordering::Equal {
                a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal)
            } else {
                y_cmp
            }
        });

        // Group into lines based on Y-coordinate proximity
        let mut lines: Vec<Vec<(char, f32)>> = Vec::new();
        let mut current_line: Vec<(char, f32)> = Vec::new();
        let mut current_y: Option<f32> = None;

        for (c, x, y) in chars_with_pos {
            match current_y {
                Some(cur_y) if (cur_y - y).abs() <= Y_TOLERANCE => {
                    current_line.push((c, x));
                }
                _ => {
                    if !current_line.is_empty() {
                        lines.push(current_line);
                    }
                    current_line = vec![(c, x)];
                    current_y = Some(y);
                }
            }
        }

        if !current_line.is_empty() {
            lines.push(current_line);
        }

        // Sort each line by X coordinate (left to right) and build the text
        let mut result = String::new();
        for mut line in lines {
            line.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

            // Add space between characters if there's a gap (word separation)
            let mut prev_x: Option<f32> = None;
            const SPACE_THRESHOLD: f32 = 10.0;

            for (c, x) in line {
                if let Some(px) = prev_x {
                    if x - px > SPACE_THRESHOLD && c != ' ' {
                        result.push(' ');
                    }
                }
                result.push(c);
                prev_x = Some(x);
            }

            result.push('\n');
        }

        Ok(result.trim_end().to_string())
    }

    fn map_pdfium_error(err: PdfiumError) -> Error {
        match err {
            PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError) => {
                Error::PasswordRequired
            }
            _ => Error::Pdfium {
                reason: format!("{}", err),
            },
        }
    }
}
