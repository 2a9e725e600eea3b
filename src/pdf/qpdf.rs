//! qpdf FFI wrapper for PDF assembly
//!
//! This module copies selected physical pages into a new document using the
//! qpdf crate (vendored FFI).

use crate::error::{Error, Result};
use qpdf::QPdf;

/// Wrapper for qpdf operations via FFI
pub struct QpdfWrapper;

/// Helper: open a QPdf from memory, optionally with password
fn open_qpdf(data: &[u8], password: Option<&str>) -> Result<QPdf> {
    match password {
        Some(pwd) => QPdf::read_from_memory_encrypted(data, pwd).map_err(map_qpdf_error),
        None => QPdf::read_from_memory(data).map_err(map_qpdf_error),
    }
}

/// Map qpdf crate errors to our error types
fn map_qpdf_error(e: qpdf::QPdfError) -> Error {
    match e.error_code() {
        qpdf::QPdfErrorCode::InvalidPassword => Error::IncorrectPassword,
        _ => Error::QpdfError {
            reason: e.to_string(),
        },
    }
}

impl QpdfWrapper {
    /// Copy physical pages from a PDF into a new document
    ///
    /// # Arguments
    /// * `input_data` - Raw PDF bytes
    /// * `indices` - 0-indexed physical page indices, in output order
    /// * `password` - Optional password for encrypted PDFs
    ///
    /// # Returns
    /// The new PDF as bytes
    pub fn copy_pages(
        input_data: &[u8],
        indices: &[usize],
        password: Option<&str>,
    ) -> Result<Vec<u8>> {
        let source = open_qpdf(input_data, password)?;
        let num_pages = source.get_num_pages().map_err(map_qpdf_error)?;

        let dest = QPdf::empty();

        for &index in indices {
            let page = source
                .get_page(index as u32)
                .ok_or_else(|| Error::PageOutOfBounds {
                    page: index as u32 + 1,
                    total: num_pages,
                })?;
            let copied = dest.copy_from_foreign(&page);
            dest.add_page(&copied, false).map_err(map_qpdf_error)?;
        }

        let mut writer = dest.writer();
        writer.preserve_encryption(false);
        writer.write_to_memory().map_err(map_qpdf_error)
    }
}
