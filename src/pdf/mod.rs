//! PDF boundary layer
//!
//! This module provides PDF reading and text extraction via PDFium, and page
//! assembly via qpdf.

mod qpdf;
mod reader;

pub use qpdf::QpdfWrapper;
pub use reader::PdfReader;
