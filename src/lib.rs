//! pdf-page-filter library
//!
//! Extracts a subset of pages from a PDF. By default the selection follows
//! the page numbers *printed on the pages* rather than physical page order:
//! each page's text is scanned for a printed number, gaps are interpolated
//! from neighbouring detections, and the requested numbers are resolved back
//! to physical pages before copying them into a new document.

pub mod cli;
pub mod error;
pub mod extract;
pub mod numbering;
pub mod pdf;
pub mod range;
pub mod select;

pub use error::{Error, Result};
