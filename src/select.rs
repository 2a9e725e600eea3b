//! Resolving requested page numbers to physical page indices

use tracing::warn;

use crate::numbering::PageNumberMap;

/// Outcome of resolving a page request against a document.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Physical page indices (0-based) to copy, in output order.
    pub indices: Vec<usize>,
    /// Requested numbers that matched no page.
    pub missing: Vec<u32>,
}

/// Resolve requested printed numbers through the page-number map.
///
/// Every physical page carrying a requested number is selected, in ascending
/// physical order per number; printed numbers are not unique and duplicates
/// are expected. Numbers with no match are collected and warned about, but do
/// not fail the selection.
pub fn select_by_printed(map: &PageNumberMap, requested: &[u32]) -> Selection {
    let mut indices = Vec::new();
    let mut missing = Vec::new();

    for &number in requested {
        let matches = map.pages_for_number(number);
        if matches.is_empty() {
            warn!(number, "no page carries this printed number, skipping");
            missing.push(number);
        } else {
            indices.extend(matches);
        }
    }

    Selection { indices, missing }
}

/// Resolve requested numbers as 1-based physical positions.
pub fn select_by_physical(page_count: usize, requested: &[u32]) -> Selection {
    let mut indices = Vec::new();
    let mut missing = Vec::new();

    for &number in requested {
        if number == 0 || number as usize > page_count {
            warn!(page = number, total = page_count, "page out of range, skipping");
            missing.push(number);
        } else {
            indices.push(number as usize - 1);
        }
    }

    Selection { indices, missing }
}
