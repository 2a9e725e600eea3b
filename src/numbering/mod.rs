//! Printed page numbering
//!
//! The physical order of a PDF's pages rarely matches the numbers printed on
//! them: front matter is unnumbered, separator pages interrupt the sequence,
//! and compilations restart it. This module builds a mapping from physical
//! page index to printed page number by scanning each page's text for a
//! printed number and interpolating across pages where detection failed.

mod detect;
mod interpolate;

pub use detect::detect_printed_number;

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Largest printed number considered plausible. Anything above this is far
/// more likely a year or a body-text numeral than a page number.
pub const MAX_PRINTED_NUMBER: u32 = 9999;

/// How a map entry was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySource {
    /// Directly matched in the page's text
    Detected,
    /// Filled in by interpolation
    Inferred,
}

/// Mapping from physical page index (0-based) to printed page number.
///
/// Built in two passes: detected entries first, then inferred entries from
/// [`PageNumberMap::interpolate`]. An entry, once present, is never
/// overwritten. Printed numbers are not required to be unique.
#[derive(Debug, Clone, Default)]
pub struct PageNumberMap {
    numbers: BTreeMap<usize, u32>,
    anchors: BTreeSet<usize>,
}

impl PageNumberMap {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert_detected(&mut self, index: usize, number: u32) {
        self.numbers.insert(index, number);
        self.anchors.insert(index);
    }

    /// Printed number of a physical page, if mapped.
    pub fn get(&self, index: usize) -> Option<u32> {
        self.numbers.get(&index).copied()
    }

    /// Whether this page's number was detected rather than inferred.
    pub fn is_anchor(&self, index: usize) -> bool {
        self.anchors.contains(&index)
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn detected_count(&self) -> usize {
        self.anchors.len()
    }

    pub fn inferred_count(&self) -> usize {
        self.numbers.len() - self.anchors.len()
    }

    /// All entries in physical order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.numbers.iter().map(|(&index, &number)| (index, number))
    }

    /// All physical indices whose printed number equals `number`, ascending.
    ///
    /// Printed numbers are not unique; every match is returned, not just the
    /// first.
    pub fn pages_for_number(&self, number: u32) -> Vec<usize> {
        self.numbers
            .iter()
            .filter(|&(_, &n)| n == number)
            .map(|(&index, _)| index)
            .collect()
    }

    /// Anchors in physical order, as (index, printed number) pairs.
    fn anchor_entries(&self) -> Vec<(usize, u32)> {
        self.anchors
            .iter()
            .map(|&index| (index, self.numbers[&index]))
            .collect()
    }
}

/// Scan every page for a printed number.
///
/// `page_text` returns the extractable text of a physical page, or `None`
/// when extraction failed upstream; such pages count as no detection and the
/// scan continues.
pub fn scan_printed_numbers<F>(page_count: usize, mut page_text: F) -> PageNumberMap
where
    F: FnMut(usize) -> Option<String>,
{
    let mut map = PageNumberMap::new();

    for index in 0..page_count {
        if let Some(text) = page_text(index) {
            if let Some(number) = detect_printed_number(&text) {
                debug!(page = index + 1, number, "detected printed page number");
                map.insert_detected(index, number);
            }
        }
    }

    map
}

/// Build the full page-number map: scan for detections, then fill gaps by
/// interpolation.
pub fn build_page_number_map<F>(page_count: usize, page_text: F) -> PageNumberMap
where
    F: FnMut(usize) -> Option<String>,
{
    let mut map = scan_printed_numbers(page_count, page_text);
    map.interpolate(page_count);
    map
}
