//! End-to-end page extraction pipeline
//!
//! One run: read the input, extract page texts, build the page-number map
//! (unless selection is physical), resolve the requested pages, copy them
//! into a new document, write it out. Fully sequential; the map lives for the
//! run and is discarded.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::numbering::{self, EntrySource, PageNumberMap};
use crate::pdf::{PdfReader, QpdfWrapper};
use crate::range::parse_page_ranges;
use crate::select::{self, Selection};

/// Options for one extraction run.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Treat the range expression as 1-based physical positions instead of
    /// printed page numbers.
    pub physical: bool,
    /// Password for encrypted input.
    pub password: Option<String>,
}

/// Summary of a completed run.
#[derive(Debug)]
pub struct ExtractSummary {
    /// Physical page count of the input.
    pub total_pages: usize,
    /// Physical indices written to the output, in order.
    pub selected: Vec<usize>,
    /// Requested numbers that matched nothing.
    pub missing: Vec<u32>,
    /// The page-number map, when selection went through printed numbers.
    pub map: Option<PageNumberMap>,
}

/// One row of the `--show-map` dump.
#[derive(Debug, Serialize)]
pub struct MapEntry {
    /// Physical page position (1-based)
    pub physical: usize,
    /// Printed page number
    pub printed: u32,
    /// Whether the entry was detected or inferred
    pub source: EntrySource,
}

/// Run the full extraction pipeline.
pub fn extract_pages(
    input: &Path,
    range_expr: &str,
    output: &Path,
    options: &ExtractOptions,
) -> Result<ExtractSummary> {
    if !input.exists() {
        return Err(Error::PdfNotFound {
            path: input.display().to_string(),
        });
    }
    let data = fs::read(input)?;

    let password = options.password.as_deref();
    let reader = PdfReader::open_bytes(&data, password)?;
    let total_pages = reader.page_count();
    info!(pages = total_pages, input = %input.display(), "opened PDF");

    let requested = parse_page_ranges(range_expr)?;

    let (selection, map) = resolve_selection(&reader, &requested, options.physical);

    if selection.indices.is_empty() {
        return Err(Error::NoPagesSelected);
    }

    let output_data = QpdfWrapper::copy_pages(&data, &selection.indices, password)?;
    fs::write(output, output_data)?;
    info!(
        pages = selection.indices.len(),
        output = %output.display(),
        "wrote output PDF"
    );

    Ok(ExtractSummary {
        total_pages,
        selected: selection.indices,
        missing: selection.missing,
        map,
    })
}

fn resolve_selection(
    reader: &PdfReader,
    requested: &[u32],
    physical: bool,
) -> (Selection, Option<PageNumberMap>) {
    let total_pages = reader.page_count();

    if physical {
        return (select::select_by_physical(total_pages, requested), None);
    }

    let map = numbering::build_page_number_map(total_pages, |index| {
        reader.page_text(index).map(str::to_string)
    });

    if map.is_empty() {
        // Distinct condition: nothing was detected anywhere. Fall back to
        // physical positions instead of failing the run.
        warn!("no printed page numbers detected, selecting by physical position");
        return (select::select_by_physical(total_pages, requested), None);
    }

    info!(
        detected = map.detected_count(),
        inferred = map.inferred_count(),
        "built page-number map"
    );
    let selection = select::select_by_printed(&map, requested);
    (selection, Some(map))
}

/// Render the page-number map as pretty JSON for `--show-map`.
pub fn render_map_json(map: &PageNumberMap) -> Result<String> {
    Ok(serde_json::to_string_pretty(&map_entries(map))?)
}

/// Render the page-number map as `--show-map` rows, in physical order.
pub fn map_entries(map: &PageNumberMap) -> Vec<MapEntry> {
    map.iter()
        .map(|(index, printed)| MapEntry {
            physical: index + 1,
            printed,
            source: if map.is_anchor(index) {
                EntrySource::Detected
            } else {
                EntrySource::Inferred
            },
        })
        .collect()
}
