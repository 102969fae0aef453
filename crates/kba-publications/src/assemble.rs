use lopdf::Document;
use lopdf::content::Operation;

use crate::decode::decode_row;
use crate::diagnostic::Diagnostic;
use crate::error::ParseError;
use crate::fragments::{extract_fragments, page_text};
use crate::glyph::GlyphDecoding;
use crate::model::{EnergySourceRecord, ParseResult, RecordSet, TableRecord, VehicleRecord};
use crate::options::{ParseOptions, Publication};
use crate::pdf_reader::{read_page_operations, selected_pages};
use crate::rows::cluster_rows;
use crate::schema::{ENERGY_SOURCE_SCHEMA, PageMarker, TableSchema, VEHICLE_SCHEMA};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseReport {
    pub results: Vec<ParseResult>,
    pub diagnostics: Vec<Diagnostic>,
    pub page_count: usize,
    /// Pages that produced at least one row.
    pub table_pages: usize,
}

impl ParseReport {
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.results.iter().map(|result| result.total).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageTable {
    Vehicles,
    EnergySources,
}

fn carries<F>(
    schema: &TableSchema<'_, F>,
    operations: &[Operation],
    decoding: GlyphDecoding,
) -> bool {
    match schema.marker {
        PageMarker::Any => true,
        marker => marker.matches(&page_text(operations, decoding)),
    }
}

fn page_table(operations: &[Operation], options: &ParseOptions) -> Option<PageTable> {
    let energy = || carries(&ENERGY_SOURCE_SCHEMA, operations, options.decoding);
    let vehicles = || carries(&VEHICLE_SCHEMA, operations, options.decoding);

    match options.publication {
        Publication::VehicleRegistry => vehicles().then_some(PageTable::Vehicles),
        Publication::TaxonomyDirectory => energy().then_some(PageTable::EnergySources),
        Publication::Auto => {
            if energy() {
                Some(PageTable::EnergySources)
            } else {
                vehicles().then_some(PageTable::Vehicles)
            }
        }
    }
}

pub(crate) fn collect_page<R: TableRecord>(
    page: u32,
    operations: &[Operation],
    schema: &TableSchema<'_, R::Field>,
    decoding: GlyphDecoding,
    records: &mut Vec<R>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<usize, ParseError> {
    let fragments = extract_fragments(operations, schema, decoding)
        .map_err(|source| ParseError::OperandType { page, source })?;
    let rows = cluster_rows(fragments, schema.min_fragments);

    for (index, row) in rows.iter().enumerate() {
        let decoded = decode_row::<R>(row, schema.columns);
        for issue in decoded.issues {
            diagnostics.push(issue.into_diagnostic().with_page(page).with_row(index + 1));
        }
        records.push(decoded.record);
    }

    tracing::debug!(
        page,
        schema = schema.name,
        rows = rows.len(),
        "page parsed"
    );
    Ok(rows.len())
}

pub(crate) fn assemble_document(
    document: &Document,
    options: &ParseOptions,
) -> Result<ParseReport, ParseError> {
    let pages = selected_pages(document, options.pages.as_ref())?;

    let mut vehicles = Vec::<VehicleRecord>::new();
    let mut energy_sources = Vec::<EnergySourceRecord>::new();
    let mut diagnostics = Vec::new();
    let mut table_pages = 0;

    for &(page_no, page_id) in &pages {
        let operations = read_page_operations(document, page_no, page_id)?;
        let rows = match page_table(&operations, options) {
            Some(PageTable::Vehicles) => collect_page(
                page_no,
                &operations,
                &VEHICLE_SCHEMA,
                options.decoding,
                &mut vehicles,
                &mut diagnostics,
            )?,
            Some(PageTable::EnergySources) => collect_page(
                page_no,
                &operations,
                &ENERGY_SOURCE_SCHEMA,
                options.decoding,
                &mut energy_sources,
                &mut diagnostics,
            )?,
            None => {
                tracing::debug!(page = page_no, "page carries no known table");
                continue;
            }
        };
        if rows > 0 {
            table_pages += 1;
        }
    }

    let vehicle_result = |items: Vec<VehicleRecord>| {
        ParseResult::new(VehicleRecord::ENTITY_TYPE, RecordSet::Vehicles(items))
    };
    let energy_result = |items: Vec<EnergySourceRecord>| {
        ParseResult::new(
            EnergySourceRecord::ENTITY_TYPE,
            RecordSet::EnergySources(items),
        )
    };
    let results = match options.publication {
        Publication::VehicleRegistry => vec![vehicle_result(vehicles)],
        Publication::TaxonomyDirectory => vec![energy_result(energy_sources)],
        Publication::Auto => vec![vehicle_result(vehicles), energy_result(energy_sources)],
    };

    let report = ParseReport {
        results,
        diagnostics,
        page_count: pages.len(),
        table_pages,
    };
    tracing::info!(
        publication = options.publication.as_str(),
        pages = report.page_count,
        table_pages = report.table_pages,
        records = report.record_count(),
        diagnostics = report.diagnostics.len(),
        "document parsed"
    );
    Ok(report)
}
