mod assemble;
mod columns;
mod csv_out;
mod decode;
mod diagnostic;
mod error;
mod fragments;
mod glyph;
mod model;
mod options;
mod pdf_reader;
mod rows;
mod schema;

use std::io::Write;
use std::path::Path;

use crate::assemble::assemble_document;
use crate::pdf_reader::{load_document, load_document_from_bytes};

pub use assemble::ParseReport;
pub use columns::{nearest_anchor, nearest_column};
pub use decode::{DecodedRow, FieldIssue, decode_row};
pub use diagnostic::{Diagnostic, DiagnosticCode};
pub use error::{OperandMismatch, ParseError};
pub use fragments::{extract_fragments, page_text};
pub use glyph::GlyphDecoding;
pub use model::{
    CellValue, EnergySourceField, EnergySourceRecord, FieldKind, ParseResult, PositionedFragment,
    RecordField, RecordSet, TableRecord, VehicleField, VehicleRecord,
};
pub use options::{PageSelection, ParseOptions, Publication};
pub use rows::{ROW_DEVIATION, cluster_rows};
pub use schema::{
    Column, ENERGY_SOURCE_HEADER, ENERGY_SOURCE_SCHEMA, PageMarker, Positioning, TableSchema,
    VEHICLE_SCHEMA, VerticalWindow,
};

/// No partial report is returned: any container, tokenizer or operand error fails
/// the whole document.
pub fn parse_pdf_bytes(
    input_pdf: &[u8],
    options: &ParseOptions,
) -> Result<ParseReport, ParseError> {
    let document = load_document_from_bytes(input_pdf)?;
    assemble_document(&document, options)
}

pub fn parse_pdf_file(
    input_pdf: &Path,
    options: &ParseOptions,
) -> Result<ParseReport, ParseError> {
    let document = load_document(input_pdf)?;
    assemble_document(&document, options)
}

pub fn write_json<W: Write>(
    writer: W,
    report: &ParseReport,
    pretty: bool,
) -> Result<(), ParseError> {
    if pretty {
        serde_json::to_writer_pretty(writer, &report.results)?;
    } else {
        serde_json::to_writer(writer, &report.results)?;
    }
    Ok(())
}

fn single_result(report: &ParseReport) -> Result<&ParseResult, ParseError> {
    match report.results.as_slice() {
        [result] => Ok(result),
        _ => Err(ParseError::InvalidOption(
            "csv output needs a single entity type; choose the vehicles or taxonomy publication"
                .to_string(),
        )),
    }
}

pub fn write_csv<W: Write>(writer: W, report: &ParseReport) -> Result<(), ParseError> {
    csv_out::write_csv(writer, single_result(report)?)
}

pub fn csv_string(report: &ParseReport) -> Result<String, ParseError> {
    csv_out::write_csv_to_string(single_result(report)?)
}

#[cfg(test)]
mod tests {
    use super::{ParseReport, csv_string, write_json};
    use crate::model::{EnergySourceRecord, ParseResult, RecordSet};

    fn report(results: Vec<ParseResult>) -> ParseReport {
        ParseReport {
            results,
            diagnostics: Vec::new(),
            page_count: 1,
            table_pages: 1,
        }
    }

    #[test]
    fn csv_requires_single_result() {
        let energy = ParseResult::new("EnergySource", RecordSet::EnergySources(Vec::new()));
        let vehicles = ParseResult::new("VehicleCategoryM", RecordSet::Vehicles(Vec::new()));
        let error = csv_string(&report(vec![vehicles, energy.clone()]))
            .expect_err("two entity types cannot share one csv");
        assert!(error.to_string().contains("single entity type"));

        let csv = csv_string(&report(vec![energy])).expect("single result");
        assert_eq!(csv, "shortName,code\n");
    }

    #[test]
    fn json_is_an_array_of_results() {
        let energy = ParseResult::new(
            "EnergySource",
            RecordSet::EnergySources(vec![EnergySourceRecord {
                short_name: Some("Diesel".to_string()),
                code: Some("0002".to_string()),
            }]),
        );
        let mut buffer = Vec::new();
        write_json(&mut buffer, &report(vec![energy]), false).expect("json");
        assert_eq!(
            String::from_utf8(buffer).expect("utf-8"),
            r#"[{"total":1,"entityType":"EnergySource","items":[{"shortName":"Diesel","code":"0002"}]}]"#
        );
    }
}
