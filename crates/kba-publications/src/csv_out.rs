use std::io::Write;

use csv::WriterBuilder;

use crate::error::ParseError;
use crate::model::ParseResult;

pub(crate) fn write_csv<W: Write>(writer: W, result: &ParseResult) -> Result<(), ParseError> {
    let (headers, rows) = result.items.to_table();
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(&headers)?;
    for row in &rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub(crate) fn write_csv_to_string(result: &ParseResult) -> Result<String, ParseError> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, result)?;
    String::from_utf8(buffer)
        .map_err(|error| ParseError::InvalidOption(format!("invalid utf-8 csv output: {error}")))
}
