use csv::{ReaderBuilder, Trim};

use crate::domain::entities::table::{Cell, FileKind, ParsedTable};
use crate::error::ParseError;

pub fn parse(bytes: &[u8]) -> Result<(ParsedTable, Vec<String>), ParseError> {
    // The header row is handled manually so blank-header detection can run
    // before any row is interpreted as data.
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(bytes);

    let mut headers: Option<Vec<String>> = None;
    let mut records: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ParseError::Decode(e.to_string()))?;
        let fields: Vec<String> = record.iter().map(|field| field.to_string()).collect();
        if headers.is_none() {
            headers = Some(fields);
            continue;
        }
        if fields.iter().all(|field| field.is_empty()) {
            continue;
        }
        records.push(fields);
    }

    let Some(headers) = headers else {
        return Err(ParseError::Empty);
    };
    if headers.iter().all(|header| header.is_empty()) {
        return Err(ParseError::BlankHeaders);
    }
    if records.is_empty() {
        return Err(ParseError::NoRows);
    }

    let rows: Vec<Vec<Cell>> = records
        .into_iter()
        .map(|record| record.into_iter().map(Cell::Text).collect())
        .collect();

    Ok(ParsedTable::from_raw(headers, rows, FileKind::Csv))
}
