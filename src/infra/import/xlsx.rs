use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::domain::entities::table::{Cell, FileKind, ParsedTable};
use crate::error::ParseError;

fn cell_from_excel(cell: &Data) -> Cell {
    match cell {
        Data::String(v) => Cell::Text(v.to_string()),
        Data::Float(v) => Cell::Number(*v),
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Bool(v) => Cell::Text(v.to_string()),
        Data::DateTime(v) => Cell::Text(v.to_string()),
        Data::DateTimeIso(v) => Cell::Text(v.to_string()),
        Data::DurationIso(v) => Cell::Text(v.to_string()),
        Data::Error(v) => Cell::Text(format!("{v:?}")),
        Data::Empty => Cell::empty(),
    }
}

pub fn parse(bytes: &[u8]) -> Result<(ParsedTable, Vec<String>), ParseError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| ParseError::Decode(e.to_string()))?;

    // The first worksheet is the data sheet by convention.
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ParseError::NoWorksheet)?
        .map_err(|e| ParseError::Decode(e.to_string()))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Err(ParseError::Empty);
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell_from_excel(cell).display().trim().to_string())
        .collect();
    if headers.iter().all(|header| header.is_empty()) {
        return Err(ParseError::BlankHeaders);
    }

    let data: Vec<Vec<Cell>> = rows
        .map(|row| row.iter().map(cell_from_excel).collect())
        .filter(|row: &Vec<Cell>| !row.iter().all(Cell::is_empty))
        .collect();
    if data.is_empty() {
        return Err(ParseError::NoRows);
    }

    Ok(ParsedTable::from_raw(headers, data, FileKind::Excel))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excel_numbers_keep_their_numeric_type() {
        assert_eq!(cell_from_excel(&Data::Float(12.5)), Cell::Number(12.5));
        assert_eq!(cell_from_excel(&Data::Int(3)), Cell::Number(3.0));
        assert_eq!(cell_from_excel(&Data::String("x".into())), Cell::text("x"));
        assert_eq!(cell_from_excel(&Data::Empty), Cell::empty());
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        assert!(matches!(parse(b"not a workbook"), Err(ParseError::Decode(_))));
    }
}
