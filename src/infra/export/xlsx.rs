use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

use crate::domain::entities::table::{Cell, ParsedTable};

/// Re-encodes the table as a single-sheet workbook. With `protect` set the
/// sheet opens read-only in spreadsheet applications.
pub fn to_xlsx(table: &ParsedTable, protect: bool) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    if protect {
        worksheet.protect();
    }

    for (col, header) in table.headers.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, header)
            .context("failed to write xlsx header")?;
    }
    for (row_idx, row) in table.rows.iter().enumerate() {
        for (col, cell) in row.iter().enumerate() {
            let row_num = (row_idx + 1) as u32;
            match cell {
                Cell::Number(value) => worksheet
                    .write_number(row_num, col as u16, *value)
                    .context("failed to write xlsx number")?,
                Cell::Text(text) => worksheet
                    .write_string(row_num, col as u16, text)
                    .context("failed to write xlsx cell")?,
            };
        }
    }

    workbook.save_to_buffer().context("failed to encode workbook")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::table::FileKind;
    use crate::infra::import;

    #[test]
    fn exported_workbook_parses_back() {
        let table = ParsedTable {
            headers: vec!["name".to_string(), "price".to_string()],
            rows: vec![
                vec![Cell::text("shirt"), Cell::Number(99.5)],
                vec![Cell::text("hat"), Cell::Number(20.0)],
            ],
            file_kind: FileKind::Excel,
            row_count: 2,
        };
        let bytes = to_xlsx(&table, true).expect("should encode");
        let (parsed, warnings) = import::parse_bytes(&bytes, "export.xlsx").expect("should parse");

        assert_eq!(parsed.headers, table.headers);
        assert_eq!(parsed.row_count, 2);
        assert_eq!(parsed.rows[0][1], Cell::Number(99.5));
        assert!(warnings.is_empty());
    }
}
