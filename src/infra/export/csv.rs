use anyhow::{Context, Result};
use csv::{QuoteStyle, WriterBuilder};

use crate::domain::entities::table::ParsedTable;

/// Renders the table as CSV with every field quoted. The csv writer doubles
/// interior quotes on its own.
pub fn to_csv(table: &ParsedTable) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer
        .write_record(&table.headers)
        .context("failed to write csv header")?;
    for row in &table.rows {
        let record: Vec<String> = row.iter().map(|cell| cell.display()).collect();
        writer.write_record(&record).context("failed to write csv row")?;
    }

    let bytes = writer.into_inner().context("failed to flush csv writer")?;
    String::from_utf8(bytes).context("csv output was not valid utf-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::table::{Cell, FileKind};

    #[test]
    fn every_field_is_quoted_and_interior_quotes_doubled() {
        let table = ParsedTable {
            headers: vec!["name".to_string(), "note".to_string()],
            rows: vec![vec![Cell::text("shirt"), Cell::text("says \"hi\"")]],
            file_kind: FileKind::Csv,
            row_count: 1,
        };
        let out = to_csv(&table).expect("should render");

        assert!(out.starts_with("\"name\",\"note\"\n"));
        assert!(out.contains("\"says \"\"hi\"\"\""));
    }
}
