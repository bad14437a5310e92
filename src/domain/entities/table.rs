use std::collections::HashSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Cell {
        Cell::Text(value.into())
    }

    pub fn empty() -> Cell {
        Cell::Text(String::new())
    }

    pub fn display(&self) -> String {
        match self {
            Cell::Text(value) => value.clone(),
            Cell::Number(value) => format_number(*value),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Text(value) => value.is_empty(),
            Cell::Number(_) => false,
        }
    }
}

pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value.fract().abs() < f64::EPSILON {
        format!("{}", value as i64)
    } else {
        let mut text = format!("{value:.6}");
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
        text
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileKind {
    Excel,
    Csv,
}

impl FileKind {
    pub fn from_extension(extension: &str) -> Option<FileKind> {
        match extension.to_ascii_lowercase().as_str() {
            "xlsx" | "xls" => Some(FileKind::Excel),
            "csv" => Some(FileKind::Csv),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    pub file_kind: FileKind,
    pub row_count: usize,
}

impl ParsedTable {
    /// Normalizes raw rows to the header width (short rows are right-padded,
    /// long rows truncated) and collects structural warnings instead of
    /// failing on them.
    pub fn from_raw(
        headers: Vec<String>,
        raw_rows: Vec<Vec<Cell>>,
        file_kind: FileKind,
    ) -> (ParsedTable, Vec<String>) {
        let mut warnings = Vec::new();

        let mut seen = HashSet::new();
        let mut duplicates: Vec<String> = Vec::new();
        for header in &headers {
            if !header.is_empty() && !seen.insert(header.as_str()) && !duplicates.contains(header) {
                duplicates.push(header.clone());
            }
        }
        if !duplicates.is_empty() {
            warnings.push(format!("duplicate column headers: {}", duplicates.join(", ")));
        }

        let width = headers.len();
        let mut mismatched = 0_usize;
        let rows: Vec<Vec<Cell>> = raw_rows
            .into_iter()
            .map(|mut row| {
                if row.len() != width {
                    mismatched += 1;
                }
                row.resize(width, Cell::empty());
                row
            })
            .collect();
        if mismatched > 0 {
            warnings.push(format!(
                "{mismatched} rows did not match the header width and were normalized"
            ));
        }

        let row_count = rows.len();
        (
            ParsedTable {
                headers,
                rows,
                file_kind,
                row_count,
            },
            warnings,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_rows_are_padded_to_header_width() {
        let headers = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let raw = vec![
            vec![Cell::text("1")],
            vec![Cell::text("1"), Cell::text("2"), Cell::text("3")],
        ];
        let (table, warnings) = ParsedTable::from_raw(headers, raw, FileKind::Csv);

        assert_eq!(table.row_count, 2);
        assert!(table.rows.iter().all(|row| row.len() == 3));
        assert_eq!(table.rows[0][2], Cell::empty());
        assert_eq!(warnings.len(), 1, "padded row should be reported: {warnings:?}");
    }

    #[test]
    fn duplicate_headers_warn_but_do_not_fail() {
        let headers = vec!["a".to_string(), "a".to_string(), "b".to_string()];
        let (table, warnings) = ParsedTable::from_raw(headers, Vec::new(), FileKind::Csv);

        assert_eq!(table.headers.len(), 3);
        assert!(
            warnings.iter().any(|w| w.contains("duplicate")),
            "expected duplicate header warning: {warnings:?}"
        );
    }

    #[test]
    fn format_number_trims_trailing_zeros() {
        assert_eq!(format_number(63203.5), "63203.5");
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(f64::NAN), "");
    }
}
