use anyhow::{Context, Result};
use serde_json::{Map, Number, Value};

use crate::domain::entities::table::{Cell, ParsedTable};

/// Renders the table as a JSON array of objects keyed by header name, in
/// header order. Numeric cells stay numbers; missing cells become "".
pub fn to_json(table: &ParsedTable) -> Result<String> {
    let mut out = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let mut object = Map::new();
        for (index, header) in table.headers.iter().enumerate() {
            let value = match row.get(index) {
                Some(Cell::Number(n)) => Number::from_f64(*n)
                    .map(Value::Number)
                    .unwrap_or_else(|| Value::String(String::new())),
                Some(Cell::Text(text)) => Value::String(text.clone()),
                None => Value::String(String::new()),
            };
            object.insert(header.clone(), value);
        }
        out.push(Value::Object(object));
    }
    serde_json::to_string_pretty(&out).context("failed to serialize table as json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::table::FileKind;

    #[test]
    fn rows_become_objects_keyed_by_header() {
        let table = ParsedTable {
            headers: vec!["name".to_string(), "price".to_string()],
            rows: vec![vec![Cell::text("shirt"), Cell::Number(99.5)]],
            file_kind: FileKind::Csv,
            row_count: 1,
        };
        let out = to_json(&table).expect("should render");
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&out).expect("valid json");

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0]["name"], "shirt");
        assert_eq!(parsed[0]["price"], 99.5);
    }
}
