pub mod csv;
pub mod xlsx;

use tracing::info;

use crate::domain::entities::table::{FileKind, ParsedTable};
use crate::error::ParseError;

/// Dispatches on the declared file extension and returns the parsed table
/// plus any structural warnings collected along the way.
pub fn parse_bytes(bytes: &[u8], file_name: &str) -> Result<(ParsedTable, Vec<String>), ParseError> {
    let extension = file_name.rsplit('.').next().unwrap_or_default();
    let kind = FileKind::from_extension(extension)
        .ok_or_else(|| ParseError::UnsupportedExtension(extension.to_string()))?;

    let parsed = match kind {
        FileKind::Csv => self::csv::parse(bytes)?,
        FileKind::Excel => self::xlsx::parse(bytes)?,
    };

    info!(
        file = file_name,
        rows = parsed.0.row_count,
        columns = parsed.0.headers.len(),
        "file parsed"
    );
    Ok(parsed)
}
