use thiserror::Error;

use crate::usecase::ports::repo::RepoError;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unsupported file extension: {0:?}")]
    UnsupportedExtension(String),
    #[error("no readable worksheet found")]
    NoWorksheet,
    #[error("file appears to be empty")]
    Empty,
    #[error("no data rows found after the header")]
    NoRows,
    #[error("no valid column headers found")]
    BlankHeaders,
    #[error("failed to decode file: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum CalcError {
    #[error("required revenue columns not found: {0}")]
    MissingColumns(String),
    #[error("row count {rows} exceeds the {limit} row limit for client-side calculation")]
    RowLimitExceeded { rows: usize, limit: usize },
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Calc(#[from] CalcError),
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}
