use std::io;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("operator `{operator}` expects {expected}, found {found}")]
pub struct OperandMismatch {
    pub operator: String,
    pub expected: &'static str,
    pub found: &'static str,
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON write error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read PDF container: {0}")]
    Container(#[from] lopdf::Error),

    #[error("failed to tokenize content stream of page {page}: {source}")]
    Tokenize {
        page: u32,
        #[source]
        source: lopdf::Error,
    },

    #[error("malformed operand on page {page}: {source}")]
    OperandType {
        page: u32,
        #[source]
        source: OperandMismatch,
    },

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("no pages available after applying selection")]
    NoPagesSelected,
}
