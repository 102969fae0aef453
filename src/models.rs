use kba_publications::{Diagnostic, ParseResult};
use serde::{Deserialize, Serialize};

pub const RESULT_CACHE_KEY_PREFIX: &str = "parse:v1:";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_RESULT_CACHE_TTL_SECONDS: u32 = 6 * 60 * 60;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ParseResponse {
    pub success: bool,
    pub data: Vec<ParseResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionResponse {
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}
