use kba_publications::{GlyphDecoding, Publication};
use worker::Env;

use crate::error::ApiError;
use crate::models::{DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_RESULT_CACHE_TTL_SECONDS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerConfig {
    pub max_upload_bytes: usize,
    /// Used when a request does not name a publication.
    pub default_publication: Publication,
    pub decoding: GlyphDecoding,
    pub result_cache_ttl_seconds: u32,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            default_publication: Publication::VehicleRegistry,
            decoding: GlyphDecoding::Latin1,
            result_cache_ttl_seconds: DEFAULT_RESULT_CACHE_TTL_SECONDS,
        }
    }
}

impl WorkerConfig {
    pub fn from_env(env: &Env) -> Result<Self, ApiError> {
        Self::from_lookup(|name| env.var(name).ok().map(|value| value.to_string()))
    }

    /// Reads each setting through `lookup`, keeping the default for unset or blank values.
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ApiError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = var("MAX_UPLOAD_BYTES") {
            config.max_upload_bytes = raw
                .trim()
                .parse()
                .map_err(|_| ApiError::Config(format!("MAX_UPLOAD_BYTES is not a size: {raw}")))?;
        }
        if let Some(raw) = var("DEFAULT_PUBLICATION") {
            config.default_publication = raw
                .parse()
                .map_err(|error| ApiError::Config(format!("DEFAULT_PUBLICATION: {error}")))?;
        }
        if let Some(raw) = var("GLYPH_DECODING") {
            config.decoding = raw
                .parse()
                .map_err(|error| ApiError::Config(format!("GLYPH_DECODING: {error}")))?;
        }
        if let Some(raw) = var("RESULT_CACHE_TTL_SECONDS") {
            config.result_cache_ttl_seconds = raw.trim().parse().map_err(|_| {
                ApiError::Config(format!("RESULT_CACHE_TTL_SECONDS is not a number: {raw}"))
            })?;
        }

        Ok(config)
    }
}
