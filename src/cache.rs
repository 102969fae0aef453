//! Parsed publications in the edge cache, stored as the JSON body that was served.

use worker::{Cache, Response};

use crate::error::ApiError;
use crate::models::RESULT_CACHE_KEY_PREFIX;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

fn cache_url(key: &str) -> String {
    format!("https://cache.local/{}", urlencoding::encode(key))
}

pub fn result_cache_key(publication: &str, source_url: &str) -> String {
    format!("{RESULT_CACHE_KEY_PREFIX}{publication}:{source_url}")
}

pub async fn get_result(key: &str) -> Result<Option<String>, ApiError> {
    let mut cached = Cache::default().get(cache_url(key), true).await?;

    let Some(mut response) = cached.take() else {
        return Ok(None);
    };

    Ok(Some(response.text().await?))
}

pub async fn put_result(key: &str, body: &str, ttl_seconds: u32) -> Result<(), ApiError> {
    let mut response = Response::ok(body)?;
    let headers = response.headers_mut();
    headers.set("Cache-Control", &format!("public, max-age={ttl_seconds}"))?;
    headers.set("Content-Type", JSON_CONTENT_TYPE)?;

    Cache::default().put(cache_url(key), response).await?;
    Ok(())
}
