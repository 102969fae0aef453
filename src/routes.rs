use std::collections::HashMap;

use kba_publications::{ParseOptions, Publication, parse_pdf_bytes};
use serde::Serialize;
use url::Url;
use worker::{Context, Env, Fetch, FormEntry, Request, Response, Result, RouteContext, Router};

use crate::cache;
use crate::config::WorkerConfig;
use crate::error::ApiError;
use crate::models::{ParseResponse, VersionResponse};

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: WorkerConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
    Bypass,
}

impl CacheStatus {
    pub const fn as_header_value(self) -> &'static str {
        match self {
            Self::Hit => "HIT",
            Self::Miss => "MISS",
            Self::Bypass => "BYPASS",
        }
    }
}

pub async fn handle(req: Request, env: Env, _ctx: Context) -> Result<Response> {
    let config = match WorkerConfig::from_env(&env) {
        Ok(config) => config,
        Err(error) => {
            worker::console_error!("invalid worker configuration: {error}");
            return error.into_response();
        }
    };

    Router::with_data(AppState { config })
        .post_async("/api/v1/upload", upload_route)
        .get_async("/api/v1/parse", parse_url_route)
        .get_async("/api/v1/version", version_route)
        .run(req, env)
        .await
}

async fn upload_route(mut req: Request, ctx: RouteContext<AppState>) -> Result<Response> {
    match upload_response(&mut req, &ctx.data.config).await {
        Ok(response) => json_response(&response),
        Err(error) => error.into_response(),
    }
}

async fn parse_url_route(req: Request, ctx: RouteContext<AppState>) -> Result<Response> {
    match parse_url_response(&req, &ctx.data.config).await {
        Ok(response) => Ok(response),
        Err(error) => error.into_response(),
    }
}

async fn version_route(_req: Request, _ctx: RouteContext<AppState>) -> Result<Response> {
    json_response(&VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn upload_response(
    req: &mut Request,
    config: &WorkerConfig,
) -> Result<ParseResponse, ApiError> {
    let query = parse_query(req)?;
    let publication = parse_publication_query(&query, config.default_publication)?;

    if let Some(length) = req.headers().get("Content-Length")? {
        let length = length
            .trim()
            .parse::<usize>()
            .map_err(|_| ApiError::BadRequest("invalid Content-Length header".to_string()))?;
        check_upload_size(length, config.max_upload_bytes)?;
    }

    let form = req.form_data().await?;
    let Some(FormEntry::File(file)) = form.get("file") else {
        return Err(ApiError::BadRequest(
            "multipart field `file` with the PDF is required".to_string(),
        ));
    };
    let bytes = file.bytes().await?;
    check_upload_size(bytes.len(), config.max_upload_bytes)?;

    let response = build_parse_response(&bytes, &parse_options(publication, config))?;
    log_parsed(&response, publication, &file.name());
    Ok(response)
}

async fn parse_url_response(req: &Request, config: &WorkerConfig) -> Result<Response, ApiError> {
    let query = parse_query(req)?;
    let publication = parse_publication_query(&query, config.default_publication)?;
    let source = parse_source_url(&query)?;
    let force = parse_flag(&query, "force");
    let cache_key = cache::result_cache_key(publication.as_str(), source.as_str());

    if !force && let Some(body) = cache::get_result(&cache_key).await? {
        return json_body_response(body, CacheStatus::Hit);
    }

    let bytes = fetch_pdf_bytes(source.clone(), config.max_upload_bytes).await?;
    let response = build_parse_response(&bytes, &parse_options(publication, config))?;
    log_parsed(&response, publication, source.as_str());

    let body = serde_json::to_string(&response)?;
    cache::put_result(&cache_key, &body, config.result_cache_ttl_seconds).await?;

    let status = if force {
        CacheStatus::Bypass
    } else {
        CacheStatus::Miss
    };
    json_body_response(body, status)
}

async fn fetch_pdf_bytes(source: Url, max_bytes: usize) -> Result<Vec<u8>, ApiError> {
    let mut response = Fetch::Url(source).send().await?;
    let status = response.status_code();
    if status >= 400 {
        return Err(ApiError::Upstream(format!(
            "failed to fetch publication: status {status}"
        )));
    }

    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        return Err(ApiError::Upstream(
            "fetched publication is empty".to_string(),
        ));
    }
    check_upload_size(bytes.len(), max_bytes)?;
    Ok(bytes)
}

fn log_parsed(response: &ParseResponse, publication: Publication, source: &str) {
    let records = response
        .data
        .iter()
        .map(|result| result.total)
        .sum::<usize>();
    worker::console_log!(
        "parsed {} publication from {}: records={}, dropped_cells={}",
        publication.as_str(),
        source,
        records,
        response.diagnostics.len()
    );
}

fn parse_options(publication: Publication, config: &WorkerConfig) -> ParseOptions {
    ParseOptions {
        publication,
        pages: None,
        decoding: config.decoding,
    }
}

/// Runs the parser over a complete document and wraps the result for the API.
pub fn build_parse_response(
    pdf_bytes: &[u8],
    options: &ParseOptions,
) -> Result<ParseResponse, ApiError> {
    let report = parse_pdf_bytes(pdf_bytes, options)?;
    Ok(ParseResponse {
        success: true,
        data: report.results,
        diagnostics: report.diagnostics,
    })
}

pub fn check_upload_size(length: usize, limit: usize) -> Result<(), ApiError> {
    if length > limit {
        return Err(ApiError::PayloadTooLarge(format!(
            "publication is {length} bytes, the limit is {limit}"
        )));
    }
    Ok(())
}

fn json_response<T>(payload: &T) -> Result<Response>
where
    T: Serialize,
{
    let mut response = Response::from_json(payload)?;
    response.headers_mut().set("Cache-Control", "no-store")?;
    Ok(response)
}

fn json_body_response(body: String, cache_status: CacheStatus) -> Result<Response, ApiError> {
    let mut response = Response::ok(body)?;
    let headers = response.headers_mut();
    headers.set("Content-Type", "application/json; charset=utf-8")?;
    headers.set("X-Cache-Status", cache_status.as_header_value())?;
    headers.set("Cache-Control", "no-store")?;
    Ok(response)
}

fn parse_query(req: &Request) -> Result<HashMap<String, String>, ApiError> {
    let url = req.url()?;
    let query = url
        .query_pairs()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect::<HashMap<_, _>>();
    Ok(query)
}

pub fn parse_publication_query(
    query: &HashMap<String, String>,
    default: Publication,
) -> Result<Publication, ApiError> {
    let Some(raw) = query.get("publication") else {
        return Ok(default);
    };
    raw.parse::<Publication>().map_err(ApiError::BadRequest)
}

pub fn parse_source_url(query: &HashMap<String, String>) -> Result<Url, ApiError> {
    let raw = query
        .get("url")
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::BadRequest("query parameter `url` is required".to_string()))?;
    let url = Url::parse(raw)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::BadRequest(format!(
            "unsupported url scheme `{}`",
            url.scheme()
        )));
    }
    Ok(url)
}

pub fn parse_flag(query: &HashMap<String, String>, name: &str) -> bool {
    query.get(name).is_some_and(|value| {
        let lowered = value.trim().to_ascii_lowercase();
        lowered == "true" || lowered == "1" || lowered == "yes"
    })
}
