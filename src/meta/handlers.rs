use axum::{
    Json,
    extract::{RawQuery, State},
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE, CONTENT_TYPE,
        },
    },
    response::{IntoResponse, Response},
};
use tracing::{info, instrument};

use crate::{
    app_state::AppState,
    extractor,
    meta::{
        dtos::{ErrorResponse, MetaResponse},
        errors::ApiError,
    },
    normalizer,
};

const JSON_UTF8: &str = "application/json;charset=UTF-8";

/// Headers every successful response carries.
pub fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("Content-Type"));
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("GET,OPTIONS"));
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static("86400"));
    headers
}

/// Pulls the first `url` parameter out of a raw query string.
pub fn target_url(query: Option<&str>) -> Result<String, ApiError> {
    let query = query.filter(|q| !q.is_empty()).ok_or(ApiError::NoQuery)?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "url")
        .map(|(_, value)| value.into_owned())
        .ok_or(ApiError::MissingUrl)
}

#[utoipa::path(
    get,
    path = "/api",
    tag = "meta",
    params(
        ("url" = String, Query, description = "Absolute URL of the page to inspect")
    ),
    responses(
        (status = 200, description = "Title and meta tags of the page", body = MetaResponse),
        (status = 400, description = "Missing query string or url parameter", body = ErrorResponse),
        (status = 500, description = "The page could not be fetched or read", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn get_meta(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    let url = target_url(query.as_deref())?;

    let mut page = state.fetcher.fetch(&url).await?;
    let body = page.take_body();
    let content_type = page.content_type.clone();

    // The body reader blocks, and owns the connection until it is dropped
    // at the end of this closure, whichever way extraction ends.
    let extraction = tokio::task::spawn_blocking(move || {
        extractor::extract(normalizer::normalize(body, content_type.as_deref()))
    })
    .await??;

    let body = MetaResponse::new(&page, extraction);
    info!(
        url = %body.url,
        status = body.status_code,
        metas = body.metas.len(),
        "extracted page metadata"
    );

    let mut response = Json(body).into_response();
    let headers = response.headers_mut();
    headers.extend(cors_headers());
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8));
    Ok(response)
}

/// CORS preflight.
pub async fn preflight() -> impl IntoResponse {
    (StatusCode::NO_CONTENT, cors_headers())
}
