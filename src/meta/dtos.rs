use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::extractor::ExtractionResult;
use crate::fetcher::FetchedPage;

/// Successful metadata lookup.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MetaResponse {
    pub host: String,
    /// `<meta>` values keyed by `name`/`property`/`itemprop`, `:` replaced by `_`.
    pub metas: HashMap<String, String>,
    pub protocol: String,
    pub status_code: u16,
    pub status_text: String,
    pub success: bool,
    pub title: String,
    pub url: String,
}

impl MetaResponse {
    pub fn new(page: &FetchedPage, extraction: ExtractionResult) -> Self {
        Self {
            host: page.host.clone(),
            metas: extraction.metas,
            protocol: page.protocol.clone(),
            status_code: page.status.as_u16(),
            status_text: page.status_text(),
            success: true,
            title: extraction.title,
            url: page.url.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub msg: String,
    pub success: bool,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            success: false,
        }
    }
}
