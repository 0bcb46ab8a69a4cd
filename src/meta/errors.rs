use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{error, warn};

use crate::{extractor::ExtractError, fetcher::FetchError, meta::dtos::ErrorResponse};

/// Everything that can go wrong serving one metadata request. Each error
/// ends only its own request.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("no query")]
    NoQuery,

    #[error("need url query")]
    MissingUrl,

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("extraction worker failed: {0}")]
    Worker(#[from] JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NoQuery | Self::MissingUrl => StatusCode::BAD_REQUEST,
            Self::Fetch(_) | Self::Extract(_) | Self::Worker(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "metadata request failed");
        } else {
            warn!(error = %self, "rejected metadata request");
        }

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}
