use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::FormRejection;
use thiserror::Error;

use crate::store::StoreError;
use crate::views;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

// A body that cannot be decoded is treated like a form with bad fields.
impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::Validation(format!("unreadable form body: {rejection}"))
    }
}

/// Converts `AppError` into one of the dedicated error pages.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let page = match &self {
            AppError::Store(store_err) => {
                tracing::error!(error = ?store_err, "Store error.");
                views::errors::server_error()
            }
            AppError::NotFound(what) => {
                tracing::debug!("Not found: {}", what);
                views::errors::not_found()
            }
            AppError::Validation(message) => views::errors::invalid_request(message),
        };

        (status, Html(page)).into_response()
    }
}
