pub mod pages;
pub mod venues;
pub mod artists;
pub mod shows;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Router,
};
use axum_extra::extract::{Form, FormRejection};
use chrono::NaiveDateTime;
use std::sync::Arc;

use crate::{error::AppError, flash::FlashMessage, store::Store, views, AppState};

pub fn routes<S: Store>() -> Router<Arc<AppState<S>>> {
    Router::new()
        .merge(pages::routes())
        .merge(venues::routes())
        .merge(artists::routes())
        .merge(shows::routes())
}

/// Request-time "now" used to split past and upcoming shows.
fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

// Non-numeric ids can never match a record.
fn record_id(raw: &str, kind: &str) -> Result<i32, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::NotFound(format!("{kind} {raw:?}")))
}

/// Unwraps a posted form; an undecodable body becomes a validation failure.
fn posted<T>(form: Result<Form<T>, FormRejection>) -> Result<T, AppError> {
    form.map(|Form(inner)| inner).map_err(AppError::from)
}

// "Venue Grand Hall", or just "Venue" when no name was submitted.
fn subject(kind: &str, name: &str) -> String {
    if name.is_empty() {
        kind.to_string()
    } else {
        format!("{kind} {name}")
    }
}

/// Renders the landing page with the outcome of a create form.
///
/// Both outcomes share the page; the flash text and status code tell them apart.
fn listing_outcome(
    outcome: Result<i32, AppError>,
    what: &str,
    success: String,
    failure: String,
) -> Response {
    match outcome {
        Ok(id) => {
            tracing::info!("{} {} listed", what, id);
            let flash = FlashMessage::success(success);
            (StatusCode::CREATED, Html(views::pages::home(Some(&flash)))).into_response()
        }
        Err(e) => {
            match &e {
                AppError::Store(err) => tracing::error!("create {} failed, rolled back: {:?}", what, err),
                other => tracing::warn!("create {} rejected: {}", what, other),
            }
            let flash = FlashMessage::error(failure);
            (e.status(), Html(views::pages::home(Some(&flash)))).into_response()
        }
    }
}

/// Picks the flash message for an edit form submission.
fn update_outcome(
    outcome: Result<bool, AppError>,
    what: &str,
    id: i32,
    success: String,
    failure: String,
) -> FlashMessage {
    match outcome {
        Ok(true) => {
            tracing::info!("{} {} updated", what, id);
            FlashMessage::success(success)
        }
        Ok(false) => {
            tracing::warn!("{} {} does not exist, nothing updated", what, id);
            FlashMessage::error(failure)
        }
        Err(AppError::Store(err)) => {
            tracing::error!("update {} {} failed, rolled back: {:?}", what, id, err);
            FlashMessage::error(failure)
        }
        Err(other) => {
            tracing::warn!("update {} {} rejected: {}", what, id, other);
            FlashMessage::error(failure)
        }
    }
}
