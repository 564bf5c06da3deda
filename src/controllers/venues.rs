use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::{CookieJar, Form, FormRejection};
use serde_json::json;
use std::sync::Arc;

use super::{listing_outcome, now, posted, record_id, subject, update_outcome};
use crate::{
    error::AppError,
    forms::{SearchForm, VenueForm},
    middleware::Flash,
    queries::{group_by_area, SearchResults, VenueDetail},
    store::Store,
    views, AppState,
};

pub fn routes<S: Store>() -> Router<Arc<AppState<S>>> {
    Router::new()
        .route("/venues", get(list_venues::<S>))
        .route("/venues/search", post(search_venues::<S>))
        .route("/venues/create", get(create_venue_form).post(create_venue::<S>))
        .route("/venues/{venue_id}", get(show_venue::<S>).delete(delete_venue::<S>))
        .route("/venues/{venue_id}/edit", get(edit_venue_form::<S>).post(edit_venue::<S>))
}

// GET /venues
async fn list_venues<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    flash: Flash,
) -> Result<Html<String>, AppError> {
    let areas = group_by_area(state.store.venue_locations().await?);
    Ok(Html(views::pages::venues(&areas, flash.message())))
}

// POST /venues/search
async fn search_venues<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    flash: Flash,
    form: Result<Form<SearchForm>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let form = posted(form)?;
    tracing::debug!("Search term is {:?}", form.search_term);
    let results = SearchResults::from(state.store.search_venues(&form.search_term).await?);
    Ok(Html(views::pages::search("venues", &form.search_term, &results, flash.message())))
}

// GET /venues/{venue_id}
async fn show_venue<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(venue_id): Path<String>,
    flash: Flash,
) -> Result<Html<String>, AppError> {
    let venue_id = record_id(&venue_id, "venue")?;
    let venue = state
        .store
        .venue(venue_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("venue {venue_id}")))?;
    let shows = state.store.venue_shows(venue_id).await?;

    let detail = VenueDetail::new(venue, shows, now());
    Ok(Html(views::pages::venue(&detail, flash.message())))
}

// GET /venues/create
async fn create_venue_form(flash: Flash) -> Html<String> {
    Html(views::forms::venue(
        "List a new venue",
        "/venues/create",
        &VenueForm::default(),
        flash.message(),
    ))
}

// POST /venues/create
async fn create_venue<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    form: Result<Form<VenueForm>, FormRejection>,
) -> Response {
    let form = posted(form);
    let name = form.as_ref().map(VenueForm::display_name).unwrap_or_default();
    let venue = subject("Venue", &name);
    let outcome = match form.and_then(VenueForm::into_fields) {
        Ok(fields) => state.store.insert_venue(fields).await.map_err(AppError::from),
        Err(e) => Err(e),
    };

    listing_outcome(
        outcome,
        "venue",
        format!("{venue} was successfully listed!"),
        format!("An error occurred. {venue} could not be listed."),
    )
}

// DELETE /venues/{venue_id}
async fn delete_venue<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(venue_id): Path<String>,
) -> Response {
    let Ok(venue_id) = venue_id.trim().parse::<i32>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": "venue id must be a whole number" })),
        )
            .into_response();
    };

    match state.store.delete_venue(venue_id).await {
        Ok(deleted) => {
            tracing::info!("delete venue {}: {} row(s) removed", venue_id, deleted);
            Json(json!({ "success": true, "deleted": deleted })).into_response()
        }
        Err(e) => {
            tracing::error!("delete venue {} failed, rolled back: {:?}", venue_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": "Venue could not be deleted" })),
            )
                .into_response()
        }
    }
}

// GET /venues/{venue_id}/edit
async fn edit_venue_form<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(venue_id): Path<String>,
    flash: Flash,
) -> Result<Html<String>, AppError> {
    let venue_id = record_id(&venue_id, "venue")?;
    let venue = state
        .store
        .venue(venue_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("venue {venue_id}")))?;

    Ok(Html(views::forms::venue(
        &format!("Edit venue {}", venue.name),
        &format!("/venues/{venue_id}/edit"),
        &VenueForm::from(&venue),
        flash.message(),
    )))
}

// POST /venues/{venue_id}/edit
async fn edit_venue<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(venue_id): Path<String>,
    jar: CookieJar,
    form: Result<Form<VenueForm>, FormRejection>,
) -> Result<(CookieJar, Redirect), AppError> {
    let venue_id = record_id(&venue_id, "venue")?;
    let form = posted(form);
    let name = form.as_ref().map(VenueForm::display_name).unwrap_or_default();
    let venue = subject("Venue", &name);
    let outcome = match form.and_then(VenueForm::into_fields) {
        Ok(fields) => state.store.update_venue(venue_id, fields).await.map_err(AppError::from),
        Err(e) => Err(e),
    };

    let flash = update_outcome(
        outcome,
        "venue",
        venue_id,
        format!("{venue} was successfully updated!"),
        format!("An error occurred. {venue} could not be updated."),
    );
    Ok((jar.add(flash.into_cookie()), Redirect::to(&format!("/venues/{venue_id}"))))
}
