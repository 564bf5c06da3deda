use axum::{
    extract::State,
    response::{Html, Response},
    routing::get,
    Router,
};
use axum_extra::extract::{Form, FormRejection};
use std::sync::Arc;

use super::{listing_outcome, posted};
use crate::{
    error::AppError,
    forms::ShowForm,
    middleware::Flash,
    queries::ShowListingEntry,
    store::Store,
    views, AppState,
};

pub fn routes<S: Store>() -> Router<Arc<AppState<S>>> {
    Router::new()
        .route("/shows", get(list_shows::<S>))
        .route("/shows/create", get(create_show_form).post(create_show::<S>))
}

// GET /shows
async fn list_shows<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    flash: Flash,
) -> Result<Html<String>, AppError> {
    let shows: Vec<ShowListingEntry> = state
        .store
        .shows()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Html(views::pages::shows(&shows, flash.message())))
}

// GET /shows/create
async fn create_show_form(flash: Flash) -> Html<String> {
    Html(views::forms::show(flash.message()))
}

// POST /shows/create
async fn create_show<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    form: Result<Form<ShowForm>, FormRejection>,
) -> Response {
    let outcome = match posted(form).and_then(ShowForm::into_new_show) {
        Ok(show) => {
            tracing::debug!(
                "Artist: {}, Venue: {}, Start Time: {}",
                show.artist_id,
                show.venue_id,
                show.start_time
            );
            state.store.insert_show(show).await.map_err(AppError::from)
        }
        Err(e) => Err(e),
    };

    listing_outcome(
        outcome,
        "show",
        "Show was successfully listed!".to_string(),
        "An error occurred. Show could not be listed.".to_string(),
    )
}
