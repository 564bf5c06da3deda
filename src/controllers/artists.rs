use axum::{
    extract::{Path, State},
    response::{Html, Redirect, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::{CookieJar, Form, FormRejection};
use std::sync::Arc;

use super::{listing_outcome, now, posted, record_id, subject, update_outcome};
use crate::{
    error::AppError,
    forms::{ArtistForm, SearchForm},
    middleware::Flash,
    queries::{ArtistDetail, SearchResults},
    store::Store,
    views, AppState,
};

pub fn routes<S: Store>() -> Router<Arc<AppState<S>>> {
    Router::new()
        .route("/artists", get(list_artists::<S>))
        .route("/artists/search", post(search_artists::<S>))
        .route("/artists/create", get(create_artist_form).post(create_artist::<S>))
        .route("/artists/{artist_id}", get(show_artist::<S>))
        .route("/artists/{artist_id}/edit", get(edit_artist_form::<S>).post(edit_artist::<S>))
}

// GET /artists
async fn list_artists<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    flash: Flash,
) -> Result<Html<String>, AppError> {
    let artists = state.store.artists().await?;
    Ok(Html(views::pages::artists(&artists, flash.message())))
}

// POST /artists/search
async fn search_artists<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    flash: Flash,
    form: Result<Form<SearchForm>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let form = posted(form)?;
    tracing::debug!("Search term is {:?}", form.search_term);
    let results = SearchResults::from(state.store.search_artists(&form.search_term).await?);
    Ok(Html(views::pages::search("artists", &form.search_term, &results, flash.message())))
}

// GET /artists/{artist_id}
async fn show_artist<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(artist_id): Path<String>,
    flash: Flash,
) -> Result<Html<String>, AppError> {
    let artist_id = record_id(&artist_id, "artist")?;
    let artist = state
        .store
        .artist(artist_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("artist {artist_id}")))?;
    let shows = state.store.artist_shows(artist_id).await?;

    let detail = ArtistDetail::new(artist, shows, now());
    Ok(Html(views::pages::artist(&detail, flash.message())))
}

// GET /artists/create
async fn create_artist_form(flash: Flash) -> Html<String> {
    Html(views::forms::artist(
        "List a new artist",
        "/artists/create",
        &ArtistForm::default(),
        flash.message(),
    ))
}

// POST /artists/create
async fn create_artist<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    form: Result<Form<ArtistForm>, FormRejection>,
) -> Response {
    let form = posted(form);
    let name = form.as_ref().map(ArtistForm::display_name).unwrap_or_default();
    let artist = subject("Artist", &name);
    let outcome = match form.and_then(ArtistForm::into_fields) {
        Ok(fields) => state.store.insert_artist(fields).await.map_err(AppError::from),
        Err(e) => Err(e),
    };

    listing_outcome(
        outcome,
        "artist",
        format!("{artist} was successfully listed!"),
        format!("An error occurred. {artist} could not be listed."),
    )
}

// GET /artists/{artist_id}/edit
async fn edit_artist_form<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(artist_id): Path<String>,
    flash: Flash,
) -> Result<Html<String>, AppError> {
    let artist_id = record_id(&artist_id, "artist")?;
    let artist = state
        .store
        .artist(artist_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("artist {artist_id}")))?;

    Ok(Html(views::forms::artist(
        &format!("Edit artist {}", artist.name),
        &format!("/artists/{artist_id}/edit"),
        &ArtistForm::from(&artist),
        flash.message(),
    )))
}

// POST /artists/{artist_id}/edit
async fn edit_artist<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(artist_id): Path<String>,
    jar: CookieJar,
    form: Result<Form<ArtistForm>, FormRejection>,
) -> Result<(CookieJar, Redirect), AppError> {
    let artist_id = record_id(&artist_id, "artist")?;
    let form = posted(form);
    let name = form.as_ref().map(ArtistForm::display_name).unwrap_or_default();
    let artist = subject("Artist", &name);
    let outcome = match form.and_then(ArtistForm::into_fields) {
        Ok(fields) => state.store.update_artist(artist_id, fields).await.map_err(AppError::from),
        Err(e) => Err(e),
    };

    let flash = update_outcome(
        outcome,
        "artist",
        artist_id,
        format!("{artist} was successfully updated!"),
        format!("An error occurred. {artist} could not be updated."),
    );
    Ok((jar.add(flash.into_cookie()), Redirect::to(&format!("/artists/{artist_id}"))))
}
