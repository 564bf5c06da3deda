use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::any::Any;
use std::sync::Arc;

use crate::{middleware::Flash, store::Store, views, AppState};

pub fn routes<S: Store>() -> Router<Arc<AppState<S>>> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(|| async { "OK" }))
}

async fn index(flash: Flash) -> Html<String> {
    Html(views::pages::home(flash.message()))
}

/// Fallback for every unknown route.
pub async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(views::errors::not_found()))
}

/// Turns a handler panic into the server error page.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("handler panicked: {}", detail);

    (StatusCode::INTERNAL_SERVER_ERROR, Html(views::errors::server_error())).into_response()
}
