use axum::{
    extract::{FromRequestParts, Request},
    http::{header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::convert::Infallible;

use crate::flash::{removal_cookie, FlashMessage, FLASH_COOKIE};

/// The flash message left by the previous request, if any.
#[derive(Debug, Clone, Default)]
pub struct Flash(pub Option<FlashMessage>);

impl Flash {
    pub fn message(&self) -> Option<&FlashMessage> {
        self.0.as_ref()
    }
}

// Reads the message stashed by `flash_layer`
impl<S: Send + Sync> FromRequestParts<S> for Flash {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Flash>().cloned().unwrap_or_default())
    }
}

/// Moves the flash cookie into request extensions and clears it once a page
/// has been rendered.
///
/// Redirects keep the cookie alive so the message reaches the next page, and a
/// response that sets a fresh message is left untouched.
pub async fn flash_layer(jar: CookieJar, mut request: Request, next: Next) -> Response {
    let pending = jar.get(FLASH_COOKIE).map(|c| FlashMessage::decode(c.value()));
    request
        .extensions_mut()
        .insert(Flash(pending.clone().flatten()));

    let response = next.run(request).await;

    if pending.is_none() || response.status().is_redirection() || sets_flash(&response) {
        return response;
    }
    (jar.remove(removal_cookie()), response).into_response()
}

fn sets_flash(response: &Response) -> bool {
    let prefix = format!("{FLASH_COOKIE}=");
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with(&prefix))
}
