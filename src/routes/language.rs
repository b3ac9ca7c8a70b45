use axum::{
    extract::State,
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{language, routes::AppState};

/// Flips the locale cookie and sends the visitor back where they were.
pub async fn toggle(
    State(app): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> impl IntoResponse {
    let current = language::resolve(&jar, &headers, app.config.site.locale());
    let next = current.toggle();

    tracing::debug!(from = %current, to = %next, "locale toggled");

    let back = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .map(local_path)
        .unwrap_or_else(|| "/".to_owned());

    (jar.add(language::cookie(next)), Redirect::to(&back))
}

/// Keeps only the path and query of a referer so the redirect stays on site.
fn local_path(referer: &str) -> String {
    let path = match referer.split_once("://") {
        Some((_, rest)) => rest.find('/').map(|idx| &rest[idx..]).unwrap_or("/"),
        None => referer,
    };

    if path.starts_with('/') && !path.starts_with("//") {
        path.to_owned()
    } else {
        "/".to_owned()
    }
}
