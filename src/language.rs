use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use folio_contact::Locale;

use crate::routes::AppState;

pub const LANG_COOKIE: &str = "lang";

/// Active locale: the `lang` cookie, then `Accept-Language`, then `default`.
pub fn resolve(jar: &CookieJar, headers: &HeaderMap, default: Locale) -> Locale {
    jar.get(LANG_COOKIE)
        .and_then(|cookie| cookie.value().parse().ok())
        .or_else(|| {
            headers
                .get(header::ACCEPT_LANGUAGE)
                .and_then(|value| value.to_str().ok())
                .and_then(Locale::from_accept_language)
        })
        .unwrap_or(default)
}

pub fn cookie(locale: Locale) -> Cookie<'static> {
    Cookie::build((LANG_COOKIE, locale.as_str()))
        .path("/")
        .same_site(SameSite::Lax)
        .permanent()
        .build()
}

pub struct UserLocale(pub Locale);

impl FromRequestParts<AppState> for UserLocale {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        Ok(UserLocale(resolve(
            &jar,
            &parts.headers,
            state.config.site.locale(),
        )))
    }
}
