use axum::{
    RequestPartsExt,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Response},
};
use folio_contact::Locale;
use std::{collections::HashMap, convert::Infallible};

use crate::{language::UserLocale, routes::AppState};

pub(crate) mod filters {
    use folio_contact::Locale;

    /// Translates a dictionary key into the request's locale. Keys under
    /// `contact.` live in the contact crate's dictionary.
    #[askama::filter_fn]
    pub fn t(value: &str, values: &dyn askama::Values) -> askama::Result<String> {
        let preferred_language = askama::get_value::<String>(values, "preferred_language")?;

        if value.starts_with("contact.") {
            let locale = preferred_language.parse::<Locale>().unwrap_or_default();
            return Ok(locale.t(value));
        }

        Ok(rust_i18n::t!(value, locale = preferred_language).to_string())
    }
}

pub struct Template {
    locale: Locale,
}

impl Template {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    fn render_with_values<T: askama::Template>(
        &self,
        template: T,
    ) -> Result<String, askama::Error> {
        let mut values: HashMap<&str, Box<dyn std::any::Any>> = HashMap::new();
        values.insert(
            "preferred_language",
            Box::new(self.locale.as_str().to_owned()),
        );

        template.render_with_values(&values)
    }

    pub fn render<T: askama::Template>(&self, template: T) -> Response {
        match self.render_with_values(template) {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!(err = %err, "failed to render template");

                let server_error = ServerTemplate {
                    lang: self.locale.as_str(),
                };

                match self.render_with_values(server_error) {
                    Ok(html) => (StatusCode::INTERNAL_SERVER_ERROR, Html(html)).into_response(),
                    Err(err) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to render template. Error: {err}"),
                    )
                        .into_response(),
                }
            }
        }
    }

    pub fn render_status<T: askama::Template>(&self, status: StatusCode, template: T) -> Response {
        let mut response = self.render(template);
        if response.status().is_success() {
            *response.status_mut() = status;
        }

        response
    }
}

impl FromRequestParts<AppState> for Template {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let UserLocale(locale) = parts.extract_with_state::<UserLocale, _>(state).await?;

        Ok(Template { locale })
    }
}

#[derive(askama::Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {
    pub lang: &'static str,
}

#[derive(askama::Template)]
#[template(path = "500.html")]
pub struct ServerTemplate {
    pub lang: &'static str,
}
