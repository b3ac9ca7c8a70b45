use std::sync::Arc;

use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use folio_contact::{Delivery, EmailJs};

use crate::{
    config::Config,
    sessions::Sessions,
    template::{NotFoundTemplate, Template},
};

mod contact;
mod health;
mod index;
mod language;

pub use contact::{DialogView, FieldView, StatusView};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: Sessions,
}

impl AppState {
    pub fn new(config: Config, delivery: Delivery) -> Self {
        Self {
            config,
            sessions: Sessions::new(Arc::new(delivery)),
        }
    }

    /// Hosted delivery when the EmailJS account is filled in, mailto otherwise.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let hosted = config.contact.emailjs.hosted();
        let recipient = config.contact.recipient.to_owned();

        let delivery = if hosted.is_configured() {
            let client = EmailJs::init(&hosted.public_key)?
                .with_endpoint(&config.contact.emailjs.endpoint);

            Delivery::select(hosted, recipient, Arc::new(client))
        } else {
            tracing::warn!("EmailJS is not configured, contact form falls back to mailto");

            Delivery::mailto(recipient)
        };

        Ok(Self::new(config, delivery))
    }
}

pub async fn fallback(template: Template) -> impl IntoResponse {
    let lang = template.locale().as_str();

    template.render_status(StatusCode::NOT_FOUND, NotFoundTemplate { lang })
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/", get(index::page))
        .route("/cv", get(index::cv))
        .route("/language", post(language::toggle))
        .route("/contact", post(contact::submit))
        .route("/contact/open", post(contact::open))
        .route("/contact/field", post(contact::field))
        .route("/contact/close", post(contact::close))
        .route("/contact/status", get(contact::status))
        .nest_service("/static", crate::assets::AssetsService::new())
        .fallback(fallback)
        .with_state(app_state)
}
