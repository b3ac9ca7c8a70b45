use axum::{
    Json,
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use folio_contact::{ContactDialog, Field, FormState, Locale, Snapshot, SubmitOutcome};
use serde::{Deserialize, Serialize};
use strum::VariantArray;

use crate::{language::UserLocale, routes::AppState, sessions::Visitor};

pub const DIALOG_ANCHOR: &str = "/#contact-dialog";

pub struct FieldView {
    pub name: String,
    pub label: String,
    pub placeholder: String,
    pub value: String,
    pub error: Option<String>,
    pub multiline: bool,
    pub input_type: &'static str,
}

/// Everything the dialog partial needs, already translated.
pub struct DialogView {
    pub fields: Vec<FieldView>,
    pub status: &'static str,
    pub detail: Option<String>,
    pub sending: bool,
    pub mailto: Option<String>,
    pub auto_close_ms: Option<u128>,
}

impl DialogView {
    pub fn new(snapshot: Snapshot, locale: Locale) -> Self {
        let fields = Field::VARIANTS
            .iter()
            .map(|field| {
                let name = field.to_string();

                FieldView {
                    label: locale.t(&format!("contact.form.{name}")),
                    placeholder: locale.t(&format!("contact.form.{name}_placeholder")),
                    value: snapshot.form.get(*field).to_owned(),
                    error: snapshot.errors.get(*field).map(|err| err.message(locale)),
                    multiline: *field == Field::Message,
                    input_type: if *field == Field::Email { "email" } else { "text" },
                    name,
                }
            })
            .collect();

        Self {
            fields,
            status: snapshot.status.name(),
            detail: snapshot.status.detail().map(str::to_owned),
            sending: snapshot.status.is_sending(),
            mailto: snapshot.mailto,
            auto_close_ms: snapshot.auto_close.map(|delay| delay.as_millis()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct StatusView {
    pub open: bool,
    pub status: String,
    pub detail: Option<String>,
    pub mailto: Option<String>,
    pub auto_close_ms: Option<u64>,
}

impl From<Snapshot> for StatusView {
    fn from(snapshot: Snapshot) -> Self {
        Self {
            open: snapshot.open,
            status: snapshot.status.name().to_owned(),
            detail: snapshot.status.detail().map(str::to_owned),
            mailto: snapshot.mailto,
            auto_close_ms: snapshot
                .auto_close
                .map(|delay| u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)),
        }
    }
}

async fn dialog_of(app: &AppState, visitor: Visitor) -> Option<ContactDialog> {
    match visitor.0 {
        Some(id) => app.sessions.get(&id).await,
        None => None,
    }
}

pub async fn open(
    State(app): State<AppState>,
    visitor: Visitor,
    jar: CookieJar,
) -> impl IntoResponse {
    let (jar, id) = visitor.ensure(jar);

    app.sessions.prune().await;
    app.sessions.get_or_create(&id).await.open().await;

    let active = app.sessions.count().await;
    tracing::debug!(
        session = %id,
        active,
        "contact dialog opened"
    );

    (jar, Redirect::to(DIALOG_ANCHOR))
}

#[derive(Deserialize)]
pub struct FieldInput {
    pub field: Field,
    #[serde(default)]
    pub value: String,
}

pub async fn field(
    State(app): State<AppState>,
    visitor: Visitor,
    Form(input): Form<FieldInput>,
) -> StatusCode {
    if let Some(dialog) = dialog_of(&app, visitor).await {
        dialog.edit(input.field, input.value).await;
    }

    StatusCode::NO_CONTENT
}

pub async fn submit(
    State(app): State<AppState>,
    visitor: Visitor,
    UserLocale(locale): UserLocale,
    Form(form): Form<FormState>,
) -> Response {
    let Some(dialog) = dialog_of(&app, visitor).await else {
        return Redirect::to("/").into_response();
    };

    match dialog.submit_form(form, locale).await {
        SubmitOutcome::Closed => return Redirect::to("/").into_response(),
        SubmitOutcome::Busy => tracing::debug!("contact submit ignored while sending"),
        SubmitOutcome::Invalid(errors) => {
            tracing::debug!(invalid = errors.len(), "contact submit rejected")
        }
        SubmitOutcome::Delivered => tracing::info!("contact message sent"),
        SubmitOutcome::Navigate(_) => tracing::info!("contact message handed to mail client"),
        SubmitOutcome::Failed(err) => tracing::warn!(err = %err, "contact message failed"),
        SubmitOutcome::Discarded => {
            tracing::debug!("contact result discarded after close");
            return Redirect::to("/").into_response();
        }
    }

    Redirect::to(DIALOG_ANCHOR).into_response()
}

pub async fn close(State(app): State<AppState>, visitor: Visitor) -> impl IntoResponse {
    if let Some(dialog) = dialog_of(&app, visitor).await {
        dialog.close().await;
    }

    app.sessions.prune().await;

    Redirect::to("/")
}

pub async fn status(State(app): State<AppState>, visitor: Visitor) -> Json<StatusView> {
    let snapshot = match dialog_of(&app, visitor).await {
        Some(dialog) => dialog.snapshot().await,
        None => Snapshot::default(),
    };

    Json(snapshot.into())
}
