use axum::{
    extract::State,
    response::{IntoResponse, Response},
};

use crate::{
    content::{self, Cv, ProjectView},
    routes::{AppState, DialogView},
    sessions::Visitor,
    template::{Template, filters},
};

#[derive(askama::Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub lang: &'static str,
    pub toggle_label: String,
    pub github_url: String,
    pub linkedin_url: String,
    pub recipient: String,
    pub technologies: &'static [&'static str],
    pub projects: Vec<ProjectView>,
    pub cv: Option<Cv>,
    pub dialog: Option<DialogView>,
}

pub async fn page(template: Template, State(app): State<AppState>, visitor: Visitor) -> Response {
    render(template, app, visitor, false).await
}

pub async fn cv(template: Template, State(app): State<AppState>, visitor: Visitor) -> Response {
    render(template, app, visitor, true).await
}

async fn render(template: Template, app: AppState, visitor: Visitor, with_cv: bool) -> Response {
    let locale = template.locale();

    let dialog = match visitor.0 {
        Some(id) => match app.sessions.get(&id).await {
            Some(dialog) => {
                let snapshot = dialog.snapshot().await;
                snapshot
                    .open
                    .then(|| DialogView::new(snapshot, locale))
            }
            None => None,
        },
        None => None,
    };

    template
        .render(IndexTemplate {
            lang: locale.as_str(),
            toggle_label: locale.toggle().as_str().to_uppercase(),
            github_url: app.config.site.github_url.to_owned(),
            linkedin_url: app.config.site.linkedin_url.to_owned(),
            recipient: app.config.contact.recipient.to_owned(),
            technologies: content::TECHNOLOGIES,
            projects: content::projects(locale),
            cv: with_cv.then(|| Cv::new(locale)),
            dialog,
        })
        .into_response()
}
