//! Test helpers: configurations, app construction and a small client that
//! keeps cookies between requests the way a browser would.

#![allow(dead_code)]

use std::collections::BTreeMap;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use folio::{
    AppState, Config,
    config::{ContactConfig, EmailJsConfig, ObservabilityConfig, ServerConfig, SiteConfig},
    routes::StatusView,
};
use http_body_util::BodyExt;
use serde::Serialize;
use tower::ServiceExt;

pub const RECIPIENT: &str = "owner@folio.localhost";

pub fn config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        site: SiteConfig::default(),
        contact: ContactConfig {
            recipient: RECIPIENT.to_string(),
            emailjs: EmailJsConfig::default(),
        },
        observability: ObservabilityConfig::default(),
    }
}

pub fn hosted_config(endpoint: &str) -> Config {
    let mut config = config();
    config.contact.emailjs = EmailJsConfig {
        endpoint: endpoint.to_string(),
        service_id: "service_folio".to_string(),
        template_id: "template_folio".to_string(),
        public_key: "pk_folio".to_string(),
    };
    config
}

pub fn app(config: Config) -> anyhow::Result<Router> {
    Ok(folio::server::app(AppState::from_config(config)?))
}

/// The app together with its state, for tests that inspect the session store.
pub fn app_with_state(config: Config) -> anyhow::Result<(Router, AppState)> {
    let state = AppState::from_config(config)?;

    Ok((folio::server::app(state.clone()), state))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }
}

pub struct TestClient {
    app: Router,
    cookies: BTreeMap<String, String>,
    accept_language: Option<String>,
}

impl TestClient {
    pub fn new(app: Router) -> Self {
        Self {
            app,
            cookies: BTreeMap::new(),
            accept_language: None,
        }
    }

    pub fn accept_language(mut self, value: &str) -> Self {
        self.accept_language = Some(value.to_owned());
        self
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn set_cookie(&mut self, name: &str, value: &str) {
        self.cookies.insert(name.to_owned(), value.to_owned());
    }

    pub async fn send(&mut self, mut req: Request<Body>) -> anyhow::Result<TestResponse> {
        if !self.cookies.is_empty() {
            let cookie = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            req.headers_mut().insert(header::COOKIE, cookie.parse()?);
        }
        if let Some(accept_language) = &self.accept_language {
            req.headers_mut()
                .insert(header::ACCEPT_LANGUAGE, accept_language.parse()?);
        }

        let resp = self.app.clone().oneshot(req).await?;

        for set_cookie in resp.headers().get_all(header::SET_COOKIE) {
            let set_cookie = set_cookie.to_str()?;
            let pair = set_cookie.split(';').next().unwrap_or_default();
            if let Some((name, value)) = pair.split_once('=') {
                self.cookies
                    .insert(name.trim().to_owned(), value.trim().to_owned());
            }
        }

        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = resp.into_body().collect().await?.to_bytes();

        Ok(TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec())?,
        })
    }

    pub async fn get(&mut self, uri: &str) -> anyhow::Result<TestResponse> {
        self.send(Request::builder().uri(uri).body(Body::empty())?)
            .await
    }

    pub async fn post(&mut self, uri: &str) -> anyhow::Result<TestResponse> {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())?,
        )
        .await
    }

    pub async fn post_form<T: Serialize>(
        &mut self,
        uri: &str,
        form: &T,
    ) -> anyhow::Result<TestResponse> {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(serde_urlencoded::to_string(form)?))?,
        )
        .await
    }

    pub async fn status(&mut self) -> anyhow::Result<StatusView> {
        let resp = self.get("/contact/status").await?;
        assert_eq!(resp.status, StatusCode::OK);

        Ok(serde_json::from_str(&resp.body)?)
    }
}

pub fn valid_form() -> [(&'static str, &'static str); 4] {
    [
        ("name", "Ada Lovelace"),
        ("email", "ada@example.com"),
        ("subject", "Hola & adiós"),
        ("message", "Hi, do you have time next month?"),
    ]
}
