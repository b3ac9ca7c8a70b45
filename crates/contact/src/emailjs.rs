//! Hosted delivery through the EmailJS REST API.

use async_trait::async_trait;
use serde::Serialize;

use crate::{DeliveryFailure, EmailDeliveryService, TemplateParams};

pub const EMAILJS_ENDPOINT: &str = "https://api.emailjs.com";

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateParams,
}

#[derive(Debug, thiserror::Error)]
pub enum EmailJsError {
    #[error("EmailJS public key is empty")]
    MissingPublicKey,

    #[error("failed to build the EmailJS http client: {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct EmailJs {
    client: reqwest::Client,
    endpoint: String,
    public_key: String,
}

impl EmailJs {
    /// Prepares the client once at startup with the account's public key.
    pub fn init(public_key: impl Into<String>) -> Result<Self, EmailJsError> {
        let public_key = public_key.into();
        if public_key.trim().is_empty() {
            return Err(EmailJsError::MissingPublicKey);
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()?;

        tracing::info!(endpoint = EMAILJS_ENDPOINT, "EmailJS client initialized");

        Ok(Self {
            client,
            endpoint: EMAILJS_ENDPOINT.to_owned(),
            public_key,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_owned();
        self
    }

    fn send_url(&self) -> String {
        format!("{}/api/v1.0/email/send", self.endpoint)
    }
}

#[async_trait]
impl EmailDeliveryService for EmailJs {
    #[tracing::instrument(skip(self, params), fields(to = %params.to_email))]
    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
        public_key: &str,
    ) -> Result<u16, DeliveryFailure> {
        let user_id = if public_key.is_empty() {
            self.public_key.as_str()
        } else {
            public_key
        };

        let request = SendRequest {
            service_id,
            template_id,
            user_id,
            template_params: params,
        };

        // No response at all is reported like a browser would: status 0.
        let response = match self.client.post(self.send_url()).json(&request).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "EmailJS request did not reach the service");
                return Err(DeliveryFailure::status(0));
            }
        };

        let status = response.status();
        if status.is_success() {
            tracing::info!(status = status.as_u16(), "EmailJS accepted the message");
            return Ok(status.as_u16());
        }

        let text = response.text().await.ok().filter(|t| !t.trim().is_empty());

        tracing::warn!(status = status.as_u16(), text = ?text, "EmailJS rejected the message");

        Err(DeliveryFailure {
            status: Some(status.as_u16()),
            text,
        })
    }
}
