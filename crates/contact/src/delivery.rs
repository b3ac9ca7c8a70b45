use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::FormState;

pub const SERVICE_ID_PLACEHOLDER: &str = "YOUR_SERVICE_ID";
pub const TEMPLATE_ID_PLACEHOLDER: &str = "YOUR_TEMPLATE_ID";
pub const PUBLIC_KEY_PLACEHOLDER: &str = "YOUR_PUBLIC_KEY";

/// Identifiers of the hosted email template. Each one still holding its
/// placeholder means the site owner has not set hosted delivery up yet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HostedConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl Default for HostedConfig {
    fn default() -> Self {
        Self {
            service_id: SERVICE_ID_PLACEHOLDER.to_owned(),
            template_id: TEMPLATE_ID_PLACEHOLDER.to_owned(),
            public_key: PUBLIC_KEY_PLACEHOLDER.to_owned(),
        }
    }
}

impl HostedConfig {
    pub fn is_configured(&self) -> bool {
        self.service_id != SERVICE_ID_PLACEHOLDER
            && self.template_id != TEMPLATE_ID_PLACEHOLDER
            && self.public_key != PUBLIC_KEY_PLACEHOLDER
    }
}

/// Variables handed to the hosted email template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub subject: String,
    pub message: String,
    pub to_email: String,
    pub reply_to: String,
}

impl TemplateParams {
    pub fn new(form: &FormState, recipient: &str) -> Self {
        Self {
            from_name: form.name.to_owned(),
            from_email: form.email.to_owned(),
            subject: form.subject.to_owned(),
            message: form.message.to_owned(),
            to_email: recipient.to_owned(),
            reply_to: form.email.to_owned(),
        }
    }
}

/// What a delivery service reports when it refuses or cannot take a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("email delivery failed (status: {status:?}, text: {text:?})")]
pub struct DeliveryFailure {
    pub status: Option<u16>,
    pub text: Option<String>,
}

impl DeliveryFailure {
    pub fn status(status: u16) -> Self {
        Self {
            status: Some(status),
            text: None,
        }
    }

    pub fn text(status: u16, text: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            text: Some(text.into()),
        }
    }
}

#[async_trait]
pub trait EmailDeliveryService: Send + Sync {
    /// Attempts one delivery and returns the HTTP-like status code of the
    /// service's answer.
    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
        public_key: &str,
    ) -> Result<u16, DeliveryFailure>;
}

#[derive(Clone)]
pub enum Strategy {
    Hosted {
        service: Arc<dyn EmailDeliveryService>,
        config: HostedConfig,
    },
    Mailto,
}

/// How submitted forms leave the site, and where they go.
#[derive(Clone)]
pub struct Delivery {
    strategy: Strategy,
    recipient: String,
}

impl Delivery {
    /// Uses `service` when `config` is filled in, the mailto fallback otherwise.
    pub fn select(
        config: HostedConfig,
        recipient: impl Into<String>,
        service: Arc<dyn EmailDeliveryService>,
    ) -> Self {
        let strategy = if config.is_configured() {
            Strategy::Hosted { service, config }
        } else {
            Strategy::Mailto
        };

        Self {
            strategy,
            recipient: recipient.into(),
        }
    }

    pub fn mailto(recipient: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::Mailto,
            recipient: recipient.into(),
        }
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn is_hosted(&self) -> bool {
        matches!(self.strategy, Strategy::Hosted { .. })
    }
}
