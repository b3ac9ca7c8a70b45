use crate::{DeliveryFailure, Locale};

/// A failed hosted delivery, in terms the visitor can act on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    #[error("gmail connection lacks authentication scopes")]
    AuthScope,

    #[error("template not found")]
    TemplateNotFound,

    #[error("service not found")]
    ServiceNotFound,

    #[error("{0}")]
    Provider(String),

    #[error("connection error")]
    Connectivity,

    #[error("bad parameters")]
    BadParameters,

    #[error("template or service not found")]
    CredentialsNotFound,

    #[error("gmail permission error")]
    GmailPermission,

    #[error("unknown delivery error")]
    Unknown,
}

struct Rule {
    matches: fn(&DeliveryFailure) -> bool,
    outcome: fn(&DeliveryFailure) -> DeliveryError,
}

fn text(failure: &DeliveryFailure) -> Option<&str> {
    failure.text.as_deref().filter(|t| !t.is_empty())
}

fn text_contains(failure: &DeliveryFailure, needles: &[&str]) -> bool {
    text(failure).is_some_and(|t| needles.iter().all(|n| t.contains(n)))
}

fn status_is(failure: &DeliveryFailure, status: u16) -> bool {
    text(failure).is_none() && failure.status == Some(status)
}

// Evaluated top to bottom, first match wins.
const RULES: &[Rule] = &[
    Rule {
        matches: |f| {
            text_contains(f, &["insufficient authentication scopes"])
                || text_contains(f, &["Gmail_API"])
        },
        outcome: |_| DeliveryError::AuthScope,
    },
    Rule {
        matches: |f| text_contains(f, &["template", "not found"]),
        outcome: |_| DeliveryError::TemplateNotFound,
    },
    Rule {
        matches: |f| text_contains(f, &["service", "not found"]),
        outcome: |_| DeliveryError::ServiceNotFound,
    },
    Rule {
        matches: |f| text(f).is_some(),
        outcome: |f| DeliveryError::Provider(text(f).unwrap_or_default().to_owned()),
    },
    Rule {
        matches: |f| status_is(f, 0),
        outcome: |_| DeliveryError::Connectivity,
    },
    Rule {
        matches: |f| status_is(f, 400),
        outcome: |_| DeliveryError::BadParameters,
    },
    Rule {
        matches: |f| status_is(f, 404),
        outcome: |_| DeliveryError::CredentialsNotFound,
    },
    Rule {
        matches: |f| status_is(f, 412),
        outcome: |_| DeliveryError::GmailPermission,
    },
];

impl DeliveryError {
    pub fn classify(failure: &DeliveryFailure) -> Self {
        RULES
            .iter()
            .find(|rule| (rule.matches)(failure))
            .map(|rule| (rule.outcome)(failure))
            .unwrap_or(DeliveryError::Unknown)
    }

    /// Dictionary key of the localized message; `None` for provider text,
    /// which is shown as received.
    pub fn message_key(&self) -> Option<&'static str> {
        let key = match self {
            DeliveryError::AuthScope => "contact.errors.auth_scope",
            DeliveryError::TemplateNotFound => "contact.errors.template_not_found",
            DeliveryError::ServiceNotFound => "contact.errors.service_not_found",
            DeliveryError::Provider(_) => return None,
            DeliveryError::Connectivity => "contact.errors.connectivity",
            DeliveryError::BadParameters => "contact.errors.bad_parameters",
            DeliveryError::CredentialsNotFound => "contact.errors.credentials_not_found",
            DeliveryError::GmailPermission => "contact.errors.gmail_permission",
            DeliveryError::Unknown => "contact.errors.unknown",
        };

        Some(key)
    }

    pub fn message(&self, locale: Locale) -> String {
        match (self, self.message_key()) {
            (DeliveryError::Provider(text), _) => text.to_owned(),
            (_, Some(key)) => locale.t(key),
            (_, None) => locale.t("contact.errors.unknown"),
        }
    }
}
