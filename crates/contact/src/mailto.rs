//! Fallback delivery: a `mailto:` link opened in the visitor's mail client.

use crate::{FormState, Locale};

/// Plain-text body with localized labels ahead of the visitor's values.
pub fn body(form: &FormState, locale: Locale) -> String {
    format!(
        "{}: {}\n{}: {}\n\n{}:\n{}",
        locale.t("contact.mailto.name"),
        form.name,
        locale.t("contact.mailto.email"),
        form.email,
        locale.t("contact.mailto.message"),
        form.message
    )
}

pub fn uri(recipient: &str, form: &FormState, locale: Locale) -> String {
    format!(
        "mailto:{recipient}?subject={}&body={}&reply-to={}",
        urlencoding::encode(&form.subject),
        urlencoding::encode(&body(form, locale)),
        urlencoding::encode(&form.email)
    )
}

/// Reminder that nothing is sent until the visitor presses send themselves.
pub fn opened_note(recipient: &str, locale: Locale) -> String {
    rust_i18n::t!(
        "contact.mailto.opened",
        locale = locale.as_str(),
        recipient = recipient
    )
    .to_string()
}
