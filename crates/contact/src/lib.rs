//! Contact submission core for the portfolio site.
//!
//! A [`ContactDialog`] owns the visitor's form, validates it, and sends it
//! either through a hosted [`EmailDeliveryService`] or by building a
//! `mailto:` link for the visitor's own mail client.

mod classify;
mod delivery;
mod dialog;
mod emailjs;
mod form;
mod locale;
pub mod mailto;
mod validation;

pub use classify::*;
pub use delivery::*;
pub use dialog::*;
pub use emailjs::*;
pub use form::*;
pub use locale::*;
pub use validation::*;

rust_i18n::i18n!("locales", fallback = "en");
