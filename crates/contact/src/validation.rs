use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;
use strum::{AsRefStr, Display};

use crate::{Field, FormState, Locale};

// A permissive single-@ shape check, not RFC 5322.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

#[derive(Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationError {
    Required,
    InvalidEmail,
}

impl ValidationError {
    pub fn message_key(&self) -> &'static str {
        match self {
            ValidationError::Required => "contact.form.required",
            ValidationError::InvalidEmail => "contact.form.invalid_email",
        }
    }

    pub fn message(&self, locale: Locale) -> String {
        locale.t(self.message_key())
    }
}

/// Errors of the fields currently failing validation. Empty means valid.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, ValidationError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<ValidationError> {
        self.0.get(&field).copied()
    }

    pub fn insert(&mut self, field: Field, error: ValidationError) {
        self.0.insert(field, error);
    }

    pub fn remove(&mut self, field: Field) -> Option<ValidationError> {
        self.0.remove(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, ValidationError)> + '_ {
        self.0.iter().map(|(field, error)| (*field, *error))
    }

    pub fn localized(&self, locale: Locale) -> BTreeMap<Field, String> {
        self.iter()
            .map(|(field, error)| (field, error.message(locale)))
            .collect()
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

pub fn validate(form: &FormState) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    for field in [Field::Name, Field::Subject, Field::Message] {
        if form.get(field).trim().is_empty() {
            errors.insert(field, ValidationError::Required);
        }
    }

    if form.email.trim().is_empty() {
        errors.insert(Field::Email, ValidationError::Required);
    } else if !is_valid_email(&form.email) {
        errors.insert(Field::Email, ValidationError::InvalidEmail);
    }

    errors
}
