//! Local field validation for the credential forms.
//!
//! Failures here are shown inline per field and never reach the network or
//! the session store. Text fields are trimmed; passwords are taken as typed.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use std::sync::LazyLock;

use regex::Regex;

use crate::net::types::{ForgotPasswordRequest, LoginRequest, ResetPasswordRequest, ResetToken, SignupRequest};

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_NAME_LEN: usize = 2;

pub const EMAIL_REQUIRED: &str = "Email is required.";
pub const EMAIL_INVALID: &str = "Enter a valid email address.";
pub const PASSWORD_REQUIRED: &str = "Password is required.";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters.";
pub const NAME_REQUIRED: &str = "Name is required.";
pub const NAME_TOO_SHORT: &str = "Name must be at least 2 characters.";
pub const CONFIRM_REQUIRED: &str = "Confirm your new password.";
pub const PASSWORDS_DIFFER: &str = "Passwords do not match.";

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Password,
    NewPassword,
    RePassword,
}

/// Per-field messages in the order the fields appear on the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(Field, &'static str)>);

impl FieldErrors {
    fn check(&mut self, field: Field, result: Result<(), &'static str>) {
        if let Err(msg) = result {
            self.0.push((field, msg));
        }
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.iter().find(|(f, _)| *f == field).map(|(_, msg)| *msg)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err(EMAIL_REQUIRED);
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(EMAIL_INVALID);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.is_empty() {
        return Err(PASSWORD_REQUIRED);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(PASSWORD_TOO_SHORT);
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(NAME_REQUIRED);
    }
    if name.chars().count() < MIN_NAME_LEN {
        return Err(NAME_TOO_SHORT);
    }
    Ok(())
}

/// # Errors
///
/// Returns the per-field messages when any field is invalid.
pub fn validate_login(email: &str, password: &str) -> Result<LoginRequest, FieldErrors> {
    let mut errors = FieldErrors::default();
    errors.check(Field::Email, validate_email(email));
    errors.check(Field::Password, validate_password(password));
    errors.into_result(|| LoginRequest { email: email.trim().to_owned(), password: password.to_owned() })
}

/// # Errors
///
/// Returns the per-field messages when any field is invalid.
pub fn validate_signup(name: &str, email: &str, password: &str) -> Result<SignupRequest, FieldErrors> {
    let mut errors = FieldErrors::default();
    errors.check(Field::Name, validate_name(name));
    errors.check(Field::Email, validate_email(email));
    errors.check(Field::Password, validate_password(password));
    errors.into_result(|| SignupRequest {
        name: name.trim().to_owned(),
        email: email.trim().to_owned(),
        password: password.to_owned(),
    })
}

/// # Errors
///
/// Returns the email message when the address is missing or malformed.
pub fn validate_forgot(email: &str) -> Result<ForgotPasswordRequest, FieldErrors> {
    let mut errors = FieldErrors::default();
    errors.check(Field::Email, validate_email(email));
    errors.into_result(|| ForgotPasswordRequest { email: email.trim().to_owned() })
}

/// Validate the reset form against the link it was opened from.
///
/// The confirmation must equal the new password; the check runs before any
/// request is built.
///
/// # Errors
///
/// Returns the per-field messages when either password is invalid or they differ.
pub fn validate_reset(
    new_password: &str,
    re_password: &str,
    link: &ResetToken,
) -> Result<ResetPasswordRequest, FieldErrors> {
    let mut errors = FieldErrors::default();
    errors.check(Field::NewPassword, validate_password(new_password));
    let confirm = if re_password.is_empty() {
        Err(CONFIRM_REQUIRED)
    } else if re_password != new_password {
        Err(PASSWORDS_DIFFER)
    } else {
        Ok(())
    };
    errors.check(Field::RePassword, confirm);
    errors.into_result(|| ResetPasswordRequest {
        new_password: new_password.to_owned(),
        re_password: re_password.to_owned(),
        token: link.token.clone(),
        email: link.email.clone(),
        time: link.time.clone(),
    })
}
