//! Profile validation rules
//!
//! Field rules for registration and updates. Email uniqueness needs the
//! database and is checked by the handlers after these pure checks pass.
//!
//! The password rule is deliberately narrow: exactly seven characters.

use serde::Deserialize;

use crate::shared::{FieldErrors, Role};

pub const PASSWORD_LENGTH: usize = 7;
pub const MIN_NAME_LENGTH: usize = 3;
/// Column limit shared by email and name
pub const MAX_FIELD_LENGTH: usize = 255;

pub const REQUIRED: &str = "This field is required.";
pub const EMAIL_INVALID: &str = "Enter a valid email address.";
pub const EMAIL_TAKEN: &str = "This email is already registered.";
pub const NAME_EMPTY: &str = "Name cannot be empty.";
pub const NAME_TOO_SHORT: &str = "Name must be at least 3 characters long.";
pub const PASSWORD_LENGTH_MISMATCH: &str = "Password must be exactly 7 characters long.";
pub const TOO_LONG: &str = "Ensure this field has no more than 255 characters.";

/// Raw profile body as sent by clients
///
/// Everything is optional here; which fields are required depends on
/// whether this is a create, a full update or a partial update.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct ProfilePayload {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Profile fields that passed validation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProfileInput {
    /// Normalized email
    pub email: Option<String>,
    pub name: Option<String>,
    /// Plaintext, still to be hashed
    pub password: Option<String>,
    pub role: Option<Role>,
}

/// Which fields must be present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Create and full update (PUT)
    AllRequired,
    /// Partial update (PATCH)
    Partial,
}

/// Lower-case the domain part of an email, leaving the local part as typed
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

pub fn check_email(email: &str) -> Result<(), &'static str> {
    if email.chars().count() > MAX_FIELD_LENGTH {
        return Err(TOO_LONG);
    }
    if email.contains('@') && email.contains('.') {
        Ok(())
    } else {
        Err(EMAIL_INVALID)
    }
}

pub fn check_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(NAME_EMPTY);
    }
    if trimmed.chars().count() < MIN_NAME_LENGTH {
        return Err(NAME_TOO_SHORT);
    }
    if name.chars().count() > MAX_FIELD_LENGTH {
        return Err(TOO_LONG);
    }
    Ok(())
}

pub fn check_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() == PASSWORD_LENGTH {
        Ok(())
    } else {
        Err(PASSWORD_LENGTH_MISMATCH)
    }
}

/// Validate every field of a payload, collecting all failures
pub fn validate_profile(payload: ProfilePayload, presence: Presence) -> (ProfileInput, FieldErrors) {
    let mut errors = FieldErrors::new();
    let mut input = ProfileInput::default();

    let mut fail = |field: &str, message: String| {
        errors.entry(field.to_string()).or_default().push(message);
    };

    match payload.email {
        Some(email) => {
            let email = normalize_email(&email);
            match check_email(&email) {
                Ok(()) => input.email = Some(email),
                Err(message) => fail("email", message.to_string()),
            }
        }
        None if presence == Presence::AllRequired => fail("email", REQUIRED.to_string()),
        None => {}
    }

    match payload.name {
        Some(name) => match check_name(&name) {
            Ok(()) => input.name = Some(name),
            Err(message) => fail("name", message.to_string()),
        },
        None if presence == Presence::AllRequired => fail("name", REQUIRED.to_string()),
        None => {}
    }

    match payload.password {
        Some(password) => match check_password(&password) {
            Ok(()) => input.password = Some(password),
            Err(message) => fail("password", message.to_string()),
        },
        None if presence == Presence::AllRequired => fail("password", REQUIRED.to_string()),
        None => {}
    }

    match payload.role {
        Some(role) => match role.parse::<Role>() {
            Ok(role) => input.role = Some(role),
            Err(_) => fail("role", format!("\"{}\" is not a valid choice.", role)),
        },
        None if presence == Presence::AllRequired => fail("role", REQUIRED.to_string()),
        None => {}
    }

    (input, errors)
}
