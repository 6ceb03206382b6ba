// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Registration schema: raw form draft, validated record, and the rules connecting them.

use std::collections::BTreeMap;
use std::fmt;

use email_address::{EmailAddress, Options};
use serde::Serialize;

/// Allowed length range (in characters) for first and last name.
pub const NAME_LEN: (usize, usize) = (2, 120);
/// Allowed length range (in characters) for password and its confirmation.
pub const PASSWORD_LEN: (usize, usize) = (6, 120);
/// Minimum accepted age.
pub const MIN_AGE: i64 = 18;

const AGE_TOO_LOW: &str = "Age>=18";
const PASSWORDS_MISMATCH: &str = "Passwords don't match";
const INVALID_EMAIL: &str = "Invalid email";
const AGE_NOT_A_NUMBER: &str = "Expected number, received nan";
const AGE_NOT_AN_INTEGER: &str = "Expected integer, received float";
const AGE_TOO_LARGE: &str = "Number must be less than or equal to 9223372036854775807";

/// Form fields in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Age,
    Password,
    ConfirmPassword,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Age,
        Field::Password,
        Field::ConfirmPassword,
    ];

    /// Wire name of the field (camelCase, as sent to a backend).
    pub fn key(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Age => "age",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
        }
    }

    /// Human-readable label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Email => "Email",
            Field::Age => "Age",
            Field::Password => "Password",
            Field::ConfirmPassword => "Confirm Password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Raw form state, exactly as typed.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationDraft {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Age => &self.age,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::Age => &mut self.age,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
        };
        *slot = value;
    }

    /// True when every field is empty (the state after a reset).
    pub fn is_blank(&self) -> bool {
        Field::ALL.iter().all(|f| self.value(*f).is_empty())
    }
}

impl fmt::Debug for RegistrationDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationDraft")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("age", &self.age)
            .field("password", &"***")
            .field("confirm_password", &"***")
            .finish()
    }
}

/// A record that passed validation. Only obtainable through [`validate`].
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    first_name: String,
    last_name: String,
    email: String,
    age: i64,
    password: String,
}

impl Registration {
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[allow(dead_code)]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn age(&self) -> i64 {
        self.age
    }

    #[allow(dead_code)]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Loggable view of the record with secrets masked.
    pub fn redacted(&self) -> RedactedRegistration<'_> {
        RedactedRegistration {
            first_name: &self.first_name,
            last_name: &self.last_name,
            email: &self.email,
            age: self.age,
            password: "***",
            confirm_password: "***",
        }
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.redacted(), f)
    }
}

/// Serializable, password-free projection of a [`Registration`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactedRegistration<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub age: i64,
    pub password: &'static str,
    pub confirm_password: &'static str,
}

/// Per-field error messages, ordered like the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, String>,
}

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Insert or clear the error for a field.
    pub fn set(&mut self, field: Field, error: Option<String>) {
        match error {
            Some(message) => {
                self.errors.insert(field, message);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

/// Validate the whole draft, collecting every violation.
///
/// The password match check only runs once both password fields pass their
/// own length checks; its error lands on `confirmPassword`.
///
/// ```ignore
/// let mut draft = RegistrationDraft::default();
/// draft.age = "17".into();
/// let errors = validate(&draft).unwrap_err();
/// assert_eq!(errors.get(Field::Age), Some("Age>=18"));
/// ```
pub fn validate(draft: &RegistrationDraft) -> Result<Registration, FieldErrors> {
    let mut errors = FieldErrors::default();
    for field in Field::ALL.into_iter().filter(|f| *f != Field::Age) {
        errors.set(field, validate_field(draft, field));
    }

    match check_age(&draft.age) {
        Ok(age) if errors.is_empty() => Ok(Registration {
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            email: draft.email.clone(),
            age,
            password: draft.password.clone(),
        }),
        Ok(_) => Err(errors),
        Err(message) => {
            errors.set(Field::Age, Some(message));
            Err(errors)
        }
    }
}

/// Error the full validation would report for a single field, if any.
pub fn validate_field(draft: &RegistrationDraft, field: Field) -> Option<String> {
    match field {
        Field::FirstName => check_length(&draft.first_name, NAME_LEN),
        Field::LastName => check_length(&draft.last_name, NAME_LEN),
        Field::Email => check_email(&draft.email),
        Field::Age => check_age(&draft.age).err(),
        Field::Password => check_length(&draft.password, PASSWORD_LEN),
        Field::ConfirmPassword => check_length(&draft.confirm_password, PASSWORD_LEN).or_else(|| {
            let password_ok = check_length(&draft.password, PASSWORD_LEN).is_none();
            (password_ok && draft.password != draft.confirm_password)
                .then(|| PASSWORDS_MISMATCH.to_string())
        }),
    }
}

fn check_length(value: &str, (min, max): (usize, usize)) -> Option<String> {
    let len = value.chars().count();
    if len < min {
        Some(format!("String must contain at least {min} character(s)"))
    } else if len > max {
        Some(format!("String must contain at most {max} character(s)"))
    } else {
        None
    }
}

/// Plain `local@domain.tld` addresses only: no display name, no domain
/// literal, no quoted local part.
fn check_email(value: &str) -> Option<String> {
    let options = Options::default()
        .without_display_text()
        .without_domain_literal()
        .with_required_tld();
    let quoted = value.contains('"');
    if !quoted && EmailAddress::parse_with_options(value, options).is_ok() {
        None
    } else {
        Some(INVALID_EMAIL.to_string())
    }
}

/// Coerce the age input into an integer and apply the minimum.
fn check_age(raw: &str) -> Result<i64, String> {
    let age = parse_age(raw).map_err(str::to_string)?;
    if age < MIN_AGE {
        return Err(AGE_TOO_LOW.to_string());
    }
    Ok(age)
}

/// Accepts any whole number, including forms like `18.0` or `1e2`.
fn parse_age(raw: &str) -> Result<i64, &'static str> {
    let value = raw.trim();
    if let Ok(age) = value.parse::<i64>() {
        return Ok(age);
    }
    let num = match value.parse::<f64>() {
        Ok(num) if num.is_finite() => num,
        _ => return Err(AGE_NOT_A_NUMBER),
    };
    if num.fract() != 0.0 {
        return Err(AGE_NOT_AN_INTEGER);
    }
    // 2^63 is the first f64 past i64::MAX.
    if num >= i64::MAX as f64 {
        return Err(AGE_TOO_LARGE);
    }
    if num < i64::MIN as f64 {
        // Still a whole number, just far below the minimum.
        return Ok(i64::MIN);
    }
    Ok(num as i64)
}
