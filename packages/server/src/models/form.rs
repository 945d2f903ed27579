//! Declarative form validation.
//!
//! A form is a typed record built from a [`RawForm`] (the untouched JSON
//! object sent by the client). Each field is checked against a fixed list of
//! [`Rule`]s and every failure is collected, so a single response reports all
//! problems at once. A form either builds completely or yields the full
//! [`FieldErrors`] map, never both.

use serde_json::{Map, Value};

use crate::error::{AppError, FieldErrors};

pub const REQUIRED_MSG: &str = "This field is required.";
pub const NOT_A_STRING_MSG: &str = "Not a valid string value.";
pub const NOT_AN_INTEGER_MSG: &str = "Not a valid integer value.";
pub const INVALID_EMAIL_MSG: &str = "Invalid email address.";

/// A single check applied to one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Strip surrounding whitespace before the other rules run.
    Trim,
    /// Field must be present and not blank. Stops the remaining rules when it fails.
    Required,
    /// Minimum length in characters.
    MinLength(usize),
    /// Maximum length in characters. Longer input is rejected, never truncated.
    MaxLength(usize),
    /// Must look like `local@domain.tld`.
    Email,
    /// Must equal the raw text of another field.
    EqualTo(&'static str),
    /// Inclusive integer range.
    Range { min: i64, max: i64 },
}

/// The unvalidated key/value payload of a request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawForm(Map<String, Value>);

impl RawForm {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field).filter(|v| !v.is_null())
    }

    fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }
}

impl From<Value> for RawForm {
    /// Anything other than a JSON object becomes an empty form.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

/// A typed record that can be validated out of a [`RawForm`].
pub trait Form: Sized {
    fn from_raw(raw: &RawForm) -> Result<Self, FieldErrors>;

    /// Validate and wrap failures as a 400 reported under `context`.
    fn validate(raw: &RawForm, context: &'static str) -> Result<Self, AppError> {
        Self::from_raw(raw).map_err(|errors| AppError::validation(context, errors))
    }
}

/// Collects field values and errors while a form is being built.
pub struct Validator<'a> {
    raw: &'a RawForm,
    errors: FieldErrors,
}

impl<'a> Validator<'a> {
    pub fn new(raw: &'a RawForm) -> Self {
        Self {
            raw,
            errors: FieldErrors::new(),
        }
    }

    /// Record an error against `field`.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Validate a text field. Returns an empty string when the field is absent.
    pub fn text(&mut self, field: &str, rules: &[Rule]) -> String {
        let value = match self.raw.get(field) {
            None => String::new(),
            Some(Value::String(s)) if rules.contains(&Rule::Trim) => s.trim().to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                self.push(field, NOT_A_STRING_MSG);
                return String::new();
            }
        };

        if value.trim().is_empty() {
            if rules.contains(&Rule::Required) {
                self.push(field, REQUIRED_MSG);
            }
            return value;
        }

        let len = value.chars().count();
        for rule in rules {
            match *rule {
                Rule::Trim | Rule::Required | Rule::Range { .. } => {}
                Rule::MinLength(min) if len < min => {
                    self.push(
                        field,
                        format!("Field must be at least {min} characters long."),
                    );
                }
                Rule::MaxLength(max) if len > max => {
                    self.push(field, format!("Field cannot be longer than {max} characters."));
                }
                Rule::Email if !is_valid_email(&value) => self.push(field, INVALID_EMAIL_MSG),
                Rule::EqualTo(other) if self.raw.text(other) != Some(value.as_str()) => {
                    self.push(field, format!("Field must be equal to {other}."));
                }
                _ => {}
            }
        }

        value
    }

    /// Validate an integer field. Accepts JSON integers and numeric strings.
    /// Returns `0` whenever an error was recorded.
    pub fn integer(&mut self, field: &str, rules: &[Rule]) -> i32 {
        let parsed = match self.raw.get(field) {
            None => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(Value::String(s)) => Some(s.trim().parse::<i64>().ok()),
            Some(Value::Number(n)) => Some(n.as_i64()),
            Some(_) => Some(None),
        };

        let value = match parsed {
            None => {
                if rules.contains(&Rule::Required) {
                    self.push(field, REQUIRED_MSG);
                }
                return 0;
            }
            Some(None) => {
                self.push(field, NOT_AN_INTEGER_MSG);
                return 0;
            }
            Some(Some(value)) => value,
        };

        for rule in rules {
            if let Rule::Range { min, max } = *rule
                && !(min..=max).contains(&value)
            {
                self.push(field, format!("Number must be between {min} and {max}."));
                return 0;
            }
        }

        match i32::try_from(value) {
            Ok(v) => v,
            Err(_) => {
                self.push(field, "Number is out of range.");
                0
            }
        }
    }

    /// Build the form if no field failed, otherwise return every error.
    pub fn finish<T>(self, build: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.errors.is_empty() {
            Ok(build())
        } else {
            Err(self.errors)
        }
    }
}

/// Syntactic email check: one `@`, a non-empty local part and a dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    if email.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_alphanumeric() || c == '-')
        })
}
