use crate::error::FieldErrors;

use super::form::{Form, RawForm, Rule, Validator};

pub const USERNAME_MAX: usize = 150;
pub const EMAIL_MAX: usize = 120;
pub const PASSWORD_MIN: usize = 6;

const USERNAME_RULES: &[Rule] = &[Rule::Trim, Rule::Required, Rule::MaxLength(USERNAME_MAX)];
const EMAIL_RULES: &[Rule] = &[
    Rule::Trim,
    Rule::Required,
    Rule::MaxLength(EMAIL_MAX),
    Rule::Email,
];
const PASSWORD_RULES: &[Rule] = &[Rule::Required, Rule::MinLength(PASSWORD_MIN)];
const CONFIRM_RULES: &[Rule] = &[Rule::Required, Rule::EqualTo("password")];

/// Request body for user login.
#[derive(utoipa::ToSchema)]
pub struct LoginForm {
    /// Username of the account to log into.
    #[schema(example = "alice")]
    pub username: String,
    /// Account password.
    #[schema(example = "s3cure_pass")]
    pub password: String,
}

impl Form for LoginForm {
    fn from_raw(raw: &RawForm) -> Result<Self, FieldErrors> {
        let mut v = Validator::new(raw);
        let username = v.text("username", &[Rule::Trim, Rule::Required]);
        let password = v.text("password", &[Rule::Required]);
        v.finish(|| LoginForm { username, password })
    }
}

/// Request body for user registration.
#[derive(utoipa::ToSchema)]
pub struct RegisterForm {
    /// Unique username (at most 150 characters).
    #[schema(example = "alice")]
    pub username: String,
    /// Unique email address.
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Password (at least 6 characters).
    #[schema(example = "s3cure_pass")]
    pub password: String,
    /// Must repeat `password` exactly.
    #[schema(example = "s3cure_pass")]
    pub confirm: String,
}

impl Form for RegisterForm {
    fn from_raw(raw: &RawForm) -> Result<Self, FieldErrors> {
        let mut v = Validator::new(raw);
        let username = v.text("username", USERNAME_RULES);
        let email = v.text("email", EMAIL_RULES);
        let password = v.text("password", PASSWORD_RULES);
        let confirm = v.text("confirm", CONFIRM_RULES);
        v.finish(|| RegisterForm {
            username,
            email,
            password,
            confirm,
        })
    }
}
