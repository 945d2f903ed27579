use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::*;
use tracing::instrument;

use crate::entity::user;
use crate::error::{AppError, ErrorBody, FieldErrors};
use crate::extractors::form::AppForm;
use crate::extractors::session::RequestContext;
use crate::models::auth::{LoginForm, RegisterForm};
use crate::models::form::Form;
use crate::models::shared::{CreatedResponse, MessageResponse};
use crate::state::AppState;
use crate::utils::hash;

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    operation_id = "login",
    summary = "Log in",
    description = "Verifies the username and password and binds the session cookie to the user. Unknown usernames and wrong passwords produce the same response.",
    request_body = LoginForm,
    responses(
        (status = 200, description = "Logged in", body = MessageResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Invalid credentials (INVALID_CREDENTIALS)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, ctx, raw))]
pub async fn login(
    State(state): State<AppState>,
    mut ctx: RequestContext,
    AppForm(raw): AppForm,
) -> Result<Json<MessageResponse>, AppError> {
    let form = LoginForm::validate(&raw, "Login failed")?;

    let found = user::Entity::find()
        .filter(user::Column::Username.eq(form.username.as_str()))
        .one(&state.db)
        .await?;

    let Some(user) = found else {
        hash::verify_dummy(&form.password);
        tracing::debug!("Login for unknown username");
        return Err(AppError::InvalidCredentials);
    };

    let is_valid = hash::verify_password(&form.password, &user.password)
        .map_err(|e| AppError::Internal(format!("Password verify error: {}", e)))?;

    if !is_valid {
        return Err(AppError::InvalidCredentials);
    }

    ctx.sign_in(user.id).await?;
    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(MessageResponse::new("Logged in successfully")))
}

#[utoipa::path(
    post,
    path = "/logout",
    tag = "Auth",
    operation_id = "logout",
    summary = "Log out",
    description = "Clears the session. Succeeds whether or not a user was logged in.",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
    ),
)]
#[instrument(skip(ctx), fields(user_id = ?ctx.user_id()))]
pub async fn logout(mut ctx: RequestContext) -> Result<Json<MessageResponse>, AppError> {
    ctx.sign_out().await?;
    Ok(Json(MessageResponse::new("Logged out successfully")))
}

#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    operation_id = "register",
    summary = "Register a new user",
    description = "Creates a user with a hashed password. Username and email must be unused; `confirm` must repeat `password`.",
    request_body = RegisterForm,
    responses(
        (status = 201, description = "User created", body = CreatedResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Username or email taken concurrently (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, raw))]
pub async fn register(
    State(state): State<AppState>,
    AppForm(raw): AppForm,
) -> Result<impl IntoResponse, AppError> {
    const CONTEXT: &str = "Registration failed";
    let form = RegisterForm::validate(&raw, CONTEXT)?;

    let mut errors = FieldErrors::new();
    let username_taken = user::Entity::find()
        .filter(user::Column::Username.eq(form.username.as_str()))
        .count(&state.db)
        .await?
        > 0;
    if username_taken {
        errors.insert("username".into(), vec!["Username is already taken.".into()]);
    }
    let email_taken = user::Entity::find()
        .filter(user::Column::Email.eq(form.email.as_str()))
        .count(&state.db)
        .await?
        > 0;
    if email_taken {
        errors.insert("email".into(), vec!["Email is already registered.".into()]);
    }
    if !errors.is_empty() {
        return Err(AppError::validation(CONTEXT, errors));
    }

    let hash = hash::hash_password(&form.password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

    let new_user = user::ActiveModel {
        username: Set(form.username),
        email: Set(form.email),
        password: Set(hash),
        ..Default::default()
    };

    let user = new_user.insert(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            tracing::debug!("Registration race condition: unique constraint caught on insert");
            AppError::Conflict("Username or email is already taken".into())
        }
        _ => AppError::from(e),
    })?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new("User registered successfully", user.id)),
    ))
}
