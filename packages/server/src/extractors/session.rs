use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::error::AppError;

const SESSION_USER_ID: &str = "user_id";

/// Per-request view of the caller's login session.
///
/// Handlers take this as a parameter instead of reading shared state; the
/// authenticated identity (if any) is resolved once when the request arrives.
pub struct RequestContext {
    session: Session,
    user_id: Option<i32>,
}

impl RequestContext {
    /// ID of the logged-in user, if any.
    pub fn user_id(&self) -> Option<i32> {
        self.user_id
    }

    /// Returns the logged-in user's ID or `AppError::Unauthenticated`.
    pub fn require_user(&self) -> Result<i32, AppError> {
        self.user_id.ok_or(AppError::Unauthenticated)
    }

    /// Bind the session to `user_id`. The session ID is rotated first.
    pub async fn sign_in(&mut self, user_id: i32) -> Result<(), AppError> {
        self.session.cycle_id().await?;
        self.session.insert(SESSION_USER_ID, user_id).await?;
        self.user_id = Some(user_id);
        Ok(())
    }

    /// Drop all session data and the cookie.
    pub async fn sign_out(&mut self) -> Result<(), AppError> {
        self.session.flush().await?;
        self.user_id = None;
        Ok(())
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Internal(msg.to_string()))?;

        let user_id = session.get::<i32>(SESSION_USER_ID).await?;

        Ok(RequestContext { session, user_id })
    }
}
