use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde_json::Value;

use crate::error::AppError;
use crate::models::form::RawForm;

/// Reads the request body as an unvalidated [`RawForm`].
///
/// Body-level problems (wrong content type, broken JSON) become
/// `AppError::MalformedRequest`. Field checks are left to the handler so it
/// can look up the target row first.
pub struct AppForm(pub RawForm);

impl<S> FromRequest<S> for AppForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| AppError::MalformedRequest(e.body_text()))?;
        Ok(AppForm(RawForm::from(value)))
    }
}
