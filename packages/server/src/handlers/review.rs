use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{blog_post, review};
use crate::error::{AppError, ErrorBody, FieldErrors};
use crate::extractors::form::AppForm;
use crate::extractors::path::IdPath;
use crate::extractors::session::RequestContext;
use crate::models::form::Form;
use crate::models::review::{CreateReviewForm, ReviewForm, ReviewResponse};
use crate::models::shared::{CreatedResponse, MessageResponse};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/reviews",
    tag = "Reviews",
    operation_id = "createReview",
    summary = "Review a blog post",
    description = "Creates a review by the logged-in user. `blogpost_id` must name an existing post.",
    request_body = CreateReviewForm,
    responses(
        (status = 201, description = "Review created", body = CreatedResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Not logged in (UNAUTHENTICATED)", body = ErrorBody),
    ),
    security(("session" = [])),
)]
#[instrument(skip(state, ctx, raw), fields(user_id = ?ctx.user_id()))]
pub async fn create_review(
    State(state): State<AppState>,
    ctx: RequestContext,
    AppForm(raw): AppForm,
) -> Result<impl IntoResponse, AppError> {
    const CONTEXT: &str = "Review creation failed";
    let form = CreateReviewForm::validate(&raw, CONTEXT)?;
    let user_id = ctx.require_user()?;

    let post_exists = blog_post::Entity::find_by_id(form.blogpost_id)
        .count(&state.db)
        .await?
        > 0;
    if !post_exists {
        return Err(missing_blog_post(CONTEXT));
    }

    let new_review = review::ActiveModel {
        content: Set(form.content),
        rating: Set(form.rating),
        user_id: Set(user_id),
        blogpost_id: Set(form.blogpost_id),
        ..Default::default()
    };
    let model = insert_review(&state.db, new_review, CONTEXT).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new("Review created successfully", model.id)),
    ))
}

#[utoipa::path(
    get,
    path = "/reviews/{id}",
    tag = "Reviews",
    operation_id = "getReview",
    summary = "Get a review by ID",
    params(("id" = i32, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review details", body = ReviewResponse),
        (status = 404, description = "Review not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, id), fields(id = id.0))]
pub async fn get_review(
    State(state): State<AppState>,
    id: IdPath,
) -> Result<Json<ReviewResponse>, AppError> {
    let model = find_review(&state.db, id.0).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/reviews",
    tag = "Reviews",
    operation_id = "listReviews",
    summary = "List all reviews",
    responses(
        (status = 200, description = "Every review in ID order", body = Vec<ReviewResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_reviews(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReviewResponse>>, AppError> {
    let reviews = review::Entity::find()
        .order_by_asc(review::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}

#[utoipa::path(
    put,
    path = "/reviews/{id}",
    tag = "Reviews",
    operation_id = "updateReview",
    summary = "Replace a review's content and rating",
    description = "The review is looked up before the payload is validated. Ownership is not checked.",
    params(("id" = i32, Path, description = "Review ID")),
    request_body = ReviewForm,
    responses(
        (status = 200, description = "Review updated", body = MessageResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Review not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, id, raw), fields(id = id.0))]
pub async fn update_review(
    State(state): State<AppState>,
    id: IdPath,
    AppForm(raw): AppForm,
) -> Result<Json<MessageResponse>, AppError> {
    let existing = find_review(&state.db, id.0).await?;
    let form = ReviewForm::validate(&raw, "Update failed")?;

    let mut active: review::ActiveModel = existing.into();
    active.content = Set(form.content);
    active.rating = Set(form.rating);
    active.update(&state.db).await?;

    Ok(Json(MessageResponse::new("Review updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/reviews/{id}",
    tag = "Reviews",
    operation_id = "deleteReview",
    summary = "Delete a review",
    description = "Ownership is not checked.",
    params(("id" = i32, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review deleted", body = MessageResponse),
        (status = 404, description = "Review not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, id), fields(id = id.0))]
pub async fn delete_review(
    State(state): State<AppState>,
    id: IdPath,
) -> Result<Json<MessageResponse>, AppError> {
    let existing = find_review(&state.db, id.0).await?;
    existing.delete(&state.db).await?;

    Ok(Json(MessageResponse::new("Review deleted successfully")))
}

/// Insert a review. The post can vanish after the existence check, so a
/// foreign key violation is reported the same way as a missing post.
async fn insert_review<C: ConnectionTrait>(
    db: &C,
    review: review::ActiveModel,
    context: &'static str,
) -> Result<review::Model, AppError> {
    review.insert(db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            tracing::debug!("Blog post deleted before review insert");
            missing_blog_post(context)
        }
        _ => AppError::from(e),
    })
}

fn missing_blog_post(context: &'static str) -> AppError {
    let mut errors = FieldErrors::new();
    errors.insert(
        "blogpost_id".into(),
        vec!["Blog post does not exist.".into()],
    );
    AppError::validation(context, errors)
}

async fn find_review<C: ConnectionTrait>(db: &C, id: i32) -> Result<review::Model, AppError> {
    review::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".into()))
}
