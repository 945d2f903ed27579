use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{blog_post, review};
use crate::error::{AppError, ErrorBody};
use crate::extractors::form::AppForm;
use crate::extractors::path::IdPath;
use crate::extractors::session::RequestContext;
use crate::models::blog_post::{BlogPostForm, BlogPostResponse};
use crate::models::form::Form;
use crate::models::shared::{CreatedResponse, MessageResponse};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/blogposts",
    tag = "Blog Posts",
    operation_id = "createBlogPost",
    summary = "Create a blog post",
    description = "Creates a post authored by the logged-in user.",
    request_body = BlogPostForm,
    responses(
        (status = 201, description = "Blog post created", body = CreatedResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Not logged in (UNAUTHENTICATED)", body = ErrorBody),
    ),
    security(("session" = [])),
)]
#[instrument(skip(state, ctx, raw), fields(user_id = ?ctx.user_id()))]
pub async fn create_blog_post(
    State(state): State<AppState>,
    ctx: RequestContext,
    AppForm(raw): AppForm,
) -> Result<impl IntoResponse, AppError> {
    let form = BlogPostForm::validate(&raw, "Blog post creation failed")?;
    let user_id = ctx.require_user()?;

    let new_post = blog_post::ActiveModel {
        title: Set(form.title),
        content: Set(form.content),
        user_id: Set(user_id),
        ..Default::default()
    };
    let model = new_post.insert(&state.db).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new("Blog post created successfully", model.id)),
    ))
}

#[utoipa::path(
    get,
    path = "/blogposts/{id}",
    tag = "Blog Posts",
    operation_id = "getBlogPost",
    summary = "Get a blog post by ID",
    params(("id" = i32, Path, description = "Blog post ID")),
    responses(
        (status = 200, description = "Blog post details", body = BlogPostResponse),
        (status = 404, description = "Blog post not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, id), fields(id = id.0))]
pub async fn get_blog_post(
    State(state): State<AppState>,
    id: IdPath,
) -> Result<Json<BlogPostResponse>, AppError> {
    let model = find_blog_post(&state.db, id.0).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/blogposts",
    tag = "Blog Posts",
    operation_id = "listBlogPosts",
    summary = "List all blog posts",
    responses(
        (status = 200, description = "Every blog post in ID order", body = Vec<BlogPostResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_blog_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<BlogPostResponse>>, AppError> {
    let posts = blog_post::Entity::find()
        .order_by_asc(blog_post::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(posts.into_iter().map(BlogPostResponse::from).collect()))
}

#[utoipa::path(
    put,
    path = "/blogposts/{id}",
    tag = "Blog Posts",
    operation_id = "updateBlogPost",
    summary = "Replace a blog post's title and content",
    description = "The post is looked up before the payload is validated, so an unknown ID is reported as 404 even with an invalid body. Ownership is not checked.",
    params(("id" = i32, Path, description = "Blog post ID")),
    request_body = BlogPostForm,
    responses(
        (status = 200, description = "Blog post updated", body = MessageResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Blog post not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, id, raw), fields(id = id.0))]
pub async fn update_blog_post(
    State(state): State<AppState>,
    id: IdPath,
    AppForm(raw): AppForm,
) -> Result<Json<MessageResponse>, AppError> {
    let existing = find_blog_post(&state.db, id.0).await?;
    let form = BlogPostForm::validate(&raw, "Update failed")?;

    let mut active: blog_post::ActiveModel = existing.into();
    active.title = Set(form.title);
    active.content = Set(form.content);
    active.update(&state.db).await?;

    Ok(Json(MessageResponse::new("Blog post updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/blogposts/{id}",
    tag = "Blog Posts",
    operation_id = "deleteBlogPost",
    summary = "Delete a blog post",
    description = "Deletes the post and every review of it in one transaction. Ownership is not checked.",
    params(("id" = i32, Path, description = "Blog post ID")),
    responses(
        (status = 200, description = "Blog post deleted", body = MessageResponse),
        (status = 404, description = "Blog post not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, id), fields(id = id.0))]
pub async fn delete_blog_post(
    State(state): State<AppState>,
    id: IdPath,
) -> Result<Json<MessageResponse>, AppError> {
    let txn = state.db.begin().await?;
    let _post = find_blog_post(&txn, id.0).await?;

    let removed = review::Entity::delete_many()
        .filter(review::Column::BlogpostId.eq(id.0))
        .exec(&txn)
        .await?;
    blog_post::Entity::delete_by_id(id.0).exec(&txn).await?;

    txn.commit().await?;
    tracing::info!(reviews = removed.rows_affected, "Blog post deleted");

    Ok(Json(MessageResponse::new("Blog post deleted successfully")))
}

async fn find_blog_post<C: ConnectionTrait>(db: &C, id: i32) -> Result<blog_post::Model, AppError> {
    blog_post::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog post not found".into()))
}
