use axum::routing::get;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::handlers::{self, auth::*, blog_post::*, review::*, user::*};
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .route("/", get(handlers::index))
        .routes(routes!(login))
        .routes(routes!(logout))
        .routes(routes!(register))
        .routes(routes!(list_users))
        .routes(routes!(get_user))
        .routes(routes!(list_blog_posts, create_blog_post))
        .routes(routes!(get_blog_post, update_blog_post, delete_blog_post))
        .routes(routes!(list_reviews, create_review))
        .routes(routes!(get_review, update_review, delete_review))
}
