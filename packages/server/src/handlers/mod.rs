pub mod auth;
pub mod blog_post;
pub mod review;
pub mod user;

/// Liveness check.
pub async fn index() -> &'static str {
    "Hello, world!"
}
