pub mod blog_post;
pub mod review;
pub mod user;
