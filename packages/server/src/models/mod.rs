pub mod auth;
pub mod blog_post;
pub mod form;
pub mod review;
pub mod shared;
pub mod user;
