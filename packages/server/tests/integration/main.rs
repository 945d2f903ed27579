mod auth;
mod blog_post;
mod seed;
mod user;
