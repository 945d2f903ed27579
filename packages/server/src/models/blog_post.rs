use serde::Serialize;

use crate::entity::blog_post;
use crate::error::FieldErrors;

use super::form::{Form, RawForm, Rule, Validator};

pub const TITLE_MAX: usize = 100;
pub const CONTENT_MAX: usize = 1000;

const TITLE_RULES: &[Rule] = &[Rule::Trim, Rule::Required, Rule::MaxLength(TITLE_MAX)];
const CONTENT_RULES: &[Rule] = &[Rule::Required, Rule::MaxLength(CONTENT_MAX)];

/// Request body for creating or replacing a blog post.
#[derive(Debug, Clone, PartialEq, Eq, utoipa::ToSchema)]
pub struct BlogPostForm {
    /// Post title (1-100 characters).
    #[schema(example = "Hello, world")]
    pub title: String,
    /// Post body (1-1000 characters).
    #[schema(example = "My first post.")]
    pub content: String,
}

impl Form for BlogPostForm {
    fn from_raw(raw: &RawForm) -> Result<Self, FieldErrors> {
        let mut v = Validator::new(raw);
        let title = v.text("title", TITLE_RULES);
        let content = v.text("content", CONTENT_RULES);
        v.finish(|| BlogPostForm {
            title,
            content,
        })
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct BlogPostResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Hello, world")]
    pub title: String,
    #[schema(example = "My first post.")]
    pub content: String,
    /// Author's user ID.
    #[schema(example = 42)]
    pub user_id: i32,
}

impl From<blog_post::Model> for BlogPostResponse {
    fn from(m: blog_post::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            content: m.content,
            user_id: m.user_id,
        }
    }
}
