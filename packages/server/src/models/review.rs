use serde::Serialize;

use crate::entity::review;
use crate::error::FieldErrors;

use super::form::{Form, RawForm, Rule, Validator};

pub const CONTENT_MAX: usize = 500;
pub const RATING_MIN: i64 = 1;
pub const RATING_MAX: i64 = 5;

const CONTENT_RULES: &[Rule] = &[Rule::Required, Rule::MaxLength(CONTENT_MAX)];
const RATING_RULES: &[Rule] = &[
    Rule::Required,
    Rule::Range {
        min: RATING_MIN,
        max: RATING_MAX,
    },
];
const BLOGPOST_ID_RULES: &[Rule] = &[
    Rule::Required,
    Rule::Range {
        min: 1,
        max: i32::MAX as i64,
    },
];

/// Request body for updating a review.
#[derive(Debug, Clone, PartialEq, Eq, utoipa::ToSchema)]
pub struct ReviewForm {
    /// Review text (1-500 characters).
    #[schema(example = "Great read.")]
    pub content: String,
    /// Rating from 1 to 5 inclusive.
    #[schema(example = 4, minimum = 1, maximum = 5)]
    pub rating: i32,
}

impl ReviewForm {
    fn collect(v: &mut Validator<'_>) -> (String, i32) {
        let content = v.text("content", CONTENT_RULES);
        let rating = v.integer("rating", RATING_RULES);
        (content, rating)
    }
}

impl Form for ReviewForm {
    fn from_raw(raw: &RawForm) -> Result<Self, FieldErrors> {
        let mut v = Validator::new(raw);
        let (content, rating) = Self::collect(&mut v);
        v.finish(|| ReviewForm { content, rating })
    }
}

/// Request body for creating a review.
#[derive(Debug, Clone, PartialEq, Eq, utoipa::ToSchema)]
pub struct CreateReviewForm {
    /// Review text (1-500 characters).
    #[schema(example = "Great read.")]
    pub content: String,
    /// Rating from 1 to 5 inclusive.
    #[schema(example = 4, minimum = 1, maximum = 5)]
    pub rating: i32,
    /// ID of the reviewed blog post.
    #[schema(example = 1)]
    pub blogpost_id: i32,
}

impl Form for CreateReviewForm {
    fn from_raw(raw: &RawForm) -> Result<Self, FieldErrors> {
        let mut v = Validator::new(raw);
        let (content, rating) = ReviewForm::collect(&mut v);
        let blogpost_id = v.integer("blogpost_id", BLOGPOST_ID_RULES);
        v.finish(|| CreateReviewForm {
            content,
            rating,
            blogpost_id,
        })
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ReviewResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Great read.")]
    pub content: String,
    #[schema(example = 4)]
    pub rating: i32,
    /// Reviewer's user ID.
    #[schema(example = 42)]
    pub user_id: i32,
    #[schema(example = 1)]
    pub blogpost_id: i32,
}

impl From<review::Model> for ReviewResponse {
    fn from(m: review::Model) -> Self {
        Self {
            id: m.id,
            content: m.content,
            rating: m.rating,
            user_id: m.user_id,
            blogpost_id: m.blogpost_id,
        }
    }
}
