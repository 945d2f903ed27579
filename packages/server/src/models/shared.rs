use serde::Serialize;

/// Confirmation returned by update, delete and session endpoints.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Blog post updated successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Confirmation returned by create endpoints.
#[derive(Serialize, utoipa::ToSchema)]
pub struct CreatedResponse {
    #[schema(example = "Blog post created successfully")]
    pub message: String,
    /// ID of the newly created row.
    #[schema(example = 7)]
    pub id: i32,
}

impl CreatedResponse {
    pub fn new(message: impl Into<String>, id: i32) -> Self {
        Self {
            message: message.into(),
            id,
        }
    }
}
