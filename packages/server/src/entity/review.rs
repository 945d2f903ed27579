use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "String(StringLen::N(500))")]
    pub content: String,
    pub rating: i32, // 1..=5

    pub user_id: i32,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub reviewer: HasOne<super::user::Entity>,

    pub blogpost_id: i32,
    #[sea_orm(belongs_to, from = "blogpost_id", to = "id")]
    pub blog_post: HasOne<super::blog_post::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
