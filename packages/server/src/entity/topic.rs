use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A special subject: an open-ended themed problem list.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "topic")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    #[sea_orm(default_value = false)]
    pub is_private: bool,
    #[sea_orm(default_value = false)]
    pub defunct: bool,
    /// Language exclusion mask; NULL falls back to the site default.
    pub langmask: Option<i64>,

    #[sea_orm(has_many)]
    pub problems: HasMany<super::topic_problem::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
