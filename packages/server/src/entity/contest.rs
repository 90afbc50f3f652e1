use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contest")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    pub start_time: DateTimeUtc,
    pub end_time: DateTimeUtc,

    #[sea_orm(default_value = false)]
    pub is_private: bool,
    /// Retired contests admit nobody through the visitor path.
    #[sea_orm(default_value = false)]
    pub defunct: bool,
    /// Language exclusion mask; NULL falls back to the site default.
    pub langmask: Option<i64>,

    #[sea_orm(has_many)]
    pub problems: HasMany<super::contest_problem::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
