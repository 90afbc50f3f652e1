use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "solution")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Signed problem reference. Negative for instanced (custom input) runs,
    /// so this column deliberately has no foreign key.
    #[sea_orm(indexed)]
    pub problem_id: i32,
    #[sea_orm(indexed)]
    pub user_id: i32,
    pub language: i32,
    pub ip: String,
    /// Length of the submitted text in UTF-16 code units.
    pub code_length: i32,
    /// Only set for standalone submissions.
    pub share: Option<bool>,

    /// Contest and problem number for contest submissions.
    #[sea_orm(indexed)]
    pub contest_id: Option<i32>,
    /// Topic and problem number for topic submissions.
    #[sea_orm(indexed)]
    pub topic_id: Option<i32>,
    pub num: Option<i32>,

    /// Claimed judge host, or the unassigned marker.
    #[sea_orm(indexed)]
    pub judger: String,
    pub fingerprint: String,

    #[sea_orm(has_one)]
    pub user_source: HasOne<super::source_code_user::Entity>,
    #[sea_orm(has_one)]
    pub source: HasOne<super::source_code::Entity>,
    #[sea_orm(has_one)]
    pub custom_input: HasOne<super::custom_input::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
