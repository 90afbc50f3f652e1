use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "topic_problem")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub topic_id: i32,
    #[sea_orm(primary_key)]
    pub num: i32,
    #[sea_orm(belongs_to, from = "topic_id", to = "id")]
    pub topic: HasOne<super::topic::Entity>,

    #[sea_orm(indexed)]
    pub problem_id: i32,
}

impl ActiveModelBehavior for ActiveModel {}
