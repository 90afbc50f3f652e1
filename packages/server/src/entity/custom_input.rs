use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Caller-provided stdin for an instanced run.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "custom_input")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub solution_id: i32,
    #[sea_orm(belongs_to, from = "solution_id", to = "id")]
    pub solution: HasOne<super::solution::Entity>,

    #[sea_orm(column_type = "Text")]
    pub input_text: String,
}

impl ActiveModelBehavior for ActiveModel {}
