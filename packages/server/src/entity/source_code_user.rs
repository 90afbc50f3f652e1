use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Source exactly as the user submitted it.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "source_code_user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub solution_id: i32,
    #[sea_orm(belongs_to, from = "solution_id", to = "id")]
    pub solution: HasOne<super::solution::Entity>,

    #[sea_orm(column_type = "Text")]
    pub source: String,
}

impl ActiveModelBehavior for ActiveModel {}
