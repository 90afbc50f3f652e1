use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Template fragment wrapped around user code for one (problem, language).
///
/// Fragments are applied in ascending `id` order.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "prefile")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(indexed)]
    pub problem_id: i32,
    #[sea_orm(belongs_to, from = "problem_id", to = "id")]
    pub problem: HasOne<super::problem::Entity>,

    pub language: i32,
    /// true: placed before the user code, false: after it.
    pub prepend: bool,

    #[sea_orm(column_type = "Text")]
    pub code: String,
}

impl ActiveModelBehavior for ActiveModel {}
