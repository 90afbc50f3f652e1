use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "problem")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    /// Hidden from the public problem set. Editors, admins and the problem's
    /// makers can still submit.
    #[sea_orm(default_value = false)]
    pub defunct: bool,

    #[sea_orm(has_many)]
    pub templates: HasMany<super::prefile::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
