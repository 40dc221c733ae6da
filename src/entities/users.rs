use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,

    /// Argon2id password hash
    pub password_hash: String,

    pub avatar_url: String,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::saved_items::Entity")]
    SavedItems,
    #[sea_orm(has_many = "super::finished_items::Entity")]
    FinishedItems,
}

impl Related<super::saved_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SavedItems.def()
    }
}

impl Related<super::finished_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FinishedItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
