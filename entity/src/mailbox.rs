use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "mailbox")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub space_id: Uuid,
    pub domain_name_id: Uuid,
    /// Local part of the address, unique per domain name.
    pub address: String,
    /// Mailbox size quota in bytes.
    pub size_quota: i64,
    pub password_hash: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::space::Entity",
        from = "Column::SpaceId",
        to = "super::space::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Space,
    #[sea_orm(
        belongs_to = "super::domain_name::Entity",
        from = "Column::DomainNameId",
        to = "super::domain_name::Column::Id"
    )]
    DomainName,
}

impl Related<super::space::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Space.def()
    }
}

impl Related<super::domain_name::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DomainName.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
