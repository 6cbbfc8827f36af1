use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "domain_name")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Registrable name without the suffix, e.g. `example` of `example.com`.
    pub name: String,
    /// Public suffix, e.g. `com` or `co.uk`.
    pub tld: String,
    pub space_id: Option<Uuid>,
    /// At most one primary domain name per space.
    pub is_primary: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::space::Entity",
        from = "Column::SpaceId",
        to = "super::space::Column::Id"
    )]
    Space,
    #[sea_orm(has_many = "super::mailbox::Entity")]
    Mailbox,
    #[sea_orm(has_many = "super::ftp_user::Entity")]
    FtpUser,
    #[sea_orm(has_many = "super::sub_domain::Entity")]
    SubDomain,
}

impl Related<super::space::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Space.def()
    }
}

impl Related<super::mailbox::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Mailbox.def()
    }
}

impl Related<super::ftp_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FtpUser.def()
    }
}

impl Related<super::sub_domain::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubDomain.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
