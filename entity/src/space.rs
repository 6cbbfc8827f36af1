use sea_orm::entity::prelude::*;

/// Webhosting account. Owned by either a user or an organization, exactly
/// one of the two owner columns is set.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "space")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_user_id: Option<Uuid>,
    pub owner_organization_id: Option<Uuid>,
    pub plan_id: Option<Uuid>,
    /// Effective constraint set serialized as JSON (copied from the plan on
    /// assignment, or set individually).
    pub constraints: Json,
    pub marked_for_removal_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerUserId",
        to = "super::user::Column::Id"
    )]
    OwnerUser,
    #[sea_orm(
        belongs_to = "super::organization::Entity",
        from = "Column::OwnerOrganizationId",
        to = "super::organization::Column::Id"
    )]
    OwnerOrganization,
    #[sea_orm(
        belongs_to = "super::plan::Entity",
        from = "Column::PlanId",
        to = "super::plan::Column::Id"
    )]
    Plan,
    #[sea_orm(has_many = "super::domain_name::Entity")]
    DomainName,
}

impl Related<super::organization::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OwnerOrganization.def()
    }
}

impl Related<super::plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plan.def()
    }
}

impl Related<super::domain_name::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DomainName.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
