//! Polymorphic owner reference.

use uuid::Uuid;

use crate::error::domain::DomainError;

/// Owner of a space or domain name: either a user or an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    User(Uuid),
    Organization(Uuid),
}

impl Owner {
    /// Reconstructs the owner from the pair of nullable owner columns.
    /// Exactly one of the two must be set.
    pub fn from_columns(
        owner_user_id: Option<Uuid>,
        owner_organization_id: Option<Uuid>,
    ) -> Result<Self, DomainError> {
        match (owner_user_id, owner_organization_id) {
            (Some(user_id), None) => Ok(Owner::User(user_id)),
            (None, Some(organization_id)) => Ok(Owner::Organization(organization_id)),
            _ => Err(DomainError::InvalidOwner),
        }
    }

    /// Splits the owner back into the nullable column pair.
    pub fn into_columns(self) -> (Option<Uuid>, Option<Uuid>) {
        match self {
            Owner::User(id) => (Some(id), None),
            Owner::Organization(id) => (None, Some(id)),
        }
    }

    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Owner::User(id) => Some(*id),
            Owner::Organization(_) => None,
        }
    }

    pub fn organization_id(&self) -> Option<Uuid> {
        match self {
            Owner::Organization(id) => Some(*id),
            Owner::User(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_exactly_one_owner_column() {
        let user_id = Uuid::new_v4();
        let org_id = Uuid::new_v4();

        assert_eq!(
            Owner::from_columns(Some(user_id), None).unwrap(),
            Owner::User(user_id)
        );
        assert_eq!(
            Owner::from_columns(None, Some(org_id)).unwrap(),
            Owner::Organization(org_id)
        );
        assert!(Owner::from_columns(None, None).is_err());
        assert!(Owner::from_columns(Some(user_id), Some(org_id)).is_err());
    }

    #[test]
    fn round_trips_through_columns() {
        let owner = Owner::Organization(Uuid::new_v4());
        let (user_col, org_col) = owner.into_columns();

        assert_eq!(Owner::from_columns(user_col, org_col).unwrap(), owner);
    }
}
