//! Domain-name aggregate.
//!
//! A domain name is a name/TLD pair, optionally assigned to a space. At most
//! one domain name per space is primary; the primary one can be neither
//! transferred to another space nor removed while it holds the marking.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    dto::domain_name::DomainNameDto,
    error::domain::DomainError,
    model::event::{DomainEvent, RecordedEvents},
};

#[derive(Debug, Clone)]
pub struct DomainName {
    pub id: Uuid,
    pub name: String,
    pub tld: String,
    pub space_id: Option<Uuid>,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub events: RecordedEvents,
}

impl DomainName {
    /// Registers an unassigned domain name. Suffix validation happens in the
    /// service against the public-suffix list before this factory is called.
    pub fn register(id: Uuid, name: impl Into<String>, tld: impl Into<String>) -> Self {
        let now = Utc::now();
        let name = name.into();
        let tld = tld.into();

        let mut domain_name = Self {
            id,
            name,
            tld,
            space_id: None,
            is_primary: false,
            created_at: now,
            updated_at: now,
            events: RecordedEvents::default(),
        };
        domain_name.events.record(DomainEvent::DomainNameRegistered {
            domain_name_id: id,
            fqdn: domain_name.fqdn(),
        });

        domain_name
    }

    /// Fully qualified name, e.g. `example.com`.
    pub fn fqdn(&self) -> String {
        format!("{}.{}", self.name, self.tld)
    }

    /// Assigns an unassigned domain name to a space.
    ///
    /// The first domain name of a space becomes primary; the caller passes
    /// `primary` accordingly.
    pub fn assign_to_space(&mut self, space_id: Uuid, primary: bool) {
        self.space_id = Some(space_id);
        self.updated_at = Utc::now();
        self.events.record(DomainEvent::DomainNameAssigned {
            domain_name_id: self.id,
            space_id,
        });

        if primary {
            self.is_primary = true;
            self.events.record(DomainEvent::DomainNamePrimaryChanged {
                space_id,
                domain_name_id: self.id,
            });
        }
    }

    /// Marks this domain name primary for its space. The service clears the
    /// previous primary in the same operation.
    pub fn mark_primary(&mut self) -> Result<(), DomainError> {
        let space_id = self.space_id.ok_or(DomainError::DomainNameNotAssignedToSpace {
            domain_name_id: self.id,
            space_id: Uuid::nil(),
        })?;

        if self.is_primary {
            return Ok(());
        }

        self.is_primary = true;
        self.updated_at = Utc::now();
        self.events.record(DomainEvent::DomainNamePrimaryChanged {
            space_id,
            domain_name_id: self.id,
        });

        Ok(())
    }

    /// Clears the primary marking during a swap. Records no event; the swap
    /// event is recorded on the newly primary domain name.
    pub fn unmark_primary(&mut self) {
        self.is_primary = false;
        self.updated_at = Utc::now();
    }

    /// Transfers the domain name to another space.
    ///
    /// Blocked while primary; the in-use check against dependent entities
    /// happens in the service before this method is called.
    pub fn transfer_to(&mut self, to_space_id: Uuid) -> Result<(), DomainError> {
        let from_space_id = match self.space_id {
            Some(id) => id,
            None => {
                // Unassigned: a transfer degenerates to an assignment.
                self.assign_to_space(to_space_id, false);
                return Ok(());
            }
        };

        if self.is_primary {
            return Err(DomainError::CannotTransferPrimaryDomainName {
                domain_name_id: self.id,
                space_id: from_space_id,
            });
        }

        self.space_id = Some(to_space_id);
        self.updated_at = Utc::now();
        self.events.record(DomainEvent::DomainNameTransferred {
            domain_name_id: self.id,
            from_space_id,
            to_space_id,
        });

        Ok(())
    }

    /// Checks the removal invariant and records the removal event.
    pub fn prepare_removal(&mut self) -> Result<(), DomainError> {
        if self.is_primary {
            if let Some(space_id) = self.space_id {
                return Err(DomainError::CannotRemovePrimaryDomainName {
                    domain_name_id: self.id,
                    space_id,
                });
            }
        }

        self.events.record(DomainEvent::DomainNameRemoved {
            domain_name_id: self.id,
        });

        Ok(())
    }

    pub fn into_dto(self) -> DomainNameDto {
        DomainNameDto {
            id: self.id,
            fqdn: self.fqdn(),
            name: self.name,
            tld: self.tld,
            space_id: self.space_id,
            primary: self.is_primary,
        }
    }

    pub fn from_entity(entity: entity::domain_name::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            tld: entity.tld,
            space_id: entity.space_id,
            is_primary: entity.is_primary,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            events: RecordedEvents::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assigned_primary() -> (DomainName, Uuid) {
        let space_id = Uuid::new_v4();
        let mut domain_name = DomainName::register(Uuid::new_v4(), "example", "com");
        domain_name.assign_to_space(space_id, true);
        domain_name.events.drain();
        (domain_name, space_id)
    }

    #[test]
    fn primary_domain_name_cannot_be_transferred() {
        let (mut domain_name, space_id) = assigned_primary();

        let err = domain_name.transfer_to(Uuid::new_v4()).unwrap_err();

        assert_eq!(
            err,
            DomainError::CannotTransferPrimaryDomainName {
                domain_name_id: domain_name.id,
                space_id,
            }
        );
        assert_eq!(domain_name.space_id, Some(space_id));
    }

    #[test]
    fn primary_domain_name_cannot_be_removed() {
        let (mut domain_name, space_id) = assigned_primary();

        let err = domain_name.prepare_removal().unwrap_err();

        assert_eq!(
            err,
            DomainError::CannotRemovePrimaryDomainName {
                domain_name_id: domain_name.id,
                space_id,
            }
        );
        assert!(domain_name.events.is_empty());
    }

    #[test]
    fn secondary_domain_name_transfers_with_event() {
        let from = Uuid::new_v4();
        let to = Uuid::new_v4();
        let mut domain_name = DomainName::register(Uuid::new_v4(), "example", "com");
        domain_name.assign_to_space(from, false);
        domain_name.events.drain();

        domain_name.transfer_to(to).unwrap();

        assert_eq!(domain_name.space_id, Some(to));
        assert_eq!(
            domain_name.events.as_slice(),
            &[DomainEvent::DomainNameTransferred {
                domain_name_id: domain_name.id,
                from_space_id: from,
                to_space_id: to,
            }]
        );
    }

    #[test]
    fn marking_primary_twice_records_once() {
        let (mut domain_name, _) = assigned_primary();

        domain_name.mark_primary().unwrap();

        assert!(domain_name.events.is_empty());
    }
}
