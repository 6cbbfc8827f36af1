//! Sub-domains of a space's domain names.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::dto::sub_domain::SubDomainDto;

#[derive(Debug, Clone)]
pub struct SubDomain {
    pub id: Uuid,
    pub space_id: Uuid,
    pub domain_name_id: Uuid,
    /// Host label, e.g. `blog` of `blog.example.com`.
    pub host: String,
    pub document_root: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SubDomain {
    pub fn register(
        id: Uuid,
        space_id: Uuid,
        domain_name_id: Uuid,
        host: impl Into<String>,
        document_root: Option<String>,
    ) -> Self {
        Self {
            id,
            space_id,
            domain_name_id,
            host: host.into(),
            document_root,
            created_at: Utc::now(),
        }
    }

    pub fn into_dto(self) -> SubDomainDto {
        SubDomainDto {
            id: self.id,
            space_id: self.space_id,
            domain_name_id: self.domain_name_id,
            host: self.host,
            document_root: self.document_root,
        }
    }

    pub fn from_entity(entity: entity::sub_domain::Model) -> Self {
        Self {
            id: entity.id,
            space_id: entity.space_id,
            domain_name_id: entity.domain_name_id,
            host: entity.host,
            document_root: entity.document_root,
            created_at: entity.created_at,
        }
    }
}

/// Parameters for registering a sub-domain.
#[derive(Debug, Clone)]
pub struct RegisterSubDomainParam {
    pub id: Uuid,
    pub space_id: Uuid,
    pub domain_name_id: Uuid,
    pub host: String,
    pub document_root: Option<String>,
}
