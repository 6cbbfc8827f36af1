use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DomainNameDto {
    pub id: Uuid,
    pub fqdn: String,
    pub name: String,
    pub tld: String,
    pub space_id: Option<Uuid>,
    pub primary: bool,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterDomainNameDto {
    /// Full domain name, e.g. `example.co.uk`. Split against the
    /// public-suffix list during registration.
    pub fqdn: String,
    pub space_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AssignDomainNameDto {
    pub space_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TransferDomainNameDto {
    pub to_space_id: Uuid,
}
